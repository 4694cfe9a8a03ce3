//! Approval panel for borrow requests.
//!
//! The panel mirrors the server's request list. After an approve or reject
//! call succeeds, only the matching row's status is replaced with the one the
//! server returned; every other row is left exactly as it was. A request id
//! can have at most one decision in flight at a time.

use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::{BorrowRequest, InventoryClient, RequestAction, RequestStatus};
use crate::error::{Error, Result, UNKNOWN_ERROR};

/// Filter tabs above the request table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    pub const TABS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(RequestStatus::Pending),
        StatusFilter::Only(RequestStatus::Approved),
        StatusFilter::Only(RequestStatus::Rejected),
    ];

    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Number of requests in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Local state of the approvals screen
#[derive(Debug, Clone, Default)]
pub struct AdminPanel {
    requests: Vec<BorrowRequest>,
    error: Option<String>,
    action_error: Option<String>,
    loading: bool,
    processing: HashSet<String>,
    filter: StatusFilter,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> &[BorrowRequest] {
        &self.requests
    }

    /// Error from the last list fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error from the last approve/reject call
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Rows passing the current filter
    pub fn visible(&self) -> Vec<&BorrowRequest> {
        self.requests
            .iter()
            .filter(|r| self.filter.matches(r.status))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.requests
            .iter()
            .fold(StatusCounts::default(), |mut counts, r| {
                match r.status {
                    RequestStatus::Pending => counts.pending += 1,
                    RequestStatus::Approved => counts.approved += 1,
                    RequestStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Banner text while anything is pending
    pub fn pending_notice(&self) -> Option<String> {
        match self.counts().pending {
            0 => None,
            1 => Some("You have 1 pending request awaiting action.".to_string()),
            n => Some(format!("You have {} pending requests awaiting action.", n)),
        }
    }

    /// Placeholder when the filtered table is empty
    pub fn empty_message(&self) -> String {
        match self.filter {
            StatusFilter::All => "No requests found.".to_string(),
            StatusFilter::Only(status) => {
                format!("No {} requests found.", status.as_str().to_lowercase())
            }
        }
    }

    pub fn is_processing(&self, request_id: &str) -> bool {
        self.processing.contains(request_id)
    }

    /// Whether the approve/reject buttons are enabled for a row
    pub fn can_act(&self, request_id: &str) -> bool {
        !self.is_processing(request_id)
            && self
                .find(request_id)
                .map_or(false, |r| r.status == RequestStatus::Pending)
    }

    fn find(&self, request_id: &str) -> Option<&BorrowRequest> {
        self.requests.iter().find(|r| r.request_id == request_id)
    }

    fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the whole list, or keep it and record the failure
    pub fn replace(&mut self, result: Result<Vec<BorrowRequest>>, base_url: &str) {
        self.loading = false;
        match result {
            Ok(requests) => self.requests = requests,
            Err(Error::Api { message, .. }) if message == UNKNOWN_ERROR => {
                self.error = Some("Failed to load requests".to_string())
            }
            Err(e) => self.error = Some(e.user_message(base_url)),
        }
    }

    /// Mark `request_id` as in flight
    pub fn begin_action(&mut self, request_id: &str) -> Result<()> {
        if self.is_processing(request_id) {
            return Err(Error::Busy(request_id.to_string()));
        }
        match self.find(request_id) {
            None => Err(Error::general(format!("Unknown request {}", request_id))),
            Some(r) if r.status != RequestStatus::Pending => Err(Error::validation(format!(
                "Request {} is already {}",
                request_id,
                r.status.as_str().to_lowercase()
            ))),
            Some(_) => {
                self.processing.insert(request_id.to_string());
                self.action_error = None;
                Ok(())
            }
        }
    }

    /// Settle an in-flight action with the server's answer
    pub fn finish_action(
        &mut self,
        request_id: &str,
        result: &Result<RequestStatus>,
        base_url: &str,
    ) {
        self.processing.remove(request_id);
        match result {
            Ok(status) => {
                self.apply_status(request_id, *status);
            }
            Err(e) => self.action_error = Some(e.user_message(base_url)),
        }
    }

    /// Set the status of the row with `request_id`.
    ///
    /// Returns `false`, changing nothing, when no row has that id.
    pub fn apply_status(&mut self, request_id: &str, status: RequestStatus) -> bool {
        match self.requests.iter_mut().find(|r| r.request_id == request_id) {
            Some(request) => {
                request.status = status;
                true
            }
            None => false,
        }
    }
}

/// An [`AdminPanel`] shared between concurrent approve/reject calls
#[derive(Clone)]
pub struct AdminPanelHandle {
    panel: Arc<Mutex<AdminPanel>>,
    client: InventoryClient,
}

impl AdminPanelHandle {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            panel: Arc::new(Mutex::new(AdminPanel::new())),
            client,
        }
    }

    /// Lock the panel for reading or filter changes
    pub async fn lock(&self) -> MutexGuard<'_, AdminPanel> {
        self.panel.lock().await
    }

    /// Re-fetch the full request list
    pub async fn refresh(&self) -> Result<()> {
        self.panel.lock().await.begin_fetch();
        let result = self.client.requests().await;
        let failed = result.is_err();

        let mut panel = self.panel.lock().await;
        panel.replace(result, self.client.base_url());
        match panel.error() {
            Some(message) if failed => Err(Error::general(message)),
            _ => Ok(()),
        }
    }

    /// Approve or reject one request.
    ///
    /// The lock is released while the call is outstanding, so other rows can
    /// be actioned concurrently.
    pub async fn act(
        &self,
        request_id: &str,
        action: RequestAction,
        approved_by: &str,
    ) -> Result<RequestStatus> {
        self.panel.lock().await.begin_action(request_id)?;

        let result = self.client.decide(request_id, action, approved_by).await;
        match &result {
            Ok(status) => info!("Request {} is now {}", request_id, status),
            Err(e) => warn!("{:?} of {} failed: {}", action, request_id, e),
        }

        self.panel
            .lock()
            .await
            .finish_action(request_id, &result, self.client.base_url());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, status: RequestStatus) -> BorrowRequest {
        BorrowRequest {
            request_id: id.to_string(),
            raw_material: "Ammonia".to_string(),
            quantity: 12.0,
            unit: "MT".to_string(),
            purpose: "Line A".to_string(),
            employee_name: "R. Iyer".to_string(),
            employee_id: "EMP-00412".to_string(),
            date: "2026-02-05".to_string(),
            time: "09:30".to_string(),
            remarks: String::new(),
            status,
            approved_by: String::new(),
            approval_time: String::new(),
        }
    }

    fn panel() -> AdminPanel {
        let mut panel = AdminPanel::new();
        panel.replace(
            Ok(vec![
                request("REQ-1", RequestStatus::Pending),
                request("REQ-2", RequestStatus::Pending),
                request("REQ-3", RequestStatus::Rejected),
            ]),
            "http://h",
        );
        panel
    }

    #[test]
    fn applying_a_status_touches_only_that_row() {
        let mut panel = panel();
        let before = panel.requests().to_vec();

        assert!(panel.apply_status("REQ-2", RequestStatus::Approved));
        for (old, new) in before.iter().zip(panel.requests()) {
            if new.request_id == "REQ-2" {
                assert_eq!(new.status, RequestStatus::Approved);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut panel = panel();
        let before = panel.requests().to_vec();
        assert!(!panel.apply_status("REQ-404", RequestStatus::Approved));
        assert_eq!(panel.requests(), &before[..]);
    }

    #[test]
    fn one_action_per_request_at_a_time() {
        let mut panel = panel();
        panel.begin_action("REQ-1").unwrap();
        assert!(matches!(panel.begin_action("REQ-1"), Err(Error::Busy(_))));
        assert!(!panel.can_act("REQ-1"));

        panel.begin_action("REQ-2").unwrap();
        assert!(panel.is_processing("REQ-2"));
    }

    #[test]
    fn failed_action_leaves_the_list_alone() {
        let mut panel = panel();
        let before = panel.requests().to_vec();
        panel.begin_action("REQ-1").unwrap();
        panel.finish_action("REQ-1", &Err(Error::api(409, "Insufficient stock")), "http://h");

        assert_eq!(panel.requests(), &before[..]);
        assert_eq!(panel.action_error(), Some("Insufficient stock"));
        assert!(panel.can_act("REQ-1"));
    }

    #[test]
    fn settled_requests_cannot_be_actioned() {
        let mut panel = panel();
        assert!(matches!(panel.begin_action("REQ-3"), Err(Error::Validation(_))));
    }

    #[test]
    fn counts_filters_and_notices() {
        let mut panel = panel();
        assert_eq!(
            panel.counts(),
            StatusCounts {
                pending: 2,
                approved: 0,
                rejected: 1
            }
        );
        assert_eq!(
            panel.pending_notice().as_deref(),
            Some("You have 2 pending requests awaiting action.")
        );

        panel.set_filter(StatusFilter::Only(RequestStatus::Approved));
        assert!(panel.visible().is_empty());
        assert_eq!(panel.empty_message(), "No approved requests found.");
    }
}
