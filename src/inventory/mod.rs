//! Raw-material inventory: balances, stock additions and borrow requests

mod admin;
mod balance;
mod forms;
mod types;

use async_trait::async_trait;
use log::debug;

use crate::error::Result;
use crate::fetch::Gateway;

pub use admin::*;
pub use balance::*;
pub use forms::*;
pub use types::*;

/// Approver recorded when the session has no username
pub const DEFAULT_APPROVER: &str = "Admin";

/// Client for the inventory endpoints
#[derive(Debug, Clone)]
pub struct InventoryClient {
    gateway: Gateway,
}

impl InventoryClient {
    /// Create a new InventoryClient
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// Current balance of every material
    pub async fn balances(&self) -> Result<Vec<InventoryBalance>> {
        let response = self
            .gateway
            .get("/api/inventory/balance/")
            .execute::<BalancesResponse>()
            .await?;
        Ok(response.balances)
    }

    /// Record incoming stock
    pub async fn add_stock(&self, payload: &AddStockPayload) -> Result<AddStockReceipt> {
        debug!("Adding {} {} of {}", payload.quantity, payload.unit, payload.material);
        self.gateway
            .post("/api/inventory/add-stock/")
            .json(payload)?
            .execute()
            .await
    }

    /// Submit a borrow request for admin approval
    pub async fn borrow(&self, payload: &BorrowPayload) -> Result<BorrowReceipt> {
        debug!(
            "Requesting {} {} of {} for {}",
            payload.quantity, payload.unit, payload.raw_material, payload.employee_id
        );
        self.gateway
            .post("/api/inventory/borrow/")
            .json(payload)?
            .execute()
            .await
    }

    /// Every borrow request, in server order
    pub async fn requests(&self) -> Result<Vec<BorrowRequest>> {
        let response = self
            .gateway
            .get("/api/inventory/requests/")
            .execute::<RequestsResponse>()
            .await?;
        Ok(response.requests)
    }

    /// Approve or reject a request; returns the status the server settled on.
    ///
    /// A blank `approved_by` is sent as [`DEFAULT_APPROVER`].
    pub async fn decide(
        &self,
        request_id: &str,
        action: RequestAction,
        approved_by: &str,
    ) -> Result<RequestStatus> {
        let approved_by = match approved_by.trim() {
            "" => DEFAULT_APPROVER,
            name => name,
        };
        let payload = DecisionPayload {
            request_id,
            action,
            approved_by,
        };
        let receipt = self
            .gateway
            .post("/api/inventory/approve/")
            .json(&payload)?
            .execute::<DecisionReceipt>()
            .await?;
        Ok(receipt.status)
    }
}

#[async_trait]
impl BalanceSource for InventoryClient {
    async fn fetch_balances(&self) -> Result<Vec<InventoryBalance>> {
        self.balances().await
    }
}
