//! Balance dashboard state and the background refresh loop

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::InventoryBalance;
use crate::catalog::{self, Unit};
use crate::error::{Error, Result, UNKNOWN_ERROR};

/// Anything that can report current balances
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balances(&self) -> Result<Vec<InventoryBalance>>;
}

/// Stock classification against the catalog minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Low,
    Normal,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Low => "Low Stock",
            StockStatus::Normal => "Normal",
        }
    }

    pub fn is_low(self) -> bool {
        self == StockStatus::Low
    }
}

/// Progress-bar width for `balance` against `max`, clamped to `[0, 100]`
pub fn fill_percent(balance: f64, max: f64) -> f64 {
    let pct = balance / max * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// One material's balance ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub material: String,
    pub display_name: String,
    pub balance: f64,
    pub unit: Unit,
    pub min_stock: f64,
    pub max_stock: f64,
    pub status: StockStatus,
    pub percent: f64,
}

impl StockLevel {
    pub fn from_balance(item: &InventoryBalance) -> Self {
        let meta = catalog::material_or_default(&item.material);
        let status = if item.balance < meta.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Normal
        };

        Self {
            material: item.material.clone(),
            display_name: catalog::material_display_name(&item.material).to_string(),
            balance: item.balance,
            unit: meta.unit,
            min_stock: meta.min_stock,
            max_stock: meta.max_stock,
            status,
            percent: fill_percent(item.balance, meta.max_stock),
        }
    }
}

/// What the balance screen shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceView {
    balances: Vec<InventoryBalance>,
    error: Option<String>,
    loading: bool,
}

impl BalanceView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn balances(&self) -> &[InventoryBalance] {
        &self.balances
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn levels(&self) -> Vec<StockLevel> {
        self.balances.iter().map(StockLevel::from_balance).collect()
    }

    pub fn low_stock(&self) -> Vec<StockLevel> {
        self.levels()
            .into_iter()
            .filter(|level| level.status.is_low())
            .collect()
    }

    /// Fetch once and apply the outcome
    pub async fn refresh<S: BalanceSource + ?Sized>(&mut self, source: &S, base_url: &str) {
        self.begin();
        let result = source.fetch_balances().await;
        self.apply(result, base_url);
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A failed fetch keeps the previous balances
    fn apply(&mut self, result: Result<Vec<InventoryBalance>>, base_url: &str) {
        self.loading = false;
        match result {
            Ok(balances) => self.balances = balances,
            Err(e) => self.error = Some(failure_text(&e, base_url)),
        }
    }
}

fn failure_text(err: &Error, base_url: &str) -> String {
    match err {
        Error::Http(_) => format!("Backend offline. Start the server at {}.", base_url),
        Error::Api { message, .. } if message == UNKNOWN_ERROR => {
            "Failed to load balances".to_string()
        }
        other => other.user_message(base_url),
    }
}

/// Keeps a [`BalanceView`] fresh by re-fetching on a fixed interval.
///
/// The first fetch happens immediately. The loop stops when [`stop`] is
/// called or the poller is dropped, so no update lands after teardown.
///
/// [`stop`]: BalancePoller::stop
pub struct BalancePoller {
    handle: JoinHandle<()>,
    trigger: Arc<Notify>,
    view: watch::Receiver<BalanceView>,
}

impl BalancePoller {
    pub fn start<S>(source: Arc<S>, interval: Duration, base_url: &str) -> Self
    where
        S: BalanceSource + ?Sized + 'static,
    {
        let (tx, rx) = watch::channel(BalanceView::new());
        let trigger = Arc::new(Notify::new());
        let notified = trigger.clone();
        let base_url = base_url.to_string();

        info!("Polling balances every {:?}", interval);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = notified.notified() => {}
                }

                tx.send_modify(BalanceView::begin);
                let result = source.fetch_balances().await;
                if let Err(e) = &result {
                    warn!("Balance refresh failed: {}", e);
                }
                tx.send_modify(|view| view.apply(result, &base_url));
            }
        });

        Self {
            handle,
            trigger,
            view: rx,
        }
    }

    /// The latest view
    pub fn current(&self) -> BalanceView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every update
    pub fn subscribe(&self) -> watch::Receiver<BalanceView> {
        self.view.clone()
    }

    /// Fetch now instead of waiting for the next tick
    pub fn refresh_now(&self) {
        self.trigger.notify_one();
    }

    /// Cancel the loop
    pub fn stop(self) {
        // Drop aborts the task
    }
}

impl Drop for BalancePoller {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            info!("Stopping balance poller");
        }
        self.handle.abort();
    }
}
