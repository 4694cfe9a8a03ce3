//! Tanker arrivals, dispatches and movement history

mod forms;
mod history;
mod types;

use log::debug;

use crate::error::Result;
use crate::fetch::Gateway;

pub use forms::*;
pub use history::*;
pub use types::*;

/// Client for the tanker endpoints
#[derive(Debug, Clone)]
pub struct TankerClient {
    gateway: Gateway,
}

impl TankerClient {
    /// Create a new TankerClient
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// Log a raw material arrival
    pub async fn record_arrival(&self, payload: &ArrivalPayload) -> Result<()> {
        debug!("Recording arrival of {}", payload.tanker_number);
        self.gateway
            .post("/api/tanker/arrival/")
            .json(payload)?
            .execute::<Ack>()
            .await?;
        Ok(())
    }

    /// Log a finished product dispatch
    pub async fn record_dispatch(&self, payload: &DispatchPayload) -> Result<()> {
        debug!("Recording dispatch of {}", payload.tanker_number);
        self.gateway
            .post("/api/tanker/dispatch/")
            .json(payload)?
            .execute::<Ack>()
            .await?;
        Ok(())
    }

    /// Every movement, oldest first as the server stores them
    pub async fn history(&self) -> Result<Vec<TankerHistoryRecord>> {
        self.gateway.get("/api/tanker/history/").execute().await
    }
}
