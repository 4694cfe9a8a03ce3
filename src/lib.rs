//! LIMS Rust Client Library
//!
//! A typed client for the laboratory and inventory management backend:
//! sign-in and session persistence, raw material inventory with borrow
//! approvals, tanker logistics, lab sample entry and the read-only dashboards.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod dashboard;
mod de;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod inventory;
pub mod labdata;
pub mod navigation;
pub mod tanker;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::{
    AuthClient, Credentials, FileStorage, MemoryStorage, SessionStorage, SessionStore, User,
};
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::Gateway;
use crate::inventory::InventoryClient;
use crate::labdata::LabDataClient;
use crate::tanker::TankerClient;

/// The main entry point for the LIMS client
pub struct Lims {
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    session: SessionStore,
}

impl Lims {
    /// Create a new client talking to `base_url`
    ///
    /// # Example
    ///
    /// ```
    /// use lims_client::Lims;
    ///
    /// let lims = Lims::new("http://127.0.0.1:8000").unwrap();
    /// assert!(lims.session().current().is_none());
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(ClientOptions::default().with_base_url(base_url))
    }

    /// Create a new client with custom options.
    ///
    /// Sessions are kept in `options.session_dir` when set, in memory otherwise.
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &options.session_dir {
            Some(dir) => Arc::new(FileStorage::new(dir.clone())),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(options, storage)
    }

    /// Create a new client persisting its session in `storage`
    pub fn with_storage(options: ClientOptions, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        let session = SessionStore::new(storage, &options.session_key);

        Ok(Self {
            http_client,
            options,
            session,
        })
    }

    /// The current session
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Mutable access to the session, for login, logout and restore
    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Sign in and persist the session; later clients carry the new token
    pub async fn login(&mut self, credentials: &Credentials) -> Result<User> {
        let auth = self.auth();
        self.session.login(&auth, credentials).await
    }

    /// Forget the session both in memory and in storage
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()
    }

    fn gateway(&self) -> Gateway {
        Gateway::new(
            &self.options.base_url,
            self.session.token().map(str::to_string),
            self.http_client.clone(),
        )
    }

    /// Get a client for the login endpoint
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.gateway())
    }

    /// Get a client for the inventory endpoints, carrying the current token
    pub fn inventory(&self) -> InventoryClient {
        InventoryClient::new(self.gateway())
    }

    /// Get a client for the tanker endpoints, carrying the current token
    pub fn tanker(&self) -> TankerClient {
        TankerClient::new(self.gateway())
    }

    /// Get a client for the lab data endpoint, carrying the current token
    pub fn labdata(&self) -> LabDataClient {
        LabDataClient::new(self.gateway())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Credentials, Lab, Role, User};
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, Result};
    pub use crate::navigation::{Navigator, Page, View};
    pub use crate::Lims;
}
