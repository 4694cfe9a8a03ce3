//! Authentication and the persisted session

mod session;
mod types;

use log::debug;

use crate::error::{Error, Result};
use crate::fetch::Gateway;

pub use session::*;
pub use types::*;

/// Client for the login endpoint
pub struct AuthClient {
    gateway: Gateway,
}

impl AuthClient {
    /// Create a new AuthClient
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a signed-in [`User`].
    ///
    /// Empty username or password is rejected without contacting the server.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        if credentials.username.trim().is_empty() {
            return Err(Error::validation("Username is required"));
        }
        if credentials.password.is_empty() {
            return Err(Error::validation("Password is required"));
        }

        debug!("Logging in {} at {}", credentials.username, credentials.lab);
        let response = self
            .gateway
            .post("/api/auth/login/")
            .json(credentials)?
            .execute::<LoginResponse>()
            .await?;

        Ok(response.into())
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labs_round_trip_through_their_wire_names() {
        assert_eq!("plant-3".parse::<Lab>().unwrap(), Lab::Plant(3));
        assert_eq!(Lab::Plant(3).to_string(), "plant-3");
        assert!("plant-8".parse::<Lab>().is_err());
        assert!("annex".parse::<Lab>().is_err());
        assert_eq!(Lab::all().len(), 8);
    }

    #[test]
    fn roles_use_upper_snake_case_on_the_wire() {
        let role: Role = serde_json::from_str("\"CENTRAL_ADMIN\"").unwrap();
        assert!(role.is_admin());
        assert_eq!(
            serde_json::to_string(&Role::PlantEmployee).unwrap(),
            "\"PLANT_EMPLOYEE\""
        );
    }

    #[tokio::test]
    async fn blank_username_never_reaches_the_server() {
        let gateway = Gateway::new("http://127.0.0.1:9", None, reqwest::Client::new());
        let client = AuthClient::new(gateway);
        let err = client
            .login(&Credentials::new("  ", "secret", Lab::Central))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
