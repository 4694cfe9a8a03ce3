//! Types for authentication and the signed-in user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What a signed-in user is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Reviews borrow requests and watches balances
    CentralAdmin,
    /// Adds incoming stock and submits borrow requests
    PlantEmployee,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::CentralAdmin
    }

    pub fn is_employee(self) -> bool {
        self == Role::PlantEmployee
    }

    /// Human readable role name
    pub fn label(self) -> &'static str {
        match self {
            Role::CentralAdmin => "Central Admin",
            Role::PlantEmployee => "Plant Employee",
        }
    }
}

/// The laboratory a user signs in to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lab {
    #[default]
    Central,
    /// Plant laboratories are numbered 1 to 7
    Plant(u8),
}

impl Lab {
    /// Every selectable laboratory, in menu order
    pub fn all() -> Vec<Lab> {
        std::iter::once(Lab::Central)
            .chain((1..=7).map(Lab::Plant))
            .collect()
    }

    /// Human readable laboratory name
    pub fn label(self) -> String {
        match self {
            Lab::Central => "Central Laboratory".to_string(),
            Lab::Plant(n) => format!("Plant-{} Laboratory", n),
        }
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lab::Central => f.write_str("central"),
            Lab::Plant(n) => write!(f, "plant-{}", n),
        }
    }
}

impl FromStr for Lab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "central" {
            return Ok(Lab::Central);
        }
        s.strip_prefix("plant-")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=7).contains(n))
            .map(Lab::Plant)
            .ok_or_else(|| Error::validation(format!("Unknown laboratory: {}", s)))
    }
}

impl TryFrom<String> for Lab {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lab> for String {
    fn from(lab: Lab) -> Self {
        lab.to_string()
    }
}

/// The signed-in user, as persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: Role,
    pub lab: Lab,
    pub token: String,
}

/// Login form input
#[derive(Debug, Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub lab: Lab,
}

impl Credentials {
    pub fn new(username: &str, password: &str, lab: Lab) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            lab,
        }
    }
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub lab: Lab,
}

impl From<LoginResponse> for User {
    fn from(response: LoginResponse) -> Self {
        Self {
            username: response.username,
            role: response.role,
            lab: response.lab,
            token: response.token,
        }
    }
}
