//! Types for the inventory endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Unit;
use crate::de::{number_or_string, string_or_null};

/// On-hand quantity of one raw material, as reported by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryBalance {
    pub material: String,
    #[serde(deserialize_with = "number_or_string")]
    pub balance: f64,
}

/// Lifecycle of a borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestAction {
    Approve,
    Reject,
}

/// An employee's request to draw down inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub request_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub raw_material: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "string_or_null")]
    pub unit: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub purpose: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub time: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub remarks: String,
    pub status: RequestStatus,
    #[serde(default, deserialize_with = "string_or_null")]
    pub approved_by: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub approval_time: String,
}

/// Body of `POST /api/inventory/add-stock/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddStockPayload {
    pub material: String,
    pub quantity: f64,
    pub unit: Unit,
    pub supplier: String,
    pub invoice_no: String,
    pub date: String,
    pub time: String,
    pub remarks: String,
    pub received_by: String,
}

/// Result of adding stock
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddStockReceipt {
    #[serde(deserialize_with = "number_or_string")]
    pub new_balance: f64,
}

/// Body of `POST /api/inventory/borrow/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowPayload {
    pub raw_material: String,
    pub quantity: f64,
    pub unit: Unit,
    pub purpose: String,
    pub employee_name: String,
    pub employee_id: String,
    pub request_date: String,
    pub request_time: String,
    pub remarks: String,
}

/// Result of submitting a borrow request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BorrowReceipt {
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecisionPayload<'a> {
    pub request_id: &'a str,
    pub action: RequestAction,
    pub approved_by: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionReceipt {
    pub status: RequestStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalancesResponse {
    #[serde(default)]
    pub balances: Vec<InventoryBalance>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestsResponse {
    #[serde(default)]
    pub requests: Vec<BorrowRequest>,
}
