//! Types for the tanker endpoints

use serde::{Deserialize, Serialize};

use crate::de::{number_or_string, string_or_null};

/// Direction of a tanker movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Raw material coming in
    Arrival,
    /// Finished product going out
    Dispatch,
}

/// One row of the server-computed movement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankerHistoryRecord {
    #[serde(default, deserialize_with = "string_or_null")]
    pub tanker_number: String,
    pub movement_type: MovementType,
    #[serde(default, deserialize_with = "string_or_null")]
    pub material_or_product: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "string_or_null")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub time: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub batch_number: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub source_destination: String,
}

/// Body of `POST /api/tanker/arrival/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalPayload {
    pub tanker_number: String,
    pub raw_material: String,
    pub quantity: f64,
    pub supplier: String,
    pub driver_name: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub sampling_date: String,
    pub sampling_time: String,
    pub batch_number: String,
    pub order_number: String,
}

/// Body of `POST /api/tanker/dispatch/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchPayload {
    pub tanker_number: String,
    pub finished_product: String,
    pub quantity: f64,
    pub driver_name: String,
    pub dispatch_date: String,
    pub dispatch_time: String,
    pub destination: String,
    pub customer_name: String,
    pub batch_number: String,
    pub order_number: String,
}

/// Acknowledgement carrying no data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}
