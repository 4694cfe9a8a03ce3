//! Tanker arrival and dispatch forms

use crate::error::Result;
use crate::forms::{self, StatusMessage};

use super::{ArrivalPayload, DispatchPayload, TankerClient};

/// Raw material tanker check-in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrivalForm {
    pub tanker_number: String,
    pub raw_material: String,
    pub quantity: String,
    pub supplier: String,
    pub driver_name: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub sampling_date: String,
    pub sampling_time: String,
    pub batch_number: String,
    pub order_number: String,
    status: Option<StatusMessage>,
}

impl ArrivalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn validate(&self) -> Result<ArrivalPayload> {
        Ok(ArrivalPayload {
            tanker_number: forms::required("Tanker number", &self.tanker_number)?,
            raw_material: forms::raw_material("Raw material", &self.raw_material)?,
            quantity: forms::number("Quantity", &self.quantity)?,
            supplier: forms::optional(&self.supplier),
            driver_name: forms::optional(&self.driver_name),
            arrival_date: forms::date("Arrival date", &self.arrival_date)?,
            arrival_time: forms::time("Arrival time", &self.arrival_time)?,
            sampling_date: forms::date("Sampling date", &self.sampling_date)?,
            sampling_time: forms::time("Sampling time", &self.sampling_time)?,
            batch_number: forms::optional(&self.batch_number),
            order_number: forms::optional(&self.order_number),
        })
    }

    /// Record the arrival; every field is cleared on success
    pub async fn submit(&mut self, client: &TankerClient) -> Result<()> {
        self.status = None;
        let result = match self.validate() {
            Ok(payload) => client.record_arrival(&payload).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                *self = Self::new();
                self.status = Some(StatusMessage::success("Tanker arrival recorded successfully!"));
            }
            Err(e) => self.status = Some(StatusMessage::from_error(e, client.base_url())),
        }
        result
    }
}

/// Finished product tanker check-out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchForm {
    pub tanker_number: String,
    pub finished_product: String,
    pub quantity: String,
    pub driver_name: String,
    pub dispatch_date: String,
    pub dispatch_time: String,
    pub destination: String,
    pub customer_name: String,
    pub batch_number: String,
    pub order_number: String,
    status: Option<StatusMessage>,
}

impl DispatchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn validate(&self) -> Result<DispatchPayload> {
        Ok(DispatchPayload {
            tanker_number: forms::required("Tanker number", &self.tanker_number)?,
            finished_product: forms::product("Finished product", &self.finished_product)?,
            quantity: forms::number("Quantity", &self.quantity)?,
            driver_name: forms::optional(&self.driver_name),
            dispatch_date: forms::date("Dispatch date", &self.dispatch_date)?,
            dispatch_time: forms::time("Dispatch time", &self.dispatch_time)?,
            destination: forms::optional(&self.destination),
            customer_name: forms::optional(&self.customer_name),
            batch_number: forms::required("Batch number", &self.batch_number)?,
            order_number: forms::optional(&self.order_number),
        })
    }

    /// Record the dispatch; every field is cleared on success
    pub async fn submit(&mut self, client: &TankerClient) -> Result<()> {
        self.status = None;
        let result = match self.validate() {
            Ok(payload) => client.record_dispatch(&payload).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                *self = Self::new();
                self.status =
                    Some(StatusMessage::success("Tanker dispatch recorded successfully!"));
            }
            Err(e) => self.status = Some(StatusMessage::from_error(e, client.base_url())),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_requires_batch_number() {
        let form = DispatchForm {
            tanker_number: "TKR-00990".to_string(),
            finished_product: "Urea".to_string(),
            quantity: "22".to_string(),
            dispatch_date: "2026-02-05".to_string(),
            dispatch_time: "14:10".to_string(),
            ..DispatchForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.user_message(""), "Batch number is required");
    }

    #[test]
    fn arrival_optional_fields_may_be_blank() {
        let form = ArrivalForm {
            tanker_number: "TKR-00145".to_string(),
            raw_material: "Ammonia".to_string(),
            quantity: "18.5".to_string(),
            arrival_date: "2026-02-05".to_string(),
            arrival_time: "08:15".to_string(),
            sampling_date: "2026-02-05".to_string(),
            sampling_time: "08:40".to_string(),
            ..ArrivalForm::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.quantity, 18.5);
        assert_eq!(payload.supplier, "");
    }
}
