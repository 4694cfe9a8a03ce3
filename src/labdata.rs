//! Quality-control sample entry

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::fetch::Gateway;
use crate::forms::{self, StatusMessage};
use crate::tanker::Ack;

/// Body of `POST /api/labdata/save/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabSamplePayload {
    pub sample_id: String,
    pub batch_id: String,
    pub order_number: String,
    pub product: String,
    pub moisture: f64,
    pub purity: f64,
    pub analyst: String,
    pub sample_date: String,
    pub sample_time: String,
    pub remarks: String,
}

/// Client for the lab data endpoint
#[derive(Debug, Clone)]
pub struct LabDataClient {
    gateway: Gateway,
}

impl LabDataClient {
    /// Create a new LabDataClient
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// Store one sample measurement
    pub async fn save(&self, payload: &LabSamplePayload) -> Result<()> {
        debug!("Saving sample {} for batch {}", payload.sample_id, payload.batch_id);
        self.gateway
            .post("/api/labdata/save/")
            .json(payload)?
            .execute::<Ack>()
            .await?;
        Ok(())
    }
}

/// Sample entry form; the analyst is always the signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct LabSampleForm {
    pub sample_id: String,
    pub batch_id: String,
    pub order_number: String,
    pub product: String,
    pub moisture: String,
    pub purity: String,
    pub sample_date: String,
    pub sample_time: String,
    pub remarks: String,
    analyst: String,
    status: Option<StatusMessage>,
}

impl LabSampleForm {
    pub fn new(analyst: &str) -> Self {
        Self {
            sample_id: String::new(),
            batch_id: String::new(),
            order_number: String::new(),
            product: String::new(),
            moisture: String::new(),
            purity: String::new(),
            sample_date: String::new(),
            sample_time: String::new(),
            remarks: String::new(),
            analyst: analyst.to_string(),
            status: None,
        }
    }

    pub fn analyst(&self) -> &str {
        &self.analyst
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Clear everything except the analyst
    pub fn reset(&mut self) {
        let status = self.status.take();
        *self = Self::new(&self.analyst);
        self.status = status;
    }

    pub fn validate(&self) -> Result<LabSamplePayload> {
        Ok(LabSamplePayload {
            sample_id: forms::required("Sample ID", &self.sample_id)?,
            batch_id: forms::required("Batch ID", &self.batch_id)?,
            order_number: forms::optional(&self.order_number),
            product: forms::product("Product", &self.product)?,
            moisture: forms::number("Moisture", &self.moisture)?,
            purity: forms::number("Purity", &self.purity)?,
            analyst: self.analyst.clone(),
            sample_date: forms::date("Sample date", &self.sample_date)?,
            sample_time: forms::time("Sample time", &self.sample_time)?,
            remarks: forms::optional(&self.remarks),
        })
    }

    /// Save the sample; the form is reset on success
    pub async fn submit(&mut self, client: &LabDataClient) -> Result<()> {
        self.status = None;
        let result = match self.validate() {
            Ok(payload) => client.save(&payload).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                self.status = Some(StatusMessage::success("Lab sample saved successfully."));
                self.reset();
            }
            Err(e) => self.status = Some(StatusMessage::from_error(e, client.base_url())),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LabSampleForm {
        let mut form = LabSampleForm::new("a.mehta");
        form.sample_id = "S-2026-0205-001".to_string();
        form.batch_id = "B-100201".to_string();
        form.product = "Urea".to_string();
        form.moisture = "0.45".to_string();
        form.purity = "98.7".to_string();
        form.sample_date = "2026-02-05".to_string();
        form.sample_time = "11:20".to_string();
        form
    }

    #[test]
    fn payload_uses_snake_case_wire_names() {
        let json = serde_json::to_value(filled().validate().unwrap()).unwrap();
        assert_eq!(json["sample_id"], "S-2026-0205-001");
        assert_eq!(json["batch_id"], "B-100201");
        assert_eq!(json["analyst"], "a.mehta");
        assert_eq!(json["purity"], 98.7);
        assert_eq!(json["order_number"], "");
    }

    #[test]
    fn moisture_must_be_numeric() {
        let mut form = filled();
        form.moisture = "dry".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn reset_keeps_the_analyst() {
        let mut form = filled();
        form.reset();
        assert_eq!(form.analyst(), "a.mehta");
        assert!(form.sample_id.is_empty());
    }
}
