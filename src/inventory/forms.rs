//! Add-stock and borrow request forms

use crate::auth::User;
use crate::catalog::Unit;
use crate::error::{Error, Result};
use crate::forms::{self, StatusMessage};

use super::{AddStockPayload, AddStockReceipt, BorrowPayload, BorrowReceipt, InventoryClient};

/// Incoming stock entry, for plant employees
#[derive(Debug, Clone, PartialEq)]
pub struct AddStockForm {
    pub material: String,
    pub quantity: String,
    pub unit: Unit,
    pub supplier: String,
    pub invoice_no: String,
    pub date: String,
    pub time: String,
    pub remarks: String,
    status: Option<StatusMessage>,
}

impl Default for AddStockForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddStockForm {
    /// Empty form dated now
    pub fn new() -> Self {
        Self::with_timestamp(&forms::today(), &forms::now_hm())
    }

    pub fn with_timestamp(date: &str, time: &str) -> Self {
        Self {
            material: String::new(),
            quantity: String::new(),
            unit: Unit::Mt,
            supplier: String::new(),
            invoice_no: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            remarks: String::new(),
            status: None,
        }
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Check the fields and build the wire payload
    pub fn validate(&self, received_by: &str) -> Result<AddStockPayload> {
        Ok(AddStockPayload {
            material: forms::raw_material("Material", &self.material)?,
            quantity: forms::quantity("Quantity", &self.quantity)?,
            unit: self.unit,
            supplier: forms::required("Supplier", &self.supplier)?,
            invoice_no: forms::optional(&self.invoice_no),
            date: forms::date("Date", &self.date)?,
            time: forms::time("Time", &self.time)?,
            remarks: forms::optional(&self.remarks),
            received_by: received_by.to_string(),
        })
    }

    /// Send the form as `user`.
    ///
    /// On success the quantity, supplier, invoice and remarks are cleared;
    /// material, unit, date and time stay for the next entry.
    pub async fn submit(
        &mut self,
        client: &InventoryClient,
        user: &User,
    ) -> Result<AddStockReceipt> {
        self.status = None;
        let result = self.send(client, user).await;

        match &result {
            Ok(receipt) => {
                self.status = Some(StatusMessage::success(format!(
                    "Stock added successfully! New balance: {} {}",
                    receipt.new_balance, self.unit
                )));
                self.quantity.clear();
                self.supplier.clear();
                self.invoice_no.clear();
                self.remarks.clear();
            }
            Err(e) => self.status = Some(StatusMessage::from_error(e, client.base_url())),
        }
        result
    }

    async fn send(&self, client: &InventoryClient, user: &User) -> Result<AddStockReceipt> {
        if !user.role.is_employee() {
            return Err(Error::auth(
                "Only plant employees add stock. Use Manage Approvals to process requests.",
            ));
        }
        let payload = self.validate(&user.username)?;
        client.add_stock(&payload).await
    }
}

/// Borrow/withdraw request entry
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowForm {
    pub raw_material: String,
    pub quantity: String,
    pub unit: Unit,
    pub purpose: String,
    pub employee_name: String,
    pub employee_id: String,
    pub request_date: String,
    pub request_time: String,
    pub remarks: String,
    selected_material: String,
    initial_date: String,
    initial_time: String,
    status: Option<StatusMessage>,
}

impl BorrowForm {
    /// Form for `selected_material` (may be empty), dated now
    pub fn new(selected_material: &str) -> Self {
        Self::with_timestamp(selected_material, &forms::today(), &forms::now_hm())
    }

    pub fn with_timestamp(selected_material: &str, date: &str, time: &str) -> Self {
        Self {
            raw_material: selected_material.to_string(),
            quantity: String::new(),
            unit: Unit::Mt,
            purpose: String::new(),
            employee_name: String::new(),
            employee_id: String::new(),
            request_date: date.to_string(),
            request_time: time.to_string(),
            remarks: String::new(),
            selected_material: selected_material.to_string(),
            initial_date: date.to_string(),
            initial_time: time.to_string(),
            status: None,
        }
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Back to the state the form was opened in
    pub fn reset(&mut self) {
        let status = self.status.take();
        *self = Self::with_timestamp(
            &self.selected_material,
            &self.initial_date,
            &self.initial_time,
        );
        self.status = status;
    }

    /// Check the fields and build the wire payload
    pub fn validate(&self) -> Result<BorrowPayload> {
        Ok(BorrowPayload {
            raw_material: forms::raw_material("Raw material", &self.raw_material)?,
            quantity: forms::quantity("Quantity", &self.quantity)?,
            unit: self.unit,
            purpose: forms::required("Purpose", &self.purpose)?,
            employee_name: forms::required("Employee name", &self.employee_name)?,
            employee_id: forms::required("Employee ID", &self.employee_id)?,
            request_date: forms::date("Request date", &self.request_date)?,
            request_time: forms::time("Request time", &self.request_time)?,
            remarks: forms::optional(&self.remarks),
        })
    }

    /// Submit the request; on success the form is reset
    pub async fn submit(&mut self, client: &InventoryClient) -> Result<BorrowReceipt> {
        self.status = None;
        let result = match self.validate() {
            Ok(payload) => client.borrow(&payload).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(receipt) => {
                self.status = Some(StatusMessage::success(format!(
                    "Request submitted successfully! ID: {}. Pending admin approval.",
                    receipt.request_id
                )));
                self.reset();
            }
            Err(e) => self.status = Some(StatusMessage::from_error(e, client.base_url())),
        }
        result
    }
}
