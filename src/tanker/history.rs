//! Tanker movement timeline with search

use super::{MovementType, TankerClient, TankerHistoryRecord};
use crate::error::Result;

/// A history record reshaped for the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct MovementEntry {
    /// 1-based position in the server's list
    pub id: usize,
    pub tanker_number: String,
    pub kind: MovementType,
    pub material: String,
    pub quantity: f64,
    pub date: String,
    pub time: String,
    pub batch_number: String,
    pub status: &'static str,
    /// Only set for arrivals
    pub supplier: Option<String>,
    /// Only set for dispatches
    pub destination: Option<String>,
}

impl MovementEntry {
    pub fn from_record(index: usize, record: &TankerHistoryRecord) -> Self {
        let (status, supplier, destination) = match record.movement_type {
            MovementType::Arrival => ("Completed", Some(record.source_destination.clone()), None),
            MovementType::Dispatch => ("Delivered", None, Some(record.source_destination.clone())),
        };

        Self {
            id: index + 1,
            tanker_number: record.tanker_number.clone(),
            kind: record.movement_type,
            material: record.material_or_product.clone(),
            quantity: record.quantity,
            date: record.date.clone(),
            time: record.time.clone(),
            batch_number: record.batch_number.clone(),
            status,
            supplier,
            destination,
        }
    }

    /// Timeline heading for the movement
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            MovementType::Arrival => "Raw Material Arrival",
            MovementType::Dispatch => "Product Dispatch",
        }
    }

    /// Case-insensitive substring match on tanker number, material or batch
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.tanker_number.to_lowercase().contains(&term)
            || self.material.to_lowercase().contains(&term)
            || self.batch_number.to_lowercase().contains(&term)
    }
}

/// Derive timeline entries from raw records
pub fn derive_entries(records: &[TankerHistoryRecord]) -> Vec<MovementEntry> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| MovementEntry::from_record(i, record))
        .collect()
}

/// Entries matching `term`; an empty term matches all
pub fn filter_entries<'a>(entries: &'a [MovementEntry], term: &str) -> Vec<&'a MovementEntry> {
    entries.iter().filter(|entry| entry.matches(term)).collect()
}

/// State of the history screen
#[derive(Debug, Clone, Default)]
pub struct TankerHistoryView {
    entries: Vec<MovementEntry>,
    search: String,
    error: Option<String>,
}

impl TankerHistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the history once
    pub async fn load(&mut self, client: &TankerClient) -> Result<()> {
        match client.history().await {
            Ok(records) => {
                self.entries = derive_entries(&records);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(client.base_url()));
                Err(e)
            }
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn entries(&self) -> &[MovementEntry] {
        &self.entries
    }

    /// Entries passing the current search term
    pub fn visible(&self) -> Vec<&MovementEntry> {
        filter_entries(&self.entries, &self.search)
    }
}
