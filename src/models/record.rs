//! Inventory record model.
//!
//! The serialized field names (`user`, `date`, ...) are fixed: they are the
//! persisted structure of the register and must stay readable across
//! versions, so renames happen here rather than in storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inventory entry with its attributes and embedded images.
///
/// Images are data URLs (`data:image/...;base64,...`), kept inline in the
/// record in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(rename = "user")]
    pub responsible: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl InventoryRecord {
    /// Generate a fresh opaque identifier
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Creation date rendered for display and export (`DD/MM/YYYY HH:MM`)
    pub fn formatted_date(&self) -> String {
        self.created_at.format("%d/%m/%Y %H:%M").to_string()
    }
}
