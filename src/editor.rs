//! Record editor: collects and validates input for one record.
//!
//! A draft is either blank (create mode) or seeded from an existing record
//! (edit mode). Submission validates the required fields, builds the
//! candidate record and upserts it into the store. Identifier and creation
//! date are generated only for unseeded drafts; edits carry both over
//! unchanged.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::InventoryRecord,
    store::Store,
};

/// Pending input for one record, with validation rules on the required
/// fields. Quantity is held as entered text; it is pre-filtered to digits
/// and parsed on submit.
#[derive(Debug, Default, Validate)]
pub struct RecordDraft {
    seed: Option<InventoryRecord>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "quantity is required"))]
    quantity: String,
    pub description: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "responsible user is required"))]
    pub responsible: String,
    images: Vec<String>,
}

impl RecordDraft {
    /// Blank draft for a new record
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing record, for editing
    pub fn edit(record: InventoryRecord) -> Self {
        Self {
            name: record.name.clone(),
            // A zero quantity seeds as empty entry text, like a blank field.
            quantity: if record.quantity == 0 {
                String::new()
            } else {
                record.quantity.to_string()
            },
            description: record.description.clone(),
            location: record.location.clone(),
            responsible: record.responsible.clone(),
            images: record.images.clone(),
            seed: Some(record),
        }
    }

    /// Whether this draft edits an existing record
    pub fn is_editing(&self) -> bool {
        self.seed.is_some()
    }

    /// Quantity entry accepts digit characters only. Returns false (input
    /// rejected, previous entry kept) for anything else.
    pub fn set_quantity(&mut self, input: &str) -> bool {
        if input.chars().all(|c| c.is_ascii_digit()) {
            self.quantity = input.to_string();
            true
        } else {
            false
        }
    }

    /// Pending images, in attachment order
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Drop all pending images
    pub fn clear_images(&mut self) {
        self.images.clear();
    }

    /// Remove one pending image by position. Returns false when out of range.
    pub fn remove_image(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.images.remove(index);
            true
        } else {
            false
        }
    }

    /// Read a batch of image files and append them to the pending list.
    ///
    /// Each file is read asynchronously and encoded as a data URL. Reads
    /// accumulate into a separate list and merge once, in selection order,
    /// so a batch can never interleave with the pending list mid-read.
    pub async fn attach_images(&mut self, paths: &[impl AsRef<Path>]) -> AppResult<usize> {
        let mut batch = Vec::with_capacity(paths.len());
        for path in paths {
            batch.push(read_image_payload(path.as_ref()).await?);
        }
        let attached = batch.len();
        self.images.extend(batch);
        Ok(attached)
    }

    /// Capture path: acquire exactly one image
    pub async fn capture_image(&mut self, path: impl AsRef<Path>) -> AppResult<()> {
        let payload = read_image_payload(path.as_ref()).await?;
        self.images.push(payload);
        Ok(())
    }

    /// Validate and submit the draft, upserting the resulting record.
    ///
    /// After a create the draft resets to blank for rapid consecutive entry;
    /// after an edit the caller dismisses the draft. A validation error
    /// leaves both the draft and the store untouched.
    pub fn submit(&mut self, store: &mut Store) -> AppResult<InventoryRecord> {
        self.validate()?;

        // Entry is pre-filtered to digits, so a failed parse (e.g. overflow)
        // falls back to 0 rather than rejecting the submission.
        let quantity = self.quantity.parse::<u32>().unwrap_or(0);

        let (id, created_at) = match &self.seed {
            Some(seed) => (seed.id.clone(), seed.created_at),
            None => (InventoryRecord::new_id(), Utc::now()),
        };

        let record = InventoryRecord {
            id,
            name: self.name.clone(),
            quantity,
            description: self.description.clone(),
            location: self.location.clone(),
            responsible: self.responsible.clone(),
            created_at,
            images: self.images.clone(),
        };

        store.upsert(record.clone());

        if self.seed.is_none() {
            self.reset();
        }
        Ok(record)
    }

    fn reset(&mut self) {
        self.name.clear();
        self.quantity.clear();
        self.description.clear();
        self.location.clear();
        self.responsible.clear();
        self.images.clear();
    }
}

async fn read_image_payload(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Image(format!("failed to read {}: {}", path.display(), e)))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for_extension(path),
        BASE64.encode(&bytes)
    ))
}

/// Media type from the file extension. Unknown extensions encode as opaque
/// payloads, which the export assembler skips.
fn mime_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("inventoryItems.json"));
        (dir, store)
    }

    fn filled_draft() -> RecordDraft {
        let mut draft = RecordDraft::new();
        draft.name = "Widget".to_string();
        draft.set_quantity("10");
        draft.location = "Shelf A".to_string();
        draft.responsible = "Alice".to_string();
        draft
    }

    #[test]
    fn test_submit_rejects_missing_required_fields() {
        let (_dir, mut store) = store();
        let mut draft = RecordDraft::new();
        draft.name = "Widget".to_string();

        let err = draft.submit(&mut store).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.records().is_empty());
        // The draft keeps its entries after a rejected submission.
        assert_eq!(draft.name, "Widget");
    }

    #[test]
    fn test_submit_creates_record_and_resets() {
        let (_dir, mut store) = store();
        let mut draft = filled_draft();

        let record = draft.submit(&mut store).unwrap();
        assert_eq!(record.quantity, 10);
        assert_eq!(record.description, "");
        assert!(record.images.is_empty());
        assert!(!record.id.is_empty());
        assert_eq!(store.records().len(), 1);

        // Create mode clears the form for the next entry.
        assert!(draft.name.is_empty());
        assert!(!draft.is_editing());
    }

    #[test]
    fn test_quantity_entry_is_digit_filtered() {
        let mut draft = RecordDraft::new();
        assert!(draft.set_quantity("42"));
        assert!(!draft.set_quantity("4x"));
        assert!(!draft.set_quantity("-1"));
        // Rejected input keeps the previous entry.
        let (_dir, mut store) = store();
        draft.name = "Widget".to_string();
        draft.location = "Shelf A".to_string();
        draft.responsible = "Alice".to_string();
        assert_eq!(draft.submit(&mut store).unwrap().quantity, 42);
    }

    #[test]
    fn test_overlong_quantity_defaults_to_zero() {
        let (_dir, mut store) = store();
        let mut draft = filled_draft();
        assert!(draft.set_quantity("99999999999999999999"));
        assert_eq!(draft.submit(&mut store).unwrap().quantity, 0);
    }

    #[test]
    fn test_edit_keeps_id_and_creation_date() {
        let (_dir, mut store) = store();
        let mut draft = filled_draft();
        let original = draft.submit(&mut store).unwrap();

        let mut edit = RecordDraft::edit(original.clone());
        assert!(edit.is_editing());
        edit.set_quantity("15");
        let updated = edit.submit(&mut store).unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.quantity, 15);
        // Edit mode does not clear the form; it is dismissed by the caller.
        assert_eq!(edit.name, "Widget");
    }

    #[tokio::test]
    async fn test_attach_images_merges_in_selection_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.jpg");
        std::fs::File::create(&a).unwrap().write_all(b"pngdata").unwrap();
        std::fs::File::create(&b).unwrap().write_all(b"jpgdata").unwrap();

        let mut draft = RecordDraft::new();
        let attached = draft.attach_images(&[&a, &b]).await.unwrap();
        assert_eq!(attached, 2);
        assert!(draft.images()[0].starts_with("data:image/png;base64,"));
        assert!(draft.images()[1].starts_with("data:image/jpeg;base64,"));

        assert!(draft.remove_image(0));
        assert_eq!(draft.images().len(), 1);
        assert!(!draft.remove_image(5));
    }

    #[tokio::test]
    async fn test_attach_missing_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut draft = RecordDraft::new();
        let err = draft
            .capture_image(dir.path().join("absent.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Image(_)));
        assert!(draft.images().is_empty());
    }
}
