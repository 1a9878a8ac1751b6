//! Free-text search over the collection.

use crate::models::InventoryRecord;

/// Records where the query appears, case-insensitively, in the name,
/// description, location, responsible user, decimal quantity or formatted
/// creation date. An empty or whitespace-only query is the identity.
pub fn filter<'a>(records: &'a [InventoryRecord], query: &str) -> Vec<&'a InventoryRecord> {
    let query = query.trim();
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
                || r.location.to_lowercase().contains(&needle)
                || r.responsible.to_lowercase().contains(&needle)
                || r.quantity.to_string().contains(&needle)
                || r.formatted_date().contains(&needle)
        })
        .collect()
}
