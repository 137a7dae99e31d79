//! Case-insensitive substring search over designated fields.

use crate::models::{Entity, Record};

/// True when any designated field of `data` contains `needle`.
///
/// `needle` must already be lowercased.
fn contains_lowered<E: Entity>(data: &E, needle: &str) -> bool {
    data.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Check a single record against a query.
pub fn matches<E: Entity>(record: &Record<E>, query: &str) -> bool {
    query.is_empty() || contains_lowered(&record.data, &query.to_lowercase())
}

/// Filter records by query, preserving store order.
///
/// An empty query returns every record.
pub fn filter<'a, E: Entity>(records: &'a [Record<E>], query: &str) -> Vec<&'a Record<E>> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| contains_lowered(&record.data, &needle))
        .collect()
}
