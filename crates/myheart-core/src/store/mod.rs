//! In-memory record stores.

mod pagination;
mod search;

pub use pagination::*;
pub use search::*;

use log::info;
use thiserror::Error;

use crate::models::{Entity, Record, RecordId};

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered, session-scoped collection of one entity's records.
///
/// Ids come from a monotonically increasing counter and are never
/// reissued, even after a delete.
#[derive(Debug, Clone)]
pub struct RecordStore<E: Entity> {
    records: Vec<Record<E>>,
    last_id: u64,
}

impl<E: Entity> Default for RecordStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> RecordStore<E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            last_id: 0,
        }
    }

    /// Create a store holding the entity's mock records (ids 1..=n).
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for data in E::seed() {
            store.insert(data);
        }
        store
    }

    /// Append a record and return its new id.
    pub fn insert(&mut self, data: E) -> RecordId {
        self.last_id += 1;
        let id = RecordId(self.last_id);
        self.records.push(Record::new(id, data));
        info!("{}: inserted record {}", E::KIND, id);
        id
    }

    /// Replace a record's data in place, keeping its id and position.
    pub fn update(&mut self, id: RecordId, data: E) -> StoreResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.data = data;
        record.touch();
        info!("{}: updated record {}", E::KIND, id);
        Ok(())
    }

    /// Remove a record, preserving the order of the rest.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<Record<E>> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let record = self.records.remove(index);
        info!("{}: removed record {}", E::KIND, id);
        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<E>> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record<E>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record<E>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next insert will receive.
    pub fn next_id(&self) -> RecordId {
        RecordId(self.last_id + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pharmacy, Patient};

    fn pharmacy(name: &str) -> Pharmacy {
        Pharmacy {
            name: name.into(),
            address: "1 Rue Haute".into(),
            phone: "0102030405".into(),
        }
    }

    #[test]
    fn test_seeded_ids() {
        let store = RecordStore::<Patient>::seeded();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, RecordId(1));
        assert_eq!(store.next_id(), RecordId(2));
    }

    #[test]
    fn test_insert_is_count_plus_one() {
        let mut store = RecordStore::<Pharmacy>::seeded();
        for i in 0..5 {
            let before = store.len() as u64;
            let id = store.insert(pharmacy(&format!("Pharmacie {}", i)));
            assert_eq!(id, RecordId(before + 1));
        }
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = RecordStore::<Pharmacy>::new();
        let a = store.insert(pharmacy("Alpha"));
        let b = store.insert(pharmacy("Beta"));
        store.remove(b).unwrap();
        let c = store.insert(pharmacy("Gamma"));
        assert_ne!(c, b);
        assert_eq!(c, RecordId(3));
        assert!(store.contains(a));
        assert!(!store.contains(b));
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = RecordStore::<Pharmacy>::new();
        store.insert(pharmacy("Alpha"));
        let b = store.insert(pharmacy("Beta"));
        store.insert(pharmacy("Gamma"));

        store.update(b, pharmacy("Beta Prime")).unwrap();
        let names: Vec<_> = store.iter().map(|r| r.data.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta Prime", "Gamma"]);
        assert_eq!(store.records()[1].id, b);
    }

    #[test]
    fn test_missing_id() {
        let mut store = RecordStore::<Pharmacy>::new();
        assert_eq!(
            store.update(RecordId(9), pharmacy("X")),
            Err(StoreError::NotFound(RecordId(9)))
        );
        assert_eq!(
            store.remove(RecordId(9)).unwrap_err(),
            StoreError::NotFound(RecordId(9))
        );
    }
}
