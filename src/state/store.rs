use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use thiserror::Error;

use crate::state::schema::{Record, RecordId, Schema};

/// Errors raised by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{label} not found")]
    NotFound { label: &'static str, id: RecordId },
}

/// Insertion-ordered records plus the next id to hand out.
#[derive(Debug, Default)]
struct Collection {
    records: Vec<Record>,
    next_id: RecordId,
}

impl Collection {
    fn allocate_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| record_id(r) == Some(id))
    }
}

/// In-memory collection of one resource kind.
///
/// Every operation takes the lock once and finishes before releasing it, so
/// a create/update/delete is never observed half applied. Ids come from a
/// counter owned by the collection and are never reused.
pub struct ResourceStore<S: Schema> {
    collection: RwLock<Collection>,
    _schema: PhantomData<fn() -> S>,
}

/// Shared store handle used as router state.
pub type SharedStore<S> = Arc<ResourceStore<S>>;

impl<S: Schema> ResourceStore<S> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store holding the schema's example records.
    pub fn seeded() -> Self {
        Self::with_records(S::seed())
    }

    /// Create a store from initial records; ids 1..=n are assigned in order.
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut collection = Collection { records: Vec::with_capacity(records.len()), next_id: 1 };

        for fields in records {
            let id = collection.allocate_id();
            collection.records.push(stamp(id, fields));
        }

        Self { collection: RwLock::new(collection), _schema: PhantomData }
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<Record> {
        self.read().records.clone()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate, assign a fresh id, append, and return the new record.
    pub fn create(&self, fields: Record) -> Result<Record, StoreError> {
        S::validate(&fields)?;

        let mut collection = self.write();
        let id = collection.allocate_id();
        let record = stamp(id, S::build(without_id(fields)));
        collection.records.push(record.clone());

        Ok(record)
    }

    pub fn find_by_id(&self, id: RecordId) -> Option<Record> {
        let collection = self.read();
        collection.position(id).map(|i| collection.records[i].clone())
    }

    /// Merge `patch` into the record with `id`; untouched fields are kept.
    pub fn update_by_id(&self, id: RecordId, patch: Record) -> Result<Record, StoreError> {
        let mut collection = self.write();
        let index = collection.position(id).ok_or(StoreError::NotFound { label: S::LABEL, id })?;

        let record = &mut collection.records[index];
        S::merge(record, without_id(patch));

        Ok(record.clone())
    }

    /// Remove and return the record with `id`.
    pub fn delete_by_id(&self, id: RecordId) -> Result<Record, StoreError> {
        let mut collection = self.write();
        let index = collection.position(id).ok_or(StoreError::NotFound { label: S::LABEL, id })?;

        Ok(collection.records.remove(index))
    }

    // A panic while holding the lock cannot leave a record half written
    // (mutations are single inserts/removes), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Collection> {
        self.collection.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collection> {
        self.collection.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Schema> Default for ResourceStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// The id stored on a record, if any.
pub fn record_id(record: &Record) -> Option<RecordId> {
    record.get("id").and_then(Value::as_u64)
}

fn without_id(mut fields: Record) -> Record {
    fields.remove("id");
    fields
}

/// Build a record with `id` as its first field.
fn stamp(id: RecordId, fields: Record) -> Record {
    let mut record = Record::with_capacity(fields.len() + 1);
    record.insert("id".to_string(), Value::from(id));
    record.extend(without_id(fields));
    record
}
