//! Field mapping between caller records and API entity shapes.
//!
//! Pure data transformation: nothing here signs, sends or caches anything.
//! The gateway owns `Id` and `SyncToken`; mappings never set them.

mod customer;
mod invoice;
mod item;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::Result, gateway::Resource};

pub use customer::CustomerFields;
pub use invoice::{LineItem, NewInvoice};
pub use item::NewItem;

/// A record that can be created as a brand-new entity.
pub trait NewEntity {
    const RESOURCE: Resource;

    /// The entity body, without the type-name wrapper.
    fn to_record(&self) -> Result<Map<String, Value>>;
}

/// Caller-supplied overrides for a read-modify-write update.
pub trait MergeFields {
    /// Builds the outgoing record from `current`, the entity as just
    /// fetched. A value present in `self` wins; otherwise the fetched value
    /// is carried forward; otherwise the field is left out.
    fn merge(&self, current: &Map<String, Value>) -> Result<Map<String, Value>>;
}

/// Shallow merge: every top-level key of the override map replaces the
/// fetched one.
impl MergeFields for Map<String, Value> {
    fn merge(&self, current: &Map<String, Value>) -> Result<Map<String, Value>> {
        let mut merged = current.clone();
        for (key, value) in self {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }
}

pub(crate) fn to_map<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    Ok(serde_json::from_value(serde_json::to_value(record)?)?)
}

/// String at `path` inside `current`, e.g. `["BillAddr", "City"]`.
pub(crate) fn lookup(current: &Map<String, Value>, path: &[&str]) -> Option<String> {
    let (first, rest) = path.split_first()?;
    let mut value = current.get(*first)?;
    for key in rest {
        value = value.get(*key)?;
    }
    value.as_str().map(str::to_string)
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Reference {
    pub value: String,
}

impl Reference {
    pub fn new(value: impl Into<String>) -> Self {
        Reference {
            value: value.into(),
        }
    }
}
