//! Log entries
//!
//! An entry is the set of fields attached to a logger. Entries are immutable:
//! deriving one copies the parent's fields into a new map, so a base entry can
//! be shared across threads and extended independently by each of them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

pub type Fields = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Entry {
    fields: Arc<Fields>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new entry holding this entry's fields plus `key`.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = Fields::clone(&self.fields);
        fields.insert(key.into(), value.into());
        Self {
            fields: Arc::new(fields),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
