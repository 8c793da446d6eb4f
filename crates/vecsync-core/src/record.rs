//! Record and pending-mutation model.
//!
//! The host persistence layer owns records; the pipeline only reads a
//! record's attributes and appends derived vector fields to the pending
//! mutation that is about to be committed. Attribute values are plain
//! JSON values so any host schema can be represented without a type
//! mapping layer.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A versioned entity with named attributes, owned by the host
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Resource type this record belongs to.
    pub resource: String,
    /// Unique record identifier.
    pub id: Uuid,
    /// Named attribute values.
    #[serde(default)]
    pub attrs: HashMap<String, Value>,
}

impl Record {
    /// Creates a new record with no attributes.
    pub fn new(resource: impl Into<String>, id: Uuid) -> Self {
        Self {
            resource: resource.into(),
            id,
            attrs: HashMap::new(),
        }
    }

    /// Sets an attribute, builder-style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Returns an attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Returns an attribute as a string slice, if present and textual.
    pub fn text_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(Value::as_str)
    }

    /// Returns the identity of this record.
    pub fn record_ref(&self) -> RecordRef {
        RecordRef {
            resource: self.resource.clone(),
            record_id: self.id,
        }
    }
}

/// Identity of a record, used as the payload of deferred refresh jobs.
///
/// Carries only the resource name and id; the worker re-reads the record
/// at execution time, so a stale job can never write stale attribute
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Resource type of the record.
    pub resource: String,
    /// Unique record identifier.
    pub record_id: Uuid,
}

impl RecordRef {
    /// Creates a new record reference.
    pub fn new(resource: impl Into<String>, record_id: Uuid) -> Self {
        Self {
            resource: resource.into(),
            record_id,
        }
    }
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.resource, self.record_id)
    }
}

/// The ordered set of (attribute, value) pairs queued to be written to a
/// record as part of the current mutation.
///
/// Order is preserved so vector fields written back from a batched
/// adapter call keep their positional pairing. Setting the same
/// attribute twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingMutation {
    changes: Vec<(String, Value)>,
}

impl PendingMutation {
    /// Creates an empty mutation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a value for the given attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.changes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.changes.push((name, value));
        }
    }

    /// Queues a value, builder-style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the queued value for an attribute, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.changes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the set of attribute names this mutation changes.
    pub fn changed_attrs(&self) -> HashSet<&str> {
        self.changes.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns true if no changes are queued.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of queued changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Iterates over the queued changes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.changes.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Produces the post-mutation view of a record, with queued changes
    /// applied over the stored attributes.
    pub fn apply_to(&self, record: &Record) -> Record {
        let mut pending = record.clone();
        for (name, value) in &self.changes {
            pending.attrs.insert(name.clone(), value.clone());
        }
        pending
    }

    /// Consumes the mutation, returning the queued changes in order.
    pub fn into_changes(self) -> Vec<(String, Value)> {
        self.changes
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mutation_preserves_insertion_order() {
        let mut mutation = PendingMutation::new();
        mutation.set("name", "Alice");
        mutation.set("age", 33);
        mutation.set("biography", "loves music");

        let names: Vec<&str> = mutation.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["name", "age", "biography"]);
    }

    #[test]
    fn mutation_set_replaces_in_place() {
        let mut mutation = PendingMutation::new();
        mutation.set("name", "Alice");
        mutation.set("age", 33);
        mutation.set("name", "Bob");

        assert_eq!(mutation.len(), 2);
        assert_eq!(mutation.get("name"), Some(&json!("Bob")));
        let names: Vec<&str> = mutation.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[test]
    fn apply_to_produces_pending_view() {
        let record = Record::new("user", Uuid::new_v4())
            .with_attr("name", "Alice")
            .with_attr("age", 32);

        let mutation = PendingMutation::new().with("age", 33);
        let pending = mutation.apply_to(&record);

        assert_eq!(pending.attr("age"), Some(&json!(33)));
        assert_eq!(pending.text_attr("name"), Some("Alice"));
        // Original record is untouched
        assert_eq!(record.attr("age"), Some(&json!(32)));
    }

    #[test]
    fn changed_attrs_reflects_queued_names() {
        let mutation = PendingMutation::new()
            .with("name", "Alice")
            .with("biography", "loves music");

        let changed = mutation.changed_attrs();
        assert!(changed.contains("name"));
        assert!(changed.contains("biography"));
        assert!(!changed.contains("age"));
    }
}
