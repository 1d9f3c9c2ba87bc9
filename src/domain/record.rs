// ==========================================
// Power Export Diff - record domain model
// ==========================================
// CompositeKey: variable-length identity tuple with
// value semantics, used uniformly for one-, two- and
// three-component identities.
// RecordInstance: one imported row, property -> value.
// All property values stay opaque strings for source
// fidelity; interpretation happens only at diff time.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// CompositeKey - ordered identity tuple
// ==========================================
// Component order follows the record type's declared
// key-component order. Equality and hash are by
// content; Ord gives deterministic report ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey(Vec<String>);

impl CompositeKey {
    pub fn new(components: Vec<String>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Component at position `index`, if present.
    pub fn component(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// A copy of this key with one component replaced.
    /// Used by scenario relabeling during merge.
    pub fn with_component(&self, index: usize, value: impl Into<String>) -> Self {
        let mut components = self.0.clone();
        if let Some(slot) = components.get_mut(index) {
            *slot = value.into();
        }
        Self(components)
    }

    pub fn into_components(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}

// ==========================================
// RecordInstance - one typed, keyed record
// ==========================================
// BTreeMap keeps property iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInstance {
    pub properties: BTreeMap<String, String>,
}

impl RecordInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }
}

impl FromIterator<(String, String)> for RecordInstance {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

// ==========================================
// PerTypeRecordSet - one import's output
// ==========================================
// Temporary, per-file container produced by
// ImportMerger::import_one and consumed by merge_into.
// No snapshot is touched while this is being built.
#[derive(Debug, Clone, Default)]
pub struct PerTypeRecordSet {
    records: BTreeMap<String, BTreeMap<CompositeKey, RecordInstance>>,
}

impl PerTypeRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the previous record if the
    /// same key was already seen in this set (within-file duplicate).
    pub fn insert(
        &mut self,
        record_type: &str,
        key: CompositeKey,
        record: RecordInstance,
    ) -> Option<RecordInstance> {
        self.records
            .entry(record_type.to_string())
            .or_default()
            .insert(key, record)
    }

    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records_of(
        &self,
        record_type: &str,
    ) -> impl Iterator<Item = (&CompositeKey, &RecordInstance)> {
        self.records.get(record_type).into_iter().flatten()
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&str, &CompositeKey, &RecordInstance)> {
        self.records.iter().flat_map(|(record_type, by_key)| {
            by_key
                .iter()
                .map(move |(key, record)| (record_type.as_str(), key, record))
        })
    }

    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key_value_equality() {
        let a = CompositeKey::new(vec!["Main-Max".to_string(), "BUS-01".to_string()]);
        let b = CompositeKey::new(vec!["Main-Max".to_string(), "BUS-01".to_string()]);
        let c = CompositeKey::new(vec!["Main-Min".to_string(), "BUS-01".to_string()]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_composite_key_length_matters() {
        let one = CompositeKey::new(vec!["BUS-01".to_string()]);
        let two = CompositeKey::new(vec!["BUS-01".to_string(), String::new()]);
        assert_ne!(one, two);
    }

    #[test]
    fn test_composite_key_with_component() {
        let key = CompositeKey::new(vec!["Main-Min".to_string(), "CB-7".to_string()]);
        let relabeled = key.with_component(0, "Revision-B");

        assert_eq!(relabeled.component(0), Some("Revision-B"));
        assert_eq!(relabeled.component(1), Some("CB-7"));
        // original untouched
        assert_eq!(key.component(0), Some("Main-Min"));
    }

    #[test]
    fn test_record_set_detects_within_file_duplicate() {
        let mut set = PerTypeRecordSet::new();
        let key = CompositeKey::new(vec!["BUS-01".to_string()]);

        let mut first = RecordInstance::new();
        first.set("BaseKV", "13.8");
        let mut second = RecordInstance::new();
        second.set("BaseKV", "4.16");

        assert!(set.insert("Bus", key.clone(), first).is_none());
        let previous = set.insert("Bus", key, second).expect("duplicate key");
        assert_eq!(previous.get("BaseKV"), Some("13.8"));
        assert_eq!(set.len(), 1);
    }
}
