// ==========================================
// Power Export Diff - snapshot model
// ==========================================
// A snapshot is one point-in-time dataset: for every
// record type, a keyed map of record instances, plus
// the distinct key-component values observed per type
// (scenario discovery).
//
// Persistence: JSON, with each entry carrying an
// explicit ordered keyComponents array next to its
// property map. Never a language-native tuple
// encoding, so the format is stable across tools.
// ==========================================

use crate::domain::record::{CompositeKey, RecordInstance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use uuid::Uuid;

// ==========================================
// Snapshot
// ==========================================
// Populated by ImportMerger::merge_into, read by
// DiffEngine. Treated as immutable once a merge
// session ends; diffing never mutates it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snapshot_id: String,
    pub created_at: DateTime<Utc>,
    records: BTreeMap<String, BTreeMap<CompositeKey, RecordInstance>>,
    /// Per record type, per key-component position, the union of
    /// distinct values observed. Position 0 of a scenario-keyed
    /// type is the set of scenarios present in this snapshot.
    key_component_values: BTreeMap<String, Vec<BTreeSet<String>>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self {
            snapshot_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            records: BTreeMap::new(),
            key_component_values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, record_type: &str, key: CompositeKey, record: RecordInstance) {
        let observed = self
            .key_component_values
            .entry(record_type.to_string())
            .or_insert_with(|| vec![BTreeSet::new(); key.len()]);
        for (position, component) in key.components().iter().enumerate() {
            if let Some(values) = observed.get_mut(position) {
                values.insert(component.clone());
            }
        }
        self.records
            .entry(record_type.to_string())
            .or_default()
            .insert(key, record);
    }

    pub fn get(&self, record_type: &str, key: &CompositeKey) -> Option<&RecordInstance> {
        self.records.get(record_type)?.get(key)
    }

    pub fn contains(&self, record_type: &str, key: &CompositeKey) -> bool {
        self.get(record_type, key).is_some()
    }

    /// Record types present, in sorted order.
    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records_of(
        &self,
        record_type: &str,
    ) -> impl Iterator<Item = (&CompositeKey, &RecordInstance)> {
        self.records.get(record_type).into_iter().flatten()
    }

    pub fn keys_of(&self, record_type: &str) -> impl Iterator<Item = &CompositeKey> {
        self.records.get(record_type).into_iter().flatten().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(BTreeMap::is_empty)
    }

    /// Distinct values observed for one key-component position of a type.
    /// Scenario discovery asks for position 0 of a scenario-keyed type.
    pub fn key_component_values(&self, record_type: &str, position: usize) -> Vec<String> {
        self.key_component_values
            .get(record_type)
            .and_then(|positions| positions.get(position))
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    // ==========================================
    // Persistence (JSON, explicit key arrays)
    // ==========================================

    pub fn to_json(&self) -> serde_json::Result<String> {
        let model = SnapshotFile::from_snapshot(self);
        serde_json::to_string_pretty(&model)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let model: SnapshotFile = serde_json::from_str(json)?;
        Ok(model.into_snapshot())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

// Equality is by content (keys and property values), not by
// snapshot id or timestamp. Two snapshots built from the same
// record sets in any merge order compare equal.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for Snapshot {}

// ==========================================
// SnapshotFile - persisted wire form
// ==========================================
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    snapshot_id: String,
    created_at: DateTime<Utc>,
    record_types: BTreeMap<String, Vec<SnapshotEntry>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEntry {
    key_components: Vec<String>,
    properties: BTreeMap<String, String>,
}

impl SnapshotFile {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        let record_types = snapshot
            .records
            .iter()
            .map(|(record_type, by_key)| {
                let entries = by_key
                    .iter()
                    .map(|(key, record)| SnapshotEntry {
                        key_components: key.components().to_vec(),
                        properties: record.properties.clone(),
                    })
                    .collect();
                (record_type.clone(), entries)
            })
            .collect();

        Self {
            snapshot_id: snapshot.snapshot_id.clone(),
            created_at: snapshot.created_at,
            record_types,
        }
    }

    fn into_snapshot(self) -> Snapshot {
        let mut snapshot = Snapshot {
            snapshot_id: self.snapshot_id,
            created_at: self.created_at,
            records: BTreeMap::new(),
            key_component_values: BTreeMap::new(),
        };
        for (record_type, entries) in self.record_types {
            for entry in entries {
                snapshot.insert(
                    &record_type,
                    CompositeKey::new(entry.key_components),
                    RecordInstance {
                        properties: entry.properties,
                    },
                );
            }
        }
        snapshot
    }
}
