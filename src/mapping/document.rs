// ==========================================
// Power Export Diff - mapping document model
// ==========================================
// The user-authored column -> property mapping, as
// persisted JSON. Loaded per import job, validated,
// and never mutated by the engine.
//
// Wire form:
// {
//   "softwareVersion": "12.0",
//   "mapVersion": "3",
//   "importMap": [ { "targetType": ..., ... } ]
// }
// ==========================================

use crate::domain::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDocument {
    /// Version tag of the export tool this map was authored against.
    pub software_version: String,
    pub map_version: String,
    pub import_map: Vec<MappingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub target_type: String,
    pub property_name: String,
    /// Expected column header in the source export. Header drift
    /// across tool versions is absorbed by `aliases`.
    pub column_header: String,
    pub required: bool,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub aliases: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl MappingEntry {
    /// Whether `header` names this entry's column, either by the
    /// primary header or one of its aliases. Case-sensitive exact.
    pub fn matches_header(&self, header: &str) -> bool {
        (!self.column_header.is_empty() && self.column_header == header)
            || self.aliases.contains(header)
    }

    /// The first of (primary header, aliases...) present in
    /// `headers`, if any.
    pub fn resolve_header<'a>(&'a self, headers: &[String]) -> Option<&'a str> {
        if !self.column_header.is_empty() && headers.iter().any(|h| h == &self.column_header) {
            return Some(self.column_header.as_str());
        }
        self.aliases
            .iter()
            .find(|alias| headers.iter().any(|h| h == *alias))
            .map(String::as_str)
    }
}
