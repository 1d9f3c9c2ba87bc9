// ==========================================
// Power Export Diff - diff engine
// ==========================================
// Structural difference between two snapshots, e.g.
// before vs after a design revision. Pure and
// side-effect free; safe to run concurrently against
// distinct snapshot pairs.
//
// Property comparison is dual-mode: numeric with unit
// stripping and relative tolerance when both sides
// parse, exact string equality otherwise. This absorbs
// "10.0" vs "10" and unit-spelling variance without
// requiring producers to normalize output.
// ==========================================

use crate::catalog::RecordTypeCatalog;
use crate::domain::record::{CompositeKey, RecordInstance};
use crate::domain::snapshot::Snapshot;
use crate::domain::types::ChangeKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// Relative tolerance for numeric comparison:
/// |a-b| <= tolerance * max(1, max(|a|, |b|))
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChange {
    pub property: String,
    /// Old and new values verbatim from the sources, never normalized.
    pub old_value: String,
    pub new_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffEntry {
    pub record_type: String,
    pub key: CompositeKey,
    pub kind: ChangeKind,
    /// Populated only for Modified, in declared property order.
    pub changes: Vec<PropertyChange>,
}

pub struct DiffEngine<'a> {
    catalog: &'a RecordTypeCatalog,
    tolerance: f64,
}

impl<'a> DiffEngine<'a> {
    pub fn new(catalog: &'a RecordTypeCatalog) -> Self {
        Self {
            catalog,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(catalog: &'a RecordTypeCatalog, tolerance: f64) -> Self {
        Self { catalog, tolerance }
    }

    /// Added/removed/modified report, ordered by record type name
    /// then composite key. Deterministic for reproducible reports.
    pub fn diff(&self, older: &Snapshot, newer: &Snapshot) -> Vec<DiffEntry> {
        let mut entries = Vec::new();

        let record_types: BTreeSet<&str> =
            older.record_types().chain(newer.record_types()).collect();

        for record_type in record_types {
            let keys: BTreeSet<&CompositeKey> = older
                .keys_of(record_type)
                .chain(newer.keys_of(record_type))
                .collect();

            for key in keys {
                match (older.get(record_type, key), newer.get(record_type, key)) {
                    (None, Some(_)) => entries.push(DiffEntry {
                        record_type: record_type.to_string(),
                        key: key.clone(),
                        kind: ChangeKind::Added,
                        changes: Vec::new(),
                    }),
                    (Some(_), None) => entries.push(DiffEntry {
                        record_type: record_type.to_string(),
                        key: key.clone(),
                        kind: ChangeKind::Removed,
                        changes: Vec::new(),
                    }),
                    (Some(old), Some(new)) => {
                        let changes = self.compare_records(record_type, old, new);
                        if !changes.is_empty() {
                            entries.push(DiffEntry {
                                record_type: record_type.to_string(),
                                key: key.clone(),
                                kind: ChangeKind::Modified,
                                changes,
                            });
                        }
                    }
                    (None, None) => unreachable!("key came from one of the snapshots"),
                }
            }
        }

        entries
    }

    /// One PropertyChange per differing declared property,
    /// deprecated properties excluded. Falls back to the union of
    /// observed property names for a type the catalog cannot
    /// describe (persisted snapshots from a newer catalog).
    fn compare_records(
        &self,
        record_type: &str,
        old: &RecordInstance,
        new: &RecordInstance,
    ) -> Vec<PropertyChange> {
        let properties: Vec<String> = match self.catalog.describe(record_type) {
            Some(descriptor) => descriptor
                .property_names()
                .filter(|p| !descriptor.is_deprecated(p))
                .map(str::to_string)
                .collect(),
            None => old
                .properties
                .keys()
                .chain(new.properties.keys())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        let mut changes = Vec::new();
        for property in properties {
            let old_value = old.get(&property).unwrap_or("");
            let new_value = new.get(&property).unwrap_or("");
            if !self.values_equal(old_value, new_value) {
                changes.push(PropertyChange {
                    property,
                    old_value: old_value.to_string(),
                    new_value: new_value.to_string(),
                });
            }
        }
        changes
    }

    /// Dual-mode equality: numeric with tolerance when both sides
    /// parse as a quantity, exact string equality otherwise.
    pub fn values_equal(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (parse_quantity(a), parse_quantity(b)) {
            (Some(x), Some(y)) => {
                (x - y).abs() <= self.tolerance * 1.0_f64.max(x.abs().max(y.abs()))
            }
            _ => false,
        }
    }
}

/// Parse a value as a number with an optional trailing unit token
/// ("24.1 kA", "4.2 cal/cm2", "98%"). The numeric prefix must be a
/// valid float; whatever follows must look like a unit, not more
/// number ("10-20" and "10.5.3" stay strings).
fn parse_quantity(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let numeric_end = numeric_prefix_len(trimmed);
    if numeric_end == 0 {
        return None;
    }
    let (number, rest) = trimmed.split_at(numeric_end);
    let number: f64 = number.parse().ok()?;

    let unit = rest.trim();
    if unit.is_empty() {
        return Some(number);
    }
    let mut chars = unit.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '%' || first == '°' || first == '·') {
        return None;
    }
    if unit
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '%' | '·' | '^' | '²' | '°' | '⁻'))
    {
        Some(number)
    } else {
        None
    }
}

/// Byte length of the leading float literal (sign, digits, one
/// dot, optional exponent).
fn numeric_prefix_len(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                digits += 1;
                i += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            b'e' | b'E' if digits > 0 => {
                // exponent: e[+-]digits, only if digits follow
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
                    j += 1;
                }
                let exp_start = j;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                if j > exp_start {
                    i = j;
                }
                break;
            }
            _ => break,
        }
    }
    if digits == 0 {
        0
    } else {
        i
    }
}
