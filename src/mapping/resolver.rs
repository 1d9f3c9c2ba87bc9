// ==========================================
// Power Export Diff - mapping resolver
// ==========================================
// Parses and validates a mapping document, then
// answers (type, property) <-> column lookups.
//
// Validation is pure: data-quality problems come back
// as a structured finding list and never panic or
// error. Only a structurally unparsable document is
// fatal (MappingValidationError).
// ==========================================

use crate::domain::types::{Finding, FindingKind, Severity};
use crate::mapping::document::{MappingDocument, MappingEntry};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Structurally malformed mapping document. Fatal for the
/// import job that supplied it.
#[derive(Error, Debug)]
pub enum MappingValidationError {
    #[error("mapping document unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("mapping document malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// MappingResolver
// ==========================================
pub struct MappingResolver {
    document: MappingDocument,
    /// (targetType, propertyName) -> entry index. First entry wins;
    /// later duplicates are reported by validate().
    by_type_property: HashMap<(String, String), usize>,
}

impl MappingResolver {
    pub fn new(document: MappingDocument) -> Self {
        let mut by_type_property = HashMap::with_capacity(document.import_map.len());
        for (index, entry) in document.import_map.iter().enumerate() {
            by_type_property
                .entry((entry.target_type.clone(), entry.property_name.clone()))
                .or_insert(index);
        }
        Self {
            document,
            by_type_property,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MappingValidationError> {
        let document: MappingDocument = serde_json::from_str(json)?;
        Ok(Self::new(document))
    }

    pub fn from_file(path: &Path) -> Result<Self, MappingValidationError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn document(&self) -> &MappingDocument {
        &self.document
    }

    /// The column header mapped to (type, property), if any.
    pub fn column_for(&self, record_type: &str, property: &str) -> Option<&str> {
        self.entry_for(record_type, property)
            .map(|e| e.column_header.as_str())
            .filter(|h| !h.is_empty())
    }

    /// The property a source column header feeds for `record_type`,
    /// considering aliases. Inverse of `column_for`. The returned
    /// borrow is tied to `self` only, not to either argument.
    pub fn property_for(&self, record_type: &str, header: &str) -> Option<&str> {
        self.document
            .import_map
            .iter()
            .find(|e| e.target_type == record_type && e.matches_header(header))
            .map(|e| e.property_name.as_str())
    }

    pub fn entry_for(&self, record_type: &str, property: &str) -> Option<&MappingEntry> {
        let index = self
            .by_type_property
            .get(&(record_type.to_string(), property.to_string()))?;
        self.document.import_map.get(*index)
    }

    pub fn entries_for<'a>(
        &'a self,
        record_type: &'a str,
    ) -> impl Iterator<Item = &'a MappingEntry> {
        self.document
            .import_map
            .iter()
            .filter(move |e| e.target_type == record_type)
    }

    /// Target types this document maps at least one property for,
    /// in first-appearance order, deduplicated.
    pub fn mapped_types(&self) -> Vec<&str> {
        let mut types = Vec::new();
        for entry in &self.document.import_map {
            if !entry.target_type.is_empty()
                && !types.contains(&entry.target_type.as_str())
            {
                types.push(entry.target_type.as_str());
            }
        }
        types
    }

    // ==========================================
    // validate - pure data-quality pass
    // ==========================================
    // Findings: duplicate (type, property) pairs, required
    // entries with a blank column header, blank target type
    // or property name. Never errors, never touches I/O.
    pub fn validate(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();

        for (index, entry) in self.document.import_map.iter().enumerate() {
            if entry.target_type.trim().is_empty() {
                findings.push(
                    Finding::new(
                        FindingKind::BlankMappingField,
                        Severity::Error,
                        format!("entry {}: blank targetType", index),
                    ),
                );
            }
            if entry.property_name.trim().is_empty() {
                findings.push(
                    Finding::new(
                        FindingKind::BlankMappingField,
                        Severity::Error,
                        format!("entry {}: blank propertyName", index),
                    )
                    .for_type(entry.target_type.clone()),
                );
            }
            if entry.required && entry.column_header.trim().is_empty() {
                findings.push(
                    Finding::new(
                        FindingKind::RequiredColumnBlank,
                        Severity::Error,
                        format!(
                            "required property {}.{} has no column header",
                            entry.target_type, entry.property_name
                        ),
                    )
                    .for_type(entry.target_type.clone()),
                );
            }

            if entry.target_type.is_empty() || entry.property_name.is_empty() {
                continue;
            }
            if let Some(first) = seen.insert(
                (entry.target_type.as_str(), entry.property_name.as_str()),
                index,
            ) {
                findings.push(
                    Finding::new(
                        FindingKind::DuplicateMapping,
                        Severity::Error,
                        format!(
                            "duplicate mapping for {}.{} (entries {} and {})",
                            entry.target_type, entry.property_name, first, index
                        ),
                    )
                    .for_type(entry.target_type.clone()),
                );
            }
        }

        findings
    }

    /// Types carrying at least one Error-severity mapping finding.
    /// Import proceeds only for unaffected types.
    pub fn types_with_errors(&self) -> Vec<String> {
        let mut affected = Vec::new();
        for finding in self.validate() {
            if finding.severity == Severity::Error {
                if let Some(record_type) = finding.record_type {
                    if !affected.contains(&record_type) {
                        affected.push(record_type);
                    }
                }
            }
        }
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Severity;
    use std::collections::BTreeSet;

    fn entry(target: &str, property: &str, header: &str) -> MappingEntry {
        MappingEntry {
            target_type: target.to_string(),
            property_name: property.to_string(),
            column_header: header.to_string(),
            required: false,
            severity: Severity::Warning,
            aliases: BTreeSet::new(),
            default_value: None,
        }
    }

    fn document(entries: Vec<MappingEntry>) -> MappingDocument {
        MappingDocument {
            software_version: "12.0".to_string(),
            map_version: "1".to_string(),
            import_map: entries,
        }
    }

    #[test]
    fn test_column_lookup_and_inverse() {
        let resolver = MappingResolver::new(document(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
        ]));

        assert_eq!(resolver.column_for("Bus", "BaseKV"), Some("Base kV"));
        assert_eq!(resolver.property_for("Bus", "Bus ID"), Some("EquipmentID"));
        assert_eq!(resolver.column_for("Bus", "NoSuchProperty"), None);
    }

    #[test]
    fn test_property_for_outlives_type_argument() {
        let resolver = MappingResolver::new(document(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
        ]));

        // The returned borrow must remain valid after the record type
        // string has been dropped.
        let property = {
            let record_type = format!("{}us", "B");
            resolver.property_for(&record_type, "Base kV")
        };
        assert_eq!(property, Some("BaseKV"));
    }

    #[test]
    fn test_validate_duplicate_pair() {
        let resolver = MappingResolver::new(document(vec![
            entry("Bus", "BaseKV", "Base kV"),
            entry("Bus", "BaseKV", "Nominal kV"),
        ]));

        let findings = resolver.validate();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::DuplicateMapping);
        assert_eq!(resolver.types_with_errors(), vec!["Bus".to_string()]);
    }

    #[test]
    fn test_validate_required_blank_header() {
        let mut bad = entry("Breaker", "EquipmentID", "");
        bad.required = true;
        let resolver = MappingResolver::new(document(vec![bad]));

        let findings = resolver.validate();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::RequiredColumnBlank);
    }

    #[test]
    fn test_validate_blank_fields() {
        let resolver = MappingResolver::new(document(vec![
            entry("", "BaseKV", "Base kV"),
            entry("Bus", "", "Something"),
        ]));

        let kinds: Vec<_> = resolver.validate().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FindingKind::BlankMappingField, FindingKind::BlankMappingField]
        );
    }

    #[test]
    fn test_validate_clean_document_is_empty() {
        let resolver = MappingResolver::new(document(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
        ]));
        assert!(resolver.validate().is_empty());
    }

    #[test]
    fn test_from_json_malformed_is_fatal() {
        let result = MappingResolver::from_json("{ not json");
        assert!(matches!(result, Err(MappingValidationError::Parse(_))));
    }

    #[test]
    fn test_mapped_types_dedup_in_order() {
        let resolver = MappingResolver::new(document(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Switch", "EquipmentID", "ID"),
            entry("Bus", "BaseKV", "Base kV"),
        ]));
        assert_eq!(resolver.mapped_types(), vec!["Bus", "Switch"]);
    }
}
