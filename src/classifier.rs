// ==========================================
// Power Export Diff - column signature classifier
// ==========================================
// Decides which record type an unlabeled header row
// represents by scoring header overlap against each
// type's mapped columns.
//
// At most ONE type activates per header row. Types
// sharing a few generic columns (a status or id
// column) must not both activate; the single-winner
// rule with its key-column check is load-bearing and
// deliberately strict.
// ==========================================

use crate::catalog::RecordTypeCatalog;
use crate::mapping::MappingResolver;
use tracing::{debug, warn};

/// Minimum percentage of a type's mapped columns that must be
/// present before the type is considered at all.
pub const MIN_MATCH_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub record_type: String,
    /// Mapped columns of the type found in the header row.
    pub match_count: usize,
    /// match_count over the type's total mapped columns, 0..=100.
    pub percentage: f64,
}

pub struct ColumnSignatureClassifier<'a> {
    catalog: &'a RecordTypeCatalog,
    min_match_threshold: f64,
}

impl<'a> ColumnSignatureClassifier<'a> {
    pub fn new(catalog: &'a RecordTypeCatalog) -> Self {
        Self {
            catalog,
            min_match_threshold: MIN_MATCH_THRESHOLD,
        }
    }

    pub fn with_threshold(catalog: &'a RecordTypeCatalog, min_match_threshold: f64) -> Self {
        Self {
            catalog,
            min_match_threshold,
        }
    }

    /// Classify one header row. Returns the single activated type,
    /// or None when no candidate survives scoring and verification.
    ///
    /// Candidate iteration follows catalog declaration order, which
    /// doubles as the final deterministic tie-breaker.
    pub fn classify(
        &self,
        headers: &[String],
        resolver: &MappingResolver,
    ) -> Option<Classification> {
        let mut winner: Option<Classification> = None;

        for record_type in self.catalog.list_types() {
            let mapped_total = resolver
                .entries_for(record_type)
                .filter(|e| !e.column_header.is_empty())
                .count();
            if mapped_total == 0 {
                continue;
            }

            let match_count = resolver
                .entries_for(record_type)
                .filter(|e| !e.column_header.is_empty())
                .filter(|e| headers.iter().any(|h| e.matches_header(h)))
                .count();
            let percentage = match_count as f64 / mapped_total as f64 * 100.0;

            if percentage < self.min_match_threshold {
                continue;
            }
            debug!(
                record_type,
                match_count, percentage, "classification candidate"
            );

            let candidate = Classification {
                record_type: record_type.to_string(),
                match_count,
                percentage,
            };
            winner = match winner {
                None => Some(candidate),
                Some(current) => {
                    // highest match count, then highest percentage;
                    // declaration order keeps the earlier candidate on a full tie
                    if candidate.match_count > current.match_count
                        || (candidate.match_count == current.match_count
                            && candidate.percentage > current.percentage)
                    {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        let candidate = winner?;

        // a winner without any of its key-component columns present
        // cannot be keyed; reject the classification outright rather
        // than importing unkeyable rows
        if !self.key_column_present(&candidate.record_type, headers, resolver) {
            warn!(
                record_type = %candidate.record_type,
                "classification rejected: no key-component column in header row"
            );
            return None;
        }

        Some(candidate)
    }

    fn key_column_present(
        &self,
        record_type: &str,
        headers: &[String],
        resolver: &MappingResolver,
    ) -> bool {
        let Some(descriptor) = self.catalog.describe(record_type) else {
            return false;
        };
        descriptor.key_components.iter().any(|component| {
            resolver
                .entry_for(record_type, component)
                .is_some_and(|entry| headers.iter().any(|h| entry.matches_header(h)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Severity;
    use crate::mapping::{MappingDocument, MappingEntry};
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

    fn resolver(entries: Vec<MappingEntry>) -> MappingResolver {
        MappingResolver::new(MappingDocument {
            software_version: "12.0".to_string(),
            map_version: "1".to_string(),
            import_map: entries,
        })
    }

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_winner_over_generic_overlap() {
        // Bus maps all three headers; Switch overlaps on one
        // generic id column. Only Bus may activate.
        let resolver = resolver(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
            entry("Bus", "NoOfPhases", "No of Phases"),
            entry("Switch", "EquipmentID", "Bus ID"),
            entry("Switch", "RatedKV", "Rated kV"),
            entry("Switch", "Status", "Status"),
        ]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        let result = classifier
            .classify(&headers(&["Bus ID", "Base kV", "No of Phases"]), &resolver)
            .expect("Bus must activate");

        assert_eq!(result.record_type, "Bus");
        assert_eq!(result.match_count, 3);
        assert!(result.percentage >= 66.0);
    }

    #[test]
    fn test_below_threshold_rejected() {
        // 1 of 4 mapped columns present = 25%, below 30%
        let resolver = resolver(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
            entry("Bus", "NoOfPhases", "No of Phases"),
            entry("Bus", "Status", "Status"),
        ]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        assert!(classifier.classify(&headers(&["Bus ID"]), &resolver).is_none());
    }

    #[test]
    fn test_winner_without_key_column_rejected() {
        // Bus scores well but its key column (EquipmentID) is absent
        let resolver = resolver(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
            entry("Bus", "NoOfPhases", "No of Phases"),
        ]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        assert!(classifier
            .classify(&headers(&["Base kV", "No of Phases"]), &resolver)
            .is_none());
    }

    #[test]
    fn test_tie_breaks_by_declaration_order() {
        // identical scores for Bus (declared first) and Switch
        let resolver = resolver(vec![
            entry("Bus", "EquipmentID", "ID"),
            entry("Bus", "Status", "Status"),
            entry("Switch", "EquipmentID", "ID"),
            entry("Switch", "Status", "Status"),
        ]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        let result = classifier
            .classify(&headers(&["ID", "Status"]), &resolver)
            .unwrap();
        assert_eq!(result.record_type, "Bus");
    }

    #[test]
    fn test_alias_counts_as_match() {
        let mut id = entry("Bus", "EquipmentID", "Bus ID");
        id.aliases.insert("Bus Name".to_string());
        let resolver = resolver(vec![id, entry("Bus", "BaseKV", "Base kV")]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        let result = classifier
            .classify(&headers(&["Bus Name", "Base kV"]), &resolver)
            .unwrap();
        assert_eq!(result.record_type, "Bus");
        assert_eq!(result.match_count, 2);
    }

    #[test]
    fn test_case_sensitive_header_match() {
        let resolver = resolver(vec![
            entry("Bus", "EquipmentID", "Bus ID"),
            entry("Bus", "BaseKV", "Base kV"),
        ]);
        let catalog = RecordTypeCatalog::new();
        let classifier = ColumnSignatureClassifier::new(&catalog);

        // lowercase headers do not match the mapped headers
        assert!(classifier
            .classify(&headers(&["bus id", "base kv"]), &resolver)
            .is_none());
    }
}
