// ==========================================
// Power Export Diff - composite key builder
// ==========================================
// Builds a record's composite key from its type's
// key-component properties, in declared order. A
// missing or blank component rejects the row: keying
// with empty strings would manufacture false
// collisions downstream.
// ==========================================

use crate::catalog::RecordTypeCatalog;
use crate::domain::record::{CompositeKey, RecordInstance};
use crate::importer::error::{ImportError, ImportResult};
use thiserror::Error;

/// A row is missing a value for one of its type's key
/// components. Row-level and recoverable: the caller skips
/// the row and records a finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("incomplete key for {record_type}: {missing_component} is missing or blank")]
pub struct IncompleteKey {
    pub record_type: String,
    pub missing_component: String,
}

pub struct CompositeKeyBuilder<'a> {
    catalog: &'a RecordTypeCatalog,
}

impl<'a> CompositeKeyBuilder<'a> {
    pub fn new(catalog: &'a RecordTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Build the key for one record instance. The component order
    /// is the descriptor's declared key-component order, always.
    pub fn build(
        &self,
        record_type: &str,
        record: &RecordInstance,
    ) -> ImportResult<Result<CompositeKey, IncompleteKey>> {
        let descriptor = self
            .catalog
            .describe(record_type)
            .ok_or_else(|| ImportError::UnknownRecordType(record_type.to_string()))?;

        let mut components = Vec::with_capacity(descriptor.key_components.len());
        for component in &descriptor.key_components {
            match record.get(component).map(str::trim) {
                Some(value) if !value.is_empty() => components.push(value.to_string()),
                _ => {
                    return Ok(Err(IncompleteKey {
                        record_type: record_type.to_string(),
                        missing_component: component.clone(),
                    }))
                }
            }
        }
        Ok(Ok(CompositeKey::new(components)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_components_in_declared_order() {
        let catalog = RecordTypeCatalog::new();
        let builder = CompositeKeyBuilder::new(&catalog);

        let mut record = RecordInstance::new();
        record.set("EquipmentID", "PD-CB-12");
        record.set("Scenario", "Main-Max");
        record.set("IncidentEnergy", "4.2");

        let key = builder
            .build("ArcFlashResult", &record)
            .unwrap()
            .expect("complete key");
        // Scenario is declared first, regardless of insertion order
        assert_eq!(key.components(), &["Main-Max", "PD-CB-12"]);
    }

    #[test]
    fn test_blank_component_rejected() {
        let catalog = RecordTypeCatalog::new();
        let builder = CompositeKeyBuilder::new(&catalog);

        let mut record = RecordInstance::new();
        record.set("EquipmentID", "BUS-01");
        record.set("Scenario", "   ");

        let incomplete = builder
            .build("ArcFlashResult", &record)
            .unwrap()
            .expect_err("blank scenario must reject the row");
        assert_eq!(incomplete.missing_component, "Scenario");
    }

    #[test]
    fn test_missing_component_rejected() {
        let catalog = RecordTypeCatalog::new();
        let builder = CompositeKeyBuilder::new(&catalog);

        let mut record = RecordInstance::new();
        record.set("BaseKV", "13.8");

        let incomplete = builder.build("Bus", &record).unwrap().expect_err("no id");
        assert_eq!(incomplete.missing_component, "EquipmentID");
    }

    #[test]
    fn test_unknown_type_is_configuration_error() {
        let catalog = RecordTypeCatalog::new();
        let builder = CompositeKeyBuilder::new(&catalog);

        let result = builder.build("FluxCapacitor", &RecordInstance::new());
        assert!(matches!(result, Err(ImportError::UnknownRecordType(_))));
    }

    #[test]
    fn test_single_and_multi_component_keys_uniform() {
        let catalog = RecordTypeCatalog::new();
        let builder = CompositeKeyBuilder::new(&catalog);

        let mut bus = RecordInstance::new();
        bus.set("EquipmentID", "BUS-01");
        let bus_key = builder.build("Bus", &bus).unwrap().unwrap();
        assert_eq!(bus_key.len(), 1);

        let mut cable = RecordInstance::new();
        cable.set("EquipmentID", "CBL-7");
        cable.set("ToBus", "BUS-02");
        let cable_key = builder.build("Cable", &cable).unwrap().unwrap();
        assert_eq!(cable_key.len(), 2);
    }
}
