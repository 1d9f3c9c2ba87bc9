// ==========================================
// DiffEngine integration tests
// ==========================================
// Goal: verify added/removed/modified reporting and
// the tolerance- and unit-aware comparison semantics
// over snapshots built through the import pipeline.
// ==========================================

use power_export_diff::{
    ChangeKind, CompositeKey, DiffEngine, ImportMerger, MappingDocument, MappingEntry,
    MappingResolver, MergeOptions, RecordInstance, RecordTypeCatalog, Severity, Snapshot,
};
use std::collections::BTreeSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn bus(snapshot: &mut Snapshot, id: &str, base_kv: &str, status: &str) {
    let mut record = RecordInstance::new();
    record.set("EquipmentID", id);
    record.set("BaseKV", base_kv);
    record.set("Status", status);
    snapshot.insert("Bus", CompositeKey::new(vec![id.to_string()]), record);
}

#[test]
fn test_self_diff_is_empty() {
    let catalog = RecordTypeCatalog::new();
    let engine = DiffEngine::new(&catalog);

    let mut snapshot = Snapshot::new();
    bus(&mut snapshot, "BUS-01", "13.8", "Closed");
    bus(&mut snapshot, "BUS-02", "4.16", "Open");

    assert!(engine.diff(&snapshot, &snapshot).is_empty());
}

#[test]
fn test_added_and_removed() {
    let catalog = RecordTypeCatalog::new();
    let engine = DiffEngine::new(&catalog);

    let mut older = Snapshot::new();
    bus(&mut older, "BUS-01", "13.8", "Closed");
    bus(&mut older, "BUS-02", "4.16", "Open");

    let mut newer = Snapshot::new();
    bus(&mut newer, "BUS-01", "13.8", "Closed");
    bus(&mut newer, "BUS-03", "2.4", "Closed");

    let entries = engine.diff(&older, &newer);
    assert_eq!(entries.len(), 2);

    let removed = entries.iter().find(|e| e.kind == ChangeKind::Removed).unwrap();
    assert_eq!(removed.key, CompositeKey::new(vec!["BUS-02".to_string()]));
    let added = entries.iter().find(|e| e.kind == ChangeKind::Added).unwrap();
    assert_eq!(added.key, CompositeKey::new(vec!["BUS-03".to_string()]));
}

#[test]
fn test_numeric_tolerance_absorbs_formatting_noise() {
    let catalog = RecordTypeCatalog::new();
    let engine = DiffEngine::new(&catalog);

    let key = CompositeKey::new(vec!["Main-Max".to_string(), "BUS-01".to_string()]);

    let mut older = Snapshot::new();
    let mut a = RecordInstance::new();
    a.set("ThreePhaseKA", "10 kA");
    a.set("XOverR", "6.40");
    older.insert("ShortCircuitResult", key.clone(), a);

    let mut newer = Snapshot::new();
    let mut b = RecordInstance::new();
    b.set("ThreePhaseKA", "10.000001 kA");
    b.set("XOverR", "6.4");
    newer.insert("ShortCircuitResult", key, b);

    assert!(engine.diff(&older, &newer).is_empty());
}

#[test]
fn test_real_change_reported_with_verbatim_values() {
    let catalog = RecordTypeCatalog::new();
    let engine = DiffEngine::new(&catalog);

    let key = CompositeKey::new(vec!["Main-Max".to_string(), "BUS-01".to_string()]);

    let mut older = Snapshot::new();
    let mut a = RecordInstance::new();
    a.set("ThreePhaseKA", "10 kA");
    older.insert("ShortCircuitResult", key.clone(), a);

    let mut newer = Snapshot::new();
    let mut b = RecordInstance::new();
    b.set("ThreePhaseKA", "10.5 kA");
    newer.insert("ShortCircuitResult", key, b);

    let entries = engine.diff(&older, &newer);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ChangeKind::Modified);
    assert_eq!(entries[0].changes.len(), 1);
    let change = &entries[0].changes[0];
    assert_eq!(change.property, "ThreePhaseKA");
    assert_eq!(change.old_value, "10 kA");
    assert_eq!(change.new_value, "10.5 kA");
}

#[test]
fn test_diff_ordering_is_deterministic() {
    let catalog = RecordTypeCatalog::new();
    let engine = DiffEngine::new(&catalog);

    let older = Snapshot::new();
    let mut newer = Snapshot::new();
    bus(&mut newer, "BUS-09", "13.8", "Closed");
    bus(&mut newer, "BUS-01", "13.8", "Closed");
    let mut breaker = RecordInstance::new();
    breaker.set("EquipmentID", "CB-1");
    newer.insert("Breaker", CompositeKey::new(vec!["CB-1".to_string()]), breaker);

    let first = engine.diff(&older, &newer);
    let second = engine.diff(&older, &newer);

    let shape: Vec<(String, String)> = first
        .iter()
        .map(|e| (e.record_type.clone(), e.key.to_string()))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("Breaker".to_string(), "CB-1".to_string()),
            ("Bus".to_string(), "BUS-01".to_string()),
            ("Bus".to_string(), "BUS-09".to_string()),
        ]
    );
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_diff_of_imported_before_after_revision() {
    // end to end: two imports, one diff
    let catalog = RecordTypeCatalog::new();
    let merger = ImportMerger::new(&catalog);
    let engine = DiffEngine::new(&catalog);

    let entry = |property: &str, header: &str, required: bool| MappingEntry {
        target_type: "Bus".to_string(),
        property_name: property.to_string(),
        column_header: header.to_string(),
        required,
        severity: Severity::Warning,
        aliases: BTreeSet::new(),
        default_value: None,
    };
    let resolver = MappingResolver::new(MappingDocument {
        software_version: "12.0".to_string(),
        map_version: "1".to_string(),
        import_map: vec![
            entry("EquipmentID", "Bus ID", true),
            entry("BaseKV", "Base kV", false),
            entry("Status", "Status", false),
        ],
    });

    let write = |lines: &[&str]| {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    };
    let before_file = write(&[
        "Bus ID,Base kV,Status",
        "BUS-01,13.8,Closed",
        "BUS-02,4.16,Closed",
    ]);
    let after_file = write(&[
        "Bus ID,Base kV,Status",
        "BUS-01,13.8,Open",
        "BUS-02,4.160,Closed",
    ]);

    let mut before = Snapshot::new();
    let outcome = merger.import_one(before_file.path(), &resolver).unwrap();
    merger
        .merge_into(&mut before, &outcome.record_set, &MergeOptions::default())
        .unwrap();

    let mut after = Snapshot::new();
    let outcome = merger.import_one(after_file.path(), &resolver).unwrap();
    merger
        .merge_into(&mut after, &outcome.record_set, &MergeOptions::default())
        .unwrap();

    // "4.16" vs "4.160" is noise; Status Closed -> Open is real
    let entries = engine.diff(&before, &after);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, CompositeKey::new(vec!["BUS-01".to_string()]));
    assert_eq!(entries[0].changes.len(), 1);
    assert_eq!(entries[0].changes[0].property, "Status");
}
