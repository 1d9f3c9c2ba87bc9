// ==========================================
// Power Export Diff - core library
// ==========================================
// Import-resolution and diff engine for tabular
// exports of a power-system study tool: classify
// drifting column headers against a closed record
// type catalog, merge multi-file imports into one
// versioned snapshot, diff two snapshots.
//
// Invoked as a library by the shell layer, which
// supplies file paths and mapping documents and
// receives MergeReport / DiffEntry results.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - value types
pub mod domain;

// Record type catalog - declarative identity metadata
pub mod catalog;

// Mapping layer - column -> property documents
pub mod mapping;

// Classifier - header row -> record type
pub mod classifier;

// Import layer - file parsing, keys, merge
pub mod importer;

// Diff engine - snapshot comparison
pub mod diff;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::{
    ChangeKind, CollisionPolicy, CompositeKey, Finding, FindingKind, PerTypeRecordSet,
    RecordInstance, Severity, Snapshot,
};

// Catalog
pub use catalog::{PropertyDescriptor, PropertyKind, RecordTypeCatalog, RecordTypeDescriptor};

// Mapping
pub use mapping::{
    suggest_mappings, MappingDocument, MappingEntry, MappingResolver, MappingValidationError,
    Suggestion, SuggestionBasis,
};

// Classification
pub use classifier::{Classification, ColumnSignatureClassifier, MIN_MATCH_THRESHOLD};

// Import
pub use importer::{
    CompositeKeyBuilder, ImportError, ImportMerger, ImportOutcome, ImportResult, IncompleteKey,
    MergeOptions, MergeReport, MergeTypeCounts,
};

// Diff
pub use diff::{DiffEngine, DiffEntry, PropertyChange, DEFAULT_TOLERANCE};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Power Export Diff";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
