// ==========================================
// Power Export Diff - domain layer
// ==========================================
// Value types shared by the catalog, importer and
// diff layers. No I/O, no business rules.
// ==========================================

pub mod record;
pub mod snapshot;
pub mod types;

pub use record::{CompositeKey, PerTypeRecordSet, RecordInstance};
pub use snapshot::Snapshot;
pub use types::{ChangeKind, CollisionPolicy, Finding, FindingKind, Severity};
