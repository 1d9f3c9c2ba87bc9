// ==========================================
// Power Export Diff - shared enum types
// ==========================================
// Small value enums used across the import and
// diff layers. All serde-serializable so they can
// travel inside mapping documents and reports.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Severity - finding severity level
// ==========================================
// Used by: mapping entries, merge findings
// Ordering: Info < Warning < Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// ChangeKind - diff entry classification
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Removed => "Removed",
            ChangeKind::Modified => "Modified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// CollisionPolicy - duplicate-key merge behavior
// ==========================================
// Default is Overwrite: re-importing an updated
// version of the same scenario file is the normal
// workflow, not an error. Only scenario-keyed result
// records are ever replaced; equipment records keep
// their first-seen values and surface a disagreement
// finding instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPolicy {
    Overwrite,
    Skip,
    Fail,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        CollisionPolicy::Overwrite
    }
}

// ==========================================
// FindingKind - import/merge finding taxonomy
// ==========================================
// Everything here is recoverable: findings are
// collected into a structured report instead of
// aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    /// Two mapping entries target the same (type, property) pair.
    DuplicateMapping,
    /// A required mapping entry has a blank column header.
    RequiredColumnBlank,
    /// A mapping entry has a blank target type or property name.
    BlankMappingField,
    /// A required column is absent from a classified sheet.
    MissingRequiredColumn,
    /// No record type scored above the classification threshold.
    ClassificationFailure,
    /// A row is missing a key-component value and was skipped.
    IncompleteKey,
    /// A composite key already exists in the snapshot (or twice in one file).
    Collision,
    /// Two sources disagree on a non-scenario-keyed equipment record.
    EquipmentDisagreement,
}

// ==========================================
// Finding - one structured report item
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// Record type the finding refers to, when known.
    pub record_type: Option<String>,
    /// 1-based data row number in the source file, when row-scoped.
    pub row_number: Option<usize>,
    pub message: String,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            record_type: None,
            row_number: None,
            message: message.into(),
        }
    }

    pub fn for_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    pub fn at_row(mut self, row_number: usize) -> Self {
        self.row_number = Some(row_number);
        self
    }
}
