// ==========================================
// Power Export Diff - import layer
// ==========================================
// External data ingestion: file parsing, composite
// key construction, and the merge pipeline.
// Supports: CSV, spreadsheet workbooks
// ==========================================

pub mod error;
pub mod file_parser;
pub mod key_builder;
pub mod merger;

pub use error::{ImportError, ImportResult};
pub use file_parser::{
    CsvParser, FileParser, RawRow, RetryBudget, SheetRows, UniversalFileParser, WorkbookParser,
};
pub use key_builder::{CompositeKeyBuilder, IncompleteKey};
pub use merger::{ImportMerger, ImportOutcome, MergeOptions, MergeReport, MergeTypeCounts};
