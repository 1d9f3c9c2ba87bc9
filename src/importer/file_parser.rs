// ==========================================
// Power Export Diff - file parser
// ==========================================
// Reads source exports into sheet-granular raw rows:
// CSV (single unnamed sheet) and spreadsheet workbooks
// (every sheet, since each sheet may classify to a
// different record type). Only a header row plus data
// rows are interpreted; no formulas or styles.
//
// Exports are often still open in the producing tool,
// holding an exclusive lock. Opening therefore retries
// on a fixed interval before giving up; this is the
// only retry behavior in the engine.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

// ==========================================
// Raw row model
// ==========================================

/// One data row: header -> trimmed cell value.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based data row number (header row excluded).
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

/// One sheet's worth of rows. CSV files produce exactly one,
/// with an empty sheet name.
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// Locked-file retry budget
// ==========================================
#[derive(Debug, Clone)]
pub struct RetryBudget {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for RetryBudget {
    fn default() -> Self {
        // 5 x 500ms: a few seconds total before failing the file
        Self {
            attempts: 5,
            interval: Duration::from_millis(500),
        }
    }
}

fn open_with_retry<T>(
    path: &Path,
    budget: &RetryBudget,
    mut open: impl FnMut() -> ImportResult<T>,
) -> ImportResult<T> {
    let mut last_message = String::new();
    for attempt in 1..=budget.attempts.max(1) {
        match open() {
            Ok(value) => return Ok(value),
            Err(err) => {
                last_message = err.to_string();
                if attempt < budget.attempts {
                    warn!(
                        path = %path.display(),
                        attempt,
                        "file open failed, retrying: {last_message}"
                    );
                    std::thread::sleep(budget.interval);
                }
            }
        }
    }
    Err(ImportError::FileAccess {
        path: path.display().to_string(),
        attempts: budget.attempts.max(1),
        message: last_message,
    })
}

// ==========================================
// FileParser trait
// ==========================================
pub trait FileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<Vec<SheetRows>>;
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser {
    pub retry: RetryBudget,
}

impl CsvParser {
    pub fn new() -> Self {
        Self {
            retry: RetryBudget::default(),
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<Vec<SheetRows>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = open_with_retry(file_path, &self.retry, || Ok(File::open(file_path)?))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged rows
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let mut values = HashMap::new();
            for (col, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col) {
                    values.insert(header.clone(), value.trim().to_string());
                }
            }
            // skip fully blank rows
            if values.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(RawRow {
                row_number: index + 1,
                values,
            });
        }

        Ok(vec![SheetRows {
            sheet_name: String::new(),
            headers,
            rows,
        }])
    }
}

// ==========================================
// Workbook parser (multi-sheet)
// ==========================================
pub struct WorkbookParser {
    pub retry: RetryBudget,
}

impl WorkbookParser {
    pub fn new() -> Self {
        Self {
            retry: RetryBudget::default(),
        }
    }
}

impl Default for WorkbookParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for WorkbookParser {
    fn parse(&self, file_path: &Path) -> ImportResult<Vec<SheetRows>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> =
            open_with_retry(file_path, &self.retry, || Ok(open_workbook(file_path)?))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_owned();
        if sheet_names.is_empty() {
            return Err(ImportError::WorkbookParse(
                "workbook has no sheets".to_string(),
            ));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::WorkbookParse(e.to_string()))?;

            let mut range_rows = range.rows();
            let Some(header_row) = range_rows.next() else {
                // empty sheet: nothing to classify, not an error
                continue;
            };
            let headers: Vec<String> = header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            let mut rows = Vec::new();
            for (index, data_row) in range_rows.enumerate() {
                let mut values = HashMap::new();
                for (col, cell) in data_row.iter().enumerate() {
                    if let Some(header) = headers.get(col) {
                        values.insert(header.clone(), cell.to_string().trim().to_string());
                    }
                }
                if values.values().all(|v| v.is_empty()) {
                    continue;
                }
                rows.push(RawRow {
                    row_number: index + 1,
                    values,
                });
            }

            sheets.push(SheetRows {
                sheet_name,
                headers,
                rows,
            });
        }

        Ok(sheets)
    }
}

// ==========================================
// Universal parser (extension dispatch)
// ==========================================
pub struct UniversalFileParser {
    csv: CsvParser,
    workbook: WorkbookParser,
}

impl UniversalFileParser {
    pub fn new() -> Self {
        Self {
            csv: CsvParser::new(),
            workbook: WorkbookParser::new(),
        }
    }
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for UniversalFileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<Vec<SheetRows>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => self.csv.parse(file_path),
            "xlsx" | "xls" => self.workbook.parse(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
