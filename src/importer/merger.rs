// ==========================================
// Power Export Diff - import merger
// ==========================================
// Pipeline: parse -> classify -> map -> key -> merge.
//
// import_one is a pure transformation of one source
// file into a per-type record set; no snapshot is
// touched. merge_into folds a record set into a
// snapshot all-or-nothing: a Fail-policy collision or
// an Error-severity disagreement aborts before the
// first write.
// ==========================================

use crate::catalog::{RecordTypeCatalog, RecordTypeDescriptor};
use crate::classifier::ColumnSignatureClassifier;
use crate::domain::record::{CompositeKey, PerTypeRecordSet, RecordInstance};
use crate::domain::snapshot::Snapshot;
use crate::domain::types::{CollisionPolicy, Finding, FindingKind, Severity};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, SheetRows, UniversalFileParser};
use crate::importer::key_builder::CompositeKeyBuilder;
use crate::mapping::MappingResolver;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// Options & reports
// ==========================================

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub on_collision: CollisionPolicy,
    /// When set, the scenario key component of every imported
    /// record is replaced with this value. Supports renaming a
    /// scenario while stitching single-scenario files together.
    pub scenario_override: Option<String>,
    /// Severity of a value disagreement between sources for a
    /// non-scenario-keyed equipment record. Error aborts the merge.
    pub equipment_disagreement: Severity,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            on_collision: CollisionPolicy::Overwrite,
            scenario_override: None,
            equipment_disagreement: Severity::Warning,
        }
    }
}

/// Result of importing one source file. No side effects on any
/// snapshot have happened yet.
#[derive(Debug)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub imported_at: DateTime<Utc>,
    pub record_set: PerTypeRecordSet,
    pub findings: Vec<Finding>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeTypeCounts {
    pub added: usize,
    pub updated: usize,
    pub collisions: usize,
}

#[derive(Debug, Default)]
pub struct MergeReport {
    pub per_type: BTreeMap<String, MergeTypeCounts>,
    pub findings: Vec<Finding>,
}

impl MergeReport {
    pub fn total_added(&self) -> usize {
        self.per_type.values().map(|c| c.added).sum()
    }

    pub fn total_collisions(&self) -> usize {
        self.per_type.values().map(|c| c.collisions).sum()
    }
}

// ==========================================
// ImportMerger
// ==========================================
pub struct ImportMerger<'a> {
    catalog: &'a RecordTypeCatalog,
    parser: UniversalFileParser,
}

impl<'a> ImportMerger<'a> {
    pub fn new(catalog: &'a RecordTypeCatalog) -> Self {
        Self {
            catalog,
            parser: UniversalFileParser::new(),
        }
    }

    /// Import one source file into a per-type record set.
    ///
    /// Row- and sheet-level problems (unclassifiable headers,
    /// incomplete keys) are recovered with skip-and-log findings;
    /// only mapping-document and file-access problems are fatal.
    #[instrument(skip(self, resolver), fields(batch_id))]
    pub fn import_one(
        &self,
        file_path: &Path,
        resolver: &MappingResolver,
    ) -> ImportResult<ImportOutcome> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(file = %file_path.display(), "importing source file");

        let mut findings = resolver.validate();
        let excluded_types = resolver.types_with_errors();
        if !excluded_types.is_empty() {
            warn!(?excluded_types, "types excluded by mapping findings");
        }

        let sheets = self.parser.parse(file_path)?;
        let classifier = ColumnSignatureClassifier::new(self.catalog);
        let key_builder = CompositeKeyBuilder::new(self.catalog);

        let mut record_set = PerTypeRecordSet::new();
        let mut rows_read = 0usize;
        let mut rows_skipped = 0usize;

        for sheet in &sheets {
            let Some(classification) = classifier.classify(&sheet.headers, resolver) else {
                findings.push(Finding::new(
                    FindingKind::ClassificationFailure,
                    Severity::Warning,
                    format!(
                        "no record type matched sheet '{}'; section skipped",
                        sheet.sheet_name
                    ),
                ));
                continue;
            };
            let record_type = classification.record_type.as_str();
            if excluded_types.iter().any(|t| t.as_str() == record_type) {
                debug!(record_type, "sheet skipped: type has mapping errors");
                continue;
            }
            info!(
                record_type,
                sheet = %sheet.sheet_name,
                match_count = classification.match_count,
                "sheet classified"
            );

            if !self.required_columns_present(record_type, sheet, resolver, &mut findings) {
                continue;
            }

            for row in &sheet.rows {
                rows_read += 1;
                let record = self.map_row(record_type, &row.values, &sheet.headers, resolver);

                match key_builder.build(record_type, &record)? {
                    Ok(key) => {
                        if record_set.insert(record_type, key.clone(), record).is_some() {
                            findings.push(
                                Finding::new(
                                    FindingKind::Collision,
                                    Severity::Warning,
                                    format!("duplicate key [{key}] within one file; last row wins"),
                                )
                                .for_type(record_type)
                                .at_row(row.row_number),
                            );
                        }
                    }
                    Err(incomplete) => {
                        rows_skipped += 1;
                        findings.push(
                            Finding::new(
                                FindingKind::IncompleteKey,
                                Severity::Warning,
                                incomplete.to_string(),
                            )
                            .for_type(record_type)
                            .at_row(row.row_number),
                        );
                    }
                }
            }
        }

        info!(
            rows_read,
            rows_skipped,
            records = record_set.len(),
            findings = findings.len(),
            "import complete"
        );

        Ok(ImportOutcome {
            batch_id,
            imported_at: Utc::now(),
            record_set,
            findings,
            rows_read,
            rows_skipped,
        })
    }

    /// Merge a record set into a snapshot. All-or-nothing: the
    /// first pass detects aborting conditions without writing,
    /// the second pass mutates.
    #[instrument(skip(self, snapshot, record_set, options))]
    pub fn merge_into(
        &self,
        snapshot: &mut Snapshot,
        record_set: &PerTypeRecordSet,
        options: &MergeOptions,
    ) -> ImportResult<MergeReport> {
        let staged = self.stage(record_set, options)?;
        let mut findings = Vec::new();

        // pass 1: read-only collision scan
        for (record_type, key, record) in &staged {
            let Some(existing) = snapshot.get(record_type, key) else {
                continue;
            };
            if options.on_collision == CollisionPolicy::Fail {
                return Err(ImportError::CollisionAbort {
                    record_type: record_type.clone(),
                    key: key.to_string(),
                });
            }

            let descriptor = self
                .catalog
                .describe(record_type)
                .ok_or_else(|| ImportError::UnknownRecordType(record_type.clone()))?;
            if !descriptor.is_scenario_keyed() {
                // equipment identity is expected to be stable across
                // scenario files; disagreement is a data-quality signal
                let differing = self.differing_properties(record_type, existing, record);
                if !differing.is_empty() {
                    let message = format!(
                        "sources disagree on {} [{}]: {}",
                        record_type,
                        key,
                        differing.join(", ")
                    );
                    if options.equipment_disagreement == Severity::Error {
                        return Err(ImportError::EquipmentDisagreementAbort {
                            record_type: record_type.clone(),
                            key: key.to_string(),
                            message,
                        });
                    }
                    warn!("{message}");
                    findings.push(
                        Finding::new(
                            FindingKind::EquipmentDisagreement,
                            options.equipment_disagreement,
                            message,
                        )
                        .for_type(record_type.clone()),
                    );
                }
            } else {
                warn!(
                    record_type,
                    key = %key,
                    policy = ?options.on_collision,
                    "composite key collision"
                );
                findings.push(
                    Finding::new(
                        FindingKind::Collision,
                        Severity::Warning,
                        format!("key [{key}] already in snapshot; policy {:?}", options.on_collision),
                    )
                    .for_type(record_type.clone()),
                );
            }
        }

        // pass 2: mutate
        let mut per_type: BTreeMap<String, MergeTypeCounts> = BTreeMap::new();
        for (record_type, key, record) in staged {
            let counts = per_type.entry(record_type.clone()).or_default();
            if snapshot.contains(&record_type, &key) {
                counts.collisions += 1;
                // Equipment records keep their first-seen values; the
                // collision policy only governs scenario-keyed results.
                let scenario_keyed = self
                    .catalog
                    .describe(&record_type)
                    .is_some_and(RecordTypeDescriptor::is_scenario_keyed);
                if scenario_keyed && options.on_collision == CollisionPolicy::Overwrite {
                    snapshot.insert(&record_type, key, record);
                    counts.updated += 1;
                }
            } else {
                snapshot.insert(&record_type, key, record);
                counts.added += 1;
            }
        }

        let report = MergeReport { per_type, findings };
        info!(
            added = report.total_added(),
            collisions = report.total_collisions(),
            "merge complete"
        );
        Ok(report)
    }

    // ==========================================
    // internals
    // ==========================================

    /// Apply the scenario override, producing the effective
    /// (type, key, record) triples to merge.
    fn stage(
        &self,
        record_set: &PerTypeRecordSet,
        options: &MergeOptions,
    ) -> ImportResult<Vec<(String, CompositeKey, RecordInstance)>> {
        let mut staged = Vec::with_capacity(record_set.len());
        for (record_type, key, record) in record_set.iter() {
            let descriptor = self
                .catalog
                .describe(record_type)
                .ok_or_else(|| ImportError::UnknownRecordType(record_type.to_string()))?;

            let (key, record) = match (&options.scenario_override, descriptor.scenario_position()) {
                (Some(scenario), Some(position)) => {
                    let mut relabeled = record.clone();
                    relabeled.set(descriptor.key_components[position].clone(), scenario.clone());
                    (key.with_component(position, scenario.clone()), relabeled)
                }
                _ => (key.clone(), record.clone()),
            };
            staged.push((record_type.to_string(), key, record));
        }
        Ok(staged)
    }

    /// Non-key, non-deprecated properties whose values differ
    /// between two records of the same type.
    fn differing_properties(
        &self,
        record_type: &str,
        existing: &RecordInstance,
        incoming: &RecordInstance,
    ) -> Vec<String> {
        let Some(descriptor) = self.catalog.describe(record_type) else {
            return Vec::new();
        };
        descriptor
            .property_names()
            .filter(|p| !descriptor.is_key_component(p) && !descriptor.is_deprecated(p))
            .filter(|p| existing.get(p).unwrap_or("") != incoming.get(p).unwrap_or(""))
            .map(str::to_string)
            .collect()
    }

    fn required_columns_present(
        &self,
        record_type: &str,
        sheet: &SheetRows,
        resolver: &MappingResolver,
        findings: &mut Vec<Finding>,
    ) -> bool {
        let mut usable = true;
        for entry in resolver.entries_for(record_type) {
            if !entry.required
                || entry.resolve_header(&sheet.headers).is_some()
                || entry.default_value.is_some()
            {
                continue;
            }
            findings.push(
                Finding::new(
                    FindingKind::MissingRequiredColumn,
                    entry.severity,
                    format!(
                        "required column '{}' for {}.{} absent from sheet '{}'",
                        entry.column_header, record_type, entry.property_name, sheet.sheet_name
                    ),
                )
                .for_type(record_type),
            );
            if entry.severity == Severity::Error {
                usable = false;
            }
        }
        if !usable {
            warn!(record_type, sheet = %sheet.sheet_name, "sheet skipped: required column missing");
        }
        usable
    }

    /// Resolve one raw row into a typed record via the mapping.
    /// Lookup order per entry: primary header, aliases, default value.
    fn map_row(
        &self,
        record_type: &str,
        values: &std::collections::HashMap<String, String>,
        headers: &[String],
        resolver: &MappingResolver,
    ) -> RecordInstance {
        let mut record = RecordInstance::new();
        for entry in resolver.entries_for(record_type) {
            if entry.property_name.is_empty() {
                continue;
            }
            let cell = entry
                .resolve_header(headers)
                .and_then(|header| values.get(header))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty());
            match cell {
                Some(value) => record.set(entry.property_name.clone(), value),
                None => {
                    if let Some(default) = &entry.default_value {
                        record.set(entry.property_name.clone(), default.clone());
                    }
                }
            }
        }
        record
    }
}
