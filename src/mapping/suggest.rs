// ==========================================
// Power Export Diff - auto-map suggestions
// ==========================================
// Given a record type's declared properties and an
// unlabeled header row, propose header -> property
// pairs. Three tiers, strongest first:
//   1. exact case-insensitive match
//   2. normalized match (strip whitespace/_/- + lower)
//   3. edit-distance similarity >= 0.70
// Suggestions are advisory only; nothing here writes
// to a mapping document.
// ==========================================

use crate::catalog::RecordTypeDescriptor;
use serde::Serialize;

const FUZZY_SIMILARITY_FLOOR: f64 = 0.70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SuggestionBasis {
    Exact,
    Normalized,
    Fuzzy,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub property: String,
    pub header: String,
    pub basis: SuggestionBasis,
    /// 1.0 for exact/normalized; normalized edit-distance
    /// similarity for fuzzy.
    pub similarity: f64,
}

/// Propose one best header per declared property, in declared
/// property order. Each header is consumed by at most one
/// property so two properties never claim the same column.
pub fn suggest_mappings(
    descriptor: &RecordTypeDescriptor,
    headers: &[String],
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut taken = vec![false; headers.len()];

    for property in descriptor.property_names() {
        let Some((index, basis, similarity)) = best_header(property, headers, &taken) else {
            continue;
        };
        taken[index] = true;
        suggestions.push(Suggestion {
            property: property.to_string(),
            header: headers[index].clone(),
            basis,
            similarity,
        });
    }

    suggestions
}

fn best_header(
    property: &str,
    headers: &[String],
    taken: &[bool],
) -> Option<(usize, SuggestionBasis, f64)> {
    let property_lower = property.to_lowercase();
    let property_compact = compact_key(property);

    let mut best: Option<(usize, SuggestionBasis, f64)> = None;
    for (index, header) in headers.iter().enumerate() {
        if taken[index] {
            continue;
        }
        let candidate = if header.to_lowercase() == property_lower {
            (index, SuggestionBasis::Exact, 1.0)
        } else if !property_compact.is_empty() && compact_key(header) == property_compact {
            (index, SuggestionBasis::Normalized, 1.0)
        } else {
            let similarity = similarity(&property_compact, &compact_key(header));
            if similarity < FUZZY_SIMILARITY_FLOOR {
                continue;
            }
            (index, SuggestionBasis::Fuzzy, similarity)
        };

        best = match best {
            None => Some(candidate),
            Some(current) => {
                // stronger basis wins; within fuzzy, higher similarity wins
                if candidate.1 < current.1
                    || (candidate.1 == current.1 && candidate.2 > current.2)
                {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        };
    }
    best
}

/// Lowercase with whitespace, underscores and hyphens stripped.
fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

// Two-row Levenshtein, character granular.
fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];
    for (i, a_ch) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != *b_ch);
            let insert = curr[j] + 1;
            let delete = prev[j + 1] + 1;
            let replace = prev[j] + cost;
            curr[j + 1] = insert.min(delete).min(replace);
        }
        prev.clone_from_slice(&curr);
    }
    prev[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordTypeCatalog;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_exact_case_insensitive() {
        let catalog = RecordTypeCatalog::new();
        let bus = catalog.describe("Bus").unwrap();
        let suggestions = suggest_mappings(bus, &headers(&["equipmentid", "Unrelated Column"]));

        let s = suggestions
            .iter()
            .find(|s| s.property == "EquipmentID")
            .unwrap();
        assert_eq!(s.basis, SuggestionBasis::Exact);
        assert_eq!(s.header, "equipmentid");
    }

    #[test]
    fn test_normalized_strips_separators() {
        let catalog = RecordTypeCatalog::new();
        let bus = catalog.describe("Bus").unwrap();
        let suggestions = suggest_mappings(bus, &headers(&["equipment_id", "base-kv"]));

        assert!(suggestions
            .iter()
            .any(|s| s.property == "EquipmentID" && s.basis == SuggestionBasis::Normalized));
        assert!(suggestions
            .iter()
            .any(|s| s.property == "BaseKV" && s.basis == SuggestionBasis::Normalized));
    }

    #[test]
    fn test_fuzzy_above_floor() {
        let catalog = RecordTypeCatalog::new();
        let bus = catalog.describe("Bus").unwrap();
        // "equipmntid" vs "equipmentid": distance 1 over 11 chars
        let suggestions = suggest_mappings(bus, &headers(&["Equipmnt ID"]));

        let s = suggestions
            .iter()
            .find(|s| s.property == "EquipmentID")
            .unwrap();
        assert_eq!(s.basis, SuggestionBasis::Fuzzy);
        assert!(s.similarity >= 0.70);
    }

    #[test]
    fn test_dissimilar_header_not_suggested() {
        let catalog = RecordTypeCatalog::new();
        let bus = catalog.describe("Bus").unwrap();
        let suggestions = suggest_mappings(bus, &headers(&["Completely Different"]));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_header_consumed_once() {
        let catalog = RecordTypeCatalog::new();
        let bus = catalog.describe("Bus").unwrap();
        let suggestions = suggest_mappings(bus, &headers(&["Status"]));

        let claims: Vec<_> = suggestions.iter().filter(|s| s.header == "Status").collect();
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("buskv", "buskv"), 0);
        assert_eq!(edit_distance("buskv", "busk"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }
}
