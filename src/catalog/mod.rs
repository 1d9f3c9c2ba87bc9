// ==========================================
// Power Export Diff - record type catalog
// ==========================================
// Built once at startup from the declarative registry
// table and immutable thereafter. Passed explicitly to
// collaborators; never a process-wide singleton.
//
// "Is this property part of the identity" is answered
// only by inspecting a descriptor, so no property name
// is special-cased anywhere else in the engine.
// ==========================================

mod registry;

use std::collections::HashMap;

/// Scalar kind declared for a property. Values are still
/// carried as opaque strings for source fidelity; the kind
/// documents what the producing tool emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Text,
    Numeric,
}

#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: PropertyKind,
    /// Compatibility-only column kept for old exports.
    /// Excluded from diff comparison.
    pub deprecated: bool,
}

// ==========================================
// RecordTypeDescriptor
// ==========================================
#[derive(Debug, Clone)]
pub struct RecordTypeDescriptor {
    pub name: String,
    /// Declared properties in export column order.
    pub properties: Vec<PropertyDescriptor>,
    /// Key-component property names, in composite-key order.
    pub key_components: Vec<String>,
}

impl RecordTypeDescriptor {
    pub fn is_key_component(&self, property: &str) -> bool {
        self.key_components.iter().any(|k| k == property)
    }

    /// Position of the scenario component within the key, if any.
    /// A type with no scenario component has scenario-independent
    /// identity (plain equipment).
    pub fn scenario_position(&self) -> Option<usize> {
        self.key_components.iter().position(|k| k == "Scenario")
    }

    pub fn is_scenario_keyed(&self) -> bool {
        self.scenario_position().is_some()
    }

    pub fn is_deprecated(&self, property: &str) -> bool {
        self.properties
            .iter()
            .any(|p| p.name == property && p.deprecated)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }
}

// Registry row shape consumed by the catalog constructor.
pub(crate) struct TypeSpec {
    pub(crate) name: &'static str,
    pub(crate) key: &'static [&'static str],
    pub(crate) properties: &'static [(&'static str, PropertyKind)],
    pub(crate) deprecated: &'static [&'static str],
}

// ==========================================
// RecordTypeCatalog
// ==========================================
#[derive(Debug)]
pub struct RecordTypeCatalog {
    types: Vec<RecordTypeDescriptor>,
    by_name: HashMap<String, usize>,
}

impl RecordTypeCatalog {
    /// Build the catalog from the declarative registry table.
    pub fn new() -> Self {
        let mut types = Vec::with_capacity(registry::RECORD_TYPES.len());
        let mut by_name = HashMap::with_capacity(registry::RECORD_TYPES.len());

        for spec in registry::RECORD_TYPES {
            let descriptor = RecordTypeDescriptor {
                name: spec.name.to_string(),
                properties: spec
                    .properties
                    .iter()
                    .map(|(name, kind)| PropertyDescriptor {
                        name: (*name).to_string(),
                        kind: *kind,
                        deprecated: spec.deprecated.contains(name),
                    })
                    .collect(),
                key_components: spec.key.iter().map(|k| (*k).to_string()).collect(),
            };
            by_name.insert(descriptor.name.clone(), types.len());
            types.push(descriptor);
        }

        Self { types, by_name }
    }

    /// Type names in declaration order. Declaration order is the
    /// classifier's final tie-breaker, so it must be stable.
    pub fn list_types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    /// Descriptor lookup. `None` for an unknown name is a
    /// configuration error on the caller's side, not a fallback.
    pub fn describe(&self, record_type: &str) -> Option<&RecordTypeDescriptor> {
        self.by_name.get(record_type).map(|&i| &self.types[i])
    }

    pub fn declaration_index(&self, record_type: &str) -> Option<usize> {
        self.by_name.get(record_type).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for RecordTypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
