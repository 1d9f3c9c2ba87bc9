// ==========================================
// Power Export Diff - mapping layer
// ==========================================
// User-authored column -> property mapping documents:
// JSON model, validation/lookup resolver, and the
// advisory auto-map suggestion pass.
// ==========================================

pub mod document;
pub mod resolver;
pub mod suggest;

pub use document::{MappingDocument, MappingEntry};
pub use resolver::{MappingResolver, MappingValidationError};
pub use suggest::{suggest_mappings, Suggestion, SuggestionBasis};
