//! Cross-field duplicate detection and rule validation for nested form data.
//!
//! The form is a tree of records and variable-length sequences (categories,
//! each holding departments). For one edited field, the crate decides whether
//! an equal value already sits at a structurally equivalent position
//! elsewhere in the tree and records the outcome in a per-field error store:
//!
//! ```text
//! Node ─ flatten ─▶ [PathValue] ─┐
//! Path ─ Pattern::derive ────────┴─▶ DuplicateValidator::check ─▶ ErrorStore
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use formguard::{ErrorDescriptor, ErrorMap, Node, Path};
//!
//! let tree = Node::from(serde_json::json!({
//!     "categories": [{"name": "Ops"}, {"name": "Ops"}]
//! }));
//! let path: Path = "categories[1].name".parse().unwrap();
//! let mut errors = ErrorMap::new();
//!
//! let dup = formguard::check(
//!     &tree,
//!     &path,
//!     &"Ops".into(),
//!     &ErrorDescriptor::duplicate("Invalid category name duplicate"),
//!     &mut errors,
//! );
//! assert!(dup);
//! assert!(errors.contains(&path));
//! ```
//!
//! Whole forms are validated through [`FormState`] against a [`Schema`]; the
//! built-in [`Schema::categories`] carries the required, unique and
//! minimum-length rules of the categories form.

pub mod binding;
pub mod duplicate;
pub mod error;
pub mod flatten;
pub mod form;
pub mod node;
pub mod parse;
pub mod path;
pub mod pattern;
pub mod schema;
pub mod store;
pub mod types;

pub use binding::{DuplicateBinding, DuplicateCheck, NoDuplicates};
pub use duplicate::{DuplicateValidator, check};
pub use error::*;
pub use flatten::{PathValue, flatten, flatten_at};
pub use form::{FormState, Snapshot};
pub use node::{Node, Scalar};
pub use parse::parse;
pub use path::{Path, Segment};
pub use pattern::{DuplicateScope, Pattern, PatternSegment, to_pattern};
pub use schema::{FieldRule, Schema, SequenceRule};
pub use store::{ErrorMap, ErrorStore};
pub use types::*;

/// Validates form data against the built-in categories schema.
pub fn validate(form: &FormData) -> ValidationResult {
    FormState::new(form.clone(), Schema::categories()).validate()
}

/// Convenience entry point composing parse → validate.
///
/// # Errors
///
/// Returns `Err(Vec<FormError>)` if parsing fails or any field is invalid.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// categories:
///   - name: Ops
///     descriptions: Operations
///     departments:
///       - name: On-call
///         type: T1
///       - name: Release
///         type: T1
/// "#;
///
/// let errors = formguard::load(yaml).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn load(input: &str) -> Result<FormData, Vec<FormError>> {
    let form = parse::parse(input).map_err(|e| vec![FormError::Parse(e)])?;

    let result = validate(&form);
    if !result.is_valid() {
        return Err(result
            .errors
            .into_iter()
            .map(FormError::Validation)
            .collect());
    }

    Ok(form)
}
