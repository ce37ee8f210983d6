//! Declarative field and sequence rules.
//!
//! A [`Schema`] addresses its rules with [`Pattern`]s, so one rule covers a
//! field in every element of every sequence. Schemas are built in code or
//! loaded from YAML/JSON:
//!
//! ```yaml
//! scope: global
//! sequences:
//!   - path: "categories"
//!     min: 1
//!     message: "At least one category is required"
//! fields:
//!   - path: "categories[*].name"
//!     required: "Category name is required"
//!     unique: "Invalid category name duplicate"
//! ```

use crate::binding::DuplicateCheck;
use crate::error::{ErrorDescriptor, ParseError};
use crate::node::{Node, Scalar};
use crate::path::Path;
use crate::pattern::{DuplicateScope, Pattern};
use serde::{Deserialize, Serialize};

/// Rules for one leaf position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub path: Pattern,
    /// Message reported when the value is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    /// Message reported when the value duplicates a matching field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<String>,
}

impl FieldRule {
    pub fn new(path: Pattern) -> Self {
        Self {
            path,
            required: None,
            unique: None,
        }
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn unique(mut self, message: impl Into<String>) -> Self {
        self.unique = Some(message.into());
        self
    }

    /// Runs this rule's checks in order and returns the first failure.
    ///
    /// The duplicate check runs only for non-blank values; it also records
    /// its own outcome through `duplicates`.
    pub fn check(
        &self,
        path: &Path,
        value: &Scalar,
        duplicates: &mut dyn DuplicateCheck,
    ) -> Result<(), ErrorDescriptor> {
        if let Some(message) = &self.required
            && value.is_blank()
        {
            return Err(ErrorDescriptor::required(message.as_str()));
        }

        if let Some(message) = &self.unique {
            let error = ErrorDescriptor::duplicate(message.as_str());
            if duplicates.is_duplicate(path, value, &error) {
                return Err(error);
            }
        }

        Ok(())
    }
}

/// Minimum length for every sequence at a position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRule {
    pub path: Pattern,
    pub min: usize,
    pub message: String,
}

impl SequenceRule {
    pub fn new(path: Pattern, min: usize, message: impl Into<String>) -> Self {
        Self {
            path,
            min,
            message: message.into(),
        }
    }

    /// A missing node or a non-sequence counts as empty.
    pub fn check(&self, node: Option<&Node>) -> Result<(), ErrorDescriptor> {
        let len = node
            .and_then(|n| n.as_sequence().map(|items| items.len()))
            .unwrap_or(0);
        if len < self.min {
            return Err(ErrorDescriptor::cardinality(self.message.as_str()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub scope: DuplicateScope,
    #[serde(default)]
    pub sequences: Vec<SequenceRule>,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

impl Schema {
    /// The rules of the categories form.
    pub fn categories() -> Self {
        Self {
            scope: DuplicateScope::Global,
            sequences: vec![
                SequenceRule::new(
                    pattern(&["categories"]),
                    1,
                    "At least one category is required",
                ),
                SequenceRule::new(
                    pattern(&["categories", "*", "departments"]),
                    1,
                    "At least one department is required",
                ),
            ],
            fields: vec![
                FieldRule::new(pattern(&["categories", "*", "name"]))
                    .required("Category name is required")
                    .unique("Invalid category name duplicate"),
                FieldRule::new(pattern(&["categories", "*", "descriptions"]))
                    .required("Category description is required"),
                FieldRule::new(pattern(&["categories", "*", "departments", "*", "name"]))
                    .required("Department name is required"),
                FieldRule::new(pattern(&["categories", "*", "departments", "*", "type"]))
                    .required("Department type is required")
                    .unique("Invalid department name duplicate"),
            ],
        }
    }

    /// Loads a schema from YAML or JSON text.
    pub fn from_yaml(input: &str) -> Result<Self, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::syntax("empty schema"));
        }
        let value: serde_json::Value =
            serde_saphyr::from_str(input).map_err(|e| ParseError::syntax(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| ParseError::type_mismatch(e.to_string()))
    }

    /// The first field rule whose pattern matches `path`.
    pub fn field_rule(&self, path: &Path) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.path.matches(path))
    }

    /// The first sequence rule whose pattern matches `path`.
    pub fn sequence_rule(&self, path: &Path) -> Option<&SequenceRule> {
        self.sequences.iter().find(|rule| rule.path.matches(path))
    }
}

/// Builds a pattern from key names, with `"*"` standing for a wildcard index.
fn pattern(parts: &[&str]) -> Pattern {
    use crate::pattern::PatternSegment;
    Pattern::from_segments(
        parts
            .iter()
            .map(|p| match *p {
                "*" => PatternSegment::AnyIndex,
                key => PatternSegment::Key(key.to_string()),
            })
            .collect(),
    )
}
