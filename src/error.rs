use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a field-level validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A mandatory leaf is missing or blank.
    Required,
    /// An equal, non-blank value exists at a structurally matching path.
    Duplicate,
    /// A sequence holds fewer elements than required.
    Cardinality,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Required => "required",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::Cardinality => "cardinality",
        };
        f.write_str(name)
    }
}

/// Error attached to exactly one path in an error store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub message: String,
    pub kind: ErrorKind,
}

impl ErrorDescriptor {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Duplicate, message)
    }

    pub fn cardinality(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cardinality, message)
    }
}

/// A descriptor together with the path it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: Path,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(path: Path, descriptor: ErrorDescriptor) -> Self {
        Self {
            path,
            kind: descriptor.kind,
            message: descriptor.message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Result of a whole-form validation pass.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of one kind, in path order.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

/// Produced when path or pattern text is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathError {
    pub input: String,
    /// Byte offset of the offending character.
    pub position: usize,
    pub message: String,
}

impl PathError {
    pub(crate) fn new(input: &str, position: usize, message: &str) -> Self {
        Self {
            input: input.to_string(),
            position,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid path '{}' at {}: {}",
            self.input, self.position, self.message
        )
    }
}

impl std::error::Error for PathError {}

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
}

/// Produced by [`parse`](crate::parse::parse) and
/// [`Schema::from_yaml`](crate::schema::Schema::from_yaml) when input text
/// cannot be read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ParseError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            path: None,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::TypeMismatch,
            message: message.into(),
            path: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Combined error type for the [`load`](crate::load) entry point.
#[derive(Clone, Debug)]
pub enum FormError {
    Parse(ParseError),
    Validation(FieldError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Parse(e) => write!(f, "Parse error: {}", e),
            FormError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for FormError {}
