use crate::error::ParseError;
use crate::types::FormData;

/// Parse a YAML or JSON string into form data.
///
/// Performs deserialization and type mapping only. Missing fields default to
/// empty values so that validation, not parsing, reports them.
pub fn parse(input: &str) -> Result<FormData, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::syntax("empty input"));
    }

    // YAML is a superset of JSON, so one reader covers both.
    let value: serde_json::Value =
        serde_saphyr::from_str(input).map_err(|e| ParseError::syntax(e.to_string()))?;

    if !value.is_object() {
        return Err(ParseError::type_mismatch("document root must be a mapping"));
    }

    if let Some(obj) = value.as_object() {
        for key in obj.keys() {
            if key != "categories" {
                let mut err = ParseError::type_mismatch(format!("unknown top-level field: {}", key));
                err.path = Some(key.clone());
                return Err(err);
            }
        }
    }

    serde_json::from_value(value).map_err(|e| ParseError::type_mismatch(e.to_string()))
}
