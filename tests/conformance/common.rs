use formguard::{Node, Scalar};
use serde_json::Value;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Reads a YAML fixture file into typed cases.
pub fn load_cases<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {:?}: {}", path, e));
    serde_saphyr::from_str(&content).unwrap_or_else(|e| panic!("bad fixture {:?}: {}", path, e))
}

/// JSON rendering of a flattened value: scalars as themselves, containers
/// as `[]` or `{}` (flattening only ever reports empty containers).
pub fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Scalar(Scalar::Null) => Value::Null,
        Node::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        Node::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
        Node::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        Node::Sequence(_) => Value::Array(vec![]),
        Node::Record(_) => Value::Object(serde_json::Map::new()),
    }
}
