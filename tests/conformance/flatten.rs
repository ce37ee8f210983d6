use super::common::{load_cases, node_to_json};
use formguard::{Node, flatten};
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
struct FlattenCase {
    id: String,
    name: String,
    input: Value,
    expected: Vec<(String, Value)>,
}

#[test]
fn flatten_suite() {
    let cases: Vec<FlattenCase> = load_cases("flatten.yaml");
    assert!(!cases.is_empty());

    for case in &cases {
        let tree = Node::from(&case.input);
        let got: Vec<(String, Value)> = flatten(&tree)
            .iter()
            .map(|pv| (pv.path.to_string(), node_to_json(&pv.value)))
            .collect();
        assert_eq!(
            got, case.expected,
            "{} ({}): flatten mismatch",
            case.id, case.name
        );
    }
}
