use super::common::load_cases;
use formguard::{DuplicateScope, DuplicateValidator, ErrorDescriptor, ErrorMap, Node, Path, Scalar};
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
struct DuplicateCase {
    id: String,
    name: String,
    #[serde(default)]
    scope: DuplicateScope,
    tree: Value,
    path: String,
    value: Value,
    expected: bool,
}

#[test]
fn duplicate_suite() {
    let cases: Vec<DuplicateCase> = load_cases("duplicates.yaml");
    assert!(!cases.is_empty());

    let mut failures = Vec::new();

    for case in &cases {
        let tree = Node::from(&case.tree);
        let path: Path = case.path.parse().expect("fixture path should parse");
        let value = Scalar::from_value(&case.value).expect("fixture value should be a scalar");
        let validator = DuplicateValidator::new(case.scope);
        let mut store = ErrorMap::new();

        let got = validator.check(
            &tree,
            &path,
            &value,
            &ErrorDescriptor::duplicate("duplicate"),
            &mut store,
        );

        if got != case.expected {
            failures.push(format!(
                "{} ({}): expected {}, got {}",
                case.id, case.name, case.expected, got
            ));
        }
        // The store always mirrors the result.
        if store.contains(&path) != got {
            failures.push(format!("{} ({}): store out of sync", case.id, case.name));
        }
    }

    assert!(failures.is_empty(), "failures:\n{}", failures.join("\n"));
}
