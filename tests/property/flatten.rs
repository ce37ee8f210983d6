use formguard::{Node, Path, flatten, flatten_at};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for arbitrary JSON values nested up to `depth` levels.
fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(depth, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-z][a-z0-9]{0,5}", inner), 0..5).prop_map(|pairs| {
                let map: serde_json::Map<String, Value> = pairs.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

/// Number of entries flattening must produce: one per scalar below a
/// container, plus one per empty container below the root.
fn expected_entries(value: &Value, is_root: bool) -> usize {
    match value {
        Value::Array(items) if items.is_empty() => usize::from(!is_root),
        Value::Object(map) if map.is_empty() => usize::from(!is_root),
        Value::Array(items) => items.iter().map(|v| expected_entries(v, false)).sum(),
        Value::Object(map) => map.values().map(|v| expected_entries(v, false)).sum(),
        _ => usize::from(!is_root),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn entry_count_matches_structure(value in arb_json(4)) {
        let entries = flatten(&Node::from(&value));
        prop_assert_eq!(entries.len(), expected_entries(&value, true));
    }

    #[test]
    fn every_entry_resolves_to_its_value(value in arb_json(4)) {
        let tree = Node::from(&value);
        for pv in flatten(&tree) {
            let found = tree.get(&pv.path);
            prop_assert_eq!(found.as_ref(), Some(&pv.value), "path {}", pv.path);
            prop_assert!(pv.value.as_scalar().is_some() || pv.value.is_empty_container());
        }
    }

    #[test]
    fn paths_are_unique(value in arb_json(4)) {
        let entries = flatten(&Node::from(&value));
        let mut paths: Vec<&Path> = entries.iter().map(|pv| &pv.path).collect();
        paths.sort();
        let before = paths.len();
        paths.dedup();
        prop_assert_eq!(paths.len(), before);
    }

    #[test]
    fn prefix_is_prepended(value in arb_json(3), key in "[a-z]{1,5}") {
        let tree = Node::from(&value);
        let prefix = Path::root().key(key.as_str());
        let plain = flatten(&tree);
        let prefixed = flatten_at(&tree, &prefix);
        if tree.is_container() {
            prop_assert_eq!(plain.len(), prefixed.len());
            for (a, b) in plain.iter().zip(&prefixed) {
                prop_assert_eq!(b.path.segments()[0].clone(), prefix.segments()[0].clone());
                prop_assert_eq!(&b.path.segments()[1..], a.path.segments());
            }
        } else {
            prop_assert_eq!(prefixed.len(), 1);
        }
    }

    #[test]
    fn cycles_terminate(value in arb_json(3), at in 0usize..4) {
        let tree = Node::from(&value);
        let wrapper = Node::sequence([tree]);
        // Splice the wrapper into itself at some position.
        let target = match wrapper.as_sequence().map(|items| items[0].clone()) {
            Some(child) if child.is_container() => child,
            _ => wrapper.clone(),
        };
        match &target {
            Node::Sequence(_) => { target.push(wrapper.clone()); }
            Node::Record(_) => { target.insert(format!("loop{}", at), wrapper.clone()); }
            Node::Scalar(_) => {}
        }
        let entries = flatten(&wrapper);
        prop_assert!(entries.iter().any(|pv| pv.value.ptr_eq(&wrapper)));
    }
}
