use formguard::{
    Category, Department, DuplicateScope, DuplicateValidator, ErrorDescriptor, ErrorMap, ErrorStore,
    FormData, Node, Path, Scalar, flatten,
};
use proptest::prelude::*;

/// Small alphabet so that collisions are common.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[ab]{1,2}",
    ]
}

fn arb_form() -> impl Strategy<Value = FormData> {
    let department = (arb_value(), arb_value()).prop_map(|(n, t)| Department::new(n, t));
    let category = (
        arb_value(),
        arb_value(),
        prop::collection::vec(department, 0..4),
    )
        .prop_map(|(n, d, deps)| Category::new(n, d, deps));
    prop::collection::vec(category, 0..4).prop_map(|categories| FormData { categories })
}

fn arb_scope() -> impl Strategy<Value = DuplicateScope> {
    prop_oneof![Just(DuplicateScope::Global), Just(DuplicateScope::Parent)]
}

fn leaves(tree: &Node) -> Vec<(Path, Scalar)> {
    flatten(tree)
        .into_iter()
        .filter_map(|pv| pv.value.as_scalar().cloned().map(|s| (pv.path, s)))
        .collect()
}

fn descriptor() -> ErrorDescriptor {
    ErrorDescriptor::duplicate("duplicate")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn check_is_idempotent(form in arb_form(), scope in arb_scope()) {
        let tree = Node::from(&form);
        let validator = DuplicateValidator::new(scope);
        for (path, value) in leaves(&tree) {
            let mut store = ErrorMap::new();
            let first = validator.check(&tree, &path, &value, &descriptor(), &mut store);
            let snapshot = store.clone();
            let second = validator.check(&tree, &path, &value, &descriptor(), &mut store);
            prop_assert_eq!(first, second);
            prop_assert_eq!(&store, &snapshot);
            prop_assert_eq!(store.contains(&path), first);
        }
    }

    #[test]
    fn unique_values_are_never_flagged(form in arb_form(), scope in arb_scope()) {
        let tree = Node::from(&form);
        let validator = DuplicateValidator::new(scope);
        for (path, _) in leaves(&tree) {
            let fresh = Scalar::from("zz-unique");
            prop_assert!(!validator.is_duplicate(&tree, &path, &fresh));
        }
    }

    #[test]
    fn blank_values_never_flag_and_clear(form in arb_form(), scope in arb_scope()) {
        let tree = Node::from(&form);
        let validator = DuplicateValidator::new(scope);
        for (path, _) in leaves(&tree) {
            let mut store = ErrorMap::new();
            store.set_error(&path, descriptor());
            prop_assert!(!validator.check(&tree, &path, &"   ".into(), &descriptor(), &mut store));
            prop_assert!(store.is_empty());
        }
    }

    #[test]
    fn duplicates_are_symmetric(form in arb_form(), scope in arb_scope()) {
        let tree = Node::from(&form);
        let validator = DuplicateValidator::new(scope);
        for (path, value) in leaves(&tree) {
            for other in validator.duplicates_of(&tree, &path, &value) {
                let back = validator.duplicates_of(&tree, &other, &value);
                prop_assert!(back.contains(&path), "{} -> {} not symmetric", path, other);
            }
        }
    }

    #[test]
    fn parent_scope_finds_a_subset_of_global(form in arb_form()) {
        let tree = Node::from(&form);
        let global = DuplicateValidator::new(DuplicateScope::Global);
        let parent = DuplicateValidator::new(DuplicateScope::Parent);
        for (path, value) in leaves(&tree) {
            let all = global.duplicates_of(&tree, &path, &value);
            for p in parent.duplicates_of(&tree, &path, &value) {
                prop_assert!(all.contains(&p));
            }
        }
    }

    #[test]
    fn matches_brute_force_comparison(form in arb_form()) {
        let tree = Node::from(&form);
        let validator = DuplicateValidator::default();
        let all = leaves(&tree);
        for (path, value) in &all {
            let expected = !value.is_blank()
                && all.iter().any(|(p, v)| {
                    p != path
                        && v == value
                        && p.segments().len() == path.segments().len()
                        && p.segments().iter().zip(path.segments()).all(|(a, b)| {
                            match (a, b) {
                                (formguard::Segment::Index(_), formguard::Segment::Index(_)) => true,
                                _ => a == b,
                            }
                        })
                });
            prop_assert_eq!(validator.is_duplicate(&tree, path, value), expected, "at {}", path);
        }
    }
}
