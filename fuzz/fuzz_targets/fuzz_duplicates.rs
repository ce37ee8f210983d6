#![no_main]

use formguard::{DuplicateScope, DuplicateValidator, ErrorDescriptor, ErrorMap, Node, Path};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte splits the input into path text and a JSON tree.
    let split = data[0] as usize % data.len().max(1);
    let (path_bytes, value_bytes) = data.split_at(split.min(data.len()));

    let Ok(path) = String::from_utf8_lossy(path_bytes).parse::<Path>() else {
        return;
    };
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) else {
        return;
    };

    let tree = Node::from(&value);
    let candidate = tree
        .get(&path)
        .and_then(|n| n.as_scalar().cloned())
        .unwrap_or(formguard::Scalar::Null);

    for scope in [DuplicateScope::Global, DuplicateScope::Parent] {
        let mut store = ErrorMap::new();
        let hit = DuplicateValidator::new(scope).check(
            &tree,
            &path,
            &candidate,
            &ErrorDescriptor::duplicate("dup"),
            &mut store,
        );
        assert_eq!(store.contains(&path), hit);
    }
});
