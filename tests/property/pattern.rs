use formguard::{DuplicateScope, Path, Pattern, Segment, to_pattern};
use proptest::prelude::*;

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}".prop_map(Segment::Key),
        (0usize..50).prop_map(Segment::Index),
    ]
}

/// Paths that start with a key, like every field path in a record root.
fn arb_path() -> impl Strategy<Value = Path> {
    ("[a-z][a-z0-9_]{0,6}", prop::collection::vec(arb_segment(), 0..6)).prop_map(
        |(first, rest)| {
            let mut segments = vec![Segment::Key(first)];
            segments.extend(rest);
            Path::from_segments(segments)
        },
    )
}

/// Keys drawn from the characters the text form has to quote.
fn arb_awkward_path() -> impl Strategy<Value = Path> {
    prop::collection::vec(
        prop_oneof![
            r#"[a-z.\[\]"\\*]{0,5}"#.prop_map(Segment::Key),
            (0usize..50).prop_map(Segment::Index),
        ],
        0..6,
    )
    .prop_map(Path::from_segments)
}

/// Same shape as `path`, with every index replaced by an arbitrary one.
fn reindex(path: &Path, indices: &[usize]) -> Path {
    let mut next = indices.iter().copied().cycle();
    Path::from_segments(
        path.segments()
            .iter()
            .map(|seg| match seg {
                Segment::Index(_) => Segment::Index(next.next().unwrap_or(0)),
                key => key.clone(),
            })
            .collect(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn pattern_matches_its_own_path(path in arb_path()) {
        prop_assert!(to_pattern(&path).matches(&path));
        prop_assert!(Pattern::derive(&path, DuplicateScope::Parent).matches(&path));
    }

    #[test]
    fn pattern_matches_any_reindexing(
        path in arb_path(),
        indices in prop::collection::vec(0usize..1000, 1..8),
    ) {
        let other = reindex(&path, &indices);
        prop_assert!(to_pattern(&path).matches(&other));
        prop_assert!(to_pattern(&other).matches(&path));
    }

    #[test]
    fn pattern_rejects_extra_or_missing_segments(
        path in arb_path(),
        extra in "[a-z]{1,4}",
    ) {
        let pattern = to_pattern(&path);
        prop_assert!(!pattern.matches(&path.key(extra.as_str())));
        prop_assert!(!pattern.matches(&path.index(0)));
        if let Some(parent) = path.parent() {
            prop_assert!(!pattern.matches(&parent));
        }
    }

    #[test]
    fn regex_agrees_with_segment_matcher(a in arb_path(), b in arb_path()) {
        let pattern = to_pattern(&a);
        let re = pattern.to_regex().unwrap();
        prop_assert_eq!(pattern.matches(&b), re.is_match(&b.to_string()));
        prop_assert!(re.is_match(&a.to_string()));
    }

    #[test]
    fn rendered_paths_parse_back(path in arb_path()) {
        let text = path.to_string();
        let parsed: Path = text.parse().unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn awkward_keys_survive_text_form(path in arb_awkward_path()) {
        let parsed: Path = path.to_string().parse().unwrap();
        prop_assert_eq!(&parsed, &path);
        let pattern = to_pattern(&path);
        let reparsed: Pattern = pattern.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, pattern);
    }

    #[test]
    fn rendered_patterns_parse_back(path in arb_path()) {
        let pattern = to_pattern(&path);
        let parsed: Pattern = pattern.to_string().parse().unwrap();
        prop_assert_eq!(parsed, pattern);
    }

    #[test]
    fn path_parsing_never_panics(text in "\\PC{0,30}") {
        let _ = text.parse::<Path>();
        let _ = text.parse::<Pattern>();
    }
}
