//! Structural patterns over paths.
//!
//! A [`Pattern`] is a path in which index segments may be wildcards. Its text
//! form writes the wildcard as `[*]`, e.g. `categories[*].departments[*].type`.
//! Matching is segment-wise and anchored at both ends: keys compare exactly,
//! a concrete index matches only itself, and `[*]` matches any index.

use crate::error::PathError;
use crate::node::Node;
use crate::path::{Path, RawSegment, Segment, render_key, split_segments};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    Key(String),
    Index(usize),
    AnyIndex,
}

/// Which index segments a derived pattern generalizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateScope {
    /// Every index is a wildcard. A nested field is compared against the
    /// same field under every parent element in the whole tree.
    #[default]
    Global,
    /// Only the innermost index is a wildcard. A nested field is compared
    /// only against its siblings within the same parent sequence.
    Parent,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    segments: Vec<PatternSegment>,
}

impl Pattern {
    /// Generalizes every index of `path`. The result matches `path` itself
    /// and every path that differs from it only in index values.
    pub fn from_path(path: &Path) -> Self {
        Self::derive(path, DuplicateScope::Global)
    }

    /// Generalizes the indices of `path` selected by `scope`.
    pub fn derive(path: &Path, scope: DuplicateScope) -> Self {
        let innermost = path
            .segments()
            .iter()
            .rposition(|s| matches!(s, Segment::Index(_)));
        let segments = path
            .segments()
            .iter()
            .enumerate()
            .map(|(i, seg)| match seg {
                Segment::Key(k) => PatternSegment::Key(k.clone()),
                Segment::Index(n) => match scope {
                    DuplicateScope::Global => PatternSegment::AnyIndex,
                    DuplicateScope::Parent if Some(i) == innermost => PatternSegment::AnyIndex,
                    DuplicateScope::Parent => PatternSegment::Index(*n),
                },
            })
            .collect();
        Self { segments }
    }

    pub fn from_segments(segments: Vec<PatternSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Anchored, segment-wise match.
    pub fn matches(&self, path: &Path) -> bool {
        self.segments.len() == path.segments().len()
            && self
                .segments
                .iter()
                .zip(path.segments())
                .all(|(pat, seg)| match (pat, seg) {
                    (PatternSegment::Key(a), Segment::Key(b)) => a == b,
                    (PatternSegment::Index(a), Segment::Index(b)) => a == b,
                    (PatternSegment::AnyIndex, Segment::Index(_)) => true,
                    _ => false,
                })
    }

    /// The equivalent anchored regular expression over rendered paths.
    ///
    /// Keys are rendered as in [`Path`]'s text form and escaped literally;
    /// `[*]` becomes `\[\d+\]`. Agrees with [`Pattern::matches`] applied to
    /// the rendered path.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let mut source = String::from("^");
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PatternSegment::Key(k) => source.push_str(&regex::escape(&render_key(k, i == 0))),
                PatternSegment::Index(n) => source.push_str(&format!(r"\[{}\]", n)),
                PatternSegment::AnyIndex => source.push_str(r"\[\d+\]"),
            }
        }
        source.push('$');
        Regex::new(&source)
    }

    /// Every node in `root` whose path matches this pattern, in tree order.
    ///
    /// Walks only along the pattern, so cyclic trees are safe.
    pub fn resolve(&self, root: &Node) -> Vec<(Path, Node)> {
        let mut current = vec![(Path::root(), root.clone())];

        for seg in &self.segments {
            if current.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for (path, node) in &current {
                match seg {
                    PatternSegment::Key(k) => {
                        if let Some(child) = node.child(&Segment::Key(k.clone())) {
                            next.push((path.key(k.as_str()), child));
                        }
                    }
                    PatternSegment::Index(n) => {
                        if let Some(child) = node.child(&Segment::Index(*n)) {
                            next.push((path.index(*n), child));
                        }
                    }
                    PatternSegment::AnyIndex => {
                        if let Some(items) = node.as_sequence() {
                            next.extend(
                                items
                                    .iter()
                                    .enumerate()
                                    .map(|(i, child)| (path.index(i), child.clone())),
                            );
                        }
                    }
                }
            }
            current = next;
        }

        current
    }
}

/// Shorthand for [`Pattern::from_path`].
pub fn to_pattern(path: &Path) -> Pattern {
    Pattern::from_path(path)
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PatternSegment::Key(k) => f.write_str(&render_key(k, i == 0))?,
                PatternSegment::Index(n) => write!(f, "[{}]", n)?,
                PatternSegment::AnyIndex => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(s)?
            .into_iter()
            .map(|seg| match seg {
                RawSegment::Key(k) => PatternSegment::Key(k),
                RawSegment::Index(n) => PatternSegment::Index(n),
                RawSegment::Wildcard(_) => PatternSegment::AnyIndex,
            })
            .collect();
        Ok(Self { segments })
    }
}

impl TryFrom<String> for Pattern {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}
