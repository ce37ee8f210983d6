//! Structural addresses into a form tree.
//!
//! A [`Path`] is an ordered list of [`Segment`]s. Its text form mixes keyed
//! segments (`.field`) and index segments (`[n]`), e.g.
//! `categories[0].departments[1].type`. The empty path addresses the root.

use crate::error::PathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// A record field.
    Key(String),
    /// A sequence element.
    Index(usize),
}

/// Address of exactly one node in a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// True for the empty path. Use `segments().len()` for the depth.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns a new path with a keyed segment appended.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// The path one segment up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Key(k) => f.write_str(&render_key(k, i == 0))?,
                Segment::Index(n) => write!(f, "[{}]", n)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = split_segments(s)?;
        let segments = raw
            .into_iter()
            .map(|seg| match seg {
                RawSegment::Key(k) => Ok(Segment::Key(k)),
                RawSegment::Index(n) => Ok(Segment::Index(n)),
                RawSegment::Wildcard(pos) => Err(PathError::new(
                    s,
                    pos,
                    "wildcard index is only allowed in patterns",
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl TryFrom<String> for Path {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

/// Segment as it appears in text, before deciding whether wildcards are legal.
#[derive(Debug, PartialEq)]
pub(crate) enum RawSegment {
    Key(String),
    Index(usize),
    /// `[*]`, carrying its byte offset for error reporting.
    Wildcard(usize),
}

/// Renders one key segment. Keys that are empty or contain `.`, `[`, `]`,
/// `"` or `\` are written quoted in brackets, `["a.b"]`, with `"` and `\`
/// backslash-escaped.
pub(crate) fn render_key(key: &str, first: bool) -> String {
    let plain = !key.is_empty() && !key.contains(['.', '[', ']', '"', '\\']);
    if plain {
        return if first {
            key.to_string()
        } else {
            format!(".{}", key)
        };
    }
    let mut out = String::from("[\"");
    for c in key.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"]");
    out
}

/// Splits `a.b[0].c[*]["x.y"]` into raw segments.
///
/// Keys run until `.` or `[`. A `.` must be followed by a key. Brackets hold
/// ASCII digits, a single `*`, or a quoted key.
pub(crate) fn split_segments(input: &str) -> Result<Vec<RawSegment>, PathError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut i = 0;
    // Set after a '.', cleared once a key character is consumed.
    let mut expect_key = false;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            '.' => {
                if current.is_empty() {
                    if segments.is_empty() {
                        return Err(PathError::new(input, pos, "leading '.'"));
                    }
                    if expect_key {
                        return Err(PathError::new(input, pos, "empty key"));
                    }
                } else {
                    segments.push(RawSegment::Key(std::mem::take(&mut current)));
                }
                expect_key = true;
                i += 1;
            }
            '[' => {
                if expect_key && current.is_empty() {
                    return Err(PathError::new(input, pos, "empty key"));
                }
                if !current.is_empty() {
                    segments.push(RawSegment::Key(std::mem::take(&mut current)));
                }
                expect_key = false;
                if let Some(&(_, '"')) = chars.get(i + 1) {
                    let (key, next) = quoted_key(input, &chars, i + 2, pos)?;
                    segments.push(RawSegment::Key(key));
                    i = next;
                    check_after_bracket(input, &chars, i)?;
                    continue;
                }
                let close = chars[i + 1..]
                    .iter()
                    .position(|&(_, c)| c == ']')
                    .map(|off| i + 1 + off)
                    .ok_or_else(|| PathError::new(input, pos, "unclosed '['"))?;
                let inner: String = chars[i + 1..close].iter().map(|&(_, c)| c).collect();
                if inner == "*" {
                    segments.push(RawSegment::Wildcard(pos));
                } else if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                    let n = inner
                        .parse::<usize>()
                        .map_err(|_| PathError::new(input, pos, "index out of range"))?;
                    segments.push(RawSegment::Index(n));
                } else {
                    return Err(PathError::new(
                        input,
                        pos,
                        &format!("invalid index '{}'", inner),
                    ));
                }
                i = close + 1;
                check_after_bracket(input, &chars, i)?;
            }
            ']' => return Err(PathError::new(input, pos, "unmatched ']'")),
            c => {
                current.push(c);
                expect_key = false;
                i += 1;
            }
        }
    }

    if expect_key {
        return Err(PathError::new(input, input.len(), "trailing '.'"));
    }
    if !current.is_empty() {
        segments.push(RawSegment::Key(current));
    }

    Ok(segments)
}

/// Reads a quoted key starting just after its opening `"`. Returns the key
/// and the index just past the closing `]`.
fn quoted_key(
    input: &str,
    chars: &[(usize, char)],
    start: usize,
    open: usize,
) -> Result<(String, usize), PathError> {
    let mut key = String::new();
    let mut i = start;
    loop {
        match chars.get(i) {
            None => return Err(PathError::new(input, open, "unclosed quoted key")),
            Some(&(_, '\\')) => {
                let &(_, c) = chars
                    .get(i + 1)
                    .ok_or_else(|| PathError::new(input, open, "unclosed quoted key"))?;
                key.push(c);
                i += 2;
            }
            Some(&(_, '"')) => break,
            Some(&(_, c)) => {
                key.push(c);
                i += 1;
            }
        }
    }
    match chars.get(i + 1) {
        Some(&(_, ']')) => Ok((key, i + 2)),
        Some(&(pos, _)) => Err(PathError::new(input, pos, "expected ']' after quoted key")),
        None => Err(PathError::new(input, input.len(), "expected ']' after quoted key")),
    }
}

/// After `]` comes `.`, `[` or the end.
fn check_after_bracket(input: &str, chars: &[(usize, char)], i: usize) -> Result<(), PathError> {
    match chars.get(i) {
        Some(&(pos, next)) if next != '.' && next != '[' => Err(PathError::new(
            input,
            pos,
            "expected '.' or '[' after ']'",
        )),
        _ => Ok(()),
    }
}
