//! The form tree as a closed tagged union.
//!
//! Containers are shared, mutable handles: cloning a [`Node`] clones the
//! handle, not the contents. Two positions in a tree may therefore hold the
//! same container, and a container may (directly or indirectly) contain
//! itself. Traversals that must terminate use container identity, see
//! [`crate::flatten`].

use crate::path::{Path, Segment};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A leaf value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Null and empty or whitespace-only strings never take part in duplicate
    /// detection.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::String(s) => s.trim().is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a JSON scalar. Arrays and objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Numbers compare numerically, so `1` equals `1.0`. Everything else compares
/// exactly, and values of different types are never equal.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Number(a), Scalar::Number(b)) => numbers_equal(a, b),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Integers compare exactly; floats only come in when one side is a float.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => false,
        };
    }
    match (a.as_i64(), b.as_i64(), a.as_u64(), b.as_u64()) {
        (Some(ia), Some(ib), _, _) => ia == ib,
        (_, _, Some(ua), Some(ub)) => ua == ub,
        _ => false,
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

/// A node of the form tree.
#[derive(Clone)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Rc<RefCell<Vec<Node>>>),
    Record(Rc<RefCell<Vec<(String, Node)>>>),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(s.into()))
    }

    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Builds a record. Fields keep the given order; a repeated key keeps its
    /// first position and its last value.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Node)>) -> Self {
        let node = Node::Record(Rc::new(RefCell::new(Vec::new())));
        for (key, value) in fields {
            node.insert(key, value);
        }
        node
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<Ref<'_, Vec<Node>>> {
        match self {
            Node::Sequence(items) => Some(items.borrow()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<Ref<'_, Vec<(String, Node)>>> {
        match self {
            Node::Record(fields) => Some(fields.borrow()),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Node::Scalar(_))
    }

    /// True for a sequence or record with no children.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Node::Scalar(_) => false,
            Node::Sequence(items) => items.borrow().is_empty(),
            Node::Record(fields) => fields.borrow().is_empty(),
        }
    }

    /// Identity of the container allocation. Scalars have none.
    pub(crate) fn identity(&self) -> Option<*const ()> {
        match self {
            Node::Scalar(_) => None,
            Node::Sequence(items) => Some(Rc::as_ptr(items) as *const ()),
            Node::Record(fields) => Some(Rc::as_ptr(fields) as *const ()),
        }
    }

    /// True when both nodes are handles to the same container.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }

    /// Appends to a sequence. Returns `false` if this node is not a sequence.
    pub fn push(&self, child: Node) -> bool {
        match self {
            Node::Sequence(items) => {
                items.borrow_mut().push(child);
                true
            }
            _ => false,
        }
    }

    /// Removes a sequence element, shifting later elements down.
    pub fn remove(&self, index: usize) -> Option<Node> {
        match self {
            Node::Sequence(items) => {
                let mut items = items.borrow_mut();
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }

    /// Sets a record field in place, appending new keys at the end. Returns
    /// `false` if this node is not a record.
    pub fn insert(&self, key: impl Into<String>, value: Node) -> bool {
        let Node::Record(fields) = self else {
            return false;
        };
        let key = key.into();
        let mut fields = fields.borrow_mut();
        match fields.iter().position(|(k, _)| *k == key) {
            Some(i) => fields[i].1 = value,
            None => fields.push((key, value)),
        }
        true
    }

    /// The direct child addressed by one segment.
    pub fn child(&self, segment: &Segment) -> Option<Node> {
        match (self, segment) {
            (Node::Sequence(items), Segment::Index(i)) => items.borrow().get(*i).cloned(),
            (Node::Record(fields), Segment::Key(key)) => fields
                .borrow()
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Resolves a concrete path. The root path returns this node.
    pub fn get(&self, path: &Path) -> Option<Node> {
        let mut current = self.clone();
        for segment in path.segments() {
            current = current.child(segment)?;
        }
        Some(current)
    }
}

/// Scalars compare by value; containers compare by identity.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => a == b,
            _ => self.ptr_eq(other),
        }
    }
}

// Shallow, so that cyclic trees can still be printed.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => write!(f, "Scalar({:?})", s),
            Node::Sequence(items) => write!(f, "Sequence(len={})", items.borrow().len()),
            Node::Record(fields) => {
                let fields = fields.borrow();
                let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
                write!(f, "Record({:?})", keys)
            }
        }
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(items) => Node::sequence(items.iter().map(Node::from)),
            Value::Object(map) => {
                Node::record(map.iter().map(|(k, v)| (k.clone(), Node::from(v))))
            }
            Value::Null => Node::null(),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n.clone())),
            Value::String(s) => Node::string(s.clone()),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}
