//! Flattening a tree into addressable leaves.

use crate::node::Node;
use crate::path::Path;
use std::collections::HashSet;

/// A leaf (or empty container) together with its address.
#[derive(Clone, Debug, PartialEq)]
pub struct PathValue {
    pub path: Path,
    pub value: Node,
}

/// Lists every leaf of `node` depth-first, in sequence and record order.
///
/// A container child that contributes no leaves (because it is empty, or
/// because it was already visited during this call) is reported once as
/// itself. A scalar root yields nothing.
pub fn flatten(node: &Node) -> Vec<PathValue> {
    flatten_at(node, &Path::root())
}

/// Like [`flatten`], with every path prefixed by `prefix`. A scalar with a
/// non-root prefix yields exactly one entry.
pub fn flatten_at(node: &Node, prefix: &Path) -> Vec<PathValue> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    collect(node, prefix, &mut visited, &mut out);
    out
}

fn collect(
    node: &Node,
    prefix: &Path,
    visited: &mut HashSet<*const ()>,
    out: &mut Vec<PathValue>,
) {
    if let Some(id) = node.identity()
        && !visited.insert(id)
    {
        return;
    }

    match node {
        Node::Scalar(_) => {
            if !prefix.is_root() {
                out.push(PathValue {
                    path: prefix.clone(),
                    value: node.clone(),
                });
            }
        }
        Node::Sequence(items) => {
            for (i, child) in items.borrow().iter().enumerate() {
                collect_child(child, prefix.index(i), visited, out);
            }
        }
        Node::Record(fields) => {
            for (key, child) in fields.borrow().iter() {
                collect_child(child, prefix.key(key.as_str()), visited, out);
            }
        }
    }
}

fn collect_child(
    child: &Node,
    path: Path,
    visited: &mut HashSet<*const ()>,
    out: &mut Vec<PathValue>,
) {
    let before = out.len();
    collect(child, &path, visited, out);
    if child.is_container() && out.len() == before {
        out.push(PathValue {
            path,
            value: child.clone(),
        });
    }
}
