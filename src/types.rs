use serde::{Deserialize, Serialize};

use crate::node::Node;

// ─── Form data ──────────────────────────────────────────────────────────────

/// Root of the categories form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub descriptions: String,
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub name: String,
    /// Serialized as `type`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Department {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        descriptions: impl Into<String>,
        departments: Vec<Department>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptions: descriptions.into(),
            departments,
        }
    }
}

// ─── Tree conversion ────────────────────────────────────────────────────────

impl From<&Department> for Node {
    fn from(d: &Department) -> Self {
        Node::record([
            ("name", Node::string(d.name.as_str())),
            ("type", Node::string(d.kind.as_str())),
        ])
    }
}

impl From<&Category> for Node {
    fn from(c: &Category) -> Self {
        Node::record([
            ("name", Node::string(c.name.as_str())),
            ("descriptions", Node::string(c.descriptions.as_str())),
            (
                "departments",
                Node::sequence(c.departments.iter().map(Node::from)),
            ),
        ])
    }
}

impl From<&FormData> for Node {
    fn from(form: &FormData) -> Self {
        Node::record([(
            "categories",
            Node::sequence(form.categories.iter().map(Node::from)),
        )])
    }
}
