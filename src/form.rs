//! Form state: current values, rules and per-field errors.

use crate::binding::DuplicateBinding;
use crate::duplicate::DuplicateValidator;
use crate::error::ValidationResult;
use crate::node::{Node, Scalar};
use crate::path::{Path, Segment};
use crate::pattern::{Pattern, PatternSegment};
use crate::schema::Schema;
use crate::store::{ErrorMap, ErrorStore};
use crate::types::FormData;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Produces the current tree for one validation call.
pub trait Snapshot {
    fn snapshot(&self) -> Node;
}

impl Snapshot for FormData {
    fn snapshot(&self) -> Node {
        Node::from(self)
    }
}

impl Snapshot for Node {
    /// Shares the containers: later mutation through either handle is visible
    /// in both.
    fn snapshot(&self) -> Node {
        self.clone()
    }
}

impl Snapshot for serde_json::Value {
    fn snapshot(&self) -> Node {
        Node::from(self)
    }
}

/// Values under edit, the rules they are checked against, and the errors the
/// last checks left behind.
#[derive(Clone, Debug)]
pub struct FormState<T: Snapshot = FormData> {
    values: T,
    schema: Schema,
    errors: ErrorMap,
}

impl<T: Snapshot> FormState<T> {
    pub fn new(values: T, schema: Schema) -> Self {
        Self {
            values,
            schema,
            errors: ErrorMap::new(),
        }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    /// Mutable access for edits. Errors are not touched until the next
    /// validation call.
    pub fn values_mut(&mut self) -> &mut T {
        &mut self.values
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorMap {
        &mut self.errors
    }

    pub fn snapshot(&self) -> Node {
        self.values.snapshot()
    }

    /// Validates one field against a fresh snapshot and updates only that
    /// field's error. Returns whether the field is valid.
    ///
    /// A field with no rule is valid and its error is left alone. A missing or
    /// non-scalar value is checked as null.
    pub fn validate_field(&mut self, path: &Path) -> bool {
        let Some(rule) = self.schema.field_rule(path) else {
            return true;
        };

        let tree = self.values.snapshot();
        let value = tree
            .get(path)
            .and_then(|n| n.as_scalar().cloned())
            .unwrap_or(Scalar::Null);

        let validator = DuplicateValidator::new(self.schema.scope);
        let mut binding = DuplicateBinding::new(&tree, &mut self.errors, validator);
        let outcome = rule.check(path, &value, &mut binding);

        match outcome {
            Ok(()) => {
                self.errors.clear_error(path);
                true
            }
            Err(descriptor) => {
                debug!(path = %path, kind = %descriptor.kind, "field invalid");
                self.errors.set_error(path, descriptor);
                false
            }
        }
    }

    /// Re-validates the whole form: clears every error, checks every sequence
    /// rule, then every position a field rule covers. A field missing from its
    /// record, or holding a container, is checked as null. When several rules
    /// cover one position, the first one wins, as in [`Schema::field_rule`].
    pub fn validate(&mut self) -> ValidationResult {
        self.errors.clear();
        let tree = self.values.snapshot();

        for rule in &self.schema.sequences {
            for (path, node) in rule_targets(&rule.path, &tree) {
                if let Err(descriptor) = rule.check(node.as_ref()) {
                    self.errors.set_error(&path, descriptor);
                }
            }
        }

        let validator = DuplicateValidator::new(self.schema.scope);
        let mut seen = BTreeSet::new();

        for rule in &self.schema.fields {
            let targets = rule_targets(&rule.path, &tree);
            trace!(pattern = %rule.path, targets = targets.len(), "checking field rule");

            for (path, node) in targets {
                if !seen.insert(path.clone()) {
                    continue;
                }
                let value = node
                    .as_ref()
                    .and_then(|n| n.as_scalar().cloned())
                    .unwrap_or(Scalar::Null);
                let mut binding = DuplicateBinding::new(&tree, &mut self.errors, validator);
                if let Err(descriptor) = rule.check(&path, &value, &mut binding) {
                    self.errors.set_error(&path, descriptor);
                }
            }
        }

        let result = ValidationResult {
            errors: self.errors.to_field_errors(),
        };
        debug!(errors = result.errors.len(), "form validated");
        result
    }

    /// Submission is allowed only while no field carries an error.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Every position a rule covers, whether or not the value is there. When the
/// pattern ends in a key, the parents are resolved instead so that a record
/// missing the key is still checked.
fn rule_targets(pattern: &Pattern, tree: &Node) -> Vec<(Path, Option<Node>)> {
    match pattern.segments().split_last() {
        Some((PatternSegment::Key(key), parent)) => Pattern::from_segments(parent.to_vec())
            .resolve(tree)
            .into_iter()
            .map(|(path, node)| {
                let child = node.child(&Segment::Key(key.clone()));
                (path.key(key.as_str()), child)
            })
            .collect(),
        _ => pattern
            .resolve(tree)
            .into_iter()
            .map(|(path, node)| (path, Some(node)))
            .collect(),
    }
}
