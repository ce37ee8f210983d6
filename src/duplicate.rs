//! Cross-field duplicate detection.
//!
//! A field is a duplicate when some *other* leaf at a structurally matching
//! path (see [`Pattern::derive`]) holds an equal, non-blank scalar. The check
//! runs for one field at a time against a snapshot of the whole tree; it keeps
//! no state between calls, so every call flattens the tree afresh.

use crate::error::{ErrorDescriptor, ErrorKind};
use crate::flatten::flatten;
use crate::node::{Node, Scalar};
use crate::path::Path;
use crate::pattern::{DuplicateScope, Pattern};
use crate::store::ErrorStore;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DuplicateValidator {
    scope: DuplicateScope,
}

impl DuplicateValidator {
    pub fn new(scope: DuplicateScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> DuplicateScope {
        self.scope
    }

    /// Paths other than `path` that match its pattern and hold `value`, in
    /// tree order. Empty for a blank value or the root path.
    pub fn duplicates_of(&self, tree: &Node, path: &Path, value: &Scalar) -> Vec<Path> {
        if path.is_root() || value.is_blank() {
            return Vec::new();
        }

        let pattern = Pattern::derive(path, self.scope);
        let leaves = flatten(tree);
        trace!(
            path = %path,
            pattern = %pattern,
            leaves = leaves.len(),
            "scanning for duplicates"
        );

        leaves
            .into_iter()
            .filter(|pv| pv.path != *path && pattern.matches(&pv.path))
            .filter(|pv| pv.value.as_scalar() == Some(value))
            .map(|pv| pv.path)
            .collect()
    }

    /// Whether `value` at `path` duplicates another matching leaf. No side
    /// effects.
    pub fn is_duplicate(&self, tree: &Node, path: &Path, value: &Scalar) -> bool {
        !self.duplicates_of(tree, path, value).is_empty()
    }

    /// Runs [`is_duplicate`](Self::is_duplicate) and synchronizes the error on
    /// `path`: a hit sets `descriptor` (as a `duplicate` error), a miss clears
    /// whatever error `path` had. A blank value is a miss. The root path is
    /// never checked and leaves the store untouched.
    ///
    /// Repeating the call on an unchanged tree yields the same result and the
    /// same store contents.
    pub fn check<S: ErrorStore + ?Sized>(
        &self,
        tree: &Node,
        path: &Path,
        value: &Scalar,
        descriptor: &ErrorDescriptor,
        store: &mut S,
    ) -> bool {
        if path.is_root() {
            return false;
        }

        let conflicts = self.duplicates_of(tree, path, value);
        if conflicts.is_empty() {
            store.clear_error(path);
            return false;
        }

        debug!(
            path = %path,
            value = %value,
            conflicts = conflicts.len(),
            "duplicate value"
        );
        store.set_error(
            path,
            ErrorDescriptor {
                message: descriptor.message.clone(),
                kind: ErrorKind::Duplicate,
            },
        );
        true
    }
}

/// [`DuplicateValidator::check`] with the default (global) scope.
pub fn check<S: ErrorStore + ?Sized>(
    tree: &Node,
    path: &Path,
    value: &Scalar,
    descriptor: &ErrorDescriptor,
    store: &mut S,
) -> bool {
    DuplicateValidator::default().check(tree, path, value, descriptor, store)
}
