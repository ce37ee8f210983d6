//! The duplicate-check capability handed to field rules.

use crate::duplicate::DuplicateValidator;
use crate::error::ErrorDescriptor;
use crate::node::{Node, Scalar};
use crate::path::Path;
use crate::store::ErrorStore;

/// Asks whether a field's value duplicates another structurally matching
/// field, recording the outcome on that field's error entry.
pub trait DuplicateCheck {
    fn is_duplicate(&mut self, path: &Path, value: &Scalar, error: &ErrorDescriptor) -> bool;
}

/// [`DuplicateCheck`] bound to one snapshot and one error store.
pub struct DuplicateBinding<'a, S: ErrorStore + ?Sized> {
    snapshot: &'a Node,
    store: &'a mut S,
    validator: DuplicateValidator,
}

impl<'a, S: ErrorStore + ?Sized> DuplicateBinding<'a, S> {
    pub fn new(snapshot: &'a Node, store: &'a mut S, validator: DuplicateValidator) -> Self {
        Self {
            snapshot,
            store,
            validator,
        }
    }
}

impl<S: ErrorStore + ?Sized> DuplicateCheck for DuplicateBinding<'_, S> {
    fn is_duplicate(&mut self, path: &Path, value: &Scalar, error: &ErrorDescriptor) -> bool {
        self.validator
            .check(self.snapshot, path, value, error, &mut *self.store)
    }
}

/// A capability that never reports duplicates. For rules evaluated without a
/// tree, e.g. a single field in isolation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicates;

impl DuplicateCheck for NoDuplicates {
    fn is_duplicate(&mut self, _path: &Path, _value: &Scalar, _error: &ErrorDescriptor) -> bool {
        false
    }
}
