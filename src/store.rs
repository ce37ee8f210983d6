//! Per-path error storage.

use crate::error::{ErrorDescriptor, FieldError};
use crate::path::Path;
use std::collections::BTreeMap;

/// Write access to a per-path error store.
///
/// Both operations are terminal: an implementation must not trigger another
/// validation of the same path before returning.
pub trait ErrorStore {
    /// Replaces any error on `path`.
    fn set_error(&mut self, path: &Path, descriptor: ErrorDescriptor);

    /// Removes any error on `path`. Clearing an absent entry is a no-op.
    fn clear_error(&mut self, path: &Path);
}

/// In-memory error store, one descriptor per path, iterated in path order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorMap {
    entries: BTreeMap<Path, ErrorDescriptor>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&ErrorDescriptor> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &ErrorDescriptor)> {
        self.entries.iter()
    }

    pub fn to_field_errors(&self) -> Vec<FieldError> {
        self.entries
            .iter()
            .map(|(path, desc)| FieldError::new(path.clone(), desc.clone()))
            .collect()
    }
}

impl ErrorStore for ErrorMap {
    fn set_error(&mut self, path: &Path, descriptor: ErrorDescriptor) {
        self.entries.insert(path.clone(), descriptor);
    }

    fn clear_error(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

impl<S: ErrorStore + ?Sized> ErrorStore for &mut S {
    fn set_error(&mut self, path: &Path, descriptor: ErrorDescriptor) {
        (**self).set_error(path, descriptor);
    }

    fn clear_error(&mut self, path: &Path) {
        (**self).clear_error(path);
    }
}
