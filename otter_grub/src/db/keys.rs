/*!
Keys to incompatibilities stored in a context.

A key is a thin wrapper around the index of the incompatibility in the [incompatibility database](crate::db::incompatibility).
As the database is append-only for the lifetime of a resolution, keys are stable, and the order of keys is the order in which the incompatibilities were learned.
*/

use std::fmt;

/// The index of a stored incompatibility.
pub type IncompatibilityIndex = u32;

/// A key to an incompatibility stored in the incompatibility database.
///
/// Keys order by creation: a key is smaller than every key created after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncompatibilityKey(IncompatibilityIndex);

impl IncompatibilityKey {
    /// The key to the incompatibility stored at `index`.
    pub(crate) fn at(index: usize) -> Self {
        IncompatibilityKey(index as IncompatibilityIndex)
    }

    /// The index of the keyed incompatibility.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for IncompatibilityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
