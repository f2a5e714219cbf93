/*!
A database of incompatibility related things.

Incompatibilities are stored in an append-only arena, each indexed by the [IncompatibilityKey] handed out when stored.
Keys are handed out in order, and as a derived incompatibility notes the keys of its two causes, the arena doubles as the derivation graph of a resolution, with external incompatibilities as leaves.

Fields of the database are private to ensure the use of methods which uphold two invariants:

<div class="warning">

- A key, once handed out, always indexes the same incompatibility.
- Every key on the mention list of a package indexes an incompatibility whose terms mention the package.

</div>

Distinct from storage is *mention*.
[Unit propagation](crate::procedures) examines only those incompatibilities on the mention list of some package.
External incompatibilities are listed as soon as stored, while a derived incompatibility is listed only if it survives conflict analysis as the root cause of a conflict.
Intermediate resolvents remain in the arena to support derivation trees, and are otherwise inert.
*/

use crate::{
    db::keys::IncompatibilityKey,
    misc::log::targets::{self},
    structures::{incompatibility::Incompatibility, package::PackageId, version::VersionSet},
};

/// The incompatibility database.
pub struct IncompatibilityDB<VS: VersionSet, M> {
    /// Incompatibilities, indexed by the key handed out when stored.
    store: Vec<Incompatibility<VS, M>>,

    /// For each package, the keys of listed incompatibilities mentioning the package, in order of listing.
    mentioning: Vec<Vec<IncompatibilityKey>>,
}

impl<VS: VersionSet, M> Default for IncompatibilityDB<VS, M> {
    fn default() -> Self {
        IncompatibilityDB {
            store: Vec::default(),
            mentioning: Vec::default(),
        }
    }
}

impl<VS: VersionSet, M> IncompatibilityDB<VS, M> {
    /// A count of incompatibilities stored, listed or otherwise.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Stores `incompatibility` and returns the key to the incompatibility.
    ///
    /// The incompatibility is *not* placed on the mention lists of its packages.
    /// For this, see [list](IncompatibilityDB::list).
    pub fn store(&mut self, incompatibility: Incompatibility<VS, M>) -> IncompatibilityKey {
        let key = IncompatibilityKey::at(self.store.len());
        log::trace!(target: targets::INCOMPATIBILITY_DB, "Store: {key} {incompatibility}");
        self.store.push(incompatibility);
        key
    }

    /// Places `key` on the mention list of each package mentioned by the indexed incompatibility.
    pub fn list(&mut self, key: IncompatibilityKey) {
        for package in self.store[key.index()].packages() {
            let index = package as usize;
            if self.mentioning.len() <= index {
                self.mentioning.resize_with(index + 1, Vec::default);
            }
            self.mentioning[index].push(key);
        }
    }

    /// The keys of listed incompatibilities mentioning `package`, in order of listing.
    pub fn mentioning(&self, package: PackageId) -> &[IncompatibilityKey] {
        match self.mentioning.get(package as usize) {
            Some(keys) => keys,
            None => &[],
        }
    }

    /// The incompatibility indexed by `key`.
    pub fn get(&self, key: &IncompatibilityKey) -> &Incompatibility<VS, M> {
        &self.store[key.index()]
    }
}
