/*!
A database of 'package related' things, accessed via fields on a [PackageDB] struct.

Things include:
- An intern table pairing each package with a [PackageId], in order of first encounter.
- A [Summary] of the status of each package on the trail, indexed by package ids.

Package ids are handed out sequentially, and for this reason double as a record of the order in which packages were first mentioned during a resolution.
[prioritised_package](crate::context::Context::prioritised_package) breaks priority ties in favour of the package with the lowest id, and so in favour of the package mentioned first.
*/

use std::collections::HashMap;

use crate::{
    db::trail::Trail,
    structures::{
        package::{Package, PackageId},
        term::Term,
        version::VersionSet,
    },
};

/// The package database.
pub struct PackageDB<P: Package, VS: VersionSet> {
    /// Packages, indexed by package ids.
    names: Vec<P>,

    /// A map from a package to its id, the inverse of `names`.
    ids: HashMap<P, PackageId>,

    /// A [Summary] of the status of each package on the trail, indexed by package ids.
    summaries: Vec<Summary<VS>>,
}

/// A summary of the status of a package on the trail.
pub struct Summary<VS: VersionSet> {
    /// Positions on the trail of the assignments bounding the package, in order of assignment.
    pub positions: Vec<usize>,

    /// The version decided for the package, if a decision has been made.
    pub decision: Option<VS::V>,

    /// A tally of the conflicts the package has contributed to.
    pub conflicts: ConflictTally,
}

/// A tally of the conflicts a package has contributed to, refreshed as conflicts are resolved.
///
/// Passed to [prioritize](crate::provider::DependencyProvider::prioritize) so a provider may favour packages which have proven contentious.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConflictTally {
    /// A count of conflicts in which the package appeared in the conflicting incompatibility.
    pub as_culprit: u32,

    /// A count of conflicts in which the package appeared in the derived root cause, though not in the conflicting incompatibility.
    pub as_affected: u32,
}

impl ConflictTally {
    /// A count of every conflict the package has contributed to, in any role.
    pub fn total(&self) -> u32 {
        self.as_culprit + self.as_affected
    }
}

impl<VS: VersionSet> Default for Summary<VS> {
    fn default() -> Self {
        Summary {
            positions: Vec::default(),
            decision: None,
            conflicts: ConflictTally::default(),
        }
    }
}

impl<P: Package, VS: VersionSet> Default for PackageDB<P, VS> {
    fn default() -> Self {
        PackageDB {
            names: Vec::default(),
            ids: HashMap::default(),
            summaries: Vec::default(),
        }
    }
}

impl<P: Package, VS: VersionSet> PackageDB<P, VS> {
    /// A count of packages in the [PackageDB].
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// The id of `package`, interning the package if it has not been mentioned before.
    ///
    /// If used, all the relevant data structures are updated to support access via the id.
    pub fn intern(&mut self, package: &P) -> PackageId {
        match self.ids.get(package) {
            Some(id) => *id,

            None => {
                let id = self.names.len() as PackageId;
                self.names.push(package.clone());
                self.ids.insert(package.clone(), id);
                self.summaries.push(Summary::default());
                id
            }
        }
    }

    /// The id of `package`, if the package has been mentioned.
    pub fn id_of(&self, package: &P) -> Option<PackageId> {
        self.ids.get(package).copied()
    }

    /// The package interned with `id`.
    pub fn package(&self, id: PackageId) -> &P {
        &self.names[id as usize]
    }

    /// The ids of every package mentioned, in order of first mention.
    pub fn ids(&self) -> std::ops::Range<PackageId> {
        0..(self.names.len() as PackageId)
    }

    /// The summary of the package interned with `id`.
    pub fn summary(&self, id: PackageId) -> &Summary<VS> {
        &self.summaries[id as usize]
    }

    /// A mutable borrow of the summary of the package interned with `id`.
    pub fn summary_mut(&mut self, id: PackageId) -> &mut Summary<VS> {
        &mut self.summaries[id as usize]
    }

    /// The accumulated term of the package interned with `id`, read from the most recent assignment bounding the package on `trail`.
    ///
    /// [None], if no assignment bounds the package.
    pub fn accumulated<'t>(&self, trail: &'t Trail<VS>, id: PackageId) -> Option<&'t Term<VS>> {
        let position = *self.summaries.get(id as usize)?.positions.last()?;
        Some(&trail.assignments[position].accumulated)
    }
}
