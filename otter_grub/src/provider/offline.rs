/*!
A provider which serves dependencies from an in-memory registry.

Intended for tests, examples, and any setting where the full registry is cheap to hold.
The registry is plain data: packages map to versions, versions map to dependency constraints, and every answer is read off the maps.

Choices favour high versions, and packages with few remaining candidates are prioritised so the narrowest choices are made first.
A package with no remaining candidates takes the highest priority of all, as deciding the package settles part of the resolution immediately.
*/

use std::{cmp::Reverse, collections::BTreeMap, convert::Infallible};

use crate::{
    db::package::ConflictTally,
    provider::{Dependencies, DependencyConstraints, DependencyProvider},
    structures::{package::Package, version::VersionSet},
};

/// A provider which serves dependencies from an in-memory registry.
pub struct OfflineProvider<P: Package, VS: VersionSet> {
    /// For each package, for each version of the package, the dependencies of the version.
    registry: BTreeMap<P, BTreeMap<VS::V, DependencyConstraints<P, VS>>>,
}

impl<P: Package, VS: VersionSet> Default for OfflineProvider<P, VS> {
    fn default() -> Self {
        OfflineProvider {
            registry: BTreeMap::default(),
        }
    }
}

impl<P: Package, VS: VersionSet> OfflineProvider<P, VS> {
    /// Notes `version` of `package` as existing, with the given dependencies.
    ///
    /// Any dependencies previously noted for the version are replaced.
    pub fn add_dependencies<I: IntoIterator<Item = (P, VS)>>(
        &mut self,
        package: P,
        version: VS::V,
        dependencies: I,
    ) {
        let constraints: DependencyConstraints<P, VS> = dependencies.into_iter().collect();
        self.registry
            .entry(package)
            .or_default()
            .insert(version, constraints);
    }

    /// The packages noted, in order.
    pub fn packages(&self) -> impl Iterator<Item = &P> {
        self.registry.keys()
    }

    /// The versions of `package` noted, in ascending order.
    pub fn versions(&self, package: &P) -> impl DoubleEndedIterator<Item = &VS::V> {
        self.registry
            .get(package)
            .into_iter()
            .flat_map(|versions| versions.keys())
    }

    /// The dependencies noted for `version` of `package`, if any were noted.
    pub fn dependencies(
        &self,
        package: &P,
        version: &VS::V,
    ) -> Option<&DependencyConstraints<P, VS>> {
        self.registry.get(package)?.get(version)
    }
}

impl<P: Package, VS: VersionSet> DependencyProvider for OfflineProvider<P, VS> {
    type P = P;
    type V = VS::V;
    type VS = VS;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = Infallible;

    /// Packages without a candidate are prioritised above all, then contentious packages, then packages with few candidates.
    fn prioritize(&self, package: &P, set: &VS, conflicts: &ConflictTally) -> Self::Priority {
        let candidates = self
            .versions(package)
            .filter(|version| set.contains(version))
            .count();

        match candidates {
            0 => (u32::MAX, Reverse(0)),
            _ => (conflicts.total(), Reverse(candidates)),
        }
    }

    /// The highest noted version within `set`, if noted.
    fn choose_version(&self, package: &P, set: &VS) -> Result<Option<VS::V>, Infallible> {
        Ok(self
            .versions(package)
            .rev()
            .find(|version| set.contains(version))
            .cloned())
    }

    fn get_dependencies(
        &self,
        package: &P,
        version: &VS::V,
    ) -> Result<Dependencies<P, VS, String>, Infallible> {
        Ok(match self.dependencies(package, version) {
            Some(constraints) => Dependencies::Known(constraints.clone()),
            None => Dependencies::Unknown(format!("{package} {version} is not in the registry")),
        })
    }
}
