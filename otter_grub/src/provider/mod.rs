/*!
Providers: the interface between a resolution and knowledge of packages.

A resolution is driven by a [DependencyProvider], which holds all knowledge of which packages exist, which versions of those packages exist, and what those versions require.
The engine, in turn, holds all reasoning about compatibility.
The split is strict: the engine never enumerates versions, and a provider never inspects the trail.

Methods on a provider take `&self`.
A provider which caches, fetches lazily, or consults clocks does so behind interior mutability of its own choosing.

# Determinism

The engine asks, the provider answers, and a resolution is a function of the sequence of answers.
So, a provider whose answers are repeatable makes [resolve](crate::resolve) repeatable --- same solution, same explanation, same counts.

# Example

A provider serving a fixed registry from memory is included as [OfflineProvider].

```rust
# use otter_grub::provider::{DependencyProvider, OfflineProvider};
# use otter_grub::structures::version::ranges::Ranges;
let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
provider.add_dependencies("a", 1, [("b", Ranges::higher_than(2))]);
provider.add_dependencies("b", 2, []);

assert_eq!(provider.choose_version(&"b", &Ranges::full()), Ok(Some(2)));
```
*/

pub mod offline;
pub use offline::OfflineProvider;

pub use crate::db::package::ConflictTally;

use std::{collections::BTreeMap, fmt};

use crate::structures::{
    package::Package,
    version::{Version, VersionSet},
};

/// Dependency constraints: for each package required, the set of versions which meet the requirement.
pub type DependencyConstraints<P, VS> = BTreeMap<P, VS>;

/// The dependencies of a version of a package, as far as a provider knows them.
#[derive(Clone, Debug)]
pub enum Dependencies<P: Package, VS: VersionSet, M> {
    /// The dependencies are known, and are exactly those given.
    Known(DependencyConstraints<P, VS>),

    /// The dependencies are unavailable, for the reason given.
    ///
    /// A fact about the version rather than a fault of the provider: the version is ruled out of the resolution, with the reason carried into any report.
    Unknown(M),
}

/// A source of all knowledge about packages, versions, and dependencies.
pub trait DependencyProvider {
    /// The package type.
    type P: Package;

    /// The version type.
    type V: Version;

    /// The version set type, closed over the version type.
    type VS: VersionSet<V = Self::V>;

    /// The type of a reason for versions being unavailable.
    type M: Clone + Eq + fmt::Debug + fmt::Display;

    /// The priority of deciding a package, with higher priorities decided sooner.
    type Priority: Clone + Ord;

    /// The type of an error raised by the provider.
    type Err: std::error::Error + 'static;

    /// The priority of deciding a version of `package` from `set`.
    ///
    /// Called when the set of versions a decision may be made from has changed, and otherwise cached.
    /// Ties between equal priorities go to the package mentioned first during the resolution.
    fn prioritize(&self, package: &Self::P, set: &Self::VS, conflicts: &ConflictTally)
        -> Self::Priority;

    /// A version of `package` within `set`, or [None] if the provider has no such version.
    ///
    /// [None] is an answer rather than an error, and is recorded as the absence of versions in the set.
    fn choose_version(&self, package: &Self::P, set: &Self::VS)
        -> Result<Option<Self::V>, Self::Err>;

    /// The dependencies of `version` of `package`.
    ///
    /// A version must not depend on its own package, and repeated calls for the same version must agree.
    fn get_dependencies(
        &self,
        package: &Self::P,
        version: &Self::V,
    ) -> Result<Dependencies<Self::P, Self::VS, Self::M>, Self::Err>;

    /// Polled before each decision --- an error calls off the resolution.
    ///
    /// The default implementation never does.
    fn should_cancel(&self) -> Result<(), Self::Err> {
        Ok(())
    }
}
