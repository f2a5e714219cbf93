/*!
Versions, and sets of versions, through an abstract algebra.

The engine never inspects a concrete version or set of versions.
Instead, everything of interest is obtained through the operations of [VersionSet]: emptiness, singletons, complement, intersection, and membership, with union and the full set derived.

# Canonical representations

Subset and equality tests throughout the library are written against representations rather than denotations.
In particular, *a* is a subset of *b* is implemented as `a.intersection(b) == a`.

The following invariant must be upheld by any implementation:

<div class="warning">
Any two sets built from the offered operations which denote the same collection of versions compare equal.
</div>

The [default implementation](ranges) keeps unions of intervals in a canonical sorted form, for example.
A violation of the invariant is not detected by the engine, and resolutions made with a non-canonical algebra are undefined.

# Notes
- Within the library, sets of versions almost always appear wrapped in a [Term](crate::structures::term), qualified by a polarity.
- A total order on versions is assumed, though the engine itself only ever relies on the order for deterministic bookkeeping --- it is the algebra and the provider which interpret the order.
*/

pub mod ranges;

use std::fmt::{Debug, Display};

/// Anything usable as a version.
pub trait Version: Clone + Ord + Debug + Display {}

impl<V: Clone + Ord + Debug + Display> Version for V {}

/// A set of versions, closed under complement and intersection.
pub trait VersionSet: Clone + Eq + Debug + Display {
    /// The type of versions the set is over.
    type V: Version;

    /// The set containing no version.
    fn empty() -> Self;

    /// The set containing exactly `version`.
    fn singleton(version: Self::V) -> Self;

    /// The set containing exactly the versions not contained in `self`.
    fn complement(&self) -> Self;

    /// The set containing exactly the versions contained in both `self` and `other`.
    fn intersection(&self, other: &Self) -> Self;

    /// Whether `version` is contained in `self`.
    fn contains(&self, version: &Self::V) -> bool;

    /// The set containing every version.
    fn full() -> Self {
        Self::empty().complement()
    }

    /// The set containing exactly the versions contained in `self` or `other`, by De Morgan.
    fn union(&self, other: &Self) -> Self {
        self.complement()
            .intersection(&other.complement())
            .complement()
    }

    /// Whether every version contained in `self` is contained in `other`.
    fn subset_of(&self, other: &Self) -> bool {
        self == &self.intersection(other)
    }

    /// Whether no version is contained in both `self` and `other`.
    fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other) == Self::empty()
    }
}
