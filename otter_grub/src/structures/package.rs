/*!
(The internal representation of) a package.

Broadly, packages are things with an identity to which assigning a version is of interest.
- 'External' packages are whatever the caller uses to identify a unit of dependency --- a string, an index into a registry, a rich key, etc.
- 'Internal' packages are used internal to a context.

Each (internal) package is a u32 *u* such that either:
- *u* is 0, and identifies the root of the resolution, or:
- *u - 1* is a package.

That is, the packages of a resolution are [0..*m*) for some *m*, in the order the resolution first encountered them.

This representation allows packages to be used as the indices of a structure, e.g. `summaries[p]`, without taking too much space, and makes 'first encountered' an explicit, inspectable ordering.

# Notes
- The external representation of a package is stored in the [package database](crate::db::package).
- Identifiers are never reused within a resolution, and never invalidated before the context is cleared.
*/

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Anything usable as the external identity of a package.
///
/// The bounds are those required somewhere in the library:
/// - [Clone] + [Eq] + [Hash] to intern identities in the package database.
/// - [Ord] so collections of dependencies iterate in a fixed order, keeping resolutions deterministic.
/// - [Debug] + [Display] for logs and reports.
pub trait Package: Clone + Eq + Ord + Hash + Debug + Display {}

impl<P: Clone + Eq + Ord + Hash + Debug + Display> Package for P {}

/// A package, interned.
pub type PackageId = u32;

/// The package `0` is fixed internally as the root of the resolution.
pub const ROOT_PACKAGE: PackageId = 0;
