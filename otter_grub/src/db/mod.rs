//! Databases for holding information relevant to a resolution.
//!
//!   - [The package database](crate::db::package)
//!     + Interned packages, each indexed by a package id. \
//!       And, for each package, a summary of the packages status on the trail:
//!       * The positions of assignments bounding the package.
//!       * The decision made for the package, if made.
//!       * A tally of the conflicts the package has contributed to.
//!
//!   - [The incompatibility database](crate::db::incompatibility)
//!     + An arena of incompatibilities, each indexed by an incompatibility key. \
//!       From an external perspective there are two important kinds of incompatibility:
//!       * External incompatibilities \
//!         External incompatibilities record facts obtained from outside a resolution (e.g. the dependencies of some version of a package). \
//!         The collection of external incompatibilities is the ground against which a resolution is justified.
//!       * Derived incompatibilities \
//!         Incompatibilities added to the context by resolution between two established incompatibilities.
//!         Every derived incompatibility is a consequence of the collection of external incompatibilities.
//!
//!   - [The trail](crate::db::trail)
//!     + The chronological record of assignments, partitioned into decision levels.

pub mod incompatibility;
mod keys;
pub use keys::*;
pub mod package;
pub mod trail;

/// The index of a [decision level](crate::db::trail).
pub type LevelIndex = u32;
