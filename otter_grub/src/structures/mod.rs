//! Key structures, such as terms and incompatibilities.
//!
//! Most structures pair a trait capturing what the engine relies on with a canonical implementation of the trait.
//! The engine itself only touches the traits --- which packages, versions, and sets of versions concretely are is fixed by the caller through a [provider](crate::provider).
//!
//! # Statements about packages
//!
//! Everything the engine knows is a statement about which version of a package, if any, is selected:
//!
//! - A [version set](version) collects versions of interest, through an algebra of complement and intersection.
//! - A [term](term) qualifies a version set with a polarity, and is the atomic statement of the library.
//! - An [incompatibility](incompatibility) is a set of terms over distinct packages which cannot all hold.
//! - An [assignment](assignment) binds a package to a term, by decision or by derivation.
//!
//! A resolution, then, is a search for a set of decisions whose induced assignments leave every recorded incompatibility unsatisfied.

pub mod assignment;
pub mod incompatibility;
pub mod package;
pub mod term;
pub mod version;
