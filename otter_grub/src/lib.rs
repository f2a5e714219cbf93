//! A library for conflict-driven dependency version solving.
//!
//! otter_grub takes a root package, a root version, and a provider of package metadata, and determines an assignment of exactly one version to every transitively required package, or proves no such assignment exists --- together with a replayable explanation of why.
//!
//! otter_grub is developed to help researchers, developers, or anyone curious, to investigate version solvers, whether as a novice or through implementing novel ideas.
//!
//! Some guiding principles of otter_grub are:
//! - Modularity, with databases, procedures, and structures kept apart.
//! - Documentation, of both implementation and theory.
//! - Abstraction at the boundary: packages, versions, and sets of versions are caller-supplied types.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context](crate::context).
//!
//! Contexts are built with a [configuration](crate::config), and knowledge of packages is supplied through a [DependencyProvider](crate::provider::DependencyProvider).
//!
//! Internally, and at a high-level, a resolution is viewed in terms of manipulation of, and relationships between, a handful of databases which instantiate core theoretical objects.
//! Notably:
//! - Facts about which combinations of versions cannot hold are stored in an [incompatibility database](crate::db::incompatibility).
//! - The record of decisions and their consequences is stored on a [trail](crate::db::trail).
//! - Packages are interned in a [package database](crate::db::package), which also summarises the status of each package on the trail.
//!
//! Consequences follow the current assignments and the recorded incompatibilities, which in turn lead to revised assignments and/or fresh incompatibilities, from which further consequences follow.
//!
//! Useful starting points, then, may be:
//! - The high-level [resolution procedure](crate::procedures::solve) to inspect the dynamics of a resolution.
//! - The [database module](crate::db) to inspect the data considered during a resolution.
//! - The [structures](crate::structures) to familiarise yourself with the abstract elements of a resolution and their representation (terms, incompatibilities, etc.)
//! - The [reports](crate::reports) to see how a failed resolution is explained.
//!
//! # Example
//!
//! ```rust
//! use otter_grub::provider::OfflineProvider;
//! use otter_grub::structures::version::ranges::Ranges;
//!
//! let mut registry: OfflineProvider<&str, Ranges<u32>> = OfflineProvider::default();
//! registry.add_dependencies("root", 1, [("a", Ranges::full())]);
//! registry.add_dependencies("a", 1, []);
//!
//! let solution = otter_grub::resolve(&registry, "root", 1).unwrap();
//! assert_eq!(solution["a"], 1);
//! ```
//!
//! # Literature
//!
//! The core procedures follow the PubGrub algorithm, as described in the published [documentation of the algorithm](https://github.com/dart-lang/pub/blob/master/doc/solver.md), read together with the literature on conflict-driven clause-learning --- notably the [Handbook of satisfiability](https://www.iospress.com/catalog/books/handbook-of-satisfiability-2) chapters on CDCL techniques.
//! Though, the presentation given is original.

pub mod config;
pub mod context;
pub mod db;
pub mod misc;
pub mod procedures;
pub mod provider;
pub mod reports;
pub mod structures;
pub mod types;

use std::collections::BTreeMap;

use crate::{
    config::Config,
    context::Context,
    provider::DependencyProvider,
    types::err::ResolutionError,
};

/// A solution to a resolution: for each required package, the version decided for the package.
///
/// The root package appears, at the root version.
pub type Resolution<P, V> = BTreeMap<P, V>;

/// Resolves the dependencies of `version` of `package`, as known to `provider`.
///
/// A convenience over building a [Context] with the default configuration and resolving through the context.
/// Build the context by hand to configure the resolution, or to inspect the databases, counters, and state after the resolution ends.
pub fn resolve<D: DependencyProvider>(
    provider: &D,
    package: D::P,
    version: D::V,
) -> Result<Resolution<D::P, D::V>, ResolutionError<D>> {
    let mut the_context: Context<D> = Context::from_config(Config::default());
    the_context.resolve(provider, package, version)
}
