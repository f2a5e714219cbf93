//! Error types used in the library.
//!
//! - Some of these are expected during use --- e.g. a [NoSolution](ResolutionError::NoSolution) error is the canonical outcome of a resolution over conflicting requirements, and carries a full explanation of the conflict.
//! - Some of these wrap an error raised by a provider --- these pass through the engine without inspection, and without any retry.
//! - None of these cover a broken precondition, such as a version set algebra without canonical representations.
//!   Preconditions are documented where assumed, and a resolution over broken preconditions may panic.

use std::fmt;

use crate::{provider::DependencyProvider, reports::DerivationTree};

/// Errors which may end a resolution.
pub enum ResolutionError<D: DependencyProvider> {
    /// No assignment of versions satisfies the root requirements.
    ///
    /// The tree carried is a complete derivation of the conflict from external incompatibilities.
    /// This is an answer, not a fault --- though as most callers want a solution, the answer is delivered as an error.
    NoSolution(Box<DerivationTree<D::P, D::VS, D::M>>),

    /// The provider failed while retrieving the dependencies of a version of a package.
    Retrieval {
        /// The package whose dependencies were requested.
        package: D::P,

        /// The version whose dependencies were requested.
        version: D::V,

        /// The error raised by the provider.
        source: D::Err,
    },

    /// The provider failed while choosing a version of a package.
    ///
    /// Note, a provider with versions to offer but none suitable returns [None](crate::provider::DependencyProvider::choose_version) rather than an error.
    Choice {
        /// The package for which a version was requested.
        package: D::P,

        /// The error raised by the provider.
        source: D::Err,
    },

    /// The provider called off the resolution.
    ///
    /// Distinct from [NoSolution](ResolutionError::NoSolution), as nothing is settled about the requirements.
    Cancelled(D::Err),

    /// The provider listed a version of a package as depending on the package itself.
    SelfDependency {
        /// The package.
        package: D::P,

        /// The version listed as depending on its own package.
        version: D::V,
    },
}

impl<D: DependencyProvider> fmt::Display for ResolutionError<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoSolution(_) => write!(f, "No version assignment satisfies the requirements"),

            Self::Retrieval { package, version, .. } => {
                write!(f, "Failed to retrieve the dependencies of {package} {version}")
            }

            Self::Choice { package, .. } => {
                write!(f, "Failed to choose a version of {package}")
            }

            Self::Cancelled(_) => write!(f, "The resolution was called off by the provider"),

            Self::SelfDependency { package, version } => {
                write!(f, "{package} {version} depends on itself")
            }
        }
    }
}

impl<D: DependencyProvider> fmt::Debug for ResolutionError<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoSolution(tree) => f.debug_tuple("NoSolution").field(tree).finish(),

            Self::Retrieval {
                package,
                version,
                source,
            } => f
                .debug_struct("Retrieval")
                .field("package", package)
                .field("version", version)
                .field("source", source)
                .finish(),

            Self::Choice { package, source } => f
                .debug_struct("Choice")
                .field("package", package)
                .field("source", source)
                .finish(),

            Self::Cancelled(source) => f.debug_tuple("Cancelled").field(source).finish(),

            Self::SelfDependency { package, version } => f
                .debug_struct("SelfDependency")
                .field("package", package)
                .field("version", version)
                .finish(),
        }
    }
}

impl<D: DependencyProvider> std::error::Error for ResolutionError<D> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Retrieval { source, .. } | Self::Choice { source, .. } | Self::Cancelled(source) => {
                Some(source)
            }

            Self::NoSolution(_) | Self::SelfDependency { .. } => None,
        }
    }
}
