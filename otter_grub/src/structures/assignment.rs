/*!
Assignments: entries on the trail binding a package to a term.

An assignment is either a *decision* --- the package was fixed to a concrete version --- or a *derivation* --- a term the package must satisfy, forced by some stored incompatibility.

Each assignment also records the intersection of every term recorded for its package up to and including itself.
The recorded intersections are what make searching the trail for the point at which a term became settled a per-assignment check rather than a per-assignment recomputation (see [analysis](crate::procedures::analysis)).
*/

use crate::db::{IncompatibilityKey, LevelIndex};
use crate::structures::package::PackageId;
use crate::structures::term::Term;
use crate::structures::version::VersionSet;

/// The source of an assignment.
#[derive(Clone, Debug)]
pub enum Source<VS: VersionSet> {
    /// The package was fixed to a concrete version.
    Decision {
        /// The version decided on.
        version: VS::V,
    },

    /// The term was forced by an incompatibility.
    Derivation {
        /// The term which must hold.
        term: Term<VS>,

        /// The incompatibility the term was derived from.
        cause: IncompatibilityKey,
    },
}

/// A package bound to a term at some decision level, for some reason.
#[derive(Clone, Debug)]
pub struct Assignment<VS: VersionSet> {
    /// The package the assignment is about.
    pub package: PackageId,

    /// The decision level the assignment was made at.
    pub level: LevelIndex,

    /// Why the assignment was made, and what it binds.
    pub source: Source<VS>,

    /// The intersection of every term recorded for the package, up to and including this assignment.
    pub accumulated: Term<VS>,
}

impl<VS: VersionSet> Assignment<VS> {
    /// A decision assignment, with the accumulated term pinned to exactly the decided version.
    pub fn decision(package: PackageId, level: LevelIndex, version: VS::V) -> Self {
        Assignment {
            package,
            level,
            accumulated: Term::exact(version.clone()),
            source: Source::Decision { version },
        }
    }

    /// A derivation assignment.
    pub fn derivation(
        package: PackageId,
        level: LevelIndex,
        term: Term<VS>,
        cause: IncompatibilityKey,
        accumulated: Term<VS>,
    ) -> Self {
        Assignment {
            package,
            level,
            accumulated,
            source: Source::Derivation { term, cause },
        }
    }

    /// The cause, if the assignment is a derivation.
    pub fn cause(&self) -> Option<IncompatibilityKey> {
        match &self.source {
            Source::Decision { .. } => None,
            Source::Derivation { cause, .. } => Some(*cause),
        }
    }

    /// Whether the assignment is a decision.
    pub fn is_decision(&self) -> bool {
        matches!(self.source, Source::Decision { .. })
    }
}
