/*!
Incompatibilities: sets of terms which cannot all hold.

An incompatibility is a mapping from packages to [terms](crate::structures::term), asserting the terms cannot all be simultaneously true.
For example, 'a depends on b at 2' is carried by the incompatibility `{a: ==1, b: not ( ==2 )}` --- a cannot be at 1 with b away from 2.

There are two kinds of incompatibility:
- *External* incompatibilities are axioms, true independent of the resolution which recorded them: the shape of the root, the absence of versions, a dependency, or an unavailability opaque to the engine.
- *Derived* incompatibilities are consequences of two recorded incompatibilities, obtained by [resolution](Incompatibility::prior_cause) on a shared package.

Every derived incompatibility holds the keys of its two causes, so the collection of incompatibilities recorded during a resolution forms a directed acyclic graph with external incompatibilities as leaves.
The graph rooted at any incompatibility is a complete, replayable proof of that incompatibility, and on an unsatisfiable instance the proof of the root incompatibility is exported as a [derivation tree](crate::reports).

# Notes
- Packages appear interned, as [PackageId]s.
  External identities are recovered through the [package database](crate::db::package) at the report boundary.
- The terms of an incompatibility are kept in a fixed order, so every inspection of an incompatibility is deterministic.
*/

use std::fmt;

use crate::db::IncompatibilityKey;
use crate::structures::package::PackageId;
use crate::structures::term::{self, Term};
use crate::structures::version::VersionSet;

/// The source of an incompatibility.
#[derive(Clone, Debug)]
pub enum Source<VS: VersionSet, M> {
    /// Axiom: versions of the root package other than the root version are never selected.
    NotRoot {
        /// The root package.
        package: PackageId,

        /// The root version.
        version: VS::V,
    },

    /// Axiom: no version of the package in the set exists.
    NoVersions {
        /// The package.
        package: PackageId,

        /// The set in which no version exists.
        set: VS,
    },

    /// Axiom: selecting a version of `package` in `set` requires a version of `dependency` in `dependency_set`.
    Dependency {
        /// The depending package.
        package: PackageId,

        /// The versions of the depending package which carry the dependency.
        set: VS,

        /// The package depended on.
        dependency: PackageId,

        /// The versions which meet the dependency.
        dependency_set: VS,
    },

    /// Axiom: versions of the package in the set are unavailable, for a reason opaque to the engine.
    Unavailable {
        /// The package.
        package: PackageId,

        /// The unavailable versions.
        set: VS,

        /// The reason given by the provider.
        reason: M,
    },

    /// Derived by resolving the two recorded causes on a shared package.
    Derived {
        /// One cause.
        cause1: IncompatibilityKey,

        /// The other cause.
        cause2: IncompatibilityKey,
    },
}

/// A set of terms over distinct packages which cannot all hold, together with its source.
#[derive(Clone, Debug)]
pub struct Incompatibility<VS: VersionSet, M> {
    /// The terms of the incompatibility, keyed by package, in a fixed order.
    terms: Vec<(PackageId, Term<VS>)>,

    /// Where the incompatibility came from.
    source: Source<VS, M>,
}

/// The relation of an incompatibility to a collection of observed terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Every term is satisfied: the incompatibility witnesses a conflict.
    Satisfied,

    /// The term for the given package is contradicted, so the incompatibility cannot bite.
    Contradicted(PackageId),

    /// Every term other than the term for the given package is satisfied.
    AlmostSatisfied(PackageId),

    /// No stronger relation holds.
    Inconclusive,
}

impl<VS: VersionSet, M> Incompatibility<VS, M> {
    /// Axiom: versions of the root package other than the root version are never selected.
    ///
    /// In effect, the axiom forces the root decision and starts the resolution.
    pub fn not_root(package: PackageId, version: VS::V) -> Self {
        Self {
            terms: vec![(package, Term::Negative(VS::singleton(version.clone())))],
            source: Source::NotRoot { package, version },
        }
    }

    /// Axiom: no version of `package` in `set` exists.
    pub fn no_versions(package: PackageId, set: VS) -> Self {
        Self {
            terms: vec![(package, Term::Positive(set.clone()))],
            source: Source::NoVersions { package, set },
        }
    }

    /// Axiom: versions of `package` in `set` are unavailable for reason `reason`.
    pub fn unavailable(package: PackageId, set: VS, reason: M) -> Self {
        Self {
            terms: vec![(package, Term::Positive(set.clone()))],
            source: Source::Unavailable {
                package,
                set,
                reason,
            },
        }
    }

    /// Axiom: selecting a version of `package` in `set` requires a version of `dependency` in `dependency_set`.
    ///
    /// An empty dependency set leaves only the positive term: no selection from `set` can ever meet the requirement.
    pub fn dependency(
        package: PackageId,
        set: VS,
        dependency: PackageId,
        dependency_set: VS,
    ) -> Self {
        let mut terms = vec![(package, Term::Positive(set.clone()))];
        if dependency_set != VS::empty() {
            terms.push((dependency, Term::Negative(dependency_set.clone())));
        }

        Self {
            terms,
            source: Source::Dependency {
                package,
                set,
                dependency,
                dependency_set,
            },
        }
    }

    /// The resolvent of `conflict` and `satisfier_cause` on the shared package `pivot`.
    ///
    /// Terms for packages other than the pivot are intersected across the two causes.
    /// The two terms for the pivot are unioned, and the union is kept only if informative --- a union true on every evaluation drops out, which is what eliminates the pivot from the learned incompatibility.
    pub fn prior_cause(
        conflict: (IncompatibilityKey, &Self),
        satisfier_cause: (IncompatibilityKey, &Self),
        pivot: PackageId,
    ) -> Self {
        let (conflict_key, conflict) = conflict;
        let (cause_key, cause) = satisfier_cause;

        let mut terms: Vec<(PackageId, Term<VS>)> =
            Vec::with_capacity(conflict.terms.len() + cause.terms.len());

        for (package, term) in &conflict.terms {
            if *package != pivot {
                terms.push((*package, term.clone()));
            }
        }

        for (package, cause_term) in &cause.terms {
            if *package == pivot {
                continue;
            }
            match terms.iter_mut().find(|(seen, _)| seen == package) {
                Some((_, term)) => *term = term.intersection(cause_term),
                None => terms.push((*package, cause_term.clone())),
            }
        }

        let pivot_union = match (conflict.get(pivot), cause.get(pivot)) {
            (Some(conflict_term), Some(cause_term)) => conflict_term.union(cause_term),
            _ => panic!("! Resolution without a pivot"),
        };
        if pivot_union != Term::any() {
            terms.push((pivot, pivot_union));
        }

        Self {
            terms,
            source: Source::Derived {
                cause1: conflict_key,
                cause2: cause_key,
            },
        }
    }

    /// The term for `package`, if the incompatibility mentions it.
    pub fn get(&self, package: PackageId) -> Option<&Term<VS>> {
        self.terms
            .iter()
            .find(|(mentioned, _)| *mentioned == package)
            .map(|(_, term)| term)
    }

    /// The packages and terms of the incompatibility, in order.
    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Term<VS>)> {
        self.terms.iter().map(|(package, term)| (*package, term))
    }

    /// The packages mentioned by the incompatibility, in order.
    pub fn packages(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.terms.iter().map(|(package, _)| *package)
    }

    /// The number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the incompatibility has no terms.
    ///
    /// An incompatibility without terms asserts a conflict no assignment avoids.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The source of the incompatibility.
    pub fn source(&self) -> &Source<VS, M> {
        &self.source
    }

    /// The causes, if the incompatibility is derived.
    pub fn causes(&self) -> Option<(IncompatibilityKey, IncompatibilityKey)> {
        match self.source {
            Source::Derived { cause1, cause2 } => Some((cause1, cause2)),
            _ => None,
        }
    }

    /// Whether the incompatibility alone settles the resolution.
    ///
    /// Holds when the incompatibility has no terms, or when its only term rules against the root.
    pub fn is_terminal(&self, root: PackageId, root_version: &VS::V) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [(package, term)] => *package == root && term.contains(root_version),
            _ => false,
        }
    }

    /// The relation of the incompatibility to the observed terms given by `observed`.
    ///
    /// `observed` maps a package to the intersection of every term recorded for it, or none if nothing is recorded --- equivalent to observing [Term::any], which satisfies no non-trivial term.
    pub fn relation<'t>(&self, observed: impl Fn(PackageId) -> Option<&'t Term<VS>>) -> Relation
    where
        VS: 't,
    {
        let mut relation = Relation::Satisfied;

        for (package, term) in self.iter() {
            match observed(package).map(|observed_term| term.relation_with(observed_term)) {
                Some(term::Relation::Satisfied) => {}

                Some(term::Relation::Contradicted) => {
                    return Relation::Contradicted(package);
                }

                None | Some(term::Relation::Inconclusive) => {
                    if relation == Relation::Satisfied {
                        relation = Relation::AlmostSatisfied(package);
                    } else {
                        relation = Relation::Inconclusive;
                    }
                }
            }
        }

        relation
    }
}

impl<VS: VersionSet, M> fmt::Display for Incompatibility<VS, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (package, term)) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "p{package}: {term}")?;
        }
        write!(f, "}}")
    }
}
