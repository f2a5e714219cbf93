/*!
Analysis of a satisfied incompatibility.

Takes the key of an incompatibility whose terms are all implied by the trail --- a conflict --- and applies [resolution](crate::structures::incompatibility::Incompatibility::prior_cause) between the incompatibility and the causes of the assignments which satisfied it, until an incompatibility is found which asserts some term at an earlier decision level.

For the method, see [resolve_conflict](Context::resolve_conflict).

# The satisfier search

The *satisfier* of a term is the earliest assignment at which the accumulated term of the package implies the term, and the satisfier of an incompatibility is the latest satisfier among its terms.
The *previous satisfier level* is the latest level at which every other term --- including the part of the satisfier package's own accumulation made without the satisfier --- is implied, clamped to at least the first decision level.

Two cases follow:

- The satisfier sits at a level strictly above the previous satisfier level.
  Then the incompatibility asserts the negation of the satisfier package's term at the previous satisfier level: a [backjump](crate::procedures::backjump) to the previous satisfier level is made --- possibly unmaking several decisions at once --- the forced term is stored as a derivation, and propagation resumes.
- The satisfier and the previous satisfier share a level.
  Then resolution between the incompatibility and the cause of the satisfier eliminates the satisfier package, and the search repeats with the resolvent.

Each resolution step stores a fresh incompatibility, and each backjump strictly lowers the decision level, so analysis terminates whenever the space of decisions is finite.

An incompatibility which rules against the root requirement alone cannot be escaped by unmaking decisions, and ends the resolution as [Failed](crate::context::ResolutionState::Failed).

# Implementation

Searching for a satisfier reads the intersections recorded on each [assignment](crate::structures::assignment) rather than recomputing prefixes of the trail: along the positions bounding a package the accumulated term only shrinks, so 'implies the term' is monotone along the positions, and the earliest implication point is found by binary search.
*/

use std::cmp;

use crate::{
    context::{Context, ResolutionState},
    db::{IncompatibilityKey, LevelIndex},
    misc::log::targets::{self},
    provider::DependencyProvider,
    structures::{
        assignment,
        incompatibility::Incompatibility,
        package::{PackageId, ROOT_PACKAGE},
        term::Term,
    },
};

/// Possible 'Ok' results from analysis of a conflict.
pub enum AnalysisOk {
    /// Analysis produced an incompatibility asserting a term at an earlier level, backjumped, and stored the forced derivation.
    AssertingIncompatibility {
        /// The key of the asserting incompatibility.
        key: IncompatibilityKey,

        /// The package whose term the incompatibility forces.
        package: PackageId,
    },

    /// The conflict holds regardless of any decision: the requirements are unsatisfiable.
    FundamentalConflict {
        /// The key of an incompatibility refuting the root requirement.
        key: IncompatibilityKey,
    },
}

/// The outcome of a satisfier search, relative to the previous satisfier level.
pub(crate) enum SatisfierSearch {
    /// The satisfier sits strictly above the previous satisfier level, so the incompatibility asserts a term there.
    DifferentLevels {
        /// The previous satisfier level, the target of the backjump.
        previous_level: LevelIndex,
    },

    /// The satisfier and previous satisfier share a level, so resolution against the satisfier's cause is required.
    SameLevel {
        /// The cause of the satisfying assignment.
        cause: IncompatibilityKey,
    },
}

impl<D: DependencyProvider> Context<D> {
    /// Resolves the conflict witnessed by the satisfied incompatibility at `conflict`.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub(crate) fn resolve_conflict(&mut self, conflict: IncompatibilityKey) -> AnalysisOk {
        log::info!(target: targets::ANALYSIS, "Analysis of {conflict} at level {}", self.trail.level());

        let root_version = self
            .root_version
            .clone()
            .expect("! Analysis without a resolution under way");

        let culprits: Vec<PackageId> = self.incompatibility_db.get(&conflict).packages().collect();
        for &culprit in &culprits {
            self.package_db.summary_mut(culprit).conflicts.as_culprit += 1;
        }

        let mut current = conflict;

        loop {
            if self
                .incompatibility_db
                .get(&current)
                .is_terminal(ROOT_PACKAGE, &root_version)
            {
                log::info!(target: targets::ANALYSIS, "{current} refutes the root requirement");
                self.state = ResolutionState::Failed(current);
                return AnalysisOk::FundamentalConflict { key: current };
            }

            let (package, search) = self.satisfier_search(&current);

            match search {
                SatisfierSearch::DifferentLevels { previous_level } => {
                    let term = self
                        .incompatibility_db
                        .get(&current)
                        .get(package)
                        .expect("! A satisfier of an unmentioned package")
                        .negate();

                    log::info!(
                        target: targets::ANALYSIS,
                        "{current} forces p{package} {term} at level {previous_level}"
                    );

                    self.backjump(previous_level);

                    if current != conflict {
                        self.incompatibility_db.list(current);
                        self.counters.learned += 1;

                        let affected: Vec<PackageId> = self
                            .incompatibility_db
                            .get(&current)
                            .packages()
                            .filter(|mentioned| !culprits.contains(mentioned))
                            .collect();
                        for package in affected {
                            self.package_db.summary_mut(package).conflicts.as_affected += 1;
                        }
                    }

                    self.add_derivation(package, term, current);

                    // The backjump emptied the buffer, so propagation resumes from the forced package alone.
                    self.propagation_buffer.push(package);

                    return AnalysisOk::AssertingIncompatibility {
                        key: current,
                        package,
                    };
                }

                SatisfierSearch::SameLevel { cause } => {
                    let resolvent = {
                        let conflicting = self.incompatibility_db.get(&current);
                        let satisfier_cause = self.incompatibility_db.get(&cause);
                        Incompatibility::prior_cause(
                            (current, conflicting),
                            (cause, satisfier_cause),
                            package,
                        )
                    };

                    log::trace!(
                        target: targets::ANALYSIS,
                        "Resolvent of {current} and {cause} on p{package}: {resolvent}"
                    );

                    current = self.incompatibility_db.store(resolvent);
                }
            }
        }
    }

    /// The satisfier of the incompatibility at `key`, relative to the previous satisfier level.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub(crate) fn satisfier_search(
        &self,
        key: &IncompatibilityKey,
    ) -> (PackageId, SatisfierSearch) {
        let incompatibility = self.incompatibility_db.get(key);

        // For each term, the earliest position at which the trail settles the term.
        let mut implications: Vec<(PackageId, usize)> = Vec::with_capacity(incompatibility.len());
        for (package, term) in incompatibility.iter() {
            implications.push((package, self.implication_position(package, &term.negate())));
        }

        let (satisfier_package, satisfier_position) = implications
            .iter()
            .copied()
            .max_by_key(|(_, position)| *position)
            .expect("! A satisfier search over an incompatibility without terms");

        let satisfier = &self.trail.assignments[satisfier_position];
        let satisfier_level = satisfier.level;

        // The satisfier package's own implication point, with the satisfier's contribution removed.
        let contribution = match &satisfier.source {
            assignment::Source::Decision { version } => Term::exact(version.clone()),
            assignment::Source::Derivation { term, .. } => term.clone(),
        };
        let satisfied_term = incompatibility
            .get(satisfier_package)
            .expect("! A satisfier of an unmentioned package");
        let remainder = contribution.intersection(&satisfied_term.negate());

        let previous_position = implications
            .iter()
            .filter(|(package, _)| *package != satisfier_package)
            .map(|(_, position)| *position)
            .chain(std::iter::once(
                self.implication_position(satisfier_package, &remainder),
            ))
            .max()
            .expect("! A satisfier search over an incompatibility without terms");

        let previous_level = cmp::max(1, self.trail.assignments[previous_position].level);

        if previous_level < satisfier_level {
            (
                satisfier_package,
                SatisfierSearch::DifferentLevels {
                    previous_level,
                },
            )
        } else {
            let cause = satisfier
                .cause()
                .expect("! A decision as the pivot of same-level analysis");
            (satisfier_package, SatisfierSearch::SameLevel { cause })
        }
    }

    /// The earliest position at which the accumulated term of `package` rules out `excluded`.
    ///
    /// # Soundness
    /// Some position must rule the term out --- as holds of each term of a satisfied incompatibility, negated.
    fn implication_position(&self, package: PackageId, excluded: &Term<D::VS>) -> usize {
        let positions = &self.package_db.summary(package).positions;

        let index = positions.partition_point(|&position| {
            !self.trail.assignments[position]
                .accumulated
                .is_disjoint(excluded)
        });

        match positions.get(index) {
            Some(&position) => position,
            None => panic!("! No implication point for p{package}"),
        }
    }
}
