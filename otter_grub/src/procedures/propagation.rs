/*!
Unit propagation of assignments through the recorded incompatibilities.

See [Context::propagate] for the relevant context method.

# Overview

Propagation derives every consequence of the current assignments with respect to the recorded incompatibilities, as a fixed-point iteration over a buffer of packages whose accumulated term has changed.

For a changed package, each incompatibility on the [mention list](crate::db::incompatibility) of the package is related to the trail:

- *Almost satisfied*, with a single term unsettled: the negation of the unsettled term is forced, and is stored as a derivation with the incompatibility as cause.
  The derivation changes the accumulated term of its package, so the package joins the buffer.
- *Satisfied*: the incompatibility witnesses a conflict, and propagation pauses for [analysis](crate::procedures::analysis).
  Analysis either refutes the root requirement --- ending propagation, and the resolution --- or learns a fresh incompatibility, backjumps, and restocks the buffer with the single package whose term the learned incompatibility forces.
- *Contradicted*: the incompatibility cannot bite on any extension of the trail, and the key is cached so inspection is skipped until a backjump clears the contradicting assignment.
- *Inconclusive*: nothing follows, for now.

Mention lists are walked most recent first, so facts learned from conflicts --- typically the sharpest --- are related before the axioms which seeded them.

# Complications

A borrow of the incompatibility under relation conflicts with the mutable borrow needed to store a derivation, so the relation of each incompatibility is settled before the trail is revised.
And, as analysis truncates both the trail and the propagation buffer, a conflict abandons the walk of the current mention list rather than resuming at a stale index.
*/

use crate::{
    context::{Context, ResolutionState},
    db::IncompatibilityKey,
    misc::log::targets::{self},
    procedures::analysis::AnalysisOk,
    provider::DependencyProvider,
    structures::incompatibility::{Incompatibility, Relation},
};

/// Possible 'Ok' results from propagation.
pub enum PropagationOk {
    /// Every consequence of the current assignments is on the trail, without conflict.
    FixedPoint,

    /// A conflict was derived with no decision to unmake: the requirements are unsatisfiable.
    ///
    /// The key indexes an incompatibility refuting the root requirement.
    FundamentalConflict(IncompatibilityKey),
}

impl<D: DependencyProvider> Context<D> {
    /// Propagates packages in the buffer until the buffer is exhausted or a conflict refutes the root requirement.
    ///
    /// For documentation, see [procedures::propagation](crate::procedures::propagation).
    pub(crate) fn propagate(&mut self) -> PropagationOk {
        'changed_packages: while let Some(package) = self.propagation_buffer.pop() {
            log::trace!(target: targets::PROPAGATION, "Propagating p{package}");

            // The mention list may grow during the walk. Only the keys listed now are related.
            let mut index = self.incompatibility_db.mentioning(package).len();

            while index > 0 {
                index -= 1;
                let key = self.incompatibility_db.mentioning(package)[index];

                if self.contradicted.contains_key(&key) {
                    continue;
                }

                let relation = {
                    let incompatibility = self.incompatibility_db.get(&key);
                    incompatibility.relation(|mentioned| self.accumulated(mentioned))
                };

                match relation {
                    Relation::Satisfied => {
                        log::info!(target: targets::PROPAGATION, "Conflict at {key} on p{package}");
                        self.counters.conflicts += 1;

                        match self.resolve_conflict(key) {
                            AnalysisOk::AssertingIncompatibility { .. } => {
                                // Analysis restocked the buffer after a backjump.
                                continue 'changed_packages;
                            }

                            AnalysisOk::FundamentalConflict { key } => {
                                debug_assert!(matches!(
                                    self.state,
                                    ResolutionState::Failed(failure) if failure == key
                                ));
                                return PropagationOk::FundamentalConflict(key);
                            }
                        }
                    }

                    Relation::AlmostSatisfied(unsettled) => {
                        let term = self
                            .incompatibility_db
                            .get(&key)
                            .get(unsettled)
                            .expect("! An unsettled term of an unmentioned package")
                            .negate();

                        self.add_derivation(unsettled, term, key);

                        if !self.propagation_buffer.contains(&unsettled) {
                            self.propagation_buffer.push(unsettled);
                        }
                    }

                    Relation::Contradicted(_) => {
                        self.contradicted.insert(key, self.trail.level());
                    }

                    Relation::Inconclusive => {}
                }
            }
        }

        PropagationOk::FixedPoint
    }

    /// Whether every term of `incompatibility` is implied by the corresponding accumulated term on the trail.
    pub fn satisfies(&self, incompatibility: &Incompatibility<D::VS, D::M>) -> bool {
        incompatibility.relation(|package| self.accumulated(package)) == Relation::Satisfied
    }

    /// The relation of the incompatibility at `key` to the trail.
    pub fn relation(&self, key: &IncompatibilityKey) -> Relation {
        self.incompatibility_db
            .get(key)
            .relation(|package| self.accumulated(package))
    }
}
