//! Recovery from a conflict.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and [analysis](crate::procedures::analysis) produced an incompatibility which asserts some term at level *l - i*.
//! In this case, all decisions and all derivations above level *l - i* are unmade --- the trail is truncated, and the per-package summaries are rewound to the surviving prefix.
//!
//! The accumulated term of each package is read from the most recent surviving assignment bounding the package, so no recomputation is needed: the recorded intersections of the surviving prefix are exactly the intersections which would be recorded by replaying the prefix.
//!
//! Cached contradictions observed above the target level are evicted, as the assignments they rest on are gone.
//! Likewise, the cached priority of each package with an unmade assignment is dropped, as the set a decision would be made from may be rebuilt differently after the jump.
//! And, any packages pending propagation are dropped --- the terms which put them in the buffer may no longer be on the trail.
//!
//! # Soundness
//!
//! The target level must be equal to or lower than the current level.
//! Still, passing a target level greater than the current level is safe --- nothing will happen.

use crate::{
    context::Context,
    db::LevelIndex,
    misc::log::targets::{self},
    provider::DependencyProvider,
};

impl<D: DependencyProvider> Context<D> {
    /// Backjumps to the given target level.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub(crate) fn backjump(&mut self, target: LevelIndex) {
        log::info!(target: targets::BACKJUMP, "Backjump from {} to {}", self.trail.level(), target);

        let removed = self.trail.clear_assigments_above(target);
        if removed.is_empty() {
            return;
        }

        for assignment in &removed {
            let summary = self.package_db.summary_mut(assignment.package);
            summary.positions.pop();
            if assignment.is_decision() {
                summary.decision = None;
            }

            // A later derivation may rebuild a different set under the same stamp.
            if let Some(priority) = self.priorities.get_mut(assignment.package as usize) {
                *priority = None;
            }
        }

        self.contradicted.retain(|_, level| *level <= target);
        self.propagation_buffer.clear();

        self.counters.backjumps += 1;
        self.backjump_made = true;
    }
}
