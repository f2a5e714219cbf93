use crate::structures::{assignment::Assignment, version::VersionSet};

use super::LevelIndex;

/// A chronological record of [assignment](Assignment)s, partitioned into decision levels.
///
/// Levels are delimited by the positions of decisions.
/// Each decision opens a fresh level, and every derivation is stored at the level of the most recent decision.
/// Derivations made prior to any decision are at level zero.
pub struct Trail<VS: VersionSet> {
    pub assignments: Vec<Assignment<VS>>,
    pub level_indicies: Vec<usize>,
}

impl<VS: VersionSet> Default for Trail<VS> {
    fn default() -> Self {
        Trail {
            assignments: Vec::default(),
            level_indicies: Vec::default(),
        }
    }
}

impl<VS: VersionSet> Trail<VS> {
    /// Stores an assignment at the (current) top decision level.
    pub fn store_assignment(&mut self, assignment: Assignment<VS>) {
        self.assignments.push(assignment);
    }

    /// Opens a fresh decision level, to hold the next assignment and its consequences.
    pub fn fresh_level(&mut self) {
        self.level_indicies.push(self.assignments.len());
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// The position which the next assignment stored will occupy.
    pub fn next_position(&self) -> usize {
        self.assignments.len()
    }

    /// Removes levels above the given level index, if they exist, and returns the removed assignments.
    ///
    /// # Soundness
    /// Does not revise any per-package summary derived from the removed assignments.
    pub fn clear_assigments_above(&mut self, level: LevelIndex) -> Vec<Assignment<VS>> {
        // level_indicies stores with zero-indexing.
        // So, for example, the first level is accessed by assignments[level_indicies[0]].
        // This means, in particular, that all assignments made after level i can be cleared by splitting at assignments[level_indicies[i]].
        // And, as a corollary, that this method can not be used to clear any assignments at level zero.
        if let Some(&level_start) = self.level_indicies.get(level as usize) {
            self.level_indicies.split_off(level as usize);
            self.assignments.split_off(level_start)
        } else {
            Vec::default()
        }
    }
}
