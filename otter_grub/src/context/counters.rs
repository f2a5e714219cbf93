//! Counters over the course of a resolution.

/// Counters over the course of a resolution.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counters {
    /// A count of iterations of the outer resolution loop.
    pub iterations: u64,

    /// A count of decisions made.
    pub decisions: u64,

    /// A count of derivations stored on the trail.
    pub derivations: u64,

    /// A count of conflicts observed during propagation.
    pub conflicts: u64,

    /// A count of backjumps made while resolving conflicts.
    pub backjumps: u64,

    /// A count of derived incompatibilities kept as the root cause of some conflict.
    pub learned: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            iterations: 0,
            decisions: 0,
            derivations: 0,
            conflicts: 0,
            backjumps: 0,
            learned: 0,
        }
    }
}
