//! Determines an assignment of versions to the packages required by a root package, or that no such assignment exists.
//!
//! # Overview
//!
//! [resolve](crate::context::Context::resolve) casts conflict-driven version solving as a pair of nested loops over the [context](crate::context):
//!
//! - The inner loop --- [propagation](crate::procedures::propagation) --- derives every consequence of the current assignments with respect to the recorded incompatibilities.
//!   + A conflict found during propagation is passed through [analysis](crate::procedures::analysis), which either refutes the root requirement or learns a fresh incompatibility and [backjumps](crate::procedures::backjump).
//! - The outer loop --- here --- takes propagation at a fixed point and either:
//!   + Ends the resolution as solved, if no package awaits a decision, or:
//!   + Makes a [decision](crate::procedures::decision) for the highest-priority package awaiting one, and returns to propagation.
//!
//! Roughly, the loop is as diagrammed:
//!
//! ```none
//!           +---------------+
//!   +-------| make_decision |------> solved, if no package awaits a decision
//!   |       +---------------+
//!   |               ⌃
//!   |               | at a fixed point, without conflict
//!   ⌄       +---------------+
//! --------->|   propagate   |------> failed, if a conflict refutes the root requirement
//!           +---------------+
//! ```
//!
//! The provider is polled for cancellation once per outer iteration, before a decision is made.
//! An error from the poll --- or from any other provider call --- ends the resolution with the error, and without any retry.
//!
//! # Example
//!
//! ```rust
//! # use otter_grub::config::Config;
//! # use otter_grub::context::{Context, ResolutionState};
//! # use otter_grub::provider::OfflineProvider;
//! # use otter_grub::structures::version::ranges::Ranges;
//! let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
//! provider.add_dependencies("a", 1, [("b", Ranges::between(1, 3))]);
//! provider.add_dependencies("b", 1, []);
//! provider.add_dependencies("b", 2, []);
//!
//! let mut the_context = Context::from_config(Config::default());
//! let solution = the_context.resolve(&provider, "a", 1).unwrap();
//!
//! assert_eq!(the_context.state, ResolutionState::Solved);
//! assert_eq!(solution[&"b"], 2);
//! ```

use crate::{
    Resolution,
    context::{Context, ResolutionState},
    procedures::{decision::DecisionOk, propagation::PropagationOk},
    provider::DependencyProvider,
    structures::{incompatibility::Incompatibility, package::ROOT_PACKAGE},
    types::err::ResolutionError,
};

impl<D: DependencyProvider> Context<D> {
    /// Resolves the dependencies of `version` of `package`, as known to `provider`.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    pub fn resolve(
        &mut self,
        provider: &D,
        package: D::P,
        version: D::V,
    ) -> Result<Resolution<D::P, D::V>, ResolutionError<D>> {
        if self.state != ResolutionState::Input {
            self.refresh();
        }

        let root = self.package_db.intern(&package);
        debug_assert_eq!(root, ROOT_PACKAGE);

        // The not-root axiom forces the root decision, and with it the first propagation.
        self.root_version = Some(version.clone());
        self.record_incompatibility(Incompatibility::not_root(root, version));
        self.propagation_buffer.push(root);
        self.state = ResolutionState::Propagating;

        loop {
            self.counters.iterations += 1;

            match self.propagate() {
                PropagationOk::FixedPoint => {}

                PropagationOk::FundamentalConflict(key) => {
                    let mut tree = self.derivation_tree(key);
                    if self.config.collapse_unavailable {
                        tree.collapse_unavailable();
                    }
                    return Err(ResolutionError::NoSolution(Box::new(tree)));
                }
            }

            self.state = ResolutionState::NeedsDecision;

            if let Err(source) = provider.should_cancel() {
                return Err(ResolutionError::Cancelled(source));
            }

            match self.make_decision(provider)? {
                DecisionOk::Made => {
                    self.state = ResolutionState::Propagating;
                }

                DecisionOk::Exhausted => {
                    self.state = ResolutionState::Solved;
                    return Ok(self.solution());
                }
            }
        }
    }
}
