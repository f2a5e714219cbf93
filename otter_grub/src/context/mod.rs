/*!
The context --- to which the answers of a provider are recorded and within which resolutions take place.

A context pairs the three databases of a resolution --- [packages](crate::db::package), [incompatibilities](crate::db::incompatibility), and the [trail](crate::db::trail) --- with a configuration, counters, and the working state of the resolution procedures.

[resolve](crate::resolve) builds a context, uses it for a single resolution, and drops it.
A context built by hand supports the same resolution as a method, along with inspection of the databases, counters, and state after the resolution ends.

# Example
```rust
# use otter_grub::config::Config;
# use otter_grub::context::{Context, ResolutionState};
# use otter_grub::provider::OfflineProvider;
# use otter_grub::structures::version::ranges::Ranges;
let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
provider.add_dependencies("a", 1, [("b", Ranges::higher_than(2))]);
provider.add_dependencies("b", 2, []);

let mut the_context = Context::from_config(Config::default());
let solution = the_context.resolve(&provider, "a", 1).unwrap();

assert_eq!(the_context.state, ResolutionState::Solved);
assert_eq!(solution.get(&"b"), Some(&2));
assert!(the_context.counters.decisions >= 2);
```
*/

mod counters;
pub use counters::Counters;

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use crate::{
    Resolution,
    config::Config,
    db::{
        IncompatibilityKey, LevelIndex, incompatibility::IncompatibilityDB, package::PackageDB,
        trail::Trail,
    },
    misc::log::targets::{self},
    provider::DependencyProvider,
    structures::{
        assignment::Assignment,
        incompatibility::Incompatibility,
        package::PackageId,
        term::Term,
    },
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionState {
    /// The context allows input, with no resolution under way.
    Input,

    /// Fresh assignments await propagation.
    Propagating,

    /// Propagation is at a fixed point without conflict, and some package awaits a decision.
    NeedsDecision,

    /// Every package required has a decision, and the decisions witness a solution.
    Solved,

    /// A conflict exhausted the root.
    /// The key indexes an incompatibility refuting the root requirement.
    Failed(IncompatibilityKey),
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Propagating => write!(f, "Propagating"),
            Self::NeedsDecision => write!(f, "NeedsDecision"),
            Self::Solved => write!(f, "Solved"),
            Self::Failed(_) => write!(f, "Failed"),
        }
    }
}

/// A context, parameterised to a provider.
pub struct Context<D: DependencyProvider> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/resolution.
    pub counters: Counters,

    /// The package database.
    /// See [db::package](crate::db::package) for details.
    pub package_db: PackageDB<D::P, D::VS>,

    /// The incompatibility database.
    /// See [db::incompatibility](crate::db::incompatibility) for details.
    pub incompatibility_db: IncompatibilityDB<D::VS, D::M>,

    /// The trail of assignments.
    /// See [db::trail](crate::db::trail) for details.
    pub trail: Trail<D::VS>,

    /// The status of the context.
    pub state: ResolutionState,

    /// The version required of the root package, held for the course of a resolution.
    pub(crate) root_version: Option<D::V>,

    /// Packages whose accumulated term has changed, pending propagation.
    pub(crate) propagation_buffer: Vec<PackageId>,

    /// Keys of incompatibilities contradicted on the trail, with the level at which the contradiction was observed.
    ///
    /// A contradicted incompatibility is skipped during propagation until a backjump clears the contradicting assignment.
    pub(crate) contradicted: HashMap<IncompatibilityKey, LevelIndex>,

    /// For each package, the versions whose dependencies have been recorded as incompatibilities.
    pub(crate) added_dependencies: HashMap<PackageId, BTreeSet<D::V>>,

    /// Cached priorities, each stamped with the per-package assignment count and conflict total when queried.
    pub(crate) priorities: Vec<Option<(usize, u32, D::Priority)>>,

    /// True if some backjump has been made during the resolution.
    pub(crate) backjump_made: bool,
}

impl<D: DependencyProvider> Context<D> {
    /// A new [Context] with the given configuration.
    pub fn from_config(config: Config) -> Self {
        Context {
            config,
            counters: Counters::default(),

            package_db: PackageDB::default(),
            incompatibility_db: IncompatibilityDB::default(),
            trail: Trail::default(),

            state: ResolutionState::Input,

            root_version: None,
            propagation_buffer: Vec::default(),
            contradicted: HashMap::default(),
            added_dependencies: HashMap::default(),
            priorities: Vec::default(),
            backjump_made: false,
        }
    }

    /// Returns the context to a fresh input state, dropping all record of any resolution made.
    ///
    /// The configuration is kept.
    pub fn refresh(&mut self) {
        self.counters = Counters::default();
        self.package_db = PackageDB::default();
        self.incompatibility_db = IncompatibilityDB::default();
        self.trail = Trail::default();
        self.state = ResolutionState::Input;
        self.root_version = None;
        self.propagation_buffer.clear();
        self.contradicted.clear();
        self.added_dependencies.clear();
        self.priorities.clear();
        self.backjump_made = false;
    }

    /// The accumulated term of `package`: the intersection of every term assigned to the package on the trail.
    ///
    /// [None], if nothing is assigned for the package.
    pub fn accumulated(&self, package: PackageId) -> Option<&Term<D::VS>> {
        self.package_db.accumulated(&self.trail, package)
    }

    /// Records `incompatibility` and places the key on the mention lists of its packages.
    pub(crate) fn record_incompatibility(
        &mut self,
        incompatibility: Incompatibility<D::VS, D::M>,
    ) -> IncompatibilityKey {
        let key = self.incompatibility_db.store(incompatibility);
        self.incompatibility_db.list(key);
        key
    }

    /// Stores a decision of `version` for `package` at a fresh decision level.
    ///
    /// # Soundness
    /// The version must be contained in the accumulated term of the package.
    pub(crate) fn add_decision(&mut self, package: PackageId, version: D::V) {
        debug_assert!(match self.accumulated(package) {
            Some(term) => term.contains(&version),
            None => false,
        });

        self.trail.fresh_level();
        let level = self.trail.level();
        log::trace!(target: targets::TRAIL, "Decision p{package} {version} at level {level}");

        let position = self.trail.next_position();
        let summary = self.package_db.summary_mut(package);
        summary.positions.push(position);
        summary.decision = Some(version.clone());

        self.trail
            .store_assignment(Assignment::decision(package, level, version));
        self.counters.decisions += 1;
    }

    /// Stores a derivation of `term` for `package` at the current decision level, as a consequence of the incompatibility at `cause`.
    pub(crate) fn add_derivation(
        &mut self,
        package: PackageId,
        term: Term<D::VS>,
        cause: IncompatibilityKey,
    ) {
        let accumulated = match self.accumulated(package) {
            Some(seen) => seen.intersection(&term),
            None => term.clone(),
        };

        let level = self.trail.level();
        log::trace!(target: targets::TRAIL, "Derivation p{package} {term} at level {level} by {cause}");

        let position = self.trail.next_position();
        self.package_db.summary_mut(package).positions.push(position);

        self.trail
            .store_assignment(Assignment::derivation(package, level, term, cause, accumulated));
        self.counters.derivations += 1;
    }

    /// The solution witnessed by the trail: the version decided for each decided package.
    ///
    /// Meaningful when the context is in the [Solved](ResolutionState::Solved) state.
    pub fn solution(&self) -> Resolution<D::P, D::V> {
        let mut resolution = Resolution::default();

        for id in self.package_db.ids() {
            if let Some(version) = &self.package_db.summary(id).decision {
                resolution.insert(self.package_db.package(id).clone(), version.clone());
            }
        }

        resolution
    }

    /// The incompatibility with which failure of the resolution was determined.
    pub fn failure_key(&self) -> Option<IncompatibilityKey> {
        match self.state {
            ResolutionState::Failed(key) => Some(key),
            _ => None,
        }
    }
}
