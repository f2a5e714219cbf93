/*!
Support for tests of otter_grub.

Registries are built from plain slices with [registry], and a handful of providers wrap a registry to exercise the paths an [OfflineProvider] cannot reach on its own: cancellation, provider errors, and unavailable versions.
*/

use std::{
    cell::{Cell, RefCell},
    cmp::Reverse,
    convert::Infallible,
    fmt,
};

use otter_grub::{
    provider::{ConflictTally, Dependencies, DependencyProvider, OfflineProvider},
    structures::version::ranges::Ranges,
};

pub type TestPackage = &'static str;
pub type TestRegistry = OfflineProvider<TestPackage, Ranges<u32>>;

/// A registry built from (package, version, dependencies) entries.
pub fn registry(entries: &[(TestPackage, u32, &[(TestPackage, Ranges<u32>)])]) -> TestRegistry {
    let mut provider = TestRegistry::default();
    for (package, version, dependencies) in entries {
        provider.add_dependencies(*package, *version, dependencies.iter().cloned());
    }
    provider
}

/// Initialises a logger for test output, if not already initialised.
#[cfg(feature = "log")]
pub fn ensure_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An error raised by a wrapping provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestError(pub &'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TestError {}

/// Wraps a registry, and calls the resolution off after a budget of cancellation polls.
pub struct CancellingProvider {
    registry: TestRegistry,
    budget: Cell<usize>,
}

impl CancellingProvider {
    pub fn new(registry: TestRegistry, budget: usize) -> Self {
        CancellingProvider {
            registry,
            budget: Cell::new(budget),
        }
    }
}

impl DependencyProvider for CancellingProvider {
    type P = TestPackage;
    type V = u32;
    type VS = Ranges<u32>;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = TestError;

    fn prioritize(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
        conflicts: &ConflictTally,
    ) -> Self::Priority {
        self.registry.prioritize(package, set, conflicts)
    }

    fn choose_version(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
    ) -> Result<Option<u32>, TestError> {
        self.registry
            .choose_version(package, set)
            .map_err(|never| match never {})
    }

    fn get_dependencies(
        &self,
        package: &TestPackage,
        version: &u32,
    ) -> Result<Dependencies<TestPackage, Ranges<u32>, String>, TestError> {
        self.registry
            .get_dependencies(package, version)
            .map_err(|never| match never {})
    }

    fn should_cancel(&self) -> Result<(), TestError> {
        match self.budget.get() {
            0 => Err(TestError("the budget is exhausted")),
            remaining => {
                self.budget.set(remaining - 1);
                Ok(())
            }
        }
    }
}

/// Wraps a registry, and counts the calls made to the registry.
pub struct CountingProvider {
    registry: TestRegistry,
    pub priorities: Cell<usize>,
    pub choices: Cell<usize>,
    pub retrievals: Cell<usize>,
}

impl CountingProvider {
    pub fn new(registry: TestRegistry) -> Self {
        CountingProvider {
            registry,
            priorities: Cell::new(0),
            choices: Cell::new(0),
            retrievals: Cell::new(0),
        }
    }
}

impl DependencyProvider for CountingProvider {
    type P = TestPackage;
    type V = u32;
    type VS = Ranges<u32>;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = Infallible;

    fn prioritize(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
        conflicts: &ConflictTally,
    ) -> Self::Priority {
        self.priorities.set(self.priorities.get() + 1);
        self.registry.prioritize(package, set, conflicts)
    }

    fn choose_version(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
    ) -> Result<Option<u32>, Infallible> {
        self.choices.set(self.choices.get() + 1);
        self.registry.choose_version(package, set)
    }

    fn get_dependencies(
        &self,
        package: &TestPackage,
        version: &u32,
    ) -> Result<Dependencies<TestPackage, Ranges<u32>, String>, Infallible> {
        self.retrievals.set(self.retrievals.get() + 1);
        self.registry.get_dependencies(package, version)
    }
}

/// Wraps a registry, and records the set passed with each prioritisation request.
pub struct RecordingProvider {
    registry: TestRegistry,
    pub prioritised: RefCell<Vec<(TestPackage, String)>>,
}

impl RecordingProvider {
    pub fn new(registry: TestRegistry) -> Self {
        RecordingProvider {
            registry,
            prioritised: RefCell::new(Vec::default()),
        }
    }

    /// The sets recorded for `package`, in order of request.
    pub fn sets_for(&self, package: TestPackage) -> Vec<String> {
        self.prioritised
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == package)
            .map(|(_, set)| set.clone())
            .collect()
    }
}

impl DependencyProvider for RecordingProvider {
    type P = TestPackage;
    type V = u32;
    type VS = Ranges<u32>;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = Infallible;

    fn prioritize(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
        conflicts: &ConflictTally,
    ) -> Self::Priority {
        self.prioritised
            .borrow_mut()
            .push((*package, set.to_string()));
        self.registry.prioritize(package, set, conflicts)
    }

    fn choose_version(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
    ) -> Result<Option<u32>, Infallible> {
        self.registry.choose_version(package, set)
    }

    fn get_dependencies(
        &self,
        package: &TestPackage,
        version: &u32,
    ) -> Result<Dependencies<TestPackage, Ranges<u32>, String>, Infallible> {
        self.registry.get_dependencies(package, version)
    }
}

/// The call a [FailingProvider] fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Choice,
    Retrieval,
}

/// Wraps a registry, and fails the given call for the given package.
pub struct FailingProvider {
    registry: TestRegistry,
    package: TestPackage,
    failure: Failure,
}

impl FailingProvider {
    pub fn new(registry: TestRegistry, package: TestPackage, failure: Failure) -> Self {
        FailingProvider {
            registry,
            package,
            failure,
        }
    }
}

impl DependencyProvider for FailingProvider {
    type P = TestPackage;
    type V = u32;
    type VS = Ranges<u32>;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = TestError;

    fn prioritize(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
        conflicts: &ConflictTally,
    ) -> Self::Priority {
        self.registry.prioritize(package, set, conflicts)
    }

    fn choose_version(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
    ) -> Result<Option<u32>, TestError> {
        if self.failure == Failure::Choice && *package == self.package {
            return Err(TestError("no means to choose"));
        }
        self.registry
            .choose_version(package, set)
            .map_err(|never| match never {})
    }

    fn get_dependencies(
        &self,
        package: &TestPackage,
        version: &u32,
    ) -> Result<Dependencies<TestPackage, Ranges<u32>, String>, TestError> {
        if self.failure == Failure::Retrieval && *package == self.package {
            return Err(TestError("the registry is unreachable"));
        }
        self.registry
            .get_dependencies(package, version)
            .map_err(|never| match never {})
    }
}

/// Wraps a registry, and reports the dependencies of the given version of the given package as unavailable.
pub struct PatchyProvider {
    registry: TestRegistry,
    unavailable: (TestPackage, u32),
}

impl PatchyProvider {
    pub fn new(registry: TestRegistry, package: TestPackage, version: u32) -> Self {
        PatchyProvider {
            registry,
            unavailable: (package, version),
        }
    }
}

impl DependencyProvider for PatchyProvider {
    type P = TestPackage;
    type V = u32;
    type VS = Ranges<u32>;
    type M = String;
    type Priority = (u32, Reverse<usize>);
    type Err = Infallible;

    fn prioritize(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
        conflicts: &ConflictTally,
    ) -> Self::Priority {
        self.registry.prioritize(package, set, conflicts)
    }

    fn choose_version(
        &self,
        package: &TestPackage,
        set: &Ranges<u32>,
    ) -> Result<Option<u32>, Infallible> {
        self.registry.choose_version(package, set)
    }

    fn get_dependencies(
        &self,
        package: &TestPackage,
        version: &u32,
    ) -> Result<Dependencies<TestPackage, Ranges<u32>, String>, Infallible> {
        if (*package, *version) == self.unavailable {
            return Ok(Dependencies::Unknown(format!(
                "{package} {version} was yanked"
            )));
        }
        self.registry.get_dependencies(package, version)
    }
}
