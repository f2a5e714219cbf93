/*!
Reports explaining a failed resolution.

A failed resolution ends with an incompatibility refuting the root requirement.
The incompatibility is justified by the [incompatibility database](crate::db::incompatibility): external incompatibilities are axioms, and every derived incompatibility notes its two causes.
A report, then, is a matter of replaying the justification --- and for this the justification is exported as a [DerivationTree], owned and free of the context which made it.

Trees mirror the derivation graph:
- [External] leaves carry the axioms, with packages restored to their external identities.
- [Derived] nodes carry the terms of a derived incompatibility and their two causes.
  A node reachable by more than one path is built once and shared, and carries a `shared_id` so a reporter may explain the node once and thereafter refer back.

A [text reporter](crate::reports::text) is provided, which writes the tree as a numbered list of inferences, causes before effects.

# Collapsing absent versions

A derivation often pairs an axiom of absence --- 'no versions of b satisfy >=4' --- with a sibling about the same package, and restating the absence on a line of its own lengthens a report without sharpening it.
[collapse_unavailable](DerivationTree::collapse_unavailable) folds each such leaf into its sibling by widening the sibling's matching set, trading fidelity for brevity.
The pass is applied by [resolve](crate::resolve) when [configured](crate::config::Config::collapse_unavailable), and may be applied by hand.
*/

pub mod text;

use std::{collections::HashMap, sync::Arc};

use crate::{
    context::Context,
    db::IncompatibilityKey,
    misc::log::targets::{self},
    provider::DependencyProvider,
    structures::{
        incompatibility::Source,
        package::Package,
        term::Term,
        version::VersionSet,
    },
};

/// The justification of an incompatibility, as a tree of inferences over external axioms.
#[derive(Clone, Debug)]
pub enum DerivationTree<P: Package, VS: VersionSet, M> {
    /// An axiom, true independent of the resolution.
    External(External<P, VS, M>),

    /// A derived incompatibility, with its two causes.
    Derived(Derived<P, VS, M>),
}

/// An external incompatibility: an axiom, with packages at their external identities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum External<P: Package, VS: VersionSet, M> {
    /// Versions of the root package other than the root version are never selected.
    NotRoot(P, VS::V),

    /// No version of the package in the set exists.
    NoVersions(P, VS),

    /// Versions of the package in the set are unavailable, for the reason given.
    Unavailable(P, VS, M),

    /// Selecting a version of the first package in the first set requires a version of the second package in the second set.
    Dependency(P, VS, P, VS),
}

/// A derived incompatibility, with its terms and its two causes.
#[derive(Clone, Debug)]
pub struct Derived<P: Package, VS: VersionSet, M> {
    /// The terms of the incompatibility, keyed by external package identity, in a fixed order.
    pub terms: Vec<(P, Term<VS>)>,

    /// Set iff the node is reachable by more than one path, in which case the causes are shared across the paths.
    ///
    /// A reporter may explain the node once and refer back on every later visit.
    pub shared_id: Option<usize>,

    /// One cause.
    pub cause1: Arc<DerivationTree<P, VS, M>>,

    /// The other cause.
    pub cause2: Arc<DerivationTree<P, VS, M>>,
}

impl<P: Package, VS: VersionSet, M: Clone> DerivationTree<P, VS, M> {
    /// Folds each external 'no versions' leaf into its sibling cause, by widening the sibling's matching set.
    ///
    /// For documentation, see [reports](crate::reports).
    pub fn collapse_unavailable(&mut self) {
        let Self::Derived(derived) = self else { return };

        let collapsed = match (
            Arc::make_mut(&mut derived.cause1),
            Arc::make_mut(&mut derived.cause2),
        ) {
            (Self::External(External::NoVersions(package, set)), sibling)
            | (sibling, Self::External(External::NoVersions(package, set))) => {
                sibling.collapse_unavailable();
                sibling
                    .clone()
                    .merge_unavailable(&package.clone(), &set.clone())
            }

            (cause1, cause2) => {
                cause1.collapse_unavailable();
                cause2.collapse_unavailable();
                None
            }
        };

        if let Some(tree) = collapsed {
            *self = tree;
        }
    }

    /// The tree with the absence of versions of `package` in `set` folded in, if the tree can absorb the absence.
    ///
    /// A tree which cannot absorb the absence --- another absence, or the root axiom --- returns [None], and the caller keeps the unfolded pair.
    fn merge_unavailable(self, package: &P, set: &VS) -> Option<Self> {
        match self {
            Self::External(External::NotRoot(..)) | Self::External(External::NoVersions(..)) => {
                None
            }

            Self::External(External::Unavailable(p, r, reason)) => {
                if p == *package {
                    Some(Self::External(External::Unavailable(p, r.union(set), reason)))
                } else {
                    None
                }
            }

            Self::External(External::Dependency(p1, s1, p2, s2)) => {
                if p1 == *package {
                    Some(Self::External(External::Dependency(p1, s1.union(set), p2, s2)))
                } else if p2 == *package {
                    Some(Self::External(External::Dependency(p1, s1, p2, s2.union(set))))
                } else {
                    None
                }
            }

            Self::Derived(mut derived) => {
                if let Some((_, term)) = derived.terms.iter_mut().find(|(p, _)| p == package) {
                    if term.is_positive() {
                        *term = Term::Positive(term.unwrap_positive().union(set));
                    }
                }
                Some(Self::Derived(derived))
            }
        }
    }
}

impl<D: DependencyProvider> Context<D> {
    /// The justification of the incompatibility at `key`, as an owned tree.
    ///
    /// Nodes reachable by more than one path are built once, shared, and stamped with a `shared_id`.
    pub fn derivation_tree(&self, key: IncompatibilityKey) -> DerivationTree<D::P, D::VS, D::M> {
        log::info!(target: targets::REPORT, "Deriving the tree rooted at {key}");

        // A key is shared iff reached along more than one path.
        let mut visits: HashMap<IncompatibilityKey, usize> = HashMap::default();
        let mut stack = vec![key];
        while let Some(next) = stack.pop() {
            let count = visits.entry(next).or_insert(0);
            *count += 1;
            if *count == 1 {
                if let Some((cause1, cause2)) = self.incompatibility_db.get(&next).causes() {
                    stack.push(cause1);
                    stack.push(cause2);
                }
            }
        }

        let mut built = HashMap::default();
        let tree = self.build_tree(key, &visits, &mut built);
        (*tree).clone()
    }

    fn build_tree(
        &self,
        key: IncompatibilityKey,
        visits: &HashMap<IncompatibilityKey, usize>,
        built: &mut HashMap<IncompatibilityKey, Arc<DerivationTree<D::P, D::VS, D::M>>>,
    ) -> Arc<DerivationTree<D::P, D::VS, D::M>> {
        if let Some(tree) = built.get(&key) {
            return tree.clone();
        }

        let incompatibility = self.incompatibility_db.get(&key);

        let tree = match incompatibility.source() {
            Source::NotRoot { package, version } => DerivationTree::External(External::NotRoot(
                self.package_db.package(*package).clone(),
                version.clone(),
            )),

            Source::NoVersions { package, set } => DerivationTree::External(External::NoVersions(
                self.package_db.package(*package).clone(),
                set.clone(),
            )),

            Source::Unavailable {
                package,
                set,
                reason,
            } => DerivationTree::External(External::Unavailable(
                self.package_db.package(*package).clone(),
                set.clone(),
                reason.clone(),
            )),

            Source::Dependency {
                package,
                set,
                dependency,
                dependency_set,
            } => DerivationTree::External(External::Dependency(
                self.package_db.package(*package).clone(),
                set.clone(),
                self.package_db.package(*dependency).clone(),
                dependency_set.clone(),
            )),

            Source::Derived { cause1, cause2 } => {
                let (cause1, cause2) = (*cause1, *cause2);
                DerivationTree::Derived(Derived {
                    terms: incompatibility
                        .iter()
                        .map(|(package, term)| {
                            (self.package_db.package(package).clone(), term.clone())
                        })
                        .collect(),
                    shared_id: (visits.get(&key).copied().unwrap_or(0) > 1).then(|| key.index()),
                    cause1: self.build_tree(cause1, visits, built),
                    cause2: self.build_tree(cause2, visits, built),
                })
            }
        };

        let tree = Arc::new(tree);
        built.insert(key, tree.clone());
        tree
    }
}

impl<P: Package, VS: VersionSet, M: std::fmt::Display> std::fmt::Display for External<P, VS, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotRoot(package, version) => {
                write!(f, "the root requirement is {package} {version}")
            }

            Self::NoVersions(package, set) => {
                write!(f, "no versions of {package} satisfy {set}")
            }

            Self::Unavailable(package, set, reason) => {
                write!(f, "versions {set} of {package} are unavailable ({reason})")
            }

            Self::Dependency(package, set, dependency, dependency_set) => {
                write!(f, "{package} {set} depends on {dependency} {dependency_set}")
            }
        }
    }
}
