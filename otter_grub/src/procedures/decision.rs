/*!
Methods for deciding the version of a package.

# Overview

The core decision procedure is straightforward:
- Among the packages some positive term bounds and no decision settles, take the package the provider [prioritises](crate::provider::DependencyProvider::prioritize), ask the provider to [choose a version](crate::provider::DependencyProvider::choose_version) within the bound, and fix the package to the chosen version at a fresh decision level.

Around the core sit the ways a decision may fail to be the next step:

- No package awaits a decision.
  Then the decisions on the trail witness a solution, and the resolution is over.
- The provider has no version within the bound.
  Then the absence is an axiom --- a *no versions* incompatibility is recorded for the bound, and propagation turns the absence into a conflict.
  No decision is made.
- The provider cannot give the dependencies of the chosen version.
  Then the version is unavailable --- an *unavailable* incompatibility is recorded for the version, again leaving the outcome to propagation.

A decision which does go ahead brings the dependencies of the chosen version into the context, each as a *dependency* incompatibility, before the decision is stored.
Dependencies already recorded for a (package, version) pairing are not requested again.

# Priorities

Priorities are queried per package and cached against the package's assignment count and conflict tally, so the provider is consulted only when the set a decision would be made from may have changed.
A [backjump](crate::procedures::backjump) drops the cached priority of each package it unmakes an assignment of, as the count and tally alone cannot distinguish a set rebuilt differently after the jump.
Ties between equal priorities go to the package with the lowest id --- the package mentioned earliest in the resolution --- giving a deterministic, breadth-first bias.

# A check after conflicts

Once some backjump has been made, fresh dependency incompatibilities are related against the would-be decision before the decision is stored.
If one is already satisfied, the decision is skipped and the conflict is left to propagation, which will find the conflict against an undecided package and analyse it at the correct level.
Before any backjump the check is omitted: nothing has yet gone wrong, and the worst a misjudged decision costs is a backjump which unmakes only the decision itself.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    provider::{Dependencies, DependencyProvider},
    structures::{
        incompatibility::{Incompatibility, Relation},
        package::PackageId,
        term::Term,
        version::VersionSet,
    },
    types::err::ResolutionError,
};

/// Possible 'Ok' results from attempting a decision.
pub enum DecisionOk {
    /// A decision was stored --- or an axiom ruling out the candidate was recorded in its place.
    Made,

    /// No package awaits a decision, so the decisions on the trail witness a solution.
    Exhausted,
}

impl<D: DependencyProvider> Context<D> {
    /// Attempts a decision for the highest-priority package awaiting one.
    ///
    /// For documentation, see [procedures::decision](crate::procedures::decision).
    pub(crate) fn make_decision(
        &mut self,
        provider: &D,
    ) -> Result<DecisionOk, ResolutionError<D>> {
        let Some((package, set)) = self.prioritised_package(provider) else {
            return Ok(DecisionOk::Exhausted);
        };

        let external = self.package_db.package(package).clone();

        let version = match provider.choose_version(&external, &set) {
            Err(source) => {
                return Err(ResolutionError::Choice {
                    package: external,
                    source,
                });
            }

            Ok(None) => {
                log::info!(target: targets::DECISION, "No version of {external} within {set}");

                self.record_incompatibility(Incompatibility::no_versions(package, set));
                self.propagation_buffer.push(package);
                return Ok(DecisionOk::Made);
            }

            Ok(Some(version)) => version,
        };

        debug_assert!(set.contains(&version), "! A choice from outside the set");

        let fresh_version = self
            .added_dependencies
            .entry(package)
            .or_default()
            .insert(version.clone());

        if fresh_version {
            let constraints = match provider.get_dependencies(&external, &version) {
                Err(source) => {
                    return Err(ResolutionError::Retrieval {
                        package: external,
                        version,
                        source,
                    });
                }

                Ok(Dependencies::Unknown(reason)) => {
                    log::info!(target: targets::DECISION, "{external} {version} is unavailable: {reason}");

                    self.record_incompatibility(Incompatibility::unavailable(
                        package,
                        D::VS::singleton(version.clone()),
                        reason,
                    ));
                    self.propagation_buffer.push(package);
                    return Ok(DecisionOk::Made);
                }

                Ok(Dependencies::Known(constraints)) => {
                    if constraints.contains_key(&external) {
                        return Err(ResolutionError::SelfDependency {
                            package: external,
                            version,
                        });
                    }
                    constraints
                }
            };

            let mut keys = Vec::with_capacity(constraints.len());
            for (dependency, dependency_set) in &constraints {
                let dependency_id = self.package_db.intern(dependency);
                keys.push(self.record_incompatibility(Incompatibility::dependency(
                    package,
                    D::VS::singleton(version.clone()),
                    dependency_id,
                    dependency_set.clone(),
                )));
            }

            if self.backjump_made {
                let exact = Term::exact(version.clone());

                let conflicted = keys.iter().any(|key| {
                    self.incompatibility_db.get(key).relation(|mentioned| {
                        if mentioned == package {
                            Some(&exact)
                        } else {
                            self.accumulated(mentioned)
                        }
                    }) == Relation::Satisfied
                });

                if conflicted {
                    log::info!(target: targets::DECISION, "Skipping {external} {version}: its dependencies conflict");

                    self.propagation_buffer.push(package);
                    return Ok(DecisionOk::Made);
                }
            }
        }

        log::info!(target: targets::DECISION, "Decision {external} {version}");

        self.add_decision(package, version);
        self.propagation_buffer.push(package);

        Ok(DecisionOk::Made)
    }

    /// The highest-priority package awaiting a decision, with the set a decision would be made from.
    ///
    /// [None], if every package some positive term bounds has been decided.
    pub(crate) fn prioritised_package(&mut self, provider: &D) -> Option<(PackageId, D::VS)> {
        if self.priorities.len() < self.package_db.count() {
            self.priorities.resize_with(self.package_db.count(), || None);
        }

        let mut candidate: Option<(PackageId, D::Priority)> = None;

        for id in self.package_db.ids() {
            let summary = self.package_db.summary(id);
            if summary.decision.is_some() {
                continue;
            }

            let set = match self.package_db.accumulated(&self.trail, id) {
                Some(Term::Positive(set)) => set,
                _ => continue,
            };

            let stamp = (summary.positions.len(), summary.conflicts.total());

            let cached = self.priorities[id as usize]
                .as_ref()
                .filter(|(count, conflicts, _)| (*count, *conflicts) == stamp)
                .map(|(_, _, priority)| priority.clone());

            let priority = match cached {
                Some(priority) => priority,

                None => {
                    let fresh =
                        provider.prioritize(self.package_db.package(id), set, &summary.conflicts);
                    self.priorities[id as usize] = Some((stamp.0, stamp.1, fresh.clone()));
                    fresh
                }
            };

            // A strict comparison keeps the earliest-mentioned package on ties.
            match &candidate {
                Some((_, high)) if priority <= *high => {}
                _ => candidate = Some((id, priority)),
            }
        }

        let (package, _) = candidate?;
        match self.accumulated(package) {
            Some(Term::Positive(set)) => Some((package, set.clone())),
            _ => panic!("! A candidate without a positive bound"),
        }
    }
}
