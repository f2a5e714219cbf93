use std::collections::BTreeMap;

use otter_grub::{
    config::Config,
    context::{Context, ResolutionState},
    reports::{DerivationTree, External, text},
    structures::version::ranges::Ranges,
    types::err::ResolutionError,
};

use otter_tests::{PatchyProvider, registry};

/// Every external leaf of `tree`, in citation order.
fn externals(
    tree: &DerivationTree<&'static str, Ranges<u32>, String>,
    leaves: &mut Vec<External<&'static str, Ranges<u32>, String>>,
) {
    match tree {
        DerivationTree::External(external) => leaves.push(external.clone()),

        DerivationTree::Derived(derived) => {
            externals(&derived.cause1, leaves);
            externals(&derived.cause2, leaves);
        }
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn chain() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full())]),
            ("a", 1, &[("b", Ranges::full())]),
            ("b", 1, &[]),
        ]);

        let solution = otter_grub::resolve(&provider, "root", 1).unwrap();

        assert_eq!(solution, BTreeMap::from([("root", 1), ("a", 1), ("b", 1)]));
    }

    #[test]
    fn highest_versions_are_favoured() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full())]),
            ("a", 1, &[]),
            ("a", 2, &[("b", Ranges::between(1, 3))]),
            ("b", 1, &[]),
            ("b", 2, &[]),
            ("b", 3, &[]),
        ]);

        let solution = otter_grub::resolve(&provider, "root", 1).unwrap();

        assert_eq!(solution, BTreeMap::from([("root", 1), ("a", 2), ("b", 2)]));
    }

    #[test]
    fn missing_version() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::higher_than(2))]),
            ("a", 1, &[]),
        ]);

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::NoSolution(tree)) => {
                assert!(matches!(*tree, DerivationTree::Derived(_)));

                let mut leaves = Vec::default();
                externals(&tree, &mut leaves);
                assert!(leaves.contains(&External::NoVersions("a", Ranges::higher_than(2))));
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn diamond_conflict() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full()), ("b", Ranges::full())]),
            ("a", 1, &[("c", Ranges::singleton(1))]),
            ("b", 1, &[("c", Ranges::singleton(2))]),
            ("c", 1, &[]),
            ("c", 2, &[]),
        ]);

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::NoSolution(tree)) => {
                let mut leaves = Vec::default();
                externals(&tree, &mut leaves);

                // Both sides of the disagreement over c are cited.
                assert!(leaves.contains(&External::Dependency(
                    "a",
                    Ranges::singleton(1),
                    "c",
                    Ranges::singleton(1)
                )));
                assert!(leaves.contains(&External::Dependency(
                    "b",
                    Ranges::singleton(1),
                    "c",
                    Ranges::singleton(2)
                )));
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn unavailable_versions_are_avoided() {
        let provider = PatchyProvider::new(
            registry(&[
                ("root", 1, &[("a", Ranges::full())]),
                ("a", 1, &[]),
                ("a", 2, &[]),
            ]),
            "a",
            2,
        );

        let solution = otter_grub::resolve(&provider, "root", 1).unwrap();

        assert_eq!(solution, BTreeMap::from([("root", 1), ("a", 1)]));
    }

    #[test]
    fn unavailable_reasons_are_reported() {
        let provider = PatchyProvider::new(
            registry(&[("root", 1, &[("a", Ranges::full())]), ("a", 1, &[])]),
            "a",
            1,
        );

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::NoSolution(tree)) => {
                assert!(text::report(&tree).contains("a 1 was yanked"));
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn self_dependency() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full())]),
            ("a", 1, &[("a", Ranges::full())]),
        ]);

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::SelfDependency { package, version }) => {
                assert_eq!(package, "a");
                assert_eq!(version, 1);
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn narrow_packages_are_decided_first() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full()), ("b", Ranges::full())]),
            ("a", 1, &[]),
            ("b", 1, &[]),
            ("b", 2, &[]),
            ("b", 3, &[]),
        ]);

        let mut the_context = Context::from_config(Config::default());
        the_context.resolve(&provider, "root", 1).unwrap();

        let decisions: Vec<&str> = the_context
            .trail
            .assignments
            .iter()
            .filter(|assignment| assignment.is_decision())
            .map(|assignment| *the_context.package_db.package(assignment.package))
            .collect();

        assert_eq!(decisions, ["root", "a", "b"]);
    }

    #[test]
    fn conflict_avoided_by_backjump() {
        let provider = registry(&[
            ("root", 1, &[("foo", Ranges::between(1, 3))]),
            ("foo", 1, &[]),
            ("foo", 2, &[("bar", Ranges::between(1, 2))]),
            ("bar", 2, &[]),
        ]);

        let mut the_context = Context::from_config(Config::default());
        let solution = the_context.resolve(&provider, "root", 1).unwrap();

        // foo 2 is abandoned for foo 1, and with it the requirement on bar.
        assert_eq!(solution, BTreeMap::from([("root", 1), ("foo", 1)]));
        assert_eq!(the_context.state, ResolutionState::Solved);
        assert!(the_context.counters.backjumps >= 1);
        assert!(the_context.counters.learned >= 1);
    }
}
