use std::collections::BTreeMap;
use std::thread;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use otter_grub::{
    config::Config,
    context::Context,
    reports::text,
    structures::version::ranges::Ranges,
    types::err::ResolutionError,
};

use otter_tests::{
    CancellingProvider, CountingProvider, FailingProvider, Failure, RecordingProvider,
    TestRegistry, registry,
};

type Entry = (&'static str, u32, Vec<(&'static str, Ranges<u32>)>);

fn web_entries() -> Vec<Entry> {
    vec![
        ("root", 1, vec![("web", Ranges::full()), ("json", Ranges::full())]),
        ("web", 1, vec![("json", Ranges::between(1, 3))]),
        ("web", 2, vec![("json", Ranges::between(2, 4))]),
        ("json", 1, vec![]),
        ("json", 2, vec![]),
        ("json", 3, vec![]),
    ]
}

fn provider_from(entries: &[Entry]) -> TestRegistry {
    let mut provider = TestRegistry::default();
    for (package, version, dependencies) in entries {
        provider.add_dependencies(*package, *version, dependencies.clone());
    }
    provider
}

mod properties {
    use super::*;

    #[test]
    fn resolutions_repeat() {
        let provider = provider_from(&web_entries());

        let first = otter_grub::resolve(&provider, "root", 1).unwrap();
        for _ in 0..3 {
            assert_eq!(otter_grub::resolve(&provider, "root", 1).unwrap(), first);
        }

        assert_eq!(
            first,
            BTreeMap::from([("root", 1), ("web", 2), ("json", 3)])
        );
    }

    #[test]
    fn explanations_repeat() {
        let provider = registry(&[
            ("root", 1, &[("a", Ranges::full()), ("b", Ranges::full())]),
            ("a", 1, &[("c", Ranges::singleton(1))]),
            ("b", 1, &[("c", Ranges::singleton(2))]),
            ("c", 1, &[]),
            ("c", 2, &[]),
        ]);

        let report = |provider: &TestRegistry| match otter_grub::resolve(provider, "root", 1) {
            Err(ResolutionError::NoSolution(tree)) => text::report(&tree),
            result => panic!("An unexpected resolution: {result:?}"),
        };

        let first = report(&provider);
        for _ in 0..3 {
            assert_eq!(report(&provider), first);
        }
    }

    #[test]
    fn registration_order_is_irrelevant() {
        let expected = otter_grub::resolve(&provider_from(&web_entries()), "root", 1).unwrap();

        let mut entries = web_entries();
        for seed in 0..8 {
            entries.shuffle(&mut StdRng::seed_from_u64(seed));

            let provider = provider_from(&entries);
            assert_eq!(otter_grub::resolve(&provider, "root", 1).unwrap(), expected);
        }
    }

    #[test]
    fn unreached_packages_are_irrelevant() {
        let expected = otter_grub::resolve(&provider_from(&web_entries()), "root", 1).unwrap();

        let mut entries = web_entries();
        entries.push(("xml", 1, vec![("json", Ranges::singleton(1))]));
        entries.push(("yaml", 1, vec![("xml", Ranges::full())]));

        let solution = otter_grub::resolve(&provider_from(&entries), "root", 1).unwrap();

        assert_eq!(solution, expected);
        assert!(!solution.contains_key("xml"));
    }

    #[test]
    fn dropping_a_requirement_preserves_solvability() {
        let full = registry(&[
            ("root", 1, &[("web", Ranges::full()), ("json", Ranges::full())]),
            ("web", 1, &[("json", Ranges::between(1, 3))]),
            ("json", 2, &[]),
        ]);
        let trimmed = registry(&[
            ("root", 1, &[("web", Ranges::full()), ("json", Ranges::full())]),
            ("web", 1, &[]),
            ("json", 2, &[]),
        ]);

        assert!(otter_grub::resolve(&full, "root", 1).is_ok());

        let solution = otter_grub::resolve(&trimmed, "root", 1).unwrap();
        assert_eq!(solution[&"json"], 2);
    }

    #[test]
    fn widening_a_requirement_preserves_solvability() {
        let narrow = registry(&[
            ("root", 1, &[("a", Ranges::between(1, 2))]),
            ("a", 1, &[]),
            ("a", 2, &[]),
        ]);
        let wide = registry(&[
            ("root", 1, &[("a", Ranges::between(1, 3))]),
            ("a", 1, &[]),
            ("a", 2, &[]),
        ]);

        let narrow_solution = otter_grub::resolve(&narrow, "root", 1).unwrap();
        let wide_solution = otter_grub::resolve(&wide, "root", 1).unwrap();

        assert_eq!(narrow_solution[&"a"], 1);
        assert_eq!(wide_solution[&"a"], 2);
    }

    #[test]
    fn algebra_laws_hold_for_sampled_sets() {
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..64 {
            let low = rng.gen_range(0_u32..16);
            let high = rng.gen_range(0_u32..16);
            let other = rng.gen_range(0_u32..16);

            let set = Ranges::between(low, high).union(&Ranges::higher_than(other));

            assert_eq!(set.complement().complement(), set);
            assert_eq!(set.intersection(&set.complement()), Ranges::empty());
            for version in 0..20 {
                assert_ne!(set.contains(&version), set.complement().contains(&version));
            }
        }
    }

    #[test]
    fn ties_follow_first_encounter_order() {
        // b and c tie out of the root, then c and a tie.
        // c was encountered before a, so c is decided first, against alphabetical order.
        let provider = registry(&[
            ("root", 1, &[("b", Ranges::full()), ("c", Ranges::full())]),
            ("b", 1, &[("a", Ranges::full())]),
            ("c", 1, &[]),
            ("a", 1, &[]),
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

        assert_eq!(decisions, ["root", "b", "c", "a"]);
    }

    #[test]
    fn sets_rebuilt_after_a_backjump_are_prioritised_afresh() {
        // b 2 is tried first and bounds c to >=10, <20, though both versions of e
        // require b <2, so a backjump unmakes the bound and b 1 rebuilds it as >=30, <40.
        let provider = RecordingProvider::new(registry(&[
            ("root", 1, &[("b", Ranges::full()), ("e", Ranges::full())]),
            ("b", 1, &[("c", Ranges::between(30, 40))]),
            ("b", 2, &[("c", Ranges::between(10, 20))]),
            ("c", 15, &[]),
            ("c", 35, &[]),
            ("e", 1, &[("b", Ranges::between(1, 2))]),
            ("e", 2, &[("b", Ranges::between(1, 2))]),
        ]));

        let solution = otter_grub::resolve(&provider, "root", 1).unwrap();
        assert_eq!(
            solution,
            BTreeMap::from([("root", 1), ("b", 1), ("c", 35), ("e", 2)])
        );

        let sets = provider.sets_for("c");
        assert_eq!(sets.first().map(String::as_str), Some(">=10, <20"));
        assert_eq!(sets.last().map(String::as_str), Some(">=30, <40"));
    }

    #[test]
    fn concurrent_resolutions_agree() {
        let provider = provider_from(&web_entries());

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| otter_grub::resolve(&provider, "root", 1).unwrap()))
                .collect();

            let mut solutions = handles.into_iter().map(|handle| handle.join().unwrap());
            let first = solutions.next().unwrap();
            assert!(solutions.all(|solution| solution == first));
        });
    }

    #[test]
    fn the_provider_is_asked_once_per_version() {
        let provider = CountingProvider::new(registry(&[
            ("root", 1, &[("a", Ranges::full())]),
            ("a", 1, &[("b", Ranges::full())]),
            ("b", 1, &[]),
        ]));

        otter_grub::resolve(&provider, "root", 1).unwrap();

        assert_eq!(provider.choices.get(), 3);
        assert_eq!(provider.retrievals.get(), 3);
        assert_eq!(provider.priorities.get(), 3);
    }
}

mod faults {
    use super::*;

    #[test]
    fn cancellation_is_surfaced() {
        let provider = CancellingProvider::new(
            registry(&[("root", 1, &[("a", Ranges::full())]), ("a", 1, &[])]),
            0,
        );

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::Cancelled(source)) => {
                assert_eq!(source.0, "the budget is exhausted");
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn a_generous_budget_is_not_hit() {
        let provider = CancellingProvider::new(
            registry(&[("root", 1, &[("a", Ranges::full())]), ("a", 1, &[])]),
            64,
        );

        let solution = otter_grub::resolve(&provider, "root", 1).unwrap();
        assert_eq!(solution, BTreeMap::from([("root", 1), ("a", 1)]));
    }

    #[test]
    fn retrieval_failure_is_surfaced() {
        let provider = FailingProvider::new(
            registry(&[("root", 1, &[("a", Ranges::full())]), ("a", 1, &[])]),
            "a",
            Failure::Retrieval,
        );

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::Retrieval {
                package, version, ..
            }) => {
                assert_eq!(package, "a");
                assert_eq!(version, 1);
            }

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }

    #[test]
    fn choice_failure_is_surfaced() {
        let provider = FailingProvider::new(
            registry(&[("root", 1, &[("a", Ranges::full())]), ("a", 1, &[])]),
            "a",
            Failure::Choice,
        );

        match otter_grub::resolve(&provider, "root", 1) {
            Err(ResolutionError::Choice { package, .. }) => assert_eq!(package, "a"),

            result => panic!("An unexpected resolution: {result:?}"),
        }
    }
}
