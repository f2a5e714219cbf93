use std::sync::Arc;

use otter_grub::{
    config::Config,
    context::Context,
    provider::OfflineProvider,
    reports::{Derived, DerivationTree, External, text},
    structures::{term::Term, version::ranges::Ranges},
    types::err::ResolutionError,
};

fn failure_report(provider: &OfflineProvider<&'static str, Ranges<u32>>, config: Config) -> String {
    let mut the_context = Context::from_config(config);
    match the_context.resolve(provider, "root", 1) {
        Err(ResolutionError::NoSolution(tree)) => text::report(&tree),
        _ => panic!("A solution without versions"),
    }
}

mod reports {
    use super::*;

    #[test]
    fn missing_version() {
        let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
        provider.add_dependencies("root", 1, [("a", Ranges::higher_than(2))]);
        provider.add_dependencies("a", 1, []);

        let report = failure_report(&provider, Config::default());

        assert!(report.starts_with("1. because "));
        assert!(report.contains("no versions of a satisfy >=2"));
        assert!(report.contains("root ==1 depends on a >=2"));
        assert!(report.contains("root ==1 is forbidden"));
    }

    #[test]
    fn lines_are_numbered_in_order() {
        let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
        provider.add_dependencies("root", 1, [("a", Ranges::between(1, 2))]);
        provider.add_dependencies("a", 1, [("b", Ranges::higher_than(5))]);
        provider.add_dependencies("b", 2, []);

        let report = failure_report(&provider, Config::default());

        for (index, line) in report.lines().enumerate() {
            assert!(line.starts_with(&format!("{}. because ", index + 1)));
        }
    }

    #[test]
    fn collapsing_absent_versions() {
        let mut provider = OfflineProvider::<&str, Ranges<u32>>::default();
        provider.add_dependencies("root", 1, [("a", Ranges::between(1, 2))]);
        provider.add_dependencies("a", 1, [("b", Ranges::higher_than(5))]);
        provider.add_dependencies("b", 2, []);

        let full = failure_report(&provider, Config::default());
        assert!(full.contains("no versions of b satisfy >=5"));

        let collapsed = failure_report(
            &provider,
            Config {
                collapse_unavailable: true,
            },
        );
        assert!(!collapsed.contains("no versions"));
        assert!(collapsed.contains("depends on b >=5"));
        assert!(collapsed.contains("root ==1 is forbidden"));
    }
}

mod citations {
    use super::*;

    type Tree = DerivationTree<&'static str, Ranges<u32>, String>;

    // A tree with a node cited along two paths:
    //
    //          failure
    //         /       \
    //     shared      a required
    //     /    \      /        \
    //   (b∅)  (a→b) shared    (root→a)
    fn shared_tree() -> Tree {
        let shared = Arc::new(DerivationTree::Derived(Derived {
            terms: vec![("b", Term::Positive(Ranges::higher_than(2)))],
            shared_id: Some(7),
            cause1: Arc::new(DerivationTree::External(External::NoVersions(
                "b",
                Ranges::higher_than(2),
            ))),
            cause2: Arc::new(DerivationTree::External(External::Dependency(
                "a",
                Ranges::singleton(1),
                "b",
                Ranges::higher_than(2),
            ))),
        }));

        let required = Arc::new(DerivationTree::Derived(Derived {
            terms: vec![("a", Term::Negative(Ranges::singleton(1)))],
            shared_id: None,
            cause1: shared.clone(),
            cause2: Arc::new(DerivationTree::External(External::Dependency(
                "root",
                Ranges::singleton(1),
                "a",
                Ranges::singleton(1),
            ))),
        }));

        DerivationTree::Derived(Derived {
            terms: vec![],
            shared_id: None,
            cause1: shared,
            cause2: required,
        })
    }

    #[test]
    fn shared_nodes_are_explained_once() {
        let expected = "\
1. because no versions of b satisfy >=2 and a ==1 depends on b >=2, b >=2 is forbidden
2. because b >=2 is forbidden (line 1) and root ==1 depends on a ==1, a is required at ==1
3. because b >=2 is forbidden (line 1) and a is required at ==1 (line 2), version solving failed";

        assert_eq!(text::report(&shared_tree()), expected);
    }

    #[test]
    fn axioms_are_cited_verbatim() {
        let tree: Tree = DerivationTree::External(External::Unavailable(
            "a",
            Ranges::singleton(3),
            "the tarball is corrupt".to_string(),
        ));

        assert_eq!(
            text::report(&tree),
            "versions ==3 of a are unavailable (the tarball is corrupt)"
        );

        let tree: Tree = DerivationTree::External(External::NotRoot("root", 1));
        assert_eq!(text::report(&tree), "the root requirement is root 1");
    }
}
