use otter_grub::structures::version::{VersionSet, ranges::Ranges};

mod algebra {
    use super::*;

    #[test]
    fn complement_involution() {
        let sets = [
            Ranges::<u32>::empty(),
            Ranges::full(),
            Ranges::singleton(3),
            Ranges::higher_than(2),
            Ranges::strictly_lower_than(7),
            Ranges::between(2, 5),
            Ranges::between(1, 3).union(&Ranges::higher_than(6)),
        ];

        for set in sets {
            assert_eq!(set.complement().complement(), set);
        }
    }

    #[test]
    fn complement_disjoint_and_exhaustive() {
        let sets = [
            Ranges::<u32>::singleton(3),
            Ranges::higher_than(2),
            Ranges::between(2, 5),
            Ranges::between(1, 3).union(&Ranges::higher_than(6)),
        ];

        for set in sets {
            assert_eq!(set.intersection(&set.complement()), Ranges::empty());
            assert_eq!(set.union(&set.complement()), Ranges::full());
            assert_ne!(set.complement(), set);
        }
    }

    #[test]
    fn containment_flips_under_complement() {
        let set = Ranges::between(2_u32, 5).union(&Ranges::higher_than(8));

        for version in 0..12 {
            assert_ne!(set.contains(&version), set.complement().contains(&version));
        }
    }

    #[test]
    fn touching_intervals_are_one() {
        let left = Ranges::between(1_u32, 3);
        let right = Ranges::between(3_u32, 5);

        assert_eq!(left.union(&right), Ranges::between(1, 5));
    }

    #[test]
    fn canonical_equality() {
        // The same denotation reached along different operations compares equal.
        let direct = Ranges::between(2_u32, 5);
        let carved = Ranges::strictly_lower_than(5)
            .intersection(&Ranges::strictly_lower_than(2).complement());

        assert_eq!(direct, carved);
    }

    #[test]
    fn subsets() {
        assert!(Ranges::between(2_u32, 5).subset_of(&Ranges::higher_than(1)));
        assert!(Ranges::singleton(3_u32).subset_of(&Ranges::between(2, 5)));
        assert!(!Ranges::higher_than(1_u32).subset_of(&Ranges::between(2, 5)));
        assert!(Ranges::<u32>::empty().subset_of(&Ranges::empty()));
    }

    #[test]
    fn disjointness() {
        assert!(Ranges::between(1_u32, 3).is_disjoint(&Ranges::between(3, 5)));
        assert!(!Ranges::between(1_u32, 4).is_disjoint(&Ranges::between(3, 5)));
    }

    #[test]
    fn empty_between() {
        assert_eq!(Ranges::between(5_u32, 5), Ranges::empty());
        assert_eq!(Ranges::between(7_u32, 5), Ranges::empty());
    }
}

mod display {
    use super::*;

    #[test]
    fn segments() {
        assert_eq!(format!("{}", Ranges::<u32>::empty()), "∅");
        assert_eq!(format!("{}", Ranges::<u32>::full()), "*");
        assert_eq!(format!("{}", Ranges::singleton(3_u32)), "==3");
        assert_eq!(format!("{}", Ranges::higher_than(2_u32)), ">=2");
        assert_eq!(format!("{}", Ranges::between(2_u32, 5)), ">=2, <5");
        assert_eq!(
            format!("{}", Ranges::between(1_u32, 3).union(&Ranges::higher_than(6))),
            ">=1, <3 | >=6"
        );
    }
}

mod terms {
    use super::*;
    use otter_grub::structures::term::Term;

    #[test]
    fn negation_involution() {
        let term = Term::Positive(Ranges::between(2_u32, 5));

        assert_eq!(term.negate().negate(), term);
        assert_ne!(term.negate(), term);
    }

    #[test]
    fn containment_flips_under_negation() {
        let term = Term::Positive(Ranges::between(2_u32, 5));

        for version in 0..8 {
            assert_ne!(term.contains(&version), term.negate().contains(&version));
        }
    }

    #[test]
    fn intersection_polarity() {
        let positive = Term::Positive(Ranges::between(2_u32, 6));
        let negative = Term::Negative(Ranges::between(4_u32, 8));

        // A positive conjunct rules out selecting nothing, whatever the other polarity.
        assert_eq!(
            positive.intersection(&negative),
            Term::Positive(Ranges::between(2, 4))
        );

        assert_eq!(
            negative.intersection(&Term::Negative(Ranges::between(1_u32, 5))),
            Term::Negative(Ranges::between(1, 8))
        );
    }

    #[test]
    fn special_terms() {
        let any: Term<Ranges<u32>> = Term::any();
        let empty: Term<Ranges<u32>> = Term::empty();

        assert_eq!(any.negate(), empty);

        for version in [0_u32, 3, 17] {
            assert!(any.contains(&version));
            assert!(!empty.contains(&version));
        }
    }

    #[test]
    fn exact() {
        let term: Term<Ranges<u32>> = Term::exact(3);

        assert!(term.contains(&3));
        assert!(!term.contains(&4));
        assert_eq!(format!("{term}"), "==3");
    }
}
