/*!
Polarity-qualified sets of versions, used as literals about packages.

A term is a statement about which version of some package, if any, has been selected.
Given a package, a term evaluates against 'a version *v* is selected' and against 'no version is selected':

- A positive term over set *S* is true iff some version is selected and that version is in *S*.
- A negative term over set *S* is true iff no version is selected, or the selected version is not in *S*.

Negation swaps polarity, and in particular a negative term is strictly weaker than the positive term over the complement set: the negative term admits selecting nothing.
The distinction is what lets a single intersection operation conjoin everything known about a package, whether derived from a requirement (positive) or from an exclusion (negative).

Special terms:
- `Positive(empty)` is false on every evaluation.
- `Negative(empty)` is true on every evaluation.

# Notes
- Evaluation is never performed directly.
  Instead, the [relation](Term::relation_with) between a term and the intersection of observed terms decides whether the term is settled, following the same structural-equality discipline as the [version set algebra](crate::structures::version).
*/

use std::fmt;

use crate::structures::version::VersionSet;

/// A statement about which version of some package, if any, is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term<VS> {
    /// Some version must be selected, from the given set.
    Positive(VS),

    /// Either no version is selected, or the selected version is outside the given set.
    Negative(VS),
}

/// How a term stands to an observed term about the same package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relation {
    /// Every way of making the observed term true makes the term true.
    Satisfied,

    /// No way of making the observed term true makes the term true.
    Contradicted,

    /// Neither satisfied nor contradicted.
    Inconclusive,
}

impl<VS: VersionSet> Term<VS> {
    /// The term requiring exactly `version` to be selected.
    pub fn exact(version: VS::V) -> Self {
        Self::Positive(VS::singleton(version))
    }

    /// The term true on every evaluation.
    pub fn any() -> Self {
        Self::Negative(VS::empty())
    }

    /// The term false on every evaluation.
    pub fn empty() -> Self {
        Self::Positive(VS::empty())
    }

    /// The term with the same set and the opposite polarity.
    pub fn negate(&self) -> Self {
        match self {
            Self::Positive(set) => Self::Negative(set.clone()),
            Self::Negative(set) => Self::Positive(set.clone()),
        }
    }

    /// Whether the term is positive.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive(_))
    }

    /// The set of a positive term.
    ///
    /// # Panics
    /// If the term is negative.
    pub fn unwrap_positive(&self) -> &VS {
        match self {
            Self::Positive(set) => set,
            Self::Negative(_) => panic!("! Negative term"),
        }
    }

    /// Whether the term is true when `version` is selected.
    pub fn contains(&self, version: &VS::V) -> bool {
        match self {
            Self::Positive(set) => set.contains(version),
            Self::Negative(set) => !set.contains(version),
        }
    }

    /// The term true on exactly the evaluations on which both `self` and `other` are true.
    ///
    /// Note the intersection of a positive and a negative term is positive, as the positive conjunct rules out selecting nothing.
    pub fn intersection(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Positive(a), Self::Positive(b)) => Self::Positive(a.intersection(b)),

            (Self::Positive(a), Self::Negative(b)) => {
                Self::Positive(a.intersection(&b.complement()))
            }

            (Self::Negative(a), Self::Positive(b)) => {
                Self::Positive(a.complement().intersection(b))
            }

            (Self::Negative(a), Self::Negative(b)) => Self::Negative(a.union(b)),
        }
    }

    /// The term true on exactly the evaluations on which `self` or `other` is true, by De Morgan.
    pub fn union(&self, other: &Self) -> Self {
        self.negate().intersection(&other.negate()).negate()
    }

    /// Whether no evaluation makes both `self` and `other` true.
    pub(crate) fn is_disjoint(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Positive(a), Self::Positive(b)) => a.is_disjoint(b),

            (Self::Positive(a), Self::Negative(b)) => a.subset_of(b),

            (Self::Negative(a), Self::Positive(b)) => b.subset_of(a),

            // Negative terms always share the evaluation on which no version is selected.
            (Self::Negative(_), Self::Negative(_)) => false,
        }
    }

    /// The relation of the term to an observed term about the same package.
    ///
    /// `observed` is, in use, the intersection of every term recorded for the package on the
    /// [trail](crate::db::trail).
    pub(crate) fn relation_with(&self, observed: &Term<VS>) -> Relation {
        let intersection = self.intersection(observed);

        if &intersection == observed {
            Relation::Satisfied
        } else if intersection == Self::empty() {
            Relation::Contradicted
        } else {
            Relation::Inconclusive
        }
    }
}

impl<VS: VersionSet> From<VS> for Term<VS> {
    fn from(set: VS) -> Self {
        Self::Positive(set)
    }
}

impl<VS: VersionSet> fmt::Display for Term<VS> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Positive(set) => write!(f, "{set}"),
            Self::Negative(set) => write!(f, "not ( {set} )"),
        }
    }
}
