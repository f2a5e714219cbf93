/*!
The default version set: a finite union of intervals over a totally ordered version type, kept in a canonical form.

A [Ranges] is a sorted sequence of non-empty, pairwise disjoint intervals, each interval a pair of [bounds](std::ops::Bound).
Canonical form requires, in addition, that no two intervals in the sequence touch --- any pair of intervals which could be written as one interval is written as one interval.
As every offered operation preserves canonical form, denotational questions about sets built from the offered operations reduce to structural questions, and in particular structural equality decides whether two such sets contain the same versions (see [the module documentation](crate::structures::version) for why this matters).

Touching is judged against the bounds, not against the version type.
For example, over the integers `(-∞, 2] ∪ [4, ∞)` is kept as two intervals even though no integer sits strictly between 2 and 4, as whether versions are discrete is not visible to the algebra.
Sets built from the offered operations are never mixed representations of the same bounds, so the canonical invariant holds regardless.

# Example

```rust
# use otter_grub::structures::version::ranges::Ranges;
let yanked = Ranges::between(4_u32, 7);
let available = yanked.complement();

assert!(!available.contains(&5));
assert!(available.contains(&7));
assert_eq!(available.complement(), yanked);
```
*/

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound::{self, Excluded, Included, Unbounded};

use crate::structures::version::{Version, VersionSet};

/// An interval over versions, as a pair of bounds.
pub type Interval<V> = (Bound<V>, Bound<V>);

/// A set of versions, as a sorted union of disjoint, non-touching, non-empty intervals.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ranges<V> {
    segments: Vec<Interval<V>>,
}

impl<V: Version> Ranges<V> {
    /// The set containing no version.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// The set containing every version.
    pub fn full() -> Self {
        Self {
            segments: vec![(Unbounded, Unbounded)],
        }
    }

    /// The set containing exactly `version`.
    pub fn singleton(version: V) -> Self {
        Self {
            segments: vec![(Included(version.clone()), Included(version))],
        }
    }

    /// The set of versions greater than or equal to `version`.
    pub fn higher_than(version: V) -> Self {
        Self {
            segments: vec![(Included(version), Unbounded)],
        }
    }

    /// The set of versions strictly greater than `version`.
    pub fn strictly_higher_than(version: V) -> Self {
        Self {
            segments: vec![(Excluded(version), Unbounded)],
        }
    }

    /// The set of versions less than or equal to `version`.
    pub fn lower_than(version: V) -> Self {
        Self {
            segments: vec![(Unbounded, Included(version))],
        }
    }

    /// The set of versions strictly less than `version`.
    pub fn strictly_lower_than(version: V) -> Self {
        Self {
            segments: vec![(Unbounded, Excluded(version))],
        }
    }

    /// The set of versions at least `low` and strictly less than `high`, empty unless `low < high`.
    pub fn between(low: V, high: V) -> Self {
        if low < high {
            Self {
                segments: vec![(Included(low), Excluded(high))],
            }
        } else {
            Self::empty()
        }
    }

    /// Whether `version` is contained in the set.
    pub fn contains(&self, version: &V) -> bool {
        self.segments
            .iter()
            .any(|segment| segment_contains(segment, version))
    }

    /// The set of versions not contained in the set.
    pub fn complement(&self) -> Self {
        let ranges = match self.segments.first() {
            None => Self::full(),

            Some((Unbounded, Unbounded)) => Self::empty(),

            Some((Unbounded, end)) => Self::gaps(invert(end), &self.segments[1..]),

            Some(_) => Self::gaps(Unbounded, &self.segments),
        };

        debug_assert!(ranges.canonical());
        ranges
    }

    /// The set of versions contained in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut segments = Vec::new();
        let mut ours = self.segments.iter().peekable();
        let mut theirs = other.segments.iter().peekable();

        while let (Some((our_start, our_end)), Some((their_start, their_end))) =
            (ours.peek(), theirs.peek())
        {
            let start = match cmp_starts(our_start, their_start) {
                Ordering::Less => their_start,
                _ => our_start,
            };
            let end = match cmp_ends(our_end, their_end) {
                Ordering::Greater => their_end,
                _ => our_end,
            };
            if valid_segment(start, end) {
                segments.push((start.clone(), end.clone()));
            }

            // Whichever segment closes first has been used in full.
            match cmp_ends(our_end, their_end) {
                Ordering::Less => {
                    ours.next();
                }
                Ordering::Greater => {
                    theirs.next();
                }
                Ordering::Equal => {
                    ours.next();
                    theirs.next();
                }
            }
        }

        let ranges = Self { segments };
        debug_assert!(ranges.canonical());
        ranges
    }

    /// The set of versions contained in `self` or `other`, by De Morgan.
    pub fn union(&self, other: &Self) -> Self {
        self.complement()
            .intersection(&other.complement())
            .complement()
    }

    /// The segments strictly between `start` and each of `segments`, and beyond the last.
    fn gaps(start: Bound<V>, segments: &[Interval<V>]) -> Self {
        let mut gap_segments = Vec::with_capacity(segments.len() + 1);
        let mut start = start;

        for (segment_start, segment_end) in segments {
            match segment_start {
                Unbounded => panic!("! Unsorted segments"),
                bound => gap_segments.push((start, invert(bound))),
            }
            start = match segment_end {
                Unbounded => Unbounded,
                bound => invert(bound),
            };
        }

        if !matches!(start, Unbounded) {
            gap_segments.push((start, Unbounded));
        }

        Self {
            segments: gap_segments,
        }
    }

    /// Whether the sorted, disjoint, non-touching invariant holds of the segments.
    fn canonical(&self) -> bool {
        let segments_valid = self
            .segments
            .iter()
            .all(|(start, end)| valid_segment(start, end));

        let segments_separated = self
            .segments
            .windows(2)
            .all(|pair| gap_between(&pair[0].1, &pair[1].0));

        segments_valid && segments_separated
    }
}

impl<V: Version> VersionSet for Ranges<V> {
    type V = V;

    fn empty() -> Self {
        Ranges::empty()
    }

    fn singleton(version: V) -> Self {
        Ranges::singleton(version)
    }

    fn complement(&self) -> Self {
        Ranges::complement(self)
    }

    fn intersection(&self, other: &Self) -> Self {
        Ranges::intersection(self, other)
    }

    fn contains(&self, version: &V) -> bool {
        Ranges::contains(self, version)
    }

    fn full() -> Self {
        Ranges::full()
    }

    fn union(&self, other: &Self) -> Self {
        Ranges::union(self, other)
    }
}

/// The bound on the other side of a closure: an inclusive end becomes an exclusive start, and so on.
///
/// Only meaningful for bounded bounds.
fn invert<V: Clone>(bound: &Bound<V>) -> Bound<V> {
    match bound {
        Included(version) => Excluded(version.clone()),
        Excluded(version) => Included(version.clone()),
        Unbounded => panic!("! Unbounded inversion"),
    }
}

/// Whether a segment with the given bounds contains at least one version.
fn valid_segment<V: Ord>(start: &Bound<V>, end: &Bound<V>) -> bool {
    match (start, end) {
        (Unbounded, _) | (_, Unbounded) => true,
        (Included(s), Included(e)) => s <= e,
        (Included(s), Excluded(e)) => s < e,
        (Excluded(s), Included(e)) => s < e,
        (Excluded(s), Excluded(e)) => s < e,
    }
}

/// Whether some version may sit between an end bound and the start bound following it.
///
/// When false, segments with these bounds either overlap or could be written as one segment.
fn gap_between<V: Ord>(end: &Bound<V>, start: &Bound<V>) -> bool {
    match (end, start) {
        (Unbounded, _) | (_, Unbounded) => false,
        (Included(e), Included(s)) => e < s,
        (Included(e), Excluded(s)) => e < s,
        (Excluded(e), Included(s)) => e < s,
        (Excluded(e), Excluded(s)) => e <= s,
    }
}

/// Compares two bounds, each taken as the start of a segment.
fn cmp_starts<V: Ord>(left: &Bound<V>, right: &Bound<V>) -> Ordering {
    match (left, right) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Less,
        (_, Unbounded) => Ordering::Greater,
        (Included(l), Included(r)) | (Excluded(l), Excluded(r)) => l.cmp(r),
        (Included(l), Excluded(r)) => l.cmp(r).then(Ordering::Less),
        (Excluded(l), Included(r)) => l.cmp(r).then(Ordering::Greater),
    }
}

/// Compares two bounds, each taken as the end of a segment.
fn cmp_ends<V: Ord>(left: &Bound<V>, right: &Bound<V>) -> Ordering {
    match (left, right) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Greater,
        (_, Unbounded) => Ordering::Less,
        (Included(l), Included(r)) | (Excluded(l), Excluded(r)) => l.cmp(r),
        (Included(l), Excluded(r)) => l.cmp(r).then(Ordering::Greater),
        (Excluded(l), Included(r)) => l.cmp(r).then(Ordering::Less),
    }
}

/// Whether `version` sits within the given segment.
fn segment_contains<V: Ord>((start, end): &Interval<V>, version: &V) -> bool {
    let after_start = match start {
        Unbounded => true,
        Included(s) => s <= version,
        Excluded(s) => s < version,
    };
    let before_end = match end {
        Unbounded => true,
        Included(e) => version <= e,
        Excluded(e) => version < e,
    };
    after_start && before_end
}

impl<V: Version> fmt::Display for Ranges<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "∅");
        }

        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, " | ")?;
            }
            match segment {
                (Unbounded, Unbounded) => write!(f, "*")?,
                (Unbounded, Included(e)) => write!(f, "<={e}")?,
                (Unbounded, Excluded(e)) => write!(f, "<{e}")?,
                (Included(s), Unbounded) => write!(f, ">={s}")?,
                (Excluded(s), Unbounded) => write!(f, ">{s}")?,
                (Included(s), Included(e)) if s == e => write!(f, "=={s}")?,
                (Included(s), Included(e)) => write!(f, ">={s}, <={e}")?,
                (Included(s), Excluded(e)) => write!(f, ">={s}, <{e}")?,
                (Excluded(s), Included(e)) => write!(f, ">{s}, <={e}")?,
                (Excluded(s), Excluded(e)) => write!(f, ">{s}, <{e}")?,
            }
        }

        Ok(())
    }
}
