//! The result of solving an equation.

use cas_compute::symbolic::{equivalent, Expr};
use std::fmt;
use super::seq::ExprSeq;

/// The solutions of an equation.
///
/// A finite set that is empty means that no solution was found, not that none exists. Only
/// [`SolutionSet::NoSolutions`] proves that the equation has no real solution.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionSet {
    /// The solutions that were found, with no two equivalent members.
    Finite(ExprSeq),

    /// The equation holds for every real value of the variable.
    AllReals,

    /// The equation provably has no real solution.
    NoSolutions,
}

impl Default for SolutionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl SolutionSet {
    /// An empty finite set: nothing was found.
    pub fn empty() -> Self {
        Self::Finite(ExprSeq::new())
    }

    /// A finite set with one member.
    pub fn single(expr: Expr) -> Self {
        Self::Finite(std::iter::once(expr).collect())
    }

    /// Returns true if the set has no members: either nothing was found, or there is provably no
    /// solution.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Finite(seq) => seq.is_empty(),
            Self::AllReals => false,
            Self::NoSolutions => true,
        }
    }

    /// Returns the number of members of a finite set, or [`None`] for [`SolutionSet::AllReals`].
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Finite(seq) => Some(seq.count()),
            Self::AllReals => None,
            Self::NoSolutions => Some(0),
        }
    }

    /// Iterates over the members of a finite set. The sentinels have no members to list.
    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        let seq = match self {
            Self::Finite(seq) => Some(seq),
            _ => None,
        };
        seq.into_iter().flat_map(ExprSeq::iter)
    }

    /// Adds a member to a finite set, unless an equivalent member is already present.
    ///
    /// Inserting into [`SolutionSet::NoSolutions`] turns it into a finite set, while
    /// [`SolutionSet::AllReals`] absorbs the new member.
    pub fn insert(&mut self, expr: Expr) {
        match self {
            Self::Finite(seq) => {
                if !seq.iter().any(|member| equivalent(member, &expr)) {
                    seq.push(expr);
                }
            },
            Self::AllReals => {},
            Self::NoSolutions => *self = Self::single(expr),
        }
    }

    /// Returns the union of two sets.
    ///
    /// [`SolutionSet::AllReals`] absorbs everything. The union is
    /// [`SolutionSet::NoSolutions`] only if both sets are; otherwise the members of both finite
    /// sets are merged.
    pub fn union(self, other: Self) -> Self {
        match (self, other) {
            (Self::AllReals, _) | (_, Self::AllReals) => Self::AllReals,
            (Self::NoSolutions, Self::NoSolutions) => Self::NoSolutions,
            (Self::NoSolutions, finite) | (finite, Self::NoSolutions) => finite,
            (Self::Finite(a), Self::Finite(b)) => {
                let mut union = Self::Finite(a);
                for expr in b {
                    union.insert(expr);
                }
                union
            },
        }
    }

    /// Returns the union of all the given sets, or an empty set if there are none.
    pub fn union_all(sets: impl IntoIterator<Item = Self>) -> Self {
        sets.into_iter()
            .reduce(Self::union)
            .unwrap_or_default()
    }

    /// Returns the intersection of two sets.
    ///
    /// [`SolutionSet::AllReals`] is the identity, and [`SolutionSet::NoSolutions`] absorbs
    /// everything. Members of finite sets are compared by equivalence.
    pub fn intersection(self, other: Self) -> Self {
        match (self, other) {
            (Self::AllReals, other) | (other, Self::AllReals) => other,
            (Self::NoSolutions, _) | (_, Self::NoSolutions) => Self::NoSolutions,
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(
                a.into_iter()
                    .filter(|member| b.iter().any(|other| equivalent(member, other)))
                    .collect(),
            ),
        }
    }

    /// Keeps only the members of a finite set for which the predicate returns true. The sentinels
    /// are returned unchanged.
    pub fn retain(self, mut f: impl FnMut(&Expr) -> bool) -> Self {
        match self {
            Self::Finite(seq) => Self::Finite(seq.into_iter().filter(|expr| f(expr)).collect()),
            sentinel => sentinel,
        }
    }

    /// Applies a function to every member of a finite set, merging members that become
    /// equivalent. The sentinels are returned unchanged.
    pub fn map(self, mut f: impl FnMut(Expr) -> Expr) -> Self {
        match self {
            Self::Finite(seq) => {
                let mut mapped = Self::empty();
                for expr in seq {
                    mapped.insert(f(expr));
                }
                mapped
            },
            sentinel => sentinel,
        }
    }

    /// Replaces every member of a finite set with a set of its own, and returns the union of those
    /// sets. The sentinels are returned unchanged.
    ///
    /// The finite set is not assumed to hold every solution, so if every member maps to
    /// [`SolutionSet::NoSolutions`], the result is an empty finite set rather than
    /// [`SolutionSet::NoSolutions`]. Use [`SolutionSet::flat_map_complete`] when the set is known
    /// to be complete.
    pub fn flat_map(self, f: impl FnMut(Expr) -> SolutionSet) -> Self {
        match self.flat_map_complete(f) {
            Self::NoSolutions => Self::empty(),
            set => set,
        }
    }

    /// Like [`SolutionSet::flat_map`], for a finite set that holds every solution: if every member
    /// maps to [`SolutionSet::NoSolutions`], so does the whole set.
    pub fn flat_map_complete(self, f: impl FnMut(Expr) -> SolutionSet) -> Self {
        match self {
            Self::Finite(seq) => Self::union_all(seq.into_iter().map(f)),
            sentinel => sentinel,
        }
    }

    /// Calls [`SolutionSet::flat_map_complete`] if `complete` is true, and
    /// [`SolutionSet::flat_map`] otherwise.
    pub(crate) fn flat_map_with(self, complete: bool, f: impl FnMut(Expr) -> SolutionSet) -> Self {
        if complete {
            self.flat_map_complete(f)
        } else {
            self.flat_map(f)
        }
    }
}

impl FromIterator<Expr> for SolutionSet {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        let mut set = Self::empty();
        for expr in iter {
            set.insert(expr);
        }
        set
    }
}

impl fmt::Display for SolutionSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Finite(seq) => {
                write!(f, "{{")?;
                for (i, expr) in seq.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                write!(f, "}}")
            },
            Self::AllReals => write!(f, "ℝ"),
            Self::NoSolutions => write!(f, "∅"),
        }
    }
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn set(members: &[&str]) -> SolutionSet {
        members.iter().map(|m| parse_expr(m).unwrap()).collect()
    }

    #[test]
    fn insert_skips_equivalent_members() {
        let s = set(&["2", "4/2", "sqrt(4)", "3"]);
        assert_eq!(s.len(), Some(2));
        assert_eq!(s.to_string(), "{2, 3}");
    }

    #[test]
    fn union_propagates_sentinels() {
        assert_eq!(SolutionSet::NoSolutions.union(SolutionSet::NoSolutions), SolutionSet::NoSolutions);
        assert_eq!(SolutionSet::AllReals.union(set(&["1"])), SolutionSet::AllReals);
        assert_eq!(SolutionSet::NoSolutions.union(set(&["1"])), set(&["1"]));
        assert_eq!(set(&["1", "2"]).union(set(&["2", "3"])), set(&["1", "2", "3"]));
    }

    #[test]
    fn intersection_propagates_sentinels() {
        assert_eq!(SolutionSet::AllReals.intersection(set(&["1"])), set(&["1"]));
        assert_eq!(set(&["1"]).intersection(SolutionSet::NoSolutions), SolutionSet::NoSolutions);
        assert_eq!(set(&["0", "1"]).intersection(set(&["0"])), set(&["0"]));
        assert!(set(&["1"]).intersection(set(&["2"])).is_empty());
    }

    #[test]
    fn flat_map_of_partial_roots() {
        let none = |_| SolutionSet::NoSolutions;
        assert_eq!(set(&["1", "2"]).flat_map(none), SolutionSet::empty());
        assert_eq!(set(&["1", "2"]).flat_map_complete(none), SolutionSet::NoSolutions);

        let three = |e: Expr| if e.is_number_eq(1) {
            SolutionSet::NoSolutions
        } else {
            SolutionSet::single(Expr::num(3))
        };
        assert_eq!(set(&["1", "4"]).flat_map(three), set(&["3"]));
        assert_eq!(SolutionSet::NoSolutions.flat_map(three), SolutionSet::NoSolutions);
    }

    #[test]
    fn union_of_nothing_is_empty() {
        assert_eq!(SolutionSet::union_all(Vec::new()), SolutionSet::empty());
    }

    #[test]
    fn display() {
        assert_eq!(SolutionSet::AllReals.to_string(), "ℝ");
        assert_eq!(SolutionSet::NoSolutions.to_string(), "∅");
        assert_eq!(SolutionSet::empty().to_string(), "{}");
    }
}
