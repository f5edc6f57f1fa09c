//! An ordered sequence of expressions with optional holes.

use cas_compute::symbolic::Expr;

/// An ordered, growable sequence of [`Expr`]s where any slot may be empty.
///
/// The length of the sequence is its _bound_: one past the highest occupied slot. Slots below the
/// bound may be empty; removing the last occupied slot shrinks the bound down to the next occupied
/// slot. The same type backs the coefficient vectors of polynomials (where slot `i` holds the
/// coefficient of `x^i`, and an empty slot is a zero coefficient) and the members of a
/// [`SolutionSet`](crate::SolutionSet).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprSeq {
    /// Invariant: the last slot, if any, is occupied.
    slots: Vec<Option<Expr>>,
}

impl ExprSeq {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bound of the sequence, one past the highest occupied slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of occupied slots.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the expression in slot `i`, if it is occupied.
    pub fn get(&self, i: usize) -> Option<&Expr> {
        self.slots.get(i).and_then(Option::as_ref)
    }

    /// Appends an expression at the bound.
    pub fn push(&mut self, expr: Expr) {
        self.slots.push(Some(expr));
    }

    /// Writes an expression into slot `i`, extending the bound if needed.
    pub fn put(&mut self, i: usize, expr: Expr) {
        if i >= self.slots.len() {
            self.slots.resize(i + 1, None);
        }
        self.slots[i] = Some(expr);
    }

    /// Empties slot `i`, returning its expression. The slots after `i` keep their indices.
    pub fn remove(&mut self, i: usize) -> Option<Expr> {
        let removed = self.slots.get_mut(i)?.take();
        self.trim();
        removed
    }

    /// Removes slot `i` entirely, shifting every later slot down by one.
    pub fn remove_compacting(&mut self, i: usize) -> Option<Expr> {
        if i >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(i);
        self.trim();
        removed
    }

    /// Removes every empty slot, keeping the order of the occupied ones.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    /// Iterates over the occupied slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.slots.iter().flatten()
    }

    /// Iterates over the occupied slots in order, with their indices.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Expr)> {
        self.slots.iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|expr| (i, expr)))
    }

    /// Restores the invariant that the last slot is occupied.
    fn trim(&mut self) {
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }
}

impl FromIterator<Expr> for ExprSeq {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        Self { slots: iter.into_iter().map(Some).collect() }
    }
}

impl IntoIterator for ExprSeq {
    type Item = Expr;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<Expr>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn seq(values: &[i32]) -> ExprSeq {
        values.iter().map(|&n| Expr::num(n)).collect()
    }

    #[test]
    fn remove_recomputes_bound() {
        let mut s = ExprSeq::new();
        s.put(0, Expr::num(1));
        s.put(4, Expr::num(5));
        assert_eq!(s.len(), 5);
        assert_eq!(s.count(), 2);

        assert_eq!(s.remove(4), Some(Expr::num(5)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.remove(0), Some(Expr::num(1)));
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn remove_keeps_indices() {
        let mut s = seq(&[1, 2, 3]);
        s.remove(1);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(2), Some(&Expr::num(3)));
        assert_eq!(s.iter_indexed().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn remove_compacting_shifts() {
        let mut s = seq(&[1, 2, 3]);
        assert_eq!(s.remove_compacting(0), Some(Expr::num(1)));
        assert_eq!(s, seq(&[2, 3]));
        assert_eq!(s.remove_compacting(7), None);
    }

    #[test]
    fn copies_are_independent() {
        let original = seq(&[1, 2]);
        let mut copy = original.clone();
        copy.push(Expr::num(3));
        copy.compact();
        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn compact_drops_holes() {
        let mut s = ExprSeq::new();
        s.put(1, Expr::num(2));
        s.put(3, Expr::num(4));
        s.compact();
        assert_eq!(s, seq(&[2, 4]));
    }
}
