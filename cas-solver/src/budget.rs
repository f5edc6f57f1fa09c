//! The recursion budget shared by one solve request.

/// A countdown of the recursive re-entries one solve request may make.
///
/// Every entry into the dispatcher or the zero-equation solver spends one unit. Once the budget is
/// exhausted, every pending call returns an empty solution set, so solving always terminates. A
/// budget is passed down by `&mut`, so independent solve requests never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    remaining: usize,
}

impl Budget {
    /// The number of re-entries allowed by [`Budget::default`].
    pub const DEFAULT: usize = 1000;

    /// Creates a budget allowing `remaining` re-entries.
    pub fn new(remaining: usize) -> Self {
        Self { remaining }
    }

    /// Spends one unit. Returns false, without spending anything, if the budget is exhausted.
    pub fn tick(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                true
            },
            None => false,
        }
    }

    /// Returns the number of re-entries left.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns true if no re-entries are left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
