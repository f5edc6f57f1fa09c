use super::{Expr, Primary};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). The argument of a function call is visited before the call itself.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Primary(Primary::Call(_, arg)) => {
                    if self.is_last_visited(arg) {
                        return self.visit();
                    }
                    self.stack.push(arg);
                },
                Expr::Primary(_) => return self.visit(),
                Expr::Add(children) | Expr::Mul(children) => match children.last() {
                    Some(last) if !self.is_last_visited(last) => {
                        self.stack.extend(children.iter().rev());
                    },
                    _ => return self.visit(),
                },
                Expr::Exp(base, exp) => {
                    if self.is_last_visited(exp) {
                        return self.visit();
                    }
                    self.stack.push(exp);
                    self.stack.push(base);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::expr::Func;

    #[test]
    fn post_order() {
        let expr = Expr::call(Func::Sin, Expr::sym("x")) + Expr::sym("y").pow(Expr::num(2));
        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "sin(x)", "y", "2", "y^2", "sin(x) + y^2"]);
    }
}
