use std::fmt;

/// The real functions of one argument that an [`Expr`](super::Expr) can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Func {
    Abs,
    Sgn,
    Exp,
    Ln,
    Lg,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Cosec,
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Cosech,
    Arsinh,
    Arcosh,
    Artanh,
    Arcoth,
    Arsech,
    Arcosech,
}

/// How a function behaves under negation of its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// `f(-u) = -f(u)`.
    Odd,

    /// `f(-u) = f(u)`.
    Even,

    /// Neither.
    None,
}

impl Func {
    /// Every function, in declaration order.
    pub const ALL: [Func; 27] = [
        Func::Abs, Func::Sgn, Func::Exp, Func::Ln, Func::Lg,
        Func::Sin, Func::Cos, Func::Tan, Func::Cot, Func::Sec, Func::Cosec,
        Func::Arcsin, Func::Arccos, Func::Arctan, Func::Arccot,
        Func::Sinh, Func::Cosh, Func::Tanh, Func::Coth, Func::Sech, Func::Cosech,
        Func::Arsinh, Func::Arcosh, Func::Artanh, Func::Arcoth, Func::Arsech, Func::Arcosech,
    ];

    /// The name used to print the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Abs => "abs",
            Func::Sgn => "sgn",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Lg => "lg",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Cot => "cot",
            Func::Sec => "sec",
            Func::Cosec => "cosec",
            Func::Arcsin => "arcsin",
            Func::Arccos => "arccos",
            Func::Arctan => "arctan",
            Func::Arccot => "arccot",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Coth => "coth",
            Func::Sech => "sech",
            Func::Cosech => "cosech",
            Func::Arsinh => "arsinh",
            Func::Arcosh => "arcosh",
            Func::Artanh => "artanh",
            Func::Arcoth => "arcoth",
            Func::Arsech => "arsech",
            Func::Arcosech => "arcosech",
        }
    }

    /// Looks up a function by name. Common alternative spellings (`csc`, `asin`, `asinh`, ...)
    /// are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sign" => Func::Sgn,
            "log10" => Func::Lg,
            "csc" => Func::Cosec,
            "asin" => Func::Arcsin,
            "acos" => Func::Arccos,
            "atan" => Func::Arctan,
            "acot" => Func::Arccot,
            "csch" => Func::Cosech,
            "asinh" | "arcsinh" => Func::Arsinh,
            "acosh" | "arccosh" => Func::Arcosh,
            "atanh" | "arctanh" => Func::Artanh,
            "acoth" | "arccoth" => Func::Arcoth,
            "asech" | "arcsech" => Func::Arsech,
            "acsch" | "arcsch" | "arccsch" => Func::Arcosech,
            _ => return Self::ALL.into_iter().find(|func| func.name() == name),
        };
        Some(func)
    }

    /// Returns the names of all functions that are spelled similarly to `name`.
    pub fn similar_names(name: &str) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .map(|func| func.name())
            .filter(|candidate| levenshtein::levenshtein(candidate, name) < 2)
            .collect()
    }

    /// Returns how the function behaves under negation of its argument.
    pub fn parity(self) -> Parity {
        match self {
            Func::Sgn | Func::Sin | Func::Tan | Func::Cot | Func::Cosec
                | Func::Arcsin | Func::Arctan
                | Func::Sinh | Func::Tanh | Func::Coth | Func::Cosech
                | Func::Arsinh | Func::Artanh | Func::Arcoth | Func::Arcosech => Parity::Odd,
            Func::Abs | Func::Cos | Func::Sec | Func::Cosh | Func::Sech => Parity::Even,
            Func::Exp | Func::Ln | Func::Lg | Func::Arccos | Func::Arccot
                | Func::Arcosh | Func::Arsech => Parity::None,
        }
    }

    /// Returns the function `g` such that `self(g(u)) = u` wherever `g(u)` is defined.
    pub fn right_inverse(self) -> Option<Func> {
        match self {
            Func::Exp => Some(Func::Ln),
            Func::Sin => Some(Func::Arcsin),
            Func::Cos => Some(Func::Arccos),
            Func::Tan => Some(Func::Arctan),
            Func::Cot => Some(Func::Arccot),
            Func::Sinh => Some(Func::Arsinh),
            Func::Cosh => Some(Func::Arcosh),
            Func::Tanh => Some(Func::Artanh),
            Func::Coth => Some(Func::Arcoth),
            Func::Sech => Some(Func::Arsech),
            Func::Cosech => Some(Func::Arcosech),
            Func::Ln => Some(Func::Exp),
            Func::Arsinh => Some(Func::Sinh),
            Func::Artanh => Some(Func::Tanh),
            Func::Arcoth => Some(Func::Coth),
            Func::Arcosech => Some(Func::Cosech),
            _ => None,
        }
    }

    /// Returns true for the six circular functions.
    pub fn is_trigonometric(self) -> bool {
        matches!(self, Func::Sin | Func::Cos | Func::Tan | Func::Cot | Func::Sec | Func::Cosec)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn names_round_trip() {
        for func in Func::ALL {
            assert_eq!(Func::from_name(func.name()), Some(func));
        }
        assert_eq!(Func::from_name("csc"), Some(Func::Cosec));
        assert_eq!(Func::from_name("sqrt"), None);
    }

    #[test]
    fn suggestions() {
        assert!(Func::similar_names("sinn").contains(&"sin"));
        assert!(Func::similar_names("zzzzz").is_empty());
    }
}
