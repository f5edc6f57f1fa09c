use approx::assert_relative_eq;
use cas_compute::numerical::eval;
use cas_compute::symbolic::{parse_expr, simplify, Expr};
use cas_solver::{solve, solve_zero, solve_zero_with, Budget, SolutionSet, SolveOptions};
use pretty_assertions::assert_eq;

fn expr(s: &str) -> Expr {
    parse_expr(s).unwrap()
}

fn values(set: &SolutionSet) -> Vec<f64> {
    let mut values = set.iter()
        .map(|e| eval(e).unwrap().to_f64())
        .collect::<Vec<_>>();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Every solution makes both sides equal.
fn assert_sound(f: &str, g: &str) {
    let (f, g) = (expr(f), expr(g));
    let set = solve(&f, &g, "x", &mut Budget::default());
    assert!(!set.is_empty(), "no solutions for {} = {}", f, g);
    for root in set.iter() {
        let lhs = eval(&f.replace_variable("x", root)).unwrap().to_f64();
        let rhs = eval(&g.replace_variable("x", root)).unwrap().to_f64();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn soundness() {
    assert_sound("x^3 - 3x + 1", "0");
    assert_sound("x^3 + x + 1", "0");
    assert_sound("x^3", "2");
    assert_sound("x^4 - 5x^2 + 6", "0");
    assert_sound("x^4 - 4x^3 + 5x^2 - 4x + 1", "0");
    assert_sound("ln(x)^2 - 3ln(x) + 2", "0");
    assert_sound("(x + 2)^(1/2)", "x");
    assert_sound("x - 3x^(1/2) + 2", "0");
    assert_sound("sinh(x) + cosh(x)", "2");
    assert_sound("2^(x + 1)", "16");
    assert_sound("abs(x - 1)", "3");
    assert_sound("lg(x)", "2");
}

#[test]
fn product_law() {
    let p = expr("x^2 - 5x + 6");
    let q = expr("x^3 - 7x - 6");
    let product = solve_zero(&(p.clone() * q.clone()), "x", &mut Budget::default());
    let union = solve_zero(&p, "x", &mut Budget::default())
        .union(solve_zero(&q, "x", &mut Budget::default()));
    assert_eq!(values(&product), values(&union));
    assert_eq!(values(&product), vec![-2.0, -1.0, 2.0, 3.0]);
}

#[test]
fn vieta() {
    // a_3 = 1, a_2 = 0, a_1 = -3, a_0 = 1
    let set = solve_zero(&expr("x^3 - 3x + 1"), "x", &mut Budget::default());
    let roots = values(&set);
    assert_eq!(roots.len(), 3);
    assert_relative_eq!(roots.iter().sum::<f64>(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(roots.iter().product::<f64>(), -1.0, epsilon = 1e-9);

    let set = solve_zero(&expr("2x^2 - 6x + 1"), "x", &mut Budget::default());
    let roots = values(&set);
    assert_relative_eq!(roots.iter().sum::<f64>(), 3.0, epsilon = 1e-9);
    assert_relative_eq!(roots.iter().product::<f64>(), 0.5, epsilon = 1e-9);
}

#[test]
fn quotient_exclusion() {
    let set = solve(&expr("x/(x - 1)"), &expr("1/(x - 1)"), "x", &mut Budget::default());
    assert!(set.is_empty());
    let set = solve(&expr("x/(x - 1)"), &expr("2/(x - 1)"), "x", &mut Budget::default());
    assert_eq!(set.to_string(), "{2}");
}

#[test]
fn sentinels() {
    assert_eq!(solve(&expr("2(x + 1)"), &expr("2x + 2"), "x", &mut Budget::default()), SolutionSet::AllReals);
    assert_eq!(solve(&expr("exp(x)"), &expr("-1"), "x", &mut Budget::default()), SolutionSet::NoSolutions);
    assert_eq!(solve(&expr("x^2 + 1"), &expr("0"), "x", &mut Budget::default()), SolutionSet::NoSolutions);
    assert_eq!(solve(&expr("sin(x)"), &expr("2"), "x", &mut Budget::default()), SolutionSet::NoSolutions);
}

#[test]
fn partial_roots_do_not_prove_emptiness() {
    let set = solve_zero(&expr("x^10 + x^8 + x^4 - 2x^2 - 3"), "x", &mut Budget::default());
    assert_ne!(set, SolutionSet::NoSolutions);
    let set = solve_zero(&expr("exp(5x) + exp(4x) + exp(2x) - 2exp(x) - 3"), "x", &mut Budget::default());
    assert_ne!(set, SolutionSet::NoSolutions);
}

#[test]
fn cyclic_coefficients() {
    // (x^2 + 2x - 1)(x^3 + 1)
    let set = solve_zero(&expr("x^5 + 2x^4 - x^3 + x^2 + 2x - 1"), "x", &mut Budget::default());
    let roots = values(&set);
    assert_eq!(roots.len(), 3, "{}", set);
    assert_relative_eq!(roots[0], -1.0 - 2f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(roots[1], -1.0, epsilon = 1e-9);
    assert_relative_eq!(roots[2], 2f64.sqrt() - 1.0, epsilon = 1e-9);
}

#[test]
fn symbolic_coefficients() {
    let set = solve(&expr("a*x + b"), &expr("0"), "x", &mut Budget::default());
    assert_eq!(set.to_string(), "{-b/a}");
}

#[test]
fn trigonometric_reduction() {
    let set = solve_zero(&expr("cos(2x) + sin(x)"), "x", &mut Budget::default());
    assert_eq!(set.len(), Some(3), "{}", set);
    for root in set.iter() {
        let root = root.replace_variable("K_1", &Expr::num(0));
        let value = eval(&simplify(&expr("cos(2x) + sin(x)").replace_variable("x", &root)))
            .unwrap()
            .to_f64();
        assert_relative_eq!(value, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn budget_termination() {
    let hard = expr("sin(x)^3 + exp(x)*x - ln(x + cos(x))");
    for size in [0, 1, 5, 50] {
        let mut budget = Budget::new(size);
        let _ = solve_zero(&hard, "x", &mut budget);
    }

    // each cube root and each moved term costs one step, seven in all
    let nested = expr("(((x + 1)^3 + 1)^3 + 1)^3");
    let two = expr("2");
    assert_eq!(solve(&nested, &two, "x", &mut Budget::default()).len(), Some(1));
    for size in [1, 5] {
        let mut budget = Budget::new(size);
        let set = solve(&nested, &two, "x", &mut budget);
        assert!(budget.is_exhausted(), "{} left of {}", budget.remaining(), size);
        assert_eq!(set, SolutionSet::empty());
    }

    let mut budget = Budget::new(0);
    assert_eq!(solve_zero(&expr("x - 1"), "x", &mut budget), SolutionSet::empty());
}

#[test]
fn degree_bound() {
    let options = SolveOptions::default().with_max_degree(2);
    let set = solve_zero_with(&expr("x^3 - 8"), "x", &mut Budget::default(), &options);
    assert_eq!(set, SolutionSet::empty());
}
