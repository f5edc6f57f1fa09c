use approx::assert_relative_eq;
use cas_compute::numerical::eval;
use cas_compute::symbolic::{equivalent, parse_expr, Expr};
use cas_solver::{solve, solve_zero, Budget, SolutionSet};
use pretty_assertions::assert_eq;

fn expr(s: &str) -> Expr {
    parse_expr(s).unwrap()
}

/// Evaluates every solution with the parameter `K_1` set to `k`, in increasing order.
fn values_at(set: &SolutionSet, k: i32) -> Vec<f64> {
    let mut values = set.iter()
        .map(|e| {
            let e = e.replace_variable("K_1", &Expr::num(k));
            eval(&e).unwrap().to_f64()
        })
        .collect::<Vec<_>>();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

fn values(set: &SolutionSet) -> Vec<f64> {
    values_at(set, 0)
}

/// Asserts that the set has exactly the given members, up to equivalence.
fn assert_members(set: &SolutionSet, expected: &[&str]) {
    assert_eq!(set.len(), Some(expected.len()), "{}", set);
    for member in expected {
        let member = expr(member);
        assert!(set.iter().any(|e| equivalent(e, &member)), "{} not in {}", member, set);
    }
}

fn assert_values(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(a, e, epsilon = 1e-10, max_relative = 1e-10);
    }
}

#[test]
fn exponential_of_a_quartic() {
    let set = solve(&expr("5exp(x^4 - 7)"), &expr("2"), "x", &mut Budget::default());
    let root = (7.0 + (2.0f64 / 5.0).ln()).powf(0.25);
    assert_values(&values(&set), &[-root, root]);

    let shown = set.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert!(shown.contains(&"(ln(2/5) + 7)^(1/4)".to_string()), "{:?}", shown);
    assert!(shown.contains(&"-(ln(2/5) + 7)^(1/4)".to_string()), "{:?}", shown);
}

#[test]
fn cubic_with_a_rational_root() {
    let set = solve_zero(&expr("x^3 + 3x^2 - 5x + 1"), "x", &mut Budget::default());
    let sqrt5 = 5f64.sqrt();
    assert_values(&values(&set), &[-2.0 - sqrt5, sqrt5 - 2.0, 1.0]);
    assert!(set.iter().any(|e| e.is_number_eq(1)));
}

#[test]
fn quartic_without_real_roots() {
    let set = solve_zero(&expr("x^4 + 2"), "x", &mut Budget::default());
    assert_eq!(set, SolutionSet::NoSolutions);
    assert!(set.is_empty());
}

#[test]
fn quotient_excludes_roots_of_the_denominator() {
    let set = solve_zero(&expr("(x^2 + 5x - 14)/(x - 2)"), "x", &mut Budget::default());
    assert_eq!(set.to_string(), "{-7}");
}

#[test]
fn sine_families() {
    let set = solve(&expr("sin(x)"), &expr("1/2"), "x", &mut Budget::default());
    assert_members(&set, &["pi/6 + 2pi*K_1", "5pi/6 + 2pi*K_1"]);
    assert!(set.iter().all(|e| !e.to_string().contains("arcsin")), "{}", set);

    let pi = std::f64::consts::PI;
    assert_values(&values_at(&set, 0), &[pi / 6.0, 5.0 * pi / 6.0]);
    assert_values(&values_at(&set, 1), &[pi / 6.0 + 2.0 * pi, 5.0 * pi / 6.0 + 2.0 * pi]);
}

#[test]
fn polynomial_in_an_exponential() {
    let set = solve_zero(
        &expr("exp(3x) - 20exp(2x) + 101exp(x) - 130"),
        "x",
        &mut Budget::default(),
    );
    assert_values(&values(&set), &[2f64.ln(), 5f64.ln(), 13f64.ln()]);
}
