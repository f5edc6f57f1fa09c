mod args;
mod error;

use args::{Args, USAGE};
use cas_compute::{
    numerical::{eval, fmt::fmt_approx},
    symbolic::Expr,
};
use cas_parser::parser::{
    ast::{Equation, LitSym},
    Parser,
};
use cas_solver::{solve_with, Budget, SolutionSet};
use error::{AmbiguousVariable, Error, NoVariable};
use log::{info, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::{
    io::{self, BufRead, IsTerminal},
    ops::Range,
    process::ExitCode,
};

/// Significant digits shown for approximate values.
const APPROX_DIGITS: usize = 12;

/// The variable assumed when none is named and the equation contains `x`.
const DEFAULT_VARIABLE: &str = "x";

/// An equation and its solutions.
struct Solved {
    var: String,
    set: SolutionSet,
}

/// Picks the variable to solve for: the one named after the comma, else `x` if it occurs, else
/// the only symbol in the equation.
fn choose_variable(
    lhs: &Expr,
    rhs: &Expr,
    named: Option<LitSym>,
    span: Range<usize>,
) -> Result<String, Error> {
    if let Some(var) = named {
        return Ok(var.name);
    }

    let mut symbols = lhs.free_symbols();
    symbols.extend(rhs.free_symbols());
    if symbols.contains(DEFAULT_VARIABLE) {
        return Ok(DEFAULT_VARIABLE.to_string());
    }

    let mut symbols = symbols.into_iter();
    match (symbols.next(), symbols.next()) {
        (Some(var), None) => Ok(var),
        (None, _) => Err(cas_error::Error::new(vec![span], NoVariable).into()),
        (Some(first), Some(second)) => {
            let candidates = [first, second].into_iter().chain(symbols).collect();
            Err(cas_error::Error::new(vec![span], AmbiguousVariable { candidates }).into())
        },
    }
}

/// Parses one line of input as an equation and solves it.
fn solve_line(input: &str, args: &Args) -> Result<Solved, Error> {
    let eq = Parser::new(input).try_parse_full::<Equation>()?;
    let span = eq.span.clone();
    let lhs = Expr::try_from(eq.lhs)?;
    let rhs = Expr::try_from(eq.rhs)?;
    let var = choose_variable(&lhs, &rhs, eq.var, span)?;

    let mut budget = Budget::new(args.budget);
    let set = solve_with(&lhs, &rhs, &var, &mut budget, &args.options);
    if budget.is_exhausted() {
        info!("budget exhausted while solving `{}`; the solutions may be incomplete", input.trim());
    }
    Ok(Solved { var, set })
}

/// Prints a solution set, followed by decimal approximations of its members.
fn print_solved(solved: &Solved) {
    println!("{}", solved.set);
    for expr in solved.set.iter().filter(|expr| !expr.is_number()) {
        if let Ok(value) = eval(expr) {
            println!("  {} ≈ {}", solved.var, fmt_approx(&value, APPROX_DIGITS));
        }
    }
}

/// Solves one line and prints the result or the error. Returns false if the line had an error.
fn run_line(input: &str, args: &Args) -> bool {
    match solve_line(input, args) {
        Ok(solved) => {
            print_solved(&solved);
            true
        },
        Err(err) => {
            err.report_to_stderr(input);
            false
        },
    }
}

/// Returns true for lines that hold no equation.
fn is_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Solves every line read from `reader`. Returns false if any line had an error.
fn run_batch(reader: impl BufRead, args: &Args) -> io::Result<bool> {
    let mut ok = true;
    for line in reader.lines() {
        let line = line?;
        if !is_blank(&line) {
            ok &= run_line(&line, args);
        }
    }
    Ok(ok)
}

/// Runs the interactive prompt until end of input.
fn run_repl(args: &Args) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, args: &Args) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if is_blank(&input) {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        run_line(&input, args);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, args) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}

/// Installs the terminal logger on stderr.
fn init_logger(level: LevelFilter) {
    let logger = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
    if let Err(err) = logger {
        eprintln!("could not install logger: {}", err);
    }
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        },
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    init_logger(args.log_level(std::env::var("CAS_LOG").ok().as_deref()));

    let result = if let Some(filename) = &args.file {
        std::fs::File::open(filename)
            .and_then(|file| run_batch(io::BufReader::new(file), &args))
            .map_err(|err| format!("could not read `{}`: {}", filename, err))
    } else if !io::stdin().is_terminal() {
        run_batch(io::stdin().lock(), &args)
            .map_err(|err| format!("could not read stdin: {}", err))
    } else {
        run_repl(&args)
            .map(|()| true)
            .map_err(|err| err.to_string())
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn variable(lhs: &str, rhs: &str) -> Result<String, Error> {
        choose_variable(&parse_expr(lhs).unwrap(), &parse_expr(rhs).unwrap(), None, 0..1)
    }

    #[test]
    fn prefers_x() {
        assert_eq!(variable("a*x + b", "0").unwrap(), "x");
    }

    #[test]
    fn single_symbol() {
        assert_eq!(variable("sin(t)", "1/2").unwrap(), "t");
        assert_eq!(variable("2pi*r", "1").unwrap(), "r");
    }

    #[test]
    fn no_or_many_symbols() {
        assert!(variable("1", "2").is_err());
        assert!(variable("a + b", "c").is_err());
    }

    #[test]
    fn named_variable() {
        let solved = solve_line("a*y + b = 0, y", &Args::default()).unwrap();
        assert_eq!(solved.var, "y");
        assert_eq!(solved.set.to_string(), "{-b/a}");
    }

    #[test]
    fn solves_lines() {
        let solved = solve_line("x^2 = 9", &Args::default()).unwrap();
        assert_eq!(solved.set.len(), Some(2));
        assert!(solve_line("x^2 +", &Args::default()).is_err());
        assert!(solve_line("x^2", &Args::default()).is_err());
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank("   "));
        assert!(is_blank("# comment"));
        assert!(!is_blank("x = 1"));
    }
}
