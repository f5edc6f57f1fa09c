//! Command-line arguments.

use cas_solver::{Budget, SolveOptions};
use log::LevelFilter;
use std::{fmt, str::FromStr};

/// Printed for `-h` / `--help`.
pub const USAGE: &str = "\
usage: cas-solve [options] [file]

Solves equations of the form `lhs = rhs[, var]`, one per line. Without a file, equations are read
from stdin, or interactively if stdin is a terminal.

options:
  --budget N        allow N recursive solver steps per equation (default 1000)
  --max-degree N    do not find roots of polynomials above degree N (default 100)
  -v, -vv, -vvv     log solver decisions (info, debug, trace)
  -h, --help        print this message

The CAS_LOG environment variable (error, warn, info, debug, trace) sets the log level when no -v
flag is given.";

/// An invalid command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// An option that takes a value was the last argument.
    MissingValue(String),

    /// An option's value could not be read as a number.
    InvalidNumber { option: String, value: String },

    /// The option is not recognized.
    UnknownOption(String),

    /// More than one input file was given.
    ExtraArgument(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingValue(option) => write!(f, "`{}` expects a value", option),
            Self::InvalidNumber { option, value } => {
                write!(f, "`{}` expects a number, found `{}`", option, value)
            },
            Self::UnknownOption(option) => write!(f, "unknown option `{}`", option),
            Self::ExtraArgument(arg) => write!(f, "unexpected argument `{}`", arg),
        }
    }
}

impl std::error::Error for ArgsError {}

/// The parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Recursive steps allowed for each equation.
    pub budget: usize,

    /// Solver tuning.
    pub options: SolveOptions,

    /// Number of `-v` flags given.
    pub verbosity: usize,

    /// File to read equations from, instead of stdin.
    pub file: Option<String>,

    /// True if help was requested.
    pub help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            budget: Budget::DEFAULT,
            options: SolveOptions::default(),
            verbosity: 0,
            file: None,
            help: false,
        }
    }
}

/// Reads the value following `option` as a number.
fn number<T: FromStr>(option: &str, value: Option<String>) -> Result<T, ArgsError> {
    let value = value.ok_or_else(|| ArgsError::MissingValue(option.to_string()))?;
    value.parse().map_err(|_| ArgsError::InvalidNumber {
        option: option.to_string(),
        value,
    })
}

impl Args {
    /// Parses the arguments, not including the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--budget" => parsed.budget = number(&arg, args.next())?,
                "--max-degree" => {
                    let max_degree = number(&arg, args.next())?;
                    parsed.options = parsed.options.with_max_degree(max_degree);
                },
                "-h" | "--help" => parsed.help = true,
                flag if flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v') => {
                    parsed.verbosity += flag.len() - 1;
                },
                flag if flag.starts_with('-') => return Err(ArgsError::UnknownOption(arg)),
                _ if parsed.file.is_some() => return Err(ArgsError::ExtraArgument(arg)),
                _ => parsed.file = Some(arg),
            }
        }

        Ok(parsed)
    }

    /// The log level selected by `-v` flags, or by `env` (the value of `CAS_LOG`) if there were
    /// none.
    pub fn log_level(&self, env: Option<&str>) -> LevelFilter {
        match self.verbosity {
            0 => env
                .and_then(|level| LevelFilter::from_str(level.trim()).ok())
                .unwrap_or(LevelFilter::Warn),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn options_and_file() {
        let args = parse(&["--budget", "50", "-vv", "--max-degree", "4", "eqs.txt"]).unwrap();
        assert_eq!(args.budget, 50);
        assert_eq!(args.options.max_degree, 4);
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.file.as_deref(), Some("eqs.txt"));
    }

    #[test]
    fn invalid_arguments() {
        assert_eq!(parse(&["--budget"]), Err(ArgsError::MissingValue("--budget".to_string())));
        assert_eq!(
            parse(&["--max-degree", "many"]),
            Err(ArgsError::InvalidNumber {
                option: "--max-degree".to_string(),
                value: "many".to_string(),
            }),
        );
        assert_eq!(parse(&["--fast"]), Err(ArgsError::UnknownOption("--fast".to_string())));
        assert_eq!(parse(&["a", "b"]), Err(ArgsError::ExtraArgument("b".to_string())));
    }

    #[test]
    fn log_levels() {
        let quiet = Args::default();
        assert_eq!(quiet.log_level(None), LevelFilter::Warn);
        assert_eq!(quiet.log_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(quiet.log_level(Some("loud")), LevelFilter::Warn);

        let verbose = parse(&["-v", "-v"]).unwrap();
        assert_eq!(verbose.log_level(Some("error")), LevelFilter::Debug);
    }
}
