//! Command-line options shared by the test and benchmark engines
//!
//! Both engines read the same argument vector independently. Parsing scans
//! left to right, later occurrences override earlier ones and unknown tokens
//! are ignored. The first token is the program name and is skipped.

use crate::error::{DryRunError, DryRunResult};

/// Crate version shown in the help text
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run configuration for one engine invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Keep registration order instead of shuffling
    pub determinate: bool,
    /// Number of copies of the test list to run; 0 and 1 both mean "once"
    pub repeat: u32,
    /// Emit ANSI colour escapes
    pub colors: bool,
    /// Print the help text and skip execution
    pub help: bool,
    /// Shuffle seed; derived from the wall clock when absent
    pub seed: Option<u64>,
}

impl Options {
    /// Parse an argument vector, including the program name at index 0
    pub fn parse<S: AsRef<str>>(args: &[S]) -> DryRunResult<Self> {
        let mut options = Options::default();
        let mut tokens = args.iter().map(|arg| arg.as_ref()).skip(1);

        while let Some(token) = tokens.next() {
            match token {
                "-d" => options.determinate = true,
                "-c" => options.colors = true,
                "-h" | "--help" => options.help = true,
                "-r" => {
                    let value = tokens.next().ok_or_else(|| DryRunError::MissingValue {
                        flag: token.to_string(),
                    })?;
                    options.repeat = parse_repeat(token, value)?;
                }
                _ => {}
            }
        }

        Ok(options)
    }

    pub fn with_determinate(mut self, determinate: bool) -> Self {
        self.determinate = determinate;
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Fix the shuffle seed so a non-determinate run can be reproduced
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// How many times the whole test list is scheduled
    pub fn passes(&self) -> usize {
        self.repeat.max(1) as usize
    }
}

/// Negative counts are accepted and mean "run once"
fn parse_repeat(flag: &str, value: &str) -> DryRunResult<u32> {
    let invalid = || DryRunError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    };

    let count: i64 = value.trim().parse().map_err(|_| invalid())?;
    if count <= 0 {
        return Ok(0);
    }
    u32::try_from(count).map_err(|_| invalid())
}

/// Help block listing the recognised flags
pub fn help_text() -> String {
    format!(
        "Dry Run {VERSION}\n\
         Usage: test [options]\n\
         Options:\n\
         \n\
         -d\t\tRun tests in determinate mode (non-randomized).\n\
         -r N\t\tRepeat tests N times. Ex: test -r 10\n\
         -c\t\tUse ANSI colors for easier reading.\n\
         -h,--help\tShow this help screen.\n"
    )
}
