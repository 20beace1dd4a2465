use std::io::BufRead;

use anyhow::Context;
use jiff::civil;

use crate::args::{Configurable, Usage};

/// The CLI parsing configuration for reading datetimes.
///
/// This will greedily consume all remaining positional arguments as
/// datetimes. When there are no positional arguments to consume, then this
/// will read datetimes from `stdin` in a line delimited fashion.
#[derive(Clone, Debug, Default)]
pub struct DateTimes(Arguments);

impl DateTimes {
    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<datetime>",
        "A civil datetime, e.g., `now` or `2023-08-31T12:34:56`.",
        r#"
A civil datetime.

Datetimes can either be passed as positional arguments or as line delimited
data on stdin, but not both. That is, datetimes will only be read from
stdin when there are no datetimes provided as positional arguments.

A datetime is either the literal string `now`, for the current date and
time in your system's time zone, or an ISO 8601 civil datetime such as
`2023-08-31T12:34:56` or `2023-08-31` (midnight is assumed when the clock
time is omitted). Time zones are not lingo's concern: the locale only
decides how the given civil fields are displayed.
"#,
    );

    /// Run the given function over each datetime read from the CLI.
    ///
    /// If there were no positional datetimes, then this tries to read them
    /// from stdin, one per line.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(civil::DateTime) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| f(parse_datetime(arg)?))
    }
}

impl Configurable for DateTimes {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }
}

/// The CLI parsing configuration for reading numbers.
///
/// This will greedily consume all remaining positional arguments as
/// numbers. When there are no positional arguments to consume, then this
/// will read numbers from `stdin` in a line delimited fashion.
#[derive(Clone, Debug, Default)]
pub struct Numbers(Arguments);

impl Numbers {
    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<number>",
        "A number, e.g., `1234.567` or `-5`.",
        r#"
A number.

Numbers can either be passed as positional arguments or as line delimited
data on stdin, but not both. That is, numbers will only be read from stdin
when there are no numbers provided as positional arguments.

A number is anything that parses as a 64-bit float, e.g., `1235`,
`1234.567` or `-0.25`. Leading dashes on numbers are understood without a
`--` separator.
"#,
    );

    /// Run the given function over each number read from the CLI.
    ///
    /// If there were no positional numbers, then this tries to read them
    /// from stdin, one per line.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(f64) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        self.0.try_map(|arg| f(parse_number(arg)?))
    }
}

impl Configurable for Numbers {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        self.0.configure(p, arg)
    }
}

/// The parsing configuration for reading arguments either as positional
/// arguments on the CLI, or as line-delimited data on `stdin`.
///
/// This will greedily consume all remaining positional arguments. That is,
/// this is generally intended for use cases where a variable number of
/// arguments can be given.
///
/// When there are _zero_ positional arguments, then this will read lines
/// from stdin instead.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<String>,
}

impl Arguments {
    /// Run the given function over each argument read from the CLI.
    ///
    /// If there were no positional arguments, then this tries to read them
    /// from stdin, one per line. The closure only ever sees one of the two
    /// sources; you can never get a mix.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(&str) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        if !self.positional.is_empty() {
            for arg in self.positional.iter() {
                if !f(arg)? {
                    return Ok(());
                }
            }
            return Ok(());
        }
        let stdin = std::io::stdin().lock();
        for (i, line) in stdin.lines().enumerate() {
            let line = line.context("failed to read line from <stdin>")?;
            let keep_going = f(&line)
                .with_context(|| format!("line {} of <stdin>", i + 1))?;
            if !keep_going {
                return Ok(());
            }
        }
        Ok(())
    }
}

impl Configurable for Arguments {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                let arg = v.into_string().map_err(|arg| {
                    anyhow::anyhow!(
                        "positional argument {arg:?} is not valid UTF-8"
                    )
                })?;
                self.positional.push(arg);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_datetime(s: &str) -> anyhow::Result<civil::DateTime> {
    if s == "now" {
        return Ok(crate::NOW.datetime());
    }
    s.parse().with_context(|| format!("invalid datetime `{s}`"))
}

fn parse_number(s: &str) -> anyhow::Result<f64> {
    s.trim().parse().with_context(|| format!("invalid number `{s}`"))
}
