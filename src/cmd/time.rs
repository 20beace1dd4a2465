use std::io::Write;

use crate::{
    args::{self, Usage, positional},
    datetime::{DateTimeFormatter, FormatKind},
    locale::Locale,
};

const USAGE: &'static str = r#"
Print a datetime in a locale-aware format.

This accepts one or more datetimes as positional arguments. When no
positional arguments are given, then line delimited datetimes are read from
stdin.

The format kind picks one of four fixed sets of display fields. Everything
locale-sensitive about the rendering, like month names, field order and the
clock convention, comes from the locale.

USAGE:
    lingo time <datetime>...
    lingo time < line delimited <datetime>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the current time with full weekday and month names:

        $ lingo time -k long now

    %snip-start%

    Print a specific datetime the way an American English reader expects:

        $ lingo time -l en-US -k short 2023-08-31T12:34:56

    The same fields, via French conventions:

        $ lingo time -l fr-FR -k short 2023-08-31T12:34:56

    Reformat a whole stream of datetimes:

        $ printf '2023-08-31T12:34:56\n2024-01-01\n' | lingo time -k full

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut datetimes = positional::DateTimes::default();
    args::configure(p, USAGE, &mut [&mut config, &mut datetimes])?;

    let formatter = DateTimeFormatter::new(config.locale());
    let mut wtr = std::io::stdout().lock();
    datetimes.try_map(|dt| {
        writeln!(wtr, "{}", formatter.format(dt, config.kind))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    kind: FormatKind,
    locale: Option<Locale>,
}

impl Config {
    fn locale(&self) -> &Locale {
        self.locale.as_ref().unwrap_or_else(|| &*crate::LOCALE)
    }
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Short('k') | lexopt::Arg::Long("kind") => {
                self.kind = args::parse(p, "-k/--kind")?;
            }
            lexopt::Arg::Short('l') | lexopt::Arg::Long("locale") => {
                self.locale = Some(args::parse(p, "-l/--locale")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[
            positional::DateTimes::ARG_OR_STDIN,
            FormatKind::USAGE,
            Locale::USAGE_FLAG,
        ]
    }
}
