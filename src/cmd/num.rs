use std::io::Write;

use crate::{
    args::{self, Usage, positional},
    locale::Locale,
    number::{NumberFormatter, NumberKind},
};

const USAGE: &'static str = r#"
Print a number in a locale-aware format.

This accepts one or more numbers as positional arguments. When no
positional arguments are given, then line delimited numbers are read from
stdin.

The number kind picks one of four fixed styles. Grouping separators, the
decimal separator and symbol placement all come from the locale. The
currency style always uses the USD currency code, no matter the locale.

USAGE:
    lingo num <number>...
    lingo num < line delimited <number>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print a number with locale grouping and at most two fraction digits:

        $ lingo num -l en-US 1234.567

    %snip-start%

    Print the same value as a dollar amount:

        $ lingo num -l en-US -k currency 1234.567

    Print a ratio as a percentage:

        $ lingo num -k percent 0.1234

    Reformat a whole stream of numbers:

        $ printf '1\n-2.5\n1234.567\n' | lingo num -k integer

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut numbers = positional::Numbers::default();
    args::configure(p, USAGE, &mut [&mut config, &mut numbers])?;

    let formatter = NumberFormatter::new(config.locale());
    let mut wtr = std::io::stdout().lock();
    numbers.try_map(|n| {
        writeln!(wtr, "{}", formatter.format(n, config.kind))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    kind: NumberKind,
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
            positional::Numbers::ARG_OR_STDIN,
            NumberKind::USAGE,
            Locale::USAGE_FLAG,
        ]
    }
}
