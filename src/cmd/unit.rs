use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage, positional},
    unit::{self, UnitKind},
};

const USAGE: &'static str = r#"
Convert values between fixed unit pairs.

The first positional argument is the conversion kind. The remaining
positional arguments are the values to convert. When no values are given,
then line delimited values are read from stdin.

Converted values are printed with exactly two fraction digits followed by
the target unit's label, e.g., `25.40 cm`. Unit conversion is
locale-independent.

USAGE:
    lingo unit <kind> <value>...
    lingo unit <kind> < line delimited <value>

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Convert ten inches to centimeters:

        $ lingo unit in-cm 10

    %snip-start%

    Convert a few weights at once:

        $ lingo unit lb-kg 10 50 220.5

    Convert a whole stream of volumes:

        $ printf '1\n0.5\n2.25\n' | lingo unit lt-oz

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut values = positional::Numbers::default();
    args::configure(p, USAGE, &mut [&mut config, &mut values])?;
    let Some(kind) = config.kind else {
        anyhow::bail!("missing required argument <kind>")
    };

    let mut wtr = std::io::stdout().lock();
    values.try_map(|v| {
        writeln!(wtr, "{}", unit::convert(v, kind))?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    kind: Option<UnitKind>,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            // The first positional argument is the conversion kind. The
            // rest are values and belong to someone else.
            lexopt::Arg::Value(ref mut v) if self.kind.is_none() => {
                let v = std::mem::take(v);
                let v = v.into_string().map_err(|arg| {
                    anyhow::anyhow!("unit kind {arg:?} is not valid UTF-8")
                })?;
                self.kind = Some(v.parse().context("<kind>")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[UnitKind::ARG, positional::Numbers::ARG_OR_STDIN]
    }
}
