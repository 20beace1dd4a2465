use std::io::Write;

use serde::Serialize;

use crate::{
    args::{self, Usage},
    messages::Language,
};

const USAGE: &'static str = r#"
List the languages lingo ships translations for.

Each line shows a language code and the language's name in its own script.
The language currently selected via the `LINGO_LOCALE` environment variable
is marked with a `*`. Locales whose language has no translations map to
English, which is also what an unset `LINGO_LOCALE` maps to.

Note that this list is about the showcase page's headings and labels.
Datetime and number formatting are not limited to these languages: any
locale ICU4X has data for works.

USAGE:
    lingo langs

TIP:
    use -h for short docs and --help for long docs

REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let current = Language::from_locale(&crate::LOCALE);
    let mut wtr = std::io::stdout().lock();
    if config.json {
        let options = Language::ALL
            .iter()
            .map(|&lang| LanguageOption {
                value: lang.code(),
                label: lang.label(),
                current: lang == current,
            })
            .collect::<Vec<LanguageOption>>();
        serde_json::to_writer(&mut wtr, &options)?;
        writeln!(wtr)?;
    } else {
        for &lang in Language::ALL {
            let marker = if lang == current { "*" } else { " " };
            writeln!(
                wtr,
                "{marker} {code}  {label}",
                code = lang.code(),
                label = lang.label(),
            )?;
        }
    }
    Ok(())
}

/// One entry of the language menu, as exposed by `--json`.
#[derive(Debug, Serialize)]
struct LanguageOption {
    value: &'static str,
    label: &'static str,
    current: bool,
}

#[derive(Debug, Default)]
struct Config {
    json: bool,
}

impl Config {
    const USAGE_JSON: Usage = Usage::flag(
        "--json",
        "Emit the language list as a JSON array.",
        r#"
Emit the language list as a JSON array.

Each element has a `value` (the language code), a `label` (the language's
name in its own script) and a `current` marker.
"#,
    );
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Long("json") => self.json = true,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Config::USAGE_JSON]
    }
}
