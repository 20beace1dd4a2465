use std::io::Write;

use crate::{
    args::{self, Usage},
    datetime::{DateTimeFormatter, FormatKind},
    locale::Locale,
    messages::{self, Language},
    number::{NumberFormatter, NumberKind},
    style::Theme,
    unit::{self, UnitKind},
};

const USAGE: &'static str = r#"
Print a localized formatting showcase.

This renders one page with the current date and time in every format kind,
a sample number in every number style, and the three unit conversions. The
page's headings and labels come from the translation catalog for the
locale's language (see `lingo langs`); the values themselves are rendered
with the locale's own conventions.

This is also what running `lingo` with no arguments prints.

USAGE:
    lingo demo

TIP:
    use -h for short docs and --help for long docs

REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

/// The sample values shown on the page.
const SAMPLE_NUMBER: f64 = 123456789.0;
const SAMPLE_RATIO: f64 = 0.123;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;
    print(config.locale(), &mut std::io::stdout().lock())
}

/// Render the whole showcase page to `wtr`.
///
/// This is also the behavior of a bare `lingo` invocation.
pub fn print(locale: &Locale, wtr: &mut impl Write) -> anyhow::Result<()> {
    let lang = Language::from_locale(locale);
    let t = |key| messages::text(lang, key);
    let theme = Theme::stdout();

    let datetimes = DateTimeFormatter::new(locale);
    let numbers = NumberFormatter::new(locale);
    let now = crate::NOW.datetime();

    writeln!(wtr, "{}", theme.heading(t("title")))?;
    writeln!(wtr, "{}", t("subtitle"))?;
    writeln!(wtr, "{}", t("description"))?;
    writeln!(wtr)?;
    writeln!(
        wtr,
        "{}: {} ({})",
        t("language"),
        lang.label(),
        lang.code()
    )?;
    writeln!(wtr)?;

    writeln!(wtr, "{}", theme.heading(t("current_date_time")))?;
    let kinds = [
        ("short", FormatKind::Short),
        ("medium", FormatKind::Medium),
        ("long", FormatKind::Long),
        ("full", FormatKind::Full),
    ];
    for (key, kind) in kinds {
        writeln!(wtr, "{}: {}", t(key), datetimes.format(now, kind))?;
    }
    writeln!(wtr)?;

    writeln!(wtr, "{}", theme.heading(t("formatted_numbers")))?;
    let samples = [
        ("integer", SAMPLE_NUMBER, NumberKind::Integer),
        ("decimal", SAMPLE_NUMBER, NumberKind::Decimal),
        ("currency", SAMPLE_NUMBER, NumberKind::Currency),
        ("percent", SAMPLE_RATIO, NumberKind::Percent),
    ];
    for (key, value, kind) in samples {
        writeln!(wtr, "{}: {}", t(key), numbers.format(value, kind))?;
    }
    writeln!(wtr)?;

    writeln!(wtr, "{}", theme.heading(t("unit_conversion")))?;
    let conversions = [
        ("inches_to_cm", 10.0, UnitKind::InCm),
        ("pounds_to_kg", 50.0, UnitKind::LbKg),
        ("liters_to_oz", 1.0, UnitKind::LtOz),
    ];
    for (key, value, kind) in conversions {
        writeln!(wtr, "{}: {}", t(key), unit::convert(value, kind))?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
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
            lexopt::Arg::Short('l') | lexopt::Arg::Long("locale") => {
                self.locale = Some(args::parse(p, "-l/--locale")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Locale::USAGE_FLAG]
    }
}
