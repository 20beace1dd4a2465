use jiff::civil;
use jiff_icu::ConvertInto;
use writeable::Writeable;
use {
    icu_calendar::{Date, Iso},
    icu_datetime::{
        DateTimeFormatter as IcuDateTimeFormatter,
        fieldsets::{YMDET, YMDT, enums::DateAndTimeFieldSet},
        options::TimePrecision,
    },
    icu_time::{DateTime as IcuDateTime, Time},
};

use crate::{args::Usage, locale::Locale};

/// A closed set of datetime display formats.
///
/// Each kind stands for exactly one fixed set of display fields. The locale
/// decides everything else: field order, month and weekday names, the
/// 12/24-hour convention and where (or whether) a day period marker goes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FormatKind {
    /// 2-digit year, numeric month and day, hour and minute.
    Short,
    /// Numeric year and day, abbreviated month, hour and minute.
    #[default]
    Medium,
    /// Full weekday and month names, numeric year and day, hour and minute.
    Long,
    /// Like long, but with seconds.
    Full,
}

impl FormatKind {
    pub const USAGE: Usage = Usage::flag(
        "-k, --kind <kind>",
        "One of `short`, `medium` (default), `long` or `full`.",
        r#"
The format kind to print datetimes in.

The legal values for this flag are `short`, `medium` (default), `long` and
`full`.

Using the datetime `2023-08-31T12:34:56` and the `en-US` locale as an
example, the kinds render as follows:

`short`: a compact numeric form, e.g., `8/31/23, 12:34 PM`.

`medium`: an abbreviated month name, e.g., `Aug 31, 2023, 12:34 PM`.

`long`: full weekday and month names, e.g.,
`Thursday, August 31, 2023 at 12:34 PM`.

`full`: like `long`, with seconds, e.g.,
`Thursday, August 31, 2023 at 12:34:56 PM`.
"#,
    );

    /// Returns the fixed ICU4X field set this kind stands for.
    fn field_set(self) -> DateAndTimeFieldSet {
        match self {
            FormatKind::Short => DateAndTimeFieldSet::YMDT(
                YMDT::short().with_time_precision(TimePrecision::Minute),
            ),
            FormatKind::Medium => DateAndTimeFieldSet::YMDT(
                YMDT::medium().with_time_precision(TimePrecision::Minute),
            ),
            FormatKind::Long => DateAndTimeFieldSet::YMDET(
                YMDET::long().with_time_precision(TimePrecision::Minute),
            ),
            FormatKind::Full => DateAndTimeFieldSet::YMDET(
                YMDET::long().with_time_precision(TimePrecision::Second),
            ),
        }
    }
}

impl std::str::FromStr for FormatKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<FormatKind> {
        Ok(match s {
            "short" => FormatKind::Short,
            "medium" => FormatKind::Medium,
            "long" => FormatKind::Long,
            "full" => FormatKind::Full,
            unk => anyhow::bail!("unrecognized format kind `{}`", unk),
        })
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            FormatKind::Short => write!(f, "short"),
            FormatKind::Medium => write!(f, "medium"),
            FormatKind::Long => write!(f, "long"),
            FormatKind::Full => write!(f, "full"),
        }
    }
}

/// Renders civil datetimes for one locale.
///
/// Construction eagerly prepares the locale-sensitive machinery for every
/// format kind. Once built, `format` cannot fail: any trouble with the
/// locale backend results in the ISO 8601 form of the input instead. The
/// only hard error anywhere near this type is a failed `FormatKind` parse.
#[derive(Debug)]
pub struct DateTimeFormatter {
    backend: Box<dyn DateTimeBackend>,
}

impl DateTimeFormatter {
    /// Build a formatter for the given locale.
    pub fn new(locale: &Locale) -> DateTimeFormatter {
        let backend: Box<dyn DateTimeBackend> = match Icu::new(locale) {
            Ok(icu) => Box::new(icu),
            Err(err) => {
                log::warn!(
                    "failed to build ICU4X datetime formatters for \
                     locale `{locale}`: {err:#}",
                );
                Box::new(Unavailable)
            }
        };
        DateTimeFormatter { backend }
    }

    #[cfg(test)]
    fn with_backend(backend: Box<dyn DateTimeBackend>) -> DateTimeFormatter {
        DateTimeFormatter { backend }
    }

    /// Format the given civil datetime according to `kind`.
    pub fn format(&self, dt: civil::DateTime, kind: FormatKind) -> String {
        match self.backend.render(dt, kind) {
            Ok(formatted) => formatted,
            Err(err) => {
                log::warn!("locale rendering of `{dt}` failed: {err:#}");
                dt.to_string()
            }
        }
    }
}

/// The locale-sensitive half of datetime formatting.
///
/// `DateTimeFormatter` treats implementations as fallible collaborators: a
/// render error is swallowed there and replaced with the fallback form, so
/// implementations never need to produce one themselves.
trait DateTimeBackend: std::fmt::Debug {
    fn render(
        &self,
        dt: civil::DateTime,
        kind: FormatKind,
    ) -> anyhow::Result<String>;
}

/// A collection of ICU4X datetime formatters, one per format kind.
#[derive(Debug)]
struct Icu {
    short: IcuDateTimeFormatter<DateAndTimeFieldSet>,
    medium: IcuDateTimeFormatter<DateAndTimeFieldSet>,
    long: IcuDateTimeFormatter<DateAndTimeFieldSet>,
    full: IcuDateTimeFormatter<DateAndTimeFieldSet>,
}

impl Icu {
    fn new(locale: &Locale) -> anyhow::Result<Icu> {
        let new = |kind: FormatKind| {
            IcuDateTimeFormatter::try_new(
                locale.icu().into(),
                kind.field_set(),
            )
        };
        Ok(Icu {
            short: new(FormatKind::Short)?,
            medium: new(FormatKind::Medium)?,
            long: new(FormatKind::Long)?,
            full: new(FormatKind::Full)?,
        })
    }
}

impl DateTimeBackend for Icu {
    fn render(
        &self,
        dt: civil::DateTime,
        kind: FormatKind,
    ) -> anyhow::Result<String> {
        let date: Date<Iso> = dt.date().convert_into();
        let time: Time = dt.time().convert_into();
        let dt = IcuDateTime { date, time };
        let formatter = match kind {
            FormatKind::Short => &self.short,
            FormatKind::Medium => &self.medium,
            FormatKind::Long => &self.long,
            FormatKind::Full => &self.full,
        };
        Ok(formatter.format(&dt).write_to_string().into_owned())
    }
}

/// The backend used when the ICU4X formatters could not be built. Always
/// defers to the fallback in `DateTimeFormatter::format`.
#[derive(Debug)]
struct Unavailable;

impl DateTimeBackend for Unavailable {
    fn render(
        &self,
        _: civil::DateTime,
        _: FormatKind,
    ) -> anyhow::Result<String> {
        anyhow::bail!("no locale backend available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Failing;

    impl DateTimeBackend for Failing {
        fn render(
            &self,
            _: civil::DateTime,
            _: FormatKind,
        ) -> anyhow::Result<String> {
            anyhow::bail!("synthetic backend failure")
        }
    }

    #[test]
    fn parse_kind() {
        assert_eq!("short".parse::<FormatKind>().unwrap(), FormatKind::Short);
        assert_eq!(
            "medium".parse::<FormatKind>().unwrap(),
            FormatKind::Medium
        );
        assert_eq!("long".parse::<FormatKind>().unwrap(), FormatKind::Long);
        assert_eq!("full".parse::<FormatKind>().unwrap(), FormatKind::Full);
    }

    #[test]
    fn parse_kind_unrecognized() {
        assert!("".parse::<FormatKind>().is_err());
        assert!("shortest".parse::<FormatKind>().is_err());
        assert!("SHORT".parse::<FormatKind>().is_err());
    }

    const KINDS: [FormatKind; 4] = [
        FormatKind::Short,
        FormatKind::Medium,
        FormatKind::Long,
        FormatKind::Full,
    ];

    // A failing backend must never surface an error. The formatter falls
    // back to the ISO 8601 form of the input.
    #[test]
    fn backend_failure_falls_back_to_iso8601() {
        let formatter = DateTimeFormatter::with_backend(Box::new(Failing));
        let dt = civil::date(2023, 8, 31).at(12, 34, 56, 0);
        for kind in KINDS {
            assert_eq!(formatter.format(dt, kind), "2023-08-31T12:34:56");
        }
    }

    // Purity: the same input always renders to the same output.
    #[test]
    fn format_is_idempotent() {
        let locale: Locale = "en-US".parse().unwrap();
        let formatter = DateTimeFormatter::new(&locale);
        let dt = civil::date(2023, 8, 31).at(12, 34, 56, 0);
        for kind in KINDS {
            assert_eq!(
                formatter.format(dt, kind),
                formatter.format(dt, kind)
            );
        }
    }
}
