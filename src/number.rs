use anyhow::Context;
use fixed_decimal::{Decimal, FloatPrecision};
use writeable::Writeable;
use {
    icu_decimal::{
        DecimalFormatter as IcuDecimalFormatter,
        options::DecimalFormatterOptions,
    },
    icu_experimental::dimension::{
        currency::{
            CurrencyCode, formatter::CurrencyFormatter,
            options::CurrencyFormatterOptions,
        },
        percent::{
            formatter::PercentFormatter, options::PercentFormatterOptions,
        },
    },
    tinystr::tinystr,
};

use crate::{args::Usage, locale::Locale};

/// The currency is always USD, even for locales where that is surely not
/// the currency a reader expects. The locale still controls the symbol,
/// its placement and the grouping.
const USD: CurrencyCode = CurrencyCode(tinystr!(3, "USD"));

/// A closed set of number display styles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NumberKind {
    /// Plain decimal style, rounded to a whole number.
    Integer,
    /// Plain decimal style, at most two fraction digits.
    #[default]
    Decimal,
    /// Currency style with a fixed USD currency code.
    Currency,
    /// Percent style: the value is scaled by 100 for display.
    Percent,
}

impl NumberKind {
    pub const USAGE: Usage = Usage::flag(
        "-k, --kind <kind>",
        "One of `integer`, `decimal` (default), `currency` or `percent`.",
        r#"
The kind of number formatting to use.

The legal values for this flag are `integer`, `decimal` (default),
`currency` and `percent`.

Using the value `1234.567` and the `en-US` locale as an example, the kinds
render as follows:

`integer`: rounded to a whole number with locale grouping, e.g., `1,235`.

`decimal`: at most two fraction digits, e.g., `1,234.57`.

`currency`: a USD amount with exactly two fraction digits, e.g.,
`$1,234.57`. The currency code is always USD. The locale only decides how
the amount is written, e.g., `fr-FR` renders the same value as
`1 234,57 $US`.

`percent`: the value multiplied by 100 with a percent sign and at most two
fraction digits. For example, `0.1234` renders as `12.34%`.

Rounding is "half away from zero" in every case, which is what the CLDR
conventions these renderings come from use by default.
"#,
    );

    /// Round (and for percent, scale) a decimal the way this kind's fixed
    /// configuration dictates.
    fn prepare(self, mut dec: Decimal) -> Decimal {
        match self {
            NumberKind::Integer => dec.half_expand(0),
            NumberKind::Decimal => dec.half_expand(-2),
            NumberKind::Currency => {
                // USD amounts always carry two fraction digits.
                dec.half_expand(-2);
                dec.pad_end(-2);
            }
            NumberKind::Percent => {
                dec.multiply_pow10(2);
                dec.half_expand(-2);
            }
        }
        dec
    }
}

impl std::str::FromStr for NumberKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<NumberKind> {
        Ok(match s {
            "integer" => NumberKind::Integer,
            "decimal" => NumberKind::Decimal,
            "currency" => NumberKind::Currency,
            "percent" => NumberKind::Percent,
            unk => anyhow::bail!("unrecognized number kind `{}`", unk),
        })
    }
}

impl std::fmt::Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            NumberKind::Integer => write!(f, "integer"),
            NumberKind::Decimal => write!(f, "decimal"),
            NumberKind::Currency => write!(f, "currency"),
            NumberKind::Percent => write!(f, "percent"),
        }
    }
}

/// Renders numbers for one locale.
///
/// The same shape as `datetime::DateTimeFormatter`: the locale-sensitive
/// machinery is prepared once at construction, `format` never fails, and
/// any backend trouble falls back to Rust's default `f64` rendering with no
/// grouping or symbols.
#[derive(Debug)]
pub struct NumberFormatter {
    backend: Box<dyn NumberBackend>,
}

impl NumberFormatter {
    /// Build a formatter for the given locale.
    pub fn new(locale: &Locale) -> NumberFormatter {
        let backend: Box<dyn NumberBackend> = match Icu::new(locale) {
            Ok(icu) => Box::new(icu),
            Err(err) => {
                log::warn!(
                    "failed to build ICU4X number formatters for \
                     locale `{locale}`: {err:#}",
                );
                Box::new(Unavailable)
            }
        };
        NumberFormatter { backend }
    }

    #[cfg(test)]
    fn with_backend(backend: Box<dyn NumberBackend>) -> NumberFormatter {
        NumberFormatter { backend }
    }

    /// Format the given value according to `kind`.
    pub fn format(&self, value: f64, kind: NumberKind) -> String {
        match self.backend.render(value, kind) {
            Ok(formatted) => formatted,
            Err(err) => {
                log::warn!("locale rendering of `{value}` failed: {err:#}");
                value.to_string()
            }
        }
    }
}

/// The locale-sensitive half of number formatting. Same contract as
/// `datetime::DateTimeBackend`: errors are swallowed by the caller.
trait NumberBackend: std::fmt::Debug {
    fn render(&self, value: f64, kind: NumberKind) -> anyhow::Result<String>;
}

/// ICU4X-backed rendering: one formatter per style.
struct Icu {
    decimal: IcuDecimalFormatter,
    currency: CurrencyFormatter,
    percent: PercentFormatter<IcuDecimalFormatter>,
}

impl std::fmt::Debug for Icu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icu").finish_non_exhaustive()
    }
}

impl Icu {
    fn new(locale: &Locale) -> anyhow::Result<Icu> {
        let decimal = IcuDecimalFormatter::try_new(
            locale.icu().into(),
            DecimalFormatterOptions::default(),
        )?;
        let currency = CurrencyFormatter::try_new(
            locale.icu().into(),
            CurrencyFormatterOptions::default(),
        )?;
        let percent = PercentFormatter::try_new(
            locale.icu().into(),
            PercentFormatterOptions::default(),
        )?;
        Ok(Icu { decimal, currency, percent })
    }
}

impl NumberBackend for Icu {
    fn render(&self, value: f64, kind: NumberKind) -> anyhow::Result<String> {
        // NaN and the infinities have no decimal form. They take the
        // fallback path, just like a locale whose data cannot be loaded.
        let dec = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)
            .with_context(|| {
                format!("`{value}` cannot be rendered as a decimal")
            })?;
        let dec = kind.prepare(dec);
        Ok(match kind {
            NumberKind::Integer | NumberKind::Decimal => {
                self.decimal.format(&dec).write_to_string().into_owned()
            }
            NumberKind::Currency => self
                .currency
                .format_fixed_decimal(&dec, USD)
                .write_to_string()
                .into_owned(),
            NumberKind::Percent => self
                .percent
                .format(&dec)
                .write_to_string()
                .into_owned(),
        })
    }
}

/// The backend used when the ICU4X formatters could not be built.
#[derive(Debug)]
struct Unavailable;

impl NumberBackend for Unavailable {
    fn render(&self, _: f64, _: NumberKind) -> anyhow::Result<String> {
        anyhow::bail!("no locale backend available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Failing;

    impl NumberBackend for Failing {
        fn render(&self, _: f64, _: NumberKind) -> anyhow::Result<String> {
            anyhow::bail!("synthetic backend failure")
        }
    }

    fn prepared(value: f64, kind: NumberKind) -> String {
        let dec =
            Decimal::try_from_f64(value, FloatPrecision::RoundTrip).unwrap();
        kind.prepare(dec).to_string()
    }

    #[test]
    fn parse_kind() {
        assert_eq!(
            "integer".parse::<NumberKind>().unwrap(),
            NumberKind::Integer
        );
        assert_eq!(
            "decimal".parse::<NumberKind>().unwrap(),
            NumberKind::Decimal
        );
        assert_eq!(
            "currency".parse::<NumberKind>().unwrap(),
            NumberKind::Currency
        );
        assert_eq!(
            "percent".parse::<NumberKind>().unwrap(),
            NumberKind::Percent
        );
        assert!("money".parse::<NumberKind>().is_err());
        assert!("".parse::<NumberKind>().is_err());
    }

    // The kind decides the rounding, independent of any locale. Grouping
    // and symbols come later, from the locale backend.
    #[test]
    fn rounding_rules() {
        assert_eq!(prepared(1234.567, NumberKind::Integer), "1235");
        assert_eq!(prepared(1234.567, NumberKind::Decimal), "1234.57");
        assert_eq!(prepared(1234.567, NumberKind::Currency), "1234.57");
        assert_eq!(prepared(0.1234, NumberKind::Percent), "12.34");
    }

    // `decimal` trims to at most two fraction digits, while `currency`
    // always pads out to exactly two.
    #[test]
    fn fraction_digits() {
        assert_eq!(prepared(10.5, NumberKind::Decimal), "10.5");
        assert_eq!(prepared(10.0, NumberKind::Decimal), "10");
        assert_eq!(prepared(10.5, NumberKind::Currency), "10.50");
        assert_eq!(prepared(10.0, NumberKind::Currency), "10.00");
    }

    #[test]
    fn backend_failure_falls_back_to_plain_display() {
        let formatter = NumberFormatter::with_backend(Box::new(Failing));
        assert_eq!(formatter.format(1234.567, NumberKind::Integer), "1234.567");
        assert_eq!(formatter.format(0.1234, NumberKind::Percent), "0.1234");
    }

    // Non-finite values cannot become decimals, so even a healthy ICU
    // backend routes them through the fallback.
    #[test]
    fn non_finite_falls_back_to_plain_display() {
        let locale: Locale = "en-US".parse().unwrap();
        let formatter = NumberFormatter::new(&locale);
        assert_eq!(formatter.format(f64::NAN, NumberKind::Decimal), "NaN");
        assert_eq!(formatter.format(f64::INFINITY, NumberKind::Integer), "inf");
    }
}
