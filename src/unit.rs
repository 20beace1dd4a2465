use fixed_decimal::{Decimal, FloatPrecision, LimitError};

use crate::args::Usage;

/// A closed set of unit conversions.
///
/// Each kind binds, at definition time, a fixed multiplicative factor and a
/// fixed output label. Unlike datetime and number formatting, conversion is
/// locale-independent: `25.40 cm` reads the same everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitKind {
    /// Inches to centimeters.
    InCm,
    /// Pounds to kilograms.
    LbKg,
    /// Liters to fluid ounces.
    LtOz,
}

impl UnitKind {
    pub const ARG: Usage = Usage::arg(
        "<kind>",
        "One of `in-cm`, `lb-kg` or `lt-oz`.",
        r#"
The unit conversion to perform.

The legal values are `in-cm` (inches to centimeters), `lb-kg` (pounds to
kilograms) and `lt-oz` (liters to fluid ounces). Each conversion multiplies
its input by a fixed factor and appends the target unit's label. For
example, `in-cm` turns `10` into `25.40 cm`.
"#,
    );

    fn factor(self) -> f64 {
        match self {
            UnitKind::InCm => 2.54,
            UnitKind::LbKg => 0.453592,
            UnitKind::LtOz => 33.814,
        }
    }

    fn label(self) -> &'static str {
        match self {
            UnitKind::InCm => "cm",
            UnitKind::LbKg => "kg",
            UnitKind::LtOz => "oz",
        }
    }
}

impl std::str::FromStr for UnitKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<UnitKind> {
        Ok(match s {
            "in-cm" => UnitKind::InCm,
            "lb-kg" => UnitKind::LbKg,
            "lt-oz" => UnitKind::LtOz,
            unk => anyhow::bail!("unrecognized unit kind `{}`", unk),
        })
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            UnitKind::InCm => write!(f, "in-cm"),
            UnitKind::LbKg => write!(f, "lb-kg"),
            UnitKind::LtOz => write!(f, "lt-oz"),
        }
    }
}

/// Convert `value` and render it with two fraction digits and the kind's
/// label, e.g., `25.40 cm`.
///
/// This never fails. When the converted value has no fixed-precision
/// rendering (NaN or an infinity), the *original* unconverted value's
/// default form is returned, with no label.
pub fn convert(value: f64, kind: UnitKind) -> String {
    match fixed(value * kind.factor()) {
        Ok(converted) => format!("{converted} {label}", label = kind.label()),
        Err(err) => {
            log::warn!(
                "fixed-precision rendering of `{value} {kind}` failed: {err}",
            );
            value.to_string()
        }
    }
}

/// Render with exactly two fraction digits: round half away from zero,
/// then zero-pad.
fn fixed(value: f64) -> Result<Decimal, LimitError> {
    let mut dec = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)?;
    dec.half_expand(-2);
    dec.pad_end(-2);
    Ok(dec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind() {
        assert_eq!("in-cm".parse::<UnitKind>().unwrap(), UnitKind::InCm);
        assert_eq!("lb-kg".parse::<UnitKind>().unwrap(), UnitKind::LbKg);
        assert_eq!("lt-oz".parse::<UnitKind>().unwrap(), UnitKind::LtOz);
        assert!("cm-in".parse::<UnitKind>().is_err());
        assert!("".parse::<UnitKind>().is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(convert(10.0, UnitKind::InCm), "25.40 cm");
        assert_eq!(convert(10.0, UnitKind::LbKg), "4.54 kg");
        assert_eq!(convert(1.0, UnitKind::LtOz), "33.81 oz");
    }

    #[test]
    fn always_two_fraction_digits() {
        assert_eq!(convert(0.0, UnitKind::InCm), "0.00 cm");
        assert_eq!(convert(50.0, UnitKind::LbKg), "22.68 kg");
        assert_eq!(convert(-10.0, UnitKind::InCm), "-25.40 cm");
    }

    // Non-finite input cannot be rendered with fixed precision, so the
    // original value comes back untouched and unlabeled.
    #[test]
    fn non_finite_falls_back_to_original_value() {
        assert_eq!(convert(f64::NAN, UnitKind::InCm), "NaN");
        assert_eq!(convert(f64::INFINITY, UnitKind::LbKg), "inf");
        assert_eq!(convert(f64::NEG_INFINITY, UnitKind::LtOz), "-inf");
    }

    #[test]
    fn convert_is_idempotent() {
        for kind in [UnitKind::InCm, UnitKind::LbKg, UnitKind::LtOz] {
            assert_eq!(convert(12.5, kind), convert(12.5, kind));
        }
    }
}
