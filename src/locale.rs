use icu_locale::Locale as IcuLocale;

use crate::args::Usage;

/// A wrapper around an ICU4X locale.
///
/// The locale identifier is treated as opaque: lingo never interprets it
/// beyond reading the language subtag to pick a translation catalog.
/// Everything else (field order, names, separators, the clock convention)
/// is the business of the ICU4X formatters the locale is handed to.
#[derive(Clone, Debug)]
pub struct Locale(IcuLocale);

impl Locale {
    pub const USAGE_FLAG: Usage = Usage::flag(
        "-l, --locale <locale>",
        "Render output using this locale, e.g., `en-US` or `fr-FR`.",
        r#"
Render output using this locale, e.g., `en-US` or `fr-FR`.

When this flag is absent, the locale comes from the `LINGO_LOCALE`
environment variable. When that is also absent, the special "unknown"
locale (`und`) is used, which renders datetimes and numbers in a
locale-agnostic way.

A locale that parses but has no data of its own falls back to whatever
ICU4X's data fallback chain provides for it. lingo does not validate that
a locale is "real."
"#,
    );

    /// Create a locale that is "unknown."
    pub fn unknown() -> Locale {
        Locale(IcuLocale::UNKNOWN)
    }

    /// Returns the language subtag, e.g., `en` for `en-US`.
    ///
    /// For the unknown locale, this returns `und`.
    pub fn language(&self) -> &str {
        self.0.id.language.as_str()
    }

    /// Returns the underlying ICU4X locale.
    pub(crate) fn icu(&self) -> &IcuLocale {
        &self.0
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Locale> {
        Ok(Locale(s.parse::<IcuLocale>()?))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_subtag() {
        let locale: Locale = "en-US".parse().unwrap();
        assert_eq!(locale.language(), "en");

        let locale: Locale = "uk".parse().unwrap();
        assert_eq!(locale.language(), "uk");

        assert_eq!(Locale::unknown().language(), "und");
    }

    #[test]
    fn rejects_garbage() {
        assert!("not a locale!".parse::<Locale>().is_err());
    }
}
