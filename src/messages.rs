use crate::locale::Locale;

/// The languages lingo ships translations for.
///
/// This is the language-switcher menu: every variant has a stable BCP 47
/// code and a native-script label. The formatting locale is free to be
/// anything; this enum only decides which catalog the showcase page's
/// headings and labels come from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Language {
    English,
    French,
    Ukrainian,
}

impl Language {
    /// Every language, in menu order.
    pub const ALL: &'static [Language] =
        &[Language::English, Language::French, Language::Ukrainian];

    /// The BCP 47 language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Ukrainian => "uk",
        }
    }

    /// The language's name in its own script.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Français",
            Language::Ukrainian => "Українська",
        }
    }

    /// Picks the catalog language for a locale by its language subtag.
    ///
    /// Languages without a catalog (including the unknown locale) fall
    /// back to English.
    pub fn from_locale(locale: &Locale) -> Language {
        match locale.language() {
            "fr" => Language::French,
            "uk" => Language::Ukrainian,
            _ => Language::English,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::English => EN,
            Language::French => FR,
            Language::Ukrainian => UK,
        }
    }
}

/// Look up a translated message.
///
/// A key missing from the language's table falls back to the English
/// table, and a key missing there comes back verbatim. Callers always get
/// *something* displayable.
pub fn text(lang: Language, key: &'static str) -> &'static str {
    lookup(lang.table(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

fn lookup(
    table: &[(&'static str, &'static str)],
    key: &str,
) -> Option<&'static str> {
    table.iter().find(|&&(k, _)| k == key).map(|&(_, text)| text)
}

const EN: &[(&str, &str)] = &[
    ("title", "Lingo"),
    ("subtitle", "Dates, numbers and units in your language"),
    (
        "description",
        "A small showcase of locale-aware formatting. Datetimes and \
         numbers are rendered by ICU4X using the conventions of the \
         active locale; unit conversions use fixed factors.",
    ),
    ("language", "Language"),
    ("current_date_time", "Current date and time"),
    ("short", "Short"),
    ("medium", "Medium"),
    ("long", "Long"),
    ("full", "Full"),
    ("formatted_numbers", "Formatted numbers"),
    ("integer", "Integer"),
    ("decimal", "Decimal"),
    ("currency", "Currency"),
    ("percent", "Percent"),
    ("unit_conversion", "Unit conversion"),
    ("inches_to_cm", "Inches to centimeters"),
    ("pounds_to_kg", "Pounds to kilograms"),
    ("liters_to_oz", "Liters to ounces"),
];

const FR: &[(&str, &str)] = &[
    ("title", "Lingo"),
    ("subtitle", "Dates, nombres et unités dans votre langue"),
    (
        "description",
        "Une petite démonstration de mise en forme localisée. Les dates \
         et les nombres sont rendus par ICU4X selon les conventions de \
         la locale active ; les conversions d'unités utilisent des \
         facteurs fixes.",
    ),
    ("language", "Langue"),
    ("current_date_time", "Date et heure actuelles"),
    ("short", "Courte"),
    ("medium", "Moyenne"),
    ("long", "Longue"),
    ("full", "Complète"),
    ("formatted_numbers", "Nombres formatés"),
    ("integer", "Entier"),
    ("decimal", "Décimal"),
    ("currency", "Monnaie"),
    ("percent", "Pourcentage"),
    ("unit_conversion", "Conversion d'unités"),
    ("inches_to_cm", "Pouces en centimètres"),
    ("pounds_to_kg", "Livres en kilogrammes"),
    ("liters_to_oz", "Litres en onces"),
];

const UK: &[(&str, &str)] = &[
    ("title", "Lingo"),
    ("subtitle", "Дати, числа та одиниці вашою мовою"),
    (
        "description",
        "Невелика демонстрація локалізованого форматування. Дати й числа \
         відображає ICU4X за правилами активної локалі; перетворення \
         одиниць використовують сталі коефіцієнти.",
    ),
    ("language", "Мова"),
    ("current_date_time", "Поточні дата й час"),
    ("short", "Короткий"),
    ("medium", "Середній"),
    ("long", "Довгий"),
    ("full", "Повний"),
    ("formatted_numbers", "Відформатовані числа"),
    ("integer", "Ціле"),
    ("decimal", "Десяткове"),
    ("currency", "Валюта"),
    ("percent", "Відсоток"),
    ("unit_conversion", "Перетворення одиниць"),
    ("inches_to_cm", "Дюйми в сантиметри"),
    ("pounds_to_kg", "Фунти в кілограми"),
    ("liters_to_oz", "Літри в унції"),
];
