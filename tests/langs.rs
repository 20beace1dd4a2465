use crate::command::assert_cmd_snapshot;

/// With no locale configured, English is the active language.
#[test]
fn default_marks_english() {
    assert_cmd_snapshot!(
        crate::lingo(["langs"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    * en  English
      fr  Français
      uk  Українська

    ----- stderr -----
    ",
    );
}

/// Only the language subtag matters for the catalog, so `fr-FR` and
/// `fr-CA` both mark French.
#[test]
fn locale_marks_its_language() {
    assert_cmd_snapshot!(
        crate::lingo(["langs"]).env("LINGO_LOCALE", "fr-FR"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
      en  English
    * fr  Français
      uk  Українська

    ----- stderr -----
    ",
    );

    assert_cmd_snapshot!(
        crate::lingo(["langs"]).env("LINGO_LOCALE", "uk-UA"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
      en  English
      fr  Français
    * uk  Українська

    ----- stderr -----
    ",
    );
}

/// A locale whose language has no catalog falls back to English, just
/// like the showcase page does.
#[test]
fn unknown_language_marks_english() {
    assert_cmd_snapshot!(
        crate::lingo(["langs"]).env("LINGO_LOCALE", "de-DE"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    * en  English
      fr  Français
      uk  Українська

    ----- stderr -----
    ",
    );
}

/// Machine readable output for anything that wants to build a menu.
#[test]
fn json() {
    assert_cmd_snapshot!(
        crate::lingo(["langs", "--json"]).env("LINGO_LOCALE", "fr-FR"),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [{"value":"en","label":"English","current":false},{"value":"fr","label":"Français","current":true},{"value":"uk","label":"Українська","current":false}]

    ----- stderr -----
    "#,
    );
}
