mod demo;
mod langs;
mod num;
mod time;
mod unit;

const USAGE: &'static str = "\
A utility for locale-aware date, number and unit formatting.

USAGE:
    lingo <command> ...

COMMANDS:
    demo   Print a localized formatting showcase
    langs  List the languages lingo has translations for
    num    Format numbers for a locale
    time   Format datetimes for a locale
    unit   Convert values between fixed unit pairs
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    // For convenience, running `lingo` with no arguments prints the
    // showcase page for the current locale, the same single screen the
    // `demo` command renders.
    if p.try_raw_args().map_or(false, |args| args.as_slice().is_empty()) {
        return demo::print(&crate::LOCALE, &mut std::io::stdout().lock());
    }

    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "demo" => demo::run(p),
        "langs" => langs::run(p),
        "num" => num::run(p),
        "time" => time::run(p),
        "unit" => unit::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
