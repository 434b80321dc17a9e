use once_cell::sync::Lazy;
use regex::Regex;

static ABS_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\babs\s*\(").expect("valid absolute value pattern"));

/// Rewrites user-facing notation into the syntax the parser expects.
///
/// Trims the input, turns `^` into `**`, spells any `abs(` (any casing,
/// optional whitespace before the parenthesis) as `Abs(`, and replaces the
/// `≤`/`≥` glyphs by `<=`/`>=`. Never fails.
pub fn normalize(text: &str) -> String {
    let text = text
        .trim()
        .replace('^', "**")
        .replace('≤', "<=")
        .replace('≥', ">=");
    ABS_CALL.replace_all(&text, "Abs(").into_owned()
}
