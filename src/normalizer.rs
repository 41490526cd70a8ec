//! Deterministic clean-up of tracking values.
//!
//! `normalize` is total and idempotent: its output only ever contains
//! `[a-z0-9_]` (plus the macro token when it is preserved), so running it
//! again changes nothing.

use regex::Regex;

use crate::common::constants::{MACRO_SENTINEL, MACRO_TOKEN};

/// Lowercase letters with diacritics and their ASCII spelling.
pub const TRANSLITERATIONS: &[(char, &str)] = &[
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('ä', "a"),
    ('å', "a"),
    ('ā', "a"),
    ('ą', "a"),
    ('æ', "ae"),
    ('ç', "c"),
    ('ć', "c"),
    ('č', "c"),
    ('ď', "d"),
    ('ð', "d"),
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ē', "e"),
    ('ę', "e"),
    ('ě', "e"),
    ('ğ', "g"),
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ī', "i"),
    ('ı', "i"),
    ('ł', "l"),
    ('ñ', "n"),
    ('ń', "n"),
    ('ň', "n"),
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ö', "o"),
    ('ø', "o"),
    ('ō', "o"),
    ('ő', "o"),
    ('œ', "oe"),
    ('ř', "r"),
    ('ś', "s"),
    ('š', "s"),
    ('ş', "s"),
    ('ß', "ss"),
    ('ť', "t"),
    ('ţ', "t"),
    ('þ', "th"),
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ü', "u"),
    ('ū', "u"),
    ('ů', "u"),
    ('ű', "u"),
    ('ý', "y"),
    ('ÿ', "y"),
    ('ź', "z"),
    ('ż', "z"),
    ('ž', "z"),
];

thread_local! {
    static PRIVATE_USE_RE: Regex = Regex::new(r"\p{Co}").unwrap();
    static SEPARATOR_RE: Regex = Regex::new(r"[\s\-\u{2013}\u{2014}]+").unwrap();
    static DISALLOWED_RE: Regex = Regex::new(r"[^a-z0-9_\x{E000}]").unwrap();
    static UNDERSCORES_RE: Regex = Regex::new(r"_+").unwrap();
}

/// Cleans a tracking value down to `[a-z0-9_]`.
///
/// With `preserve_macro`, every occurrence of the macro token is carried
/// through unchanged.
pub fn normalize(value: &str, preserve_macro: bool) -> String {
    let value = PRIVATE_USE_RE.with(|re| re.replace_all(value, "").into_owned());
    let shielded = if preserve_macro {
        value.replace(MACRO_TOKEN, MACRO_SENTINEL)
    } else {
        value
    };

    let lowered = transliterate(&shielded.to_lowercase());
    let separated = SEPARATOR_RE.with(|re| re.replace_all(&lowered, "_").into_owned());
    let filtered = DISALLOWED_RE.with(|re| re.replace_all(&separated, "").into_owned());
    let collapsed = UNDERSCORES_RE.with(|re| re.replace_all(&filtered, "_").into_owned());
    let trimmed = collapsed.trim_matches('_');

    if preserve_macro {
        trimmed.replace(MACRO_SENTINEL, MACRO_TOKEN)
    } else {
        trimmed.to_string()
    }
}

fn transliterate(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match TRANSLITERATIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}
