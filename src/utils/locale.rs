//! Decimal separator detection from the POSIX locale environment

use std::env;

/// Language codes whose numeric convention uses a decimal comma
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// Separator for a locale name such as `fr_FR.UTF-8` or `de_DE@euro`
pub fn decimal_separator_for(locale: &str) -> char {
    let language = locale
        .split(|c| c == '_' || c == '-' || c == '.' || c == '@')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    if COMMA_LANGUAGES.contains(&language.as_str()) {
        ','
    } else {
        '.'
    }
}

/// Resolve the separator the way libc picks LC_NUMERIC: LC_ALL, then
/// LC_NUMERIC, then LANG
pub fn detect_decimal_separator() -> char {
    ["LC_ALL", "LC_NUMERIC", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .map(|locale| decimal_separator_for(&locale))
        .unwrap_or('.')
}
