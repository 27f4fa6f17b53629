//! Language helpers for the i18n context processor.

use crate::config::AppConfig;
use crate::request::Request;

/// Base codes of languages written right to left.
const BIDI_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "ks", "ps", "sd", "ug", "ur", "yi",
];

/// Language active for this request: the middleware-activated language if
/// any, otherwise the configured default.
pub fn get_language(request: &Request, config: &AppConfig) -> String {
    request
        .language()
        .map(str::to_string)
        .unwrap_or_else(|| config.language_code.clone())
}

/// Whether a language code names a right-to-left language. Only the base
/// language is considered ("ar-dz" matches "ar"); matching is
/// case-insensitive.
pub fn get_language_bidi(code: &str) -> bool {
    let base = code
        .split('-')
        .next()
        .unwrap_or(code)
        .to_ascii_lowercase();
    BIDI_LANGUAGES.contains(&base.as_str())
}
