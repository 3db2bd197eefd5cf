//! Host locale resolution.

use bracket_engine::Locale;

/// Host language codes (ISO 639-2) and the engine locale each maps to.
pub const LOCALE_ALIASES: [(&str, Locale); 13] = [
    ("eng", Locale::EnUs),
    ("esp", Locale::EsMx),
    ("fre", Locale::FrFr),
    ("ita", Locale::ItIt),
    ("deu", Locale::DeDe),
    ("swe", Locale::SvSe),
    ("gre", Locale::ElGr),
    ("bul", Locale::BgBg),
    ("rus", Locale::RuRu),
    ("chi", Locale::ZhCn),
    ("jpn", Locale::JaJp),
    ("kor", Locale::KoKr),
    ("ind", Locale::IdId),
];

/// Resolve the engine locale from a host language code and an explicit
/// canonical locale.
///
/// The host code wins when it is a known alias. Otherwise the explicit
/// value is used if it is one of the canonical locales in the alias table.
/// Anything else resolves to `None`, leaving the engine on its default
/// locale; an unknown locale is never an error.
#[must_use]
pub fn resolve_locale(host: &str, explicit: &str) -> Option<Locale> {
    if let Some((_, locale)) = LOCALE_ALIASES.iter().find(|(alias, _)| *alias == host) {
        return Some(*locale);
    }
    let resolved = LOCALE_ALIASES
        .iter()
        .map(|(_, locale)| *locale)
        .find(|locale| locale.as_str() == explicit);
    if resolved.is_none() {
        tracing::debug!(host, explicit, "Locale not resolved, using engine default");
    }
    resolved
}
