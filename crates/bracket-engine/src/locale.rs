//! Canonical locales and localized messages.

use std::collections::HashMap;
use std::fmt;

/// Locale identifier understood by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    EnUs,
    EsMx,
    FrFr,
    ItIt,
    DeDe,
    SvSe,
    ElGr,
    BgBg,
    RuRu,
    ZhCn,
    JaJp,
    KoKr,
    IdId,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Self; 13] = [
        Self::EnUs,
        Self::EsMx,
        Self::FrFr,
        Self::ItIt,
        Self::DeDe,
        Self::SvSe,
        Self::ElGr,
        Self::BgBg,
        Self::RuRu,
        Self::ZhCn,
        Self::JaJp,
        Self::KoKr,
        Self::IdId,
    ];

    /// Canonical identifier (e.g., `en-us`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-us",
            Self::EsMx => "es-mx",
            Self::FrFr => "fr-fr",
            Self::ItIt => "it-it",
            Self::DeDe => "de-de",
            Self::SvSe => "sv-se",
            Self::ElGr => "el-gr",
            Self::BgBg => "bg-bg",
            Self::RuRu => "ru-ru",
            Self::ZhCn => "zh-cn",
            Self::JaJp => "ja-jp",
            Self::KoKr => "ko-kr",
            Self::IdId => "id-id",
        }
    }

    /// Look up a locale by its canonical identifier.
    ///
    /// Matching is exact; `EN-US` is not canonical.
    #[must_use]
    pub fn from_canonical(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == id)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in message table: (spoiler, hide, show, quoteBy, link, mail).
fn builtin(locale: Locale) -> [&'static str; 6] {
    match locale {
        Locale::EnUs => ["Spoiler", "Hide", "Show", "Quote by {author}", "link", "mail"],
        Locale::EsMx => [
            "Spoiler",
            "Ocultar",
            "Mostrar",
            "Cita de {author}",
            "enlace",
            "correo",
        ],
        Locale::FrFr => [
            "Spoiler",
            "Masquer",
            "Afficher",
            "Citation de {author}",
            "lien",
            "courriel",
        ],
        Locale::ItIt => [
            "Spoiler",
            "Nascondi",
            "Mostra",
            "Citazione di {author}",
            "collegamento",
            "posta",
        ],
        Locale::DeDe => [
            "Spoiler",
            "Ausblenden",
            "Anzeigen",
            "Zitat von {author}",
            "Link",
            "E-Mail",
        ],
        Locale::SvSe => ["Spoiler", "Dölj", "Visa", "Citat av {author}", "länk", "e-post"],
        Locale::ElGr => [
            "Spoiler",
            "Απόκρυψη",
            "Εμφάνιση",
            "Παράθεση από {author}",
            "σύνδεσμος",
            "email",
        ],
        Locale::BgBg => [
            "Спойлер",
            "Скрий",
            "Покажи",
            "Цитат от {author}",
            "връзка",
            "поща",
        ],
        Locale::RuRu => [
            "Спойлер",
            "Скрыть",
            "Показать",
            "Цитата от {author}",
            "ссылка",
            "почта",
        ],
        Locale::ZhCn => ["剧透", "隐藏", "显示", "{author} 的引用", "链接", "邮件"],
        Locale::JaJp => ["ネタバレ", "隠す", "表示", "{author} の引用", "リンク", "メール"],
        Locale::KoKr => ["스포일러", "숨기기", "보기", "{author}님의 인용", "링크", "메일"],
        Locale::IdId => [
            "Spoiler",
            "Sembunyikan",
            "Tampilkan",
            "Kutipan dari {author}",
            "tautan",
            "surel",
        ],
    }
}

fn builtin_message(locale: Locale, key: &str) -> Option<&'static str> {
    let index = match key {
        "spoiler" => 0,
        "hide" => 1,
        "show" => 2,
        "quoteBy" => 3,
        "link" => 4,
        "mail" => 5,
        _ => return None,
    };
    Some(builtin(locale)[index])
}

/// Per-locale message catalog overrides, keyed by canonical locale id.
pub(crate) type MessageOverrides = HashMap<String, HashMap<String, String>>;

/// Localized message lookup.
///
/// Resolution: resource overrides for the active locale, then the built-in
/// table for the active locale, then the built-in `en-us` table, then the
/// key itself.
#[derive(Debug, Default)]
pub(crate) struct Messages {
    locale: Locale,
    overrides: MessageOverrides,
}

impl Messages {
    pub(crate) fn locale(&self) -> Locale {
        self.locale
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub(crate) fn set_overrides(&mut self, overrides: MessageOverrides) {
        self.overrides = overrides;
    }

    /// Look up a message by key.
    pub(crate) fn get(&self, key: &str) -> String {
        if let Some(msg) = self
            .overrides
            .get(self.locale.as_str())
            .and_then(|table| table.get(key))
        {
            return msg.clone();
        }
        builtin_message(self.locale, key)
            .or_else(|| builtin_message(Locale::EnUs, key))
            .unwrap_or(key)
            .to_owned()
    }

    /// Look up a message and substitute `{name}` placeholders.
    pub(crate) fn format(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let mut msg = self.get(key);
        for (name, value) in vars {
            msg = msg.replace(&format!("{{{name}}}"), value);
        }
        msg
    }
}
