// Localization of catalog text: supported languages, multilingual values and
// Accept-Language negotiation.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A supported UI/content language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Ar,
    Bn,
    En,
    Es,
    Fr,
    Id,
    Tr,
    Ur,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Ar,
        Language::Bn,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::Id,
        Language::Tr,
        Language::Ur,
    ];

    /// Fallback anchor for every multilingual value.
    pub const FALLBACK: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::Bn => "bn",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Id => "id",
            Language::Tr => "tr",
            Language::Ur => "ur",
        }
    }

    /// Case-insensitive lookup of a bare language code.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/**
 * negotiate
 * Picks the response language from an Accept-Language value. Only the primary
 * subtag of the leading range counts (`fr-CA;q=0.9, en` reads as `fr`);
 * anything missing, malformed or unsupported yields en.
 */
pub fn negotiate(accept_language: Option<&str>) -> Language {
    accept_language
        .and_then(|header| header.split(',').next())
        .and_then(|range| range.split(';').next())
        .and_then(|tag| tag.trim().split(['-', '_']).next())
        .and_then(Language::from_code)
        .unwrap_or(Language::FALLBACK)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported language code '{0}'")]
pub struct UnsupportedLanguage(pub String);

/// A value holding one string per language. `en` is expected on every value
/// and is what lookups fall back to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct LocalizedText {
    entries: BTreeMap<Language, String>,
}

impl LocalizedText {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(lang, text)| (lang, text.into()))
                .collect(),
        }
    }

    /// Shorthand for a value that only carries the English entry.
    #[cfg(test)]
    pub fn english(text: impl Into<String>) -> Self {
        Self::new([(Language::En, text)])
    }

    pub fn get(&self, lang: Language) -> Option<&str> {
        self.entries.get(&lang).map(String::as_str)
    }

    pub fn has_fallback(&self) -> bool {
        self.entries.contains_key(&Language::FALLBACK)
    }

    /// Best string for `lang`: the exact entry, then `en`, then "".
    pub fn resolve(&self, lang: Language) -> &str {
        self.get(lang)
            .or_else(|| self.get(Language::FALLBACK))
            .unwrap_or_default()
    }
}

impl TryFrom<BTreeMap<String, String>> for LocalizedText {
    type Error = UnsupportedLanguage;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (code, text) in raw {
            let lang = Language::from_code(&code).ok_or(UnsupportedLanguage(code))?;
            entries.insert(lang, text);
        }
        Ok(Self { entries })
    }
}

/// Owned form of [`LocalizedText::resolve`], used when building responses.
pub fn translate(text: &LocalizedText, lang: Language) -> String {
    text.resolve(lang).to_string()
}
