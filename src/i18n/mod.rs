//! UI translations
//!
//! The active language lives in a [`Translator`] owned by the app and passed
//! to render functions. Lookups fall back to English, then to the key
//! itself, so a missing string never blanks out the UI.

mod tables;

use crate::model::Status;
use std::collections::HashMap;
use std::fmt;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    De,
    Es,
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::De, Locale::Es]
    }

    /// Language code ("en", "de", "es")
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Es => "es",
        }
    }

    /// Name of the language in that language
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::De => "Deutsch",
            Locale::Es => "Español",
        }
    }

    /// Parse a language code; accepts region suffixes like "de-AT" or "es_MX"
    pub fn from_code(code: &str) -> Option<Self> {
        let lang = code
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or("")
            .to_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    /// Next language in the cycle
    pub fn next(self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|&l| l == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// String table lookup for the active language
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    active: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            active: tables::table(locale).iter().copied().collect(),
            fallback: tables::table(Locale::En).iter().copied().collect(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch the active language
    pub fn set_locale(&mut self, locale: Locale) {
        if locale != self.locale {
            tracing::info!("Language changed: {} -> {}", self.locale, locale);
            *self = Self::new(locale);
        }
    }

    /// Look up a key (e.g. "filters.status")
    pub fn translate<'k>(&self, key: &'k str) -> &'k str {
        if let Some(value) = self.active.get(key) {
            return *value;
        }
        if let Some(value) = self.fallback.get(key) {
            return *value;
        }
        key
    }

    /// Label for a character status
    pub fn status_label(&self, status: Status) -> &'static str {
        let key = match status {
            Status::Alive => "status.alive",
            Status::Dead => "status.dead",
            Status::Unknown => "status.unknown",
        };
        self.translate(key)
    }

    /// Label for a free-text gender; unrecognized values read as "unknown"
    pub fn gender_label(&self, gender: &str) -> &'static str {
        let key = match gender.trim().to_lowercase().as_str() {
            "female" => "gender.female",
            "male" => "gender.male",
            "genderless" => "gender.genderless",
            _ => "gender.unknown",
        };
        self.translate(key)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("de"), Some(Locale::De));
        assert_eq!(Locale::from_code("es_MX.UTF-8"), Some(Locale::Es));
        assert_eq!(Locale::from_code("EN-gb"), Some(Locale::En));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::Es.next(), Locale::En);
    }

    #[test]
    fn test_translate_active_language() {
        let t = Translator::new(Locale::De);
        assert_eq!(t.translate("title"), "Rick und Morty Universum");
        assert_eq!(t.status_label(Status::Dead), "Tot");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let t = Translator::new(Locale::Es);
        assert_eq!(t.translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_gender_label_case_insensitive() {
        let t = Translator::new(Locale::En);
        assert_eq!(t.gender_label("FEMALE"), "Female");
        assert_eq!(t.gender_label("Genderless"), "Genderless");
        assert_eq!(t.gender_label("unknown"), "Unknown");
        assert_eq!(t.gender_label("robot-ish"), "Unknown");
    }

    #[test]
    fn test_every_table_covers_english_keys() {
        let english: Vec<&str> = tables::table(Locale::En).iter().map(|(k, _)| *k).collect();
        for &locale in Locale::all() {
            let keys: Vec<&str> = tables::table(locale).iter().map(|(k, _)| *k).collect();
            for key in &english {
                assert!(keys.contains(key), "{} is missing {}", locale, key);
            }
        }
    }

    #[test]
    fn test_set_locale() {
        let mut t = Translator::default();
        t.set_locale(Locale::Es);
        assert_eq!(t.locale(), Locale::Es);
        assert_eq!(t.translate("title"), "Universo de Rick y Morty");
    }
}
