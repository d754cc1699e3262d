//! Locale tags

use std::fmt;
use std::str::FromStr;

use icu_locale_core::LanguageIdentifier;
use serde::Deserialize;
use serde::Serialize;

/// A BCP-47-ish locale tag such as `en-US`, `de` or `pt_BR.UTF-8`.
///
/// Only the language and region subtags are used. Anything else (scripts,
/// variants, POSIX encodings and modifiers) is dropped when parsing, so
/// unusual tags degrade to their language instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parses a locale tag. Never fails; an unusable tag yields `und`.
    pub fn new(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let mut parts = tag.split(['-', '_']).filter(|p| !p.is_empty());

        let language = parts
            .next()
            .filter(|l| (2..=3).contains(&l.len()) && l.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|l| l.to_ascii_lowercase())
            .unwrap_or_else(|| "und".to_string());

        let region = parts.find_map(|p| {
            if p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()) {
                Some(p.to_ascii_uppercase())
            } else if p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()) {
                Some(p.to_string())
            } else {
                None
            }
        });

        Self { language, region }
    }

    /// The locale of the running process, read from `LC_ALL`, `LC_MESSAGES`
    /// and `LANG` in that order. Falls back to `en-US`.
    pub fn platform_default() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
            .map(|value| Self::new(&value))
            .filter(|locale| locale.language != "und")
            .unwrap_or_default()
    }

    /// Returns `locale` when given, otherwise the platform default.
    pub fn resolve(locale: Option<&Locale>) -> Self {
        match locale {
            Some(locale) => locale.clone(),
            None => Self::platform_default(),
        }
    }

    /// Lowercase language subtag, e.g. `de`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region subtag, e.g. `AT`.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// ICU language identifier for case mapping.
    pub(crate) fn langid(&self) -> LanguageIdentifier {
        self.to_string()
            .parse()
            .unwrap_or(LanguageIdentifier::UNKNOWN)
    }

    /// ICU locale for collation.
    pub(crate) fn icu_locale(&self) -> icu_locale_core::Locale {
        icu_locale_core::Locale::from(self.langid())
    }

    /// Closest chrono locale for month and weekday names.
    pub(crate) fn chrono_locale(&self) -> chrono::Locale {
        use chrono::Locale as L;

        match (self.language(), self.region()) {
            ("en", Some("GB")) => L::en_GB,
            ("en", Some("AU")) => L::en_AU,
            ("en", Some("CA")) => L::en_CA,
            ("en", _) => L::en_US,
            ("de", Some("AT")) => L::de_AT,
            ("de", Some("CH")) => L::de_CH,
            ("de", _) => L::de_DE,
            ("fr", Some("CA")) => L::fr_CA,
            ("fr", _) => L::fr_FR,
            ("es", _) => L::es_ES,
            ("it", _) => L::it_IT,
            ("nl", _) => L::nl_NL,
            ("pt", Some("PT")) => L::pt_PT,
            ("pt", _) => L::pt_BR,
            ("sv", _) => L::sv_SE,
            ("da", _) => L::da_DK,
            ("nb", _) | ("no", _) => L::nb_NO,
            ("fi", _) => L::fi_FI,
            ("pl", _) => L::pl_PL,
            ("cs", _) => L::cs_CZ,
            ("tr", _) => L::tr_TR,
            ("ru", _) => L::ru_RU,
            ("uk", _) => L::uk_UA,
            ("ja", _) => L::ja_JP,
            ("zh", _) => L::zh_CN,
            ("ko", _) => L::ko_KR,
            _ => L::POSIX,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: Some("US".to_string()),
        }
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}
