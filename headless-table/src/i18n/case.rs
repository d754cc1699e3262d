//! Locale-aware case mapping

use std::sync::OnceLock;

use icu_casemap::CaseMapper;
use icu_casemap::CaseMapperBorrowed;
use icu_normalizer::ComposingNormalizer;
use icu_normalizer::ComposingNormalizerBorrowed;

use super::Locale;

fn case_mapper() -> &'static CaseMapperBorrowed<'static> {
    static CM: OnceLock<CaseMapperBorrowed<'static>> = OnceLock::new();
    CM.get_or_init(CaseMapper::new)
}

fn nfc() -> &'static ComposingNormalizerBorrowed<'static> {
    static NFC: OnceLock<ComposingNormalizerBorrowed<'static>> = OnceLock::new();
    NFC.get_or_init(ComposingNormalizer::new_nfc)
}

/// Lowercases `s` with the rules of `locale` (Turkish dotted/dotless `i`
/// and friends), composed to NFC so precomposed and combining spellings of
/// the same letter compare equal.
pub fn to_lowercase(s: &str, locale: &Locale) -> String {
    if s.is_ascii() && !matches!(locale.language(), "tr" | "az") {
        return s.to_ascii_lowercase();
    }
    let lower = case_mapper().lowercase_to_string(s, &locale.langid());
    nfc().normalize(&lower).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_default() {
        let en = Locale::new("en-US");
        assert_eq!(to_lowercase("UserName-1", &en), "username-1");
        assert_eq!(to_lowercase("ÄÖÜ", &en), "äöü");
    }

    #[test]
    fn test_lowercase_turkish() {
        let tr = Locale::new("tr");
        assert_eq!(to_lowercase("I", &tr), "ı");
        assert_eq!(to_lowercase("İ", &tr), "i");
        assert_eq!(to_lowercase("I", &Locale::new("en")), "i");
    }

    #[test]
    fn test_lowercase_composes() {
        let en = Locale::new("en-US");
        assert_eq!(to_lowercase("ZOE\u{308}", &en), "zo\u{eb}");
        assert_eq!(to_lowercase("Zo\u{eb}", &en), "zo\u{eb}");
    }
}
