//! Locale-aware string collation

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use icu_collator::Collator as IcuCollator;
use icu_collator::CollatorBorrowed;
use icu_collator::CollatorPreferences;
use icu_collator::options::AlternateHandling;
use icu_collator::options::CaseLevel;
use icu_collator::options::CollatorOptions as IcuCollatorOptions;
use icu_collator::options::Strength;
use icu_collator::preferences::CollationCaseFirst;
use icu_collator::preferences::CollationNumericOrdering;
use serde::Deserialize;
use serde::Serialize;

use super::Locale;

/// Which differences between strings are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sensitivity {
    /// Only base letters: `a = á = A`.
    Base,
    /// Base letters and accents: `a ≠ á`, `a = A`.
    Accent,
    /// Base letters and case: `a ≠ A`, `a = á`.
    Case,
    /// Everything: `a ≠ á ≠ A`.
    Variant,
}

/// Whether upper- or lowercase sorts first among otherwise equal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseFirst {
    Upper,
    Lower,
    /// Locale default.
    False,
}

/// Collator configuration. Unset fields take the collator defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollatorOptions {
    pub sensitivity: Option<Sensitivity>,
    pub case_first: Option<CaseFirst>,
    /// Compare digit runs by numeric value (`"2" < "10"`).
    pub numeric: Option<bool>,
    /// Skip whitespace, punctuation and symbols.
    pub ignore_punctuation: Option<bool>,
}

impl CollatorOptions {
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }

    pub fn with_case_first(mut self, case_first: CaseFirst) -> Self {
        self.case_first = Some(case_first);
        self
    }

    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = Some(numeric);
        self
    }

    pub fn with_ignore_punctuation(mut self, ignore: bool) -> Self {
        self.ignore_punctuation = Some(ignore);
        self
    }

    /// Overlays the fields set in `other` onto `self`.
    pub fn merge(&self, other: &CollatorOptions) -> CollatorOptions {
        CollatorOptions {
            sensitivity: other.sensitivity.or(self.sensitivity),
            case_first: other.case_first.or(self.case_first),
            numeric: other.numeric.or(self.numeric),
            ignore_punctuation: other.ignore_punctuation.or(self.ignore_punctuation),
        }
    }
}

/// Compares strings with the collation rules of a locale.
///
/// Backed by the ICU4X root collation with CLDR tailorings, so `Ø` sorts
/// with `O` in English and `Ä` after `Z` in Swedish. [`Sensitivity`] maps
/// onto the collation strength:
///
/// | sensitivity | strength | case level |
/// |---|---|---|
/// | base | primary | off |
/// | accent | secondary | off |
/// | case | primary | on |
/// | variant | tertiary | off |
#[derive(Clone)]
pub struct Collator {
    locale: Locale,
    options: CollatorOptions,
    inner: Option<Arc<CollatorBorrowed<'static>>>,
}

impl Collator {
    pub fn new(locale: &Locale, options: &CollatorOptions) -> Self {
        let mut preferences = CollatorPreferences::from(&locale.icu_locale());
        preferences.case_first = options.case_first.map(|case_first| match case_first {
            CaseFirst::Upper => CollationCaseFirst::Upper,
            CaseFirst::Lower => CollationCaseFirst::Lower,
            CaseFirst::False => CollationCaseFirst::False,
        });
        preferences.numeric_ordering = options.numeric.map(|numeric| {
            if numeric {
                CollationNumericOrdering::True
            } else {
                CollationNumericOrdering::False
            }
        });

        let mut icu_options = IcuCollatorOptions::default();
        let (strength, case_level) = match options.sensitivity.unwrap_or(Sensitivity::Variant) {
            Sensitivity::Base => (Strength::Primary, CaseLevel::Off),
            Sensitivity::Accent => (Strength::Secondary, CaseLevel::Off),
            Sensitivity::Case => (Strength::Primary, CaseLevel::On),
            Sensitivity::Variant => (Strength::Tertiary, CaseLevel::Off),
        };
        icu_options.strength = Some(strength);
        icu_options.case_level = Some(case_level);
        if options.ignore_punctuation == Some(true) {
            icu_options.alternate_handling = Some(AlternateHandling::Shifted);
        }

        let inner = IcuCollator::try_new(preferences, icu_options)
            .or_else(|err| {
                log::warn!("No collation data for {locale}, using root collation: {err}");
                IcuCollator::try_new(CollatorPreferences::default(), icu_options)
            })
            .map(Arc::new)
            .inspect_err(|err| log::warn!("Collation unavailable, comparing code points: {err}"))
            .ok();

        Self {
            locale: locale.clone(),
            options: options.clone(),
            inner,
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.inner {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("locale", &self.locale)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collator(options: CollatorOptions) -> Collator {
        Collator::new(&Locale::new("en-US"), &options)
    }

    #[test]
    fn test_default_ordering() {
        let c = collator(CollatorOptions::default());
        assert_eq!(c.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(c.compare("a", "A"), Ordering::Less);
        assert_eq!(c.compare("a", "á"), Ordering::Less);
        assert_eq!(c.compare("á", "b"), Ordering::Less);
        assert_eq!(c.compare("abc", "abc"), Ordering::Equal);
        assert_eq!(c.compare("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_case_first_upper() {
        let c = collator(CollatorOptions::default().with_case_first(CaseFirst::Upper));
        assert_eq!(c.compare("A", "a"), Ordering::Less);
        assert_eq!(c.compare("a", "b"), Ordering::Less);
    }

    #[test]
    fn test_sensitivity() {
        let base = collator(CollatorOptions::default().with_sensitivity(Sensitivity::Base));
        assert_eq!(base.compare("a", "Á"), Ordering::Equal);

        let accent = collator(CollatorOptions::default().with_sensitivity(Sensitivity::Accent));
        assert_eq!(accent.compare("a", "A"), Ordering::Equal);
        assert_ne!(accent.compare("a", "á"), Ordering::Equal);

        let case = collator(CollatorOptions::default().with_sensitivity(Sensitivity::Case));
        assert_eq!(case.compare("a", "á"), Ordering::Equal);
        assert_ne!(case.compare("a", "A"), Ordering::Equal);
    }

    #[test]
    fn test_numeric() {
        let plain = collator(CollatorOptions::default());
        assert_eq!(plain.compare("item-10", "item-2"), Ordering::Less);

        let numeric = collator(CollatorOptions::default().with_numeric(true));
        assert_eq!(numeric.compare("item-10", "item-2"), Ordering::Greater);

        let numeric_base = collator(
            CollatorOptions::default()
                .with_numeric(true)
                .with_sensitivity(Sensitivity::Base),
        );
        assert_eq!(numeric_base.compare("item-02", "item-2"), Ordering::Equal);
    }

    #[test]
    fn test_ignore_punctuation() {
        let c = collator(CollatorOptions::default().with_ignore_punctuation(true));
        assert_eq!(c.compare("co-op", "coop"), Ordering::Equal);
    }

    #[test]
    fn test_letters_without_decomposition() {
        let pl = Collator::new(&Locale::new("pl-PL"), &CollatorOptions::default());
        assert_eq!(pl.compare("Łukasz", "Marek"), Ordering::Less);
        assert_eq!(pl.compare("Lech", "Łukasz"), Ordering::Less);

        let en = collator(CollatorOptions::default());
        assert_eq!(en.compare("Øystein", "Peter"), Ordering::Less);
        assert_eq!(en.compare("æ", "b"), Ordering::Less);
    }

    #[test]
    fn test_locale_tailoring() {
        let de = Collator::new(&Locale::new("de-DE"), &CollatorOptions::default());
        let sv = Collator::new(&Locale::new("sv-SE"), &CollatorOptions::default());
        assert_eq!(de.compare("Äpple", "Zebra"), Ordering::Less);
        assert_eq!(sv.compare("Äpple", "Zebra"), Ordering::Greater);
    }

    #[test]
    fn test_merge() {
        let global = CollatorOptions::default().with_numeric(true);
        let column = CollatorOptions::default().with_case_first(CaseFirst::Upper);
        let merged = global.merge(&column);
        assert_eq!(merged.numeric, Some(true));
        assert_eq!(merged.case_first, Some(CaseFirst::Upper));
    }
}
