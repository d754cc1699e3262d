//! Relative time formatting ("in 3 days", "vor 2 Stunden")

use serde::Deserialize;
use serde::Serialize;

use super::Locale;
use super::NumberFormat;
use super::NumberFormatOptions;

/// Unit of a relative-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelativeTimeUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

/// `Auto` allows phrases such as "yesterday" in place of "1 day ago".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Numeric {
    Always,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelativeTimeStyle {
    Long,
    Short,
    Narrow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelativeTimeFormatOptions {
    pub numeric: Option<Numeric>,
    pub style: Option<RelativeTimeStyle>,
}

impl RelativeTimeFormatOptions {
    pub fn with_numeric(mut self, numeric: Numeric) -> Self {
        self.numeric = Some(numeric);
        self
    }

    pub fn with_style(mut self, style: RelativeTimeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Overlays the fields set in `other` onto `self`.
    pub fn merge(&self, other: &RelativeTimeFormatOptions) -> RelativeTimeFormatOptions {
        RelativeTimeFormatOptions {
            numeric: other.numeric.or(self.numeric),
            style: other.style.or(self.style),
        }
    }
}

/// Renders a signed amount of a unit relative to now.
///
/// Negative values are in the past.
pub trait RelativeTimeFormatter: Send + Sync {
    fn format(&self, value: f64, unit: RelativeTimeUnit) -> String;
}

impl<F> RelativeTimeFormatter for F
where
    F: Fn(f64, RelativeTimeUnit) -> String + Send + Sync,
{
    fn format(&self, value: f64, unit: RelativeTimeUnit) -> String {
        self(value, unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    English,
    German,
}

/// Built-in relative time formatter with English and German phrasing.
/// Other languages fall back to English wording with locale number
/// formatting.
#[derive(Debug, Clone)]
pub struct RelativeTimeFormat {
    language: Language,
    numeric: Numeric,
    style: RelativeTimeStyle,
    numbers: NumberFormat,
}

impl RelativeTimeFormat {
    pub fn new(locale: &Locale, options: &RelativeTimeFormatOptions) -> Self {
        let language = match locale.language() {
            "en" => Language::English,
            "de" => Language::German,
            other => {
                log::warn!("no relative time phrasing for {other:?}, using English");
                Language::English
            }
        };
        Self {
            language,
            numeric: options.numeric.unwrap_or(Numeric::Always),
            style: options.style.unwrap_or(RelativeTimeStyle::Long),
            numbers: NumberFormat::new(locale, &NumberFormatOptions::default()),
        }
    }

    fn english(&self, value: f64, unit: RelativeTimeUnit) -> String {
        use RelativeTimeUnit::*;

        if self.numeric == Numeric::Auto && value.fract() == 0.0 {
            let phrase = match (unit, value as i64) {
                (Day, -1) => Some("yesterday"),
                (Day, 0) => Some("today"),
                (Day, 1) => Some("tomorrow"),
                (Hour, 0) => Some("this hour"),
                (Minute, 0) => Some("this minute"),
                (Second, 0) => Some("now"),
                _ => None,
            };
            if let Some(phrase) = phrase {
                return phrase.to_string();
            }
            if matches!(unit, Year | Quarter | Month | Week) {
                let name = english_name(unit, false);
                match value as i64 {
                    -1 => return format!("last {name}"),
                    0 => return format!("this {name}"),
                    1 => return format!("next {name}"),
                    _ => {}
                }
            }
        }

        let amount = self.numbers.format(value.abs());
        let plural = value.abs() != 1.0;
        let past = value.is_sign_negative();
        let label = match self.style {
            RelativeTimeStyle::Narrow => {
                let suffix = match unit {
                    Year => "y",
                    Quarter => "q",
                    Month => "mo",
                    Week => "w",
                    Day => "d",
                    Hour => "h",
                    Minute => "m",
                    Second => "s",
                };
                let body = format!("{amount}{suffix}");
                return if past { format!("{body} ago") } else { format!("in {body}") };
            }
            RelativeTimeStyle::Short => match unit {
                Year => "yr.",
                Quarter => if plural { "qtrs." } else { "qtr." },
                Month => "mo.",
                Week => "wk.",
                Day => if plural { "days" } else { "day" },
                Hour => "hr.",
                Minute => "min.",
                Second => "sec.",
            }
            .to_string(),
            RelativeTimeStyle::Long => english_name(unit, plural).to_string(),
        };

        if past {
            format!("{amount} {label} ago")
        } else {
            format!("in {amount} {label}")
        }
    }

    fn german(&self, value: f64, unit: RelativeTimeUnit) -> String {
        use RelativeTimeUnit::*;

        if self.numeric == Numeric::Auto && value.fract() == 0.0 {
            let phrase = match (unit, value as i64) {
                (Day, -2) => Some("vorgestern"),
                (Day, -1) => Some("gestern"),
                (Day, 0) => Some("heute"),
                (Day, 1) => Some("morgen"),
                (Day, 2) => Some("übermorgen"),
                (Year, -1) => Some("letztes Jahr"),
                (Year, 0) => Some("dieses Jahr"),
                (Year, 1) => Some("nächstes Jahr"),
                (Quarter, -1) => Some("letztes Quartal"),
                (Quarter, 0) => Some("dieses Quartal"),
                (Quarter, 1) => Some("nächstes Quartal"),
                (Month, -1) => Some("letzten Monat"),
                (Month, 0) => Some("diesen Monat"),
                (Month, 1) => Some("nächsten Monat"),
                (Week, -1) => Some("letzte Woche"),
                (Week, 0) => Some("diese Woche"),
                (Week, 1) => Some("nächste Woche"),
                (Hour, 0) => Some("in dieser Stunde"),
                (Minute, 0) => Some("in dieser Minute"),
                (Second, 0) => Some("jetzt"),
                _ => None,
            };
            if let Some(phrase) = phrase {
                return phrase.to_string();
            }
        }

        let amount = self.numbers.format(value.abs());
        let plural = value.abs() != 1.0;
        let label = match (unit, plural) {
            (Year, false) => "Jahr",
            (Year, true) => "Jahren",
            (Quarter, false) => "Quartal",
            (Quarter, true) => "Quartalen",
            (Month, false) => "Monat",
            (Month, true) => "Monaten",
            (Week, false) => "Woche",
            (Week, true) => "Wochen",
            (Day, false) => "Tag",
            (Day, true) => "Tagen",
            (Hour, false) => "Stunde",
            (Hour, true) => "Stunden",
            (Minute, false) => "Minute",
            (Minute, true) => "Minuten",
            (Second, false) => "Sekunde",
            (Second, true) => "Sekunden",
        };

        if value.is_sign_negative() {
            format!("vor {amount} {label}")
        } else {
            format!("in {amount} {label}")
        }
    }
}

fn english_name(unit: RelativeTimeUnit, plural: bool) -> &'static str {
    use RelativeTimeUnit::*;

    match (unit, plural) {
        (Year, false) => "year",
        (Year, true) => "years",
        (Quarter, false) => "quarter",
        (Quarter, true) => "quarters",
        (Month, false) => "month",
        (Month, true) => "months",
        (Week, false) => "week",
        (Week, true) => "weeks",
        (Day, false) => "day",
        (Day, true) => "days",
        (Hour, false) => "hour",
        (Hour, true) => "hours",
        (Minute, false) => "minute",
        (Minute, true) => "minutes",
        (Second, false) => "second",
        (Second, true) => "seconds",
    }
}

impl RelativeTimeFormatter for RelativeTimeFormat {
    fn format(&self, value: f64, unit: RelativeTimeUnit) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match self.language {
            Language::English => self.english(value, unit),
            Language::German => self.german(value, unit),
        }
    }
}
