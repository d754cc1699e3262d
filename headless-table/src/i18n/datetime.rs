//! Locale-aware date and time formatting

use std::fmt::Write;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use super::Locale;

/// Which parts of a date-time are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeKind {
    Date,
    Time,
    DateTime,
}

/// Verbosity of the date or time part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatStyle {
    Full,
    Long,
    Medium,
    Short,
}

/// Date/time format configuration.
///
/// `pattern` is a chrono strftime pattern and wins over the styles. Month and
/// weekday names in it are localized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateTimeFormatOptions {
    pub date_style: Option<FormatStyle>,
    pub time_style: Option<FormatStyle>,
    pub hour12: Option<bool>,
    pub pattern: Option<String>,
}

impl DateTimeFormatOptions {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn with_date_style(mut self, style: FormatStyle) -> Self {
        self.date_style = Some(style);
        self
    }

    pub fn with_time_style(mut self, style: FormatStyle) -> Self {
        self.time_style = Some(style);
        self
    }

    pub fn with_hour12(mut self, hour12: bool) -> Self {
        self.hour12 = Some(hour12);
        self
    }

    /// Overlays the fields set in `other` onto `self`.
    pub fn merge(&self, other: &DateTimeFormatOptions) -> DateTimeFormatOptions {
        DateTimeFormatOptions {
            date_style: other.date_style.or(self.date_style),
            time_style: other.time_style.or(self.time_style),
            hour12: other.hour12.or(self.hour12),
            pattern: other.pattern.clone().or_else(|| self.pattern.clone()),
        }
    }
}

/// Formats date-times for one locale, kind and option set.
#[derive(Debug, Clone)]
pub struct DateTimeFormat {
    locale: Locale,
    kind: DateTimeKind,
    options: DateTimeFormatOptions,
}

impl DateTimeFormat {
    pub fn new(locale: &Locale, options: &DateTimeFormatOptions, kind: DateTimeKind) -> Self {
        Self {
            locale: locale.clone(),
            kind,
            options: options.clone(),
        }
    }

    /// The strftime pattern this formatter renders with.
    pub fn resolved_pattern(&self) -> String {
        if let Some(pattern) = &self.options.pattern {
            return pattern.clone();
        }
        self.style_pattern()
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        let chrono_locale = self.locale.chrono_locale();
        let pattern = self.resolved_pattern();

        let mut out = String::new();
        let utc = value.and_utc();
        if write!(out, "{}", utc.format_localized(&pattern, chrono_locale)).is_ok() {
            return out;
        }

        log::warn!("invalid date/time pattern {pattern:?}, using locale default");
        out.clear();
        let fallback = self.style_pattern();
        match write!(out, "{}", utc.format_localized(&fallback, chrono_locale)) {
            Ok(()) => out,
            Err(_) => value.to_string(),
        }
    }

    fn style_pattern(&self) -> String {
        let date_style = self.options.date_style;
        let time_style = self.options.time_style;
        let (show_date, show_time) = match self.kind {
            DateTimeKind::Date => (true, false),
            DateTimeKind::Time => (false, true),
            DateTimeKind::DateTime if date_style.is_some() || time_style.is_some() => {
                (date_style.is_some(), time_style.is_some())
            }
            DateTimeKind::DateTime => (true, true),
        };

        let date = show_date.then(|| date_pattern(&self.locale, date_style));
        let time = show_time.then(|| self.time_pattern(time_style));
        match (date, time) {
            (Some(date), Some(time)) => format!("{date}{}{time}", separator(&self.locale)),
            (Some(date), None) => date.to_string(),
            (None, Some(time)) => time.to_string(),
            (None, None) => String::new(),
        }
    }

    fn time_pattern(&self, style: Option<FormatStyle>) -> &'static str {
        let hour12 = self.options.hour12.unwrap_or_else(|| uses_hour12(&self.locale));
        let seconds = style != Some(FormatStyle::Short);
        match (hour12, seconds) {
            (true, true) => "%-I:%M:%S %p",
            (true, false) => "%-I:%M %p",
            (false, true) => "%H:%M:%S",
            (false, false) => "%H:%M",
        }
    }
}

fn uses_hour12(locale: &Locale) -> bool {
    match locale.language() {
        "en" => !matches!(locale.region(), Some("GB" | "IE")),
        "ko" | "hi" => true,
        _ => false,
    }
}

fn separator(locale: &Locale) -> &'static str {
    match locale.language() {
        "en" | "de" | "es" | "it" | "nl" | "pl" | "ru" => ", ",
        _ => " ",
    }
}

/// Date patterns: default, short, medium, long, full.
fn date_pattern(locale: &Locale, style: Option<FormatStyle>) -> &'static str {
    let patterns: [&'static str; 5] = match (locale.language(), locale.region()) {
        ("en", None | Some("US")) => [
            "%-m/%-d/%Y",
            "%-m/%-d/%y",
            "%b %-d, %Y",
            "%B %-d, %Y",
            "%A, %B %-d, %Y",
        ],
        ("en", _) => ["%d/%m/%Y", "%d/%m/%Y", "%-d %b %Y", "%-d %B %Y", "%A %-d %B %Y"],
        ("de", _) => [
            "%-d.%-m.%Y",
            "%d.%m.%y",
            "%d.%m.%Y",
            "%-d. %B %Y",
            "%A, %-d. %B %Y",
        ],
        ("fr", _) => ["%d/%m/%Y", "%d/%m/%Y", "%-d %b %Y", "%-d %B %Y", "%A %-d %B %Y"],
        ("es", _) => [
            "%-d/%-m/%Y",
            "%-d/%-m/%y",
            "%-d %b %Y",
            "%-d de %B de %Y",
            "%A, %-d de %B de %Y",
        ],
        ("it", _) => ["%-d/%-m/%Y", "%d/%m/%y", "%-d %b %Y", "%-d %B %Y", "%A %-d %B %Y"],
        ("nl", _) => ["%-d-%-m-%Y", "%d-%m-%Y", "%-d %b %Y", "%-d %B %Y", "%A %-d %B %Y"],
        ("ja" | "zh", _) => [
            "%Y/%-m/%-d",
            "%Y/%m/%d",
            "%Y/%m/%d",
            "%Y年%-m月%-d日",
            "%Y年%-m月%-d日%A",
        ],
        _ => ["%Y-%m-%d", "%Y-%m-%d", "%Y-%m-%d", "%-d %B %Y", "%A, %-d %B %Y"],
    };
    match style {
        None => patterns[0],
        Some(FormatStyle::Short) => patterns[1],
        Some(FormatStyle::Medium) => patterns[2],
        Some(FormatStyle::Long) => patterns[3],
        Some(FormatStyle::Full) => patterns[4],
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, 31)
            .unwrap()
            .and_hms_opt(15, 4, 5)
            .unwrap()
    }

    fn format(tag: &str, options: DateTimeFormatOptions, kind: DateTimeKind) -> String {
        DateTimeFormat::new(&Locale::new(tag), &options, kind).format(&sample())
    }

    #[test]
    fn test_defaults_en_us() {
        let options = DateTimeFormatOptions::default();
        assert_eq!(format("en-US", options.clone(), DateTimeKind::Date), "1/31/2022");
        assert_eq!(format("en-US", options.clone(), DateTimeKind::Time), "3:04:05 PM");
        assert_eq!(
            format("en-US", options, DateTimeKind::DateTime),
            "1/31/2022, 3:04:05 PM"
        );
    }

    #[test]
    fn test_defaults_de() {
        let options = DateTimeFormatOptions::default();
        assert_eq!(format("de-DE", options.clone(), DateTimeKind::Date), "31.1.2022");
        assert_eq!(format("de-DE", options, DateTimeKind::Time), "15:04:05");
    }

    #[test]
    fn test_styles_and_hour12() {
        let long = DateTimeFormatOptions::default().with_date_style(FormatStyle::Long);
        assert_eq!(format("en-US", long.clone(), DateTimeKind::Date), "January 31, 2022");
        assert_eq!(format("de-DE", long.clone(), DateTimeKind::Date), "31. Januar 2022");
        assert_eq!(format("en-US", long, DateTimeKind::DateTime), "January 31, 2022");

        let short_24 = DateTimeFormatOptions::default()
            .with_time_style(FormatStyle::Short)
            .with_hour12(false);
        assert_eq!(format("en-US", short_24, DateTimeKind::Time), "15:04");
    }

    #[test]
    fn test_explicit_pattern() {
        let options = DateTimeFormatOptions::pattern("%Y-%m-%d %H:%M");
        assert_eq!(format("fr-FR", options, DateTimeKind::Date), "2022-01-31 15:04");
    }

    #[test]
    fn test_invalid_pattern_falls_back() {
        let options = DateTimeFormatOptions::pattern("%Q");
        assert_eq!(format("en-US", options, DateTimeKind::Date), "1/31/2022");
    }

    #[test]
    fn test_merge() {
        let global = DateTimeFormatOptions::default().with_hour12(false);
        let column = DateTimeFormatOptions::default().with_date_style(FormatStyle::Short);
        let merged = global.merge(&column);
        assert_eq!(merged.hour12, Some(false));
        assert_eq!(merged.date_style, Some(FormatStyle::Short));
    }
}
