//! Locale-aware number formatting

use std::str::FromStr;

use num_bigint::BigInt;
use num_bigint::Sign;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

use super::Locale;

/// How a number is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyle {
    Decimal,
    /// Multiplies by 100 and appends a percent sign.
    Percent,
    /// Requires [`NumberFormatOptions::currency`].
    Currency,
}

/// Number format configuration. Unset fields take per-style defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberFormatOptions {
    pub style: Option<NumberStyle>,
    /// ISO 4217 code, e.g. `EUR`.
    pub currency: Option<String>,
    pub use_grouping: Option<bool>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
}

impl NumberFormatOptions {
    pub fn percent() -> Self {
        Self {
            style: Some(NumberStyle::Percent),
            ..Default::default()
        }
    }

    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: Some(NumberStyle::Currency),
            currency: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = Some(use_grouping);
        self
    }

    pub fn with_fraction_digits(mut self, min: usize, max: usize) -> Self {
        self.minimum_fraction_digits = Some(min);
        self.maximum_fraction_digits = Some(max.max(min));
        self
    }

    /// Overlays the fields set in `other` onto `self`.
    pub fn merge(&self, other: &NumberFormatOptions) -> NumberFormatOptions {
        NumberFormatOptions {
            style: other.style.or(self.style),
            currency: other.currency.clone().or_else(|| self.currency.clone()),
            use_grouping: other.use_grouping.or(self.use_grouping),
            minimum_fraction_digits: other.minimum_fraction_digits.or(self.minimum_fraction_digits),
            maximum_fraction_digits: other.maximum_fraction_digits.or(self.maximum_fraction_digits),
        }
    }
}

/// Decimal separator, group separator and minimum grouping digits.
struct Symbols {
    decimal: &'static str,
    group: &'static str,
    min_grouping: usize,
    percent: &'static str,
}

fn symbols(locale: &Locale) -> Symbols {
    const NBSP: &str = "\u{A0}";
    const NNBSP: &str = "\u{202F}";

    match (locale.language(), locale.region()) {
        ("de", Some("CH")) => Symbols { decimal: ".", group: "’", min_grouping: 1, percent: "%" },
        ("de", _) | ("da", _) | ("id", _) | ("tr", _) => {
            Symbols { decimal: ",", group: ".", min_grouping: 1, percent: "\u{A0}%" }
        }
        ("it", _) | ("nl", _) => Symbols { decimal: ",", group: ".", min_grouping: 1, percent: "%" },
        ("es", _) => Symbols { decimal: ",", group: ".", min_grouping: 2, percent: "\u{A0}%" },
        ("pt", Some("PT")) => Symbols { decimal: ",", group: NBSP, min_grouping: 2, percent: "%" },
        ("pt", _) => Symbols { decimal: ",", group: ".", min_grouping: 1, percent: "%" },
        ("fr", _) => Symbols { decimal: ",", group: NNBSP, min_grouping: 1, percent: "\u{202F}%" },
        ("pl", _) => Symbols { decimal: ",", group: NBSP, min_grouping: 2, percent: "%" },
        ("ru", _) | ("uk", _) | ("cs", _) | ("sv", _) | ("fi", _) | ("nb", _) | ("no", _) => {
            Symbols { decimal: ",", group: NBSP, min_grouping: 1, percent: "\u{A0}%" }
        }
        _ => Symbols { decimal: ".", group: ",", min_grouping: 1, percent: "%" },
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "CNY" => Some("CN¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        "RUB" => Some("₽"),
        "TRY" => Some("₺"),
        _ => None,
    }
}

fn currency_fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "HUF" | "ISK" | "CLP" => 0,
        _ => 2,
    }
}

/// Formats numbers for one locale and option set.
///
/// ```
/// use headless_table::i18n::{Locale, NumberFormat, NumberFormatOptions};
///
/// let en = NumberFormat::new(&Locale::new("en-US"), &NumberFormatOptions::default());
/// assert_eq!(en.format(1234.5), "1,234.5");
///
/// let de = NumberFormat::new(&Locale::new("de-DE"), &NumberFormatOptions::default());
/// assert_eq!(de.format(1234.5), "1.234,5");
/// ```
#[derive(Debug, Clone)]
pub struct NumberFormat {
    locale: Locale,
    style: NumberStyle,
    currency: Option<String>,
    use_grouping: bool,
    min_fraction: usize,
    max_fraction: usize,
}

impl NumberFormat {
    pub fn new(locale: &Locale, options: &NumberFormatOptions) -> Self {
        let mut style = options.style.unwrap_or(NumberStyle::Decimal);
        if style == NumberStyle::Currency && options.currency.is_none() {
            log::warn!("currency style without a currency code, formatting as decimal");
            style = NumberStyle::Decimal;
        }

        let (default_min, default_max) = match style {
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency => {
                let digits = options.currency.as_deref().map_or(2, currency_fraction_digits);
                (digits, digits)
            }
        };
        let min_fraction = options.minimum_fraction_digits.unwrap_or(default_min).min(20);
        let max_fraction = options
            .maximum_fraction_digits
            .unwrap_or(default_max.max(min_fraction))
            .clamp(min_fraction, 20);

        Self {
            locale: locale.clone(),
            style,
            currency: options.currency.clone(),
            use_grouping: options.use_grouping.unwrap_or(true),
            min_fraction,
            max_fraction,
        }
    }

    /// Formats a floating point number. Halves round away from zero.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let scale: u8 = match self.style {
            NumberStyle::Percent => 100,
            _ => 1,
        };
        if (value * f64::from(scale)).is_infinite() {
            return self.decorate(value < 0.0, "∞".to_string());
        }

        let fixed = self.round(value.abs(), scale);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let mut frac = frac_part.trim_end_matches('0').to_string();
        while frac.len() < self.min_fraction {
            frac.push('0');
        }

        let negative = value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac.is_empty());
        self.decorate(negative, self.join(int_part, &frac))
    }

    /// Scales the shortest decimal form of `magnitude` and rounds it to
    /// `max_fraction` digits.
    fn round(&self, magnitude: f64, scale: u8) -> String {
        let decimal = Decimal::from_str(&magnitude.to_string())
            .ok()
            .and_then(|d| d.checked_mul(Decimal::from(scale)));
        if let Some(d) = decimal {
            return d
                .round_dp_with_strategy(self.max_fraction as u32, RoundingStrategy::MidpointAwayFromZero)
                .to_string();
        }
        // outside the decimal range: huge values are integral, tiny ones round to zero
        let scaled = magnitude * f64::from(scale);
        if scaled >= 1.0 {
            scaled.to_string()
        } else {
            format!("{:.*}", self.max_fraction, scaled)
        }
    }

    /// Formats an arbitrary precision integer.
    pub fn format_bigint(&self, value: &BigInt) -> String {
        let value = match self.style {
            NumberStyle::Percent => value * BigInt::from(100u8),
            _ => value.clone(),
        };
        let digits = value.magnitude().to_string();
        let frac = "0".repeat(self.min_fraction);
        self.decorate(value.sign() == Sign::Minus, self.join(&digits, &frac))
    }

    fn join(&self, int_part: &str, frac: &str) -> String {
        let symbols = symbols(&self.locale);
        let mut out = if self.use_grouping {
            group(int_part, symbols.group, symbols.min_grouping)
        } else {
            int_part.to_string()
        };
        if !frac.is_empty() {
            out.push_str(symbols.decimal);
            out.push_str(frac);
        }
        out
    }

    fn decorate(&self, negative: bool, body: String) -> String {
        let sign = if negative { "-" } else { "" };
        match self.style {
            NumberStyle::Decimal => format!("{sign}{body}"),
            NumberStyle::Percent => format!("{sign}{body}{}", symbols(&self.locale).percent),
            NumberStyle::Currency => {
                let code = self.currency.as_deref().unwrap_or_default();
                let prefix_locale = matches!(self.locale.language(), "en" | "ja" | "zh" | "ko" | "und");
                match (currency_symbol(code), prefix_locale) {
                    (Some(symbol), true) => format!("{sign}{symbol}{body}"),
                    (None, true) => format!("{sign}{code}\u{A0}{body}"),
                    (Some(symbol), false) => format!("{sign}{body}\u{A0}{symbol}"),
                    (None, false) => format!("{sign}{body}\u{A0}{code}"),
                }
            }
        }
    }
}

/// Inserts `separator` every three digits from the right, provided the
/// number has at least `3 + min_grouping` digits.
fn group(digits: &str, separator: &str, min_grouping: usize) -> String {
    if digits.len() < 3 + min_grouping {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
