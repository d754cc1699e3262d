//! Internationalization
//!
//! Locale resolution and the formatters and collator used to render and
//! compare cell values. Every formatter degrades to a locale default instead
//! of failing: unknown locales, unsupported options and invalid patterns are
//! logged at `warn` level and ignored.

mod case;
mod collator;
mod datetime;
mod locale;
mod number;
mod relative_time;

use serde::Deserialize;
use serde::Serialize;

pub use case::to_lowercase;
pub use collator::CaseFirst;
pub use collator::Collator;
pub use collator::CollatorOptions;
pub use collator::Sensitivity;
pub use datetime::DateTimeFormat;
pub use datetime::DateTimeFormatOptions;
pub use datetime::DateTimeKind;
pub use datetime::FormatStyle;
pub use locale::Locale;
pub use number::NumberFormat;
pub use number::NumberFormatOptions;
pub use number::NumberStyle;
pub use relative_time::Numeric;
pub use relative_time::RelativeTimeFormat;
pub use relative_time::RelativeTimeFormatOptions;
pub use relative_time::RelativeTimeFormatter;
pub use relative_time::RelativeTimeStyle;
pub use relative_time::RelativeTimeUnit;

/// Display labels for boolean cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanLabels {
    #[serde(rename = "true")]
    pub true_label: String,
    #[serde(rename = "false")]
    pub false_label: String,
    /// Used for undefined values.
    pub empty: String,
}

impl BooleanLabels {
    pub fn new(
        true_label: impl Into<String>,
        false_label: impl Into<String>,
        empty: impl Into<String>,
    ) -> Self {
        Self {
            true_label: true_label.into(),
            false_label: false_label.into(),
            empty: empty.into(),
        }
    }

    pub fn label(&self, value: Option<bool>) -> &str {
        match value {
            Some(true) => &self.true_label,
            Some(false) => &self.false_label,
            None => &self.empty,
        }
    }
}

impl Default for BooleanLabels {
    fn default() -> Self {
        Self::new("true", "false", "")
    }
}
