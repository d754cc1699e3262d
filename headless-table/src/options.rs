//! Table configuration

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::OptionsError;
use crate::i18n::BooleanLabels;
use crate::i18n::CollatorOptions;
use crate::i18n::DateTimeFormatOptions;
use crate::i18n::Locale;
use crate::i18n::NumberFormatOptions;
use crate::i18n::RelativeTimeFormatOptions;
use crate::i18n::RelativeTimeFormatter;
use crate::model::IdFn;
use crate::model::random_id;

/// Whether one or several rows can have their details panel open at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailsPanelType {
    #[default]
    Single,
    Multiple,
}

/// Locale and per-type formatting for the whole table.
///
/// Columns may override the locale; the format options apply to every column
/// of the matching type.
#[derive(Clone)]
pub struct InternationalizationOptions {
    /// Global locale. `None` resolves to the platform default.
    ///
    /// Default: `None`
    pub locale: Option<Locale>,

    /// Collation for string, multi-string and boolean sorting.
    pub collator: CollatorOptions,

    pub number: NumberFormatOptions,
    pub bigint: NumberFormatOptions,
    pub date: DateTimeFormatOptions,
    pub time: DateTimeFormatOptions,
    pub date_time: DateTimeFormatOptions,
    pub relative_time: RelativeTimeFormatOptions,

    /// Replaces the built-in relative time formatter.
    ///
    /// Default: `None`
    pub relative_time_formatter: Option<Arc<dyn RelativeTimeFormatter>>,

    /// Boolean labels. With `None`, boolean cells render as empty strings.
    ///
    /// Default: `{"true", "false", ""}`
    pub booleans: Option<BooleanLabels>,
}

impl Default for InternationalizationOptions {
    fn default() -> Self {
        Self {
            locale: None,
            collator: CollatorOptions::default(),
            number: NumberFormatOptions::default(),
            bigint: NumberFormatOptions::default(),
            date: DateTimeFormatOptions::default(),
            time: DateTimeFormatOptions::default(),
            date_time: DateTimeFormatOptions::default(),
            relative_time: RelativeTimeFormatOptions::default(),
            relative_time_formatter: None,
            booleans: Some(BooleanLabels::default()),
        }
    }
}

impl fmt::Debug for InternationalizationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternationalizationOptions")
            .field("locale", &self.locale)
            .field("collator", &self.collator)
            .field("number", &self.number)
            .field("bigint", &self.bigint)
            .field("date", &self.date)
            .field("time", &self.time)
            .field("date_time", &self.date_time)
            .field("relative_time", &self.relative_time)
            .field(
                "relative_time_formatter",
                &self.relative_time_formatter.as_ref().map(|_| ".."),
            )
            .field("booleans", &self.booleans)
            .finish()
    }
}

impl InternationalizationOptions {
    /// The configured locale, or the platform default.
    pub fn resolved_locale(&self) -> Locale {
        Locale::resolve(self.locale.as_ref())
    }
}

/// Row identity and details panel behavior.
pub struct RowOptions<R> {
    /// Row id generator. `None` generates a random UUID v4 per row.
    ///
    /// Default: `None`
    pub id_fn: Option<IdFn<R>>,

    /// Default: [`DetailsPanelType::Single`]
    pub details_panel_type: DetailsPanelType,
}

impl<R> RowOptions<R> {
    /// The configured id generator, or the random UUID generator.
    pub fn id_fn(&self) -> IdFn<R> {
        self.id_fn.clone().unwrap_or_else(random_id)
    }

    /// Whether `other` generates ids with the same function, so existing row
    /// ids remain valid.
    pub fn same_id_fn(&self, other: &RowOptions<R>) -> bool {
        match (&self.id_fn, &other.id_fn) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<R> Default for RowOptions<R> {
    fn default() -> Self {
        Self {
            id_fn: None,
            details_panel_type: DetailsPanelType::default(),
        }
    }
}

impl<R> Clone for RowOptions<R> {
    fn clone(&self) -> Self {
        Self {
            id_fn: self.id_fn.clone(),
            details_panel_type: self.details_panel_type,
        }
    }
}

impl<R> fmt::Debug for RowOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowOptions")
            .field("custom_id_fn", &self.id_fn.is_some())
            .field("details_panel_type", &self.details_panel_type)
            .finish()
    }
}

/// Initial pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Default: 1
    pub current_page: usize,
    /// Default: 5
    pub page_size: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 5,
        }
    }
}

/// Complete table configuration. Every field is populated; start from
/// `Default` and adjust with the `with_*` methods or [`Options::merge`].
///
/// # Example
///
/// ```
/// use headless_table::i18n::Locale;
/// use headless_table::model::Record;
/// use headless_table::Options;
///
/// let options = Options::<Record>::default()
///     .with_locale(Locale::new("de-DE"))
///     .with_page_size(10);
/// assert_eq!(options.pagination.page_size, 10);
/// assert_eq!(options.pagination.current_page, 1);
/// ```
pub struct Options<R> {
    pub internationalization: InternationalizationOptions,
    pub rows: RowOptions<R>,
    pub pagination: PaginationOptions,
}

impl<R> Default for Options<R> {
    fn default() -> Self {
        Self {
            internationalization: InternationalizationOptions::default(),
            rows: RowOptions::default(),
            pagination: PaginationOptions::default(),
        }
    }
}

impl<R> Clone for Options<R> {
    fn clone(&self) -> Self {
        Self {
            internationalization: self.internationalization.clone(),
            rows: self.rows.clone(),
            pagination: self.pagination,
        }
    }
}

impl<R> fmt::Debug for Options<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("internationalization", &self.internationalization)
            .field("rows", &self.rows)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl<R> Options<R> {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON patch and merges it onto the defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(Self::default().merge(OptionsPatch::from_json(json)?))
    }

    /// Sets the global locale.
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.internationalization.locale = Some(locale.into());
        self
    }

    /// Sets the collator options.
    pub fn with_collator(mut self, options: CollatorOptions) -> Self {
        self.internationalization.collator = options;
        self
    }

    /// Sets the format options for number columns.
    pub fn with_number_format(mut self, options: NumberFormatOptions) -> Self {
        self.internationalization.number = options;
        self
    }

    /// Sets the format options for bigint columns.
    pub fn with_bigint_format(mut self, options: NumberFormatOptions) -> Self {
        self.internationalization.bigint = options;
        self
    }

    /// Sets the format options for date columns.
    pub fn with_date_format(mut self, options: DateTimeFormatOptions) -> Self {
        self.internationalization.date = options;
        self
    }

    /// Sets the format options for time columns.
    pub fn with_time_format(mut self, options: DateTimeFormatOptions) -> Self {
        self.internationalization.time = options;
        self
    }

    /// Sets the format options for date-time columns.
    pub fn with_date_time_format(mut self, options: DateTimeFormatOptions) -> Self {
        self.internationalization.date_time = options;
        self
    }

    /// Sets the format options for relative-time columns.
    pub fn with_relative_time_format(mut self, options: RelativeTimeFormatOptions) -> Self {
        self.internationalization.relative_time = options;
        self
    }

    /// Replaces the built-in relative time formatter.
    pub fn with_relative_time_formatter(
        mut self,
        formatter: impl RelativeTimeFormatter + 'static,
    ) -> Self {
        self.internationalization.relative_time_formatter = Some(Arc::new(formatter));
        self
    }

    /// Sets the boolean labels, or removes them with `None`.
    pub fn with_boolean_labels(mut self, labels: Option<BooleanLabels>) -> Self {
        self.internationalization.booleans = labels;
        self
    }

    /// Sets the row id generator.
    pub fn with_id_fn(mut self, id_fn: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.rows.id_fn = Some(Arc::new(id_fn));
        self
    }

    /// Sets the details panel behavior.
    pub fn with_details_panel_type(mut self, panel_type: DetailsPanelType) -> Self {
        self.rows.details_panel_type = panel_type;
        self
    }

    /// Sets the initial page. Values below 1 become 1.
    pub fn with_current_page(mut self, page: usize) -> Self {
        self.pagination.current_page = page.max(1);
        self
    }

    /// Sets the page size. Values below 1 become 1.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.pagination.page_size = size.max(1);
        self
    }

    /// Deep-merges `patch` onto these options. Keys absent from the patch
    /// keep their current values, down to individual format option fields.
    pub fn merge(mut self, patch: OptionsPatch) -> Self {
        if let Some(i18n) = patch.internationalization_options {
            let current = &mut self.internationalization;
            if let Some(locale) = i18n.locale {
                current.locale = Some(locale);
            }
            if let Some(collator) = i18n.collator_options {
                current.collator = current.collator.merge(&collator);
            }
            if let Some(number) = i18n.number_format_options {
                current.number = current.number.merge(&number);
            }
            if let Some(bigint) = i18n.bigint_format_options {
                current.bigint = current.bigint.merge(&bigint);
            }
            if let Some(date) = i18n.date_format_options {
                current.date = current.date.merge(&date);
            }
            if let Some(time) = i18n.time_format_options {
                current.time = current.time.merge(&time);
            }
            if let Some(date_time) = i18n.date_time_format_options {
                current.date_time = current.date_time.merge(&date_time);
            }
            if let Some(relative_time) = i18n.relative_time_format_options {
                current.relative_time = current.relative_time.merge(&relative_time);
            }
            if let Some(labels) = i18n.boolean_format_options {
                let base = current.booleans.take().unwrap_or_default();
                current.booleans = Some(BooleanLabels {
                    true_label: labels.true_label.unwrap_or(base.true_label),
                    false_label: labels.false_label.unwrap_or(base.false_label),
                    empty: labels.empty.unwrap_or(base.empty),
                });
            }
        }

        if let Some(rows) = patch.row_options
            && let Some(panel_type) = rows.details_panel_type
        {
            self.rows.details_panel_type = panel_type;
        }

        if let Some(pagination) = patch.pagination_options {
            if let Some(page) = pagination.current_page {
                self.pagination.current_page = at_least_one(page);
            }
            if let Some(size) = pagination.page_size {
                self.pagination.page_size = at_least_one(size);
            }
        }

        log::debug!("Merged options patch");
        self
    }
}

fn at_least_one(n: f64) -> usize {
    if n.is_nan() || n < 1.0 {
        1
    } else {
        n.ceil().min(usize::MAX as f64) as usize
    }
}

// =============================================================================
// Partial options
// =============================================================================

/// Partial options, deserializable from JSON with the camelCase group names
/// `internationalizationOptions`, `rowOptions` and `paginationOptions`.
///
/// The id generator and a custom relative time formatter are code, not data;
/// set them with [`Options::with_id_fn`] and
/// [`Options::with_relative_time_formatter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub internationalization_options: Option<InternationalizationPatch>,
    pub row_options: Option<RowOptionsPatch>,
    pub pagination_options: Option<PaginationPatch>,
}

impl OptionsPatch {
    /// Parses a patch from JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternationalizationPatch {
    pub locale: Option<Locale>,
    pub collator_options: Option<CollatorOptions>,
    pub number_format_options: Option<NumberFormatOptions>,
    pub bigint_format_options: Option<NumberFormatOptions>,
    pub date_format_options: Option<DateTimeFormatOptions>,
    pub time_format_options: Option<DateTimeFormatOptions>,
    pub date_time_format_options: Option<DateTimeFormatOptions>,
    pub relative_time_format_options: Option<RelativeTimeFormatOptions>,
    pub boolean_format_options: Option<BooleanLabelsPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanLabelsPatch {
    #[serde(rename = "true")]
    pub true_label: Option<String>,
    #[serde(rename = "false")]
    pub false_label: Option<String>,
    pub empty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowOptionsPatch {
    pub details_panel_type: Option<DetailsPanelType>,
}

/// Fractional values are rounded up; values below 1 become 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationPatch {
    pub current_page: Option<f64>,
    pub page_size: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_defaults() {
        let options = Options::<Record>::default();
        assert_eq!(options.internationalization.locale, None);
        assert_eq!(
            options.internationalization.booleans,
            Some(BooleanLabels::new("true", "false", ""))
        );
        assert_eq!(options.rows.details_panel_type, DetailsPanelType::Single);
        assert_eq!(options.pagination.current_page, 1);
        assert_eq!(options.pagination.page_size, 5);
    }

    #[test]
    fn test_at_least_one() {
        assert_eq!(at_least_one(0.0), 1);
        assert_eq!(at_least_one(-3.0), 1);
        assert_eq!(at_least_one(2.1), 3);
        assert_eq!(at_least_one(f64::NAN), 1);
    }

    #[test]
    fn test_same_id_fn() {
        let default = Options::<Record>::default();
        assert!(default.rows.same_id_fn(&Options::default().with_locale("de-DE").rows));

        let custom = Options::<Record>::default().with_id_fn(|_: &Record| "x".to_string());
        assert!(!default.rows.same_id_fn(&custom.rows));
        assert!(custom.rows.same_id_fn(&custom.clone().with_page_size(10).rows));
        assert!(!custom.rows.same_id_fn(
            &Options::default().with_id_fn(|_: &Record| "x".to_string()).rows
        ));
    }
}
