//! Cell values to display strings
//!
//! Rendering is pure: the same row, column and options always give the same
//! string. Search matches against these strings and string-like columns sort
//! by them.

use std::fmt;
use std::sync::Arc;

use crate::column::ColumnType;
use crate::column::TableColumn;
use crate::column::TypedValue;
use crate::i18n::BooleanLabels;
use crate::i18n::DateTimeFormat;
use crate::i18n::DateTimeKind;
use crate::i18n::Locale;
use crate::i18n::NumberFormat;
use crate::i18n::NumberFormatOptions;
use crate::i18n::RelativeTimeFormat;
use crate::i18n::RelativeTimeFormatter;
use crate::i18n::RelativeTimeUnit;
use crate::model::Row;
use crate::options::InternationalizationOptions;

/// Formatting resolved for one column.
///
/// Built once per column by [`StringifyOptions::for_column`]; only the parts
/// relevant to the column type are filled.
#[derive(Clone, Default)]
pub struct StringifyOptions {
    pub locale: Locale,
    pub number: Option<NumberFormat>,
    pub date_time: Option<DateTimeFormat>,
    pub booleans: Option<BooleanLabels>,
    pub unit: Option<RelativeTimeUnit>,
    pub relative_time: Option<Arc<dyn RelativeTimeFormatter>>,
}

impl StringifyOptions {
    /// Resolves the options for a column. Column overrides win over the
    /// table-wide options; the column locale wins over the table locale.
    pub fn for_column<R>(
        column_type: &ColumnType<R>,
        i18n: &InternationalizationOptions,
        column_locale: Option<&Locale>,
    ) -> Self {
        let locale = match column_locale {
            Some(locale) => locale.clone(),
            None => i18n.resolved_locale(),
        };
        let mut options = StringifyOptions {
            locale: locale.clone(),
            ..Default::default()
        };

        match column_type {
            ColumnType::String { .. } | ColumnType::MultiString { .. } => {}
            ColumnType::Boolean { labels, .. } => {
                options.booleans = labels.clone().or_else(|| i18n.booleans.clone());
            }
            ColumnType::Number { format, .. } => {
                let merged = merge_number(&i18n.number, format.as_ref());
                options.number = Some(NumberFormat::new(&locale, &merged));
            }
            ColumnType::BigInt { format, .. } => {
                let merged = merge_number(&i18n.bigint, format.as_ref());
                options.number = Some(NumberFormat::new(&locale, &merged));
            }
            ColumnType::Date { format, .. } => {
                let merged = format.as_ref().map_or_else(|| i18n.date.clone(), |f| i18n.date.merge(f));
                options.date_time = Some(DateTimeFormat::new(&locale, &merged, DateTimeKind::Date));
            }
            ColumnType::Time { format, .. } => {
                let merged = format.as_ref().map_or_else(|| i18n.time.clone(), |f| i18n.time.merge(f));
                options.date_time = Some(DateTimeFormat::new(&locale, &merged, DateTimeKind::Time));
            }
            ColumnType::DateTime { format, .. } => {
                let merged = format
                    .as_ref()
                    .map_or_else(|| i18n.date_time.clone(), |f| i18n.date_time.merge(f));
                options.date_time =
                    Some(DateTimeFormat::new(&locale, &merged, DateTimeKind::DateTime));
            }
            ColumnType::RelativeTime { unit, format, .. } => {
                options.unit = Some(*unit);
                options.relative_time = Some(match &i18n.relative_time_formatter {
                    Some(formatter) => Arc::clone(formatter),
                    None => {
                        let merged = format
                            .as_ref()
                            .map_or_else(|| i18n.relative_time.clone(), |f| i18n.relative_time.merge(f));
                        Arc::new(RelativeTimeFormat::new(&locale, &merged))
                    }
                });
            }
        }
        options
    }
}

fn merge_number(global: &NumberFormatOptions, column: Option<&NumberFormatOptions>) -> NumberFormatOptions {
    match column {
        Some(column) => global.merge(column),
        None => global.clone(),
    }
}

impl fmt::Debug for StringifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringifyOptions")
            .field("locale", &self.locale)
            .field("number", &self.number)
            .field("date_time", &self.date_time)
            .field("booleans", &self.booleans)
            .field("unit", &self.unit)
            .field("relative_time", &self.relative_time.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Reads the typed value of `column` for `row`.
pub fn value_of<R>(column: &TableColumn<R>, row: &Row<R>) -> TypedValue {
    column.value_of(row)
}

/// Renders the value of `column` for `row`.
pub fn string_of<R>(row: &Row<R>, column: &TableColumn<R>, options: &StringifyOptions) -> String {
    render(&column.value_of(row), options)
}

/// Renders a typed value. Undefined values render as empty strings, except
/// booleans, which use the `empty` label.
pub fn render(value: &TypedValue, options: &StringifyOptions) -> String {
    match value {
        TypedValue::String(s) => s.clone().unwrap_or_default(),
        TypedValue::MultiString(items) => items
            .as_ref()
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.as_deref().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
        TypedValue::Boolean(b) => options
            .booleans
            .as_ref()
            .map(|labels| labels.label(*b).to_string())
            .unwrap_or_default(),
        TypedValue::Number(n) => n
            .map(|n| number_format(options).format(n))
            .unwrap_or_default(),
        TypedValue::BigInt(n) => n
            .as_ref()
            .map(|n| number_format(options).format_bigint(n))
            .unwrap_or_default(),
        TypedValue::Date(dt) => date_time(dt, options, DateTimeKind::Date),
        TypedValue::Time(dt) => date_time(dt, options, DateTimeKind::Time),
        TypedValue::DateTime(dt) => date_time(dt, options, DateTimeKind::DateTime),
        TypedValue::RelativeTime(n, _) => match (n, options.unit, &options.relative_time) {
            (Some(n), Some(unit), Some(formatter)) => formatter.format(*n, unit),
            _ => String::new(),
        },
    }
}

fn number_format(options: &StringifyOptions) -> NumberFormat {
    options
        .number
        .clone()
        .unwrap_or_else(|| NumberFormat::new(&options.locale, &NumberFormatOptions::default()))
}

fn date_time(
    value: &Option<chrono::NaiveDateTime>,
    options: &StringifyOptions,
    kind: DateTimeKind,
) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match &options.date_time {
        Some(format) => format.format(value),
        None => DateTimeFormat::new(&options.locale, &Default::default(), kind).format(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> StringifyOptions {
        StringifyOptions {
            locale: Locale::new("en-US"),
            ..Default::default()
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(render(&TypedValue::String(Some("a".into())), &en()), "a");
        assert_eq!(render(&TypedValue::String(None), &en()), "");
        assert_eq!(
            render(
                &TypedValue::MultiString(Some(vec![Some("a".into()), None, Some("b".into())])),
                &en()
            ),
            "a, , b"
        );
    }

    #[test]
    fn test_boolean_without_labels_is_empty() {
        assert_eq!(render(&TypedValue::Boolean(Some(true)), &en()), "");

        let options = StringifyOptions {
            booleans: Some(BooleanLabels::new("yes", "no", "-")),
            ..en()
        };
        assert_eq!(render(&TypedValue::Boolean(Some(true)), &options), "yes");
        assert_eq!(render(&TypedValue::Boolean(Some(false)), &options), "no");
        assert_eq!(render(&TypedValue::Boolean(None), &options), "-");
    }

    #[test]
    fn test_relative_time_requires_unit_and_formatter() {
        let value = TypedValue::RelativeTime(Some(3.0), RelativeTimeUnit::Day);
        assert_eq!(render(&value, &en()), "");

        let formatter: Arc<dyn RelativeTimeFormatter> =
            Arc::new(RelativeTimeFormat::new(&Locale::new("en-US"), &Default::default()));
        let only_formatter = StringifyOptions {
            relative_time: Some(Arc::clone(&formatter)),
            ..en()
        };
        assert_eq!(render(&value, &only_formatter), "");

        let complete = StringifyOptions {
            unit: Some(RelativeTimeUnit::Day),
            ..only_formatter
        };
        assert_eq!(render(&value, &complete), "in 3 days");
    }

    #[test]
    fn test_number_defaults() {
        assert_eq!(render(&TypedValue::Number(Some(45.0)), &en()), "45");
        assert_eq!(render(&TypedValue::Number(None), &en()), "");
    }
}
