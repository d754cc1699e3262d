//! Column normalization

use std::sync::Arc;

use super::Column;
use super::ColumnType;
use super::SearchFn;
use super::TableColumn;
use super::ValueFn;
use super::compare::default_sort_fn;
use crate::i18n::Collator;
use crate::i18n::Locale;
use crate::i18n::to_lowercase;
use crate::model::Row;
use crate::model::RowData;
use crate::model::Value;
use crate::options::InternationalizationOptions;
use crate::stringify;
use crate::stringify::StringifyOptions;

fn field_accessor<R, T>(field: &str, convert: fn(&Value) -> Option<T>) -> ValueFn<R, T>
where
    R: RowData + 'static,
    T: 'static,
{
    let field = field.to_string();
    Arc::new(move |row: &Row<R>| convert(&row.data.field(&field)))
}

/// Fills a missing accessor with a lookup of `field` in the row data.
fn with_default_accessor<R: RowData + 'static>(column_type: ColumnType<R>, field: &str) -> ColumnType<R> {
    match column_type {
        ColumnType::String { value } => ColumnType::String {
            value: value.or_else(|| Some(field_accessor(field, Value::to_text))),
        },
        ColumnType::MultiString { value } => ColumnType::MultiString {
            value: value.or_else(|| Some(field_accessor(field, Value::to_strings))),
        },
        ColumnType::Boolean { value, labels } => ColumnType::Boolean {
            value: value.or_else(|| Some(field_accessor(field, Value::to_bool))),
            labels,
        },
        ColumnType::Number { value, format } => ColumnType::Number {
            value: value.or_else(|| Some(field_accessor(field, Value::to_f64))),
            format,
        },
        ColumnType::BigInt { value, format } => ColumnType::BigInt {
            value: value.or_else(|| Some(field_accessor(field, Value::to_bigint))),
            format,
        },
        ColumnType::Date { value, format } => ColumnType::Date {
            value: value.or_else(|| Some(field_accessor(field, Value::to_datetime))),
            format,
        },
        ColumnType::Time { value, format } => ColumnType::Time {
            value: value.or_else(|| Some(field_accessor(field, Value::to_datetime))),
            format,
        },
        ColumnType::DateTime { value, format } => ColumnType::DateTime {
            value: value.or_else(|| Some(field_accessor(field, Value::to_datetime))),
            format,
        },
        relative @ ColumnType::RelativeTime { .. } => relative,
    }
}

/// Case-folded substring match on the rendered cell.
fn default_search_fn<R: 'static>(
    column_type: &ColumnType<R>,
    options: Arc<StringifyOptions>,
) -> SearchFn<R> {
    let column_type = column_type.clone();
    Arc::new(move |query, row| {
        let text = stringify::render(&column_type.value_of(row), &options);
        to_lowercase(&text, &options.locale).contains(&to_lowercase(query, &options.locale))
    })
}

/// Resolves every default of `raw`, preserving input order.
///
/// Pure: normalizing the same columns twice gives equivalent results.
/// Duplicate ids are not detected.
pub fn normalize_columns<R: RowData + 'static>(
    raw: &[Column<R>],
    i18n: &InternationalizationOptions,
) -> Vec<TableColumn<R>> {
    let global_locale = i18n.resolved_locale();

    let columns: Vec<TableColumn<R>> = raw
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let column = column.clone();
            let column_type = with_default_accessor(column.column_type, &column.field);
            let locale: Locale = column.locale.clone().unwrap_or_else(|| global_locale.clone());
            let stringify = Arc::new(StringifyOptions::for_column(
                &column_type,
                i18n,
                Some(&locale),
            ));

            let search_fn = column
                .search_fn
                .unwrap_or_else(|| default_search_fn(&column_type, Arc::clone(&stringify)));
            let sort_fn = column.sort_fn.unwrap_or_else(|| {
                default_sort_fn(
                    &column_type,
                    Arc::clone(&stringify),
                    Collator::new(&locale, &i18n.collator),
                )
            });

            TableColumn {
                id: column.id.unwrap_or_else(|| column.field.clone()),
                field: column.field,
                column_type,
                hidden: column.hidden,
                searchable: column.searchable,
                filterable: column.filterable,
                search_fn,
                sorting_direction: column.sorting_direction,
                sort_fn,
                order: column.order.unwrap_or(index),
                locale: column.locale,
                stringify,
            }
        })
        .collect();

    log::debug!("Normalized {} columns", columns.len());
    columns
}
