//! Column descriptors
//!
//! A [`Column`] is what callers declare; [`normalize_columns`] turns it into a
//! [`TableColumn`] with every default resolved (id, value accessor, search and
//! sort functions, order). [`Columns`] holds the normalized set and applies
//! visibility, ordering and sorting changes to it.

mod compare;
mod normalize;
mod state;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use num_bigint::BigInt;
use serde::Deserialize;
use serde::Serialize;

pub use compare::compare_date_times;
pub use compare::compare_dates;
pub use compare::compare_times;
pub use compare::date_to_number;
pub use compare::datetime_to_number;
pub use compare::time_to_number;
pub use normalize::normalize_columns;
pub use state::Columns;

use crate::i18n::BooleanLabels;
use crate::i18n::DateTimeFormatOptions;
use crate::i18n::Locale;
use crate::i18n::NumberFormatOptions;
use crate::i18n::RelativeTimeFormatOptions;
use crate::i18n::RelativeTimeUnit;
use crate::model::Row;
use crate::stringify::StringifyOptions;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The direction after `current` in the cycle `None → Asc → Desc → None`.
pub fn next_sorting_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

/// Reads a typed value from a row. `None` means undefined.
pub type ValueFn<R, T> = Arc<dyn Fn(&Row<R>) -> Option<T> + Send + Sync>;

/// Search predicate: `(query, row) -> matches`. Only called with a
/// non-empty query.
pub type SearchFn<R> = Arc<dyn Fn(&str, &Row<R>) -> bool + Send + Sync>;

/// Row comparator receiving the column's current direction. Must return
/// `Equal` when the direction is `None`.
pub type SortFn<R> =
    Arc<dyn Fn(&Row<R>, &Row<R>, Option<SortDirection>) -> Ordering + Send + Sync>;

/// Column type with its typed value accessor and per-column format options.
///
/// A `None` accessor reads the column's field from the row data and converts
/// it to the column type.
pub enum ColumnType<R> {
    String {
        value: Option<ValueFn<R, String>>,
    },
    MultiString {
        value: Option<ValueFn<R, Vec<Option<String>>>>,
    },
    Boolean {
        value: Option<ValueFn<R, bool>>,
        labels: Option<BooleanLabels>,
    },
    Number {
        value: Option<ValueFn<R, f64>>,
        format: Option<NumberFormatOptions>,
    },
    BigInt {
        value: Option<ValueFn<R, BigInt>>,
        format: Option<NumberFormatOptions>,
    },
    Date {
        value: Option<ValueFn<R, NaiveDateTime>>,
        format: Option<DateTimeFormatOptions>,
    },
    Time {
        value: Option<ValueFn<R, NaiveDateTime>>,
        format: Option<DateTimeFormatOptions>,
    },
    DateTime {
        value: Option<ValueFn<R, NaiveDateTime>>,
        format: Option<DateTimeFormatOptions>,
    },
    /// No unit is implied for plain numbers, so both the accessor and the
    /// unit are required.
    RelativeTime {
        value: ValueFn<R, f64>,
        unit: RelativeTimeUnit,
        format: Option<RelativeTimeFormatOptions>,
    },
}

/// A value read from a row, tagged with its column type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(Option<String>),
    MultiString(Option<Vec<Option<String>>>),
    Boolean(Option<bool>),
    Number(Option<f64>),
    BigInt(Option<BigInt>),
    Date(Option<NaiveDateTime>),
    Time(Option<NaiveDateTime>),
    DateTime(Option<NaiveDateTime>),
    RelativeTime(Option<f64>, RelativeTimeUnit),
}

impl TypedValue {
    pub fn is_undefined(&self) -> bool {
        match self {
            TypedValue::String(v) => v.is_none(),
            TypedValue::MultiString(v) => v.is_none(),
            TypedValue::Boolean(v) => v.is_none(),
            TypedValue::Number(v) | TypedValue::RelativeTime(v, _) => v.is_none(),
            TypedValue::BigInt(v) => v.is_none(),
            TypedValue::Date(v) | TypedValue::Time(v) | TypedValue::DateTime(v) => v.is_none(),
        }
    }
}

fn read<R, T>(value: &Option<ValueFn<R, T>>, row: &Row<R>) -> Option<T> {
    value.as_ref().and_then(|f| f(row))
}

impl<R> ColumnType<R> {
    /// Kebab-case type name, e.g. `multi-string`.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String { .. } => "string",
            ColumnType::MultiString { .. } => "multi-string",
            ColumnType::Boolean { .. } => "boolean",
            ColumnType::Number { .. } => "number",
            ColumnType::BigInt { .. } => "bigint",
            ColumnType::Date { .. } => "date",
            ColumnType::Time { .. } => "time",
            ColumnType::DateTime { .. } => "date-time",
            ColumnType::RelativeTime { .. } => "relative-time",
        }
    }

    /// Reads the typed value of `row` through the accessor.
    pub fn value_of(&self, row: &Row<R>) -> TypedValue {
        match self {
            ColumnType::String { value } => TypedValue::String(read(value, row)),
            ColumnType::MultiString { value } => TypedValue::MultiString(read(value, row)),
            ColumnType::Boolean { value, .. } => TypedValue::Boolean(read(value, row)),
            ColumnType::Number { value, .. } => TypedValue::Number(read(value, row)),
            ColumnType::BigInt { value, .. } => TypedValue::BigInt(read(value, row)),
            ColumnType::Date { value, .. } => TypedValue::Date(read(value, row)),
            ColumnType::Time { value, .. } => TypedValue::Time(read(value, row)),
            ColumnType::DateTime { value, .. } => TypedValue::DateTime(read(value, row)),
            ColumnType::RelativeTime { value, unit, .. } => {
                TypedValue::RelativeTime(value(row), *unit)
            }
        }
    }
}

impl<R> Clone for ColumnType<R> {
    fn clone(&self) -> Self {
        match self {
            ColumnType::String { value } => ColumnType::String {
                value: value.clone(),
            },
            ColumnType::MultiString { value } => ColumnType::MultiString {
                value: value.clone(),
            },
            ColumnType::Boolean { value, labels } => ColumnType::Boolean {
                value: value.clone(),
                labels: labels.clone(),
            },
            ColumnType::Number { value, format } => ColumnType::Number {
                value: value.clone(),
                format: format.clone(),
            },
            ColumnType::BigInt { value, format } => ColumnType::BigInt {
                value: value.clone(),
                format: format.clone(),
            },
            ColumnType::Date { value, format } => ColumnType::Date {
                value: value.clone(),
                format: format.clone(),
            },
            ColumnType::Time { value, format } => ColumnType::Time {
                value: value.clone(),
                format: format.clone(),
            },
            ColumnType::DateTime { value, format } => ColumnType::DateTime {
                value: value.clone(),
                format: format.clone(),
            },
            ColumnType::RelativeTime {
                value,
                unit,
                format,
            } => ColumnType::RelativeTime {
                value: Arc::clone(value),
                unit: *unit,
                format: format.clone(),
            },
        }
    }
}

impl<R> fmt::Debug for ColumnType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column as declared by the caller.
///
/// # Example
///
/// ```
/// use headless_table::column::{Column, SortDirection};
/// use headless_table::model::Record;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::string("username").with_sorting(SortDirection::Asc),
///     Column::number("age"),
///     Column::boolean("vip").with_id("is-vip"),
/// ];
/// assert_eq!(columns[2].field, "vip");
/// ```
pub struct Column<R> {
    /// Unique id. Defaults to `field`.
    pub id: Option<String>,
    /// Key into the row data, or a synthetic name when an accessor is given.
    pub field: String,
    pub column_type: ColumnType<R>,
    pub hidden: bool,
    pub searchable: bool,
    /// Informational flag for filter UIs; the engine doesn't read it.
    pub filterable: bool,
    pub search_fn: Option<SearchFn<R>>,
    pub sorting_direction: Option<SortDirection>,
    pub sort_fn: Option<SortFn<R>>,
    /// Display position. Defaults to the declaration index.
    pub order: Option<usize>,
    /// Overrides the table locale for this column.
    pub locale: Option<Locale>,
}

macro_rules! typed_constructors {
    ($(#[$doc:meta])* $plain:ident, $with:ident, $variant:ident, $t:ty $(, $extra:ident)?) => {
        $(#[$doc])*
        pub fn $plain(field: impl Into<String>) -> Self {
            Self::new(field, ColumnType::$variant { value: None $(, $extra: None)? })
        }

        $(#[$doc])*
        ///
        /// Reads values through `value` instead of the row data.
        pub fn $with(
            field: impl Into<String>,
            value: impl Fn(&Row<R>) -> Option<$t> + Send + Sync + 'static,
        ) -> Self {
            Self::new(
                field,
                ColumnType::$variant { value: Some(Arc::new(value)) $(, $extra: None)? },
            )
        }
    };
}

impl<R> Column<R> {
    /// Creates a column with default flags.
    pub fn new(field: impl Into<String>, column_type: ColumnType<R>) -> Self {
        Self {
            id: None,
            field: field.into(),
            column_type,
            hidden: false,
            searchable: true,
            filterable: true,
            search_fn: None,
            sorting_direction: None,
            sort_fn: None,
            order: None,
            locale: None,
        }
    }

    typed_constructors!(
        /// A string column.
        string, string_with, String, String
    );
    typed_constructors!(
        /// A multi-string column, rendered comma separated.
        multi_string, multi_string_with, MultiString, Vec<Option<String>>
    );
    typed_constructors!(
        /// A boolean column, rendered through the boolean labels.
        boolean, boolean_with, Boolean, bool, labels
    );
    typed_constructors!(
        /// A number column.
        number, number_with, Number, f64, format
    );
    typed_constructors!(
        /// An arbitrary precision integer column.
        bigint, bigint_with, BigInt, BigInt, format
    );
    typed_constructors!(
        /// A date column. Only the calendar date is compared and shown.
        date, date_with, Date, NaiveDateTime, format
    );
    typed_constructors!(
        /// A time column. Only the time of day is compared and shown.
        time, time_with, Time, NaiveDateTime, format
    );
    typed_constructors!(
        /// A date-time column.
        date_time, date_time_with, DateTime, NaiveDateTime, format
    );

    /// A relative-time column: `value` returns a signed amount of `unit`.
    pub fn relative_time(
        field: impl Into<String>,
        unit: RelativeTimeUnit,
        value: impl Fn(&Row<R>) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            field,
            ColumnType::RelativeTime {
                value: Arc::new(value),
                unit,
                format: None,
            },
        )
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn with_search_fn(
        mut self,
        search_fn: impl Fn(&str, &Row<R>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.search_fn = Some(Arc::new(search_fn));
        self
    }

    pub fn with_sorting(mut self, direction: SortDirection) -> Self {
        self.sorting_direction = Some(direction);
        self
    }

    pub fn with_sort_fn(
        mut self,
        sort_fn: impl Fn(&Row<R>, &Row<R>, Option<SortDirection>) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_fn = Some(Arc::new(sort_fn));
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Number format for number and bigint columns.
    pub fn with_number_format(mut self, options: NumberFormatOptions) -> Self {
        match &mut self.column_type {
            ColumnType::Number { format, .. } | ColumnType::BigInt { format, .. } => {
                *format = Some(options)
            }
            other => log::warn!("number format ignored on {} column {}", other.name(), self.field),
        }
        self
    }

    /// Date/time format for date, time and date-time columns.
    pub fn with_date_time_format(mut self, options: DateTimeFormatOptions) -> Self {
        match &mut self.column_type {
            ColumnType::Date { format, .. }
            | ColumnType::Time { format, .. }
            | ColumnType::DateTime { format, .. } => *format = Some(options),
            other => log::warn!("date format ignored on {} column {}", other.name(), self.field),
        }
        self
    }

    /// Relative time format for relative-time columns.
    pub fn with_relative_time_format(mut self, options: RelativeTimeFormatOptions) -> Self {
        match &mut self.column_type {
            ColumnType::RelativeTime { format, .. } => *format = Some(options),
            other => log::warn!(
                "relative time format ignored on {} column {}",
                other.name(),
                self.field
            ),
        }
        self
    }

    /// Boolean labels for boolean columns.
    pub fn with_boolean_labels(mut self, boolean_labels: BooleanLabels) -> Self {
        match &mut self.column_type {
            ColumnType::Boolean { labels, .. } => *labels = Some(boolean_labels),
            other => log::warn!("boolean labels ignored on {} column {}", other.name(), self.field),
        }
        self
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            field: self.field.clone(),
            column_type: self.column_type.clone(),
            hidden: self.hidden,
            searchable: self.searchable,
            filterable: self.filterable,
            search_fn: self.search_fn.clone(),
            sorting_direction: self.sorting_direction,
            sort_fn: self.sort_fn.clone(),
            order: self.order,
            locale: self.locale.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("type", &self.column_type)
            .field("hidden", &self.hidden)
            .field("sorting_direction", &self.sorting_direction)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// A normalized column: every default resolved.
pub struct TableColumn<R> {
    pub id: String,
    pub field: String,
    pub column_type: ColumnType<R>,
    pub hidden: bool,
    pub searchable: bool,
    pub filterable: bool,
    pub search_fn: SearchFn<R>,
    pub sorting_direction: Option<SortDirection>,
    pub sort_fn: SortFn<R>,
    pub order: usize,
    pub locale: Option<Locale>,
    /// Formatting resolved for this column's type and locale.
    pub stringify: Arc<StringifyOptions>,
}

impl<R> TableColumn<R> {
    /// Reads this column's typed value from `row`.
    pub fn value_of(&self, row: &Row<R>) -> TypedValue {
        self.column_type.value_of(row)
    }

    /// Compares two rows with the column's comparator and current direction.
    pub fn compare(&self, a: &Row<R>, b: &Row<R>) -> Ordering {
        (self.sort_fn)(a, b, self.sorting_direction)
    }

    pub fn is_sorted(&self) -> bool {
        self.sorting_direction.is_some()
    }
}

impl<R> Clone for TableColumn<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            field: self.field.clone(),
            column_type: self.column_type.clone(),
            hidden: self.hidden,
            searchable: self.searchable,
            filterable: self.filterable,
            search_fn: Arc::clone(&self.search_fn),
            sorting_direction: self.sorting_direction,
            sort_fn: Arc::clone(&self.sort_fn),
            order: self.order,
            locale: self.locale.clone(),
            stringify: Arc::clone(&self.stringify),
        }
    }
}

impl<R> fmt::Debug for TableColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("type", &self.column_type)
            .field("hidden", &self.hidden)
            .field("searchable", &self.searchable)
            .field("sorting_direction", &self.sorting_direction)
            .field("order", &self.order)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
