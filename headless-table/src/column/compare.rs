//! Default comparators and date/time ordering keys

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Timelike;
use num_bigint::BigInt;

use super::ColumnType;
use super::SortFn;
use super::TypedValue;
use crate::i18n::Collator;
use crate::stringify;
use crate::stringify::StringifyOptions;

/// Stands in for undefined dates and times: 0000-01-01T00:00:00.
fn undefined_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn era_sign(year: i32) -> i64 {
    if year < 0 { -1 } else { 1 }
}

/// Calendar date as `YYYYMMDD`. Month and day are negated for years below
/// zero so that keys keep ascending across the era boundary.
pub fn date_to_number(date: &NaiveDateTime) -> i64 {
    let year = date.year();
    let s = era_sign(year);
    i64::from(year) * 100_00 + s * i64::from(date.month()) * 100 + s * i64::from(date.day())
}

/// Time of day as `HHMMSS`.
pub fn time_to_number(time: &NaiveDateTime) -> i64 {
    i64::from(time.hour()) * 100_00 + i64::from(time.minute()) * 100 + i64::from(time.second())
}

/// Date and time as `YYYYMMDDHHMMSS`, sign-flipped below year zero like
/// [`date_to_number`].
pub fn datetime_to_number(datetime: &NaiveDateTime) -> i64 {
    let year = datetime.year();
    let s = era_sign(year);
    i64::from(year) * 100_00_00_00_00
        + s * i64::from(datetime.month()) * 100_00_00_00
        + s * i64::from(datetime.day()) * 100_00_00
        + s * i64::from(datetime.hour()) * 100_00
        + s * i64::from(datetime.minute()) * 100
        + s * i64::from(datetime.second())
}

/// Difference of the date keys; negative when `a` comes first.
pub fn compare_dates(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    date_to_number(a) - date_to_number(b)
}

/// Difference of the time-of-day keys.
pub fn compare_times(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    time_to_number(a) - time_to_number(b)
}

/// Difference of the date-time keys.
pub fn compare_date_times(a: &NaiveDateTime, b: &NaiveDateTime) -> i64 {
    datetime_to_number(a) - datetime_to_number(b)
}

fn number(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn signum_i64(n: i64) -> Ordering {
    n.cmp(&0)
}

/// Ascending comparison of two typed values of the same column.
fn compare_values(
    a: &TypedValue,
    b: &TypedValue,
    options: &StringifyOptions,
    collator: &Collator,
) -> Ordering {
    let sentinel = undefined_date();
    match (a, b) {
        (TypedValue::Number(x), TypedValue::Number(y))
        | (TypedValue::RelativeTime(x, _), TypedValue::RelativeTime(y, _)) => {
            (number(*x) - number(*y))
                .partial_cmp(&0.0)
                .unwrap_or(Ordering::Equal)
        }
        (TypedValue::BigInt(x), TypedValue::BigInt(y)) => {
            let zero = BigInt::from(0u8);
            (x.as_ref().unwrap_or(&zero) - y.as_ref().unwrap_or(&zero)).cmp(&zero)
        }
        (TypedValue::Date(x), TypedValue::Date(y)) => signum_i64(compare_dates(
            x.as_ref().unwrap_or(&sentinel),
            y.as_ref().unwrap_or(&sentinel),
        )),
        (TypedValue::Time(x), TypedValue::Time(y)) => signum_i64(compare_times(
            x.as_ref().unwrap_or(&sentinel),
            y.as_ref().unwrap_or(&sentinel),
        )),
        (TypedValue::DateTime(x), TypedValue::DateTime(y)) => signum_i64(compare_date_times(
            x.as_ref().unwrap_or(&sentinel),
            y.as_ref().unwrap_or(&sentinel),
        )),
        _ => collator.compare(&stringify::render(a, options), &stringify::render(b, options)),
    }
}

/// Builds the type-dispatched comparator for a column.
///
/// Strings, multi-strings and booleans compare their rendered text with the
/// collator; numbers and dates compare numerically with undefined as zero or
/// the year-zero date.
pub(crate) fn default_sort_fn<R: 'static>(
    column_type: &ColumnType<R>,
    options: Arc<StringifyOptions>,
    collator: Collator,
) -> SortFn<R> {
    let column_type = column_type.clone();
    Arc::new(move |a, b, direction| match direction {
        None => Ordering::Equal,
        Some(direction) => {
            let ordering = compare_values(
                &column_type.value_of(a),
                &column_type.value_of(b),
                &options,
                &collator,
            );
            direction.apply(ordering)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_iso_datetime;

    fn dt(s: &str) -> NaiveDateTime {
        parse_iso_datetime(s).unwrap()
    }

    #[test]
    fn test_date_to_number() {
        assert_eq!(date_to_number(&dt("2022-01-01")), 20220101);
        assert_eq!(date_to_number(&dt("0000-01-01")), 101);
        assert_eq!(date_to_number(&dt("-0001-12-31")), -11231);
    }

    #[test]
    fn test_time_to_number_ignores_date() {
        assert_eq!(time_to_number(&dt("1999-05-05T11:22:33")), 112233);
        assert_eq!(compare_times(&dt("1999-05-05T11:22:33"), &dt("2030-01-01T11:22:33")), 0);
    }

    #[test]
    fn test_datetime_to_number() {
        assert_eq!(datetime_to_number(&dt("2022-01-31T11:22:33")), 20220131112233);
        assert!(datetime_to_number(&dt("-0001-12-31T23:59:59")) < datetime_to_number(&dt("0000-01-01T00:00:00")));
    }

    #[test]
    fn test_era_boundary_ordering() {
        let bc = dt("-0001-12-31");
        let zero = dt("0000-01-01");
        let ad = dt("0500-01-01");
        assert!(compare_dates(&bc, &zero) < 0);
        assert!(compare_dates(&zero, &ad) < 0);
        assert!(compare_dates(&bc, &ad) < 0);
        assert!(compare_dates(&dt("-0002-01-01"), &bc) < 0);
    }

    #[test]
    fn test_compare_dates_ignores_time() {
        assert_eq!(compare_dates(&dt("2022-01-31T00:00:00"), &dt("2022-01-31T23:00:00")), 0);
    }

    #[test]
    fn test_undefined_date_sentinel() {
        assert_eq!(date_to_number(&undefined_date()), 101);
    }
}
