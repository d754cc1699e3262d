//! Row ordering

use crate::column::Columns;
use crate::model::Row;

/// Sorts `rows` by the sorted column, if any. The sort is stable, so equal
/// rows and rows without a sorted column keep their order.
pub fn sort_rows<R>(rows: &mut [Row<R>], columns: &Columns<R>) {
    let Some(column) = columns.sorted_column() else {
        return;
    };
    log::trace!(
        "Sorting {} rows by {} {:?}",
        rows.len(),
        column.id,
        column.sorting_direction
    );
    rows.sort_by(|a, b| column.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::column::SortDirection;
    use crate::column::normalize_columns;
    use crate::model::Record;
    use crate::options::InternationalizationOptions;

    fn rows(values: &[(&str, i64)]) -> Vec<Row<Record>> {
        values
            .iter()
            .map(|(name, n)| Row::new(*name, Record::new().set("name", *name).set("n", *n)))
            .collect()
    }

    fn ids(rows: &[Row<Record>]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_unsorted_keeps_order() {
        let columns: Columns<Record> = normalize_columns(
            &[Column::<Record>::number("n")],
            &InternationalizationOptions::default(),
        )
        .into();
        let mut data = rows(&[("c", 3), ("a", 1), ("b", 2)]);
        sort_rows(&mut data, &columns);
        assert_eq!(ids(&data), ["c", "a", "b"]);
    }

    #[test]
    fn test_stable_on_ties() {
        let columns: Columns<Record> = normalize_columns(
            &[Column::<Record>::number("n").with_sorting(SortDirection::Asc)],
            &InternationalizationOptions::default(),
        )
        .into();
        let mut data = rows(&[("x", 2), ("y", 1), ("z", 2), ("w", 1)]);
        sort_rows(&mut data, &columns);
        assert_eq!(ids(&data), ["y", "w", "x", "z"]);
    }

    #[test]
    fn test_custom_sort_fn_receives_direction() {
        let column = Column::<Record>::string("name")
            .with_sorting(SortDirection::Desc)
            .with_sort_fn(|a, b, direction| match direction {
                Some(d) => d.apply(a.id.len().cmp(&b.id.len())),
                None => std::cmp::Ordering::Equal,
            });
        let columns: Columns<Record> =
            normalize_columns(&[column], &InternationalizationOptions::default()).into();
        let mut data = rows(&[("a", 0), ("ccc", 0), ("bb", 0)]);
        sort_rows(&mut data, &columns);
        assert_eq!(ids(&data), ["ccc", "bb", "a"]);
    }
}
