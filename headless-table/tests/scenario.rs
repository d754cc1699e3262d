use std::collections::HashSet;
use std::sync::Arc;

use headless_table::Options;
use headless_table::Table;
use headless_table::column::Column;
use headless_table::column::Columns;
use headless_table::column::SortDirection;
use headless_table::column::normalize_columns;
use headless_table::filter::ChainAs;
use headless_table::filter::Filter;
use headless_table::filter::Filters;
use headless_table::model::IdFn;
use headless_table::model::Record;
use headless_table::model::Row;
use headless_table::model::RowData;
use headless_table::model::Value;
use headless_table::model::field_id;
use headless_table::model::random_id;
use headless_table::project_rows;

fn users() -> Vec<Record> {
    [
        (12, false),
        (18, true),
        (25, false),
        (45, false),
        (60, false),
        (33, true),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (age, vip))| {
        Record::new()
            .set("username", format!("username-{}", i + 1))
            .set("age", age)
            .set("vip", vip)
    })
    .collect()
}

fn table() -> Table<Record> {
    Table::new(
        Options::default()
            .with_locale("en-US")
            .with_id_fn(field_id("username")),
        vec![
            Column::string("username"),
            Column::number("age"),
            Column::boolean("vip"),
        ],
        users(),
    )
}

fn usernames(table: &Table<Record>) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|row| row.data.field("username").to_text().unwrap_or_default())
        .collect()
}

fn names(ns: &[usize]) -> Vec<String> {
    ns.iter().map(|n| format!("username-{n}")).collect()
}

fn vip(row: &Row<Record>) -> bool {
    row.data.field("vip") == Value::Bool(true)
}

fn age_at_least(min: f64) -> impl Fn(&Row<Record>) -> bool + Send + Sync + 'static {
    move |row: &Row<Record>| row.data.field("age").to_f64().is_some_and(|age| age >= min)
}

#[test]
fn test_no_query_no_filters_keeps_every_row() {
    let table = table();
    assert_eq!(usernames(&table), names(&[1, 2, 3, 4, 5, 6]));
    assert!(table.rows().iter().all(|row| !row.selected));
}

#[test]
fn test_row_ids_come_from_id_fn() {
    let table = table();
    let ids: Vec<&str> = table.rows_with_ids().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids[0], "username-1");
    assert_eq!(ids[5], "username-6");
}

#[test]
fn test_sort_by_age() {
    let mut table = table();
    assert!(table.sort("age", Some(SortDirection::Asc)));
    assert_eq!(usernames(&table), names(&[1, 2, 3, 6, 4, 5]));

    table.sort("age", Some(SortDirection::Desc));
    assert_eq!(usernames(&table), names(&[5, 4, 6, 3, 2, 1]));
}

#[test]
fn test_sort_by_username_descending() {
    let mut table = table();
    table.sort("username", Some(SortDirection::Desc));
    assert_eq!(usernames(&table), names(&[6, 5, 4, 3, 2, 1]));
}

#[test]
fn test_search_matches_boolean_labels() {
    let mut table = table();
    table.set_search_query("tru");
    assert_eq!(usernames(&table), names(&[2, 6]));

    table.set_search_query("USERNAME-4");
    assert_eq!(usernames(&table), names(&[4]));

    table.set_search_query("");
    assert_eq!(table.rows().len(), 6);
}

#[test]
fn test_filter_lifecycle() {
    let mut table = table();

    table.add_filter(Filter::new(vip).with_id("vip").with_column_id("vip"));
    assert_eq!(usernames(&table), names(&[2, 6]));

    table.add_filter(Filter::must(age_at_least(30.0)).with_id("age"));
    assert_eq!(usernames(&table), names(&[6]));

    assert!(table.update_filter(Filter::must(age_at_least(15.0)).with_id("age")));
    assert_eq!(usernames(&table), names(&[2, 6]));

    assert!(table.remove_filter("vip"));
    assert!(table.remove_filter("age"));
    assert_eq!(table.rows().len(), 6);
}

#[test]
fn test_should_filter_widens_must_result() {
    let mut table = table();
    table.add_filter(Filter::new(vip));
    table.add_filter(Filter::should(age_at_least(50.0)));

    // A passing SHOULD filter admits rows that fail the MUST filter.
    assert_eq!(usernames(&table), names(&[2, 5, 6]));
    assert!(
        table
            .filters()
            .filters()
            .iter()
            .any(|f| f.chain_as == Some(ChainAs::Should))
    );
}

#[test]
fn test_filters_and_search_compose_with_sorting() {
    let mut table = table();
    table.add_filter(Filter::new(age_at_least(18.0)));
    table.set_search_query("username");
    table.sort("age", Some(SortDirection::Desc));
    assert_eq!(usernames(&table), names(&[5, 4, 6, 3, 2]));
}

#[test]
fn test_filters_see_selection() {
    let mut table = table();
    table.select("username-3");
    table.add_filter(Filter::new(|row: &Row<Record>| row.selected));
    assert_eq!(usernames(&table), names(&[3]));
}

#[test]
fn test_selection_survives_filtering() {
    let mut table = table();
    table.select_multiple(["username-1", "username-2"]);
    let id = table.add_filter(Filter::new(vip));
    assert_eq!(table.rows().len(), 2);
    assert!(table.is_selected("username-1"));

    table.remove_filter(&id);
    let selected: Vec<bool> = table.rows().iter().map(|row| row.selected).collect();
    assert_eq!(selected, [true, true, false, false, false, false]);
}

// =============================================================================
// project_rows
// =============================================================================

fn columns() -> Columns<Record> {
    let raw: Vec<Column<Record>> = vec![
        Column::string("username"),
        Column::number("age"),
        Column::boolean("vip"),
    ];
    let options = Options::<Record>::default().with_locale("en-US");
    normalize_columns(&raw, &options.internationalization).into()
}

fn raw_users() -> Vec<Arc<Record>> {
    users().into_iter().map(Arc::new).collect()
}

fn projected_names(rows: &[Row<Record>]) -> Vec<String> {
    rows.iter()
        .map(|row| row.data.field("username").to_text().unwrap_or_default())
        .collect()
}

#[test]
fn test_project_rows_without_query_or_filters_is_one_to_one() {
    let raw = raw_users();
    let rows = project_rows(&raw, &columns(), "", &Filters::new(), &random_id());

    assert_eq!(rows.len(), raw.len());
    for (row, data) in rows.iter().zip(&raw) {
        assert!(Arc::ptr_eq(&row.data, data));
        assert!(!row.selected);
    }
    let ids: HashSet<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids.len(), raw.len());
}

#[test]
fn test_project_rows_searches_before_filtering_and_sorts_last() {
    let mut columns = columns();
    columns.sort("age", Some(SortDirection::Desc));
    let mut filters = Filters::new();
    filters.add_filter(Filter::must(age_at_least(30.0)));
    filters.add_filter(Filter::should(vip));
    let id_fn: IdFn<Record> = Arc::new(field_id("username"));

    // "5" matches username-5 and the ages 25 and 45; the vip rows never reach
    // the filters.
    let rows = project_rows(&raw_users(), &columns, "5", &filters, &id_fn);
    assert_eq!(projected_names(&rows), names(&[5, 4]));
    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, ["username-5", "username-4"]);

    let rows = project_rows(&raw_users(), &columns, "username", &filters, &id_fn);
    assert_eq!(projected_names(&rows), names(&[5, 4, 6, 2]));
}
