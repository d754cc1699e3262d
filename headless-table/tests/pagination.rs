use headless_table::column::Column;
use headless_table::model::Record;
use headless_table::model::RowData;
use headless_table::model::field_id;
use headless_table::Options;
use headless_table::PageView;
use headless_table::Table;
use headless_table::pagination::Pagination;

fn table(count: i64, page_size: usize) -> Table<Record> {
    Table::new(
        Options::default()
            .with_id_fn(field_id("n"))
            .with_page_size(page_size),
        vec![Column::number("n")],
        (1..=count).map(|n| Record::new().set("n", n)),
    )
}

fn numbers(page: &PageView<Record>) -> Vec<i64> {
    page.page_rows
        .iter()
        .filter_map(|row| row.data.field("n").to_f64())
        .map(|n| n as i64)
        .collect()
}

fn assert_page(table: &Table<Record>, current: usize, count: usize, rows: &[i64]) {
    let page = table.page();
    assert_eq!(
        (page.current_page, page.page_count),
        (current, count),
        "page/page count"
    );
    assert_eq!(numbers(&page), rows);
}

#[test]
fn test_navigation() {
    let mut table = table(25, 5);
    assert_page(&table, 1, 5, &[1, 2, 3, 4, 5]);
    assert_eq!(table.all_rows_count(), 25);

    table.next_page();
    assert_eq!(table.current_page(), 2);
    table.last_page();
    assert_page(&table, 5, 5, &[21, 22, 23, 24, 25]);
    table.previous_page();
    assert_eq!(table.current_page(), 4);
    table.first_page();
    assert_eq!(table.current_page(), 1);
    table.set_page(5);
    assert_eq!(table.current_page(), 5);
}

#[test]
fn test_page_size_changes_reclamp_current_page() {
    let mut table = table(25, 5);
    table.set_page(5);

    table.set_page_size(10);
    assert_page(&table, 3, 3, &[21, 22, 23, 24, 25]);

    table.set_page_size(25);
    assert_page(&table, 1, 1, &(1..=25).collect::<Vec<_>>());

    table.set_page_size(12);
    assert_eq!((table.current_page(), table.page_count()), (1, 3));
    table.next_page();
    assert_page(&table, 2, 3, &(13..=24).collect::<Vec<_>>());

    table.set_page_size(6);
    assert_page(&table, 2, 5, &[7, 8, 9, 10, 11, 12]);
    table.last_page();
    assert_page(&table, 5, 5, &[25]);

    table.set_page_size(5);
    assert_page(&table, 5, 5, &[21, 22, 23, 24, 25]);
}

#[test]
fn test_out_of_range_requests_are_clamped() {
    let mut table = table(25, 5);
    table.set_page(0);
    assert_eq!(table.current_page(), 1);
    table.set_page(-4);
    assert_eq!(table.current_page(), 1);
    table.set_page(99);
    assert_eq!(table.current_page(), 5);
    table.next_page();
    assert_eq!(table.current_page(), 5);
    table.set_page(3.2);
    assert_eq!(table.current_page(), 4);
    table.set_page_size(0);
    assert_eq!(table.page_size(), 1);
    table.set_page_size(2.5);
    assert_eq!(table.page_size(), 3);
}

#[test]
fn test_empty_table_stays_on_first_page() {
    let mut table = table(0, 5);
    assert_eq!(table.page_count(), 0);
    table.next_page();
    table.last_page();
    let page = table.page();
    assert_eq!(page.current_page, 1);
    assert!(page.page_rows.is_empty());
}

#[test]
fn test_pagination_without_table() {
    let mut pagination = Pagination::new(1, 5);
    assert_eq!(pagination.page_count(25), 5);
    pagination.set_page(5, 25);
    pagination.set_page_size(10, 25);
    assert_eq!(pagination.current_page(), 3);
    assert_eq!(pagination.page_range(25), 20..25);
}
