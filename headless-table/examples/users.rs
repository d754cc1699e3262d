//! Users Table Example
//!
//! Builds a small user table, then searches, filters, sorts, selects and
//! pages through it, printing each projection.

use headless_table::Options;
use headless_table::Table;
use headless_table::column::Column;
use headless_table::column::SortDirection;
use headless_table::filter::Filter;
use headless_table::i18n::BooleanLabels;
use headless_table::model::Record;
use headless_table::model::Row;
use headless_table::model::RowData;
use headless_table::model::Value;
use headless_table::model::field_id;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;

fn create_sample_users() -> Vec<Record> {
    let ages = [12, 18, 25, 45, 60, 33, 71, 29, 40, 19, 52, 37];
    ages.iter()
        .enumerate()
        .map(|(i, age)| {
            Record::new()
                .set("username", format!("username-{}", i + 1))
                .set("age", *age)
                .set("vip", i % 4 == 1)
        })
        .collect()
}

fn print_rows(title: &str, table: &Table<Record>) {
    println!("== {title}");
    let columns = table.visible_columns();
    let header: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
    println!("   {}", header.join(" | "));
    for row in table.page_rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| headless_table::stringify::string_of(&row, c, &c.stringify))
            .collect();
        let marker = if row.selected { "*" } else { " " };
        println!(" {marker} {}", cells.join(" | "));
    }
    println!(
        "   page {} of {} ({} rows)\n",
        table.current_page(),
        table.page_count(),
        table.all_rows_count()
    );
}

fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).expect("Failed to initialize logger");

    let options = Options::default()
        .with_locale("en-US")
        .with_id_fn(field_id("username"))
        .with_boolean_labels(Some(BooleanLabels::new("yes", "no", "")))
        .with_page_size(5);
    let columns = vec![
        Column::string("username"),
        Column::number("age"),
        Column::boolean("vip").with_id("vip"),
    ];
    let mut table = Table::new(options, columns, create_sample_users());
    print_rows("All users", &table);

    table.sort("age", Some(SortDirection::Asc));
    print_rows("Sorted by age", &table);

    table.next_page();
    print_rows("Second page", &table);

    table.add_filter(
        Filter::new(|row: &Row<Record>| row.data.field("vip") == Value::Bool(true)).with_id("vip"),
    );
    table.first_page();
    print_rows("VIPs only", &table);

    table.select_all();
    table.deselect("username-2");
    table.remove_filter("vip");
    table.set_search_query("username-1");
    print_rows("Search \"username-1\" with selection", &table);

    table.set_page_size(2);
    table.last_page();
    print_rows("Page size 2, last page", &table);
}
