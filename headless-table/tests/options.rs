use headless_table::Error;
use headless_table::Options;
use headless_table::OptionsPatch;
use headless_table::Table;
use headless_table::column::Column;
use headless_table::i18n::BooleanLabels;
use headless_table::i18n::CaseFirst;
use headless_table::i18n::FormatStyle;
use headless_table::i18n::Locale;
use headless_table::i18n::NumberStyle;
use headless_table::i18n::Sensitivity;
use headless_table::model::Record;
use headless_table::model::field_id;
use headless_table::options::DetailsPanelType;

#[test]
fn test_deep_merge_keeps_unspecified_keys() {
    let base = Options::<Record>::default()
        .with_locale("de-DE")
        .with_page_size(20)
        .with_boolean_labels(Some(BooleanLabels::new("ja", "nein", "-")));

    let patch = OptionsPatch::from_json(
        r#"{
            "internationalizationOptions": {
                "collatorOptions": { "sensitivity": "base", "caseFirst": "upper" },
                "numberFormatOptions": { "style": "percent" },
                "dateFormatOptions": { "dateStyle": "long" },
                "booleanFormatOptions": { "true": "yes" }
            },
            "paginationOptions": { "currentPage": 3 }
        }"#,
    )
    .unwrap();
    let merged = base.merge(patch);

    let i18n = &merged.internationalization;
    assert_eq!(i18n.locale, Some(Locale::new("de-DE")));
    assert_eq!(i18n.collator.sensitivity, Some(Sensitivity::Base));
    assert_eq!(i18n.collator.case_first, Some(CaseFirst::Upper));
    assert_eq!(i18n.collator.numeric, None);
    assert_eq!(i18n.number.style, Some(NumberStyle::Percent));
    assert_eq!(i18n.date.date_style, Some(FormatStyle::Long));
    assert_eq!(i18n.time.date_style, None);
    assert_eq!(i18n.booleans, Some(BooleanLabels::new("yes", "nein", "-")));

    assert_eq!(merged.pagination.current_page, 3);
    assert_eq!(merged.pagination.page_size, 20);
    assert_eq!(merged.rows.details_panel_type, DetailsPanelType::Single);
}

#[test]
fn test_from_json_fills_defaults() {
    let options = Options::<Record>::from_json(
        r#"{
            "rowOptions": { "detailsPanelType": "multiple" },
            "paginationOptions": { "pageSize": 2.5, "currentPage": -1 }
        }"#,
    )
    .unwrap();
    assert_eq!(options.rows.details_panel_type, DetailsPanelType::Multiple);
    assert_eq!(options.pagination.page_size, 3);
    assert_eq!(options.pagination.current_page, 1);
    assert_eq!(options.internationalization.locale, None);
    assert_eq!(
        options.internationalization.booleans,
        Some(BooleanLabels::new("true", "false", ""))
    );
}

#[test]
fn test_empty_patch_is_identity() {
    let options = Options::<Record>::default().merge(OptionsPatch::from_json("{}").unwrap());
    assert_eq!(options.pagination.page_size, 5);
    assert_eq!(options.pagination.current_page, 1);
}

#[test]
fn test_invalid_json_is_an_error() {
    let err = OptionsPatch::from_json("{ not json").unwrap_err();
    let err: Error = err.into();
    assert!(matches!(err, Error::Options(_)));
    assert!(err.to_string().starts_with("Options parse error"));
}

#[test]
fn test_pagination_options_seed_the_table() {
    let table = Table::new(
        Options::default().with_current_page(2).with_page_size(3),
        vec![Column::number("n")],
        (1..=10).map(|n| Record::new().set("n", n)),
    );
    let page = table.page();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.page_size, 3);
    assert_eq!(page.page_count, 4);
    assert_eq!(page.page_rows.len(), 3);
}

#[test]
fn test_details_panel_type_from_options() {
    let mut table = Table::new(
        Options::default().with_details_panel_type(DetailsPanelType::Multiple),
        vec![Column::<Record>::string("name")],
        Vec::new(),
    );
    table.open_details("a");
    table.open_details("b");
    assert!(table.is_details_open("a"));
    assert!(table.is_details_open("b"));

    table.set_options(Options::default());
    assert!(!table.is_details_open("a"));
    assert!(table.toggle_details("a"));
    assert!(!table.close_details("b"));
}

#[test]
fn test_set_options_renormalizes_columns() {
    let mut table = Table::new(
        Options::default().with_locale("en-US"),
        vec![Column::number("n")],
        vec![Record::new().set("n", 1234.5)],
    );
    table.set_search_query("1,234");
    assert_eq!(table.rows().len(), 1);

    table.set_options(Options::default().with_locale("de-DE"));
    assert!(table.rows().is_empty());
    table.set_search_query("1.234,5");
    assert_eq!(table.rows().len(), 1);
}

fn selected_flags(table: &Table<Record>) -> Vec<bool> {
    table.rows().iter().map(|row| row.selected).collect()
}

#[test]
fn test_set_options_keeps_selection_with_random_ids() {
    let mut table = Table::new(
        Options::default().with_locale("en-US"),
        vec![Column::number("n")],
        (1..=3).map(|n| Record::new().set("n", n)),
    );
    let ids: Vec<String> = table.rows_with_ids().iter().map(|row| row.id.clone()).collect();
    table.select_all();
    assert_eq!(selected_flags(&table), [true, true, true]);

    table.set_options(Options::default().with_locale("de-DE").with_page_size(2));
    let after: Vec<String> = table.rows_with_ids().iter().map(|row| row.id.clone()).collect();
    assert_eq!(after, ids);
    assert_eq!(selected_flags(&table), [true, true, true]);
    assert!(table.all_selected());
}

#[test]
fn test_new_id_fn_regenerates_ids_and_drops_stale_selection() {
    let mut table = Table::new(
        Options::default(),
        vec![Column::number("n")],
        (1..=3).map(|n| Record::new().set("n", n)),
    );
    table.select_all();

    table.set_options(Options::default().with_id_fn(field_id("n")));
    let ids: Vec<&str> = table.rows_with_ids().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert!(!table.has_selected_rows());
    assert!(!table.all_selected());
}
