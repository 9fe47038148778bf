use std::io::Write;

use metric_dashboard::{
    ChartKind, ChartView, ColumnType, Dashboard, Dataset, LoadError, MetricSelection, Renderer,
    Selection, SelectionError, SummaryError, summarize,
};
use metric_dashboard::{AnsiCode, SummaryStats};
use terminal_size::{Height, Width};

const COVID: &str = "\
date,state,cases,deaths,positive_rate
2020-03-01,WA,1,0,0.5
2020-03-02,WA,2,NA,
2020-03-03,NY,2,1,1.25
2020-03-04,NY,3,,2
2020-03-05,CA,100,4,0.75
";

fn csv_file(text: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(text.as_bytes()).unwrap();
    f
}

#[test]
fn loads_once_and_infers_types() {
    let f = csv_file(COVID);
    let ds = Dataset::new(f.path());
    assert!(!ds.is_loaded());
    let table = ds.load().unwrap();
    assert!(ds.is_loaded());

    assert_eq!(table.n_rows(), 5);
    let types: Vec<_> = table.columns().iter().map(|c| c.column_type()).collect();
    assert_eq!(
        types,
        [
            ColumnType::Text,
            ColumnType::Text,
            ColumnType::Integer,
            ColumnType::Float,
            ColumnType::Float,
        ]
    );
    assert_eq!(table.numeric_columns(), ["cases", "deaths", "positive_rate"]);

    // later edits to the file are not seen: the table is cached
    std::fs::write(f.path(), "x\n1\n").unwrap();
    let again = ds.load().unwrap();
    assert!(std::ptr::eq(table, again));
    assert_eq!(again.n_columns(), 5);
}

#[test]
fn load_errors_are_typed() {
    let missing = Dataset::new("/definitely/not/here/covid_19.csv");
    assert!(matches!(missing.load(), Err(LoadError::Missing { .. })));
    assert!(!missing.is_loaded());

    let header_only = csv_file("a,b\n");
    assert!(matches!(
        Dataset::new(header_only.path()).load(),
        Err(LoadError::NoRows { .. })
    ));

    let long = csv_file("a,b\n1,2\n3,4,5\n");
    assert!(matches!(
        Dataset::new(long.path()).load(),
        Err(LoadError::LongRow { line: 3, .. })
    ));
}

#[test]
fn short_rows_load_with_gaps() {
    let f = csv_file("date,cases,deaths\n2020-03-01,4,1\n2020-03-02,6\n");
    let ds = Dataset::new(f.path());
    let table = ds.load().unwrap();
    assert_eq!(table.numeric_columns(), ["cases", "deaths"]);
    let deaths = MetricSelection::new(table, "deaths").unwrap();
    let s = summarize(table, &deaths).unwrap();
    assert_eq!((s.minimum, s.maximum, s.average), (1.0, 1.0, 1.0));
}

#[test]
fn summary_scenario() {
    let f = csv_file(COVID);
    let ds = Dataset::new(f.path());
    let table = ds.load().unwrap();

    let cases = MetricSelection::new(table, "cases").unwrap();
    assert_eq!(
        summarize(table, &cases).unwrap(),
        SummaryStats {
            minimum: 1.0,
            maximum: 100.0,
            average: 21.6,
        }
    );

    let rate = MetricSelection::new(table, "positive_rate").unwrap();
    assert_eq!(
        summarize(table, &rate).unwrap(),
        SummaryStats {
            minimum: 0.5,
            maximum: 2.0,
            average: 1.13,
        }
    );
}

#[test]
fn selection_errors() {
    let f = csv_file(COVID);
    let ds = Dataset::new(f.path());
    let table = ds.load().unwrap();
    assert_eq!(
        MetricSelection::new(table, "state"),
        Err(SelectionError::NotNumeric("state".into()))
    );
    assert_eq!(
        MetricSelection::new(table, "recovered"),
        Err(SelectionError::UnknownColumn("recovered".into()))
    );
    assert_eq!(
        "radar".parse::<ChartKind>(),
        Err(SelectionError::UnknownChart("radar".into()))
    );
}

#[test]
fn all_missing_metric_cannot_be_summarised() {
    let f = csv_file("day,tests\n1,NA\n2,\n");
    let ds = Dataset::new(f.path());
    let table = ds.load().unwrap();
    let tests = MetricSelection::new(table, "tests").unwrap();
    assert_eq!(
        summarize(table, &tests),
        Err(SummaryError::EmptyColumn {
            column: "tests".into()
        })
    );
}

#[test]
fn every_chart_kind_renders_a_page() {
    let f = csv_file(COVID);
    let ds = Dataset::new(f.path());
    let table = ds.load().unwrap();
    let dashboard = Dashboard {
        title: "COVID-19 Data Visualization".into(),
        preview_rows: None,
        view: ChartView::new((Width(100), Height(40)), AnsiCode::Plain),
    };
    let mut renderer = Renderer::new();
    for kind in ChartKind::ALL {
        let selection = Selection::new(MetricSelection::new(table, "deaths").unwrap(), kind);
        let page = dashboard.render_page(table, &selection, &mut renderer).unwrap();
        assert!(page.contains(&format!("{} for deaths", kind.display_name())));
        assert!(page.contains("[5 rows × 5 columns]"));
        assert!(!page.contains('\x1b'));
    }
}
