//! 스프레드시트 -> 입력 표 변환 테스트. 대부분 메모리상의 Range를 쓰고,
//! `tests/fixtures/uploads` 의 워크북으로 실제 파일 읽기도 확인한다.
use std::path::{Path, PathBuf};

use calamine::{Data, Range};
use terminal_revenue_toolbox::config::DataFiles;
use terminal_revenue_toolbox::loader::{
    cell_number, cell_text, installed_base_from_range, load_input_tables, read_sheet,
    sales_from_range, tariffs_from_range, LoadError,
};
use terminal_revenue_toolbox::params::ParameterSet;
use terminal_revenue_toolbox::revenue::compute_aggregate_revenue;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/uploads")
}

fn s(v: &str) -> Data {
    Data::String(v.to_string())
}

fn sheet(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len() as u32;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
    let mut range = Range::new((0, 0), (height - 1, width - 1));
    for (r, row) in rows.into_iter().enumerate() {
        for (c, value) in row.into_iter().enumerate() {
            range.set_value((r as u32, c as u32), value);
        }
    }
    range
}

#[test]
fn installed_base_reads_sparse_year_columns() {
    let range = sheet(vec![
        vec![s("segment"), s("subsegment"), s("year_2026"), s("year_2027"), s("note")],
        vec![s("Retail"), s("Small"), Data::Float(100.0), Data::Empty, s("pilot")],
        vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty],
        vec![s("Retail"), s("Medium"), Data::Int(7), s("8.5"), Data::Empty],
    ]);
    let rows = installed_base_from_range(&range, "baza_at.xlsx").expect("installed base");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].segment, "Retail");
    assert_eq!(rows[0].subsegment, "Small");
    assert_eq!(rows[0].units.get(2026), Some(100.0));
    assert_eq!(rows[0].units.get(2027), None);
    assert_eq!(rows[1].units.get(2026), Some(7.0));
    assert_eq!(rows[1].units.get(2027), Some(8.5));
}

#[test]
fn missing_required_column_is_an_error() {
    let range = sheet(vec![
        vec![s("segment"), s("year_2026")],
        vec![s("Retail"), Data::Float(1.0)],
    ]);
    let err = installed_base_from_range(&range, "baza_at.xlsx").unwrap_err();
    assert!(matches!(
        err,
        LoadError::MissingColumn { column: "subsegment", .. }
    ));

    let range = sheet(vec![
        vec![s("segment"), s("subsegment"), s("tariff")],
        vec![s("Retail"), s("Small"), Data::Float(1.0)],
    ]);
    let err = tariffs_from_range(&range, "tariffs_and_ottok.xlsx").unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { column: "ottok", .. }));
}

#[test]
fn tariffs_accept_numeric_text_and_reject_garbage() {
    let range = sheet(vec![
        vec![s("segment"), s("subsegment"), s("ottok"), s("tariff")],
        vec![s("Retail"), s("Small"), s("0.1"), Data::Float(1000.0)],
    ]);
    let rows = tariffs_from_range(&range, "tariffs_and_ottok.xlsx").expect("tariffs");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].churn_rate, 0.1);
    assert_eq!(rows[0].tariff, 1000.0);

    let range = sheet(vec![
        vec![s("segment"), s("subsegment"), s("ottok"), s("tariff")],
        vec![s("Retail"), s("Small"), Data::Float(0.1), s("abc")],
    ]);
    match tariffs_from_range(&range, "tariffs_and_ottok.xlsx").unwrap_err() {
        LoadError::InvalidNumber { row, column, value, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "tariff");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn tariff_cells_may_not_be_blank() {
    let range = sheet(vec![
        vec![s("segment"), s("subsegment"), s("ottok"), s("tariff")],
        vec![s("Retail"), s("Small"), Data::Empty, Data::Float(1000.0)],
    ]);
    assert!(matches!(
        tariffs_from_range(&range, "tariffs_and_ottok.xlsx"),
        Err(LoadError::InvalidNumber { .. })
    ));
}

#[test]
fn sales_use_first_column_as_identifier() {
    let range = sheet(vec![
        vec![s("cohort"), s("year_2026"), s("year_2027"), s("comment")],
        vec![Data::Float(1.0), Data::Int(10), Data::Empty, s("a")],
        vec![s("B-2"), Data::Empty, Data::Float(2.5), Data::Empty],
    ]);
    let rows = sales_from_range(&range, "sales.xlsx").expect("sales");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "1");
    assert_eq!(rows[0].units.get(2026), Some(10.0));
    assert_eq!(rows[1].id, "B-2");
    assert_eq!(rows[1].units.get(2026), None);
    assert_eq!(rows[1].units.get(2027), Some(2.5));
}

#[test]
fn empty_sheet_is_empty_table() {
    let range: Range<Data> = Range::empty();
    assert!(installed_base_from_range(&range, "x").expect("empty").is_empty());
    assert!(sales_from_range(&range, "x").expect("empty").is_empty());

    let header_only = sheet(vec![vec![s("segment"), s("subsegment"), s("ottok"), s("tariff")]]);
    assert!(tariffs_from_range(&header_only, "x").expect("empty").is_empty());
}

#[test]
fn missing_files_give_empty_tables() {
    let files = DataFiles {
        dir: std::env::temp_dir().join(format!("trt_missing_{}", std::process::id())),
        ..DataFiles::default()
    };
    let tables = load_input_tables(&files).expect("load");
    assert!(tables.installed_base.is_empty());
    assert!(tables.tariffs.is_empty());
    assert!(tables.sales.is_empty());
}

#[test]
fn cell_conversions() {
    assert_eq!(cell_text(&Data::Float(3.0)), Some("3".to_string()));
    assert_eq!(cell_text(&s("  Retail ")), Some("Retail".to_string()));
    assert_eq!(cell_text(&s("   ")), None);
    assert_eq!(cell_text(&Data::Empty), None);
    assert_eq!(cell_number(&Data::Int(4)), Ok(Some(4.0)));
    assert_eq!(cell_number(&s("")), Ok(None));
    assert!(cell_number(&Data::Bool(true)).is_err());
}

#[test]
fn workbooks_in_data_dir_are_loaded() {
    let files = DataFiles {
        dir: fixture_dir(),
        ..DataFiles::default()
    };
    let tables = load_input_tables(&files).expect("load");

    assert_eq!(tables.installed_base.len(), 2);
    let retail = &tables.installed_base[0];
    assert_eq!((retail.segment.as_str(), retail.subsegment.as_str()), ("Retail", "Small"));
    assert_eq!(retail.units.get(2026), Some(100.0));
    assert_eq!(retail.units.get(2027), None);
    assert_eq!(tables.installed_base[1].units.get(2026), None);
    assert_eq!(tables.installed_base[1].units.get(2027), Some(10.0));

    assert_eq!(tables.tariffs.len(), 2);
    assert_eq!(tables.tariffs[0].churn_rate, 0.1);
    assert_eq!(tables.tariffs[1].tariff, 5000.0);

    assert_eq!(tables.sales.len(), 1);
    assert_eq!(tables.sales[0].id, "cohort-1");
    assert_eq!(tables.sales[0].units.get(2026), Some(10.0));
    assert_eq!(tables.sales[0].units.get(2027), None);

    // 읽어 들인 표로 바로 계산할 수 있다: 100 × 1050 × 0.9
    let projection = compute_aggregate_revenue(
        &ParameterSet::default(),
        &tables.installed_base,
        &tables.tariffs,
        &tables.sales,
    )
    .expect("aggregate");
    assert!((projection[&2026].connection_revenue - 94_500.0).abs() < 1e-6);
}

#[test]
fn unreadable_workbook_is_an_error() {
    let dir = std::env::temp_dir().join(format!("trt_badbook_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("dir");
    let path = dir.join("sales.xlsx");
    std::fs::write(&path, b"not a zip archive").expect("write");

    assert!(matches!(read_sheet(&path), Err(LoadError::Workbook { .. })));
    let files = DataFiles {
        dir,
        ..DataFiles::default()
    };
    assert!(matches!(
        load_input_tables(&files),
        Err(LoadError::Workbook { .. })
    ));
}
