//! 계산 결과를 터미널용 표와 JSON으로 만든다.

use std::collections::BTreeMap;

use calamine::{Data, Range};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

use crate::loader::cell_text;
use crate::params::ParameterSet;
use crate::revenue::summary::{grand_total, revenue_shares};
use crate::revenue::{AggregateProjection, YearlyRevenue};

/// 천 단위 구분 기호와 소수 둘째 자리로 금액을 표시한다.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h)));
    table
}

fn amount_cell(value: f64) -> Cell {
    Cell::new(format_amount(value)).set_alignment(CellAlignment::Right)
}

fn revenue_cells(label: String, revenue: &YearlyRevenue) -> Vec<Cell> {
    vec![
        Cell::new(label),
        amount_cell(revenue.sales_revenue),
        amount_cell(revenue.rental_revenue),
        amount_cell(revenue.connection_revenue),
        amount_cell(revenue.total_revenue),
    ]
}

/// 연도별 전체 매출 표. 마지막 행은 전체 기간 합계.
pub fn aggregate_table(projection: &AggregateProjection) -> Table {
    let mut table = new_table(&["연도", "판매 매출", "임대 매출", "통신 매출", "총매출"]);
    for (year, revenue) in projection {
        table.add_row(revenue_cells(year.to_string(), revenue));
    }
    table.add_row(revenue_cells("합계".to_string(), &grand_total(projection)));
    table
}

/// 세그먼트별 합계 표(비중 포함).
pub fn segment_totals_table(totals: &BTreeMap<String, YearlyRevenue>) -> Table {
    let mut table = new_table(&[
        "세그먼트",
        "판매 매출",
        "임대 매출",
        "통신 매출",
        "총매출",
        "비중 (%)",
    ]);
    let shares = revenue_shares(totals);
    for (key, revenue) in totals {
        let mut row = revenue_cells(key.clone(), revenue);
        let share = shares.get(key).copied().unwrap_or(0.0);
        row.push(Cell::new(format!("{share:.1}")).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }
    table
}

/// 파라미터 목록 표.
pub fn parameters_table(params: &ParameterSet) -> Table {
    let mut table = new_table(&["이름", "설명", "값"]);
    for (name, value) in params.iter() {
        table.add_row(vec![
            Cell::new(name.key()),
            Cell::new(name.label()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// 스프레드시트 내용을 그대로 보여주는 표. 첫 행을 헤더로 쓴다.
pub fn sheet_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(header) = rows.next() {
        table.set_header(header.iter().map(|c| Cell::new(cell_text(c).unwrap_or_default())));
    }
    for row in rows {
        table.add_row(row.iter().map(|c| Cell::new(cell_text(c).unwrap_or_default())));
    }
    table
}

/// 임의의 계산 결과를 보기 좋은 JSON으로.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
