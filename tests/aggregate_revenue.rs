//! 연도별 전체 매출 계산 회귀 테스트.
use terminal_revenue_toolbox::params::ParameterSet;
use terminal_revenue_toolbox::revenue::{
    compute_aggregate_revenue, compute_segmented_revenue, MissingTable, RevenueError,
};
use terminal_revenue_toolbox::tables::{InstalledBaseRow, SalesRow, TariffRow};
use terminal_revenue_toolbox::year::{projection_years, YearValues};

fn assert_close(label: &str, actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "{label} expected {expected} got {actual}"
    );
}

fn years(values: &[(u16, f64)]) -> YearValues {
    values.iter().copied().collect()
}

fn retail_small_base() -> Vec<InstalledBaseRow> {
    vec![InstalledBaseRow::new("Retail", "Small", years(&[(2026, 100.0)]))]
}

fn retail_small_tariff() -> Vec<TariffRow> {
    vec![TariffRow::new("Retail", "Small", 0.1, 1000.0)]
}

fn sales(values: &[(u16, f64)]) -> Vec<SalesRow> {
    vec![SalesRow::new("cohort-1", years(values))]
}

#[test]
fn connection_revenue_uses_indexed_tariff_and_churn() {
    let params = ParameterSet::default();
    let result = compute_aggregate_revenue(
        &params,
        &retail_small_base(),
        &retail_small_tariff(),
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    // 100 × (1000 × 1.05) × 0.9
    assert_close("connection 2026", result[&2026].connection_revenue, 94_500.0);
}

#[test]
fn sales_and_rental_revenue_follow_year_sales() {
    let params = ParameterSet::default();
    let result = compute_aggregate_revenue(
        &params,
        &retail_small_base(),
        &retail_small_tariff(),
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    let y2026 = result[&2026];
    assert_close("sales 2026", y2026.sales_revenue, 3_000_000.0);
    // 10 × 80% × 9491 × 12
    assert_close("rental 2026", y2026.rental_revenue, 911_136.0);
    assert_close(
        "total 2026",
        y2026.total_revenue,
        3_000_000.0 + 911_136.0 + 94_500.0,
    );
}

#[test]
fn every_projection_year_is_present_even_without_data() {
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &retail_small_base(),
        &retail_small_tariff(),
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    let keys: Vec<u16> = result.keys().copied().collect();
    assert_eq!(keys, projection_years().collect::<Vec<_>>());
    let y2030 = result[&2030];
    assert_eq!(y2030.sales_revenue, 0.0);
    assert_eq!(y2030.rental_revenue, 0.0);
    assert_eq!(y2030.connection_revenue, 0.0);
}

#[test]
fn total_is_sum_of_parts_for_every_year() {
    let base = vec![
        InstalledBaseRow::new("Retail", "Small", years(&[(2026, 100.0), (2031, 37.5)])),
        InstalledBaseRow::new("Corporate", "Large", years(&[(2028, 12.0), (2040, 7.0)])),
    ];
    let tariffs = vec![
        TariffRow::new("Retail", "Small", 0.1, 1000.0),
        TariffRow::new("Corporate", "Large", 0.25, 4321.5),
    ];
    let sales = sales(&[(2026, 10.0), (2029, 3.0), (2040, 1.5)]);
    let params = ParameterSet {
        unit_cost: 123_456.7,
        rental_share_pct: 64.0,
        ..ParameterSet::default()
    };
    let result = compute_aggregate_revenue(&params, &base, &tariffs, &sales).expect("aggregate");
    for (year, r) in &result {
        assert_eq!(
            r.total_revenue,
            r.sales_revenue + r.rental_revenue + r.connection_revenue,
            "year {year}"
        );
    }
}

#[test]
fn empty_installed_base_or_sales_is_missing_input() {
    let params = ParameterSet::default();
    let err = compute_aggregate_revenue(&params, &[], &retail_small_tariff(), &sales(&[(2026, 1.0)]))
        .unwrap_err();
    assert_eq!(err, RevenueError::MissingInput(MissingTable::InstalledBase));

    let err = compute_aggregate_revenue(&params, &retail_small_base(), &retail_small_tariff(), &[])
        .unwrap_err();
    assert_eq!(err, RevenueError::MissingInput(MissingTable::Sales));
}

#[test]
fn empty_tariff_table_only_zeroes_connection_revenue() {
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &retail_small_base(),
        &[],
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    assert_eq!(result[&2026].connection_revenue, 0.0);
    assert_close("sales 2026", result[&2026].sales_revenue, 3_000_000.0);
}

#[test]
fn tariff_without_installed_base_match_contributes_zero() {
    let tariffs = vec![
        TariffRow::new("Retail", "Small", 0.1, 1000.0),
        TariffRow::new("Corporate", "Large", 0.0, 99_999.0),
    ];
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &retail_small_base(),
        &tariffs,
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    assert_close("connection 2026", result[&2026].connection_revenue, 94_500.0);
}

#[test]
fn first_matching_installed_base_row_wins() {
    let base = vec![
        InstalledBaseRow::new("Retail", "Small", years(&[(2026, 100.0)])),
        InstalledBaseRow::new("Retail", "Small", years(&[(2026, 5_000.0)])),
    ];
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &base,
        &retail_small_tariff(),
        &sales(&[(2026, 10.0)]),
    )
    .expect("aggregate");
    assert_close("connection 2026", result[&2026].connection_revenue, 94_500.0);
}

#[test]
fn sales_are_summed_across_cohorts() {
    let sales = vec![
        SalesRow::new("a", years(&[(2027, 4.0)])),
        SalesRow::new("b", years(&[(2027, 6.0), (2028, 1.0)])),
        SalesRow::new("c", YearValues::new()),
    ];
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &retail_small_base(),
        &retail_small_tariff(),
        &sales,
    )
    .expect("aggregate");
    assert_close("sales 2027", result[&2027].sales_revenue, 3_000_000.0);
    assert_close("sales 2028", result[&2028].sales_revenue, 300_000.0);
}

#[test]
fn rental_base_is_same_year_sales_not_running_total() {
    // "누적" 카운터가 연도 간에 이어지지 않는 현재 동작을 고정한다.
    let result = compute_aggregate_revenue(
        &ParameterSet::default(),
        &retail_small_base(),
        &retail_small_tariff(),
        &sales(&[(2026, 10.0), (2027, 5.0)]),
    )
    .expect("aggregate");
    assert_close("rental 2027", result[&2027].rental_revenue, 5.0 * 0.8 * 9_491.0 * 12.0);
    assert_eq!(result[&2028].rental_revenue, 0.0);
}

#[test]
fn only_2024_russia_indexation_is_applied_for_all_years() {
    let base = vec![InstalledBaseRow::new(
        "Retail",
        "Small",
        years(&[(2026, 100.0), (2035, 100.0)]),
    )];
    let mut params = ParameterSet::default();
    params.indexation_russia_2025 = 50.0;
    params.indexation_foreign_2024 = 30.0;
    params.indexation_foreign_2025 = 40.0;
    let result =
        compute_aggregate_revenue(&params, &base, &retail_small_tariff(), &sales(&[(2026, 1.0)]))
            .expect("aggregate");
    assert_close("connection 2026", result[&2026].connection_revenue, 94_500.0);
    assert_close("connection 2035", result[&2035].connection_revenue, 94_500.0);

    params.indexation_russia_2024 = 10.0;
    let result =
        compute_aggregate_revenue(&params, &base, &retail_small_tariff(), &sales(&[(2026, 1.0)]))
            .expect("aggregate");
    assert_close("connection 2035", result[&2035].connection_revenue, 99_000.0);
}

#[test]
fn zero_rental_share_removes_rental_revenue_everywhere() {
    let params = ParameterSet {
        rental_share_pct: 0.0,
        ..ParameterSet::default()
    };
    let base = retail_small_base();
    let tariffs = retail_small_tariff();
    let sales = sales(&[(2026, 10.0), (2033, 2.0)]);

    let aggregate = compute_aggregate_revenue(&params, &base, &tariffs, &sales).expect("aggregate");
    assert!(aggregate.values().all(|r| r.rental_revenue == 0.0));

    let segmented = compute_segmented_revenue(&params, &base, &tariffs, &sales).expect("segmented");
    assert!(segmented
        .values()
        .flat_map(|segments| segments.values())
        .all(|r| r.rental_revenue == 0.0));
}

#[test]
fn sales_revenue_scales_linearly_with_unit_cost() {
    let base = retail_small_base();
    let tariffs = retail_small_tariff();
    let sales = sales(&[(2026, 10.0), (2030, 7.0), (2039, 0.5)]);
    let params = ParameterSet::default();
    let baseline = compute_aggregate_revenue(&params, &base, &tariffs, &sales).expect("aggregate");

    for k in [0.5, 2.0, 3.7] {
        let scaled_params = ParameterSet {
            unit_cost: params.unit_cost * k,
            ..params
        };
        let scaled =
            compute_aggregate_revenue(&scaled_params, &base, &tariffs, &sales).expect("aggregate");
        for year in projection_years() {
            assert_close(
                &format!("k={k} year={year}"),
                scaled[&year].sales_revenue,
                k * baseline[&year].sales_revenue,
            );
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let base = vec![
        InstalledBaseRow::new("Retail", "Small", years(&[(2026, 100.0), (2027, 133.3)])),
        InstalledBaseRow::new("Retail", "Medium", years(&[(2027, 17.0)])),
    ];
    let tariffs = vec![
        TariffRow::new("Retail", "Small", 0.07, 811.11),
        TariffRow::new("Retail", "Medium", 0.13, 1234.56),
    ];
    let sales = sales(&[(2026, 10.0), (2027, 3.3)]);
    let params = ParameterSet::default();
    let first = compute_aggregate_revenue(&params, &base, &tariffs, &sales).expect("aggregate");
    let second = compute_aggregate_revenue(&params, &base, &tariffs, &sales).expect("aggregate");
    assert_eq!(first, second);
}
