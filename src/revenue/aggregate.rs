use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{
    annual_rental_revenue, connection_revenue, indexed_rate, AggregateProjection, MissingTable,
    RevenueError, YearlyRevenue,
};
use crate::params::ParameterSet;
use crate::tables::{find_installed_base, total_sales_for_year, InstalledBaseRow, SalesRow, TariffRow};
use crate::year::projection_years;

/// 2026~2040년 전체 매출(판매/임대/통신)을 연도별로 계산한다.
///
/// 설치 기반 표나 판매 표가 비어 있으면 부분 결과 없이 `MissingInput`을 돌려준다.
/// 요금 표가 비어 있는 것은 허용되며 통신 매출이 0이 된다.
///
/// 임대 대상 단말 수의 기준인 "누적" 카운터는 호출마다 새로 만들어지고 연도 키별로만
/// 더해지므로, 실제로는 해당 연도 판매량과 같다. 연도 간 누적이 의도였는지는 아직
/// 확인되지 않았고 현재 동작을 그대로 유지한다.
pub fn compute_aggregate_revenue(
    params: &ParameterSet,
    installed_base: &[InstalledBaseRow],
    tariffs: &[TariffRow],
    sales: &[SalesRow],
) -> Result<AggregateProjection, RevenueError> {
    if installed_base.is_empty() {
        warn!("installed base table is empty, aggregate projection skipped");
        return Err(RevenueError::MissingInput(MissingTable::InstalledBase));
    }
    if sales.is_empty() {
        warn!("sales table is empty, aggregate projection skipped");
        return Err(RevenueError::MissingInput(MissingTable::Sales));
    }

    let mut cumulative_terminals: BTreeMap<u16, f64> = BTreeMap::new();
    let mut yearly = AggregateProjection::new();

    for year in projection_years() {
        let year_sales = total_sales_for_year(sales, year);
        let sales_revenue = year_sales * params.unit_cost;

        let stock = cumulative_terminals.entry(year).or_insert(0.0);
        *stock += year_sales;
        let terminals_for_rent = *stock * (params.rental_share_pct / 100.0);
        let rental_revenue = annual_rental_revenue(terminals_for_rent, params);

        let mut connection = 0.0;
        for tariff in tariffs {
            let Some(base) = find_installed_base(installed_base, &tariff.segment, &tariff.subsegment)
            else {
                continue;
            };
            let num_terminals = base.units.get_or_zero(year);
            let rate = indexed_rate(tariff.tariff, params);
            connection += connection_revenue(num_terminals, rate, tariff.churn_rate);
        }

        yearly.insert(
            year,
            YearlyRevenue::from_parts(sales_revenue, rental_revenue, connection),
        );
    }

    debug!(years = yearly.len(), "aggregate projection computed");
    Ok(yearly)
}
