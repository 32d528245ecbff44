use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{
    annual_rental_revenue, connection_revenue, indexed_rate, segment_key, MissingTable,
    RevenueError, SegmentedProjection, YearlyRevenue,
};
use crate::params::ParameterSet;
use crate::tables::{find_installed_base, InstalledBaseRow, SalesRow, TariffRow};
use crate::year::projection_years;

/// 요금 표의 각 행(세그먼트)별로 연도별 매출을 계산한다.
///
/// 판매/임대 단말 수는 판매 표가 아니라 해당 세그먼트의 설치 단말 수에 비중을 곱해 구한다.
/// 판매 표는 비어 있지 않은지만 확인한다.
///
/// 모든 예측 연도는 결과에 키로 존재하며, 계산된 세그먼트가 없으면 빈 맵이다.
/// 설치 기반에 일치 행이 없거나 해당 연도 값이 없는 세그먼트는 건너뛴다.
/// 같은 세그먼트 키가 여러 번 나오면 뒤의 행이 앞의 결과를 덮어쓴다.
pub fn compute_segmented_revenue(
    params: &ParameterSet,
    installed_base: &[InstalledBaseRow],
    tariffs: &[TariffRow],
    sales: &[SalesRow],
) -> Result<SegmentedProjection, RevenueError> {
    let missing = if installed_base.is_empty() {
        Some(MissingTable::InstalledBase)
    } else if sales.is_empty() {
        Some(MissingTable::Sales)
    } else if tariffs.is_empty() {
        Some(MissingTable::Tariffs)
    } else {
        None
    };
    if let Some(table) = missing {
        warn!(%table, "input table is empty, segmented projection skipped");
        return Err(RevenueError::MissingInput(table));
    }

    let mut projection = SegmentedProjection::new();
    for year in projection_years() {
        let segments = projection.entry(year).or_insert_with(BTreeMap::new);

        for tariff in tariffs {
            let Some(num_terminals) =
                find_installed_base(installed_base, &tariff.segment, &tariff.subsegment)
                    .and_then(|base| base.units.get(year))
            else {
                continue;
            };

            let terminals_for_sale = num_terminals * (params.sales_share_pct / 100.0);
            let terminals_for_rent = num_terminals * (params.rental_share_pct / 100.0);

            let sales_revenue = terminals_for_sale * params.unit_cost;
            let rental_revenue = annual_rental_revenue(terminals_for_rent, params);
            let rate = indexed_rate(tariff.tariff, params);
            let connection = connection_revenue(num_terminals, rate, tariff.churn_rate);

            segments.insert(
                segment_key(&tariff.segment, &tariff.subsegment),
                YearlyRevenue::from_parts(sales_revenue, rental_revenue, connection),
            );
        }
    }

    debug!(
        segments = projection.values().map(BTreeMap::len).max().unwrap_or(0),
        "segmented projection computed"
    );
    Ok(projection)
}
