use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::{AggregateProjection, RevenueError, SegmentedProjection, YearlyRevenue};
use crate::year::{FIRST_YEAR, LAST_YEAR};

/// 선택한 연도 구간(양 끝 포함)의 세그먼트별 매출을 합산한다.
///
/// 시작 연도가 끝 연도보다 크면 빈 결과가 된다.
pub fn sum_segments_over_years(
    projection: &SegmentedProjection,
    years: RangeInclusive<u16>,
) -> Result<BTreeMap<String, YearlyRevenue>, RevenueError> {
    let mut totals: BTreeMap<String, YearlyRevenue> = BTreeMap::new();
    for year in years {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(RevenueError::YearOutOfRange(year));
        }
        let Some(segments) = projection.get(&year) else {
            continue;
        };
        for (key, revenue) in segments {
            *totals.entry(key.clone()).or_default() += *revenue;
        }
    }
    Ok(totals)
}

/// 전체 예측 기간의 매출 합계.
pub fn grand_total(projection: &AggregateProjection) -> YearlyRevenue {
    projection
        .values()
        .fold(YearlyRevenue::default(), |mut acc, revenue| {
            acc += *revenue;
            acc
        })
}

/// 세그먼트별 총매출 비중(%). 전체 합이 0이면 모두 0이다.
pub fn revenue_shares(totals: &BTreeMap<String, YearlyRevenue>) -> BTreeMap<String, f64> {
    let sum: f64 = totals.values().map(|r| r.total_revenue).sum();
    totals
        .iter()
        .map(|(key, revenue)| {
            let share = if sum != 0.0 {
                revenue.total_revenue / sum * 100.0
            } else {
                0.0
            };
            (key.clone(), share)
        })
        .collect()
}
