//! 단말 판매/임대/통신 매출 예측 모델.

pub mod aggregate;
pub mod segmented;
pub mod summary;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ParameterSet;

pub use aggregate::compute_aggregate_revenue;
pub use segmented::compute_segmented_revenue;

/// 한 해(또는 한 세그먼트)의 매출 내역.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyRevenue {
    pub sales_revenue: f64,
    pub rental_revenue: f64,
    pub connection_revenue: f64,
    /// 항상 세 항목의 합
    pub total_revenue: f64,
}

impl YearlyRevenue {
    pub fn from_parts(sales_revenue: f64, rental_revenue: f64, connection_revenue: f64) -> Self {
        Self {
            sales_revenue,
            rental_revenue,
            connection_revenue,
            total_revenue: sales_revenue + rental_revenue + connection_revenue,
        }
    }
}

impl AddAssign for YearlyRevenue {
    fn add_assign(&mut self, rhs: Self) {
        self.sales_revenue += rhs.sales_revenue;
        self.rental_revenue += rhs.rental_revenue;
        self.connection_revenue += rhs.connection_revenue;
        self.total_revenue += rhs.total_revenue;
    }
}

/// 연도 -> 매출.
pub type AggregateProjection = BTreeMap<u16, YearlyRevenue>;

/// 연도 -> ("segment - subsegment" -> 매출).
pub type SegmentedProjection = BTreeMap<u16, BTreeMap<String, YearlyRevenue>>;

/// 비어 있는 입력 표 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTable {
    InstalledBase,
    Tariffs,
    Sales,
}

impl fmt::Display for MissingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingTable::InstalledBase => write!(f, "설치 기반(installed base)"),
            MissingTable::Tariffs => write!(f, "요금/이탈률(tariffs)"),
            MissingTable::Sales => write!(f, "판매(sales)"),
        }
    }
}

/// 매출 계산 오류.
#[derive(Debug, Error, PartialEq)]
pub enum RevenueError {
    /// 필요한 입력 표가 없거나 비어 있음
    #[error("입력 데이터 없음: {0} 표가 비어 있음")]
    MissingInput(MissingTable),
    /// 요청 연도가 예측 범위 밖
    #[error("예측 범위를 벗어난 연도: {0}")]
    YearOutOfRange(u16),
}

/// 요금에 인상률을 적용한다.
///
/// 실제 연도와 관계없이 `indexation_russia_2024`만 사용한다.
pub fn indexed_rate(tariff: f64, params: &ParameterSet) -> f64 {
    tariff * (1.0 + params.indexation_russia_2024 / 100.0)
}

/// 이탈률을 반영한 통신 매출.
pub(crate) fn connection_revenue(num_terminals: f64, indexed_rate: f64, churn_rate: f64) -> f64 {
    num_terminals * indexed_rate * (1.0 - churn_rate)
}

/// 임대 단말의 연간 임대 매출.
pub(crate) fn annual_rental_revenue(terminals_for_rent: f64, params: &ParameterSet) -> f64 {
    terminals_for_rent * params.monthly_rent * 12.0
}

pub fn segment_key(segment: &str, subsegment: &str) -> String {
    format!("{segment} - {subsegment}")
}
