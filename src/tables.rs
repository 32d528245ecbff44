use serde::{Deserialize, Serialize};

use crate::year::YearValues;

/// 세그먼트/서브세그먼트별 설치 단말 수(installed base) 한 행.
///
/// 원본 데이터에서 (segment, subsegment) 쌍이 유일하다는 보장은 없다.
/// 조회 시에는 항상 첫 번째 일치 행을 사용한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledBaseRow {
    pub segment: String,
    pub subsegment: String,
    /// 연도별 설치 단말 수
    pub units: YearValues,
}

/// 세그먼트별 요금/이탈률 한 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRow {
    pub segment: String,
    pub subsegment: String,
    /// 이탈률(ottok), 0~1 비율. 범위 검증은 하지 않는다.
    pub churn_rate: f64,
    /// 단말당 요금
    pub tariff: f64,
}

/// 판매 코호트 한 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    /// 첫 번째 컬럼의 식별자
    pub id: String,
    /// 연도별 판매 대수
    pub units: YearValues,
}

/// 모델 계산에 필요한 세 입력 표.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTables {
    pub installed_base: Vec<InstalledBaseRow>,
    pub tariffs: Vec<TariffRow>,
    pub sales: Vec<SalesRow>,
}

/// (segment, subsegment)가 정확히 일치하는 첫 번째 설치 기반 행을 찾는다.
pub fn find_installed_base<'a>(
    rows: &'a [InstalledBaseRow],
    segment: &str,
    subsegment: &str,
) -> Option<&'a InstalledBaseRow> {
    rows.iter()
        .find(|row| row.segment == segment && row.subsegment == subsegment)
}

/// 특정 연도의 판매 대수 합계. 어떤 행에도 해당 연도 값이 없으면 0이다.
pub fn total_sales_for_year(rows: &[SalesRow], year: u16) -> f64 {
    rows.iter().filter_map(|row| row.units.get(year)).sum()
}

impl InstalledBaseRow {
    pub fn new(segment: impl Into<String>, subsegment: impl Into<String>, units: YearValues) -> Self {
        Self {
            segment: segment.into(),
            subsegment: subsegment.into(),
            units,
        }
    }
}

impl TariffRow {
    pub fn new(
        segment: impl Into<String>,
        subsegment: impl Into<String>,
        churn_rate: f64,
        tariff: f64,
    ) -> Self {
        Self {
            segment: segment.into(),
            subsegment: subsegment.into(),
            churn_rate,
            tariff,
        }
    }
}

impl SalesRow {
    pub fn new(id: impl Into<String>, units: YearValues) -> Self {
        Self {
            id: id.into(),
            units,
        }
    }
}
