use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// 예측 첫 해.
pub const FIRST_YEAR: u16 = 2026;
/// 예측 마지막 해(포함).
pub const LAST_YEAR: u16 = 2040;

const YEAR_COLUMN_PREFIX: &str = "year_";

/// 예측 대상 연도 범위. 데이터와 무관하게 고정이다.
pub fn projection_years() -> RangeInclusive<u16> {
    FIRST_YEAR..=LAST_YEAR
}

/// `year_2026` 형태의 컬럼명에서 연도를 꺼낸다.
pub fn parse_year_column(name: &str) -> Option<u16> {
    let digits = name.trim().strip_prefix(YEAR_COLUMN_PREFIX)?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// 연도별 값을 담는 희소 맵. 값이 없는 연도는 0이 아니라 "없음"으로 구분된다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearValues(BTreeMap<u16, f64>);

impl YearValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: u16) -> Option<f64> {
        self.0.get(&year).copied()
    }

    /// 값이 없으면 0을 돌려준다.
    pub fn get_or_zero(&self, year: u16) -> f64 {
        self.get(year).unwrap_or(0.0)
    }

    pub fn insert(&mut self, year: u16, value: f64) {
        self.0.insert(year, value);
    }
}

impl FromIterator<(u16, f64)> for YearValues {
    fn from_iter<T: IntoIterator<Item = (u16, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
