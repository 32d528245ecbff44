use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 매출 모델의 재무 파라미터 묶음.
///
/// 설정 파일과 외부 입력에서는 원래의 이름(`cost_AT`, `rental_share` 등)을 그대로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// 단말(AT) 1대 가격
    #[serde(rename = "cost_AT")]
    pub unit_cost: f64,
    /// 임대 비중(%)
    #[serde(rename = "rental_share")]
    pub rental_share_pct: f64,
    /// 판매 비중(%)
    #[serde(rename = "sales_share")]
    pub sales_share_pct: f64,
    /// 월 임대료
    pub monthly_rent: f64,
    /// 연 임대료. 계산에는 쓰이지 않는다.
    pub annual_rent: f64,
    /// 2024년 러시아 요금 인상률(%). 모든 연도에 동일하게 적용된다.
    pub indexation_russia_2024: f64,
    pub indexation_russia_2025: f64,
    pub indexation_foreign_2024: f64,
    pub indexation_foreign_2025: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            unit_cost: 300_000.0,
            rental_share_pct: 80.0,
            sales_share_pct: 20.0,
            monthly_rent: 9_491.0,
            annual_rent: 113_893.0,
            indexation_russia_2024: 5.0,
            indexation_russia_2025: 5.0,
            indexation_foreign_2024: 0.0,
            indexation_foreign_2025: 2.0,
        }
    }
}

/// 외부에서 지정 가능한 파라미터 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterName {
    UnitCost,
    RentalShare,
    SalesShare,
    MonthlyRent,
    AnnualRent,
    IndexationRussia2024,
    IndexationRussia2025,
    IndexationForeign2024,
    IndexationForeign2025,
}

impl ParameterName {
    pub const ALL: [ParameterName; 9] = [
        ParameterName::UnitCost,
        ParameterName::RentalShare,
        ParameterName::SalesShare,
        ParameterName::MonthlyRent,
        ParameterName::AnnualRent,
        ParameterName::IndexationRussia2024,
        ParameterName::IndexationRussia2025,
        ParameterName::IndexationForeign2024,
        ParameterName::IndexationForeign2025,
    ];

    /// 외부 입력에서 쓰는 키.
    pub fn key(self) -> &'static str {
        match self {
            ParameterName::UnitCost => "cost_AT",
            ParameterName::RentalShare => "rental_share",
            ParameterName::SalesShare => "sales_share",
            ParameterName::MonthlyRent => "monthly_rent",
            ParameterName::AnnualRent => "annual_rent",
            ParameterName::IndexationRussia2024 => "indexation_russia_2024",
            ParameterName::IndexationRussia2025 => "indexation_russia_2025",
            ParameterName::IndexationForeign2024 => "indexation_foreign_2024",
            ParameterName::IndexationForeign2025 => "indexation_foreign_2025",
        }
    }

    /// 화면 표시용 설명.
    pub fn label(self) -> &'static str {
        match self {
            ParameterName::UnitCost => "단말 가격",
            ParameterName::RentalShare => "임대 비중 (%)",
            ParameterName::SalesShare => "판매 비중 (%)",
            ParameterName::MonthlyRent => "월 임대료",
            ParameterName::AnnualRent => "연 임대료",
            ParameterName::IndexationRussia2024 => "러시아 요금 인상률 2024 (%)",
            ParameterName::IndexationRussia2025 => "러시아 요금 인상률 2025 (%)",
            ParameterName::IndexationForeign2024 => "해외 요금 인상률 2024 (%)",
            ParameterName::IndexationForeign2025 => "해외 요금 인상률 2025 (%)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

/// 파라미터 입력 검증 오류.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("알 수 없는 파라미터: {0}")]
    UnknownParameter(String),
    #[error("파라미터 {0} 의 값이 비어 있음")]
    MissingValue(&'static str),
    #[error("파라미터 {name} 의 값이 숫자가 아님: {value:?}")]
    NotNumeric { name: &'static str, value: String },
    #[error("`이름=값` 형식이 아님: {0:?}")]
    MalformedAssignment(String),
}

impl ParameterSet {
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::UnitCost => self.unit_cost,
            ParameterName::RentalShare => self.rental_share_pct,
            ParameterName::SalesShare => self.sales_share_pct,
            ParameterName::MonthlyRent => self.monthly_rent,
            ParameterName::AnnualRent => self.annual_rent,
            ParameterName::IndexationRussia2024 => self.indexation_russia_2024,
            ParameterName::IndexationRussia2025 => self.indexation_russia_2025,
            ParameterName::IndexationForeign2024 => self.indexation_foreign_2024,
            ParameterName::IndexationForeign2025 => self.indexation_foreign_2025,
        }
    }

    pub fn set(&mut self, name: ParameterName, value: f64) {
        let slot = match name {
            ParameterName::UnitCost => &mut self.unit_cost,
            ParameterName::RentalShare => &mut self.rental_share_pct,
            ParameterName::SalesShare => &mut self.sales_share_pct,
            ParameterName::MonthlyRent => &mut self.monthly_rent,
            ParameterName::AnnualRent => &mut self.annual_rent,
            ParameterName::IndexationRussia2024 => &mut self.indexation_russia_2024,
            ParameterName::IndexationRussia2025 => &mut self.indexation_russia_2025,
            ParameterName::IndexationForeign2024 => &mut self.indexation_foreign_2024,
            ParameterName::IndexationForeign2025 => &mut self.indexation_foreign_2025,
        };
        *slot = value;
    }

    /// 이름/값 한 쌍을 검증하고 적용한다.
    pub fn apply_override(&mut self, key: &str, raw: &str) -> Result<(), ParameterError> {
        let (name, value) = parse_override(key, raw)?;
        self.set(name, value);
        Ok(())
    }

    /// 여러 개의 이름/값 쌍을 적용한다.
    ///
    /// 모든 쌍을 먼저 검증하므로 하나라도 실패하면 아무 값도 바뀌지 않는다.
    /// 목록에 없는 파라미터는 기존 값을 유지한다.
    pub fn apply_overrides<I, K, V>(&mut self, pairs: I) -> Result<(), ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = pairs
            .into_iter()
            .map(|(k, v)| parse_override(k.as_ref(), v.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, value) in parsed {
            self.set(name, value);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, f64)> + '_ {
        ParameterName::ALL.into_iter().map(|name| (name, self.get(name)))
    }
}

/// 이름과 원시 문자열 값을 검증해 숫자로 바꾼다.
pub fn parse_override(key: &str, raw: &str) -> Result<(ParameterName, f64), ParameterError> {
    let name = ParameterName::from_key(key.trim())
        .ok_or_else(|| ParameterError::UnknownParameter(key.trim().to_string()))?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParameterError::MissingValue(name.key()));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok((name, v)),
        _ => Err(ParameterError::NotNumeric {
            name: name.key(),
            value: raw.to_string(),
        }),
    }
}

/// CLI의 `이름=값` 인자를 나눈다.
pub fn split_assignment(arg: &str) -> Result<(String, String), ParameterError> {
    match arg.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(ParameterError::MalformedAssignment(arg.to_string())),
    }
}
