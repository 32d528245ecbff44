//! 스프레드시트 입력(설치 기반, 요금/이탈률, 판매)을 읽어 표로 변환한다.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DataFiles;
use crate::tables::{InputTables, InstalledBaseRow, SalesRow, TariffRow};
use crate::year::{parse_year_column, YearValues};

/// 입력 파일 로드 오류.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("스프레드시트 열기 실패 ({path}): {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("워크시트가 없음: {0}")]
    NoWorksheet(PathBuf),
    #[error("{source_name}: 필수 컬럼 `{column}` 이 없음")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
    #[error("{source_name}: {row}행 `{column}` 값이 숫자가 아님: {value}")]
    InvalidNumber {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// 설정된 데이터 디렉터리에서 세 입력 표를 모두 읽는다.
///
/// 파일이 없으면 해당 표는 비어 있는 것으로 처리한다.
pub fn load_input_tables(files: &DataFiles) -> Result<InputTables, LoadError> {
    let installed_base = match read_optional(&files.installed_base_path())? {
        Some((name, range)) => installed_base_from_range(&range, &name)?,
        None => Vec::new(),
    };
    let tariffs = match read_optional(&files.tariffs_path())? {
        Some((name, range)) => tariffs_from_range(&range, &name)?,
        None => Vec::new(),
    };
    let sales = match read_optional(&files.sales_path())? {
        Some((name, range)) => sales_from_range(&range, &name)?,
        None => Vec::new(),
    };
    info!(
        installed_base = installed_base.len(),
        tariffs = tariffs.len(),
        sales = sales.len(),
        "input tables loaded"
    );
    Ok(InputTables {
        installed_base,
        tariffs,
        sales,
    })
}

fn read_optional(path: &Path) -> Result<Option<(String, Range<Data>)>, LoadError> {
    if !path.exists() {
        warn!(path = %path.display(), "input file not found, using empty table");
        return Ok(None);
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Some((name, read_sheet(path)?)))
}

/// 스프레드시트의 첫 번째 워크시트를 읽는다.
pub fn read_sheet(path: &Path) -> Result<Range<Data>, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet(path.to_path_buf()))?
        .map_err(|source| LoadError::Workbook {
            path: path.to_path_buf(),
            source,
        })
}

/// 헤더 행(첫 행)에서 컬럼 위치를 찾는다.
struct Header {
    source_name: String,
    names: Vec<String>,
    index: HashMap<String, usize>,
    years: Vec<(u16, usize)>,
}

impl Header {
    fn parse(row: &[Data], source_name: &str) -> Self {
        let names: Vec<String> = row
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect();
        let mut index = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        let years = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| parse_year_column(name).map(|y| (y, i)))
            .collect();
        Self {
            source_name: source_name.to_string(),
            names,
            index,
            years,
        }
    }

    fn require(&self, column: &'static str) -> Result<usize, LoadError> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn {
                source_name: self.source_name.clone(),
                column,
            })
    }

    /// 엑셀 기준 행 번호(헤더가 1행)
    fn number(
        &self,
        row: &[Data],
        row_no: usize,
        col: usize,
    ) -> Result<Option<f64>, LoadError> {
        let cell = row.get(col).unwrap_or(&Data::Empty);
        cell_number(cell).map_err(|value| LoadError::InvalidNumber {
            source_name: self.source_name.clone(),
            row: row_no,
            column: self.names.get(col).cloned().unwrap_or_default(),
            value,
        })
    }

    fn required_number(
        &self,
        row: &[Data],
        row_no: usize,
        col: usize,
    ) -> Result<f64, LoadError> {
        self.number(row, row_no, col)?
            .ok_or_else(|| LoadError::InvalidNumber {
                source_name: self.source_name.clone(),
                row: row_no,
                column: self.names.get(col).cloned().unwrap_or_default(),
                value: "(빈 칸)".to_string(),
            })
    }

    fn year_values(&self, row: &[Data], row_no: usize) -> Result<YearValues, LoadError> {
        let mut values = YearValues::new();
        for &(year, col) in &self.years {
            if let Some(v) = self.number(row, row_no, col)? {
                values.insert(year, v);
            }
        }
        Ok(values)
    }
}

/// 헤더를 제외한 데이터 행. 완전히 빈 행은 건너뛴다.
fn data_rows(range: &Range<Data>) -> impl Iterator<Item = (usize, &[Data])> + '_ {
    range
        .rows()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(i, row)| (i + 1, row))
}

fn text_at(row: &[Data], col: usize) -> String {
    row.get(col).and_then(cell_text).unwrap_or_default()
}

/// 설치 기반 표: `segment`, `subsegment`, `year_<YYYY>`...
pub fn installed_base_from_range(
    range: &Range<Data>,
    source_name: &str,
) -> Result<Vec<InstalledBaseRow>, LoadError> {
    let Some(header_row) = range.rows().next() else {
        return Ok(Vec::new());
    };
    let header = Header::parse(header_row, source_name);
    let segment = header.require("segment")?;
    let subsegment = header.require("subsegment")?;

    data_rows(range)
        .map(|(row_no, row)| {
            Ok(InstalledBaseRow::new(
                text_at(row, segment),
                text_at(row, subsegment),
                header.year_values(row, row_no)?,
            ))
        })
        .collect()
}

/// 요금/이탈률 표: `segment`, `subsegment`, `ottok`, `tariff`.
pub fn tariffs_from_range(
    range: &Range<Data>,
    source_name: &str,
) -> Result<Vec<TariffRow>, LoadError> {
    let Some(header_row) = range.rows().next() else {
        return Ok(Vec::new());
    };
    let header = Header::parse(header_row, source_name);
    let segment = header.require("segment")?;
    let subsegment = header.require("subsegment")?;
    let ottok = header.require("ottok")?;
    let tariff = header.require("tariff")?;

    data_rows(range)
        .map(|(row_no, row)| {
            Ok(TariffRow::new(
                text_at(row, segment),
                text_at(row, subsegment),
                header.required_number(row, row_no, ottok)?,
                header.required_number(row, row_no, tariff)?,
            ))
        })
        .collect()
}

/// 판매 표: 첫 컬럼은 식별자, 나머지 중 `year_<YYYY>` 컬럼이 연도별 판매 대수.
pub fn sales_from_range(range: &Range<Data>, source_name: &str) -> Result<Vec<SalesRow>, LoadError> {
    let Some(header_row) = range.rows().next() else {
        return Ok(Vec::new());
    };
    let header = Header::parse(header_row, source_name);

    data_rows(range)
        .map(|(row_no, row)| Ok(SalesRow::new(text_at(row, 0), header.year_values(row, row_no)?)))
        .collect()
}

/// 셀을 문자열로. 빈 셀은 `None`.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

/// 셀을 숫자로. 빈 셀은 `Ok(None)`, 숫자로 해석할 수 없으면 원래 값을 담은 `Err`.
pub fn cell_number(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Int(i) => Ok(Some(*i as f64)),
        Data::Float(f) => Ok(Some(*f)),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| s.clone()),
        other => Err(other.to_string()),
    }
}
