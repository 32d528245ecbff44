use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::{self, Config, ConfigError, DataFiles, TableKind};
use crate::loader::{self, LoadError};
use crate::params::{split_assignment, ParameterError};
use crate::report;
use crate::revenue::summary::sum_segments_over_years;
use crate::revenue::{compute_aggregate_revenue, compute_segmented_revenue, RevenueError};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 입력 파일 로드 오류
    #[error("입력 파일 오류: {0}")]
    Load(#[from] LoadError),
    /// 파라미터 검증 오류
    #[error("파라미터 오류: {0}")]
    Parameter(#[from] ParameterError),
    /// 매출 계산 오류
    #[error("계산 오류: {0}")]
    Revenue(#[from] RevenueError),
    /// JSON 직렬화 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 데이터 디렉터리에 없는 파일
    #[error("파일을 찾을 수 없음: {0}")]
    FileNotFound(PathBuf),
}

/// 명령줄 인자에 따라 한 번 실행한다.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let stored = config::load_or_default(&cli.config)?;
    let mut cfg = stored.clone();
    apply_cli_overrides(&mut cfg, &cli.overrides)?;

    match cli.get_command() {
        Commands::Params => println!("{}", report::parameters_table(&cfg.parameters)),
        Commands::Aggregate { json } => show_aggregate(&cfg, json)?,
        Commands::Segments { start, end, json } => show_segments(&cfg, start, end, json)?,
        Commands::Files => show_files(&cfg.data)?,
        Commands::View { file } => view_file(&cfg.data, &file)?,
        Commands::Import { source, kind } => {
            let target = import_file(&cfg.data, &source, kind)?;
            println!("저장됨: {}", target.display());
        }
        Commands::Interactive => {
            ui_cli::run(&mut ui_cli::Session::new(stored, cfg), &cli.config)?
        }
    }
    Ok(())
}

/// `--set 이름=값` 인자를 설정의 파라미터에 적용한다. 저장은 하지 않는다.
pub fn apply_cli_overrides(cfg: &mut Config, overrides: &[String]) -> Result<(), AppError> {
    let pairs = overrides
        .iter()
        .map(|arg| split_assignment(arg))
        .collect::<Result<Vec<_>, _>>()?;
    cfg.parameters.apply_overrides(pairs)?;
    Ok(())
}

/// 입력 데이터가 비어 있으면 오류 대신 "데이터 없음" 안내를 출력한다.
fn report_missing_input<T>(result: Result<T, RevenueError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RevenueError::MissingInput(table)) => {
            println!("데이터 없음: {table} 파일을 먼저 업로드하세요.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn show_aggregate(cfg: &Config, json: bool) -> Result<(), AppError> {
    let tables = loader::load_input_tables(&cfg.data)?;
    let result = compute_aggregate_revenue(
        &cfg.parameters,
        &tables.installed_base,
        &tables.tariffs,
        &tables.sales,
    );
    let Some(projection) = report_missing_input(result)? else {
        return Ok(());
    };
    if json {
        println!("{}", report::to_json(&projection)?);
    } else {
        println!("{}", report::aggregate_table(&projection));
    }
    Ok(())
}

pub fn show_segments(cfg: &Config, start: u16, end: u16, json: bool) -> Result<(), AppError> {
    let tables = loader::load_input_tables(&cfg.data)?;
    let result = compute_segmented_revenue(
        &cfg.parameters,
        &tables.installed_base,
        &tables.tariffs,
        &tables.sales,
    );
    let Some(projection) = report_missing_input(result)? else {
        return Ok(());
    };
    let totals = sum_segments_over_years(&projection, start..=end)?;
    if json {
        println!("{}", report::to_json(&projection)?);
    } else {
        println!("{start}~{end}년 세그먼트별 매출");
        println!("{}", report::segment_totals_table(&totals));
    }
    Ok(())
}

/// 데이터 디렉터리의 파일 이름 목록(정렬됨). 디렉터리가 없으면 빈 목록.
pub fn list_files(data: &DataFiles) -> Result<Vec<String>, AppError> {
    if !data.dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(&data.dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

pub fn show_files(data: &DataFiles) -> Result<(), AppError> {
    let names = list_files(data)?;
    if names.is_empty() {
        println!("{} 에 파일이 없습니다.", data.dir.display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn view_file(data: &DataFiles, file: &str) -> Result<(), AppError> {
    let path = data_file_path(data, file)?;
    let range = loader::read_sheet(&path)?;
    println!("{}", report::sheet_table(&range));
    Ok(())
}

/// 데이터 디렉터리 안의 파일 경로. 경로 구분자가 섞인 이름은 받지 않는다.
fn data_file_path(data: &DataFiles, file: &str) -> Result<PathBuf, AppError> {
    let name = Path::new(file);
    let path = match name.file_name() {
        Some(n) if n == name.as_os_str() => data.dir.join(n),
        _ => return Err(AppError::FileNotFound(PathBuf::from(file))),
    };
    if !path.is_file() {
        return Err(AppError::FileNotFound(path));
    }
    Ok(path)
}

/// 외부 파일을 데이터 디렉터리로 복사한다. 종류를 지정하면 기본 파일 이름으로 저장한다.
pub fn import_file(
    data: &DataFiles,
    source: &Path,
    kind: Option<TableKind>,
) -> Result<PathBuf, AppError> {
    if !source.is_file() {
        return Err(AppError::FileNotFound(source.to_path_buf()));
    }
    let target = match kind {
        Some(kind) => data.path_of(kind),
        None => match source.file_name() {
            Some(name) => data.dir.join(name),
            None => return Err(AppError::FileNotFound(source.to_path_buf())),
        },
    };
    fs::create_dir_all(&data.dir)?;
    fs::copy(source, &target)?;
    info!(source = %source.display(), target = %target.display(), "file imported");
    Ok(target)
}
