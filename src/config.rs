use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::params::ParameterSet;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력 표 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    InstalledBase,
    Tariffs,
    Sales,
}

/// 입력 스프레드시트 위치.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    /// 업로드된 파일이 모이는 디렉터리
    pub dir: PathBuf,
    pub installed_base: String,
    pub tariffs: String,
    pub sales: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            installed_base: "baza_at.xlsx".to_string(),
            tariffs: "tariffs_and_ottok.xlsx".to_string(),
            sales: "sales.xlsx".to_string(),
        }
    }
}

impl DataFiles {
    pub fn file_name(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::InstalledBase => &self.installed_base,
            TableKind::Tariffs => &self.tariffs,
            TableKind::Sales => &self.sales,
        }
    }

    pub fn path_of(&self, kind: TableKind) -> PathBuf {
        self.dir.join(self.file_name(kind))
    }

    pub fn installed_base_path(&self) -> PathBuf {
        self.path_of(TableKind::InstalledBase)
    }

    pub fn tariffs_path(&self) -> PathBuf {
        self.path_of(TableKind::Tariffs)
    }

    pub fn sales_path(&self) -> PathBuf {
        self.path_of(TableKind::Sales)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataFiles,
    pub parameters: ParameterSet,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "default configuration written");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
