use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{TableKind, DEFAULT_CONFIG_PATH};
use crate::year::{FIRST_YEAR, LAST_YEAR};

#[derive(Parser, Debug)]
#[command(name = "terminal_revenue_toolbox", version, about = "단말 판매/임대/통신 매출 예측 도구")]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// 이번 실행에만 적용할 파라미터 (예: --set cost_AT=350000). 여러 번 지정 가능.
    #[arg(long = "set", value_name = "NAME=VALUE", global = true)]
    pub overrides: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 현재 파라미터 표시
    Params,

    /// 연도별 전체 매출 계산
    Aggregate {
        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 세그먼트별 매출을 연도 구간으로 합산
    Segments {
        /// 시작 연도
        #[arg(long, default_value_t = FIRST_YEAR)]
        start: u16,

        /// 끝 연도(포함)
        #[arg(long, default_value_t = LAST_YEAR)]
        end: u16,

        /// 연도별 세그먼트 결과 전체를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 데이터 디렉터리의 파일 목록
    Files,

    /// 데이터 디렉터리의 스프레드시트 내용 보기
    View {
        /// 파일 이름
        file: String,
    },

    /// 외부 스프레드시트를 데이터 디렉터리로 복사
    Import {
        /// 원본 파일 경로
        source: PathBuf,

        /// 지정하면 해당 표의 기본 파일 이름으로 저장
        #[arg(long, value_enum)]
        kind: Option<TableKind>,
    },

    /// 대화형 메뉴 (기본값)
    Interactive,
}

impl Cli {
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}
