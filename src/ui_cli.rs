use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::app::{self, AppError};
use crate::config::Config;
use crate::params::{ParameterError, ParameterName};
use crate::report;
use crate::year::{FIRST_YEAR, LAST_YEAR};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Parameters,
    Aggregate,
    Segments,
    Files,
    ViewFile,
    Exit,
}

/// 메뉴에서 쓰는 설정 두 벌.
///
/// `working` 은 `--set` 값까지 적용된 계산용 설정이고, `stored` 는 파일에서 읽은 그대로의 설정이다.
/// 메뉴에서 수정한 파라미터만 양쪽에 반영되며, 저장되는 것은 `stored` 뿐이다.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    stored: Config,
    working: Config,
}

impl Session {
    pub fn new(stored: Config, working: Config) -> Self {
        Self { stored, working }
    }

    pub fn config(&self) -> &Config {
        &self.working
    }

    /// 메뉴에서 입력한 값을 검증해 두 설정 모두에 적용한다.
    pub fn apply_parameter(&mut self, key: &str, raw: &str) -> Result<(), ParameterError> {
        self.working.parameters.apply_override(key, raw)?;
        self.stored.parameters.apply_override(key, raw)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        self.stored.save(path)?;
        Ok(())
    }
}

/// 표준 입력으로 메뉴 루프를 실행한다.
pub fn run(session: &mut Session, config_path: &Path) -> Result<(), AppError> {
    let stdin = io::stdin();
    run_with(&mut stdin.lock(), session, config_path)
}

/// 메뉴 루프. 종료(또는 입력 끝)하면 메뉴에서 바꾼 파라미터를 설정 파일에 저장한다.
pub fn run_with(
    input: &mut impl BufRead,
    session: &mut Session,
    config_path: &Path,
) -> Result<(), AppError> {
    loop {
        let outcome = match main_menu(input)? {
            MenuChoice::Parameters => handle_parameters(input, session),
            MenuChoice::Aggregate => app::show_aggregate(session.config(), false),
            MenuChoice::Segments => handle_segments(input, session.config()),
            MenuChoice::Files => app::show_files(&session.config().data),
            MenuChoice::ViewFile => handle_view_file(input, session.config()),
            MenuChoice::Exit => {
                session.save(config_path)?;
                println!("종료합니다.");
                break;
            }
        };
        // 메뉴 안의 오류는 알리고 계속 진행한다. 입출력 오류만 루프를 끝낸다.
        match outcome {
            Ok(()) => {}
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => println!("오류: {e}"),
        }
    }
    Ok(())
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu(input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("\n=== Terminal Revenue Toolbox ===");
    println!("1) 파라미터 보기/수정");
    println!("2) 연도별 매출 계산");
    println!("3) 세그먼트별 매출 계산");
    println!("4) 데이터 파일 목록");
    println!("5) 파일 내용 보기");
    println!("0) 종료");
    loop {
        let Some(sel) = read_line(input, "메뉴 선택: ")? else {
            return Ok(MenuChoice::Exit);
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Parameters),
        "2" => Some(MenuChoice::Aggregate),
        "3" => Some(MenuChoice::Segments),
        "4" => Some(MenuChoice::Files),
        "5" => Some(MenuChoice::ViewFile),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 파라미터를 보여주고 이름/값을 입력받아 수정한다. 빈 입력이면 돌아간다.
fn handle_parameters(input: &mut impl BufRead, session: &mut Session) -> Result<(), AppError> {
    loop {
        println!("\n-- 파라미터 --");
        println!("{}", report::parameters_table(&session.config().parameters));
        let key = read_line(input, "수정할 이름(돌아가려면 엔터): ")?.unwrap_or_default();
        if key.trim().is_empty() {
            return Ok(());
        }
        let Some(name) = ParameterName::from_key(key.trim()) else {
            println!("알 수 없는 파라미터입니다: {}", key.trim());
            continue;
        };
        let raw = read_line(input, &format!("{} 새 값: ", name.label()))?.unwrap_or_default();
        match session.apply_parameter(name.key(), &raw) {
            Ok(()) => println!("{} = {}", name.key(), session.config().parameters.get(name)),
            Err(e) => println!("{e}"),
        }
    }
}

fn handle_segments(input: &mut impl BufRead, cfg: &Config) -> Result<(), AppError> {
    println!("\n-- 세그먼트별 매출 --");
    let start = read_year(input, "시작 연도", FIRST_YEAR)?;
    let end = read_year(input, "끝 연도", LAST_YEAR)?;
    app::show_segments(cfg, start, end, false)
}

fn handle_view_file(input: &mut impl BufRead, cfg: &Config) -> Result<(), AppError> {
    app::show_files(&cfg.data)?;
    let name = read_line(input, "파일 이름: ")?.unwrap_or_default();
    if name.trim().is_empty() {
        return Ok(());
    }
    app::view_file(&cfg.data, name.trim())
}

/// 한 줄을 읽는다. 입력이 끝났으면 `None`.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(buf))
}

/// 빈 입력이나 입력 끝이면 기본 연도.
fn read_year(input: &mut impl BufRead, label: &str, default: u16) -> Result<u16, AppError> {
    loop {
        let Some(line) = read_line(input, &format!("{label} [{default}]: "))? else {
            return Ok(default);
        };
        let s = line.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u16>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("연도를 숫자로 입력하세요."),
        }
    }
}
