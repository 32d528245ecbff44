use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use terminal_revenue_toolbox::{app, cli, init_tracing};

/// 프로그램의 엔트리 포인트. 로그를 초기화한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    let args = cli::Cli::parse();
    init_tracing();
    match try_run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: &cli::Cli) -> Result<()> {
    app::run(args).with_context(|| format!("설정 파일: {}", args.config.display()))?;
    Ok(())
}
