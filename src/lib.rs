//! 핵심 매출 계산 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod params;
pub mod report;
pub mod revenue;
pub mod tables;
pub mod ui_cli;
pub mod year;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 로그 출력을 초기화한다. `RUST_LOG`가 없으면 경고 이상만 stderr로 출력한다.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
