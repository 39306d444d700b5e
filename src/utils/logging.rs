//! 로그 초기화
//!
//! 터미널은 TUI가 점유하므로 로그는 파일로만 기록한다.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "diredit=info";

/// 로그 파일 경로 (`DIREDIT_LOG_FILE` 우선, 없으면 `~/.diredit/diredit.log`)
pub fn log_file_path() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("DIREDIT_LOG_FILE") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir().map(|home| home.join(".diredit").join("diredit.log"))
}

/// tracing subscriber 초기화
///
/// 로그 파일을 열 수 없으면 조용히 로그를 끈다.
pub fn init_tracing() {
    let Some(path) = log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
