//! 설정 파일
//!
//! `DIREDIT_SETTINGS_FILE`이 있으면 그 경로, 없으면 `~/.diredit/settings.toml`.
//! 알 수 없거나 빠진 필드는 기본값을 쓴다.

use crate::core::actions::parse_key_code;
use crate::core::completion::CaseSensitivity;
use crate::core::normalizer::Separator;
use crate::models::DirectoryEditOptions;
use crate::utils::error::{DirEditError, Result};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_VERSION: u32 = 1;
pub const SETTINGS_ENV: &str = "DIREDIT_SETTINGS_FILE";

/// 구분자 설정값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorSetting {
    /// 호스트 플랫폼 기본값
    #[default]
    Native,
    Slash,
    Backslash,
}

impl SeparatorSetting {
    pub fn resolve(self) -> Separator {
        match self {
            SeparatorSetting::Native => Separator::native(),
            SeparatorSetting::Slash => Separator::Slash,
            SeparatorSetting::Backslash => Separator::Backslash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub theme: String,
    pub label: String,
    pub separator: SeparatorSetting,
    /// 자동완성 수락 키 이름 (`tab`, `right`, `f5`, ...)
    pub accept_key: String,
    pub completion_delay_ms: u64,
    pub case_sensitive: bool,
    pub show_hidden: bool,
    pub history_enabled: bool,
    /// 저장할 히스토리 최대 개수
    pub max_history: usize,
    pub history: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            theme: "dark".to_string(),
            label: "Directory:".to_string(),
            separator: SeparatorSetting::Native,
            accept_key: "tab".to_string(),
            completion_delay_ms: 10,
            case_sensitive: false,
            show_hidden: false,
            history_enabled: true,
            max_history: 50,
            history: Vec::new(),
        }
    }
}

impl Settings {
    /// 기본 설정 파일 경로
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".diredit").join("settings.toml"))
    }

    pub fn encode(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DirEditError::Config(e.to_string()))
    }

    /// 버전이 다르거나 파싱할 수 없으면 None
    pub fn decode(data: &str) -> Option<Self> {
        let parsed: Settings = toml::from_str(data).ok()?;
        if parsed.version != SETTINGS_VERSION {
            return None;
        }
        Some(parsed)
    }

    /// 파일에서 읽기. 파일이 없거나 깨졌으면 기본값.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings");
                return Self::default();
            }
        };

        match Self::decode(&data) {
            Some(settings) => {
                tracing::info!(path = %path.display(), "settings loaded");
                settings
            }
            None => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.encode()?)?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// 수락 키. 해석할 수 없으면 Tab.
    pub fn accept_key_code(&self) -> KeyCode {
        parse_key_code(&self.accept_key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to Tab as accept key");
            KeyCode::Tab
        })
    }

    /// 입력 위젯 옵션으로 변환
    pub fn edit_options(&self) -> DirectoryEditOptions {
        let case_sensitivity = if self.case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        };
        DirectoryEditOptions::new()
            .separator(self.separator.resolve())
            .accept_key(self.accept_key_code())
            .history(self.history_enabled)
            .completion_delay(Duration::from_millis(self.completion_delay_ms))
            .case_sensitivity(case_sensitivity)
            .show_hidden(self.show_hidden)
    }
}
