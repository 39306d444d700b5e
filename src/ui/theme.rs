use crate::utils::error::{DirEditError, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 색상 테마
///
/// TOML 파일에서 테마를 로드하거나 미리 정의된 테마를 사용할 수 있다.
/// 입력 필드의 유효/무효 배경색이 위젯의 시각 피드백이다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 입력 위젯
    pub label_fg: ColorDef,
    pub input_bg: ColorDef,
    pub input_invalid_bg: ColorDef,
    pub input_fg: ColorDef,
    pub input_invalid_fg: ColorDef,
    pub placeholder_fg: ColorDef,
    pub button_bg: ColorDef,
    pub button_fg: ColorDef,
    pub button_focus_bg: ColorDef,
    pub button_focus_fg: ColorDef,

    // 자동완성 팝업 / 찾아보기 다이얼로그
    pub popup_bg: ColorDef,
    pub popup_fg: ColorDef,
    pub popup_selected_bg: ColorDef,
    pub popup_selected_fg: ColorDef,
    pub dialog_border: ColorDef,

    // 바
    pub caption_bar_bg: ColorDef,
    pub caption_bar_fg: ColorDef,
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(hex) => parse_hex_color(hex),
            ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            label_fg: "#d4d4d4".into(),
            input_bg: "#3c3c3c".into(),
            input_invalid_bg: "#5a1d1d".into(),
            input_fg: "#ffffff".into(),
            input_invalid_fg: "#ffcccc".into(),
            placeholder_fg: "#808080".into(),
            button_bg: "#3c3c3c".into(),
            button_fg: "#d4d4d4".into(),
            button_focus_bg: "#0078d4".into(),
            button_focus_fg: "#ffffff".into(),

            popup_bg: "#252526".into(),
            popup_fg: "#d4d4d4".into(),
            popup_selected_bg: "#0078d4".into(),
            popup_selected_fg: "#ffffff".into(),
            dialog_border: "#0078d4".into(),

            caption_bar_bg: "#2d2d30".into(),
            caption_bar_fg: "#ffffff".into(),
            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),

            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),

            label_fg: "#1e1e1e".into(),
            input_bg: "#f3f3f3".into(),
            input_invalid_bg: "#ffcccc".into(),
            input_fg: "#000000".into(),
            input_invalid_fg: "#000000".into(),
            placeholder_fg: "#8a8a8a".into(),
            button_bg: "#e1e1e1".into(),
            button_fg: "#1e1e1e".into(),
            button_focus_bg: "#0078d4".into(),
            button_focus_fg: "#ffffff".into(),

            popup_bg: "#f3f3f3".into(),
            popup_fg: "#1e1e1e".into(),
            popup_selected_bg: "#add6ff".into(),
            popup_selected_fg: "#000000".into(),
            dialog_border: "#0078d4".into(),

            caption_bar_bg: "#0078d4".into(),
            caption_bar_fg: "#ffffff".into(),
            status_bar_bg: "#0078d4".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),

            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// High Contrast 테마
    pub fn high_contrast() -> Self {
        Theme {
            bg_primary: "#000000".into(),
            fg_primary: "#ffffff".into(),

            label_fg: "#ffffff".into(),
            input_bg: "#000000".into(),
            input_invalid_bg: "#ff0000".into(),
            input_fg: "#ffffff".into(),
            input_invalid_fg: "#ffffff".into(),
            placeholder_fg: "#808080".into(),
            button_bg: "#000000".into(),
            button_fg: "#00ff00".into(),
            button_focus_bg: "#00ff00".into(),
            button_focus_fg: "#000000".into(),

            popup_bg: "#000000".into(),
            popup_fg: "#ffffff".into(),
            popup_selected_bg: "#00ff00".into(),
            popup_selected_fg: "#000000".into(),
            dialog_border: "#00ff00".into(),

            caption_bar_bg: "#000000".into(),
            caption_bar_fg: "#00ff00".into(),
            status_bar_bg: "#000000".into(),
            status_bar_fg: "#00ff00".into(),
            command_bar_bg: "#000000".into(),
            command_bar_fg: "#ffffff".into(),

            accent: "#00ff00".into(),
            warning: "#ffff00".into(),
            error: "#ff0000".into(),
            success: "#00ff00".into(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 이름과 함께 관리하고 런타임에 전환한다.
pub struct ThemeManager {
    current_name: String,
    current_theme: Theme,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_name: "dark".to_string(),
            current_theme: Theme::dark(),
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    pub fn current(&self) -> &Theme {
        &self.current_theme
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<()> {
        let Some((found, theme)) = self.available_themes.iter().find(|(n, _)| n == name) else {
            return Err(DirEditError::Config(format!("Theme not found: {}", name)));
        };
        self.current_name = found.clone();
        self.current_theme = theme.clone();
        Ok(())
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        let current_index = self
            .available_themes
            .iter()
            .position(|(name, _)| *name == self.current_name)
            .unwrap_or(0);

        let next_index = (current_index + 1) % self.available_themes.len();
        let (name, theme) = &self.available_themes[next_index];
        self.current_name = name.clone();
        self.current_theme = theme.clone();
    }

    /// 커스텀 테마 추가 (같은 이름이면 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        if let Some(slot) = self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = theme;
        } else {
            self.available_themes.push((name, theme));
        }
    }

    /// 사용자 테마 디렉토리 (`<config>/diredit/themes`)
    pub fn themes_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("diredit").join("themes"))
    }

    /// 디렉토리의 `*.toml` 테마 로드. 읽을 수 없는 파일은 건너뛴다.
    pub fn load_themes_from_dir(&mut self, themes_dir: &Path) -> anyhow::Result<usize> {
        if !themes_dir.exists() {
            return Ok(0);
        }

        let mut loaded = 0;
        for entry in fs::read_dir(themes_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            match Theme::from_file(&path) {
                Ok(theme) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("custom")
                        .to_string();
                    self.add_theme(name, theme);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping theme file");
                }
            }
        }

        Ok(loaded)
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
