//! 호스트 액션 레지스트리
//!
//! 키 바인딩, 커맨드바 항목, 도움말 줄이 모두 이 모듈의 레지스트리를
//! 참조한다. 입력 위젯이 소비하지 않은 키만 여기로 온다.

use crate::ui::components::command_bar::CommandItem;
use crate::utils::error::{DirEditError, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 호스트 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Browse,
    CycleTheme,
    ToggleHelp,
    Quit,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub shortcut_display: &'static str,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::ToggleHelp,
        label: "Toggle help",
        shortcut_display: "F1",
        command_bar: Some(CommandBarEntry {
            key: "F1",
            label: "Help",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Browse,
        label: "Browse for a directory",
        shortcut_display: "F2 / Ctrl+O",
        command_bar: Some(CommandBarEntry {
            key: "F2",
            label: "Browse",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::CycleTheme,
        label: "Next theme",
        shortcut_display: "F9",
        command_bar: Some(CommandBarEntry {
            key: "F9",
            label: "Theme",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::Quit,
        label: "Quit",
        shortcut_display: "F10 / Ctrl+Q / Ctrl+C",
        command_bar: Some(CommandBarEntry {
            key: "F10",
            label: "Quit",
            priority: 90,
        }),
    },
];

/// 입력 위젯이 직접 처리하는 키 (도움말 표시용)
pub static WIDGET_KEYS: &[(&str, &str)] = &[
    ("Tab", "Accept suggestion"),
    ("Up/Dn", "Suggestion or history"),
    ("Enter", "Pick row"),
    ("Esc", "Close list"),
    ("Ctrl+W", "Delete segment"),
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ToggleHelp,
        },
        KeyBinding {
            code: KeyCode::F(2),
            modifiers: None,
            action: Action::Browse,
        },
        KeyBinding {
            code: KeyCode::Char('o'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Browse,
        },
        KeyBinding {
            code: KeyCode::F(9),
            modifiers: None,
            action: Action::CycleTheme,
        },
        KeyBinding {
            code: KeyCode::F(10),
            modifiers: None,
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true,
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

impl Action {
    pub fn def(self) -> Option<&'static ActionDef> {
        ACTION_DEFS.iter().find(|d| d.action == self)
    }
}

/// 커맨드바 항목 생성 (우선순위 순)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 줄 항목 (키, 설명): 위젯 키 다음에 호스트 액션
pub fn generate_help_entries(accept_key: KeyCode) -> Vec<(String, String)> {
    let widget = WIDGET_KEYS.iter().map(|(key, label)| {
        let key = if *key == "Tab" {
            key_code_name(accept_key)
        } else {
            key.to_string()
        };
        (key, label.to_string())
    });

    let host = ACTION_DEFS
        .iter()
        .map(|def| (def.shortcut_display.to_string(), def.label.to_string()));

    widget.chain(host).collect()
}

/// 설정 파일의 키 이름 해석 (`tab`, `right`, `f5`, 한 글자 등)
pub fn parse_key_code(name: &str) -> Result<KeyCode> {
    let lower = name.trim().to_ascii_lowercase();
    let code = match lower.as_str() {
        "tab" => KeyCode::Tab,
        "enter" | "return" => KeyCode::Enter,
        "right" => KeyCode::Right,
        "left" => KeyCode::Left,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "end" => KeyCode::End,
        "home" => KeyCode::Home,
        "space" => KeyCode::Char(' '),
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = name.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(DirEditError::InvalidKey(name.to_string())),
            }
        }
    };
    Ok(code)
}

/// 키 이름 표시 (`parse_key_code`의 역방향)
pub fn key_code_name(code: KeyCode) -> String {
    match code {
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other),
    }
}
