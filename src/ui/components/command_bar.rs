// Command bar component - 하단 커맨드 바 컴포넌트
//
// 호스트 액션 단축키 표시. 너비가 모자라면 뒤쪽 항목부터 생략한다.

use crate::core::actions::generate_command_bar_items;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 커맨드 항목
#[derive(Debug, Clone)]
pub struct CommandItem {
    /// 단축키 (F1, F2, ...)
    pub key: String,
    pub label: String,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// `KEY:Label` 표시 너비
    fn width(&self) -> usize {
        self.key.width() + 1 + self.label.width()
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    commands: Vec<CommandItem>,
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
}

impl Default for CommandBar {
    fn default() -> Self {
        Self {
            commands: generate_command_bar_items(),
            bg_color: Color::Rgb(30, 30, 30),
            key_fg_color: Color::Rgb(0, 120, 212),
            label_fg_color: Color::Rgb(212, 212, 212),
        }
    }
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 커맨드 목록 설정
    pub fn commands(mut self, commands: Vec<CommandItem>) -> Self {
        self.commands = commands;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg.to_color();
        self.key_fg_color = theme.accent.to_color();
        self.label_fg_color = theme.command_bar_fg.to_color();
        self
    }

    /// 너비 안에 들어가는 항목 수
    fn fitting_count(&self, width: usize) -> usize {
        let mut used = 1; // 왼쪽 패딩
        let mut count = 0;
        for (i, cmd) in self.commands.iter().enumerate() {
            let needed = cmd.width() + usize::from(i > 0);
            if used + needed > width {
                break;
            }
            used += needed;
            count += 1;
        }
        count
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let key_style = Style::default()
            .fg(self.key_fg_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.label_fg_color);

        let count = self.fitting_count(area.width as usize);
        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().take(count).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(cmd.key.as_str(), key_style));
            spans.push(Span::styled(":", label_style));
            spans.push(Span::styled(cmd.label.as_str(), label_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
