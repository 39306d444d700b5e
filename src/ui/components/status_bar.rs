// Status bar component - 상태바 컴포넌트
//
// 입력값 유효성, 히스토리 개수, 최근 메시지, 현재 테마 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 입력값이 존재하는 디렉토리인지
    valid: bool,
    /// 입력이 비어 있는지
    empty: bool,
    /// 히스토리 개수 (히스토리 기능이 없으면 None)
    history_count: Option<usize>,
    /// 최근 메시지
    message: Option<&'a str>,
    theme_name: &'a str,
    bg_color: Color,
    fg_color: Color,
    valid_color: Color,
    invalid_color: Color,
    dim_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self {
            valid: false,
            empty: true,
            history_count: None,
            message: None,
            theme_name: "dark",
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            valid_color: Color::Green,
            invalid_color: Color::Red,
            dim_color: Color::Rgb(100, 100, 100),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    pub fn history_count(mut self, count: Option<usize>) -> Self {
        self.history_count = count;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn theme_name(mut self, name: &'a str) -> Self {
        self.theme_name = name;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.valid_color = theme.success.to_color();
        self.invalid_color = theme.error.to_color();
        self
    }

    fn validity_text(&self) -> &'static str {
        if self.empty {
            " ✗ No directory"
        } else if self.valid {
            " ✓ Valid directory"
        } else {
            " ✗ Not a directory"
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let validity = self.validity_text();
        let validity_color = if self.valid {
            self.valid_color
        } else {
            self.invalid_color
        };

        let mut middle = String::new();
        if let Some(count) = self.history_count {
            middle.push_str(&format!(" | history: {}", count));
        }
        if let Some(message) = self.message {
            middle.push_str(&format!(" | {}", message));
        }

        let right_info = format!("[{}] ", self.theme_name);

        let left_len = validity.width() + middle.width();
        let padding_len = area
            .width
            .saturating_sub(left_len as u16 + right_info.width() as u16) as usize;

        let spans = vec![
            Span::styled(validity, Style::default().fg(validity_color)),
            Span::styled(middle, Style::default().fg(self.fg_color)),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_info, Style::default().fg(self.dim_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
