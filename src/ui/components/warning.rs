// Warning screen component - 경고 화면 컴포넌트
//
// 터미널이 너무 작을 때 표시되는 경고 화면

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;

/// 경고 화면 컴포넌트
pub struct WarningScreen {
    /// 현재 터미널 크기
    current_size: (u16, u16),
    warning_color: Color,
    bg_color: Color,
    fg_color: Color,
    error_color: Color,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self {
            current_size: (0, 0),
            warning_color: Color::Yellow,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            error_color: Color::Red,
        }
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.warning_color = theme.warning.to_color();
        self.bg_color = theme.bg_primary.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.error_color = theme.error.to_color();
        self
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        // 작은 화면이라 테두리 없이 세 줄만 쓴다
        let lines = vec![
            Line::from(Span::styled(
                "⚠ Terminal too small",
                Style::default()
                    .fg(self.warning_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!("{}x{}", self.current_size.0, self.current_size.1),
                    Style::default().fg(self.error_color),
                ),
                Span::styled(
                    format!(" / need {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(self.fg_color),
                ),
            ]),
            Line::from(Span::styled(
                "Resize or press Ctrl+Q",
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::DIM),
            )),
        ];

        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let body = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_shows_sizes() {
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        WarningScreen::new().current_size(30, 8).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect();
        assert!(text.contains("30x8"));
        assert!(text.contains("need 40x10"));
    }
}
