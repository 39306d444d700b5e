// Caption bar component - 상단 캡션 바
//
// 창 제목 역할: 마지막으로 보고된 디렉토리(없으면 앱 이름)를 표시

use crate::ui::Theme;
use crate::utils::path_display::{shorten_home, truncate_path};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct CaptionBar<'a> {
    app_name: &'a str,
    /// 보고된 디렉토리 (정규 경로)
    title: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
}

impl Default for CaptionBar<'_> {
    fn default() -> Self {
        Self {
            app_name: "diredit",
            title: None,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            accent_color: Color::Rgb(0, 120, 212),
        }
    }
}

impl<'a> CaptionBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.caption_bar_bg.to_color();
        self.fg_color = theme.caption_bar_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self
    }
}

impl Widget for CaptionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let prefix = format!("[{}] ", self.app_name);
        let available = (area.width as usize).saturating_sub(prefix.width() + 1);
        let title = match self.title {
            Some(path) => truncate_path(&shorten_home(path), available),
            None => self.app_name.to_string(),
        };

        let spans = vec![
            Span::styled(
                prefix,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(title, Style::default().fg(self.fg_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(bar: CaptionBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_caption_without_directory_shows_app_name() {
        let line = render_line(CaptionBar::new(), 40);
        assert!(line.starts_with("[diredit] diredit"));
    }

    #[test]
    fn test_caption_shows_reported_directory() {
        let line = render_line(CaptionBar::new().title(Some("/srv/data/")), 40);
        assert!(line.contains("/srv/data/"));
    }

    #[test]
    fn test_caption_truncates_long_directory() {
        let line = render_line(
            CaptionBar::new().title(Some("/srv/very/long/path/with/many/segments/inside/")),
            30,
        );
        assert!(line.contains("/..."));
        assert!(line.trim_end().ends_with("inside/"));
    }
}
