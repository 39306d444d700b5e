// Browse dialog component - 디렉토리 찾아보기 모달
//
// 현재 위치, 하위 디렉토리 목록, 키 힌트를 그린다.

use crate::models::BrowseState;
use crate::ui::Theme;
use crate::utils::path_display;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

const DIALOG_MAX_WIDTH: u16 = 70;
const DIALOG_MAX_HEIGHT: u16 = 20;
const DIALOG_H_PADDING: u16 = 2;

const HINT: &str = "Enter:Open  Space:Choose  .:This dir  Bksp:Up  Esc:Cancel";

pub struct BrowseDialog<'a> {
    state: &'a BrowseState,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    selected_bg: Color,
    selected_fg: Color,
    error_color: Color,
}

impl<'a> BrowseDialog<'a> {
    pub fn new(state: &'a BrowseState) -> Self {
        Self {
            state,
            bg_color: Color::Rgb(37, 37, 38),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            selected_bg: Color::Rgb(0, 120, 212),
            selected_fg: Color::White,
            error_color: Color::Red,
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.popup_bg.to_color();
        self.fg_color = theme.popup_fg.to_color();
        self.border_color = theme.dialog_border.to_color();
        self.selected_bg = theme.popup_selected_bg.to_color();
        self.selected_fg = theme.popup_selected_fg.to_color();
        self.error_color = theme.error.to_color();
        self
    }

    /// 화면 중앙에 놓을 다이얼로그 영역
    pub fn calculate_area(screen: Rect) -> Rect {
        let width = screen.width.saturating_sub(4).min(DIALOG_MAX_WIDTH);
        let height = screen.height.saturating_sub(2).min(DIALOG_MAX_HEIGHT);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for BrowseDialog<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = Self::calculate_area(screen);
        if area.width < 10 || area.height < 6 {
            return;
        }

        Clear.render(area, buf);
        Block::default()
            .title(" Choose Directory ")
            .title_style(
                Style::default()
                    .fg(self.border_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + 1,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(2),
        };
        let base = Style::default().fg(self.fg_color).bg(self.bg_color);

        // 현재 위치
        let current = self.state.current().to_string_lossy();
        let current = path_display::truncate_path(&current, inner.width as usize);
        buf.set_string(inner.x, inner.y, current, base.add_modifier(Modifier::BOLD));

        // 목록 (위치 줄과 힌트 줄 사이)
        let list_y = inner.y + 1;
        let hint_y = inner.y + inner.height - 1;
        let visible_rows = hint_y.saturating_sub(list_y) as usize;

        if let Some(error) = self.state.error() {
            let text = path_display::truncate_middle(error, inner.width as usize);
            buf.set_string(inner.x, list_y, text, Style::default().fg(self.error_color));
        }

        let scroll = self.state.scroll_offset(visible_rows);
        for row in scroll..self.state.row_count().min(scroll + visible_rows) {
            let Some(label) = self.state.row_label(row) else {
                continue;
            };
            let y = list_y + (row - scroll) as u16;
            let selected = row == self.state.selected();
            let marker = if selected { "> " } else { "  " };
            let content_width = inner.width.saturating_sub(marker.width() as u16) as usize;
            let style = if selected {
                Style::default().fg(self.selected_fg).bg(self.selected_bg)
            } else {
                base
            };
            buf.set_string(
                inner.x,
                y,
                format!(
                    "{}{}",
                    marker,
                    path_display::truncate_middle(label, content_width)
                ),
                style,
            );
        }

        let hint = path_display::truncate_middle(HINT, inner.width as usize);
        buf.set_string(inner.x, hint_y, hint, base.add_modifier(Modifier::DIM));
    }
}
