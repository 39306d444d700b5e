// Directory edit component - 경로 입력 위젯 렌더링
//
// 한 행에 레이블 | 입력 필드 | [Browse...] 버튼을 그리고,
// 팝업이 보이면 입력 필드 바로 아래에 후보 목록을 겹쳐 그린다.

use crate::core::key_filter::PopupView;
use crate::models::{DirectoryEdit, EditFocus, ValidityIndicator};
use crate::ui::layout::EditLayout;
use crate::ui::Theme;
use crate::utils::path_display;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct DirectoryEditView<'a> {
    edit: &'a DirectoryEdit,
    /// 커서 표시 여부 (모달이 떠 있으면 false)
    focused: bool,
    label_fg: Color,
    input_bg: Color,
    input_fg: Color,
    input_invalid_bg: Color,
    input_invalid_fg: Color,
    placeholder_fg: Color,
    button_bg: Color,
    button_fg: Color,
    button_focus_bg: Color,
    button_focus_fg: Color,
    popup_bg: Color,
    popup_fg: Color,
    popup_selected_bg: Color,
    popup_selected_fg: Color,
}

impl<'a> DirectoryEditView<'a> {
    pub fn new(edit: &'a DirectoryEdit) -> Self {
        Self {
            edit,
            focused: true,
            label_fg: Color::Rgb(212, 212, 212),
            input_bg: Color::Rgb(60, 60, 60),
            input_fg: Color::White,
            input_invalid_bg: Color::Rgb(255, 204, 204),
            input_invalid_fg: Color::Black,
            placeholder_fg: Color::Rgb(128, 128, 128),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_focus_bg: Color::Rgb(0, 120, 212),
            button_focus_fg: Color::White,
            popup_bg: Color::Rgb(37, 37, 38),
            popup_fg: Color::Rgb(212, 212, 212),
            popup_selected_bg: Color::Rgb(0, 120, 212),
            popup_selected_fg: Color::White,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.label_fg = theme.label_fg.to_color();
        self.input_bg = theme.input_bg.to_color();
        self.input_fg = theme.input_fg.to_color();
        self.input_invalid_bg = theme.input_invalid_bg.to_color();
        self.input_invalid_fg = theme.input_invalid_fg.to_color();
        self.placeholder_fg = theme.placeholder_fg.to_color();
        self.button_bg = theme.button_bg.to_color();
        self.button_fg = theme.button_fg.to_color();
        self.button_focus_bg = theme.button_focus_bg.to_color();
        self.button_focus_fg = theme.button_focus_fg.to_color();
        self.popup_bg = theme.popup_bg.to_color();
        self.popup_fg = theme.popup_fg.to_color();
        self.popup_selected_bg = theme.popup_selected_bg.to_color();
        self.popup_selected_fg = theme.popup_selected_fg.to_color();
        self
    }

    fn render_field(&self, buf: &mut Buffer, field: Rect) {
        if field.width < 2 {
            return;
        }

        let (bg, fg) = match self.edit.indicator() {
            ValidityIndicator::Neutral => (self.input_bg, self.input_fg),
            ValidityIndicator::Error => (self.input_invalid_bg, self.input_invalid_fg),
        };
        buf.set_style(field, Style::default().bg(bg));

        let value = self.edit.text();
        let max_display = field.width as usize - 2;

        if value.is_empty() {
            let placeholder = path_display::truncate_middle(self.edit.placeholder(), max_display);
            buf.set_string(
                field.x + 1,
                field.y,
                placeholder,
                Style::default().fg(self.placeholder_fg).bg(bg),
            );
        } else {
            let (visible, _) = visible_window(value, self.edit.cursor_pos(), max_display);
            buf.set_stringn(
                field.x + 1,
                field.y,
                visible,
                max_display,
                Style::default().fg(fg).bg(bg),
            );
        }

        if !self.focused || self.edit.focus() != EditFocus::Field {
            return;
        }

        // 커서 표시
        let (_, cursor_col) = visible_window(value, self.edit.cursor_pos(), max_display);
        let cursor_x = field.x + 1 + cursor_col as u16;
        if cursor_x < field.x + field.width - 1 {
            if let Some(cell) = buf.cell_mut((cursor_x, field.y)) {
                if value.is_empty() || self.edit.cursor_pos() < value.len() {
                    // 문자(또는 placeholder)가 있는 위치: 반전 스타일
                    cell.set_style(Style::default().fg(bg).bg(fg));
                } else {
                    cell.set_char('▏');
                    cell.set_style(Style::default().fg(fg).bg(bg));
                }
            }
        }
    }

    fn render_button(&self, buf: &mut Buffer, button: Rect) {
        let focused = self.focused && self.edit.focus() == EditFocus::BrowseButton;
        let style = if focused {
            Style::default()
                .fg(self.button_focus_fg)
                .bg(self.button_focus_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.button_fg).bg(self.button_bg)
        };
        let text = format!("[{}]", self.edit.browse_text());
        buf.set_string(button.x, button.y, text, style);
    }

    fn render_popup(&self, buf: &mut Buffer, layout: &EditLayout) {
        let popup = self.edit.popup();
        if !popup.is_visible() {
            return;
        }

        let area = layout.popup_area(popup.candidates().len());
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(self.popup_bg));

        let visible_rows = area.height as usize;
        let scroll = popup.scroll_offset(visible_rows);
        let selected = popup.current_row();

        for (row, candidate) in popup
            .candidates()
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible_rows)
        {
            let y = area.y + (row - scroll) as u16;
            let is_selected = selected == Some(row);
            let marker = if is_selected { "> " } else { "  " };
            let content_width = area.width.saturating_sub(marker.width() as u16) as usize;
            let text = path_display::truncate_middle(candidate, content_width);
            let style = if is_selected {
                Style::default()
                    .fg(self.popup_selected_fg)
                    .bg(self.popup_selected_bg)
            } else {
                Style::default().fg(self.popup_fg).bg(self.popup_bg)
            };
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            buf.set_string(area.x, y, format!("{}{}", marker, text), style);
        }
    }
}

impl Widget for DirectoryEditView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = EditLayout::compute(area, self.edit.label_text(), self.edit.browse_text());
        if layout.field.width == 0 {
            return;
        }

        if layout.label.width > 0 {
            let label = path_display::truncate_middle(
                self.edit.label_text(),
                layout.label.width.saturating_sub(1) as usize,
            );
            buf.set_string(
                layout.label.x,
                layout.label.y,
                label,
                Style::default().fg(self.label_fg),
            );
        }

        self.render_field(buf, layout.field);
        self.render_button(buf, layout.button);
        self.render_popup(buf, &layout);
    }
}

/// 커서가 보이도록 자른 표시 문자열과 그 안의 커서 열
///
/// `cursor_pos`는 바이트 인덱스, 반환 열은 display width 기준.
fn visible_window(value: &str, cursor_pos: usize, max_display: usize) -> (&str, usize) {
    let cursor_col: usize = value[..cursor_pos]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum();

    if value.width() <= max_display || cursor_col < max_display {
        return (value, cursor_col);
    }

    // 커서가 오른쪽 끝에 오도록 스크롤
    let target_start_width = cursor_col.saturating_sub(max_display.saturating_sub(1));
    let mut start_byte = value.len();
    let mut width_sum = 0;
    for (i, c) in value.char_indices() {
        if width_sum >= target_start_width {
            start_byte = i;
            break;
        }
        width_sum += c.width().unwrap_or(0);
    }
    (&value[start_byte..], cursor_col - width_sum)
}
