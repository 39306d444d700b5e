// Layout system - 화면 영역 계산
//
// 세로 배치: 캡션 바 | 여백 | 입력 행 + 팝업 영역 | (도움말) | 상태바 | 커맨드 바
// 입력 행은 가로로 레이블 | 입력 필드 | 찾아보기 버튼으로 나뉜다.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// 팝업 최대 행 수
pub const MAX_POPUP_ROWS: u16 = 8;

/// 입력 필드 최소 너비
const MIN_FIELD_WIDTH: u16 = 8;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Normal,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 캡션 바
    pub caption_bar: Rect,
    /// 입력 위젯 (첫 행이 입력 행, 나머지는 팝업용)
    pub edit: Rect,
    /// 키 도움말 (숨김 상태면 높이 0)
    pub help: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::Normal,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::Normal
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect, show_help: bool) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::Normal => Self::calculate_areas(area, show_help),
        };
    }

    fn calculate_areas(area: Rect, show_help: bool) -> LayoutAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                          // 캡션 바
                Constraint::Length(1),                          // 여백
                Constraint::Min(2),                             // 입력 행 + 팝업
                Constraint::Length(if show_help { 1 } else { 0 }), // 도움말
                Constraint::Length(1),                          // 상태바
                Constraint::Length(1),                          // 커맨드 바
            ])
            .split(area);

        // 좌우 여백 1칸
        let edit = Rect {
            x: chunks[2].x + 1,
            width: chunks[2].width.saturating_sub(2),
            ..chunks[2]
        };

        LayoutAreas {
            caption_bar: chunks[0],
            edit,
            help: chunks[3],
            status_bar: chunks[4],
            command_bar: chunks[5],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn is_too_small(&self) -> bool {
        matches!(self.mode, LayoutMode::TooSmall)
    }
}

/// 입력 위젯 내부 배치
///
/// 렌더링과 마우스 판정이 같은 계산을 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditLayout {
    pub label: Rect,
    pub field: Rect,
    pub button: Rect,
    /// 입력 행 아래 팝업이 쓸 수 있는 영역
    pub popup_region: Rect,
}

impl EditLayout {
    pub fn compute(area: Rect, label: &str, browse_text: &str) -> Self {
        if area.width == 0 || area.height == 0 {
            return Self::default();
        }

        let row = Rect { height: 1, ..area };
        let button_width = (browse_text.width() as u16 + 2).min(row.width);
        let label_width = if label.is_empty() {
            0
        } else {
            (label.width() as u16 + 1)
                .min(row.width.saturating_sub(button_width + MIN_FIELD_WIDTH + 1))
        };

        let field_x = row.x + label_width;
        let button_x = row.x + row.width - button_width;
        let field_width = button_x.saturating_sub(field_x).saturating_sub(1);

        Self {
            label: Rect {
                width: label_width,
                ..row
            },
            field: Rect {
                x: field_x,
                width: field_width,
                ..row
            },
            button: Rect {
                x: button_x,
                width: button_width,
                ..row
            },
            popup_region: Rect {
                x: field_x,
                y: area.y + 1,
                width: field_width,
                height: area.height - 1,
            },
        }
    }

    /// 후보 수에 맞춘 팝업 영역
    pub fn popup_area(&self, candidate_count: usize) -> Rect {
        let rows = u16::try_from(candidate_count)
            .unwrap_or(u16::MAX)
            .min(MAX_POPUP_ROWS)
            .min(self.popup_region.height);
        Rect {
            height: rows,
            ..self.popup_region
        }
    }
}

/// 좌표가 영역 안에 있는지 확인
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_mode() {
        assert_eq!(LayoutManager::determine_mode(80, 24), LayoutMode::Normal);
        assert_eq!(LayoutManager::determine_mode(40, 10), LayoutMode::Normal);
        assert_eq!(LayoutManager::determine_mode(39, 24), LayoutMode::TooSmall);
        assert_eq!(LayoutManager::determine_mode(80, 9), LayoutMode::TooSmall);
    }

    #[test]
    fn test_areas_with_and_without_help() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 80, 24), false);
        let areas = manager.areas();
        assert_eq!(areas.caption_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.edit, Rect::new(1, 2, 78, 20));
        assert_eq!(areas.help.height, 0);
        assert_eq!(areas.status_bar, Rect::new(0, 22, 80, 1));
        assert_eq!(areas.command_bar, Rect::new(0, 23, 80, 1));

        manager.update(Rect::new(0, 0, 80, 24), true);
        assert_eq!(manager.areas().help, Rect::new(0, 21, 80, 1));
        assert_eq!(manager.areas().edit.height, 19);
    }

    #[test]
    fn test_too_small_uses_warning_area() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 30, 8), false);
        assert!(manager.is_too_small());
        assert_eq!(manager.areas().warning, Rect::new(0, 0, 30, 8));
    }

    #[test]
    fn test_edit_layout_split() {
        let layout = EditLayout::compute(Rect::new(1, 2, 60, 10), "Directory:", "Browse...");
        assert_eq!(layout.label, Rect::new(1, 2, 11, 1));
        assert_eq!(layout.button, Rect::new(50, 2, 11, 1));
        assert_eq!(layout.field, Rect::new(12, 2, 37, 1));
        assert_eq!(layout.popup_region, Rect::new(12, 3, 37, 9));
        assert_eq!(layout.popup_area(3).height, 3);
        assert_eq!(layout.popup_area(50).height, MAX_POPUP_ROWS);
        assert_eq!(layout.popup_area(65_536).height, MAX_POPUP_ROWS);
        assert_eq!(layout.popup_area(usize::MAX).height, MAX_POPUP_ROWS);
    }

    #[test]
    fn test_edit_layout_without_label() {
        let layout = EditLayout::compute(Rect::new(0, 0, 40, 3), "", "Browse...");
        assert_eq!(layout.label.width, 0);
        assert_eq!(layout.field.x, 0);
        assert_eq!(layout.popup_area(5).height, 2);
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(5, 5, 3, 2);
        assert!(contains(area, 5, 5));
        assert!(contains(area, 7, 6));
        assert!(!contains(area, 8, 5));
        assert!(!contains(area, 5, 7));
    }
}
