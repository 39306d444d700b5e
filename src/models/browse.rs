//! 디렉토리 찾아보기 다이얼로그 상태
//!
//! 한 디렉토리의 하위 디렉토리 목록을 보여주고 이동/선택을 처리한다.
//! 부모가 있으면 0번 행은 `..`이다.

use crate::core::validator::PathValidator;
use crate::system::{DirectoryIndex, FileSystem};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::path::{Path, PathBuf};

/// 키 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// 다이얼로그 유지
    Pending,
    /// 디렉토리 선택
    Chosen(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    current: PathBuf,
    /// 하위 디렉토리 이름 (정렬됨)
    entries: Vec<String>,
    /// `..` 포함 인덱스
    selected: usize,
    show_hidden: bool,
    /// 목록 조회 실패 메시지
    error: Option<String>,
}

impl BrowseState {
    /// 시작 위치: `start`가 디렉토리면 그곳, 아니면 첫 번째 루트.
    /// 루트도 없으면 열 수 없다.
    pub fn open(start: &str, index: &dyn DirectoryIndex, show_hidden: bool) -> Option<Self> {
        let current = if PathValidator::new(index).is_directory(start) {
            PathBuf::from(start)
        } else {
            index.roots().into_iter().next()?
        };

        let mut state = Self {
            current,
            entries: Vec::new(),
            selected: 0,
            show_hidden,
            error: None,
        };
        state.reload(index, None);
        tracing::info!(start = %state.current.display(), "browse dialog opened");
        Some(state)
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_parent(&self) -> bool {
        self.current.parent().is_some()
    }

    /// 표시 행 수 (`..` 포함)
    pub fn row_count(&self) -> usize {
        self.entries.len() + usize::from(self.has_parent())
    }

    /// 행 이름 (`..` 포함)
    pub fn row_label(&self, row: usize) -> Option<&str> {
        if self.has_parent() {
            if row == 0 {
                return Some("..");
            }
            self.entries.get(row - 1).map(String::as_str)
        } else {
            self.entries.get(row).map(String::as_str)
        }
    }

    /// 선택 행이 보이도록 하는 스크롤 시작 행
    pub fn scroll_offset(&self, visible_rows: usize) -> usize {
        if visible_rows > 0 && self.selected >= visible_rows {
            self.selected + 1 - visible_rows
        } else {
            0
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    /// 선택 행의 경로 (`..`이면 부모)
    pub fn selected_path(&self) -> Option<PathBuf> {
        if self.has_parent() && self.selected == 0 {
            return self.current.parent().map(Path::to_path_buf);
        }
        self.row_label(self.selected)
            .map(|name| self.current.join(name))
    }

    /// 선택 행으로 이동
    pub fn descend(&mut self, index: &dyn DirectoryIndex) {
        if self.has_parent() && self.selected == 0 {
            self.go_to_parent(index);
            return;
        }
        if let Some(path) = self.selected_path() {
            self.current = path;
            self.reload(index, None);
        }
    }

    /// 부모 디렉토리로 이동 (떠난 디렉토리를 선택 상태로)
    pub fn go_to_parent(&mut self, index: &dyn DirectoryIndex) {
        let Some(parent) = self.current.parent().map(Path::to_path_buf) else {
            return;
        };
        let previous = self
            .current
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        self.current = parent;
        self.reload(index, previous.as_deref());
    }

    pub fn handle_key(&mut self, key: KeyEvent, index: &dyn DirectoryIndex) -> BrowseOutcome {
        if key.kind == KeyEventKind::Release {
            return BrowseOutcome::Pending;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.descend(index),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_to_parent(index),
            KeyCode::Char(' ') | KeyCode::Char('s') => {
                if let Some(path) = self.selected_path() {
                    return self.choose(path);
                }
            }
            KeyCode::Char('.') => return self.choose(self.current.clone()),
            KeyCode::Esc => {
                tracing::info!("browse dialog cancelled");
                return BrowseOutcome::Cancelled;
            }
            _ => {}
        }
        BrowseOutcome::Pending
    }

    fn choose(&self, path: PathBuf) -> BrowseOutcome {
        let chosen = path.to_string_lossy().to_string();
        tracing::info!(path = %chosen, "browse dialog confirmed");
        BrowseOutcome::Chosen(chosen)
    }

    fn reload(&mut self, index: &dyn DirectoryIndex, select: Option<&str>) {
        match index.child_directories(&self.current) {
            Ok(mut names) => {
                if !self.show_hidden {
                    names.retain(|name| !FileSystem::is_hidden_name(name));
                }
                names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
                self.entries = names;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(dir = %self.current.display(), error = %e, "failed to list directory");
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }

        let offset = usize::from(self.has_parent());
        self.selected = select
            .and_then(|name| self.entries.iter().position(|e| e == name))
            .map(|pos| pos + offset)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::filesystem::fake::MemoryIndex;
    use crossterm::event::KeyModifiers;

    fn index() -> MemoryIndex {
        MemoryIndex::new()
            .with_root("/")
            .with_dir("/home/user")
            .with_dir("/home/Guest")
            .with_dir("/home/.secret")
            .with_dir("/tmp")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_at_start_directory() {
        let index = index();
        let state = BrowseState::open("/home", &index, false).unwrap();
        assert_eq!(state.current(), Path::new("/home"));
        assert_eq!(state.entries(), &["Guest", "user"]);
        assert_eq!(state.row_count(), 3);
        assert_eq!(state.row_label(0), Some(".."));
    }

    #[test]
    fn test_open_falls_back_to_first_root() {
        let index = index();
        let state = BrowseState::open("/missing", &index, false).unwrap();
        assert_eq!(state.current(), Path::new("/"));
        assert!(!state.has_parent());
        assert_eq!(state.row_label(0), Some("home"));

        assert!(BrowseState::open("/missing", &MemoryIndex::new(), false).is_none());
    }

    #[test]
    fn test_hidden_entries() {
        let index = index();
        let state = BrowseState::open("/home", &index, true).unwrap();
        assert_eq!(state.entries(), &[".secret", "Guest", "user"]);
    }

    #[test]
    fn test_descend_and_parent_keeps_selection() {
        let index = index();
        let mut state = BrowseState::open("/home", &index, false).unwrap();

        state.handle_key(key(KeyCode::Char('j')), &index);
        state.handle_key(key(KeyCode::Char('j')), &index);
        state.handle_key(key(KeyCode::Enter), &index);
        assert_eq!(state.current(), Path::new("/home/user"));
        assert_eq!(state.selected(), 0);

        state.handle_key(key(KeyCode::Backspace), &index);
        assert_eq!(state.current(), Path::new("/home"));
        assert_eq!(state.row_label(state.selected()), Some("user"));
    }

    #[test]
    fn test_enter_on_parent_row_goes_up() {
        let index = index();
        let mut state = BrowseState::open("/home", &index, false).unwrap();
        state.handle_key(key(KeyCode::Enter), &index);
        assert_eq!(state.current(), Path::new("/"));
        assert_eq!(state.row_label(state.selected()), Some("home"));
    }

    #[test]
    fn test_choose_and_cancel() {
        let index = index();
        let mut state = BrowseState::open("/home", &index, false).unwrap();

        state.move_down();
        assert_eq!(
            state.handle_key(key(KeyCode::Char(' ')), &index),
            BrowseOutcome::Chosen("/home/Guest".to_string())
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('.')), &index),
            BrowseOutcome::Chosen("/home".to_string())
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Esc), &index),
            BrowseOutcome::Cancelled
        );
    }

    #[test]
    fn test_move_clamps_and_scroll_follows() {
        let index = index();
        let mut state = BrowseState::open("/home", &index, false).unwrap();
        state.move_up();
        assert_eq!(state.selected(), 0);
        for _ in 0..10 {
            state.move_down();
        }
        assert_eq!(state.selected(), 2);
        assert_eq!(state.scroll_offset(2), 1);
        assert_eq!(state.scroll_offset(5), 0);
    }

    #[test]
    fn test_listing_failure_is_reported() {
        struct Broken;
        impl DirectoryIndex for Broken {
            fn is_directory(&self, _path: &Path) -> bool {
                true
            }
            fn child_directories(&self, _dir: &Path) -> std::io::Result<Vec<String>> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                ))
            }
            fn roots(&self) -> Vec<PathBuf> {
                vec![PathBuf::from("/")]
            }
        }

        let state = BrowseState::open("/locked", &Broken, false).unwrap();
        assert!(state.entries().is_empty());
        assert_eq!(state.error(), Some("denied"));
    }
}
