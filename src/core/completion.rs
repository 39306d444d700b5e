//! 디렉토리 경로 자동완성
//!
//! 텍스트가 바뀔 때마다 후보를 다시 계산하고, 짧은 지연 후 한 번 더 계산한다.
//! 후보 수락 후에는 텍스트 갱신이 끝난 뒤(지연 후) 구분자를 붙이고 다음
//! 세그먼트 후보를 띄운다. 타이머는 모두 `Instant` 마감 시각이며
//! 이벤트 루프가 `poll`로 꺼내 간다.

use crate::core::key_filter::{PopupCommand, PopupView};
use crate::core::normalizer::{is_separator, PathNormalizer};
use crate::system::{DirectoryIndex, FileSystem};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// 기본 재계산 지연
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(10);

/// 후보 매칭 시 대소문자 처리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

/// 만료된 타이머
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 후보 재계산
    Retrigger,
    /// 수락 후 텍스트 갱신 완료
    AcceptSettled,
}

/// 자동완성 팝업 상태
#[derive(Debug, Clone, Default)]
pub struct CompletionPopup {
    candidates: Vec<String>,
    current_row: Option<usize>,
    visible: bool,
}

impl CompletionPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 후보 교체 (선택 초기화)
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.visible = !candidates.is_empty();
        self.candidates = candidates;
        self.current_row = None;
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.candidates.is_empty()
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.current_row = None;
    }

    /// 다음 행 (선택이 없으면 첫 행, 마지막 행에서는 유지)
    pub fn advance(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        let last = self.candidates.len() - 1;
        self.current_row = Some(match self.current_row {
            None => 0,
            Some(row) => (row + 1).min(last),
        });
    }

    /// 이전 행 (선택이 없으면 마지막 행)
    pub fn retreat(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        self.current_row = Some(match self.current_row {
            None => self.candidates.len() - 1,
            Some(row) => row.saturating_sub(1),
        });
    }

    pub fn select(&mut self, row: usize) {
        if row < self.candidates.len() {
            self.current_row = Some(row);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current_row
            .and_then(|row| self.candidates.get(row))
            .map(String::as_str)
    }

    /// 명령을 순서대로 적용하고, 확정된 후보가 있으면 반환
    pub fn apply(&mut self, commands: &[PopupCommand]) -> Option<String> {
        let mut confirmed = None;
        for command in commands {
            match command {
                PopupCommand::AdvanceSelection => self.advance(),
                PopupCommand::Confirm => {
                    confirmed = self.current().map(str::to_string);
                    if confirmed.is_some() {
                        self.hide();
                    }
                }
            }
        }
        confirmed
    }

    /// 선택 행이 보이도록 하는 스크롤 시작 행
    pub fn scroll_offset(&self, visible_rows: usize) -> usize {
        match self.current_row {
            Some(row) if visible_rows > 0 && row >= visible_rows => row + 1 - visible_rows,
            _ => 0,
        }
    }
}

impl PopupView for CompletionPopup {
    fn current_row(&self) -> Option<usize> {
        self.current_row
    }
}

#[derive(Debug, Clone)]
pub struct CompletionController {
    prefix: String,
    popup: CompletionPopup,
    normalizer: PathNormalizer,
    delay: Duration,
    case_sensitivity: CaseSensitivity,
    show_hidden: bool,
    /// 현재 텍스트에 대해 사용자가 팝업을 닫음
    dismissed: bool,
    pending_retrigger: Option<Instant>,
    pending_accept: Option<Instant>,
}

impl CompletionController {
    pub fn new(normalizer: PathNormalizer) -> Self {
        Self {
            prefix: String::new(),
            popup: CompletionPopup::new(),
            normalizer,
            delay: DEFAULT_COMPLETION_DELAY,
            case_sensitivity: CaseSensitivity::default(),
            show_hidden: false,
            dismissed: false,
            pending_retrigger: None,
            pending_accept: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    pub fn show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn popup(&self) -> &CompletionPopup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut CompletionPopup {
        &mut self.popup
    }

    /// 텍스트 변경: 접두어 갱신, 즉시 계산, 재계산 타이머 설정
    pub fn on_text_changed(&mut self, text: &str, index: &dyn DirectoryIndex, now: Instant) {
        self.prefix = text.to_string();
        self.dismissed = false;
        self.complete(index);
        self.pending_retrigger = Some(now + self.delay);
    }

    /// 후보 수락: 팝업을 닫고 텍스트가 정리된 뒤 처리하도록 타이머 설정
    pub fn on_accepted(&mut self, now: Instant) {
        self.popup.hide();
        self.dismissed = true;
        self.pending_retrigger = None;
        self.pending_accept = Some(now + self.delay);
    }

    /// 수락 처리 완료 후 다음 세그먼트 후보 표시
    pub fn resume_after_accept(&mut self, index: &dyn DirectoryIndex) {
        self.dismissed = false;
        self.complete(index);
    }

    /// 현재 텍스트에 대해 팝업 닫기 (다음 텍스트 변경 전까지)
    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.pending_retrigger = None;
        self.popup.hide();
    }

    /// 현재 접두어로 후보 다시 계산
    pub fn complete(&mut self, index: &dyn DirectoryIndex) {
        if self.dismissed {
            return;
        }
        let candidates = self.candidates_for(&self.prefix, index);
        self.popup.set_candidates(candidates);
    }

    /// 가장 이른 대기 타이머
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending_retrigger, self.pending_accept) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// 만료된 타이머를 꺼낸다 (한 번 발화 후 폐기)
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        if self.pending_retrigger.is_some_and(|deadline| deadline <= now) {
            self.pending_retrigger = None;
            fired.push(TimerEvent::Retrigger);
        }
        if self.pending_accept.is_some_and(|deadline| deadline <= now) {
            self.pending_accept = None;
            fired.push(TimerEvent::AcceptSettled);
        }
        fired
    }

    /// 접두어에 대한 후보 목록
    ///
    /// 구분자가 없으면 루트 목록에서, 있으면 마지막 구분자 앞 디렉토리의
    /// 하위 디렉토리에서 찾는다. 목록 조회 실패는 빈 후보로 취급한다.
    pub fn candidates_for(&self, prefix: &str, index: &dyn DirectoryIndex) -> Vec<String> {
        let (parent, partial) = split_path_input(prefix);

        let mut candidates: Vec<String> = if parent.is_empty() {
            index
                .roots()
                .iter()
                .map(|root| self.normalizer.to_display_form(&root.to_string_lossy()))
                .filter(|root| self.matches(root, partial))
                .collect()
        } else {
            let include_hidden = self.show_hidden || partial.starts_with('.');
            match index.child_directories(Path::new(parent)) {
                Ok(names) => names
                    .into_iter()
                    .filter(|name| include_hidden || !FileSystem::is_hidden_name(name))
                    .filter(|name| self.matches(name, partial))
                    .map(|name| format!("{}{}", parent, name))
                    .collect(),
                Err(e) => {
                    tracing::debug!(parent, error = %e, "completion listing failed");
                    Vec::new()
                }
            }
        };

        candidates.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        candidates
    }

    fn matches(&self, name: &str, partial: &str) -> bool {
        match self.case_sensitivity {
            CaseSensitivity::Sensitive => name.starts_with(partial),
            CaseSensitivity::Insensitive => name.to_lowercase().starts_with(&partial.to_lowercase()),
        }
    }
}

/// 마지막 구분자 기준으로 (부모, 부분 이름) 분리. 부모는 구분자를 포함한다.
pub fn split_path_input(value: &str) -> (&str, &str) {
    if let Some((idx, c)) = value.char_indices().rev().find(|(_, c)| is_separator(*c)) {
        let end = idx + c.len_utf8();
        (&value[..end], &value[end..])
    } else {
        ("", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::Separator;
    use crate::system::filesystem::fake::MemoryIndex;
    use std::fs;
    use tempfile::TempDir;

    fn controller() -> CompletionController {
        CompletionController::new(PathNormalizer::new(Separator::Slash))
    }

    fn index() -> MemoryIndex {
        MemoryIndex::new()
            .with_root("/")
            .with_dir("/data/Projects")
            .with_dir("/data/photos")
            .with_dir("/data/.cache")
            .with_dir("/home/user")
    }

    #[test]
    fn test_split_path_input() {
        assert_eq!(split_path_input("/data/pro"), ("/data/", "pro"));
        assert_eq!(split_path_input("/data/"), ("/data/", ""));
        assert_eq!(split_path_input(r"C:\dev"), (r"C:\", "dev"));
        assert_eq!(split_path_input("plain"), ("", "plain"));
    }

    #[test]
    fn test_candidates_case_insensitive_sorted() {
        let c = controller();
        assert_eq!(
            c.candidates_for("/data/p", &index()),
            vec!["/data/photos".to_string(), "/data/Projects".to_string()]
        );
    }

    #[test]
    fn test_candidates_case_sensitive() {
        let c = controller().case_sensitivity(CaseSensitivity::Sensitive);
        assert_eq!(
            c.candidates_for("/data/P", &index()),
            vec!["/data/Projects".to_string()]
        );
    }

    #[test]
    fn test_hidden_only_when_requested() {
        let c = controller();
        assert!(!c
            .candidates_for("/data/", &index())
            .contains(&"/data/.cache".to_string()));
        assert_eq!(
            c.candidates_for("/data/.", &index()),
            vec!["/data/.cache".to_string()]
        );

        let c = controller().show_hidden(true);
        assert_eq!(c.candidates_for("/data/", &index()).len(), 3);
    }

    #[test]
    fn test_candidates_from_roots_without_separator() {
        let c = controller();
        assert_eq!(c.candidates_for("", &index()), vec!["/".to_string()]);
        assert!(c.candidates_for("x", &index()).is_empty());
    }

    #[test]
    fn test_missing_parent_is_empty_not_error() {
        let c = controller();
        assert!(c.candidates_for("/nowhere/a", &index()).is_empty());
    }

    #[test]
    fn test_text_change_arms_retrigger_once() {
        let mut c = controller();
        let now = Instant::now();
        c.on_text_changed("/data/", &index(), now);
        assert!(c.popup().is_visible());
        assert_eq!(c.next_deadline(), Some(now + DEFAULT_COMPLETION_DELAY));

        assert!(c.poll(now).is_empty());
        assert_eq!(
            c.poll(now + DEFAULT_COMPLETION_DELAY),
            vec![TimerEvent::Retrigger]
        );
        assert!(c.poll(now + Duration::from_secs(1)).is_empty());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_accept_hides_popup_until_resume() {
        let mut c = controller();
        let now = Instant::now();
        c.on_text_changed("/data/", &index(), now);
        c.on_accepted(now);

        assert!(!c.popup().is_visible());
        assert_eq!(c.next_deadline(), Some(now + DEFAULT_COMPLETION_DELAY));
        c.complete(&index());
        assert!(!c.popup().is_visible());

        assert_eq!(
            c.poll(now + DEFAULT_COMPLETION_DELAY),
            vec![TimerEvent::AcceptSettled]
        );
        c.resume_after_accept(&index());
        assert!(c.popup().is_visible());
    }

    #[test]
    fn test_popup_apply_commands() {
        let mut popup = CompletionPopup::new();
        popup.set_candidates(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(popup.current_row(), None);

        let confirmed = popup.apply(&[PopupCommand::AdvanceSelection, PopupCommand::Confirm]);
        assert_eq!(confirmed.as_deref(), Some("a"));
        assert!(!popup.is_visible());
    }

    #[test]
    fn test_popup_navigation_clamps() {
        let mut popup = CompletionPopup::new();
        popup.set_candidates(vec!["a".to_string(), "b".to_string()]);
        popup.retreat();
        assert_eq!(popup.current(), Some("b"));
        popup.advance();
        assert_eq!(popup.current(), Some("b"));
        popup.retreat();
        popup.retreat();
        assert_eq!(popup.current(), Some("a"));
    }

    #[test]
    fn test_popup_empty_confirm_yields_nothing() {
        let mut popup = CompletionPopup::new();
        popup.set_candidates(Vec::new());
        assert_eq!(
            popup.apply(&[PopupCommand::AdvanceSelection, PopupCommand::Confirm]),
            None
        );
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        let mut popup = CompletionPopup::new();
        popup.set_candidates((0..10).map(|i| i.to_string()).collect());
        popup.select(7);
        assert_eq!(popup.scroll_offset(4), 4);
        popup.select(2);
        assert_eq!(popup.scroll_offset(4), 0);
    }

    #[test]
    fn test_candidates_real_filesystem() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        fs::create_dir(temp.path().join("Alps")).unwrap();
        fs::create_dir(temp.path().join("beta")).unwrap();
        fs::write(temp.path().join("almanac.txt"), "x").unwrap();

        let normalizer = PathNormalizer::new(Separator::native());
        let c = CompletionController::new(normalizer);
        let base = normalizer.ensure_trailing_separator(&temp.path().to_string_lossy());
        let prefix = format!("{}al", base);

        assert_eq!(
            c.candidates_for(&prefix, &FileSystem::new()),
            vec![format!("{}alpha", base), format!("{}Alps", base)]
        );
    }
}
