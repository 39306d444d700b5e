use crate::cli::Args;
use crate::core::actions::{find_action, Action};
use crate::models::{BrowseOutcome, BrowseState, DirectoryEdit, DirectoryEditEvent};
use crate::ui::{LayoutManager, ThemeManager};
use crate::utils::error::Result;
use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod settings;

use settings::Settings;

const TOAST_DURATION: Duration = Duration::from_secs(3);

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 경로 입력 위젯
    pub edit: DirectoryEdit,
    /// 찾아보기 다이얼로그 (열려 있을 때만)
    pub browse: Option<BrowseState>,
    /// 캡션 바 제목 (마지막으로 알려진 유효 디렉토리)
    pub title: Option<String>,
    /// 키 도움말 줄 표시 여부
    pub show_help: bool,
    /// 토스트 메시지 (3초 후 자동 소멸)
    toast_message: Option<(String, Instant)>,
    /// 실행용 설정 (명령행 값 반영)
    runtime: Settings,
    /// 파일에 저장되는 설정
    stored: Settings,
    /// 테스트에서 설정 저장 경로를 격리하기 위한 override
    state_store_override: Option<PathBuf>,
    /// 시작 시 시드된 히스토리 항목 수 (저장하지 않는다)
    history_seed: usize,
}

impl App {
    pub fn new(args: &Args) -> Self {
        let state_store_override = args.settings.clone();
        let stored = state_store_override
            .clone()
            .or_else(Settings::default_path)
            .map(|path| Settings::load(&path))
            .unwrap_or_default();
        let runtime = args.apply(&stored);

        let mut theme_manager = ThemeManager::new();
        if let Some(dir) = ThemeManager::themes_dir() {
            if dir.is_dir() {
                match theme_manager.load_themes_from_dir(&dir) {
                    Ok(count) => tracing::info!(count, "custom themes loaded"),
                    Err(e) => tracing::warn!(error = %e, "failed to load custom themes"),
                }
            }
        }

        let edit = DirectoryEdit::with_filesystem(runtime.edit_options());
        let mut app = Self::build(edit, theme_manager, runtime, stored, state_store_override);

        if let Some(path) = &args.path {
            if !app.edit.set_directory_path(path) {
                app.set_toast(&format!("Not a directory: {}", path));
            }
        }
        app.process_edit_events();
        app
    }

    fn build(
        mut edit: DirectoryEdit,
        mut theme_manager: ThemeManager,
        runtime: Settings,
        stored: Settings,
        state_store_override: Option<PathBuf>,
    ) -> Self {
        if let Err(e) = theme_manager.switch_theme(&runtime.theme) {
            tracing::warn!(error = %e, "keeping default theme");
        }
        edit.set_label_text(runtime.label.clone());
        edit.set_previous_directories(&runtime.history);
        let history_seed = edit.previous_directories().len();

        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager,
            edit,
            browse: None,
            title: None,
            show_help: false,
            toast_message: None,
            runtime,
            stored,
            state_store_override,
            history_seed,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        index: Box<dyn crate::system::DirectoryIndex>,
        settings: Settings,
    ) -> Self {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static TEST_APP_COUNTER: AtomicUsize = AtomicUsize::new(0);
        let suffix = TEST_APP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let state_store_override = std::env::temp_dir().join(format!(
            "diredit-test-settings-{}-{}.toml",
            std::process::id(),
            suffix
        ));

        let edit = DirectoryEdit::new(index, settings.edit_options());
        let mut app = Self::build(
            edit,
            ThemeManager::new(),
            settings.clone(),
            settings,
            Some(state_store_override),
        );
        app.process_edit_events();
        app
    }

    /// 종료
    pub fn quit(&mut self) {
        if let Err(e) = self.save_persisted_state() {
            tracing::warn!(error = %e, "failed to save settings");
        }
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn state_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.state_store_override {
            return Some(path.clone());
        }
        Settings::default_path()
    }

    /// 저장 대상은 테마와 히스토리뿐이다
    ///
    /// 히스토리는 파일에 있던 목록 뒤에 이번 세션에서 설정한 디렉토리만 붙이고
    /// 최근 `max_history`개로 자른다. 명령행 `--history` 시드는 저장하지 않는다.
    fn save_persisted_state(&self) -> Result<()> {
        let Some(path) = self.state_store_path() else {
            return Ok(());
        };
        let mut state = self.stored.clone();
        state.theme = self.theme_manager.current_name().to_string();
        if self.edit.has_history() {
            let session = self.edit.previous_directories();
            state
                .history
                .extend(session.into_iter().skip(self.history_seed));
            let excess = state.history.len().saturating_sub(state.max_history);
            state.history.drain(..excess);
        }
        state.save(&path)
    }

    fn switch_theme_and_save(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_name().to_string();
        self.set_toast(&format!("Theme: {}", name));
        if let Err(e) = self.save_persisted_state() {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    /// 액션 실행
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Browse => {
                self.edit.request_browse();
                self.process_edit_events();
            }
            Action::CycleTheme => self.switch_theme_and_save(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => self.quit(),
        }
    }

    /// 키 입력 처리: 찾아보기 다이얼로그 → 입력 위젯 → 호스트 액션 순
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.browse.is_some() {
            self.handle_browse_key(key);
            return;
        }

        if self.edit.handle_key(key, now) {
            self.process_edit_events();
            return;
        }

        if let Some(action) = find_action(key.modifiers, key.code) {
            self.execute_action(action);
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let Some(browse) = self.browse.as_mut() else {
            return;
        };
        match browse.handle_key(key, self.edit.index()) {
            BrowseOutcome::Pending => return,
            BrowseOutcome::Chosen(path) => {
                self.browse = None;
                if !self.edit.apply_browse_result(Some(&path)) {
                    self.set_toast(&format!("Not a directory: {}", path));
                }
            }
            BrowseOutcome::Cancelled => {
                self.browse = None;
                self.edit.apply_browse_result(None);
            }
        }
        self.process_edit_events();
    }

    /// 마우스 입력 처리 (다이얼로그가 열려 있으면 무시)
    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        if self.browse.is_some() || self.layout.is_too_small() {
            return;
        }
        let area = self.layout.areas().edit;
        if self.edit.handle_mouse(event, area, now) {
            self.process_edit_events();
        }
    }

    /// 다음 타이머 만료 시각
    pub fn next_deadline(&self) -> Option<Instant> {
        self.edit.next_deadline()
    }

    /// 만료된 타이머와 토스트 처리
    pub fn tick(&mut self, now: Instant) {
        self.edit.tick(now);
        self.process_edit_events();
        self.clear_expired_toast(now);
    }

    fn process_edit_events(&mut self) {
        for event in self.edit.take_events() {
            match event {
                DirectoryEditEvent::DirectoryChanged(path) => {
                    tracing::debug!(path = %path, "window title updated");
                    self.title = Some(path);
                }
                DirectoryEditEvent::BrowseRequested(start) => self.open_browse(&start),
            }
        }
    }

    fn open_browse(&mut self, start: &str) {
        match BrowseState::open(start, self.edit.index(), self.runtime.show_hidden) {
            Some(state) => self.browse = Some(state),
            None => {
                self.edit.apply_browse_result(None);
                self.set_toast("No file system roots available");
            }
        }
    }

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    fn clear_expired_toast(&mut self, now: Instant) {
        if let Some((_, time)) = &self.toast_message {
            if now.saturating_duration_since(*time) >= TOAST_DURATION {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < TOAST_DURATION {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    /// 히스토리 개수 (히스토리 기능이 없으면 None)
    pub fn history_count(&self) -> Option<usize> {
        self.edit
            .has_history()
            .then(|| self.edit.previous_directories().len())
    }
}

#[cfg(test)]
mod tests;
