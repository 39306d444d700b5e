//! 디렉토리 경로 입력 위젯 상태
//!
//! 레이블, 입력 필드, 찾아보기 버튼, 자동완성 팝업, (선택적) 히스토리를 묶는다.
//! 렌더링은 `ui::components::directory_edit`가 담당한다.

use crate::core::completion::{
    CaseSensitivity, CompletionController, CompletionPopup, TimerEvent, DEFAULT_COMPLETION_DELAY,
};
use crate::core::key_filter::{FilterOutcome, KeyForwardingFilter};
use crate::core::normalizer::{PathNormalizer, Separator};
use crate::core::validator::PathValidator;
use crate::models::{HistoryList, TextBuffer};
use crate::system::{DirectoryIndex, FileSystem};
use crate::ui::layout::{contains, EditLayout};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// 위젯이 호스트에 알리는 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEditEvent {
    /// 유효한 디렉토리로 바뀜 (정규 경로, `/` 구분자)
    DirectoryChanged(String),
    /// 찾아보기 요청 (현재 입력 텍스트)
    BrowseRequested(String),
}

/// 시각적 유효성 표시
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityIndicator {
    Neutral,
    Error,
}

/// 포커스 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditFocus {
    #[default]
    Field,
    BrowseButton,
}

/// 위젯 생성 옵션
#[derive(Debug, Clone)]
pub struct DirectoryEditOptions {
    pub separator: Separator,
    pub accept_key: KeyCode,
    pub history: bool,
    pub completion_delay: Duration,
    pub case_sensitivity: CaseSensitivity,
    pub show_hidden: bool,
    pub placeholder: String,
    pub browse_text: String,
}

impl Default for DirectoryEditOptions {
    fn default() -> Self {
        Self {
            separator: Separator::native(),
            accept_key: KeyCode::Tab,
            history: true,
            completion_delay: DEFAULT_COMPLETION_DELAY,
            case_sensitivity: CaseSensitivity::Insensitive,
            show_hidden: false,
            placeholder: "Directory Path...".to_string(),
            browse_text: "Browse...".to_string(),
        }
    }
}

impl DirectoryEditOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn accept_key(mut self, key: KeyCode) -> Self {
        self.accept_key = key;
        self
    }

    /// 히스토리 기능 사용 여부
    pub fn history(mut self, enabled: bool) -> Self {
        self.history = enabled;
        self
    }

    pub fn completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
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
}

pub struct DirectoryEdit {
    label: String,
    placeholder: String,
    browse_text: String,
    buffer: TextBuffer,
    normalizer: PathNormalizer,
    index: Box<dyn DirectoryIndex>,
    completion: CompletionController,
    key_filter: KeyForwardingFilter,
    history: Option<HistoryList>,
    valid: bool,
    focus: EditFocus,
    events: Vec<DirectoryEditEvent>,
}

impl DirectoryEdit {
    /// 위젯 생성
    ///
    /// 첫 번째 파일 시스템 루트가 있으면 입력값으로 채운다.
    pub fn new(index: Box<dyn DirectoryIndex>, options: DirectoryEditOptions) -> Self {
        let normalizer = PathNormalizer::new(options.separator);
        let completion = CompletionController::new(normalizer)
            .delay(options.completion_delay)
            .case_sensitivity(options.case_sensitivity)
            .show_hidden(options.show_hidden);

        let mut edit = Self {
            label: String::new(),
            placeholder: options.placeholder,
            browse_text: options.browse_text,
            buffer: TextBuffer::new(),
            normalizer,
            index,
            completion,
            key_filter: KeyForwardingFilter::new(options.accept_key),
            history: options.history.then(HistoryList::new),
            valid: false,
            focus: EditFocus::Field,
            events: Vec::new(),
        };

        if let Some(root) = edit.index.roots().first() {
            let root = edit.normalizer.to_display_form(&root.to_string_lossy());
            edit.buffer.set(root);
            edit.text_changed(Instant::now());
        }

        edit
    }

    /// 실제 파일 시스템을 쓰는 위젯
    pub fn with_filesystem(options: DirectoryEditOptions) -> Self {
        Self::new(Box::new(FileSystem::new()), options)
    }

    /// 정규 경로 (`/` 구분자, 끝 구분자 포함). 비어 있으면 빈 문자열.
    pub fn directory_path(&self) -> String {
        let terminated = self.normalizer.ensure_trailing_separator(self.buffer.value());
        self.normalizer.to_canonical_form(&terminated)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        PathValidator::new(self.index.as_ref()).is_directory(self.buffer.value())
    }

    pub fn indicator(&self) -> ValidityIndicator {
        if self.valid {
            ValidityIndicator::Neutral
        } else {
            ValidityIndicator::Error
        }
    }

    /// 경로 설정
    ///
    /// 유효한 디렉토리가 아니면 아무것도 바꾸지 않고 false를 반환한다.
    pub fn set_directory_path(&mut self, path: &str) -> bool {
        if !PathValidator::new(self.index.as_ref()).is_directory(path) {
            tracing::debug!(path, "rejected directory path");
            return false;
        }

        if let Some(history) = &mut self.history {
            history.push(path);
        }

        let display = self.normalizer.to_display_form(path);
        let display = self.normalizer.ensure_trailing_separator(&display);
        self.buffer.set(display);
        self.text_changed(Instant::now());
        true
    }

    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.label = text.into();
    }

    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// 히스토리 목록 (히스토리 기능이 없으면 빈 목록)
    pub fn previous_directories(&self) -> Vec<String> {
        self.history
            .as_ref()
            .map(|h| h.entries().to_vec())
            .unwrap_or_default()
    }

    /// 히스토리 시드. 유효하지 않은 항목은 버린다.
    pub fn set_previous_directories<S: AsRef<str>>(&mut self, directories: &[S]) {
        let validator = PathValidator::new(self.index.as_ref());
        let Some(history) = &mut self.history else {
            return;
        };

        for dir in directories {
            let dir = dir.as_ref();
            if validator.is_directory(dir) {
                history.push(dir);
            } else {
                tracing::debug!(dir, "dropped invalid history entry");
            }
        }
    }

    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }

    pub fn text(&self) -> &str {
        self.buffer.value()
    }

    pub fn cursor_pos(&self) -> usize {
        self.buffer.cursor_pos()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn browse_text(&self) -> &str {
        &self.browse_text
    }

    pub fn focus(&self) -> EditFocus {
        self.focus
    }

    pub fn popup(&self) -> &CompletionPopup {
        self.completion.popup()
    }

    pub fn accept_key(&self) -> KeyCode {
        self.key_filter.trigger()
    }

    /// 위젯이 쓰는 디렉토리 인덱스 (찾아보기 다이얼로그와 공유)
    pub fn index(&self) -> &dyn DirectoryIndex {
        self.index.as_ref()
    }

    /// 쌓인 이벤트를 꺼낸다
    pub fn take_events(&mut self) -> Vec<DirectoryEditEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.completion.next_deadline()
    }

    /// 만료된 타이머 처리
    pub fn tick(&mut self, now: Instant) {
        for event in self.completion.poll(now) {
            match event {
                TimerEvent::Retrigger => self.completion.complete(self.index.as_ref()),
                TimerEvent::AcceptSettled => self.settle_accept(now),
            }
        }
    }

    /// 찾아보기 요청 이벤트 발생
    pub fn request_browse(&mut self) {
        self.completion.dismiss();
        self.events
            .push(DirectoryEditEvent::BrowseRequested(self.buffer.value().to_string()));
    }

    /// 찾아보기 다이얼로그 결과 반영 (`None`/빈 문자열은 취소)
    pub fn apply_browse_result(&mut self, selected: Option<&str>) -> bool {
        self.focus = EditFocus::Field;
        match selected {
            Some(path) if !path.is_empty() => self.set_directory_path(path),
            _ => false,
        }
    }

    /// 팝업 후보 수락 (키/마우스 공통)
    pub fn accept_candidate(&mut self, candidate: &str, now: Instant) {
        self.buffer.set(candidate);
        self.text_changed(now);
        self.completion.on_accepted(now);
    }

    /// 팝업의 특정 행 클릭
    pub fn click_candidate(&mut self, row: usize, now: Instant) -> bool {
        let Some(candidate) = self.completion.popup().candidates().get(row).cloned() else {
            return false;
        };
        self.completion.popup_mut().select(row);
        self.accept_candidate(&candidate, now);
        true
    }

    /// 키 입력 처리. 소비했으면 true.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match self.focus {
            EditFocus::BrowseButton => self.handle_button_key(key),
            EditFocus::Field => {
                if self.completion.popup().is_visible() && self.handle_popup_key(key, now) {
                    return true;
                }
                self.handle_field_key(key, now)
            }
        }
    }

    /// 마우스 입력 처리. `area`는 위젯 전체 영역 (입력 행 + 팝업 영역).
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect, now: Instant) -> bool {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }

        let layout = EditLayout::compute(area, &self.label, &self.browse_text);
        let (column, row) = (event.column, event.row);

        let popup = self.completion.popup();
        if popup.is_visible() {
            let popup_area = layout.popup_area(popup.candidates().len());
            if contains(popup_area, column, row) {
                let offset = popup.scroll_offset(popup_area.height as usize);
                let index = offset + (row - popup_area.y) as usize;
                return self.click_candidate(index, now);
            }
        }

        if contains(layout.button, column, row) {
            self.focus = EditFocus::BrowseButton;
            self.request_browse();
            return true;
        }

        if contains(layout.field, column, row) {
            self.focus = EditFocus::Field;
            return true;
        }

        false
    }

    fn handle_button_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.request_browse();
                true
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Left => {
                self.focus = EditFocus::Field;
                true
            }
            _ => false,
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if let FilterOutcome::Consumed(commands) =
            self.key_filter.filter(&key, self.completion.popup())
        {
            if let Some(candidate) = self.completion.popup_mut().apply(&commands) {
                self.accept_candidate(&candidate, now);
            }
            return true;
        }

        match key.code {
            KeyCode::Down => {
                self.completion.popup_mut().advance();
                true
            }
            KeyCode::Up => {
                self.completion.popup_mut().retreat();
                true
            }
            KeyCode::Enter => {
                let Some(candidate) = self.completion.popup().current().map(str::to_string) else {
                    return false;
                };
                self.completion.popup_mut().hide();
                self.accept_candidate(&candidate, now);
                true
            }
            KeyCode::Esc => {
                self.completion.dismiss();
                true
            }
            _ => false,
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let changed = match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.buffer.insert_char(c);
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.buffer.delete_prev_word(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                let had_text = !self.buffer.is_empty();
                self.buffer.clear();
                had_text
            }
            (_, KeyCode::Backspace) => self.buffer.backspace(),
            (_, KeyCode::Delete) => self.buffer.delete(),
            (_, KeyCode::Left) => {
                self.buffer.left();
                return true;
            }
            (_, KeyCode::Right) => {
                self.buffer.right();
                return true;
            }
            (_, KeyCode::Home) => {
                self.buffer.home();
                return true;
            }
            (_, KeyCode::End) => {
                self.buffer.end();
                return true;
            }
            (_, KeyCode::Up) => return self.cycle_history(true, now),
            (_, KeyCode::Down) => return self.cycle_history(false, now),
            // 편집 키가 아닌 수락 키만 버튼으로 포커스 이동
            (_, code) if code == self.key_filter.trigger() || code == KeyCode::BackTab => {
                self.completion.dismiss();
                self.focus = EditFocus::BrowseButton;
                return true;
            }
            _ => return false,
        };

        if changed {
            if let Some(history) = &mut self.history {
                history.reset_cursor();
            }
            self.text_changed(now);
        }
        true
    }

    fn cycle_history(&mut self, older: bool, now: Instant) -> bool {
        let Some(history) = &mut self.history else {
            return false;
        };
        let entry = if older {
            history.previous()
        } else {
            history.next()
        };
        let Some(entry) = entry.map(str::to_string) else {
            return false;
        };

        let display = self.normalizer.to_display_form(&entry);
        self.buffer.set(self.normalizer.ensure_trailing_separator(&display));
        self.text_changed(now);
        // 히스토리 탐색 중에는 위/아래 키가 팝업으로 가지 않도록 닫는다
        self.completion.dismiss();
        true
    }

    /// 수락 후 지연 처리: 디렉토리면 구분자를 붙이고 다음 세그먼트 후보 표시
    fn settle_accept(&mut self, now: Instant) {
        let text = self.buffer.value().to_string();
        let separator = self.normalizer.separator().as_char();
        if PathValidator::new(self.index.as_ref()).is_directory(&text) && !text.ends_with(separator)
        {
            self.buffer.set(format!("{}{}", text, separator));
            self.text_changed(now);
        }
        self.completion.resume_after_accept(self.index.as_ref());
    }

    /// 텍스트 변경 공통 처리
    fn text_changed(&mut self, now: Instant) {
        if self.normalizer.needs_display_fix(self.buffer.value()) {
            let fixed = self.normalizer.to_display_form(self.buffer.value());
            self.buffer.replace_same_len(fixed);
        }

        self.valid = self.is_valid();
        if self.valid {
            let path = self.directory_path();
            tracing::debug!(path = %path, "directory changed");
            self.events.push(DirectoryEditEvent::DirectoryChanged(path));
        }

        self.completion
            .on_text_changed(self.buffer.value(), self.index.as_ref(), now);
    }
}
