//! 자동완성 팝업의 수락 키 처리
//!
//! 지정된 트리거 키(기본 Tab)가 팝업에 들어오면 키를 소비하고
//! 팝업에 보낼 명령을 합성한다.
//!
//! | 팝업 상태 | 합성 명령 |
//! |-----------|-----------|
//! | 선택 없음 | `AdvanceSelection` → `Confirm` |
//! | 선택 있음 | `Confirm` |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// 팝업에 전달할 명령
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    /// 다음 행으로 이동 (선택이 없으면 첫 행)
    AdvanceSelection,
    /// 현재 행 확정
    Confirm,
}

/// 필터가 들여다보는 팝업 상태
pub trait PopupView {
    /// 현재 강조된 행
    fn current_row(&self) -> Option<usize>;
}

/// 필터 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// 키를 소비함 (일반 키 처리로 넘기지 않음)
    Consumed(Vec<PopupCommand>),
    /// 관계없는 키
    Ignored,
}

/// 팝업 선택 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptState {
    NoSelection,
    HasSelection,
}

impl AcceptState {
    /// 팝업에서 매번 상태를 다시 읽는다
    pub fn of(popup: &dyn PopupView) -> Self {
        match popup.current_row() {
            Some(_) => AcceptState::HasSelection,
            None => AcceptState::NoSelection,
        }
    }
}

/// 수락 정책
pub trait KeyAcceptHandler {
    fn on_accept_key(&self, state: AcceptState) -> Vec<PopupCommand>;
}

/// 기본 정책: 선택이 없으면 첫 항목으로 이동 후 확정
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAcceptHandler;

impl KeyAcceptHandler for DefaultAcceptHandler {
    fn on_accept_key(&self, state: AcceptState) -> Vec<PopupCommand> {
        match state {
            AcceptState::NoSelection => {
                vec![PopupCommand::AdvanceSelection, PopupCommand::Confirm]
            }
            AcceptState::HasSelection => vec![PopupCommand::Confirm],
        }
    }
}

pub struct KeyForwardingFilter {
    trigger: KeyCode,
    handler: Box<dyn KeyAcceptHandler>,
}

impl KeyForwardingFilter {
    pub fn new(trigger: KeyCode) -> Self {
        Self {
            trigger,
            handler: Box::new(DefaultAcceptHandler),
        }
    }

    /// 수락 정책 교체
    pub fn with_handler(mut self, handler: Box<dyn KeyAcceptHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn trigger(&self) -> KeyCode {
        self.trigger
    }

    pub fn filter(&self, key: &KeyEvent, popup: &dyn PopupView) -> FilterOutcome {
        if key.kind != KeyEventKind::Press || key.code != self.trigger {
            return FilterOutcome::Ignored;
        }
        FilterOutcome::Consumed(self.handler.on_accept_key(AcceptState::of(popup)))
    }
}

impl Default for KeyForwardingFilter {
    fn default() -> Self {
        Self::new(KeyCode::Tab)
    }
}
