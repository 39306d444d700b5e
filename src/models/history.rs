/// 이전에 선택한 디렉토리 목록
///
/// 삽입 순서를 유지하고 중복을 허용한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryList {
    entries: Vec<String>,
    /// 위/아래 키 순환 위치
    cursor: Option<usize>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.push(path.into());
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 더 최근 항목 쪽으로 이동 (아래 키)
    pub fn next(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let idx = match self.cursor {
            None => return None,
            Some(idx) if idx >= last => last,
            Some(idx) => idx + 1,
        };
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// 더 오래된 항목 쪽으로 이동 (위 키, 처음에는 가장 최근 항목)
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = match self.cursor {
            None => self.entries.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }
}
