/// 한 줄 입력 버퍼
///
/// `cursor_pos`는 바이트 인덱스이며 항상 문자 경계에 놓인다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor_pos: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// 값 교체 (커서는 끝으로)
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor_pos = self.value.len();
    }

    /// 길이가 같은 치환 결과로 교체 (커서 유지)
    pub fn replace_same_len(&mut self, value: String) {
        debug_assert_eq!(value.len(), self.value.len());
        self.value = value;
        self.cursor_pos = self.cursor_pos.min(self.value.len());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }

        let prev = self.prev_char_start(self.cursor_pos);
        self.value.remove(prev);
        self.cursor_pos = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor_pos < self.value.len() {
            self.value.remove(self.cursor_pos);
            return true;
        }
        false
    }

    pub fn left(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }

        self.cursor_pos = self.prev_char_start(self.cursor_pos);
    }

    pub fn right(&mut self) {
        if self.cursor_pos >= self.value.len() {
            return;
        }

        self.cursor_pos = self.value[self.cursor_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor_pos + i)
            .unwrap_or(self.value.len());
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.value.len();
    }

    /// 커서 앞 경로 세그먼트 하나 삭제 (Ctrl+W)
    pub fn delete_prev_word(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }

        let original = self.cursor_pos;
        let mut pos = original;

        // 1) 커서 왼쪽의 구분자들을 먼저 건너뜀
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            let ch = self.value[prev..pos].chars().next().unwrap_or_default();
            if Self::is_word_delimiter(ch) {
                pos = prev;
            } else {
                break;
            }
        }

        // 2) 세그먼트 시작까지 이동
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            let ch = self.value[prev..pos].chars().next().unwrap_or_default();
            if Self::is_word_delimiter(ch) {
                break;
            }
            pos = prev;
        }

        self.value.replace_range(pos..original, "");
        self.cursor_pos = pos;
        true
    }

    fn prev_char_start(&self, cursor_pos: usize) -> usize {
        self.value[..cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn is_word_delimiter(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '/' | '\\' | ':')
    }
}
