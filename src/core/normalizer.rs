//! 경로 구분자 정규화
//!
//! 화면에 표시하는 텍스트는 호스트의 기본 구분자를, 외부로 알리는 값은
//! 항상 `/`를 쓴다.

use serde::{Deserialize, Serialize};

/// 경로 구분자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    /// `/`
    Slash,
    /// `\`
    Backslash,
}

impl Separator {
    /// 호스트 플랫폼의 기본 구분자
    pub fn native() -> Self {
        if std::path::MAIN_SEPARATOR == '\\' {
            Separator::Backslash
        } else {
            Separator::Slash
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Backslash => '\\',
        }
    }

    /// 반대쪽 구분자
    pub fn foreign(self) -> char {
        match self {
            Separator::Slash => '\\',
            Separator::Backslash => '/',
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::native()
    }
}

/// 구분자 기준 문자 여부 (`/`, `\` 둘 다)
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathNormalizer {
    separator: Separator,
}

impl PathNormalizer {
    pub fn new(separator: Separator) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// 모든 구분자를 기본 구분자로 치환
    pub fn to_display_form(&self, path: &str) -> String {
        path.replace(self.separator.foreign(), &self.separator.as_char().to_string())
    }

    /// 모든 구분자를 `/`로 치환
    pub fn to_canonical_form(&self, path: &str) -> String {
        path.replace('\\', "/")
    }

    /// 끝에 기본 구분자가 없으면 붙인다. 빈 문자열은 그대로 둔다.
    pub fn ensure_trailing_separator(&self, path: &str) -> String {
        let sep = self.separator.as_char();
        if path.is_empty() || path.ends_with(sep) {
            path.to_string()
        } else {
            format!("{}{}", path, sep)
        }
    }

    /// 표시 형식이 아닌 구분자가 섞여 있는지 확인
    pub fn needs_display_fix(&self, path: &str) -> bool {
        path.contains(self.separator.foreign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[&str] = &[
        r"C:\dev/projects\diredit",
        "/usr/local\\bin/",
        r"\\server\share/dir",
        "plain",
        "",
    ];

    #[test]
    fn test_display_form_slash_only() {
        let normalizer = PathNormalizer::new(Separator::Slash);
        for path in MIXED {
            let display = normalizer.to_display_form(path);
            assert!(!display.contains('\\'), "{display}");
        }
        assert_eq!(normalizer.to_display_form(r"a\b/c"), "a/b/c");
    }

    #[test]
    fn test_display_form_backslash_only() {
        let normalizer = PathNormalizer::new(Separator::Backslash);
        for path in MIXED {
            let display = normalizer.to_display_form(path);
            assert!(!display.contains('/'), "{display}");
        }
        assert_eq!(normalizer.to_display_form("C:/dev/x"), r"C:\dev\x");
    }

    #[test]
    fn test_canonical_form_forward_slash_only() {
        for separator in [Separator::Slash, Separator::Backslash] {
            let normalizer = PathNormalizer::new(separator);
            for path in MIXED {
                assert!(!normalizer.to_canonical_form(path).contains('\\'));
            }
        }
        let normalizer = PathNormalizer::new(Separator::Backslash);
        assert_eq!(normalizer.to_canonical_form(r"C:\dev\x\"), "C:/dev/x/");
    }

    #[test]
    fn test_ensure_trailing_separator_idempotent() {
        for separator in [Separator::Slash, Separator::Backslash] {
            let normalizer = PathNormalizer::new(separator);
            for path in MIXED {
                let once = normalizer.ensure_trailing_separator(path);
                let twice = normalizer.ensure_trailing_separator(&once);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_ensure_trailing_separator_values() {
        let slash = PathNormalizer::new(Separator::Slash);
        assert_eq!(slash.ensure_trailing_separator("/tmp"), "/tmp/");
        assert_eq!(slash.ensure_trailing_separator("/tmp/"), "/tmp/");
        assert_eq!(slash.ensure_trailing_separator(""), "");

        let backslash = PathNormalizer::new(Separator::Backslash);
        assert_eq!(backslash.ensure_trailing_separator(r"C:\dev"), r"C:\dev\");
    }

    #[test]
    fn test_native_separator_matches_platform() {
        assert_eq!(Separator::native().as_char(), std::path::MAIN_SEPARATOR);
    }
}
