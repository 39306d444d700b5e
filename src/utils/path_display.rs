use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 문자열을 최대 너비에 맞춰 중간 생략한다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text.width() <= max_width {
        return text.to_string();
    }

    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let side_width = (max_width - ELLIPSIS.width()) / 2;
    let start = take_prefix_by_width(text, side_width);
    let end = take_suffix_by_width(text, side_width);
    format!("{}{}{}", start, ELLIPSIS, end)
}

/// 경로를 최대 너비에 맞춰 축약한다.
///
/// `/`, `\` 어느 구분자로 쓰인 경로든 첫 세그먼트와 마지막 세그먼트들을 남기고
/// 가운데를 `...`으로 바꾼다. 구분자는 입력에 쓰인 것을 그대로 유지한다.
pub fn truncate_path(path: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if path.width() <= max_width {
        return path.to_string();
    }

    let separator = if path.contains('\\') && !path.contains('/') {
        '\\'
    } else {
        '/'
    };
    let trailing = path.ends_with(separator);
    let parts: Vec<&str> = path.split(separator).filter(|s| !s.is_empty()).collect();
    if parts.len() <= 2 {
        return truncate_from_start(path, max_width);
    }

    let first = if path.starts_with(separator) {
        format!("{}{}", separator, parts[0])
    } else {
        parts[0].to_string()
    };
    let marker = format!("{}{}", separator, ELLIPSIS);

    let fixed_width = first.width() + marker.width() + usize::from(trailing);
    if fixed_width >= max_width {
        return truncate_from_start(path, max_width);
    }
    let available_width = max_width - fixed_width;

    let mut end_parts: Vec<&str> = Vec::new();
    let mut current_width = 0;
    for part in parts.iter().skip(1).rev() {
        let part_width = part.width() + 1;
        if current_width + part_width > available_width {
            break;
        }
        end_parts.insert(0, part);
        current_width += part_width;
    }

    if end_parts.is_empty() {
        return truncate_from_start(path, max_width);
    }

    let sep = separator.to_string();
    let mut out = format!("{}{}{}{}", first, marker, separator, end_parts.join(&sep));
    if trailing {
        out.push(separator);
    }
    out
}

/// 홈 디렉토리 접두어를 `~`로 줄인다. (표시 전용)
pub fn shorten_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy().to_string();
    if home.is_empty() {
        return path.to_string();
    }

    if path == home {
        "~".to_string()
    } else if let Some(rest) = path.strip_prefix(&home) {
        if rest.starts_with('/') || rest.starts_with('\\') {
            format!("~{}", rest)
        } else {
            path.to_string()
        }
    } else {
        path.to_string()
    }
}

fn truncate_from_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }

    let suffix_width = max_width - ELLIPSIS.width();
    format!("{}{}", ELLIPSIS, take_suffix_by_width(text, suffix_width))
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.reverse();
    rev_chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_middle() {
        assert_eq!(truncate_middle("short", 10), "short");
        assert_eq!(truncate_middle("verylongstring", 10), "ver...ing");
        assert_eq!(truncate_middle("verylongstring", 4), "very");
    }

    #[test]
    fn test_truncate_path_short_is_unchanged() {
        assert_eq!(truncate_path("/tmp/docs/", 20), "/tmp/docs/");
    }

    #[test]
    fn test_truncate_path_keeps_tail_and_trailing_separator() {
        let path = "/home/user/projects/diredit/target/debug/build/";
        let truncated = truncate_path(path, 30);
        assert!(truncated.starts_with("/home/..."));
        assert!(truncated.ends_with("/build/"));
        assert!(truncated.width() <= 30);
    }

    #[test]
    fn test_truncate_path_backslash() {
        let path = r"C:\Users\someone\Documents\projects\diredit\src";
        let truncated = truncate_path(path, 24);
        assert!(truncated.starts_with(r"C:\..."));
        assert!(truncated.ends_with(r"\src"));
        assert!(truncated.width() <= 24);
    }
}
