use crate::system::DirectoryIndex;
use std::path::Path;

/// 디렉토리 경로 검증기
///
/// 키 입력마다 호출되므로 메타데이터 조회만 한다.
pub struct PathValidator<'a> {
    index: &'a dyn DirectoryIndex,
}

impl<'a> PathValidator<'a> {
    pub fn new(index: &'a dyn DirectoryIndex) -> Self {
        Self { index }
    }

    /// 빈 문자열, 존재하지 않는 경로, 파일은 모두 false
    pub fn is_directory(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        self.index.is_directory(Path::new(path))
    }
}
