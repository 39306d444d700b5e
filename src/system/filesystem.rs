use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 디렉토리 이름 인덱스
///
/// 경로 위젯이 파일 시스템에 묻는 질의는 이 trait 하나로 모은다.
/// 테스트나 다른 호스트는 구현을 바꿔 끼울 수 있다.
pub trait DirectoryIndex {
    /// 경로가 존재하는 디렉토리인지 확인
    fn is_directory(&self, path: &Path) -> bool;

    /// 디렉토리 바로 아래의 하위 디렉토리 이름 목록
    fn child_directories(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// 파일 시스템 루트 (Unix: `/`, Windows: 존재하는 드라이브)
    fn roots(&self) -> Vec<PathBuf>;
}

/// `std::fs` 기반 기본 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 숨김 디렉토리 여부 판단
    pub fn is_hidden_name(name: &str) -> bool {
        name.starts_with('.')
    }
}

impl DirectoryIndex for FileSystem {
    fn is_directory(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        path.is_dir()
    }

    fn child_directories(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir)? {
            // 읽을 수 없는 엔트리는 스킵
            let Ok(entry) = entry else { continue };

            // symlink는 대상이 디렉토리일 때만 포함
            if !entry.path().is_dir() {
                continue;
            }

            names.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(names)
    }

    fn roots(&self) -> Vec<PathBuf> {
        #[cfg(windows)]
        {
            (b'A'..=b'Z')
                .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
                .filter(|drive| drive.is_dir())
                .collect()
        }

        #[cfg(not(windows))]
        {
            let root = PathBuf::from("/");
            if root.is_dir() {
                vec![root]
            } else {
                Vec::new()
            }
        }
    }
}
