// System Layer
pub mod filesystem;

pub use filesystem::{DirectoryIndex, FileSystem};
