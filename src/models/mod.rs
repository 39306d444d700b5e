// Data Models
pub mod browse;
pub mod directory_edit;
pub mod history;
pub mod text_buffer;

pub use browse::{BrowseOutcome, BrowseState};
pub use directory_edit::{
    DirectoryEdit, DirectoryEditEvent, DirectoryEditOptions, EditFocus, ValidityIndicator,
};
pub use history::HistoryList;
pub use text_buffer::TextBuffer;
