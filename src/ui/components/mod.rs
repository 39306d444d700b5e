// UI Components
pub mod browse_dialog;
pub mod caption_bar;
pub mod command_bar;
pub mod directory_edit;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use browse_dialog::BrowseDialog;
pub use caption_bar::CaptionBar;
pub use command_bar::CommandBar;
pub use directory_edit::DirectoryEditView;
pub use status_bar::StatusBar;
pub use warning::WarningScreen;
