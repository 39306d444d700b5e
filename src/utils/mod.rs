// Utilities
pub mod error;
pub mod logging;
pub mod path_display;
