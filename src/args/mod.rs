//! Command-line argument parsing and handling.

pub mod definition;
pub mod page;
pub mod prefs;
pub mod serve;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Command, run};
pub use utils::determine_log_level;
