//! Command implementations
//!
//! Each command is a module with an execute function that runs one mode of
//! the wrapper and returns the exit code to report.

pub mod bootstrap;
pub mod passthrough;
pub mod search;

// Re-export execute functions for convenience
pub use bootstrap::execute as bootstrap;
pub use passthrough::execute as passthrough;
pub use search::execute as search;
