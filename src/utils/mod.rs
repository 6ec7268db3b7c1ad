//! Terminal helpers: progress indicators and styled output

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
