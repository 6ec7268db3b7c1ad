//! Pipeline module - the preprocessing steps in dependency order

pub mod balance;
pub mod correlation;
pub mod encode;
pub mod error;
pub mod impute;
pub mod join;
pub mod loader;
pub mod select;
pub mod target;

pub use balance::*;
pub use correlation::*;
pub use encode::*;
pub use error::PipelineError;
pub use impute::*;
pub use join::*;
pub use loader::*;
pub use select::*;
pub use target::*;
