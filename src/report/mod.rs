//! Run report module

pub mod summary;

pub use summary::PipelineSummary;
