//! Despacho: Delivery-order preprocessing library
//!
//! A library for turning the raw Delivery Center extracts into a balanced,
//! all-numeric training table: join, clean, encode, derive the target and
//! oversample the minority class.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
