//! Quantify Library
//!
//! Pricing engine for custom service quotes

pub mod cache;
pub mod config;
pub mod market;
pub mod models;
pub mod session;
pub mod trades;
pub mod types;
