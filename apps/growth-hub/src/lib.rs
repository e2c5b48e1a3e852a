//! # Growth Hub Library
//!
//! This library exposes the Growth Hub modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use error::AppError;

// Re-export growth_core for convenience
pub use growth_core;
