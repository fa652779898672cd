//! Cadence Core - Configuration and error types for the Cadence loop driver
//!
//! This crate provides the types every other Cadence crate depends on:
//! - `LoopConfig` - target step rate and idle threshold, with TOML loading
//! - Error types and Result alias

mod config;
mod error;

pub use config::LoopConfig;
pub use error::{CadenceError, Result};
