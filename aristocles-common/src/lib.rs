//! # Aristocles Common Library
//!
//! Shared code for the Aristocles bot crates:
//! - Error types
//! - Configuration loading (CLI → ENV → TOML → compiled defaults)

pub mod config;
pub mod error;

pub use error::{Error, Result};
