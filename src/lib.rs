// src/lib.rs
//! nipap-config — process-wide INI configuration for NIPAP services
//!
//! Features:
//! - One shared configuration per process, loaded on first use
//! - INI format with valueless options, a DEFAULT section and continuations
//! - `%(name)s` interpolation at lookup time
//! - Typed getters and JSON snapshots

pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod store;

mod interpolate;
mod parser;

// Re-export everything users need at the crate root
pub use config::{Config, OptionMap};
pub use error::{ConfigError, LookupError};
pub use export::export_to_json;
pub use store::{instance, is_loaded, obtain, obtain_with_defaults, ConfigStore};

pub type Result<T> = std::result::Result<T, ConfigError>;
