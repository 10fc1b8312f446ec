// src/export/mod.rs
//! Export utilities for nipap-config
//!
//! Snapshots of a loaded configuration, for inspection and debugging.
//! Values are exported raw (no interpolation) — passwords included.

pub use json::{export_to_json, snapshot, to_json_string, Snapshot};

pub mod json;
