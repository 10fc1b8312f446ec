// src/error.rs
//! Public error types for the entire crate
//!
//! `ConfigError` covers everything that can go wrong while the store is
//! being populated; `LookupError` covers reads against a loaded config.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration file")]
    Missing,

    #[error("{source}: '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File contains no section headers.\nfile: {}, line: {line_no}\n{line:?}", .path.display())]
    MissingSectionHeader {
        path: PathBuf,
        line_no: usize,
        line: String,
    },

    #[error("Parsing error in {}, line {line_no}: {reason}\n{line:?}", .path.display())]
    Parse {
        path: PathBuf,
        line_no: usize,
        line: String,
        reason: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No section: {0:?}")]
    NoSection(String),

    #[error("No option {option:?} in section: {section:?}")]
    NoOption { section: String, option: String },

    #[error("Bad value substitution:\n\tsection: [{section}]\n\toption : {option}\n\tkey    : {reference}\n\trawval : {raw}")]
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
        raw: String,
    },

    #[error("Bad interpolation variable reference:\n\tsection: [{section}]\n\toption : {option}\n\tat     : {fragment:?}")]
    InterpolationSyntax {
        section: String,
        option: String,
        fragment: String,
    },

    #[error("Value interpolation too deeply recursive:\n\tsection: [{section}]\n\toption : {option}\n\trawval : {raw}")]
    InterpolationDepth {
        section: String,
        option: String,
        raw: String,
    },

    #[error("Not a valid {expected}: [{section}] {option} = {value:?}")]
    InvalidValue {
        section: String,
        option: String,
        value: Option<String>,
        expected: &'static str,
    },
}

impl LookupError {
    /// True for the two "not found" conditions (missing section or option)
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NoSection(_) | LookupError::NoOption { .. })
    }
}
