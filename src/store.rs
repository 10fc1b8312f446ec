// src/store.rs
//! Process-wide configuration store
//!
//! The first successful `obtain` reads the file; every later call hands back
//! the same `Config` and ignores its path argument. A failed first load
//! leaves the store empty, so the next call starts over.
//!
//! Concurrent first calls are serialised: one caller reads the file while
//! the others wait for its result.

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::config::{Config, OptionMap};
use crate::error::ConfigError;
use crate::Result;

#[derive(Debug, Default)]
pub struct ConfigStore {
    cell: OnceCell<Config>,
}

impl ConfigStore {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn obtain(&self, cfg_path: Option<&Path>) -> Result<&Config> {
        self.obtain_with_defaults(cfg_path, std::iter::empty::<(&str, &str)>())
    }

    /// `default_values` seed the DEFAULT section; ignored once loaded.
    pub fn obtain_with_defaults<I, K, V>(
        &self,
        cfg_path: Option<&Path>,
        default_values: I,
    ) -> Result<&Config>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        if let Some(config) = self.cell.get() {
            trace!(path = %config.path().display(), "configuration already loaded");
            return Ok(config);
        }

        self.cell.get_or_try_init(|| {
            let path = cfg_path.ok_or(ConfigError::Missing)?;
            let defaults: OptionMap = default_values.into_iter().collect();

            let config = Config::load(path, defaults)?;
            debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        })
    }

    /// The loaded configuration, if any. Never touches the filesystem.
    pub fn get(&self) -> Option<&Config> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

static STORE: ConfigStore = ConfigStore::new();

/// Load (first call) or fetch (every later call) the process-wide config
pub fn obtain(cfg_path: Option<&Path>) -> Result<&'static Config> {
    STORE.obtain(cfg_path)
}

pub fn obtain_with_defaults<I, K, V>(
    cfg_path: Option<&Path>,
    default_values: I,
) -> Result<&'static Config>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    STORE.obtain_with_defaults(cfg_path, default_values)
}

/// Accessor for code running after startup; fails if nothing is loaded yet
pub fn instance() -> Result<&'static Config> {
    STORE.obtain(None)
}

pub fn is_loaded() -> bool {
    STORE.is_loaded()
}
