// src/export/json.rs
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

use crate::config::{Config, OptionMap};

pub const EXPORT_FORMAT: &str = "nipap-config-v1";

/// Serializable view of a `Config`; sections and options keep file order.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub export_format: &'static str,
    pub exporter_version: &'static str,
    pub path: &'a Path,
    pub defaults: &'a OptionMap,
    #[serde(serialize_with = "ordered_sections")]
    pub sections: Vec<(&'a str, &'a OptionMap)>,
}

impl Serialize for OptionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (option, value) in self.iter() {
            map.serialize_entry(option, &value)?;
        }
        map.end()
    }
}

fn ordered_sections<S: Serializer>(
    sections: &[(&str, &OptionMap)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(sections.len()))?;
    for (name, options) in sections {
        map.serialize_entry(name, options)?;
    }
    map.end()
}

pub fn snapshot(config: &Config) -> Snapshot<'_> {
    Snapshot {
        export_format: EXPORT_FORMAT,
        exporter_version: env!("CARGO_PKG_VERSION"),
        path: config.path(),
        defaults: config.defaults(),
        sections: config
            .sections()
            .into_iter()
            .filter_map(|name| config.section(name).map(|options| (name, options)))
            .collect(),
    }
}

/// Pretty-printed JSON; valueless options become `null`.
pub fn to_json_string(config: &Config) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot(config))
}

/// Write the JSON snapshot of `config` to `path`.
///
/// SECURITY WARNING: values are written verbatim, database and auth
/// passwords included.
pub fn export_to_json(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, to_json_string(config)?)?;
    tracing::debug!(
        sections = config.sections().len(),
        out = %path.display(),
        "exported configuration snapshot"
    );
    Ok(())
}
