// src/config.rs
//! Loaded configuration — sections, options and the lookup surface
//!
//! A `Config` is immutable once built. Option names are stored lower-cased;
//! section names are kept as written. Options of the DEFAULT section are
//! visible from every other section.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{DEFAULT_SECTION, FALSE_LITERALS, TRUE_LITERALS};
use crate::error::{ConfigError, LookupError};
use crate::interpolate::interpolate;
use crate::parser::{parse, RawIni};
use crate::Result;

type LookupResult<T> = std::result::Result<T, LookupError>;

/// Insertion-ordered option → value mapping. `None` is the no-value sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, Option<String>)>,
}

impl OptionMap {
    pub fn get(&self, option: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == option)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, option: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == option)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-assigning an option keeps its original position.
    pub(crate) fn insert(&mut self, option: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == option) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((option, value)),
        }
    }

    pub(crate) fn get_mut(&mut self, option: &str) -> Option<&mut Option<String>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == option)
            .map(|(_, v)| v)
    }
}

/// Keys are lower-cased, matching how option names are stored.
impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OptionMap::default();
        for (k, v) in iter {
            map.insert(k.as_ref().to_lowercase(), Some(v.into()));
        }
        map
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    defaults: OptionMap,
    sections: Vec<(String, OptionMap)>,
}

impl Config {
    /// Read and parse `path`, with `defaults` seeding the DEFAULT section.
    pub fn load(path: &Path, defaults: OptionMap) -> Result<Config> {
        debug!(path = %path.display(), "reading configuration file");

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        Config::parse_str(&text, path, defaults)
    }

    /// Parse already-read text; `path` is recorded and used in error messages.
    pub fn parse_str(text: &str, path: &Path, defaults: OptionMap) -> Result<Config> {
        let RawIni { defaults, sections } = parse(text, path, defaults)?;

        debug!(
            path = %path.display(),
            sections = sections.len(),
            defaults = defaults.len(),
            "configuration parsed"
        );

        Ok(Config {
            path: path.to_owned(),
            defaults,
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> &OptionMap {
        &self.defaults
    }

    /// Section names in file order, DEFAULT excluded
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn section(&self, section: &str) -> Option<&OptionMap> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, options)| options)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let option = option.to_lowercase();
        if section.is_empty() || section == DEFAULT_SECTION {
            return self.defaults.contains_key(&option);
        }
        match self.section(section) {
            Some(options) => options.contains_key(&option) || self.defaults.contains_key(&option),
            None => false,
        }
    }

    /// Options of `section` followed by DEFAULT options it does not shadow
    pub fn options(&self, section: &str) -> LookupResult<Vec<&str>> {
        let options = self
            .section(section)
            .ok_or_else(|| LookupError::NoSection(section.to_owned()))?;

        let mut names: Vec<&str> = options.keys().collect();
        names.extend(self.defaults.keys().filter(|k| !options.contains_key(k)));
        Ok(names)
    }

    /// Stored value with no interpolation applied
    pub fn get_raw(&self, section: &str, option: &str) -> LookupResult<Option<&str>> {
        let scope = self.scope(section)?;
        let option = option.to_lowercase();

        scope
            .and_then(|options| options.get(&option))
            .or_else(|| self.defaults.get(&option))
            .ok_or_else(|| LookupError::NoOption {
                section: section.to_owned(),
                option,
            })
    }

    /// Value with `%(name)s` references resolved against section + DEFAULT
    pub fn get(&self, section: &str, option: &str) -> LookupResult<Option<String>> {
        let Some(raw) = self.get_raw(section, option)? else {
            return Ok(None);
        };
        let scope = self.scope(section)?;

        interpolate(section, &option.to_lowercase(), raw, |name| {
            scope
                .and_then(|options| options.get(name))
                .or_else(|| self.defaults.get(name))
        })
        .map(Some)
    }

    /// Like [`Config::get`], but a missing section or option yields `fallback`
    pub fn get_or(
        &self,
        section: &str,
        option: &str,
        fallback: &str,
    ) -> LookupResult<Option<String>> {
        match self.get(section, option) {
            Err(e) if e.is_not_found() => Ok(Some(fallback.to_owned())),
            other => other,
        }
    }

    /// Interpolated `(option, value)` pairs: DEFAULT options first, then the
    /// section's own additions
    pub fn items(&self, section: &str) -> LookupResult<Vec<(String, Option<String>)>> {
        let scope = self.scope(section)?;

        let mut names: Vec<&str> = self.defaults.keys().collect();
        if let Some(options) = scope {
            names.extend(options.keys().filter(|k| !self.defaults.contains_key(k)));
        }

        names
            .into_iter()
            .map(|name| Ok((name.to_owned(), self.get(section, name)?)))
            .collect()
    }

    pub fn get_int(&self, section: &str, option: &str) -> LookupResult<i64> {
        self.convert(section, option, "integer", |v| v.parse().ok())
    }

    pub fn get_float(&self, section: &str, option: &str) -> LookupResult<f64> {
        self.convert(section, option, "float", |v| v.parse().ok())
    }

    pub fn get_bool(&self, section: &str, option: &str) -> LookupResult<bool> {
        self.convert(section, option, "boolean", |v| {
            let v = v.to_lowercase();
            if TRUE_LITERALS.contains(&v.as_str()) {
                Some(true)
            } else if FALSE_LITERALS.contains(&v.as_str()) {
                Some(false)
            } else {
                None
            }
        })
    }

    fn convert<T>(
        &self,
        section: &str,
        option: &str,
        expected: &'static str,
        f: impl FnOnce(&str) -> Option<T>,
    ) -> LookupResult<T> {
        let value = self.get(section, option)?;
        match value.as_deref().and_then(f) {
            Some(converted) => Ok(converted),
            None => Err(LookupError::InvalidValue {
                section: section.to_owned(),
                option: option.to_lowercase(),
                value,
                expected,
            }),
        }
    }

    // `Ok(None)` means "DEFAULT only": the DEFAULT name may be queried
    // directly even though it is not a real section.
    fn scope(&self, section: &str) -> LookupResult<Option<&OptionMap>> {
        match self.section(section) {
            Some(options) => Ok(Some(options)),
            None if section == DEFAULT_SECTION => Ok(None),
            None => Err(LookupError::NoSection(section.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> Config {
        Config::parse_str(text, Path::new("test.conf"), OptionMap::default()).unwrap()
    }

    #[test]
    fn option_map_reassignment_keeps_position() {
        let mut map = OptionMap::default();
        map.insert("a".into(), Some("1".into()));
        map.insert("b".into(), None);
        map.insert("a".into(), Some("2".into()));

        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(Some("2")));
        assert_eq!(map.get("b"), Some(None));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn option_names_are_case_insensitive() {
        let cfg = config("[Auth]\nDefault_Backend = local\n");
        assert_eq!(cfg.get_raw("Auth", "DEFAULT_BACKEND").unwrap(), Some("local"));
        assert!(cfg.has_option("Auth", "default_backend"));
        // section names are not folded
        assert!(!cfg.has_section("auth"));
    }

    #[test]
    fn default_section_can_be_queried_directly() {
        let cfg = config("[DEFAULT]\nport = 1337\n[nipapd]\n");
        assert_eq!(cfg.get("DEFAULT", "port").unwrap().as_deref(), Some("1337"));
        assert!(!cfg.has_section("DEFAULT"));
        assert!(cfg.has_option("", "port"));
        assert!(matches!(
            cfg.options("DEFAULT"),
            Err(LookupError::NoSection(_))
        ));
    }

    #[test]
    fn options_list_section_then_unshadowed_defaults() {
        let cfg = config("[DEFAULT]\nx = 1\ny = 2\n[s]\nz = 3\ny = 4\n");
        assert_eq!(cfg.options("s").unwrap(), ["z", "y", "x"]);
    }

    #[test]
    fn items_list_defaults_first() {
        let cfg = config("[DEFAULT]\nx = 1\ny = 2\n[s]\nz = 3\ny = 4\n");
        let items = cfg.items("s").unwrap();
        assert_eq!(
            items,
            vec![
                ("x".to_owned(), Some("1".to_owned())),
                ("y".to_owned(), Some("4".to_owned())),
                ("z".to_owned(), Some("3".to_owned())),
            ]
        );
    }
}
