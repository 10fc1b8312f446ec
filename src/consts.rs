// src/consts.rs
//! Shared constants — section names, limits and default paths

/// Name of the section whose options are visible from every other section
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Maximum number of `%(name)s` substitution rounds for a single value
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Where `nipapd` and friends look for their configuration by default
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nipap/nipap.conf";

/// Environment variable the `nipapcfg` binary reads the config path from
pub const CONFIG_PATH_ENV: &str = "NIPAP_CONFIG";

/// Accepted spellings for boolean options (compared lower-cased)
pub const TRUE_LITERALS: [&str; 4] = ["1", "yes", "true", "on"];
pub const FALSE_LITERALS: [&str; 4] = ["0", "no", "false", "off"];
