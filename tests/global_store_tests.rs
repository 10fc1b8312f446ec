// tests/global_store_tests.rs
//! The process-wide store. Its state can only be populated once per
//! process, so the whole lifecycle is walked through in a single test.

mod common;
use common::{missing_path, setup, write_config, NIPAP_CONF};

use nipap_config::{instance, is_loaded, obtain, obtain_with_defaults, ConfigError};
use tempfile::tempdir;

#[test]
fn process_wide_store_lifecycle() {
    setup();

    // nothing loaded yet: accessor and path-less obtain both fail
    assert!(!is_loaded());
    assert!(matches!(instance(), Err(ConfigError::Missing)));
    assert_eq!(
        obtain(None).unwrap_err().to_string(),
        "missing configuration file"
    );

    // a failed read does not count as initialisation
    let dir = tempdir().unwrap();
    let missing = missing_path(&dir);
    assert!(matches!(
        obtain(Some(&missing)),
        Err(ConfigError::Io { .. })
    ));
    assert!(!is_loaded());

    // first successful load
    let file = write_config(NIPAP_CONF);
    let config = obtain_with_defaults(Some(file.path()), [("listen", "127.0.0.1")]).unwrap();
    assert!(is_loaded());
    assert_eq!(config.path(), file.path());
    assert_eq!(config.get("nipapd", "port").unwrap().as_deref(), Some("1337"));
    assert_eq!(
        config.get("nipapd", "listen").unwrap().as_deref(),
        Some("127.0.0.1")
    );

    // every later call is a lookup, whatever path it is handed
    let other = write_config("[nipapd]\nport = 9999\n");
    let again = obtain(Some(other.path())).unwrap();
    let accessor = instance().unwrap();
    assert!(std::ptr::eq(config, again));
    assert!(std::ptr::eq(config, accessor));
    assert_eq!(accessor.get("nipapd", "port").unwrap().as_deref(), Some("1337"));

    // even a path that would fail now is ignored
    assert!(obtain(Some(&missing)).is_ok());
}
