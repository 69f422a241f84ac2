//! Environment variable overrides
//!
//! These tests mutate the process environment and must run sequentially:
//!
//! ```bash
//! cargo test -p rbc-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```
//!
//! Each test uses its own prefix so a leftover variable cannot leak into
//! another test.

use rbc_infrastructure::config::ConfigLoader;
use std::env;
use std::io::Write;

fn set_env(key: &str, value: &str) {
    // SAFETY: tests run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: tests run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_vars_are_loaded() {
    set_env("RBCENVA__REDIS__URL", "redis://from-env:6379");
    set_env("RBCENVA__REDIS__POOL_MAX_SIZE", "3");
    set_env("RBCENVA__PERFORMANCE__ENABLED", "false");

    let result = ConfigLoader::new().with_env_prefix("RBCENVA").load();

    remove_env("RBCENVA__REDIS__URL");
    remove_env("RBCENVA__REDIS__POOL_MAX_SIZE");
    remove_env("RBCENVA__PERFORMANCE__ENABLED");

    let config = result.expect("load config");
    assert_eq!(config.redis.url, "redis://from-env:6379");
    assert_eq!(config.redis.pool_max_size, 3);
    assert!(!config.performance.enabled);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    writeln!(file, "[logging]\nlevel = \"debug\"").expect("write temp config");
    set_env("RBCENVB__LOGGING__LEVEL", "error");

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("RBCENVB")
        .load();

    remove_env("RBCENVB__LOGGING__LEVEL");

    assert_eq!(result.expect("load config").logging.level, "error");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails_validation() {
    set_env("RBCENVC__REDIS__POOL_MAX_SIZE", "0");

    let result = ConfigLoader::new().with_env_prefix("RBCENVC").load();

    remove_env("RBCENVC__REDIS__POOL_MAX_SIZE");

    assert!(result.is_err());
}
