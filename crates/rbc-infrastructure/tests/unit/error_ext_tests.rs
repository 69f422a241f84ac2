//! Error context extension tests

use rbc_domain::error::Error;
use rbc_infrastructure::error_ext::ErrorContext;
use std::error::Error as _;
use std::io;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
}

#[test]
fn test_context_wraps_as_infrastructure() {
    let err = io_failure().context("Loading state").unwrap_err();

    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("Loading state: no such file"));
    assert!(err.source().is_some());
}

#[test]
fn test_with_context_is_lazy() {
    let mut called = false;
    let ok: Result<u8, io::Error> = Ok(7);

    let value = ok
        .with_context(|| {
            called = true;
            "never built"
        })
        .expect("ok passes through");

    assert_eq!(value, 7);
    assert!(!called);
}

#[test]
fn test_with_context_on_error() {
    let err = io_failure()
        .with_context(|| format!("Reading {}", "rbc.toml"))
        .unwrap_err();

    assert!(err.to_string().contains("Reading rbc.toml"));
}

#[test]
fn test_io_context() {
    let err = io_failure().io_context("Writing config").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_config_context() {
    let parsed: Result<u32, _> = "not-a-number".parse::<u32>();

    let err = parsed.config_context("Parsing pool size").unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("Parsing pool size"));
}
