//! Tests for the error taxonomy

use rbc_domain::Error;
use std::io;

#[test]
fn test_connection_failure_classification() {
    assert!(Error::connection("reset by peer").is_connection_failure());

    let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
    assert!(Error::connection_with_source("connect", refused).is_connection_failure());

    assert!(!Error::command("WRONGTYPE").is_connection_failure());
    assert!(!Error::acquisition("timed out").is_connection_failure());
    assert!(!Error::PoolClosed.is_connection_failure());
}

#[test]
fn test_acquisition_failure_classification() {
    assert!(Error::acquisition("timed out").is_acquisition_failure());
    assert!(Error::PoolClosed.is_acquisition_failure());
    assert!(!Error::connection("gone").is_acquisition_failure());
}

#[test]
fn test_error_display() {
    let err = Error::command("WRONGTYPE Operation against a key holding the wrong kind of value");
    assert!(err.to_string().starts_with("Store command error: WRONGTYPE"));

    assert_eq!(Error::PoolClosed.to_string(), "Connection pool is closed");
}

#[test]
fn test_error_source_is_kept() {
    let source = io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe");
    let err = Error::connection_with_source("write failed", source);

    let inner = std::error::Error::source(&err).expect("source should be set");
    assert!(inner.to_string().contains("broken pipe"));
}

#[test]
fn test_io_error_conversion() {
    let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();

    match err {
        Error::Io { message, source } => {
            assert!(message.contains("missing"));
            assert!(source.is_some());
        }
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_infrastructure_error_is_neither_connection_nor_acquisition() {
    let err = Error::infrastructure("subscriber already set");

    assert!(!err.is_connection_failure());
    assert!(!err.is_acquisition_failure());
    assert!(err.to_string().starts_with("Infrastructure error"));
}

#[test]
fn test_every_variant_has_a_category() {
    let errors = [
        Error::connection("reset"),
        Error::acquisition("exhausted"),
        Error::PoolClosed,
        Error::command("WRONGTYPE"),
        Error::configuration("bad url"),
        Error::from(io::Error::other("disk")),
        Error::infrastructure("subscriber"),
        Error::internal("bug"),
    ];

    let categories: Vec<&str> = errors
        .iter()
        .map(|err| match err {
            Error::Connection { .. } => "connectivity",
            Error::Acquisition { .. } | Error::PoolClosed => "acquisition",
            Error::Command { .. } => "command",
            Error::Configuration { .. } | Error::Io { .. } | Error::Infrastructure { .. } => {
                "ambient"
            }
            Error::Internal { .. } => "internal",
        })
        .collect();

    assert_eq!(
        categories,
        vec![
            "connectivity",
            "acquisition",
            "acquisition",
            "command",
            "ambient",
            "ambient",
            "ambient",
            "internal"
        ]
    );
}
