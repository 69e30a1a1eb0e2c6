//! Unit tests for domain error types

use taxpay_domain::{Error, ServiceName};

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("Invalid input provided");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "Invalid input provided"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_construction_error_names_service() {
    let error = Error::construction(ServiceName::Storage, "disk full");
    let display = error.to_string();
    assert!(display.contains("StorageService"));
    assert!(display.contains("disk full"));
}

#[test]
fn test_outside_provider_names_provider() {
    let display = Error::OutsideProvider.to_string();
    assert!(display.contains("ServiceProvider"));
}

#[test]
fn test_usage_errors_are_classified() {
    assert!(Error::OutsideProvider.is_usage_error());
    assert!(Error::NotReady.is_usage_error());
    assert!(
        Error::NotInitialized {
            service: Some(ServiceName::Api)
        }
        .is_usage_error()
    );
    assert!(!Error::construction(ServiceName::Api, "boom").is_usage_error());
    assert!(!Error::timeout("init", 10).is_usage_error());
}

#[test]
fn test_network_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::network_with_source("request failed", io);
    match error {
        Error::Network { message, source } => {
            assert_eq!(message, "request failed");
            assert!(source.is_some());
        }
        _ => panic!("Expected Network error"),
    }
}

#[test]
fn test_io_error_exposes_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::Io {
        message: "Failed to read store".to_string(),
        source: Some(Box::new(io)),
    };
    assert_eq!(error.to_string(), "I/O error: Failed to read store");
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(source.to_string(), "missing");
}
