//! ServiceName parsing and display

use std::str::FromStr;
use taxpay_domain::{Error, ServiceName};

#[test]
fn test_canonical_names_round_trip() {
    for name in ServiceName::ALL {
        assert_eq!(ServiceName::from_str(name.as_str()).unwrap(), name);
    }
}

#[test]
fn test_storage_service_name() {
    assert_eq!(ServiceName::Storage.to_string(), "StorageService");
    assert_eq!(
        "PaymentService".parse::<ServiceName>().unwrap(),
        ServiceName::Payment
    );
}

#[test]
fn test_unknown_service_is_rejected() {
    let err = "CacheService".parse::<ServiceName>().unwrap_err();
    match err {
        Error::UnknownService { name } => assert_eq!(name, "CacheService"),
        other => panic!("Expected UnknownService, got {other:?}"),
    }
}

#[test]
fn test_names_are_case_sensitive() {
    assert!("storageservice".parse::<ServiceName>().is_err());
}

#[test]
fn test_serialized_form_matches_lookup_name() {
    for name in ServiceName::ALL {
        let json = serde_json::to_value(name).unwrap();
        assert_eq!(json, serde_json::json!(name.as_str()));
        let text = json.as_str().unwrap();
        assert_eq!(text.parse::<ServiceName>().unwrap(), name);
        assert_eq!(serde_json::from_value::<ServiceName>(json).unwrap(), name);
    }
    assert!(serde_json::from_str::<ServiceName>(r#""Storage""#).is_err());
}
