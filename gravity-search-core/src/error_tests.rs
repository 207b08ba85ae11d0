use super::*;

#[test]
fn test_error_messages() {
    let err = Error::MissingElement("title".to_string());
    assert_eq!(err.to_string(), "Required element not found: #title");

    let err = Error::Storage("quota exceeded".to_string());
    assert_eq!(err.to_string(), "Storage error: quota exceeded");
}

#[test]
fn test_encoding_error_conversion() {
    let parse_failure = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
    let err: Error = parse_failure.into();
    assert!(matches!(err, Error::Encoding(_)));
    assert!(err.to_string().starts_with("History encoding error"));
}
