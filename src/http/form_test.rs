#[cfg(test)]
use super::*;

use crate::{ErrorKind, logging::capture::CapturedLogs};

fn decode(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

#[test]
fn spaces_become_plus() {
    let params = [("full name", "John Doe")];
    let content = FormUrlEncodedContent::new(Some(&params[..])).unwrap();

    assert_eq!(content.as_bytes(), b"full+name=John+Doe");
    assert_eq!(content.content_type(), "application/x-www-form-urlencoded");
}

#[test]
fn missing_params_are_rejected() {
    let err = FormUrlEncodedContent::new(None::<&[(&str, &str)]>).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn empty_params_give_empty_body() {
    let params: [(&str, &str); 0] = [];
    let content = FormUrlEncodedContent::new(Some(&params[..])).unwrap();

    assert!(content.is_empty());
    assert_eq!(content.content_type(), FORM_CONTENT_TYPE);
}

#[test]
fn pairs_keep_order_and_duplicates() {
    let params = vec![
        ("token".to_string(), "ABC123".to_string()),
        ("fields[0]".to_string(), "record_id".to_string()),
        ("fields[0]".to_string(), "age".to_string()),
        ("content".to_string(), "record".to_string()),
    ];
    let content = FormUrlEncodedContent::new(Some(&params[..])).unwrap();

    assert_eq!(
        content.as_bytes(),
        b"token=ABC123&fields%5B0%5D=record_id&fields%5B0%5D=age&content=record"
    );
    assert_eq!(decode(content.as_bytes()), params);
}

#[test]
fn empty_and_absent_values_encode_as_nothing() {
    let params = [("a", None), ("", Some("x")), ("b", Some(""))];
    let content = FormUrlEncodedContent::new(Some(&params[..])).unwrap();

    assert_eq!(content.as_bytes(), b"a=&=x&b=");
}

#[test]
fn reserved_and_unicode_round_trip() {
    let params = vec![
        ("filterLogic".to_string(), "[age] > 30 & [sex] = '1'".to_string()),
        ("comment".to_string(), "crème brûlée + 100% 日本".to_string()),
        ("marks".to_string(), "-_.!*()~".to_string()),
        ("path".to_string(), "a/b?c=d#e".to_string()),
    ];
    let content = FormUrlEncodedContent::new(Some(&params[..])).unwrap();
    let text = std::str::from_utf8(content.as_bytes()).unwrap();

    assert!(text.is_ascii());
    assert!(!text.contains("%20"));
    assert!(text.contains("marks=-_.!*()%7E"));
    assert_eq!(decode(content.as_bytes()), params);
}

#[test]
fn literal_percent_twenty_in_input_is_escaped_not_rewritten() {
    assert_eq!(encode_form_component("50%20off"), "50%2520off");
    assert_eq!(encode_form_component("a b%20c"), "a+b%2520c");
}

#[test]
fn configured_encoding_is_used() {
    let opts = FormEncoderOptsBuilder::default()
        .encoding(encoding_rs::SHIFT_JIS)
        .build()
        .unwrap();
    let encoder = FormEncoder::new(opts);
    let params = [("q", "x y")];

    assert_eq!(encoder.encoding(), encoding_rs::SHIFT_JIS);
    assert_eq!(encoder.encode(Some(&params[..])).unwrap().as_bytes(), b"q=x+y");
    assert_eq!(FormEncoder::default().encoding(), encoding_rs::WINDOWS_1252);
}

#[test]
fn encode_logs_to_injected_logger() {
    let (logger, logs) = CapturedLogs::logger();
    let opts = FormEncoderOptsBuilder::default().logger(logger).build().unwrap();
    let params = [("content", "version")];

    FormEncoder::new(opts).encode(Some(&params[..])).unwrap();

    let logs = logs.contents();
    assert!(logs.contains("encoded form body"));
    assert!(logs.contains("pairs=1"));
}
