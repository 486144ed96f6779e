use super::*;

#[test]
fn status_error_displays_server_message() {
    let err = TransportError::Status { status: 400, message: "Restaurant already exists".to_owned() };
    assert_eq!(err.to_string(), "Restaurant already exists");
}

#[test]
fn retryable_covers_network_rate_limit_and_server_errors() {
    assert!(TransportError::Request("connection refused".to_owned()).retryable());
    assert!(TransportError::Status { status: 429, message: String::new() }.retryable());
    assert!(TransportError::Status { status: 503, message: String::new() }.retryable());
    assert!(!TransportError::Status { status: 400, message: String::new() }.retryable());
    assert!(!TransportError::Decode("eof".to_owned()).retryable());
    assert!(!TransportError::InvalidUrl("nope".to_owned()).retryable());
}

#[test]
fn search_params_default_to_first_page_best_match() {
    let params = SearchParams::default();
    assert_eq!(params.page, 1);
    assert_eq!(params.sort_option, "bestMatch");
    assert!(params.search_query.is_empty());
}

#[test]
fn transport_reply_parses_message_body() {
    let reply: TransportReply = serde_json::from_str(r#"{"message":"Restaurant created"}"#).unwrap();
    assert_eq!(reply.message, "Restaurant created");
}
