//! Dispatcher-level tests: wire format, signing, response
//! classification and last-request introspection.

mod common;

use std::collections::BTreeMap;
use std::io::Write;

use serde_json::json;
use shutterbox::{Client, Credentials, Error, Params};

fn credentials() -> Credentials {
    Credentials::new("consumer_key", "consumer_secret", "token", "token_secret")
}

#[test]
fn test_get_sends_params_in_query_string() {
    let server = common::spawn_one(200, common::ok_envelope(json!("ok")));
    let client = Client::new(&server.host());

    let envelope = client
        .get("/test.json", Params::new().set("foo", "bar").set("spam", "eggs"))
        .unwrap();
    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.result, json!("ok"));

    let request = server.received();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path_only(), "/test.json");
    let query = request.query_pairs();
    assert!(query.contains(&("foo".to_string(), "bar".to_string())));
    assert!(query.contains(&("spam".to_string(), "eggs".to_string())));
    assert!(request.body.is_empty());
}

#[test]
fn test_get_without_credentials_is_unsigned() {
    let server = common::spawn_one(200, common::ok_envelope(json!(null)));
    let client = Client::new(&server.host());

    client.get("/test.json", Params::new()).unwrap();

    let request = server.received();
    assert!(request.header("authorization").is_none());
    assert_eq!(request.query(), "");
}

#[test]
fn test_get_with_credentials_is_signed() {
    let server = common::spawn_one(200, common::ok_envelope(json!(null)));
    let client = Client::with_credentials(&server.host(), credentials());

    client.get("/test.json", Params::new().set("foo", "bar")).unwrap();

    let request = server.received();
    let auth = request.header("authorization").expect("no auth header");
    assert!(auth.starts_with("OAuth "), "unexpected header: {}", auth);
    assert!(auth.contains("oauth_consumer_key=\"consumer_key\""));
    assert!(auth.contains("oauth_signature="));
    // Protocol parameters stay in the header, never in the query
    assert!(!request.query().contains("oauth_"));
}

#[test]
fn test_post_sends_params_in_form_body() {
    let server = common::spawn_one(200, common::ok_envelope(json!(true)));
    let client = Client::with_credentials(&server.host(), credentials());

    client
        .post("/test.json", Params::new().set("foo", "bar").set("spam", "eggs"))
        .unwrap();

    let request = server.received();
    assert_eq!(request.method, "POST");
    assert_eq!(request.query(), "");
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("application/x-www-form-urlencoded"));
    let form = request.form_pairs();
    assert!(form.contains(&("foo".to_string(), "bar".to_string())));
    assert!(form.contains(&("spam".to_string(), "eggs".to_string())));
    assert!(request.header("authorization").is_some());
}

#[test]
fn test_envelope_code_outranks_http_status() {
    // HTTP says failure but the envelope says success; the envelope wins
    let server = common::spawn_one(500, common::ok_envelope(json!("fine")));
    let client = Client::new(&server.host());

    let envelope = client.get("/test.json", Params::new()).unwrap();
    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.result, json!("fine"));
}

#[test]
fn test_error_envelope_within_successful_http_response() {
    let server = common::spawn_one(200, common::envelope(500, "broken", json!(null)));
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(error.is_api());
    assert_eq!(error.code(), Some(500));
}

#[test]
fn test_http_404_outranks_envelope() {
    let server = common::spawn_one(404, common::ok_envelope(json!("ignored")));
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(error.is_not_found(), "got {:?}", error);
}

#[test]
fn test_duplicate_photo_has_its_own_error() {
    let body = common::envelope(409, "Error: This photo already exists", json!(null));
    let server = common::spawn_one(409, body);
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(error.is_duplicate());
    // Duplicates still classify as API errors
    assert!(error.is_api());
    assert_eq!(error.code(), Some(409));
}

#[test]
fn test_plain_409_is_not_a_duplicate() {
    let server = common::spawn_one(409, common::envelope(409, "Conflict", json!(null)));
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(error.is_api());
    assert!(!error.is_duplicate());
}

#[test]
fn test_unparseable_success_body_is_a_decode_error() {
    let server = common::spawn_one(200, "not json at all".to_string());
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(matches!(error, Error::Json(_)), "got {:?}", error);
}

#[test]
fn test_unparseable_failure_body_is_an_api_error() {
    let server = common::spawn_one(500, "<html>oops</html>".to_string());
    let client = Client::new(&server.host());

    let error = client.get("/test.json", Params::new()).unwrap_err();
    assert!(error.is_api());
    assert_eq!(error.code(), Some(500));
}

#[test]
fn test_get_raw_returns_body_verbatim() {
    let body = common::ok_envelope(json!({"deep": ["structure"]}));
    let server = common::spawn_one(200, body.clone());
    let client = Client::new(&server.host());

    let raw = client.get_raw("/test.json", Params::new()).unwrap();
    assert_eq!(raw, body);
}

#[test]
fn test_get_raw_still_fails_on_http_error() {
    let server = common::spawn_one(500, "boom".to_string());
    let client = Client::new(&server.host());

    let error = client.get_raw("/test.json", Params::new()).unwrap_err();
    assert!(error.is_api());
    assert_eq!(error.code(), Some(500));
}

#[test]
fn test_last_exchange_is_recorded() {
    let body = common::ok_envelope(json!(["x"]));
    let server = common::spawn_one(200, body.clone());
    let client = Client::new(&server.host());

    client
        .get("/test.json", Params::new().set("foo", "bar"))
        .unwrap();

    // The recorded URL excludes the query string
    assert_eq!(
        client.last_url().unwrap(),
        format!("http://{}/test.json", server.addr())
    );
    let mut expected = BTreeMap::new();
    expected.insert("foo".to_string(), "bar".to_string());
    assert_eq!(client.last_params().unwrap(), expected);
    let response = client.last_response().unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, body);
}

#[test]
fn test_failed_requests_are_recorded_too() {
    let server = common::spawn_one(500, "broken".to_string());
    let client = Client::new(&server.host());

    let _ = client.get("/test.json", Params::new());

    let response = client.last_response().unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "broken");
}

#[test]
fn test_clones_share_last_exchange_state() {
    let server = common::spawn_one(200, common::ok_envelope(json!(null)));
    let client = Client::new(&server.host());
    let clone = client.clone();

    clone.get("/test.json", Params::new()).unwrap();

    assert_eq!(
        client.last_url().unwrap(),
        format!("http://{}/test.json", server.addr())
    );
}

#[test]
fn test_api_version_prefixes_the_path() {
    let server = common::spawn_one(200, common::ok_envelope(json!(null)));
    let client = Client::new(&server.host()).with_api_version(2);

    client.get("/test.json", Params::new()).unwrap();

    assert_eq!(server.received().path_only(), "/v2/test.json");
}

#[test]
fn test_multipart_post_puts_params_in_query() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"jpeg-bytes-here").unwrap();

    let server = common::spawn_one(200, common::ok_envelope(json!({"id": "1a"})));
    let client = Client::with_credentials(&server.host(), credentials());

    let mut files = BTreeMap::new();
    files.insert("photo".to_string(), file.path().to_path_buf());
    client
        .post_files("/photo/upload.json", Params::new().set("title", "Vacation"), &files)
        .unwrap();

    let request = server.received();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path_only(), "/photo/upload.json");
    // Request parameters ride in the query string for multipart posts
    assert!(request
        .query_pairs()
        .contains(&("title".to_string(), "Vacation".to_string())));
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    assert!(request.header("authorization").is_some());

    let body = request.body_text();
    assert!(body.contains("name=\"photo\""), "body: {}", body);
    assert!(body.contains("jpeg-bytes-here"));
}

#[test]
fn test_post_files_without_credentials_fails_before_io() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"data").unwrap();

    // Nothing listens on this host; the error must come from the missing
    // credentials, not from a connection attempt
    let client = Client::new("localhost:1");
    let mut files = BTreeMap::new();
    files.insert("photo".to_string(), file.path().to_path_buf());

    let error = client
        .post_files("/photo/upload.json", Params::new(), &files)
        .unwrap_err();
    assert!(matches!(error, Error::AuthRequired));
}

#[test]
fn test_from_config_file_path() {
    let server = common::spawn_one(200, common::ok_envelope(json!(null)));

    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "# test profile").unwrap();
    writeln!(config, "host = {}", server.host()).unwrap();
    writeln!(config, "consumerKey = consumer_key").unwrap();
    writeln!(config, "consumerSecret = consumer_secret").unwrap();
    writeln!(config, "token = token").unwrap();
    writeln!(config, "tokenSecret = token_secret").unwrap();

    let client = Client::from_config(config.path().to_str()).unwrap();
    assert_eq!(client.host(), server.host());

    client.get("/test.json", Params::new()).unwrap();
    assert!(server.received().header("authorization").is_some());
}
