use reqwest::header::AUTHORIZATION;
use serde_json::Map;

#[test]
fn builds_bearer_auth_header() {
	let headers = vigil_providers::auth_headers(Some("secret"), &Map::new())
		.expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn omits_auth_header_without_api_key() {
	let mut defaults = Map::new();

	defaults.insert("x-tenant".to_string(), serde_json::json!("HOME"));

	let headers = vigil_providers::auth_headers(None, &defaults).expect("Failed to build headers.");

	assert!(headers.get(AUTHORIZATION).is_none());
	assert_eq!(headers.get("x-tenant").expect("Missing tenant header."), "HOME");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-retry".to_string(), serde_json::json!(3));

	assert!(vigil_providers::auth_headers(None, &defaults).is_err());
}
