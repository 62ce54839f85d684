use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use vigil_config::{Config, DEFAULT_PAGE_SIZE, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.expect("Sample config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("vigil_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> vigil_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = vigil_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.gateway.api_base, "https://directory.example.test/fortress");
	assert!(cfg.gateway.api_key.is_none());
	assert_eq!(cfg.gateway.paths.bind_search, "/rest/auditSearchBinds");
	assert_eq!(cfg.gateway.paths.mod_search, "/audit/mods/search");
	assert_eq!(cfg.listing.page_size, 16);
}

#[test]
fn listing_section_is_optional() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");

	root.as_table_mut().expect("Sample config must be a table.").remove("listing");

	let cfg: Config =
		toml::from_str(&toml::to_string(&root).expect("Failed to render config."))
			.expect("Config without listing must parse.");

	assert_eq!(cfg.listing.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn page_size_must_be_positive() {
	let err = load_payload(sample_toml_with("listing", "page_size", Value::Integer(0)))
		.expect_err("Expected page size validation error.");

	assert!(
		err.to_string().contains("listing.page_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn api_base_requires_http_scheme() {
	let err = load_payload(sample_toml_with(
		"gateway",
		"api_base",
		Value::String("ldap://directory.example.test".to_string()),
	))
	.expect_err("Expected api_base validation error.");

	assert!(
		err.to_string().contains("gateway.api_base must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.gateway.timeout_ms = 0;

	let err = vigil_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("gateway.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn gateway_paths_must_be_absolute() {
	let mut cfg = base_config();

	cfg.gateway.paths.user_read = "review/users/read".to_string();

	let err = vigil_config::validate(&cfg).expect_err("Expected path validation error.");

	assert!(
		err.to_string().contains("gateway.paths.user_read must start with /."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.gateway.default_headers.insert("x-retry".to_string(), serde_json::json!(3));

	let err = vigil_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(
		err.to_string().contains("gateway.default_headers.x-retry must be a string."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("vigil_config_test_missing_file.toml");

	let err = vigil_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err =
		load_payload("[service\nlog_level = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
}
