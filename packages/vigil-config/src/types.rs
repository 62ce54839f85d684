use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_PAGE_SIZE: u32 = 16;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub gateway: Gateway,
	#[serde(default)]
	pub listing: Listing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Connection settings for the HTTP gateway that fronts the audit and review services.
#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
	pub api_base: String,
	/// Optional. Sent as a bearer token when present.
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	#[serde(default)]
	pub paths: GatewayPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayPaths {
	#[serde(default = "default_bind_search_path")]
	pub bind_search: String,
	#[serde(default = "default_mod_search_path")]
	pub mod_search: String,
	#[serde(default = "default_user_read_path")]
	pub user_read: String,
	#[serde(default = "default_permission_search_path")]
	pub permission_search: String,
}
impl Default for GatewayPaths {
	fn default() -> Self {
		Self {
			bind_search: default_bind_search_path(),
			mod_search: default_mod_search_path(),
			user_read: default_user_read_path(),
			permission_search: default_permission_search_path(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
	#[serde(default = "default_page_size")]
	pub page_size: u32,
}
impl Default for Listing {
	fn default() -> Self {
		Self { page_size: default_page_size() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_bind_search_path() -> String {
	"/audit/binds/search".to_string()
}

fn default_mod_search_path() -> String {
	"/audit/mods/search".to_string()
}

fn default_user_read_path() -> String {
	"/review/users/read".to_string()
}

fn default_permission_search_path() -> String {
	"/review/permissions/search".to_string()
}

fn default_page_size() -> u32 {
	DEFAULT_PAGE_SIZE
}
