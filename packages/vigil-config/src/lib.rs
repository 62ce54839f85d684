mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, DEFAULT_PAGE_SIZE, Gateway, GatewayPaths, Listing, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let api_base = cfg.gateway.api_base.trim();

	if api_base.is_empty() {
		return Err(Error::Validation {
			message: "gateway.api_base must be non-empty.".to_string(),
		});
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "gateway.api_base must start with http:// or https://.".to_string(),
		});
	}
	if cfg.gateway.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "gateway.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, path) in [
		("gateway.paths.bind_search", &cfg.gateway.paths.bind_search),
		("gateway.paths.mod_search", &cfg.gateway.paths.mod_search),
		("gateway.paths.user_read", &cfg.gateway.paths.user_read),
		("gateway.paths.permission_search", &cfg.gateway.paths.permission_search),
	] {
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with /.") });
		}
	}
	for (key, value) in &cfg.gateway.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("gateway.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.listing.page_size == 0 {
		return Err(Error::Validation {
			message: "listing.page_size must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.gateway.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.gateway.api_key = None;
	}

	let trimmed = cfg.gateway.api_base.trim().trim_end_matches('/').to_string();

	cfg.gateway.api_base = trimmed;
}
