pub mod audit;
pub mod review;

use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(api_key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn client(cfg: &vigil_config::Gateway) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

pub(crate) fn endpoint(cfg: &vigil_config::Gateway, path: &str) -> String {
	format!("{}{}", cfg.api_base, path)
}

pub(crate) fn headers(cfg: &vigil_config::Gateway) -> Result<HeaderMap> {
	auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)
}

pub(crate) fn parse_list<T>(json: Value, field: &str, label: &str) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let Some(items) = json.get(field).and_then(|v| v.as_array()) else {
		return Err(eyre::eyre!("{label} response is missing {field} array."));
	};
	let mut out = Vec::with_capacity(items.len());

	for (index, item) in items.iter().enumerate() {
		let parsed = serde_json::from_value(item.clone())
			.map_err(|err| eyre::eyre!("{label} item {index} is malformed: {err}"))?;

		out.push(parsed);
	}

	Ok(out)
}
