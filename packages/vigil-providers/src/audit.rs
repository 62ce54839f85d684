use color_eyre::Result;
use serde_json::Value;

use vigil_domain::{BindRecord, ModRecord, SearchCriteria, Session};

pub async fn search_binds(
	cfg: &vigil_config::Gateway,
	session: &Session,
	criteria: &SearchCriteria,
) -> Result<Vec<BindRecord>> {
	let json = post_search(cfg, &cfg.paths.bind_search, session, criteria).await?;

	crate::parse_list(json, "records", "Bind search")
}

pub async fn search_mods(
	cfg: &vigil_config::Gateway,
	session: &Session,
	criteria: &SearchCriteria,
) -> Result<Vec<ModRecord>> {
	let json = post_search(cfg, &cfg.paths.mod_search, session, criteria).await?;

	crate::parse_list(json, "records", "Modification search")
}

async fn post_search(
	cfg: &vigil_config::Gateway,
	path: &str,
	session: &Session,
	criteria: &SearchCriteria,
) -> Result<Value> {
	let client = crate::client(cfg)?;
	let body = serde_json::json!({ "session": session, "criteria": criteria });

	tracing::debug!(path, session_id = %session.session_id, "Posting audit search.");

	let res = client
		.post(crate::endpoint(cfg, path))
		.headers(crate::headers(cfg)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(json)
}
