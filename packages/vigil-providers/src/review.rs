use color_eyre::{Result, eyre};
use reqwest::StatusCode;
use serde_json::Value;

use vigil_domain::{Permission, PermissionFilter, Session, UserRecord};

/// Reads a user record. The gateway answers 404 or a null `user` when no such user exists.
pub async fn read_user(
	cfg: &vigil_config::Gateway,
	session: &Session,
	user_id: &str,
) -> Result<Option<UserRecord>> {
	let client = crate::client(cfg)?;
	let body = serde_json::json!({ "session": session, "user_id": user_id });
	let res = client
		.post(crate::endpoint(cfg, &cfg.paths.user_read))
		.headers(crate::headers(cfg)?)
		.json(&body)
		.send()
		.await?;

	if !user_found(res.status())? {
		return Ok(None);
	}

	let json: Value = res.json().await?;

	parse_user_response(json)
}

pub async fn find_permissions(
	cfg: &vigil_config::Gateway,
	session: &Session,
	filter: &PermissionFilter,
) -> Result<Vec<Permission>> {
	let client = crate::client(cfg)?;
	let body = serde_json::json!({ "session": session, "filter": filter });
	let res = client
		.post(crate::endpoint(cfg, &cfg.paths.permission_search))
		.headers(crate::headers(cfg)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	crate::parse_list(json, "permissions", "Permission search")
}

/// 404 means the user does not exist; any other non-success status is a failed read.
fn user_found(status: StatusCode) -> Result<bool> {
	if status == StatusCode::NOT_FOUND {
		return Ok(false);
	}
	if !status.is_success() {
		return Err(eyre::eyre!("User read failed with status {status}."));
	}

	Ok(true)
}

fn parse_user_response(json: Value) -> Result<Option<UserRecord>> {
	match json.get("user") {
		None => Err(eyre::eyre!("User read response is missing user object.")),
		Some(Value::Null) => Ok(None),
		Some(user) => Ok(Some(
			serde_json::from_value(user.clone())
				.map_err(|err| eyre::eyre!("User read response is malformed: {err}"))?,
		)),
	}
}
