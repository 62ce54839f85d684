use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Authenticated identity that scopes every backing call.
///
/// Callers own the session; query models share it read-only for their whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	pub session_id: Uuid,
	pub user_id: String,
	#[serde(default)]
	pub admin: bool,
	#[serde(with = "crate::time_serde")]
	pub authenticated_at: OffsetDateTime,
}
impl Session {
	pub fn new(user_id: impl Into<String>, admin: bool) -> Self {
		Self {
			session_id: Uuid::new_v4(),
			user_id: user_id.into(),
			admin,
			authenticated_at: OffsetDateTime::now_utc(),
		}
	}
}
