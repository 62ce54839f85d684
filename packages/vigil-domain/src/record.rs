use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindOutcome {
	Success,
	Failure,
}

/// A logged authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindRecord {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub outcome: BindOutcome,
	pub subject: String,
}

/// A logged administrative change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub operation: String,
	pub object_name: String,
	/// Internal id of the administrator that made the change.
	pub actor: String,
	#[serde(default)]
	pub changes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecord {
	Bind(BindRecord),
	Mod(ModRecord),
}
impl AuditRecord {
	pub fn timestamp(&self) -> OffsetDateTime {
		match self {
			Self::Bind(record) => record.timestamp,
			Self::Mod(record) => record.timestamp,
		}
	}
}
impl From<BindRecord> for AuditRecord {
	fn from(record: BindRecord) -> Self {
		Self::Bind(record)
	}
}
impl From<ModRecord> for AuditRecord {
	fn from(record: ModRecord) -> Self {
		Self::Mod(record)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
	pub object_name: String,
	#[serde(default)]
	pub object_id: Option<String>,
	pub operation_name: String,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	#[serde(default)]
	pub admin: bool,
}

/// Search arguments for permission lookups. Names match by prefix on the directory side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFilter {
	pub object_name: String,
	pub operation_name: String,
	pub admin: bool,
}
impl PermissionFilter {
	pub fn by_object(object_name: impl Into<String>, admin: bool) -> Self {
		Self { object_name: object_name.into(), operation_name: String::new(), admin }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	pub user_id: String,
	pub internal_id: String,
}
