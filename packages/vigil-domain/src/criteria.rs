use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::record::UserRecord;

/// Which audit trail a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
	Bind,
	Mod,
}
impl AuditKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bind => "bind",
			Self::Mod => "mod",
		}
	}

	/// Returns whether `criteria` narrows the search enough to be worth issuing.
	///
	/// Bind searches only honour the user id and the date window. Modification searches also
	/// accept an object or operation name on its own. Absent criteria never qualify.
	pub fn is_actionable(self, criteria: Option<&SearchCriteria>) -> bool {
		let Some(criteria) = criteria else {
			return false;
		};
		let window = criteria.begin_date.is_some() || criteria.end_date.is_some();

		match self {
			Self::Bind => criteria.user_id().is_some() || window,
			Self::Mod =>
				criteria.user_id().is_some()
					|| non_empty(&criteria.object_name).is_some()
					|| non_empty(&criteria.operation_name).is_some()
					|| window,
		}
	}
}

/// Filters an operator supplies to narrow an audit query.
///
/// `internal_user_id` is derived by the query pipeline from `user_id` and cannot be set by
/// callers, including through deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
	pub user_id: Option<String>,
	pub object_name: Option<String>,
	pub operation_name: Option<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub begin_date: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub end_date: Option<OffsetDateTime>,
	pub dn: Option<String>,
	#[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
	internal_user_id: Option<String>,
}
impl SearchCriteria {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());

		self
	}

	pub fn with_object_name(mut self, object_name: impl Into<String>) -> Self {
		self.object_name = Some(object_name.into());

		self
	}

	pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
		self.operation_name = Some(operation_name.into());

		self
	}

	pub fn with_begin_date(mut self, begin_date: OffsetDateTime) -> Self {
		self.begin_date = Some(begin_date);

		self
	}

	pub fn with_end_date(mut self, end_date: OffsetDateTime) -> Self {
		self.end_date = Some(end_date);

		self
	}

	pub fn with_dn(mut self, dn: impl Into<String>) -> Self {
		self.dn = Some(dn.into());

		self
	}

	/// The user id, if set to a non-empty value.
	pub fn user_id(&self) -> Option<&str> {
		non_empty(&self.user_id)
	}

	pub fn internal_user_id(&self) -> Option<&str> {
		non_empty(&self.internal_user_id)
	}

	/// The user id still waiting for internal id resolution.
	pub fn pending_user_id(&self) -> Option<&str> {
		if self.internal_user_id().is_some() {
			return None;
		}

		self.user_id()
	}

	/// Records the internal id of the user record returned for the pending user id.
	///
	/// Only applies while resolution is pending. The directory may return the user id in its
	/// canonical spelling, so the record's `user_id` is not compared. Returns whether the id
	/// was recorded.
	pub fn record_resolved_user(&mut self, user: &UserRecord) -> bool {
		if self.pending_user_id().is_none() {
			return false;
		}
		if user.internal_id.is_empty() {
			return false;
		}

		self.internal_user_id = Some(user.internal_id.clone());

		true
	}

	pub fn clear_dn(&mut self) {
		self.dn = None;
	}

	/// Rewrites a dotted `container.operation` object name to its leaf component.
	pub fn normalize_object_name(&mut self) {
		if let Some(raw) = non_empty(&self.object_name) {
			let leaf = normalize_object_name(raw).to_string();

			self.object_name = Some(leaf);
		}
	}
}

/// Returns the component after the last `.` of `raw`, or `raw` when it has no separator.
pub fn normalize_object_name(raw: &str) -> &str {
	raw.rsplit_once('.').map(|(_, leaf)| leaf).unwrap_or(raw)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}
