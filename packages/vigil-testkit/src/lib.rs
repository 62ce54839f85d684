use std::sync::{
	Arc, Mutex,
	atomic::{AtomicBool, AtomicUsize, Ordering},
};

use time::{Duration, OffsetDateTime, macros::datetime};

use vigil_domain::{
	BindOutcome, BindRecord, ModRecord, Permission, PermissionFilter, SearchCriteria, Session,
	UserRecord,
};
use vigil_service::{AuditService, Backends, BoxFuture, Error, Result, ReviewService};

const EPOCH: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

/// Which backing call a counter tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
	SearchBinds,
	SearchMods,
	ReadUser,
	FindPermissions,
}

/// In-memory audit and review backend that counts every call it receives.
#[derive(Default)]
pub struct SpyBackend {
	binds: Vec<BindRecord>,
	mods: Vec<ModRecord>,
	users: Vec<UserRecord>,
	permissions: Vec<Permission>,
	fail_searches: AtomicBool,
	fail_user_reads: AtomicBool,
	search_binds: AtomicUsize,
	search_mods: AtomicUsize,
	read_user: AtomicUsize,
	find_permissions: AtomicUsize,
	last_criteria: Mutex<Option<SearchCriteria>>,
	last_filter: Mutex<Option<PermissionFilter>>,
}
impl SpyBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_binds(mut self, binds: Vec<BindRecord>) -> Self {
		self.binds = binds;

		self
	}

	pub fn with_mods(mut self, mods: Vec<ModRecord>) -> Self {
		self.mods = mods;

		self
	}

	pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
		self.users = users;

		self
	}

	pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
		self.permissions = permissions;

		self
	}

	/// Makes every search and permission lookup fail until reset.
	pub fn fail_searches(&self, fail: bool) {
		self.fail_searches.store(fail, Ordering::SeqCst);
	}

	/// Makes user reads fail with a backend error instead of answering.
	pub fn fail_user_reads(&self, fail: bool) {
		self.fail_user_reads.store(fail, Ordering::SeqCst);
	}

	pub fn calls(&self, call: Call) -> usize {
		let counter = match call {
			Call::SearchBinds => &self.search_binds,
			Call::SearchMods => &self.search_mods,
			Call::ReadUser => &self.read_user,
			Call::FindPermissions => &self.find_permissions,
		};

		counter.load(Ordering::SeqCst)
	}

	/// Criteria received by the most recent search.
	pub fn last_criteria(&self) -> Option<SearchCriteria> {
		self.last_criteria.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_filter(&self) -> Option<PermissionFilter> {
		self.last_filter.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn backends(self: &Arc<Self>) -> Backends {
		Backends::new(self.clone(), self.clone())
	}

	fn record_search(&self, counter: &AtomicUsize, criteria: &SearchCriteria) -> Result<()> {
		counter.fetch_add(1, Ordering::SeqCst);
		*self.last_criteria.lock().unwrap_or_else(|err| err.into_inner()) = Some(criteria.clone());

		if self.fail_searches.load(Ordering::SeqCst) {
			return Err(Error::Backend { message: "Injected search failure.".to_string() });
		}

		Ok(())
	}
}

impl AuditService for SpyBackend {
	fn search_binds<'a>(
		&'a self,
		_session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<BindRecord>>> {
		let outcome = self.record_search(&self.search_binds, criteria).map(|()| {
			self.binds
				.iter()
				.filter(|record| criteria.user_id().is_none_or(|user_id| record.subject == user_id))
				.cloned()
				.collect()
		});

		Box::pin(async move { outcome })
	}

	fn search_mods<'a>(
		&'a self,
		_session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<ModRecord>>> {
		let outcome = self.record_search(&self.search_mods, criteria).map(|()| {
			self.mods
				.iter()
				.filter(|record| {
					criteria.internal_user_id().is_none_or(|actor| record.actor == actor)
						&& criteria
							.object_name
							.as_deref()
							.is_none_or(|name| record.object_name == name)
				})
				.cloned()
				.collect()
		});

		Box::pin(async move { outcome })
	}
}

impl ReviewService for SpyBackend {
	fn read_user<'a>(
		&'a self,
		_session: &'a Session,
		user_id: &'a str,
	) -> BoxFuture<'a, Result<Option<UserRecord>>> {
		self.read_user.fetch_add(1, Ordering::SeqCst);

		let outcome = if self.fail_user_reads.load(Ordering::SeqCst) {
			Err(Error::Backend { message: "Injected user read failure.".to_string() })
		} else {
			Ok(self.users.iter().find(|user| user.user_id == user_id).cloned())
		};

		Box::pin(async move { outcome })
	}

	fn find_permissions<'a>(
		&'a self,
		_session: &'a Session,
		filter: &'a PermissionFilter,
	) -> BoxFuture<'a, Result<Vec<Permission>>> {
		self.find_permissions.fetch_add(1, Ordering::SeqCst);
		*self.last_filter.lock().unwrap_or_else(|err| err.into_inner()) = Some(filter.clone());

		let outcome = if self.fail_searches.load(Ordering::SeqCst) {
			Err(Error::Backend { message: "Injected permission search failure.".to_string() })
		} else {
			Ok(self
				.permissions
				.iter()
				.filter(|permission| {
					permission.admin == filter.admin
						&& permission.object_name.starts_with(&filter.object_name)
				})
				.cloned()
				.collect())
		};

		Box::pin(async move { outcome })
	}
}

pub fn session() -> Arc<Session> {
	Arc::new(Session::new("admin", true))
}

pub fn bind_record(subject: &str, minutes: i64, outcome: BindOutcome) -> BindRecord {
	BindRecord {
		timestamp: EPOCH + Duration::minutes(minutes),
		outcome,
		subject: subject.to_string(),
	}
}

pub fn mod_record(actor: &str, object_name: &str, operation: &str, minutes: i64) -> ModRecord {
	ModRecord {
		timestamp: EPOCH + Duration::minutes(minutes),
		operation: operation.to_string(),
		object_name: object_name.to_string(),
		actor: actor.to_string(),
		changes: Vec::new(),
	}
}

pub fn user(user_id: &str, internal_id: &str) -> UserRecord {
	UserRecord { user_id: user_id.to_string(), internal_id: internal_id.to_string() }
}

pub fn permission(object_name: &str, operation_name: &str, admin: bool) -> Permission {
	Permission {
		object_name: object_name.to_string(),
		object_id: None,
		operation_name: operation_name.to_string(),
		kind: None,
		admin,
	}
}
