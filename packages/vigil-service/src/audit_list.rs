//! Query-cache models for the bind and modification audit trails.
//!
//! Each model runs its search at most once per cache lifetime: the first call to `result`
//! validates the criteria, prepares them, and dispatches the backend search; later calls
//! return the cached set until `detach` drops it. Failures never escape `result`; they are
//! logged, kept in `last_error`, and the model caches an empty set instead.

use std::sync::Arc;

use vigil_domain::{AuditKind, BindRecord, ModRecord, SearchCriteria, Session};

use crate::{
	AuditService, Backends, BoxFuture, CacheState, Error, Result, ResultCache, ReviewService,
};

pub type BindListModel = AuditListModel<BindQuery>;
pub type ModListModel = AuditListModel<ModQuery>;

/// The trail-specific half of a query-cache model.
pub trait AuditQuery
where
	Self: Send + Sync,
{
	type Record: Send;

	const KIND: AuditKind;

	fn from_backends(backends: &Backends) -> Self;

	/// Prepares actionable `criteria` and runs the search.
	fn run<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a mut SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<Self::Record>>>;
}

pub struct BindQuery {
	audit: Arc<dyn AuditService>,
}
impl AuditQuery for BindQuery {
	type Record = BindRecord;

	const KIND: AuditKind = AuditKind::Bind;

	fn from_backends(backends: &Backends) -> Self {
		Self { audit: backends.audit.clone() }
	}

	fn run<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a mut SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<BindRecord>>> {
		Box::pin(async move {
			criteria.clear_dn();

			self.audit.search_binds(session, criteria).await
		})
	}
}

/// Modification records are indexed by internal user id, so a user id that cannot be
/// resolved aborts the search with [`Error::UserNotFound`].
pub struct ModQuery {
	audit: Arc<dyn AuditService>,
	review: Arc<dyn ReviewService>,
}
impl AuditQuery for ModQuery {
	type Record = ModRecord;

	const KIND: AuditKind = AuditKind::Mod;

	fn from_backends(backends: &Backends) -> Self {
		Self { audit: backends.audit.clone(), review: backends.review.clone() }
	}

	fn run<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a mut SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<ModRecord>>> {
		Box::pin(async move {
			criteria.clear_dn();
			criteria.normalize_object_name();

			crate::resolve_internal_user_id(self.review.as_ref(), session, criteria).await?;

			self.audit.search_mods(session, criteria).await
		})
	}
}

pub struct AuditListModel<Q>
where
	Q: AuditQuery,
{
	query: Q,
	session: Arc<Session>,
	criteria: Option<SearchCriteria>,
	cache: ResultCache<Q::Record>,
	last_error: Option<Error>,
}
impl<Q> AuditListModel<Q>
where
	Q: AuditQuery,
{
	pub fn new(backends: &Backends, session: Arc<Session>) -> Self {
		Self {
			query: Q::from_backends(backends),
			session,
			criteria: None,
			cache: ResultCache::new(),
			last_error: None,
		}
	}

	pub fn with_criteria(
		criteria: SearchCriteria,
		backends: &Backends,
		session: Arc<Session>,
	) -> Self {
		Self { criteria: Some(criteria), ..Self::new(backends, session) }
	}

	pub fn criteria(&self) -> Option<&SearchCriteria> {
		self.criteria.as_ref()
	}

	/// Attaches criteria for the next load. A cached set stays in place until `detach`.
	pub fn set_criteria(&mut self, criteria: SearchCriteria) {
		self.criteria = Some(criteria);
	}

	pub fn state(&self) -> CacheState {
		self.cache.state()
	}

	/// The failure behind the current empty result, if any.
	pub fn last_error(&self) -> Option<&Error> {
		self.last_error.as_ref()
	}

	pub async fn result(&mut self) -> &[Q::Record] {
		if !self.cache.is_cached() {
			let items = match self.try_load().await {
				Ok(items) => {
					tracing::debug!(
						kind = Q::KIND.as_str(),
						count = items.len(),
						"Audit result cached."
					);

					self.last_error = None;

					items
				},
				Err(err) => {
					tracing::warn!(
						kind = Q::KIND.as_str(),
						error = %err,
						"Audit search failed. Returning no records."
					);

					self.last_error = Some(err);

					Vec::new()
				},
			};

			self.cache.fill(items);
		}

		self.cache.items()
	}

	/// Runs the query pipeline without consulting or filling the cache.
	pub async fn try_load(&mut self) -> Result<Vec<Q::Record>> {
		let Some(criteria) = self.criteria.as_mut() else {
			tracing::debug!(kind = Q::KIND.as_str(), "No criteria attached.");

			return Ok(Vec::new());
		};

		if !Q::KIND.is_actionable(Some(&*criteria)) {
			tracing::debug!(kind = Q::KIND.as_str(), "Criteria are not actionable.");

			return Ok(Vec::new());
		}

		self.query.run(&self.session, criteria).await
	}

	/// Caches `items` as the current result and clears any earlier failure.
	pub fn replace_result(&mut self, items: Vec<Q::Record>) {
		tracing::debug!(kind = Q::KIND.as_str(), count = items.len(), "Result replaced.");

		self.last_error = None;

		self.cache.fill(items);
	}

	pub fn detach(&mut self) {
		self.cache.detach();
		self.criteria = None;
		self.last_error = None;
	}
}
