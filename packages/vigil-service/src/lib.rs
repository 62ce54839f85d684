pub mod audit_list;
pub mod cache;
pub mod picker;
pub mod resolve;

mod error;

pub use audit_list::{
	AuditListModel, AuditQuery, BindListModel, BindQuery, ModListModel, ModQuery,
};
pub use cache::{CacheState, ResultCache};
pub use error::{Error, Result};
pub use picker::{PermissionPicker, PickerEvent};
pub use resolve::resolve_internal_user_id;

use std::{future::Future, pin::Pin, sync::Arc};

use vigil_domain::{
	BindRecord, ModRecord, Permission, PermissionFilter, SearchCriteria, Session, UserRecord,
};
use vigil_providers::{audit, review};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Searches over the bind and modification audit trails.
pub trait AuditService
where
	Self: Send + Sync,
{
	fn search_binds<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<BindRecord>>>;

	fn search_mods<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<ModRecord>>>;
}

/// Read access to directory users and permissions.
pub trait ReviewService
where
	Self: Send + Sync,
{
	/// Resolves `Ok(None)` when no user has `user_id`.
	fn read_user<'a>(
		&'a self,
		session: &'a Session,
		user_id: &'a str,
	) -> BoxFuture<'a, Result<Option<UserRecord>>>;

	fn find_permissions<'a>(
		&'a self,
		session: &'a Session,
		filter: &'a PermissionFilter,
	) -> BoxFuture<'a, Result<Vec<Permission>>>;
}

/// Backing collaborators shared by every model built from them.
#[derive(Clone)]
pub struct Backends {
	pub audit: Arc<dyn AuditService>,
	pub review: Arc<dyn ReviewService>,
}
impl Backends {
	pub fn new(audit: Arc<dyn AuditService>, review: Arc<dyn ReviewService>) -> Self {
		Self { audit, review }
	}

	pub fn gateway(cfg: vigil_config::Gateway) -> Self {
		let backend = Arc::new(GatewayBackend { cfg });

		Self { audit: backend.clone(), review: backend }
	}
}

/// Both services served by the configured HTTP gateway.
pub struct GatewayBackend {
	cfg: vigil_config::Gateway,
}

impl AuditService for GatewayBackend {
	fn search_binds<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<BindRecord>>> {
		Box::pin(async move { Ok(audit::search_binds(&self.cfg, session, criteria).await?) })
	}

	fn search_mods<'a>(
		&'a self,
		session: &'a Session,
		criteria: &'a SearchCriteria,
	) -> BoxFuture<'a, Result<Vec<ModRecord>>> {
		Box::pin(async move { Ok(audit::search_mods(&self.cfg, session, criteria).await?) })
	}
}

impl ReviewService for GatewayBackend {
	fn read_user<'a>(
		&'a self,
		session: &'a Session,
		user_id: &'a str,
	) -> BoxFuture<'a, Result<Option<UserRecord>>> {
		Box::pin(async move { Ok(review::read_user(&self.cfg, session, user_id).await?) })
	}

	fn find_permissions<'a>(
		&'a self,
		session: &'a Session,
		filter: &'a PermissionFilter,
	) -> BoxFuture<'a, Result<Vec<Permission>>> {
		Box::pin(async move { Ok(review::find_permissions(&self.cfg, session, filter).await?) })
	}
}
