pub mod criteria;
pub mod paging;
pub mod record;
pub mod session;
pub mod time_serde;

pub use criteria::{AuditKind, SearchCriteria, normalize_object_name};
pub use paging::Pager;
pub use record::{
	AuditRecord, BindOutcome, BindRecord, ModRecord, Permission, PermissionFilter, UserRecord,
};
pub use session::Session;
