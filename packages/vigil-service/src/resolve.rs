use vigil_domain::{SearchCriteria, Session};

use crate::{Error, Result, ReviewService};

/// Fills in the internal user id that modification records are indexed by.
///
/// A no-op unless `criteria` has a user id and no internal id yet. Any failure to map the
/// user id, including backend errors, is reported as [`Error::UserNotFound`] so the caller
/// never searches with a mismatched identifier.
pub async fn resolve_internal_user_id(
	review: &dyn ReviewService,
	session: &Session,
	criteria: &mut SearchCriteria,
) -> Result<()> {
	let Some(user_id) = criteria.pending_user_id().map(str::to_string) else {
		return Ok(());
	};
	let user = match review.read_user(session, &user_id).await {
		Ok(Some(user)) => user,
		Ok(None) => {
			tracing::warn!(%user_id, "Matching user not found.");

			return Err(Error::UserNotFound { user_id });
		},
		Err(err) => {
			tracing::warn!(%user_id, error = %err, "User lookup failed.");

			return Err(Error::UserNotFound { user_id });
		},
	};

	if !criteria.record_resolved_user(&user) {
		tracing::warn!(
			%user_id,
			returned_user_id = %user.user_id,
			"User lookup returned a record without an internal id."
		);

		return Err(Error::UserNotFound { user_id });
	}

	tracing::debug!(%user_id, "Resolved internal user id.");

	Ok(())
}
