pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Matching user not found for user_id {user_id}.")]
	UserNotFound { user_id: String },
	#[error("Backend error: {message}")]
	Backend { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Backend { message: err.to_string() }
	}
}
