use idealink_domain::UnknownCandidateType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Corpus error: {message}")]
	Corpus { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<idealink_providers::Error> for Error {
	fn from(err: idealink_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<UnknownCandidateType> for Error {
	fn from(err: UnknownCandidateType) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
