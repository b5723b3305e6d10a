use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read IdeaLink config {}: {source}", path.display())]
	ReadConfig {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("IdeaLink config {} is not valid TOML: {source}", path.display())]
	ParseConfig {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
	#[error("Invalid IdeaLink config: {message}")]
	Validation { message: String },
}
