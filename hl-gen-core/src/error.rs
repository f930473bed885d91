use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the chain model and its corpus collaborators.
#[derive(Error, Debug)]
pub enum Error {
	/// A parameter was rejected at construction time (ex. a prefix length of 0).
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("archive JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("feed XML error: {0}")]
	Xml(#[from] quick_xml::Error),

	#[error("feed error: {0}")]
	Feed(String),
}
