use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MrzError {
	#[error(transparent)]
	#[diagnostic(code(mrz::io_error))]
	Io(#[from] std::io::Error),

	#[error("unsupported MRZ format: `{0}`")]
	#[diagnostic(
		code(mrz::unsupported_format),
		help("supported formats: td3 (passport, 2x44), td1 (identity card, 3x30)")
	)]
	UnsupportedFormat(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mrz::config_parse),
		help("check that mrz.toml is valid TOML with an optional `format` key and [defaults] section")
	)]
	ConfigParse(String),

	#[error("failed to load record file `{path}`: {reason}")]
	#[diagnostic(code(mrz::record_file))]
	RecordFile { path: String, reason: String },

	#[error("unsupported record file format: `{0}`")]
	#[diagnostic(
		code(mrz::unsupported_record_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedRecordFormat(String),

	#[error("malformed machine readable zone: {0}")]
	#[diagnostic(
		code(mrz::malformed),
		help("a TD3 zone is 2 lines of 44 characters, a TD1 zone is 3 lines of 30 characters")
	)]
	MalformedMrz(String),
}

pub type MrzResult<T> = Result<T, MrzError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
