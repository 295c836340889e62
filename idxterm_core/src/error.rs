use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum IdxError {
	#[error(transparent)]
	#[diagnostic(code(idxterm::io_error))]
	Io(#[from] std::io::Error),

	#[error("malformed language attribute: `{value}`")]
	#[diagnostic(
		code(idxterm::malformed_language),
		help("language attributes must start with a language and region code, e.g. `en-US`")
	)]
	MalformedLanguage { value: String },

	#[error("failed to read markup at byte {position}: {reason}")]
	#[diagnostic(code(idxterm::xml))]
	Xml { position: usize, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(idxterm::config_parse),
		help("check that idxterm.toml is valid TOML with [elements], [exclude] and/or [include] sections")
	)]
	ConfigParse(String),

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(idxterm::file_too_large),
		help("increase `max_file_size` in idxterm.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(idxterm::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type IdxResult<T> = Result<T, IdxError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
