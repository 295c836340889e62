use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::IdxError;
use crate::IdxResult;
use crate::ReaderOptions;
use crate::reader::DEFAULT_LANGUAGE_ATTRIBUTE;
use crate::reader::DEFAULT_TERM_ELEMENT;
use crate::reader::DEFAULT_TITLE_ELEMENT;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["dita", "xml"];

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["idxterm.toml", ".idxterm.toml", ".config/idxterm.toml"];

/// Configuration loaded from an `idxterm.toml` file.
///
/// ```toml
/// extensions = ["dita", "xml"]
/// max_file_size = 10485760
/// disable_gitignore = false
///
/// [elements]
/// term = "indexterm"
/// title = "title"
/// language_attribute = "xml:lang"
///
/// [exclude]
/// patterns = ["out/", "*.generated.dita"]
///
/// [include]
/// patterns = ["legacy/**/*.htm"]
/// ```
#[derive(Debug, Deserialize)]
pub struct IdxConfig {
	/// Element and attribute names the reader reacts to.
	#[serde(default)]
	pub elements: ElementsConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Additional glob patterns to scan.
	#[serde(default)]
	pub include: IncludeConfig,
	/// File extensions (without the dot) that are scanned.
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
	/// Maximum file size in bytes to scan. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
}

impl Default for IdxConfig {
	fn default() -> Self {
		Self {
			elements: ElementsConfig::default(),
			exclude: ExcludeConfig::default(),
			include: IncludeConfig::default(),
			extensions: default_extensions(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

fn default_extensions() -> Vec<String> {
	DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

/// Names of the markup constructs that drive index term extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementsConfig {
	/// Element marking one index term scope.
	#[serde(default = "default_term_element")]
	pub term: String,
	/// Element whose first occurrence labels the document.
	#[serde(default = "default_title_element")]
	pub title: String,
	/// Attribute carrying the document language, e.g. `xml:lang="en-US"`.
	#[serde(default = "default_language_attribute")]
	pub language_attribute: String,
}

impl Default for ElementsConfig {
	fn default() -> Self {
		Self {
			term: default_term_element(),
			title: default_title_element(),
			language_attribute: default_language_attribute(),
		}
	}
}

fn default_term_element() -> String {
	DEFAULT_TERM_ELEMENT.to_string()
}

fn default_title_element() -> String {
	DEFAULT_TITLE_ELEMENT.to_string()
}

fn default_language_attribute() -> String {
	DEFAULT_LANGUAGE_ATTRIBUTE.to_string()
}

impl From<&ElementsConfig> for ReaderOptions {
	fn from(value: &ElementsConfig) -> Self {
		Self {
			term_element: value.term.clone(),
			title_element: value.title.clone(),
			language_attribute: value.language_attribute.clone(),
		}
	}
}

/// Configuration for excluding files and directories from scanning.
///
/// Patterns follow gitignore syntax and are applied on top of any `.gitignore`
/// rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns relative to the project root.
	///
	/// Examples: `"out/"`, `"*.generated.dita"`, `"!keep.dita"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Configuration for including additional files in scanning.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeConfig {
	/// Additional glob patterns for files to scan regardless of extension.
	/// These are relative to the project root.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl IdxConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> IdxResult<Option<IdxConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse config file content.
	pub fn parse(content: &str) -> IdxResult<IdxConfig> {
		toml::from_str(content).map_err(|e| IdxError::ConfigParse(e.to_string()))
	}

	pub fn reader_options(&self) -> ReaderOptions {
		ReaderOptions::from(&self.elements)
	}
}
