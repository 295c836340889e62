use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::DirEntry;
use ignore::WalkBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Deserialize;
use serde::Serialize;

use crate::IdxError;
use crate::IdxResult;
use crate::IndexTermCollection;
use crate::IndexTermReader;
use crate::Locale;
use crate::ReaderDiagnostic;
use crate::ReaderOptions;
use crate::TermLocale;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::DEFAULT_EXTENSIONS;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::config::IdxConfig;
use crate::locale::term_locale;
use crate::scanner::scan_document;

/// Options for controlling how a project is scanned.
///
/// Use [`ScanOptions::default()`] for sensible defaults or
/// [`ScanOptions::from_config`] to construct from an [`IdxConfig`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Element and attribute names used by the reader.
	pub reader: ReaderOptions,
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
	/// Glob patterns for extra files to scan regardless of extension.
	pub include_set: GlobSet,
	/// Extensions of files to scan.
	pub extensions: Vec<String>,
	/// Maximum file size to scan in bytes.
	pub max_file_size: u64,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			reader: ReaderOptions::default(),
			exclude_patterns: Vec::new(),
			include_set: GlobSet::empty(),
			extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from an [`IdxConfig`].
	pub fn from_config(config: Option<&IdxConfig>) -> Self {
		let Some(config) = config else {
			return Self::default();
		};

		Self {
			reader: config.reader_options(),
			exclude_patterns: config.exclude.patterns.clone(),
			include_set: build_glob_set(&config.include.patterns),
			extensions: config.extensions.clone(),
			max_file_size: config.max_file_size,
			disable_gitignore: config.disable_gitignore,
		}
	}
}

/// The kind of diagnostic produced during project scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticKind {
	/// An index term had no text content and was given the placeholder name.
	EmptyTerm { depth: usize },
	/// The document ended with index term scopes still open. Terms in those
	/// scopes were dropped.
	IncompleteScan { open_scopes: usize },
	/// The document could not be read; none of its terms were collected.
	ScanFailed { reason: String },
}

/// A diagnostic produced during project scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDiagnostic {
	/// The file where the diagnostic was found.
	pub file: PathBuf,
	/// The kind of diagnostic.
	pub kind: DiagnosticKind,
}

impl ProjectDiagnostic {
	/// Empty terms are warnings; everything else means index terms were lost.
	pub fn is_error(&self) -> bool {
		!matches!(self.kind, DiagnosticKind::EmptyTerm { .. })
	}

	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match &self.kind {
			DiagnosticKind::EmptyTerm { depth } => {
				format!(
					"index term without content at depth {depth} was named `{}`",
					crate::EMPTY_TERM_PLACEHOLDER
				)
			}
			DiagnosticKind::IncompleteScan { open_scopes } => {
				format!("document ended with {open_scopes} unclosed index term(s)")
			}
			DiagnosticKind::ScanFailed { reason } => format!("scan failed: {reason}"),
		}
	}
}

/// Index terms collected from every document of a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectIndex {
	/// Terms merged across documents.
	pub terms: IndexTermCollection,
	/// Files that were scanned, in scan order.
	pub files: Vec<PathBuf>,
	/// Problems found while scanning.
	pub diagnostics: Vec<ProjectDiagnostic>,
	/// The locale resolved from the first usable language attribute.
	pub locale: Option<Locale>,
}

impl ProjectIndex {
	pub fn has_errors(&self) -> bool {
		self.diagnostics.iter().any(ProjectDiagnostic::is_error)
	}
}

/// Scan a directory with default options, recording the locale process-wide.
pub fn scan_project(root: &Path) -> IdxResult<ProjectIndex> {
	scan_project_with_options(root, &ScanOptions::default(), term_locale())
}

/// Load the project config discovered under `root`, then scan with it. The
/// detected locale is recorded process-wide.
pub fn scan_project_with_config(root: &Path) -> IdxResult<ProjectIndex> {
	let config = IdxConfig::load(root)?;
	let options = ScanOptions::from_config(config.as_ref());
	scan_project_with_options(root, &options, term_locale())
}

/// Scan a directory with the given [`ScanOptions`], recording the detected
/// locale in `locale`.
///
/// One reader is reused for every document and reset in between; the locale
/// slot is never reset.
pub fn scan_project_with_options(
	root: &Path,
	options: &ScanOptions,
	locale: Arc<TermLocale>,
) -> IdxResult<ProjectIndex> {
	let files = collect_project_files(root, options)?;
	let mut reader = IndexTermReader::with_options(options.reader.clone()).with_locale(locale);
	let mut terms = IndexTermCollection::new();
	let mut diagnostics = Vec::new();

	for file in &files {
		let metadata = std::fs::metadata(file)?;
		if metadata.len() > options.max_file_size {
			return Err(IdxError::FileTooLarge {
				path: file.display().to_string(),
				size: metadata.len(),
				limit: options.max_file_size,
			});
		}

		let content = match std::fs::read_to_string(file) {
			Ok(content) => content,
			Err(e) => {
				diagnostics.push(scan_failed(file, &e));
				continue;
			}
		};
		let target = relative_file_key(root, file);

		let scan = match scan_document(&mut reader, &target, &content) {
			Ok(scan) => scan,
			Err(e) => {
				diagnostics.push(scan_failed(file, &e));
				continue;
			}
		};

		for diagnostic in &scan.diagnostics {
			match diagnostic {
				ReaderDiagnostic::EmptyTerm { depth } => {
					diagnostics.push(ProjectDiagnostic {
						file: file.clone(),
						kind: DiagnosticKind::EmptyTerm { depth: *depth },
					});
				}
			}
		}

		if !scan.is_complete() {
			diagnostics.push(ProjectDiagnostic {
				file: file.clone(),
				kind: DiagnosticKind::IncompleteScan {
					open_scopes: scan.open_scopes,
				},
			});
		}

		terms.extend(scan.terms);
	}

	Ok(ProjectIndex {
		terms,
		files,
		diagnostics,
		locale: reader.locale().get(),
	})
}

fn scan_failed(file: &Path, reason: &dyn Display) -> ProjectDiagnostic {
	tracing::warn!(file = %file.display(), "skipping document: {reason}");
	ProjectDiagnostic {
		file: file.to_path_buf(),
		kind: DiagnosticKind::ScanFailed {
			reason: reason.to_string(),
		},
	}
}

/// Root-relative path with `/` separators, used as the document identifier.
pub fn relative_file_key(root: &Path, file: &Path) -> String {
	file.strip_prefix(root)
		.unwrap_or(file)
		.to_string_lossy()
		.replace('\\', "/")
}

/// Collect every file the project scan will read, sorted by path.
///
/// A file is read when its extension is one of `options.extensions` or its
/// root-relative path matches an include pattern. Hidden entries,
/// `node_modules`, `target`, excluded paths and (unless disabled)
/// gitignored paths are skipped, as are subdirectories holding their own
/// `idxterm.toml`.
pub fn collect_project_files(root: &Path, options: &ScanOptions) -> IdxResult<Vec<PathBuf>> {
	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	let mut builder = WalkBuilder::new(root);
	builder
		.hidden(true)
		.parents(false)
		.ignore(false)
		.git_global(false)
		.git_exclude(false)
		.git_ignore(!options.disable_gitignore)
		.require_git(false)
		.follow_links(true)
		.filter_entry(move |entry| keep_entry(entry, &exclude));

	let mut files = Vec::new();
	for result in builder.build() {
		let entry = match result {
			Ok(entry) => entry,
			Err(err) => {
				if let Some(path) = symlink_loop(&err) {
					return Err(IdxError::SymlinkCycle {
						path: path.display().to_string(),
					});
				}
				tracing::warn!("skipping unreadable path: {err}");
				continue;
			}
		};

		if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
			continue;
		}

		let path = entry.into_path();
		let included = path
			.strip_prefix(root)
			.is_ok_and(|relative| options.include_set.is_match(relative));
		if included || has_scannable_extension(&path, &options.extensions) {
			files.push(path);
		}
	}

	files.sort();
	files.dedup();
	Ok(files)
}

fn keep_entry(entry: &DirEntry, exclude: &Gitignore) -> bool {
	let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());

	if is_dir && entry.depth() > 0 {
		let name = entry.file_name().to_string_lossy();
		if name == "node_modules" || name == "target" {
			return false;
		}

		// A subdirectory with its own config is a separate project.
		if CONFIG_FILE_CANDIDATES
			.iter()
			.any(|candidate| entry.path().join(candidate).is_file())
		{
			return false;
		}
	}

	!exclude.matched(entry.path(), is_dir).is_ignore()
}

fn symlink_loop(err: &ignore::Error) -> Option<&Path> {
	match err {
		ignore::Error::Loop { child, .. } => Some(child.as_path()),
		ignore::Error::WithPath { err, .. }
		| ignore::Error::WithDepth { err, .. }
		| ignore::Error::WithLineNumber { err, .. } => symlink_loop(err),
		ignore::Error::Partial(errors) => errors.iter().find_map(symlink_loop),
		_ => None,
	}
}

fn build_glob_set(patterns: &[String]) -> GlobSet {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		match Glob::new(pattern) {
			Ok(glob) => {
				builder.add(glob);
			}
			Err(e) => tracing::warn!("ignoring include pattern `{pattern}`: {e}"),
		}
	}
	builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Gitignore-style matcher for the `[exclude]` patterns, rooted at `root`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> IdxResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			IdxError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| IdxError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

fn has_scannable_extension(path: &Path, extensions: &[String]) -> bool {
	let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
		return false;
	};

	extensions
		.iter()
		.any(|candidate| candidate.eq_ignore_ascii_case(ext))
}
