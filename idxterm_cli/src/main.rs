use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use idxterm_core::IndexTerm;
use idxterm_core::config::CONFIG_FILE_CANDIDATES;
use idxterm_core::config::IdxConfig;
use idxterm_core::project::ProjectIndex;
use idxterm_core::project::scan_project_with_config;
use idxterm_cli::Commands;
use idxterm_cli::IdxCli;
use idxterm_cli::OutputFormat;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = IdxCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::List { format }) => run_list(&args, format),
		Some(Commands::Check { strict }) => run_check(&args, strict),
		None => {
			eprintln!("No subcommand specified. Run `idxterm --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render core errors through miette for help text and error codes.
		match e.downcast::<idxterm_core::IdxError>() {
			Ok(idx_err) => {
				let report: miette::Report = (*idx_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &IdxCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &IdxCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = IdxConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
	let sample_config = "# idxterm configuration\n\n# File extensions to scan.\n# extensions = \
	                     [\"dita\", \"xml\"]\n\n# Skip files larger than this many bytes.\n# \
	                     max_file_size = 10485760\n\n# Element and attribute names.\n# \
	                     [elements]\n# term = \"indexterm\"\n# title = \"title\"\n# \
	                     language_attribute = \"xml:lang\"\n\n# Gitignore-style patterns to \
	                     skip.\n# [exclude]\n# patterns = [\"out/\"]\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created {}", config_path.display());

	Ok(())
}

#[derive(Serialize)]
struct ListOutput<'a> {
	locale: Option<String>,
	files: usize,
	term_count: usize,
	terms: &'a [IndexTerm],
}

fn run_list(args: &IdxCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let index = scan_project_with_config(&root)?;

	match format {
		OutputFormat::Json => {
			let output = ListOutput {
				locale: index.locale.as_ref().map(ToString::to_string),
				files: index.files.len(),
				term_count: index.terms.term_count(),
				terms: &index.terms,
			};
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if index.terms.is_empty() {
				println!("No index terms found.");
			} else {
				for term in index.terms.iter() {
					print_term(term, 0);
				}
			}

			println!();
			println!(
				"{} index term(s) in {} file(s)",
				index.terms.term_count(),
				index.files.len()
			);
			let locale = index
				.locale
				.as_ref()
				.map_or_else(|| "(none)".to_string(), ToString::to_string);
			println!("Locale: {locale}");

			if args.verbose {
				print_diagnostics(&root, &index);
			}
		}
	}

	Ok(())
}

fn print_term(term: &IndexTerm, depth: usize) {
	let indent = "  ".repeat(depth);
	let name = term.name().unwrap_or(idxterm_core::EMPTY_TERM_PLACEHOLDER);
	println!("{indent}{}", colored!(name, bold));

	for target in &term.targets {
		let location = if target.target_name() == target.target_uri() {
			target.target_uri().to_string()
		} else {
			format!("{} ({})", target.target_name(), target.target_uri())
		};
		println!("{indent}  {}", colored!(format!("-> {location}"), dimmed));
	}

	for sub_term in &term.sub_terms {
		print_term(sub_term, depth + 1);
	}
}

fn display_path(root: &Path, file: &Path) -> String {
	file.strip_prefix(root).unwrap_or(file).display().to_string()
}

fn print_diagnostics(root: &Path, index: &ProjectIndex) {
	for diagnostic in &index.diagnostics {
		let label = if diagnostic.is_error() {
			colored!("error:", red)
		} else {
			colored!("warning:", yellow)
		};
		eprintln!(
			"{label} {}: {}",
			display_path(root, &diagnostic.file),
			diagnostic.message()
		);
	}
}

fn run_check(args: &IdxCli, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let index = scan_project_with_config(&root)?;

	print_diagnostics(&root, &index);

	let problems = index
		.diagnostics
		.iter()
		.filter(|diagnostic| strict || diagnostic.is_error())
		.count();

	if problems > 0 {
		eprintln!(
			"\n{} {problems} problem(s) found in {} file(s).",
			colored!("Check failed:", red),
			index.files.len()
		);
		process::exit(1);
	}

	println!(
		"{} {} index term(s) collected from {} file(s).",
		colored!("All documents scanned cleanly:", green),
		index.terms.term_count(),
		index.files.len()
	);

	Ok(())
}
