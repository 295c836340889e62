use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Collect index terms from DITA and XML documents.",
	long_about = "idxterm reads every DITA and XML document in a project, extracts the nested \
	              index terms they declare and reports the merged term forest together with \
	              the document each term points to.\n\nQuick start:\n  idxterm init    \
	              Create an idxterm.toml config file\n  idxterm list    Print all index \
	              terms\n  idxterm check   Report documents whose index terms are damaged"
)]
pub struct IdxCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `idxterm.toml` in the project root.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Print every index term found in the project.
	///
	/// Terms with the same name are merged across documents. Each term is
	/// followed by the documents it points to, labelled with the document
	/// title when one appeared before the term.
	List {
		/// Output format. Use `text` for an indented tree or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Report documents whose index terms could not be fully collected.
	///
	/// Exits with a non-zero status code when a document failed to scan or
	/// ended with unclosed index terms. Empty index terms are warnings unless
	/// `--strict` is given.
	Check {
		/// Treat warnings as errors.
		#[arg(long, default_value_t = false)]
		strict: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
