//! `idxterm_core` extracts hierarchical index terms from structured markup
//! documents such as DITA topics. It reads each document in a single forward
//! pass over its parse events and builds a forest of index terms, each
//! pointing back at the document (and its title) it was found in.
//!
//! ## Processing Pipeline
//!
//! ```text
//! DITA / XML file
//!   → XmlEvents (quick-xml tokenizer → start / end / text events)
//!   → IndexTermReader (term scope stack, title capture, locale detection)
//!   → TermSink (completed top-level terms, in document order)
//!   → IndexTermCollection (merges terms across documents)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `idxterm.toml`: element names,
//!   exclude/include patterns, scanned extensions.
//! - [`project`]: Directory walking and scanning of every document in a
//!   project.
//! - [`locale`]: The process-wide, first-write-wins index term locale.
//!
//! ## Key Types
//!
//! - [`IndexTerm`]: A named term with its sub-terms and targets.
//! - [`IndexTermTarget`]: The document label and URI a term points to.
//! - [`IndexTermReader`]: The event-driven builder.
//! - [`IndexTermCollection`]: The sink that merges terms across documents.
//! - [`MarkupEvent`]: A typed start / end / text event.
//!
//! ## Quick Start
//!
//! ```rust
//! use idxterm_core::IndexTermReader;
//! use idxterm_core::scan_document;
//!
//! let mut reader = IndexTermReader::new();
//! let scan = scan_document(
//! 	&mut reader,
//! 	"topics/widgets.dita",
//! 	"<topic><title>Widgets</title><body><p><indexterm>Widgets<indexterm>gears</indexterm></indexterm></p></body></topic>",
//! )
//! .unwrap();
//!
//! assert_eq!(scan.terms.len(), 1);
//! assert_eq!(scan.terms[0].name(), Some("Widgets"));
//! assert_eq!(scan.terms[0].sub_terms[0].name(), Some("gears"));
//! assert_eq!(scan.terms[0].targets[0].target_name(), "Widgets");
//! ```

pub use collection::*;
pub use error::*;
pub use event::*;
pub use locale::Locale;
pub use locale::TermLocale;
pub use reader::*;
pub use scanner::*;
pub use term::*;
pub use title::*;

mod collection;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod event;
pub mod locale;
pub mod project;
mod reader;
mod scanner;
mod term;
pub(crate) mod text;
mod title;

#[cfg(test)]
mod __fixtures;
