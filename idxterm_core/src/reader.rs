use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::Attributes;
use crate::IdxResult;
use crate::IndexTerm;
use crate::IndexTermTarget;
use crate::Locale;
use crate::MarkupEvent;
use crate::TermLocale;
use crate::TermSink;
use crate::locale::term_locale;
use crate::text::accumulate_text;
use crate::title::TitleCapture;

/// Element that opens and closes one index term scope.
pub const DEFAULT_TERM_ELEMENT: &str = "indexterm";
/// Element whose first occurrence labels the document.
pub const DEFAULT_TITLE_ELEMENT: &str = "title";
/// Attribute inspected for the document language.
pub const DEFAULT_LANGUAGE_ATTRIBUTE: &str = "xml:lang";

/// Names the reader reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
	/// Local name of the term-start/term-end marker element.
	pub term_element: String,
	/// Local name of the title element.
	pub title_element: String,
	/// Qualified name of the language attribute.
	pub language_attribute: String,
}

impl Default for ReaderOptions {
	fn default() -> Self {
		Self {
			term_element: DEFAULT_TERM_ELEMENT.to_string(),
			title_element: DEFAULT_TITLE_ELEMENT.to_string(),
			language_attribute: DEFAULT_LANGUAGE_ATTRIBUTE.to_string(),
		}
	}
}

/// A non-fatal problem found while reading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReaderDiagnostic {
	/// A term closed without any text content and was named
	/// [`EMPTY_TERM_PLACEHOLDER`](crate::EMPTY_TERM_PLACEHOLDER). `depth` is
	/// the nesting level of the term, `0` for top-level terms.
	EmptyTerm { depth: usize },
}

/// Builds index term trees from the markup events of one document at a time.
///
/// Each term-start marker pushes a new scope; the matching end marker pops
/// it and either attaches it to the enclosing scope or, at the top level,
/// hands it to the [`TermSink`]. The reader makes a single forward pass and
/// never looks ahead.
///
/// Targets capture the title known when their term *starts*, so terms that
/// appear before the title element are labelled with the document
/// identifier.
#[derive(Debug)]
pub struct IndexTermReader {
	options: ReaderOptions,
	locale: Arc<TermLocale>,
	target_file: Option<String>,
	title: TitleCapture,
	stack: Vec<IndexTerm>,
	diagnostics: Vec<ReaderDiagnostic>,
}

impl Default for IndexTermReader {
	fn default() -> Self {
		Self::new()
	}
}

impl IndexTermReader {
	/// Create a reader with the default element names which records the
	/// locale process-wide.
	pub fn new() -> Self {
		Self::with_options(ReaderOptions::default())
	}

	pub fn with_options(options: ReaderOptions) -> Self {
		Self {
			options,
			locale: term_locale(),
			target_file: None,
			title: TitleCapture::new(),
			stack: Vec::new(),
			diagnostics: Vec::new(),
		}
	}

	/// Record the detected locale in `locale` instead of the process-wide
	/// slot.
	#[must_use]
	pub fn with_locale(mut self, locale: Arc<TermLocale>) -> Self {
		self.locale = locale;
		self
	}

	pub fn options(&self) -> &ReaderOptions {
		&self.options
	}

	/// The locale slot this reader writes to.
	pub fn locale(&self) -> &Arc<TermLocale> {
		&self.locale
	}

	/// Clear all per-document state. The locale is left untouched.
	pub fn reset(&mut self) {
		self.target_file = None;
		self.title.reset();
		self.stack.clear();
		self.diagnostics.clear();
	}

	/// Set the identifier of the document about to be read. It is used as
	/// the URI of every target and as the label until a title is known.
	pub fn set_target_file(&mut self, target: impl Into<String>) {
		self.target_file = Some(target.into());
	}

	pub fn target_file(&self) -> Option<&str> {
		self.target_file.as_deref()
	}

	/// The captured title, once any title text has been seen.
	pub fn title(&self) -> Option<&str> {
		self.title.title()
	}

	/// Number of term scopes still open.
	pub fn open_scopes(&self) -> usize {
		self.stack.len()
	}

	/// `true` when every opened term scope has been closed.
	pub fn is_complete(&self) -> bool {
		self.stack.is_empty()
	}

	pub fn diagnostics(&self) -> &[ReaderDiagnostic] {
		&self.diagnostics
	}

	pub fn take_diagnostics(&mut self) -> Vec<ReaderDiagnostic> {
		std::mem::take(&mut self.diagnostics)
	}

	/// Handle an element start.
	///
	/// Fails only when the element carries a malformed language attribute
	/// and no locale has been resolved yet.
	pub fn on_start(&mut self, name: &str, attributes: &Attributes) -> IdxResult<()> {
		if name == self.options.term_element {
			let target_uri = self.target_file.clone().unwrap_or_default();
			let target_name = self
				.title
				.title()
				.map_or_else(|| target_uri.clone(), ToString::to_string);
			self.stack.push(IndexTerm::with_target(IndexTermTarget::new(
				target_name,
				target_uri,
			)));
		}

		self.resolve_locale(attributes)?;

		if name == self.options.title_element {
			self.title.open();
		}

		Ok(())
	}

	/// Handle a character-data fragment.
	pub fn on_text(&mut self, fragment: &str) {
		self.title.push_text(fragment);

		if let Some(term) = self.stack.last_mut() {
			accumulate_text(&mut term.name, fragment);
		}
	}

	/// Handle an element end, emitting a completed top-level term to `sink`.
	pub fn on_end<S: TermSink + ?Sized>(&mut self, name: &str, sink: &mut S) {
		if name == self.options.term_element {
			self.close_term(sink);
		}

		if name == self.options.title_element {
			self.title.close();
		}
	}

	/// Dispatch one event.
	pub fn handle<S: TermSink + ?Sized>(
		&mut self,
		event: &MarkupEvent,
		sink: &mut S,
	) -> IdxResult<()> {
		match event {
			MarkupEvent::Start { name, attributes } => self.on_start(name, attributes)?,
			MarkupEvent::End { name } => self.on_end(name, sink),
			MarkupEvent::Text(fragment) => self.on_text(fragment),
		}

		Ok(())
	}

	/// Feed every event of `events` in order. The first error, whether from
	/// the event source or from the reader, stops reading and is returned;
	/// the reader keeps whatever partial state it had reached.
	pub fn read<I, S>(&mut self, events: I, sink: &mut S) -> IdxResult<()>
	where
		I: IntoIterator<Item = IdxResult<MarkupEvent>>,
		S: TermSink + ?Sized,
	{
		for event in events {
			self.handle(&event?, sink)?;
		}

		Ok(())
	}

	fn close_term<S: TermSink + ?Sized>(&mut self, sink: &mut S) {
		let Some(mut term) = self.stack.pop() else {
			tracing::trace!(
				target_file = ?self.target_file,
				"ignoring unmatched `{}` end marker",
				self.options.term_element
			);
			return;
		};

		let depth = self.stack.len();
		if term.finalize_name() {
			tracing::warn!(
				target_file = ?self.target_file,
				depth,
				"the {} element does not have any content, setting the term to {}",
				self.options.term_element,
				crate::EMPTY_TERM_PLACEHOLDER
			);
			self.diagnostics.push(ReaderDiagnostic::EmptyTerm { depth });
		}

		match self.stack.last_mut() {
			Some(parent) => parent.add_sub_term(term),
			None => sink.add_term(term),
		}
	}

	fn resolve_locale(&self, attributes: &Attributes) -> IdxResult<()> {
		if self.locale.is_set() {
			return Ok(());
		}

		let Some(value) = attributes.get(&self.options.language_attribute) else {
			return Ok(());
		};

		let locale = Locale::from_language_tag(value)?;
		if self.locale.set(locale.clone()) {
			tracing::debug!(%locale, "index term locale resolved");
		}

		Ok(())
	}
}
