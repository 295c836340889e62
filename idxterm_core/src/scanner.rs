use quick_xml::Reader;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;

use crate::Attributes;
use crate::IdxError;
use crate::IdxResult;
use crate::IndexTerm;
use crate::IndexTermReader;
use crate::MarkupEvent;
use crate::ReaderDiagnostic;

/// Pull-based markup events for a single XML document.
///
/// Empty elements are reported as a start immediately followed by an end,
/// CDATA sections as text, and entity references are unescaped. Comments,
/// processing instructions and declarations produce no events. A tokenizer
/// fault is yielded once as an error and ends the iteration.
pub struct XmlEvents<'a> {
	reader: Reader<&'a [u8]>,
	finished: bool,
}

impl<'a> XmlEvents<'a> {
	pub fn new(content: &'a str) -> Self {
		let mut reader = Reader::from_str(content);
		reader.trim_text(false);
		reader.expand_empty_elements(true);

		Self {
			reader,
			finished: false,
		}
	}

	fn fault(&mut self, reason: impl ToString) -> IdxError {
		self.finished = true;
		IdxError::Xml {
			position: self.reader.buffer_position(),
			reason: reason.to_string(),
		}
	}
}

impl Iterator for XmlEvents<'_> {
	type Item = IdxResult<MarkupEvent>;

	fn next(&mut self) -> Option<Self::Item> {
		while !self.finished {
			let event = match self.reader.read_event() {
				Ok(event) => event,
				Err(e) => return Some(Err(self.fault(e))),
			};

			match event {
				Event::Start(start) => {
					let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
					return Some(match extract_attributes(&start) {
						Ok(attributes) => Ok(MarkupEvent::Start { name, attributes }),
						Err(reason) => Err(self.fault(reason)),
					});
				}
				Event::End(end) => {
					let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
					return Some(Ok(MarkupEvent::End { name }));
				}
				Event::Text(text) => {
					return Some(match text.unescape() {
						Ok(fragment) => Ok(MarkupEvent::Text(fragment.into_owned())),
						Err(e) => Err(self.fault(e)),
					});
				}
				Event::CData(cdata) => {
					let fragment = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
					return Some(Ok(MarkupEvent::Text(fragment)));
				}
				Event::Eof => self.finished = true,
				_ => {}
			}
		}

		None
	}
}

fn extract_attributes(start: &BytesStart<'_>) -> Result<Attributes, String> {
	let mut attributes = Attributes::new();
	for attribute in start.attributes() {
		let attribute = attribute.map_err(|e| e.to_string())?;
		let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
		let value = attribute.unescape_value().map_err(|e| e.to_string())?;
		attributes.insert(key, value.into_owned());
	}

	Ok(attributes)
}

/// Outcome of reading one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentScan {
	/// Completed top-level terms in document order.
	pub terms: Vec<IndexTerm>,
	/// Non-fatal problems found while reading.
	pub diagnostics: Vec<ReaderDiagnostic>,
	/// The document title, if one was captured.
	pub title: Option<String>,
	/// Term scopes still open when the events ran out. Anything but `0`
	/// means the scan is incomplete.
	pub open_scopes: usize,
}

impl DocumentScan {
	pub fn is_complete(&self) -> bool {
		self.open_scopes == 0
	}
}

/// Reset `reader`, then read the XML document `content` identified by
/// `target`.
///
/// Terms are buffered until the whole document has been read, so a failed
/// scan returns an error and contributes nothing.
pub fn scan_document(
	reader: &mut IndexTermReader,
	target: &str,
	content: &str,
) -> IdxResult<DocumentScan> {
	reader.reset();
	reader.set_target_file(target);

	let mut terms: Vec<IndexTerm> = Vec::new();
	reader.read(XmlEvents::new(content), &mut terms)?;

	let scan = DocumentScan {
		terms,
		diagnostics: reader.take_diagnostics(),
		title: reader.title().map(ToString::to_string),
		open_scopes: reader.open_scopes(),
	};
	tracing::debug!(
		document = target,
		terms = scan.terms.len(),
		open_scopes = scan.open_scopes,
		"document scanned"
	);

	Ok(scan)
}
