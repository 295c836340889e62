use std::sync::Arc;

use crate::Attributes;
use crate::IdxResult;
use crate::IndexTerm;
use crate::IndexTermReader;
use crate::MarkupEvent;
use crate::TermLocale;

pub(crate) const TOPIC: &str = "topics/widgets.dita";

/// A reader writing to its own locale slot so tests never observe each
/// other through the process-wide locale.
pub(crate) fn isolated_reader() -> (IndexTermReader, Arc<TermLocale>) {
	let locale = Arc::new(TermLocale::new());
	let mut reader = IndexTermReader::new().with_locale(Arc::clone(&locale));
	reader.set_target_file(TOPIC);
	(reader, locale)
}

pub(crate) fn start(name: &str) -> IdxResult<MarkupEvent> {
	Ok(MarkupEvent::start(name))
}

pub(crate) fn start_lang(name: &str, lang: &str) -> IdxResult<MarkupEvent> {
	Ok(MarkupEvent::start_with(
		name,
		Attributes::from_iter([("xml:lang", lang)]),
	))
}

pub(crate) fn text(fragment: &str) -> IdxResult<MarkupEvent> {
	Ok(MarkupEvent::text(fragment))
}

pub(crate) fn end(name: &str) -> IdxResult<MarkupEvent> {
	Ok(MarkupEvent::end(name))
}

/// `<indexterm>name</indexterm>`
pub(crate) fn term_events(name: &str) -> Vec<IdxResult<MarkupEvent>> {
	vec![start("indexterm"), text(name), end("indexterm")]
}

/// `depth` index terms nested inside each other, named `level-0` (outermost)
/// to `level-{depth - 1}`.
pub(crate) fn nested_term_events(depth: usize) -> Vec<IdxResult<MarkupEvent>> {
	let mut events = Vec::new();
	for level in 0..depth {
		events.push(start("indexterm"));
		events.push(text(&format!("level-{level}")));
	}
	for _ in 0..depth {
		events.push(end("indexterm"));
	}
	events
}

/// Feed `events` to `reader` and return the emitted top-level terms.
pub(crate) fn read_all(
	reader: &mut IndexTermReader,
	events: Vec<IdxResult<MarkupEvent>>,
) -> IdxResult<Vec<IndexTerm>> {
	let mut terms: Vec<IndexTerm> = Vec::new();
	reader.read(events, &mut terms)?;
	Ok(terms)
}

pub(crate) const WIDGETS_TOPIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE concept PUBLIC "-//OASIS//DTD DITA Concept//EN" "concept.dtd">
<concept id="widgets" xml:lang="en-US">
  <title>Widget basics</title>
  <prolog>
    <metadata>
      <keywords>
        <indexterm>widgets
          <indexterm>gears</indexterm>
          <indexterm>springs</indexterm>
        </indexterm>
        <indexterm>assembly</indexterm>
      </keywords>
    </metadata>
  </prolog>
  <conbody>
    <section>
      <title>Ignored section title</title>
      <p>Text <indexterm>widgets<indexterm>levers</indexterm></indexterm></p>
    </section>
  </conbody>
</concept>
"#;
