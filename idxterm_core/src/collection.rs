use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::IndexTerm;

/// Receives completed top-level index terms in document order.
pub trait TermSink {
	fn add_term(&mut self, term: IndexTerm);
}

impl TermSink for Vec<IndexTerm> {
	fn add_term(&mut self, term: IndexTerm) {
		self.push(term);
	}
}

/// Index terms gathered across documents.
///
/// A term whose name matches an existing top-level term is merged into it
/// rather than appended, so each distinct name appears once at every level.
/// Terms keep the order in which their names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexTermCollection {
	terms: Vec<IndexTerm>,
}

impl IndexTermCollection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Total number of terms at every level.
	pub fn term_count(&self) -> usize {
		self.terms.iter().map(IndexTerm::term_count).sum()
	}

	pub fn into_terms(self) -> Vec<IndexTerm> {
		self.terms
	}
}

impl TermSink for IndexTermCollection {
	fn add_term(&mut self, term: IndexTerm) {
		match self
			.terms
			.iter_mut()
			.find(|existing| existing.name == term.name)
		{
			Some(existing) => existing.merge(term),
			None => self.terms.push(term),
		}
	}
}

impl Extend<IndexTerm> for IndexTermCollection {
	fn extend<T: IntoIterator<Item = IndexTerm>>(&mut self, iter: T) {
		for term in iter {
			self.add_term(term);
		}
	}
}
