use serde::Deserialize;
use serde::Serialize;

/// Name given to an index term that closed without any text content.
pub const EMPTY_TERM_PLACEHOLDER: &str = "***";

/// A label/URI pair pointing an index term back to the document it was found
/// in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexTermTarget {
	target_name: String,
	target_uri: String,
}

impl IndexTermTarget {
	pub fn new(target_name: impl Into<String>, target_uri: impl Into<String>) -> Self {
		Self {
			target_name: target_name.into(),
			target_uri: target_uri.into(),
		}
	}

	/// The display label: the document title when it was known, otherwise
	/// the document identifier.
	pub fn target_name(&self) -> &str {
		&self.target_name
	}

	/// The document identifier.
	pub fn target_uri(&self) -> &str {
		&self.target_uri
	}
}

/// A hierarchical index term.
///
/// Sub-terms and targets keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTerm {
	/// `None` until text content has been observed or the term was finalized.
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub sub_terms: Vec<IndexTerm>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub targets: Vec<IndexTermTarget>,
}

impl IndexTerm {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an unnamed term with a single target pre-attached.
	pub fn with_target(target: IndexTermTarget) -> Self {
		Self {
			name: None,
			sub_terms: Vec::new(),
			targets: vec![target],
		}
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = Some(name.into());
	}

	/// Append a sub-term after all existing ones.
	pub fn add_sub_term(&mut self, term: IndexTerm) {
		self.sub_terms.push(term);
	}

	/// Append a target unless an identical one is already attached.
	pub fn add_target(&mut self, target: IndexTermTarget) {
		if !self.targets.contains(&target) {
			self.targets.push(target);
		}
	}

	/// Assign [`EMPTY_TERM_PLACEHOLDER`] when no name was ever set. Returns
	/// `true` when the placeholder was used.
	pub fn finalize_name(&mut self) -> bool {
		if self.name.is_some() {
			return false;
		}

		self.name = Some(EMPTY_TERM_PLACEHOLDER.to_string());
		true
	}

	/// Fold `other` into this term: its targets are added without duplicates
	/// and each of its sub-terms is merged into the sub-term of the same name,
	/// or appended when there is none.
	pub fn merge(&mut self, other: IndexTerm) {
		for target in other.targets {
			self.add_target(target);
		}

		for sub_term in other.sub_terms {
			match self
				.sub_terms
				.iter_mut()
				.find(|existing| existing.name == sub_term.name)
			{
				Some(existing) => existing.merge(sub_term),
				None => self.sub_terms.push(sub_term),
			}
		}
	}

	/// Total number of terms in this tree, including this one.
	pub fn term_count(&self) -> usize {
		1 + self.sub_terms.iter().map(IndexTerm::term_count).sum::<usize>()
	}
}
