use derive_more::Deref;
use derive_more::DerefMut;

/// Attributes of a start element, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Value of the first attribute with the given qualified name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.push((name.into(), value.into()));
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// A markup parse event, delivered strictly in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[allow(variant_size_differences)]
pub enum MarkupEvent {
	/// An element opened. `name` is the local name without a namespace
	/// prefix.
	Start { name: String, attributes: Attributes },
	/// An element closed.
	End { name: String },
	/// A fragment of character data. One logical text run may arrive as
	/// several fragments.
	Text(String),
}

impl MarkupEvent {
	pub fn start(name: impl Into<String>) -> Self {
		Self::Start {
			name: name.into(),
			attributes: Attributes::new(),
		}
	}

	pub fn start_with(name: impl Into<String>, attributes: Attributes) -> Self {
		Self::Start {
			name: name.into(),
			attributes,
		}
	}

	pub fn end(name: impl Into<String>) -> Self {
		Self::End { name: name.into() }
	}

	pub fn text(fragment: impl Into<String>) -> Self {
		Self::Text(fragment.into())
	}
}
