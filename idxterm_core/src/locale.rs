//! Process-wide locale detected from the first language attribute seen.
//!
//! The locale is written at most once per process: the first document that
//! carries a usable language attribute wins, and every later attempt is a
//! no-op until [`reset_term_locale`] (or [`TermLocale::reset`]) is called.
//! Downstream collators receive the [`TermLocale`] handle explicitly instead
//! of reading a hidden static.

use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::PoisonError;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;

use crate::IdxError;
use crate::IdxResult;

/// Shortest language attribute value a locale can be derived from (`ll-CC`).
pub const MIN_LANGUAGE_TAG_LEN: usize = 5;

/// A language and region pair, e.g. `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
	language: String,
	country: String,
}

impl Locale {
	pub fn new(language: impl AsRef<str>, country: impl AsRef<str>) -> Self {
		Self {
			language: language.as_ref().to_ascii_lowercase(),
			country: country.as_ref().to_ascii_uppercase(),
		}
	}

	/// Derive a locale from a language attribute value such as `en-US` or
	/// `de_DE`.
	///
	/// The primary subtag is read from characters `0..2`, the separator from
	/// offset `2` and the region from `3..5`. Anything after the region is
	/// ignored.
	pub fn from_language_tag(value: &str) -> IdxResult<Self> {
		let malformed = || {
			IdxError::MalformedLanguage {
				value: value.to_string(),
			}
		};

		if value.len() < MIN_LANGUAGE_TAG_LEN {
			return Err(malformed());
		}

		let language = value.get(0..2).ok_or_else(malformed)?;
		let separator = value.get(2..3).ok_or_else(malformed)?;
		let country = value.get(3..5).ok_or_else(malformed)?;

		if !language.bytes().all(|byte| byte.is_ascii_alphabetic())
			|| !matches!(separator, "-" | "_")
			|| !country.bytes().all(|byte| byte.is_ascii_alphanumeric())
		{
			return Err(malformed());
		}

		Ok(Self::new(language, country))
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn country(&self) -> &str {
		&self.country
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.language, self.country)
	}
}

/// A first-write-wins locale slot.
#[derive(Debug, Default)]
pub struct TermLocale {
	slot: RwLock<Option<Locale>>,
}

impl TermLocale {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self) -> Option<Locale> {
		self.slot
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn is_set(&self) -> bool {
		self.slot
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.is_some()
	}

	/// Store `locale` if nothing has been stored yet. Returns `false` when a
	/// locale was already present.
	pub fn set(&self, locale: Locale) -> bool {
		let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
		if slot.is_some() {
			return false;
		}

		*slot = Some(locale);
		true
	}

	/// Clear the stored locale.
	pub fn reset(&self) {
		*self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
	}
}

static TERM_LOCALE: LazyLock<Arc<TermLocale>> = LazyLock::new(|| Arc::new(TermLocale::new()));

/// Handle to the process-wide locale.
pub fn term_locale() -> Arc<TermLocale> {
	Arc::clone(&TERM_LOCALE)
}

pub fn get_term_locale() -> Option<Locale> {
	TERM_LOCALE.get()
}

pub fn set_term_locale(locale: Locale) -> bool {
	TERM_LOCALE.set(locale)
}

pub fn reset_term_locale() {
	TERM_LOCALE.reset();
}
