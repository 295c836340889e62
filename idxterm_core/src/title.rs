use crate::text::accumulate_text;

/// Progress of the title capture within one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleState {
	#[default]
	NotFound,
	Capturing,
	Found,
}

/// Captures the text of the first title element of a document.
#[derive(Debug, Clone, Default)]
pub struct TitleCapture {
	state: TitleState,
	title: Option<String>,
	/// Title elements opened inside the captured one.
	nested: usize,
}

impl TitleCapture {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> TitleState {
		self.state
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn is_capturing(&self) -> bool {
		self.state == TitleState::Capturing
	}

	/// A title element started.
	pub fn open(&mut self) {
		match self.state {
			TitleState::NotFound => self.state = TitleState::Capturing,
			TitleState::Capturing => self.nested += 1,
			TitleState::Found => {}
		}
	}

	/// A title element ended.
	pub fn close(&mut self) {
		if self.state != TitleState::Capturing {
			return;
		}

		if self.nested > 0 {
			self.nested -= 1;
			return;
		}

		self.state = TitleState::Found;
		tracing::debug!(title = ?self.title, "document title captured");
	}

	/// Feed a character-data fragment; ignored unless capturing.
	pub fn push_text(&mut self, fragment: &str) {
		if self.is_capturing() {
			accumulate_text(&mut self.title, fragment);
		}
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}
