/// Append a character-data fragment to `slot`.
///
/// Each fragment is trimmed on its own before it is appended, without a
/// separator, so a whitespace-only fragment contributes nothing. Returns
/// `true` when the slot changed.
pub fn accumulate_text(slot: &mut Option<String>, fragment: &str) -> bool {
	let fragment = fragment.trim();
	if fragment.is_empty() {
		return false;
	}

	match slot {
		Some(text) => text.push_str(fragment),
		None => *slot = Some(fragment.to_string()),
	}

	true
}
