//! Translation of user facing grid texts
//!
//! Every caption, title and format string passes through a [`Translator`]
//! before it reaches the markup. Parameters replace `%s` placeholders in order.

use std::collections::HashMap;

/// Translates a message, substituting `%s` placeholders with `params`
pub trait Translator {
	/// Returns the translated message
	fn translate(&self, message: &str, params: &[&str]) -> String;
}

/// Replaces `%s` placeholders in order; extra placeholders are kept
pub fn substitute(message: &str, params: &[&str]) -> String {
	if params.is_empty() {
		return message.to_string();
	}
	let mut output = String::with_capacity(message.len());
	let mut params = params.iter();
	let mut rest = message;
	while let Some(pos) = rest.find("%s") {
		output.push_str(&rest[..pos]);
		match params.next() {
			Some(param) => output.push_str(param),
			None => output.push_str("%s"),
		}
		rest = &rest[pos + 2..];
	}
	output.push_str(rest);
	output
}

/// Identity translator
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
	fn translate(&self, message: &str, params: &[&str]) -> String {
		substitute(message, params)
	}
}

/// A message catalog containing translations for a specific locale
///
/// # Example
/// ```
/// use reinhardt_datagrid::i18n::{MessageCatalog, Translator};
///
/// let mut catalog = MessageCatalog::new("de");
/// catalog.add_translation("No data were found", "Keine Daten gefunden");
/// catalog.add_translation("Page %s", "Seite %s");
///
/// assert_eq!(catalog.translate("No data were found", &[]), "Keine Daten gefunden");
/// assert_eq!(catalog.translate("Page %s", &["3"]), "Seite 3");
/// assert_eq!(catalog.translate("Filter", &[]), "Filter");
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	/// Create a new message catalog for the given locale
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
		}
	}

	/// Get the locale for this catalog
	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Add a simple translation
	pub fn add_translation(&mut self, message: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(message.into(), translation.into());
	}

	/// Get a translation
	pub fn get(&self, message: &str) -> Option<&String> {
		self.messages.get(message)
	}

	/// Number of translated messages
	pub fn len(&self) -> usize {
		self.messages.len()
	}

	/// Whether the catalog holds no translations
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}

impl Translator for MessageCatalog {
	fn translate(&self, message: &str, params: &[&str]) -> String {
		match self.get(message) {
			Some(translated) => substitute(translated, params),
			None => {
				tracing::trace!(locale = %self.locale, message, "missing translation");
				substitute(message, params)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Page %s", &["2"], "Page 2")]
	#[case("%s of %s", &["1", "9"], "1 of 9")]
	#[case("%s of %s", &["1"], "1 of %s")]
	#[case("100%", &["x"], "100%")]
	#[case("Items %from%", &[], "Items %from%")]
	fn test_substitute(#[case] message: &str, #[case] params: &[&str], #[case] expected: &str) {
		assert_eq!(substitute(message, params), expected);
	}

	#[rstest]
	fn test_catalog_falls_back_to_message() {
		let mut catalog = MessageCatalog::new("fr");
		catalog.add_translation("Edit", "Modifier");
		assert_eq!(catalog.locale(), "fr");
		assert_eq!(catalog.translate("Edit", &[]), "Modifier");
		assert_eq!(catalog.translate("Delete", &[]), "Delete");
		assert_eq!(catalog.len(), 1);
	}

	#[rstest]
	fn test_noop_translator() {
		assert_eq!(NoopTranslator.translate("First", &[]), "First");
	}
}
