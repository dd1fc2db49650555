//! Escaping helpers for markup rendering.

use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Boolean attributes the grid emits. They are dropped from the output when
/// their value is falsy.
pub const BOOLEAN_ATTRS: &[&str] = &["checked", "disabled", "hidden", "readonly", "selected"];

/// `false` for empty strings, `"false"` and `"0"`.
pub fn is_boolean_attr_truthy(value: &str) -> bool {
	!value.is_empty() && value != "false" && value != "0"
}

/// Tags rendered without a closing tag.
pub(crate) fn is_void_tag(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_html_escape_borrows_plain_text() {
		assert!(matches!(html_escape("Items 1 - 15"), Cow::Borrowed(_)));
	}

	#[rstest]
	#[case("a & b", "a &amp; b")]
	#[case("<td>", "&lt;td&gt;")]
	#[case("\"x\" 'y'", "&quot;x&quot; &#x27;y&#x27;")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	fn test_is_boolean_attr_truthy() {
		assert!(is_boolean_attr_truthy("checked"));
		assert!(!is_boolean_attr_truthy(""));
		assert!(!is_boolean_attr_truthy("false"));
		assert!(!is_boolean_attr_truthy("0"));
	}
}
