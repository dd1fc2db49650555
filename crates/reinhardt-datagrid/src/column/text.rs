//! Text column

use super::{Column, ColumnBase};
use crate::datasource::{DataSource, Operator, escape_like};
use crate::error::Result;
use crate::i18n::Translator;
use crate::value::{Record, to_display};
use serde_json::Value;

/// Column showing the string form of a value
///
/// Filtering matches `LIKE %value%` with wildcards in the value taken
/// literally.
#[derive(Debug)]
pub struct TextColumn {
	base: ColumnBase,
	max_length: Option<usize>,
}

impl TextColumn {
	/// Creates a text column
	pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name, caption),
			max_length: None,
		}
	}

	/// Truncates longer values to `max_length` characters followed by `...`
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	column_builders!();
}

impl Column for TextColumn {
	column_accessors!();

	fn format_content(&self, value: &Value, row: &Record, _translator: &dyn Translator) -> String {
		if let Some(formatted) = self.base.custom_format(value, row) {
			return formatted;
		}
		let text = to_display(value);
		match self.max_length {
			Some(max) if text.chars().count() > max => {
				let mut truncated: String = text.chars().take(max).collect();
				truncated.push_str("...");
				truncated
			}
			_ => text,
		}
	}

	fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()> {
		source.filter(
			&self.base.name,
			Value::String(format!("%{}%", escape_like(value))),
			Operator::Like,
			None,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datasource::MemoryDataSource;
	use crate::i18n::NoopTranslator;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(None, "Hello world")]
	#[case(Some(5), "Hello...")]
	#[case(Some(20), "Hello world")]
	fn test_truncation(#[case] max: Option<usize>, #[case] expected: &str) {
		let mut column = TextColumn::new("title", "Title");
		if let Some(max) = max {
			column = column.max_length(max);
		}
		let shown = column.format_content(&json!("Hello world"), &Record::new(), &NoopTranslator);
		assert_eq!(shown, expected);
	}

	#[rstest]
	fn test_custom_formatter() {
		let column = TextColumn::new("name", "Name")
			.formatter(|value, row| format!("{} ({})", to_display(value), to_display(&row["id"])));
		let row = json!({"id": 7, "name": "Ann"});
		let shown = column.format_content(&row["name"], row.as_object().unwrap(), &NoopTranslator);
		assert_eq!(shown, "Ann (7)");
	}

	#[rstest]
	fn test_filter_is_contains_like() {
		let column = TextColumn::new("name", "Name");
		let mut source = MemoryDataSource::from_json(json!([
			{"name": "Alice"},
			{"name": "Malik"},
			{"name": "Bob"},
		]))
		.unwrap();
		column.apply_filter(&mut source, "li").unwrap();
		assert_eq!(source.filters()[0].value, json!("%li%"));
		assert_eq!(source.count().unwrap(), 2);
	}

	#[rstest]
	#[case("50%", 1)]
	#[case("a_c", 1)]
	#[case("%", 1)]
	fn test_filter_wildcards_are_literal(#[case] input: &str, #[case] expected: usize) {
		let column = TextColumn::new("note", "Note");
		let mut source = MemoryDataSource::from_json(json!([
			{"note": "50% off"},
			{"note": "500 off"},
			{"note": "a_c"},
			{"note": "abc"},
		]))
		.unwrap();
		column.apply_filter(&mut source, input).unwrap();
		assert_eq!(source.count().unwrap(), expected);
	}
}
