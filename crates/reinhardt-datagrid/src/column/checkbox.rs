//! Checkbox column

use super::{Column, ColumnBase, ColumnFilter};
use crate::datasource::{DataSource, Operator};
use crate::error::Result;
use crate::i18n::Translator;
use crate::markup::{Element, Node};
use crate::value::{Record, is_empty};
use serde_json::Value;

/// Column rendering a read-only checkbox, checked for truthy values
///
/// Comes with a yes/no select filter comparing against `1` / `0`.
#[derive(Debug)]
pub struct CheckboxColumn {
	base: ColumnBase,
}

impl CheckboxColumn {
	/// Creates a checkbox column
	pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		let mut base = ColumnBase::new(name, caption);
		base.filter = Some(ColumnFilter::select_items([("1", "Yes"), ("0", "No")]));
		Self { base }
	}

	column_builders!();
}

impl Column for CheckboxColumn {
	column_accessors!();

	fn format_content(&self, value: &Value, row: &Record, _translator: &dyn Translator) -> String {
		if let Some(formatted) = self.base.custom_format(value, row) {
			return formatted;
		}
		if is_empty(value) { "0" } else { "1" }.to_string()
	}

	fn content(&self, value: &Value, row: &Record, translator: &dyn Translator) -> Node {
		if self.base.formatter.is_some() {
			return Node::Text(self.format_content(value, row, translator));
		}
		let checked = if is_empty(value) { "" } else { "checked" };
		Element::new("input")
			.attr("type", "checkbox")
			.attr("disabled", "disabled")
			.attr("checked", checked)
			.into()
	}

	fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()> {
		let flag = if is_empty(&Value::String(value.to_string())) {
			0
		} else {
			1
		};
		source.filter(&self.base.name, Value::from(flag), Operator::Equal, None)
	}
}
