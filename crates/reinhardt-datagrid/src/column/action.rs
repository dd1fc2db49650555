//! Action column

use super::{Column, ColumnFilter};
use crate::datasource::DataSource;
use crate::error::Result;
use crate::i18n::Translator;
use crate::value::Record;
use serde_json::Value;

/// Column holding the row actions
///
/// It has no data field. Its header shows the global actions and its filter
/// cell the filter submit button.
#[derive(Debug, Clone)]
pub struct ActionColumn {
	name: String,
	caption: String,
	cell_attrs: Vec<(String, String)>,
}

impl ActionColumn {
	/// Creates the action column
	pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			caption: caption.into(),
			cell_attrs: Vec::new(),
		}
	}

	/// Adds an attribute to every cell
	pub fn cell_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.cell_attrs.push((name.into(), value.into()));
		self
	}
}

impl Column for ActionColumn {
	fn name(&self) -> &str {
		&self.name
	}

	fn caption(&self) -> &str {
		&self.caption
	}

	fn is_orderable(&self) -> bool {
		false
	}

	fn filter(&self) -> Option<&ColumnFilter> {
		None
	}

	fn cell_attrs(&self) -> &[(String, String)] {
		&self.cell_attrs
	}

	fn is_action(&self) -> bool {
		true
	}

	fn format_content(&self, _value: &Value, _row: &Record, _translator: &dyn Translator) -> String {
		String::new()
	}

	fn apply_filter(&self, _source: &mut dyn DataSource, _value: &str) -> Result<()> {
		Ok(())
	}
}
