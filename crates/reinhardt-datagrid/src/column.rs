//! Grid column definitions
//!
//! A [`Column`] names a field of the data source, formats its cells and knows
//! how to turn a submitted filter value into a [`DataSource::filter`] call.

/// Builder methods delegating to the `base` field
macro_rules! column_builders {
	() => {
		/// Sets whether sort links are rendered
		pub fn orderable(mut self, orderable: bool) -> Self {
			self.base.orderable = orderable;
			self
		}

		/// Sets the filter widget
		pub fn filter(mut self, filter: $crate::column::ColumnFilter) -> Self {
			self.base.filter = Some(filter);
			self
		}

		/// Adds an attribute to every cell
		pub fn cell_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
			self.base.cell_attrs.push((name.into(), value.into()));
			self
		}

		/// Replaces the built-in formatting
		pub fn formatter<F>(mut self, formatter: F) -> Self
		where
			F: Fn(&serde_json::Value, &$crate::value::Record) -> String + 'static,
		{
			self.base.formatter = Some(Box::new(formatter));
			self
		}
	};
}

/// `Column` accessors reading the `base` field
macro_rules! column_accessors {
	() => {
		fn name(&self) -> &str {
			&self.base.name
		}

		fn caption(&self) -> &str {
			&self.base.caption
		}

		fn is_orderable(&self) -> bool {
			self.base.orderable
		}

		fn filter(&self) -> Option<&$crate::column::ColumnFilter> {
			self.base.filter.as_ref()
		}

		fn cell_attrs(&self) -> &[(String, String)] {
			&self.base.cell_attrs
		}
	};
}

mod action;
mod checkbox;
mod date;
mod filter;
mod numeric;
mod text;

pub use action::ActionColumn;
pub use checkbox::CheckboxColumn;
pub use date::{DEFAULT_DATE_FORMAT, DateColumn};
pub use filter::{ColumnFilter, filter_field_name};
pub use numeric::NumericColumn;
pub use text::TextColumn;

use crate::datasource::DataSource;
use crate::error::Result;
use crate::i18n::Translator;
use crate::markup::Node;
use crate::value::Record;
use serde_json::Value;
use std::fmt::{self, Debug};

/// Custom cell formatter: `(value, row) -> display text`
pub type Formatter = Box<dyn Fn(&Value, &Record) -> String>;

/// Trait for grid column definitions
pub trait Column: Debug {
	/// Field name, unique within a grid
	fn name(&self) -> &str;

	/// Untranslated header caption
	fn caption(&self) -> &str;

	/// Whether sort links are rendered for this column
	fn is_orderable(&self) -> bool;

	/// Filter widget, if the column is filterable
	fn filter(&self) -> Option<&ColumnFilter>;

	/// Attributes copied onto every cell of the column
	fn cell_attrs(&self) -> &[(String, String)];

	/// Whether the column carries row actions instead of data
	fn is_action(&self) -> bool {
		false
	}

	/// Display text of a cell
	fn format_content(&self, value: &Value, row: &Record, translator: &dyn Translator) -> String;

	/// Cell content node; text unless the column emits markup
	fn content(&self, value: &Value, row: &Record, translator: &dyn Translator) -> Node {
		Node::Text(self.format_content(value, row, translator))
	}

	/// Registers the filter for a submitted value on `source`
	///
	/// # Errors
	///
	/// Propagates the data source error.
	fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()>;
}

/// Configuration shared by the built-in columns
pub(crate) struct ColumnBase {
	pub(crate) name: String,
	pub(crate) caption: String,
	pub(crate) orderable: bool,
	pub(crate) filter: Option<ColumnFilter>,
	pub(crate) cell_attrs: Vec<(String, String)>,
	pub(crate) formatter: Option<Formatter>,
}

impl ColumnBase {
	/// Creates an orderable, unfiltered column configuration
	pub(crate) fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			caption: caption.into(),
			orderable: true,
			filter: None,
			cell_attrs: Vec::new(),
			formatter: None,
		}
	}

	/// Runs the custom formatter when one is set
	pub(crate) fn custom_format(&self, value: &Value, row: &Record) -> Option<String> {
		self.formatter.as_ref().map(|format| format(value, row))
	}
}

impl Debug for ColumnBase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnBase")
			.field("name", &self.name)
			.field("caption", &self.caption)
			.field("orderable", &self.orderable)
			.field("filter", &self.filter)
			.field("cell_attrs", &self.cell_attrs)
			.field("has_formatter", &self.formatter.is_some())
			.finish()
	}
}
