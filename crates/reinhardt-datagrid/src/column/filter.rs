//! Filter widgets rendered in the filter row

use crate::datasource::DataSource;
use crate::error::Result;
use crate::i18n::Translator;
use crate::markup::Element;
use crate::value::to_display;

/// Name of the submitted field holding the filter value of `column`
pub fn filter_field_name(column: &str) -> String {
	format!("filters[{}]", column)
}

/// Filter widget of a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFilter {
	/// Free text input
	Text,
	/// Select box; items are `(value, label)` pairs, taken from the distinct
	/// column values when `None`
	Select {
		/// Explicit items
		items: Option<Vec<(String, String)>>,
	},
}

impl ColumnFilter {
	/// A select box populated from the data source
	pub fn select() -> Self {
		Self::Select { items: None }
	}

	/// A select box with fixed items
	pub fn select_items<I, V, L>(items: I) -> Self
	where
		I: IntoIterator<Item = (V, L)>,
		V: Into<String>,
		L: Into<String>,
	{
		Self::Select {
			items: Some(
				items
					.into_iter()
					.map(|(value, label)| (value.into(), label.into()))
					.collect(),
			),
		}
	}

	/// Class the renderer puts on the control
	pub fn css_class(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Select { .. } => "select",
		}
	}

	/// Builds the form control for `column` showing `current`
	///
	/// # Errors
	///
	/// Propagates [`DataSource::filter_items`] errors for data driven selects.
	pub fn render(
		&self,
		column: &str,
		current: Option<&str>,
		source: &dyn DataSource,
		translator: &dyn Translator,
	) -> Result<Element> {
		let name = filter_field_name(column);
		match self {
			Self::Text => Ok(Element::new("input")
				.attr("type", "text")
				.attr("name", name)
				.attr("value", current.unwrap_or_default())),
			Self::Select { items } => {
				let items: Vec<(String, String)> = match items {
					Some(items) => items
						.iter()
						.map(|(value, label)| (value.clone(), translator.translate(label, &[])))
						.collect(),
					None => source
						.filter_items(column)?
						.iter()
						.map(|value| {
							let display = to_display(value);
							(display.clone(), display)
						})
						.collect(),
				};
				let mut select = Element::new("select")
					.attr("name", name)
					.child(Element::new("option").attr("value", ""));
				for (value, label) in items {
					let mut option = Element::new("option").attr("value", value.clone()).text(label);
					if current == Some(value.as_str()) {
						option.set_attr("selected", "selected");
					}
					select.add_child(option);
				}
				Ok(select)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datasource::MemoryDataSource;
	use crate::i18n::NoopTranslator;
	use rstest::rstest;
	use serde_json::json;

	fn source() -> MemoryDataSource {
		MemoryDataSource::from_json(json!([
			{"id": 1, "role": "admin"},
			{"id": 2, "role": "user"},
			{"id": 3, "role": "admin"},
		]))
		.unwrap()
	}

	#[rstest]
	fn test_text_filter_keeps_current_value() {
		let el = ColumnFilter::Text
			.render("name", Some("ali"), &source(), &NoopTranslator)
			.unwrap();
		assert_eq!(
			el.render(),
			r#"<input type="text" name="filters[name]" value="ali" />"#
		);
	}

	#[rstest]
	fn test_select_from_distinct_values() {
		let el = ColumnFilter::select()
			.render("role", Some("user"), &source(), &NoopTranslator)
			.unwrap();
		assert_eq!(
			el.render(),
			concat!(
				r#"<select name="filters[role]"><option value=""></option>"#,
				r#"<option value="admin">admin</option>"#,
				r#"<option value="user" selected="selected">user</option></select>"#
			)
		);
	}

	#[rstest]
	fn test_select_unknown_column() {
		assert!(
			ColumnFilter::select()
				.render("missing", None, &source(), &NoopTranslator)
				.is_err()
		);
	}

	#[rstest]
	fn test_explicit_items_and_class() {
		let filter = ColumnFilter::select_items([("1", "Yes"), ("0", "No")]);
		assert_eq!(filter.css_class(), "select");
		let el = filter.render("active", None, &source(), &NoopTranslator).unwrap();
		assert_eq!(el.children().len(), 3);
	}
}
