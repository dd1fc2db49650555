//! Date column

use super::{Column, ColumnBase};
use crate::datasource::{DataSource, Operator};
use crate::error::Result;
use crate::i18n::Translator;
use crate::value::{Record, as_f64, int_cast, is_empty};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt::Write;

/// Locale date representation
pub const DEFAULT_DATE_FORMAT: &str = "%x";

/// Placeholder for missing dates, translated
const NOT_AVAILABLE: &str = "N/A";

/// Column for date and date/time values
///
/// Values are read as epoch seconds when numeric, otherwise parsed as
/// RFC 3339, `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d`. The result is formatted with
/// a chrono strftime pattern.
///
/// ```
/// use reinhardt_datagrid::column::{Column, DateColumn};
/// use reinhardt_datagrid::i18n::NoopTranslator;
/// use serde_json::{Map, json};
///
/// let column = DateColumn::new("created", "Created").format("%d.%m.%Y");
/// let row = Map::new();
/// assert_eq!(column.format_content(&json!("2021-01-01"), &row, &NoopTranslator), "01.01.2021");
/// assert_eq!(column.format_content(&json!(0), &row, &NoopTranslator), "N/A");
/// ```
#[derive(Debug)]
pub struct DateColumn {
	base: ColumnBase,
	format: String,
}

impl DateColumn {
	/// Creates a date column using [`DEFAULT_DATE_FORMAT`]
	pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name, caption),
			format: DEFAULT_DATE_FORMAT.to_string(),
		}
	}

	/// Sets the strftime pattern
	pub fn format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	/// The strftime pattern in use
	pub fn pattern(&self) -> &str {
		&self.format
	}

	column_builders!();
}

/// Whether a value falls back to the N/A placeholder
fn is_missing(value: &Value) -> bool {
	value.is_null() || int_cast(value) == 0 || is_empty(value)
}

/// Interprets a value as a point in time
fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
	let numeric = match value {
		Value::String(s) => s.trim().parse::<f64>().ok(),
		Value::Bool(_) => None,
		other => as_f64(other),
	};
	if let Some(seconds) = numeric {
		return DateTime::from_timestamp(seconds.trunc() as i64, 0).map(|dt| dt.naive_utc());
	}
	let text = value.as_str()?.trim();
	DateTime::parse_from_rfc3339(text)
		.map(|dt| dt.naive_local())
		.or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
		.ok()
		.or_else(|| {
			NaiveDate::parse_from_str(text, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}

impl Column for DateColumn {
	column_accessors!();

	fn format_content(&self, value: &Value, row: &Record, translator: &dyn Translator) -> String {
		if let Some(formatted) = self.base.custom_format(value, row) {
			return formatted;
		}
		if is_missing(value) {
			return translator.translate(NOT_AVAILABLE, &[]);
		}
		let Some(datetime) = to_datetime(value) else {
			return translator.translate(NOT_AVAILABLE, &[]);
		};
		let mut output = String::new();
		if write!(output, "{}", datetime.format(&self.format)).is_err() {
			tracing::warn!(
				column = %self.base.name,
				format = %self.format,
				"invalid date format pattern"
			);
			return translator.translate(NOT_AVAILABLE, &[]);
		}
		output
	}

	fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()> {
		source.filter(
			&self.base.name,
			Value::String(value.to_string()),
			Operator::Equal,
			None,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::datasource::MemoryDataSource;
	use crate::i18n::{MessageCatalog, NoopTranslator};
	use rstest::rstest;
	use serde_json::json;

	fn show(column: &DateColumn, value: Value) -> String {
		column.format_content(&value, &Record::new(), &NoopTranslator)
	}

	#[rstest]
	#[case(json!(0))]
	#[case(json!(null))]
	#[case(json!(""))]
	#[case(json!("0"))]
	#[case(json!("abc"))]
	#[case(json!(false))]
	fn test_missing_values_are_not_available(#[case] value: Value) {
		let column = DateColumn::new("created", "Created");
		assert_eq!(show(&column, value), "N/A");
	}

	#[rstest]
	#[case(json!("2021-01-01"), "2021-01-01 00:00")]
	#[case(json!("2021-03-04 05:06:07"), "2021-03-04 05:06")]
	#[case(json!("2021-03-04T05:06:07+02:00"), "2021-03-04 05:06")]
	#[case(json!(86400), "1970-01-02 00:00")]
	#[case(json!("86400"), "1970-01-02 00:00")]
	fn test_formats_parsed_values(#[case] value: Value, #[case] expected: &str) {
		let column = DateColumn::new("created", "Created").format("%Y-%m-%d %H:%M");
		assert_eq!(show(&column, value), expected);
	}

	#[rstest]
	fn test_default_pattern_is_locale_date() {
		let column = DateColumn::new("created", "Created");
		assert_eq!(column.pattern(), "%x");
		assert_eq!(show(&column, json!("2021-01-01")), "01/01/21");
	}

	#[rstest]
	fn test_not_available_is_translated() {
		let mut catalog = MessageCatalog::new("cs");
		catalog.add_translation("N/A", "neuvedeno");
		let column = DateColumn::new("created", "Created");
		assert_eq!(
			column.format_content(&json!(null), &Record::new(), &catalog),
			"neuvedeno"
		);
	}

	#[rstest]
	fn test_invalid_pattern_falls_back() {
		let column = DateColumn::new("created", "Created").format("%Q");
		assert_eq!(show(&column, json!("2021-01-01")), "N/A");
	}

	#[rstest]
	fn test_filter_forwards_raw_equality() {
		let column = DateColumn::new("created", "Created");
		let mut source = MemoryDataSource::from_json(json!([
			{"created": "2021-01-01"},
			{"created": "2021-01-02"},
		]))
		.unwrap();
		column.apply_filter(&mut source, "2021-01-01").unwrap();
		let filter = &source.filters()[0];
		assert_eq!(filter.operator, Operator::Equal);
		assert_eq!(filter.value, json!("2021-01-01"));
		assert_eq!(source.count().unwrap(), 1);
	}
}
