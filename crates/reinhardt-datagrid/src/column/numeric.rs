//! Numeric column

use super::{Column, ColumnBase};
use crate::datasource::{DataSource, Operator};
use crate::error::Result;
use crate::i18n::Translator;
use crate::value::{Record, as_f64, to_display};
use serde_json::Value;

/// Operator prefixes accepted in a submitted filter, longest first
const PREFIXES: [(&str, Operator); 7] = [
	("<=", Operator::SmallerOrEqual),
	(">=", Operator::GreaterOrEqual),
	("!=", Operator::NotEqual),
	("<>", Operator::NotEqual),
	("<", Operator::Smaller),
	(">", Operator::Greater),
	("=", Operator::Equal),
];

/// Splits `">= 10"` into the operator and the operand
fn split_operator(input: &str) -> (Operator, &str) {
	let input = input.trim();
	PREFIXES
		.iter()
		.find_map(|(prefix, op)| input.strip_prefix(prefix).map(|rest| (*op, rest.trim())))
		.unwrap_or((Operator::Equal, input))
}

/// Column of numbers with optional fixed precision
///
/// A submitted filter may start with a comparison operator (`>= 10`,
/// `<5`); without one it filters on equality.
#[derive(Debug)]
pub struct NumericColumn {
	base: ColumnBase,
	precision: Option<usize>,
}

impl NumericColumn {
	/// Creates a numeric column
	pub fn new(name: impl Into<String>, caption: impl Into<String>) -> Self {
		Self {
			base: ColumnBase::new(name, caption),
			precision: None,
		}
	}

	/// Number of decimal places shown
	pub fn precision(mut self, precision: usize) -> Self {
		self.precision = Some(precision);
		self
	}

	column_builders!();
}

impl Column for NumericColumn {
	column_accessors!();

	fn format_content(&self, value: &Value, row: &Record, _translator: &dyn Translator) -> String {
		if let Some(formatted) = self.base.custom_format(value, row) {
			return formatted;
		}
		match (self.precision, as_f64(value)) {
			(Some(precision), Some(number)) if !value.is_boolean() => {
				format!("{:.*}", precision, number)
			}
			_ => to_display(value),
		}
	}

	fn apply_filter(&self, source: &mut dyn DataSource, value: &str) -> Result<()> {
		let (operator, operand) = split_operator(value);
		let operand = operand
			.parse::<i64>()
			.map(Value::from)
			.or_else(|_| operand.parse::<f64>().map(Value::from))
			.unwrap_or_else(|_| Value::String(operand.to_string()));
		source.filter(&self.base.name, operand, operator, None)
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
	#[case(">= 10", Operator::GreaterOrEqual, "10")]
	#[case("<5", Operator::Smaller, "5")]
	#[case("<> 3", Operator::NotEqual, "3")]
	#[case("42", Operator::Equal, "42")]
	#[case("= 1.5", Operator::Equal, "1.5")]
	fn test_split_operator(#[case] input: &str, #[case] op: Operator, #[case] operand: &str) {
		assert_eq!(split_operator(input), (op, operand));
	}

	#[rstest]
	fn test_precision() {
		let column = NumericColumn::new("price", "Price").precision(2);
		let shown = column.format_content(&json!(3.14159), &Record::new(), &NoopTranslator);
		assert_eq!(shown, "3.14");
		let shown = column.format_content(&json!(null), &Record::new(), &NoopTranslator);
		assert_eq!(shown, "");
	}

	#[rstest]
	fn test_filter_with_operator() {
		let column = NumericColumn::new("age", "Age");
		let mut source = MemoryDataSource::from_json(json!([
			{"age": 20}, {"age": 30}, {"age": 40},
		]))
		.unwrap();
		column.apply_filter(&mut source, ">= 30").unwrap();
		assert_eq!(source.filters()[0].operator, Operator::GreaterOrEqual);
		assert_eq!(source.filters()[0].value, json!(30));
		assert_eq!(source.count().unwrap(), 2);
	}
}
