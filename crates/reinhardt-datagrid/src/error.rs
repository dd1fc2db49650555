//! Error types for reinhardt-datagrid

use thiserror::Error;

/// Errors raised while configuring or rendering a data grid.
///
/// Every variant describes a programming or configuration mistake. None of
/// them is retried and a render pass that hits one produces no output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
	/// Unknown column passed to filter, sort, filter items or content lookup
	#[error("Invalid column: {0}")]
	InvalidColumn(String),

	/// Bad operator, bad order direction, or a row missing a declared column
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Page window outside its valid range
	#[error("Out of range: {0}")]
	OutOfRange(String),

	/// Render attempted without a data source attached
	#[error("Data grid has no data source attached")]
	MissingDataSource,

	/// Render region requested without a registered template
	#[error("Unresolved wrapper path: {0}")]
	WrapperPathUnresolved(String),

	/// Link generation failed for a destination
	#[error("Link error: {0}")]
	Link(String),

	/// Settings could not be loaded or failed validation
	#[error("Settings error: {0}")]
	Settings(String),
}

/// Result type for data grid operations
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(GridError::InvalidColumn("age".into()), "Invalid column: age")]
	#[case(GridError::OutOfRange("count must be positive".into()), "Out of range: count must be positive")]
	#[case(GridError::MissingDataSource, "Data grid has no data source attached")]
	#[case(
		GridError::WrapperPathUnresolved("row.content cell".into()),
		"Unresolved wrapper path: row.content cell"
	)]
	fn test_error_display(#[case] error: GridError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}
}
