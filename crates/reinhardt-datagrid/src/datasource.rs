//! Backend-agnostic data source contract
//!
//! A [`DataSource`] is configured in two phases. Filters, sort keys and the
//! page window are registered first; nothing touches the backend until
//! [`DataSource::count`] or [`DataSource::execute`] is called. The renderer
//! calls each of them once per render pass and reads every row from the
//! returned [`ResultSet`].
//!
//! ```
//! use reinhardt_datagrid::datasource::{DataSource, MemoryDataSource, Operator, SortOrder};
//! use serde_json::json;
//!
//! let mut source = MemoryDataSource::from_json(json!([
//!     {"id": 1, "name": "Alice", "age": 31},
//!     {"id": 2, "name": "Bob", "age": 25},
//!     {"id": 3, "name": "Carol", "age": 40},
//! ]))
//! .unwrap();
//!
//! source.filter("age", json!(30), Operator::Greater, None).unwrap();
//! source.sort("name", SortOrder::Descending).unwrap();
//!
//! let result = source.execute().unwrap();
//! assert_eq!(result.total(), 2);
//! assert_eq!(result.rows()[0]["name"], "Carol");
//! ```

pub mod mapped;
pub mod memory;

pub use mapped::{ColumnMapping, Mapped, MappedSource};
pub use memory::MemoryDataSource;

use crate::error::{GridError, Result};
use crate::value::Record;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Filter operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	/// `=`
	Equal,
	/// `!=`
	NotEqual,
	/// `>`
	Greater,
	/// `>=`
	GreaterOrEqual,
	/// `<`
	Smaller,
	/// `<=`
	SmallerOrEqual,
	/// `LIKE`
	Like,
	/// `NOT LIKE`
	NotLike,
	/// `IS NULL`
	IsNull,
	/// `IS NOT NULL`
	IsNotNull,
}

impl Operator {
	/// Every supported operator
	pub const ALL: [Operator; 10] = [
		Operator::Equal,
		Operator::NotEqual,
		Operator::Greater,
		Operator::GreaterOrEqual,
		Operator::Smaller,
		Operator::SmallerOrEqual,
		Operator::Like,
		Operator::NotLike,
		Operator::IsNull,
		Operator::IsNotNull,
	];

	/// Returns the SQL spelling of the operator
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Equal => "=",
			Self::NotEqual => "!=",
			Self::Greater => ">",
			Self::GreaterOrEqual => ">=",
			Self::Smaller => "<",
			Self::SmallerOrEqual => "<=",
			Self::Like => "LIKE",
			Self::NotLike => "NOT LIKE",
			Self::IsNull => "IS NULL",
			Self::IsNotNull => "IS NOT NULL",
		}
	}

	/// Whether the operator ignores the filter value
	pub fn is_unary(&self) -> bool {
		matches!(self, Self::IsNull | Self::IsNotNull)
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Operator {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self> {
		let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
		let normalized = normalized.to_ascii_uppercase();
		match normalized.as_str() {
			"=" | "==" => Ok(Self::Equal),
			"!=" | "<>" => Ok(Self::NotEqual),
			">" => Ok(Self::Greater),
			">=" => Ok(Self::GreaterOrEqual),
			"<" => Ok(Self::Smaller),
			"<=" => Ok(Self::SmallerOrEqual),
			"LIKE" => Ok(Self::Like),
			"NOT LIKE" => Ok(Self::NotLike),
			"IS NULL" => Ok(Self::IsNull),
			"IS NOT NULL" => Ok(Self::IsNotNull),
			_ => Err(GridError::InvalidArgument(format!(
				"unknown filter operation '{}'",
				s
			))),
		}
	}
}

/// Escapes `%`, `_` and `\` so `text` matches literally inside a `LIKE`
/// pattern.
pub fn escape_like(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

/// How a filter combines with the filters registered before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chain {
	/// Both predicates must hold
	#[default]
	And,
	/// Either predicate may hold
	Or,
}

impl FromStr for Chain {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_uppercase().as_str() {
			"AND" => Ok(Self::And),
			"OR" => Ok(Self::Or),
			_ => Err(GridError::InvalidArgument(format!(
				"unknown filter chain type '{}'",
				s
			))),
		}
	}
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
	/// Smallest value first
	#[default]
	Ascending,
	/// Largest value first
	Descending,
}

impl SortOrder {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Short form used in the submitted `order` parameter
	pub fn as_short(&self) -> &'static str {
		match self {
			Self::Ascending => "a",
			Self::Descending => "d",
		}
	}
}

impl FromStr for SortOrder {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"a" | "asc" | "ascending" => Ok(Self::Ascending),
			"d" | "desc" | "descending" => Ok(Self::Descending),
			_ => Err(GridError::InvalidArgument(format!(
				"unknown sort order '{}'",
				s
			))),
		}
	}
}

/// A registered filter predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	/// Column the predicate applies to
	pub column: String,
	/// Comparison operator
	pub operator: Operator,
	/// Right-hand side (ignored by unary operators)
	pub value: Value,
	/// Combination with the preceding filters
	pub chain: Chain,
}

/// A registered sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
	/// Column to sort on
	pub column: String,
	/// Direction
	pub order: SortOrder,
}

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
	/// Rows per page, always positive
	pub count: usize,
	/// Zero-based offset of the first row
	pub start: usize,
}

impl Window {
	/// Creates a validated window
	pub fn new(count: usize, start: usize) -> Result<Self> {
		if count == 0 {
			return Err(GridError::OutOfRange(
				"row count of a window must be positive".to_string(),
			));
		}
		Ok(Self { count, start })
	}
}

/// The materialised result of one query
///
/// Holds the windowed rows together with the number of rows that matched
/// before the window was applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
	rows: Vec<Record>,
	total: usize,
}

impl ResultSet {
	/// Creates a result set
	pub fn new(rows: Vec<Record>, total: usize) -> Self {
		Self { rows, total }
	}

	/// Rows inside the window
	pub fn rows(&self) -> &[Record] {
		&self.rows
	}

	/// Total matching rows, ignoring the window
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of rows inside the window
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether the window holds no rows
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Iterates over the windowed rows
	pub fn iter(&self) -> std::slice::Iter<'_, Record> {
		self.rows.iter()
	}
}

impl IntoIterator for ResultSet {
	type Item = Record;
	type IntoIter = std::vec::IntoIter<Record>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.into_iter()
	}
}

impl<'a> IntoIterator for &'a ResultSet {
	type Item = &'a Record;
	type IntoIter = std::slice::Iter<'a, Record>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows.iter()
	}
}

/// Provider of filtered, sorted and paginated rows
pub trait DataSource {
	/// Columns available for display, filtering and sorting, in order
	fn columns(&self) -> Vec<String>;

	/// Whether the source has a column of the given name
	fn has_column(&self, name: &str) -> bool {
		self.columns().iter().any(|c| c == name)
	}

	/// Distinct values of a column, used to populate select filters
	///
	/// # Errors
	///
	/// [`GridError::InvalidColumn`] when the column is unknown.
	fn filter_items(&self, column: &str) -> Result<Vec<Value>>;

	/// Registers a filter predicate
	///
	/// `chain` tells how the predicate combines with the filters registered
	/// before it; `None` means [`Chain::And`].
	///
	/// # Errors
	///
	/// [`GridError::InvalidColumn`] when the column is unknown.
	fn filter(
		&mut self,
		column: &str,
		value: Value,
		operator: Operator,
		chain: Option<Chain>,
	) -> Result<()>;

	/// Registers a filter with the operator and chain given as strings
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] for an unknown operator or chain type,
	/// otherwise as [`DataSource::filter`].
	fn filter_str(
		&mut self,
		column: &str,
		value: Value,
		operator: &str,
		chain: Option<&str>,
	) -> Result<()> {
		let operator = operator.parse::<Operator>()?;
		let chain = chain.map(str::parse::<Chain>).transpose()?;
		self.filter(column, value, operator, chain)
	}

	/// Appends a sort key; earlier keys take priority
	///
	/// # Errors
	///
	/// [`GridError::InvalidColumn`] when the column is unknown.
	fn sort(&mut self, column: &str, order: SortOrder) -> Result<()>;

	/// Sets the pagination window, replacing any previous one
	///
	/// # Errors
	///
	/// [`GridError::OutOfRange`] when `count` is zero.
	fn reduce(&mut self, count: usize, start: usize) -> Result<()>;

	/// Removes all registered filters, sort keys and the window
	fn clear(&mut self);

	/// Number of rows matching the filters, ignoring the window
	fn count(&self) -> Result<usize>;

	/// Runs the query and returns the windowed rows
	fn execute(&self) -> Result<ResultSet>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
	fn columns(&self) -> Vec<String> {
		(**self).columns()
	}

	fn has_column(&self, name: &str) -> bool {
		(**self).has_column(name)
	}

	fn filter_items(&self, column: &str) -> Result<Vec<Value>> {
		(**self).filter_items(column)
	}

	fn filter(
		&mut self,
		column: &str,
		value: Value,
		operator: Operator,
		chain: Option<Chain>,
	) -> Result<()> {
		(**self).filter(column, value, operator, chain)
	}

	fn sort(&mut self, column: &str, order: SortOrder) -> Result<()> {
		(**self).sort(column, order)
	}

	fn reduce(&mut self, count: usize, start: usize) -> Result<()> {
		(**self).reduce(count, start)
	}

	fn clear(&mut self) {
		(**self).clear()
	}

	fn count(&self) -> Result<usize> {
		(**self).count()
	}

	fn execute(&self) -> Result<ResultSet> {
		(**self).execute()
	}
}
