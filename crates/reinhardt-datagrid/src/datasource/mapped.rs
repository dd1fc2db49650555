//! Column alias mapping over a data source
//!
//! Backends whose native field names differ from the names shown in the grid
//! (`u.first_name` vs `name`) expose the aliases through a [`ColumnMapping`].
//! Column discovery answers from the aliases only; translation to physical
//! fields happens inside filter, sort and execution.

use super::{Chain, DataSource, Operator, ResultSet, SortOrder};
use crate::error::{GridError, Result};
use crate::value::Record;
use indexmap::IndexMap;
use serde_json::Value;

/// Alias to physical field dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
	mapping: IndexMap<String, String>,
}

impl ColumnMapping {
	/// Creates an empty mapping
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the whole mapping
	pub fn set_mapping<I, A, P>(&mut self, mapping: I)
	where
		I: IntoIterator<Item = (A, P)>,
		A: Into<String>,
		P: Into<String>,
	{
		self.mapping = mapping
			.into_iter()
			.map(|(alias, physical)| (alias.into(), physical.into()))
			.collect();
	}

	/// Adds or replaces one alias
	pub fn insert(&mut self, alias: impl Into<String>, physical: impl Into<String>) {
		self.mapping.insert(alias.into(), physical.into());
	}

	/// Whether the alias is mapped
	pub fn has_column(&self, alias: &str) -> bool {
		self.mapping.contains_key(alias)
	}

	/// Aliases in insertion order
	pub fn columns(&self) -> Vec<String> {
		self.mapping.keys().cloned().collect()
	}

	/// Physical field behind an alias
	///
	/// # Errors
	///
	/// [`GridError::InvalidColumn`] when the alias is unknown.
	pub fn physical(&self, alias: &str) -> Result<&str> {
		self.mapping
			.get(alias)
			.map(String::as_str)
			.ok_or_else(|| GridError::InvalidColumn(alias.to_string()))
	}

	/// Alias of a physical field, if any
	pub fn alias(&self, physical: &str) -> Option<&str> {
		self.mapping
			.iter()
			.find(|(_, p)| p.as_str() == physical)
			.map(|(a, _)| a.as_str())
	}

	/// Iterates over `(alias, physical)` pairs
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.mapping.iter().map(|(a, p)| (a.as_str(), p.as_str()))
	}

	/// Whether no alias is mapped
	pub fn is_empty(&self) -> bool {
		self.mapping.is_empty()
	}
}

impl<A: Into<String>, P: Into<String>> FromIterator<(A, P)> for ColumnMapping {
	fn from_iter<I: IntoIterator<Item = (A, P)>>(iter: I) -> Self {
		let mut mapping = Self::new();
		mapping.set_mapping(iter);
		mapping
	}
}

/// A data source addressed through column aliases
///
/// Implementors translate aliases to physical fields before querying their
/// backend. `columns` and `has_column` of such a source must answer from
/// [`ColumnMapping::columns`] and [`ColumnMapping::has_column`].
pub trait MappedSource: DataSource {
	/// The alias mapping in effect
	fn mapping(&self) -> &ColumnMapping;

	/// Replaces the alias mapping
	fn set_mapping(&mut self, mapping: ColumnMapping);
}

/// Decorator putting a [`ColumnMapping`] in front of any data source
///
/// ```
/// use reinhardt_datagrid::datasource::{ColumnMapping, DataSource, Mapped, MemoryDataSource, Operator};
/// use serde_json::json;
///
/// let backend = MemoryDataSource::from_json(json!([
///     {"user_id": 1, "first_name": "Alice"},
///     {"user_id": 2, "first_name": "Bob"},
/// ]))
/// .unwrap();
/// let mapping: ColumnMapping = [("id", "user_id"), ("name", "first_name")].into_iter().collect();
/// let mut source = Mapped::new(backend, mapping);
///
/// source.filter("name", json!("Bob"), Operator::Equal, None).unwrap();
/// let result = source.execute().unwrap();
/// assert_eq!(result.rows()[0]["id"], 2);
/// ```
#[derive(Debug, Clone)]
pub struct Mapped<S> {
	inner: S,
	mapping: ColumnMapping,
}

impl<S: DataSource> Mapped<S> {
	/// Wraps a backend with the given mapping
	pub fn new(inner: S, mapping: ColumnMapping) -> Self {
		Self { inner, mapping }
	}

	/// The wrapped backend
	pub fn inner(&self) -> &S {
		&self.inner
	}

	/// Unwraps the backend
	pub fn into_inner(self) -> S {
		self.inner
	}

	fn to_aliases(&self, row: &Record) -> Record {
		self.mapping
			.iter()
			.map(|(alias, physical)| {
				let value = row.get(physical).cloned().unwrap_or(Value::Null);
				(alias.to_string(), value)
			})
			.collect()
	}
}

impl<S: DataSource> MappedSource for Mapped<S> {
	fn mapping(&self) -> &ColumnMapping {
		&self.mapping
	}

	fn set_mapping(&mut self, mapping: ColumnMapping) {
		self.mapping = mapping;
	}
}

impl<S: DataSource> DataSource for Mapped<S> {
	fn columns(&self) -> Vec<String> {
		self.mapping.columns()
	}

	fn has_column(&self, name: &str) -> bool {
		self.mapping.has_column(name)
	}

	fn filter_items(&self, column: &str) -> Result<Vec<Value>> {
		let physical = self.mapping.physical(column)?;
		self.inner.filter_items(physical)
	}

	fn filter(
		&mut self,
		column: &str,
		value: Value,
		operator: Operator,
		chain: Option<Chain>,
	) -> Result<()> {
		let physical = self.mapping.physical(column)?.to_string();
		self.inner.filter(&physical, value, operator, chain)
	}

	fn sort(&mut self, column: &str, order: SortOrder) -> Result<()> {
		let physical = self.mapping.physical(column)?.to_string();
		self.inner.sort(&physical, order)
	}

	fn reduce(&mut self, count: usize, start: usize) -> Result<()> {
		self.inner.reduce(count, start)
	}

	fn clear(&mut self) {
		self.inner.clear();
	}

	fn count(&self) -> Result<usize> {
		self.inner.count()
	}

	fn execute(&self) -> Result<ResultSet> {
		let result = self.inner.execute()?;
		let total = result.total();
		let rows = result.into_iter().map(|row| self.to_aliases(&row)).collect();
		Ok(ResultSet::new(rows, total))
	}
}
