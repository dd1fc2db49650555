//! Submitted request values and the grid state decoded from them
//!
//! The grid is stateless between requests. Sort order, page, page size and
//! filter values travel in the query string and are recovered through
//! [`SubmittedValues`]:
//!
//! | field | example |
//! |---|---|
//! | `order` | `name=a&age=d` (urlencoded, priority order) |
//! | `page` | `3` |
//! | `itemsPerPage` | `50` |
//! | `filters[<column>]` | `filters[name]=ali` |

use crate::column::filter_field_name;
use crate::datasource::SortOrder;
use crate::error::{GridError, Result};
use crate::link::LinkArgs;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Field holding the sort order
pub const ORDER_FIELD: &str = "order";
/// Field holding the one-based page number
pub const PAGE_FIELD: &str = "page";
/// Field holding the page size
pub const ITEMS_PER_PAGE_FIELD: &str = "itemsPerPage";

/// Reads submitted fields by name
pub trait SubmittedValues {
	/// Value of a submitted field
	fn value(&self, field: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher> SubmittedValues for HashMap<String, String, S> {
	fn value(&self, field: &str) -> Option<String> {
		self.get(field).cloned()
	}
}

impl SubmittedValues for IndexMap<String, String> {
	fn value(&self, field: &str) -> Option<String> {
		self.get(field).cloned()
	}
}

/// Submitted values decoded from a query string
///
/// ```
/// use reinhardt_datagrid::request::{QueryValues, SubmittedValues};
///
/// let values = QueryValues::parse("page=2&filters%5Bname%5D=ali").unwrap();
/// assert_eq!(values.value("filters[name]").as_deref(), Some("ali"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
	values: IndexMap<String, String>,
}

impl QueryValues {
	/// Decodes a query string, with or without the leading `?`
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] when the string is not valid urlencoded
	/// data.
	pub fn parse(query: &str) -> Result<Self> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
			.map_err(|e| GridError::InvalidArgument(format!("invalid query string: {}", e)))?;
		Ok(Self {
			values: pairs.into_iter().collect(),
		})
	}

	/// Number of distinct fields
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no field was submitted
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl SubmittedValues for QueryValues {
	fn value(&self, field: &str) -> Option<String> {
		self.values.get(field).cloned()
	}
}

/// Sort order, page, page size and filter values of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
	/// Sort keys in priority order
	pub order: Vec<(String, SortOrder)>,
	/// One-based page number
	pub page: usize,
	/// Requested page size
	pub items_per_page: Option<usize>,
	/// Non-empty filter values by column
	pub filters: IndexMap<String, String>,
}

impl Default for GridState {
	fn default() -> Self {
		Self {
			order: Vec::new(),
			page: 1,
			items_per_page: None,
			filters: IndexMap::new(),
		}
	}
}

/// Decodes the `order` field
///
/// # Errors
///
/// [`GridError::InvalidArgument`] for undecodable input or an unknown
/// direction.
pub fn parse_order(order: &str) -> Result<Vec<(String, SortOrder)>> {
	let pairs: Vec<(String, String)> = serde_urlencoded::from_str(order)
		.map_err(|e| GridError::InvalidArgument(format!("invalid order '{}': {}", order, e)))?;
	pairs
		.into_iter()
		.map(|(column, dir)| Ok((column, dir.parse::<SortOrder>()?)))
		.collect()
}

/// Encodes sort keys into the `order` field
pub fn encode_order(order: &[(String, SortOrder)]) -> String {
	let pairs: Vec<(&str, &str)> = order
		.iter()
		.map(|(column, dir)| (column.as_str(), dir.as_short()))
		.collect();
	serde_urlencoded::to_string(pairs).unwrap_or_default()
}

impl GridState {
	/// Recovers the state from submitted values
	///
	/// Only `filters[<column>]` fields of the given columns are read; empty
	/// filter values are ignored. A missing or malformed page falls back to 1.
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] for a malformed `order` field.
	pub fn from_submitted<'a, I>(values: &dyn SubmittedValues, columns: I) -> Result<Self>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let order = match values.value(ORDER_FIELD) {
			Some(order) if !order.is_empty() => parse_order(&order)?,
			_ => Vec::new(),
		};
		let page = values
			.value(PAGE_FIELD)
			.and_then(|p| p.trim().parse::<usize>().ok())
			.filter(|p| *p > 0)
			.unwrap_or(1);
		let items_per_page = values
			.value(ITEMS_PER_PAGE_FIELD)
			.and_then(|n| n.trim().parse::<usize>().ok())
			.filter(|n| *n > 0);
		let filters = columns
			.into_iter()
			.filter_map(|column| {
				values
					.value(&filter_field_name(column))
					.filter(|v| !v.trim().is_empty())
					.map(|v| (column.to_string(), v))
			})
			.collect();

		let state = Self {
			order,
			page,
			items_per_page,
			filters,
		};
		tracing::debug!(
			order = ?state.order,
			page = state.page,
			items_per_page = ?state.items_per_page,
			filters = state.filters.len(),
			"decoded grid state"
		);
		Ok(state)
	}

	/// Current direction of a column, if it is sorted
	pub fn order_of(&self, column: &str) -> Option<SortOrder> {
		self.order
			.iter()
			.find(|(c, _)| c == column)
			.map(|(_, dir)| *dir)
	}

	/// Sort keys after requesting `column` in direction `dir`
	///
	/// With `multi` the column keeps its priority (or is appended) and the
	/// other keys stay; otherwise it becomes the only key.
	pub fn order_with(&self, column: &str, dir: SortOrder, multi: bool) -> Vec<(String, SortOrder)> {
		if !multi {
			return vec![(column.to_string(), dir)];
		}
		let mut order = self.order.clone();
		match order.iter_mut().find(|(c, _)| c == column) {
			Some((_, current)) => *current = dir,
			None => order.push((column.to_string(), dir)),
		}
		order
	}

	/// Arguments that keep this state across links
	pub fn link_args(&self) -> LinkArgs {
		let mut args = LinkArgs::new();
		if !self.order.is_empty() {
			args.insert(ORDER_FIELD.to_string(), encode_order(&self.order));
		}
		if let Some(n) = self.items_per_page {
			args.insert(ITEMS_PER_PAGE_FIELD.to_string(), n.to_string());
		}
		for (column, value) in &self.filters {
			args.insert(filter_field_name(column), value.clone());
		}
		args
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_state_from_query() {
		let values =
			QueryValues::parse("?order=name%3Da%26age%3Dd&page=3&itemsPerPage=50&filters%5Bname%5D=ali&filters%5Bage%5D=")
				.unwrap();
		let state = GridState::from_submitted(&values, ["name", "age"]).unwrap();
		assert_eq!(
			state.order,
			vec![
				("name".to_string(), SortOrder::Ascending),
				("age".to_string(), SortOrder::Descending)
			]
		);
		assert_eq!(state.page, 3);
		assert_eq!(state.items_per_page, Some(50));
		assert_eq!(state.filters.len(), 1);
		assert_eq!(state.filters["name"], "ali");
	}

	#[rstest]
	#[case("")]
	#[case("0")]
	#[case("abc")]
	fn test_bad_page_defaults_to_first(#[case] page: &str) {
		let mut values = HashMap::new();
		values.insert(PAGE_FIELD.to_string(), page.to_string());
		let state = GridState::from_submitted(&values, []).unwrap();
		assert_eq!(state.page, 1);
	}

	#[rstest]
	fn test_bad_order_direction() {
		let mut values = HashMap::new();
		values.insert(ORDER_FIELD.to_string(), "name=up".to_string());
		assert!(matches!(
			GridState::from_submitted(&values, []),
			Err(GridError::InvalidArgument(_))
		));
	}

	#[rstest]
	fn test_order_with() {
		let state = GridState {
			order: vec![
				("name".into(), SortOrder::Ascending),
				("age".into(), SortOrder::Ascending),
			],
			..GridState::default()
		};
		assert_eq!(
			state.order_with("age", SortOrder::Descending, true),
			vec![
				("name".to_string(), SortOrder::Ascending),
				("age".to_string(), SortOrder::Descending)
			]
		);
		assert_eq!(
			state.order_with("age", SortOrder::Descending, false),
			vec![("age".to_string(), SortOrder::Descending)]
		);
		assert_eq!(state.order_of("name"), Some(SortOrder::Ascending));
		assert_eq!(state.order_of("email"), None);
	}

	#[rstest]
	fn test_link_args_keep_state() {
		let mut state = GridState {
			order: vec![("name".into(), SortOrder::Descending)],
			items_per_page: Some(25),
			..GridState::default()
		};
		state.filters.insert("role".into(), "admin".into());
		let args = state.link_args();
		assert_eq!(args["order"], "name=d");
		assert_eq!(args["itemsPerPage"], "25");
		assert_eq!(args["filters[role]"], "admin");
	}
}
