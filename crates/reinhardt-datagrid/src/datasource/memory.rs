//! In-process data source over a vector of records

use super::{Chain, DataSource, Filter, Operator, ResultSet, Sort, SortOrder, Window};
use crate::error::{GridError, Result};
use crate::value::{self, Record};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;

/// Data source holding its rows in memory
///
/// Useful for small data sets, fixtures and as the reference for the
/// [`DataSource`] semantics other backends are expected to follow.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
	columns: Vec<String>,
	rows: Vec<Record>,
	filters: Vec<Filter>,
	sorts: Vec<Sort>,
	window: Option<Window>,
}

impl MemoryDataSource {
	/// Creates a source whose columns are the keys of the first record
	pub fn new(rows: Vec<Record>) -> Self {
		let columns: Vec<String> = rows
			.first()
			.map(|row| row.keys().cloned().collect())
			.unwrap_or_default();
		Self::with_columns(columns, rows)
	}

	/// Creates a source with an explicit column list
	///
	/// Records may omit declared columns; missing fields read as null.
	pub fn with_columns<I, S>(columns: I, rows: Vec<Record>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			columns: columns.into_iter().map(Into::into).collect(),
			rows,
			filters: Vec::new(),
			sorts: Vec::new(),
			window: None,
		}
	}

	/// Creates a source from a JSON array of objects
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] when the value is not an array of objects.
	pub fn from_json(data: Value) -> Result<Self> {
		let Value::Array(items) = data else {
			return Err(GridError::InvalidArgument(
				"in-memory data must be a JSON array".to_string(),
			));
		};
		let rows = items
			.into_iter()
			.map(|item| match item {
				Value::Object(map) => Ok(map),
				other => Err(GridError::InvalidArgument(format!(
					"in-memory row must be a JSON object, got {}",
					other
				))),
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::new(rows))
	}

	/// Registered filters, in registration order
	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	/// Registered sort keys, in priority order
	pub fn sorts(&self) -> &[Sort] {
		&self.sorts
	}

	/// Current window, if any
	pub fn window(&self) -> Option<Window> {
		self.window
	}

	fn ensure_column(&self, column: &str) -> Result<()> {
		if self.has_column(column) {
			Ok(())
		} else {
			Err(GridError::InvalidColumn(column.to_string()))
		}
	}

	fn matching_rows(&self) -> Result<Vec<&Record>> {
		let predicates = self
			.filters
			.iter()
			.map(Predicate::compile)
			.collect::<Result<Vec<_>>>()?;

		Ok(self
			.rows
			.iter()
			.filter(|row| {
				predicates
					.iter()
					.enumerate()
					.fold(true, |acc, (index, predicate)| {
						let current = predicate.matches(row);
						match (index, predicate.chain) {
							(0, _) => current,
							(_, Chain::And) => acc && current,
							(_, Chain::Or) => acc || current,
						}
					})
			})
			.collect())
	}
}

struct Predicate<'a> {
	filter: &'a Filter,
	chain: Chain,
	pattern: Option<Regex>,
}

impl<'a> Predicate<'a> {
	fn compile(filter: &'a Filter) -> Result<Self> {
		let pattern = match filter.operator {
			Operator::Like | Operator::NotLike => Some(like_to_regex(&value::to_display(
				&filter.value,
			))?),
			_ => None,
		};
		Ok(Self {
			filter,
			chain: filter.chain,
			pattern,
		})
	}

	fn matches(&self, row: &Record) -> bool {
		let cell = row.get(&self.filter.column).unwrap_or(&Value::Null);
		let expected = &self.filter.value;
		match self.filter.operator {
			Operator::IsNull => cell.is_null(),
			Operator::IsNotNull => !cell.is_null(),
			_ if cell.is_null() => false,
			Operator::Equal => value::loose_eq(cell, expected),
			Operator::NotEqual => !expected.is_null() && !value::loose_eq(cell, expected),
			Operator::Greater => value::compare(cell, expected) == Ordering::Greater,
			Operator::GreaterOrEqual => value::compare(cell, expected) != Ordering::Less,
			Operator::Smaller => value::compare(cell, expected) == Ordering::Less,
			Operator::SmallerOrEqual => value::compare(cell, expected) != Ordering::Greater,
			Operator::Like => self.like(cell),
			Operator::NotLike => !self.like(cell),
		}
	}

	fn like(&self, cell: &Value) -> bool {
		self.pattern
			.as_ref()
			.is_some_and(|re| re.is_match(&value::to_display(cell)))
	}
}

/// Translates a SQL `LIKE` pattern into an anchored, case-insensitive regex
fn like_to_regex(pattern: &str) -> Result<Regex> {
	let mut source = String::with_capacity(pattern.len() + 8);
	source.push('^');
	let mut chars = pattern.chars();
	while let Some(c) = chars.next() {
		match c {
			'%' => source.push_str(".*"),
			'_' => source.push('.'),
			'\\' => {
				if let Some(escaped) = chars.next() {
					source.push_str(&regex::escape(&escaped.to_string()));
				}
			}
			other => source.push_str(&regex::escape(&other.to_string())),
		}
	}
	source.push('$');
	RegexBuilder::new(&source)
		.case_insensitive(true)
		.dot_matches_new_line(true)
		.build()
		.map_err(|e| GridError::InvalidArgument(format!("invalid LIKE pattern '{}': {}", pattern, e)))
}

impl DataSource for MemoryDataSource {
	fn columns(&self) -> Vec<String> {
		self.columns.clone()
	}

	fn has_column(&self, name: &str) -> bool {
		self.columns.iter().any(|c| c == name)
	}

	fn filter_items(&self, column: &str) -> Result<Vec<Value>> {
		self.ensure_column(column)?;
		let mut items: Vec<Value> = Vec::new();
		for row in &self.rows {
			let cell = row.get(column).cloned().unwrap_or(Value::Null);
			if !items.contains(&cell) {
				items.push(cell);
			}
		}
		Ok(items)
	}

	fn filter(
		&mut self,
		column: &str,
		value: Value,
		operator: Operator,
		chain: Option<Chain>,
	) -> Result<()> {
		self.ensure_column(column)?;
		self.filters.push(Filter {
			column: column.to_string(),
			operator,
			value,
			chain: chain.unwrap_or_default(),
		});
		Ok(())
	}

	fn sort(&mut self, column: &str, order: SortOrder) -> Result<()> {
		self.ensure_column(column)?;
		self.sorts.push(Sort {
			column: column.to_string(),
			order,
		});
		Ok(())
	}

	fn reduce(&mut self, count: usize, start: usize) -> Result<()> {
		self.window = Some(Window::new(count, start)?);
		Ok(())
	}

	fn clear(&mut self) {
		self.filters.clear();
		self.sorts.clear();
		self.window = None;
	}

	fn count(&self) -> Result<usize> {
		Ok(self.matching_rows()?.len())
	}

	fn execute(&self) -> Result<ResultSet> {
		let mut matched = self.matching_rows()?;
		let total = matched.len();

		if !self.sorts.is_empty() {
			matched.sort_by(|a, b| {
				for sort in &self.sorts {
					let left = a.get(&sort.column).unwrap_or(&Value::Null);
					let right = b.get(&sort.column).unwrap_or(&Value::Null);
					let ordering = match sort.order {
						SortOrder::Ascending => value::compare(left, right),
						SortOrder::Descending => value::compare(right, left),
					};
					if ordering != Ordering::Equal {
						return ordering;
					}
				}
				Ordering::Equal
			});
		}

		let rows: Vec<Record> = match self.window {
			Some(window) => matched
				.into_iter()
				.skip(window.start)
				.take(window.count)
				.cloned()
				.collect(),
			None => matched.into_iter().cloned().collect(),
		};

		tracing::debug!(
			filters = self.filters.len(),
			sorts = self.sorts.len(),
			total,
			returned = rows.len(),
			"executed in-memory query"
		);

		Ok(ResultSet::new(rows, total))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn people() -> MemoryDataSource {
		MemoryDataSource::from_json(json!([
			{"id": 1, "name": "Alice", "city": "Prague", "age": 31, "note": null},
			{"id": 2, "name": "Bob", "city": "Brno", "age": 25, "note": "vip"},
			{"id": 3, "name": "alfred", "city": "Prague", "age": 25, "note": null},
			{"id": 4, "name": "Dana", "city": "Ostrava", "age": 40, "note": "new"},
		]))
		.unwrap()
	}

	fn names(result: &ResultSet) -> Vec<String> {
		result
			.iter()
			.map(|row| value::to_display(&row["name"]))
			.collect()
	}

	#[rstest]
	fn test_columns_from_first_record(people: MemoryDataSource) {
		assert_eq!(people.columns(), vec!["id", "name", "city", "age", "note"]);
		assert!(people.has_column("city"));
		assert!(!people.has_column("email"));
	}

	#[rstest]
	fn test_like_is_case_insensitive(mut people: MemoryDataSource) {
		people
			.filter("name", json!("al%"), Operator::Like, None)
			.unwrap();
		let result = people.execute().unwrap();
		assert_eq!(names(&result), vec!["Alice", "alfred"]);
	}

	#[rstest]
	fn test_like_single_char_wildcard(mut people: MemoryDataSource) {
		people
			.filter("name", json!("B_b"), Operator::Like, None)
			.unwrap();
		assert_eq!(people.count().unwrap(), 1);
	}

	#[rstest]
	fn test_null_operators(mut people: MemoryDataSource) {
		people
			.filter("note", Value::Null, Operator::IsNull, None)
			.unwrap();
		assert_eq!(names(&people.execute().unwrap()), vec!["Alice", "alfred"]);

		people.clear();
		people
			.filter("note", Value::Null, Operator::IsNotNull, None)
			.unwrap();
		assert_eq!(names(&people.execute().unwrap()), vec!["Bob", "Dana"]);
	}

	#[rstest]
	fn test_chain_or_is_union(mut people: MemoryDataSource) {
		people
			.filter("city", json!("Brno"), Operator::Equal, None)
			.unwrap();
		people
			.filter("age", json!(40), Operator::Equal, Some(Chain::Or))
			.unwrap();
		assert_eq!(names(&people.execute().unwrap()), vec!["Bob", "Dana"]);
	}

	#[rstest]
	fn test_chain_and_is_intersection(mut people: MemoryDataSource) {
		people
			.filter("city", json!("Prague"), Operator::Equal, None)
			.unwrap();
		people
			.filter("age", json!("25"), Operator::Equal, Some(Chain::And))
			.unwrap();
		assert_eq!(names(&people.execute().unwrap()), vec!["alfred"]);
	}

	#[rstest]
	fn test_multi_key_sort_is_stable(mut people: MemoryDataSource) {
		people.sort("age", SortOrder::Ascending).unwrap();
		let result = people.execute().unwrap();
		// Bob and alfred share age 25 and keep their input order
		assert_eq!(names(&result), vec!["Bob", "alfred", "Alice", "Dana"]);

		people.sort("name", SortOrder::Descending).unwrap();
		let result = people.execute().unwrap();
		assert_eq!(names(&result), vec!["alfred", "Bob", "Alice", "Dana"]);
	}

	#[rstest]
	fn test_sort_mixed_value_types() {
		let mut seed: u64 = 7;
		let rows = (0..2000)
			.map(|id| {
				seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
				let r = (seed >> 33) % 1000;
				let v = match id % 3 {
					0 => json!(r),
					1 => json!(r.to_string()),
					_ => json!(format!("x{}", r)),
				};
				json!({"id": id, "v": v}).as_object().cloned().unwrap()
			})
			.collect::<Vec<_>>();
		let mut source = MemoryDataSource::new(rows);
		assert_eq!(source.columns(), vec!["id", "v"]);
		source.sort("v", SortOrder::Ascending).unwrap();

		let result = source.execute().unwrap();
		assert_eq!(result.len(), 2000);
		for pair in result.rows().windows(2) {
			assert_ne!(
				value::compare(&pair[0]["v"], &pair[1]["v"]),
				Ordering::Greater
			);
		}
		// numbers and numeric strings first, then plain text
		assert!(result.rows()[0]["v"].as_str().is_none_or(|s| !s.starts_with('x')));
		assert!(result.rows()[1999]["v"].as_str().is_some_and(|s| s.starts_with('x')));
	}

	#[rstest]
	fn test_reduce_replaces_window(mut people: MemoryDataSource) {
		people.reduce(3, 0).unwrap();
		people.reduce(2, 1).unwrap();
		let result = people.execute().unwrap();
		assert_eq!(names(&result), vec!["Bob", "alfred"]);
		assert_eq!(result.total(), 4);
		assert_eq!(people.count().unwrap(), 4);
	}

	#[rstest]
	fn test_reduce_past_end_is_empty(mut people: MemoryDataSource) {
		people.reduce(5, 10).unwrap();
		let result = people.execute().unwrap();
		assert!(result.is_empty());
		assert_eq!(result.total(), 4);
	}

	#[rstest]
	fn test_reduce_zero_count_out_of_range(mut people: MemoryDataSource) {
		assert!(matches!(people.reduce(0, 0), Err(GridError::OutOfRange(_))));
	}

	#[rstest]
	fn test_unknown_column_rejected(mut people: MemoryDataSource) {
		assert_eq!(
			people.filter("email", json!("x"), Operator::Equal, None),
			Err(GridError::InvalidColumn("email".to_string()))
		);
		assert!(matches!(
			people.sort("email", SortOrder::Ascending),
			Err(GridError::InvalidColumn(_))
		));
		assert!(matches!(
			people.filter_items("email"),
			Err(GridError::InvalidColumn(_))
		));
	}

	#[rstest]
	fn test_filter_str_rejects_bad_operator(mut people: MemoryDataSource) {
		let result = people.filter_str("name", json!("x"), "~", None);
		assert!(matches!(result, Err(GridError::InvalidArgument(_))));
		assert!(people.filters().is_empty());
	}

	#[rstest]
	fn test_filter_items_distinct_in_order(people: MemoryDataSource) {
		assert_eq!(
			people.filter_items("city").unwrap(),
			vec![json!("Prague"), json!("Brno"), json!("Ostrava")]
		);
	}

	#[rstest]
	fn test_from_json_rejects_non_array() {
		assert!(matches!(
			MemoryDataSource::from_json(json!({"id": 1})),
			Err(GridError::InvalidArgument(_))
		));
	}
}
