//! Common test fixtures for reinhardt-datagrid tests

#![allow(dead_code)]

use reinhardt_datagrid::column::{ColumnFilter, NumericColumn, TextColumn};
use reinhardt_datagrid::datasource::MemoryDataSource;
use reinhardt_datagrid::grid::DataGrid;
use reinhardt_datagrid::link::RouteTable;
use rstest::*;
use serde_json::json;

/// Cities cycled through the generated users
pub const CITIES: [&str; 3] = ["Prague", "Brno", "Ostrava"];

/// `count` users with ids `1..=count` and zero padded names
pub fn users(count: usize) -> MemoryDataSource {
	let rows = (1..=count)
		.map(|i| {
			json!({
				"id": i,
				"name": format!("user{:02}", i),
				"city": CITIES[i % CITIES.len()],
				"age": 20 + i % 7,
			})
		})
		.collect::<Vec<_>>();
	MemoryDataSource::from_json(json!(rows)).unwrap()
}

/// Rows of `(age, city index)` with ids in input order
pub fn people(data: &[(i64, usize)]) -> MemoryDataSource {
	let rows = data
		.iter()
		.enumerate()
		.map(|(i, (age, city))| json!({"id": i + 1, "age": age, "city": CITIES[*city]}))
		.collect::<Vec<_>>();
	MemoryDataSource::from_json(json!(rows)).unwrap()
}

/// Route table rooted at `/users`
#[fixture]
pub fn routes() -> RouteTable {
	let mut routes = RouteTable::new("/users");
	routes.register_path("edit", "/users/{id}/edit");
	routes.register_path("delete!", "/users/{id}/delete");
	routes.register_path("new", "/users/new");
	routes
}

/// Grid over 75 users with a filterable name and a numeric age column
#[fixture]
pub fn user_grid() -> DataGrid {
	let mut grid = DataGrid::new();
	grid.add_column(TextColumn::new("name", "Name").filter(ColumnFilter::Text))
		.unwrap();
	grid.add_column(NumericColumn::new("age", "Age").orderable(false))
		.unwrap();
	grid.set_data_source(users(75));
	grid
}

/// Substring of `html` between the first `start` and the following `end`
pub fn section<'a>(html: &'a str, start: &str, end: &str) -> &'a str {
	let from = html.find(start).unwrap();
	let to = from + html[from..].find(end).unwrap() + end.len();
	&html[from..to]
}
