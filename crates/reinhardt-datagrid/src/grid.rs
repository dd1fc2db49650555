//! The data grid component
//!
//! A [`DataGrid`] owns the column definitions, row and global actions, group
//! operations and the data source of one request. [`DataGrid::prepare`]
//! applies the request state to the source and materialises the current
//! page exactly once; every render mode then reads the same [`ResultSet`].
//!
//! ```
//! use reinhardt_datagrid::column::{ColumnFilter, TextColumn};
//! use reinhardt_datagrid::datasource::MemoryDataSource;
//! use reinhardt_datagrid::grid::DataGrid;
//! use reinhardt_datagrid::request::QueryValues;
//! use serde_json::json;
//!
//! let mut grid = DataGrid::new();
//! grid.add_column(TextColumn::new("name", "Name").filter(ColumnFilter::Text)).unwrap();
//! grid.set_data_source(MemoryDataSource::from_json(json!([
//!     {"id": 1, "name": "Alice"},
//!     {"id": 2, "name": "Bob"},
//! ])).unwrap());
//! grid.load_state(&QueryValues::parse("filters%5Bname%5D=bo").unwrap()).unwrap();
//!
//! let result = grid.prepare().unwrap();
//! assert_eq!(result.total(), 1);
//! assert_eq!(result.rows()[0]["name"], "Bob");
//! ```

use crate::action::{Action, GlobalAction};
use crate::column::{ActionColumn, Column, DateColumn};
use crate::datasource::{DataSource, ResultSet};
use crate::error::{GridError, Result};
use crate::paginator::Paginator;
use crate::request::{GridState, SubmittedValues};
use crate::settings::GridSettings;
use indexmap::IndexMap;
use std::rc::Rc;

/// Name of the column created for actions when none was added
pub const ACTION_COLUMN: &str = "actions";

/// A paginated, filterable, sortable grid over a data source
pub struct DataGrid {
	pub(crate) columns: Vec<Box<dyn Column>>,
	pub(crate) actions: Vec<Action>,
	pub(crate) global_actions: Vec<GlobalAction>,
	operations: IndexMap<String, String>,
	key_name: String,
	items_per_page: usize,
	date_format: String,
	data_source: Option<Box<dyn DataSource>>,
	pub(crate) state: GridState,
	paginator: Paginator,
	result: Option<Rc<ResultSet>>,
}

impl std::fmt::Debug for DataGrid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DataGrid")
			.field("columns", &self.columns)
			.field("actions", &self.actions)
			.field("global_actions", &self.global_actions)
			.field("operations", &self.operations)
			.field("key_name", &self.key_name)
			.field("has_data_source", &self.data_source.is_some())
			.field("state", &self.state)
			.field("paginator", &self.paginator)
			.finish_non_exhaustive()
	}
}

impl Default for DataGrid {
	fn default() -> Self {
		Self::with_settings(&GridSettings::default())
	}
}

impl DataGrid {
	/// Creates a grid with default settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a grid using the key name, page size and date format of
	/// `settings`
	pub fn with_settings(settings: &GridSettings) -> Self {
		Self {
			columns: Vec::new(),
			actions: Vec::new(),
			global_actions: Vec::new(),
			operations: IndexMap::new(),
			key_name: settings.key_name.clone(),
			items_per_page: settings.items_per_page.max(1),
			date_format: settings.date_format.clone(),
			data_source: None,
			state: GridState::default(),
			paginator: Paginator::new(settings.items_per_page),
			result: None,
		}
	}

	/// Registers a column
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] when a column of that name exists.
	pub fn add_column(&mut self, column: impl Column + 'static) -> Result<&mut Self> {
		if self.column(column.name()).is_some() {
			return Err(GridError::InvalidArgument(format!(
				"column '{}' is already registered",
				column.name()
			)));
		}
		self.columns.push(Box::new(column));
		Ok(self)
	}

	/// A date column using the configured date format
	pub fn date_column(&self, name: &str, caption: &str) -> DateColumn {
		DateColumn::new(name, caption).format(self.date_format.clone())
	}

	fn ensure_action_column(&mut self) {
		if !self.has_action_column() {
			self.columns
				.push(Box::new(ActionColumn::new(ACTION_COLUMN, "Actions")));
		}
	}

	/// Adds a row action, creating the action column if needed
	pub fn add_action(&mut self, action: Action) -> &mut Self {
		self.ensure_action_column();
		self.actions.push(action);
		self
	}

	/// Adds a global action, creating the action column if needed
	pub fn add_global_action(&mut self, action: GlobalAction) -> &mut Self {
		self.ensure_action_column();
		self.global_actions.push(action);
		self
	}

	/// Adds a group operation offered for checked rows
	pub fn add_operation(&mut self, value: impl Into<String>, label: impl Into<String>) -> &mut Self {
		self.operations.insert(value.into(), label.into());
		self
	}

	/// Attaches the data source
	pub fn set_data_source(&mut self, source: impl DataSource + 'static) -> &mut Self {
		self.data_source = Some(Box::new(source));
		self.result = None;
		self
	}

	/// The attached data source
	pub fn data_source(&self) -> Option<&dyn DataSource> {
		self.data_source.as_deref()
	}

	/// Sets the primary key column
	pub fn set_key_name(&mut self, key_name: impl Into<String>) -> &mut Self {
		self.key_name = key_name.into();
		self
	}

	/// Primary key column
	pub fn key_name(&self) -> &str {
		&self.key_name
	}

	/// Registered columns in display order
	pub fn columns(&self) -> impl Iterator<Item = &dyn Column> {
		self.columns.iter().map(|c| c.as_ref())
	}

	/// Column by name
	pub fn column(&self, name: &str) -> Option<&dyn Column> {
		self.columns().find(|c| c.name() == name)
	}

	/// Row actions
	pub fn actions(&self) -> &[Action] {
		&self.actions
	}

	/// Global actions
	pub fn global_actions(&self) -> &[GlobalAction] {
		&self.global_actions
	}

	/// Group operations as `value -> label`
	pub fn operations(&self) -> &IndexMap<String, String> {
		&self.operations
	}

	/// Whether any column has a filter
	pub fn has_filters(&self) -> bool {
		self.columns().any(|c| c.filter().is_some())
	}

	/// Whether row actions exist
	pub fn has_actions(&self) -> bool {
		!self.actions.is_empty()
	}

	/// Whether an action column exists
	pub fn has_action_column(&self) -> bool {
		self.columns().any(|c| c.is_action())
	}

	/// Whether group operations exist
	pub fn has_operations(&self) -> bool {
		!self.operations.is_empty()
	}

	/// Number of table columns including the checker column
	pub fn column_span(&self) -> usize {
		self.columns.len() + usize::from(self.has_operations())
	}

	/// Replaces the request state
	///
	/// A result prepared for the previous state is discarded.
	pub fn set_state(&mut self, state: GridState) -> &mut Self {
		self.state = state;
		self.invalidate();
		self
	}

	/// Drops the prepared result together with the query it registered on
	/// the data source.
	fn invalidate(&mut self) {
		if self.result.take().is_none() {
			return;
		}
		if let Some(source) = self.data_source.as_mut() {
			source.clear();
		}
	}

	/// Reads the request state from submitted values
	///
	/// # Errors
	///
	/// [`GridError::InvalidArgument`] for a malformed `order` field.
	pub fn load_state(&mut self, values: &dyn SubmittedValues) -> Result<&mut Self> {
		let filterable: Vec<String> = self
			.columns()
			.filter(|c| c.filter().is_some())
			.map(|c| c.name().to_string())
			.collect();
		self.state = GridState::from_submitted(values, filterable.iter().map(String::as_str))?;
		self.invalidate();
		Ok(self)
	}

	/// Current request state
	pub fn state(&self) -> &GridState {
		&self.state
	}

	/// Page size in effect
	pub fn items_per_page(&self) -> usize {
		self.state.items_per_page.unwrap_or(self.items_per_page)
	}

	/// Pagination of the prepared result
	pub fn paginator(&self) -> &Paginator {
		&self.paginator
	}

	/// The prepared result, if [`DataGrid::prepare`] has run
	pub fn result(&self) -> Option<&ResultSet> {
		self.result.as_deref()
	}

	/// Applies filters, sort keys and the page window and runs the query
	///
	/// The data source is counted and executed once; later calls return the
	/// same result.
	///
	/// # Errors
	///
	/// [`GridError::MissingDataSource`] without a data source, otherwise the
	/// errors of the data source.
	pub fn prepare(&mut self) -> Result<Rc<ResultSet>> {
		if let Some(result) = &self.result {
			return Ok(Rc::clone(result));
		}
		let source = self
			.data_source
			.as_mut()
			.ok_or(GridError::MissingDataSource)?;

		for column in &self.columns {
			if column.filter().is_none() {
				continue;
			}
			if let Some(value) = self.state.filters.get(column.name()) {
				column.apply_filter(source.as_mut(), value)?;
			}
		}

		for (name, order) in &self.state.order {
			match self.columns.iter().find(|c| c.name() == name) {
				Some(column) if column.is_orderable() => source.sort(name, *order)?,
				_ => tracing::debug!(column = %name, "ignoring order on a non-orderable column"),
			}
		}

		let items_per_page = self.state.items_per_page.unwrap_or(self.items_per_page);
		let mut paginator = Paginator::new(items_per_page);
		paginator.set_item_count(source.count()?);
		paginator.set_page(self.state.page);
		source.reduce(paginator.items_per_page(), paginator.offset())?;

		let result = Rc::new(source.execute()?);
		tracing::debug!(
			total = result.total(),
			rows = result.len(),
			page = paginator.page(),
			page_count = paginator.page_count(),
			"prepared data grid"
		);
		self.paginator = paginator;
		self.result = Some(Rc::clone(&result));
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{ColumnFilter, NumericColumn, TextColumn};
	use crate::datasource::{MemoryDataSource, SortOrder};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn grid() -> DataGrid {
		let rows = (1..=40)
			.map(|i| json!({"id": i, "name": format!("user{:02}", i), "age": 20 + i % 5}))
			.collect::<Vec<_>>();
		let mut grid = DataGrid::new();
		grid.add_column(TextColumn::new("name", "Name").filter(ColumnFilter::Text))
			.unwrap();
		grid.add_column(NumericColumn::new("age", "Age")).unwrap();
		grid.set_data_source(MemoryDataSource::from_json(json!(rows)).unwrap());
		grid
	}

	#[rstest]
	fn test_missing_data_source() {
		let mut grid = DataGrid::new();
		assert_eq!(grid.prepare(), Err(GridError::MissingDataSource));
	}

	#[rstest]
	fn test_duplicate_column_rejected(mut grid: DataGrid) {
		assert!(matches!(
			grid.add_column(TextColumn::new("name", "Again")),
			Err(GridError::InvalidArgument(_))
		));
	}

	#[rstest]
	fn test_prepare_paginates(mut grid: DataGrid) {
		grid.set_state(GridState {
			page: 3,
			..GridState::default()
		});
		let result = grid.prepare().unwrap();
		assert_eq!(result.total(), 40);
		assert_eq!(result.len(), 10);
		assert_eq!(result.rows()[0]["id"], 31);
		assert_eq!(grid.paginator().page_count(), 3);
		assert_eq!(grid.paginator().page(), 3);
	}

	#[rstest]
	fn test_prepare_clamps_stale_page(mut grid: DataGrid) {
		grid.set_state(GridState {
			page: 99,
			items_per_page: Some(25),
			..GridState::default()
		});
		let result = grid.prepare().unwrap();
		assert_eq!(grid.paginator().page(), 2);
		assert_eq!(result.len(), 15);
	}

	#[rstest]
	fn test_prepare_applies_filter_and_order(mut grid: DataGrid) {
		let mut state = GridState {
			order: vec![("name".into(), SortOrder::Descending)],
			..GridState::default()
		};
		state.filters.insert("name".into(), "user1".into());
		grid.set_state(state);
		let result = grid.prepare().unwrap();
		assert_eq!(result.total(), 10);
		assert_eq!(result.rows()[0]["name"], "user19");
	}

	#[rstest]
	fn test_prepare_runs_once(mut grid: DataGrid) {
		let first = grid.prepare().unwrap();
		let second = grid.prepare().unwrap();
		assert!(Rc::ptr_eq(&first, &second));
	}

	#[rstest]
	fn test_state_change_reprepares(mut grid: DataGrid) {
		let mut state = GridState::default();
		state.filters.insert("name".into(), "user1".into());
		grid.set_state(state.clone());
		assert_eq!(grid.prepare().unwrap().total(), 10);

		state.page = 2;
		state.items_per_page = Some(5);
		grid.set_state(state);
		let result = grid.prepare().unwrap();
		// the name filter is registered once, not twice
		assert_eq!(result.total(), 10);
		assert_eq!(result.rows()[0]["name"], "user15");
		assert_eq!(grid.paginator().page(), 2);

		grid.set_state(GridState {
			page: 2,
			..GridState::default()
		});
		let result = grid.prepare().unwrap();
		assert_eq!(result.total(), 40);
		assert_eq!(result.rows()[0]["id"], 11);
	}

	#[rstest]
	fn test_action_column_created_once(mut grid: DataGrid) {
		grid.add_action(Action::new("Edit", "edit"));
		grid.add_global_action(GlobalAction::new("New", "new"));
		assert_eq!(grid.columns().filter(|c| c.is_action()).count(), 1);
		assert!(grid.has_actions());
		assert_eq!(grid.column_span(), 3);
		grid.add_operation("delete", "Delete");
		assert_eq!(grid.column_span(), 4);
	}
}
