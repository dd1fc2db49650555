//! Render observers
//!
//! Hooks receive the finished node of a row, cell or action together with
//! its source data and may change it before serialisation. Each registered
//! hook runs once per node, after the default rendering of that node.

use crate::markup::Element;
use crate::value::Record;
use serde_json::Value;
use std::fmt;

type RowHook = Box<dyn Fn(&mut Element, &Record)>;
type CellHook = Box<dyn Fn(&mut Element, &str, &Value)>;
type ActionHook = Box<dyn Fn(&mut Element, Option<&Record>)>;

/// Hooks invoked while rendering the table
#[derive(Default)]
pub struct RenderHooks {
	row: Vec<RowHook>,
	cell: Vec<CellHook>,
	action: Vec<ActionHook>,
}

impl fmt::Debug for RenderHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderHooks")
			.field("row", &self.row.len())
			.field("cell", &self.cell.len())
			.field("action", &self.action.len())
			.finish()
	}
}

impl RenderHooks {
	/// Creates an empty hook set
	pub fn new() -> Self {
		Self::default()
	}

	/// Observes every body row with its record
	pub fn on_row_render<F>(&mut self, hook: F) -> &mut Self
	where
		F: Fn(&mut Element, &Record) + 'static,
	{
		self.row.push(Box::new(hook));
		self
	}

	/// Observes every body cell with its column name and value
	///
	/// Action cells receive the whole row as an object value.
	pub fn on_cell_render<F>(&mut self, hook: F) -> &mut Self
	where
		F: Fn(&mut Element, &str, &Value) + 'static,
	{
		self.cell.push(Box::new(hook));
		self
	}

	/// Observes every action link; global actions have no record
	pub fn on_action_render<F>(&mut self, hook: F) -> &mut Self
	where
		F: Fn(&mut Element, Option<&Record>) + 'static,
	{
		self.action.push(Box::new(hook));
		self
	}

	pub(crate) fn fire_row(&self, row: &mut Element, record: &Record) {
		for hook in &self.row {
			hook(row, record);
		}
	}

	pub(crate) fn fire_cell(&self, cell: &mut Element, column: &str, value: &Value) {
		for hook in &self.cell {
			hook(cell, column, value);
		}
	}

	pub(crate) fn fire_action(&self, action: &mut Element, record: Option<&Record>) {
		for hook in &self.action {
			hook(action, record);
		}
	}

	/// Whether no hook is registered
	pub fn is_empty(&self) -> bool {
		self.row.is_empty() && self.cell.is_empty() && self.action.is_empty()
	}
}
