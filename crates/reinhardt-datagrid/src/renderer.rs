//! HTML rendering of a prepared grid
//!
//! [`Renderer::render`] prepares the grid once and serialises the requested
//! part of it. Every region is built from the [`WrapperTable`], so a single
//! wrapper override changes exactly one kind of node. [`RenderHooks`] observe
//! rows, cells and actions after their default rendering.
//!
//! ```
//! use reinhardt_datagrid::column::TextColumn;
//! use reinhardt_datagrid::datasource::MemoryDataSource;
//! use reinhardt_datagrid::grid::DataGrid;
//! use reinhardt_datagrid::link::RouteTable;
//! use reinhardt_datagrid::renderer::{RenderMode, Renderer};
//! use serde_json::json;
//!
//! let mut grid = DataGrid::new();
//! grid.add_column(TextColumn::new("name", "Name")).unwrap();
//! grid.set_data_source(MemoryDataSource::from_json(json!([{"id": 1, "name": "Alice"}])).unwrap());
//!
//! let renderer = Renderer::new(RouteTable::new("/users"));
//! let info = renderer.render(&mut grid, RenderMode::Info).unwrap();
//! assert_eq!(info, r#"<ul class="message no-margin"><li>Items 1 - 1 out of 1</li></ul>"#);
//!
//! let table = renderer.render(&mut grid, RenderMode::Table).unwrap();
//! assert!(table.contains(r#"<tr class="even"><td>Alice</td></tr>"#));
//! ```

mod hooks;

pub use hooks::RenderHooks;

use crate::action::Action;
use crate::column::filter_field_name;
use crate::datasource::{ResultSet, SortOrder};
use crate::error::{GridError, Result};
use crate::grid::DataGrid;
use crate::i18n::{NoopTranslator, Translator};
use crate::link::{LinkArgs, LinkGenerator, THIS};
use crate::markup::{Element, Node};
use crate::request::{GridState, ORDER_FIELD, PAGE_FIELD, encode_order};
use crate::settings::GridSettings;
use crate::value::{Record, to_display};
use crate::wrapper::{WrapperPath, WrapperTable};
use serde_json::Value;
use std::fmt;

/// Pages linked on either side of the current one when steps are enabled
const STEP_SURROUND: usize = 3;
/// Evenly spread page links when steps are enabled
const STEP_QUOTIENTS: usize = 4;

/// Part of the grid to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
	/// Form, table with footer, form end
	#[default]
	Full,
	/// Opening form tag and hidden state fields
	FormBegin,
	/// Closing form tag
	FormEnd,
	/// Table without footer
	Table,
	/// Paginator controls
	Paginator,
	/// Paginator inside a `block-controls` container
	Navigator,
	/// Item range summary
	Info,
	/// Group operation controls
	Operations,
	/// Footer row
	Footer,
}

/// Renders data grids to HTML
pub struct Renderer {
	wrappers: WrapperTable,
	footer_format: String,
	paginator_format: String,
	info_format: String,
	ajax_class: String,
	paginator_steps: bool,
	multi_order: bool,
	hooks: RenderHooks,
	translator: Box<dyn Translator>,
	links: Box<dyn LinkGenerator>,
}

impl fmt::Debug for Renderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Renderer")
			.field("wrappers", &self.wrappers)
			.field("footer_format", &self.footer_format)
			.field("paginator_format", &self.paginator_format)
			.field("info_format", &self.info_format)
			.field("ajax_class", &self.ajax_class)
			.field("paginator_steps", &self.paginator_steps)
			.field("multi_order", &self.multi_order)
			.field("hooks", &self.hooks)
			.finish_non_exhaustive()
	}
}

impl Renderer {
	/// Creates a renderer with default settings
	pub fn new(links: impl LinkGenerator + 'static) -> Self {
		Self::from_settings(&GridSettings::default(), links)
	}

	/// Creates a renderer from settings
	pub fn from_settings(settings: &GridSettings, links: impl LinkGenerator + 'static) -> Self {
		Self {
			wrappers: WrapperTable::new(settings.presentation),
			footer_format: settings.footer_format.clone(),
			paginator_format: settings.paginator_format.clone(),
			info_format: settings.info_format.clone(),
			ajax_class: settings.ajax_class.clone(),
			paginator_steps: settings.paginator_steps,
			multi_order: settings.multi_order,
			hooks: RenderHooks::new(),
			translator: Box::new(NoopTranslator),
			links: Box::new(links),
		}
	}

	/// Uses `translator` for every user facing text
	pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
		self.translator = Box::new(translator);
		self
	}

	/// Region templates
	pub fn wrappers(&self) -> &WrapperTable {
		&self.wrappers
	}

	/// Region templates, for overrides
	pub fn wrappers_mut(&mut self) -> &mut WrapperTable {
		&mut self.wrappers
	}

	/// Render hooks, for registration
	pub fn hooks_mut(&mut self) -> &mut RenderHooks {
		&mut self.hooks
	}

	/// Prepares `grid` and renders one part of it
	///
	/// # Errors
	///
	/// [`GridError::MissingDataSource`] without a data source,
	/// [`GridError::InvalidArgument`] for rows lacking the key or a declared
	/// column, [`GridError::WrapperPathUnresolved`] for a removed region and
	/// [`GridError::Link`] for unresolvable links.
	pub fn render(&self, grid: &mut DataGrid, mode: RenderMode) -> Result<String> {
		let result = grid.prepare()?;
		tracing::debug!(
			mode = ?mode,
			rows = result.len(),
			total = result.total(),
			"rendering data grid"
		);
		match mode {
			RenderMode::Full => {
				let mut output = self.render_form_begin(grid)?;
				output.push_str(&self.render_table(grid, &result, true)?);
				output.push_str(&self.render_form_end());
				Ok(output)
			}
			RenderMode::FormBegin => self.render_form_begin(grid),
			RenderMode::FormEnd => Ok(self.render_form_end()),
			RenderMode::Table => self.render_table(grid, &result, false),
			RenderMode::Paginator => self.render_paginator(grid),
			RenderMode::Navigator => {
				let mut container = Element::new("div").class("block-controls");
				container.set_html(self.render_paginator(grid)?);
				Ok(container.render())
			}
			RenderMode::Info => self.render_info(grid),
			RenderMode::Operations => self.render_operations(grid),
			RenderMode::Footer => Ok(self.footer_row(grid)?.render()),
		}
	}

	fn translate(&self, message: &str) -> String {
		self.translator.translate(message, &[])
	}

	fn element(&self, path: WrapperPath) -> Result<Element> {
		self.wrappers.element(path)
	}

	fn submit(&self, name: &str, label: &str) -> Element {
		let label = self.translate(label);
		Element::new("input")
			.attr("type", "submit")
			.attr("name", name)
			.attr("value", label.clone())
			.attr("title", label)
	}

	fn render_form_begin(&self, grid: &DataGrid) -> Result<String> {
		let action = self.links.link(THIS, &LinkArgs::new())?;
		let form = Element::new("form")
			.attr("action", action)
			.attr("method", "get")
			.class("form datagrid");
		let mut output = form.start_tag();
		// Filter values are submitted by their own inputs.
		for (name, value) in grid.state.link_args() {
			if !grid.state.filters.keys().any(|c| filter_field_name(c) == name) {
				output.push_str(
					&Element::new("input")
						.attr("type", "hidden")
						.attr("name", name)
						.attr("value", value)
						.render(),
				);
			}
		}
		Ok(output)
	}

	fn render_form_end(&self) -> String {
		format!("{}\n", Element::new("form").end_tag())
	}

	fn page_link(&self, state: &GridState, page: usize) -> Result<String> {
		let mut args = state.link_args();
		args.insert(PAGE_FIELD.to_string(), page.to_string());
		self.links.link(THIS, &args)
	}

	fn paginator_button(
		&self,
		state: &GridState,
		path: WrapperPath,
		title: &str,
		page: usize,
		disabled: bool,
	) -> Result<Element> {
		let title = self.translate(title);
		let mut button = self.element(path)?;
		if disabled {
			button.add_class("inactive");
			button.set_attr("title", title);
			return Ok(button);
		}
		Ok(Element::new("a")
			.class(&self.ajax_class)
			.attr("href", self.page_link(state, page)?)
			.attr("title", title)
			.child(button))
	}

	fn render_paginator(&self, grid: &DataGrid) -> Result<String> {
		let paginator = grid.paginator();
		if paginator.page_count() <= 1 {
			let mut placeholder = Element::new("p");
			placeholder.set_html("&nbsp;");
			return Ok(placeholder.render());
		}
		let state = &grid.state;
		let page = paginator.page();
		let mut container = self.element(WrapperPath::PaginatorContainer)?;

		container.add_child(self.paginator_button(
			state,
			WrapperPath::PaginatorFirst,
			"First",
			1,
			paginator.is_first(),
		)?);
		container.add_child(self.paginator_button(
			state,
			WrapperPath::PaginatorPrev,
			"Previous",
			page.saturating_sub(1).max(1),
			paginator.is_first(),
		)?);

		if self.paginator_steps {
			for step in paginator.steps(STEP_SURROUND, STEP_QUOTIENTS) {
				let mut item = self.element(WrapperPath::PaginatorStep)?;
				item.set_text(step.to_string());
				if step == page {
					item.add_class("current");
					container.add_child(item);
				} else {
					container.add_child(
						Element::new("a")
							.class(&self.ajax_class)
							.attr("href", self.page_link(state, step)?)
							.child(item),
					);
				}
			}
		}

		let label = Element::new("label")
			.attr("for", "datagrid-page")
			.text(self.translate("Page"));
		let input = Element::new("input")
			.attr("type", "text")
			.attr("id", "datagrid-page")
			.attr("name", PAGE_FIELD)
			.attr("value", page.to_string())
			.attr("size", "1");
		let html = self
			.translate(&self.paginator_format)
			.replace("%label%", &label.render())
			.replace("%input%", &input.render())
			.replace("%count%", &paginator.page_count().to_string());
		let mut controls = self.element(WrapperPath::PaginatorControls)?;
		controls.set_html(html);
		container.add_child(controls);

		container.add_child(self.paginator_button(
			state,
			WrapperPath::PaginatorNext,
			"Next",
			(page + 1).min(paginator.last_page()),
			paginator.is_last(),
		)?);
		container.add_child(self.paginator_button(
			state,
			WrapperPath::PaginatorLast,
			"Last",
			paginator.page_count(),
			paginator.is_last(),
		)?);
		container.add_child(self.submit("pageSubmit", "Change page"));

		Ok(container.render())
	}

	fn render_info(&self, grid: &DataGrid) -> Result<String> {
		let paginator = grid.paginator();
		let from = if paginator.item_count() > 0 {
			paginator.offset() + 1
		} else {
			paginator.offset()
		};
		let to = paginator.offset() + paginator.length();
		let html = self
			.translate(&self.info_format)
			.replace("%from%", &from.to_string())
			.replace("%to%", &to.to_string())
			.replace("%count%", &paginator.item_count().to_string());

		let mut item = self.element(WrapperPath::InfoItem)?;
		item.set_html(html.trim());
		let mut container = self.element(WrapperPath::InfoContainer)?;
		container.add_child(item);
		Ok(container.render())
	}

	fn render_operations(&self, grid: &DataGrid) -> Result<String> {
		if !grid.has_operations() {
			return Ok(String::new());
		}
		let mut select = Element::new("select")
			.attr("id", "datagrid-operations")
			.attr("name", "operations");
		for (value, label) in grid.operations() {
			select.add_child(
				Element::new("option")
					.attr("value", value.clone())
					.text(self.translate(label)),
			);
		}
		let mut container = self.element(WrapperPath::OperationsContainer)?;
		container.add_child(
			Element::new("label")
				.attr("for", "datagrid-operations")
				.text(self.translate("Selected:")),
		);
		container.add_child(select);
		container.add_child(self.submit("operationSubmit", "Send"));
		Ok(container.render())
	}

	fn footer_row(&self, grid: &DataGrid) -> Result<Element> {
		let html = self
			.translate(&self.footer_format)
			.replace("%operations%", &self.render_operations(grid)?)
			.replace("%paginator%", &self.render_paginator(grid)?)
			.replace("%info%", &self.render_info(grid)?);
		let mut cell = self.element(WrapperPath::RowFooterCell)?;
		cell.set_attr("colspan", grid.column_span().to_string());
		cell.set_html(html);
		let mut row = self.element(WrapperPath::RowFooterContainer)?;
		row.add_child(cell);
		Ok(row)
	}

	fn sort_link(&self, state: &GridState, column: &str, order: SortOrder) -> Result<Element> {
		let (class, title) = match order {
			SortOrder::Ascending => ("sort-up", "Sort up"),
			SortOrder::Descending => ("sort-down", "Sort down"),
		};
		let mut args = state.link_args();
		args.insert(
			ORDER_FIELD.to_string(),
			encode_order(&state.order_with(column, order, self.multi_order)),
		);
		let mut link = Element::new("a")
			.attr("title", self.translate(title))
			.class(class)
			.class(&self.ajax_class);
		if state.order_of(column) == Some(order) {
			link.add_class("active");
		}
		link.set_attr("href", self.links.link(THIS, &args)?);
		Ok(link)
	}

	/// Translates a resolved action snapshot and applies the disabled form
	fn finish_action(&self, mut html: Element, disabled: bool, record: Option<&Record>) -> Element {
		let title = self.translate(html.get_attr("title").unwrap_or_default());
		html.set_attr("title", title.clone());
		let text = match html.first_child() {
			Some(Node::Text(text)) if !text.is_empty() => Some(self.translate(text)),
			_ => None,
		};
		if let Some(text) = &text {
			html.set_text(text.clone());
		}
		if disabled {
			let mut replacement = match (text, html.first_child()) {
				(Some(text), _) => Element::new("span").text(text),
				(None, Some(Node::Element(icon))) => icon.snapshot(),
				(None, _) => Element::new("span"),
			};
			replacement.set_attr("title", title);
			html = replacement;
		}
		self.hooks.fire_action(&mut html, record);
		html
	}

	fn header_row(&self, grid: &mut DataGrid) -> Result<Element> {
		let mut row = self.element(WrapperPath::RowHeaderContainer)?;
		if grid.has_operations() {
			let mut cell = Element::new("th")
				.class("black-cell")
				.child(Element::new("span").class("loading"));
			if grid.has_filters() {
				cell.set_attr("rowspan", "2");
			}
			row.add_child(cell);
		}

		for column in &grid.columns {
			let mut cell = self.element(WrapperPath::RowHeaderCell)?;
			let caption = self.translate(column.caption());
			if column.is_orderable() {
				let sort = Element::new("span")
					.class("column-sort")
					.child(self.sort_link(&grid.state, column.name(), SortOrder::Ascending)?)
					.child(self.sort_link(&grid.state, column.name(), SortOrder::Descending)?);
				cell.add_child(sort);
				cell.add_child(caption);
			} else if column.is_action() {
				cell.add_child(caption);
				for action in grid.global_actions.iter_mut() {
					action.generate_link(self.links.as_ref())?;
					let html = self.finish_action(action.html().snapshot(), false, None);
					cell.add_child(" ");
					cell.add_child(html);
				}
			} else {
				cell.add_child(caption);
			}
			row.add_child(cell);
		}
		Ok(row)
	}

	fn filter_row(&self, grid: &DataGrid) -> Result<Element> {
		let source = grid.data_source().ok_or(GridError::MissingDataSource)?;
		let submit = self.submit("filterSubmit", "Filter").class("button");
		let mut row = self.element(WrapperPath::RowFilterContainer)?;

		for column in grid.columns() {
			let mut cell = self.element(WrapperPath::RowFilterCell)?;
			apply_cell_attrs(&mut cell, column.cell_attrs());
			if column.is_action() {
				cell.add_child(submit.snapshot());
				cell.add_class("actions");
			} else if let Some(filter) = column.filter() {
				let current = grid.state.filters.get(column.name()).map(String::as_str);
				let mut control =
					filter.render(column.name(), current, source, self.translator.as_ref())?;
				control.add_class(filter.css_class());
				control.add_class("full-width");
				cell.add_child(control);
			}
			row.add_child(cell);
		}

		if !grid.has_action_column() {
			let mut hidden = submit;
			hidden.set_attr("style", "display: none");
			row.add_child(hidden);
		}
		Ok(row)
	}

	fn content_row(&self, grid: &mut DataGrid, record: &Record, index: usize) -> Result<Element> {
		let key_name = grid.key_name().to_string();
		let key = if grid.has_actions() || grid.has_operations() {
			match record.get(&key_name) {
				Some(value) if !value.is_null() => Some(to_display(value)),
				_ => {
					return Err(GridError::InvalidArgument(format!(
						"key column '{}' does not exist in data source",
						key_name
					)));
				}
			}
		} else {
			None
		};

		let mut row = self.element(WrapperPath::RowContentContainer)?;
		if let (true, Some(key)) = (grid.has_operations(), &key) {
			let mut cell = self.element(WrapperPath::RowContentCell)?;
			cell.add_child(
				Element::new("input")
					.attr("type", "checkbox")
					.attr("name", format!("checker[{}]", key)),
			);
			cell.add_class("checker");
			row.add_child(cell);
		}

		for column in &grid.columns {
			let mut cell = self.element(WrapperPath::RowContentCell)?;
			apply_cell_attrs(&mut cell, column.cell_attrs());
			if column.is_action() {
				self.add_row_actions(&mut cell, &mut grid.actions, record, &key_name)?;
				cell.add_class("table-actions");
				self.hooks
					.fire_cell(&mut cell, column.name(), &Value::Object(record.clone()));
			} else {
				let value = record.get(column.name()).ok_or_else(|| {
					GridError::InvalidArgument(format!(
						"column '{}' does not exist in data source row",
						column.name()
					))
				})?;
				cell.add_child(column.content(value, record, self.translator.as_ref()));
				self.hooks.fire_cell(&mut cell, column.name(), value);
			}
			row.add_child(cell);
		}

		let stripe = if index % 2 == 0 {
			WrapperPath::RowContentEven
		} else {
			WrapperPath::RowContentOdd
		};
		row.add_class(self.wrappers.value(stripe)?);
		self.hooks.fire_row(&mut row, record);
		Ok(row)
	}

	fn add_row_actions(
		&self,
		cell: &mut Element,
		actions: &mut [Action],
		record: &Record,
		key_name: &str,
	) -> Result<()> {
		for (i, action) in actions.iter_mut().enumerate() {
			action.generate_link(record, key_name, self.links.as_ref())?;
			let disabled = action.is_disabled(record);
			let html = self.finish_action(action.html().snapshot(), disabled, Some(record));
			if i > 0 {
				cell.add_child(" ");
			}
			cell.add_child(html);
		}
		Ok(())
	}

	fn empty_row(&self, grid: &DataGrid) -> Result<Element> {
		let mut cell = self.element(WrapperPath::RowContentCell)?;
		cell.set_attr("colspan", grid.column_span().to_string());
		cell.set_attr("style", "text-align:center");
		cell.add_child(Element::new("div").text(self.translate("No data were found")));
		let mut row = self.element(WrapperPath::RowContentContainer)?;
		row.add_child(cell);
		Ok(row)
	}

	fn render_table(&self, grid: &mut DataGrid, result: &ResultSet, footer: bool) -> Result<String> {
		let mut head = Element::new("thead");
		head.add_child(self.header_row(grid)?);
		if grid.has_filters() {
			head.add_child(self.filter_row(grid)?);
		}

		let mut body = Element::new("tbody");
		if result.is_empty() {
			body.add_child(self.empty_row(grid)?);
		} else {
			for (index, record) in result.iter().enumerate() {
				body.add_child(self.content_row(grid, record, index)?);
			}
		}

		let mut table = self.element(WrapperPath::TableContainer)?;
		table.add_child(head);
		table.add_child(body);
		if footer {
			table.add_child(Element::new("tfoot").child(self.footer_row(grid)?));
		}
		let mut wrapper = self.element(WrapperPath::TableWrapper)?;
		wrapper.add_child(table);
		Ok(wrapper.render())
	}
}

fn apply_cell_attrs(cell: &mut Element, attrs: &[(String, String)]) {
	for (name, value) in attrs {
		if name == "class" {
			cell.add_class(value);
		} else {
			cell.set_attr(name.clone(), value.clone());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::{Action, GlobalAction};
	use crate::column::{ColumnFilter, TextColumn};
	use crate::datasource::MemoryDataSource;
	use crate::link::RouteTable;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn routes() -> RouteTable {
		let mut routes = RouteTable::new("/users");
		routes.register_path("edit", "/users/{id}/edit");
		routes.register_path("new", "/users/new");
		routes
	}

	fn grid(rows: usize) -> DataGrid {
		let data = (1..=rows)
			.map(|i| json!({"id": i, "name": format!("user{}", i)}))
			.collect::<Vec<_>>();
		let mut grid = DataGrid::new();
		grid.add_column(TextColumn::new("name", "Name")).unwrap();
		grid.set_data_source(MemoryDataSource::from_json(json!(data)).unwrap());
		grid
	}

	#[rstest]
	fn test_missing_data_source(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = DataGrid::new();
		assert_eq!(
			renderer.render(&mut grid, RenderMode::Table),
			Err(GridError::MissingDataSource)
		);
	}

	#[rstest]
	fn test_single_page_paginator_placeholder(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(3);
		assert_eq!(
			renderer.render(&mut grid, RenderMode::Paginator).unwrap(),
			"<p>&nbsp;</p>"
		);
	}

	#[rstest]
	fn test_first_page_buttons_disabled(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(75);
		let html = renderer.render(&mut grid, RenderMode::Paginator).unwrap();
		assert!(html.contains(r#"<span class="paginator-first inactive" title="First"></span>"#));
		assert!(html.contains(r#"<span class="paginator-prev inactive" title="Previous"></span>"#));
		assert!(html.contains(
			r#"<a class="datagrid-ajax" href="/users?page=2" title="Next"><span class="paginator-next"></span></a>"#
		));
		assert!(html.contains(
			r#"<a class="datagrid-ajax" href="/users?page=5" title="Last"><span class="paginator-last"></span></a>"#
		));
		assert!(html.contains(r#"name="page" value="1""#));
		assert!(html.contains("of 5"));
	}

	#[rstest]
	fn test_info_on_empty_grid(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(0);
		assert_eq!(
			renderer.render(&mut grid, RenderMode::Info).unwrap(),
			r#"<ul class="message no-margin"><li>Items 0 - 0 out of 0</li></ul>"#
		);
	}

	#[rstest]
	fn test_empty_state(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(0);
		grid.add_operation("delete", "Delete");
		let html = renderer.render(&mut grid, RenderMode::Table).unwrap();
		assert!(html.contains(
			r#"<tbody><tr><td colspan="2" style="text-align:center"><div>No data were found</div></td></tr></tbody>"#
		));
	}

	#[rstest]
	fn test_operations_empty_without_operations(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(2);
		assert_eq!(renderer.render(&mut grid, RenderMode::Operations).unwrap(), "");
	}

	#[rstest]
	fn test_row_actions_and_striping(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(2);
		grid.add_action(Action::new("Edit", "edit").disable_if(|row| row["id"] == 2));
		grid.add_global_action(GlobalAction::new("New", "new"));
		let html = renderer.render(&mut grid, RenderMode::Table).unwrap();
		assert!(html.contains(
			r#"<tr class="even"><td>user1</td><td class="table-actions"><a title="Edit" href="/users/1/edit">Edit</a></td></tr>"#
		));
		assert!(html.contains(
			r#"<tr><td>user2</td><td class="table-actions"><span title="Edit">Edit</span></td></tr>"#
		));
		assert!(html.contains(r#"<th scope="col">Actions <a title="New" href="/users/new">New</a></th>"#));
	}

	#[rstest]
	fn test_missing_key_column(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = DataGrid::new();
		grid.add_column(TextColumn::new("name", "Name")).unwrap();
		grid.add_operation("delete", "Delete");
		grid.set_data_source(MemoryDataSource::from_json(json!([{"name": "x"}])).unwrap());
		assert!(matches!(
			renderer.render(&mut grid, RenderMode::Table),
			Err(GridError::InvalidArgument(_))
		));
	}

	#[rstest]
	fn test_missing_data_column(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(1);
		grid.add_column(TextColumn::new("email", "Email")).unwrap();
		assert!(matches!(
			renderer.render(&mut grid, RenderMode::Table),
			Err(GridError::InvalidArgument(_))
		));
	}

	#[rstest]
	fn test_filter_row_without_actions_hides_submit(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = DataGrid::new();
		grid.add_column(TextColumn::new("name", "Name").filter(ColumnFilter::Text))
			.unwrap();
		grid.set_data_source(MemoryDataSource::from_json(json!([{"id": 1, "name": "a"}])).unwrap());
		let html = renderer.render(&mut grid, RenderMode::Table).unwrap();
		assert!(html.contains(
			r#"<input type="text" name="filters[name]" value="" class="text full-width" />"#
		));
		assert!(html.contains(r#"style="display: none""#));
	}

	#[rstest]
	fn test_form_wraps_table(routes: RouteTable) {
		let renderer = Renderer::new(routes);
		let mut grid = grid(1);
		let html = renderer.render(&mut grid, RenderMode::Full).unwrap();
		assert!(html.starts_with(r#"<form action="/users" method="get" class="form datagrid">"#));
		assert!(html.contains("<tfoot>"));
		assert!(html.ends_with("</form>\n"));
	}
}
