//! Server-side data grid for Reinhardt
//!
//! This crate renders paginated, filterable and sortable HTML tables over a
//! pluggable data source, with per-row actions, global actions and group
//! operations.
//!
//! # Features
//!
//! - **Data sources**: backend agnostic [`DataSource`] contract with an
//!   in-memory implementation and a column aliasing [`Mapped`] decorator
//! - **Columns**: text, numeric, date, checkbox and action columns with
//!   text or select filters
//! - **Actions**: per-row and global links resolved through a [`LinkGenerator`]
//! - **Rendering**: every region built from an overridable [`WrapperTable`],
//!   with row, cell and action hooks
//! - **State**: sort order, page, page size and filters recovered from the
//!   query string
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataGrid] --> B[Columns]
//!     A --> C[Actions]
//!     A --> D[DataSource]
//!     A --> E[GridState]
//!     A --> F[Paginator]
//!     G[Renderer] --> A
//!     G --> H[WrapperTable]
//!     G --> I[RenderHooks]
//!     G --> J[LinkGenerator]
//!     G --> K[Translator]
//!     D --> L[MemoryDataSource]
//!     D --> M[Mapped]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datagrid::{Action, DataGrid, RenderMode, Renderer, RouteTable};
//! use reinhardt_datagrid::column::{ColumnFilter, DateColumn, TextColumn};
//! use reinhardt_datagrid::datasource::MemoryDataSource;
//! use reinhardt_datagrid::request::QueryValues;
//! use serde_json::json;
//!
//! let mut routes = RouteTable::new("/users");
//! routes.register_path("edit", "/users/{id}/edit");
//!
//! let mut grid = DataGrid::new();
//! grid.add_column(TextColumn::new("name", "Name").filter(ColumnFilter::Text)).unwrap();
//! grid.add_column(DateColumn::new("joined", "Joined").format("%Y-%m-%d")).unwrap();
//! grid.add_action(Action::new("Edit", "edit"));
//! grid.set_data_source(MemoryDataSource::from_json(json!([
//!     {"id": 1, "name": "Alice", "joined": "2021-03-04"},
//!     {"id": 2, "name": "Bob", "joined": null},
//! ])).unwrap());
//! grid.load_state(&QueryValues::parse("order=name%3Dd").unwrap()).unwrap();
//!
//! let html = Renderer::new(routes).render(&mut grid, RenderMode::Full).unwrap();
//! assert!(html.contains(r#"<a title="Edit" href="/users/2/edit">Edit</a>"#));
//! assert!(html.contains("<td>2021-03-04</td>"));
//! assert!(html.contains("<td>N/A</td>"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod action;
pub mod column;
pub mod datasource;
pub mod error;
pub mod grid;
pub mod i18n;
pub mod link;
pub mod markup;
pub mod paginator;
pub mod renderer;
pub mod request;
pub mod settings;
pub mod value;
pub mod wrapper;

// Re-exports for convenience
pub use action::{Action, Destination, GlobalAction, KeyMode};
pub use column::Column;
pub use datasource::{DataSource, Mapped, MemoryDataSource, ResultSet};
pub use error::{GridError, Result};
pub use grid::DataGrid;
pub use i18n::{MessageCatalog, Translator};
pub use link::{LinkGenerator, RouteTable};
pub use renderer::{RenderHooks, RenderMode, Renderer};
pub use settings::GridSettings;
pub use wrapper::{WrapperPath, WrapperTable};
