//! Render region templates
//!
//! Every region the renderer emits (row containers, cells, paginator buttons,
//! the info box) is built from the entry of a [`WrapperTable`] keyed by
//! [`WrapperPath`]. An entry is either a declarative [`ElementSpec`], a
//! prebuilt [`Element`] fragment or, for class paths such as
//! `row.content .even`, a plain value. Overriding one path leaves every other
//! region at its default.
//!
//! ```
//! use reinhardt_datagrid::wrapper::{Wrapper, WrapperPath, WrapperTable};
//!
//! let mut wrappers = WrapperTable::default();
//! wrappers
//!     .set_str("row.content cell container", "td class=cell")
//!     .unwrap();
//!
//! let cell = wrappers.element(WrapperPath::RowContentCell).unwrap();
//! assert_eq!(cell.render(), r#"<td class="cell"></td>"#);
//! assert_eq!(wrappers.value(WrapperPath::RowContentEven).unwrap(), "even");
//! ```

use crate::error::{GridError, Result};
use crate::markup::{Element, ElementSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A render region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperPath {
	/// `row.content container`
	RowContentContainer,
	/// `row.content .even`, class of even rows
	RowContentEven,
	/// `row.content .odd`, class of odd rows
	RowContentOdd,
	/// `row.content cell container`
	RowContentCell,
	/// `row.header container`
	RowHeaderContainer,
	/// `row.header cell container`
	RowHeaderCell,
	/// `row.filter container`
	RowFilterContainer,
	/// `row.filter cell container`
	RowFilterCell,
	/// `row.footer container`
	RowFooterContainer,
	/// `row.footer cell container`
	RowFooterCell,
	/// `table container`
	TableContainer,
	/// `table wrapper`
	TableWrapper,
	/// `paginator container`
	PaginatorContainer,
	/// `paginator button first`
	PaginatorFirst,
	/// `paginator button prev`
	PaginatorPrev,
	/// `paginator button next`
	PaginatorNext,
	/// `paginator button last`
	PaginatorLast,
	/// `paginator button step`
	PaginatorStep,
	/// `paginator controls container`
	PaginatorControls,
	/// `operations container`
	OperationsContainer,
	/// `info container`
	InfoContainer,
	/// `info item container`
	InfoItem,
}

impl WrapperPath {
	/// Every render region
	pub const ALL: [WrapperPath; 22] = [
		WrapperPath::RowContentContainer,
		WrapperPath::RowContentEven,
		WrapperPath::RowContentOdd,
		WrapperPath::RowContentCell,
		WrapperPath::RowHeaderContainer,
		WrapperPath::RowHeaderCell,
		WrapperPath::RowFilterContainer,
		WrapperPath::RowFilterCell,
		WrapperPath::RowFooterContainer,
		WrapperPath::RowFooterCell,
		WrapperPath::TableContainer,
		WrapperPath::TableWrapper,
		WrapperPath::PaginatorContainer,
		WrapperPath::PaginatorFirst,
		WrapperPath::PaginatorPrev,
		WrapperPath::PaginatorNext,
		WrapperPath::PaginatorLast,
		WrapperPath::PaginatorStep,
		WrapperPath::PaginatorControls,
		WrapperPath::OperationsContainer,
		WrapperPath::InfoContainer,
		WrapperPath::InfoItem,
	];

	/// Spelling of the path
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::RowContentContainer => "row.content container",
			Self::RowContentEven => "row.content .even",
			Self::RowContentOdd => "row.content .odd",
			Self::RowContentCell => "row.content cell container",
			Self::RowHeaderContainer => "row.header container",
			Self::RowHeaderCell => "row.header cell container",
			Self::RowFilterContainer => "row.filter container",
			Self::RowFilterCell => "row.filter cell container",
			Self::RowFooterContainer => "row.footer container",
			Self::RowFooterCell => "row.footer cell container",
			Self::TableContainer => "table container",
			Self::TableWrapper => "table wrapper",
			Self::PaginatorContainer => "paginator container",
			Self::PaginatorFirst => "paginator button first",
			Self::PaginatorPrev => "paginator button prev",
			Self::PaginatorNext => "paginator button next",
			Self::PaginatorLast => "paginator button last",
			Self::PaginatorStep => "paginator button step",
			Self::PaginatorControls => "paginator controls container",
			Self::OperationsContainer => "operations container",
			Self::InfoContainer => "info container",
			Self::InfoItem => "info item container",
		}
	}

	/// Whether the path holds a class value instead of an element
	pub fn is_value(&self) -> bool {
		matches!(self, Self::RowContentEven | Self::RowContentOdd)
	}
}

impl fmt::Display for WrapperPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for WrapperPath {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self> {
		let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
		Self::ALL
			.iter()
			.find(|path| path.as_str() == normalized)
			.copied()
			.ok_or_else(|| GridError::WrapperPathUnresolved(s.to_string()))
	}
}

/// Template of a render region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper {
	/// Build a fresh element from a tag and attributes
	Spec(ElementSpec),
	/// Copy a prebuilt fragment
	Fragment(Element),
	/// A class value
	Value(String),
}

impl From<ElementSpec> for Wrapper {
	fn from(spec: ElementSpec) -> Self {
		Self::Spec(spec)
	}
}

impl From<Element> for Wrapper {
	fn from(fragment: Element) -> Self {
		Self::Fragment(fragment)
	}
}

/// Base markup style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
	/// Styled admin theme markup
	#[default]
	Constellation,
	/// Minimal markup
	Plain,
}

impl Presentation {
	fn defaults(&self) -> &'static [(WrapperPath, &'static str)] {
		use WrapperPath::*;
		match self {
			Self::Constellation => &[
				(RowContentContainer, "tr"),
				(RowContentEven, "even"),
				(RowContentOdd, ""),
				(RowContentCell, "td"),
				(RowHeaderContainer, "tr"),
				(RowHeaderCell, "th scope=col"),
				(RowFilterContainer, "tr class=filters"),
				(RowFilterCell, "td"),
				(RowFooterContainer, "tr class=footer"),
				(RowFooterCell, "td"),
				(TableContainer, r#"table class="table datagrid" cellspacing=0"#),
				(TableWrapper, "div class=no-margin"),
				(PaginatorContainer, "span class=paginator"),
				(PaginatorFirst, r#"span class="paginator-first""#),
				(PaginatorPrev, r#"span class="paginator-prev""#),
				(PaginatorNext, r#"span class="paginator-next""#),
				(PaginatorLast, r#"span class="paginator-last""#),
				(PaginatorStep, r#"span class="paginator-step""#),
				(PaginatorControls, "span class=paginator-controls"),
				(OperationsContainer, "span class=operations"),
				(InfoContainer, r#"ul class="message no-margin""#),
				(InfoItem, "li"),
			],
			Self::Plain => &[
				(RowContentContainer, "tr"),
				(RowContentEven, "even"),
				(RowContentOdd, "odd"),
				(RowContentCell, "td"),
				(RowHeaderContainer, "tr class=header"),
				(RowHeaderCell, "th"),
				(RowFilterContainer, "tr class=filters"),
				(RowFilterCell, "td"),
				(RowFooterContainer, "tr class=footer"),
				(RowFooterCell, "td"),
				(TableContainer, "table class=datagrid"),
				(TableWrapper, "div class=datagrid-wrapper"),
				(PaginatorContainer, "span class=paginator"),
				(PaginatorFirst, "span class=first"),
				(PaginatorPrev, "span class=prev"),
				(PaginatorNext, "span class=next"),
				(PaginatorLast, "span class=last"),
				(PaginatorStep, "span class=step"),
				(PaginatorControls, "span class=controls"),
				(OperationsContainer, "span class=operations"),
				(InfoContainer, "span class=grid-info"),
				(InfoItem, "span"),
			],
		}
	}
}

/// Templates of all render regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTable {
	entries: HashMap<WrapperPath, Wrapper>,
}

impl Default for WrapperTable {
	fn default() -> Self {
		Self::new(Presentation::default())
	}
}

impl WrapperTable {
	/// The complete base table of a presentation
	pub fn new(presentation: Presentation) -> Self {
		let entries = presentation
			.defaults()
			.iter()
			.map(|(path, raw)| {
				let wrapper = if path.is_value() {
					Wrapper::Value(raw.to_string())
				} else {
					Wrapper::Spec(raw.parse().expect("built-in wrapper specs are well formed"))
				};
				(*path, wrapper)
			})
			.collect();
		Self { entries }
	}

	/// Checks that every path is present with an entry of the right kind
	///
	/// # Errors
	///
	/// [`GridError::WrapperPathUnresolved`] naming the first offending path.
	pub fn validate(&self) -> Result<()> {
		for path in WrapperPath::ALL {
			let valid = match self.entries.get(&path) {
				Some(Wrapper::Value(_)) => path.is_value(),
				Some(_) => !path.is_value(),
				None => false,
			};
			if !valid {
				return Err(GridError::WrapperPathUnresolved(path.to_string()));
			}
		}
		Ok(())
	}

	/// Overrides a single path
	pub fn set(&mut self, path: WrapperPath, wrapper: impl Into<Wrapper>) {
		self.entries.insert(path, wrapper.into());
	}

	/// Overrides a path given in its string spelling
	///
	/// Class paths take `template` verbatim; element paths parse it as an
	/// [`ElementSpec`].
	///
	/// # Errors
	///
	/// [`GridError::WrapperPathUnresolved`] for an unknown path,
	/// [`GridError::InvalidArgument`] for an unparsable template.
	pub fn set_str(&mut self, path: &str, template: &str) -> Result<()> {
		let path: WrapperPath = path.parse()?;
		let wrapper = if path.is_value() {
			Wrapper::Value(template.to_string())
		} else {
			Wrapper::Spec(template.parse()?)
		};
		self.entries.insert(path, wrapper);
		Ok(())
	}

	/// Removes a path
	pub fn remove(&mut self, path: WrapperPath) -> Option<Wrapper> {
		self.entries.remove(&path)
	}

	/// Entry of a path
	pub fn get(&self, path: WrapperPath) -> Option<&Wrapper> {
		self.entries.get(&path)
	}

	/// A fresh element for a region
	///
	/// Specs build a new node, fragments are snapshotted.
	///
	/// # Errors
	///
	/// [`GridError::WrapperPathUnresolved`] when the path is missing or holds
	/// a class value.
	pub fn element(&self, path: WrapperPath) -> Result<Element> {
		match self.entries.get(&path) {
			Some(Wrapper::Spec(spec)) => Ok(spec.build()),
			Some(Wrapper::Fragment(fragment)) => Ok(fragment.snapshot()),
			Some(Wrapper::Value(_)) | None => {
				Err(GridError::WrapperPathUnresolved(path.to_string()))
			}
		}
	}

	/// The class value of a path
	///
	/// # Errors
	///
	/// [`GridError::WrapperPathUnresolved`] when the path is missing or holds
	/// an element template.
	pub fn value(&self, path: WrapperPath) -> Result<&str> {
		match self.entries.get(&path) {
			Some(Wrapper::Value(value)) => Ok(value),
			_ => Err(GridError::WrapperPathUnresolved(path.to_string())),
		}
	}
}
