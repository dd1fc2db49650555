//! Row and global actions
//!
//! An [`Action`] is a link template bound to a destination. Once per row the
//! renderer calls [`Action::generate_link`] with the row record, which stores
//! the resolved URL as the template's `href`. The renderer then takes a
//! [`Element::snapshot`] of the template before translating its title and
//! text, so rows never see each other's state.
//!
//! ```
//! use reinhardt_datagrid::action::{Action, Destination};
//! use reinhardt_datagrid::link::RouteTable;
//! use serde_json::json;
//!
//! let mut routes = RouteTable::new("/users");
//! routes.register_path("edit", "/users/{id}/edit");
//!
//! let mut edit = Action::new("Edit", "edit").ajax(true);
//! let row = json!({"id": 42, "name": "Alice"});
//! edit.generate_link(row.as_object().unwrap(), "id", &routes).unwrap();
//!
//! assert_eq!(edit.link(), Some("/users/42/edit"));
//! assert_eq!(
//!     edit.html().render(),
//!     r#"<a title="Edit" class="datagrid-ajax" href="/users/42/edit">Edit</a>"#
//! );
//! ```

use crate::error::Result;
use crate::link::{LinkArgs, LinkGenerator};
use crate::markup::Element;
use crate::value::{Record, to_display};
use std::fmt;

/// Class added to links handled through ajax
pub const AJAX_CLASS: &str = "datagrid-ajax";

/// Where an action links to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
	/// A bare destination name
	Simple(String),
	/// A destination with static arguments merged into every link
	WithExtraArgs(String, LinkArgs),
}

impl Destination {
	/// Destination name
	pub fn name(&self) -> &str {
		match self {
			Self::Simple(name) | Self::WithExtraArgs(name, _) => name,
		}
	}

	/// Static arguments; empty for [`Destination::Simple`]
	pub fn extra_args(&self) -> LinkArgs {
		match self {
			Self::Simple(_) => LinkArgs::new(),
			Self::WithExtraArgs(_, args) => args.clone(),
		}
	}
}

impl From<&str> for Destination {
	fn from(name: &str) -> Self {
		Self::Simple(name.to_string())
	}
}

impl From<String> for Destination {
	fn from(name: String) -> Self {
		Self::Simple(name)
	}
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<(&str, [(K, V); N])> for Destination {
	fn from((name, args): (&str, [(K, V); N])) -> Self {
		Self::WithExtraArgs(
			name.to_string(),
			args.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		)
	}
}

/// How the row key enters the link arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMode {
	/// Pass the grid key value, under the given argument name or the grid
	/// key name when `None`
	WithKey(Option<String>),
	/// Pass no key at all
	WithoutKey,
	/// Pass the value of row field `field` as argument `link_name`
	Explicit {
		/// Row field holding the value
		field: String,
		/// Argument name in the link
		link_name: String,
	},
}

impl Default for KeyMode {
	fn default() -> Self {
		Self::WithKey(None)
	}
}

type DisablePredicate = Box<dyn Fn(&Record) -> bool>;

/// A navigable link rendered once per row
pub struct Action {
	title: String,
	destination: Destination,
	key: KeyMode,
	html: Element,
	disable_if: Option<DisablePredicate>,
	link: Option<String>,
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Action")
			.field("title", &self.title)
			.field("destination", &self.destination)
			.field("key", &self.key)
			.field("html", &self.html)
			.field("has_disable_if", &self.disable_if.is_some())
			.field("link", &self.link)
			.finish()
	}
}

impl Action {
	/// Creates an action passing the grid key
	pub fn new(title: impl Into<String>, destination: impl Into<Destination>) -> Self {
		let title = title.into();
		let html = Element::new("a")
			.attr("title", title.clone())
			.text(title.clone());
		Self {
			title,
			destination: destination.into(),
			key: KeyMode::default(),
			html,
			disable_if: None,
			link: None,
		}
	}

	/// Sets the key mode
	pub fn key(mut self, key: KeyMode) -> Self {
		self.key = key;
		self
	}

	/// Replaces the text of the link with an icon fragment
	pub fn icon(mut self, icon: Element) -> Self {
		self.html.children_mut().clear();
		self.html.add_child(icon);
		self
	}

	/// Marks the link for ajax handling
	pub fn ajax(self, enabled: bool) -> Self {
		if enabled {
			self.ajax_class(AJAX_CLASS)
		} else {
			self
		}
	}

	/// Marks the link for ajax handling with a custom class
	pub fn ajax_class(mut self, class: &str) -> Self {
		self.html.add_class(class);
		self
	}

	/// Renders the action disabled for rows matching `predicate`
	pub fn disable_if<F>(mut self, predicate: F) -> Self
	where
		F: Fn(&Record) -> bool + 'static,
	{
		self.disable_if = Some(Box::new(predicate));
		self
	}

	/// Untranslated title
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Link destination
	pub fn destination(&self) -> &Destination {
		&self.destination
	}

	/// Key mode
	pub fn key_mode(&self) -> &KeyMode {
		&self.key
	}

	/// Link template; carries the `href` once resolved
	pub fn html(&self) -> &Element {
		&self.html
	}

	/// The last resolved link
	pub fn link(&self) -> Option<&str> {
		self.link.as_deref()
	}

	/// Whether a link has been generated
	pub fn is_resolved(&self) -> bool {
		self.link.is_some()
	}

	/// Whether the action is disabled for `row`
	pub fn is_disabled(&self, row: &Record) -> bool {
		self.disable_if.as_ref().is_some_and(|predicate| predicate(row))
	}

	/// Arguments of the link for `args`
	///
	/// A missing key value leaves the key argument out. Without a key the
	/// destination is linked with no arguments at all.
	pub fn link_args(&self, args: &Record, grid_key: &str) -> LinkArgs {
		let (name, field) = match &self.key {
			KeyMode::WithoutKey => return LinkArgs::new(),
			KeyMode::WithKey(name) => (name.as_deref().unwrap_or(grid_key), grid_key),
			KeyMode::Explicit { field, link_name } => (link_name.as_str(), field.as_str()),
		};
		let mut link_args = self.destination.extra_args();
		if let Some(value) = args.get(field) {
			link_args.insert(name.to_string(), to_display(value));
		}
		link_args
	}

	/// Resolves the link for a row and stores it as the template's `href`
	///
	/// # Errors
	///
	/// Propagates the error of the link generator.
	pub fn generate_link(
		&mut self,
		args: &Record,
		grid_key: &str,
		links: &dyn LinkGenerator,
	) -> Result<()> {
		let link_args = self.link_args(args, grid_key);
		let link = links.link(self.destination.name(), &link_args)?;
		tracing::trace!(
			title = %self.title,
			destination = self.destination.name(),
			link = %link,
			"resolved action link"
		);
		self.html.set_attr("href", link.clone());
		self.link = Some(link);
		Ok(())
	}
}

/// An action independent of any row, rendered in the action column header
#[derive(Debug)]
pub struct GlobalAction {
	inner: Action,
}

impl GlobalAction {
	/// Creates a global action
	pub fn new(title: impl Into<String>, destination: impl Into<Destination>) -> Self {
		Self {
			inner: Action::new(title, destination).key(KeyMode::WithoutKey),
		}
	}

	/// Replaces the text of the link with an icon fragment
	pub fn icon(self, icon: Element) -> Self {
		Self {
			inner: self.inner.icon(icon),
		}
	}

	/// Marks the link for ajax handling
	pub fn ajax(self, enabled: bool) -> Self {
		Self {
			inner: self.inner.ajax(enabled),
		}
	}

	/// Untranslated title
	pub fn title(&self) -> &str {
		self.inner.title()
	}

	/// Link template
	pub fn html(&self) -> &Element {
		self.inner.html()
	}

	/// The last resolved link
	pub fn link(&self) -> Option<&str> {
		self.inner.link()
	}

	/// Resolves the link
	///
	/// # Errors
	///
	/// Propagates the error of the link generator.
	pub fn generate_link(&mut self, links: &dyn LinkGenerator) -> Result<()> {
		self.inner.generate_link(&Record::new(), "", links)
	}
}
