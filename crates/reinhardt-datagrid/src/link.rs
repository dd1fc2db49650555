//! Link generation for actions, sorting and paging
//!
//! The grid never builds URLs by itself. It asks a [`LinkGenerator`] for the
//! URL of a named destination with a set of arguments. [`RouteTable`] is a
//! small reverse router for applications without one of their own.

use crate::error::{GridError, Result};
use crate::settings::GridSettings;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Ordered link arguments
pub type LinkArgs = IndexMap<String, String>;

/// The pseudo destination naming the page that renders the grid
pub const THIS: &str = "this";

/// Produces URLs for named destinations
pub trait LinkGenerator {
	/// Returns the URL of `destination` with `args` applied
	///
	/// # Errors
	///
	/// [`GridError::Link`] when the destination cannot be resolved.
	fn link(&self, destination: &str, args: &LinkArgs) -> Result<String>;
}

/// Extract parameter names from a URL pattern
///
/// ```
/// use reinhardt_datagrid::link::extract_param_names;
///
/// let names = extract_param_names("/users/{id}/posts/{post_id}/");
/// assert_eq!(names, vec!["id", "post_id"]);
/// ```
pub fn extract_param_names(pattern: &str) -> Vec<String> {
	let mut names = Vec::new();
	let mut chars = pattern.chars();

	while let Some(ch) = chars.next() {
		if ch == '{' {
			let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
			if !name.is_empty() {
				names.push(name);
			}
		}
	}

	names
}

fn is_safe_path_value(value: &str) -> bool {
	!value.contains(['/', '?', '#']) && !value.contains("..")
}

/// Reverse router over `{param}` path patterns
///
/// Arguments that fill a placeholder are consumed; the remaining ones are
/// appended as an urlencoded query string in argument order.
///
/// ```
/// use reinhardt_datagrid::link::{LinkArgs, LinkGenerator, RouteTable};
///
/// let mut routes = RouteTable::new("/admin/users");
/// routes.register_path("edit", "/admin/users/{id}/edit");
///
/// let mut args = LinkArgs::new();
/// args.insert("id".to_string(), "7".to_string());
/// args.insert("back".to_string(), "list".to_string());
/// assert_eq!(routes.link("edit", &args).unwrap(), "/admin/users/7/edit?back=list");
///
/// let mut page = LinkArgs::new();
/// page.insert("page".to_string(), "2".to_string());
/// assert_eq!(routes.link("this", &page).unwrap(), "/admin/users?page=2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	base_url: String,
	routes: HashMap<String, String>,
}

impl RouteTable {
	/// Creates a table whose `this` destination is `base_url`
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			routes: HashMap::new(),
		}
	}

	/// Creates an empty table rooted at the configured base URL
	pub fn from_settings(settings: &GridSettings) -> Self {
		Self::new(settings.base_url.clone())
	}

	/// URL of the page rendering the grid
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Registers a named path pattern
	pub fn register_path(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
		self.routes.insert(name.into(), pattern.into());
	}

	/// Whether a destination is known
	pub fn has_route(&self, name: &str) -> bool {
		name == THIS || self.routes.contains_key(name)
	}

	fn reverse(&self, destination: &str, pattern: &str, args: &LinkArgs) -> Result<String> {
		let mut query = args.clone();
		let mut url = pattern.to_string();

		for name in extract_param_names(pattern) {
			let placeholder = format!("{{{}}}", name);
			if !url.contains(&placeholder) {
				continue;
			}
			let value = query.shift_remove(&name).ok_or_else(|| {
				GridError::Link(format!(
					"missing argument '{}' for destination '{}'",
					name, destination
				))
			})?;
			if !is_safe_path_value(&value) {
				return Err(GridError::Link(format!(
					"invalid value for argument '{}' of destination '{}'",
					name, destination
				)));
			}
			url = url.replace(&placeholder, &urlencoding::encode(&value));
		}

		if !query.is_empty() {
			let pairs: Vec<(&str, &str)> = query
				.iter()
				.map(|(k, v)| (k.as_str(), v.as_str()))
				.collect();
			let encoded = serde_urlencoded::to_string(pairs)
				.map_err(|e| GridError::Link(e.to_string()))?;
			url.push(if url.contains('?') { '&' } else { '?' });
			url.push_str(&encoded);
		}

		Ok(url)
	}
}

impl LinkGenerator for RouteTable {
	fn link(&self, destination: &str, args: &LinkArgs) -> Result<String> {
		let pattern = if destination == THIS {
			self.base_url.as_str()
		} else {
			self.routes.get(destination).map(String::as_str).ok_or_else(|| {
				GridError::Link(format!("unknown destination '{}'", destination))
			})?
		};
		let url = self.reverse(destination, pattern, args)?;
		tracing::trace!(destination, url = %url, "generated link");
		Ok(url)
	}
}
