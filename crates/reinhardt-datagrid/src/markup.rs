//! Markup tree used for grid rendering
//!
//! [`Element`] is a mutable HTML node: hooks and wrapper overrides change its
//! attributes, classes and children before the tree is serialised with
//! [`Element::render`]. Templates that are reused across rows (action links,
//! wrapper fragments) are copied with [`Element::snapshot`], never shared.
//!
//! ```
//! use reinhardt_datagrid::markup::Element;
//!
//! let mut cell = Element::new("td").class("table-actions");
//! cell.add_class("even");
//! cell.set_text("Tom & Jerry");
//! assert_eq!(cell.render(), r#"<td class="table-actions even">Tom &amp; Jerry</td>"#);
//! ```

mod util;

pub use util::{BOOLEAN_ATTRS, html_escape, is_boolean_attr_truthy};

use crate::error::{GridError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A child of an [`Element`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// Nested element
	Element(Element),
	/// Text content, escaped on output
	Text(String),
	/// Pre-rendered markup, emitted verbatim
	Raw(String),
}

impl Node {
	fn render_into(&self, output: &mut String) {
		match self {
			Node::Element(el) => el.render_into(output),
			Node::Text(text) => output.push_str(&html_escape(text)),
			Node::Raw(html) => output.push_str(html),
		}
	}

	/// Renders the node to an HTML string
	pub fn render(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}
}

impl From<Element> for Node {
	fn from(el: Element) -> Self {
		Node::Element(el)
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Node::Text(text.to_string())
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Node::Text(text)
	}
}

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	tag: String,
	attrs: Vec<(String, String)>,
	children: Vec<Node>,
	is_void: bool,
}

impl Element {
	/// Creates an empty element
	pub fn new(tag: impl Into<String>) -> Self {
		let tag = tag.into();
		let is_void = util::is_void_tag(&tag);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Sets an attribute, builder style
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_attr(name, value);
		self
	}

	/// Adds a class, builder style
	pub fn class(mut self, class: &str) -> Self {
		self.add_class(class);
		self
	}

	/// Appends a child, builder style
	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.add_child(child);
		self
	}

	/// Replaces the content with escaped text, builder style
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.set_text(text);
		self
	}

	/// Tag name
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Whether the element has no closing tag
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Attributes in insertion order
	pub fn attrs(&self) -> &[(String, String)] {
		&self.attrs
	}

	/// Value of an attribute
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Sets an attribute, replacing an existing value in place
	pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(n, _)| *n == name) {
			Some((_, v)) => *v = value,
			None => self.attrs.push((name, value)),
		}
	}

	/// Removes an attribute and returns its value
	pub fn remove_attr(&mut self, name: &str) -> Option<String> {
		let index = self.attrs.iter().position(|(n, _)| n == name)?;
		Some(self.attrs.remove(index).1)
	}

	/// Appends classes to the `class` attribute, skipping ones already present
	///
	/// `class` may hold several space separated names.
	pub fn add_class(&mut self, class: &str) {
		let mut classes: Vec<String> = self
			.get_attr("class")
			.map(|c| c.split_whitespace().map(str::to_string).collect())
			.unwrap_or_default();
		for name in class.split_whitespace() {
			if !classes.iter().any(|c| c == name) {
				classes.push(name.to_string());
			}
		}
		if !classes.is_empty() {
			self.set_attr("class", classes.join(" "));
		}
	}

	/// Whether the `class` attribute contains `class`
	pub fn has_class(&self, class: &str) -> bool {
		self.get_attr("class")
			.is_some_and(|c| c.split_whitespace().any(|name| name == class))
	}

	/// Replaces the content with escaped text
	pub fn set_text(&mut self, text: impl Into<String>) {
		self.children = vec![Node::Text(text.into())];
	}

	/// Replaces the content with pre-rendered markup
	pub fn set_html(&mut self, html: impl Into<String>) {
		self.children = vec![Node::Raw(html.into())];
	}

	/// Appends a child
	pub fn add_child(&mut self, child: impl Into<Node>) {
		self.children.push(child.into());
	}

	/// Children in document order
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Mutable access to the children
	pub fn children_mut(&mut self) -> &mut Vec<Node> {
		&mut self.children
	}

	/// First child, if any
	pub fn first_child(&self) -> Option<&Node> {
		self.children.first()
	}

	/// Concatenated text of all descendant text nodes
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		for child in &self.children {
			match child {
				Node::Element(el) => text.push_str(&el.text_content()),
				Node::Text(t) => text.push_str(t),
				Node::Raw(_) => {}
			}
		}
		text
	}

	/// Independent deep copy of the element
	pub fn snapshot(&self) -> Element {
		self.clone()
	}

	/// Renders the element to an HTML string
	///
	/// Boolean attributes with a falsy value are omitted.
	pub fn render(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	/// Opening tag with attributes, without children
	pub fn start_tag(&self) -> String {
		let mut output = String::new();
		self.open_into(&mut output);
		output.push('>');
		output
	}

	/// Closing tag; empty for void elements
	pub fn end_tag(&self) -> String {
		if self.is_void {
			String::new()
		} else {
			format!("</{}>", self.tag)
		}
	}

	fn open_into(&self, output: &mut String) {
		output.push('<');
		output.push_str(&self.tag);

		for (name, value) in &self.attrs {
			if BOOLEAN_ATTRS.contains(&name.as_str()) && !is_boolean_attr_truthy(value) {
				continue;
			}
			output.push(' ');
			output.push_str(name);
			output.push_str("=\"");
			output.push_str(&html_escape(value));
			output.push('"');
		}
	}

	fn render_into(&self, output: &mut String) {
		self.open_into(output);

		if self.is_void {
			output.push_str(" />");
		} else {
			output.push('>');
			for child in &self.children {
				child.render_into(output);
			}
			output.push_str("</");
			output.push_str(&self.tag);
			output.push('>');
		}
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

static TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9-]*)").expect("valid tag pattern"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
		.expect("valid attribute pattern")
});

/// Declarative element template: a tag name with attributes
///
/// Parsed from the compact form used in wrapper tables, e.g.
/// `span class="paginator-first"` or `tr class=footer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
	tag: String,
	attrs: Vec<(String, String)>,
}

impl ElementSpec {
	/// A spec with no attributes
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
		}
	}

	/// Adds an attribute, builder style
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Tag name
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Attributes in declaration order
	pub fn attrs(&self) -> &[(String, String)] {
		&self.attrs
	}

	/// Builds a fresh element from the template
	pub fn build(&self) -> Element {
		self.attrs
			.iter()
			.fold(Element::new(self.tag.clone()), |el, (name, value)| {
				el.attr(name.clone(), value.clone())
			})
	}
}

impl FromStr for ElementSpec {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self> {
		let tag = TAG_RE
			.captures(s)
			.and_then(|caps| caps.get(1))
			.ok_or_else(|| GridError::InvalidArgument(format!("invalid element spec '{}'", s)))?;
		let mut spec = ElementSpec::new(tag.as_str());
		for caps in ATTR_RE.captures_iter(&s[tag.end()..]) {
			let name = &caps[1];
			let value = caps
				.get(2)
				.or_else(|| caps.get(3))
				.or_else(|| caps.get(4))
				.map(|m| m.as_str())
				.unwrap_or(name);
			spec = spec.attr(name, value);
		}
		Ok(spec)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_render_nested() {
		let row = Element::new("tr")
			.class("even")
			.child(Element::new("td").text("Alice"))
			.child(Element::new("td").text("<b>"));
		assert_eq!(
			row.render(),
			r#"<tr class="even"><td>Alice</td><td>&lt;b&gt;</td></tr>"#
		);
	}

	#[rstest]
	fn test_render_void_element() {
		let input = Element::new("input").attr("type", "text").attr("name", "page");
		assert_eq!(input.render(), r#"<input type="text" name="page" />"#);
	}

	#[rstest]
	fn test_falsy_boolean_attr_skipped() {
		let input = Element::new("input")
			.attr("type", "checkbox")
			.attr("checked", "");
		assert_eq!(input.render(), r#"<input type="checkbox" />"#);
	}

	#[rstest]
	fn test_set_attr_replaces_in_place() {
		let mut link = Element::new("a").attr("href", "#").attr("title", "Edit");
		link.set_attr("href", "/users/1");
		assert_eq!(link.render(), r#"<a href="/users/1" title="Edit"></a>"#);
	}

	#[rstest]
	fn test_add_class_deduplicates() {
		let mut el = Element::new("span").class("paginator-first");
		el.add_class("inactive paginator-first");
		assert_eq!(el.get_attr("class"), Some("paginator-first inactive"));
		assert!(el.has_class("inactive"));
	}

	#[rstest]
	fn test_start_and_end_tag() {
		let form = Element::new("form")
			.attr("method", "get")
			.child(Element::new("input"));
		assert_eq!(form.start_tag(), r#"<form method="get">"#);
		assert_eq!(form.end_tag(), "</form>");
		assert_eq!(Element::new("br").end_tag(), "");
	}

	#[rstest]
	fn test_set_html_is_raw() {
		let mut cell = Element::new("td");
		cell.set_html("<p>&nbsp;</p>");
		assert_eq!(cell.render(), "<td><p>&nbsp;</p></td>");
	}

	#[rstest]
	fn test_snapshot_is_independent() {
		let template = Element::new("a").attr("title", "Edit");
		let mut copy = template.snapshot();
		copy.set_attr("title", "Bearbeiten");
		assert_eq!(template.get_attr("title"), Some("Edit"));
	}

	#[rstest]
	#[case("tr", "tr", vec![])]
	#[case("span class=paginator", "span", vec![("class", "paginator")])]
	#[case(
		r#"ul class="message no-margin""#,
		"ul",
		vec![("class", "message no-margin")]
	)]
	#[case(
		"td style='text-align:center' colspan=3",
		"td",
		vec![("style", "text-align:center"), ("colspan", "3")]
	)]
	fn test_element_spec_from_str(
		#[case] input: &str,
		#[case] tag: &str,
		#[case] attrs: Vec<(&str, &str)>,
	) {
		let spec: ElementSpec = input.parse().unwrap();
		assert_eq!(spec.tag_name(), tag);
		let parsed: Vec<(&str, &str)> = spec
			.attrs()
			.iter()
			.map(|(n, v)| (n.as_str(), v.as_str()))
			.collect();
		assert_eq!(parsed, attrs);
	}

	#[rstest]
	fn test_element_spec_rejects_empty() {
		assert!("  ".parse::<ElementSpec>().is_err());
	}

	#[rstest]
	fn test_element_spec_builds_fresh_nodes() {
		let spec: ElementSpec = "td class=checker".parse().unwrap();
		let mut first = spec.build();
		first.set_text("x");
		assert!(spec.build().children().is_empty());
	}
}
