//! Grid configuration
//!
//! Settings can be built in code, deserialized from JSON or read from
//! `DATAGRID_*` environment variables. Missing fields take their defaults.

use crate::column::DEFAULT_DATE_FORMAT;
use crate::error::{GridError, Result};
use crate::action::AJAX_CLASS;
use crate::wrapper::Presentation;
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables read by [`GridSettings::from_env`]
pub const ENV_PREFIX: &str = "DATAGRID_";

/// Default footer layout
pub const DEFAULT_FOOTER_FORMAT: &str = "%operations% %paginator% %info%";
/// Default paginator controls layout
pub const DEFAULT_PAGINATOR_FORMAT: &str = "%label% %input% of %count%";
/// Default summary layout
pub const DEFAULT_INFO_FORMAT: &str = "Items %from% - %to% out of %count%";

/// Grid settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
	/// Name of the primary key column
	#[serde(default = "default_key_name")]
	pub key_name: String,

	/// Rows per page unless the request asks otherwise
	#[serde(default = "default_items_per_page")]
	pub items_per_page: usize,

	/// Class put on links handled through ajax
	#[serde(default = "default_ajax_class")]
	pub ajax_class: String,

	/// Footer layout with `%operations%`, `%paginator%` and `%info%`
	#[serde(default = "default_footer_format")]
	pub footer_format: String,

	/// Paginator controls layout with `%label%`, `%input%` and `%count%`
	#[serde(default = "default_paginator_format")]
	pub paginator_format: String,

	/// Summary layout with `%from%`, `%to%` and `%count%`
	#[serde(default = "default_info_format")]
	pub info_format: String,

	/// strftime pattern for date columns created from these settings
	#[serde(default = "default_date_format")]
	pub date_format: String,

	/// Base markup style
	#[serde(default)]
	pub presentation: Presentation,

	/// Render numbered page links
	#[serde(default)]
	pub paginator_steps: bool,

	/// Sort links add to the current order instead of replacing it
	#[serde(default = "default_multi_order")]
	pub multi_order: bool,

	/// URL of the page rendering the grid
	#[serde(default = "default_base_url")]
	pub base_url: String,
}

fn default_key_name() -> String {
	"id".to_string()
}

fn default_items_per_page() -> usize {
	15
}

fn default_ajax_class() -> String {
	AJAX_CLASS.to_string()
}

fn default_footer_format() -> String {
	DEFAULT_FOOTER_FORMAT.to_string()
}

fn default_paginator_format() -> String {
	DEFAULT_PAGINATOR_FORMAT.to_string()
}

fn default_info_format() -> String {
	DEFAULT_INFO_FORMAT.to_string()
}

fn default_date_format() -> String {
	DEFAULT_DATE_FORMAT.to_string()
}

fn default_multi_order() -> bool {
	true
}

fn default_base_url() -> String {
	"/".to_string()
}

impl Default for GridSettings {
	fn default() -> Self {
		Self {
			key_name: default_key_name(),
			items_per_page: default_items_per_page(),
			ajax_class: default_ajax_class(),
			footer_format: default_footer_format(),
			paginator_format: default_paginator_format(),
			info_format: default_info_format(),
			date_format: default_date_format(),
			presentation: Presentation::default(),
			paginator_steps: false,
			multi_order: default_multi_order(),
			base_url: default_base_url(),
		}
	}
}

fn parse_flag(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}

impl GridSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate settings
	///
	/// # Errors
	///
	/// [`GridError::Settings`] describing the first invalid field.
	pub fn validate(&self) -> Result<()> {
		if self.key_name.trim().is_empty() {
			return Err(GridError::Settings("key_name must not be empty".to_string()));
		}
		if self.items_per_page == 0 {
			return Err(GridError::Settings(
				"items_per_page must be positive".to_string(),
			));
		}
		for (name, format) in [
			("footer_format", &self.footer_format),
			("paginator_format", &self.paginator_format),
			("info_format", &self.info_format),
			("date_format", &self.date_format),
		] {
			if format.trim().is_empty() {
				return Err(GridError::Settings(format!("{} must not be empty", name)));
			}
		}
		Ok(())
	}

	/// Load settings from JSON and validate them
	///
	/// # Errors
	///
	/// [`GridError::Settings`] for malformed JSON or invalid values.
	pub fn from_json(json: &str) -> Result<Self> {
		let settings: Self = serde_json::from_str(json)
			.map_err(|e| GridError::Settings(format!("parse error: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from `DATAGRID_*` environment variables
	///
	/// # Errors
	///
	/// [`GridError::Settings`] for unparsable or invalid values.
	pub fn from_env() -> Result<Self> {
		Self::from_vars(|name| std::env::var(name).ok())
	}

	/// Load settings through a variable lookup, using the names read by
	/// [`GridSettings::from_env`]
	///
	/// # Errors
	///
	/// [`GridError::Settings`] for unparsable or invalid values.
	pub fn from_vars<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
		let mut settings = Self::default();

		if let Some(key_name) = var("KEY_NAME") {
			settings.key_name = key_name;
		}

		if let Some(items) = var("ITEMS_PER_PAGE") {
			settings.items_per_page = items.trim().parse().map_err(|_| {
				GridError::Settings(format!("invalid {}ITEMS_PER_PAGE '{}'", ENV_PREFIX, items))
			})?;
		}

		if let Some(class) = var("AJAX_CLASS") {
			settings.ajax_class = class;
		}

		if let Some(format) = var("FOOTER_FORMAT") {
			settings.footer_format = format;
		}

		if let Some(format) = var("PAGINATOR_FORMAT") {
			settings.paginator_format = format;
		}

		if let Some(format) = var("INFO_FORMAT") {
			settings.info_format = format;
		}

		if let Some(format) = var("DATE_FORMAT") {
			settings.date_format = format;
		}

		if let Some(presentation) = var("PRESENTATION") {
			settings.presentation = match presentation.trim().to_ascii_lowercase().as_str() {
				"constellation" => Presentation::Constellation,
				"plain" => Presentation::Plain,
				other => {
					return Err(GridError::Settings(format!(
						"unknown presentation '{}'",
						other
					)));
				}
			};
		}

		if let Some(steps) = var("PAGINATOR_STEPS") {
			settings.paginator_steps = parse_flag(&steps);
		}

		if let Some(multi) = var("MULTI_ORDER") {
			settings.multi_order = parse_flag(&multi);
		}

		if let Some(url) = var("BASE_URL") {
			settings.base_url = url;
		}

		settings.validate()?;
		Ok(settings)
	}
}
