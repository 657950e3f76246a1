//! Fixture and dump file parsing.
//!
//! Files are template-expanded first, then decoded as YAML. Merge keys
//! (`<<: *defaults`) are resolved before entries are read.

use std::path::Path;

use super::set::FixtureTable;
use crate::error::{FixtureError, FixtureResult};
use crate::record::Attributes;
use crate::template::TemplateExpander;

/// Parser for fixture files and table dumps.
#[derive(Debug, Clone, Default)]
pub struct FixtureParser {
	expander: TemplateExpander,
}

impl FixtureParser {
	/// Creates a parser with an empty template context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses `expander` for template expansion.
	pub fn with_expander(mut self, expander: TemplateExpander) -> Self {
		self.expander = expander;
		self
	}

	/// Parses a fixture file body: a mapping of entry names to attributes.
	///
	/// Returns `None` for an empty document.
	///
	/// # Errors
	///
	/// Returns an error if template expansion fails, the content is not
	/// valid YAML, or the document is not a mapping of mappings.
	pub fn parse_table(&self, content: &str) -> FixtureResult<Option<FixtureTable>> {
		match self.decode(content)? {
			serde_yaml::Value::Null => Ok(None),
			value @ serde_yaml::Value::Mapping(_) => Ok(Some(serde_yaml::from_value(value)?)),
			_ => Err(FixtureError::InvalidFormat(
				"expected a mapping of fixture entries".to_string(),
			)),
		}
	}

	/// Parses a table dump body: a sequence of attribute mappings.
	///
	/// An empty document yields no rows.
	pub fn parse_rows(&self, content: &str) -> FixtureResult<Vec<Attributes>> {
		match self.decode(content)? {
			serde_yaml::Value::Null => Ok(Vec::new()),
			serde_yaml::Value::Sequence(items) => items
				.into_iter()
				.enumerate()
				.map(|(idx, item)| {
					serde_yaml::from_value(item).map_err(|e| {
						FixtureError::InvalidFormat(format!("invalid row at index {}: {}", idx, e))
					})
				})
				.collect(),
			_ => Err(FixtureError::InvalidFormat(
				"expected a sequence of rows".to_string(),
			)),
		}
	}

	/// Reads and parses a fixture file.
	///
	/// Returns `None` if the file does not exist or is empty.
	pub fn parse_table_file(&self, path: &Path) -> FixtureResult<Option<FixtureTable>> {
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};
		self.parse_table(&content)
	}

	/// Reads and parses a table dump file.
	pub fn parse_rows_file(&self, path: &Path) -> FixtureResult<Vec<Attributes>> {
		let content = std::fs::read_to_string(path)?;
		self.parse_rows(&content)
	}

	fn decode(&self, content: &str) -> FixtureResult<serde_yaml::Value> {
		let expanded = self.expander.expand(content)?;
		if expanded.trim().is_empty() {
			return Ok(serde_yaml::Value::Null);
		}
		let mut value: serde_yaml::Value = serde_yaml::from_str(&expanded)?;
		value.apply_merge()?;
		Ok(value)
	}
}
