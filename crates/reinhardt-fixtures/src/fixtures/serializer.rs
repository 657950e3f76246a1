//! Fixture and dump file output.

use std::path::Path;

use serde::Serialize;

use super::set::FixtureTable;
use crate::error::FixtureResult;
use crate::record::Attributes;
use crate::template::TemplateExpander;

/// Serializer writing YAML fixture files.
///
/// Every mapping in the fixture model is a `BTreeMap`, so keys are always
/// emitted in sorted order. Files are read back through template expansion,
/// so written files protect any template delimiters found in the data.
#[derive(Debug, Clone, Default)]
pub struct FixtureSerializer;

impl FixtureSerializer {
	/// Creates a new serializer.
	pub fn new() -> Self {
		Self
	}

	/// Serializes the entries of one fixture file.
	pub fn serialize_table(&self, table: &FixtureTable) -> FixtureResult<String> {
		self.serialize(table)
	}

	/// Serializes a table dump.
	pub fn serialize_rows(&self, rows: &[Attributes]) -> FixtureResult<String> {
		self.serialize(rows)
	}

	/// Serializes any value to YAML.
	pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> FixtureResult<String> {
		Ok(serde_yaml::to_string(value)?)
	}

	/// Writes `content` to `path`, replacing any existing file.
	///
	/// The parent directory must exist. The write is not atomic.
	pub fn write_to_file(&self, path: &Path, content: &str) -> FixtureResult<()> {
		if content.ends_with('\n') {
			std::fs::write(path, content)?;
		} else {
			std::fs::write(path, format!("{}\n", content))?;
		}
		Ok(())
	}

	/// Serializes and writes the entries of one fixture file.
	pub fn write_table(&self, path: &Path, table: &FixtureTable) -> FixtureResult<()> {
		let content = self.serialize_table(table)?;
		self.write_to_file(path, &TemplateExpander::escape(&content))
	}

	/// Serializes and writes a table dump.
	pub fn write_rows(&self, path: &Path, rows: &[Attributes]) -> FixtureResult<()> {
		let content = self.serialize_rows(rows)?;
		self.write_to_file(path, &TemplateExpander::escape(&content))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FixtureError;
	use crate::fixtures::FixtureParser;
	use rstest::rstest;
	use serde_json::json;
	use tempfile::tempdir;

	fn entry(pairs: &[(&str, serde_json::Value)]) -> Attributes {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	fn test_serialize_table_sorted_keys() {
		let mut table = FixtureTable::new();
		table.insert(
			"post_00002".to_string(),
			entry(&[("title", json!("B")), ("id", json!(2))]),
		);
		table.insert(
			"post_00001".to_string(),
			entry(&[("title", json!("A")), ("id", json!(1))]),
		);

		let output = FixtureSerializer::new().serialize_table(&table).unwrap();
		assert_eq!(
			output,
			"post_00001:\n  id: 1\n  title: A\npost_00002:\n  id: 2\n  title: B\n"
		);
	}

	#[rstest]
	fn test_serialize_rows() {
		let rows = vec![entry(&[("id", json!(1)), ("name", json!("Ada"))])];
		let output = FixtureSerializer::new().serialize_rows(&rows).unwrap();
		assert_eq!(output, "- id: 1\n  name: Ada\n");
	}

	#[rstest]
	fn test_serialize_null_values() {
		let mut table = FixtureTable::new();
		table.insert("record_1".to_string(), entry(&[("name", json!(null))]));
		let output = FixtureSerializer::new().serialize_table(&table).unwrap();
		assert_eq!(output, "record_1:\n  name: null\n");
	}

	#[rstest]
	fn test_write_to_file_overwrites() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("authors.yml");
		let serializer = FixtureSerializer::new();

		serializer.write_to_file(&path, "first: 1\nsecond: 2\n").unwrap();
		serializer.write_to_file(&path, "third: 3").unwrap();

		assert_eq!(std::fs::read_to_string(&path).unwrap(), "third: 3\n");
	}

	#[rstest]
	fn test_written_rows_read_back_with_template_syntax() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("posts.yml");
		let rows = vec![
			entry(&[("id", json!(1)), ("body", json!("Use {{ title }} in your layout"))]),
			entry(&[("id", json!(2)), ("body", json!("{% endraw %} and {# note #}"))]),
		];

		FixtureSerializer::new().write_rows(&path, &rows).unwrap();

		let read = FixtureParser::new().parse_rows_file(&path).unwrap();
		assert_eq!(read, rows);
	}

	#[rstest]
	fn test_plain_rows_written_verbatim() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("authors.yml");
		let rows = vec![entry(&[("id", json!(1)), ("name", json!("Ada"))])];

		FixtureSerializer::new().write_rows(&path, &rows).unwrap();

		assert_eq!(std::fs::read_to_string(&path).unwrap(), "- id: 1\n  name: Ada\n");
	}

	#[rstest]
	fn test_write_to_missing_directory_fails() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("missing").join("authors.yml");
		let result = FixtureSerializer::new().write_to_file(&path, "a: 1\n");
		assert!(matches!(result, Err(FixtureError::Io(_))));
	}
}
