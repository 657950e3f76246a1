//! dumpdata command implementation.
//!
//! Writes the rows of a table to `<data_dir>/<table>.yml` or an explicit path.

use std::path::PathBuf;

use crate::config::FixtureConfig;
use crate::error::FixtureResult;
use crate::fixtures::FixtureSerializer;
use crate::record::{Attributes, Record};
use crate::store::{FindOptions, ModelStore};

/// Options for the dumpdata command.
#[derive(Debug, Clone, Default)]
pub struct DumpDataOptions {
	/// Output path. Relative paths are expanded against the project root.
	pub path: Option<PathBuf>,

	/// Maximum number of rows to write.
	pub limit: Option<usize>,
}

impl DumpDataOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the output path.
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Sets the row limit.
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}
}

/// Outcome of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpResult {
	/// File that was written.
	pub path: PathBuf,

	/// Number of rows written.
	pub records_written: usize,
}

/// The dumpdata command for writing a table to a YAML file.
///
/// The target file is overwritten unconditionally.
#[derive(Debug, Clone)]
pub struct DumpDataCommand {
	config: FixtureConfig,
	serializer: FixtureSerializer,
}

impl DumpDataCommand {
	/// Creates a new dumpdata command.
	pub fn new(config: FixtureConfig) -> Self {
		Self {
			config,
			serializer: FixtureSerializer::new(),
		}
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"dumpdata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Writes the rows of a table to a YAML file"
	}

	/// Executes the dumpdata command for `table`.
	pub fn execute<S: ModelStore + ?Sized>(
		&self,
		store: &S,
		table: &str,
		options: DumpDataOptions,
	) -> FixtureResult<DumpResult> {
		let path = match options.path {
			Some(path) => self.config.resolve(path),
			None => self.config.data_path(table),
		};

		let find = FindOptions {
			limit: options.limit,
			..FindOptions::default()
		};
		let rows: Vec<Attributes> = store
			.find_all(table, &find)?
			.into_iter()
			.map(Record::into_attributes)
			.collect();

		self.serializer.write_rows(&path, &rows)?;
		tracing::info!(
			table,
			path = %path.display(),
			records = rows.len(),
			"dumped table"
		);

		Ok(DumpResult {
			path,
			records_written: rows.len(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FixtureError;
	use crate::store::{MemoryStore, TableSchema};
	use rstest::rstest;
	use serde_json::json;
	use tempfile::tempdir;

	fn store() -> MemoryStore {
		let store = MemoryStore::new();
		store.create_table(TableSchema::new("books").column("title"));
		for title in ["Dune", "Emma", "Ulysses"] {
			store.create("books", [("title", json!(title))]).unwrap();
		}
		store
	}

	#[rstest]
	fn test_command_metadata() {
		let cmd = DumpDataCommand::new(FixtureConfig::default());
		assert_eq!(cmd.name(), "dumpdata");
		assert!(!cmd.description().is_empty());
	}

	#[rstest]
	fn test_dump_to_default_path() {
		let dir = tempdir().unwrap();
		std::fs::create_dir(dir.path().join("db")).unwrap();
		let cmd = DumpDataCommand::new(FixtureConfig::new(dir.path()));

		let result = cmd
			.execute(&store(), "books", DumpDataOptions::new())
			.unwrap();

		assert_eq!(result.path, dir.path().join("db/books.yml"));
		assert_eq!(result.records_written, 3);
		let content = std::fs::read_to_string(&result.path).unwrap();
		assert!(content.starts_with("- id: 1\n  title: Dune\n"));
	}

	#[rstest]
	fn test_dump_with_limit_and_path() {
		let dir = tempdir().unwrap();
		let cmd = DumpDataCommand::new(FixtureConfig::new(dir.path()));

		let result = cmd
			.execute(
				&store(),
				"books",
				DumpDataOptions::new().with_path("two.yml").with_limit(2),
			)
			.unwrap();

		assert_eq!(result.path, dir.path().join("two.yml"));
		assert_eq!(result.records_written, 2);
	}

	#[rstest]
	fn test_dump_missing_directory() {
		let dir = tempdir().unwrap();
		let cmd = DumpDataCommand::new(FixtureConfig::new(dir.path()));
		let result = cmd.execute(&store(), "books", DumpDataOptions::new());
		assert!(matches!(result, Err(FixtureError::Io(_))));
	}
}
