//! loaddata command implementation.
//!
//! Replaces every row of a table with the rows of a YAML dump. Identifiers
//! and the inheritance discriminator column are kept as they appear in the
//! file.
//!
//! The existing rows are destroyed before the file is read. Nothing is
//! rolled back if reading, decoding or inserting fails afterwards, so a
//! failed load can leave the table empty or partially loaded.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::FixtureConfig;
use crate::error::FixtureResult;
use crate::fixtures::FixtureParser;
use crate::record::Record;
use crate::store::ModelStore;
use crate::template::TemplateExpander;

/// Options for the loaddata command.
#[derive(Debug, Clone, Default)]
pub struct LoadDataOptions {
	/// Input path. Relative paths are expanded against the project root.
	pub path: Option<PathBuf>,

	/// Template context used to expand the file before decoding.
	pub template: TemplateExpander,
}

impl LoadDataOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the input path.
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Adds a template variable.
	pub fn with_var<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
		self.template.insert(name, value);
		self
	}
}

/// Outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
	/// File that was read.
	pub path: PathBuf,

	/// Number of rows destroyed before loading.
	pub records_removed: usize,

	/// Number of rows inserted.
	pub records_loaded: usize,
}

/// The loaddata command for reloading a table from a YAML dump.
#[derive(Debug, Clone)]
pub struct LoadDataCommand {
	config: FixtureConfig,
}

impl LoadDataCommand {
	/// Creates a new loaddata command.
	pub fn new(config: FixtureConfig) -> Self {
		Self { config }
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"loaddata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Deletes the rows of a table and loads fresh rows from a YAML file"
	}

	/// Executes the loaddata command for `table`.
	///
	/// Steps, in order: destroy every row, reset the identifier sequence,
	/// read and expand the file, decode it, insert each row with its original
	/// identifier, reset the identifier sequence again. Sequence resets are
	/// skipped on stores that do not support them.
	pub fn execute<S: ModelStore + ?Sized>(
		&self,
		store: &S,
		table: &str,
		options: LoadDataOptions,
	) -> FixtureResult<LoadResult> {
		let path = match options.path {
			Some(path) => self.config.resolve(path),
			None => self.config.data_path(table),
		};

		let records_removed = store.destroy_all(table)?;
		reset_sequence(store, table)?;

		let parser = FixtureParser::new().with_expander(options.template);
		let rows = parser.parse_rows_file(&path)?;

		let primary_key = store.primary_key(table)?;
		let inheritance_column = store.inheritance_column(table)?;

		let mut records_loaded = 0;
		for row in rows {
			let record = Record::from_attributes(table, &primary_key, row)?;
			tracing::debug!(
				table,
				id = record.id(),
				kind = ?record.get(&inheritance_column).filter(|kind| !kind.is_null()),
				"loading record"
			);
			store.insert(record)?;
			records_loaded += 1;
		}

		reset_sequence(store, table)?;
		tracing::info!(
			table,
			path = %path.display(),
			removed = records_removed,
			records = records_loaded,
			"loaded table"
		);

		Ok(LoadResult {
			path,
			records_removed,
			records_loaded,
		})
	}
}

fn reset_sequence<S: ModelStore + ?Sized>(store: &S, table: &str) -> FixtureResult<()> {
	if store.supports_sequence_reset() {
		store.reset_pk_sequence(table)
	} else {
		tracing::debug!(table, "store has no identifier sequences, skipping reset");
		Ok(())
	}
}
