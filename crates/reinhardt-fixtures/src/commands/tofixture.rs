//! to_fixture command implementation.
//!
//! Exports matching rows of a table, plus every record reachable through the
//! include specification, as test fixture files: one file per table under the
//! fixtures directory, then one file per has-and-belongs-to-many join table
//! of the exported table.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::FixtureConfig;
use crate::error::FixtureResult;
use crate::fixtures::{FixtureExporter, FixtureParser, FixtureSerializer, FixtureSet, FixtureTable};
use crate::include::IncludeSpec;
use crate::record::Attributes;
use crate::store::{FindOptions, ModelStore};
use crate::template::TemplateExpander;

/// Options for the to_fixture command.
#[derive(Debug, Clone, Default)]
pub struct ToFixtureOptions {
	/// Maximum number of root rows to export.
	pub limit: Option<usize>,

	/// Column equality conditions selecting the root rows.
	pub conditions: Attributes,

	/// Associations to follow from each root row.
	pub include: Option<IncludeSpec>,

	/// Merge new entries into existing fixture files instead of replacing them.
	pub keep_current_fixtures: bool,

	/// Template context used when reading existing fixture files.
	pub template: TemplateExpander,
}

impl ToFixtureOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the root row limit.
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Adds a root row condition.
	pub fn with_condition(mut self, column: impl Into<String>, value: serde_json::Value) -> Self {
		self.conditions.insert(column.into(), value);
		self
	}

	/// Sets the include specification.
	pub fn with_include(mut self, include: impl Into<IncludeSpec>) -> Self {
		self.include = Some(include.into());
		self
	}

	/// Sets the keep-current-fixtures flag.
	pub fn with_keep_current_fixtures(mut self, keep: bool) -> Self {
		self.keep_current_fixtures = keep;
		self
	}

	/// Adds a template variable for reading existing fixture files.
	pub fn with_var<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
		self.template.insert(name, value);
		self
	}
}

/// Outcome of a fixture export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportResult {
	/// Files written, record tables first, join tables last.
	pub files: Vec<PathBuf>,

	/// Number of entries written across all files, merged entries included.
	pub records_written: usize,
}

/// The to_fixture command for exporting records as test fixtures.
#[derive(Debug, Clone)]
pub struct ToFixtureCommand {
	config: FixtureConfig,
	serializer: FixtureSerializer,
}

impl ToFixtureCommand {
	/// Creates a new to_fixture command.
	pub fn new(config: FixtureConfig) -> Self {
		Self {
			config,
			serializer: FixtureSerializer::new(),
		}
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"to_fixture"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Writes records and their associations to test fixture files"
	}

	/// Collects the fixture set for `table` without writing anything.
	pub fn collect<S: ModelStore + ?Sized>(
		&self,
		store: &S,
		table: &str,
		options: &ToFixtureOptions,
	) -> FixtureResult<FixtureSet> {
		let find = FindOptions {
			limit: options.limit,
			conditions: options.conditions.clone(),
		};
		let roots = store.find_all(table, &find)?;
		FixtureExporter::new(store).export(&roots, options.include.as_ref())
	}

	/// Executes the to_fixture command for `table`.
	pub fn execute<S: ModelStore + ?Sized>(
		&self,
		store: &S,
		table: &str,
		options: ToFixtureOptions,
	) -> FixtureResult<ExportResult> {
		let set = self.collect(store, table, &options)?;
		let parser = FixtureParser::new().with_expander(options.template);
		let mut result = ExportResult::default();

		for (table_name, entries) in set {
			let path = self.config.fixture_path(&table_name);
			let entries = if options.keep_current_fixtures {
				merge_existing(&parser, &path, entries)?
			} else {
				entries
			};
			self.write(&mut result, &table_name, path, &entries)?;
		}

		for (join_table, entries) in FixtureExporter::new(store).export_join_tables(table)? {
			let path = self.config.fixture_path(&join_table);
			self.write(&mut result, &join_table, path, &entries)?;
		}

		Ok(result)
	}

	fn write(
		&self,
		result: &mut ExportResult,
		table: &str,
		path: PathBuf,
		entries: &FixtureTable,
	) -> FixtureResult<()> {
		self.serializer.write_table(&path, entries)?;
		tracing::info!(
			table,
			path = %path.display(),
			records = entries.len(),
			"wrote fixture file"
		);
		result.records_written += entries.len();
		result.files.push(path);
		Ok(())
	}
}

/// Overlays `entries` on the entries already stored at `path`.
fn merge_existing(
	parser: &FixtureParser,
	path: &std::path::Path,
	entries: FixtureTable,
) -> FixtureResult<FixtureTable> {
	match parser.parse_table_file(path)? {
		Some(mut existing) => {
			existing.extend(entries);
			Ok(existing)
		}
		None => {
			if path.exists() {
				tracing::warn!(
					path = %path.display(),
					"existing fixture file is empty, nothing to merge"
				);
			}
			Ok(entries)
		}
	}
}
