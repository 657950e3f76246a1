//! skeleton command implementation.
//!
//! Writes a fixture file holding two blank entries, `record_1` and
//! `record_2`, as a starting point for hand-written fixtures.

use std::path::PathBuf;

use crate::config::FixtureConfig;
use crate::error::FixtureResult;
use crate::fixtures::{FixtureSerializer, FixtureTable};
use crate::store::ModelStore;

const SKELETON_ENTRIES: [&str; 2] = ["record_1", "record_2"];

/// Options for the skeleton command.
#[derive(Debug, Clone, Default)]
pub struct SkeletonOptions {
	/// Output path. Defaults to the fixture path of the table.
	pub path: Option<PathBuf>,
}

impl SkeletonOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the output path.
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}
}

/// The skeleton command for writing blank fixture templates.
#[derive(Debug, Clone)]
pub struct SkeletonCommand {
	config: FixtureConfig,
	serializer: FixtureSerializer,
}

impl SkeletonCommand {
	/// Creates a new skeleton command.
	pub fn new(config: FixtureConfig) -> Self {
		Self {
			config,
			serializer: FixtureSerializer::new(),
		}
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"skeleton"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Writes a fixture file with two blank entries for a table"
	}

	/// Builds the skeleton entries without writing them.
	pub fn build<S: ModelStore + ?Sized>(&self, store: &S, table: &str) -> FixtureResult<FixtureTable> {
		let blank = store.blank_attributes(table)?;
		Ok(SKELETON_ENTRIES
			.iter()
			.map(|name| (name.to_string(), blank.clone()))
			.collect())
	}

	/// Executes the skeleton command for `table`, returning the written path.
	///
	/// An existing file is overwritten.
	pub fn execute<S: ModelStore + ?Sized>(
		&self,
		store: &S,
		table: &str,
		options: SkeletonOptions,
	) -> FixtureResult<PathBuf> {
		let path = match options.path {
			Some(path) => self.config.resolve(path),
			None => self.config.fixture_path(table),
		};
		let entries = self.build(store, table)?;
		self.serializer.write_table(&path, &entries)?;
		tracing::info!(table, path = %path.display(), "wrote fixture skeleton");
		Ok(path)
	}
}
