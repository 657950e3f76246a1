//! Table-scoped entry points.
//!
//! [`TableFixturesExt::fixtures`] binds a store, a table and a configuration
//! so every operation can be called with only its own options:
//!
//! ```
//! use reinhardt_fixtures::prelude::*;
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join("db")).unwrap();
//! let config = FixtureConfig::new(dir.path());
//!
//! let store = MemoryStore::new();
//! store.create_table(TableSchema::new("books").column("title"));
//! store.create("books", [("title", json!("Dune"))]).unwrap();
//!
//! let books = store.fixtures("books", &config);
//! books.dump_to_file(None, None).unwrap();
//! books.load_from_file(None).unwrap();
//! assert_eq!(store.count("books").unwrap(), 1);
//! ```

use std::path::{Path, PathBuf};

use crate::commands::{
	DumpDataCommand, DumpDataOptions, DumpResult, ExportResult, LoadDataCommand, LoadDataOptions,
	LoadResult, SkeletonCommand, SkeletonOptions, ToFixtureCommand, ToFixtureOptions,
};
use crate::config::FixtureConfig;
use crate::error::FixtureResult;
use crate::fixtures::FixtureSet;
use crate::store::ModelStore;

/// Fixture operations bound to one table of a store.
#[derive(Debug)]
pub struct TableFixtures<'a, S: ?Sized> {
	store: &'a S,
	table: String,
	config: &'a FixtureConfig,
}

impl<'a, S: ModelStore + ?Sized> TableFixtures<'a, S> {
	/// Binds `table` of `store` using `config` for default paths.
	pub fn new(store: &'a S, table: impl Into<String>, config: &'a FixtureConfig) -> Self {
		Self {
			store,
			table: table.into(),
			config,
		}
	}

	/// Returns the bound table name.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Writes the table's rows to `path`, or to `<data_dir>/<table>.yml`.
	pub fn dump_to_file(&self, path: Option<&Path>, limit: Option<usize>) -> FixtureResult<DumpResult> {
		let options = DumpDataOptions {
			path: path.map(Path::to_path_buf),
			limit,
		};
		DumpDataCommand::new(self.config.clone()).execute(self.store, &self.table, options)
	}

	/// Replaces the table's rows with the rows stored at `path`, or at
	/// `<data_dir>/<table>.yml`.
	pub fn load_from_file(&self, path: Option<&Path>) -> FixtureResult<LoadResult> {
		self.load_with(LoadDataOptions {
			path: path.map(Path::to_path_buf),
			..LoadDataOptions::default()
		})
	}

	/// Like [`TableFixtures::load_from_file`] with full options.
	pub fn load_with(&self, options: LoadDataOptions) -> FixtureResult<LoadResult> {
		LoadDataCommand::new(self.config.clone()).execute(self.store, &self.table, options)
	}

	/// Writes matching rows and their included associations as test fixtures.
	pub fn to_fixture(&self, options: ToFixtureOptions) -> FixtureResult<ExportResult> {
		ToFixtureCommand::new(self.config.clone()).execute(self.store, &self.table, options)
	}

	/// Collects the fixture set [`TableFixtures::to_fixture`] would write.
	pub fn export(&self, options: &ToFixtureOptions) -> FixtureResult<FixtureSet> {
		ToFixtureCommand::new(self.config.clone()).collect(self.store, &self.table, options)
	}

	/// Writes a fixture file with two blank entries.
	pub fn to_skeleton(&self) -> FixtureResult<PathBuf> {
		SkeletonCommand::new(self.config.clone()).execute(
			self.store,
			&self.table,
			SkeletonOptions::default(),
		)
	}
}

/// Adds [`TableFixturesExt::fixtures`] to every [`ModelStore`].
pub trait TableFixturesExt: ModelStore {
	/// Binds `table` of this store.
	fn fixtures<'a>(&'a self, table: &str, config: &'a FixtureConfig) -> TableFixtures<'a, Self> {
		TableFixtures::new(self, table, config)
	}
}

impl<S: ModelStore + ?Sized> TableFixturesExt for S {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::{MemoryStore, TableSchema};
	use rstest::rstest;
	use serde_json::json;
	use tempfile::tempdir;

	fn store() -> MemoryStore {
		let store = MemoryStore::new();
		store.create_table(
			TableSchema::new("authors")
				.column("name")
				.has_many("posts", "posts", "author_id"),
		);
		store.create_table(TableSchema::new("posts").column("author_id"));
		store.create("authors", [("name", json!("Ada"))]).unwrap();
		store.create("posts", [("author_id", json!(1))]).unwrap();
		store
	}

	#[rstest]
	fn test_bound_table_name() {
		let store = store();
		let config = FixtureConfig::default();
		assert_eq!(store.fixtures("authors", &config).table(), "authors");
	}

	#[rstest]
	fn test_export_does_not_write() {
		let dir = tempdir().unwrap();
		let config = FixtureConfig::new(dir.path());
		let store = store();

		let set = store
			.fixtures("authors", &config)
			.export(&ToFixtureOptions::new().with_include("posts"))
			.unwrap();

		assert!(set.contains("authors", "author_00001"));
		assert!(set.contains("posts", "post_00001"));
		assert!(!dir.path().join("test").exists());
	}

	#[rstest]
	fn test_to_fixture_and_skeleton() {
		let dir = tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join("test/fixtures")).unwrap();
		let config = FixtureConfig::new(dir.path());
		let store = store();

		let result = store
			.fixtures("authors", &config)
			.to_fixture(ToFixtureOptions::new())
			.unwrap();
		assert_eq!(result.files, vec![dir.path().join("test/fixtures/authors.yml")]);

		let path = store.fixtures("posts", &config).to_skeleton().unwrap();
		assert_eq!(path, dir.path().join("test/fixtures/posts.yml"));
	}

	#[rstest]
	fn test_dump_and_load_through_dyn_store() {
		let dir = tempdir().unwrap();
		let config = FixtureConfig::new(dir.path());
		let store = store();
		let dyn_store: &dyn ModelStore = &store;

		let dump = dyn_store
			.fixtures("authors", &config)
			.dump_to_file(Some(Path::new("authors.yml")), None)
			.unwrap();
		assert_eq!(dump.records_written, 1);

		let load = dyn_store
			.fixtures("authors", &config)
			.load_from_file(Some(Path::new("authors.yml")))
			.unwrap();
		assert_eq!(load.records_loaded, 1);
	}
}
