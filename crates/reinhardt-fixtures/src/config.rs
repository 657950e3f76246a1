//! Fixture path configuration.
//!
//! Every operation resolves its default file location from a [`FixtureConfig`]
//! passed in by the caller. Nothing is read from ambient process state.
//!
//! # Example
//!
//! ```toml
//! # fixtures.toml
//! project_root = "/srv/blog"
//! fixtures_dir = "test/fixtures"
//! data_dir = "db"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FixtureResult;

/// Default directory for generated test fixtures, relative to the project root.
pub const DEFAULT_FIXTURES_DIR: &str = "test/fixtures";

/// Default directory for full table dumps, relative to the project root.
pub const DEFAULT_DATA_DIR: &str = "db";

/// File extension used for every fixture and dump file.
pub const FIXTURE_EXTENSION: &str = "yml";

/// Locations used to build default fixture and dump paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
	/// Base directory that relative paths are expanded against.
	pub project_root: PathBuf,

	/// Directory for test fixtures (`to_fixture`, `to_skeleton`).
	pub fixtures_dir: PathBuf,

	/// Directory for full table dumps (`dump_to_file`, `load_from_file`).
	pub data_dir: PathBuf,
}

impl FixtureConfig {
	/// Creates a configuration rooted at `project_root` with default directories.
	pub fn new(project_root: impl Into<PathBuf>) -> Self {
		Self {
			project_root: project_root.into(),
			..Self::default()
		}
	}

	/// Sets the fixtures directory.
	pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.fixtures_dir = dir.into();
		self
	}

	/// Sets the data directory.
	pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.data_dir = dir.into();
		self
	}

	/// Parses a configuration from TOML. Missing keys fall back to defaults.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::config::FixtureConfig;
	/// let config = FixtureConfig::from_toml_str(r#"project_root = "/app""#).unwrap();
	/// assert_eq!(
	///     config.fixture_path("authors"),
	///     std::path::PathBuf::from("/app/test/fixtures/authors.yml")
	/// );
	/// ```
	pub fn from_toml_str(content: &str) -> FixtureResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Reads a TOML configuration file.
	///
	/// A relative `project_root` inside the file is taken relative to the
	/// directory containing the file.
	pub fn from_file(path: &Path) -> FixtureResult<Self> {
		let content = std::fs::read_to_string(path)?;
		let mut config = Self::from_toml_str(&content)?;
		if config.project_root.is_relative()
			&& let Some(parent) = path.parent()
		{
			config.project_root = parent.join(&config.project_root);
		}
		Ok(config)
	}

	/// Expands `path` against the project root. Absolute paths are returned unchanged.
	pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
		self.project_root.join(path)
	}

	/// Default test fixture path for `table`: `<root>/<fixtures_dir>/<table>.yml`.
	pub fn fixture_path(&self, table: &str) -> PathBuf {
		self.resolve(&self.fixtures_dir)
			.join(format!("{}.{}", table, FIXTURE_EXTENSION))
	}

	/// Default dump path for `table`: `<root>/<data_dir>/<table>.yml`.
	pub fn data_path(&self, table: &str) -> PathBuf {
		self.resolve(&self.data_dir)
			.join(format!("{}.{}", table, FIXTURE_EXTENSION))
	}
}

impl Default for FixtureConfig {
	fn default() -> Self {
		Self {
			project_root: PathBuf::from("."),
			fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
			data_dir: PathBuf::from(DEFAULT_DATA_DIR),
		}
	}
}
