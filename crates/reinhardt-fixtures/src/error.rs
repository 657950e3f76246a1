//! Error types for fixture operations.
//!
//! This module defines the error types used throughout the reinhardt-fixtures crate.

use thiserror::Error;

/// Errors that can occur while dumping, loading or exporting fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// The include specification has a shape other than name, sequence or mapping.
	#[error("Invalid include specification: {0}")]
	InvalidSpecification(String),

	/// Table is not known to the model store.
	#[error("Unknown table: {0}")]
	UnknownTable(String),

	/// Association is not defined on the given table.
	#[error("Unknown association '{association}' on table '{table}'")]
	UnknownAssociation {
		/// Table the association was looked up on.
		table: String,
		/// Requested association name.
		association: String,
	},

	/// A record is missing its primary key or carries a non-integer one.
	#[error("Missing or invalid primary key for table '{table}'")]
	MissingPrimaryKey {
		/// Table the record belongs to.
		table: String,
	},

	/// Decoded file content does not have the expected structure.
	#[error("Invalid fixture format: {0}")]
	InvalidFormat(String),

	/// Template expansion failed.
	#[error("Template error: {0}")]
	Template(#[from] tera::Error),

	/// YAML serialization/deserialization error.
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// JSON value conversion error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Configuration file could not be parsed.
	#[error("Configuration error: {0}")]
	Config(#[from] toml::de::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The storage backend rejected an operation.
	#[error("Storage error: {0}")]
	Storage(String),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
