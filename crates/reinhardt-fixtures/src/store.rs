//! Storage contract consumed by the fixture helpers.
//!
//! The helpers never talk to a database directly. Everything they need from
//! the ORM layer goes through [`ModelStore`]: finding rows, resolving
//! associations by name, reflecting join tables and bulk replacing a
//! table's contents.
//!
//! [`MemoryStore`](memory::MemoryStore) is a complete in-memory implementation.

pub mod memory;

use crate::error::FixtureResult;
use crate::record::{Association, Attributes, Record};

pub use memory::{AssociationKind, MemoryStore, TableSchema};

/// Default primary key column.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Default single table inheritance discriminator column.
pub const DEFAULT_INHERITANCE_COLUMN: &str = "type";

/// Row selection for [`ModelStore::find_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
	/// Maximum number of rows to return.
	pub limit: Option<usize>,

	/// Column equality conditions. All must match.
	pub conditions: Attributes,
}

impl FindOptions {
	/// Creates options selecting every row.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the row limit.
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Adds an equality condition.
	pub fn with_condition(mut self, column: impl Into<String>, value: serde_json::Value) -> Self {
		self.conditions.insert(column.into(), value);
		self
	}

	/// Returns true if `attributes` satisfies every condition.
	pub fn matches(&self, attributes: &Attributes) -> bool {
		self.conditions
			.iter()
			.all(|(column, expected)| attributes.get(column) == Some(expected))
	}
}

/// Storage operations required by the dump, load and export helpers.
///
/// Methods take `&self`; implementations that mutate state use interior
/// mutability.
pub trait ModelStore {
	/// Returns the primary key column of `table`.
	fn primary_key(&self, _table: &str) -> FixtureResult<String> {
		Ok(DEFAULT_PRIMARY_KEY.to_string())
	}

	/// Returns the single table inheritance discriminator column of `table`.
	fn inheritance_column(&self, _table: &str) -> FixtureResult<String> {
		Ok(DEFAULT_INHERITANCE_COLUMN.to_string())
	}

	/// Returns rows of `table` matching `options`, in identifier order.
	fn find_all(&self, table: &str, options: &FindOptions) -> FixtureResult<Vec<Record>>;

	/// Resolves the association `name` of `record`.
	fn resolve_association(&self, record: &Record, name: &str) -> FixtureResult<Association>;

	/// Returns the join tables of every has-and-belongs-to-many association of `table`.
	fn join_tables(&self, table: &str) -> FixtureResult<Vec<String>>;

	/// Reads every row of a raw table, in insertion order.
	fn select_all(&self, table: &str) -> FixtureResult<Vec<Attributes>>;

	/// Returns the attributes of a new, unsaved record of `table`.
	fn blank_attributes(&self, table: &str) -> FixtureResult<Attributes>;

	/// Removes every row of `table`, returning how many were removed.
	fn destroy_all(&self, table: &str) -> FixtureResult<usize>;

	/// Inserts `record`, keeping its identifier.
	fn insert(&self, record: Record) -> FixtureResult<()>;

	/// Returns true if [`ModelStore::reset_pk_sequence`] is supported.
	fn supports_sequence_reset(&self) -> bool {
		false
	}

	/// Resets the identifier sequence of `table` to follow its highest identifier.
	fn reset_pk_sequence(&self, _table: &str) -> FixtureResult<()> {
		Ok(())
	}
}

impl<S: ModelStore + ?Sized> ModelStore for &S {
	fn primary_key(&self, table: &str) -> FixtureResult<String> {
		(**self).primary_key(table)
	}

	fn inheritance_column(&self, table: &str) -> FixtureResult<String> {
		(**self).inheritance_column(table)
	}

	fn find_all(&self, table: &str, options: &FindOptions) -> FixtureResult<Vec<Record>> {
		(**self).find_all(table, options)
	}

	fn resolve_association(&self, record: &Record, name: &str) -> FixtureResult<Association> {
		(**self).resolve_association(record, name)
	}

	fn join_tables(&self, table: &str) -> FixtureResult<Vec<String>> {
		(**self).join_tables(table)
	}

	fn select_all(&self, table: &str) -> FixtureResult<Vec<Attributes>> {
		(**self).select_all(table)
	}

	fn blank_attributes(&self, table: &str) -> FixtureResult<Attributes> {
		(**self).blank_attributes(table)
	}

	fn destroy_all(&self, table: &str) -> FixtureResult<usize> {
		(**self).destroy_all(table)
	}

	fn insert(&self, record: Record) -> FixtureResult<()> {
		(**self).insert(record)
	}

	fn supports_sequence_reset(&self) -> bool {
		(**self).supports_sequence_reset()
	}

	fn reset_pk_sequence(&self, table: &str) -> FixtureResult<()> {
		(**self).reset_pk_sequence(table)
	}
}
