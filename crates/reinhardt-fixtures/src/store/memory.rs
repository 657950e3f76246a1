//! In-memory model store.
//!
//! Tables are declared with a [`TableSchema`] that lists columns, the
//! primary key, the inheritance column and named associations. Join tables
//! backing has-and-belongs-to-many associations are raw row lists without
//! identity.
//!
//! # Example
//!
//! ```
//! use reinhardt_fixtures::store::{MemoryStore, ModelStore, TableSchema};
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! store.create_table(TableSchema::new("authors").column("name").has_many("posts", "posts", "author_id"));
//! store.create_table(TableSchema::new("posts").column("title").column("author_id"));
//!
//! let author = store.create("authors", [("name", json!("Ada"))]).unwrap();
//! store.create("posts", [("title", json!("Notes")), ("author_id", json!(author.id()))]).unwrap();
//!
//! let posts = store.resolve_association(&author, "posts").unwrap().into_records();
//! assert_eq!(posts.len(), 1);
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use super::{DEFAULT_INHERITANCE_COLUMN, DEFAULT_PRIMARY_KEY, FindOptions, ModelStore};
use crate::error::{FixtureError, FixtureResult};
use crate::record::{Association, Attributes, Record, value_as_id};

/// How an association connects two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationKind {
	/// This table holds `foreign_key` pointing at a row of `target`.
	BelongsTo {
		/// Referenced table.
		target: String,
		/// Column on this table holding the referenced identifier.
		foreign_key: String,
	},

	/// One row of `target` holds `foreign_key` pointing at this row.
	HasOne {
		/// Referencing table.
		target: String,
		/// Column on `target` holding this row's identifier.
		foreign_key: String,
	},

	/// Rows of `target` hold `foreign_key` pointing at this row.
	HasMany {
		/// Referencing table.
		target: String,
		/// Column on `target` holding this row's identifier.
		foreign_key: String,
	},

	/// Rows of `join_table` pair this row with rows of `target`.
	HasAndBelongsToMany {
		/// Associated table.
		target: String,
		/// Join table name.
		join_table: String,
		/// Join table column holding this row's identifier.
		foreign_key: String,
		/// Join table column holding the associated row's identifier.
		association_foreign_key: String,
	},
}

/// Table declaration for [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
	name: String,
	primary_key: String,
	inheritance_column: String,
	columns: IndexMap<String, Value>,
	associations: IndexMap<String, AssociationKind>,
}

impl TableSchema {
	/// Creates a schema with an `id` primary key and a `type` inheritance column.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			primary_key: DEFAULT_PRIMARY_KEY.to_string(),
			inheritance_column: DEFAULT_INHERITANCE_COLUMN.to_string(),
			columns: IndexMap::new(),
			associations: IndexMap::new(),
		}
	}

	/// Sets the primary key column.
	pub fn primary_key(mut self, column: impl Into<String>) -> Self {
		self.primary_key = column.into();
		self
	}

	/// Sets the inheritance discriminator column.
	pub fn inheritance_column(mut self, column: impl Into<String>) -> Self {
		self.inheritance_column = column.into();
		self
	}

	/// Adds a nullable column without a default.
	pub fn column(self, name: impl Into<String>) -> Self {
		self.column_with_default(name, Value::Null)
	}

	/// Adds a column with a default value.
	pub fn column_with_default(mut self, name: impl Into<String>, default: Value) -> Self {
		self.columns.insert(name.into(), default);
		self
	}

	/// Declares a belongs-to association.
	pub fn belongs_to(
		self,
		name: impl Into<String>,
		target: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		self.association(
			name,
			AssociationKind::BelongsTo {
				target: target.into(),
				foreign_key: foreign_key.into(),
			},
		)
	}

	/// Declares a has-one association.
	pub fn has_one(
		self,
		name: impl Into<String>,
		target: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		self.association(
			name,
			AssociationKind::HasOne {
				target: target.into(),
				foreign_key: foreign_key.into(),
			},
		)
	}

	/// Declares a has-many association.
	pub fn has_many(
		self,
		name: impl Into<String>,
		target: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		self.association(
			name,
			AssociationKind::HasMany {
				target: target.into(),
				foreign_key: foreign_key.into(),
			},
		)
	}

	/// Declares a has-and-belongs-to-many association through `join_table`.
	pub fn has_and_belongs_to_many(
		self,
		name: impl Into<String>,
		target: impl Into<String>,
		join_table: impl Into<String>,
		foreign_key: impl Into<String>,
		association_foreign_key: impl Into<String>,
	) -> Self {
		self.association(
			name,
			AssociationKind::HasAndBelongsToMany {
				target: target.into(),
				join_table: join_table.into(),
				foreign_key: foreign_key.into(),
				association_foreign_key: association_foreign_key.into(),
			},
		)
	}

	/// Declares an association of any kind.
	pub fn association(mut self, name: impl Into<String>, kind: AssociationKind) -> Self {
		self.associations.insert(name.into(), kind);
		self
	}

	/// Returns the table name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the declared associations.
	pub fn associations(&self) -> &IndexMap<String, AssociationKind> {
		&self.associations
	}

	/// Attributes of a new record: every declared column with its default,
	/// excluding the primary key.
	fn blank_attributes(&self) -> Attributes {
		self.columns
			.iter()
			.filter(|(name, _)| **name != self.primary_key)
			.map(|(name, default)| (name.clone(), default.clone()))
			.collect()
	}
}

#[derive(Debug)]
struct ModelTable {
	schema: TableSchema,
	rows: BTreeMap<i64, Attributes>,
	next_id: i64,
}

impl ModelTable {
	fn record(&self, id: i64, attributes: &Attributes) -> Record {
		Record::new(self.schema.name.clone(), id, attributes.clone())
	}
}

#[derive(Debug, Default)]
struct State {
	tables: BTreeMap<String, ModelTable>,
	join_tables: BTreeMap<String, Vec<Attributes>>,
}

impl State {
	fn table(&self, name: &str) -> FixtureResult<&ModelTable> {
		self.tables
			.get(name)
			.ok_or_else(|| FixtureError::UnknownTable(name.to_string()))
	}

	fn table_mut(&mut self, name: &str) -> FixtureResult<&mut ModelTable> {
		self.tables
			.get_mut(name)
			.ok_or_else(|| FixtureError::UnknownTable(name.to_string()))
	}
}

/// Model store keeping every table in memory.
#[derive(Debug)]
pub struct MemoryStore {
	state: RwLock<State>,
	sequence_reset: bool,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			state: RwLock::new(State::default()),
			sequence_reset: true,
		}
	}

	/// Disables identifier sequence resets, as on backends without sequences.
	pub fn without_sequence_reset(mut self) -> Self {
		self.sequence_reset = false;
		self
	}

	/// Declares a table. Join tables of its has-and-belongs-to-many
	/// associations are created as well.
	///
	/// Declaring an existing table replaces its schema and keeps its rows.
	pub fn create_table(&self, schema: TableSchema) {
		let mut state = self.state.write();
		for kind in schema.associations.values() {
			if let AssociationKind::HasAndBelongsToMany { join_table, .. } = kind {
				state.join_tables.entry(join_table.clone()).or_default();
			}
		}
		match state.tables.get_mut(&schema.name) {
			Some(table) => table.schema = schema,
			None => {
				state.tables.insert(
					schema.name.clone(),
					ModelTable {
						schema,
						rows: BTreeMap::new(),
						next_id: 1,
					},
				);
			}
		}
	}

	/// Declares a raw join table.
	pub fn create_join_table(&self, name: impl Into<String>) {
		self.state.write().join_tables.entry(name.into()).or_default();
	}

	/// Creates a record with the next identifier of `table`.
	///
	/// Columns not given take their declared default.
	pub fn create<I, K>(&self, table: &str, values: I) -> FixtureResult<Record>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut state = self.state.write();
		let table = state.table_mut(table)?;

		let id = table.next_id;
		table.next_id = identifier_after(&table.schema.name, id)?;

		let mut attributes = table.schema.blank_attributes();
		attributes.extend(values.into_iter().map(|(k, v)| (k.into(), v)));
		attributes.insert(table.schema.primary_key.clone(), Value::from(id));

		let record = table.record(id, &attributes);
		table.rows.insert(id, attributes);
		Ok(record)
	}

	/// Appends a row to a join table.
	pub fn insert_join_row<I, K>(&self, join_table: &str, values: I) -> FixtureResult<()>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let mut state = self.state.write();
		let rows = state
			.join_tables
			.get_mut(join_table)
			.ok_or_else(|| FixtureError::UnknownTable(join_table.to_string()))?;
		rows.push(values.into_iter().map(|(k, v)| (k.into(), v)).collect());
		Ok(())
	}

	/// Returns the number of rows in a model or join table.
	pub fn count(&self, table: &str) -> FixtureResult<usize> {
		let state = self.state.read();
		if let Some(rows) = state.join_tables.get(table) {
			return Ok(rows.len());
		}
		Ok(state.table(table)?.rows.len())
	}

	/// Returns the identifier the next [`MemoryStore::create`] call will use.
	pub fn next_id(&self, table: &str) -> FixtureResult<i64> {
		Ok(self.state.read().table(table)?.next_id)
	}

	/// Returns a single record by identifier.
	pub fn find(&self, table: &str, id: i64) -> FixtureResult<Option<Record>> {
		let state = self.state.read();
		let table = state.table(table)?;
		Ok(table.rows.get(&id).map(|attributes| table.record(id, attributes)))
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

fn identifier_after(table: &str, id: i64) -> FixtureResult<i64> {
	id.checked_add(1).ok_or_else(|| {
		FixtureError::Storage(format!("identifier sequence of table '{}' is exhausted", table))
	})
}

fn references(attributes: &Attributes, column: &str, id: i64) -> bool {
	attributes.get(column).and_then(value_as_id) == Some(id)
}

impl ModelStore for MemoryStore {
	fn primary_key(&self, table: &str) -> FixtureResult<String> {
		Ok(self.state.read().table(table)?.schema.primary_key.clone())
	}

	fn inheritance_column(&self, table: &str) -> FixtureResult<String> {
		Ok(self.state.read().table(table)?.schema.inheritance_column.clone())
	}

	fn find_all(&self, table: &str, options: &FindOptions) -> FixtureResult<Vec<Record>> {
		let state = self.state.read();
		let table = state.table(table)?;
		Ok(table
			.rows
			.iter()
			.filter(|(_, attributes)| options.matches(attributes))
			.take(options.limit.unwrap_or(usize::MAX))
			.map(|(id, attributes)| table.record(*id, attributes))
			.collect())
	}

	fn resolve_association(&self, record: &Record, name: &str) -> FixtureResult<Association> {
		let state = self.state.read();
		let owner = state.table(record.table())?;
		let kind = owner.schema.associations.get(name).ok_or_else(|| {
			FixtureError::UnknownAssociation {
				table: record.table().to_string(),
				association: name.to_string(),
			}
		})?;

		match kind {
			AssociationKind::BelongsTo {
				target,
				foreign_key,
			} => {
				let target = state.table(target)?;
				let found = record
					.get(foreign_key)
					.and_then(value_as_id)
					.and_then(|id| target.rows.get(&id).map(|row| target.record(id, row)));
				Ok(found.into())
			}
			AssociationKind::HasOne {
				target,
				foreign_key,
			} => {
				let target = state.table(target)?;
				let found = target
					.rows
					.iter()
					.find(|(_, row)| references(row, foreign_key, record.id()))
					.map(|(id, row)| target.record(*id, row));
				Ok(found.into())
			}
			AssociationKind::HasMany {
				target,
				foreign_key,
			} => {
				let target = state.table(target)?;
				Ok(Association::Many(
					target
						.rows
						.iter()
						.filter(|(_, row)| references(row, foreign_key, record.id()))
						.map(|(id, row)| target.record(*id, row))
						.collect(),
				))
			}
			AssociationKind::HasAndBelongsToMany {
				target,
				join_table,
				foreign_key,
				association_foreign_key,
			} => {
				let target = state.table(target)?;
				let join_rows = state
					.join_tables
					.get(join_table)
					.ok_or_else(|| FixtureError::UnknownTable(join_table.clone()))?;
				Ok(Association::Many(
					join_rows
						.iter()
						.filter(|row| references(row, foreign_key, record.id()))
						.filter_map(|row| row.get(association_foreign_key).and_then(value_as_id))
						.filter_map(|id| target.rows.get(&id).map(|row| target.record(id, row)))
						.collect(),
				))
			}
		}
	}

	fn join_tables(&self, table: &str) -> FixtureResult<Vec<String>> {
		let state = self.state.read();
		let mut names: Vec<String> = Vec::new();
		for kind in state.table(table)?.schema.associations.values() {
			if let AssociationKind::HasAndBelongsToMany { join_table, .. } = kind
				&& !names.contains(join_table)
			{
				names.push(join_table.clone());
			}
		}
		Ok(names)
	}

	fn select_all(&self, table: &str) -> FixtureResult<Vec<Attributes>> {
		let state = self.state.read();
		if let Some(rows) = state.join_tables.get(table) {
			return Ok(rows.clone());
		}
		Ok(state.table(table)?.rows.values().cloned().collect())
	}

	fn blank_attributes(&self, table: &str) -> FixtureResult<Attributes> {
		Ok(self.state.read().table(table)?.schema.blank_attributes())
	}

	fn destroy_all(&self, table: &str) -> FixtureResult<usize> {
		let mut state = self.state.write();
		let table = state.table_mut(table)?;
		let removed = table.rows.len();
		table.rows.clear();
		Ok(removed)
	}

	fn insert(&self, record: Record) -> FixtureResult<()> {
		let mut state = self.state.write();
		let table = state.table_mut(record.table())?;
		let id = record.id();
		if table.rows.contains_key(&id) {
			return Err(FixtureError::Storage(format!(
				"duplicate key {} in table '{}'",
				id,
				record.table()
			)));
		}

		let mut attributes = table.schema.blank_attributes();
		attributes.extend(record.into_attributes());
		attributes.insert(table.schema.primary_key.clone(), Value::from(id));
		table.rows.insert(id, attributes);
		Ok(())
	}

	fn supports_sequence_reset(&self) -> bool {
		self.sequence_reset
	}

	fn reset_pk_sequence(&self, table: &str) -> FixtureResult<()> {
		if !self.sequence_reset {
			return Err(FixtureError::Storage(format!(
				"table '{}' has no identifier sequence",
				table
			)));
		}
		let mut state = self.state.write();
		let table = state.table_mut(table)?;
		table.next_id = match table.rows.keys().next_back() {
			Some(&max) => identifier_after(&table.schema.name, max)?,
			None => 1,
		};
		Ok(())
	}
}
