//! Records as seen by the fixture helpers.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};

/// Column name to value mapping of a single row.
///
/// A `BTreeMap` keeps the columns sorted, so serialized output is deterministic.
pub type Attributes = BTreeMap<String, Value>;

/// A row read from the model store.
///
/// `attributes` holds every column, including the primary key column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	table: String,
	id: i64,
	attributes: Attributes,
}

impl Record {
	/// Creates a record.
	pub fn new(table: impl Into<String>, id: i64, attributes: Attributes) -> Self {
		Self {
			table: table.into(),
			id,
			attributes,
		}
	}

	/// Builds a record from a raw row, reading the identifier from `primary_key`.
	///
	/// Integer and numeric string identifiers are accepted.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::record::{Attributes, Record};
	/// # use serde_json::json;
	/// let mut row = Attributes::new();
	/// row.insert("id".to_string(), json!("7"));
	/// let record = Record::from_attributes("authors", "id", row).unwrap();
	/// assert_eq!(record.id(), 7);
	/// ```
	pub fn from_attributes(
		table: impl Into<String>,
		primary_key: &str,
		attributes: Attributes,
	) -> FixtureResult<Self> {
		let table = table.into();
		let id = attributes
			.get(primary_key)
			.and_then(value_as_id)
			.ok_or_else(|| FixtureError::MissingPrimaryKey {
				table: table.clone(),
			})?;
		Ok(Self {
			table,
			id,
			attributes,
		})
	}

	/// Returns the table this record belongs to.
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Returns the record identifier.
	pub fn id(&self) -> i64 {
		self.id
	}

	/// Returns all column values.
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// Returns a single column value.
	pub fn get(&self, column: &str) -> Option<&Value> {
		self.attributes.get(column)
	}

	/// Sets a column value.
	pub fn set(&mut self, column: impl Into<String>, value: Value) {
		self.attributes.insert(column.into(), value);
	}

	/// Consumes the record, returning its attributes.
	pub fn into_attributes(self) -> Attributes {
		self.attributes
	}
}

/// Interprets a column value as a record identifier.
pub(crate) fn value_as_id(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

/// Result of resolving an association on a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Association {
	/// No associated record.
	#[default]
	None,
	/// A single associated record (belongs-to, has-one).
	One(Record),
	/// A collection of associated records (has-many, has-and-belongs-to-many).
	Many(Vec<Record>),
}

impl Association {
	/// Coerces the association into a collection.
	///
	/// A single record becomes a one-element collection; absent becomes empty.
	pub fn into_records(self) -> Vec<Record> {
		match self {
			Self::None => Vec::new(),
			Self::One(record) => vec![record],
			Self::Many(records) => records,
		}
	}

	/// Returns true when no record is associated.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::None => true,
			Self::One(_) => false,
			Self::Many(records) => records.is_empty(),
		}
	}
}

impl From<Option<Record>> for Association {
	fn from(record: Option<Record>) -> Self {
		record.map_or(Self::None, Self::One)
	}
}

impl From<Vec<Record>> for Association {
	fn from(records: Vec<Record>) -> Self {
		Self::Many(records)
	}
}
