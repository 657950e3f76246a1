//! Fixture set container.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use super::naming::fixture_name;
use crate::record::{Attributes, Record};

/// Entries of a single fixture file: entry name to attributes.
pub type FixtureTable = BTreeMap<String, Attributes>;

/// Records collected for export, grouped by table.
///
/// Writing an entry that already exists replaces it, so the last write for a
/// name wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureSet {
	tables: BTreeMap<String, FixtureTable>,
}

impl FixtureSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `record` under its synthetic name, returning the attributes it replaced.
	pub fn insert_record(&mut self, record: &Record) -> Option<Attributes> {
		self.insert(
			record.table(),
			fixture_name(record.table(), record.id()),
			record.attributes().clone(),
		)
	}

	/// Adds an entry, returning the attributes it replaced.
	pub fn insert(
		&mut self,
		table: impl Into<String>,
		name: impl Into<String>,
		attributes: Attributes,
	) -> Option<Attributes> {
		self.tables
			.entry(table.into())
			.or_default()
			.insert(name.into(), attributes)
	}

	/// Returns the entries of `table`.
	pub fn table(&self, table: &str) -> Option<&FixtureTable> {
		self.tables.get(table)
	}

	/// Returns a single entry.
	pub fn get(&self, table: &str, name: &str) -> Option<&Attributes> {
		self.tables.get(table).and_then(|entries| entries.get(name))
	}

	/// Returns true if the entry exists.
	pub fn contains(&self, table: &str, name: &str) -> bool {
		self.get(table, name).is_some()
	}

	/// Returns the table names, sorted.
	pub fn table_names(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Returns the number of entries across all tables.
	pub fn len(&self) -> usize {
		self.tables.values().map(BTreeMap::len).sum()
	}

	/// Returns true if no entry has been collected.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Merges `other` into this set. Entries of `other` win on name collisions.
	pub fn merge(&mut self, other: FixtureSet) {
		for (table, entries) in other.tables {
			self.tables.entry(table).or_default().extend(entries);
		}
	}

	/// Returns an iterator over tables and their entries.
	pub fn iter(&self) -> btree_map::Iter<'_, String, FixtureTable> {
		self.tables.iter()
	}
}

impl IntoIterator for FixtureSet {
	type Item = (String, FixtureTable);
	type IntoIter = btree_map::IntoIter<String, FixtureTable>;

	fn into_iter(self) -> Self::IntoIter {
		self.tables.into_iter()
	}
}

impl<'a> IntoIterator for &'a FixtureSet {
	type Item = (&'a String, &'a FixtureTable);
	type IntoIter = btree_map::Iter<'a, String, FixtureTable>;

	fn into_iter(self) -> Self::IntoIter {
		self.tables.iter()
	}
}
