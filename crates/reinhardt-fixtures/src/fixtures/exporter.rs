//! Collects root records and their associated records into a [`FixtureSet`].

use super::naming::join_fixture_name;
use super::set::{FixtureSet, FixtureTable};
use crate::error::FixtureResult;
use crate::include::IncludeSpec;
use crate::record::{Attributes, Record};
use crate::store::ModelStore;

/// Builds fixture sets by walking associations through a [`ModelStore`].
///
/// # Example
///
/// ```
/// use reinhardt_fixtures::fixtures::FixtureExporter;
/// use reinhardt_fixtures::include::IncludeSpec;
/// use reinhardt_fixtures::store::{FindOptions, MemoryStore, ModelStore, TableSchema};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// store.create_table(TableSchema::new("authors").has_many("posts", "posts", "author_id"));
/// store.create_table(TableSchema::new("posts").column("author_id"));
/// let author = store.create("authors", [("name", json!("Ada"))]).unwrap();
/// store.create("posts", [("author_id", json!(author.id()))]).unwrap();
///
/// let exporter = FixtureExporter::new(&store);
/// let roots = store.find_all("authors", &FindOptions::new()).unwrap();
/// let set = exporter.export(&roots, Some(&IncludeSpec::leaf("posts"))).unwrap();
/// assert!(set.contains("authors", "author_00001"));
/// assert!(set.contains("posts", "post_00001"));
/// ```
#[derive(Debug, Clone)]
pub struct FixtureExporter<S> {
	store: S,
}

impl<S: ModelStore> FixtureExporter<S> {
	/// Creates an exporter reading from `store`.
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// Returns the underlying store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// Collects `roots` and, when `includes` is given, every record reachable
	/// through it.
	pub fn export(
		&self,
		roots: &[Record],
		includes: Option<&IncludeSpec>,
	) -> FixtureResult<FixtureSet> {
		let mut out = FixtureSet::new();
		for record in roots {
			out.insert_record(record);
			if let Some(spec) = includes {
				self.traverse(std::slice::from_ref(record), spec, &mut out)?;
			}
		}
		Ok(out)
	}

	/// Applies `spec` starting from `records`, adding every reached record to `out`.
	///
	/// - [`IncludeSpec::Sequence`]: each element starts from the same records.
	/// - [`IncludeSpec::FollowThen`]: the association is resolved on every
	///   record, the resolved records are added, and `nested` starts from them.
	/// - [`IncludeSpec::Leaf`]: the association is resolved on every record
	///   and the resolved records are added.
	///
	/// An empty starting set is a no-op, so missing associations end a branch
	/// without error.
	pub fn traverse(
		&self,
		records: &[Record],
		spec: &IncludeSpec,
		out: &mut FixtureSet,
	) -> FixtureResult<()> {
		if records.is_empty() {
			return Ok(());
		}

		match spec {
			IncludeSpec::Sequence(specs) => {
				for spec in specs {
					self.traverse(records, spec, out)?;
				}
			}
			IncludeSpec::FollowThen {
				association,
				nested,
			} => {
				let followed = self.resolve_all(records, association)?;
				for record in &followed {
					out.insert_record(record);
				}
				self.traverse(&followed, nested, out)?;
			}
			IncludeSpec::Leaf(association) => {
				for record in self.resolve_all(records, association)? {
					out.insert_record(&record);
				}
			}
		}
		Ok(())
	}

	/// Applies `spec` starting from a single optional record.
	pub fn traverse_record(
		&self,
		record: Option<&Record>,
		spec: &IncludeSpec,
		out: &mut FixtureSet,
	) -> FixtureResult<()> {
		match record {
			Some(record) => self.traverse(std::slice::from_ref(record), spec, out),
			None => Ok(()),
		}
	}

	/// Reads every has-and-belongs-to-many join table of `table`.
	///
	/// Returns `(join_table, entries)` pairs in association declaration order.
	pub fn export_join_tables(&self, table: &str) -> FixtureResult<Vec<(String, FixtureTable)>> {
		self.store
			.join_tables(table)?
			.into_iter()
			.map(|join_table| -> FixtureResult<(String, FixtureTable)> {
				let rows = self.store.select_all(&join_table)?;
				Ok((join_table, export_join_table(rows)))
			})
			.collect()
	}

	fn resolve_all(&self, records: &[Record], association: &str) -> FixtureResult<Vec<Record>> {
		let mut resolved = Vec::new();
		for record in records {
			resolved.extend(
				self.store
					.resolve_association(record, association)?
					.into_records(),
			);
		}
		tracing::debug!(
			association,
			from = records.len(),
			resolved = resolved.len(),
			"resolved association"
		);
		Ok(resolved)
	}
}

/// Names join table rows `join_00000`, `join_00001`, ... in row order.
pub fn export_join_table(rows: impl IntoIterator<Item = Attributes>) -> FixtureTable {
	rows.into_iter()
		.enumerate()
		.map(|(index, row)| (join_fixture_name(index), row))
		.collect()
}
