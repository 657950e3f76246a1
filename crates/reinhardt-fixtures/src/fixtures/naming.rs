//! Synthetic fixture entry names.
//!
//! Names must stay stable across exports so regenerated fixture files diff
//! cleanly: `{singular_table}_{id:05}` for records, `join_{index:05}` for
//! join table rows.

use crate::inflection::singularize;

/// Prefix of join table entry names.
pub const JOIN_PREFIX: &str = "join";

/// Returns the entry name of a record: singular table name and the
/// identifier zero-padded to five digits.
///
/// # Example
///
/// ```
/// # use reinhardt_fixtures::fixtures::fixture_name;
/// assert_eq!(fixture_name("authors", 7), "author_00007");
/// assert_eq!(fixture_name("categories", 123456), "category_123456");
/// ```
pub fn fixture_name(table: &str, id: i64) -> String {
	format!("{}_{:05}", singularize(table), id)
}

/// Returns the entry name of the join table row at `index`.
///
/// # Example
///
/// ```
/// # use reinhardt_fixtures::fixtures::join_fixture_name;
/// assert_eq!(join_fixture_name(2), "join_00002");
/// ```
pub fn join_fixture_name(index: usize) -> String {
	format!("{}_{:05}", JOIN_PREFIX, index)
}
