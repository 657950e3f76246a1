//! Fixture sets, naming and the association-following exporter.
//!
//! A fixture set maps a table name to named entries, each entry holding the
//! full attribute mapping of one record:
//!
//! ```yaml
//! # test/fixtures/authors.yml
//! author_00007:
//!   id: 7
//!   name: Ada
//! ```

pub mod exporter;
pub mod naming;
pub mod parser;
pub mod serializer;
pub mod set;

pub use exporter::{FixtureExporter, export_join_table};
pub use naming::{fixture_name, join_fixture_name};
pub use parser::FixtureParser;
pub use serializer::FixtureSerializer;
pub use set::{FixtureSet, FixtureTable};
