//! YAML table dumps, reloads and test fixture export for Reinhardt models.
//!
//! This crate moves model data between a store and YAML files:
//!
//! - **Table dumps**: write every row of a table to `db/<table>.yml` and
//!   load it back, keeping identifiers and the inheritance column
//! - **Fixture export**: write selected rows, plus the records reachable
//!   through an include specification, to `test/fixtures/<table>.yml`
//! - **Join tables**: export has-and-belongs-to-many join rows as
//!   `join_00000`, `join_00001`, ...
//! - **Skeletons**: write a fixture file holding two blank entries
//!
//! # Quick Start
//!
//! ```
//! use reinhardt_fixtures::prelude::*;
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! store.create_table(TableSchema::new("authors").column("name").has_many("posts", "posts", "author_id"));
//! store.create_table(TableSchema::new("posts").column("title").column("author_id"));
//! store.create_table(TableSchema::new("comments").column("post_id"));
//! let ada = store.create("authors", [("name", json!("Ada"))]).unwrap();
//! store.create("posts", [("title", json!("Notes")), ("author_id", json!(ada.id()))]).unwrap();
//!
//! let config = FixtureConfig::new("/srv/blog");
//! let set = store
//! 	.fixtures("authors", &config)
//! 	.export(&ToFixtureOptions::new().with_include("posts"))
//! 	.unwrap();
//!
//! assert!(set.contains("authors", "author_00001"));
//! assert!(set.contains("posts", "post_00001"));
//! ```
//!
//! # Include Specifications
//!
//! An [`IncludeSpec`] names the associations to follow from each exported
//! record. It is parsed from YAML or JSON:
//!
//! - `posts` follows one association
//! - `[posts, books]` follows each association from the same records
//! - `{posts: comments}` follows `posts`, then `comments` from every post
//!
//! # Architecture
//!
//! - [`ModelStore`](store::ModelStore) - the narrow model access contract
//! - [`MemoryStore`](store::MemoryStore) - in-memory store with associations
//! - [`FixtureExporter`](fixtures::FixtureExporter) - association traversal
//! - [`FixtureParser`](fixtures::FixtureParser) - template expansion and YAML decoding
//! - [`FixtureSerializer`](fixtures::FixtureSerializer) - sorted YAML output
//! - [`commands`] - dumpdata, loaddata, to_fixture and skeleton
//! - [`TableFixtures`](table::TableFixtures) - the same operations bound to one table

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod include;
pub mod inflection;
pub mod prelude;
pub mod record;
pub mod store;
pub mod table;
pub mod template;

// Re-export commonly used types at crate root
pub use config::FixtureConfig;
pub use error::{FixtureError, FixtureResult};
pub use fixtures::{FixtureExporter, FixtureSet, FixtureTable};
pub use include::IncludeSpec;
pub use record::{Association, Attributes, Record};
pub use store::{FindOptions, MemoryStore, ModelStore};
pub use table::{TableFixtures, TableFixturesExt};
