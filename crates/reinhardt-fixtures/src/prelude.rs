//! Convenience re-exports for common usage.
//!
//! ```
//! use reinhardt_fixtures::prelude::*;
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Configuration and templating
pub use crate::config::FixtureConfig;
pub use crate::template::TemplateExpander;

// Model access
pub use crate::record::{Association, Attributes, Record};
pub use crate::store::{AssociationKind, FindOptions, MemoryStore, ModelStore, TableSchema};

// Fixture types
pub use crate::fixtures::{
	FixtureExporter, FixtureParser, FixtureSerializer, FixtureSet, FixtureTable, fixture_name,
	join_fixture_name,
};
pub use crate::include::IncludeSpec;

// Command types
pub use crate::commands::{
	DumpDataCommand, DumpDataOptions, DumpResult, ExportResult, LoadDataCommand, LoadDataOptions,
	LoadResult, SkeletonCommand, SkeletonOptions, ToFixtureCommand, ToFixtureOptions,
};
pub use crate::table::{TableFixtures, TableFixturesExt};
