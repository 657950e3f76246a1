//! Table-level fixture commands.
//!
//! - [`DumpDataCommand`] - write every row of a table to a YAML dump
//! - [`LoadDataCommand`] - replace a table's rows with the rows of a dump
//! - [`ToFixtureCommand`] - export records and their associations as test fixtures
//! - [`SkeletonCommand`] - write a blank fixture file listing a table's columns

pub mod dumpdata;
pub mod loaddata;
pub mod skeleton;
pub mod tofixture;

pub use dumpdata::{DumpDataCommand, DumpDataOptions, DumpResult};
pub use loaddata::{LoadDataCommand, LoadDataOptions, LoadResult};
pub use skeleton::{SkeletonCommand, SkeletonOptions};
pub use tofixture::{ExportResult, ToFixtureCommand, ToFixtureOptions};
