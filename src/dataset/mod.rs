//! Dataset Loading
//!
//! Reads the case/death CSV once at startup against an explicit schema and
//! exposes the typed, read-only [`Dataset`].
//!
//! ## Components
//!
//! - [`Schema`]: Column name to type mapping validated at load time
//! - [`DatasetLoader`]: CSV reader producing a [`Dataset`] or a [`LoadError`]
//! - [`CaseRecord`]: One row of the source file

pub mod error;
pub mod loader;
pub mod schema;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::DatasetLoader;
pub use schema::{ColumnType, Schema, DATE_FORMAT};
pub use types::{CaseRecord, Dataset};
