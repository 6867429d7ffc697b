//! `ordia-core` — shared table model for the Ordia pipelines.
//!
//! A `Table` is an ordered set of named columns over ordered rows of scalar
//! `Value`s. Loaders build tables, the engine consumes and produces them,
//! renderers only read them.

pub mod table;
pub mod value;

pub use table::Table;
pub use value::Value;
