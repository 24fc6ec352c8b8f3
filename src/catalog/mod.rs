// Catalog Module
//
// Schema and column definitions consumed by the planner and the executors.
// Table and index management live outside this crate; only the tuple-shape
// contract is defined here.

pub mod column;
pub mod schema;

pub use column::Column;
pub use schema::{DataType, Schema, SchemaRef};
