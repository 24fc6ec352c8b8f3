// Karst Database Engine

pub mod catalog;
pub mod common;
pub mod query;

// Re-export key items for convenient access
pub use catalog::{Column, DataType, Schema, SchemaRef};
pub use common::types::Rid;
pub use query::executor::engine::ExecutionEngine;
pub use query::executor::result::{DataValue, QueryError, QueryResult, QueryResultSet};
pub use query::executor::trace::TraceContext;
pub use query::executor::tuple::Tuple;
pub use query::executor::Executor;
pub use query::planner::plan_node::{PlanNode, PlanNodeIdAllocator, PlanNodeRef};
