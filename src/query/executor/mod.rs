// Query Executor Module
//
// This module is responsible for executing query plans and producing
// results. It implements the iterator-based (Volcano) execution model:
// one executor per plan node, each pulling tuples from its children on
// demand.

pub mod engine;
pub mod operators;
pub mod result;
pub mod trace;
pub mod tuple;

use crate::catalog::schema::Schema;
use crate::query::executor::operators::filter::FilterExecutor;
use crate::query::executor::operators::limit::LimitExecutor;
use crate::query::executor::operators::mock_scan::MockScanExecutor;
use crate::query::executor::operators::projection::ProjectionExecutor;
use crate::query::executor::operators::sort::SortExecutor;
use crate::query::executor::operators::values::ValuesExecutor;
use crate::query::executor::result::{QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

pub use self::engine::ExecutionEngine;
pub use self::result::{DataValue, QueryResultSet};

/// The interface every query execution operator implements.
///
/// An executor moves through three states: it is created uninitialized,
/// `init` makes it ready, and the first `next` returning `None` makes it
/// exhausted. Exhaustion is terminal: further `next` calls keep returning
/// `None`. Calling `next` before `init` is a programming error and is not
/// guarded.
///
/// The optional trace context is threaded through every call; operators
/// that surface a tuple record it against their own plan-node identity
/// before returning it.
pub trait Executor: Send {
    /// Prepare the operator to produce rows. Initializes children first;
    /// may do eager work (sort drains its whole child here).
    fn init(&mut self, trace: Option<&mut TraceContext>) -> QueryResult<()>;

    /// Produce the next output tuple, or `None` once exhausted.
    /// Expression evaluation failures propagate uncaught.
    fn next(&mut self, trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>>;

    /// The schema the returned tuples are typed under; always the owning
    /// plan node's output schema.
    fn output_schema(&self) -> &Schema;
}

/// Build the executor tree matching a plan tree.
///
/// The correspondence is structural and one-to-one: the executor built
/// for node N's i-th child is the i-th child of N's executor. Trace
/// correlation by plan-node identity depends on this.
pub fn build_executor(plan: &PlanNodeRef) -> QueryResult<Box<dyn Executor>> {
    log::trace!(
        "building {} executor for plan node {}",
        plan.node_name(),
        plan.id()
    );
    match plan.payload() {
        PlanPayload::Filter { .. } => {
            let child = build_executor(plan.child_at(0))?;
            Ok(Box::new(FilterExecutor::new(plan.clone(), child)?))
        }
        PlanPayload::Projection { .. } => {
            let child = build_executor(plan.child_at(0))?;
            Ok(Box::new(ProjectionExecutor::new(plan.clone(), child)?))
        }
        PlanPayload::Sort { .. } => {
            let child = build_executor(plan.child_at(0))?;
            Ok(Box::new(SortExecutor::new(plan.clone(), child)?))
        }
        PlanPayload::Limit { .. } => {
            let child = build_executor(plan.child_at(0))?;
            Ok(Box::new(LimitExecutor::new(plan.clone(), child)?))
        }
        PlanPayload::Values { .. } => Ok(Box::new(ValuesExecutor::new(plan.clone())?)),
        PlanPayload::MockScan { .. } => Ok(Box::new(MockScanExecutor::new(plan.clone())?)),
        _ => Err(QueryError::ExecutionError(format!(
            "No executor implemented for {} plan nodes",
            plan.node_name()
        ))),
    }
}
