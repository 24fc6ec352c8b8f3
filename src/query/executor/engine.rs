// Query Execution Engine Implementation
//
// Drives a plan to exhaustion: builds the matching executor tree,
// initializes it top-down and pulls the root until the stream ends.

use crate::query::executor::result::{QueryResult, QueryResultSet};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::build_executor;
use crate::query::planner::plan_node::PlanNodeRef;

/// Statement-runner seam: executes one plan per call.
///
/// Callers that want an execution trace create a TraceContext, enable
/// recording and pass it in; the same context instance must be used for
/// the whole request and discarded afterwards.
#[derive(Debug, Default)]
pub struct ExecutionEngine;

impl ExecutionEngine {
    pub fn new() -> Self {
        ExecutionEngine
    }

    /// Build, initialize and drain the executor tree for `plan`.
    pub fn execute_plan(
        &self,
        plan: &PlanNodeRef,
        mut trace: Option<&mut TraceContext>,
    ) -> QueryResult<QueryResultSet> {
        log::debug!(
            "executing plan rooted at {} node {}",
            plan.node_name(),
            plan.id()
        );

        let mut root = build_executor(plan)?;
        root.init(trace.as_deref_mut())?;

        let mut result = QueryResultSet::new(plan.output_schema());
        while let Some(tuple) = root.next(trace.as_deref_mut())? {
            result.add_row(tuple);
        }

        log::debug!("plan node {} produced {} rows", plan.id(), result.row_count());
        Ok(result)
    }
}
