// Filter Operator Implementation
//
// Schema-preserving row suppression: pulls from its child until the
// predicate holds, passing matching tuples through unchanged.

use crate::catalog::schema::Schema;
use crate::query::executor::result::{QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::expression::Expression;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

/// Filter executor: emits the child tuples its predicate accepts.
///
/// The output schema equals the child's schema. A predicate evaluating to
/// NULL (or anything other than boolean true) drops the row.
pub struct FilterExecutor {
    plan: PlanNodeRef,
    predicate: Expression,
    child: Box<dyn Executor>,
}

impl FilterExecutor {
    pub fn new(plan: PlanNodeRef, child: Box<dyn Executor>) -> QueryResult<Self> {
        let predicate = match plan.payload() {
            PlanPayload::Filter { predicate } => predicate.clone(),
            _ => {
                return Err(QueryError::ExecutionError(
                    "Filter executor requires a Filter plan node".to_string(),
                ));
            }
        };
        Ok(FilterExecutor {
            plan,
            predicate,
            child,
        })
    }
}

impl Executor for FilterExecutor {
    fn init(&mut self, trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.child.init(trace)
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        loop {
            let tuple = match self.child.next(trace.as_deref_mut())? {
                Some(tuple) => tuple,
                None => return Ok(None),
            };

            let value = self
                .predicate
                .evaluate(Some(&tuple), self.child.output_schema())?;
            if value.as_bool().unwrap_or(false) {
                if let Some(trace) = trace.as_deref_mut() {
                    trace.record_output(self.plan.id(), &tuple, self.plan.output_schema_ref());
                }
                return Ok(Some(tuple));
            }
        }
    }

    fn output_schema(&self) -> &Schema {
        self.plan.output_schema()
    }
}
