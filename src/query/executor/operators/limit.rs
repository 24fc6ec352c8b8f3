// Limit Operator Implementation
//
// Passes through at most `limit` child tuples, then reports exhaustion
// without pulling the child further.

use crate::catalog::schema::Schema;
use crate::query::executor::result::{QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

pub struct LimitExecutor {
    plan: PlanNodeRef,
    limit: usize,
    child: Box<dyn Executor>,
    emitted: usize,
}

impl LimitExecutor {
    pub fn new(plan: PlanNodeRef, child: Box<dyn Executor>) -> QueryResult<Self> {
        let limit = match plan.payload() {
            PlanPayload::Limit { limit } => *limit,
            _ => {
                return Err(QueryError::ExecutionError(
                    "Limit executor requires a Limit plan node".to_string(),
                ));
            }
        };
        Ok(LimitExecutor {
            plan,
            limit,
            child,
            emitted: 0,
        })
    }
}

impl Executor for LimitExecutor {
    fn init(&mut self, trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.emitted = 0;
        self.child.init(trace)
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        if self.emitted >= self.limit {
            return Ok(None);
        }
        let tuple = match self.child.next(trace.as_deref_mut())? {
            Some(tuple) => tuple,
            None => return Ok(None),
        };
        self.emitted += 1;
        if let Some(trace) = trace.as_deref_mut() {
            trace.record_output(self.plan.id(), &tuple, self.plan.output_schema_ref());
        }
        Ok(Some(tuple))
    }

    fn output_schema(&self) -> &Schema {
        self.plan.output_schema()
    }
}
