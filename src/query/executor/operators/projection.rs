// Projection Operator Implementation
//
// Evaluates an ordered expression list against each child tuple and emits
// a new tuple typed under this node's own output schema. Strictly
// one-to-one with its child.

use crate::catalog::schema::Schema;
use crate::query::executor::result::{QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::expression::Expression;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

pub struct ProjectionExecutor {
    plan: PlanNodeRef,
    expressions: Vec<Expression>,
    child: Box<dyn Executor>,
}

impl ProjectionExecutor {
    pub fn new(plan: PlanNodeRef, child: Box<dyn Executor>) -> QueryResult<Self> {
        let expressions = match plan.payload() {
            PlanPayload::Projection { expressions } => expressions.clone(),
            _ => {
                return Err(QueryError::ExecutionError(
                    "Projection executor requires a Projection plan node".to_string(),
                ));
            }
        };
        Ok(ProjectionExecutor {
            plan,
            expressions,
            child,
        })
    }
}

impl Executor for ProjectionExecutor {
    fn init(&mut self, trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.child.init(trace)
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        let child_tuple = match self.child.next(trace.as_deref_mut())? {
            Some(tuple) => tuple,
            None => return Ok(None),
        };

        let mut values = Vec::with_capacity(self.expressions.len());
        for expr in &self.expressions {
            values.push(expr.evaluate(Some(&child_tuple), self.child.output_schema())?);
        }

        let tuple = Tuple::new(values, self.plan.output_schema());
        if let Some(trace) = trace.as_deref_mut() {
            trace.record_output(self.plan.id(), &tuple, self.plan.output_schema_ref());
        }
        Ok(Some(tuple))
    }

    fn output_schema(&self) -> &Schema {
        self.plan.output_schema()
    }
}
