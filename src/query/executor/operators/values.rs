// Values Operator Implementation
//
// Constant row source: evaluates a fixed list of expression rows with no
// input tuple and emits one tuple per row.

use crate::catalog::schema::Schema;
use crate::query::executor::result::{QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::expression::Expression;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

/// Values executor.
///
/// Row expressions must be constant; the planner never places expressions
/// needing a tuple context under a Values node. Emitted tuples carry no
/// storage identity.
pub struct ValuesExecutor {
    plan: PlanNodeRef,
    rows: Vec<Vec<Expression>>,
    cursor: usize,
    // Constant expressions evaluate against no input schema
    empty_schema: Schema,
}

impl ValuesExecutor {
    pub fn new(plan: PlanNodeRef) -> QueryResult<Self> {
        let rows = match plan.payload() {
            PlanPayload::Values { rows } => rows.clone(),
            _ => {
                return Err(QueryError::ExecutionError(
                    "Values executor requires a Values plan node".to_string(),
                ));
            }
        };
        Ok(ValuesExecutor {
            plan,
            rows,
            cursor: 0,
            empty_schema: Schema::empty(),
        })
    }
}

impl Executor for ValuesExecutor {
    fn init(&mut self, _trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.cursor = 0;
        Ok(())
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        if self.cursor >= self.rows.len() {
            return Ok(None);
        }

        let row = &self.rows[self.cursor];
        let mut values = Vec::with_capacity(row.len());
        for expr in row {
            values.push(expr.evaluate(None, &self.empty_schema)?);
        }

        let tuple = Tuple::new(values, self.plan.output_schema());
        if let Some(trace) = trace.as_deref_mut() {
            trace.record_output(self.plan.id(), &tuple, self.plan.output_schema_ref());
        }
        self.cursor += 1;
        Ok(Some(tuple))
    }

    fn output_schema(&self) -> &Schema {
        self.plan.output_schema()
    }
}
