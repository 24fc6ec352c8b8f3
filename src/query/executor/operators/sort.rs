// Sort Operator Implementation
//
// Two-phase sort: init drains the whole child into a buffer and sorts it,
// next emits the buffered tuples through a cursor.

use std::cmp::Ordering;

use crate::catalog::schema::Schema;
use crate::query::executor::result::{DataValue, QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::planner::plan_node::{OrderBy, PlanNodeRef, PlanPayload};

struct BufferedRow {
    keys: Vec<DataValue>,
    tuple: Tuple,
}

/// Sort executor.
///
/// Sort keys are evaluated once per buffered tuple while draining the
/// child, so evaluation failures surface from `init`. Rows whose keys all
/// compare equal (or incomparable) keep no particular relative order: the
/// sort is not stable.
///
/// Re-initializing a sort that has already drained its child is not
/// supported; the child stream was consumed by the first `init`.
pub struct SortExecutor {
    plan: PlanNodeRef,
    order_bys: Vec<OrderBy>,
    child: Box<dyn Executor>,
    sorted: Vec<Tuple>,
    cursor: usize,
}

impl SortExecutor {
    pub fn new(plan: PlanNodeRef, child: Box<dyn Executor>) -> QueryResult<Self> {
        let order_bys = match plan.payload() {
            PlanPayload::Sort { order_bys } => order_bys.clone(),
            _ => {
                return Err(QueryError::ExecutionError(
                    "Sort executor requires a Sort plan node".to_string(),
                ));
            }
        };
        Ok(SortExecutor {
            plan,
            order_bys,
            child,
            sorted: Vec::new(),
            cursor: 0,
        })
    }

    fn compare_rows(&self, a: &BufferedRow, b: &BufferedRow) -> Ordering {
        for (i, order_by) in self.order_bys.iter().enumerate() {
            let ord = match a.keys[i].partial_cmp(&b.keys[i]) {
                Some(Ordering::Less) => Ordering::Less,
                Some(Ordering::Greater) => Ordering::Greater,
                // Equal or incomparable: fall through to the next key
                _ => continue,
            };
            return if order_by.direction.is_descending() {
                ord.reverse()
            } else {
                ord
            };
        }
        Ordering::Equal
    }
}

impl Executor for SortExecutor {
    fn init(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.child.init(trace.as_deref_mut())?;

        let mut buffered = Vec::new();
        while let Some(tuple) = self.child.next(trace.as_deref_mut())? {
            let mut keys = Vec::with_capacity(self.order_bys.len());
            for order_by in &self.order_bys {
                keys.push(
                    order_by
                        .expression
                        .evaluate(Some(&tuple), self.child.output_schema())?,
                );
            }
            buffered.push(BufferedRow { keys, tuple });
        }

        buffered.sort_unstable_by(|a, b| self.compare_rows(a, b));
        self.sorted = buffered.into_iter().map(|row| row.tuple).collect();
        self.cursor = 0;
        Ok(())
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        if self.cursor >= self.sorted.len() {
            return Ok(None);
        }
        let tuple = self.sorted[self.cursor].clone();
        self.cursor += 1;
        if let Some(trace) = trace.as_deref_mut() {
            trace.record_output(self.plan.id(), &tuple, self.plan.output_schema_ref());
        }
        Ok(Some(tuple))
    }

    fn output_schema(&self) -> &Schema {
        self.plan.output_schema()
    }
}
