// Mock Scan Operator Implementation
//
// Leaf source over a named in-memory table from the process-wide mock
// registry. Used by tests, benches and the demo binary in place of the
// real storage-backed scan.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::catalog::schema::{Schema, SchemaRef};
use crate::common::types::Rid;
use crate::query::executor::result::{DataValue, QueryError, QueryResult};
use crate::query::executor::trace::TraceContext;
use crate::query::executor::tuple::Tuple;
use crate::query::executor::Executor;
use crate::query::planner::plan_node::{PlanNodeRef, PlanPayload};

/// A named in-memory table the mock scan reads from
#[derive(Debug)]
pub struct MockTable {
    schema: SchemaRef,
    rows: RwLock<Vec<Vec<DataValue>>>,
}

impl MockTable {
    pub fn new(schema: SchemaRef, rows: Vec<Vec<DataValue>>) -> Self {
        MockTable {
            schema,
            rows: RwLock::new(rows),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }
}

static MOCK_TABLES: Lazy<RwLock<HashMap<String, Arc<MockTable>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register (or replace) a mock table under `name`
pub fn register_mock_table(name: &str, schema: SchemaRef, rows: Vec<Vec<DataValue>>) {
    let table = Arc::new(MockTable::new(schema, rows));
    MOCK_TABLES.write().insert(name.to_string(), table);
}

/// Look up a registered mock table
pub fn mock_table(name: &str) -> Option<Arc<MockTable>> {
    MOCK_TABLES.read().get(name).cloned()
}

/// Mock scan executor.
///
/// `init` snapshots the table's rows so one scan sees a consistent row
/// stream even if the table is replaced concurrently. Emitted tuples carry
/// a synthesized storage location (page 0, one slot per row).
pub struct MockScanExecutor {
    plan: PlanNodeRef,
    table: Arc<MockTable>,
    rows: Vec<Vec<DataValue>>,
    cursor: usize,
}

impl MockScanExecutor {
    pub fn new(plan: PlanNodeRef) -> QueryResult<Self> {
        let table_name = match plan.payload() {
            PlanPayload::MockScan { table } => table.clone(),
            _ => {
                return Err(QueryError::ExecutionError(
                    "Mock scan executor requires a MockScan plan node".to_string(),
                ));
            }
        };
        let table = mock_table(&table_name).ok_or_else(|| {
            QueryError::StorageError(format!("Mock table not registered: {}", table_name))
        })?;
        Ok(MockScanExecutor {
            plan,
            table,
            rows: Vec::new(),
            cursor: 0,
        })
    }
}

impl Executor for MockScanExecutor {
    fn init(&mut self, _trace: Option<&mut TraceContext>) -> QueryResult<()> {
        self.rows = self.table.rows.read().clone();
        self.cursor = 0;
        Ok(())
    }

    fn next(&mut self, mut trace: Option<&mut TraceContext>) -> QueryResult<Option<Tuple>> {
        if self.cursor >= self.rows.len() {
            return Ok(None);
        }

        let values = self.rows[self.cursor].clone();
        let tuple = Tuple::new(values, self.plan.output_schema())
            .with_rid(Rid::new(0, self.cursor as u32));
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
