// Shared helpers for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use karstdb::catalog::{Column, DataType, Schema, SchemaRef};
use karstdb::query::executor::operators::register_mock_table;
use karstdb::query::expression::Expression;
use karstdb::query::planner::plan_node::{
    OrderBy, PlanNode, PlanNodeIdAllocator, PlanNodeRef, PlanPayload,
};
use karstdb::DataValue;

/// Schema over named, typed columns
pub fn schema_of(columns: &[(&str, DataType)]) -> SchemaRef {
    Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, dt)| Column::new(name.to_string(), *dt))
            .collect(),
    ))
}

/// Register a mock table under a unique name and return that name
pub fn register_unique_table(
    prefix: &str,
    schema: SchemaRef,
    rows: Vec<Vec<DataValue>>,
) -> String {
    let name = format!("{}_{}", prefix, rand::random::<u32>());
    register_mock_table(&name, schema, rows);
    name
}

pub fn mock_scan_plan(ids: &PlanNodeIdAllocator, table: &str, schema: SchemaRef) -> PlanNodeRef {
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![],
        PlanPayload::MockScan {
            table: table.to_string(),
        },
    ))
}

pub fn values_plan(
    ids: &PlanNodeIdAllocator,
    schema: SchemaRef,
    rows: Vec<Vec<Expression>>,
) -> PlanNodeRef {
    Arc::new(PlanNode::new(ids, schema, vec![], PlanPayload::Values { rows }))
}

pub fn filter_plan(
    ids: &PlanNodeIdAllocator,
    child: PlanNodeRef,
    predicate: Expression,
) -> PlanNodeRef {
    let schema = child.output_schema_ref().clone();
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![child],
        PlanPayload::Filter { predicate },
    ))
}

pub fn projection_plan(
    ids: &PlanNodeIdAllocator,
    child: PlanNodeRef,
    schema: SchemaRef,
    expressions: Vec<Expression>,
) -> PlanNodeRef {
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![child],
        PlanPayload::Projection { expressions },
    ))
}

pub fn sort_plan(
    ids: &PlanNodeIdAllocator,
    child: PlanNodeRef,
    order_bys: Vec<OrderBy>,
) -> PlanNodeRef {
    let schema = child.output_schema_ref().clone();
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![child],
        PlanPayload::Sort { order_bys },
    ))
}

pub fn limit_plan(ids: &PlanNodeIdAllocator, child: PlanNodeRef, limit: usize) -> PlanNodeRef {
    let schema = child.output_schema_ref().clone();
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![child],
        PlanPayload::Limit { limit },
    ))
}
