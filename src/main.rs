use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde_json::Map;

use karstdb::catalog::{Column, DataType, Schema};
use karstdb::query::executor::operators::register_mock_table;
use karstdb::query::expression::{BinaryOperator, Expression};
use karstdb::query::planner::plan_node::{
    OrderBy, OrderDirection, PlanNode, PlanNodeIdAllocator, PlanNodeRef, PlanPayload,
};
use karstdb::{DataValue, ExecutionEngine, TraceContext};

/// Build and run a demonstration query plan
#[derive(Parser)]
#[command(name = "karstdb", about = "KarstDB plan execution demo")]
struct Args {
    /// Record the execution trace and print it as JSON
    #[arg(long)]
    trace: bool,

    /// Run a constant Values pipeline instead of the mock-table scan
    #[arg(long)]
    values: bool,

    /// Render the plan without schema annotations
    #[arg(long)]
    no_schema: bool,
}

fn users_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Column::new("id".to_string(), DataType::Integer),
        Column::new("name".to_string(), DataType::Text),
        Column::new("age".to_string(), DataType::Integer),
    ]))
}

fn register_demo_table() {
    let rows = vec![
        vec![
            DataValue::Integer(1),
            DataValue::Text("Alice".to_string()),
            DataValue::Integer(34),
        ],
        vec![
            DataValue::Integer(2),
            DataValue::Text("Bob".to_string()),
            DataValue::Integer(28),
        ],
        vec![
            DataValue::Integer(3),
            DataValue::Text("Charlie".to_string()),
            DataValue::Integer(41),
        ],
        vec![
            DataValue::Integer(4),
            DataValue::Text("Dave".to_string()),
            DataValue::Integer(39),
        ],
    ];
    register_mock_table("demo_users", users_schema(), rows);
}

/// MockScan(demo_users) -> Filter(age > 30) -> Sort(age DESC) -> Projection(id, name)
fn scan_pipeline(ids: &PlanNodeIdAllocator) -> PlanNodeRef {
    let scan = Arc::new(PlanNode::new(
        ids,
        users_schema(),
        vec![],
        PlanPayload::MockScan {
            table: "demo_users".to_string(),
        },
    ));
    let filter = Arc::new(PlanNode::new(
        ids,
        users_schema(),
        vec![scan],
        PlanPayload::Filter {
            predicate: Expression::binary(
                Expression::column(2),
                BinaryOperator::GreaterThan,
                Expression::integer(30),
            ),
        },
    ));
    let sort = Arc::new(PlanNode::new(
        ids,
        users_schema(),
        vec![filter],
        PlanPayload::Sort {
            order_bys: vec![OrderBy::new(OrderDirection::Desc, Expression::column(2))],
        },
    ));
    let projection_schema = Arc::new(Schema::new(vec![
        Column::new("id".to_string(), DataType::Integer),
        Column::new("name".to_string(), DataType::Text),
    ]));
    Arc::new(PlanNode::new(
        ids,
        projection_schema,
        vec![sort],
        PlanPayload::Projection {
            expressions: vec![Expression::column(0), Expression::column(1)],
        },
    ))
}

/// Values([[1, "one"], [2, "two"]]) -> Filter(col0 > 1)
fn values_pipeline(ids: &PlanNodeIdAllocator) -> PlanNodeRef {
    let schema = Arc::new(Schema::new(vec![
        Column::new("n".to_string(), DataType::Integer),
        Column::new("word".to_string(), DataType::Text),
    ]));
    let values = Arc::new(PlanNode::new(
        ids,
        schema.clone(),
        vec![],
        PlanPayload::Values {
            rows: vec![
                vec![Expression::integer(1), Expression::text("one")],
                vec![Expression::integer(2), Expression::text("two")],
            ],
        },
    ));
    Arc::new(PlanNode::new(
        ids,
        schema,
        vec![values],
        PlanPayload::Filter {
            predicate: Expression::binary(
                Expression::column(0),
                BinaryOperator::GreaterThan,
                Expression::integer(1),
            ),
        },
    ))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    register_demo_table();

    let ids = PlanNodeIdAllocator::new();
    let plan = if args.values {
        values_pipeline(&ids)
    } else {
        scan_pipeline(&ids)
    };

    println!("{}", plan.to_display_string(!args.no_schema));
    println!();

    let mut trace = TraceContext::new();
    if args.trace {
        trace.enable_recording();
        // No optimizer runs here, so both snapshots show the same tree
        let snapshot = plan.to_structured();
        trace.set_plan_snapshots(snapshot.clone(), snapshot);
    }

    let engine = ExecutionEngine::new();
    let result = engine.execute_plan(&plan, Some(&mut trace))?;
    println!("{}", result.to_string_table());

    if args.trace {
        let mut process_info = Map::new();
        trace.export_into(&mut process_info);
        println!("{}", serde_json::to_string_pretty(&process_info)?);
    }

    Ok(())
}
