// End-to-end execution tests: plan trees built the way the planner builds
// them, driven through the engine to exhaustion.

use karstdb::catalog::DataType;
use karstdb::query::expression::{BinaryOperator, Expression};
use karstdb::query::planner::plan_node::{OrderBy, OrderDirection, PlanNodeIdAllocator};
use karstdb::{DataValue, ExecutionEngine};

#[path = "../common/mod.rs"]
mod common;
use common::{
    filter_plan, limit_plan, mock_scan_plan, projection_plan, register_unique_table, schema_of,
    sort_plan, values_plan,
};

fn ints(values: &[i64]) -> Vec<DataValue> {
    values.iter().map(|v| DataValue::Integer(*v)).collect()
}

#[test]
fn test_filter_over_values() {
    // [(1,"a"), (2,"b"), (3,"c")] filtered by col0 > 1
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("n", DataType::Integer), ("s", DataType::Text)]);
    let values = values_plan(
        &ids,
        schema,
        vec![
            vec![Expression::integer(1), Expression::text("a")],
            vec![Expression::integer(2), Expression::text("b")],
            vec![Expression::integer(3), Expression::text("c")],
        ],
    );
    let plan = filter_plan(
        &ids,
        values,
        Expression::binary(
            Expression::column(0),
            BinaryOperator::GreaterThan,
            Expression::integer(1),
        ),
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.rows()[0].value(0), &DataValue::Integer(2));
    assert_eq!(result.rows()[0].value(1), &DataValue::Text("b".to_string()));
    assert_eq!(result.rows()[1].value(0), &DataValue::Integer(3));
}

#[test]
fn test_projection_reorders_columns() {
    // [(1,2), (3,4)] projected through [col1, col0]
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("a", DataType::Integer), ("b", DataType::Integer)]);
    let values = values_plan(
        &ids,
        schema,
        vec![
            vec![Expression::integer(1), Expression::integer(2)],
            vec![Expression::integer(3), Expression::integer(4)],
        ],
    );
    let plan = projection_plan(
        &ids,
        values,
        schema_of(&[("b", DataType::Integer), ("a", DataType::Integer)]),
        vec![Expression::column(1), Expression::column(0)],
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.rows()[0].values(), &ints(&[2, 1])[..]);
    assert_eq!(result.rows()[1].values(), &ints(&[4, 3])[..]);
    assert_eq!(result.columns(), &["b", "a"]);
}

#[test]
fn test_sort_ascending_pipeline() {
    // [(3,), (1,), (2,)] sorted by col0 ascending
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("n", DataType::Integer)]);
    let values = values_plan(
        &ids,
        schema,
        vec![
            vec![Expression::integer(3)],
            vec![Expression::integer(1)],
            vec![Expression::integer(2)],
        ],
    );
    let plan = sort_plan(
        &ids,
        values,
        vec![OrderBy::new(OrderDirection::Asc, Expression::column(0))],
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    let out: Vec<&DataValue> = result.rows().iter().map(|t| t.value(0)).collect();
    assert_eq!(
        out,
        vec![
            &DataValue::Integer(1),
            &DataValue::Integer(2),
            &DataValue::Integer(3)
        ]
    );
}

#[test]
fn test_values_drains_then_exhausts() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("a", DataType::Integer), ("b", DataType::Integer)]);
    let plan = values_plan(
        &ids,
        schema,
        vec![
            vec![Expression::integer(1), Expression::integer(2)],
            vec![Expression::integer(3), Expression::integer(4)],
        ],
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 2);
    assert_eq!(result.rows()[0].values(), &ints(&[1, 2])[..]);
    assert_eq!(result.rows()[1].values(), &ints(&[3, 4])[..]);
}

#[test]
fn test_scan_filter_sort_projection_pipeline() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[
        ("id", DataType::Integer),
        ("name", DataType::Text),
        ("age", DataType::Integer),
    ]);
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
    ];
    let table = register_unique_table("exec_pipeline", schema.clone(), rows);

    let scan = mock_scan_plan(&ids, &table, schema);
    let filter = filter_plan(
        &ids,
        scan,
        Expression::binary(
            Expression::column(2),
            BinaryOperator::GreaterThan,
            Expression::integer(30),
        ),
    );
    let sort = sort_plan(
        &ids,
        filter,
        vec![OrderBy::new(OrderDirection::Desc, Expression::column(2))],
    );
    let plan = projection_plan(
        &ids,
        sort,
        schema_of(&[("name", DataType::Text)]),
        vec![Expression::column(1)],
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 2);
    assert_eq!(
        result.rows()[0].value(0),
        &DataValue::Text("Charlie".to_string())
    );
    assert_eq!(
        result.rows()[1].value(0),
        &DataValue::Text("Alice".to_string())
    );
}

#[test]
fn test_scan_tuples_carry_storage_identity() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("v", DataType::Integer)]);
    let table = register_unique_table(
        "exec_rids",
        schema.clone(),
        vec![ints(&[10]), ints(&[20])],
    );

    let plan = mock_scan_plan(&ids, &table, schema);
    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();

    assert_eq!(result.rows()[0].rid().unwrap().slot_num, 0);
    assert_eq!(result.rows()[1].rid().unwrap().slot_num, 1);
}

#[test]
fn test_limit_over_scan() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("v", DataType::Integer)]);
    let table = register_unique_table(
        "exec_limit",
        schema.clone(),
        vec![ints(&[1]), ints(&[2]), ints(&[3])],
    );

    let scan = mock_scan_plan(&ids, &table, schema);
    let plan = limit_plan(&ids, scan, 2);

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 2);
}

#[test]
fn test_filter_over_empty_source() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("v", DataType::Integer)]);
    let plan = filter_plan(
        &ids,
        values_plan(&ids, schema, vec![]),
        Expression::binary(
            Expression::column(0),
            BinaryOperator::GreaterThan,
            Expression::integer(1),
        ),
    );

    let result = ExecutionEngine::new().execute_plan(&plan, None).unwrap();
    assert_eq!(result.row_count(), 0);
}

#[test]
fn test_evaluation_failure_propagates() {
    // Dividing by a zero column value fails the whole drain
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("v", DataType::Integer)]);
    let values = values_plan(
        &ids,
        schema,
        vec![vec![Expression::integer(0)]],
    );
    let plan = projection_plan(
        &ids,
        values,
        schema_of(&[("q", DataType::Integer)]),
        vec![Expression::binary(
            Expression::integer(1),
            BinaryOperator::Divide,
            Expression::column(0),
        )],
    );

    assert!(ExecutionEngine::new().execute_plan(&plan, None).is_err());
}
