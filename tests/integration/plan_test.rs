// Plan tree integration tests: identity, cloning, text and structured
// rendering.

use std::sync::Arc;

use karstdb::catalog::DataType;
use karstdb::query::expression::{BinaryOperator, Expression};
use karstdb::query::planner::plan_node::{
    OrderBy, OrderDirection, PlanKind, PlanNode, PlanNodeIdAllocator, PlanPayload,
};

#[path = "../common/mod.rs"]
mod common;
use common::{filter_plan, projection_plan, schema_of, sort_plan, values_plan};

fn sample_tree(ids: &PlanNodeIdAllocator) -> Arc<PlanNode> {
    let schema = schema_of(&[("a", DataType::Integer), ("b", DataType::Text)]);
    let values = values_plan(
        ids,
        schema.clone(),
        vec![
            vec![Expression::integer(1), Expression::text("x")],
            vec![Expression::integer(2), Expression::text("y")],
        ],
    );
    let filter = filter_plan(
        ids,
        values,
        Expression::binary(
            Expression::column(0),
            BinaryOperator::GreaterThan,
            Expression::integer(0),
        ),
    );
    let sort = sort_plan(
        ids,
        filter,
        vec![OrderBy::new(OrderDirection::Asc, Expression::column(0))],
    );
    projection_plan(
        ids,
        sort,
        schema_of(&[("a", DataType::Integer)]),
        vec![Expression::column(0)],
    )
}

#[test]
fn test_ids_are_unique_across_trees() {
    let ids = PlanNodeIdAllocator::new();
    let first = sample_tree(&ids);
    let second = sample_tree(&ids);

    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![first, second];
    while let Some(node) = stack.pop() {
        assert!(seen.insert(node.id()), "duplicate plan node id {}", node.id());
        for child in node.children() {
            stack.push(child.clone());
        }
    }
    assert_eq!(seen.len(), 8);
}

#[test]
fn test_tree_shape_accessors() {
    let ids = PlanNodeIdAllocator::new();
    let root = sample_tree(&ids);

    assert_eq!(root.kind(), PlanKind::Projection);
    assert_eq!(root.children().len(), 1);
    let sort = root.child_at(0);
    assert_eq!(sort.kind(), PlanKind::Sort);
    let filter = sort.child_at(0);
    assert_eq!(filter.kind(), PlanKind::Filter);
    let values = filter.child_at(0);
    assert_eq!(values.kind(), PlanKind::Values);
    assert!(values.children().is_empty());
}

#[test]
fn test_clone_with_children_replaces_subtree_only() {
    let ids = PlanNodeIdAllocator::new();
    let root = sample_tree(&ids);
    let sort = root.child_at(0).clone();

    // Splice the sort's child directly under the projection
    let rewritten = root.clone_with_children(vec![sort.child_at(0).clone()]);
    assert_eq!(rewritten.id(), root.id());
    assert_eq!(rewritten.kind(), PlanKind::Projection);
    assert_eq!(rewritten.child_at(0).kind(), PlanKind::Filter);

    // The original tree is untouched
    assert_eq!(root.child_at(0).kind(), PlanKind::Sort);
}

#[test]
fn test_display_tree_indents_each_level() {
    let ids = PlanNodeIdAllocator::new();
    let root = sample_tree(&ids);

    let rendered = root.to_display_string(true);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Projection {"));
    assert!(lines[1].starts_with("  Sort {"));
    assert!(lines[2].starts_with("    Filter {"));
    assert!(lines[3].starts_with("      Values {"));
    // Schema suffix on every line
    for line in &lines {
        assert!(line.contains(" | ("), "missing schema suffix in {:?}", line);
    }

    let bare = root.to_display_string(false);
    assert!(!bare.contains('|'));
}

#[test]
fn test_structured_tree_nests_children() {
    let ids = PlanNodeIdAllocator::new();
    let root = sample_tree(&ids);

    let structured = root.to_structured();
    assert_eq!(structured["planner_node_tag"], "Projection");
    let sort = &structured["children"][0];
    assert_eq!(sort["planner_node_tag"], "Sort");
    let filter = &sort["children"][0];
    assert_eq!(filter["planner_node_tag"], "Filter");
    let values = &filter["children"][0];
    assert_eq!(values["planner_node_tag"], "Values");
    // Constant leaves carry no children array at all
    assert!(values.get("children").is_none());
}

#[test]
fn test_structured_ids_match_plan_ids() {
    let ids = PlanNodeIdAllocator::new();
    let root = sample_tree(&ids);

    let structured = root.to_structured();
    assert_eq!(
        structured["planner_node_id"].as_u64().unwrap() as u32,
        root.id()
    );
    assert_eq!(
        structured["children"][0]["planner_node_id"].as_u64().unwrap() as u32,
        root.child_at(0).id()
    );
}

#[test]
fn test_kind_name_table() {
    let names: Vec<&str> = [
        PlanKind::SeqScan,
        PlanKind::IndexScan,
        PlanKind::Insert,
        PlanKind::Update,
        PlanKind::Delete,
        PlanKind::Aggregation,
        PlanKind::Limit,
        PlanKind::NestedLoopJoin,
        PlanKind::NestedIndexJoin,
        PlanKind::HashJoin,
        PlanKind::Filter,
        PlanKind::Values,
        PlanKind::Projection,
        PlanKind::Sort,
        PlanKind::TopN,
        PlanKind::MockScan,
    ]
    .iter()
    .map(|k| k.name())
    .collect();

    assert_eq!(
        names,
        vec![
            "SeqScan",
            "IndexScan",
            "Insert",
            "Update",
            "Delete",
            "Aggregation",
            "Limit",
            "NestedLoopJoin",
            "NestedIndexJoin",
            "HashJoin",
            "Filter",
            "Values",
            "Projection",
            "Sort",
            "TopN",
            "MockScan",
        ]
    );
}

#[test]
fn test_topn_description() {
    let ids = PlanNodeIdAllocator::new();
    let schema = schema_of(&[("a", DataType::Integer)]);
    let child = values_plan(&ids, schema.clone(), vec![vec![Expression::integer(1)]]);
    let topn = Arc::new(PlanNode::new(
        &ids,
        schema,
        vec![child],
        PlanPayload::TopN {
            n: 3,
            order_bys: vec![OrderBy::new(OrderDirection::Desc, Expression::column(0))],
        },
    ));
    assert_eq!(
        topn.describe(),
        "TopN { n=3, order_bys=[(DESC, col0)] }"
    );
}
