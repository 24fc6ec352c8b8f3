// Query Planner Module
//
// This module holds the plan tree representation the executor layer is
// built from: typed, immutable, shareable plan nodes with text and
// structured rendering. Plan construction (binding, optimization) lives
// outside this crate; rewrite passes interact with the tree only through
// clone_with_children.

pub mod display;
pub mod plan_node;
pub mod structured;

pub use plan_node::{
    AggregationType, JoinType, OrderBy, OrderDirection, PlanKind, PlanNode, PlanNodeId,
    PlanNodeIdAllocator, PlanNodeRef, PlanPayload,
};
