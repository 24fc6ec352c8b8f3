// Plan Node Representation
//
// This module defines the immutable plan tree the executor layer is built
// from. Plan nodes are constructed bottom-up by the planner, shared
// read-only from then on, and identified by a numeric id used to correlate
// execution traces back to the plan.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::catalog::schema::{Schema, SchemaRef};
use crate::query::expression::Expression;

/// Plan node identity, unique per allocator
pub type PlanNodeId = u32;

/// Allocates plan node identities.
///
/// One allocator per process gives globally unique ids; the planner owns
/// it and passes it to every node construction. Ids are monotonically
/// increasing and never reused.
#[derive(Debug, Default)]
pub struct PlanNodeIdAllocator {
    next: AtomicU32,
}

impl PlanNodeIdAllocator {
    pub fn new() -> Self {
        PlanNodeIdAllocator {
            next: AtomicU32::new(0),
        }
    }

    pub fn allocate(&self) -> PlanNodeId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// The kinds of plan nodes in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKind {
    SeqScan,
    IndexScan,
    Insert,
    Update,
    Delete,
    Aggregation,
    Limit,
    NestedLoopJoin,
    NestedIndexJoin,
    HashJoin,
    Filter,
    Values,
    Projection,
    Sort,
    TopN,
    MockScan,
}

impl PlanKind {
    /// Display name of this plan kind
    pub fn name(&self) -> &'static str {
        match self {
            PlanKind::SeqScan => "SeqScan",
            PlanKind::IndexScan => "IndexScan",
            PlanKind::Insert => "Insert",
            PlanKind::Update => "Update",
            PlanKind::Delete => "Delete",
            PlanKind::Aggregation => "Aggregation",
            PlanKind::Limit => "Limit",
            PlanKind::NestedLoopJoin => "NestedLoopJoin",
            PlanKind::NestedIndexJoin => "NestedIndexJoin",
            PlanKind::HashJoin => "HashJoin",
            PlanKind::Filter => "Filter",
            PlanKind::Values => "Values",
            PlanKind::Projection => "Projection",
            PlanKind::Sort => "Sort",
            PlanKind::TopN => "TopN",
            PlanKind::MockScan => "MockScan",
        }
    }
}

/// Join flavors carried by the join plan kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Outer,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Outer => "OUTER",
        };
        write!(f, "{}", name)
    }
}

/// Aggregate functions carried by the aggregation plan kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationType {
    CountStar,
    Count,
    Sum,
    Min,
    Max,
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationType::CountStar => "COUNT(*)",
            AggregationType::Count => "COUNT",
            AggregationType::Sum => "SUM",
            AggregationType::Min => "MIN",
            AggregationType::Max => "MAX",
        };
        write!(f, "{}", name)
    }
}

/// Requested ordering direction of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// No direction given; sorts ascending
    Default,
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn is_descending(&self) -> bool {
        matches!(self, OrderDirection::Desc)
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderDirection::Default => "DEFAULT",
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        };
        write!(f, "{}", name)
    }
}

/// One sort key: the expression producing the key and its direction
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub direction: OrderDirection,
    pub expression: Expression,
}

impl OrderBy {
    pub fn new(direction: OrderDirection, expression: Expression) -> Self {
        OrderBy {
            direction,
            expression,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.direction, self.expression)
    }
}

/// Kind-specific attributes of a plan node
#[derive(Debug, Clone)]
pub enum PlanPayload {
    SeqScan {
        table_oid: u32,
        table_name: String,
    },
    IndexScan {
        index_oid: u32,
        table_name: String,
    },
    Insert {
        table_oid: u32,
    },
    Update {
        table_oid: u32,
        target_expressions: Vec<Expression>,
    },
    Delete {
        table_oid: u32,
    },
    Aggregation {
        group_bys: Vec<Expression>,
        aggregates: Vec<Expression>,
        agg_types: Vec<AggregationType>,
    },
    Limit {
        limit: usize,
    },
    NestedLoopJoin {
        predicate: Expression,
        join_type: JoinType,
    },
    NestedIndexJoin {
        index_oid: u32,
        key_predicate: Expression,
        join_type: JoinType,
    },
    HashJoin {
        left_key_expressions: Vec<Expression>,
        right_key_expressions: Vec<Expression>,
        join_type: JoinType,
    },
    Filter {
        predicate: Expression,
    },
    Values {
        rows: Vec<Vec<Expression>>,
    },
    Projection {
        expressions: Vec<Expression>,
    },
    Sort {
        order_bys: Vec<OrderBy>,
    },
    TopN {
        n: usize,
        order_bys: Vec<OrderBy>,
    },
    MockScan {
        table: String,
    },
}

impl PlanPayload {
    /// The plan kind this payload belongs to
    pub fn kind(&self) -> PlanKind {
        match self {
            PlanPayload::SeqScan { .. } => PlanKind::SeqScan,
            PlanPayload::IndexScan { .. } => PlanKind::IndexScan,
            PlanPayload::Insert { .. } => PlanKind::Insert,
            PlanPayload::Update { .. } => PlanKind::Update,
            PlanPayload::Delete { .. } => PlanKind::Delete,
            PlanPayload::Aggregation { .. } => PlanKind::Aggregation,
            PlanPayload::Limit { .. } => PlanKind::Limit,
            PlanPayload::NestedLoopJoin { .. } => PlanKind::NestedLoopJoin,
            PlanPayload::NestedIndexJoin { .. } => PlanKind::NestedIndexJoin,
            PlanPayload::HashJoin { .. } => PlanKind::HashJoin,
            PlanPayload::Filter { .. } => PlanKind::Filter,
            PlanPayload::Values { .. } => PlanKind::Values,
            PlanPayload::Projection { .. } => PlanKind::Projection,
            PlanPayload::Sort { .. } => PlanKind::Sort,
            PlanPayload::TopN { .. } => PlanKind::TopN,
            PlanPayload::MockScan { .. } => PlanKind::MockScan,
        }
    }
}

/// Shared, read-only handle to a plan node
pub type PlanNodeRef = Arc<PlanNode>;

/// One node of an immutable plan tree.
///
/// Plan nodes are modeled as trees; each node has a variable number of
/// children and the ordering of the children matters (a join's build side
/// is its first child). Every node spits out tuples shaped by its output
/// schema.
#[derive(Debug, Clone)]
pub struct PlanNode {
    id: PlanNodeId,
    output_schema: SchemaRef,
    children: Vec<PlanNodeRef>,
    payload: PlanPayload,
}

impl PlanNode {
    /// Create a new plan node with a fresh identity from `ids`.
    pub fn new(
        ids: &PlanNodeIdAllocator,
        output_schema: SchemaRef,
        children: Vec<PlanNodeRef>,
        payload: PlanPayload,
    ) -> Self {
        // Arity invariants: the output schema must match what the payload
        // implies for the kinds that fix their own output width.
        match &payload {
            PlanPayload::Projection { expressions } => {
                debug_assert_eq!(output_schema.column_count(), expressions.len());
            }
            PlanPayload::Values { rows } => {
                debug_assert!(
                    rows.iter()
                        .all(|row| row.len() == output_schema.column_count())
                );
            }
            _ => {}
        }
        PlanNode {
            id: ids.allocate(),
            output_schema,
            children,
            payload,
        }
    }

    /// The identity of this node
    pub fn id(&self) -> PlanNodeId {
        self.id
    }

    /// The kind of this node
    pub fn kind(&self) -> PlanKind {
        self.payload.kind()
    }

    /// Display name of this node's kind
    pub fn node_name(&self) -> &'static str {
        self.kind().name()
    }

    /// The schema for the output of this plan node
    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    /// Shared handle to the output schema
    pub fn output_schema_ref(&self) -> &SchemaRef {
        &self.output_schema
    }

    /// The children of this plan node
    pub fn children(&self) -> &[PlanNodeRef] {
        &self.children
    }

    /// The child at `index`; an out-of-range index is a programming error.
    pub fn child_at(&self, index: usize) -> &PlanNodeRef {
        &self.children[index]
    }

    /// The kind-specific attributes of this node
    pub fn payload(&self) -> &PlanPayload {
        &self.payload
    }

    /// Clone this node with a replacement child list.
    ///
    /// Attributes and identity are copied; only the children change. Used
    /// by rewrite passes that splice subtrees without re-planning.
    pub fn clone_with_children(&self, children: Vec<PlanNodeRef>) -> PlanNode {
        let mut node = self.clone();
        node.children = children;
        node
    }
}
