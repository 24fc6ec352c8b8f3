// Plan Text Rendering
//
// Indented multi-line plan descriptions for logging and debugging. Every
// node renders one line of its own attributes, optionally followed by its
// output schema, then its children indented beneath it.

use std::fmt;

use crate::query::expression::Expression;
use crate::query::planner::plan_node::{OrderBy, PlanNode, PlanPayload};

const CHILD_INDENT: usize = 2;

fn join_expressions(expressions: &[Expression]) -> String {
    let rendered: Vec<String> = expressions.iter().map(|e| e.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

fn join_order_bys(order_bys: &[OrderBy]) -> String {
    let rendered: Vec<String> = order_bys.iter().map(|o| o.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

impl PlanNode {
    /// One-line description of this node's own attributes
    pub fn describe(&self) -> String {
        match self.payload() {
            PlanPayload::SeqScan {
                table_oid,
                table_name,
            } => format!("SeqScan {{ table_oid={}, table={} }}", table_oid, table_name),
            PlanPayload::IndexScan {
                index_oid,
                table_name,
            } => format!(
                "IndexScan {{ index_oid={}, table={} }}",
                index_oid, table_name
            ),
            PlanPayload::Insert { table_oid } => {
                format!("Insert {{ table_oid={} }}", table_oid)
            }
            PlanPayload::Update {
                table_oid,
                target_expressions,
            } => format!(
                "Update {{ table_oid={}, target_exprs={} }}",
                table_oid,
                join_expressions(target_expressions)
            ),
            PlanPayload::Delete { table_oid } => {
                format!("Delete {{ table_oid={} }}", table_oid)
            }
            PlanPayload::Aggregation {
                group_bys,
                aggregates,
                agg_types,
            } => {
                let types: Vec<String> = agg_types.iter().map(|t| t.to_string()).collect();
                format!(
                    "Agg {{ types=[{}], aggregates={}, group_by={} }}",
                    types.join(", "),
                    join_expressions(aggregates),
                    join_expressions(group_bys)
                )
            }
            PlanPayload::Limit { limit } => format!("Limit {{ limit={} }}", limit),
            PlanPayload::NestedLoopJoin {
                predicate,
                join_type,
            } => format!(
                "NestedLoopJoin {{ type={}, predicate={} }}",
                join_type, predicate
            ),
            PlanPayload::NestedIndexJoin {
                index_oid,
                key_predicate,
                join_type,
            } => format!(
                "NestedIndexJoin {{ type={}, index_oid={}, key_predicate={} }}",
                join_type, index_oid, key_predicate
            ),
            PlanPayload::HashJoin {
                left_key_expressions,
                right_key_expressions,
                join_type,
            } => format!(
                "HashJoin {{ type={}, left_keys={}, right_keys={} }}",
                join_type,
                join_expressions(left_key_expressions),
                join_expressions(right_key_expressions)
            ),
            PlanPayload::Filter { predicate } => {
                format!("Filter {{ predicate={} }}", predicate)
            }
            PlanPayload::Values { rows } => format!("Values {{ rows={} }}", rows.len()),
            PlanPayload::Projection { expressions } => {
                format!("Projection {{ exprs={} }}", join_expressions(expressions))
            }
            PlanPayload::Sort { order_bys } => {
                format!("Sort {{ order_bys={} }}", join_order_bys(order_bys))
            }
            PlanPayload::TopN { n, order_bys } => format!(
                "TopN {{ n={}, order_bys={} }}",
                n,
                join_order_bys(order_bys)
            ),
            PlanPayload::MockScan { table } => format!("MockScan {{ table={} }}", table),
        }
    }

    /// Multi-line description of this node and its children.
    ///
    /// Children are indented beneath their parent; each child's own
    /// multi-line text is re-indented line by line.
    pub fn to_display_string(&self, with_schema: bool) -> String {
        let own = if with_schema {
            format!("{} | {}", self.describe(), self.output_schema())
        } else {
            self.describe()
        };
        format!("{}{}", own, self.children_to_string(CHILD_INDENT, with_schema))
    }

    fn children_to_string(&self, indent: usize, with_schema: bool) -> String {
        if self.children().is_empty() {
            return String::new();
        }
        let indent_str = " ".repeat(indent);
        let mut lines = Vec::new();
        for child in self.children() {
            for line in child.to_display_string(with_schema).lines() {
                lines.push(format!("{}{}", indent_str, line));
            }
        }
        format!("\n{}", lines.join("\n"))
    }
}

impl fmt::Display for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string(true))
    }
}
