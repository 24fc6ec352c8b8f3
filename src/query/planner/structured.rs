// Structured Plan Serialization
//
// Object-shaped plan rendering for the external introspection API. Each
// node carries its kind name, its identity and a kind-specific attribute
// object; inner nodes also carry a `children` array. Scan and constant
// leaves omit the array entirely, since a child list is meaningless there.

use serde_json::{Map, Value, json};

use crate::query::expression::Expression;
use crate::query::planner::plan_node::{OrderBy, PlanKind, PlanNode, PlanPayload};

fn expressions_to_string(expressions: &[Expression]) -> String {
    let rendered: Vec<String> = expressions.iter().map(|e| e.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

fn order_bys_to_string(order_bys: &[OrderBy]) -> String {
    let rendered: Vec<String> = order_bys.iter().map(|o| o.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

impl PlanNode {
    /// Structured representation of this node and its subtree
    pub fn to_structured(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "planner_node_tag".to_string(),
            Value::String(self.node_name().to_string()),
        );
        object.insert("planner_node_id".to_string(), json!(self.id()));
        object.insert("planner_node_attr".to_string(), self.payload_attr());

        // Scan and constant leaves have no child concept; omitting the
        // array keeps the export free of empty lists for every leaf.
        if !matches!(self.kind(), PlanKind::SeqScan | PlanKind::Values) {
            let children: Vec<Value> = self
                .children()
                .iter()
                .map(|child| child.to_structured())
                .collect();
            object.insert("children".to_string(), Value::Array(children));
        }

        Value::Object(object)
    }

    fn payload_attr(&self) -> Value {
        match self.payload() {
            PlanPayload::SeqScan {
                table_oid,
                table_name,
            } => json!({ "table_oid": table_oid, "table": table_name }),
            PlanPayload::IndexScan {
                index_oid,
                table_name,
            } => json!({ "index_oid": index_oid, "table": table_name }),
            PlanPayload::Insert { table_oid } => json!({ "table_oid": table_oid }),
            PlanPayload::Update {
                table_oid,
                target_expressions,
            } => json!({
                "table_oid": table_oid,
                "target_exprs": expressions_to_string(target_expressions),
            }),
            PlanPayload::Delete { table_oid } => json!({ "table_oid": table_oid }),
            PlanPayload::Aggregation {
                group_bys,
                aggregates,
                agg_types,
            } => {
                let types: Vec<String> = agg_types.iter().map(|t| t.to_string()).collect();
                json!({
                    "types": format!("[{}]", types.join(", ")),
                    "aggregates": expressions_to_string(aggregates),
                    "group_by": expressions_to_string(group_bys),
                })
            }
            PlanPayload::Limit { limit } => json!({ "limit": limit }),
            PlanPayload::NestedLoopJoin {
                predicate,
                join_type,
            } => json!({
                "join_type": join_type.to_string(),
                "predicate": predicate.to_string(),
            }),
            PlanPayload::NestedIndexJoin {
                index_oid,
                key_predicate,
                join_type,
            } => json!({
                "join_type": join_type.to_string(),
                "index_oid": index_oid,
                "key_predicate": key_predicate.to_string(),
            }),
            PlanPayload::HashJoin {
                left_key_expressions,
                right_key_expressions,
                join_type,
            } => json!({
                "join_type": join_type.to_string(),
                "left_keys": expressions_to_string(left_key_expressions),
                "right_keys": expressions_to_string(right_key_expressions),
            }),
            PlanPayload::Filter { predicate } => json!({ "predicate": predicate.to_string() }),
            PlanPayload::Values { rows } => json!({ "rows": rows.len() }),
            PlanPayload::Projection { expressions } => {
                json!({ "expressions": expressions_to_string(expressions) })
            }
            PlanPayload::Sort { order_bys } => {
                json!({ "order_bys": order_bys_to_string(order_bys) })
            }
            PlanPayload::TopN { n, order_bys } => json!({
                "n": n,
                "order_bys": order_bys_to_string(order_bys),
            }),
            PlanPayload::MockScan { table } => json!({ "table": table }),
        }
    }
}
