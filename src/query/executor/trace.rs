// Execution Trace Context
//
// Optional side channel threaded through every executor call. When
// recording is enabled it snapshots each operator's output tuples, keyed
// by the operator's plan-node identity, so an external introspection API
// can show what every step of a plan produced. Execution results are
// unaffected either way.

use linked_hash_map::LinkedHashMap;
use serde_json::{Map, Value, json};

use crate::catalog::schema::SchemaRef;
use crate::query::executor::tuple::Tuple;
use crate::query::planner::plan_node::PlanNodeId;

/// The recorded output of one operator: every tuple it surfaced to its
/// parent, in order, plus the schema those tuples were produced under.
#[derive(Debug)]
pub struct NodeTrace {
    schema: SchemaRef,
    tuples: Vec<Tuple>,
}

impl NodeTrace {
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }
}

/// Per-request execution trace.
///
/// One instance exists per top-level execution request, owned by the
/// request handler and passed by mutable reference through every `init`
/// and `next` call. It is never retained by an executor past the end of
/// the request. Recording is off unless the request asked for it.
#[derive(Debug, Default)]
pub struct TraceContext {
    recording: bool,
    node_outputs: LinkedHashMap<PlanNodeId, NodeTrace>,
    plan_snapshot: Option<Value>,
    optimized_plan_snapshot: Option<Value>,
}

impl TraceContext {
    pub fn new() -> Self {
        TraceContext {
            recording: false,
            node_outputs: LinkedHashMap::new(),
            plan_snapshot: None,
            optimized_plan_snapshot: None,
        }
    }

    /// Whether operators should record their output
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Turn recording on; idempotent. Recording is never enabled
    /// implicitly by the execution layer.
    pub fn enable_recording(&mut self) {
        if !self.recording {
            log::debug!("execution trace recording enabled");
        }
        self.recording = true;
    }

    /// Record one tuple an operator is about to surface to its parent.
    ///
    /// A no-op while recording is disabled, so a threaded-but-inactive
    /// context costs one branch per tuple and mutates nothing. The first
    /// record for a node captures the schema its tuples are typed under;
    /// sequences are append-only in surfacing order.
    pub fn record_output(&mut self, id: PlanNodeId, tuple: &Tuple, schema: &SchemaRef) {
        if !self.recording {
            return;
        }
        self.node_outputs
            .entry(id)
            .or_insert_with(|| NodeTrace {
                schema: schema.clone(),
                tuples: Vec::new(),
            })
            .tuples
            .push(tuple.clone());
    }

    /// Store the plan-tree snapshots produced by the planning stage.
    ///
    /// `pre` is the plan as first constructed, `post` the plan after
    /// optimization; both are opaque to the execution layer.
    pub fn set_plan_snapshots(&mut self, pre: Value, post: Value) {
        self.plan_snapshot = Some(pre);
        self.optimized_plan_snapshot = Some(post);
    }

    pub fn plan_snapshot(&self) -> Option<&Value> {
        self.plan_snapshot.as_ref()
    }

    pub fn optimized_plan_snapshot(&self) -> Option<&Value> {
        self.optimized_plan_snapshot.as_ref()
    }

    /// Recorded per-node outputs, in first-recorded order
    pub fn node_outputs(&self) -> impl Iterator<Item = (&PlanNodeId, &NodeTrace)> {
        self.node_outputs.iter()
    }

    /// The recorded output of one node, if any
    pub fn node_output(&self, id: PlanNodeId) -> Option<&NodeTrace> {
        self.node_outputs.get(&id)
    }

    /// Whether any output has been recorded
    pub fn is_empty(&self) -> bool {
        self.node_outputs.is_empty()
    }

    /// Serialize the plan snapshots and the recorded per-node outputs
    /// into `wrapper` for the external introspection API.
    pub fn export_into(&self, wrapper: &mut Map<String, Value>) {
        wrapper.insert(
            "planner_tree".to_string(),
            self.plan_snapshot.clone().unwrap_or(Value::Null),
        );
        wrapper.insert(
            "optimized_planner_tree".to_string(),
            self.optimized_plan_snapshot.clone().unwrap_or(Value::Null),
        );

        let mut nodes = Vec::new();
        for (id, trace) in &self.node_outputs {
            let tuples: Vec<Value> = trace.tuples.iter().map(tuple_to_structured).collect();
            nodes.push(json!({
                "planner_node_id": id,
                "column_names": trace.schema.column_names(),
                "tuples": tuples,
            }));
        }
        wrapper.insert("executor_tree".to_string(), Value::Array(nodes));
    }
}

fn tuple_to_structured(tuple: &Tuple) -> Value {
    let columns: Vec<String> = tuple.values().iter().map(|v| v.to_string()).collect();
    let mut object = Map::new();
    if let Some(rid) = tuple.rid() {
        object.insert(
            "rid".to_string(),
            json!({ "page_id": rid.page_id, "slot_num": rid.slot_num }),
        );
    }
    object.insert("columns".to_string(), json!(columns));
    Value::Object(object)
}
