// Tuple Implementation
//
// A materialized row: an ordered list of typed values, plus the storage
// location it came from when it was read from a stored table.

use crate::catalog::schema::Schema;
use crate::common::types::Rid;
use crate::query::executor::result::{DataValue, QueryError, QueryResult};

/// One materialized row flowing between executors.
///
/// Tuples are passed by value across the pull interface; operators never
/// hand out references into their own buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    values: Vec<DataValue>,
    rid: Option<Rid>,
}

impl Tuple {
    /// Create a tuple from a value list typed under the given schema.
    ///
    /// The value count must equal the schema's column count; a mismatch is
    /// a programming error in the producing operator.
    pub fn new(values: Vec<DataValue>, schema: &Schema) -> Self {
        debug_assert_eq!(
            values.len(),
            schema.column_count(),
            "tuple value count must match schema column count"
        );
        Tuple { values, rid: None }
    }

    /// Attach the storage location this tuple was read from
    pub fn with_rid(mut self, rid: Rid) -> Self {
        self.rid = Some(rid);
        self
    }

    /// Get the value at the given column position
    ///
    /// An out-of-range index is a programming error.
    pub fn value(&self, index: usize) -> &DataValue {
        &self.values[index]
    }

    /// All values in schema order
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// The storage location of this tuple, if it has one
    pub fn rid(&self) -> Option<Rid> {
        self.rid
    }

    /// Serialize the value list into the flat row format used at the
    /// storage boundary
    pub fn serialize(&self) -> QueryResult<Vec<u8>> {
        bincode::serialize(&self.values)
            .map_err(|e| QueryError::ExecutionError(format!("Failed to serialize row: {}", e)))
    }

    /// Deserialize a flat row back into a tuple typed under `schema`
    pub fn deserialize(bytes: &[u8], schema: &Schema) -> QueryResult<Self> {
        let values: Vec<DataValue> = bincode::deserialize(bytes)
            .map_err(|e| QueryError::ExecutionError(format!("Failed to deserialize row: {}", e)))?;
        if values.len() != schema.column_count() {
            return Err(QueryError::ExecutionError(format!(
                "Deserialized row has {} values, but schema expects {}",
                values.len(),
                schema.column_count()
            )));
        }
        Ok(Tuple { values, rid: None })
    }
}
