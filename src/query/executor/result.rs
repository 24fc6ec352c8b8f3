// Query Result Implementation
//
// This module defines the scalar value model, the error types and the
// result-set representation for query execution.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::schema::{DataType, Schema};
use crate::query::executor::tuple::Tuple;

/// Possible data types for values in a tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Date(String),
    Timestamp(String),
    Blob(Vec<u8>),
}

impl Eq for DataValue {}

impl Hash for DataValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            DataValue::Null => 0.hash(state),
            DataValue::Integer(i) => {
                1.hash(state);
                i.hash(state);
            }
            DataValue::Float(f) => {
                2.hash(state);
                f.to_bits().hash(state);
            }
            DataValue::Text(s) => {
                3.hash(state);
                s.hash(state);
            }
            DataValue::Boolean(b) => {
                4.hash(state);
                b.hash(state);
            }
            DataValue::Date(s) => {
                5.hash(state);
                s.hash(state);
            }
            DataValue::Timestamp(s) => {
                6.hash(state);
                s.hash(state);
            }
            DataValue::Blob(b) => {
                7.hash(state);
                b.hash(state);
            }
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Text(s) => write!(f, "\"{}\"", s),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Date(s) => write!(f, "DATE '{}'", s),
            DataValue::Timestamp(s) => write!(f, "TIMESTAMP '{}'", s),
            DataValue::Blob(b) => write!(f, "X'{}'", hex::encode(b)),
        }
    }
}

impl PartialOrd for DataValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (DataValue::Null, DataValue::Null) => Some(Ordering::Equal),
            (DataValue::Null, _) => Some(Ordering::Less),
            (_, DataValue::Null) => Some(Ordering::Greater),

            (DataValue::Integer(a), DataValue::Integer(b)) => a.partial_cmp(b),
            (DataValue::Float(a), DataValue::Float(b)) => a.partial_cmp(b),
            (DataValue::Integer(a), DataValue::Float(b)) => (*a as f64).partial_cmp(b),
            (DataValue::Float(a), DataValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (DataValue::Text(a), DataValue::Text(b)) => Some(a.cmp(b)),
            (DataValue::Boolean(a), DataValue::Boolean(b)) => a.partial_cmp(b),
            (DataValue::Date(a), DataValue::Date(b)) => Some(a.cmp(b)),
            (DataValue::Timestamp(a), DataValue::Timestamp(b)) => Some(a.cmp(b)),
            // Blobs are only compared for equality
            (DataValue::Blob(_), DataValue::Blob(_)) => None,

            _ => None,
        }
    }
}

impl DataValue {
    /// The catalog data type this value belongs to (NULL reports TEXT)
    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::Null => DataType::Text,
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::Text(_) => DataType::Text,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::Date(_) => DataType::Date,
            DataValue::Timestamp(_) => DataType::Timestamp,
            DataValue::Blob(_) => DataType::Blob,
        }
    }

    /// Compare two values for ordering purposes.
    ///
    /// NULLs order before any non-NULL value; incompatible types are a
    /// type error.
    pub fn compare(&self, other: &Self) -> QueryResult<Ordering> {
        match (self, other) {
            (DataValue::Null, DataValue::Null) => Ok(Ordering::Equal),
            (DataValue::Null, _) => Ok(Ordering::Less),
            (_, DataValue::Null) => Ok(Ordering::Greater),
            (a, b) => a.partial_cmp(b).ok_or_else(|| {
                QueryError::TypeError(format!(
                    "Cannot compare incompatible types: {:?} and {:?}",
                    a.data_type(),
                    b.data_type()
                ))
            }),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }
}

/// Represents query execution error
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error from the storage boundary
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Error during query execution
    #[error("Execution error: {0}")]
    ExecutionError(String),
    /// Error in data type handling
    #[error("Type error: {0}")]
    TypeError(String),
    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// Numeric overflow
    #[error("Numeric overflow")]
    NumericOverflow,
    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query resultset representation: the tuples a drained plan produced,
/// with the column names of the root operator's output schema.
#[derive(Debug)]
pub struct QueryResultSet {
    /// Column names in the resultset
    columns: Vec<String>,
    /// Rows of data
    rows: Vec<Tuple>,
}

impl QueryResultSet {
    /// Create a new empty resultset for the given output schema
    pub fn new(schema: &Schema) -> Self {
        QueryResultSet {
            columns: schema.column_names(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the resultset
    pub fn add_row(&mut self, row: Tuple) {
        self.rows.push(row);
    }

    /// Get the columns in the resultset
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the rows in the resultset
    pub fn rows(&self) -> &[Tuple] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Format the resultset as a string table
    pub fn to_string_table(&self) -> String {
        if self.columns.is_empty() {
            return "Empty result".to_string();
        }

        let mut result = String::new();

        // Add column headers
        result.push_str("| ");
        for col in &self.columns {
            result.push_str(&format!("{} | ", col));
        }
        result.push('\n');

        // Add separator
        result.push('|');
        for col in &self.columns {
            result.push_str(&format!("{}|", "-".repeat(col.len() + 2)));
        }
        result.push('\n');

        // Add rows
        for row in &self.rows {
            result.push_str("| ");
            for value in row.values() {
                result.push_str(&format!("{} | ", value));
            }
            result.push('\n');
        }

        result
    }
}
