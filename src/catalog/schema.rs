// Schema Management Module
//
// This module defines the data types and the Schema type that describes
// the shape of the tuples an operator produces.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::column::Column;

/// Data types supported by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    Text,
    Boolean,
    Date,
    Timestamp,
    Blob,
}

impl DataType {
    /// Convert a string representation to a DataType
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "INT" | "INTEGER" => Ok(DataType::Integer),
            "FLOAT" | "REAL" | "DOUBLE" => Ok(DataType::Float),
            "TEXT" | "VARCHAR" | "CHAR" | "STRING" => Ok(DataType::Text),
            "BOOL" | "BOOLEAN" => Ok(DataType::Boolean),
            "DATE" => Ok(DataType::Date),
            "TIMESTAMP" | "DATETIME" => Ok(DataType::Timestamp),
            "BLOB" | "BINARY" => Ok(DataType::Blob),
            _ => Err(format!("Unknown data type: {}", s)),
        }
    }

    /// String representation used in schema rendering
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Text => "TEXT",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered list of typed, named columns describing the shape of a tuple.
///
/// Every plan node carries one schema for the tuples it outputs; tuples are
/// typed under the schema of the operator that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

/// Shared, read-only handle to a schema
pub type SchemaRef = Arc<Schema>;

impl Schema {
    /// Create a new schema from an ordered column list
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    /// Create an empty schema (used when evaluating constant expressions)
    pub fn empty() -> Self {
        Schema { columns: Vec::new() }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the column at the given position
    ///
    /// An out-of-range index is a programming error.
    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Get all columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find the position of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Column names in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.name(), c.data_type()))
            .collect();
        write!(f, "({})", rendered.join(", "))
    }
}
