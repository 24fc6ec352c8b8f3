// Column Management Module
//
// This module defines the Column type: one named, typed entry of a schema.

use serde::{Deserialize, Serialize};

use super::schema::DataType;

/// A named, typed column of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Column data type
    data_type: DataType,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, data_type: DataType) -> Self {
        Column { name, data_type }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the column data type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}
