// Common Types Module
//
// Identifier types shared between the query execution core and the
// storage boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page ID type
pub type PageId = u32;

/// Record identifier: the storage location of a tuple.
///
/// Tuples read from a stored table carry the page and slot they live in.
/// Tuples synthesized during execution (projection output, constant rows)
/// have no storage location and carry no identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rid {
    pub page_id: PageId,
    pub slot_num: u32,
}

impl Rid {
    pub fn new(page_id: PageId, slot_num: u32) -> Self {
        Rid { page_id, slot_num }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_id, self.slot_num)
    }
}
