// Query Operators Module
//
// One operator per plan-node kind, each implementing the shared pull
// contract defined in the executor module.

pub mod filter;
pub mod limit;
pub mod mock_scan;
pub mod projection;
pub mod sort;
pub mod values;

pub use filter::FilterExecutor;
pub use limit::LimitExecutor;
pub use mock_scan::{MockScanExecutor, MockTable, mock_table, register_mock_table};
pub use projection::ProjectionExecutor;
pub use sort::SortExecutor;
pub use values::ValuesExecutor;
