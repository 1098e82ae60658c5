//! The rename engine: sessions, backups, and bulk planning.

pub mod backup;
pub mod plan;
pub mod session;

pub use plan::{BulkPlan, parse_bulk_lines, plan_bulk};
pub use session::{BulkReport, ProductDetails, RenameRequest, RenameSession};
