//! Entity model for the test inventory: languages, locations, statuses, and the
//! `Test` / `TestSuite` / `TestFile` / `Inventory` hierarchy.

mod inventory;
mod language;
mod location;
mod test_tree;

pub use inventory::Inventory;
pub use language::Language;
pub use location::Location;
pub use test_tree::{FrameworkPriority, Test, TestFile, TestStatus, TestSuite};
