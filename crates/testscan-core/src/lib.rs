//! # testscan-core
//!
//! Foundation crate for the test inventory engine.
//! Defines the entity model (`Inventory`, `TestFile`, `TestSuite`, `Test`), the error
//! taxonomy, scan configuration, and the event-handler contract. Every other crate in the
//! workspace depends on this one.

#![allow(dead_code)]

pub mod config;
pub mod errors;
pub mod events;
pub mod types;

pub use config::ScanOptions;
pub use errors::{ScanError, ScanErrorKind, ScanPhase};
pub use events::{NullEventHandler, ScanEventHandler};
pub use types::{
    FrameworkPriority, Inventory, Language, Location, Test, TestFile, TestStatus, TestSuite,
};
