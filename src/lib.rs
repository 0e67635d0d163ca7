// PartLedger - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and for presentation layers that embed the ledger view.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
