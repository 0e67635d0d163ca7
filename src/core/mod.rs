// PartLedger - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or the filesystem.

pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod summary;

