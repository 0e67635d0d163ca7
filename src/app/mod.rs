// PartLedger - app/mod.rs
//
// Application layer: report assembly, view state, text rendering.
// Dependencies: core, platform, util.

pub mod render;
pub mod report;
pub mod state;
