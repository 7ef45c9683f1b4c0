//! Climate Architect - climate-responsive floor plan designer
//!
//! Site brief in, floor plan out: climate analysis, synthesis, refinement
//! and diagnostics are delegated to a remote text-generation service; this
//! crate owns the session state and draws the results.

pub mod controller;
pub mod core;
pub mod llm;
pub mod model;
pub mod render;
pub mod service;
