//! Application state controller
//!
//! `update` is the only way state changes; `Controller` turns user actions
//! into service calls and feeds the resulting events through it.

pub mod state;
pub mod update;
pub mod workflow;

pub use state::{AppState, Controls, HistoryEntry, DIAGNOSE_ERROR, REFINE_ERROR};
pub use update::{update, Event};
pub use workflow::{Controller, Outcome};
