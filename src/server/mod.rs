//! Server core functionality
//!
//! Assembles the per-operation actix application around the shared
//! immutable state and runs it.

pub mod core;

pub use self::core::{AppState, RouteRegistrar, run};
