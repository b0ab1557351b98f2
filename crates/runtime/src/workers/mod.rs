//! Worker tasks that back the runtime orchestration.
//!
//! The engine worker is the only owner of game state; everything else talks
//! to it over channels.

mod engine;

pub use engine::{EngineWorker, WorkerCommand};
