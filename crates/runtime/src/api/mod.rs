//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the worker and bus internals can change without touching clients.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
