//! Runtime hosting for the Sparkle rules engine.
//!
//! `sparkle-core` is synchronous and never sleeps; this crate gives it a home.
//! A tokio worker owns the game, clients talk to it through a cloneable
//! [`RuntimeHandle`], and every emitted event goes out on an [`EventBus`].
//! The worker also plays out `DELAYED_ACTION` events by resubmitting their
//! command after the requested delay.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`dispatcher`] runs commands synchronously and publishes their events
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod dispatcher;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use dispatcher::Dispatcher;
pub use events::{EventBus, Subscription, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
