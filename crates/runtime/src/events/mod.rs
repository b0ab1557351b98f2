//! Topic-based event bus for engine events.
//!
//! Every event the engine emits is published here in emission order.
//! Consumers either register synchronous listeners or take async receivers,
//! filtered by [`Topic`] when they only care about part of the stream.

mod bus;

pub use bus::{EventBus, Subscription, Topic};
