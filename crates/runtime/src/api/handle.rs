//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! dispatching commands or listening to events.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use sparkle_core::{Command, ExecutionOutcome, GameEvent, GameState};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, Subscription, Topic};
use crate::workers::WorkerCommand;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<WorkerCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Submit a command and wait for its outcome.
    ///
    /// A rejected command is still `Ok`: check [`ExecutionOutcome::rejection`].
    pub async fn dispatch(&self, command: Command) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WorkerCommand::Dispatch {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WorkerCommand::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Attach a synchronous listener to every event.
    ///
    /// The listener runs on the worker task; keep it short.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.event_bus.subscribe(callback)
    }

    /// Attach a synchronous listener to one topic.
    pub fn subscribe_topic<F>(&self, topic: Topic, callback: F) -> Subscription
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.event_bus.subscribe_topic(topic, callback)
    }

    /// Stream every event.
    pub fn stream(&self) -> broadcast::Receiver<GameEvent> {
        self.event_bus.stream()
    }

    /// Stream events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sparkle_runtime::Topic;
    ///
    /// let mut turns = handle.stream_topic(Topic::Turn);
    /// while let Ok(event) = turns.recv().await {
    ///     // TURN_ENDED / GAME_RESET only
    /// }
    /// ```
    pub fn stream_topic(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.event_bus.stream_topic(topic)
    }

    /// Stream multiple topics at once
    pub fn stream_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        self.event_bus.stream_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown_worker(&self) -> Result<()> {
        self.command_tx
            .send(WorkerCommand::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub(crate) fn downgrade_sender(&self) -> mpsc::WeakSender<WorkerCommand> {
        self.command_tx.downgrade()
    }
}
