//! Engine worker that owns the authoritative [`sparkle_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! them through the [`Dispatcher`], and optionally plays out the
//! `DELAYED_ACTION` events they emit.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use sparkle_core::{Command, ExecutionOutcome, GameEvent, GameState};

use crate::dispatcher::Dispatcher;

/// Messages understood by the engine worker.
pub enum WorkerCommand {
    /// Execute a command and reply with its outcome.
    Dispatch {
        command: Command,
        reply: oneshot::Sender<ExecutionOutcome>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// A delayed follow-up whose timer has run out.
    Delayed { command: Command },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that processes engine commands one at a time.
pub struct EngineWorker {
    dispatcher: Dispatcher,
    command_rx: mpsc::Receiver<WorkerCommand>,
    // Weak so pending timers don't keep the worker alive.
    scheduler_tx: mpsc::WeakSender<WorkerCommand>,
    honor_delayed_actions: bool,
}

impl EngineWorker {
    pub fn new(
        dispatcher: Dispatcher,
        command_rx: mpsc::Receiver<WorkerCommand>,
        scheduler_tx: mpsc::WeakSender<WorkerCommand>,
        honor_delayed_actions: bool,
    ) -> Self {
        Self {
            dispatcher,
            command_rx,
            scheduler_tx,
            honor_delayed_actions,
        }
    }

    /// Main worker loop. Ends on `Shutdown` or once every handle is dropped.
    pub async fn run(mut self) {
        info!(
            seed = self.dispatcher.state().game_seed,
            turn = self.dispatcher.state().turn_number,
            honor_delayed_actions = self.honor_delayed_actions,
            "engine worker started"
        );

        while let Some(cmd) = self.command_rx.recv().await {
            if matches!(cmd, WorkerCommand::Shutdown) {
                break;
            }
            self.handle_command(cmd);
        }

        info!(
            nonce = self.dispatcher.state().nonce,
            "engine worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: WorkerCommand) {
        match cmd {
            WorkerCommand::Dispatch { command, reply } => {
                let outcome = self.execute(&command);
                if reply.send(outcome).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::QueryState { reply } => {
                if reply.send(self.dispatcher.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Delayed { command } => {
                debug!(command = command.name(), "firing delayed action");
                self.execute(&command);
            }
            WorkerCommand::Shutdown => {}
        }
    }

    fn execute(&mut self, command: &Command) -> ExecutionOutcome {
        let outcome = self.dispatcher.dispatch(command);

        if self.honor_delayed_actions {
            for event in &outcome.events {
                if let GameEvent::DelayedAction { command, delay_ms } = event {
                    self.schedule(command.clone(), *delay_ms);
                }
            }
        }

        outcome
    }

    /// Resubmits `command` after `delay_ms`.
    ///
    /// The command runs against whatever the state is when the timer fires;
    /// handlers reject it if it no longer applies.
    fn schedule(&self, command: Command, delay_ms: u64) {
        debug!(command = command.name(), delay_ms, "scheduling delayed action");

        let scheduler_tx = self.scheduler_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;

            let Some(tx) = scheduler_tx.upgrade() else {
                debug!(command = command.name(), "runtime gone, dropping delayed action");
                return;
            };
            if tx.send(WorkerCommand::Delayed { command }).await.is_err() {
                debug!("engine worker stopped before delayed action fired");
            }
        });
    }
}
