//! Commands: the closed set of player intents the engine accepts.
//!
//! Each variant wraps a payload struct that implements [`CommandTransition`];
//! the engine routes on the variant with an exhaustive match.
//!
//! # Module Structure
//!
//! - `error`: rejection reasons ([`CommandError`])
//! - `transition`: the [`CommandTransition`] trait
//! - `effects`: roll and bank steps shared by several handlers
//! - `kinds`: one handler per command

mod effects;
mod error;
mod kinds;
mod transition;

pub use error::CommandError;
pub use kinds::{
    AddExtraDieCommand, BankCommand, DiscardUnscoredCommand, EndTurnCommand, ReRollCommand,
    ResetCommand, RollCommand, SelectUpgradeCommand, ToggleDieCommand,
};
pub use transition::CommandTransition;

use crate::dice::DieId;

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    ToggleDie(ToggleDieCommand),
    Roll(RollCommand),
    ReRoll(ReRollCommand),
    Bank(BankCommand),
    EndTurn(EndTurnCommand),
    Reset(ResetCommand),
    SelectUpgrade(SelectUpgradeCommand),
    AddExtraDie(AddExtraDieCommand),
    DiscardUnscored(DiscardUnscoredCommand),
}

impl Command {
    pub fn toggle_die(die: DieId) -> Self {
        Command::ToggleDie(ToggleDieCommand::new(die))
    }

    pub fn roll() -> Self {
        Command::Roll(RollCommand)
    }

    pub fn re_roll() -> Self {
        Command::ReRoll(ReRollCommand)
    }

    pub fn bank() -> Self {
        Command::Bank(BankCommand)
    }

    pub fn end_turn(bust: bool) -> Self {
        Command::EndTurn(EndTurnCommand::new(bust))
    }

    pub fn reset() -> Self {
        Command::Reset(ResetCommand)
    }

    pub fn select_upgrade(option: usize) -> Self {
        Command::SelectUpgrade(SelectUpgradeCommand::new(option))
    }

    pub fn add_extra_die() -> Self {
        Command::AddExtraDie(AddExtraDieCommand)
    }

    pub fn discard_unscored() -> Self {
        Command::DiscardUnscored(DiscardUnscoredCommand)
    }

    /// Wire name, e.g. `END_TURN`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
