//! Events emitted by command transitions.
//!
//! Events describe what a transition did, in emission order. They carry ids
//! and numbers only; presentation layers look up the rest in the new state.

use crate::command::Command;
use crate::dice::DieId;
use crate::scoring::RuleId;
use crate::state::{UpgradeOffer, UpgradeOption};

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    DieToggled {
        die: DieId,
        staged: bool,
    },

    /// `dice` were rolled by the command; `auto_rerolled` were rolled a
    /// second time by an auto-reroll upgrade after the first result sparkled.
    DiceRolled {
        dice: Vec<DieId>,
        auto_rerolled: Vec<DieId>,
        busted: bool,
    },

    DiceBanked {
        score: u64,
        hot_dice: bool,
        fired_rules: Vec<RuleId>,
    },

    /// `turn_number` is the turn that just ended.
    TurnEnded {
        turn_number: u32,
        total_score: u64,
        game_over: bool,
        busted: bool,
    },

    GameReset,

    UpgradeOffered {
        offer: UpgradeOffer,
    },

    /// `position` is set when the option attached an upgrade to a slot.
    UpgradeSelected {
        option: UpgradeOption,
        position: Option<u8>,
    },

    ExtraDieAdded {
        die: DieId,
        position: u8,
    },

    UnscoredDiscarded {
        discarded: Vec<DieId>,
    },

    /// A rejected command. `code` is stable, `message` is for players.
    Error {
        code: String,
        message: String,
    },

    /// Asks the host to submit `command` after `delay_ms`, against whatever
    /// the state is at that time.
    DelayedAction {
        command: Command,
        delay_ms: u64,
    },
}

impl GameEvent {
    /// Wire name, e.g. `DICE_ROLLED`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GameEvent::Error { .. })
    }
}
