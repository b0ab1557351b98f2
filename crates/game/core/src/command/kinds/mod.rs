//! One handler per command.

mod bank;
mod discard;
mod end_turn;
mod extra_die;
mod re_roll;
mod reset;
mod roll;
mod select_upgrade;
mod toggle;

pub use bank::BankCommand;
pub use discard::DiscardUnscoredCommand;
pub use end_turn::EndTurnCommand;
pub use extra_die::AddExtraDieCommand;
pub use re_roll::ReRollCommand;
pub use reset::ResetCommand;
pub use roll::RollCommand;
pub use select_upgrade::SelectUpgradeCommand;
pub use toggle::ToggleDieCommand;
