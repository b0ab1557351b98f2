//! Command rejection reasons.

use crate::dice::DieId;
use crate::error::{ErrorSeverity, GameError};

/// Why a command was rejected. The `Display` text is the player-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("game is over")]
    GameOver,

    #[error("nothing selected")]
    NothingSelected,

    #[error("selection doesn't score")]
    SelectionDoesNotScore,

    #[error("must bank before ending turn")]
    MustBankBeforeEndingTurn,

    #[error("selected dice not yet banked")]
    SelectionNotBanked,

    #[error("threshold not met ({projected} of {threshold})")]
    ThresholdNotMet { projected: u64, threshold: u64 },

    #[error("no reroll resource")]
    NoRerollResource,

    #[error("no dice to reroll")]
    NoRerollableDice,

    #[error("board full")]
    BoardFull,

    #[error("no extra dice")]
    NoExtraDice,

    #[error("can only discard after a bust")]
    OnlyAfterBust,

    #[error("no banked dice to recycle")]
    NothingToRecycle,

    #[error("die {die} not found")]
    UnknownDie { die: DieId },

    #[error("die {die} is already banked")]
    DieBanked { die: DieId },

    #[error("roll before choosing dice")]
    NotRolled,

    #[error("resolve the sparkle before rolling")]
    Sparkled,

    #[error("no sparkle to resolve")]
    NoSparkleToResolve,

    #[error("no upgrade option {index}")]
    NoSuchOption { index: usize },

    #[error("no die in slot {position}")]
    UpgradeSlotMissing { position: u8 },

    #[error("die in slot {position} has no room for another upgrade")]
    UpgradeSlotFull { position: u8 },
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            GameOver | NothingSelected | SelectionDoesNotScore => ErrorSeverity::Recoverable,
            MustBankBeforeEndingTurn | SelectionNotBanked => ErrorSeverity::Recoverable,
            ThresholdNotMet { .. } | NoRerollResource | NoRerollableDice => {
                ErrorSeverity::Recoverable
            }
            BoardFull | NoExtraDice | OnlyAfterBust | NothingToRecycle => {
                ErrorSeverity::Recoverable
            }
            NotRolled | Sparkled | NoSparkleToResolve => ErrorSeverity::Recoverable,
            UnknownDie { .. } | DieBanked { .. } | NoSuchOption { .. } => {
                ErrorSeverity::Validation
            }
            UpgradeSlotFull { .. } => ErrorSeverity::Validation,
            UpgradeSlotMissing { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            GameOver => "GAME_OVER",
            NothingSelected => "NOTHING_SELECTED",
            SelectionDoesNotScore => "SELECTION_DOES_NOT_SCORE",
            MustBankBeforeEndingTurn => "MUST_BANK_BEFORE_ENDING_TURN",
            SelectionNotBanked => "SELECTION_NOT_BANKED",
            ThresholdNotMet { .. } => "THRESHOLD_NOT_MET",
            NoRerollResource => "NO_REROLL_RESOURCE",
            NoRerollableDice => "NO_REROLLABLE_DICE",
            BoardFull => "BOARD_FULL",
            NoExtraDice => "NO_EXTRA_DICE",
            OnlyAfterBust => "ONLY_AFTER_BUST",
            NothingToRecycle => "NOTHING_TO_RECYCLE",
            UnknownDie { .. } => "UNKNOWN_DIE",
            DieBanked { .. } => "DIE_BANKED",
            NotRolled => "NOT_ROLLED",
            Sparkled => "SPARKLED",
            NoSparkleToResolve => "NO_SPARKLE_TO_RESOLVE",
            NoSuchOption { .. } => "NO_SUCH_OPTION",
            UpgradeSlotMissing { .. } => "UPGRADE_SLOT_MISSING",
            UpgradeSlotFull { .. } => "UPGRADE_SLOT_FULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_message_starts_with_reason() {
        let error = CommandError::ThresholdNotMet {
            projected: 100,
            threshold: 500,
        };
        assert!(error.to_string().starts_with("threshold not met"));
        assert_eq!(error.error_code(), "THRESHOLD_NOT_MET");
    }

    #[test]
    fn player_mistakes_are_recoverable() {
        assert!(CommandError::NothingSelected.severity().is_recoverable());
        assert!(!CommandError::UnknownDie { die: DieId(1) }
            .severity()
            .is_recoverable());
    }
}
