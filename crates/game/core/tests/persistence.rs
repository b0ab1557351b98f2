#![cfg(feature = "serde")]
//! Game state survives a serialization round trip.

use sparkle_core::{
    Command, CommandEnv, GameConfig, GameEngine, GameEvent, GameState, PcgRng, Upgrade,
    UpgradeKind,
};

#[test]
fn state_round_trips_through_json() {
    let config = GameConfig::default();
    let mut state = GameState::new_game(&config, &PcgRng, 77);
    state.dice[2]
        .attach(Upgrade::new(UpgradeKind::ScoreMultiplier))
        .unwrap();
    state.scoring_rules.record_activation(sparkle_core::RuleId::ThreePairs);
    GameEngine::new(&mut state).execute(CommandEnv::new(&config, &PcgRng), &Command::roll());

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, state);
    assert_eq!(restored.next_die_id(), state.next_die_id());
}

#[test]
fn events_round_trip_through_json() {
    let event = GameEvent::DelayedAction {
        command: Command::end_turn(true),
        delay_ms: 1500,
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("DELAYED_ACTION"));
    let restored: GameEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, event);
}
