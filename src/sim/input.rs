//! Input translation
//!
//! Raw events from the host become a closed set of intents, and every intent is
//! gated by the current phase in one place.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Pause,
}

/// A discrete event from the host's input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    WindowClose,
}

/// What the player wants to happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    TogglePause,
    Quit,
}

impl Intent {
    pub fn from_event(event: InputEvent) -> Intent {
        match event {
            InputEvent::KeyDown(Key::Up) => Intent::MoveUp,
            InputEvent::KeyDown(Key::Down) => Intent::MoveDown,
            InputEvent::KeyDown(Key::Pause) => Intent::TogglePause,
            InputEvent::WindowClose => Intent::Quit,
        }
    }
}

impl From<InputEvent> for Intent {
    fn from(event: InputEvent) -> Self {
        Intent::from_event(event)
    }
}

/// Whether the frame loop should keep going after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Quit,
}

/// Apply one intent to the world, honoring the phase rules:
/// - moves only while playing
/// - pause toggles while playing or paused, never after game over
/// - quit always
pub fn apply_intent(state: &mut GameState, intent: Intent) -> FrameControl {
    match (intent, state.phase) {
        (Intent::Quit, _) => {
            log::info!("Quit requested");
            state.events.push(GameEvent::QuitRequested);
            return FrameControl::Quit;
        }
        (Intent::MoveUp, GamePhase::Playing) => {
            let step = state.player.key_step();
            state.player.move_by(-step, &state.field);
        }
        (Intent::MoveDown, GamePhase::Playing) => {
            let step = state.player.key_step();
            state.player.move_by(step, &state.field);
        }
        (Intent::MoveUp | Intent::MoveDown, GamePhase::Paused | GamePhase::GameOver) => {}
        (Intent::TogglePause, GamePhase::Playing) => {
            log::info!("Paused");
            state.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
        }
        (Intent::TogglePause, GamePhase::Paused) => {
            log::info!("Resumed");
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
        }
        (Intent::TogglePause, GamePhase::GameOver) => {}
    }
    FrameControl::Continue
}

/// Apply intents in order. Nothing after a quit is processed.
pub fn apply_intents<I>(state: &mut GameState, intents: I) -> FrameControl
where
    I: IntoIterator<Item = Intent>,
{
    for intent in intents {
        if apply_intent(state, intent) == FrameControl::Quit {
            return FrameControl::Quit;
        }
    }
    FrameControl::Continue
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn intent_strategy() -> impl Strategy<Value = Intent> {
        prop_oneof![
            Just(Intent::MoveUp),
            Just(Intent::MoveDown),
            Just(Intent::TogglePause),
        ]
    }

    proptest! {
        /// No sequence of key presses can push the player paddle off the field
        #[test]
        fn prop_player_paddle_clamped(intents in prop::collection::vec(intent_strategy(), 0..80)) {
            let mut state = GameState::with_seed(9);
            for intent in intents {
                apply_intent(&mut state, intent);
                prop_assert!(state.player.top() >= 0.0);
                prop_assert!(state.player.top() <= state.field.height - state.player.size.y);
            }
        }
    }
}
