//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame. Order within a frame:
//! input, ball, walls (and scoring), paddles, opponent.
//! The opponent therefore always reacts to the post-collision ball.

use super::collision::{resolve_paddle, resolve_walls};
use super::input::{FrameControl, InputEvent, Intent, apply_intents};
use super::opponent::update_opponent;
use super::state::{GameEvent, GamePhase, GameState, Side};
use crate::consts::WINNING_SCORE;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents in the order they were received
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_intent(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
        }
    }

    /// Translate at most one polled event
    pub fn from_event(event: Option<InputEvent>) -> Self {
        Self {
            intents: event.map(Intent::from_event).into_iter().collect(),
        }
    }
}

/// Advance the game state by one frame of `dt` seconds.
///
/// Returns `FrameControl::Quit` when a quit was requested; the frame is still
/// simulated to the end.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> FrameControl {
    state.events.clear();
    state.frame += 1;

    let control = apply_intents(state, input.intents.iter().copied());

    match state.phase {
        GamePhase::Playing => step_world(state, dt),
        GamePhase::Paused | GamePhase::GameOver => {}
    }

    control
}

fn step_world(state: &mut GameState, dt: f32) {
    state.ball.advance(dt);

    let contact = resolve_walls(&mut state.ball, &state.field);
    if let Some(edge) = contact.bounce {
        log::debug!("Wall bounce: {:?}", edge);
        state.events.push(GameEvent::WallBounce { edge });
    }
    if let Some(scorer) = contact.goal {
        point_scored(state, scorer);
        // The winning point freezes the world immediately
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    for side in [Side::Player, Side::Opponent] {
        let paddle = *state.paddle(side);
        if resolve_paddle(&mut state.ball, &paddle, side) {
            log::debug!("Paddle hit: {}", side.as_str());
            state.events.push(GameEvent::PaddleHit { side });
        }
    }

    update_opponent(&mut state.opponent, &state.ball, &state.field, dt);
    state.player.clamp_to(&state.field);
}

/// Award a point, re-serve, and end the game if `scorer` reached the winning score
pub fn point_scored(state: &mut GameState, scorer: Side) {
    let score = state.score.award(scorer);
    log::info!(
        "Point to {} ({} - {})",
        scorer.as_str(),
        state.score.player,
        state.score.opponent
    );
    state.events.push(GameEvent::PointScored { scorer, score });

    state.serve();

    if score == WINNING_SCORE {
        log::info!("Game over: {} wins", scorer.as_str());
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { winner: scorer });
    }
}
