//! Paddle Pong - a classic two-paddle ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, opponent, game state)
//! - `platform`: Collaborator interfaces (input, sprites, presentation) and the frame loop
//! - `settings`: Start-up configuration supplied by the host

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{InputSource, Presenter, RunSummary, SpriteSource, run_frames};
pub use settings::{Settings, SpriteSize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. One frame always advances the world by this much.
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Ball speed in pixels per second (constant for the whole game)
    pub const BALL_SPEED: f32 = 550.0;

    /// Opponent paddle speed in pixels per second
    pub const OPPONENT_SPEED: f32 = 350.0;

    /// Reaching exactly this score ends the game
    pub const WINNING_SCORE: u32 = 11;

    /// A key press moves the player paddle by `height / PADDLE_STEP_DIVISOR`
    pub const PADDLE_STEP_DIVISOR: f32 = 4.0;

    /// Serve picks each axis magnitude uniformly from this range
    pub const SERVE_PICK_MIN: u32 = 1;
    pub const SERVE_PICK_MAX: u32 = 10;

    /// Steepest paddle reflection (vertical : horizontal)
    pub const MAX_REFLECT_SLOPE: f32 = 2.0;

    /// Default field (window) dimensions
    pub const DEFAULT_FIELD_WIDTH: f32 = 1024.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 768.0;

    /// Default sprite dimensions when no asset provider overrides them
    pub const DEFAULT_BALL_SIZE: f32 = 20.0;
    pub const DEFAULT_PADDLE_WIDTH: f32 = 20.0;
    pub const DEFAULT_PADDLE_HEIGHT: f32 = 100.0;
}
