//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod opponent;
pub mod state;
pub mod tick;

pub use collision::{
    WallContact, check_hit, hit_vertical_component, reflect_off_paddle, resolve_paddle,
    resolve_walls,
};
pub use geometry::{Aabb, FieldBounds};
pub use input::{FrameControl, InputEvent, Intent, Key, apply_intent, apply_intents};
pub use opponent::update_opponent;
pub use state::{
    Ball, GameEvent, GamePhase, GameState, Paddle, Score, Side, Snapshot, WallEdge,
    serve_direction,
};
pub use tick::{TickInput, point_scored, tick};
