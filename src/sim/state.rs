//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one `GameState` value that is
//! passed by reference through each update step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, FieldBounds};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused; the world is frozen until pause is toggled again
    Paused,
    /// Someone reached the winning score. Terminal for this process.
    GameOver,
}

/// Which end of the field a paddle (or a scorer) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle on the near (left) side
    Player,
    /// AI-controlled paddle on the far (right) side
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Horizontal direction a ball takes after bouncing off this side's paddle
    pub fn departure_sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// Horizontal field boundary the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallEdge {
    Top,
    Bottom,
}

/// Things that happened during a tick, for presentation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball was placed at the center and given a fresh direction
    Served,
    WallBounce { edge: WallEdge },
    PaddleHit { side: Side },
    /// `scorer` gained a point; `score` is their new total
    PointScored { scorer: Side, score: u32 },
    Paused,
    Resumed,
    GameOver { winner: Side },
    QuitRequested,
}

/// The ball. Position is the top-left corner of its sprite, kept at sub-pixel precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            vel: Vec2::ZERO,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move by one step of the current velocity
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Point the ball along `dir`, keeping its speed at `BALL_SPEED`.
    ///
    /// # Panics
    /// If `dir` has zero length or is not finite. Every caller builds the
    /// direction with a non-zero horizontal component, so this is a bug.
    pub fn set_direction(&mut self, dir: Vec2) {
        assert!(
            dir.is_finite() && dir.length_squared() > 0.0,
            "ball direction must be a finite non-zero vector, got {dir}"
        );
        self.vel = dir.normalize() * BALL_SPEED;
    }

    /// Center the ball in the field and launch it in a random direction
    pub fn serve<R: Rng>(&mut self, field: &FieldBounds, rng: &mut R) {
        self.pos = field.center() - self.size * 0.5;
        self.set_direction(serve_direction(rng));
    }
}

/// Random, unnormalized serve direction.
///
/// Each axis gets an independent magnitude in `[SERVE_PICK_MIN, SERVE_PICK_MAX]`
/// and an independent fair sign. Normalizing this does not give a uniform
/// spread of angles: shallow and steep serves come up more often than diagonals.
pub fn serve_direction<R: Rng>(rng: &mut R) -> Vec2 {
    let up = rng.random_bool(0.5);
    let left = rng.random_bool(0.5);
    let x = rng.random_range(SERVE_PICK_MIN..=SERVE_PICK_MAX) as f32;
    let y = rng.random_range(SERVE_PICK_MIN..=SERVE_PICK_MAX) as f32;
    Vec2::new(if left { -x } else { x }, if up { -y } else { y })
}

/// A paddle. Size comes from the sprite and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    /// Paddle centred vertically, with its center a tenth of the field width from its own edge
    pub fn new(side: Side, size: Vec2, field: &FieldBounds) -> Self {
        let inset = field.width / 10.0;
        let center_x = match side {
            Side::Player => inset,
            Side::Opponent => field.width - inset,
        };
        Self {
            pos: Vec2::new(center_x - size.x / 2.0, field.half_height() - size.y / 2.0),
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Distance moved by one key press
    #[inline]
    pub fn key_step(&self) -> f32 {
        self.size.y / PADDLE_STEP_DIVISOR
    }

    /// Keep the paddle within `[0, field.height - height]`
    pub fn clamp_to(&mut self, field: &FieldBounds) {
        self.pos.y = field.clamp_top(self.pos.y, self.size.y);
    }

    /// Move vertically (positive = down) and clamp to the field
    pub fn move_by(&mut self, dy: f32, field: &FieldBounds) {
        self.pos.y += dy;
        self.clamp_to(field);
    }
}

/// Points for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Add one point for `side`, returning the new total
    pub fn award(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot += 1;
        *slot
    }

    /// Side that has reached `WINNING_SCORE`, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player == WINNING_SCORE {
            Some(Side::Player)
        } else if self.opponent == WINNING_SCORE {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Read-only view of the world handed to the presenter each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub field: FieldBounds,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub player_score: u32,
    pub opponent_score: u32,
    pub phase: GamePhase,
    /// False once the game is over; the terminal screen replaces the ball
    pub ball_visible: bool,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub field: FieldBounds,
    pub phase: GamePhase,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Frames simulated so far
    pub frame: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game for the given field and sprite sizes and serve the first ball.
    ///
    /// # Panics
    /// If any dimension is non-positive, or a paddle is taller than the field.
    pub fn new(seed: u64, field: FieldBounds, ball_size: Vec2, paddle_size: Vec2) -> Self {
        assert!(
            field.width > 0.0 && field.height > 0.0,
            "field must have positive size, got {}x{}",
            field.width,
            field.height
        );
        assert!(
            ball_size.cmpgt(Vec2::ZERO).all() && paddle_size.cmpgt(Vec2::ZERO).all(),
            "sprite sizes must be positive, got ball {ball_size} paddle {paddle_size}"
        );
        assert!(
            paddle_size.y <= field.height,
            "paddle height {} exceeds field height {}",
            paddle_size.y,
            field.height
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            phase: GamePhase::Playing,
            player: Paddle::new(Side::Player, paddle_size, &field),
            opponent: Paddle::new(Side::Opponent, paddle_size, &field),
            ball: Ball::new(ball_size),
            score: Score::default(),
            frame: 0,
            events: Vec::new(),
        };

        state.serve();
        state
    }

    /// Default 1024x768 field with the default sprite sizes
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            seed,
            FieldBounds::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT),
            Vec2::splat(DEFAULT_BALL_SIZE),
            Vec2::new(DEFAULT_PADDLE_WIDTH, DEFAULT_PADDLE_HEIGHT),
        )
    }

    /// Reset the ball to the field center with a fresh random direction
    pub fn serve(&mut self) {
        self.ball.serve(&self.field, &mut self.rng);
        log::debug!("Serve: ball velocity {}", self.ball.vel);
        self.events.push(GameEvent::Served);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            field: self.field,
            player: self.player,
            opponent: self.opponent,
            ball: self.ball,
            player_score: self.score.player,
            opponent_score: self.score.opponent,
            phase: self.phase,
            ball_visible: self.phase != GamePhase::GameOver,
        }
    }
}
