//! Start-up settings supplied by the host
//!
//! Field size and sprite sizes come from the window and the loaded assets;
//! physics constants are not configurable and live in `consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::SpriteSource;
use crate::sim::FieldBounds;

/// Width and height of a sprite in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playing field (window) width in pixels
    pub field_width: f32,
    /// Playing field (window) height in pixels
    pub field_height: f32,
    pub ball_sprite: SpriteSize,
    /// Shared by both paddles
    pub paddle_sprite: SpriteSize,
    /// Serve RNG seed
    pub seed: u64,
    /// Stop a headless run after this many frames
    pub max_frames: Option<u64>,
    /// Let the computer steer the player paddle
    pub autopilot: bool,
    /// Log the whole snapshot as JSON every this many frames (debug level)
    pub snapshot_dump_every: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            ball_sprite: SpriteSize::new(DEFAULT_BALL_SIZE, DEFAULT_BALL_SIZE),
            paddle_sprite: SpriteSize::new(DEFAULT_PADDLE_WIDTH, DEFAULT_PADDLE_HEIGHT),
            seed: 0x5EED,
            max_frames: Some(60 * 60 * 10),
            autopilot: true,
            snapshot_dump_every: None,
        }
    }
}

impl Settings {
    pub fn field(&self) -> FieldBounds {
        FieldBounds::new(self.field_width, self.field_height)
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether a game can be built from these values
    pub fn is_valid(&self) -> bool {
        self.field_width > 0.0
            && self.field_height > 0.0
            && self.ball_sprite.is_positive()
            && self.paddle_sprite.is_positive()
            && self.paddle_sprite.height <= self.field_height
            && self.ball_sprite.height <= self.field_height
            && self.ball_sprite.width <= self.field_width
    }

    /// Load settings from a JSON file, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) if settings.is_valid() => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(_) => {
                log::warn!("Settings in {} are out of range, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not parse settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Settings from an optional path; defaults when none is given
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

impl SpriteSource for Settings {
    fn ball_size(&self) -> SpriteSize {
        self.ball_sprite
    }

    fn paddle_size(&self) -> SpriteSize {
        self.paddle_sprite
    }
}
