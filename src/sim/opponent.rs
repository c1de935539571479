//! Rule-based opponent paddle
//!
//! Re-evaluated from scratch every frame, no memory between frames:
//! - chase the ball while it is on the opponent's half and heading its way
//! - otherwise drift back to the vertical center of the field
//!
//! No prediction and no randomness. It is meant to be beatable.

use super::geometry::FieldBounds;
use super::state::{Ball, Paddle};
use crate::consts::OPPONENT_SPEED;

/// Is the ball on the opponent's half and moving toward it?
pub fn ball_is_incoming(ball: &Ball, field: &FieldBounds) -> bool {
    ball.pos.x > field.half_width() && ball.vel.x > 0.0
}

/// Vertical position the opponent paddle's center is heading for this frame
pub fn target_y(ball: &Ball, field: &FieldBounds) -> f32 {
    if ball_is_incoming(ball, field) {
        ball.center().y
    } else {
        field.half_height()
    }
}

/// Move the opponent paddle one step toward its target and clamp it to the field
pub fn update_opponent(paddle: &mut Paddle, ball: &Ball, field: &FieldBounds, dt: f32) {
    let step = OPPONENT_SPEED * dt;
    let target = target_y(ball, field);
    let middle = paddle.center_y();

    let dy = if middle < target {
        step
    } else if middle > target {
        -step
    } else {
        0.0
    };

    paddle.move_by(dy, field);
}
