//! Collision detection and response for the rectangular field
//!
//! Two colliders run every frame, walls first:
//! - the ball bounces off the top and bottom edges and scores on the left/right edges
//! - a paddle hit sends the ball back at an angle that depends on where it struck

use glam::Vec2;

use super::geometry::FieldBounds;
use super::state::{Ball, Paddle, Side, WallEdge};
use crate::consts::MAX_REFLECT_SLOPE;

/// Result of resolving the ball against the field boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Top or bottom edge the ball bounced off
    pub bounce: Option<WallEdge>,
    /// Side that scored because the ball left through the other side's goal line
    pub goal: Option<Side>,
}

impl WallContact {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Bounce the ball off the top/bottom edges and detect goals on the left/right edges.
///
/// The ball is pushed back inside on a bounce. Goals leave the ball where it is;
/// scoring re-serves it.
pub fn resolve_walls(ball: &mut Ball, field: &FieldBounds) -> WallContact {
    let mut contact = WallContact::miss();
    let bottom_limit = field.height - ball.size.y;
    let right_limit = field.width - ball.size.x;

    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
        contact.bounce = Some(WallEdge::Top);
    } else if ball.pos.y > bottom_limit {
        ball.pos.y = bottom_limit;
        ball.vel.y = -ball.vel.y;
        contact.bounce = Some(WallEdge::Bottom);
    }

    // Past the player's goal line the opponent scores, and vice versa
    if ball.pos.x < 0.0 {
        contact.goal = Some(Side::Opponent);
    } else if ball.pos.x > right_limit {
        contact.goal = Some(Side::Player);
    }

    contact
}

/// Does the ball's box overlap the paddle's box?
#[inline]
pub fn check_hit(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bounds().overlaps(&paddle.bounds())
}

/// Vertical part of the outgoing direction for a ball centred at `hit_y`.
///
/// `hit_y` is clamped to the paddle span, then mapped linearly from
/// `-MAX_REFLECT_SLOPE` at the top edge to `+MAX_REFLECT_SLOPE` at the bottom.
pub fn hit_vertical_component(hit_y: f32, paddle: &Paddle) -> f32 {
    let half = paddle.size.y / 2.0;
    let hit = hit_y.clamp(paddle.top(), paddle.bottom());
    let local = hit - paddle.top() - half;
    MAX_REFLECT_SLOPE * local / half
}

/// Send the ball back off `side`'s paddle.
///
/// The ball is snapped flush against the paddle's facing edge so it cannot
/// stick inside on the next frame, then re-aimed toward the other side.
pub fn reflect_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side) {
    ball.pos.x = match side {
        Side::Player => paddle.pos.x + paddle.size.x,
        Side::Opponent => paddle.pos.x - ball.size.x,
    };

    let vertical = hit_vertical_component(ball.center().y, paddle);
    ball.set_direction(Vec2::new(side.departure_sign(), vertical));
}

/// Check one paddle and reflect the ball if it was hit
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, side: Side) -> bool {
    if check_hit(ball, paddle) {
        reflect_off_paddle(ball, paddle, side);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_SPEED;

    fn field() -> FieldBounds {
        FieldBounds::new(1024.0, 768.0)
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        let mut ball = Ball::new(Vec2::splat(20.0));
        ball.pos = Vec2::new(x, y);
        ball.vel = vel;
        ball
    }

    fn paddle_at(x: f32, y: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, y),
            size: Vec2::new(20.0, 100.0),
        }
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut ball = ball_at(500.0, -3.0, Vec2::new(300.0, -460.0));
        let contact = resolve_walls(&mut ball, &field());
        assert_eq!(contact.bounce, Some(WallEdge::Top));
        assert_eq!(contact.goal, None);
        assert_eq!(ball.pos.y, 0.0);
        assert_eq!(ball.vel, Vec2::new(300.0, 460.0));
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut ball = ball_at(500.0, 752.0, Vec2::new(-300.0, 460.0));
        let contact = resolve_walls(&mut ball, &field());
        assert_eq!(contact.bounce, Some(WallEdge::Bottom));
        assert_eq!(ball.bounds().bottom(), 768.0);
        assert_eq!(ball.vel.y, -460.0);
    }

    #[test]
    fn test_left_edge_scores_for_opponent() {
        let mut ball = ball_at(-0.5, 300.0, Vec2::new(-500.0, 0.0));
        let contact = resolve_walls(&mut ball, &field());
        assert_eq!(contact.goal, Some(Side::Opponent));
        assert_eq!(contact.bounce, None);
    }

    #[test]
    fn test_right_edge_scores_for_player() {
        let mut ball = ball_at(1005.0, 300.0, Vec2::new(500.0, 0.0));
        let contact = resolve_walls(&mut ball, &field());
        assert_eq!(contact.goal, Some(Side::Player));
    }

    #[test]
    fn test_inside_field_is_a_miss() {
        let mut ball = ball_at(500.0, 300.0, Vec2::new(500.0, 100.0));
        let before = ball;
        assert_eq!(resolve_walls(&mut ball, &field()), WallContact::miss());
        assert_eq!(ball, before);
    }

    #[test]
    fn test_vertical_component_extremes() {
        let paddle = paddle_at(92.0, 300.0);
        assert_eq!(hit_vertical_component(300.0, &paddle), -2.0);
        assert_eq!(hit_vertical_component(400.0, &paddle), 2.0);
        assert_eq!(hit_vertical_component(350.0, &paddle), 0.0);
        // Outside the paddle span clamps to the nearest edge
        assert_eq!(hit_vertical_component(250.0, &paddle), -2.0);
        assert_eq!(hit_vertical_component(480.0, &paddle), 2.0);
    }

    #[test]
    fn test_player_paddle_top_edge_reflection() {
        // Ball center level with the paddle top
        let paddle = paddle_at(92.0, 334.0);
        let mut ball = ball_at(105.0, 324.0, Vec2::new(-550.0, 0.0));
        assert!(check_hit(&ball, &paddle));

        reflect_off_paddle(&mut ball, &paddle, Side::Player);
        assert_eq!(ball.pos.x, 112.0);
        assert!((ball.vel.x - 245.97).abs() < 0.1);
        assert!((ball.vel.y + 491.93).abs() < 0.1);
        assert!((ball.vel.length() - BALL_SPEED).abs() < 1e-2);
    }

    #[test]
    fn test_opponent_paddle_sends_ball_left() {
        let paddle = paddle_at(912.0, 300.0);
        let mut ball = ball_at(900.0, 340.0, Vec2::new(550.0, 0.0));
        assert!(resolve_paddle(&mut ball, &paddle, Side::Opponent));
        assert_eq!(ball.pos.x, 892.0);
        assert!(ball.vel.x < 0.0);
        // Center hit goes straight across
        assert!(ball.vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_paddle_miss_leaves_ball_alone() {
        let paddle = paddle_at(92.0, 300.0);
        let mut ball = ball_at(400.0, 340.0, Vec2::new(-550.0, 0.0));
        let before = ball;
        assert!(!resolve_paddle(&mut ball, &paddle, Side::Player));
        assert_eq!(ball, before);
    }
}
