//! Collision detection and response
//!
//! Three checks run every frame: paddles against the top/bottom of the field,
//! the ball against all four field edges, and the ball against each paddle.
//! Responses always place the body flush against (or just outside) what it
//! hit so the same contact cannot trigger again next frame.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Paddle, Side};
use crate::tuning::Tuning;

/// Result of the ball-vs-field-edge check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeContact {
    /// Ball bounced off an edge
    pub bounced: bool,
    /// Ball left the field; the contained side scores
    pub goal: Option<Side>,
}

/// Keep a paddle inside `[0, field_height - length]`. Idempotent.
pub fn clamp_paddle(paddle: &mut Paddle, field_height: f32) {
    let max_y = (field_height - paddle.length).max(0.0);
    paddle.position.y = paddle.position.y.max(0.0).min(max_y);
}

/// Check the ball against the four field edges.
///
/// Top and bottom always bounce. Left and right score for the opposite side,
/// unless `goals_closed` is set (the match is already decided), in which case
/// they bounce too.
pub fn bounce_ball_edge(ball: &mut Ball, tuning: &Tuning, goals_closed: bool) -> EdgeContact {
    let mut contact = EdgeContact::default();

    if ball.position.y <= 0.0 {
        ball.position.y = 0.0;
        ball.direction.y = ball.direction.y.abs();
        contact.bounced = true;
    } else if ball.position.y + ball.size >= tuning.field_height {
        ball.position.y = tuning.field_height - ball.size;
        ball.direction.y = -ball.direction.y.abs();
        contact.bounced = true;
    }

    if ball.position.x <= 0.0 {
        if goals_closed {
            ball.position.x = 0.0;
            ball.direction.x = ball.direction.x.abs();
            contact.bounced = true;
        } else {
            contact.goal = Some(Side::Right);
        }
    } else if ball.position.x + ball.size >= tuning.field_width {
        if goals_closed {
            ball.position.x = tuning.field_width - ball.size;
            ball.direction.x = -ball.direction.x.abs();
            contact.bounced = true;
        } else {
            contact.goal = Some(Side::Left);
        }
    }

    contact
}

/// Where the ball struck the paddle: -1 at the top tip, 0 dead centre, 1 at
/// the bottom tip
pub fn impact_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    let half = paddle.length / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball.center().y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// Check the ball against one paddle and bounce it back across the field.
///
/// On a hit the ball is moved 1px clear of the paddle face, its speed is
/// multiplied by the bounce multiplier and its new heading is set from where
/// it struck the paddle. The paddle draws a new AI aim offset. Returns true
/// on a hit.
pub fn bounce_ball_paddle<R: Rng + ?Sized>(
    ball: &mut Ball,
    paddle: &mut Paddle,
    side: Side,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    if !ball.rect().overlaps(&paddle.rect()) {
        return false;
    }

    ball.position.x = match side {
        Side::Left => paddle.position.x + paddle.width + 1.0,
        Side::Right => paddle.position.x - ball.size - 1.0,
    };

    paddle.redraw_aim(rng);
    ball.speed *= tuning.bounce_multiplier;

    let angle = impact_offset(ball, paddle) * tuning.max_bounce_angle();
    let away = side.opposite().dir_x();
    ball.direction = Vec2::new(away * angle.cos(), angle.sin()) * ball.speed;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn paddle(x: f32, y: f32, length: f32) -> Paddle {
        Paddle {
            position: Vec2::new(x, y),
            width: 25.0,
            length,
            speed: 0.0,
            next_hit_pos: 0.0,
        }
    }

    fn ball(x: f32, y: f32, direction: Vec2) -> Ball {
        Ball {
            position: Vec2::new(x, y),
            direction,
            speed: 500.0,
            size: 25.0,
        }
    }

    #[test]
    fn test_clamp_paddle_top_and_bottom() {
        let mut p = paddle(37.5, -40.0, 150.0);
        clamp_paddle(&mut p, 1080.0);
        assert_eq!(p.position.y, 0.0);

        p.position.y = 1000.0;
        clamp_paddle(&mut p, 1080.0);
        assert_eq!(p.position.y, 930.0);

        p.position.y = 500.0;
        clamp_paddle(&mut p, 1080.0);
        assert_eq!(p.position.y, 500.0);
    }

    #[test]
    fn test_ball_bounces_off_top() {
        let t = Tuning::default();
        let mut b = ball(700.0, -5.0, Vec2::new(300.0, -400.0));
        let contact = bounce_ball_edge(&mut b, &t, false);

        assert!(contact.bounced);
        assert_eq!(contact.goal, None);
        assert_eq!(b.position.y, 0.0);
        assert_eq!(b.direction, Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_ball_bounces_off_bottom() {
        let t = Tuning::default();
        let mut b = ball(700.0, t.field_height - 10.0, Vec2::new(-300.0, 400.0));
        let contact = bounce_ball_edge(&mut b, &t, false);

        assert!(contact.bounced);
        assert_eq!(b.position.y, t.field_height - b.size);
        assert_eq!(b.direction, Vec2::new(-300.0, -400.0));
    }

    #[test]
    fn test_side_breach_scores_for_opposite_side() {
        let t = Tuning::default();

        let mut b = ball(t.field_width - 20.0, 500.0, Vec2::new(400.0, 0.0));
        assert_eq!(bounce_ball_edge(&mut b, &t, false).goal, Some(Side::Left));

        let mut b = ball(-1.0, 500.0, Vec2::new(-400.0, 0.0));
        assert_eq!(bounce_ball_edge(&mut b, &t, false).goal, Some(Side::Right));
    }

    #[test]
    fn test_side_breach_bounces_when_goals_closed() {
        let t = Tuning::default();
        let mut b = ball(-8.0, 500.0, Vec2::new(-400.0, 100.0));
        let contact = bounce_ball_edge(&mut b, &t, true);

        assert!(contact.bounced);
        assert_eq!(contact.goal, None);
        assert_eq!(b.position.x, 0.0);
        assert_eq!(b.direction, Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_ball_in_field_is_untouched() {
        let t = Tuning::default();
        let mut b = ball(700.0, 500.0, Vec2::new(400.0, 100.0));
        let before = b.clone();

        assert_eq!(bounce_ball_edge(&mut b, &t, false), EdgeContact::default());
        assert_eq!(b, before);
    }

    #[test]
    fn test_center_hit_returns_ball_flat() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = paddle(37.5, 0.0, 120.0);
        // Ball centre level with the paddle centre (y = 60), overlapping the face
        let mut b = ball(55.0, 60.0 - 12.5, Vec2::new(-500.0, 0.0));

        assert!(bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
        assert_eq!(b.direction.y, 0.0);
        assert!(b.direction.x > 0.0);
        assert_eq!(b.position.x, p.position.x + p.width + 1.0);
    }

    #[test]
    fn test_right_paddle_hit_sends_ball_left() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = paddle(t.right_paddle_x(), 400.0, 150.0);
        let mut b = ball(p.position.x - 10.0, 400.0, Vec2::new(500.0, 0.0));

        assert!(bounce_ball_paddle(&mut b, &mut p, Side::Right, &t, &mut rng));
        assert!(b.direction.x < 0.0);
        assert_eq!(b.position.x, p.position.x - b.size - 1.0);
        // Struck above centre: deflects upward
        assert!(b.direction.y < 0.0);
    }

    #[test]
    fn test_tip_hit_uses_max_angle() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = paddle(37.5, 300.0, 150.0);
        // Ball centre well below the paddle centre, still overlapping
        let mut b = ball(50.0, 440.0, Vec2::new(-500.0, 0.0));

        assert!(bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
        let angle = (b.direction.y / b.direction.length()).asin();
        assert!((angle - t.max_bounce_angle()).abs() < 1e-4);
    }

    #[test]
    fn test_hit_speeds_up_and_redraws_aim() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut p = paddle(37.5, 300.0, 150.0);
        p.next_hit_pos = -1.0;
        let mut b = ball(50.0, 350.0, Vec2::new(-500.0, 0.0));

        assert!(bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
        assert_eq!(b.speed, 500.0 * t.bounce_multiplier);
        assert!((b.direction.length() - b.speed).abs() < 1e-2);
        assert!(p.next_hit_pos >= 0.0 && p.next_hit_pos <= p.length / 2.0);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut p = paddle(37.5, 300.0, 150.0);
        let mut b = ball(700.0, 350.0, Vec2::new(-500.0, 0.0));
        let (ball_before, paddle_before) = (b.clone(), p.clone());

        assert!(!bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
        assert_eq!(b, ball_before);
        assert_eq!(p, paddle_before);
    }

    #[test]
    fn test_no_double_hit_after_bounce() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut p = paddle(37.5, 300.0, 150.0);
        let mut b = ball(50.0, 350.0, Vec2::new(-500.0, 0.0));

        assert!(bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
        assert!(!bounce_ball_paddle(&mut b, &mut p, Side::Left, &t, &mut rng));
    }

    proptest! {
        #[test]
        fn prop_clamp_paddle_is_idempotent(y in -5000.0f32..5000.0, length in 1.0f32..1080.0) {
            let mut p = paddle(37.5, y, length);
            clamp_paddle(&mut p, 1080.0);
            let once = p.position.y;
            clamp_paddle(&mut p, 1080.0);

            prop_assert_eq!(p.position.y, once);
            prop_assert!(once >= 0.0);
            prop_assert!(once + length <= 1080.0 + 1e-3);
            if y < 0.0 {
                prop_assert_eq!(once, 0.0);
            }
            if y + length > 1080.0 {
                prop_assert_eq!(once, 1080.0 - length);
            }
        }

        #[test]
        fn prop_speed_grows_geometrically(hits in 0u32..30) {
            let t = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(hits as u64);
            let mut left = paddle(t.left_paddle_x(), 465.0, 150.0);
            let mut right = paddle(t.right_paddle_x(), 465.0, 150.0);
            let mut b = ball(0.0, 520.0, Vec2::new(-1.0, 0.0));

            for i in 0..hits {
                let (p, side) = if i % 2 == 0 {
                    (&mut left, Side::Left)
                } else {
                    (&mut right, Side::Right)
                };
                // Drop the ball onto the paddle's face
                b.position = Vec2::new(p.position.x, p.center_y() - b.size / 2.0);
                prop_assert!(bounce_ball_paddle(&mut b, p, side, &t, &mut rng));
            }

            let expected = 500.0 * t.bounce_multiplier.powi(hits as i32);
            prop_assert!((b.speed - expected).abs() <= expected * 1e-4);
        }
    }
}
