//! The computer opponent
//!
//! It projects the ball's flight to its own goal line, bouncing off the
//! top and bottom edges along the way, then drives its paddle toward the
//! predicted intercept. The projected path is kept around so debug mode
//! can draw it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::tuning::Tuning;

/// A polyline through field space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Vec2>,
}

impl Path {
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Merciless paddle AI. It does not guess; it computes.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    /// Projected ball path from the last prediction, for debug drawing
    pub prediction: Path,
}

impl Automaton {
    /// Project the ball's flight forward to `intercept_x` and return the
    /// y it crosses at, or `None` when the projection gives up.
    ///
    /// Each top/bottom bounce spends one reflection from the budget; the
    /// waypoints land in `self.prediction` as they are computed.
    pub fn predict_intercept(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        intercept_x: f32,
        tuning: &Tuning,
    ) -> Option<f32> {
        self.prediction.clear();
        self.prediction.push(pos);
        self.project(pos, vel, intercept_x, tuning, tuning.predict_max_reflections)
    }

    fn project(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        intercept_x: f32,
        tuning: &Tuning,
        reflections_left: u32,
    ) -> Option<f32> {
        if vel.x <= 0.0 {
            return None;
        }
        let t = (intercept_x - pos.x) / vel.x;
        let projected_y = pos.y + vel.y * t;
        if (0.0..=tuning.field_height).contains(&projected_y) {
            self.prediction.push(Vec2::new(intercept_x, projected_y));
            return Some(projected_y);
        }
        if reflections_left == 0 {
            return None;
        }
        // Bounce off whichever horizontal edge the flight leaves through
        let wall_y = if projected_y < 0.0 {
            0.0
        } else {
            tuning.field_height
        };
        let t_wall = (wall_y - pos.y) / vel.y;
        let wall = Vec2::new(pos.x + vel.x * t_wall, wall_y);
        self.prediction.push(wall);
        self.project(
            wall,
            Vec2::new(vel.x, -vel.y),
            intercept_x,
            tuning,
            reflections_left - 1,
        )
    }

    /// Drive the paddle for one tick.
    ///
    /// While the ball closes in on the paddle's side the automaton chases
    /// the predicted intercept, easing off inside a sweet spot half a
    /// paddle tall. Otherwise it drifts back to mid-field.
    pub fn play(&mut self, ball: &Ball, paddle: &mut Paddle, dt: f32, tuning: &Tuning) {
        let incoming = ball.vel.x > 0.0 && ball.rect.left <= paddle.rect.left;
        if !incoming {
            self.prediction.clear();
            paddle.recenter(dt, tuning);
            return;
        }

        let intercept = self.predict_intercept(
            ball.rect.center(),
            ball.vel,
            paddle.rect.left,
            tuning,
        );
        let Some(target_y) = intercept else {
            paddle.recenter(dt, tuning);
            return;
        };

        let sweet_spot_radius = paddle.rect.height / 2.0;
        let center_y = paddle.rect.center().y;
        if target_y < center_y - sweet_spot_radius {
            paddle.up(dt, tuning);
        } else if target_y > center_y + sweet_spot_radius {
            paddle.down(dt, tuning);
        }
        // Inside the sweet spot the paddle coasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::geometry::Rect;
    use approx::assert_relative_eq;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn ball(center: Vec2, vel: Vec2, t: &Tuning) -> Ball {
        Ball {
            rect: Rect::new(
                center.x - t.ball_size / 2.0,
                center.y - t.ball_size / 2.0,
                t.ball_size,
                t.ball_size,
            ),
            vel,
            sauce: 0.0,
        }
    }

    #[test]
    fn test_predict_straight_flight() {
        let t = tuning();
        let mut ai = Automaton::default();
        let y = ai
            .predict_intercept(Vec2::new(100.0, 500.0), Vec2::new(2000.0, 0.0), 1490.0, &t)
            .expect("level flight intercepts");
        assert_relative_eq!(y, 500.0);
        // Start point plus intercept
        assert_eq!(ai.prediction.points.len(), 2);
    }

    #[test]
    fn test_predict_single_bounce() {
        let t = tuning();
        let mut ai = Automaton::default();
        // From (100, 100) heading up at 45°: hits the top at x=200, then
        // descends, crossing x=400 at y=200.
        let y = ai
            .predict_intercept(
                Vec2::new(100.0, 100.0),
                Vec2::new(1000.0, -1000.0),
                400.0,
                &t,
            )
            .expect("one bounce fits the budget");
        assert_relative_eq!(y, 200.0);
        assert_eq!(ai.prediction.points.len(), 3);
        assert_relative_eq!(ai.prediction.points[1].x, 200.0);
        assert_relative_eq!(ai.prediction.points[1].y, 0.0);
    }

    #[test]
    fn test_predict_gives_up_past_reflection_budget() {
        let mut t = tuning();
        t.predict_max_reflections = 1;
        let mut ai = Automaton::default();
        // Steep zig-zag needing many bounces before reaching x=1490
        let out = ai.predict_intercept(
            Vec2::new(100.0, 500.0),
            Vec2::new(200.0, -4000.0),
            1490.0,
            &t,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_predict_ignores_receding_ball() {
        let t = tuning();
        let mut ai = Automaton::default();
        let out = ai.predict_intercept(
            Vec2::new(800.0, 500.0),
            Vec2::new(-2000.0, 100.0),
            1490.0,
            &t,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_play_chases_the_intercept() {
        let t = tuning();
        let mut ai = Automaton::default();
        let mut paddle = Paddle::new(1490.0, 50.0, &t);
        // Ball heading for the bottom-right, far below the paddle
        let ball = ball(Vec2::new(400.0, 700.0), Vec2::new(2000.0, 100.0), &t);

        ai.play(&ball, &mut paddle, SIM_DT, &t);
        assert!(paddle.velocity_y() > 0.0, "paddle should move down");
        assert!(!ai.prediction.is_empty());
    }

    #[test]
    fn test_play_coasts_in_sweet_spot() {
        let t = tuning();
        let mut ai = Automaton::default();
        // Paddle centered exactly on the incoming flight line
        let mut paddle = Paddle::new(1490.0, 500.0 - t.paddle_height / 2.0, &t);
        let ball = ball(Vec2::new(400.0, 500.0), Vec2::new(2000.0, 0.0), &t);

        ai.play(&ball, &mut paddle, SIM_DT, &t);
        assert_eq!(paddle.velocity_y(), 0.0);
    }

    #[test]
    fn test_play_recenters_when_ball_recedes() {
        let t = tuning();
        let mut ai = Automaton::default();
        let mut paddle = Paddle::new(1490.0, 50.0, &t);
        let ball = ball(Vec2::new(800.0, 500.0), Vec2::new(-2000.0, 0.0), &t);

        ai.play(&ball, &mut paddle, SIM_DT, &t);
        assert!(paddle.velocity_y() > 0.0, "recentering from the top is downward");
        assert!(ai.prediction.is_empty());
    }
}
