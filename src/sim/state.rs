//! Game state and core simulation types
//!
//! Ball and paddle physics live here. Everything is deterministic and
//! serializable; the only randomness is the optional serve angle, drawn
//! from the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::automaton::Automaton;
use super::geometry::{Rect, Segment, Sides, reflect};
use crate::tuning::Tuning;
use crate::{normalize_angle, polar_to_velocity, velocity_to_polar};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, scene still drawn
    Paused,
    /// Quit requested; the event loop winds down
    GameOver,
}

/// The ball: a square rect plus a velocity and any pending spin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Velocity in px/s, field space (y down)
    pub vel: Vec2,
    /// Pending spin in degrees, consumed by the next update
    pub sauce: f32,
}

impl Ball {
    /// Serve from the field center at minimum speed.
    ///
    /// The serve angle comes from tuning when fixed, otherwise from the
    /// seeded RNG so runs stay reproducible.
    pub fn serve(tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let rect = Rect::new(
            tuning.field_width / 2.0 - tuning.ball_size / 2.0,
            tuning.field_height / 2.0 - tuning.ball_size / 2.0,
            tuning.ball_size,
            tuning.ball_size,
        );
        let angle_deg = tuning
            .ball_start_angle_deg
            .unwrap_or_else(|| rng.random_range(0.0..360.0));
        Self {
            rect,
            vel: polar_to_velocity(tuning.ball_min_speed, angle_deg.to_radians()),
            sauce: 0.0,
        }
    }

    /// Bounce off whichever field edges the ball has reached.
    ///
    /// The ball reflects off all four walls; top/bottom contact also nudges
    /// the rect back inside so it cannot wedge into an edge.
    pub fn handle_screen_edges(&mut self, field: &Rect) {
        let uncontained = self.rect.uncontained_edges(field);
        let reflect_h = uncontained.left || uncontained.right;
        let reflect_v = uncontained.top || uncontained.bottom;
        if uncontained.bottom {
            self.rect.set_bottom(field.bottom() - 1.0);
        } else if uncontained.top {
            self.rect.top = field.top + 1.0;
        }
        self.vel = reflect(self.vel, reflect_h, reflect_v);
    }

    /// Sweep the ball's corners along this tick's displacement and resolve
    /// a hit against the paddle's edges.
    ///
    /// On a face hit the ball reflects horizontally, is repositioned flush
    /// to the struck face, gains speed, and picks up spin proportional to
    /// how far from the paddle center it struck. Top/bottom edge hits also
    /// reflect vertically. Spin only applies while the ball travels upward.
    pub fn handle_paddle_collision(&mut self, paddle: &Paddle, dt: f32, tuning: &Tuning) {
        let delta = self.vel * dt;

        // Broadphase: bounding box of the swept ball vs. the paddle
        let swept = Rect::new(
            self.rect.left.min(self.rect.left + delta.x),
            self.rect.top.min(self.rect.top + delta.y),
            self.rect.width + delta.x.abs(),
            self.rect.height + delta.y.abs(),
        );
        if !swept.collides(&paddle.rect) {
            return;
        }

        let going_left = self.vel.x < 0.0;
        let going_up = self.vel.y < 0.0;
        let ball_y = self.rect.center().y;

        let sweeps: [Segment; 4] = self
            .rect
            .corners()
            .as_array()
            .map(|corner| Segment::new(*corner, *corner + delta));
        let paddle_sides = paddle.rect.segments();
        let first_hit =
            |side: &Segment| sweeps.iter().find_map(|sweep| sweep.intersection(side));
        let hits: Sides<Option<Vec2>> = Sides {
            top: first_hit(&paddle_sides.top),
            right: first_hit(&paddle_sides.right),
            bottom: first_hit(&paddle_sides.bottom),
            left: first_hit(&paddle_sides.left),
        };

        if hits.top.is_none() && hits.right.is_none() && hits.bottom.is_none() && hits.left.is_none()
        {
            return;
        }

        self.vel = reflect(self.vel, true, false);
        if let (true, Some(hit)) = (going_left, hits.right) {
            self.rect.left = hit.x + 1.0;
            self.rect.top = hit.y;
        } else if let (false, Some(hit)) = (going_left, hits.left) {
            self.rect.set_right(hit.x - 1.0);
            self.rect.top = hit.y;
        }

        if let (Some(hit), true) = (hits.bottom, going_up) {
            self.rect.top = hit.y;
            self.vel = reflect(self.vel, false, true);
        } else if let (Some(hit), false) = (hits.top, going_up) {
            self.rect.set_bottom(hit.y);
            self.vel = reflect(self.vel, false, true);
        }

        // Spin from the hit offset, only while travelling upward
        let diff_y = paddle.rect.center().y - ball_y;
        let sauce = (diff_y / paddle.rect.height * tuning.sauce_multiplier).round();
        self.sauce = if going_up {
            sauce.clamp(-tuning.sauce_max(), tuning.sauce_max())
        } else {
            0.0
        };

        // Each paddle hit speeds the ball up, to a cap
        let (speed, theta) = velocity_to_polar(self.vel);
        let speed = (speed + tuning.ball_speed_incr).min(tuning.ball_max_speed);
        self.vel = polar_to_velocity(speed, theta);
    }

    /// Steepen or flatten the flight angle by the pending spin.
    ///
    /// The change is clamped so the angle from the x axis stays within the
    /// tuned band, whichever quadrant the ball flies in.
    fn apply_sauce(vel: Vec2, sauce_deg: f32, tuning: &Tuning) -> Vec2 {
        let (speed, theta) = velocity_to_polar(vel);
        let angle = theta.to_degrees();

        let half_turn = angle.rem_euclid(180.0);
        let abs_from_x_axis = 90.0 - (90.0 - half_turn).abs();
        // Which way "steeper" points depends on the quadrant
        let direction = if half_turn < 90.0 { 1.0 } else { -1.0 };
        let mellow_sauce = (direction * sauce_deg).clamp(
            tuning.ball_min_angle_deg - abs_from_x_axis,
            tuning.ball_max_angle_deg - abs_from_x_axis,
        );
        polar_to_velocity(speed, normalize_angle((angle + mellow_sauce).to_radians()))
    }

    /// Advance one tick: consume pending spin, or move along the velocity.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        if self.sauce != 0.0 {
            self.vel = Self::apply_sauce(self.vel, self.sauce, tuning);
            self.sauce = 0.0;
        } else {
            let delta = self.vel * dt;
            self.rect.translate(delta);
        }
    }

    /// Flight angle measured from the x axis, in degrees (for tests/AI)
    pub fn angle_from_x_axis(&self) -> f32 {
        let (_, theta) = velocity_to_polar(self.vel);
        let half_turn = theta.to_degrees().rem_euclid(180.0);
        90.0 - (90.0 - half_turn).abs()
    }
}

/// A paddle: a rect that slides vertically with acceleration ramps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Signed vertical velocity in px/s (negative is up)
    vel_y: f32,
    /// Set when a command drove the paddle this tick; cleared by update
    moved: bool,
}

impl Paddle {
    pub fn new(left: f32, top: f32, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(left, top, tuning.paddle_width, tuning.paddle_height),
            vel_y: 0.0,
            moved: false,
        }
    }

    /// Current signed vertical speed in px/s
    pub fn velocity_y(&self) -> f32 {
        self.vel_y
    }

    fn accelerate(speed: f32, dt: f32, tuning: &Tuning) -> f32 {
        (speed + tuning.paddle_accel * dt).min(tuning.paddle_max_speed)
    }

    fn decelerate(speed: f32, dt: f32, tuning: &Tuning) -> f32 {
        (speed - tuning.paddle_decel * dt).max(0.0)
    }

    /// Command: move up this tick, ramping while already heading up
    pub fn up(&mut self, dt: f32, tuning: &Tuning) {
        self.moved = true;
        let speed = if self.vel_y < 0.0 {
            Self::accelerate(-self.vel_y, dt, tuning)
        } else {
            tuning.paddle_min_speed
        };
        self.vel_y = -speed;
    }

    /// Command: move down this tick, ramping while already heading down
    pub fn down(&mut self, dt: f32, tuning: &Tuning) {
        self.moved = true;
        let speed = if self.vel_y > 0.0 {
            Self::accelerate(self.vel_y, dt, tuning)
        } else {
            tuning.paddle_min_speed
        };
        self.vel_y = speed;
    }

    /// Command: head back toward mid-field, without overshooting it
    pub fn recenter(&mut self, dt: f32, tuning: &Tuning) {
        self.moved = true;
        let d_center = self.rect.center().y - tuning.field_height / 2.0;
        // Below center means moving up, above means down
        let dir = if d_center < 0.0 { 1.0 } else { -1.0 };
        let turned_around =
            (self.vel_y > 0.0 && dir < 0.0) || (self.vel_y < 0.0 && dir > 0.0);
        let speed = if turned_around {
            tuning.paddle_min_speed
        } else {
            Self::accelerate(self.vel_y.abs(), dt, tuning)
        };
        // Stop at center rather than oscillate across it
        let speed = if dt > 0.0 {
            speed.min(d_center.abs() / dt)
        } else {
            speed
        };
        self.vel_y = dir * speed;
    }

    /// Advance one tick: coast down when uncommanded, move, stay in field.
    pub fn update(&mut self, dt: f32, field: &Rect, tuning: &Tuning) {
        if !self.moved {
            let speed = Self::decelerate(self.vel_y.abs(), dt, tuning);
            self.vel_y = self.vel_y.signum() * speed;
        }
        self.moved = false;
        self.rect.translate(Vec2::new(0.0, self.vel_y * dt));
        if self.rect.top < field.top {
            self.rect.top = field.top;
        } else if self.rect.bottom() > field.bottom() {
            self.rect.set_bottom(field.bottom());
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The ball
    pub ball: Ball,
    /// Human paddle, left side
    pub left_paddle: Paddle,
    /// Computer paddle, right side
    pub right_paddle: Paddle,
    /// The computer player (prediction path is rebuilt every tick)
    #[serde(skip)]
    pub automaton: Automaton,
    /// Balance values this run was started with
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new game with the given seed and balance values
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let ball = Ball::serve(&tuning, &mut rng);
        let left_paddle = Paddle::new(
            crate::consts::PADDLE_MARGIN,
            crate::consts::PADDLE_START_TOP,
            &tuning,
        );
        let right_paddle = Paddle::new(
            tuning.field_width - crate::consts::PADDLE_MARGIN - tuning.paddle_width,
            crate::consts::PADDLE_START_TOP,
            &tuning,
        );
        Self {
            seed,
            rng_state,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ball,
            left_paddle,
            right_paddle,
            automaton: Automaton::default(),
            tuning,
        }
    }

    /// The playing field as a rect
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.field_width, self.tuning.field_height)
    }
}
