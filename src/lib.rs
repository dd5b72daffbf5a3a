//! Pong - the classic, against a merciless computer opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, the computer player)
//! - `renderer`: WebGPU rendering pipeline
//! - `app`: Native window, input, and the real-time game loop
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use app::Game;
pub use error::{AppError, Result};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are in field pixels per second (per-frame values at a 60 FPS
/// baseline, times 60).
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions (y grows downward, origin top-left)
    pub const FIELD_WIDTH: f32 = 1600.0;
    pub const FIELD_HEIGHT: f32 = 1000.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Serve angle in degrees above the +x axis
    pub const BALL_START_ANGLE_DEG: f32 = 48.0;
    pub const BALL_MIN_SPEED: f32 = 1200.0;
    pub const BALL_MAX_SPEED: f32 = 4800.0;
    /// Speed gained on each paddle hit
    pub const BALL_SPEED_INCR: f32 = 60.0;
    /// Flight angle is kept within this band from the x axis (degrees)
    pub const BALL_MIN_ANGLE_DEG: f32 = 20.0;
    pub const BALL_MAX_ANGLE_DEG: f32 = 70.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    pub const PADDLE_MIN_SPEED: f32 = 1440.0;
    pub const PADDLE_MAX_SPEED: f32 = 2400.0;
    /// Ramp rates while holding / after releasing a direction (px/s^2)
    pub const PADDLE_ACCEL: f32 = 7200.0;
    pub const PADDLE_DECEL: f32 = 14400.0;
    /// Horizontal inset of each paddle from its wall
    pub const PADDLE_MARGIN: f32 = 100.0;
    /// Initial distance of each paddle from the top of the field
    pub const PADDLE_START_TOP: f32 = 50.0;

    /// Spin ("sauce") imparted by off-center paddle hits, in degrees
    pub const SAUCE_MULTIPLIER: f32 = 30.0;
    pub const SAUCE_MAX: f32 = SAUCE_MULTIPLIER / 2.0;

    /// Bounces off the top/bottom edges the computer player will project
    pub const PREDICT_MAX_REFLECTIONS: u32 = 5;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    while angle >= TAU {
        angle -= TAU;
    }
    while angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Convert polar (speed, theta) to a field-space velocity.
///
/// Theta is measured counter-clockwise from +x as on paper; field space is
/// y-down, so the y component is negated.
#[inline]
pub fn polar_to_velocity(speed: f32, theta: f32) -> Vec2 {
    Vec2::new(speed * theta.cos(), -speed * theta.sin())
}

/// Convert a field-space velocity to polar (speed, theta)
#[inline]
pub fn velocity_to_polar(vel: Vec2) -> (f32, f32) {
    (vel.length(), normalize_angle((-vel.y).atan2(vel.x)))
}
