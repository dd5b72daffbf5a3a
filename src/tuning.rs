//! Data-driven game balance
//!
//! Every gameplay constant lives here with its built-in default, so balance
//! can be tweaked from a JSON file next to the binary without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{AppError, Result};

/// Gameplay balance values.
///
/// Defaults reproduce the classic feel; any field may be overridden from a
/// `pong-tuning.json` file in the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Field dimensions in pixels
    pub field_width: f32,
    pub field_height: f32,

    /// Ball edge length (the ball is square)
    pub ball_size: f32,
    /// Serve angle in degrees above +x; `None` draws one from the seeded RNG
    pub ball_start_angle_deg: Option<f32>,
    /// Ball speed range (px/s); paddle hits add `ball_speed_incr` up to max
    pub ball_min_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_incr: f32,
    /// Flight angle band from the x axis (degrees), enforced by spin
    pub ball_min_angle_deg: f32,
    pub ball_max_angle_deg: f32,

    /// Paddle geometry
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle speed range and ramps (px/s, px/s^2)
    pub paddle_min_speed: f32,
    pub paddle_max_speed: f32,
    pub paddle_accel: f32,
    pub paddle_decel: f32,

    /// Spin imparted by off-center hits (degrees, clamped to ±half)
    pub sauce_multiplier: f32,

    /// Top/bottom bounces the computer player projects ahead
    pub predict_max_reflections: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_size: BALL_SIZE,
            ball_start_angle_deg: Some(BALL_START_ANGLE_DEG),
            ball_min_speed: BALL_MIN_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_speed_incr: BALL_SPEED_INCR,
            ball_min_angle_deg: BALL_MIN_ANGLE_DEG,
            ball_max_angle_deg: BALL_MAX_ANGLE_DEG,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_min_speed: PADDLE_MIN_SPEED,
            paddle_max_speed: PADDLE_MAX_SPEED,
            paddle_accel: PADDLE_ACCEL,
            paddle_decel: PADDLE_DECEL,

            sauce_multiplier: SAUCE_MULTIPLIER,

            predict_max_reflections: PREDICT_MAX_REFLECTIONS,
        }
    }
}

impl Tuning {
    /// Override file looked up in the working directory
    pub const FILE_NAME: &'static str = "pong-tuning.json";

    /// Maximum spin per hit in degrees (half the multiplier, either sign)
    pub fn sauce_max(&self) -> f32 {
        self.sauce_multiplier / 2.0
    }

    /// Load tuning from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::TuningRead {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = serde_json::from_str(&text).map_err(|source| AppError::TuningParse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(tuning)
    }

    /// Load the override file if present, otherwise the defaults.
    ///
    /// A present-but-broken file is an error; silently ignoring a typo'd
    /// override would be worse than refusing to start.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new(Self::FILE_NAME);
        if path.exists() {
            let tuning = Self::load(path)?;
            log::info!("Loaded tuning overrides from {}", path.display());
            Ok(tuning)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.field_width, FIELD_WIDTH);
        assert_eq!(t.ball_min_speed, BALL_MIN_SPEED);
        assert_eq!(t.paddle_height, PADDLE_HEIGHT);
        assert_eq!(t.sauce_max(), SAUCE_MAX);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"ball_min_speed": 900.0}"#)
            .expect("partial tuning should deserialize");
        assert_eq!(t.ball_min_speed, 900.0);
        assert_eq!(t.ball_max_speed, BALL_MAX_SPEED);
        assert_eq!(t.field_height, FIELD_HEIGHT);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = Tuning::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(err, Err(AppError::TuningRead { .. })));
    }
}
