//! Deterministic game simulation
//!
//! Pure state-in, state-out code with no platform or rendering concerns.
//! The app layer drives it through [`tick`] at a fixed timestep.

pub mod automaton;
pub mod geometry;
pub mod state;
pub mod tick;

pub use automaton::{Automaton, Path};
pub use geometry::{Corners, Rect, Segment, Sides, reflect};
pub use state::{Ball, GamePhase, GameState, Paddle, RngState};
pub use tick::{TickInput, tick};
