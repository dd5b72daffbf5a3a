//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, Path, Rect};

/// Width of the debug prediction line in field pixels
const PREDICTION_WIDTH: f32 = 3.0;

/// Generate two triangles covering an axis-aligned rect
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let c = r.corners();
    vec![
        Vertex::new(c.top_left.x, c.top_left.y, color),
        Vertex::new(c.bottom_left.x, c.bottom_left.y, color),
        Vertex::new(c.top_right.x, c.top_right.y, color),
        Vertex::new(c.top_right.x, c.top_right.y, color),
        Vertex::new(c.bottom_left.x, c.bottom_left.y, color),
        Vertex::new(c.bottom_right.x, c.bottom_right.y, color),
    ]
}

/// Generate quads along a polyline, one per segment
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for pair in points.windows(2) {
        let dir = (pair[1] - pair[0]).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let a1 = pair[0] + perp * half;
        let b1 = pair[0] - perp * half;
        let a2 = pair[1] + perp * half;
        let b2 = pair[1] - perp * half;

        vertices.push(Vertex::new(a1.x, a1.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(a2.x, a2.y, color));

        vertices.push(Vertex::new(a2.x, a2.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(b2.x, b2.y, color));
    }
    vertices
}

/// Build the full frame's vertex list from the game state.
///
/// Debug mode adds the computer player's projected ball path underneath
/// the pieces. A paused game is drawn dimmed.
pub fn scene(state: &GameState, debug: bool) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    if debug {
        vertices.extend(prediction(&state.automaton.prediction));
    }

    vertices.extend(rect(&state.left_paddle.rect, colors::PADDLE));
    vertices.extend(rect(&state.right_paddle.rect, colors::PADDLE));
    vertices.extend(rect(&state.ball.rect, colors::BALL));

    if state.phase == GamePhase::Paused {
        vertices.extend(rect(&state.field(), colors::PAUSE_DIM));
    }

    vertices
}

fn prediction(path: &Path) -> Vec<Vertex> {
    polyline(&path.points, PREDICTION_WIDTH, colors::PREDICTION)
}
