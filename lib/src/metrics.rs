//! Scalar metrics for display and the win/lose check.
//!
//! Trajectories are treated as infinite lines through the contact point and
//! the shot endpoint. Projections are never clamped to the drawn segment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Position, ShotType};

/// Player 2 wins the check when standing this close to the optimal position.
pub const WIN_RADIUS: f64 = 0.5;

/// Sideways running speed used for intercept times, m/s.
pub const LATERAL_SPEED: f64 = 4.0;

pub fn distance(a: Position, b: Position) -> f64 {
    a.dist(b)
}

/// Angle between two vectors in degrees, 0..=180. `None` if either is zero.
pub fn angle_deg(v1: Position, v2: Position) -> Option<f64> {
    let denom = v1.len() * v2.len();
    if denom < 1e-12 {
        return None;
    }
    let cos = (v1.dot(v2) / denom).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Lose => write!(f, "lose"),
        }
    }
}

/// Win if `player` is within `WIN_RADIUS` of `optimal`.
pub fn check_win(player: Position, optimal: Position) -> Outcome {
    if player.dist(optimal) < WIN_RADIUS {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Perpendicular distance from `player` to the line through `origin` and
/// `end`. `None` for a zero-length trajectory.
pub fn lateral_interception_distance(origin: Position, end: Position, player: Position) -> Option<f64> {
    let dir = (end - origin).normalized()?;
    let rel = player - origin;
    let along = rel.dot(dir);
    let perp = rel - dir * along;
    Some(perp.len())
}

/// Ball travel from `origin` to where the trajectory line crosses
/// `depth_y`, following the line past `end` if needed. `None` if the
/// trajectory never changes depth.
pub fn intersection_distance(origin: Position, end: Position, depth_y: f64) -> Option<f64> {
    let d = end - origin;
    if d.y.abs() < 1e-9 {
        return None;
    }
    let u = (depth_y - origin.y) / d.y;
    Some((d * u).len())
}

/// Who gets there first: the defender running sideways or the ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptEstimate {
    pub lateral_distance: f64,
    pub player_time: f64,
    pub ball_distance: f64,
    pub ball_time: f64,
}

impl InterceptEstimate {
    pub fn reachable(&self) -> bool {
        self.player_time <= self.ball_time
    }

    /// Spare time (positive) or deficit (negative), seconds.
    pub fn margin(&self) -> f64 {
        self.ball_time - self.player_time
    }
}

/// Intercept estimate for `defender` against the shot `origin → end`.
pub fn intercept_estimate(
    origin: Position,
    end: Position,
    defender: Position,
    shot_type: ShotType,
) -> Option<InterceptEstimate> {
    let lateral_distance = lateral_interception_distance(origin, end, defender)?;
    let ball_distance = intersection_distance(origin, end, defender.y)?;
    Some(InterceptEstimate {
        lateral_distance,
        player_time: lateral_distance / LATERAL_SPEED,
        ball_distance,
        ball_time: ball_distance * shot_type.curve_factor() / shot_type.speed_mps(),
    })
}

/// Per-player shot metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotMetrics {
    pub len_down_line: f64,
    pub len_cross: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f64>,
    pub inter_player_distance: f64,
}

pub fn shot_metrics(
    contact: Position,
    down_the_line: Position,
    cross_court: Position,
    player: Position,
    opponent: Position,
) -> ShotMetrics {
    ShotMetrics {
        len_down_line: distance(contact, down_the_line),
        len_cross: distance(contact, cross_court),
        angle_deg: angle_deg(down_the_line - contact, cross_court - contact),
        inter_player_distance: distance(player, opponent),
    }
}
