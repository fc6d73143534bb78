//! Court data model: canonical logical frame, pixel positions, and the
//! small enums that select geometry behavior.
//!
//! Logical positions are meters in a single portrait frame: x runs across the
//! court from the left doubles sideline, y runs along the court from player 1's
//! baseline (y = 0) to player 2's baseline (y = 23.77). Display orientation
//! never changes stored positions, only the transform in `transform.rs`.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Court constants (ITF dimensions, canonical frame)
// ---------------------------------------------------------------------------

/// Court constants in meters.
pub mod court {
    /// Baseline to baseline.
    pub const LENGTH: f64 = 23.77;
    /// Full doubles width (left doubles sideline is x = 0).
    pub const DOUBLES_WIDTH: f64 = 10.97;
    /// Singles width between the two singles sidelines.
    pub const SINGLES_WIDTH: f64 = 8.23;
    /// Left singles sideline.
    pub const LEFT_SIDELINE: f64 = 1.37;
    /// Right singles sideline.
    pub const RIGHT_SIDELINE: f64 = LEFT_SIDELINE + SINGLES_WIDTH;
    /// Lateral center of the court.
    pub const CENTER_X: f64 = DOUBLES_WIDTH / 2.0;
    /// Net line.
    pub const NET_Y: f64 = LENGTH / 2.0;
    /// Net to service line.
    pub const SERVICE_DEPTH: f64 = 6.40;
    /// Player 1's baseline.
    pub const NEAR_BASELINE: f64 = 0.0;
    /// Player 2's baseline.
    pub const FAR_BASELINE: f64 = LENGTH;
    /// How far beyond a doubles sideline a player may be dragged; also the
    /// margin of surround drawn around the court.
    pub const RUNOFF: f64 = 4.0;
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Logical court position (or displacement) in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Self = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn len2(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn len(self) -> f64 {
        self.len2().sqrt()
    }

    pub fn dist(self, other: Self) -> f64 {
        (other - self).len()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.len();
        if len < 1e-12 || !len.is_finite() {
            return None;
        }
        Some(Self {
            x: self.x / len,
            y: self.y / len,
        })
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}m, {:.2}m)", self.x, self.y)
    }
}

/// Canvas pixel position. Origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Selection enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Surface. Only selects the visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtType {
    Clay,
    #[default]
    Hard,
    Grass,
}

impl CourtType {
    pub const ALL: &[CourtType] = &[CourtType::Clay, CourtType::Hard, CourtType::Grass];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Clay => "Clay",
            Self::Hard => "Hard",
            Self::Grass => "Grass",
        }
    }
}

impl fmt::Display for CourtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clay => write!(f, "clay"),
            Self::Hard => write!(f, "hard"),
            Self::Grass => write!(f, "grass"),
        }
    }
}

/// Singles or doubles. Doubles only adds the partner markers; the geometry
/// engine always works on the two primary players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Singles,
    Doubles,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singles => write!(f, "singles"),
            Self::Doubles => write!(f, "doubles"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// User swing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingType {
    #[default]
    Auto,
    Forehand,
    Backhand,
}

impl fmt::Display for SwingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Forehand => write!(f, "forehand"),
            Self::Backhand => write!(f, "backhand"),
        }
    }
}

/// Effective swing after `SwingType::Auto` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedSwing {
    #[default]
    Forehand,
    Backhand,
}

impl fmt::Display for ResolvedSwing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forehand => write!(f, "forehand"),
            Self::Backhand => write!(f, "backhand"),
        }
    }
}

/// Which half of the court a player owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSide {
    /// Player 1, baseline y = 0.
    Near,
    /// Player 2, baseline y = 23.77.
    Far,
}

impl PlayerSide {
    pub fn opponent(self) -> Self {
        match self {
            Self::Near => Self::Far,
            Self::Far => Self::Near,
        }
    }

    /// This side's own baseline y.
    pub fn baseline_y(self) -> f64 {
        match self {
            Self::Near => court::NEAR_BASELINE,
            Self::Far => court::FAR_BASELINE,
        }
    }

    /// +1 when moving toward the net increases y, -1 otherwise.
    pub fn forward_sign(self) -> f64 {
        match self {
            Self::Near => 1.0,
            Self::Far => -1.0,
        }
    }

    /// Clamp a y coordinate into this side's half, baseline to net.
    pub fn clamp_y(self, y: f64) -> f64 {
        match self {
            Self::Near => y.clamp(court::NEAR_BASELINE, court::NET_Y),
            Self::Far => y.clamp(court::NET_Y, court::FAR_BASELINE),
        }
    }
}

impl fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Near => write!(f, "player1"),
            Self::Far => write!(f, "player2"),
        }
    }
}

/// Shot category for ball-time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    FlatAttack,
    PowerfulTopspin,
    #[default]
    RallyTopspin,
    DefensiveSlice,
}

impl ShotType {
    pub const ALL: &[ShotType] = &[
        ShotType::FlatAttack,
        ShotType::PowerfulTopspin,
        ShotType::RallyTopspin,
        ShotType::DefensiveSlice,
    ];

    /// Average ball speed over the ground, m/s.
    pub fn speed_mps(self) -> f64 {
        match self {
            Self::FlatAttack => 33.0,
            Self::PowerfulTopspin => 28.0,
            Self::RallyTopspin => 22.0,
            Self::DefensiveSlice => 16.0,
        }
    }

    /// Path-length multiplier for the arc over the net (>= 1).
    pub fn curve_factor(self) -> f64 {
        match self {
            Self::FlatAttack => 1.02,
            Self::PowerfulTopspin => 1.10,
            Self::RallyTopspin => 1.15,
            Self::DefensiveSlice => 1.06,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FlatAttack => "Flat attack",
            Self::PowerfulTopspin => "Powerful topspin",
            Self::RallyTopspin => "Rally topspin",
            Self::DefensiveSlice => "Defensive slice",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlatAttack => write!(f, "flat_attack"),
            Self::PowerfulTopspin => write!(f, "powerful_topspin"),
            Self::RallyTopspin => write!(f, "rally_topspin"),
            Self::DefensiveSlice => write!(f, "defensive_slice"),
        }
    }
}

/// The two representative shots each player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    DownTheLine,
    CrossCourt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidelines_are_consistent() {
        assert!((court::RIGHT_SIDELINE - 9.6).abs() < 1e-9);
        assert!((court::DOUBLES_WIDTH - court::RIGHT_SIDELINE - court::LEFT_SIDELINE).abs() < 1e-9);
    }

    #[test]
    fn clamp_y_keeps_players_on_their_half() {
        assert_eq!(PlayerSide::Near.clamp_y(15.0), court::NET_Y);
        assert_eq!(PlayerSide::Far.clamp_y(3.0), court::NET_Y);
        assert_eq!(PlayerSide::Near.clamp_y(2.0), 2.0);
        assert_eq!(PlayerSide::Far.clamp_y(40.0), court::FAR_BASELINE);
        assert_eq!(PlayerSide::Near.clamp_y(-3.0), court::NEAR_BASELINE);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Position::ZERO.normalized().is_none());
        let n = Position::new(3.0, 4.0).normalized().unwrap();
        assert!((n.len() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn every_court_type_is_listed_once() {
        let labels: Vec<_> = CourtType::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Clay", "Hard", "Grass"]);
        assert!(CourtType::ALL.contains(&CourtType::default()));
    }

    #[test]
    fn enums_serialize_snake_case() {
        let s = serde_json::to_string(&ShotType::DefensiveSlice).unwrap();
        assert_eq!(s, "\"defensive_slice\"");
        let o: Orientation = serde_json::from_str("\"landscape\"").unwrap();
        assert_eq!(o, Orientation::Landscape);
    }
}
