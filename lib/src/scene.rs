//! Scene: both players, their shot overrides, and one analysis pass.
//!
//! A `Scene` is a plain value. The UI mutates it through the drag/reset
//! methods and calls `analyze()` every frame. The only memory carried from
//! frame to frame is each player's last auto-resolved swing, which the
//! caller stores back with `commit()`.

use serde::{Deserialize, Serialize};

use crate::{
    AutoShots, Bisector, CourtTransform, CourtlineConfig, GameMode, Handedness, InterceptEstimate,
    Orientation, Outcome, PixelPosition, PlayerSide, Position, ResolvedSwing, ShotKind,
    ShotMetrics, ShotType, SwingType, auto_shot_positions, calculate_bisector, check_win,
    contact_point, court, effective_swing, intercept_estimate, resolve_swing, shot_metrics,
};

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub side: PlayerSide,
    pub position: Position,
    pub handedness: Handedness,
    pub swing: SwingType,
    /// Last output of `resolve_swing` (hysteresis memory).
    pub last_resolved: ResolvedSwing,
    /// Set once the user drags the player; keeps the position across
    /// orientation changes.
    pub has_moved: bool,
}

impl Player {
    pub fn new(side: PlayerSide) -> Self {
        Self {
            side,
            position: default_position(side),
            handedness: Handedness::Right,
            swing: SwingType::Auto,
            last_resolved: ResolvedSwing::Forehand,
            has_moved: false,
        }
    }

    /// Swing to use this frame and the raw auto resolution behind it.
    pub fn swings(&self) -> (ResolvedSwing, ResolvedSwing) {
        let auto = resolve_swing(self.position, self.handedness, self.side, self.last_resolved);
        (effective_swing(self.swing, auto), auto)
    }
}

/// Starting spot: on the baseline, 0.6 m off center (player 1 to the low-x
/// side, player 2 mirrored). Same in both orientations, so it is always
/// inside the drag clamp.
pub fn default_position(side: PlayerSide) -> Position {
    match side {
        PlayerSide::Near => Position::new(court::CENTER_X - 0.6, court::NEAR_BASELINE),
        PlayerSide::Far => Position::new(court::CENTER_X + 0.6, court::FAR_BASELINE),
    }
}

fn clamp_x(x: f64) -> f64 {
    x.clamp(-court::RUNOFF, court::DOUBLES_WIDTH + court::RUNOFF)
}

// ---------------------------------------------------------------------------
// Shot overrides
// ---------------------------------------------------------------------------

/// User-dragged shot endpoints. `None` means "follow the auto target".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotOverrides {
    pub p1_down_the_line: Option<Position>,
    pub p1_cross_court: Option<Position>,
    pub p2_down_the_line: Option<Position>,
    pub p2_cross_court: Option<Position>,
}

impl ShotOverrides {
    pub fn get(&self, side: PlayerSide, kind: ShotKind) -> Option<Position> {
        *self.slot(side, kind)
    }

    fn slot(&self, side: PlayerSide, kind: ShotKind) -> &Option<Position> {
        match (side, kind) {
            (PlayerSide::Near, ShotKind::DownTheLine) => &self.p1_down_the_line,
            (PlayerSide::Near, ShotKind::CrossCourt) => &self.p1_cross_court,
            (PlayerSide::Far, ShotKind::DownTheLine) => &self.p2_down_the_line,
            (PlayerSide::Far, ShotKind::CrossCourt) => &self.p2_cross_court,
        }
    }

    fn slot_mut(&mut self, side: PlayerSide, kind: ShotKind) -> &mut Option<Position> {
        match (side, kind) {
            (PlayerSide::Near, ShotKind::DownTheLine) => &mut self.p1_down_the_line,
            (PlayerSide::Near, ShotKind::CrossCourt) => &mut self.p1_cross_court,
            (PlayerSide::Far, ShotKind::DownTheLine) => &mut self.p2_down_the_line,
            (PlayerSide::Far, ShotKind::CrossCourt) => &mut self.p2_cross_court,
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// A shot endpoint and whether it came from the auto geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotTarget {
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub px: Option<PixelPosition>,
    pub auto: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    pub side: PlayerSide,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_px: Option<PixelPosition>,
    /// Swing in effect (after the user's selection).
    pub swing: ResolvedSwing,
    /// Hysteresis output; feed back through `Scene::commit`.
    pub auto_swing: ResolvedSwing,
    pub contact: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_px: Option<PixelPosition>,
    pub down_the_line: ShotTarget,
    pub cross_court: ShotTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bisector: Option<Bisector>,
    pub metrics: ShotMetrics,
    /// Opponent against the down-the-line shot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept_down_the_line: Option<InterceptEstimate>,
    /// Opponent against the cross-court shot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept_cross: Option<InterceptEstimate>,
}

impl PlayerAnalysis {
    pub fn shot(&self, kind: ShotKind) -> &ShotTarget {
        match kind {
            ShotKind::DownTheLine => &self.down_the_line,
            ShotKind::CrossCourt => &self.cross_court,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    pub orientation: Orientation,
    pub shot_type: ShotType,
    pub player1: PlayerAnalysis,
    pub player2: PlayerAnalysis,
    /// Player 2 against player 1's optimal position. `None` when player 1's
    /// bisector never reaches player 2's baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl SceneAnalysis {
    pub fn player(&self, side: PlayerSide) -> &PlayerAnalysis {
        match side {
            PlayerSide::Near => &self.player1,
            PlayerSide::Far => &self.player2,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub orientation: Orientation,
    pub game_mode: GameMode,
    pub shot_type: ShotType,
    pub player1: Player,
    pub player2: Player,
    #[serde(default)]
    pub shots: ShotOverrides,
}

impl Scene {
    pub fn default_for(orientation: Orientation) -> Self {
        Self {
            orientation,
            game_mode: GameMode::default(),
            shot_type: ShotType::default(),
            player1: Player::new(PlayerSide::Near),
            player2: Player::new(PlayerSide::Far),
            shots: ShotOverrides::default(),
        }
    }

    /// Scene with the selections from a persisted config.
    pub fn from_config(config: &CourtlineConfig) -> Self {
        let mut scene = Self::default_for(config.orientation);
        scene.apply_config(config);
        scene
    }

    /// Copy selections from `config`. Positions are left alone unless the
    /// orientation changes.
    pub fn apply_config(&mut self, config: &CourtlineConfig) {
        self.game_mode = config.game_mode;
        self.shot_type = config.shot_type;
        self.player1.handedness = config.player1.handedness;
        self.player1.swing = config.player1.swing;
        self.player2.handedness = config.player2.handedness;
        self.player2.swing = config.player2.swing;
        if self.orientation != config.orientation {
            self.reset_for_orientation(config.orientation);
        }
    }

    pub fn player(&self, side: PlayerSide) -> &Player {
        match side {
            PlayerSide::Near => &self.player1,
            PlayerSide::Far => &self.player2,
        }
    }

    pub fn player_mut(&mut self, side: PlayerSide) -> &mut Player {
        match side {
            PlayerSide::Near => &mut self.player1,
            PlayerSide::Far => &mut self.player2,
        }
    }

    /// Switch orientation. Players the user has not moved go back to their
    /// default spot.
    pub fn reset_for_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        for side in [PlayerSide::Near, PlayerSide::Far] {
            let p = self.player_mut(side);
            if !p.has_moved {
                p.position = default_position(side);
            }
        }
    }

    /// Move a player, keeping them between their baseline and the net.
    pub fn drag_player(&mut self, side: PlayerSide, to: Position) {
        let p = self.player_mut(side);
        p.position = Position::new(clamp_x(to.x), side.clamp_y(to.y));
        p.has_moved = true;
    }

    /// Double-click: back to the default spot, forget the drag.
    pub fn reset_player(&mut self, side: PlayerSide) {
        let p = self.player_mut(side);
        p.position = default_position(side);
        p.has_moved = false;
    }

    /// Pin a shot endpoint, kept on the opponent's half.
    pub fn drag_shot(&mut self, side: PlayerSide, kind: ShotKind, to: Position) {
        let target = side.opponent();
        *self.shots.slot_mut(side, kind) = Some(Position::new(clamp_x(to.x), target.clamp_y(to.y)));
    }

    /// Double-click: let the shot follow the auto target again.
    pub fn reset_shot(&mut self, side: PlayerSide, kind: ShotKind) {
        *self.shots.slot_mut(side, kind) = None;
    }

    /// Doubles partners, one per team at the net on the opposite half of
    /// the court from their teammate. Empty in singles.
    pub fn secondary_players(&self) -> Vec<(PlayerSide, Position)> {
        if self.game_mode != GameMode::Doubles {
            return Vec::new();
        }
        [PlayerSide::Near, PlayerSide::Far]
            .into_iter()
            .map(|side| {
                let mate = self.player(side).position;
                let x = if mate.x < court::CENTER_X {
                    court::CENTER_X + court::SINGLES_WIDTH / 4.0
                } else {
                    court::CENTER_X - court::SINGLES_WIDTH / 4.0
                };
                let y = court::NET_Y - side.forward_sign() * court::SERVICE_DEPTH / 2.0;
                (side, Position::new(x, y))
            })
            .collect()
    }

    fn analyze_player(&self, side: PlayerSide, transform: Option<&CourtTransform>) -> PlayerAnalysis {
        let player = self.player(side);
        let opponent = self.player(side.opponent());
        let (swing, auto_swing) = player.swings();

        let contact = contact_point(
            player.position,
            player.handedness,
            swing,
            side,
            self.orientation,
            transform,
        );
        let AutoShots {
            down_the_line,
            cross_court,
        } = auto_shot_positions(player.position, contact, side);

        let target = |kind: ShotKind, auto_pos: Position| {
            let (position, auto) = match self.shots.get(side, kind) {
                Some(p) => (p, false),
                None => (auto_pos, true),
            };
            ShotTarget {
                position,
                px: transform.map(|tf| tf.court_to_px(position)),
                auto,
            }
        };
        let dtl = target(ShotKind::DownTheLine, down_the_line);
        let cross = target(ShotKind::CrossCourt, cross_court);

        let bisector = calculate_bisector(
            contact,
            dtl.position,
            cross.position,
            transform,
            side.opponent().baseline_y(),
        );

        PlayerAnalysis {
            side,
            position: player.position,
            position_px: transform.map(|tf| tf.court_to_px(player.position)),
            swing,
            auto_swing,
            contact,
            contact_px: transform.map(|tf| tf.court_to_px(contact)),
            down_the_line: dtl,
            cross_court: cross,
            bisector,
            metrics: shot_metrics(
                contact,
                dtl.position,
                cross.position,
                player.position,
                opponent.position,
            ),
            intercept_down_the_line: intercept_estimate(
                contact,
                dtl.position,
                opponent.position,
                self.shot_type,
            ),
            intercept_cross: intercept_estimate(
                contact,
                cross.position,
                opponent.position,
                self.shot_type,
            ),
        }
    }

    /// Run the full pipeline for both players. Pure; pass the result to
    /// `commit` to advance the swing hysteresis.
    pub fn analyze(&self, transform: Option<&CourtTransform>) -> SceneAnalysis {
        let player1 = self.analyze_player(PlayerSide::Near, transform);
        let player2 = self.analyze_player(PlayerSide::Far, transform);
        let outcome = player1
            .bisector
            .as_ref()
            .and_then(|b| b.optimal_p2)
            .map(|opt| check_win(self.player2.position, opt.position));
        SceneAnalysis {
            orientation: self.orientation,
            shot_type: self.shot_type,
            player1,
            player2,
            outcome,
        }
    }

    /// Store the auto swings from `analysis` as the hysteresis memory.
    pub fn commit(&mut self, analysis: &SceneAnalysis) {
        self.player1.last_resolved = analysis.player1.auto_swing;
        self.player2.last_resolved = analysis.player2.auto_swing;
    }

    /// Win/lose check of player 2's position.
    pub fn check(&self, transform: Option<&CourtTransform>) -> Option<Outcome> {
        self.analyze(transform).outcome
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::default_for(Orientation::default())
    }
}
