//! Swing resolution and racket contact point.
//!
//! `resolve_swing` is a one-step memory: its output depends on the current
//! lateral position and the caller-held previous output. Inside the
//! hysteresis band the previous swing is returned unchanged.

use crate::{
    CourtTransform, Handedness, Orientation, PlayerSide, Position, ResolvedSwing, SwingType,
    court,
};

/// Half-width of the hysteresis band, as a fraction of the singles width.
pub const SWING_HYSTERESIS: f64 = 0.125;

/// Shoulder to racket tip, meters.
pub const ARM_LENGTH: f64 = 1.3;

/// Fraction of `ARM_LENGTH` where the ball meets the strings.
pub const CONTACT_RATIO: f64 = 0.75;

/// Angle between the facing direction and the swing side, degrees.
const SWING_SPREAD_DEG: f64 = 60.0;

/// Whether this player's forehand is on the high-x side of the canonical
/// frame. Player 1 faces +y, player 2 faces -y.
fn forehand_on_high_x(handedness: Handedness, side: PlayerSide) -> bool {
    matches!(
        (side, handedness),
        (PlayerSide::Near, Handedness::Right) | (PlayerSide::Far, Handedness::Left)
    )
}

/// Swing threshold across the singles court (0 = left sideline, 1 = right).
/// Shifted toward the backhand side: players take the forehand a little
/// past the middle.
fn swing_threshold(handedness: Handedness, side: PlayerSide) -> f64 {
    if forehand_on_high_x(handedness, side) {
        0.4
    } else {
        0.6
    }
}

/// Lateral position across the singles court, 0 at the left sideline and
/// 1 at the right. Not clamped.
pub fn relative_lateral(x: f64) -> f64 {
    (x - court::LEFT_SIDELINE) / court::SINGLES_WIDTH
}

/// Resolve forehand/backhand from lateral position with hysteresis.
pub fn resolve_swing(
    position: Position,
    handedness: Handedness,
    side: PlayerSide,
    previous: ResolvedSwing,
) -> ResolvedSwing {
    let rel = relative_lateral(position.x);
    let center = swing_threshold(handedness, side);
    let (low, high) = if forehand_on_high_x(handedness, side) {
        (ResolvedSwing::Backhand, ResolvedSwing::Forehand)
    } else {
        (ResolvedSwing::Forehand, ResolvedSwing::Backhand)
    };

    if rel < center - SWING_HYSTERESIS {
        low
    } else if rel > center + SWING_HYSTERESIS {
        high
    } else {
        previous
    }
}

/// Apply the user's selection: explicit swings win, `Auto` takes `resolved`.
pub fn effective_swing(selection: SwingType, resolved: ResolvedSwing) -> ResolvedSwing {
    match selection {
        SwingType::Auto => resolved,
        SwingType::Forehand => ResolvedSwing::Forehand,
        SwingType::Backhand => ResolvedSwing::Backhand,
    }
}

/// Arm + racket angle in degrees, screen convention with y up (0 = screen
/// right, 90 = screen up).
pub fn swing_angle_deg(
    handedness: Handedness,
    swing: ResolvedSwing,
    side: PlayerSide,
    orientation: Orientation,
) -> f64 {
    let facing = match (orientation, side) {
        (Orientation::Portrait, PlayerSide::Near) => 90.0,
        (Orientation::Portrait, PlayerSide::Far) => 270.0,
        (Orientation::Landscape, PlayerSide::Near) => 0.0,
        (Orientation::Landscape, PlayerSide::Far) => 180.0,
    };
    // Right-handed forehand sits clockwise of the facing direction.
    let offset = match (handedness, swing) {
        (Handedness::Right, ResolvedSwing::Forehand) | (Handedness::Left, ResolvedSwing::Backhand) => {
            -SWING_SPREAD_DEG
        }
        (Handedness::Right, ResolvedSwing::Backhand) | (Handedness::Left, ResolvedSwing::Forehand) => {
            SWING_SPREAD_DEG
        }
    };
    (facing + offset).rem_euclid(360.0)
}

/// Unit direction in the canonical logical frame for a screen angle.
fn logical_direction(theta_deg: f64, orientation: Orientation) -> Position {
    let (sin, cos) = theta_deg.to_radians().sin_cos();
    match orientation {
        // screen right = +x, screen up = +y
        Orientation::Portrait => Position::new(cos, sin),
        // screen right = +y, screen up = -x
        Orientation::Landscape => Position::new(-sin, cos),
    }
}

/// Racket contact point: the true origin of every shot.
///
/// With a transform, the arm is laid out in pixels at the local
/// pixels-per-meter scale and mapped back, so the offset looks the same
/// length on screen everywhere on the court. Without one (before the first
/// layout) the offset is applied flat in meters.
pub fn contact_point(
    player: Position,
    handedness: Handedness,
    swing: ResolvedSwing,
    side: PlayerSide,
    orientation: Orientation,
    transform: Option<&CourtTransform>,
) -> Position {
    let theta = swing_angle_deg(handedness, swing, side, orientation);
    let reach = ARM_LENGTH * CONTACT_RATIO;
    let flat = || player + logical_direction(theta, orientation) * reach;

    let Some(tf) = transform else {
        return flat();
    };
    if tf.orientation() != orientation {
        log::debug!("contact_point: transform is {}, wanted {orientation}", tf.orientation());
        return flat();
    }

    let px = tf.court_to_px(player);
    let reach_px = reach * tf.local_scale_at(player).mean();
    let (sin, cos) = theta.to_radians().sin_cos();
    let contact_px = crate::PixelPosition::new(px.x + cos * reach_px, px.y - sin * reach_px);
    tf.px_to_court(contact_px).unwrap_or_else(flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasSize;
    use proptest::prelude::*;

    fn at_rel(rel: f64) -> Position {
        Position::new(court::LEFT_SIDELINE + rel * court::SINGLES_WIDTH, 2.0)
    }

    #[test]
    fn monotonic_sweep_switches_once_each_way() {
        let mut swing = ResolvedSwing::Backhand;
        let mut changes = 0;
        for i in 0..=200 {
            let next = resolve_swing(at_rel(i as f64 / 200.0), Handedness::Right, PlayerSide::Near, swing);
            if next != swing {
                changes += 1;
            }
            swing = next;
        }
        assert_eq!(changes, 1);
        assert_eq!(swing, ResolvedSwing::Forehand);

        changes = 0;
        for i in (0..=200).rev() {
            let next = resolve_swing(at_rel(i as f64 / 200.0), Handedness::Right, PlayerSide::Near, swing);
            if next != swing {
                changes += 1;
            }
            swing = next;
        }
        assert_eq!(changes, 1);
        assert_eq!(swing, ResolvedSwing::Backhand);
    }

    #[test]
    fn band_keeps_previous() {
        let center = at_rel(0.4);
        for prev in [ResolvedSwing::Forehand, ResolvedSwing::Backhand] {
            assert_eq!(resolve_swing(center, Handedness::Right, PlayerSide::Near, prev), prev);
        }
    }

    #[test]
    fn sides_and_hands_mirror() {
        let right_edge = at_rel(0.95);
        let prev = ResolvedSwing::Forehand;
        assert_eq!(
            resolve_swing(right_edge, Handedness::Right, PlayerSide::Near, prev),
            ResolvedSwing::Forehand
        );
        assert_eq!(
            resolve_swing(right_edge, Handedness::Left, PlayerSide::Near, prev),
            ResolvedSwing::Backhand
        );
        assert_eq!(
            resolve_swing(right_edge, Handedness::Right, PlayerSide::Far, prev),
            ResolvedSwing::Backhand
        );
        assert_eq!(
            resolve_swing(right_edge, Handedness::Left, PlayerSide::Far, prev),
            ResolvedSwing::Forehand
        );
    }

    #[test]
    fn explicit_selection_overrides_auto() {
        assert_eq!(
            effective_swing(SwingType::Backhand, ResolvedSwing::Forehand),
            ResolvedSwing::Backhand
        );
        assert_eq!(
            effective_swing(SwingType::Auto, ResolvedSwing::Forehand),
            ResolvedSwing::Forehand
        );
    }

    #[test]
    fn portrait_angles_match_table() {
        let a = |h, s, side| swing_angle_deg(h, s, side, Orientation::Portrait);
        assert_eq!(a(Handedness::Right, ResolvedSwing::Forehand, PlayerSide::Near), 30.0);
        assert_eq!(a(Handedness::Right, ResolvedSwing::Backhand, PlayerSide::Near), 150.0);
        assert_eq!(a(Handedness::Left, ResolvedSwing::Forehand, PlayerSide::Near), 150.0);
        assert_eq!(a(Handedness::Right, ResolvedSwing::Forehand, PlayerSide::Far), 210.0);
    }

    #[test]
    fn landscape_angles_are_sixty_off_facing() {
        let a = |s, side| swing_angle_deg(Handedness::Right, s, side, Orientation::Landscape);
        assert_eq!(a(ResolvedSwing::Forehand, PlayerSide::Near), 300.0);
        assert_eq!(a(ResolvedSwing::Backhand, PlayerSide::Near), 60.0);
        assert_eq!(a(ResolvedSwing::Forehand, PlayerSide::Far), 120.0);
    }

    #[test]
    fn flat_fallback_is_orientation_independent() {
        let p = Position::new(5.0, 3.0);
        let portrait = contact_point(
            p,
            Handedness::Right,
            ResolvedSwing::Forehand,
            PlayerSide::Near,
            Orientation::Portrait,
            None,
        );
        let landscape = contact_point(
            p,
            Handedness::Right,
            ResolvedSwing::Forehand,
            PlayerSide::Near,
            Orientation::Landscape,
            None,
        );
        assert!(portrait.dist(landscape) < 1e-9);
        // forehand of a right-handed player 1 is to the right and forward
        assert!(portrait.x > p.x && portrait.y > p.y);
        assert!((portrait.dist(p) - ARM_LENGTH * CONTACT_RATIO).abs() < 1e-9);
    }

    #[test]
    fn transform_contact_close_to_flat_on_flat_art() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(1600.0, 1000.0),
            Orientation::Landscape,
        )
        .unwrap();
        let p = Position::new(4.0, 20.0);
        let args = (Handedness::Left, ResolvedSwing::Backhand, PlayerSide::Far, Orientation::Landscape);
        let with_tf = contact_point(p, args.0, args.1, args.2, args.3, Some(&tf));
        let flat = contact_point(p, args.0, args.1, args.2, args.3, None);
        assert!(with_tf.dist(flat) < 0.01, "{with_tf:?} vs {flat:?}");
    }

    #[test]
    fn portrait_perspective_keeps_screen_length() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(1000.0, 1600.0),
            Orientation::Portrait,
        )
        .unwrap();
        let p = Position::new(court::CENTER_X, 22.0);
        let c = contact_point(
            p,
            Handedness::Right,
            ResolvedSwing::Backhand,
            PlayerSide::Far,
            Orientation::Portrait,
            Some(&tf),
        );
        let expected_px = ARM_LENGTH * CONTACT_RATIO * tf.local_scale_at(p).mean();
        let got_px = tf.court_to_px(p).dist(tf.court_to_px(c));
        assert!((got_px - expected_px).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_no_flicker_inside_band(offsets in proptest::collection::vec(-0.12f64..0.12, 1..40)) {
            for prev in [ResolvedSwing::Forehand, ResolvedSwing::Backhand] {
                let mut swing = prev;
                for off in &offsets {
                    swing = resolve_swing(at_rel(0.6 + off), Handedness::Right, PlayerSide::Far, swing);
                    prop_assert_eq!(swing, prev);
                }
            }
        }
    }
}
