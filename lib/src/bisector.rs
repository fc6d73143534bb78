//! Angle bisector of a player's two shots and the optimal defensive position
//! where it crosses the opponent's baseline.

use serde::{Deserialize, Serialize};

use crate::{CourtTransform, PixelPosition, PlayerSide, Position, court};

/// Length of the drawn bisector ray, meters. Only sets how far the line
/// extends on screen.
pub const BISECTOR_DRAW_LENGTH: f64 = 50.0;

/// A point on a baseline, in both frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalPosition {
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub px: Option<PixelPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bisector {
    pub origin: Position,
    /// Unit direction.
    pub direction: Position,
    /// Far end of the drawn ray.
    pub end: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_px: Option<PixelPosition>,
    /// Set when the target baseline is player 1's (y = 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_p1: Option<OptimalPosition>,
    /// Set when the target baseline is player 2's (y = 23.77).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_p2: Option<OptimalPosition>,
}

impl Bisector {
    /// Whichever optimal position was computed.
    pub fn optimal(&self) -> Option<&OptimalPosition> {
        self.optimal_p1.as_ref().or(self.optimal_p2.as_ref())
    }

    /// Angle of the bisector from the +x axis, degrees.
    pub fn angle_deg(&self) -> f64 {
        self.direction.y.atan2(self.direction.x).to_degrees()
    }
}

/// Unit bisector of `origin→a` and `origin→b`: the normalized sum of the two
/// unit vectors. `None` if either shot has zero length or the shots point in
/// opposite directions.
pub fn bisector_direction(origin: Position, a: Position, b: Position) -> Option<Position> {
    let ua = (a - origin).normalized()?;
    let ub = (b - origin).normalized()?;
    (ua + ub).normalized()
}

/// Where the ray from `origin` along `direction` crosses `y = baseline_y`.
///
/// `None` if the ray is parallel to the baseline or points away from it.
pub fn baseline_intersection(
    origin: Position,
    direction: Position,
    baseline_y: f64,
) -> Option<Position> {
    if direction.y.abs() < 1e-9 {
        return None;
    }
    let t = (baseline_y - origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Whose baseline `y` is: player 1's at 0, player 2's at the far end.
fn baseline_owner(y: f64) -> PlayerSide {
    if (y - court::NEAR_BASELINE).abs() <= (y - court::FAR_BASELINE).abs() {
        PlayerSide::Near
    } else {
        PlayerSide::Far
    }
}

/// Bisector of the two shots from `origin`, with its crossing of
/// `target_baseline_y`. Pixel fields are filled when a transform is given.
pub fn calculate_bisector(
    origin: Position,
    target1: Position,
    target2: Position,
    transform: Option<&CourtTransform>,
    target_baseline_y: f64,
) -> Option<Bisector> {
    let Some(direction) = bisector_direction(origin, target1, target2) else {
        log::debug!("bisector unavailable: origin {origin}, targets {target1} {target2}");
        return None;
    };

    let end = origin + direction * BISECTOR_DRAW_LENGTH;
    let optimal = baseline_intersection(origin, direction, target_baseline_y).map(|position| {
        OptimalPosition {
            position,
            px: transform.map(|tf| tf.court_to_px(position)),
        }
    });
    if optimal.is_none() {
        log::trace!("bisector from {origin} never reaches y={target_baseline_y}");
    }

    let (optimal_p1, optimal_p2) = match baseline_owner(target_baseline_y) {
        PlayerSide::Near => (optimal, None),
        PlayerSide::Far => (None, optimal),
    };

    Some(Bisector {
        origin,
        direction,
        end,
        end_px: transform.map(|tf| tf.court_to_px(end)),
        optimal_p1,
        optimal_p2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasSize, Orientation};

    #[test]
    fn symmetric_targets_give_vertical_bisector() {
        let origin = Position::new(5.0, 1.0);
        // very different lengths, mirror-image directions
        let a = Position::new(5.0 - 1.0, 1.0 + 3.0);
        let b = Position::new(5.0 + 6.0, 1.0 + 18.0);
        let bis = calculate_bisector(origin, a, b, None, court::FAR_BASELINE).unwrap();
        assert!((bis.angle_deg() - 90.0).abs() < 1e-9);
        assert!(bis.direction.x.abs() < 1e-12);
    }

    #[test]
    fn unit_sum_differs_from_raw_average() {
        let origin = Position::ZERO;
        let a = Position::new(1.0, 1.0);
        let b = Position::new(-10.0, 10.0);
        let dir = bisector_direction(origin, a, b).unwrap();
        assert!(dir.x.abs() < 1e-12);
        let raw = ((a - origin) + (b - origin)).normalized().unwrap();
        assert!(raw.x < -0.5);
    }

    #[test]
    fn optimal_lands_on_target_baseline() {
        let origin = Position::new(court::CENTER_X, 0.0);
        let bis = calculate_bisector(
            origin,
            Position::new(court::LEFT_SIDELINE, court::FAR_BASELINE),
            Position::new(court::RIGHT_SIDELINE, court::FAR_BASELINE),
            None,
            court::FAR_BASELINE,
        )
        .unwrap();
        assert!(bis.optimal_p1.is_none());
        let opt = bis.optimal_p2.unwrap().position;
        assert!((opt.x - court::CENTER_X).abs() < 1e-9);
        assert!((opt.y - court::FAR_BASELINE).abs() < 1e-9);
        assert!((bis.end.dist(origin) - BISECTOR_DRAW_LENGTH).abs() < 1e-9);
    }

    #[test]
    fn field_follows_target_baseline_not_origin() {
        let origin = Position::new(5.0, 20.0);
        let bis = calculate_bisector(
            origin,
            Position::new(2.0, 0.0),
            Position::new(9.0, 2.0),
            None,
            court::NEAR_BASELINE,
        )
        .unwrap();
        assert!(bis.optimal_p1.is_some());
        assert!(bis.optimal_p2.is_none());
        assert!(bis.optimal().unwrap().position.y.abs() < 1e-9);
    }

    #[test]
    fn parallel_bisector_has_no_optimal() {
        let origin = Position::new(5.0, 5.0);
        let bis = calculate_bisector(
            origin,
            Position::new(10.0, 6.0),
            Position::new(10.0, 4.0),
            None,
            court::FAR_BASELINE,
        )
        .unwrap();
        assert!(bis.optimal().is_none());
        assert!(bis.end.is_finite());
    }

    #[test]
    fn degenerate_shots_have_no_bisector() {
        let origin = Position::new(5.0, 5.0);
        assert!(calculate_bisector(origin, origin, Position::new(1.0, 20.0), None, 23.77).is_none());
        assert!(
            calculate_bisector(
                origin,
                Position::new(5.0, 10.0),
                Position::new(5.0, 0.0),
                None,
                23.77
            )
            .is_none()
        );
    }

    #[test]
    fn pixels_filled_with_transform() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(1000.0, 1600.0),
            Orientation::Portrait,
        )
        .unwrap();
        let bis = calculate_bisector(
            Position::new(court::CENTER_X, 1.0),
            Position::new(court::LEFT_SIDELINE, court::FAR_BASELINE),
            Position::new(court::RIGHT_SIDELINE, court::FAR_BASELINE),
            Some(&tf),
            court::FAR_BASELINE,
        )
        .unwrap();
        let opt = bis.optimal_p2.unwrap();
        let px = opt.px.unwrap();
        assert!((px.y - 265.0).abs() < 1e-9);
        assert!((px.x - 500.0).abs() < 1e-9);
        assert!(bis.end_px.is_some());
    }
}
