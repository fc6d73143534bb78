//! Court ↔ canvas coordinate transform.
//!
//! The background art for each orientation marks the four corners of the
//! singles court. Those anchors live in the art's own pixel space and are
//! scaled to the current canvas. Between them the mapping is bilinear, so
//! pixels-per-meter varies across the court (perspective in portrait).
//!
//! Both orientations share one routine. The depth parameter `s` (logical y)
//! drives a "straight" pixel axis whose two edges are parallel: pixel y in
//! portrait, pixel x in landscape. The lateral parameter `t` (logical x)
//! interpolates along each of those two edges, and the results are blended
//! with `s` on the "cross" axis.

use serde::{Deserialize, Serialize};

use crate::{GeometryError, Orientation, PixelPosition, Position, court};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Singles-court corners as drawn on the background art.
///
/// Portrait: top = player 2's baseline, left = left singles sideline.
/// Landscape: left = player 1's baseline, top = left singles sideline.
/// Each baseline edge is level on the straight axis; the depth coordinate of
/// an edge is read from its first anchor (`top_left` / `bottom_left` in
/// portrait, `top_left` / `top_right` in landscape).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtAnchors {
    pub top_left: PixelPosition,
    pub top_right: PixelPosition,
    pub bottom_left: PixelPosition,
    pub bottom_right: PixelPosition,
}

impl CourtAnchors {
    fn scaled(&self, sx: f64, sy: f64) -> Self {
        let s = |p: PixelPosition| PixelPosition::new(p.x * sx, p.y * sy);
        Self {
            top_left: s(self.top_left),
            top_right: s(self.top_right),
            bottom_left: s(self.bottom_left),
            bottom_right: s(self.bottom_right),
        }
    }
}

/// Background art dimensions plus its anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtBackground {
    pub size: CanvasSize,
    pub anchors: CourtAnchors,
}

impl CourtBackground {
    /// Built-in art for each orientation. Portrait is drawn in perspective
    /// (far baseline narrower); landscape is drawn flat.
    pub fn default_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => Self {
                size: CanvasSize::new(1000.0, 1600.0),
                anchors: CourtAnchors {
                    top_left: PixelPosition::new(344.0, 265.0),
                    top_right: PixelPosition::new(656.0, 265.0),
                    bottom_left: PixelPosition::new(295.0, 1335.0),
                    bottom_right: PixelPosition::new(705.0, 1335.0),
                },
            },
            Orientation::Landscape => Self {
                size: CanvasSize::new(1600.0, 1000.0),
                anchors: CourtAnchors {
                    top_left: PixelPosition::new(265.0, 315.0),
                    top_right: PixelPosition::new(1335.0, 315.0),
                    bottom_left: PixelPosition::new(265.0, 685.0),
                    bottom_right: PixelPosition::new(1335.0, 685.0),
                },
            },
        }
    }
}

/// Pixels per meter along each logical axis at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalScale {
    pub per_meter_x: f64,
    pub per_meter_y: f64,
}

impl LocalScale {
    pub fn mean(self) -> f64 {
        (self.per_meter_x + self.per_meter_y) / 2.0
    }
}

/// Finite-difference step for `local_scale_at`, meters.
const SCALE_PROBE: f64 = 0.05;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Bilinear court ↔ pixel transform for one canvas size and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtTransform {
    orientation: Orientation,
    canvas: CanvasSize,
    // logical x at t = 0 / t = 1
    lateral: (f64, f64),
    // logical y at s = 0 / s = 1
    depth: (f64, f64),
    // straight-axis pixel at s = 0 / s = 1
    straight: (f64, f64),
    // cross-axis pixel on the s = 0 edge at t = 0 / t = 1
    edge0: (f64, f64),
    // cross-axis pixel on the s = 1 edge at t = 0 / t = 1
    edge1: (f64, f64),
}

impl CourtTransform {
    /// Build the transform for `canvas`, scaling `background`'s anchors.
    pub fn new(
        canvas: CanvasSize,
        orientation: Orientation,
        background: &CourtBackground,
    ) -> Result<Self, GeometryError> {
        if !canvas.is_valid() {
            return Err(GeometryError::InvalidCanvasSize {
                width: canvas.width,
                height: canvas.height,
            });
        }
        if !background.size.is_valid() {
            return Err(GeometryError::DegenerateAnchors("background size is empty"));
        }
        let a = background.anchors.scaled(
            canvas.width / background.size.width,
            canvas.height / background.size.height,
        );

        let (depth, straight, edge0, edge1) = match orientation {
            Orientation::Portrait => (
                (court::FAR_BASELINE, court::NEAR_BASELINE),
                (a.top_left.y, a.bottom_left.y),
                (a.top_left.x, a.top_right.x),
                (a.bottom_left.x, a.bottom_right.x),
            ),
            Orientation::Landscape => (
                (court::NEAR_BASELINE, court::FAR_BASELINE),
                (a.top_left.x, a.top_right.x),
                (a.top_left.y, a.bottom_left.y),
                (a.top_right.y, a.bottom_right.y),
            ),
        };

        if (straight.1 - straight.0).abs() < f64::EPSILON {
            return Err(GeometryError::DegenerateAnchors("baselines coincide"));
        }
        let span0 = edge0.1 - edge0.0;
        let span1 = edge1.1 - edge1.0;
        if span0.abs() < f64::EPSILON || span1.abs() < f64::EPSILON {
            return Err(GeometryError::DegenerateAnchors("sidelines coincide"));
        }
        if span0.signum() != span1.signum() {
            return Err(GeometryError::DegenerateAnchors("court outline is twisted"));
        }

        Ok(Self {
            orientation,
            canvas,
            lateral: (court::LEFT_SIDELINE, court::RIGHT_SIDELINE),
            depth,
            straight,
            edge0,
            edge1,
        })
    }

    /// Transform using the built-in background art for `orientation`.
    pub fn with_default_background(
        canvas: CanvasSize,
        orientation: Orientation,
    ) -> Result<Self, GeometryError> {
        Self::new(canvas, orientation, &CourtBackground::default_for(orientation))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical meters → canvas pixels.
    pub fn court_to_px(&self, p: Position) -> PixelPosition {
        let t = (p.x - self.lateral.0) / (self.lateral.1 - self.lateral.0);
        let s = (p.y - self.depth.0) / (self.depth.1 - self.depth.0);

        let straight = lerp(self.straight.0, self.straight.1, s);
        let on_edge0 = lerp(self.edge0.0, self.edge0.1, t);
        let on_edge1 = lerp(self.edge1.0, self.edge1.1, t);
        let cross = lerp(on_edge0, on_edge1, s);

        match self.orientation {
            Orientation::Portrait => PixelPosition::new(cross, straight),
            Orientation::Landscape => PixelPosition::new(straight, cross),
        }
    }

    /// Canvas pixels → logical meters. Exact inverse of `court_to_px`.
    ///
    /// Returns `None` only where the extrapolated outline pinches to zero
    /// width, far outside the drawn court.
    pub fn px_to_court(&self, px: PixelPosition) -> Option<Position> {
        let (straight, cross) = match self.orientation {
            Orientation::Portrait => (px.y, px.x),
            Orientation::Landscape => (px.x, px.y),
        };

        let s = (straight - self.straight.0) / (self.straight.1 - self.straight.0);
        let base = lerp(self.edge0.0, self.edge1.0, s);
        let span = lerp(self.edge0.1 - self.edge0.0, self.edge1.1 - self.edge1.0, s);
        if span.abs() < 1e-9 {
            log::trace!("px_to_court: outline collapses at s={s}");
            return None;
        }
        let t = (cross - base) / span;

        Some(Position::new(
            lerp(self.lateral.0, self.lateral.1, t),
            lerp(self.depth.0, self.depth.1, s),
        ))
    }

    /// Local pixels-per-meter at `p`, by central differences along each
    /// logical axis.
    pub fn local_scale_at(&self, p: Position) -> LocalScale {
        let dx = Position::new(SCALE_PROBE, 0.0);
        let dy = Position::new(0.0, SCALE_PROBE);
        let per_meter = |d: Position| {
            self.court_to_px(p + d).dist(self.court_to_px(p - d)) / (2.0 * SCALE_PROBE)
        };
        LocalScale {
            per_meter_x: per_meter(dx),
            per_meter_y: per_meter(dy),
        }
    }

    /// Whether `px` lies on the canvas.
    pub fn contains_px(&self, px: PixelPosition) -> bool {
        px.x >= 0.0 && px.y >= 0.0 && px.x <= self.canvas.width && px.y <= self.canvas.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_px(actual: PixelPosition, expected: PixelPosition) {
        assert!(
            actual.dist(expected) < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn corners() -> [Position; 4] {
        [
            Position::new(court::LEFT_SIDELINE, court::FAR_BASELINE),
            Position::new(court::RIGHT_SIDELINE, court::FAR_BASELINE),
            Position::new(court::LEFT_SIDELINE, court::NEAR_BASELINE),
            Position::new(court::RIGHT_SIDELINE, court::NEAR_BASELINE),
        ]
    }

    #[test]
    fn portrait_corners_hit_anchors() {
        let bg = CourtBackground::default_for(Orientation::Portrait);
        let tf = CourtTransform::new(bg.size, Orientation::Portrait, &bg).unwrap();
        let [far_l, far_r, near_l, near_r] = corners();
        assert_px(tf.court_to_px(far_l), bg.anchors.top_left);
        assert_px(tf.court_to_px(far_r), bg.anchors.top_right);
        assert_px(tf.court_to_px(near_l), bg.anchors.bottom_left);
        assert_px(tf.court_to_px(near_r), bg.anchors.bottom_right);
    }

    #[test]
    fn landscape_corners_hit_anchors() {
        let bg = CourtBackground::default_for(Orientation::Landscape);
        let tf = CourtTransform::new(bg.size, Orientation::Landscape, &bg).unwrap();
        let [far_l, far_r, near_l, near_r] = corners();
        assert_px(tf.court_to_px(near_l), bg.anchors.top_left);
        assert_px(tf.court_to_px(far_l), bg.anchors.top_right);
        assert_px(tf.court_to_px(near_r), bg.anchors.bottom_left);
        assert_px(tf.court_to_px(far_r), bg.anchors.bottom_right);
    }

    #[test]
    fn anchors_scale_with_canvas() {
        let bg = CourtBackground::default_for(Orientation::Portrait);
        let canvas = CanvasSize::new(500.0, 800.0);
        let tf = CourtTransform::new(canvas, Orientation::Portrait, &bg).unwrap();
        let px = tf.court_to_px(Position::new(court::LEFT_SIDELINE, court::FAR_BASELINE));
        assert_px(px, PixelPosition::new(172.0, 132.5));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let err = CourtTransform::with_default_background(
            CanvasSize::new(0.0, 600.0),
            Orientation::Portrait,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidCanvasSize { .. }));
        assert!(err.to_string().contains("invalid canvas size"));
    }

    #[test]
    fn collapsed_anchors_are_rejected() {
        let mut bg = CourtBackground::default_for(Orientation::Portrait);
        bg.anchors.top_right = bg.anchors.top_left;
        let err = CourtTransform::new(bg.size, Orientation::Portrait, &bg).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateAnchors(_)));
    }

    #[test]
    fn perspective_makes_far_court_smaller() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(1000.0, 1600.0),
            Orientation::Portrait,
        )
        .unwrap();
        let near = tf.local_scale_at(Position::new(court::CENTER_X, 1.0));
        let far = tf.local_scale_at(Position::new(court::CENTER_X, 22.0));
        assert!(near.per_meter_x > far.per_meter_x);
        assert!(near.mean() > 0.0);
    }

    #[test]
    fn landscape_scale_is_uniform_along_depth() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(1600.0, 1000.0),
            Orientation::Landscape,
        )
        .unwrap();
        let a = tf.local_scale_at(Position::new(3.0, 2.0));
        let b = tf.local_scale_at(Position::new(7.0, 20.0));
        assert!((a.per_meter_y - b.per_meter_y).abs() < 1e-6);
        assert!((a.per_meter_y - 1070.0 / court::LENGTH).abs() < 1e-6);
    }

    #[test]
    fn contains_px_checks_canvas_bounds() {
        let tf = CourtTransform::with_default_background(
            CanvasSize::new(100.0, 160.0),
            Orientation::Portrait,
        )
        .unwrap();
        assert!(tf.contains_px(PixelPosition::new(50.0, 80.0)));
        assert!(!tf.contains_px(PixelPosition::new(-1.0, 80.0)));
        assert!(!tf.contains_px(PixelPosition::new(50.0, 161.0)));
    }

    proptest! {
        #[test]
        fn prop_round_trip_identity(
            x in -court::RUNOFF..court::DOUBLES_WIDTH + court::RUNOFF,
            y in -court::RUNOFF..court::LENGTH + court::RUNOFF,
            w in 120.0f64..2400.0,
            h in 120.0f64..2400.0,
            landscape in any::<bool>(),
        ) {
            let orientation = if landscape { Orientation::Landscape } else { Orientation::Portrait };
            let tf = CourtTransform::with_default_background(CanvasSize::new(w, h), orientation).unwrap();
            let p = Position::new(x, y);
            let back = tf.px_to_court(tf.court_to_px(p)).unwrap();
            prop_assert!((back.x - p.x).abs() < 1e-6, "{p:?} -> {back:?}");
            prop_assert!((back.y - p.y).abs() < 1e-6, "{p:?} -> {back:?}");
        }
    }
}
