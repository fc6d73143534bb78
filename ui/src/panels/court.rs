//! Court view: paints the court through the perspective transform and
//! handles dragging players and shot endpoints.

use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};

use crate::app::CourtlineApp;
use crate::types::{
    CanvasSize, CourtBackground, CourtTransform, CourtType, HANDLE_RADIUS, Handle, Outcome,
    PixelPosition, PlayerAnalysis, PlayerSide, Position, SceneAnalysis, ShotKind, court,
};

/// Segments used for lines that are not parallel to a court edge; those
/// bend slightly under the bilinear map.
const CURVE_SEGMENTS: usize = 24;

const PLAYER1_COLOR: Color32 = Color32::from_rgb(70, 150, 255);
const PLAYER2_COLOR: Color32 = Color32::from_rgb(255, 170, 60);
const PARTNER_COLOR: Color32 = Color32::from_rgb(170, 170, 170);
const BISECTOR_COLOR: Color32 = Color32::from_rgb(240, 240, 120);
const REACHABLE_COLOR: Color32 = Color32::from_rgb(90, 200, 110);
const UNREACHABLE_COLOR: Color32 = Color32::from_rgb(255, 80, 80);

struct Theme {
    surround: Color32,
    surface: Color32,
    lines: Color32,
}

fn theme(court_type: CourtType) -> Theme {
    match court_type {
        CourtType::Clay => Theme {
            surround: Color32::from_rgb(150, 72, 42),
            surface: Color32::from_rgb(196, 98, 58),
            lines: Color32::from_rgb(245, 240, 230),
        },
        CourtType::Hard => Theme {
            surround: Color32::from_rgb(44, 98, 70),
            surface: Color32::from_rgb(52, 96, 160),
            lines: Color32::WHITE,
        },
        CourtType::Grass => Theme {
            surround: Color32::from_rgb(62, 112, 52),
            surface: Color32::from_rgb(84, 140, 70),
            lines: Color32::from_rgb(240, 245, 240),
        },
    }
}

fn player_color(side: PlayerSide) -> Color32 {
    match side {
        PlayerSide::Near => PLAYER1_COLOR,
        PlayerSide::Far => PLAYER2_COLOR,
    }
}

/// Largest rect with the background art's aspect ratio that fits `avail`,
/// centered.
fn fit_canvas(avail: Rect, background: &CourtBackground) -> Rect {
    let aspect = (background.size.width / background.size.height) as f32;
    let mut size = avail.size();
    if size.x / size.y.max(1.0) > aspect {
        size.x = size.y * aspect;
    } else {
        size.y = size.x / aspect;
    }
    Rect::from_center_size(avail.center(), size)
}

/// Maps court meters to screen points inside the canvas rect.
struct Projector<'a> {
    tf: &'a CourtTransform,
    origin: Pos2,
}

impl Projector<'_> {
    fn px_to_screen(&self, px: PixelPosition) -> Pos2 {
        self.origin + Vec2::new(px.x as f32, px.y as f32)
    }

    fn to_screen(&self, p: Position) -> Pos2 {
        self.px_to_screen(self.tf.court_to_px(p))
    }

    /// Court position under `screen`, if it is on the canvas.
    fn to_court(&self, screen: Pos2) -> Option<Position> {
        let rel = screen - self.origin;
        let px = PixelPosition::new(rel.x as f64, rel.y as f64);
        if !self.tf.contains_px(px) {
            return None;
        }
        self.tf.px_to_court(px)
    }

    /// Sampled polyline from `a` to `b` in court space.
    fn path(&self, a: Position, b: Position) -> Vec<Pos2> {
        (0..=CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / CURVE_SEGMENTS as f64;
                self.to_screen(a + (b - a) * t)
            })
            .collect()
    }

    fn quad(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Pos2> {
        [
            Position::new(x0, y0),
            Position::new(x1, y0),
            Position::new(x1, y1),
            Position::new(x0, y1),
        ]
        .into_iter()
        .map(|p| self.to_screen(p))
        .collect()
    }
}

fn paint_court(painter: &egui::Painter, proj: &Projector<'_>, theme: &Theme) {
    let r = court::RUNOFF;
    painter.add(egui::Shape::convex_polygon(
        proj.quad(-r, -r, court::DOUBLES_WIDTH + r, court::FAR_BASELINE + r),
        theme.surround,
        Stroke::NONE,
    ));
    painter.add(egui::Shape::convex_polygon(
        proj.quad(0.0, 0.0, court::DOUBLES_WIDTH, court::FAR_BASELINE),
        theme.surface,
        Stroke::NONE,
    ));

    let stroke = Stroke::new(2.0, theme.lines);
    let line = |a: Position, b: Position| {
        painter.line_segment([proj.to_screen(a), proj.to_screen(b)], stroke);
    };

    // baselines and sidelines
    for y in [court::NEAR_BASELINE, court::FAR_BASELINE] {
        line(Position::new(0.0, y), Position::new(court::DOUBLES_WIDTH, y));
    }
    for x in [
        0.0,
        court::LEFT_SIDELINE,
        court::RIGHT_SIDELINE,
        court::DOUBLES_WIDTH,
    ] {
        line(Position::new(x, 0.0), Position::new(x, court::FAR_BASELINE));
    }

    // service boxes
    let near_service = court::NET_Y - court::SERVICE_DEPTH;
    let far_service = court::NET_Y + court::SERVICE_DEPTH;
    for y in [near_service, far_service] {
        line(
            Position::new(court::LEFT_SIDELINE, y),
            Position::new(court::RIGHT_SIDELINE, y),
        );
    }
    line(
        Position::new(court::CENTER_X, near_service),
        Position::new(court::CENTER_X, far_service),
    );

    // center marks
    for (y, dir) in [(court::NEAR_BASELINE, 1.0), (court::FAR_BASELINE, -1.0)] {
        line(
            Position::new(court::CENTER_X, y),
            Position::new(court::CENTER_X, y + dir * 0.3),
        );
    }

    // net, past the doubles sidelines to the posts
    painter.line_segment(
        [
            proj.to_screen(Position::new(-0.914, court::NET_Y)),
            proj.to_screen(Position::new(court::DOUBLES_WIDTH + 0.914, court::NET_Y)),
        ],
        Stroke::new(3.0, Color32::from_gray(30)),
    );
}

impl CourtlineApp {
    pub(crate) fn render_court_panel(&mut self, ui: &mut egui::Ui) {
        let orientation = self.config.orientation;
        let background = CourtBackground::default_for(orientation);
        let rect = fit_canvas(ui.available_rect_before_wrap(), &background);
        let response = ui.allocate_rect(rect, Sense::click_and_drag());

        let canvas = CanvasSize::new(rect.width() as f64, rect.height() as f64);
        self.transform = match CourtTransform::new(canvas, orientation, &background) {
            Ok(tf) => Some(tf),
            Err(e) => {
                // first frames can report a zero-sized area
                log::debug!("no court transform: {e}");
                None
            }
        };
        let Some(tf) = self.transform else {
            self.refresh_analysis();
            return;
        };
        let proj = Projector {
            tf: &tf,
            origin: rect.min,
        };

        let before = self.scene.analyze(Some(&tf));
        self.handle_input(&response, &proj, &before);
        let analysis = self.refresh_analysis();

        let painter = ui.painter_at(rect);
        let theme = theme(self.config.court_type);
        paint_court(&painter, &proj, &theme);

        for (side, pos) in self.scene.secondary_players() {
            let c = proj.to_screen(pos);
            painter.circle_filled(c, 8.0, PARTNER_COLOR);
            painter.circle_stroke(c, 8.0, Stroke::new(1.5, player_color(side)));
        }

        for side in [PlayerSide::Near, PlayerSide::Far] {
            self.paint_player(&painter, &proj, analysis.player(side));
        }

        if let Some(outcome) = analysis.outcome {
            let (text, color) = match outcome {
                Outcome::Win => ("player 2 on the bisector", REACHABLE_COLOR),
                Outcome::Lose => ("player 2 off the bisector", UNREACHABLE_COLOR),
            };
            painter.text(
                rect.left_top() + Vec2::new(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                text,
                egui::FontId::proportional(13.0),
                color,
            );
        }
    }

    fn paint_player(
        &self,
        painter: &egui::Painter,
        proj: &Projector<'_>,
        player: &PlayerAnalysis,
    ) {
        let display = self.config.display;
        let color = player_color(player.side);
        let body = proj.to_screen(player.position);
        let contact = proj.to_screen(player.contact);

        // shots, colored by whether the opponent can reach them
        for kind in [ShotKind::DownTheLine, ShotKind::CrossCourt] {
            let target = player.shot(kind);
            let intercept = match kind {
                ShotKind::DownTheLine => player.intercept_down_the_line,
                ShotKind::CrossCourt => player.intercept_cross,
            };
            let shot_color = match intercept {
                Some(est) if display.show_intercepts => {
                    if est.reachable() {
                        REACHABLE_COLOR
                    } else {
                        UNREACHABLE_COLOR
                    }
                }
                _ => color,
            };
            painter.add(egui::Shape::line(
                proj.path(player.contact, target.position),
                Stroke::new(2.0, shot_color),
            ));
            let end = proj.to_screen(target.position);
            if target.auto {
                painter.circle_stroke(end, 6.0, Stroke::new(2.0, shot_color));
            } else {
                painter.circle_filled(end, 6.0, shot_color);
            }
        }

        if display.show_bisectors
            && let Some(bisector) = &player.bisector
        {
            let points = proj.path(bisector.origin, bisector.end);
            painter.extend(egui::Shape::dashed_line(
                &points,
                Stroke::new(1.5, BISECTOR_COLOR),
                8.0,
                6.0,
            ));
            if let Some(opt) = bisector.optimal() {
                let c = proj.to_screen(opt.position);
                painter.circle_stroke(c, 10.0, Stroke::new(2.0, BISECTOR_COLOR));
                painter.circle_stroke(c, 3.0, Stroke::new(2.0, BISECTOR_COLOR));
            }
        }

        if display.show_contact_points {
            painter.line_segment([body, contact], Stroke::new(2.0, color.gamma_multiply(0.7)));
            painter.circle_filled(contact, 4.0, Color32::from_rgb(220, 255, 80));
        }

        painter.circle_filled(body, 10.0, color);
        painter.circle_stroke(body, 10.0, Stroke::new(1.5, Color32::BLACK));

        let label = match player.side {
            PlayerSide::Near => "1",
            PlayerSide::Far => "2",
        };
        painter.text(
            body,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(12.0),
            Color32::BLACK,
        );

        // result of the last explicit check, around player 2
        if player.side == PlayerSide::Far
            && let Some(outcome) = self.last_check
        {
            let ring = match outcome {
                Outcome::Win => REACHABLE_COLOR,
                Outcome::Lose => UNREACHABLE_COLOR,
            };
            painter.circle_stroke(body, 14.0, Stroke::new(2.5, ring));
        }
    }

    /// Handle under `pos`, players first since they sit on top.
    fn hit_test(proj: &Projector<'_>, analysis: &SceneAnalysis, pos: Pos2) -> Option<Handle> {
        let mut best: Option<(f32, Handle)> = None;
        let mut consider = |at: Position, handle: Handle, bias: f32| {
            let d = proj.to_screen(at).distance(pos) - bias;
            if d <= HANDLE_RADIUS && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, handle));
            }
        };
        for player in [&analysis.player1, &analysis.player2] {
            consider(player.position, Handle::Player(player.side), 4.0);
            for kind in [ShotKind::DownTheLine, ShotKind::CrossCourt] {
                consider(player.shot(kind).position, Handle::Shot(player.side, kind), 0.0);
            }
        }
        best.map(|(_, h)| h)
    }

    fn handle_input(
        &mut self,
        response: &egui::Response,
        proj: &Projector<'_>,
        analysis: &SceneAnalysis,
    ) {
        let pointer = response.interact_pointer_pos();

        if response.double_clicked() {
            match pointer.and_then(|p| Self::hit_test(proj, analysis, p)) {
                Some(Handle::Player(side)) => {
                    log::debug!("reset {side} position");
                    self.scene.reset_player(side);
                }
                Some(Handle::Shot(side, kind)) => {
                    log::debug!("reset {side} {kind:?} to auto");
                    self.scene.reset_shot(side, kind);
                }
                None => {}
            }
            self.dragging = None;
            self.last_check = None;
            return;
        }

        if response.drag_started() {
            self.dragging = pointer.and_then(|p| Self::hit_test(proj, analysis, p));
        }

        if response.dragged()
            && let Some(handle) = self.dragging
            && let Some(to) = pointer.and_then(|p| proj.to_court(p))
        {
            match handle {
                Handle::Player(side) => self.scene.drag_player(side, to),
                Handle::Shot(side, kind) => self.scene.drag_shot(side, kind, to),
            }
            self.last_check = None;
        }

        if response.drag_stopped()
            && let Some(handle) = self.dragging.take()
        {
            log::trace!("released {handle:?}");
        }
    }
}
