//! End-to-end geometry scenarios: shots → bisector → optimal position →
//! win check, and defender intercept analysis.

use courtline::{
    CanvasSize, CourtTransform, Orientation, Outcome, PlayerSide, Position, Scene, ShotKind,
    ShotType, calculate_bisector, check_win, court, intercept_estimate,
    lateral_interception_distance,
};

fn symmetric_shots() -> (Position, Position) {
    (
        Position::new(court::LEFT_SIDELINE, court::FAR_BASELINE),
        Position::new(court::RIGHT_SIDELINE, court::FAR_BASELINE),
    )
}

#[test]
fn symmetric_shots_put_optimal_on_center_line() {
    let (a, b) = symmetric_shots();
    let origin = Position::new(court::CENTER_X, 0.0);
    let bis = calculate_bisector(origin, a, b, None, court::FAR_BASELINE).unwrap();
    assert!((bis.angle_deg() - 90.0).abs() < 1e-9);

    let opt = bis.optimal_p2.unwrap().position;
    assert!((opt.x - court::CENTER_X).abs() < 1e-9);
    assert!((opt.y - court::FAR_BASELINE).abs() < 1e-9);

    assert_eq!(check_win(Position::new(opt.x + 0.3, opt.y), opt), Outcome::Win);
    assert_eq!(check_win(Position::new(opt.x + 5.0, opt.y), opt), Outcome::Lose);
}

#[test]
fn off_center_contact_lands_on_unit_vector_sum() {
    let (a, b) = symmetric_shots();
    let origin = Position::new(4.6, 0.0);
    let bis = calculate_bisector(origin, a, b, None, court::FAR_BASELINE).unwrap();
    let opt = bis.optimal().unwrap().position;

    let ua = (a - origin).normalized().unwrap();
    let ub = (b - origin).normalized().unwrap();
    let sum = ua + ub;
    let expected_x = origin.x + sum.x * (court::FAR_BASELINE - origin.y) / sum.y;
    assert!((expected_x - 5.459).abs() < 1e-3, "expected {expected_x}");
    assert!((opt.x - expected_x).abs() < 1e-9, "optimal {opt:?}");
    assert!((opt.y - court::FAR_BASELINE).abs() < 1e-9);

    assert_eq!(check_win(Position::new(opt.x + 0.3, opt.y), opt), Outcome::Win);
    assert_eq!(check_win(Position::new(opt.x + 5.0, opt.y), opt), Outcome::Lose);
}

#[test]
fn scene_check_matches_manual_pipeline() {
    let mut scene = Scene::default_for(Orientation::Portrait);
    let (a, b) = symmetric_shots();
    scene.drag_shot(PlayerSide::Near, ShotKind::DownTheLine, a);
    scene.drag_shot(PlayerSide::Near, ShotKind::CrossCourt, b);

    let analysis = scene.analyze(None);
    let opt = analysis.player1.bisector.unwrap().optimal_p2.unwrap().position;

    scene.drag_player(PlayerSide::Far, Position::new(opt.x, opt.y + 0.2));
    assert_eq!(scene.check(None), Some(Outcome::Win));

    scene.drag_player(PlayerSide::Far, Position::new(opt.x + 5.0, opt.y));
    assert_eq!(scene.check(None), Some(Outcome::Lose));
}

#[test]
fn interception_uses_infinite_line() {
    let o = Position::new(0.0, 0.0);
    let e = Position::new(0.0, 10.0);
    for y in [-20.0, 0.0, 5.0, 10.0, 40.0] {
        let d = lateral_interception_distance(o, e, Position::new(3.0, y)).unwrap();
        assert!((d - 3.0).abs() < 1e-12);
    }
}

#[test]
fn intercept_ball_distance_extends_past_drawn_endpoint() {
    let contact = Position::new(5.0, 0.5);
    let short_end = Position::new(6.0, 12.5);
    let defender = Position::new(6.5, 24.0);
    let est = intercept_estimate(contact, short_end, defender, ShotType::PowerfulTopspin).unwrap();
    assert!(est.ball_distance > contact.dist(short_end));
}

#[test]
fn analysis_is_consistent_across_orientations() {
    let scene = Scene::default_for(Orientation::Portrait);
    let mut landscape = scene.clone();
    landscape.reset_for_orientation(Orientation::Landscape);
    landscape.player1.position = scene.player1.position;
    landscape.player2.position = scene.player2.position;

    let a = scene.analyze(None);
    let b = landscape.analyze(None);
    assert!(a.player1.contact.dist(b.player1.contact) < 1e-9);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn pixel_round_trip_of_analysis_points() {
    for (orientation, canvas) in [
        (Orientation::Portrait, CanvasSize::new(390.0, 844.0)),
        (Orientation::Landscape, CanvasSize::new(1280.0, 720.0)),
    ] {
        let tf = CourtTransform::with_default_background(canvas, orientation).unwrap();
        let scene = Scene::default_for(orientation);
        let a = scene.analyze(Some(&tf));
        for p in [&a.player1, &a.player2] {
            let back = tf.px_to_court(p.contact_px.unwrap()).unwrap();
            assert!(back.dist(p.contact) < 1e-6);
        }
    }
}

#[test]
fn analysis_serializes() {
    let a = Scene::default().analyze(None);
    let json = serde_json::to_value(a).unwrap();
    assert_eq!(json["player1"]["side"], "near");
    assert!(json["player1"]["contact_px"].is_null());
    assert!(json["player2"]["metrics"]["len_cross"].as_f64().unwrap() > 0.0);
}
