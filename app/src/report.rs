//! Headless analysis report: the configured scene, analyzed against the
//! default background art at its native size.

use serde::Serialize;

use courtline::{
    CourtBackground, CourtTransform, CourtlineConfig, GameMode, Orientation, Position, Scene,
    SceneAnalysis,
};

#[derive(Debug, Serialize)]
pub struct Report {
    pub orientation: Orientation,
    pub game_mode: GameMode,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub analysis: SceneAnalysis,
    /// Doubles partners; empty in singles.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partners: Vec<Position>,
}

pub fn build(config: &CourtlineConfig) -> anyhow::Result<Report> {
    let background = CourtBackground::default_for(config.orientation);
    let transform = CourtTransform::new(background.size, config.orientation, &background)?;

    let scene = Scene::from_config(config);
    let analysis = scene.analyze(Some(&transform));
    if let Some(outcome) = analysis.outcome {
        tracing::info!("player 2 check: {outcome}");
    } else {
        tracing::warn!("player 1's bisector never reaches player 2's baseline");
    }

    Ok(Report {
        orientation: config.orientation,
        game_mode: config.game_mode,
        canvas_width: background.size.width,
        canvas_height: background.size.height,
        analysis,
        partners: scene
            .secondary_players()
            .into_iter()
            .map(|(_, p)| p)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_has_pixels() {
        let report = build(&CourtlineConfig::default()).unwrap();
        assert_eq!(report.canvas_width, 1000.0);
        assert!(report.analysis.player1.contact_px.is_some());
        assert!(report.partners.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["orientation"], "portrait");
        assert!(json.get("partners").is_none());
    }

    #[test]
    fn doubles_report_lists_partners() {
        let config = CourtlineConfig {
            game_mode: GameMode::Doubles,
            orientation: Orientation::Landscape,
            ..Default::default()
        };
        let report = build(&config).unwrap();
        assert_eq!(report.partners.len(), 2);
        assert_eq!(report.canvas_width, 1600.0);
    }
}
