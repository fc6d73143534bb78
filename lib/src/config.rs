use serde::{Deserialize, Serialize};

use crate::{CourtType, GameMode, Handedness, Orientation, ShotType, SwingType};

// ---------------------------------------------------------------------------
// Persisted config types (shared between app and UI)
// ---------------------------------------------------------------------------

/// Top-level persisted config. Every field has a default so a partial,
/// hand-edited TOML file still loads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourtlineConfig {
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub court_type: CourtType,
    #[serde(default)]
    pub game_mode: GameMode,
    /// Shot category used for ball-time estimates.
    #[serde(default)]
    pub shot_type: ShotType,
    #[serde(default)]
    pub player1: PlayerSection,
    #[serde(default)]
    pub player2: PlayerSection,
    #[serde(default)]
    pub display: DisplaySection,
}

/// Per-player selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSection {
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub swing: SwingType,
}

/// Overlay toggles for the court view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default = "default_true")]
    pub show_bisectors: bool,
    #[serde(default = "default_true")]
    pub show_contact_points: bool,
    #[serde(default = "default_true")]
    pub show_intercepts: bool,
    #[serde(default = "default_true")]
    pub show_metrics: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            show_bisectors: true,
            show_contact_points: true,
            show_intercepts: true,
            show_metrics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_defaults() {
        let config: CourtlineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CourtlineConfig::default());
        assert!(config.display.show_bisectors);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: CourtlineConfig = serde_json::from_str(
            r#"{"player2": {"handedness": "left"}, "display": {"show_metrics": false}}"#,
        )
        .unwrap();
        assert_eq!(config.player2.handedness, Handedness::Left);
        assert_eq!(config.player2.swing, SwingType::Auto);
        assert!(!config.display.show_metrics);
        assert!(config.display.show_intercepts);
    }
}
