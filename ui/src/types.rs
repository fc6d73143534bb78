//! Core types used by the visualizer.
//!
//! Everything geometric comes from `courtline`; this module only gathers
//! the re-exports and the UI-local enums.

// ---------------------------------------------------------------------------
// Re-exports from the geometry core
// ---------------------------------------------------------------------------

pub use courtline::{
    // Configuration
    CourtlineConfig,
    DisplaySection,
    PlayerSection,
    // Data model
    CourtType,
    GameMode,
    Handedness,
    Orientation,
    Outcome,
    PixelPosition,
    PlayerSide,
    Position,
    ShotKind,
    ShotType,
    SwingType,
    // Transform
    CanvasSize,
    CourtBackground,
    CourtTransform,
    // Analysis
    PlayerAnalysis,
    Scene,
    SceneAnalysis,
    court,
};

// ---------------------------------------------------------------------------
// Drag targets (UI-local)
// ---------------------------------------------------------------------------

/// Something on the court the pointer can grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Player(PlayerSide),
    Shot(PlayerSide, ShotKind),
}

/// Grab radius around a handle, screen points.
pub const HANDLE_RADIUS: f32 = 22.0;
