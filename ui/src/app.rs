//! egui application: CourtlineApp.

use crate::panels::Tab;
use crate::types::{
    CourtTransform, CourtlineConfig, Handle, Orientation, Outcome, PlayerSide, Scene,
    SceneAnalysis,
};

const GUIDE_MD: &str = include_str!("../../docs/GUIDE.md");

/// Called with the new config whenever a setting changes. The native app
/// uses it to write the TOML file; the web build runs without one.
pub type SaveHook = Box<dyn Fn(&CourtlineConfig)>;

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct CourtlineApp {
    // Model
    pub(crate) config: CourtlineConfig,
    pub(crate) scene: Scene,

    // Derived each frame by the court panel
    pub(crate) transform: Option<CourtTransform>,
    pub(crate) analysis: Option<SceneAnalysis>,

    // Interaction
    pub(crate) dragging: Option<Handle>,
    /// Result of the last explicit check; cleared by the next drag.
    pub(crate) last_check: Option<Outcome>,

    // UI state
    pub(crate) active_tab: Tab,
    pub(crate) show_guide: bool,
    pub(crate) guide_cache: egui_commonmark::CommonMarkCache,

    save_hook: Option<SaveHook>,
}

impl CourtlineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CourtlineConfig) -> Self {
        let scene = Scene::from_config(&config);
        log::info!(
            "court view: {} {} {}",
            config.orientation,
            config.court_type,
            config.game_mode
        );
        Self {
            config,
            scene,
            transform: None,
            analysis: None,
            dragging: None,
            last_check: None,
            active_tab: Tab::Court,
            show_guide: false,
            guide_cache: egui_commonmark::CommonMarkCache::default(),
            save_hook: None,
        }
    }

    pub fn with_save_hook(mut self, hook: SaveHook) -> Self {
        self.save_hook = Some(hook);
        self
    }

    /// Push the edited config into the scene and persist it.
    pub(crate) fn config_changed(&mut self) {
        self.scene.apply_config(&self.config);
        self.last_check = None;
        if let Some(hook) = &self.save_hook {
            hook(&self.config);
        }
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation == orientation {
            return;
        }
        log::debug!("orientation -> {orientation}");
        self.config.orientation = orientation;
        // the old transform is for the wrong background
        self.transform = None;
        self.config_changed();
    }

    /// Analyze the scene against the current transform and advance the
    /// swing hysteresis. Called once per frame by whichever panel is shown.
    pub(crate) fn refresh_analysis(&mut self) -> SceneAnalysis {
        let analysis = self.scene.analyze(self.transform.as_ref());
        self.scene.commit(&analysis);
        self.analysis = Some(analysis);
        analysis
    }

    /// Win/lose check of player 2 against player 1's optimal position.
    pub(crate) fn run_check(&mut self) {
        self.last_check = self.scene.check(self.transform.as_ref());
        match self.last_check {
            Some(outcome) => log::info!("check: {outcome}"),
            None => log::warn!("check: player 1 has no optimal position on player 2's baseline"),
        }
    }

    fn copy_analysis(&self, ctx: &egui::Context) {
        let analysis = self
            .analysis
            .unwrap_or_else(|| self.scene.analyze(self.transform.as_ref()));
        match serde_json::to_string_pretty(&analysis) {
            Ok(json) => ctx.copy_text(json),
            Err(e) => log::error!("failed to serialize analysis: {e}"),
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.active_tab, Tab::Court, "Court");
            ui.selectable_value(&mut self.active_tab, Tab::Metrics, "Metrics");
            ui.selectable_value(&mut self.active_tab, Tab::Settings, "Settings");

            ui.separator();

            let mut new_orientation: Option<Orientation> = None;
            for (val, label) in [
                (Orientation::Portrait, "Portrait"),
                (Orientation::Landscape, "Landscape"),
            ] {
                let selected = self.config.orientation == val;
                let text = egui::RichText::new(label).strong().size(12.0);
                if ui.selectable_label(selected, text).clicked() && !selected {
                    new_orientation = Some(val);
                }
            }
            if let Some(o) = new_orientation {
                self.set_orientation(o);
            }

            ui.separator();

            if ui
                .button("Check")
                .on_hover_text("Is player 2 standing on player 1's optimal position?")
                .clicked()
            {
                self.run_check();
            }
            if ui
                .button("Copy JSON")
                .on_hover_text("Copy the current analysis to the clipboard")
                .clicked()
            {
                self.copy_analysis(ui.ctx());
            }

            // Right-aligned title
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Guide").clicked() {
                    self.show_guide = true;
                }
                ui.label(
                    egui::RichText::new("COURTLINE")
                        .strong()
                        .size(14.0)
                        .color(egui::Color32::from_rgb(140, 140, 140)),
                );
            });
        });
    }

    fn render_check_banner(&self, ui: &mut egui::Ui) {
        let Some(outcome) = self.last_check else {
            return;
        };
        let (text, color) = match outcome {
            Outcome::Win => ("WIN: player 2 covers the bisector", egui::Color32::from_rgb(90, 200, 110)),
            Outcome::Lose => ("LOSE: player 2 is off the bisector", egui::Color32::from_rgb(255, 80, 80)),
        };
        ui.label(egui::RichText::new(text).strong().size(13.0).color(color));
    }

    pub(crate) fn player_label(side: PlayerSide) -> &'static str {
        match side {
            PlayerSide::Near => "Player 1",
            PlayerSide::Far => "Player 2",
        }
    }
}

impl eframe::App for CourtlineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Guide popup
        if self.show_guide {
            let screen = ctx.content_rect();
            let win_size = [screen.width() * 0.9, screen.height() * 0.9];
            egui::Window::new("Guide")
                .open(&mut self.show_guide)
                .collapsible(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .fixed_size(win_size)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink(false)
                        .show(ui, |ui| {
                            egui_commonmark::CommonMarkViewer::new().show(
                                ui,
                                &mut self.guide_cache,
                                GUIDE_MD,
                            );
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_top_bar(ui);
            self.render_check_banner(ui);
            ui.separator();

            match self.active_tab {
                Tab::Court => self.render_court_panel(ui),
                Tab::Metrics => self.render_metrics_panel(ui),
                Tab::Settings => self.render_settings_panel(ui),
            }
        });
    }
}
