use crate::app::CourtlineApp;
use crate::types::{CourtType, GameMode, Handedness, PlayerSection, PlayerSide, SwingType};

const HANDEDNESS_OPTIONS: &[(Handedness, &str)] =
    &[(Handedness::Right, "Right"), (Handedness::Left, "Left")];

const SWING_OPTIONS: &[(SwingType, &str)] = &[
    (SwingType::Auto, "Auto"),
    (SwingType::Forehand, "Forehand"),
    (SwingType::Backhand, "Backhand"),
];

const MODE_OPTIONS: &[(GameMode, &str)] =
    &[(GameMode::Singles, "Singles"), (GameMode::Doubles, "Doubles")];

fn combo_label<T: PartialEq>(opts: &[(T, &'static str)], value: &T) -> &'static str {
    opts.iter()
        .find(|(v, _)| v == value)
        .map(|(_, label)| *label)
        .unwrap_or(opts[0].1)
}

/// Combo box over `opts`. Returns true when the user picked a new value.
fn combo<T: PartialEq + Copy>(
    ui: &mut egui::Ui,
    salt: &str,
    width: f32,
    value: &mut T,
    opts: &[(T, &'static str)],
) -> bool {
    let before = *value;
    egui::ComboBox::from_id_salt(salt)
        .selected_text(combo_label(opts, value))
        .width(width)
        .show_ui(ui, |ui| {
            for (opt, label) in opts {
                ui.selectable_value(value, *opt, *label);
            }
        });
    *value != before
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .strong()
            .color(egui::Color32::from_rgb(180, 200, 255)),
    );
    ui.add_space(4.0);
}

fn player_form(ui: &mut egui::Ui, side: PlayerSide, section: &mut PlayerSection, width: f32) -> bool {
    let mut changed = false;
    egui::Grid::new(format!("{side}_grid"))
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Handedness:");
            changed |= combo(
                ui,
                &format!("{side}_hand"),
                width,
                &mut section.handedness,
                HANDEDNESS_OPTIONS,
            );
            ui.end_row();

            ui.label("Swing:").on_hover_text(
                "Auto picks forehand or backhand from where the player stands",
            );
            changed |= combo(
                ui,
                &format!("{side}_swing"),
                width,
                &mut section.swing,
                SWING_OPTIONS,
            );
            ui.end_row();
        });
    changed
}

impl CourtlineApp {
    pub(crate) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        let field_width = 160.0;
        let mut changed = false;

        egui::ScrollArea::both()
            .auto_shrink(false)
            .show(ui, |ui| {
                // --- COURT ---
                section_heading(ui, "Court");
                egui::Grid::new("court_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Surface:");
                    let before = self.config.court_type;
                    egui::ComboBox::from_id_salt("court_type")
                        .selected_text(before.label())
                        .width(field_width)
                        .show_ui(ui, |ui| {
                            for &ct in CourtType::ALL {
                                ui.selectable_value(&mut self.config.court_type, ct, ct.label());
                            }
                        });
                    changed |= self.config.court_type != before;
                    ui.end_row();

                    ui.label("Game mode:").on_hover_text(
                        "Doubles draws the partners at the net; geometry is unchanged",
                    );
                    changed |= combo(
                        ui,
                        "game_mode",
                        field_width,
                        &mut self.config.game_mode,
                        MODE_OPTIONS,
                    );
                    ui.end_row();
                });

                ui.add_space(12.0);

                // --- PLAYERS ---
                for side in [PlayerSide::Near, PlayerSide::Far] {
                    section_heading(ui, Self::player_label(side));
                    let section = match side {
                        PlayerSide::Near => &mut self.config.player1,
                        PlayerSide::Far => &mut self.config.player2,
                    };
                    changed |= player_form(ui, side, section, field_width);
                    if ui
                        .small_button("Reset position")
                        .on_hover_text("Same as double-clicking the player")
                        .clicked()
                    {
                        self.scene.reset_player(side);
                    }
                    ui.add_space(12.0);
                }

                // --- DISPLAY ---
                section_heading(ui, "Display");
                let display = &mut self.config.display;
                changed |= ui
                    .checkbox(&mut display.show_bisectors, "Bisectors and optimal positions")
                    .changed();
                changed |= ui
                    .checkbox(&mut display.show_contact_points, "Contact points")
                    .changed();
                changed |= ui
                    .checkbox(&mut display.show_intercepts, "Color shots by opponent reach")
                    .changed();
                changed |= ui
                    .checkbox(&mut display.show_metrics, "Metrics tab")
                    .changed();
            });

        if changed {
            self.config_changed();
        }
    }
}
