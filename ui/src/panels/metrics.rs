use crate::app::CourtlineApp;
use crate::panels::opt_f;
use crate::types::{PlayerAnalysis, PlayerSide, ShotType};

fn reach_label(reachable: Option<bool>) -> egui::RichText {
    match reachable {
        Some(true) => egui::RichText::new("reach").color(egui::Color32::from_rgb(90, 200, 110)),
        Some(false) => egui::RichText::new("miss").color(egui::Color32::from_rgb(255, 80, 80)),
        None => egui::RichText::new("-"),
    }
}

impl CourtlineApp {
    pub(crate) fn render_metrics_panel(&mut self, ui: &mut egui::Ui) {
        let analysis = self.refresh_analysis();

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Shot type:").strong().size(11.0));
            let mut changed = false;
            for &st in ShotType::ALL {
                let selected = self.config.shot_type == st;
                if ui.selectable_label(selected, st.label()).clicked() && !selected {
                    self.config.shot_type = st;
                    changed = true;
                }
            }
            if changed {
                self.config_changed();
            }
        });
        ui.label(
            egui::RichText::new(format!(
                "{:.0} m/s, curve x{:.2}",
                self.config.shot_type.speed_mps(),
                self.config.shot_type.curve_factor()
            ))
            .size(11.0)
            .color(egui::Color32::from_rgb(140, 140, 140)),
        );
        ui.add_space(6.0);

        if !self.config.display.show_metrics {
            ui.label("Metrics are hidden (Settings → Display).");
            return;
        }

        egui::ScrollArea::both()
            .auto_shrink(false)
            .show(ui, |ui| {
                egui::Grid::new("metrics_grid")
                    .striped(true)
                    .min_col_width(70.0)
                    .show(ui, |ui| {
                        let hdr = |ui: &mut egui::Ui, text: &str| {
                            ui.label(egui::RichText::new(text).strong().size(11.0));
                        };
                        hdr(ui, "");
                        hdr(ui, Self::player_label(PlayerSide::Near));
                        hdr(ui, Self::player_label(PlayerSide::Far));
                        ui.end_row();

                        let pair = (&analysis.player1, &analysis.player2);
                        let row = |ui: &mut egui::Ui, label: &str, f: fn(&PlayerAnalysis) -> String| {
                            ui.label(label);
                            ui.label(f(pair.0));
                            ui.label(f(pair.1));
                            ui.end_row();
                        };

                        row(ui, "Position m", |p| format!("{:.2}, {:.2}", p.position.x, p.position.y));
                        row(ui, "Swing", |p| {
                            if p.swing == p.auto_swing {
                                p.swing.to_string()
                            } else {
                                format!("{} (auto {})", p.swing, p.auto_swing)
                            }
                        });
                        row(ui, "Contact m", |p| format!("{:.2}, {:.2}", p.contact.x, p.contact.y));
                        row(ui, "Down the line m", |p| format!("{:.2}", p.metrics.len_down_line));
                        row(ui, "Cross court m", |p| format!("{:.2}", p.metrics.len_cross));
                        row(ui, "Shot angle deg", |p| opt_f(p.metrics.angle_deg, 1));
                        row(ui, "Bisector deg", |p| opt_f(p.bisector.map(|b| b.angle_deg()), 1));
                        row(ui, "Optimal x m", |p| {
                            opt_f(p.bisector.and_then(|b| b.optimal().map(|o| o.position.x)), 2)
                        });
                        row(ui, "Between players m", |p| format!("{:.2}", p.metrics.inter_player_distance));
                    });

                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("Opponent intercept")
                        .strong()
                        .color(egui::Color32::from_rgb(180, 200, 255)),
                );
                ui.add_space(4.0);

                egui::Grid::new("intercept_grid")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        let hdr = |ui: &mut egui::Ui, text: &str| {
                            ui.label(egui::RichText::new(text).strong().size(11.0));
                        };
                        hdr(ui, "Hitter");
                        hdr(ui, "Shot");
                        hdr(ui, "Lateral\nm");
                        hdr(ui, "Run\ns");
                        hdr(ui, "Ball\nm");
                        hdr(ui, "Ball\ns");
                        hdr(ui, "Margin\ns");
                        hdr(ui, "");
                        ui.end_row();

                        for side in [PlayerSide::Near, PlayerSide::Far] {
                            let p = analysis.player(side);
                            for (shot, est) in [
                                ("Down the line", p.intercept_down_the_line),
                                ("Cross court", p.intercept_cross),
                            ] {
                                ui.label(Self::player_label(p.side));
                                ui.label(shot);
                                ui.label(opt_f(est.map(|e| e.lateral_distance), 2));
                                ui.label(opt_f(est.map(|e| e.player_time), 2));
                                ui.label(opt_f(est.map(|e| e.ball_distance), 2));
                                ui.label(opt_f(est.map(|e| e.ball_time), 2));
                                ui.label(opt_f(est.map(|e| e.margin()), 2));
                                ui.label(reach_label(est.map(|e| e.reachable())));
                                ui.end_row();
                            }
                        }
                    });
            });
    }
}
