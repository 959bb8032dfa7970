use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use pendulum_sim::config::{PlanarForm, SphericalForm};
use pendulum_sim::session::{PlanarSession, SphericalSession};
use pendulum_sim::types::presets;

const TRAIL_LEN: usize = 300;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let app = PendulumViz::planar();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Pendulum Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

/// The viewer owns exactly one session; switching model starts a new one.
enum Model {
    Planar { session: PlanarSession, form: PlanarForm },
    Spherical { session: SphericalSession, form: SphericalForm },
}

struct PendulumViz {
    model: Model,
    error: Option<String>,
    playing: bool,
}

impl PendulumViz {
    fn planar() -> Self {
        let session = PlanarSession::new(presets::planar_default());
        let form = PlanarForm::from_params(session.params());
        Self { model: Model::Planar { session, form }, error: None, playing: true }
    }

    fn spherical() -> Self {
        let session = SphericalSession::new(presets::rosette());
        let form = SphericalForm::from_params(session.params());
        Self { model: Model::Spherical { session, form }, error: None, playing: true }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Planar").clicked() {
                *self = Self::planar();
            }
            if ui.button("Spherical").clicked() {
                *self = Self::spherical();
            }
        });
        ui.separator();

        let mut apply = false;
        let fields: Vec<(&'static str, &mut String)> = match &mut self.model {
            Model::Planar { form, .. } => form.fields_mut().into_iter().collect(),
            Model::Spherical { form, .. } => form.fields_mut().into_iter().collect(),
        };
        egui::Grid::new("params").num_columns(2).show(ui, |ui| {
            for (label, value) in fields {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(90.0));
                ui.end_row();
            }
        });

        ui.horizontal(|ui| {
            apply = ui.button("Apply").clicked();
            let label = if self.playing { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                self.playing = !self.playing;
            }
        });

        if apply {
            let result = match &mut self.model {
                Model::Planar { session, form } => session.apply(&*form),
                Model::Spherical { session, form } => session.apply(&*form),
            };
            self.error = result.err().map(|e| e.to_string());
        }

        if let Some(err) = &self.error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
    }
}

fn time_series(ui: &mut egui::Ui, id: &str, name: &str, t: &[f64], v: &[f64], w: f32, h: f32) {
    let step = (t.len() / 2000).max(1);
    let points: PlotPoints = t.iter().zip(v).step_by(step).map(|(t, v)| [*t, *v]).collect();
    Plot::new(id)
        .width(w)
        .height(h)
        .x_axis_label("Time (s)")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(name, points));
        });
}

impl eframe::App for PendulumViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Parameters");
            self.controls(ui);
        });

        let playing = self.playing;
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            match &mut self.model {
                Model::Planar { session, .. } => {
                    let i = if playing { session.advance() } else { session.frame() };
                    let length = session.params().length;
                    let sol = session.solution();
                    let (x, y) = (length * sol.theta[i].sin(), -length * sol.theta[i].cos());

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label("theta (rad)");
                            time_series(ui, "theta", "theta", &sol.time, &sol.theta, half_w, half_h);
                            ui.label("Energy (J/kg)");
                            time_series(ui, "energy", "E", &sol.time, &sol.energy, half_w, half_h);
                        });
                        ui.vertical(|ui| {
                            ui.label(format!("t = {:.2} s", sol.time[i]));
                            Plot::new("swing")
                                .width(half_w)
                                .height(2.0 * half_h)
                                .data_aspect(1.0)
                                .include_x(-1.2 * length)
                                .include_x(1.2 * length)
                                .include_y(-1.2 * length)
                                .include_y(0.2 * length)
                                .show(ui, |plot_ui| {
                                    plot_ui.line(Line::new("Rod", vec![[0.0, 0.0], [x, y]]));
                                    plot_ui.points(Points::new("Bob", vec![[x, y]]).radius(8.0));
                                });
                        });
                    });
                }
                Model::Spherical { session, .. } => {
                    let i = if playing { session.advance() } else { session.frame() };
                    let trail = session.trail(TRAIL_LEN);
                    let length = session.params().length;
                    let sol = session.solution();

                    let top: PlotPoints = trail.clone().map(|k| [sol.x[k], sol.y[k]]).collect();
                    let side: PlotPoints = trail.map(|k| [sol.x[k], sol.z[k]]).collect();
                    let rim: PlotPoints = (0..=200)
                        .map(|k| {
                            let a = k as f64 / 200.0 * std::f64::consts::TAU;
                            [length * a.cos(), length * a.sin()]
                        })
                        .collect();

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label("theta (rad)");
                            time_series(ui, "theta", "theta", &sol.time, &sol.theta, half_w, half_h);
                            ui.label("Energy (J/kg)");
                            time_series(ui, "energy", "E", &sol.time, &sol.energy, half_w, half_h);
                        });
                        ui.vertical(|ui| {
                            ui.label(format!("Top view (x, y)   t = {:.2} s", sol.time[i]));
                            Plot::new("top")
                                .width(half_w)
                                .height(half_h)
                                .data_aspect(1.0)
                                .show(ui, |plot_ui| {
                                    plot_ui.line(Line::new("Floor", rim));
                                    plot_ui.line(Line::new("Trail", top));
                                    plot_ui.points(Points::new("Bob", vec![[sol.x[i], sol.y[i]]]).radius(6.0));
                                });
                            ui.label("Side view (x, z)");
                            Plot::new("side")
                                .width(half_w)
                                .height(half_h)
                                .data_aspect(1.0)
                                .show(ui, |plot_ui| {
                                    plot_ui.line(Line::new("Rod", vec![[0.0, 0.0], [sol.x[i], sol.z[i]]]));
                                    plot_ui.line(Line::new("Trail", side));
                                    plot_ui.points(Points::new("Bob", vec![[sol.x[i], sol.z[i]]]).radius(6.0));
                                });
                        });
                    });
                }
            }
        });

        if self.playing {
            ctx.request_repaint();
        }
    }
}
