//! eframe front-end: the window, the painter the scene is drawn with, and the
//! side panel with live plots.

use eframe::egui::{self, Color32, Sense};
use egui_plot::{Line, Plot, PlotPoints};
use log::{debug, info};

use crate::app::{App, FrameOutcome};
use crate::color::{LIGHT_GREEN, LIGHT_PINK};
use crate::config::AppConfig;
use crate::events::{Event, EventQueue};
use crate::geometry::Point2D;
use crate::render::PainterRenderer;
use crate::stats::gas_temperature;

/// Wraps the driver for eframe and turns egui input into [`Event`]s.
pub struct MoleculeBoxApp {
    app: App,
    events: EventQueue,
    /// Set while the drawing area has no size, so the skip is logged once.
    paused: bool,
}

impl MoleculeBoxApp {
    pub fn new(app: App) -> Self {
        Self {
            app,
            events: EventQueue::new(),
            paused: false,
        }
    }

    fn stats_panel(&self, ui: &mut egui::Ui) {
        let b = self.app.molecule_box();
        ui.heading("Molecule Box");
        ui.label(format!("Bodies: {}", b.bodies().len()));
        ui.label(format!("Wall temperature: {:.1}", b.wall_temperature()));
        ui.label(format!("Gas temperature: {:.1}", gas_temperature(b.bodies())));
        ui.label(format!("Simulated time: {:.3}", b.elapsed()));
        ui.separator();

        ui.label("Gas temperature over time");
        Plot::new("temperature_graph")
            .height(200.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let points = self.app.temperature_graph().points();
                plot_ui.line(Line::new(PlotPoints::from(points)).color(Color32::from(LIGHT_PINK)));
            });

        ui.separator();
        ui.label("Speed distribution (rolling average)");
        Plot::new("speed_histogram")
            .height(200.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let points = self.app.speed_histogram().points();
                plot_ui.line(Line::new(PlotPoints::from(points)).color(Color32::from(LIGHT_GREEN)));
            });
    }
}

impl eframe::App for MoleculeBoxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("stats_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.stats_panel(ui));

        let mut outcome = FrameOutcome::Continue;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
                let rect = response.rect;

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.events.push(Event::MouseClick {
                            screen: Point2D::new(pos.x, pos.y),
                        });
                    }
                }
                if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.viewport().close_requested()) {
                    self.events.push(Event::Quit);
                }

                let coord_sys = match self
                    .app
                    .scene()
                    .coordinate_system_for(Point2D::new(rect.min.x, rect.min.y), Point2D::new(rect.max.x, rect.max.y))
                {
                    Ok(cs) => cs,
                    Err(e) => {
                        // minimised or zero-sized panel, nothing to draw into
                        if !self.paused {
                            info!("pausing while the drawing area is empty: {e}");
                            self.paused = true;
                        }
                        return;
                    }
                };
                if self.paused {
                    debug!("drawing area restored, resuming");
                    self.paused = false;
                }

                let mut renderer = PainterRenderer::new(&painter);
                outcome = self.app.run_frame(&coord_sys, &mut renderer, &mut self.events);
            });

        if outcome == FrameOutcome::Quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // keep animating
        ctx.request_repaint();
    }
}

/// Opens the window and runs until it is closed.
pub fn run(config: &AppConfig, app: App) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    info!("opening {}x{} window", config.window.width, config.window.height);
    eframe::run_native(
        &config.window.title,
        native_options,
        Box::new(|_cc| Ok(Box::new(MoleculeBoxApp::new(app)))),
    )
}
