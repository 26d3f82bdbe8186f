//! Back-end independent app driver.
//!
//! One call to [`App::run_frame`] is one animation frame:
//! simulate, draw, present, then drain the event queue and dispatch clicks.
//! Button callbacks therefore only ever mutate the box between frames.

use log::{debug, info, trace};

use crate::color::Color;
use crate::config::AppConfig;
use crate::coordinate_system::CoordinateSystem;
use crate::error::Result;
use crate::events::{Event, EventQueue};
use crate::graph::TimeSeries;
use crate::molecule_box::MoleculeBox;
use crate::render::Renderer;
use crate::scene::Scene;
use crate::stats::{SpeedHistogram, gas_temperature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

pub struct App {
    scene: Scene,
    background: Color,
    dt: f32,
    steps_per_frame: u32,

    // -------------- Live statistics --------------
    speed_hist: SpeedHistogram,
    temperature: TimeSeries,
    frames: u64,
}

impl App {
    pub fn new(scene: Scene, config: &AppConfig) -> Result<Self> {
        let stats = &config.stats;
        Ok(Self {
            scene,
            background: config.window.background,
            dt: config.simulation.dt,
            steps_per_frame: config.simulation.steps_per_frame,
            speed_hist: SpeedHistogram::new(stats.num_bins, stats.max_speed, stats.rolling_frames)?,
            temperature: TimeSeries::new(stats.graph_capacity),
            frames: 0,
        })
    }

    /// Runs one full frame against `coord_sys`, which maps the scene's world
    /// rectangle onto whatever pixel area the back-end is drawing into.
    pub fn run_frame<R: Renderer + ?Sized>(
        &mut self,
        coord_sys: &CoordinateSystem,
        renderer: &mut R,
        events: &mut EventQueue,
    ) -> FrameOutcome {
        self.simulate_frame();
        self.draw_everything(coord_sys, renderer);
        renderer.present();

        while let Some(event) = events.poll() {
            if self.handle_event(coord_sys, event) == FrameOutcome::Quit {
                return FrameOutcome::Quit;
            }
        }
        FrameOutcome::Continue
    }

    /// Advances the simulation by one frame's worth of steps and samples stats.
    pub fn simulate_frame(&mut self) {
        let molecule_box = &mut self.scene.molecule_box;
        for _ in 0..self.steps_per_frame {
            molecule_box.process_one_iteration(self.dt);
        }

        let bodies = molecule_box.bodies();
        self.speed_hist.record(bodies);
        self.temperature
            .push(molecule_box.elapsed() as f64, gas_temperature(bodies) as f64);
        self.frames += 1;

        trace!(
            "frame {}: t={:.4} wall hits={} body hits={}",
            self.frames,
            molecule_box.elapsed(),
            molecule_box.wall_hits(),
            molecule_box.body_hits()
        );
    }

    pub fn draw_everything<R: Renderer + ?Sized>(&self, coord_sys: &CoordinateSystem, renderer: &mut R) {
        renderer.change_background_color(self.background);
        self.scene.molecule_box.draw(coord_sys, renderer);
        self.scene.buttons.draw_buttons(coord_sys, renderer);
    }

    pub fn handle_event(&mut self, coord_sys: &CoordinateSystem, event: Event) -> FrameOutcome {
        match event {
            Event::Quit => {
                info!("quit requested after {} frames", self.frames);
                FrameOutcome::Quit
            }
            Event::MouseClick { screen } => {
                let world = coord_sys.to_world(screen);
                let Scene {
                    buttons,
                    molecule_box,
                    ..
                } = &mut self.scene;
                if buttons.process_mouse_click(world, molecule_box).is_none() {
                    debug!("click at ({:.2}, {:.2}) hit no button", world.x, world.y);
                }
                FrameOutcome::Continue
            }
        }
    }

    /// Simulates `frames` frames without drawing, logging a summary every
    /// `log_every` frames.
    pub fn run_headless(&mut self, frames: u64, log_every: u64) {
        info!("running {frames} frames headless");
        for frame in 1..=frames {
            self.simulate_frame();
            if log_every > 0 && frame % log_every == 0 {
                self.log_summary();
            }
        }
        self.log_summary();
    }

    fn log_summary(&self) {
        let b = &self.scene.molecule_box;
        info!(
            "t={:.3} steps={} gas temperature={:.2} wall temperature={:.1}",
            b.elapsed(),
            b.steps(),
            gas_temperature(b.bodies()),
            b.wall_temperature()
        );
    }

    // ===================================================================================
    // Accessors
    // ===================================================================================

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn molecule_box(&self) -> &MoleculeBox {
        &self.scene.molecule_box
    }

    pub fn speed_histogram(&self) -> &SpeedHistogram {
        &self.speed_hist
    }

    pub fn temperature_graph(&self) -> &TimeSeries {
        &self.temperature
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
