//! Configuration for the demo, loadable from YAML.
//!
//! Every field has a default matching the classic demo, so a config file
//! only needs the values it wants to change:
//!
//! ```yaml
//! window:
//!   width: 1280.0
//!   height: 720.0
//!
//! simulation:
//!   circles: 30          # number of round molecules
//!   rectangles: 50       # number of square molecules
//!   dt: 0.001            # simulated time per step
//!   steps_per_frame: 1
//!   heat_transfer: 0.5   # rebound speed gained per degree of wall temperature
//!   body_collisions: true
//!   seed: 42             # omit for a random scene
//!
//! buttons:
//!   temperature_step: 10.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::color::{self, Color};
use crate::error::{Result, SimError};
use crate::molecule_box::DEFAULT_HEAT_TRANSFER;

/// Window geometry and look
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,  // initial inner width in pixels
    pub height: f32, // initial inner height in pixels
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Molecule Box".to_owned(),
            width: 1280.0,
            height: 720.0,
            background: color::WHITE,
        }
    }
}

/// World rectangle: `[-max_x, max_x]` horizontally, vertical extent follows the window aspect ratio
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub max_x: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { max_x: 50.0 }
    }
}

/// Scene population and physics knobs
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f32,              // simulated time per step
    pub steps_per_frame: u32, // steps run per drawn frame
    pub circles: usize,
    pub rectangles: usize,
    pub max_velocity: f32,    // initial velocity components drawn from [-max, max] ...
    pub velocity_factor: f32, // ... then multiplied by this
    pub min_mass: f32,
    pub max_mass: f32,
    pub heat_transfer: f32,
    pub body_collisions: bool,
    pub seed: Option<u64>, // fixed seed for a reproducible scene
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.001,
            steps_per_frame: 1,
            circles: 30,
            rectangles: 50,
            max_velocity: 20.0,
            velocity_factor: 5.0,
            min_mass: 0.2,
            max_mass: 4.0,
            heat_transfer: DEFAULT_HEAT_TRANSFER,
            body_collisions: true,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ButtonsConfig {
    pub temperature_step: f32, // wall temperature change per click
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self { temperature_step: 10.0 }
    }
}

/// Live plots
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StatsConfig {
    pub num_bins: usize,
    pub max_speed: f32,
    pub rolling_frames: usize,
    pub graph_capacity: usize, // temperature samples kept for the time plot
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            num_bins: 40,
            max_speed: 300.0,
            rolling_frames: 100,
            graph_capacity: 2000,
        }
    }
}

/// Top-level configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub simulation: SimulationConfig,
    pub buttons: ButtonsConfig,
    pub stats: StatsConfig,
}

impl AppConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config: AppConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges that the scene builder relies on.
    pub fn validate(&self) -> Result<()> {
        let w = &self.window;
        positive("window.width", w.width)?;
        positive("window.height", w.height)?;
        positive("world.max_x", self.world.max_x)?;

        let s = &self.simulation;
        positive("simulation.dt", s.dt)?;
        if s.steps_per_frame == 0 {
            return Err(SimError::config("simulation.steps_per_frame must be >= 1"));
        }
        positive("simulation.min_mass", s.min_mass)?;
        positive("simulation.max_mass", s.max_mass)?;
        if s.min_mass > s.max_mass {
            return Err(SimError::config(format!(
                "simulation.min_mass {} exceeds max_mass {}",
                s.min_mass, s.max_mass
            )));
        }
        non_negative("simulation.max_velocity", s.max_velocity)?;
        non_negative("simulation.velocity_factor", s.velocity_factor)?;
        non_negative("simulation.heat_transfer", s.heat_transfer)?;

        if !self.buttons.temperature_step.is_finite() {
            return Err(SimError::config("buttons.temperature_step must be finite"));
        }

        let st = &self.stats;
        if st.num_bins == 0 || st.rolling_frames == 0 || st.graph_capacity == 0 {
            return Err(SimError::config(
                "stats.num_bins, stats.rolling_frames and stats.graph_capacity must be >= 1",
            ));
        }
        positive("stats.max_speed", st.max_speed)?;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::config(format!("{name} must be finite and > 0, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::config(format!("{name} must be finite and >= 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.simulation.circles, 30);
        assert_eq!(config.simulation.rectangles, 50);
        assert_eq!(config.buttons.temperature_step, 10.0);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = AppConfig::from_yaml_str(
            "simulation:\n  circles: 3\n  seed: 7\nwindow:\n  background: { r: 1, g: 2, b: 3 }\n",
        )
        .unwrap();
        assert_eq!(config.simulation.circles, 3);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.rectangles, 50);
        assert_eq!(config.window.background, Color::rgb(1, 2, 3));
        assert_eq!(config.world.max_x, 50.0);
    }

    #[test]
    fn bad_ranges_are_reported() {
        let err = AppConfig::from_yaml_str("simulation:\n  min_mass: 5.0\n  max_mass: 1.0\n").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));

        let err = AppConfig::from_yaml_str("simulation:\n  dt: -0.1\n").unwrap_err();
        assert!(err.to_string().contains("simulation.dt"));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = AppConfig::from_yaml_str("simulation: [1, 2").unwrap_err();
        assert!(matches!(err, SimError::Yaml(_)));
    }
}
