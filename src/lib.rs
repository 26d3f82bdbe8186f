pub mod app;
pub mod body;
pub mod button;
pub mod color;
pub mod config;
pub mod coordinate_system;
pub mod error;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod gui;
pub mod molecule_box;
pub mod render;
pub mod scene;
pub mod stats;

pub use app::{App, FrameOutcome};
pub use body::{Contact, PhysicalBody, Shape};
pub use button::{Button, ButtonId, ButtonManager};
pub use color::Color;
pub use config::AppConfig;
pub use coordinate_system::CoordinateSystem;
pub use error::{Result, SimError};
pub use events::{Event, EventQueue};
pub use geometry::{Point2D, Vec2D};
pub use graph::TimeSeries;
pub use molecule_box::MoleculeBox;
pub use render::{DrawCommand, PainterRenderer, RecordingRenderer, Renderer};
pub use scene::{Scene, build_scene, random_float};
pub use stats::{SpeedHistogram, gas_temperature, total_kinetic_energy};
