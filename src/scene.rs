//! Builds the demo scene: world rectangle, molecule box full of bodies and
//! the two wall-temperature buttons.
//!
//! Layout, in world units with `max_y = max_x * height / width`:
//!
//! ```text
//!  (-max_x, 0.9 max_y) ┌──────────────┐      ┌─────┐ heat
//!                      │bodies│       │      └─────┘
//!                      ├──────┘       │      ┌─────┐ cool
//!                      └──────────────┘      └─────┘
//!                         (0.3 max_x, -0.7 max_y)
//! ```
//!
//! Bodies start in the part of the box left of and above the world origin,
//! so the gas spreads out from the upper-left corner.

use std::f32::consts::PI;

use log::info;
use rand::Rng;

use crate::button::ButtonManager;
use crate::color::{BLUE, RED, WHITE};
use crate::config::{AppConfig, SimulationConfig};
use crate::coordinate_system::CoordinateSystem;
use crate::error::Result;
use crate::geometry::{Point2D, Vec2D};
use crate::molecule_box::MoleculeBox;

/// Gap kept between freshly placed bodies and the walls.
const SPAWN_MARGIN: f32 = 1.0;

/// Uniform float in `[min, max)`; returns `min` when the range is empty.
pub fn random_float(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max { rng.random_range(min..max) } else { min }
}

/// Everything the app driver owns.
pub struct Scene {
    pub world_min: Point2D<f32>,
    pub world_max: Point2D<f32>,
    /// Mapping for the configured window size.
    pub coord_sys: CoordinateSystem,
    pub molecule_box: MoleculeBox,
    pub buttons: ButtonManager<MoleculeBox>,
}

impl Scene {
    /// Maps this scene's world rectangle onto another pixel rectangle, e.g.
    /// after the window was resized.
    pub fn coordinate_system_for(
        &self,
        screen_origin: Point2D<f32>,
        screen_extent: Point2D<f32>,
    ) -> Result<CoordinateSystem> {
        CoordinateSystem::new(screen_origin, screen_extent, self.world_min, self.world_max)
    }
}

/// Random center in the upper-left part of `[lo, hi]`, velocity and mass for a
/// new body.
fn random_body(
    rng: &mut impl Rng,
    lo: Point2D<f32>,
    hi: Point2D<f32>,
    sim: &SimulationConfig,
) -> (Point2D<f32>, Vec2D<f32>, f32) {
    let center = Point2D::new(
        random_float(rng, lo.x + SPAWN_MARGIN, (hi.x - SPAWN_MARGIN).min(0.0)),
        random_float(rng, (lo.y + SPAWN_MARGIN).max(0.0), hi.y - SPAWN_MARGIN),
    );
    let velocity = Vec2D::new(
        random_float(rng, -sim.max_velocity, sim.max_velocity),
        random_float(rng, -sim.max_velocity, sim.max_velocity),
    ) * sim.velocity_factor;
    let mass = random_float(rng, sim.min_mass, sim.max_mass);
    (center, velocity, mass)
}

pub fn build_scene(config: &AppConfig, rng: &mut impl Rng) -> Result<Scene> {
    config.validate()?;

    let width = config.window.width;
    let height = config.window.height;
    let max_x = config.world.max_x;
    let max_y = max_x * height / width;
    let world_min = Point2D::new(-max_x, -max_y);
    let world_max = Point2D::new(max_x, max_y);
    let coord_sys = CoordinateSystem::new(
        Point2D::new(0.0, 0.0),
        Point2D::new(width, height),
        world_min,
        world_max,
    )?;

    // -------------- Molecule box --------------
    let box_top_left = Point2D::new(-max_x, max_y * 0.9);
    let box_bottom_right = Point2D::new(max_x * 0.3, -max_y * 0.7);
    let sim = &config.simulation;
    let mut molecule_box = MoleculeBox::new(box_top_left, box_bottom_right, RED, WHITE)?
        .with_heat_transfer(sim.heat_transfer)?
        .with_body_collisions(sim.body_collisions);

    let lo = molecule_box.wall_min();
    let hi = molecule_box.wall_max();

    for _ in 0..sim.circles {
        let (center, velocity, mass) = random_body(rng, lo, hi, sim);
        let radius = (mass / PI).sqrt();
        molecule_box.add_circle(center, velocity, mass, radius, BLUE)?;
    }
    for _ in 0..sim.rectangles {
        let (center, velocity, mass) = random_body(rng, lo, hi, sim);
        let side = mass.sqrt();
        molecule_box.add_rectangle(center, side, side, velocity, mass, BLUE)?;
    }

    // -------------- Buttons --------------
    let step = config.buttons.temperature_step;
    let left = box_bottom_right.x + 10.0;
    let right = left + 15.0;
    let heat_top = box_top_left.y;
    let heat_bottom = heat_top - 10.0;
    let cool_top = heat_bottom - 2.0;
    let cool_bottom = heat_bottom - 12.0;

    let mut buttons = ButtonManager::new();
    buttons.add_labeled_button(
        Point2D::new(left, heat_top),
        Point2D::new(right, heat_bottom),
        RED,
        format!("+{step}"),
        move |b: &mut MoleculeBox| b.increase_walls_temperature(step),
    )?;
    buttons.add_labeled_button(
        Point2D::new(left, cool_top),
        Point2D::new(right, cool_bottom),
        BLUE,
        format!("-{step}"),
        move |b: &mut MoleculeBox| b.increase_walls_temperature(-step),
    )?;

    info!(
        "scene ready: {} bodies in box ({:.1}, {:.1})..({:.1}, {:.1}), {} buttons",
        molecule_box.bodies().len(),
        lo.x,
        lo.y,
        hi.x,
        hi.y,
        buttons.len()
    );

    Ok(Scene {
        world_min,
        world_max,
        coord_sys,
        molecule_box,
        buttons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_float_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = random_float(&mut rng, -2.0, 5.0);
            assert!((-2.0..5.0).contains(&x));
        }
        assert_eq!(random_float(&mut rng, 4.0, 4.0), 4.0);
        assert_eq!(random_float(&mut rng, 4.0, 1.0), 4.0);
    }

    #[test]
    fn default_scene_matches_classic_layout() {
        let config = AppConfig::default();
        let scene = build_scene(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let max_y = 50.0 * 720.0 / 1280.0;

        assert_eq!(scene.molecule_box.bodies().len(), 80);
        assert_eq!(scene.molecule_box.wall_min(), Point2D::new(-50.0, -max_y * 0.7));
        assert_eq!(scene.molecule_box.wall_max(), Point2D::new(50.0 * 0.3, max_y * 0.9));
        assert_eq!(scene.buttons.len(), 2);
        assert_eq!(scene.buttons.buttons()[0].label(), Some("+10"));
        assert_eq!(scene.buttons.buttons()[1].label(), Some("-10"));
    }

    #[test]
    fn bodies_start_in_upper_left_of_box() {
        let config = AppConfig::default();
        let scene = build_scene(&config, &mut StdRng::seed_from_u64(2)).unwrap();
        let lo = scene.molecule_box.wall_min();
        let hi = scene.molecule_box.wall_max();
        for body in scene.molecule_box.bodies() {
            let c = body.center();
            assert!(lo.x + SPAWN_MARGIN <= c.x && c.x <= 0.0, "{c:?}");
            assert!(0.0 <= c.y && c.y <= hi.y - SPAWN_MARGIN, "{c:?}");
            assert_eq!(body.color(), BLUE);
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let config = AppConfig::default();
        let a = build_scene(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = build_scene(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.molecule_box.bodies(), b.molecule_box.bodies());
    }

    #[test]
    fn masses_and_sizes_follow_config() {
        let config = AppConfig::default();
        let scene = build_scene(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        for body in scene.molecule_box.bodies() {
            assert!((0.2..4.0).contains(&body.mass()));
            match body.shape() {
                crate::body::Shape::Circle { radius } => {
                    assert!((radius * radius * PI - body.mass()).abs() < 1e-4)
                }
                crate::body::Shape::Rectangle { width, height } => {
                    assert_eq!(width, height);
                    assert!((width * width - body.mass()).abs() < 1e-4);
                }
            }
        }
    }
}
