//! The molecule box: a rectangle of walls full of bodies.
//!
//! Each call to [`MoleculeBox::process_one_iteration`] runs three passes:
//!
//! 1. drift every body by `velocity * dt`,
//! 2. resolve body/body overlaps with an elastic impulse (optional),
//! 3. reflect bodies off the walls, heating or cooling them on contact.
//!
//! The wall pass runs last so that no body center is ever left outside the
//! walls between steps, whatever the collision pass did.
//!
//! Walls constrain body *centers*: a body touching the wall has its center on
//! the wall line.

use log::{debug, warn};

use crate::body::{Contact, PhysicalBody, Shape};
use crate::color::Color;
use crate::coordinate_system::CoordinateSystem;
use crate::error::{Result, SimError};
use crate::geometry::{Point2D, Vec2D};
use crate::render::Renderer;

/// Velocity added to the reflected component per degree of wall temperature.
pub const DEFAULT_HEAT_TRANSFER: f32 = 0.5;

const WALL_THICKNESS: f32 = 3.0;

pub struct MoleculeBox {
    wall_min: Point2D<f32>,
    wall_max: Point2D<f32>,
    wall_color: Color,
    fill_color: Color,

    /// Accumulated via `increase_walls_temperature`, no bounds.
    wall_temperature: f32,
    heat_transfer: f32,
    body_collisions: bool,

    bodies: Vec<PhysicalBody>,

    // -------------- Step statistics --------------
    elapsed: f32,
    steps: u64,
    wall_hits: usize,
    body_hits: usize,
}

impl MoleculeBox {
    /// Creates an empty box spanning the two corners (in any order).
    pub fn new(corner_a: Point2D<f32>, corner_b: Point2D<f32>, wall_color: Color, fill_color: Color) -> Result<Self> {
        if !corner_a.is_finite() || !corner_b.is_finite() {
            return Err(SimError::NonFinite("box corner"));
        }
        let wall_min = Point2D::new(corner_a.x.min(corner_b.x), corner_a.y.min(corner_b.y));
        let wall_max = Point2D::new(corner_a.x.max(corner_b.x), corner_a.y.max(corner_b.y));
        if wall_min.x == wall_max.x || wall_min.y == wall_max.y {
            return Err(SimError::DegenerateRect {
                what: "box",
                min_x: wall_min.x,
                min_y: wall_min.y,
                max_x: wall_max.x,
                max_y: wall_max.y,
            });
        }

        Ok(Self {
            wall_min,
            wall_max,
            wall_color,
            fill_color,
            wall_temperature: 0.0,
            heat_transfer: DEFAULT_HEAT_TRANSFER,
            body_collisions: true,
            bodies: Vec::new(),
            elapsed: 0.0,
            steps: 0,
            wall_hits: 0,
            body_hits: 0,
        })
    }

    /// Sets how strongly wall temperature changes the rebound speed.
    pub fn with_heat_transfer(mut self, heat_transfer: f32) -> Result<Self> {
        if !heat_transfer.is_finite() || heat_transfer < 0.0 {
            return Err(SimError::config(format!(
                "heat_transfer {heat_transfer} must be finite and >= 0"
            )));
        }
        self.heat_transfer = heat_transfer;
        Ok(self)
    }

    /// With `false`, bodies pass through each other and only the walls act.
    pub fn with_body_collisions(mut self, enabled: bool) -> Self {
        self.body_collisions = enabled;
        self
    }

    /// Builds a body of the given shape and takes ownership of it.
    pub fn add_shape(
        &mut self,
        shape: Shape,
        center: Point2D<f32>,
        velocity: Vec2D<f32>,
        mass: f32,
        color: Color,
    ) -> Result<()> {
        let body = PhysicalBody::new(shape, center, velocity, mass, color)?;
        self.bodies.push(body);
        Ok(())
    }

    pub fn add_circle(
        &mut self,
        center: Point2D<f32>,
        velocity: Vec2D<f32>,
        mass: f32,
        radius: f32,
        color: Color,
    ) -> Result<()> {
        self.add_shape(Shape::Circle { radius }, center, velocity, mass, color)
    }

    pub fn add_rectangle(
        &mut self,
        center: Point2D<f32>,
        width: f32,
        height: f32,
        velocity: Vec2D<f32>,
        mass: f32,
        color: Color,
    ) -> Result<()> {
        self.add_shape(Shape::Rectangle { width, height }, center, velocity, mass, color)
    }

    /// Adds `delta` to the wall temperature. Negative values cool the walls.
    pub fn increase_walls_temperature(&mut self, delta: f32) {
        if !delta.is_finite() {
            warn!("ignoring non-finite wall temperature change {delta}");
            return;
        }
        self.wall_temperature += delta;
        debug!("wall temperature now {:.1}", self.wall_temperature);
    }

    // ===================================================================================
    // Simulation step
    // ===================================================================================

    /// Advances every body by `dt`.
    pub fn process_one_iteration(&mut self, dt: f32) {
        if !dt.is_finite() {
            warn!("ignoring non-finite time step {dt}");
            return;
        }

        // 1) drift with the velocity from the start of the step
        for body in &mut self.bodies {
            body.center += body.velocity * dt;
        }

        // 2) body/body contacts
        self.body_hits = if self.body_collisions {
            self.handle_body_collisions()
        } else {
            0
        };

        // 3) walls
        self.wall_hits = self.handle_wall_collisions();

        self.elapsed += dt;
        self.steps += 1;
    }

    /// O(n^2) pass over all pairs. Returns how many pairs were in contact.
    fn handle_body_collisions(&mut self) -> usize {
        let mut hits = 0;
        let n = self.bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.bodies.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if let Some(contact) = a.contact(b) {
                    resolve_contact(a, b, contact);
                    hits += 1;
                }
            }
        }
        hits
    }

    fn handle_wall_collisions(&mut self) -> usize {
        let kick = self.heat_transfer * self.wall_temperature;
        let mut hits = 0;

        for body in &mut self.bodies {
            if bounce(&mut body.center.x, &mut body.velocity.x, self.wall_min.x, self.wall_max.x, kick) {
                hits += 1;
            }
            if bounce(&mut body.center.y, &mut body.velocity.y, self.wall_min.y, self.wall_max.y, kick) {
                hits += 1;
            }
        }
        hits
    }

    // ===================================================================================
    // Drawing
    // ===================================================================================

    /// Draws the box interior, the bodies, then the walls on top.
    pub fn draw<R: Renderer + ?Sized>(&self, coord_sys: &CoordinateSystem, renderer: &mut R) {
        let top_left = coord_sys.convert_coordinate(Point2D::new(self.wall_min.x, self.wall_max.y));
        let top_right = coord_sys.convert_coordinate(self.wall_max);
        let bottom_right = coord_sys.convert_coordinate(Point2D::new(self.wall_max.x, self.wall_min.y));
        let bottom_left = coord_sys.convert_coordinate(self.wall_min);

        renderer.fill_rect(top_left, bottom_right, self.fill_color);

        for body in &self.bodies {
            body.draw(coord_sys, renderer);
        }

        for (from, to) in [
            (top_left, top_right),
            (top_right, bottom_right),
            (bottom_right, bottom_left),
            (bottom_left, top_left),
        ] {
            renderer.draw_line(from, to, WALL_THICKNESS, self.wall_color);
        }
    }

    // ===================================================================================
    // Accessors
    // ===================================================================================

    pub fn bodies(&self) -> &[PhysicalBody] {
        &self.bodies
    }

    pub fn wall_temperature(&self) -> f32 {
        self.wall_temperature
    }

    pub fn wall_min(&self) -> Point2D<f32> {
        self.wall_min
    }

    pub fn wall_max(&self) -> Point2D<f32> {
        self.wall_max
    }

    /// Simulated time since creation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Wall contacts during the last step.
    pub fn wall_hits(&self) -> usize {
        self.wall_hits
    }

    /// Body pairs in contact during the last step.
    pub fn body_hits(&self) -> usize {
        self.body_hits
    }
}

/// Rebound speed off a wall at the given temperature kick, never negative.
fn rebound_speed(v: f32, kick: f32) -> f32 {
    (v.abs() + kick).max(0.0)
}

/// Keeps `pos` inside `[min, max]`, reflecting `vel` on contact.
/// A body resting on a wall line is in contact; one already moving inward is not.
/// Returns true on contact.
fn bounce(pos: &mut f32, vel: &mut f32, min: f32, max: f32, kick: f32) -> bool {
    if *pos < min || (*pos == min && *vel <= 0.0) {
        *pos = min;
        *vel = rebound_speed(*vel, kick);
        true
    } else if *pos > max || (*pos == max && *vel >= 0.0) {
        *pos = max;
        *vel = -rebound_speed(*vel, kick);
        true
    } else {
        false
    }
}

/// Pushes the pair apart by inverse mass and, if they approach, applies an
/// elastic impulse along the contact normal.
fn resolve_contact(a: &mut PhysicalBody, b: &mut PhysicalBody, contact: Contact) {
    let Contact { normal, depth } = contact;
    let inv_a = 1.0 / a.mass();
    let inv_b = 1.0 / b.mass();
    let inv_sum = inv_a + inv_b;

    a.center -= normal * (depth * inv_a / inv_sum);
    b.center += normal * (depth * inv_b / inv_sum);

    let approach = (b.velocity - a.velocity).dot(normal);
    if approach >= 0.0 {
        return;
    }
    let impulse = -2.0 * approach / inv_sum;
    a.velocity -= normal * (impulse * inv_a);
    b.velocity += normal * (impulse * inv_b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED, WHITE};

    fn unit_box() -> MoleculeBox {
        MoleculeBox::new(Point2D::new(-10.0, -10.0), Point2D::new(10.0, 10.0), RED, WHITE).unwrap()
    }

    #[test]
    fn corners_are_normalized() {
        let b = MoleculeBox::new(Point2D::new(-50.0, 22.5), Point2D::new(15.0, -17.5), RED, WHITE).unwrap();
        assert_eq!(b.wall_min(), Point2D::new(-50.0, -17.5));
        assert_eq!(b.wall_max(), Point2D::new(15.0, 22.5));
    }

    #[test]
    fn flat_box_is_rejected() {
        let b = MoleculeBox::new(Point2D::new(0.0, 1.0), Point2D::new(5.0, 1.0), RED, WHITE);
        assert!(matches!(b, Err(SimError::DegenerateRect { what: "box", .. })));
    }

    #[test]
    fn negative_heat_transfer_is_rejected() {
        assert!(unit_box().with_heat_transfer(-1.0).is_err());
    }

    #[test]
    fn free_flight_is_linear() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(0.0, 0.0), Vec2D::new(2.0, -1.0), 1.0, 0.5, BLUE).unwrap();
        b.process_one_iteration(0.5);
        let body = &b.bodies()[0];
        assert_eq!(body.center(), Point2D::new(1.0, -0.5));
        assert_eq!(body.velocity(), Vec2D::new(2.0, -1.0));
        assert_eq!(b.wall_hits(), 0);
    }

    #[test]
    fn top_wall_reflects_downward() {
        let mut b = unit_box();
        b.add_rectangle(Point2D::new(0.0, 9.9), 1.0, 1.0, Vec2D::new(0.0, 4.0), 1.0, BLUE).unwrap();
        b.process_one_iteration(0.1);
        let body = &b.bodies()[0];
        assert_eq!(body.center().y, 10.0);
        assert_eq!(body.velocity().y, -4.0);
        assert_eq!(b.wall_hits(), 1);
    }

    #[test]
    fn hot_wall_speeds_up_and_cold_wall_slows_down() {
        let rebound = |temperature: f32| {
            let mut b = unit_box();
            b.add_circle(Point2D::new(9.9, 0.0), Vec2D::new(3.0, 0.0), 1.0, 0.5, BLUE).unwrap();
            b.increase_walls_temperature(temperature);
            b.process_one_iteration(0.1);
            b.bodies()[0].velocity().x
        };
        assert_eq!(rebound(0.0), -3.0);
        assert_eq!(rebound(2.0), -4.0);
        assert_eq!(rebound(-2.0), -2.0);
        // cooled all the way down, the body stops rather than reversing
        assert_eq!(rebound(-100.0), 0.0);
    }

    #[test]
    fn reheated_wall_frees_a_resting_body() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(9.9, 0.0), Vec2D::new(3.0, 0.0), 1.0, 0.5, BLUE).unwrap();
        b.increase_walls_temperature(-100.0);
        b.process_one_iteration(0.1);
        assert_eq!(b.bodies()[0].center().x, 10.0);
        assert_eq!(b.bodies()[0].speed(), 0.0);

        b.increase_walls_temperature(200.0);
        b.process_one_iteration(0.1);
        assert_eq!(b.wall_hits(), 1);
        assert_eq!(b.bodies()[0].velocity().x, -50.0);

        b.process_one_iteration(0.1);
        assert!(b.bodies()[0].center().x < 10.0);
    }

    #[test]
    fn body_leaving_the_wall_is_not_kicked() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(-10.0, 0.0), Vec2D::new(1.0, 0.0), 1.0, 0.5, BLUE).unwrap();
        b.increase_walls_temperature(100.0);
        b.process_one_iteration(0.0);
        assert_eq!(b.wall_hits(), 0);
        assert_eq!(b.bodies()[0].velocity().x, 1.0);
    }

    #[test]
    fn temperature_only_acts_on_contact() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(0.0, 0.0), Vec2D::new(1.0, 0.0), 1.0, 0.5, BLUE).unwrap();
        b.increase_walls_temperature(50.0);
        b.process_one_iteration(0.1);
        assert_eq!(b.bodies()[0].velocity(), Vec2D::new(1.0, 0.0));
    }

    #[test]
    fn non_finite_temperature_change_is_ignored() {
        let mut b = unit_box();
        b.increase_walls_temperature(f32::NAN);
        assert_eq!(b.wall_temperature(), 0.0);
    }

    #[test]
    fn head_on_equal_masses_swap_velocities() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(-0.9, 0.0), Vec2D::new(1.0, 0.0), 1.0, 1.0, BLUE).unwrap();
        b.add_circle(Point2D::new(0.9, 0.0), Vec2D::new(-1.0, 0.0), 1.0, 1.0, BLUE).unwrap();
        b.process_one_iteration(0.0);
        assert_eq!(b.body_hits(), 1);
        assert!((b.bodies()[0].velocity().x + 1.0).abs() < 1e-6);
        assert!((b.bodies()[1].velocity().x - 1.0).abs() < 1e-6);
        // and they no longer overlap
        let gap = b.bodies()[1].center().x - b.bodies()[0].center().x;
        assert!(gap >= 2.0 - 1e-5);
    }

    #[test]
    fn collisions_conserve_momentum_and_energy() {
        let mut b = unit_box();
        b.add_circle(Point2D::new(0.0, 0.0), Vec2D::new(2.0, 0.5), 3.0, 1.0, BLUE).unwrap();
        b.add_rectangle(Point2D::new(1.2, 0.4), 1.0, 1.0, Vec2D::new(-1.0, 0.0), 1.0, BLUE).unwrap();

        let momentum = |b: &MoleculeBox| {
            b.bodies()
                .iter()
                .fold(Vec2D::ZERO, |acc, body| acc + body.velocity() * body.mass())
        };
        let energy = |b: &MoleculeBox| b.bodies().iter().map(|x| x.kinetic_energy()).sum::<f32>();

        let (p0, e0) = (momentum(&b), energy(&b));
        b.process_one_iteration(0.0);
        let (p1, e1) = (momentum(&b), energy(&b));

        assert_eq!(b.body_hits(), 1);
        assert!((p0 - p1).length() < 1e-4);
        assert!((e0 - e1).abs() < 1e-3);
    }

    #[test]
    fn collisions_can_be_disabled() {
        let mut b = unit_box().with_body_collisions(false);
        b.add_circle(Point2D::new(0.0, 0.0), Vec2D::ZERO, 1.0, 1.0, BLUE).unwrap();
        b.add_circle(Point2D::new(0.5, 0.0), Vec2D::ZERO, 1.0, 1.0, BLUE).unwrap();
        b.process_one_iteration(0.1);
        assert_eq!(b.body_hits(), 0);
        assert_eq!(b.bodies()[1].center(), Point2D::new(0.5, 0.0));
    }

    #[test]
    fn elapsed_time_accumulates() {
        let mut b = unit_box();
        for _ in 0..4 {
            b.process_one_iteration(0.25);
        }
        assert_eq!(b.elapsed(), 1.0);
        assert_eq!(b.steps(), 4);
    }
}
