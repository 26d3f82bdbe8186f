//! Massed, moving, collidable bodies.
//!
//! The shape set is closed: a body is either a circle or an axis-aligned
//! rectangle, so collision code can match exhaustively on [`Shape`].

use crate::color::Color;
use crate::coordinate_system::CoordinateSystem;
use crate::error::{Result, SimError};
use crate::geometry::{Point2D, Vec2D};
use crate::render::Renderer;

/// Geometry of a body in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    fn validate(&self) -> Result<()> {
        match *self {
            Shape::Circle { radius } => {
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(SimError::shape(format!("circle radius {radius} must be finite and > 0")));
                }
            }
            Shape::Rectangle { width, height } => {
                if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
                    return Err(SimError::shape(format!(
                        "rectangle {width} x {height} must have finite, positive sides"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Half-width and half-height of the bounding box.
    pub fn half_extents(&self) -> Vec2D<f32> {
        match *self {
            Shape::Circle { radius } => Vec2D::new(radius, radius),
            Shape::Rectangle { width, height } => Vec2D::new(width * 0.5, height * 0.5),
        }
    }
}

/// A simulated particle.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalBody {
    pub(crate) center: Point2D<f32>,
    pub(crate) velocity: Vec2D<f32>,
    mass: f32,
    shape: Shape,
    color: Color,
}

impl PhysicalBody {
    pub fn new(
        shape: Shape,
        center: Point2D<f32>,
        velocity: Vec2D<f32>,
        mass: f32,
        color: Color,
    ) -> Result<Self> {
        if !center.is_finite() {
            return Err(SimError::NonFinite("body center"));
        }
        if !velocity.is_finite() {
            return Err(SimError::NonFinite("body velocity"));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        shape.validate()?;

        Ok(Self {
            center,
            velocity,
            mass,
            shape,
            color,
        })
    }

    pub fn circle(
        center: Point2D<f32>,
        velocity: Vec2D<f32>,
        mass: f32,
        radius: f32,
        color: Color,
    ) -> Result<Self> {
        Self::new(Shape::Circle { radius }, center, velocity, mass, color)
    }

    pub fn rectangle(
        center: Point2D<f32>,
        width: f32,
        height: f32,
        velocity: Vec2D<f32>,
        mass: f32,
        color: Color,
    ) -> Result<Self> {
        Self::new(Shape::Rectangle { width, height }, center, velocity, mass, color)
    }

    pub fn center(&self) -> Point2D<f32> {
        self.center
    }

    pub fn velocity(&self) -> Vec2D<f32> {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Overlap with `other`, if any. The normal points from `self` to `other`.
    pub fn contact(&self, other: &PhysicalBody) -> Option<Contact> {
        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                circle_circle(self.center, ra, other.center, rb)
            }
            (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => box_box(
                self.center,
                self.shape.half_extents(),
                other.center,
                other.shape.half_extents(),
            ),
            (Shape::Circle { radius }, Shape::Rectangle { .. }) => {
                circle_box(self.center, radius, other.center, other.shape.half_extents())
            }
            (Shape::Rectangle { .. }, Shape::Circle { radius }) => {
                circle_box(other.center, radius, self.center, self.shape.half_extents())
                    .map(Contact::flipped)
            }
        }
    }

    pub(crate) fn draw<R: Renderer + ?Sized>(&self, coord_sys: &CoordinateSystem, renderer: &mut R) {
        match self.shape {
            Shape::Circle { radius } => renderer.draw_circle(
                coord_sys.convert_coordinate(self.center),
                coord_sys.scale_length_x(radius),
                self.color,
            ),
            Shape::Rectangle { .. } => {
                let half = self.shape.half_extents();
                renderer.fill_rect(
                    coord_sys.convert_coordinate(self.center - half),
                    coord_sys.convert_coordinate(self.center + half),
                    self.color,
                );
            }
        }
    }
}

// ===================================================================================
// Narrow-phase contact tests
// ===================================================================================

/// Penetration between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first body to the second.
    pub normal: Vec2D<f32>,
    /// How far the bodies overlap along `normal`.
    pub depth: f32,
}

impl Contact {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

fn circle_circle(ca: Point2D<f32>, ra: f32, cb: Point2D<f32>, rb: f32) -> Option<Contact> {
    let d = cb - ca;
    let reach = ra + rb;
    let dist2 = d.length_squared();
    if dist2 >= reach * reach {
        return None;
    }
    let dist = dist2.sqrt();
    if dist == 0.0 {
        // concentric: pick an arbitrary axis so they still separate
        return Some(Contact {
            normal: Vec2D::new(1.0, 0.0),
            depth: reach,
        });
    }
    Some(Contact {
        normal: d / dist,
        depth: reach - dist,
    })
}

fn box_box(ca: Point2D<f32>, ha: Vec2D<f32>, cb: Point2D<f32>, hb: Vec2D<f32>) -> Option<Contact> {
    let d = cb - ca;
    let overlap_x = ha.x + hb.x - d.x.abs();
    let overlap_y = ha.y + hb.y - d.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }
    // separate along the axis of least penetration
    if overlap_x < overlap_y {
        Some(Contact {
            normal: Vec2D::new(sign(d.x), 0.0),
            depth: overlap_x,
        })
    } else {
        Some(Contact {
            normal: Vec2D::new(0.0, sign(d.y)),
            depth: overlap_y,
        })
    }
}

/// Normal points from the circle to the box.
fn circle_box(cc: Point2D<f32>, r: f32, cb: Point2D<f32>, hb: Vec2D<f32>) -> Option<Contact> {
    let closest = Point2D::new(
        cc.x.clamp(cb.x - hb.x, cb.x + hb.x),
        cc.y.clamp(cb.y - hb.y, cb.y + hb.y),
    );
    let d = cc - closest;
    let dist2 = d.length_squared();

    if dist2 > 0.0 {
        if dist2 >= r * r {
            return None;
        }
        let dist = dist2.sqrt();
        return Some(Contact {
            normal: -(d / dist),
            depth: r - dist,
        });
    }

    // circle center inside the box: leave through the nearest face
    let rel = cc - cb;
    let to_face_x = hb.x - rel.x.abs();
    let to_face_y = hb.y - rel.y.abs();
    if to_face_x < to_face_y {
        Some(Contact {
            normal: Vec2D::new(-sign(rel.x), 0.0),
            depth: to_face_x + r,
        })
    } else {
        Some(Contact {
            normal: Vec2D::new(0.0, -sign(rel.y)),
            depth: to_face_y + r,
        })
    }
}
