//! Plain 2D value types shared by the simulation and the drawing code.
//!
//! [`Point2D`] is a position, [`Vec2D`] a displacement or velocity. Subtracting
//! two points yields a vector and adding a vector to a point yields a point, so
//! the two never get mixed up by accident. Whether a point lives in world or
//! screen space is up to the caller; conversion goes through
//! [`CoordinateSystem`](crate::CoordinateSystem).

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A position in either world or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D<T = f32> {
    pub x: T,
    pub y: T,
}

/// A displacement or velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2D<T = f32> {
    pub x: T,
    pub y: T,
}

impl<T> Point2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vec2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point2D<f32> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vec2D<f32> {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<T> From<(T, T)> for Point2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Vec2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

// ===================================================================================
// Point / vector arithmetic
// ===================================================================================

impl<T: Add<Output = T>> Add<Vec2D<T>> for Point2D<T> {
    type Output = Point2D<T>;

    fn add(self, rhs: Vec2D<T>) -> Self::Output {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub<Vec2D<T>> for Point2D<T> {
    type Output = Point2D<T>;

    fn sub(self, rhs: Vec2D<T>) -> Self::Output {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: AddAssign> AddAssign<Vec2D<T>> for Point2D<T> {
    fn add_assign(&mut self, rhs: Vec2D<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign<Vec2D<T>> for Point2D<T> {
    fn sub_assign(&mut self, rhs: Vec2D<T>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Sub<Output = T>> Sub for Point2D<T> {
    type Output = Vec2D<T>;

    fn sub(self, rhs: Point2D<T>) -> Self::Output {
        Vec2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Add<Output = T>> Add for Vec2D<T> {
    type Output = Vec2D<T>;

    fn add(self, rhs: Vec2D<T>) -> Self::Output {
        Vec2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vec2D<T> {
    type Output = Vec2D<T>;

    fn sub(self, rhs: Vec2D<T>) -> Self::Output {
        Vec2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: AddAssign> AddAssign for Vec2D<T> {
    fn add_assign(&mut self, rhs: Vec2D<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign for Vec2D<T> {
    fn sub_assign(&mut self, rhs: Vec2D<T>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Neg<Output = T>> Neg for Vec2D<T> {
    type Output = Vec2D<T>;

    fn neg(self) -> Self::Output {
        Vec2D::new(-self.x, -self.y)
    }
}

/// Scalar scaling, e.g. `velocity * dt`.
impl<T: Mul<Output = T> + Copy> Mul<T> for Vec2D<T> {
    type Output = Vec2D<T>;

    fn mul(self, rhs: T) -> Self::Output {
        Vec2D::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Vec2D<T> {
    type Output = Vec2D<T>;

    fn div(self, rhs: T) -> Self::Output {
        Vec2D::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_minus_point_is_vector() {
        let a = Point2D::new(3.0_f32, 4.0);
        let b = Point2D::new(1.0_f32, 1.0);
        assert_eq!(a - b, Vec2D::new(2.0, 3.0));
        assert_eq!(b + (a - b), a);
    }

    #[test]
    fn vector_scaling_and_length() {
        let v = Vec2D::new(3.0_f32, -4.0) * 2.0;
        assert_eq!(v, Vec2D::new(6.0, -8.0));
        assert!((v.length() - 10.0).abs() < 1e-6);
        assert_eq!(v.dot(Vec2D::new(1.0, 0.0)), 6.0);
        assert_eq!(-v, Vec2D::new(-6.0, 8.0));
    }

    #[test]
    fn integer_points_work_too() {
        let p: Point2D<i32> = (2, 5).into();
        assert_eq!(p + Vec2D::new(1, -1), Point2D::new(3, 4));
    }
}
