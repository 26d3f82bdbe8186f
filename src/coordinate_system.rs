//! Affine mapping between the world rectangle the simulation runs in and the
//! pixel rectangle it is drawn into.
//!
//! Screen `y` grows downward while world `y` grows upward, so the `y` axis is
//! flipped. The two axes scale independently; no aspect-ratio correction is
//! applied. Points outside the world rectangle are extrapolated.

use crate::error::{Result, SimError};
use crate::geometry::{Point2D, Vec2D};

/// World ↔ screen mapping. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    /// Pixel position of the world's top-left corner.
    screen_origin: Point2D<f32>,
    /// Pixel position of the world's bottom-right corner.
    screen_extent: Point2D<f32>,
    world_min: Point2D<f32>,
    world_max: Point2D<f32>,
    /// Pixels per world unit along x.
    scale_x: f32,
    /// Pixels per world unit along y.
    scale_y: f32,
}

impl CoordinateSystem {
    /// Builds the mapping of `[world_min, world_max]` onto the pixel
    /// rectangle spanned by `screen_origin` (top-left) and `screen_extent`
    /// (bottom-right).
    pub fn new(
        screen_origin: Point2D<f32>,
        screen_extent: Point2D<f32>,
        world_min: Point2D<f32>,
        world_max: Point2D<f32>,
    ) -> Result<Self> {
        for p in [screen_origin, screen_extent, world_min, world_max] {
            if !p.is_finite() {
                return Err(SimError::NonFinite("coordinate system corner"));
            }
        }
        check_extent("screen", screen_origin, screen_extent)?;
        check_extent("world", world_min, world_max)?;

        let scale_x = (screen_extent.x - screen_origin.x) / (world_max.x - world_min.x);
        let scale_y = (screen_extent.y - screen_origin.y) / (world_max.y - world_min.y);

        Ok(Self {
            screen_origin,
            screen_extent,
            world_min,
            world_max,
            scale_x,
            scale_y,
        })
    }

    /// World → screen.
    pub fn convert_coordinate(&self, p: Point2D<f32>) -> Point2D<f32> {
        Point2D::new(
            self.screen_origin.x + (p.x - self.world_min.x) * self.scale_x,
            self.screen_origin.y + (self.world_max.y - p.y) * self.scale_y,
        )
    }

    /// Screen → world, the inverse of [`convert_coordinate`](Self::convert_coordinate).
    pub fn to_world(&self, p: Point2D<f32>) -> Point2D<f32> {
        Point2D::new(
            self.world_min.x + (p.x - self.screen_origin.x) / self.scale_x,
            self.world_max.y - (p.y - self.screen_origin.y) / self.scale_y,
        )
    }

    /// Pixels per world unit on each axis.
    pub fn scale(&self) -> Vec2D<f32> {
        Vec2D::new(self.scale_x, self.scale_y)
    }

    pub fn scale_length_x(&self, len: f32) -> f32 {
        len * self.scale_x
    }
}

fn check_extent(what: &'static str, min: Point2D<f32>, max: Point2D<f32>) -> Result<()> {
    if max.x > min.x && max.y > min.y {
        Ok(())
    } else {
        Err(SimError::DegenerateRect {
            what,
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_800x400() -> CoordinateSystem {
        CoordinateSystem::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(800.0, 400.0),
            Point2D::new(-50.0, -25.0),
            Point2D::new(50.0, 25.0),
        )
        .unwrap()
    }

    fn close(a: Point2D<f32>, b: Point2D<f32>) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn corners_map_to_corners() {
        let cs = window_800x400();
        assert!(close(cs.convert_coordinate(Point2D::new(-50.0, 25.0)), Point2D::new(0.0, 0.0)));
        assert!(close(cs.convert_coordinate(Point2D::new(50.0, -25.0)), Point2D::new(800.0, 400.0)));
        assert!(close(cs.convert_coordinate(Point2D::new(0.0, 0.0)), Point2D::new(400.0, 200.0)));
    }

    #[test]
    fn y_axis_is_flipped() {
        let cs = window_800x400();
        let high = cs.convert_coordinate(Point2D::new(0.0, 10.0));
        let low = cs.convert_coordinate(Point2D::new(0.0, -10.0));
        assert!(high.y < low.y);
    }

    #[test]
    fn out_of_range_points_are_extrapolated() {
        let cs = window_800x400();
        let p = cs.convert_coordinate(Point2D::new(100.0, -50.0));
        assert!(close(p, Point2D::new(1200.0, 600.0)));
    }

    #[test]
    fn to_world_inverts_conversion() {
        let cs = window_800x400();
        let w = Point2D::new(12.5, -7.25);
        assert!(close(cs.to_world(cs.convert_coordinate(w)), w));
    }

    #[test]
    fn degenerate_rectangles_are_rejected() {
        let flat_world = CoordinateSystem::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(800.0, 400.0),
            Point2D::new(-1.0, 3.0),
            Point2D::new(1.0, 3.0),
        );
        assert!(matches!(flat_world, Err(SimError::DegenerateRect { what: "world", .. })));

        let inverted_screen = CoordinateSystem::new(
            Point2D::new(800.0, 0.0),
            Point2D::new(0.0, 400.0),
            Point2D::new(-1.0, -1.0),
            Point2D::new(1.0, 1.0),
        );
        assert!(matches!(inverted_screen, Err(SimError::DegenerateRect { what: "screen", .. })));
    }

    #[test]
    fn nan_is_rejected() {
        let cs = CoordinateSystem::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(f32::NAN, 400.0),
            Point2D::new(-1.0, -1.0),
            Point2D::new(1.0, 1.0),
        );
        assert!(matches!(cs, Err(SimError::NonFinite(_))));
    }
}
