//! Clickable rectangles in world space.
//!
//! A [`ButtonManager<C>`] owns its buttons and their callbacks. Callbacks do
//! not capture what they act on; instead the caller lends a `&mut C` at click
//! time, so the manager never holds a reference into the simulation.

use log::debug;

use crate::color::{BLACK, Color};
use crate::coordinate_system::CoordinateSystem;
use crate::error::{Result, SimError};
use crate::geometry::Point2D;
use crate::render::Renderer;

/// Callback run when a button is clicked.
pub type ButtonCallback<C> = Box<dyn FnMut(&mut C)>;

/// Position of a button in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub usize);

pub struct Button<C> {
    top_left: Point2D<f32>,
    bottom_right: Point2D<f32>,
    color: Color,
    label: Option<String>,
    on_click: ButtonCallback<C>,
}

impl<C> Button<C> {
    /// Inclusive hit test. Works whichever way the corners were given.
    pub fn contains(&self, p: Point2D<f32>) -> bool {
        let (min_x, max_x) = ordered(self.top_left.x, self.bottom_right.x);
        let (min_y, max_y) = ordered(self.top_left.y, self.bottom_right.y);
        (min_x..=max_x).contains(&p.x) && (min_y..=max_y).contains(&p.y)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

pub struct ButtonManager<C> {
    buttons: Vec<Button<C>>,
}

impl<C> Default for ButtonManager<C> {
    fn default() -> Self {
        Self { buttons: Vec::new() }
    }
}

impl<C> ButtonManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a button. Later registrations lose to earlier ones on overlap.
    pub fn add_button<F>(
        &mut self,
        top_left: Point2D<f32>,
        bottom_right: Point2D<f32>,
        color: Color,
        on_click: F,
    ) -> Result<ButtonId>
    where
        F: FnMut(&mut C) + 'static,
    {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(SimError::NonFinite("button corner"));
        }
        self.buttons.push(Button {
            top_left,
            bottom_right,
            color,
            label: None,
            on_click: Box::new(on_click),
        });
        Ok(ButtonId(self.buttons.len() - 1))
    }

    /// Same as [`add_button`](Self::add_button) with a caption drawn in the middle.
    pub fn add_labeled_button<F>(
        &mut self,
        top_left: Point2D<f32>,
        bottom_right: Point2D<f32>,
        color: Color,
        label: impl Into<String>,
        on_click: F,
    ) -> Result<ButtonId>
    where
        F: FnMut(&mut C) + 'static,
    {
        let id = self.add_button(top_left, bottom_right, color, on_click)?;
        self.buttons[id.0].label = Some(label.into());
        Ok(id)
    }

    /// Fires the first button containing `world_point`, if any.
    pub fn process_mouse_click(&mut self, world_point: Point2D<f32>, ctx: &mut C) -> Option<ButtonId> {
        let index = self.buttons.iter().position(|b| b.contains(world_point))?;
        debug!("button {index} clicked at ({:.2}, {:.2})", world_point.x, world_point.y);
        (self.buttons[index].on_click)(ctx);
        Some(ButtonId(index))
    }

    pub fn draw_buttons<R: Renderer + ?Sized>(&self, coord_sys: &CoordinateSystem, renderer: &mut R) {
        for button in &self.buttons {
            let a = coord_sys.convert_coordinate(button.top_left);
            let b = coord_sys.convert_coordinate(button.bottom_right);
            renderer.fill_rect(a, b, button.color);
            renderer.stroke_rect(a, b, 1.0, BLACK);
            if let Some(label) = &button.label {
                let mid = Point2D::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
                renderer.draw_text(mid, label, BLACK);
            }
        }
    }

    pub fn buttons(&self) -> &[Button<C>] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};

    fn manager() -> ButtonManager<Vec<&'static str>> {
        let mut m = ButtonManager::new();
        m.add_button(Point2D::new(0.0, 10.0), Point2D::new(10.0, 0.0), RED, |log: &mut Vec<&'static str>| {
            log.push("a")
        })
        .unwrap();
        m.add_button(Point2D::new(5.0, 15.0), Point2D::new(15.0, 5.0), BLUE, |log: &mut Vec<&'static str>| {
            log.push("b")
        })
        .unwrap();
        m
    }

    #[test]
    fn first_registered_wins_on_overlap() {
        let mut m = manager();
        let mut log = Vec::new();
        assert_eq!(m.process_mouse_click(Point2D::new(7.0, 7.0), &mut log), Some(ButtonId(0)));
        assert_eq!(log, vec!["a"]);
    }

    #[test]
    fn click_outside_everything_is_a_no_op() {
        let mut m = manager();
        let mut log = Vec::new();
        assert_eq!(m.process_mouse_click(Point2D::new(-1.0, -1.0), &mut log), None);
        assert!(log.is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut m = manager();
        let mut log = Vec::new();
        m.process_mouse_click(Point2D::new(15.0, 15.0), &mut log);
        m.process_mouse_click(Point2D::new(0.0, 0.0), &mut log);
        assert_eq!(log, vec!["b", "a"]);
    }

    #[test]
    fn nan_corner_is_rejected() {
        let mut m: ButtonManager<()> = ButtonManager::new();
        let r = m.add_button(Point2D::new(f32::NAN, 0.0), Point2D::new(1.0, 1.0), RED, |_: &mut ()| {});
        assert!(r.is_err());
        assert!(m.is_empty());
    }
}
