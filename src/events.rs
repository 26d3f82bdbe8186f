//! Input events delivered to the app driver, independent of the window back-end.

use std::collections::VecDeque;

use crate::geometry::Point2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Quit,
    /// A click at a screen-space pixel position.
    MouseClick { screen: Point2D<f32> },
}

/// FIFO of pending events, filled by the back-end and drained once per frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Takes the oldest pending event.
    pub fn poll(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
