//! Gas statistics: temperature and the speed distribution.

use crate::body::PhysicalBody;
use crate::error::{Result, SimError};

pub fn total_kinetic_energy(bodies: &[PhysicalBody]) -> f32 {
    bodies.iter().map(PhysicalBody::kinetic_energy).sum()
}

/// Mean kinetic energy per body, the 2D gas "temperature" in simulation units.
/// Zero for an empty box.
pub fn gas_temperature(bodies: &[PhysicalBody]) -> f32 {
    if bodies.is_empty() {
        return 0.0;
    }
    total_kinetic_energy(bodies) / bodies.len() as f32
}

// ===================================================================================
// Speed histogram
// ===================================================================================

/// Speed histogram with a rolling average over the last `rolling_frames` frames.
///
/// Speeds at or above `max_speed` land in the last bin.
#[derive(Debug, Clone)]
pub struct SpeedHistogram {
    max_speed: f32,
    num_bins: usize,
    rolling_frames: usize,

    current: Vec<f32>,       // raw histogram for the latest frame
    ring: Vec<Vec<f32>>,     // ring buffer of past histograms
    ring_index: usize,       // next slot in the ring buffer
    stored_frames: usize,    // how many slots are filled
    smoothed: Vec<f32>,      // rolling average of the ring
}

impl SpeedHistogram {
    pub fn new(num_bins: usize, max_speed: f32, rolling_frames: usize) -> Result<Self> {
        if num_bins == 0 || rolling_frames == 0 {
            return Err(SimError::config("histogram needs at least one bin and one frame"));
        }
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(SimError::config(format!("max_speed {max_speed} must be finite and > 0")));
        }
        Ok(Self {
            max_speed,
            num_bins,
            rolling_frames,
            current: vec![0.0; num_bins],
            ring: vec![vec![0.0; num_bins]; rolling_frames],
            ring_index: 0,
            stored_frames: 0,
            smoothed: vec![0.0; num_bins],
        })
    }

    pub fn bin_width(&self) -> f32 {
        self.max_speed / self.num_bins as f32
    }

    /// Tallies the bodies' speeds and folds them into the rolling average.
    pub fn record(&mut self, bodies: &[PhysicalBody]) {
        self.current.fill(0.0);
        let bin_width = self.bin_width();
        for body in bodies {
            let bin = ((body.speed() / bin_width) as usize).min(self.num_bins - 1);
            self.current[bin] += 1.0;
        }

        self.ring[self.ring_index].copy_from_slice(&self.current);
        self.ring_index = (self.ring_index + 1) % self.rolling_frames;
        if self.stored_frames < self.rolling_frames {
            self.stored_frames += 1;
        }

        self.smoothed.fill(0.0);
        for frame in &self.ring[..self.stored_frames] {
            for (acc, &count) in self.smoothed.iter_mut().zip(frame) {
                *acc += count;
            }
        }
        let denom = self.stored_frames as f32;
        for acc in &mut self.smoothed {
            *acc /= denom;
        }
    }

    pub fn current(&self) -> &[f32] {
        &self.current
    }

    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    pub fn stored_frames(&self) -> usize {
        self.stored_frames
    }

    /// `[speed, count]` pairs of the smoothed histogram, for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        let bin_width = self.bin_width();
        self.smoothed
            .iter()
            .enumerate()
            .map(|(i, &count)| [(i as f32 * bin_width) as f64, count as f64])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLUE;
    use crate::geometry::{Point2D, Vec2D};

    fn moving(vx: f32, mass: f32) -> PhysicalBody {
        PhysicalBody::circle(Point2D::new(0.0, 0.0), Vec2D::new(vx, 0.0), mass, 1.0, BLUE).unwrap()
    }

    #[test]
    fn temperature_is_mean_kinetic_energy() {
        let bodies = [moving(2.0, 1.0), moving(4.0, 0.5)];
        assert!((total_kinetic_energy(&bodies) - 6.0).abs() < 1e-6);
        assert!((gas_temperature(&bodies) - 3.0).abs() < 1e-6);
        assert_eq!(gas_temperature(&[]), 0.0);
    }

    #[test]
    fn fast_bodies_clamp_into_last_bin() {
        let mut h = SpeedHistogram::new(4, 8.0, 1).unwrap();
        h.record(&[moving(1.0, 1.0), moving(3.0, 1.0), moving(100.0, 1.0)]);
        assert_eq!(h.current(), &[1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn smoothing_averages_over_the_window() {
        let mut h = SpeedHistogram::new(2, 2.0, 2).unwrap();
        h.record(&[moving(0.5, 1.0)]);
        h.record(&[moving(1.5, 1.0)]);
        assert_eq!(h.smoothed(), &[0.5, 0.5]);

        // the first frame falls out of the window
        h.record(&[moving(1.5, 1.0)]);
        assert_eq!(h.smoothed(), &[0.0, 1.0]);
        assert_eq!(h.stored_frames(), 2);
    }

    #[test]
    fn rejects_empty_histogram() {
        assert!(SpeedHistogram::new(0, 1.0, 1).is_err());
        assert!(SpeedHistogram::new(1, 0.0, 1).is_err());
    }
}
