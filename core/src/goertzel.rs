use std::f32::consts::PI;

use crate::Sample;

/// Streaming single-bin Goertzel energy estimator.
///
/// Consumes one amplitude sample per call and finalizes an energy magnitude
/// once per detection window. The magnitude is raw accumulated energy with
/// no normalization by window size, matching comparison against an absolute
/// threshold rather than a spectral density.
#[derive(Debug, Clone)]
pub struct GoertzelFilter {
    coeff: f32,
    q1: f32,
    q2: f32,
    count: usize,
    window: usize,
}

/// Goertzel coefficient for a target frequency at a given sampling rate:
/// `2 * cos(2π * freq / sample_rate)`.
pub fn goertzel_coefficient(target_hz: f32, sample_rate_hz: f32) -> f32 {
    2.0 * (2.0 * PI * target_hz / sample_rate_hz).cos()
}

impl GoertzelFilter {
    pub fn new(target_hz: f32, sample_rate_hz: f32, window: usize) -> Self {
        Self {
            coeff: goertzel_coefficient(target_hz, sample_rate_hz),
            q1: 0.0,
            q2: 0.0,
            count: 0,
            window,
        }
    }

    /// Advance the second-order recurrence by one sample.
    ///
    /// Returns the completed window's energy every `window`-th call and
    /// `None` otherwise. The filter state resets itself at each window
    /// boundary, so `count` stays in `[0, window)` between calls.
    pub fn update(&mut self, sample: Sample) -> Option<f32> {
        let q0 = sample as f32 + self.coeff * self.q1 - self.q2;
        self.q2 = self.q1;
        self.q1 = q0;
        self.count += 1;

        if self.count < self.window {
            return None;
        }

        let magnitude =
            self.q1 * self.q1 + self.q2 * self.q2 - self.coeff * self.q1 * self.q2;
        self.q1 = 0.0;
        self.q2 = 0.0;
        self.count = 0;
        Some(magnitude)
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
