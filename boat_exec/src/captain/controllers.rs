//! # Captain controllers module
//!
//! This module provides the PI controller used to set the propulsion power.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PI controller with a clamped integral
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PiController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Limit on the magnitude of the integral
    i_max: f64,

    /// The integral accumulation
    integral: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PiController {
    /// Create a new controller with the given gains and integral limit.
    pub fn new(k_p: f64, k_i: f64, i_max: f64) -> Self {
        Self {
            k_p,
            k_i,
            i_max,
            integral: 0f64,
        }
    }

    /// Get the value of the controller for the given error.
    ///
    /// `dt` is the time since the last call in seconds.
    pub fn get(&mut self, error: f64, dt: f64) -> f64 {
        // No accumulation without a valid time difference (first cycle, or
        // the clock went backwards)
        if dt > 0f64 && dt.is_finite() {
            self.integral = clamp(self.integral + error * dt, -self.i_max, self.i_max);
        }

        self.k_p * error + self.k_i * self.integral
    }

    /// Zero the integral.
    pub fn reset(&mut self) {
        self.integral = 0f64;
    }

    /// The current value of the integral.
    pub fn integral(&self) -> f64 {
        self.integral
    }
}
