//! Coercion of free-text numeric entry for the weight and reps fields.
//!
//! Typed text is never rejected: anything that is not a digit is dropped,
//! empty input reads as zero and the rest is clamped into range.

use serde::{Deserialize, Serialize};

/// Bounds and step for one integer-valued input
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericInput {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumericInput {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Weight in kilograms, 0..=500
    pub const fn weight() -> Self {
        Self::new(0.0, 500.0, 1.0)
    }

    /// Repetitions, 1..=100
    pub const fn reps() -> Self {
        Self::new(1.0, 100.0, 1.0)
    }

    /// Read typed text as a value
    pub fn parse(&self, text: &str) -> f64 {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return 0.0;
        }
        // digit-only strings always parse; huge ones land on the max clamp
        let value = digits.parse::<f64>().unwrap_or(self.max);
        self.clamp(value).round()
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn increment(&self, value: f64) -> f64 {
        (value + self.step).min(self.max).round()
    }

    pub fn decrement(&self, value: f64) -> f64 {
        (value - self.step).max(self.min).round()
    }

    pub fn is_at_min(&self, value: f64) -> bool {
        value <= self.min
    }

    pub fn is_at_max(&self, value: f64) -> bool {
        value >= self.max
    }
}

/// Truncate a draft value toward zero for storage. Negatives and NaN read as 0.
pub fn truncate(value: f64) -> u32 {
    // `as` saturates and maps NaN to 0
    value.trunc() as u32
}
