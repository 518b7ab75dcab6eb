//! Time-domain signal representation.
//!
//! Signals are the primary data structure exchanged between the pulse
//! models and the downstream propagation/antenna stages: a pair of
//! equal-length arrays of times (s) and values, tagged with the physical
//! unit category of the values.
//!
//! # Sample semantics
//!
//! `times` is a strictly increasing, uniformly spaced grid. `values[i]` is a
//! point measurement at `times[i]`. The constructor forces
//! `values.len() == times.len()`: shorter value arrays are zero-padded on
//! the right (producers such as the convolution engine legitimately emit one
//! fewer sample than the grid), longer arrays are truncated.
//!
//! Spectral views, resampling and envelopes are DSP operations and live in
//! `lib-dsp`; this type stays transform-free.

use crate::units::Seconds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical unit category of signal values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// No unit category assigned yet.
    #[default]
    Undefined,
    /// Volts.
    Voltage,
    /// Volts per meter (electric field).
    Field,
    /// Watts.
    Power,
}

impl ValueKind {
    /// Resulting kind when combining two signals.
    ///
    /// Undefined defers to the other operand; equal kinds pass through;
    /// anything else is incompatible.
    pub fn combine(self, other: ValueKind) -> Result<ValueKind, SignalError> {
        match (self, other) {
            (ValueKind::Undefined, k) => Ok(k),
            (k, ValueKind::Undefined) => Ok(k),
            (a, b) if a == b => Ok(a),
            (a, b) => Err(SignalError::IncompatibleKinds { lhs: a, rhs: b }),
        }
    }
}

/// Errors from signal combination.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The two time grids are not identical.
    #[error("can't add signals with different time arrays")]
    MismatchedTimes,

    /// The value kinds cannot be combined.
    #[error("can't add signals with value kinds {lhs:?} and {rhs:?}")]
    IncompatibleKinds { lhs: ValueKind, rhs: ValueKind },
}

/// A uniformly-sampled time-domain signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Sample times (s), strictly increasing with uniform spacing.
    pub times: Vec<f64>,

    /// Sample values, one per time; unit given by `kind`.
    pub values: Vec<f64>,

    /// Unit category of the values.
    pub kind: ValueKind,
}

impl Signal {
    /// Create a new signal, forcing the value array to the length of the
    /// time array by zero-padding or truncation.
    pub fn new(times: Vec<f64>, mut values: Vec<f64>, kind: ValueKind) -> Self {
        values.resize(times.len(), 0.0);
        Self { times, values, kind }
    }

    /// Create a signal with all values zero.
    pub fn zeros(times: Vec<f64>, kind: ValueKind) -> Self {
        let values = vec![0.0; times.len()];
        Self { times, values, kind }
    }

    /// Create a signal by sampling a function of time.
    ///
    /// Producers with an analytic definition should re-evaluate the function
    /// on a new grid instead of interpolating with [`Signal::with_times`].
    pub fn from_fn<F: Fn(f64) -> f64>(times: Vec<f64>, f: F, kind: ValueKind) -> Self {
        let values = times.iter().map(|&t| f(t)).collect();
        Self { times, values, kind }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Check if the signal is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Spacing of the time grid, or `None` for fewer than two samples.
    #[inline]
    pub fn dt(&self) -> Option<Seconds> {
        if self.times.len() < 2 {
            None
        } else {
            Some(Seconds(self.times[1] - self.times[0]))
        }
    }

    /// Add another signal sample-by-sample.
    ///
    /// Fails if the time grids differ or the value kinds are incompatible;
    /// the result kind is the non-undefined operand kind.
    pub fn checked_add(&self, other: &Signal) -> Result<Signal, SignalError> {
        if self.times != other.times {
            return Err(SignalError::MismatchedTimes);
        }
        let kind = self.kind.combine(other.kind)?;
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Signal {
            times: self.times.clone(),
            values,
            kind,
        })
    }

    /// Re-time onto a new grid by piecewise-linear interpolation.
    ///
    /// Values outside the original span are zero. Producers that know their
    /// signal is identically zero or analytically defined should short-circuit
    /// with [`Signal::zeros`] or [`Signal::from_fn`] instead.
    pub fn with_times(&self, new_times: Vec<f64>) -> Signal {
        let values = new_times
            .iter()
            .map(|&t| self.interpolate(t))
            .collect();
        Signal {
            times: new_times,
            values,
            kind: self.kind,
        }
    }

    /// Linear interpolation at one time; zero outside the span.
    fn interpolate(&self, t: f64) -> f64 {
        if self.times.is_empty() {
            return 0.0;
        }
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if t < first || t > last {
            return 0.0;
        }
        // Binary search for the bracketing interval.
        let idx = match self
            .times
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap())
        {
            Ok(i) => return self.values[i],
            Err(i) => i,
        };
        if idx == 0 {
            return self.values[0];
        }
        let (t0, t1) = (self.times[idx - 1], self.times[idx]);
        let frac = (t - t0) / (t1 - t0);
        self.values[idx - 1] * (1.0 - frac) + self.values[idx] * frac
    }

    /// Scale all values by a factor (e.g. inverse path length downstream).
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.values {
            *v *= factor;
        }
    }

    /// Shift all times by an offset (e.g. time of flight downstream).
    pub fn shift_times(&mut self, offset: Seconds) {
        for t in &mut self.times {
            *t += offset.0;
        }
    }

    /// Maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.values.iter().map(|v| v.abs()).fold(0.0, f64::max)
    }

    /// Index of the sample with the largest absolute value.
    pub fn peak_index(&self) -> Option<usize> {
        (0..self.values.len()).max_by(|&a, &b| {
            self.values[a]
                .abs()
                .partial_cmp(&self.values[b].abs())
                .unwrap()
        })
    }
}
