//! Time-stepping bookkeeping for the implicit integrator.

use mbd_types::MbdError;

/// Tracks analysis time and Newton-iteration counts across a run.
///
/// Holds the fixed stepping plan (initial time, step size, number of
/// steps, iteration cap) plus the running counters the integrator
/// updates: current time, iterations spent in the current step, and the
/// cumulative total. Both counters are monotone non-decreasing over a
/// run; the per-step counter resets when a new step begins.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStepper {
    initial_time: f64,
    time_step: f64,
    n_steps: usize,
    max_iterations: usize,
    current_time: f64,
    n_iterations: usize,
    total_iterations: usize,
}

/// Default cap on Newton iterations per time step.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

impl Default for TimeStepper {
    /// One unit step from t = 0 with the default iteration cap.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1).unwrap_or_else(|_| unreachable!("unit step is valid"))
    }
}

impl TimeStepper {
    /// Create a stepper running `n_steps` steps of size `time_step`
    /// from `initial_time`, capped at [`DEFAULT_MAX_ITERATIONS`] Newton
    /// iterations per step.
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidTimestep`] unless `time_step` is
    /// positive and finite.
    pub fn new(initial_time: f64, time_step: f64, n_steps: usize) -> Result<Self, MbdError> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(MbdError::InvalidTimestep(time_step));
        }
        Ok(Self {
            initial_time,
            time_step,
            n_steps,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            current_time: initial_time,
            n_iterations: 0,
            total_iterations: 0,
        })
    }

    /// Override the Newton-iteration cap per step.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Advance the current time by one step.
    pub fn advance_time_step(&mut self) {
        self.current_time += self.time_step;
    }

    /// Time at which the run starts.
    #[must_use]
    pub fn initial_time(&self) -> f64 {
        self.initial_time
    }

    /// Step size `h`.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Number of steps in the run.
    #[must_use]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Newton-iteration cap per step.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Current analysis time.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Newton iterations spent in the current step.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.n_iterations
    }

    /// Newton iterations accumulated over the whole run.
    #[must_use]
    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    pub(crate) fn reset_iterations(&mut self) {
        self.n_iterations = 0;
    }

    pub(crate) fn increment_iterations(&mut self) {
        self.n_iterations += 1;
    }

    pub(crate) fn accumulate_total_iterations(&mut self, n: usize) {
        self.total_iterations += n;
    }
}
