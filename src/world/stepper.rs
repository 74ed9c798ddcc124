/// Turns variable frame times into a whole number of fixed-length ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStepper {
    timestep: f64,
    max_substeps: usize,
    accumulator: f64,
}

impl FixedStepper {
    pub fn new(timestep: f64, max_substeps: usize) -> Self {
        Self {
            timestep,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Time carried over to the next frame.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Adds `frame_dt` and returns how many ticks are due.
    ///
    /// More than `max_substeps` ticks are never returned; when the cap is hit
    /// the remaining backlog is dropped.
    pub fn accumulate(&mut self, frame_dt: f64) -> usize {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }

        self.accumulator += frame_dt;
        let due = (self.accumulator / self.timestep).floor() as usize;

        if due > self.max_substeps {
            log::warn!(
                "fixed step backlog of {} ticks exceeds cap of {}, dropping {:.4} of accumulated time",
                due,
                self.max_substeps,
                self.accumulator - self.max_substeps as f64 * self.timestep
            );
            self.accumulator = 0.0;
            return self.max_substeps;
        }

        self.accumulator -= due as f64 * self.timestep;
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
