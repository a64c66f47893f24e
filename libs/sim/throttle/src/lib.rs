// This file is part of OpenWiiceiver.
//
// OpenWiiceiver is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenWiiceiver is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenWiiceiver.  If not, see <http://www.gnu.org/licenses/>.
mod rules;
mod trace;

pub use crate::{
    rules::ThrottleRule,
    trace::{LogTraceSink, TraceSink},
};

use chuck::ChuckReading;
use log::{debug, warn};
use nvram::NvDevice;
use smoother::Smoother;

/// Stick magnitudes below this read as exactly centered.
pub const DEADZONE: f32 = 0.05;
/// Per-tick cruise adjustment.
pub const CC_BUMP: f32 = 0.003;
/// Default responsiveness handed to the smoother, in ticks.
pub const SMOOTHNESS: f32 = 20.;
/// Factory cruise ceiling, used until a rider trains one.
pub const MIN_CRUISE_CEILING: f32 = 0.05;
/// Consecutive calibration-pose ticks needed to commit a new ceiling;
/// about three seconds at the nominal 50 Hz tick rate.
pub const GESTURE_HOLD_TICKS: u32 = 150;
/// Where the trained ceiling lives in non-volatile storage.
pub const CRUISE_ADDR: usize = 1;

/// The throttle state machine: one smoothed command in [-1, 1] per tick.
///
/// Theory of operation: classify the tick's controller reading into one
/// throttle rule (calibration gesture, a cruise adjustment, or manual
/// control), advance the raw position accordingly, then low-pass the
/// position into the returned command. Holding Z makes cruise bumps twice
/// as large and the filter four times as responsive. The cruise ceiling
/// trained by the calibration gesture persists as one byte of storage.
pub struct Throttle<D: NvDevice> {
    device: D,
    smoother: Smoother,
    cruise_ceiling: f32,
    position: f32,
    smoothed: f32,
    hold_count: u32,
    trace_sink: Option<Box<dyn TraceSink>>,
}

impl<D: NvDevice> Throttle<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            smoother: Smoother::new(),
            cruise_ceiling: MIN_CRUISE_CEILING,
            position: 0.,
            smoothed: 0.,
            hold_count: 0,
            trace_sink: None,
        }
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    /// Load the persisted cruise ceiling, if any. Call once before the
    /// first tick; harmless to call again.
    pub fn init(&mut self) {
        self.read_ceiling();
    }

    /// The per-tick entry point. Total: every reading maps to an output
    /// and the output always lies in [-1, 1].
    pub fn update(&mut self, reading: &ChuckReading) -> f32 {
        if self.check_auto_cruise(reading) {
            // Framing a calibration; hold the output steady.
            return self.smoothed;
        }

        let rule = ThrottleRule::classify(reading, self.position, self.cruise_ceiling);
        self.position = rule.apply(reading, self.position);

        let smoothness = if reading.z { SMOOTHNESS / 4. } else { SMOOTHNESS };
        self.smoothed = self.smoother.compute(self.position, smoothness);

        if let Some(sink) = self.trace_sink.as_mut() {
            sink.tick(reading, self.position, self.smoothed);
        }
        self.smoothed
    }

    /// Track the calibration gesture: cruise held, stick centered fore/aft,
    /// strong sideways deflection. Returns true while the gesture is in
    /// progress. At exactly [`GESTURE_HOLD_TICKS`] qualifying ticks the
    /// current position is committed as the new cruise ceiling. Any break
    /// in the pattern starts the count over. Called from `update`; never
    /// moves the position itself.
    pub fn check_auto_cruise(&mut self, reading: &ChuckReading) -> bool {
        if !rules::calibration_pose(reading) {
            self.hold_count = 0;
            return false;
        }
        self.hold_count += 1;
        if let Some(sink) = self.trace_sink.as_mut() {
            sink.gesture_progress(reading, self.hold_count);
        }
        if self.hold_count == GESTURE_HOLD_TICKS {
            self.set_auto_cruise();
        }
        true
    }

    /// Commit the current position as the cruise ceiling and persist it.
    pub fn set_auto_cruise(&mut self) {
        debug!("throttle: setting cruise ceiling to {:.4}", self.position);
        self.cruise_ceiling = self.position;
        self.write_ceiling();
    }

    /// The last smoothed command, without recomputation.
    pub fn throttle(&self) -> f32 {
        self.smoothed
    }

    /// The raw, pre-smoothing position.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn cruise_ceiling(&self) -> f32 {
        self.cruise_ceiling
    }

    /// Drop to a clean baseline: position to center, filter history gone.
    /// For disarm and fault recovery, so the next tick does not ramp down
    /// from stale state.
    pub fn zero(&mut self) {
        self.position = 0.;
        self.smoother.zero();
    }

    // The ceiling persists as one byte, an integer percentage. Only 1..=99
    // count; 0 and anything at or past 100 mean "never trained" and leave
    // the in-memory ceiling alone. A device error reads as never-trained.
    fn read_ceiling(&mut self) {
        match self.device.read(CRUISE_ADDR) {
            Ok(stored) if stored > 0 && stored < 100 => {
                self.cruise_ceiling = f32::from(stored) / 100.;
                debug!(
                    "throttle: loaded cruise ceiling {:.2} (stored {})",
                    self.cruise_ceiling, stored
                );
            }
            Ok(stored) => {
                debug!("throttle: ignoring stored cruise byte {}", stored);
            }
            Err(e) => {
                warn!("throttle: cruise ceiling read failed: {}", e);
            }
        }
    }

    fn write_ceiling(&mut self) {
        let percent = (self.cruise_ceiling * 100.).round() as u8;
        debug!("throttle: storing cruise ceiling as {}", percent);
        if let Err(e) = self.device.write(CRUISE_ADDR, percent) {
            warn!("throttle: cruise ceiling write failed: {}", e);
        }
    }
}
