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
use chuck::ChuckReading;
use log::trace;

/// Observation points for the throttle state machine. Not part of the
/// functional contract; a sink sees each tick after the core has finished
/// with it and cannot influence the outcome.
pub trait TraceSink {
    /// Called after the gesture check, for each tick that counted toward
    /// a cruise-ceiling calibration.
    fn gesture_progress(&mut self, reading: &ChuckReading, held_ticks: u32);

    /// Called after a normal (non-gesture) update with the raw and
    /// smoothed positions for the tick.
    fn tick(&mut self, reading: &ChuckReading, position: f32, smoothed: f32);
}

/// Forwards both observation points to the `log` facade at trace level.
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn gesture_progress(&mut self, reading: &ChuckReading, held_ticks: u32) {
        trace!(
            "gesture: x={:+.2} y={:+.2} held for {} ticks",
            reading.x,
            reading.y,
            held_ticks
        );
    }

    fn tick(&mut self, reading: &ChuckReading, position: f32, smoothed: f32) {
        trace!(
            "throttle: y={:+.4} c={} z={} position={:+.4} smoothed={:+.4}",
            reading.y,
            reading.c,
            reading.z,
            position,
            smoothed
        );
    }
}
