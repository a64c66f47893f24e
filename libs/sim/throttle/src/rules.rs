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
use crate::{CC_BUMP, DEADZONE};
use chuck::ChuckReading;

/// True while the rider holds the train-the-ceiling pose: cruise held,
/// stick centered fore/aft, strong sideways deflection.
pub(crate) fn calibration_pose(reading: &ChuckReading) -> bool {
    reading.c && reading.y.abs() < 0.5 && reading.x.abs() > 0.75
}

/// What one tick of controller input does to the throttle position.
///
/// Classification is evaluated in a fixed priority order; exactly one rule
/// fires per tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ThrottleRule {
    /// Rider is framing a cruise-ceiling calibration; position is frozen.
    CalibrationGesture,
    /// Cruise held, stick forward: bump the position up.
    CruiseAccelerate,
    /// Cruise held, stick back: bump the position down.
    CruiseDecelerate,
    /// Cruise held, stick centered, below the trained ceiling: ease up.
    CruiseEaseToCeiling,
    /// Cruise held with nothing to do; position carries over.
    CruiseHold,
    /// No cruise: the stick's fore/aft deflection is the position.
    ManualControl,
}

impl ThrottleRule {
    pub fn classify(reading: &ChuckReading, position: f32, ceiling: f32) -> Self {
        if calibration_pose(reading) {
            Self::CalibrationGesture
        } else if !reading.c {
            Self::ManualControl
        } else if reading.y > 0.5 && position < 1.0 {
            Self::CruiseAccelerate
        } else if reading.y < -0.5 && position > -1.0 {
            Self::CruiseDecelerate
        } else if position < ceiling {
            Self::CruiseEaseToCeiling
        } else {
            Self::CruiseHold
        }
    }

    /// The new throttle position after this rule fires. Total, and always
    /// lands in [-1, 1].
    pub fn apply(self, reading: &ChuckReading, position: f32) -> f32 {
        // Z doubles the manual cruise bumps; the automatic ease ramp has
        // its own fixed rate.
        let bump = if reading.z { CC_BUMP * 2. } else { CC_BUMP };
        let next = match self {
            Self::CalibrationGesture | Self::CruiseHold => position,
            Self::CruiseAccelerate => position + bump,
            Self::CruiseDecelerate => position - bump,
            Self::CruiseEaseToCeiling => position + CC_BUMP * 1.5,
            Self::ManualControl => {
                if reading.y.abs() < DEADZONE {
                    0.
                } else {
                    reading.y
                }
            }
        };
        next.clamp(-1., 1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gesture_outranks_everything() {
        let reading = ChuckReading::new(0.9, 0.2, true, false);
        assert_eq!(
            ThrottleRule::classify(&reading, 0., 0.5),
            ThrottleRule::CalibrationGesture
        );
        // Same stick pattern without C is plain manual control.
        let reading = ChuckReading::stick(0.9, 0.2);
        assert_eq!(
            ThrottleRule::classify(&reading, 0., 0.5),
            ThrottleRule::ManualControl
        );
    }

    #[test]
    fn directional_input_outranks_ease_ramp() {
        let forward = ChuckReading::cruise(0., 0.8);
        assert_eq!(
            ThrottleRule::classify(&forward, 0.1, 0.5),
            ThrottleRule::CruiseAccelerate
        );
        let back = ChuckReading::cruise(0., -0.8);
        assert_eq!(
            ThrottleRule::classify(&back, 0.1, 0.5),
            ThrottleRule::CruiseDecelerate
        );
    }

    #[test]
    fn centered_cruise_eases_only_below_ceiling() {
        let reading = ChuckReading::cruise(0., 0.);
        assert_eq!(
            ThrottleRule::classify(&reading, 0.1, 0.5),
            ThrottleRule::CruiseEaseToCeiling
        );
        assert_eq!(
            ThrottleRule::classify(&reading, 0.5, 0.5),
            ThrottleRule::CruiseHold
        );
    }

    #[test]
    fn saturated_position_falls_through() {
        let forward = ChuckReading::cruise(0., 0.8);
        assert_eq!(
            ThrottleRule::classify(&forward, 1.0, 0.5),
            ThrottleRule::CruiseHold
        );
        // At full reverse the decelerate guard fails, and any valid
        // ceiling exceeds -1, so the ease ramp fires instead of a hold.
        let back = ChuckReading::cruise(0., -0.8);
        assert_eq!(
            ThrottleRule::classify(&back, -1.0, 0.5),
            ThrottleRule::CruiseEaseToCeiling
        );
    }

    #[test]
    fn z_doubles_directional_bumps() {
        let reading = ChuckReading::cruise(0., 0.8);
        assert_relative_eq!(
            ThrottleRule::CruiseAccelerate.apply(&reading, 0.1),
            0.1 + CC_BUMP
        );
        assert_relative_eq!(
            ThrottleRule::CruiseAccelerate.apply(&reading.with_z(), 0.1),
            0.1 + CC_BUMP * 2.
        );
    }

    #[test]
    fn ease_ramp_rate_ignores_z() {
        let reading = ChuckReading::cruise(0., 0.).with_z();
        assert_relative_eq!(
            ThrottleRule::CruiseEaseToCeiling.apply(&reading, 0.),
            CC_BUMP * 1.5
        );
    }

    #[test]
    fn manual_snaps_deadzone_to_center() {
        let reading = ChuckReading::stick(0., DEADZONE / 2.);
        assert_relative_eq!(ThrottleRule::ManualControl.apply(&reading, 0.9), 0f32);
        let reading = ChuckReading::stick(0., -0.62);
        assert_relative_eq!(ThrottleRule::ManualControl.apply(&reading, 0.9), -0.62f32);
    }

    #[test]
    fn bumps_never_escape_unit_range() {
        let forward = ChuckReading::cruise(0., 0.8).with_z();
        assert_relative_eq!(ThrottleRule::CruiseAccelerate.apply(&forward, 0.9999), 1f32);
        let back = ChuckReading::cruise(0., -0.8).with_z();
        assert_relative_eq!(ThrottleRule::CruiseDecelerate.apply(&back, -0.9999), -1f32);
    }
}
