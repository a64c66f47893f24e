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

/// One frame of nunchuk state, as sampled once per control tick.
///
/// Axes are normalized upstream: [-1, 1] with 0 at the stick's rest
/// position. Buttons are debounced upstream as well; this is the raw
/// interface the throttle core consumes and it performs no validation
/// beyond threshold comparisons.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ChuckReading {
    /// Stick deflection, left/right.
    pub x: f32,
    /// Stick deflection, back/forward. Forward is positive.
    pub y: f32,
    /// C button (under the stick); held to engage cruise control.
    pub c: bool,
    /// Z button (trigger); speed/responsiveness modifier.
    pub z: bool,
}

impl ChuckReading {
    pub fn new(x: f32, y: f32, c: bool, z: bool) -> Self {
        Self { x, y, c, z }
    }

    /// Stick at rest, no buttons held.
    pub fn centered() -> Self {
        Self::default()
    }

    /// Manual driving: stick deflection only.
    pub fn stick(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            c: false,
            z: false,
        }
    }

    /// Cruise mode: C held plus a stick deflection.
    pub fn cruise(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            c: true,
            z: false,
        }
    }

    pub fn with_z(mut self) -> Self {
        self.z = true;
        self
    }
}
