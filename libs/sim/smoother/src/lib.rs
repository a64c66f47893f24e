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

/// Exponential low-pass filter over a bounded signal.
///
/// Each call folds the new raw sample into the running value; `smoothness`
/// is the time constant in ticks, so larger values respond more slowly.
/// With bounded input the output never leaves the input's range and never
/// overshoots the raw signal.
#[derive(Debug, Default, Copy, Clone)]
pub struct Smoother {
    value: f32,
}

impl Smoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one raw sample and return the updated smoothed value.
    /// A smoothness at or below 1 passes the raw sample straight through.
    pub fn compute(&mut self, raw: f32, smoothness: f32) -> f32 {
        let smoothness = smoothness.max(1.);
        self.value += (raw - self.value) / smoothness;
        self.value
    }

    /// The last smoothed value, without folding in a new sample.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Discard all filter history and return to the rest value.
    pub fn zero(&mut self) {
        self.value = 0.;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rest_value_is_zero() {
        let smoother = Smoother::new();
        assert_relative_eq!(smoother.value(), 0f32);
    }

    #[test]
    fn converges_to_held_input() {
        let mut smoother = Smoother::new();
        let mut out = 0f32;
        for _ in 0..1_000 {
            out = smoother.compute(1., 20.);
        }
        assert_relative_eq!(out, 1f32, epsilon = 1e-4);
    }

    #[test]
    fn never_overshoots_bounded_input() {
        let mut smoother = Smoother::new();
        for i in 0..500 {
            let raw = if i % 2 == 0 { 1. } else { -1. };
            let out = smoother.compute(raw, 10.);
            assert!((-1. ..=1.).contains(&out));
        }
    }

    #[test]
    fn unit_smoothness_is_passthrough() {
        let mut smoother = Smoother::new();
        assert_relative_eq!(smoother.compute(0.7, 1.), 0.7f32);
        assert_relative_eq!(smoother.compute(-0.3, 0.5), -0.3f32);
    }

    #[test]
    fn lower_smoothness_responds_faster() {
        let mut slow = Smoother::new();
        let mut fast = Smoother::new();
        for _ in 0..10 {
            slow.compute(1., 20.);
            fast.compute(1., 5.);
        }
        assert!(fast.value() > slow.value());
    }

    #[test]
    fn zero_discards_history() {
        let mut smoother = Smoother::new();
        for _ in 0..50 {
            smoother.compute(1., 5.);
        }
        smoother.zero();
        assert_relative_eq!(smoother.value(), 0f32);
    }
}
