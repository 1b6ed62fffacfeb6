//! Easing curves.
//!
//! Named after the power family: `power2` is a cubic curve.

use serde::{Deserialize, Serialize};

/// Timing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    #[default]
    Power2InOut,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 4] = [Ease::Linear, Ease::Power2In, Ease::Power2Out, Ease::Power2InOut];

    #[test]
    fn test_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
    }

    #[test]
    fn test_clamps_outside_unit_range() {
        assert_eq!(Ease::Power2InOut.apply(-3.0), 0.0);
        assert_eq!(Ease::Power2InOut.apply(7.0), 1.0);
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let e = Ease::Power2InOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        for i in 1..10 {
            let t = i as f32 / 20.0;
            assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_monotonic() {
        for ease in ALL {
            let mut last = 0.0;
            for i in 0..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= last - 1e-6, "{ease:?} at {i}");
                last = v;
            }
        }
    }
}
