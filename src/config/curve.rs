//! Piecewise slope-speed curve.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Control point of a [`SlopeSpeedCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Keyframe {
    /// Signed slope angle in degrees. Negative is downhill.
    pub angle: f32,
    pub multiplier: f32,
    /// Slope (multiplier per degree) arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope (multiplier per degree) leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents, so the curve eases in and out of it.
    pub const fn new(angle: f32, multiplier: f32) -> Self {
        Self {
            angle,
            multiplier,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub const fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Maps a signed slope angle in `[-90, 90]` to a horizontal speed factor.
///
/// Each pair of neighbouring keys is joined by a cubic Hermite segment built
/// from the left key's out tangent and the right key's in tangent. Outside the
/// key range the end values are held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct SlopeSpeedCurve {
    keys: Vec<Keyframe>,
}

impl Default for SlopeSpeedCurve {
    fn default() -> Self {
        Self {
            keys: vec![
                Keyframe::new(-90.0, 1.5),
                Keyframe::new(0.0, 1.0),
                Keyframe::new(90.0, 0.0),
            ],
        }
    }
}

impl SlopeSpeedCurve {
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, ConfigError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// A curve that never changes speed.
    pub fn flat() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 1.0)],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::InvalidCurve("curve has no keys"));
        }
        if self
            .keys
            .iter()
            .any(|k| {
                !k.angle.is_finite()
                    || !k.multiplier.is_finite()
                    || !k.in_tangent.is_finite()
                    || !k.out_tangent.is_finite()
            })
        {
            return Err(ConfigError::InvalidCurve("curve keys must be finite"));
        }
        if self.keys.windows(2).any(|w| w[0].angle >= w[1].angle) {
            return Err(ConfigError::InvalidCurve(
                "curve keys must be strictly increasing in angle",
            ));
        }
        Ok(())
    }

    pub fn evaluate(&self, angle: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };

        if angle <= first.angle {
            return first.multiplier;
        }
        if angle >= last.angle {
            return last.multiplier;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if angle <= b.angle {
                return hermite(a, b, angle);
            }
        }

        last.multiplier
    }
}

fn hermite(a: Keyframe, b: Keyframe, angle: f32) -> f32 {
    let span = b.angle - a.angle;
    let t = (angle - a.angle) / span;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * a.multiplier + h10 * span * a.out_tangent + h01 * b.multiplier + h11 * span * b.in_tangent
}
