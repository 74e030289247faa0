use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::RangeInclusive;

pub const SIGHT_ANGLE_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const SNAP_SPEED_RANGE: RangeInclusive<f64> = 0.05..=1.0;
pub const DRAG_SPEED_RANGE: RangeInclusive<f64> = 1.0..=4.0;
pub const REDUCTION_RATIO_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const CENTER_TOLERANCE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Tunable wheel parameters, as read from the `[wheel]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub radius: f64,
    /// Angle of the slot an item must reach to be selected.
    pub center_angle: f64,
    pub sight_angle_x: f64,
    pub sight_angle_y: f64,
    pub snap_speed: f64,
    pub drag_speed: f64,
    /// How strongly off-center items shrink.
    pub reduction_ratio: f64,
    /// Normalized distance at or below which an item counts as in range.
    pub center_tolerance: f64,
    pub sort_sibling_while_dragging: bool,
    pub enable_drag: bool,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            radius: 100.0,
            center_angle: 0.0,
            sight_angle_x: 1.0,
            sight_angle_y: 1.0,
            snap_speed: 1.0,
            drag_speed: 1.0,
            reduction_ratio: 1.0,
            center_tolerance: 0.01,
            sort_sibling_while_dragging: false,
            enable_drag: true,
        }
    }
}

impl WheelSettings {
    /// Clamps every parameter into its supported range, warning about each
    /// value that had to move.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let radius = if self.radius.is_finite() && self.radius > 0.0 {
            self.radius
        } else {
            log::warn!(
                "wheel radius {} is not positive, using {}",
                self.radius,
                defaults.radius
            );
            defaults.radius
        };

        Self {
            radius,
            center_angle: clamp_param("center_angle", self.center_angle, -PI..=PI),
            sight_angle_x: clamp_param("sight_angle_x", self.sight_angle_x, SIGHT_ANGLE_RANGE),
            sight_angle_y: clamp_param("sight_angle_y", self.sight_angle_y, SIGHT_ANGLE_RANGE),
            snap_speed: clamp_param("snap_speed", self.snap_speed, SNAP_SPEED_RANGE),
            drag_speed: clamp_param("drag_speed", self.drag_speed, DRAG_SPEED_RANGE),
            reduction_ratio: clamp_param(
                "reduction_ratio",
                self.reduction_ratio,
                REDUCTION_RATIO_RANGE,
            ),
            center_tolerance: clamp_param(
                "center_tolerance",
                self.center_tolerance,
                CENTER_TOLERANCE_RANGE,
            ),
            ..self
        }
    }
}

fn clamp_param(name: &str, value: f64, range: RangeInclusive<f64>) -> f64 {
    let (lo, hi) = (*range.start(), *range.end());
    if value.is_nan() {
        log::warn!("{} is NaN, using {}", name, lo);
        return lo;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("{} = {} is outside [{}, {}], clamped to {}", name, value, lo, hi, clamped);
    }
    clamped
}
