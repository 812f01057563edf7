//! Bounded integer value with step size and orientation.

use serde::Deserialize;

use crate::error::{PickerError, Result};

pub const DEFAULT_MIN: i32 = 0;
pub const DEFAULT_MAX: i32 = 100;
pub const DEFAULT_STEP: i32 = 1;

/// Axis along which the picker lays out its buttons and reads drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Parse from a CLI argument ("vertical", "v", "horizontal", "h")
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" | "v" => Some(Orientation::Vertical),
            "horizontal" | "h" => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    /// Project a pointer position onto the active axis.
    ///
    /// The vertical axis is inverted so that dragging up increases the value.
    pub fn project(self, x: f32, y: f32) -> f32 {
        match self {
            Orientation::Vertical => -y,
            Orientation::Horizontal => x,
        }
    }
}

/// Holds the picker value and keeps `min_value <= value <= max_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueModel {
    value: i32,
    min_value: i32,
    max_value: i32,
    step_size: i32,
    orientation: Orientation,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self {
            value: 0,
            min_value: DEFAULT_MIN,
            max_value: DEFAULT_MAX,
            step_size: DEFAULT_STEP,
            orientation: Orientation::default(),
        }
    }
}

impl ValueModel {
    /// Create a model, validating the range and step. The initial value is clamped.
    pub fn new(
        value: i32,
        min_value: i32,
        max_value: i32,
        step_size: i32,
        orientation: Orientation,
    ) -> Result<Self> {
        if min_value > max_value {
            return Err(PickerError::InvalidRange {
                min: min_value,
                max: max_value,
            });
        }
        if step_size <= 0 {
            return Err(PickerError::InvalidStep(step_size));
        }
        Ok(Self {
            value: value.clamp(min_value, max_value),
            min_value,
            max_value,
            step_size,
            orientation,
        })
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn step_size(&self) -> i32 {
        self.step_size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Width of the value range. Widened so `i32::MIN..=i32::MAX` fits.
    pub fn span(&self) -> i64 {
        i64::from(self.max_value) - i64::from(self.min_value)
    }

    /// Store `v` clamped to the current range.
    pub fn set_value(&mut self, v: i32) {
        self.value = v.clamp(self.min_value, self.max_value);
    }

    pub fn set_min_value(&mut self, v: i32) -> Result<()> {
        if v > self.max_value {
            return Err(PickerError::InvalidRange {
                min: v,
                max: self.max_value,
            });
        }
        self.min_value = v;
        if v > self.value {
            self.value = v;
        }
        Ok(())
    }

    pub fn set_max_value(&mut self, v: i32) -> Result<()> {
        if v < self.min_value {
            return Err(PickerError::InvalidRange {
                min: self.min_value,
                max: v,
            });
        }
        self.max_value = v;
        if self.value > v {
            self.value = v;
        }
        Ok(())
    }

    pub fn set_step_size(&mut self, v: i32) -> Result<()> {
        if v <= 0 {
            return Err(PickerError::InvalidStep(v));
        }
        self.step_size = v;
        Ok(())
    }

    /// Update one or both bounds at once.
    ///
    /// Validation runs against the resulting range before anything is written,
    /// so a failed call leaves the model untouched.
    pub fn set_bounds(&mut self, min: Option<i32>, max: Option<i32>) -> Result<()> {
        let (new_min, new_max) = match (min, max) {
            (None, None) => return Err(PickerError::MissingBounds),
            (Some(lo), Some(hi)) if lo >= hi => {
                return Err(PickerError::InvalidRange { min: lo, max: hi });
            }
            (lo, hi) => (lo.unwrap_or(self.min_value), hi.unwrap_or(self.max_value)),
        };
        if new_min > new_max {
            return Err(PickerError::InvalidRange {
                min: new_min,
                max: new_max,
            });
        }
        // Move the bound that keeps the range valid first.
        if new_min > self.max_value {
            self.set_max_value(new_max)?;
            self.set_min_value(new_min)
        } else {
            self.set_min_value(new_min)?;
            self.set_max_value(new_max)
        }
    }

    /// Number of characters needed to show any value in the range.
    pub fn display_width(&self) -> usize {
        self.min_value
            .to_string()
            .len()
            .max(self.max_value.to_string().len())
    }
}
