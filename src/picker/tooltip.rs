//! Floating value label shown while dragging.

use std::f32::consts::FRAC_PI_2;

use super::model::{Orientation, ValueModel};

/// Side of the picker the tooltip is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Left,
    Top,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Wide enough for either bound, so the label does not jitter while dragging
    pub min_width: usize,
    /// Displacement along the picker's axis, in cells
    pub offset: f32,
    pub placement: Placement,
}

impl Tooltip {
    pub fn new(model: &ValueModel) -> Self {
        Self {
            text: model.value().to_string(),
            min_width: model.display_width(),
            offset: 0.0,
            placement: match model.orientation() {
                Orientation::Vertical => Placement::Left,
                Orientation::Horizontal => Placement::Top,
            },
        }
    }

    pub fn update(&mut self, value: i32) {
        self.text = value.to_string();
    }

    /// Follow the drag, easing out toward half of `min_distance`.
    pub fn follow(&mut self, fraction: f32, min_distance: f32) {
        self.offset = offset_for(fraction, min_distance);
    }

    /// Rendered width: the text padded to `min_width`.
    pub fn width(&self) -> usize {
        self.text.len().max(self.min_width)
    }
}

pub fn offset_for(fraction: f32, min_distance: f32) -> f32 {
    (fraction * FRAC_PI_2).sin() / 2.0 * min_distance
}
