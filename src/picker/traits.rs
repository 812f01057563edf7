//! Picker trait definitions
//!
//! `Tracker` is the seam between gesture phases and value updates; the two
//! strategies live in `tracker.rs`. `PickerListener` is how a host observes a
//! picker.

use super::model::ValueModel;
use super::repeat::TimerTick;
use super::tracker::{DragSession, Geometry};

/// Converts a pointer drag into candidate values.
///
/// A tracker is `Idle` until `begin` and `Tracking` until `end`. Candidate
/// values are returned to the caller, which applies them through the value
/// model so they are always clamped.
///
/// # Example
///
/// ```ignore
/// tracker.begin(down_x, down_y, &geometry, &model);
/// if let Some(candidate) = tracker.add_movement(x, y, &model) {
///     model.set_value(candidate);
/// }
/// tracker.end();
/// ```
pub trait Tracker {
    /// Start a drag at the press-down position.
    fn begin(&mut self, x: f32, y: f32, geometry: &Geometry, model: &ValueModel);

    /// Feed the current pointer position; may yield a candidate value.
    fn add_movement(&mut self, x: f32, y: f32, model: &ValueModel) -> Option<i32>;

    /// Handle a timer tick addressed to this tracker.
    fn tick(&mut self, _tick: &TimerTick, _model: &ValueModel) -> Option<i32> {
        None
    }

    /// Finish the drag and release per-drag resources.
    fn end(&mut self);

    /// The active drag session, if any.
    fn session(&self) -> Option<&DragSession>;

    /// Whether a drag is in progress
    fn is_tracking(&self) -> bool {
        self.session().is_some()
    }

    /// Whether a timer is stepping the value on the tracker's behalf
    fn is_repeating(&self) -> bool {
        false
    }

    /// Normalized drag fraction in `[-1, 1]` for a pointer position.
    fn fraction(&self, x: f32, y: f32) -> f32;
}

/// Observer for picker changes.
///
/// All methods default to no-ops so hosts implement only what they need.
pub trait PickerListener {
    /// The value changed; `from_user` is false for programmatic updates.
    fn on_progress_changed(&mut self, _picker: usize, _progress: i32, _from_user: bool) {}

    /// A drag started on the picker.
    fn on_start_tracking_touch(&mut self, _picker: usize) {}

    /// A drag on the picker ended.
    fn on_stop_tracking_touch(&mut self, _picker: usize) {}
}
