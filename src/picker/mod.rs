//! Number picker core
//!
//! Value model, drag trackers, repeat timers and the `NumberPicker` controller
//! that ties them together. Nothing here draws; see `tui::components`.

mod field;
mod gesture;
mod model;
mod repeat;
mod tooltip;
mod tracker;
mod traits;
mod widget;

pub use model::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP, Orientation, ValueModel};
pub use repeat::{StepDirection, TickReceiver, TickSender, TimerTick};
pub use tooltip::{Placement, Tooltip};
pub use tracker::{DEFAULT_MAX_DISTANCE, Geometry, TrackerKind};
pub use traits::PickerListener;
pub use widget::NumberPicker;
