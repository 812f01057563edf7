//! Drag trackers: turn pointer displacement into picker values.
//!
//! - `LinearTracker` maps the drag fraction onto the whole value range.
//! - `ExponentialTracker` steps repeatedly, faster the farther the drag goes.

use std::time::Duration;

use ratatui::layout::Rect;
use serde::Deserialize;

use super::model::{Orientation, ValueModel};
use super::repeat::{Period, Repeat, RepeatTimer, StepDirection, TickKind, TickTarget, TimerTick};
use super::traits::Tracker;

/// Default cap on the drag distance, in terminal cells.
pub const DEFAULT_MAX_DISTANCE: u16 = 20;

/// Slowest exponential repeat (no deflection).
pub const MAX_DELAY: Duration = Duration::from_millis(200);
/// Fastest exponential repeat (full deflection).
pub const MIN_DELAY: Duration = Duration::from_millis(16);

/// Where the picker sits on screen when a drag begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub bounds: Rect,
    pub screen_width: u16,
    pub screen_height: u16,
}

impl Geometry {
    pub fn new(bounds: Rect, screen_width: u16, screen_height: u16) -> Self {
        Self {
            bounds,
            screen_width,
            screen_height,
        }
    }

    /// Distance from the widget center to the nearest screen edge on `orientation`'s axis.
    pub fn room(&self, orientation: Orientation) -> f32 {
        let (start, len, screen) = match orientation {
            Orientation::Vertical => (self.bounds.y, self.bounds.height, self.screen_height),
            Orientation::Horizontal => (self.bounds.x, self.bounds.width, self.screen_width),
        };
        let center = f32::from(start) + f32::from(len) / 2.0;
        center.min(f32::from(screen) - center)
    }
}

/// Which way the exponential tracker is stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Increase,
    Decrease,
}

impl Direction {
    fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.0 {
            Direction::Increase
        } else if fraction < 0.0 {
            Direction::Decrease
        } else {
            Direction::None
        }
    }

    fn step(self) -> Option<StepDirection> {
        match self {
            Direction::None => None,
            Direction::Increase => Some(StepDirection::Up),
            Direction::Decrease => Some(StepDirection::Down),
        }
    }
}

/// State of one drag gesture. Dropped when the drag ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub down_position: f32,
    pub initial_value: i32,
    pub min_distance: f32,
    pub direction: Direction,
    pub current_delay: Duration,
}

impl DragSession {
    fn start(
        x: f32,
        y: f32,
        orientation: Orientation,
        max_distance: u16,
        geometry: &Geometry,
        model: &ValueModel,
    ) -> Self {
        // Never below one cell: a picker flush against the screen edge still tracks.
        let min_distance = f32::from(max_distance)
            .min(geometry.room(orientation))
            .max(1.0);

        Self {
            down_position: orientation.project(x, y),
            initial_value: model.value(),
            min_distance,
            direction: Direction::None,
            current_delay: MAX_DELAY,
        }
    }

    /// Displacement of `position` clamped to `±min_distance`, normalized to `[-1, 1]`.
    pub fn fraction(&self, position: f32) -> f32 {
        let diff = (position - self.down_position).clamp(-self.min_distance, self.min_distance);
        diff / self.min_distance
    }
}

/// Snap `candidate` onto the step grid anchored at `current`.
///
/// The delta is truncated toward zero, so partial steps are dropped.
pub fn quantize(candidate: i64, current: i32, step_size: i32) -> i32 {
    let current = i64::from(current);
    let step = i64::from(step_size);
    let mut delta = candidate - current;
    if step > 1 && delta % step != 0 {
        delta -= delta % step;
    }
    (current + delta).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Repeat period for the exponential tracker at a given drag fraction.
pub fn repeat_delay(fraction: f32) -> Duration {
    let max = MAX_DELAY.as_millis() as f32;
    let min = MIN_DELAY.as_millis() as f32;
    let millis = max - (max - min) * fraction.abs().min(1.0);
    Duration::from_millis(millis as u64)
}

/// Maps the drag fraction linearly onto `[min, max]`.
#[derive(Debug)]
pub struct LinearTracker {
    orientation: Orientation,
    max_distance: u16,
    session: Option<DragSession>,
}

impl LinearTracker {
    pub fn new(orientation: Orientation, max_distance: u16) -> Self {
        Self {
            orientation,
            max_distance,
            session: None,
        }
    }
}

impl Tracker for LinearTracker {
    fn begin(&mut self, x: f32, y: f32, geometry: &Geometry, model: &ValueModel) {
        self.session = Some(DragSession::start(
            x,
            y,
            self.orientation,
            self.max_distance,
            geometry,
            model,
        ));
    }

    fn add_movement(&mut self, x: f32, y: f32, model: &ValueModel) -> Option<i32> {
        let session = self.session.as_ref()?;
        let fraction = session.fraction(self.orientation.project(x, y));
        let offset = (f64::from(fraction) * model.span() as f64).round() as i64;
        let candidate = i64::from(session.initial_value) + offset;
        Some(quantize(candidate, model.value(), model.step_size()))
    }

    fn end(&mut self) {
        self.session = None;
    }

    fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    fn fraction(&self, x: f32, y: f32) -> f32 {
        self.session
            .as_ref()
            .map(|s| s.fraction(self.orientation.project(x, y)))
            .unwrap_or(0.0)
    }
}

/// Steps on a timer whose period shrinks as the drag grows.
#[derive(Debug)]
pub struct ExponentialTracker {
    orientation: Orientation,
    max_distance: u16,
    session: Option<DragSession>,
    timer: RepeatTimer,
    period: Period,
    target: TickTarget,
}

impl ExponentialTracker {
    pub fn new(orientation: Orientation, max_distance: u16, target: TickTarget) -> Self {
        Self {
            orientation,
            max_distance,
            session: None,
            timer: RepeatTimer::new(),
            period: Period::new(MAX_DELAY),
            target,
        }
    }
}

impl Tracker for ExponentialTracker {
    fn begin(&mut self, x: f32, y: f32, geometry: &Geometry, model: &ValueModel) {
        self.session = Some(DragSession::start(
            x,
            y,
            self.orientation,
            self.max_distance,
            geometry,
            model,
        ));
        self.period.set(MAX_DELAY);
        self.timer.start(
            &self.target,
            TickKind::Drag,
            MAX_DELAY,
            Repeat::Shared(self.period.clone()),
        );
    }

    fn add_movement(&mut self, x: f32, y: f32, _model: &ValueModel) -> Option<i32> {
        let session = self.session.as_mut()?;
        let fraction = session.fraction(self.orientation.project(x, y));
        session.direction = Direction::from_fraction(fraction);
        session.current_delay = repeat_delay(fraction);
        self.period.set(session.current_delay);
        None
    }

    fn tick(&mut self, tick: &TimerTick, model: &ValueModel) -> Option<i32> {
        if tick.kind != TickKind::Drag || !self.timer.accepts(tick) {
            return None;
        }
        let step = self.session.as_ref()?.direction.step()?;
        Some(step.apply(model.value(), model.step_size()))
    }

    fn end(&mut self) {
        self.timer.cancel();
        self.session = None;
    }

    fn is_repeating(&self) -> bool {
        self.timer.is_active()
    }

    fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    fn fraction(&self, x: f32, y: f32) -> f32 {
        self.session
            .as_ref()
            .map(|s| s.fraction(self.orientation.project(x, y)))
            .unwrap_or(0.0)
    }
}

/// Tracker strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    #[default]
    Linear,
    Exponential,
}

impl TrackerKind {
    /// Parse from a CLI argument
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "lin" => Some(TrackerKind::Linear),
            "exponential" | "exp" => Some(TrackerKind::Exponential),
            _ => None,
        }
    }

    /// Build the concrete tracker for this kind.
    pub fn build(
        self,
        orientation: Orientation,
        max_distance: u16,
        target: TickTarget,
    ) -> Box<dyn Tracker> {
        match self {
            TrackerKind::Linear => Box::new(LinearTracker::new(orientation, max_distance)),
            TrackerKind::Exponential => {
                Box::new(ExponentialTracker::new(orientation, max_distance, target))
            }
        }
    }
}
