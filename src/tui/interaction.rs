//! Component-level mouse interactivity system.
//!
//! The app registers the interactive regions of every picker each time it lays
//! out the screen, and mouse events are hit-tested against them.
//!
//! # Example
//!
//! ```ignore
//! registry.register(
//!     InteractiveRegion::clickable(bounds, HitTarget::new(0, PickerPart::Increment))
//!         .with_priority(1),
//! );
//!
//! let target = registry.hit_test(x, y);
//! ```

use crate::app::ClickRegion;
use crate::events::Action;
use crate::picker::StepDirection;

use super::components::PickerLayout;

/// Part of a picker the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPart {
    Decrement,
    Value,
    Increment,
    /// Border and label, anywhere not covered by the parts above
    Frame,
}

/// What a click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub picker: usize,
    pub part: PickerPart,
}

impl HitTarget {
    pub fn new(picker: usize, part: PickerPart) -> Self {
        Self { picker, part }
    }
}

/// An interactive region that can respond to mouse events.
#[derive(Debug, Clone)]
pub struct InteractiveRegion {
    /// The bounds of this interactive region
    pub bounds: ClickRegion,

    /// Target reported on left press (None = not clickable)
    pub on_click: Option<HitTarget>,

    /// Action to dispatch on scroll up (None = not scrollable)
    pub on_scroll_up: Option<Action>,

    /// Action to dispatch on scroll down (None = not scrollable)
    pub on_scroll_down: Option<Action>,

    /// Priority for overlapping regions (higher = checked first)
    pub priority: i32,
}

impl InteractiveRegion {
    /// Create a new clickable region
    pub fn clickable(bounds: ClickRegion, target: HitTarget) -> Self {
        Self {
            bounds,
            on_click: Some(target),
            on_scroll_up: None,
            on_scroll_down: None,
            priority: 0,
        }
    }

    /// Create a region that's both clickable and scrollable
    pub fn interactive(
        bounds: ClickRegion,
        target: HitTarget,
        scroll_up: Action,
        scroll_down: Action,
    ) -> Self {
        Self {
            bounds,
            on_click: Some(target),
            on_scroll_up: Some(scroll_up),
            on_scroll_down: Some(scroll_down),
            priority: 0,
        }
    }

    /// Set the priority (for builder pattern)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Check if a point is within this region's bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Registry of interactive regions, rebuilt on every layout pass.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    regions: Vec<InteractiveRegion>,
}

impl InteractionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Clear all registered regions (call at start of each layout pass)
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register an interactive region
    pub fn register(&mut self, region: InteractiveRegion) {
        self.regions.push(region);
    }

    /// Register every part of a laid-out picker.
    ///
    /// The wheel steps the picker anywhere over its frame.
    pub fn register_picker(&mut self, picker: usize, layout: &PickerLayout) {
        let scroll_up = Action::Step {
            picker,
            direction: StepDirection::Up,
        };
        let scroll_down = Action::Step {
            picker,
            direction: StepDirection::Down,
        };

        self.register(InteractiveRegion::interactive(
            ClickRegion::from(layout.frame),
            HitTarget::new(picker, PickerPart::Frame),
            scroll_up,
            scroll_down,
        ));
        self.register(
            InteractiveRegion::clickable(
                ClickRegion::from(layout.decrement),
                HitTarget::new(picker, PickerPart::Decrement),
            )
            .with_priority(1),
        );
        self.register(
            InteractiveRegion::clickable(
                ClickRegion::from(layout.value),
                HitTarget::new(picker, PickerPart::Value),
            )
            .with_priority(1),
        );
        self.register(
            InteractiveRegion::clickable(
                ClickRegion::from(layout.increment),
                HitTarget::new(picker, PickerPart::Increment),
            )
            .with_priority(1),
        );
    }

    /// Find the target for a press at (x, y)
    ///
    /// Returns the target of the highest-priority region that contains the point
    /// and has a click handler.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .filter(|r| r.contains(x, y) && r.on_click.is_some())
            .max_by_key(|r| r.priority)
            .and_then(|r| r.on_click)
    }

    /// Find the action to dispatch for a scroll up at (x, y)
    pub fn handle_scroll_up(&self, x: u16, y: u16) -> Action {
        self.regions
            .iter()
            .filter(|r| r.contains(x, y) && r.on_scroll_up.is_some())
            .max_by_key(|r| r.priority)
            .and_then(|r| r.on_scroll_up)
            .unwrap_or(Action::None)
    }

    /// Find the action to dispatch for a scroll down at (x, y)
    pub fn handle_scroll_down(&self, x: u16, y: u16) -> Action {
        self.regions
            .iter()
            .filter(|r| r.contains(x, y) && r.on_scroll_down.is_some())
            .max_by_key(|r| r.priority)
            .and_then(|r| r.on_scroll_down)
            .unwrap_or(Action::None)
    }
}
