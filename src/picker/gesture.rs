//! Long-press drag recognition for the value field.
//!
//! Raw pointer input comes in as down/move/up. A press turns into a drag once
//! it has been held for `LONG_TAP_TIMEOUT` or the pointer moves, whichever is
//! first. A release before that is a tap.

use super::repeat::{LONG_TAP_TIMEOUT, Repeat, RepeatTimer, TickKind, TickTarget, TimerTick};

/// Phase of a recognized drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

/// A drag phase with the press-down and current pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub down_x: f32,
    pub down_y: f32,
    pub x: f32,
    pub y: f32,
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Tap,
    Gesture(GestureEvent),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Pending { down_x: f32, down_y: f32 },
    Active { down_x: f32, down_y: f32 },
}

#[derive(Debug)]
pub struct LongPressRecognizer {
    state: State,
    timer: RepeatTimer,
    target: TickTarget,
}

impl LongPressRecognizer {
    pub fn new(target: TickTarget) -> Self {
        Self {
            state: State::Idle,
            timer: RepeatTimer::new(),
            target,
        }
    }

    /// Whether a press is being held (pending or dragging)
    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state = State::Pending {
            down_x: x,
            down_y: y,
        };
        self.timer
            .start(&self.target, TickKind::LongPress, LONG_TAP_TIMEOUT, Repeat::Once);
    }

    /// Pointer moved while pressed. A pending press begins dragging first.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Vec<GestureEvent> {
        match self.state {
            State::Idle => vec![],
            State::Pending { down_x, down_y } => {
                self.timer.cancel();
                self.state = State::Active { down_x, down_y };
                vec![
                    event(GesturePhase::Began, down_x, down_y, down_x, down_y),
                    event(GesturePhase::Changed, down_x, down_y, x, y),
                ]
            }
            State::Active { down_x, down_y } => {
                vec![event(GesturePhase::Changed, down_x, down_y, x, y)]
            }
        }
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<Release> {
        self.timer.cancel();
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Idle => None,
            State::Pending { .. } => Some(Release::Tap),
            State::Active { down_x, down_y } => Some(Release::Gesture(event(
                GesturePhase::Ended,
                down_x,
                down_y,
                x,
                y,
            ))),
        }
    }

    /// The long-press timer fired.
    pub fn long_press_elapsed(&mut self, tick: &TimerTick) -> Option<GestureEvent> {
        if tick.kind != TickKind::LongPress || !self.timer.accepts(tick) {
            return None;
        }
        self.timer.cancel();
        match self.state {
            State::Pending { down_x, down_y } => {
                self.state = State::Active { down_x, down_y };
                Some(event(GesturePhase::Began, down_x, down_y, down_x, down_y))
            }
            _ => None,
        }
    }

    /// Abort the press. An active drag is ended at its press-down point.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.timer.cancel();
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Active { down_x, down_y } => Some(event(
                GesturePhase::Ended,
                down_x,
                down_y,
                down_x,
                down_y,
            )),
            _ => None,
        }
    }
}

fn event(phase: GesturePhase, down_x: f32, down_y: f32, x: f32, y: f32) -> GestureEvent {
    GestureEvent {
        phase,
        down_x,
        down_y,
        x,
        y,
    }
}
