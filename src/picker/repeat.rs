//! Cancelable repeating timers.
//!
//! A `RepeatTimer` owns at most one tokio task. The task never touches picker
//! state: it only sends `TimerTick` messages to the event loop, which applies
//! them on the same logical thread as user input. Every start bumps the timer's
//! generation, so ticks that were already queued when the timer was canceled
//! are recognised as stale and dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delay before a held arrow button starts repeating.
pub const ARROW_BUTTON_INITIAL_DELAY: Duration = Duration::from_millis(800);
/// Period between repeats while an arrow button is held.
pub const ARROW_BUTTON_FRAME_DELAY: Duration = Duration::from_millis(16);
/// Hold time after which a press on the value field becomes a drag.
pub const LONG_TAP_TIMEOUT: Duration = Duration::from_millis(300);

/// Which way a step moves the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    /// Apply one step of `step_size` to `value`.
    pub fn apply(self, value: i32, step_size: i32) -> i32 {
        match self {
            StepDirection::Up => value.saturating_add(step_size),
            StepDirection::Down => value.saturating_sub(step_size),
        }
    }
}

/// What a tick is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Button(StepDirection),
    Drag,
    LongPress,
}

/// Message sent by a running timer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub picker: usize,
    pub kind: TickKind,
    pub generation: u64,
}

pub type TickSender = mpsc::UnboundedSender<TimerTick>;
pub type TickReceiver = mpsc::UnboundedReceiver<TimerTick>;

/// Where a picker's timers deliver their ticks.
#[derive(Debug, Clone)]
pub struct TickTarget {
    pub tx: TickSender,
    pub picker: usize,
}

impl TickTarget {
    pub fn new(tx: TickSender, picker: usize) -> Self {
        Self { tx, picker }
    }
}

/// A period that can be changed while the timer is running.
#[derive(Debug, Clone)]
pub struct Period(Arc<AtomicU64>);

impl Period {
    pub fn new(period: Duration) -> Self {
        Self(Arc::new(AtomicU64::new(period.as_millis() as u64)))
    }

    pub fn set(&self, period: Duration) {
        self.0.store(period.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.0.load(Ordering::Relaxed))
    }
}

/// How a timer repeats after its first tick.
#[derive(Debug, Clone)]
pub enum Repeat {
    /// Fire once.
    Once,
    /// Fire every fixed period.
    Every(Duration),
    /// Fire every `Period`, re-read before each wait.
    Shared(Period),
}

/// Owned handle to at most one scheduled task.
#[derive(Debug, Default)]
pub struct RepeatTimer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl RepeatTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer, canceling any timer this handle already owns.
    ///
    /// Returns the generation stamped on every tick of the new timer.
    pub fn start(
        &mut self,
        target: &TickTarget,
        kind: TickKind,
        initial_delay: Duration,
        repeat: Repeat,
    ) -> u64 {
        self.cancel();
        self.generation += 1;

        let tick = TimerTick {
            picker: target.picker,
            kind,
            generation: self.generation,
        };
        let tx = target.tx.clone();

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(initial_delay).await;
            loop {
                if tx.send(tick).is_err() {
                    break;
                }
                let wait = match &repeat {
                    Repeat::Once => break,
                    Repeat::Every(period) => *period,
                    Repeat::Shared(period) => period.get(),
                };
                tokio::time::sleep(wait).await;
            }
        }));

        self.generation
    }

    /// Stop the timer. Canceling a stopped timer is a no-op.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether this handle currently owns a timer.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `tick` came from the timer this handle currently owns.
    pub fn accepts(&self, tick: &TimerTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }
}

impl Drop for RepeatTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
