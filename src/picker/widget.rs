//! The number picker controller.
//!
//! Owns the value model and coordinates the three ways a user changes it:
//! arrow buttons with auto-repeat, long-press drags through a `Tracker`, and
//! direct text entry. Rendering lives in `tui::components::number_picker`.

use crate::config::PickerConfig;
use crate::error::Result;
use crate::log;

use super::field::TextField;
use super::gesture::{GestureEvent, GesturePhase, LongPressRecognizer, Release};
use super::model::{Orientation, ValueModel};
use super::repeat::{
    ARROW_BUTTON_FRAME_DELAY, ARROW_BUTTON_INITIAL_DELAY, Repeat, RepeatTimer, StepDirection,
    TickKind, TickSender, TickTarget, TimerTick,
};
use super::tooltip::Tooltip;
use super::tracker::{Geometry, TrackerKind};
use super::traits::{PickerListener, Tracker};

pub struct NumberPicker {
    id: usize,
    label: String,
    model: ValueModel,
    tracker_kind: TrackerKind,
    tracker: Box<dyn Tracker>,
    recognizer: LongPressRecognizer,
    target: TickTarget,
    button_timer: RepeatTimer,
    pressed: Option<StepDirection>,
    field: TextField,
    tooltip: Option<Tooltip>,
    enabled: bool,
    gestures_enabled: bool,
    geometry: Geometry,
    listener: Option<Box<dyn PickerListener>>,
}

impl std::fmt::Debug for NumberPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberPicker")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("model", &self.model)
            .field("tracker_kind", &self.tracker_kind)
            .field("pressed", &self.pressed)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl NumberPicker {
    pub fn new(id: usize, config: &PickerConfig, ticks: TickSender) -> Result<Self> {
        let model = config.model()?;
        let target = TickTarget::new(ticks, id);
        let tracker = config
            .tracker
            .build(config.orientation, config.max_distance, target.clone());
        let label = config
            .label
            .clone()
            .unwrap_or_else(|| format!("Picker {}", id + 1));

        Ok(Self {
            id,
            label,
            model,
            tracker_kind: config.tracker,
            tracker,
            recognizer: LongPressRecognizer::new(target.clone()),
            target,
            button_timer: RepeatTimer::new(),
            pressed: None,
            field: TextField::new(),
            tooltip: None,
            enabled: config.enabled,
            gestures_enabled: !config.disable_gestures,
            geometry: Geometry::default(),
            listener: None,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    pub fn orientation(&self) -> Orientation {
        self.model.orientation()
    }

    pub fn tracker_kind(&self) -> TrackerKind {
        self.tracker_kind
    }

    pub fn progress(&self) -> i32 {
        self.model.value()
    }

    pub fn set_listener(&mut self, listener: Box<dyn PickerListener>) {
        self.listener = Some(listener);
    }

    /// Set the value, notifying the listener only if it changed.
    ///
    /// Returns whether the stored value changed.
    pub fn set_progress(&mut self, value: i32, from_user: bool) -> bool {
        let before = self.model.value();
        self.model.set_value(value);
        let after = self.model.value();
        if after == before {
            return false;
        }

        log::log_picker(
            &self.label,
            &format!("progress {} -> {} (from_user={})", before, after, from_user),
        );
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.update(after);
        }
        let id = self.id;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_progress_changed(id, after, from_user);
        }
        true
    }

    /// Programmatic update, reported to the listener with `from_user = false`.
    pub fn set_progress_silently(&mut self, value: i32) -> bool {
        self.set_progress(value, false)
    }

    pub fn set_step_size(&mut self, value: i32) -> Result<()> {
        self.model.set_step_size(value)
    }

    pub fn set_bounds(&mut self, min: Option<i32>, max: Option<i32>) -> Result<()> {
        self.model.set_bounds(min, max)
    }

    /// Re-apply configured bounds, step, value and enabled flag.
    ///
    /// Orientation and tracker are fixed at construction. Interactions in
    /// progress are cancelled first; the first failing setting stops the rest.
    pub fn reconfigure(&mut self, config: &PickerConfig) -> Result<()> {
        self.cancel_interactions();
        self.field.cancel();
        self.set_bounds(Some(config.min), Some(config.max))?;
        self.set_step_size(config.step)?;
        self.set_progress_silently(config.value);
        self.set_enabled(config.enabled);
        if let Some(label) = &config.label {
            self.label = label.clone();
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling releases held buttons, ends any drag and drops pending text.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel_interactions();
            self.field.cancel();
        }
        self.enabled = enabled;
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Record where the picker was laid out; read when a drag begins.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn pressed(&self) -> Option<StepDirection> {
        self.pressed
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Whether a press on the value field is held (pending or dragging)
    pub fn is_pressing_value(&self) -> bool {
        self.recognizer.is_pressed()
    }

    /// Whether a button or exponential drag timer is stepping the value
    pub fn is_repeating(&self) -> bool {
        self.button_timer.is_active() || self.tracker.is_repeating()
    }

    /// Apply one step in `direction`.
    pub fn step(&mut self, direction: StepDirection) -> bool {
        if !self.enabled {
            return false;
        }
        let next = direction.apply(self.model.value(), self.model.step_size());
        self.set_progress(next, true)
    }

    // === Arrow buttons ===

    /// Press an arrow: one immediate step, then auto-repeat until release.
    pub fn press_button(&mut self, direction: StepDirection) {
        if !self.enabled || self.is_tracking() {
            return;
        }
        self.commit_edit_quietly();
        self.step(direction);
        self.pressed = Some(direction);
        self.button_timer.start(
            &self.target,
            TickKind::Button(direction),
            ARROW_BUTTON_INITIAL_DELAY,
            Repeat::Every(ARROW_BUTTON_FRAME_DELAY),
        );
    }

    /// Release (or cancel) a held arrow.
    pub fn release_button(&mut self) {
        self.pressed = None;
        self.button_timer.cancel();
    }

    // === Timers ===

    /// Route a timer tick to the component that owns it.
    pub fn handle_tick(&mut self, tick: &TimerTick) {
        match tick.kind {
            TickKind::Button(direction) => {
                if self.button_timer.accepts(tick) && self.pressed == Some(direction) {
                    self.step(direction);
                }
            }
            TickKind::Drag => {
                if let Some(value) = self.tracker.tick(tick, &self.model) {
                    self.set_progress(value, true);
                }
            }
            TickKind::LongPress => {
                if let Some(event) = self.recognizer.long_press_elapsed(tick) {
                    self.on_gesture(event);
                }
            }
        }
    }

    // === Pointer on the value field ===

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        if !self.gestures_enabled {
            self.begin_edit();
            return;
        }
        self.release_button();
        self.recognizer.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        for event in self.recognizer.pointer_move(x, y) {
            self.on_gesture(event);
        }
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        match self.recognizer.pointer_up(x, y) {
            Some(Release::Tap) => self.begin_edit(),
            Some(Release::Gesture(event)) => self.on_gesture(event),
            None => {}
        }
    }

    /// Drag state machine: `Idle -> Tracking` on `Began`, back on `Ended`.
    pub fn on_gesture(&mut self, event: GestureEvent) {
        match (event.phase, self.tracker.is_tracking()) {
            (GesturePhase::Began, false) => {
                self.commit_edit_quietly();
                self.tracker
                    .begin(event.down_x, event.down_y, &self.geometry, &self.model);
                self.start_interaction();
            }
            (GesturePhase::Changed, true) => {
                let fraction = self.tracker.fraction(event.x, event.y);
                let min_distance = self
                    .tracker
                    .session()
                    .map(|s| s.min_distance)
                    .unwrap_or(1.0);
                if let Some(tooltip) = self.tooltip.as_mut() {
                    tooltip.follow(fraction, min_distance);
                }
                if let Some(value) = self.tracker.add_movement(event.x, event.y, &self.model) {
                    self.set_progress(value, true);
                }
            }
            (GesturePhase::Ended, true) => {
                self.tracker.end();
                self.end_interaction();
            }
            (phase, tracking) => {
                log::log_picker(
                    &self.label,
                    &format!("ignored {:?} (tracking={})", phase, tracking),
                );
            }
        }
    }

    /// Release buttons and end any drag in progress.
    pub fn cancel_interactions(&mut self) {
        self.release_button();
        if let Some(event) = self.recognizer.cancel() {
            self.on_gesture(event);
        }
    }

    fn start_interaction(&mut self) {
        log::log_picker(&self.label, "start tracking");
        self.tooltip = Some(Tooltip::new(&self.model));
        let id = self.id;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_start_tracking_touch(id);
        }
    }

    fn end_interaction(&mut self) {
        log::log_picker(&self.label, "stop tracking");
        self.tooltip = None;
        let id = self.id;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_stop_tracking_touch(id);
        }
    }

    // === Text entry ===

    pub fn is_editing(&self) -> bool {
        self.field.is_editing()
    }

    /// Start editing; a field already being edited keeps its text.
    pub fn begin_edit(&mut self) {
        if self.enabled && !self.is_tracking() && !self.field.is_editing() {
            self.field.begin(self.model.value());
        }
    }

    pub fn edit_input(&mut self, c: char) -> bool {
        self.field.input(c)
    }

    pub fn edit_backspace(&mut self) {
        self.field.backspace();
    }

    pub fn cancel_edit(&mut self) {
        self.field.cancel();
    }

    /// Commit typed text. Invalid input is discarded and the field reverts.
    pub fn commit_edit(&mut self) -> Result<()> {
        match self.field.commit() {
            Ok(Some(value)) => {
                self.set_progress(value, true);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                log::log_picker(&self.label, &format!("rejected input: {}", e));
                Err(e)
            }
        }
    }

    fn commit_edit_quietly(&mut self) {
        if self.field.is_editing() {
            let _ = self.commit_edit();
        }
    }

    /// Text for the value field
    pub fn display_text(&self) -> String {
        self.field.display(self.model.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use ratatui::layout::Rect;
    use tokio::sync::mpsc;

    use crate::error::PickerError;
    use crate::picker::repeat::TickReceiver;

    #[derive(Debug, Clone, PartialEq)]
    enum Notice {
        Changed(i32, bool),
        Start,
        Stop,
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Notice>>>);

    impl PickerListener for Recorder {
        fn on_progress_changed(&mut self, _picker: usize, progress: i32, from_user: bool) {
            self.0.borrow_mut().push(Notice::Changed(progress, from_user));
        }

        fn on_start_tracking_touch(&mut self, _picker: usize) {
            self.0.borrow_mut().push(Notice::Start);
        }

        fn on_stop_tracking_touch(&mut self, _picker: usize) {
            self.0.borrow_mut().push(Notice::Stop);
        }
    }

    fn picker(config: PickerConfig) -> (NumberPicker, TickReceiver, Recorder) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut picker = NumberPicker::new(0, &config, tx).unwrap();
        // 80x40 screen, picker centered: min_distance is capped at max_distance.
        picker.set_geometry(Geometry::new(Rect::new(30, 18, 20, 3), 80, 40));
        let recorder = Recorder::default();
        picker.set_listener(Box::new(recorder.clone()));
        (picker, rx, recorder)
    }

    async fn pump(picker: &mut NumberPicker, rx: &mut TickReceiver) {
        tokio::task::yield_now().await;
        while let Ok(tick) = rx.try_recv() {
            picker.handle_tick(&tick);
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = PickerConfig {
            step: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            NumberPicker::new(0, &config, tx),
            Err(PickerError::InvalidStep(0))
        ));
    }

    #[test]
    fn test_set_progress_notifies_only_on_change() {
        let (mut p, _rx, rec) = picker(PickerConfig::default());
        assert!(p.set_progress(10, true));
        assert!(!p.set_progress(10, true));
        assert!(p.set_progress_silently(500));
        assert!(!p.set_progress(101, true));
        assert_eq!(p.progress(), 100);
        assert_eq!(
            *rec.0.borrow(),
            vec![Notice::Changed(10, true), Notice::Changed(100, false)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_button_press_steps_then_repeats() {
        let (mut p, mut rx, _rec) = picker(PickerConfig::default());
        p.press_button(StepDirection::Up);
        assert_eq!(p.progress(), 1);
        assert!(p.is_repeating());

        tokio::time::sleep(Duration::from_millis(790)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 1);

        // 800, 816, 832, 848
        tokio::time::sleep(Duration::from_millis(60)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 5);

        p.release_button();
        assert!(!p.is_repeating());
        tokio::time::sleep(Duration::from_millis(200)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_release_press_steps_once_each() {
        let (mut p, mut rx, _rec) = picker(PickerConfig::default());
        p.press_button(StepDirection::Up);
        p.release_button();
        p.press_button(StepDirection::Up);
        p.release_button();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_buttons_keeps_one_timer() {
        let (mut p, mut rx, _rec) = picker(PickerConfig {
            value: 50,
            ..PickerConfig::default()
        });
        p.press_button(StepDirection::Up);
        p.press_button(StepDirection::Down);
        assert_eq!(p.progress(), 50);

        tokio::time::sleep(Duration::from_millis(810)).await;
        pump(&mut p, &mut rx).await;
        // Only the down timer is alive.
        assert_eq!(p.progress(), 49);
        p.release_button();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_button_tick_ignored() {
        let (mut p, mut rx, _rec) = picker(PickerConfig::default());
        p.press_button(StepDirection::Up);
        tokio::time::sleep(Duration::from_millis(810)).await;
        tokio::task::yield_now().await;
        // A tick is queued but the button is released before it is handled.
        p.release_button();
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_full_span_drag_scenario() {
        let (mut p, _rx, rec) = picker(PickerConfig {
            min: -200,
            max: 200,
            orientation: Orientation::Horizontal,
            ..PickerConfig::default()
        });

        p.pointer_down(40.0, 19.0);
        p.pointer_move(45.0, 19.0);
        assert!(p.is_tracking());
        assert!(p.tooltip().is_some());
        // 5 of 20 cells over a 400-wide range.
        assert_eq!(p.progress(), 100);
        assert_eq!(p.tooltip().unwrap().text, "100");

        p.pointer_move(60.0, 19.0);
        assert_eq!(p.progress(), 200);
        p.pointer_up(60.0, 19.0);

        assert_eq!(p.progress(), 200);
        assert!(!p.is_tracking());
        assert!(p.tooltip().is_none());
        let notices = rec.0.borrow();
        assert_eq!(notices.first(), Some(&Notice::Start));
        assert_eq!(notices.last(), Some(&Notice::Stop));
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_press_begins_tracking() {
        let (mut p, mut rx, rec) = picker(PickerConfig::default());
        p.pointer_down(40.0, 19.0);
        tokio::time::sleep(Duration::from_millis(310)).await;
        pump(&mut p, &mut rx).await;
        assert!(p.is_tracking());
        assert_eq!(*rec.0.borrow(), vec![Notice::Start]);

        p.pointer_up(40.0, 19.0);
        assert!(!p.is_tracking());
        assert_eq!(p.progress(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_drag_repeats_while_deflected() {
        let (mut p, mut rx, _rec) = picker(PickerConfig {
            tracker: TrackerKind::Exponential,
            orientation: Orientation::Horizontal,
            step: 2,
            ..PickerConfig::default()
        });
        p.pointer_down(40.0, 19.0);
        // Full deflection: 16ms period after the first 200ms wait.
        p.pointer_move(60.0, 19.0);
        assert_eq!(p.progress(), 0);
        assert!(p.is_repeating());

        tokio::time::sleep(Duration::from_millis(205)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 2);

        tokio::time::sleep(Duration::from_millis(40)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 6);

        p.pointer_up(60.0, 19.0);
        assert!(!p.is_repeating());
        tokio::time::sleep(Duration::from_millis(500)).await;
        pump(&mut p, &mut rx).await;
        assert_eq!(p.progress(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_button_ignored_while_tracking() {
        let (mut p, _rx, _rec) = picker(PickerConfig {
            orientation: Orientation::Horizontal,
            ..PickerConfig::default()
        });
        p.pointer_down(40.0, 19.0);
        p.pointer_move(41.0, 19.0);
        let before = p.progress();
        p.press_button(StepDirection::Up);
        assert_eq!(p.progress(), before);
        assert!(!p.is_repeating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_starts_editing() {
        let (mut p, _rx, _rec) = picker(PickerConfig {
            value: 12,
            ..PickerConfig::default()
        });
        p.pointer_down(40.0, 19.0);
        p.pointer_up(40.0, 19.0);
        assert!(p.is_editing());
        assert_eq!(p.display_text(), "12");

        p.edit_backspace();
        p.edit_input('5');
        assert_eq!(p.display_text(), "15");
        p.commit_edit().unwrap();
        assert_eq!(p.progress(), 15);
        assert!(!p.is_editing());
    }

    #[test]
    fn test_invalid_text_reverts() {
        let (mut p, _rx, rec) = picker(PickerConfig {
            value: 12,
            disable_gestures: true,
            ..PickerConfig::default()
        });
        p.pointer_down(40.0, 19.0);
        assert!(p.is_editing());
        p.edit_backspace();
        p.edit_backspace();
        p.edit_input('-');
        assert!(matches!(p.commit_edit(), Err(PickerError::InvalidNumber(_))));
        assert_eq!(p.progress(), 12);
        assert_eq!(p.display_text(), "12");
        assert!(rec.0.borrow().is_empty());
    }

    #[test]
    fn test_typed_value_is_clamped() {
        let (mut p, _rx, _rec) = picker(PickerConfig::default());
        p.begin_edit();
        for c in "999".chars() {
            p.edit_input(c);
        }
        p.commit_edit().unwrap();
        assert_eq!(p.progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_ends_drag_and_blocks_input() {
        let (mut p, _rx, rec) = picker(PickerConfig {
            orientation: Orientation::Horizontal,
            ..PickerConfig::default()
        });
        p.pointer_down(40.0, 19.0);
        p.pointer_move(42.0, 19.0);
        p.set_enabled(false);
        assert!(!p.is_tracking());
        assert_eq!(rec.0.borrow().last(), Some(&Notice::Stop));

        let before = p.progress();
        p.press_button(StepDirection::Up);
        p.pointer_down(40.0, 19.0);
        p.begin_edit();
        assert_eq!(p.progress(), before);
        assert!(!p.is_pressing_value());
        assert!(!p.is_editing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_commits_pending_edit() {
        let (mut p, _rx, _rec) = picker(PickerConfig {
            orientation: Orientation::Horizontal,
            ..PickerConfig::default()
        });
        p.begin_edit();
        p.edit_backspace();
        p.edit_input('4');
        p.edit_input('0');
        p.pointer_down(40.0, 19.0);
        p.pointer_move(40.0, 19.0);
        assert!(!p.is_editing());
        assert_eq!(p.progress(), 40);
        assert_eq!(p.tracker.session().unwrap().initial_value, 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_while_editing_keeps_text() {
        let (mut p, _rx, _rec) = picker(PickerConfig {
            value: 12,
            ..PickerConfig::default()
        });
        p.begin_edit();
        p.edit_input('3');
        p.pointer_down(40.0, 19.0);
        p.pointer_up(40.0, 19.0);
        assert!(p.is_editing());
        assert_eq!(p.display_text(), "123");
    }

    #[test]
    fn test_reconfigure_applies_settings() {
        let (mut p, _rx, rec) = picker(PickerConfig {
            value: 50,
            ..PickerConfig::default()
        });
        let config = PickerConfig {
            label: Some("Gain".to_string()),
            min: -10,
            max: 10,
            step: 5,
            value: 7,
            ..PickerConfig::default()
        };
        p.reconfigure(&config).unwrap();

        let model = p.model();
        assert_eq!(
            (model.min_value(), model.max_value(), model.step_size()),
            (-10, 10, 5)
        );
        assert_eq!(p.progress(), 7);
        assert_eq!(p.label(), "Gain");
        assert_eq!(rec.0.borrow().last(), Some(&Notice::Changed(7, false)));
    }

    #[test]
    fn test_reconfigure_rejects_inverted_range() {
        let (mut p, _rx, _rec) = picker(PickerConfig {
            value: 50,
            ..PickerConfig::default()
        });
        let config = PickerConfig {
            min: 10,
            max: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            p.reconfigure(&config),
            Err(PickerError::InvalidRange { min: 10, max: 0 })
        ));
        assert_eq!((p.model().min_value(), p.model().max_value()), (0, 100));
        assert_eq!(p.progress(), 50);
    }
}
