use std::path::PathBuf;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::config::{Config, Overrides, PickerConfig};
use crate::error::Result;
use crate::events::Action;
use crate::log;
use crate::picker::{Geometry, NumberPicker, PickerListener, TickSender, TimerTick};
use crate::tui::InteractionRegistry;
use crate::tui::ui::{ScreenLayout, compute_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal, // Stepping and navigation
    Edit,   // Typing into the focused value field
    Help,   // Help popup showing all hotkeys
}

/// Rectangular screen region used for mouse hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClickRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

impl From<Rect> for ClickRegion {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Who holds the pointer between press and release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapture {
    Button(usize),
    Value(usize),
}

/// Change reported by a picker's listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerNotice {
    Progress {
        picker: usize,
        progress: i32,
        from_user: bool,
    },
    StartTracking(usize),
    StopTracking(usize),
}

/// Forwards listener callbacks to the app over a channel.
struct ChannelListener {
    tx: mpsc::UnboundedSender<PickerNotice>,
}

impl PickerListener for ChannelListener {
    fn on_progress_changed(&mut self, picker: usize, progress: i32, from_user: bool) {
        let _ = self.tx.send(PickerNotice::Progress {
            picker,
            progress,
            from_user,
        });
    }

    fn on_start_tracking_touch(&mut self, picker: usize) {
        let _ = self.tx.send(PickerNotice::StartTracking(picker));
    }

    fn on_stop_tracking_touch(&mut self, picker: usize) {
        let _ = self.tx.send(PickerNotice::StopTracking(picker));
    }
}

pub struct App {
    pub pickers: Vec<NumberPicker>,
    pub focused: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// Last value reported by any picker
    pub global_progress: Option<i32>,
    /// One-line feedback shown above the hotkeys
    pub status: Option<String>,
    pub capture: Option<PointerCapture>,
    pub interactions: InteractionRegistry,
    pub screen: ScreenLayout,
    notices: mpsc::UnboundedReceiver<PickerNotice>,
    /// Where `ReloadConfig` reads from
    config_path: Option<PathBuf>,
    overrides: Overrides,
}

impl App {
    pub fn new(configs: &[PickerConfig], ticks: TickSender) -> Result<Self> {
        let (notice_tx, notices) = mpsc::unbounded_channel();

        let mut pickers = Vec::with_capacity(configs.len());
        for (id, config) in configs.iter().enumerate() {
            let mut picker = NumberPicker::new(id, config, ticks.clone())?;
            picker.set_listener(Box::new(ChannelListener {
                tx: notice_tx.clone(),
            }));
            pickers.push(picker);
        }

        Ok(Self {
            pickers,
            focused: 0,
            show_help: false,
            should_quit: false,
            global_progress: None,
            status: None,
            capture: None,
            interactions: InteractionRegistry::new(),
            screen: ScreenLayout::default(),
            notices,
            config_path: None,
            overrides: Overrides::default(),
        })
    }

    /// Remember the config file and CLI overrides for reloading.
    pub fn with_config_source(mut self, path: Option<PathBuf>, overrides: Overrides) -> Self {
        self.config_path = path;
        self.overrides = overrides;
        self
    }

    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Help
        } else if self.focused_picker().is_some_and(|p| p.is_editing()) {
            InputMode::Edit
        } else {
            InputMode::Normal
        }
    }

    pub fn focused_picker(&self) -> Option<&NumberPicker> {
        self.pickers.get(self.focused)
    }

    fn focused_picker_mut(&mut self) -> Option<&mut NumberPicker> {
        self.pickers.get_mut(self.focused)
    }

    /// Lay out the screen, then refresh hit regions and picker geometry.
    pub fn layout(&mut self, area: Rect) {
        self.screen = compute_layout(area, self.pickers.len());
        self.interactions.clear();
        for (picker, layout) in self.pickers.iter_mut().zip(self.screen.pickers.iter()) {
            picker.set_geometry(Geometry::new(layout.frame, area.width, area.height));
            self.interactions.register_picker(picker.id(), layout);
        }
    }

    /// Apply an action to app state.
    pub fn dispatch(&mut self, action: Action) {
        if action != Action::None {
            log::log_event(&format!("{:?}", action));
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ReloadConfig => self.reload_config(),
            Action::OpenHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,

            Action::FocusNext => {
                self.commit_focused_edit();
                if !self.pickers.is_empty() {
                    self.focus((self.focused + 1) % self.pickers.len());
                }
            }
            Action::FocusPrev => {
                self.commit_focused_edit();
                if !self.pickers.is_empty() {
                    let prev = self
                        .focused
                        .checked_sub(1)
                        .unwrap_or(self.pickers.len() - 1);
                    self.focus(prev);
                }
            }
            Action::Focus(picker) => self.focus(picker),
            Action::Blur => self.commit_focused_edit(),

            Action::Step { picker, direction } => {
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.step(direction);
                }
            }
            Action::PressButton { picker, direction } => {
                self.release_capture();
                self.focus(picker);
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.press_button(direction);
                    if p.pressed().is_some() {
                        self.capture = Some(PointerCapture::Button(picker));
                    }
                }
            }
            Action::ToggleEnabled(picker) => {
                if let Some(p) = self.pickers.get_mut(picker) {
                    let enabled = !p.is_enabled();
                    p.set_enabled(enabled);
                    self.status = Some(format!(
                        "{} {}",
                        p.label(),
                        if enabled { "enabled" } else { "disabled" }
                    ));
                }
            }

            Action::PointerDown {
                picker,
                column,
                row,
            } => {
                self.release_capture();
                self.focus(picker);
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.pointer_down(f32::from(column), f32::from(row));
                    if p.is_pressing_value() {
                        self.capture = Some(PointerCapture::Value(picker));
                    }
                }
            }
            Action::PointerMove { column, row } => {
                if let Some(PointerCapture::Value(picker)) = self.capture {
                    if let Some(p) = self.pickers.get_mut(picker) {
                        p.pointer_move(f32::from(column), f32::from(row));
                    }
                }
            }
            Action::PointerUp { column, row } => match self.capture.take() {
                Some(PointerCapture::Button(picker)) => {
                    if let Some(p) = self.pickers.get_mut(picker) {
                        p.release_button();
                    }
                }
                Some(PointerCapture::Value(picker)) => {
                    if let Some(p) = self.pickers.get_mut(picker) {
                        p.pointer_up(f32::from(column), f32::from(row));
                    }
                }
                None => {}
            },

            Action::BeginEdit(picker) => {
                self.focus(picker);
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.begin_edit();
                }
            }
            Action::EditChar(c) => {
                if let Some(p) = self.focused_picker_mut() {
                    p.edit_input(c);
                }
            }
            Action::EditBackspace => {
                if let Some(p) = self.focused_picker_mut() {
                    p.edit_backspace();
                }
            }
            Action::CommitEdit => self.commit_focused_edit(),
            Action::CancelEdit => {
                if let Some(p) = self.focused_picker_mut() {
                    p.cancel_edit();
                }
            }

            Action::None => {}
        }

        self.drain_notices();
    }

    /// Deliver a timer tick to its picker.
    pub fn handle_tick(&mut self, tick: TimerTick) {
        if let Some(p) = self.pickers.get_mut(tick.picker) {
            p.handle_tick(&tick);
        }
        self.drain_notices();
    }

    /// Release every held button and drag, e.g. when the terminal loses focus.
    pub fn cancel_interactions(&mut self) {
        self.capture = None;
        for picker in self.pickers.iter_mut() {
            picker.cancel_interactions();
        }
        self.drain_notices();
    }

    /// Release whichever picker holds the pointer.
    ///
    /// A release can be lost (e.g. outside the terminal window), so a new
    /// press must not leave the old holder's timers running.
    fn release_capture(&mut self) {
        match self.capture.take() {
            Some(PointerCapture::Button(picker)) => {
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.release_button();
                }
            }
            Some(PointerCapture::Value(picker)) => {
                if let Some(p) = self.pickers.get_mut(picker) {
                    p.cancel_interactions();
                }
            }
            None => {}
        }
    }

    fn reload_config(&mut self) {
        match Config::try_load(self.config_path.as_deref()) {
            Ok(config) => {
                let configs = config.with_overrides(&self.overrides).pickers();
                self.reconfigure(&configs);
            }
            Err(e) => {
                log::log(&format!("Config reload failed: {}", e));
                self.status = Some(e.to_string());
            }
        }
    }

    /// Apply new settings to the existing pickers, in order.
    ///
    /// Extra entries are ignored; pickers without one keep their settings.
    pub fn reconfigure(&mut self, configs: &[PickerConfig]) {
        self.cancel_interactions();

        let mut failures = Vec::new();
        for (picker, config) in self.pickers.iter_mut().zip(configs) {
            if let Err(e) = picker.reconfigure(config) {
                log::log_picker(picker.label(), &format!("reconfigure failed: {}", e));
                failures.push(format!("{}: {}", picker.label(), e));
            }
        }

        self.status = Some(if failures.is_empty() {
            format!("Reloaded {} pickers", configs.len().min(self.pickers.len()))
        } else {
            failures.join("; ")
        });
        self.drain_notices();
    }

    /// Move focus, committing any edit in the picker losing it.
    fn focus(&mut self, picker: usize) {
        if picker >= self.pickers.len() {
            return;
        }
        if picker != self.focused {
            self.commit_focused_edit();
        }
        self.focused = picker;
    }

    fn commit_focused_edit(&mut self) {
        let Some(p) = self.pickers.get_mut(self.focused) else {
            return;
        };
        if !p.is_editing() {
            return;
        }
        if let Err(e) = p.commit_edit() {
            self.status = Some(format!("{}: {}", p.label(), e));
        }
    }

    fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            let label = self
                .pickers
                .get(notice_picker(&notice))
                .map(|p| p.label().to_string())
                .unwrap_or_default();
            match notice {
                PickerNotice::Progress {
                    progress,
                    from_user,
                    ..
                } => {
                    self.global_progress = Some(progress);
                    log::log_picker(
                        &label,
                        &format!("onProgressChanged {} (from_user={})", progress, from_user),
                    );
                }
                PickerNotice::StartTracking(_) => {
                    self.status = Some(format!("{}: tracking", label));
                    log::log_picker(&label, "onStartTrackingTouch");
                }
                PickerNotice::StopTracking(_) => {
                    self.status = None;
                    log::log_picker(&label, "onStopTrackingTouch");
                }
            }
        }
    }
}

fn notice_picker(notice: &PickerNotice) -> usize {
    match *notice {
        PickerNotice::Progress { picker, .. } => picker,
        PickerNotice::StartTracking(picker) | PickerNotice::StopTracking(picker) => picker,
    }
}
