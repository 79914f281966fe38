//! DualShock pad: raw snapshots in, named transitions out.
//!
//! A [`DualShockPad`] owns one [`MappingTable`] and the last value seen for every actuator.
//! Each polling cycle the host hands it the raw button snapshot ([`DualShockPad::observe_tick`]);
//! the pad diffs it against the stored values, in table order, and notifies:
//!
//! 1. the single callback registered for the event's category (`on_button_down`, ...), then
//! 2. every subscriber of the category's [`EventChannel`].
//!
//! # Example
//! ```
//! use dualshock_map::{DualShockPad, LayoutVariant, PadFamily};
//!
//! let mut pad = DualShockPad::new("054c-0268", PadFamily::DualShock3, LayoutVariant::Standard);
//! pad.on_button_down(|button| println!("{} pressed", button.name()));
//!
//! let mut snapshot = vec![0.0; 17];
//! snapshot[3] = 1.0; // Triangle
//! let events = pad.observe_tick(&snapshot);
//! assert_eq!(events.len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::actuator::{
    Actuator, ActuatorGroup, ActuatorId, ButtonActuator, DPadActuator, TriggerActuator,
    TypedActuator,
};
use crate::config::PadConfig;
use crate::device::RawGamepad;
use crate::error::{PadError, Result};
use crate::event::{EventCategory, PadEvent, TriggerChange};
use crate::eventbus::{panic_message, EventChannel};
use crate::layout::{build_mapping, LayoutVariant, PadFamily};
use crate::logger::TransitionLogger;
use crate::mapping::{MappingTable, StickAxes};

type ButtonCallback = Box<dyn FnMut(&ButtonActuator)>;
type DPadCallback = Box<dyn FnMut(&DPadActuator)>;
type TriggerCallback = Box<dyn FnMut(&TriggerActuator, f64)>;

#[derive(Default)]
struct Callbacks {
    button_down: Option<ButtonCallback>,
    button_up: Option<ButtonCallback>,
    dpad_down: Option<DPadCallback>,
    dpad_up: Option<DPadCallback>,
    trigger_changed: Option<TriggerCallback>,
}

#[derive(Default)]
struct Channels {
    button_down: EventChannel<ButtonActuator>,
    button_up: EventChannel<ButtonActuator>,
    pad_down: EventChannel<DPadActuator>,
    pad_up: EventChannel<DPadActuator>,
    trigger_changed: EventChannel<TriggerChange>,
}

impl Channels {
    fn clear(&mut self) {
        self.button_down.clear();
        self.button_up.clear();
        self.pad_down.clear();
        self.pad_up.clear();
        self.trigger_changed.clear();
    }
}

/// Position of one stick, straight from the raw axis snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StickPosition {
    pub x: f64,
    pub y: f64,
}

pub struct DualShockPad {
    id: String,
    family: PadFamily,
    layout: LayoutVariant,
    mapping: MappingTable,
    stick_axes: StickAxes,
    /// Last observed value per actuator, keyed by group and raw index.
    values: HashMap<(ActuatorGroup, usize), f64>,
    /// Last raw axis snapshot handed to [`DualShockPad::observe_axes`].
    axes: Vec<f64>,
    callbacks: Callbacks,
    channels: Channels,
    disposed: bool,
}

impl fmt::Debug for DualShockPad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualShockPad")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("layout", &self.layout)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl DualShockPad {
    pub fn new(id: impl Into<String>, family: PadFamily, layout: LayoutVariant) -> Self {
        let id = id.into();
        let mapping = build_mapping(family, layout);
        let stick_axes = mapping.stick_axes();
        debug!(pad = %id, %family, ?layout, ?stick_axes, "dualshock pad created");

        Self {
            id,
            family,
            layout,
            mapping,
            stick_axes,
            values: HashMap::new(),
            axes: Vec::new(),
            callbacks: Callbacks::default(),
            channels: Channels::default(),
            disposed: false,
        }
    }

    /// Build a pad for a host gamepad, detecting family and layout (see [`PadConfig::resolve`]).
    pub fn from_gamepad(gamepad: &dyn RawGamepad, config: &PadConfig) -> Result<Self> {
        let (family, layout) = config.resolve(gamepad)?;
        let mut pad = Self::new(gamepad.id(), family, layout);
        if config.log_transitions {
            pad.attach_transition_logger();
        }
        Ok(pad)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn family(&self) -> PadFamily {
        self.family
    }

    pub fn layout(&self) -> LayoutVariant {
        self.layout
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Raw axis indices of the two sticks.
    pub fn stick_axes(&self) -> StickAxes {
        self.stick_axes
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Axis actuator by symbolic name or raw axis index.
    ///
    /// Fails with [`PadError::UnknownAxis`] when the identifier is not in this pad's mapping.
    pub fn axis_actuator(&self, id: impl Into<ActuatorId>) -> Result<&Actuator> {
        let id = id.into();
        let found = match &id {
            ActuatorId::Name(name) => self.mapping.axis_by_name(name),
            ActuatorId::Index(index) => self.mapping.axis_by_index(*index),
        };
        found.ok_or(PadError::UnknownAxis(id))
    }

    /// Button, D-pad or trigger actuator by symbolic name or raw button index.
    ///
    /// Fails with [`PadError::UnknownButton`] when the identifier is not in this pad's mapping.
    pub fn button_actuator(&self, id: impl Into<ActuatorId>) -> Result<&Actuator> {
        let id = id.into();
        let found = match &id {
            ActuatorId::Name(name) => self.mapping.button_by_name(name),
            ActuatorId::Index(index) => self.mapping.button_by_index(*index),
        };
        found.ok_or(PadError::UnknownButton(id))
    }

    /// Last observed value of an actuator, or its rest value if it was never observed.
    pub fn actuator_value(&self, actuator: &Actuator) -> f64 {
        self.values
            .get(&(actuator.group(), actuator.index()))
            .copied()
            .unwrap_or_else(|| actuator.rest_value())
    }

    /// Sets the callback for button presses, replacing any previous one.
    pub fn on_button_down(&mut self, callback: impl FnMut(&ButtonActuator) + 'static) {
        self.callbacks.button_down = Some(Box::new(callback));
    }

    /// Sets the callback for button releases, replacing any previous one.
    pub fn on_button_up(&mut self, callback: impl FnMut(&ButtonActuator) + 'static) {
        self.callbacks.button_up = Some(Box::new(callback));
    }

    /// Sets the callback for D-pad presses, replacing any previous one.
    pub fn on_dpad_down(&mut self, callback: impl FnMut(&DPadActuator) + 'static) {
        self.callbacks.dpad_down = Some(Box::new(callback));
    }

    /// Sets the callback for D-pad releases, replacing any previous one.
    pub fn on_dpad_up(&mut self, callback: impl FnMut(&DPadActuator) + 'static) {
        self.callbacks.dpad_up = Some(Box::new(callback));
    }

    /// Sets the callback for trigger changes, replacing any previous one.
    pub fn on_trigger_changed(&mut self, callback: impl FnMut(&TriggerActuator, f64) + 'static) {
        self.callbacks.trigger_changed = Some(Box::new(callback));
    }

    pub fn button_down_channel(&mut self) -> &mut EventChannel<ButtonActuator> {
        &mut self.channels.button_down
    }

    pub fn button_up_channel(&mut self) -> &mut EventChannel<ButtonActuator> {
        &mut self.channels.button_up
    }

    pub fn pad_down_channel(&mut self) -> &mut EventChannel<DPadActuator> {
        &mut self.channels.pad_down
    }

    pub fn pad_up_channel(&mut self) -> &mut EventChannel<DPadActuator> {
        &mut self.channels.pad_up
    }

    pub fn trigger_changed_channel(&mut self) -> &mut EventChannel<TriggerChange> {
        &mut self.channels.trigger_changed
    }

    /// Subscribe a [`TransitionLogger`] to every channel of this pad.
    pub fn attach_transition_logger(&mut self) {
        let id = self.id.clone();
        self.channels
            .button_down
            .subscribe(TransitionLogger::new(&id, EventCategory::ButtonDown));
        self.channels
            .button_up
            .subscribe(TransitionLogger::new(&id, EventCategory::ButtonUp));
        self.channels
            .pad_down
            .subscribe(TransitionLogger::new(&id, EventCategory::PadDown));
        self.channels
            .pad_up
            .subscribe(TransitionLogger::new(&id, EventCategory::PadUp));
        self.channels
            .trigger_changed
            .subscribe(TransitionLogger::new(&id, EventCategory::TriggerChanged));
    }

    /// Diff one raw button snapshot against the stored values and notify.
    ///
    /// Actuators are visited in table order. A value equal to the stored one is ignored.
    /// Otherwise the new value is stored, then:
    /// - triggers always report [`PadEvent::TriggerChanged`];
    /// - buttons and D-pad directions report `Down` on their active value and `Up` on their
    ///   rest value; other values are stored silently.
    ///
    /// Actuators whose index lies past the end of `snapshot` are skipped. A panicking callback
    /// or subscriber is logged and skipped; every other delivery still happens.
    ///
    /// Returns the transitions in the order they were delivered. After [`dispose`] this is a
    /// no-op returning nothing.
    ///
    /// [`dispose`]: DualShockPad::dispose
    pub fn observe_tick(&mut self, snapshot: &[f64]) -> Vec<PadEvent> {
        if self.disposed {
            warn!(pad = %self.id, "tick on disposed pad ignored");
            return Vec::new();
        }

        let mut events = Vec::new();
        for pos in 0..self.mapping.buttons().len() {
            let actuator = self.mapping.buttons()[pos];
            let Some(&value) = snapshot.get(actuator.index()) else {
                trace!(pad = %self.id, actuator = %actuator.name(), index = actuator.index(), "missing from snapshot");
                continue;
            };

            let current = self.actuator_value(&actuator);
            if value == current {
                continue;
            }
            self.values.insert((actuator.group(), actuator.index()), value);

            let Some(event) = transition(actuator, value) else {
                continue;
            };
            trace!(pad = %self.id, ?event, "transition");
            self.dispatch(&event);
            events.push(event);
        }
        events
    }

    /// Remember the latest raw axis snapshot for [`left_stick`](Self::left_stick) and
    /// [`right_stick`](Self::right_stick).
    pub fn observe_axes(&mut self, axes: &[f64]) {
        if self.disposed {
            return;
        }
        self.axes.clear();
        self.axes.extend_from_slice(axes);
    }

    /// Read both snapshots from a host gamepad: axes are cached, buttons are diffed.
    pub fn update(&mut self, gamepad: &dyn RawGamepad) -> Vec<PadEvent> {
        self.observe_axes(gamepad.axes());
        self.observe_tick(gamepad.buttons())
    }

    pub fn left_stick(&self) -> StickPosition {
        StickPosition {
            x: self.axis_value(self.stick_axes.left_x),
            y: self.axis_value(self.stick_axes.left_y),
        }
    }

    pub fn right_stick(&self) -> StickPosition {
        StickPosition {
            x: self.axis_value(self.stick_axes.right_x),
            y: self.axis_value(self.stick_axes.right_y),
        }
    }

    /// Clear all state and detach every callback and subscriber.
    ///
    /// The pad processes no further ticks.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.values.clear();
        self.axes.clear();
        self.channels.clear();
        self.callbacks = Callbacks::default();
        self.disposed = true;
        debug!(pad = %self.id, "dualshock pad disposed");
    }

    fn axis_value(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Callback first, then the channel. Each delivery is isolated: a panicking callback is
    /// logged and the channel still runs; see [`EventChannel::publish`] for subscribers.
    fn dispatch(&mut self, event: &PadEvent) {
        let callbacks = &mut self.callbacks;
        let called = panic::catch_unwind(AssertUnwindSafe(|| call_back(callbacks, event)));
        if let Err(payload) = called {
            error!(
                pad = %self.id,
                actuator = %event.actuator().name(),
                "callback panicked: {}",
                panic_message(&*payload)
            );
        }
        publish(&mut self.channels, event);
    }
}

fn transition(actuator: Actuator, value: f64) -> Option<PadEvent> {
    match actuator.typed() {
        TypedActuator::Trigger(trigger) => Some(PadEvent::TriggerChanged(TriggerChange {
            actuator: trigger,
            value,
        })),
        TypedActuator::Button(button) if value == button.active_value() => {
            Some(PadEvent::ButtonDown(button))
        }
        TypedActuator::Button(button) if value == button.rest_value() => {
            Some(PadEvent::ButtonUp(button))
        }
        TypedActuator::DPad(dpad) if value == dpad.active_value() => Some(PadEvent::PadDown(dpad)),
        TypedActuator::DPad(dpad) if value == dpad.rest_value() => Some(PadEvent::PadUp(dpad)),
        _ => None,
    }
}

fn call_back(callbacks: &mut Callbacks, event: &PadEvent) {
    match event {
        PadEvent::ButtonDown(button) => {
            if let Some(callback) = callbacks.button_down.as_mut() {
                callback(button);
            }
        }
        PadEvent::ButtonUp(button) => {
            if let Some(callback) = callbacks.button_up.as_mut() {
                callback(button);
            }
        }
        PadEvent::PadDown(dpad) => {
            if let Some(callback) = callbacks.dpad_down.as_mut() {
                callback(dpad);
            }
        }
        PadEvent::PadUp(dpad) => {
            if let Some(callback) = callbacks.dpad_up.as_mut() {
                callback(dpad);
            }
        }
        PadEvent::TriggerChanged(change) => {
            if let Some(callback) = callbacks.trigger_changed.as_mut() {
                callback(&change.actuator, change.value);
            }
        }
    }
}

fn publish(channels: &mut Channels, event: &PadEvent) {
    match event {
        PadEvent::ButtonDown(button) => channels.button_down.publish(button),
        PadEvent::ButtonUp(button) => channels.button_up.publish(button),
        PadEvent::PadDown(dpad) => channels.pad_down.publish(dpad),
        PadEvent::PadUp(dpad) => channels.pad_up.publish(dpad),
        PadEvent::TriggerChanged(change) => channels.trigger_changed.publish(change),
    }
}
