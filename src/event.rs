//! Transition events.
//!
//! A [`DualShockPad`](crate::pad::DualShockPad) turns raw value changes into [`PadEvent`]s:
//!
//! - **Buttons / D-pad:** discrete edges. `Down` fires when the new value equals the actuator's
//!   active value, `Up` when it equals the rest value. Values in between update the pad's state
//!   silently.
//! - **Triggers:** every change fires [`PadEvent::TriggerChanged`] with the new value.
//! - **Axes** are not diffed here; read them from the raw snapshot (see
//!   [`DualShockPad::left_stick`](crate::pad::DualShockPad::left_stick)).

use serde::{Deserialize, Serialize};

use crate::actuator::{Actuator, ButtonActuator, DPadActuator, TriggerActuator};

/// Payload of [`PadEvent::TriggerChanged`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerChange {
    pub actuator: TriggerActuator,
    pub value: f64,
}

/// One transition produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PadEvent {
    ButtonDown(ButtonActuator),
    ButtonUp(ButtonActuator),
    PadDown(DPadActuator),
    PadUp(DPadActuator),
    TriggerChanged(TriggerChange),
}

/// Category of a [`PadEvent`]; one channel and one callback slot exist per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    ButtonDown,
    ButtonUp,
    PadDown,
    PadUp,
    TriggerChanged,
}

impl PadEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            PadEvent::ButtonDown(_) => EventCategory::ButtonDown,
            PadEvent::ButtonUp(_) => EventCategory::ButtonUp,
            PadEvent::PadDown(_) => EventCategory::PadDown,
            PadEvent::PadUp(_) => EventCategory::PadUp,
            PadEvent::TriggerChanged(_) => EventCategory::TriggerChanged,
        }
    }

    /// The actuator that changed.
    pub fn actuator(&self) -> &Actuator {
        match self {
            PadEvent::ButtonDown(a) | PadEvent::ButtonUp(a) => a.actuator(),
            PadEvent::PadDown(a) | PadEvent::PadUp(a) => a.actuator(),
            PadEvent::TriggerChanged(change) => change.actuator.actuator(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{ActuatorKind, ActuatorName, TypedActuator};

    #[test]
    fn category_and_actuator() {
        let TypedActuator::Trigger(r2) =
            Actuator::new(ActuatorName::R2, 7, ActuatorKind::Trigger).typed()
        else {
            panic!("R2 should be a trigger");
        };
        let event = PadEvent::TriggerChanged(TriggerChange {
            actuator: r2,
            value: 0.25,
        });
        assert_eq!(event.category(), EventCategory::TriggerChanged);
        assert_eq!(event.actuator().name(), ActuatorName::R2);
    }
}
