use tracing::info;

use crate::actuator::{ButtonActuator, DPadActuator};
use crate::event::{EventCategory, TriggerChange};
use crate::eventbus::Listener;

/// A listener that logs every transition it receives through `tracing`.
///
/// One logger covers one channel; the category only labels the log line.
#[derive(Debug, Clone)]
pub struct TransitionLogger {
    pad: String,
    category: EventCategory,
}

impl TransitionLogger {
    pub fn new(pad: impl Into<String>, category: EventCategory) -> Self {
        Self {
            pad: pad.into(),
            category,
        }
    }
}

impl Listener<ButtonActuator> for TransitionLogger {
    fn on_event(&mut self, button: &ButtonActuator) {
        info!(pad = %self.pad, event = ?self.category, actuator = %button.name(), index = button.index());
    }
}

impl Listener<DPadActuator> for TransitionLogger {
    fn on_event(&mut self, dpad: &DPadActuator) {
        info!(pad = %self.pad, event = ?self.category, actuator = %dpad.name(), index = dpad.index());
    }
}

impl Listener<TriggerChange> for TransitionLogger {
    fn on_event(&mut self, change: &TriggerChange) {
        info!(
            pad = %self.pad,
            event = ?self.category,
            actuator = %change.actuator.name(),
            value = change.value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{Actuator, ActuatorKind, ActuatorName, TypedActuator};
    use crate::eventbus::EventChannel;

    #[test]
    fn logs_through_channels() {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let TypedActuator::Trigger(r2) =
                Actuator::new(ActuatorName::R2, 7, ActuatorKind::Trigger).typed()
            else {
                panic!("R2 should be a trigger");
            };
            let mut channel = EventChannel::<TriggerChange>::new();
            channel.subscribe(TransitionLogger::new("pad0", EventCategory::TriggerChanged));
            channel.publish(&TriggerChange {
                actuator: r2,
                value: 0.5,
            });
            assert_eq!(channel.len(), 1);
        });
    }
}
