use tracing::{info, warn};

use crate::config::PadConfig;
use crate::device::RawGamepad;
use crate::error::Result;
use crate::event::PadEvent;
use crate::pad::DualShockPad;

/// A transition tagged with the id of the pad that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedEvent {
    pub pad_id: String,
    pub event: PadEvent,
}

struct Slot<G> {
    gamepad: G,
    pad: DualShockPad,
}

/// Owns attached gamepads and their pads, and drives them once per polling cycle.
pub struct PadManager<G: RawGamepad = Box<dyn RawGamepad>> {
    config: PadConfig,
    slots: Vec<Slot<G>>,
}

impl<G: RawGamepad> Default for PadManager<G> {
    fn default() -> Self {
        Self::new(PadConfig::default())
    }
}

impl<G: RawGamepad> PadManager<G> {
    pub fn new(config: PadConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
        }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Attach a gamepad, building its pad from the manager's config.
    ///
    /// A gamepad whose id is already attached replaces the previous one, which is disposed.
    /// Fails when the device is not a supported DualShock.
    pub fn attach(&mut self, gamepad: G) -> Result<&mut DualShockPad> {
        let pad = DualShockPad::from_gamepad(&gamepad, &self.config)?;
        if self.detach(gamepad.id()).is_some() {
            info!(pad = %gamepad.id(), "replaced attached pad");
        }
        info!(pad = %pad.id(), family = %pad.family(), layout = ?pad.layout(), "pad attached");

        self.slots.push(Slot { gamepad, pad });
        let slot = self.slots.len() - 1;
        Ok(&mut self.slots[slot].pad)
    }

    /// Detach a gamepad by id, disposing its pad.
    pub fn detach(&mut self, id: &str) -> Option<G> {
        let pos = self.slots.iter().position(|slot| slot.pad.id() == id)?;
        let mut slot = self.slots.remove(pos);
        slot.pad.dispose();
        info!(pad = %id, "pad detached");
        Some(slot.gamepad)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn pads(&self) -> impl Iterator<Item = &DualShockPad> {
        self.slots.iter().map(|slot| &slot.pad)
    }

    pub fn pad(&self, id: &str) -> Option<&DualShockPad> {
        self.pads().find(|pad| pad.id() == id)
    }

    pub fn pad_mut(&mut self, id: &str) -> Option<&mut DualShockPad> {
        self.slots
            .iter_mut()
            .map(|slot| &mut slot.pad)
            .find(|pad| pad.id() == id)
    }

    pub fn gamepad_mut(&mut self, id: &str) -> Option<&mut G> {
        self.slots
            .iter_mut()
            .find(|slot| slot.pad.id() == id)
            .map(|slot| &mut slot.gamepad)
    }

    /// Poll every gamepad and diff it into its pad. Pads are visited in attach order.
    pub fn update_all(&mut self) -> Vec<TaggedEvent> {
        let mut events = Vec::new();
        for slot in self.slots.iter_mut() {
            slot.gamepad.poll();
            if slot.gamepad.buttons().is_empty() {
                warn!(pad = %slot.pad.id(), "empty button snapshot");
            }
            for event in slot.pad.update(&slot.gamepad) {
                events.push(TaggedEvent {
                    pad_id: slot.pad.id().to_string(),
                    event,
                });
            }
        }
        events
    }
}
