use crate::device::RawGamepad;

/// In-memory [`RawGamepad`] whose snapshot is set by hand.
///
/// Slots grow on demand; unset slots read `0.0`.
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepad {
    id: String,
    mapping: String,
    axes: Vec<f64>,
    buttons: Vec<f64>,
}

impl VirtualGamepad {
    pub fn new(id: &str, mapping: &str) -> Self {
        Self {
            id: id.to_string(),
            mapping: mapping.to_string(),
            axes: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Pre-size both snapshots, e.g. to match what a host reports.
    pub fn with_slots(mut self, axes: usize, buttons: usize) -> Self {
        self.axes.resize(axes, 0.0);
        self.buttons.resize(buttons, 0.0);
        self
    }

    pub fn set_axis(&mut self, axis: usize, value: f64) {
        set_slot(&mut self.axes, axis, value);
    }

    pub fn set_button(&mut self, button: usize, value: f64) {
        set_slot(&mut self.buttons, button, value);
    }

    pub fn press(&mut self, button: usize) {
        self.set_button(button, 1.0);
    }

    pub fn release(&mut self, button: usize) {
        self.set_button(button, 0.0);
    }
}

fn set_slot(slots: &mut Vec<f64>, index: usize, value: f64) {
    if slots.len() <= index {
        slots.resize(index + 1, 0.0);
    }
    slots[index] = value;
}

impl RawGamepad for VirtualGamepad {
    fn id(&self) -> &str {
        &self.id
    }

    fn mapping(&self) -> &str {
        &self.mapping
    }

    fn axes(&self) -> &[f64] {
        &self.axes
    }

    fn buttons(&self) -> &[f64] {
        &self.buttons
    }
}
