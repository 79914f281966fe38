//! The host-side gamepad a [`DualShockPad`](crate::pad::DualShockPad) reads from.
//!
//! Discovery layers (browser bridges, HID readers, test doubles) implement [`RawGamepad`] to
//! expose their latest raw snapshot. The pad never enumerates or opens devices itself.

/// Mapping string reported by hosts that normalize the button layout.
pub const STANDARD_MAPPING: &str = "standard";

pub trait RawGamepad {
    /// Host device id, e.g. `"054c-05c4-Wireless Controller"`.
    fn id(&self) -> &str;

    /// Host mapping label; [`STANDARD_MAPPING`] when the host normalized the layout.
    fn mapping(&self) -> &str;

    /// Current raw axis values, index-addressed.
    fn axes(&self) -> &[f64];

    /// Current raw button, D-pad and trigger values, index-addressed.
    fn buttons(&self) -> &[f64];

    /// Refresh the snapshot from the device. Hosts that push snapshots can keep the default.
    fn poll(&mut self) {}
}

impl<G: RawGamepad + ?Sized> RawGamepad for Box<G> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn mapping(&self) -> &str {
        (**self).mapping()
    }

    fn axes(&self) -> &[f64] {
        (**self).axes()
    }

    fn buttons(&self) -> &[f64] {
        (**self).buttons()
    }

    fn poll(&mut self) {
        (**self).poll()
    }
}
