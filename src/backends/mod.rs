//! Gamepad sources.
//!
//! # Feature flags
//! - **`hid`**: enables [`hid`], which finds DualShock controllers through `hidapi`.
//!
//! [`virtual_input`] is always available and backs tests and demos.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_input;
