//! Crate error type.
//!
//! Lookups with an identifier the caller expects to exist ([`DualShockPad::axis_actuator`],
//! [`DualShockPad::button_actuator`]) fail with [`PadError::UnknownAxis`] /
//! [`PadError::UnknownButton`]. Internal lookups return `Option` instead.
//!
//! [`DualShockPad::axis_actuator`]: crate::pad::DualShockPad::axis_actuator
//! [`DualShockPad::button_actuator`]: crate::pad::DualShockPad::button_actuator

use thiserror::Error;

use crate::actuator::{ActuatorId, ActuatorKind, ActuatorName};

#[derive(Debug, Error)]
pub enum PadError {
    /// No axis with this name or index exists in the pad's mapping.
    #[error("Unknown axis {0}")]
    UnknownAxis(ActuatorId),

    /// No button, D-pad direction or trigger with this name or index exists in the pad's mapping.
    #[error("Unknown button {0}")]
    UnknownButton(ActuatorId),

    /// A string that is not one of the symbolic actuator names.
    #[error("Unknown actuator name {0:?}")]
    UnknownName(String),

    /// A serialized descriptor was read into the view of another kind.
    #[error("Actuator {name}: expected {expected:?}, found {found:?}")]
    KindMismatch {
        name: ActuatorName,
        expected: ActuatorKind,
        found: ActuatorKind,
    },

    /// The device id does not belong to a supported controller family.
    #[error("Unsupported controller id {0:?}")]
    UnknownFamily(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "hid")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

pub type Result<T, E = PadError> = std::result::Result<T, E>;
