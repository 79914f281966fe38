//! Hard-coded actuator layouts for DualShock 3 and DualShock 4 pads.
//!
//! Each family ships two index layouts:
//! - [`LayoutVariant::Standard`] when the host reports the normalized `"standard"` button map;
//! - [`LayoutVariant::NonStandard`] for the raw, firmware-ordered map.
//!
//! The tables below are hardware contracts. They are kept as separate literal tables per
//! family and variant; row order is the order in which button changes are reported.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actuator::{Actuator, ActuatorKind, ActuatorName};
use crate::device::STANDARD_MAPPING;
use crate::mapping::MappingTable;

use ActuatorKind::{Axis, Button, DPad, Trigger};
use ActuatorName::*;

/// Supported controller families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadFamily {
    DualShock3,
    DualShock4,
}

impl PadFamily {
    /// Detect the family from a host device id string.
    ///
    /// DualShock 4 ids carry product `05c4` or `09cc`; DualShock 3 ids carry `0268`.
    pub fn match_id(id: &str) -> Option<PadFamily> {
        let id = id.to_ascii_lowercase();
        if id.contains("9cc") || id.contains("5c4") {
            Some(PadFamily::DualShock4)
        } else if id.contains("268") {
            Some(PadFamily::DualShock3)
        } else {
            None
        }
    }

    /// Whether the id carries the Sony vendor id (`054c`).
    pub fn is_sony_id(id: &str) -> bool {
        id.to_ascii_lowercase().contains("54c")
    }

    pub fn from_product_id(pid: u16) -> Option<PadFamily> {
        match pid {
            0x0268 => Some(PadFamily::DualShock3),
            0x05c4 | 0x09cc => Some(PadFamily::DualShock4),
            _ => None,
        }
    }
}

impl fmt::Display for PadFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PadFamily::DualShock3 => f.write_str("DualShock 3"),
            PadFamily::DualShock4 => f.write_str("DualShock 4"),
        }
    }
}

/// Which of a family's two index layouts a device uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    Standard,
    NonStandard,
}

impl LayoutVariant {
    /// [`STANDARD_MAPPING`] selects [`LayoutVariant::Standard`]; anything else is non-standard.
    pub fn from_mapping(mapping: &str) -> LayoutVariant {
        if mapping == STANDARD_MAPPING {
            LayoutVariant::Standard
        } else {
            LayoutVariant::NonStandard
        }
    }
}

type Row = (ActuatorName, usize, ActuatorKind);

const STICKS_0123: &[Row] = &[
    (LeftStickAxisX, 0, Axis),
    (LeftStickAxisY, 1, Axis),
    (RightStickAxisX, 2, Axis),
    (RightStickAxisY, 3, Axis),
];

const DS3_STANDARD_BUTTONS: &[Row] = &[
    (X, 0, Button),
    (Circle, 1, Button),
    (Square, 2, Button),
    (Triangle, 3, Button),
    (L1, 4, Button),
    (L2, 5, Button),
    (R1, 6, Button),
    (R2, 7, Button),
    (Select, 8, Button),
    (Start, 9, Button),
    (LeftStick, 10, Button),
    (RightStick, 11, Button),
    (Up, 12, DPad),
    (Down, 13, DPad),
    (Left, 14, DPad),
    (Right, 15, DPad),
    (Ps, 16, Button),
];

const DS3_RAW_BUTTONS: &[Row] = &[
    (Select, 0, Button),
    (LeftStick, 1, Button),
    (RightStick, 2, Button),
    (Start, 3, Button),
    (Up, 4, DPad),
    (Right, 5, DPad),
    (Down, 6, DPad),
    (Left, 7, DPad),
    (L2, 8, Button),
    (L1, 10, Button),
    (R2, 9, Button),
    (R1, 11, Button),
    (Triangle, 12, Button),
    (Circle, 13, Button),
    (X, 14, Button),
    (Square, 15, Button),
    (Ps, 16, Button),
];

// No X row: the standard DualShock 4 capture never confirmed its index.
const DS4_STANDARD_BUTTONS: &[Row] = &[
    (Circle, 1, Button),
    (Square, 2, Button),
    (Triangle, 3, Button),
    (L1, 4, Button),
    (L2, 5, Button),
    (R1, 6, Trigger),
    (R2, 7, Trigger),
    (Share, 8, Button),
    (Options, 9, Button),
    (LeftStick, 10, Button),
    (RightStick, 11, Button),
    (Up, 12, DPad),
    (Down, 13, DPad),
    (Left, 14, DPad),
    (Right, 15, DPad),
    (Ps, 16, Button),
    (TouchPad, 17, Button),
];

const DS4_RAW_AXES: &[Row] = &[
    (LeftStickAxisX, 0, Axis),
    (LeftStickAxisY, 1, Axis),
    (RightStickAxisX, 2, Axis),
    (RightStickAxisY, 5, Axis),
];

const DS4_RAW_BUTTONS: &[Row] = &[
    (X, 1, Button),
    (Circle, 2, Button),
    (Square, 0, Button),
    (Triangle, 3, Button),
    (L1, 4, Button),
    (L2, 5, Button),
    (R1, 6, Trigger),
    (R2, 7, Trigger),
    (Share, 8, Button),
    (Options, 9, Button),
    (LeftStick, 10, Button),
    (RightStick, 11, Button),
    (Up, 14, DPad),
    (Right, 17, DPad),
    (Down, 15, DPad),
    (Left, 16, DPad),
    (Ps, 12, Button),
    (TouchPad, 13, Button),
];

fn rows(family: PadFamily, layout: LayoutVariant) -> (&'static [Row], &'static [Row]) {
    match (family, layout) {
        (PadFamily::DualShock3, LayoutVariant::Standard) => (STICKS_0123, DS3_STANDARD_BUTTONS),
        (PadFamily::DualShock3, LayoutVariant::NonStandard) => (STICKS_0123, DS3_RAW_BUTTONS),
        (PadFamily::DualShock4, LayoutVariant::Standard) => (STICKS_0123, DS4_STANDARD_BUTTONS),
        (PadFamily::DualShock4, LayoutVariant::NonStandard) => (DS4_RAW_AXES, DS4_RAW_BUTTONS),
    }
}

fn actuators(rows: &[Row]) -> Vec<Actuator> {
    rows.iter()
        .map(|&(name, index, kind)| Actuator::new(name, index, kind))
        .collect()
}

/// Build the mapping table for a family and layout.
pub fn build_mapping(family: PadFamily, layout: LayoutVariant) -> MappingTable {
    let (axes, buttons) = rows(family, layout);
    MappingTable::new(actuators(axes), actuators(buttons))
}
