//! dualshock-map: named actuators and press/release events for DualShock 3/4 pads.
//!
//! Hosts report gamepads as flat arrays of axis and button values whose order depends on the
//! controller family and on whether the host normalized the layout. This crate turns those
//! arrays into named actuators (`"Triangle"`, `"L1"`, `"LeftStickAxisX"`) and, once per polling
//! cycle, into discrete transitions (button/D-pad down and up, trigger changes).
//!
//! - [`layout`] holds the literal index tables and builds a [`MappingTable`].
//! - [`DualShockPad`] diffs raw snapshots and notifies callbacks and [`EventChannel`]s.
//! - [`PadManager`] attaches [`RawGamepad`]s and drives their pads each cycle.

pub mod actuator;
pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod layout;
pub mod logger;
pub mod manager;
pub mod mapping;
pub mod pad;

pub use actuator::*;
pub use config::PadConfig;
pub use device::*;
pub use error::{PadError, Result};
pub use event::*;
pub use eventbus::*;
pub use layout::{build_mapping, LayoutVariant, PadFamily};
pub use logger::TransitionLogger;
pub use manager::*;
pub use mapping::{MappingTable, StickAxes};
pub use pad::{DualShockPad, StickPosition};
