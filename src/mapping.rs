//! Name/index lookup over a pad's actuators.
//!
//! A [`MappingTable`] owns two ordered sequences, `axes` and `buttons` (the latter also holds
//! D-pad and trigger actuators), plus lookup maps built once at construction. Tables are
//! immutable; build a new one for a different layout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::actuator::{Actuator, ActuatorName};
use crate::error::Result;

/// Raw axis indices used to track the two sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickAxes {
    pub left_x: usize,
    pub left_y: usize,
    pub right_x: usize,
    pub right_y: usize,
}

impl Default for StickAxes {
    fn default() -> Self {
        Self {
            left_x: 0,
            left_y: 1,
            right_x: 2,
            right_y: 3,
        }
    }
}

#[derive(Default, Debug, Clone)]
struct Lookup {
    by_name: HashMap<ActuatorName, usize>,
    by_index: HashMap<usize, usize>,
}

impl Lookup {
    fn build(actuators: &[Actuator], group: &str) -> Self {
        let mut lookup = Lookup::default();
        for (pos, actuator) in actuators.iter().enumerate() {
            if lookup.by_name.insert(actuator.name(), pos).is_some() {
                warn!(group, name = %actuator.name(), "duplicate actuator name; last entry wins");
            }
            if lookup.by_index.insert(actuator.index(), pos).is_some() {
                warn!(group, index = actuator.index(), "duplicate raw index; last entry wins");
            }
        }
        lookup
    }
}

/// Serialized form: just the two sequences.
#[derive(Serialize, Deserialize)]
struct TableParts {
    axes: Vec<Actuator>,
    buttons: Vec<Actuator>,
}

/// Bidirectional lookup (name and raw index) over the axis group and the button group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TableParts", into = "TableParts")]
pub struct MappingTable {
    axes: Vec<Actuator>,
    buttons: Vec<Actuator>,
    axis_lookup: Lookup,
    button_lookup: Lookup,
}

impl From<TableParts> for MappingTable {
    fn from(parts: TableParts) -> Self {
        MappingTable::new(parts.axes, parts.buttons)
    }
}

impl From<MappingTable> for TableParts {
    fn from(table: MappingTable) -> Self {
        TableParts {
            axes: table.axes,
            buttons: table.buttons,
        }
    }
}

impl MappingTable {
    pub fn new(axes: Vec<Actuator>, buttons: Vec<Actuator>) -> Self {
        let axis_lookup = Lookup::build(&axes, "axes");
        let button_lookup = Lookup::build(&buttons, "buttons");
        Self {
            axes,
            buttons,
            axis_lookup,
            button_lookup,
        }
    }

    /// Axis actuators in construction order.
    pub fn axes(&self) -> &[Actuator] {
        &self.axes
    }

    /// Button, D-pad and trigger actuators in construction order.
    ///
    /// This is the order in which a tick is diffed.
    pub fn buttons(&self) -> &[Actuator] {
        &self.buttons
    }

    pub fn axis_by_name(&self, name: impl AsRef<str>) -> Option<&Actuator> {
        Self::by_name(&self.axes, &self.axis_lookup, name.as_ref())
    }

    pub fn axis_by_index(&self, index: usize) -> Option<&Actuator> {
        Self::by_index(&self.axes, &self.axis_lookup, index)
    }

    pub fn button_by_name(&self, name: impl AsRef<str>) -> Option<&Actuator> {
        Self::by_name(&self.buttons, &self.button_lookup, name.as_ref())
    }

    pub fn button_by_index(&self, index: usize) -> Option<&Actuator> {
        Self::by_index(&self.buttons, &self.button_lookup, index)
    }

    /// Raw indices of the four stick axes.
    ///
    /// Any stick axis missing from the table falls back to `0`, `1`, `2`, `3`
    /// (left X, left Y, right X, right Y).
    pub fn stick_axes(&self) -> StickAxes {
        let fallback = StickAxes::default();
        let index_of = |name: ActuatorName, default: usize| {
            self.axis_by_name(name).map_or(default, Actuator::index)
        };
        StickAxes {
            left_x: index_of(ActuatorName::LeftStickAxisX, fallback.left_x),
            left_y: index_of(ActuatorName::LeftStickAxisY, fallback.left_y),
            right_x: index_of(ActuatorName::RightStickAxisX, fallback.right_x),
            right_y: index_of(ActuatorName::RightStickAxisY, fallback.right_y),
        }
    }

    /// Pretty JSON rendering of the table, for diagnostics and device reports.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn by_name<'a>(actuators: &'a [Actuator], lookup: &Lookup, name: &str) -> Option<&'a Actuator> {
        let name: ActuatorName = name.parse().ok()?;
        lookup.by_name.get(&name).map(|&pos| &actuators[pos])
    }

    fn by_index<'a>(actuators: &'a [Actuator], lookup: &Lookup, index: usize) -> Option<&'a Actuator> {
        lookup.by_index.get(&index).map(|&pos| &actuators[pos])
    }
}
