//! Actuator descriptors.
//!
//! An [`Actuator`] describes one physical control on a DualShock pad: a face button, a
//! D-pad direction, an analog trigger or a stick axis. Descriptors are immutable and are
//! created by the layout tables in [`crate::layout`].
//!
//! ## Index spaces
//! Axis actuators index into the raw **axis** snapshot; every other kind indexes into the raw
//! **button** snapshot. The two index spaces are independent, so axis `2` and button `2`
//! are unrelated controls.
//!
//! ## Kind-tagged views
//! Callbacks and channels receive a wrapper that pins the kind of the actuator:
//! [`ButtonActuator`], [`DPadActuator`], [`TriggerActuator`] and [`AxisActuator`]. All of them
//! dereference to [`Actuator`]. Use [`Actuator::typed`] to obtain one from a plain descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::PadError;

/// Category of a physical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActuatorKind {
    Button,
    DPad,
    Trigger,
    Axis,
}

/// Which raw snapshot an actuator reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActuatorGroup {
    Axes,
    Buttons,
}

macro_rules! actuator_names {
    ($($variant:ident),+ $(,)?) => {
        /// Symbolic names of every control found on DualShock 3 and DualShock 4 pads.
        ///
        /// `Display` and `FromStr` use the exact variant spelling (`"LeftStickAxisX"`, `"Ps"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ActuatorName {
            $($variant),+
        }

        impl ActuatorName {
            /// All names, in declaration order.
            pub const ALL: &'static [ActuatorName] = &[$(ActuatorName::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ActuatorName::$variant => stringify!($variant)),+
                }
            }
        }

        impl FromStr for ActuatorName {
            type Err = PadError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(ActuatorName::$variant),)+
                    other => Err(PadError::UnknownName(other.to_string())),
                }
            }
        }
    };
}

actuator_names!(
    LeftStickAxisX,
    LeftStickAxisY,
    RightStickAxisX,
    RightStickAxisY,
    X,
    Circle,
    Square,
    Triangle,
    L1,
    R1,
    L2,
    R2,
    Select,
    Start,
    Share,
    Options,
    LeftStick,
    RightStick,
    Up,
    Down,
    Left,
    Right,
    Ps,
    TouchPad,
);

impl fmt::Display for ActuatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ActuatorName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Immutable description of one physical control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actuator {
    name: ActuatorName,
    index: usize,
    kind: ActuatorKind,
    rest_value: f64,
    active_value: f64,
}

impl Actuator {
    /// Descriptor with the default thresholds: rest `0.0`, active `1.0`.
    pub const fn new(name: ActuatorName, index: usize, kind: ActuatorKind) -> Self {
        Self::with_values(name, index, kind, 0.0, 1.0)
    }

    pub const fn with_values(
        name: ActuatorName,
        index: usize,
        kind: ActuatorKind,
        rest_value: f64,
        active_value: f64,
    ) -> Self {
        Self {
            name,
            index,
            kind,
            rest_value,
            active_value,
        }
    }

    #[inline]
    pub fn name(&self) -> ActuatorName {
        self.name
    }

    /// Position in the raw axis or button snapshot (see [`Actuator::group`]).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn kind(&self) -> ActuatorKind {
        self.kind
    }

    /// Value reported while the control is not engaged.
    #[inline]
    pub fn rest_value(&self) -> f64 {
        self.rest_value
    }

    /// Value reported while the control is fully engaged.
    #[inline]
    pub fn active_value(&self) -> f64 {
        self.active_value
    }

    #[inline]
    pub fn group(&self) -> ActuatorGroup {
        match self.kind {
            ActuatorKind::Axis => ActuatorGroup::Axes,
            _ => ActuatorGroup::Buttons,
        }
    }

    /// Wrap this descriptor in the view matching its kind.
    pub fn typed(self) -> TypedActuator {
        match self.kind {
            ActuatorKind::Button => TypedActuator::Button(ButtonActuator(self)),
            ActuatorKind::DPad => TypedActuator::DPad(DPadActuator(self)),
            ActuatorKind::Trigger => TypedActuator::Trigger(TriggerActuator(self)),
            ActuatorKind::Axis => TypedActuator::Axis(AxisActuator(self)),
        }
    }
}

macro_rules! kind_view {
    ($(#[$doc:meta])* $view:ident => $kind:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "Actuator")]
        pub struct $view(Actuator);

        impl TryFrom<Actuator> for $view {
            type Error = PadError;

            fn try_from(actuator: Actuator) -> Result<Self, PadError> {
                if actuator.kind == ActuatorKind::$kind {
                    Ok($view(actuator))
                } else {
                    Err(PadError::KindMismatch {
                        name: actuator.name,
                        expected: ActuatorKind::$kind,
                        found: actuator.kind,
                    })
                }
            }
        }

        impl $view {
            pub fn actuator(&self) -> &Actuator {
                &self.0
            }
        }

        impl Deref for $view {
            type Target = Actuator;

            fn deref(&self) -> &Actuator {
                &self.0
            }
        }
    };
}

kind_view!(
    /// An [`Actuator`] known to be of kind [`ActuatorKind::Button`].
    ButtonActuator => Button
);
kind_view!(
    /// An [`Actuator`] known to be of kind [`ActuatorKind::DPad`].
    DPadActuator => DPad
);
kind_view!(
    /// An [`Actuator`] known to be of kind [`ActuatorKind::Trigger`].
    TriggerActuator => Trigger
);
kind_view!(
    /// An [`Actuator`] known to be of kind [`ActuatorKind::Axis`].
    AxisActuator => Axis
);

/// An actuator paired with the view of its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedActuator {
    Button(ButtonActuator),
    DPad(DPadActuator),
    Trigger(TriggerActuator),
    Axis(AxisActuator),
}

impl TypedActuator {
    pub fn actuator(&self) -> &Actuator {
        match self {
            TypedActuator::Button(a) => a.actuator(),
            TypedActuator::DPad(a) => a.actuator(),
            TypedActuator::Trigger(a) => a.actuator(),
            TypedActuator::Axis(a) => a.actuator(),
        }
    }
}

/// Caller-supplied identifier: a symbolic name or a raw index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActuatorId {
    Name(String),
    Index(usize),
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorId::Name(name) => write!(f, "alias {name}"),
            ActuatorId::Index(index) => write!(f, "index {index}"),
        }
    }
}

impl From<&str> for ActuatorId {
    fn from(name: &str) -> Self {
        ActuatorId::Name(name.to_string())
    }
}

impl From<String> for ActuatorId {
    fn from(name: String) -> Self {
        ActuatorId::Name(name)
    }
}

impl From<ActuatorName> for ActuatorId {
    fn from(name: ActuatorName) -> Self {
        ActuatorId::Name(name.as_str().to_string())
    }
}

impl From<usize> for ActuatorId {
    fn from(index: usize) -> Self {
        ActuatorId::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_strings() {
        for &name in ActuatorName::ALL {
            assert_eq!(name.as_str().parse::<ActuatorName>().unwrap(), name);
        }
        assert_eq!(ActuatorName::LeftStickAxisX.to_string(), "LeftStickAxisX");
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "Cross".parse::<ActuatorName>().unwrap_err();
        assert!(matches!(err, PadError::UnknownName(ref s) if s == "Cross"));
    }

    #[test]
    fn default_thresholds() {
        let a = Actuator::new(ActuatorName::L1, 4, ActuatorKind::Button);
        assert_eq!(a.rest_value(), 0.0);
        assert_eq!(a.active_value(), 1.0);
        assert_eq!(a.group(), ActuatorGroup::Buttons);
    }

    #[test]
    fn typed_view_follows_kind() {
        let trigger = Actuator::new(ActuatorName::R2, 7, ActuatorKind::Trigger);
        match trigger.typed() {
            TypedActuator::Trigger(t) => assert_eq!(t.index(), 7),
            other => panic!("unexpected view {other:?}"),
        }

        let axis = Actuator::new(ActuatorName::RightStickAxisY, 5, ActuatorKind::Axis);
        assert_eq!(axis.group(), ActuatorGroup::Axes);
        assert_eq!(axis.typed().actuator(), &axis);
    }

    #[test]
    fn kind_views_reject_mismatched_kinds() {
        let json = serde_json::to_string(&Actuator::new(ActuatorName::R2, 7, ActuatorKind::Trigger))
            .unwrap();

        let trigger: TriggerActuator = serde_json::from_str(&json).unwrap();
        assert_eq!(trigger.name(), ActuatorName::R2);

        let err = serde_json::from_str::<ButtonActuator>(&json).unwrap_err();
        assert!(err.to_string().contains("expected Button, found Trigger"));
        assert!(ButtonActuator::try_from(*trigger).is_err());
    }

    #[test]
    fn id_display_names_the_lookup() {
        assert_eq!(ActuatorId::from("Foo").to_string(), "alias Foo");
        assert_eq!(ActuatorId::from(999usize).to_string(), "index 999");
        assert_eq!(
            ActuatorId::from(ActuatorName::Ps),
            ActuatorId::Name("Ps".into())
        );
    }
}
