//! Pad configuration.
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! # Force the raw layout even when the host claims "standard".
//! layout = "non-standard"
//! # Treat every attached device as a DualShock 4.
//! family = "DualShock4"
//! # Log every transition at info level.
//! log_transitions = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::device::RawGamepad;
use crate::error::{PadError, Result};
use crate::layout::{LayoutVariant, PadFamily};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PadConfig {
    /// Layout to use regardless of the host's mapping label.
    pub layout: Option<LayoutVariant>,
    /// Family to use regardless of the device id.
    pub family: Option<PadFamily>,
    /// Subscribe a [`TransitionLogger`](crate::logger::TransitionLogger) to each new pad.
    pub log_transitions: bool,
}

impl PadConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Family and layout for a host gamepad.
    ///
    /// Overrides win; otherwise the family comes from [`PadFamily::match_id`] and the layout
    /// from [`LayoutVariant::from_mapping`]. Fails with [`PadError::UnknownFamily`] when the id
    /// matches no supported controller and no family override is set. A detected id without the
    /// Sony vendor id ([`PadFamily::is_sony_id`]) is still accepted, with a warning.
    pub fn resolve(&self, gamepad: &dyn RawGamepad) -> Result<(PadFamily, LayoutVariant)> {
        let family = match self.family {
            Some(family) => family,
            None => {
                let id = gamepad.id();
                let family = PadFamily::match_id(id)
                    .ok_or_else(|| PadError::UnknownFamily(id.to_string()))?;
                if !PadFamily::is_sony_id(id) {
                    warn!(id, %family, "product id matched without the Sony vendor id");
                }
                family
            }
        };
        let layout = self
            .layout
            .unwrap_or_else(|| LayoutVariant::from_mapping(gamepad.mapping()));
        Ok((family, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualGamepad;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PadConfig::from_toml_str("").unwrap(), PadConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let cfg = PadConfig::from_toml_str(
            r#"
            layout = "non-standard"
            family = "DualShock3"
            log_transitions = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.layout, Some(LayoutVariant::NonStandard));
        assert_eq!(cfg.family, Some(PadFamily::DualShock3));
        assert!(cfg.log_transitions);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PadConfig::from_toml_str("deadzone = 0.1").unwrap_err();
        assert!(matches!(err, PadError::Config(_)));
    }

    #[test]
    fn resolve_prefers_overrides() {
        let gamepad = VirtualGamepad::new("054c-0268-PLAYSTATION(R)3", "standard");

        let detected = PadConfig::default().resolve(&gamepad).unwrap();
        assert_eq!(detected, (PadFamily::DualShock3, LayoutVariant::Standard));

        let forced = PadConfig {
            layout: Some(LayoutVariant::NonStandard),
            family: Some(PadFamily::DualShock4),
            ..PadConfig::default()
        };
        assert_eq!(
            forced.resolve(&gamepad).unwrap(),
            (PadFamily::DualShock4, LayoutVariant::NonStandard)
        );
    }

    #[test]
    fn resolve_accepts_product_match_without_vendor() {
        let gamepad = VirtualGamepad::new("Wireless Controller (PID 09cc)", "");
        assert_eq!(
            PadConfig::default().resolve(&gamepad).unwrap(),
            (PadFamily::DualShock4, LayoutVariant::NonStandard)
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PadConfig::load("/nonexistent/dualshock.toml").unwrap_err();
        assert!(matches!(err, PadError::Io(_)));
    }
}
