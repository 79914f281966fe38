//! Sony controller discovery through `hidapi`.
//!
//! This only identifies controllers; reading and decoding reports stays with the host. The id
//! string has the form `"{vid:04x}-{pid:04x}-{product}"` so it can be fed straight to
//! [`PadFamily::match_id`].

use hidapi::{DeviceInfo, HidApi};
use tracing::{debug, trace};

use crate::error::Result;
use crate::layout::PadFamily;

/// Sony Interactive Entertainment USB vendor id.
pub const SONY_VENDOR_ID: u16 = 0x054c;

/// A DualShock found on the HID bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedPad {
    pub id: String,
    pub family: PadFamily,
    pub product_string: Option<String>,
    pub path: String,
}

fn probe_entry(info: &DeviceInfo) -> Option<ProbedPad> {
    if info.vendor_id() != SONY_VENDOR_ID {
        return None;
    }
    let family = PadFamily::from_product_id(info.product_id())?;
    let product = info.product_string().map(str::to_string);
    Some(ProbedPad {
        id: format!(
            "{:04x}-{:04x}-{}",
            info.vendor_id(),
            info.product_id(),
            product.as_deref().unwrap_or("Unknown")
        ),
        family,
        product_string: product,
        path: info.path().to_string_lossy().to_string(),
    })
}

/// List DualShock 3/4 controllers visible to `api`.
pub fn probe_pads(api: &HidApi) -> Vec<ProbedPad> {
    let mut found = Vec::new();
    for info in api.device_list() {
        match probe_entry(info) {
            Some(pad) => {
                debug!(id = %pad.id, family = %pad.family, "found dualshock");
                found.push(pad);
            }
            None => trace!(
                vid = info.vendor_id(),
                pid = info.product_id(),
                "not a dualshock"
            ),
        }
    }
    found
}

/// Initialise `hidapi` and probe once.
pub fn discover() -> Result<Vec<ProbedPad>> {
    let api = HidApi::new()?;
    Ok(probe_pads(&api))
}
