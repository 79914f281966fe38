use dualshock_map::backends::virtual_input::VirtualGamepad;
use dualshock_map::{PadConfig, PadEvent, PadManager};

fn main() {
    tracing_subscriber::fmt().init();

    let mut manager = PadManager::<VirtualGamepad>::new(PadConfig::default());
    let id = "054c-05c4-Wireless Controller";

    // Raw (non-standard) DualShock 4: 6 axes, 18 buttons.
    if let Err(e) = manager.attach(VirtualGamepad::new(id, "").with_slots(6, 18)) {
        eprintln!("attach failed: {e}");
        return;
    }
    if let Some(pad) = manager.pad_mut(id) {
        pad.on_button_down(|button| println!("(callback) {} down", button.name()));
    }

    // Each step is one polling cycle.
    let steps: &[&[(usize, f64)]] = &[
        &[(1, 1.0)],            // X pressed
        &[(1, 0.0), (7, 0.4)],  // X released, R2 half way
        &[(14, 1.0), (7, 1.0)], // D-pad up, R2 fully
        &[(14, 0.0), (7, 0.0)],
    ];

    for (tick, changes) in steps.iter().enumerate() {
        if let Some(gamepad) = manager.gamepad_mut(id) {
            for &(button, value) in changes.iter() {
                gamepad.set_button(button, value);
            }
        }
        for tagged in manager.update_all() {
            match tagged.event {
                PadEvent::ButtonDown(b) => println!("[{tick}] {} pressed", b.name()),
                PadEvent::ButtonUp(b) => println!("[{tick}] {} released", b.name()),
                PadEvent::PadDown(d) => println!("[{tick}] D-pad {} pressed", d.name()),
                PadEvent::PadUp(d) => println!("[{tick}] D-pad {} released", d.name()),
                PadEvent::TriggerChanged(t) => {
                    println!("[{tick}] {} = {:.2}", t.actuator.name(), t.value)
                }
            }
        }
    }

    if let Some(pad) = manager.pad(id) {
        match pad.mapping().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{e}"),
        }
    }
    manager.detach(id);
}
