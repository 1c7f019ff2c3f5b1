#![forbid(unsafe_code)]

//! Scripted tour runner.
//!
//! Mounts a curtain on an in-memory page, plays a short onboarding tour, and
//! prints one JSON object per step to stdout.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -p curtain-harness
//! ```

use std::process::ExitCode;
use std::time::Duration;

use curtain_core::window::Window;
use curtain_core::{Rect, Size};
use curtain_harness::RecordingHost;
use curtain_harness::tour::{self, TourStep};
use curtain_widgets::{Curtain, RevealOptions};

fn main() -> ExitCode {
    curtain_core::logging::init_json_logging();

    let window = Window::new(Size::new(1200.0, 800.0));
    let mut host = RecordingHost::new();
    host.add_element("#menu", Rect::new(10.0, 10.0, 50.0, 20.0));
    host.add_element("#sidebar", Rect::new(50.0, 400.0, 100.0, 50.0));
    host.add_element("#inspector", Rect::new(800.0, 400.0, 100.0, 50.0));
    host.add_element("#footer", Rect::new(100.0, 700.0, 900.0, 60.0));

    let curtain = match Curtain::attach(host, &window) {
        Ok(curtain) => curtain,
        Err(err) => {
            eprintln!("attach failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let steps = [
        TourStep::reveal("#menu", Some("Open the **menu**")),
        TourStep::Wait(Duration::from_millis(600)),
        TourStep::reveal("#sidebar", Some("Your layers live in the **sidebar**")),
        TourStep::Reveal {
            selector: "#inspector".to_owned(),
            text: Some("Edit **properties** here".to_owned()),
            options: RevealOptions::new().tooltip_class("intro"),
        },
        TourStep::Resize(Size::new(1000.0, 700.0)),
        TourStep::reveal("#footer", Some("That's it!")),
        TourStep::reveal("#footer", None),
    ];

    match tour::run(&curtain, &window, &steps) {
        Ok(records) => {
            print!("{}", tour::to_jsonl(&records));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tour failed: {err}");
            ExitCode::FAILURE
        }
    }
}
