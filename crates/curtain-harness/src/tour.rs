#![forbid(unsafe_code)]

//! Scripted tours with JSONL snapshots.
//!
//! A tour is a list of [`TourStep`]s played against a [`Curtain`] mounted on a
//! [`RecordingHost`]. After each step the harness emits one JSON object with
//! a stable schema:
//!
//! ```json
//! {"event":"step","step":0,"selector":"#save","side":"bottom","x":10.0,"y":30.0,"visible":true,"class":"curtain-tooltip tooltip in bottom","path":"M0,0..."}
//! {"event":"resize","width":900.0,"height":700.0,"path":"M0,0..."}
//! {"event":"complete","steps":3,"live_nodes":0}
//! ```

use std::time::Duration;

use curtain_core::Size;
use curtain_core::window::Window;
use curtain_widgets::{Curtain, Result, RevealOptions};
use serde_json::{Value, json};

use crate::RecordingHost;

/// One action in a scripted tour.
#[derive(Debug, Clone, PartialEq)]
pub enum TourStep {
    /// Reveal the element behind `selector` with optional text.
    Reveal {
        selector: String,
        text: Option<String>,
        options: RevealOptions,
    },
    /// Resize the window.
    Resize(Size),
    /// Let the mask animation run for a while.
    Wait(Duration),
}

impl TourStep {
    /// Convenience constructor for a reveal step with default options.
    pub fn reveal(selector: &str, text: Option<&str>) -> Self {
        Self::Reveal {
            selector: selector.to_owned(),
            text: text.map(str::to_owned),
            options: RevealOptions::new(),
        }
    }
}

/// Play `steps` and return one snapshot per step plus a completion record.
///
/// The curtain is removed at the end; the completion record reports how
/// many curtain nodes are still mounted (always zero on success).
pub fn run(curtain: &Curtain<RecordingHost>, window: &Window, steps: &[TourStep]) -> Result<Vec<Value>> {
    let mut records = Vec::with_capacity(steps.len() + 1);
    for (index, step) in steps.iter().enumerate() {
        let record = match step {
            TourStep::Reveal {
                selector,
                text,
                options,
            } => {
                let handle = curtain.reveal(selector.as_str(), text.as_deref(), options)?;
                curtain.with_host(|host| {
                    json!({
                        "event": "step",
                        "step": index,
                        "selector": selector,
                        "side": handle.side.map(|s| s.class_name()),
                        "x": handle.position.map(|p| p.x),
                        "y": handle.position.map(|p| p.y),
                        "visible": handle.visible,
                        "class": host.tooltip_class(),
                        "path": host.mask_path(),
                    })
                })
            }
            TourStep::Resize(size) => {
                window.resize(*size);
                curtain.with_host(|host| {
                    json!({
                        "event": "resize",
                        "width": size.width,
                        "height": size.height,
                        "path": host.mask_path(),
                    })
                })
            }
            TourStep::Wait(dt) => {
                curtain.tick(*dt);
                curtain.with_host(|host| {
                    json!({
                        "event": "wait",
                        "ms": dt.as_millis() as u64,
                        "path": host.mask_path(),
                    })
                })
            }
        };
        tracing::debug!(step = index, "tour step recorded");
        records.push(record);
    }
    curtain.remove();
    records.push(json!({
        "event": "complete",
        "steps": steps.len(),
        "live_nodes": curtain.with_host(RecordingHost::live_curtain_nodes),
    }));
    Ok(records)
}

/// Serialize records as JSON Lines.
pub fn to_jsonl(records: &[Value]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}
