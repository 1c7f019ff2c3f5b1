#![forbid(unsafe_code)]

//! Guided-tour curtain: a darkened mask with one cut-out hole and a callout.
//!
//! # Components
//! - [`mask`]: the viewport-covering path with a single rectangular hole,
//!   animated between holes with interruptible linear transitions.
//! - [`placement`]: side selection (bottom, right, left, top) and clamping of
//!   the callout to the viewport margins.
//! - [`markup`]: the single `**` emphasis split for callout text.
//! - [`curtain`]: lifecycle, the reveal flow, and resize handling.
//! - [`host`]: the collaborator traits an embedding application implements.
//!
//! # Example
//!
//! ```ignore
//! use curtain_core::{Rect, Size, window::Window};
//! use curtain_widgets::{Curtain, RevealOptions};
//!
//! let window = Window::new(Size::new(1200.0, 800.0));
//! let curtain = Curtain::attach(host, &window)?;
//! curtain.reveal(Rect::new(10.0, 10.0, 50.0, 20.0), Some("Start **here**"), &RevealOptions::new())?;
//! curtain.remove();
//! ```

pub mod config;
pub mod curtain;
pub mod error;
pub mod host;
pub mod markup;
pub mod mask;
pub mod placement;

pub use config::CurtainConfig;
#[cfg(feature = "config")]
pub use config::ConfigError;
pub use curtain::{Curtain, RevealOptions, TooltipHandle};
pub use error::{CurtainError, Result};
pub use host::{Element, Host, NodeId, Patch, Target};
pub use placement::{Placement, PlacementPolicy, Side};
