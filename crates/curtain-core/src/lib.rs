#![forbid(unsafe_code)]

//! Core: geometry, transitions, and viewport events for the curtain overlay.
//!
//! # Role
//! `curtain-core` holds everything the overlay needs that does not depend on
//! a host surface: viewport-space rectangles, interruptible transitions used
//! to animate the mask hole, and the [`window::Window`] event target that
//! delivers resize notifications to namespaced listeners.
//!
//! # How it fits
//! `curtain-widgets` builds the mask renderer, tooltip placer, and lifecycle
//! controller on top of these types. Hosts only touch `curtain-core` to create
//! a [`window::Window`] and to forward resize events into it.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod window;

pub use geometry::{Point, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
