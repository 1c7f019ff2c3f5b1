#![forbid(unsafe_code)]

//! Curtain error model.
//!
//! The overlay is a best-effort visual layer, so few things are errors:
//! oversized callouts and odd markup degrade gracefully and never reach this
//! module. What remains are caller contract violations that would otherwise
//! surface as undefined geometry.

use curtain_core::event::ListenerError;

use crate::host::NodeId;

/// Errors returned by [`crate::Curtain`] operations.
#[derive(Debug, thiserror::Error)]
pub enum CurtainError {
    /// A selector target matched no element.
    #[error("selector `{0}` matched no element")]
    TargetNotFound(String),
    /// The element has no measurable bounding box (detached, `display: none`).
    #[error("element {0} has no measurable bounding box")]
    NoBoundingBox(NodeId),
    /// The curtain was already removed.
    #[error("curtain is not attached")]
    Detached,
    /// The resize listener could not be (de)registered.
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

impl CurtainError {
    /// Error type label for tracing fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) | Self::NoBoundingBox(_) => "target",
            Self::Detached => "lifecycle",
            Self::Listener(_) => "listener",
        }
    }
}

/// Standard result type for curtain APIs.
pub type Result<T> = std::result::Result<T, CurtainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CurtainError::TargetNotFound("#save".into()).to_string(),
            "selector `#save` matched no element"
        );
        assert_eq!(
            CurtainError::NoBoundingBox(NodeId::new(7)).to_string(),
            "element #7 has no measurable bounding box"
        );
        assert_eq!(CurtainError::Detached.to_string(), "curtain is not attached");
    }

    #[test]
    fn listener_errors_convert() {
        let err: CurtainError = ListenerError::Empty.into();
        assert_eq!(err.error_type(), "listener");
        assert_eq!(err.to_string(), "listener name is empty");
    }
}
