#![forbid(unsafe_code)]

//! Viewport events and listener names.
//!
//! Listener names use the `"<event>.<namespace>"` form so that each overlay
//! instance can register and later remove exactly its own listener without
//! touching anyone else's handler for the same event.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Size;

/// Event delivered to window listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The viewport was resized.
    Resize(Size),
}

impl Event {
    /// The type of this event, for listener matching.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Resize(_) => EventType::Resize,
        }
    }
}

/// Kinds of events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Viewport size changes.
    Resize,
}

impl EventType {
    /// The wire name used in listener names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resize => "resize",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing listener names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    /// The name was empty (neither event type nor namespace).
    #[error("listener name is empty")]
    Empty,
    /// The event part of the name is not a known event type.
    #[error("unknown event type `{0}`")]
    UnknownEvent(String),
}

impl FromStr for EventType {
    type Err = ListenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resize" => Ok(Self::Resize),
            other => Err(ListenerError::UnknownEvent(other.to_owned())),
        }
    }
}

/// A parsed `"<event>.<namespace>"` listener name.
///
/// Either half may be missing: `"resize"` has no namespace, and `".curtain"`
/// (only valid for removal) addresses every event type in the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerName {
    event: Option<EventType>,
    namespace: Option<String>,
}

impl ListenerName {
    /// Build a name from parts.
    pub fn new(event: EventType, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            event: Some(event),
            namespace: (!namespace.is_empty()).then_some(namespace),
        }
    }

    /// The event type, if the name has one.
    pub fn event(&self) -> Option<EventType> {
        self.event
    }

    /// The namespace, if the name has one.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Whether a registration under `registered` is addressed by this name.
    ///
    /// Missing parts act as wildcards.
    pub fn matches(&self, registered: &ListenerName) -> bool {
        let event_ok = self.event.is_none_or(|e| registered.event == Some(e));
        let ns_ok = match &self.namespace {
            Some(ns) => registered.namespace.as_deref() == Some(ns.as_str()),
            None => true,
        };
        event_ok && ns_ok
    }
}

impl FromStr for ListenerName {
    type Err = ListenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (event, namespace) = match s.split_once('.') {
            Some((event, ns)) => (event, ns),
            None => (s, ""),
        };
        if event.is_empty() && namespace.is_empty() {
            return Err(ListenerError::Empty);
        }
        let event = if event.is_empty() {
            None
        } else {
            Some(event.parse()?)
        };
        Ok(Self {
            event,
            namespace: (!namespace.is_empty()).then(|| namespace.to_owned()),
        })
    }
}

impl fmt::Display for ListenerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(event) = self.event {
            write!(f, "{event}")?;
        }
        if let Some(ns) = &self.namespace {
            write!(f, ".{ns}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_name() {
        let name: ListenerName = "resize.curtain-1".parse().unwrap();
        assert_eq!(name.event(), Some(EventType::Resize));
        assert_eq!(name.namespace(), Some("curtain-1"));
        assert_eq!(name.to_string(), "resize.curtain-1");
    }

    #[test]
    fn parse_bare_event() {
        let name: ListenerName = "resize".parse().unwrap();
        assert_eq!(name.namespace(), None);
    }

    #[test]
    fn parse_namespace_only() {
        let name: ListenerName = ".curtain".parse().unwrap();
        assert_eq!(name.event(), None);
        assert!(name.matches(&ListenerName::new(EventType::Resize, "curtain")));
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert_eq!(
            "scroll.x".parse::<ListenerName>(),
            Err(ListenerError::UnknownEvent("scroll".into()))
        );
        assert_eq!("".parse::<ListenerName>(), Err(ListenerError::Empty));
        assert_eq!(".".parse::<ListenerName>(), Err(ListenerError::Empty));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let a = ListenerName::new(EventType::Resize, "curtain-1");
        let b = ListenerName::new(EventType::Resize, "curtain-2");
        assert!(!a.matches(&b));
        assert!(a.matches(&a.clone()));
    }

    #[test]
    fn event_type_of_resize() {
        let event = Event::Resize(Size::new(1.0, 2.0));
        assert_eq!(event.event_type(), EventType::Resize);
    }
}
