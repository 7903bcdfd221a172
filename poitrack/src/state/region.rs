//! Region transitions.

use std::fmt;

use serde_json::{Map, Value};

use crate::poi::Poi;

/// Event-data key holding the POI that triggered a transition.
pub const KEY_TRIGGERING_REGION: &str = "triggeringregion";
/// Event-data key holding the transition kind.
pub const KEY_REGION_EVENT_TYPE: &str = "regioneventtype";
/// Event-data key holding the transition time (Unix seconds).
pub const KEY_TIMESTAMP: &str = "timestamp";

/// Boundary crossing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Entry,
    Exit,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Entry => "entry",
            TransitionKind::Exit => "exit",
        }
    }

    /// `"entry"` or `"exit"`; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entry" => Some(TransitionKind::Entry),
            "exit" => Some(TransitionKind::Exit),
            _ => None,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a processed region event.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTransition {
    /// The cached POI after the transition was applied.
    pub poi: Poi,
    pub kind: TransitionKind,
    /// Unix seconds.
    pub timestamp: i64,
}

impl RegionTransition {
    pub fn to_event_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(
            KEY_TRIGGERING_REGION.to_string(),
            serde_json::to_value(&self.poi).unwrap_or(Value::Null),
        );
        data.insert(
            KEY_REGION_EVENT_TYPE.to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        data.insert(KEY_TIMESTAMP.to_string(), Value::from(self.timestamp));
        data
    }
}
