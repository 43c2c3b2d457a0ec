//! Source identity and the work record moved between contexts.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for an event source.
///
/// Source ids are small numeric identifiers unique within one pipeline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u16);

impl From<u16> for SourceId {
    #[inline]
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SRC({:#06x})", self.0)
    }
}

/// Re-arm configuration carried as plain data.
///
/// The record carries a copy of the interval instead of a reference back
/// into the source's own arm state, so a handler re-arming while the next
/// trigger is being set up never aliases live configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rearm {
    pub ticks: u64,
}

impl Rearm {
    pub const fn new(ticks: u64) -> Self {
        Self { ticks }
    }
}

/// One pending deferred event.
///
/// Owned by the dispatcher until handed to the queue, then by the queue
/// until the handler returns, after which it is discarded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub source: SourceId,
    pub rearm: Option<Rearm>,
}

impl EventRecord {
    /// A record with no context data.
    pub const fn bare(source: SourceId) -> Self {
        Self {
            source,
            rearm: None,
        }
    }

    /// A record carrying the interval the handler should re-arm with.
    pub const fn with_rearm(source: SourceId, ticks: u64) -> Self {
        Self {
            source,
            rearm: Some(Rearm::new(ticks)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(SourceId(0x42).to_string(), "SRC(0x0042)");
    }

    #[test]
    fn record_carries_rearm() {
        let record = EventRecord::with_rearm(SourceId(1), 1000);
        assert_eq!(record.rearm, Some(Rearm::new(1000)));
        assert_eq!(EventRecord::bare(SourceId(1)).rearm, None);
    }
}
