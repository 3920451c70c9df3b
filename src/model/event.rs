//! Text events.

use super::Tick;

/// A free-form text at a tick, such as a section name, a lyric or a local chart marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEvent {
    /// Where the event happens.
    pub tick: Tick,
    /// The event text, without surrounding quotes or brackets.
    pub text: String,
}

impl TextEvent {
    /// Creates a new text event.
    pub fn new(tick: Tick, text: impl Into<String>) -> Self {
        Self {
            tick,
            text: text.into(),
        }
    }
}
