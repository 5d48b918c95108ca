//! Recording sink — captures emitted game events for assertions.

use snitch_engine::{GameEvent, NotificationSink};
use std::sync::Mutex;

/// A notification sink that stores every event it receives.
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
