//! View traits and the recording view

use crate::types::Photo;
use serde::Serialize;

/// Notification sink for one feed
pub trait FeedView {
    /// Pull-to-refresh indicator
    fn set_refreshing(&mut self, refreshing: bool);

    /// Load-more indicator
    fn set_loading(&mut self, loading: bool);

    /// Enable or disable further load-more triggers
    fn set_permit_loading(&mut self, permit: bool);

    /// First population of a session has started
    fn init_refresh_start(&mut self) {}

    /// A fetch was merged into the list
    fn request_success(&mut self);

    /// A fetch produced nothing to show or failed
    fn request_failed(&mut self, message: &str);
}

/// Ordered item collection bound to the view
///
/// The controller only clears, appends and counts.
pub trait PhotoList {
    /// Remove all items
    fn clear(&mut self);

    /// Append one item
    fn insert(&mut self, photo: Photo);

    /// Number of items
    fn count(&self) -> usize;
}

impl PhotoList for Vec<Photo> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn insert(&mut self, photo: Photo) {
        self.push(photo);
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// A single view notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewEvent {
    Refreshing(bool),
    Loading(bool),
    PermitLoading(bool),
    InitRefreshStart,
    Success,
    Failed(String),
}

/// A view that records notifications in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ViewEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recent event
    pub fn last(&self) -> Option<&ViewEvent> {
        self.events.last()
    }

    /// Number of success or failure notifications
    pub fn terminal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Success | ViewEvent::Failed(_)))
            .count()
    }
}

impl FeedView for EventLog {
    fn set_refreshing(&mut self, refreshing: bool) {
        self.events.push(ViewEvent::Refreshing(refreshing));
    }

    fn set_loading(&mut self, loading: bool) {
        self.events.push(ViewEvent::Loading(loading));
    }

    fn set_permit_loading(&mut self, permit: bool) {
        self.events.push(ViewEvent::PermitLoading(permit));
    }

    fn init_refresh_start(&mut self) {
        self.events.push(ViewEvent::InitRefreshStart);
    }

    fn request_success(&mut self) {
        self.events.push(ViewEvent::Success);
    }

    fn request_failed(&mut self, message: &str) {
        self.events.push(ViewEvent::Failed(message.to_string()));
    }
}
