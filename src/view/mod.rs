//! View collaborator module
//!
//! What the controller talks to on the presentation side:
//! - `FeedView` - indicator toggles and per-fetch notifications
//! - `PhotoList` - the bound, ordered item collection
//! - `EventLog` - a `FeedView` that records every notification

mod types;

pub use types::{EventLog, FeedView, PhotoList, ViewEvent};
