//! Request tokens
//!
//! Every fetch is tagged with a [`RequestToken`]. The controller only acts on
//! a completion whose token it can still consume, which is how stale and
//! canceled responses are recognised and dropped.
//!
//! ```text
//!            consume()
//!   ACTIVE ────────────▶ CONSUMED
//!      │
//!      └───────────────▶ CANCELED
//!            cancel() / superseded
//! ```

mod registry;
mod types;

pub use registry::CancellationRegistry;
pub use types::{RequestToken, TokenId, TokenState};
