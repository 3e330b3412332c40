//! Cancellation registry
//!
//! Holds the single active token of a session.

use super::types::{RequestToken, TokenId};
use crate::pagination::PageTarget;
use tracing::debug;

/// Issues tokens and tracks which one is active
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    next_id: u64,
    active: Option<RequestToken>,
}

impl CancellationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new fetch, superseding any active one
    pub fn issue(&mut self, target: PageTarget) -> RequestToken {
        if let Some(previous) = self.active.take() {
            if previous.cancel() {
                debug!(token = %previous.id(), "Superseded active request");
            }
        }

        self.next_id += 1;
        let token = RequestToken::new(TokenId(self.next_id), target);
        self.active = Some(token.clone());
        token
    }

    /// Cancel the active token, if any
    pub fn cancel(&mut self) -> Option<RequestToken> {
        let token = self.active.take()?;
        token.cancel();
        Some(token)
    }

    /// Accept a completion for `token`
    ///
    /// Returns true exactly once, and only for the token that is currently
    /// active. Canceled, superseded and already consumed tokens are refused.
    pub fn consume(&mut self, token: &RequestToken) -> bool {
        let is_current = self
            .active
            .as_ref()
            .is_some_and(|active| active.id() == token.id());
        if !is_current || !token.consume() {
            return false;
        }
        self.active = None;
        true
    }

    /// The active token
    pub fn active(&self) -> Option<&RequestToken> {
        self.active.as_ref()
    }

    /// Check if a fetch is outstanding
    pub fn has_active(&self) -> bool {
        self.active.as_ref().is_some_and(RequestToken::is_active)
    }
}
