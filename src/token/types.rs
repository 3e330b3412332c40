//! Token types

use crate::pagination::PageTarget;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const ACTIVE: u8 = 0;
const CONSUMED: u8 = 1;
const CANCELED: u8 = 2;

/// Identity of a request token, unique within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Fetch outstanding
    Active,
    /// Response processed
    Consumed,
    /// Canceled or superseded, any response is ignored
    Canceled,
}

impl TokenState {
    fn from_u8(value: u8) -> Self {
        match value {
            ACTIVE => Self::Active,
            CONSUMED => Self::Consumed,
            _ => Self::Canceled,
        }
    }
}

/// Handle for exactly one outstanding fetch
///
/// Clones share the same state, so the fetch task and the registry observe
/// the same transitions.
#[derive(Clone)]
pub struct RequestToken {
    id: TokenId,
    target: PageTarget,
    state: Arc<AtomicU8>,
}

impl RequestToken {
    pub(crate) fn new(id: TokenId, target: PageTarget) -> Self {
        Self {
            id,
            target,
            state: Arc::new(AtomicU8::new(ACTIVE)),
        }
    }

    /// Token id
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Parameters captured when the fetch was issued
    pub fn target(&self) -> &PageTarget {
        &self.target
    }

    /// Current state
    pub fn state(&self) -> TokenState {
        TokenState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if the fetch is still wanted
    pub fn is_active(&self) -> bool {
        self.state() == TokenState::Active
    }

    /// Check if the token was canceled
    pub fn is_canceled(&self) -> bool {
        self.state() == TokenState::Canceled
    }

    /// Transition ACTIVE -> CANCELED, returns false if already terminal
    pub fn cancel(&self) -> bool {
        self.transition(CANCELED)
    }

    /// Transition ACTIVE -> CONSUMED, returns false if already terminal
    pub(crate) fn consume(&self) -> bool {
        self.transition(CONSUMED)
    }

    fn transition(&self, to: u8) -> bool {
        self.state
            .compare_exchange(ACTIVE, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestToken")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("state", &self.state())
            .finish()
    }
}
