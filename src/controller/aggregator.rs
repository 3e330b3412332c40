//! Merging fetched pages into the bound list

use super::types::{Outcome, Session};
use crate::config::FeedbackMessages;
use crate::error::Error;
use crate::gateway::PageResponse;
use crate::pagination::PageIndexStrategy;
use crate::token::RequestToken;
use crate::view::{FeedView, PhotoList};
use tracing::{debug, info, warn};

/// Applies accepted completions to the session, list and view
///
/// Callers must have consumed the token first; stale tokens never get here.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    page_size: u32,
    messages: FeedbackMessages,
}

impl ResultAggregator {
    pub fn new(page_size: u32, messages: FeedbackMessages) -> Self {
        Self {
            page_size,
            messages,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Merge a page that reached the server
    pub fn merge<V: FeedView, L: PhotoList>(
        &self,
        session: &mut Session,
        strategy: &dyn PageIndexStrategy,
        token: &RequestToken,
        response: PageResponse,
        view: &mut V,
        list: &mut L,
    ) -> Outcome {
        let target = token.target();
        stop_indicator(session, target.refresh, view);

        let prior = list.count();
        let fetched = response.photos.len();
        if !response.successful || prior + fetched == 0 {
            debug!(token = %token.id(), page = target.page, "Nothing to show");
            view.request_failed(&self.messages.load_nothing);
            return Outcome::Empty;
        }

        strategy.advance(&mut session.paging, target);
        if target.refresh {
            list.clear();
            set_exhausted(session, false, view);
        }
        for photo in response.photos {
            list.insert(photo);
        }

        let exhausted = fetched < self.page_size as usize;
        if exhausted {
            info!(page = target.page, fetched, "Reached end of feed");
            set_exhausted(session, true, view);
        }

        debug!(
            token = %token.id(),
            page = target.page,
            fetched,
            total = list.count(),
            "Merged page"
        );
        view.request_success();
        Outcome::Success { fetched, exhausted }
    }

    /// Surface a transport failure
    pub fn fail<V: FeedView>(
        &self,
        session: &mut Session,
        token: &RequestToken,
        error: &Error,
        view: &mut V,
    ) -> Outcome {
        stop_indicator(session, token.target().refresh, view);

        warn!(token = %token.id(), page = token.target().page, error = %error, "Photo request failed");
        view.request_failed(&format!("{} ({error})", self.messages.load_failed));
        Outcome::Failed
    }
}

/// Clear the in-flight state and switch the matching indicator off
fn stop_indicator<V: FeedView>(session: &mut Session, refresh: bool, view: &mut V) {
    session.finish();
    if refresh {
        view.set_refreshing(false);
    } else {
        view.set_loading(false);
    }
}

/// Update exhaustion and mirror it to the view's load-more trigger
pub(crate) fn set_exhausted<V: FeedView>(session: &mut Session, exhausted: bool, view: &mut V) {
    session.exhausted = exhausted;
    view.set_permit_loading(!exhausted);
}
