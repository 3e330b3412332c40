//! Pagination controller module
//!
//! Drives refresh and load-more for one photo list.
//!
//! # Overview
//!
//! The controller module provides:
//! - `PaginationController` - owns the session and orchestrates fetches
//! - `ResultAggregator` - merges accepted pages into the bound list
//! - `Session` / `Activity` - the idle / refreshing / loading state machine
//!
//! Fetches run as tokio tasks. Their completions come back over a channel
//! and are applied only when the controller itself pulls them with
//! [`PaginationController::next_completion`], so session state is never
//! touched concurrently. Each completion carries the token it was issued
//! under and is dropped unless that token is still the active one.

mod aggregator;
mod types;

pub use aggregator::ResultAggregator;
pub use types::{Activity, Completion, Outcome, Session};

use crate::config::{CategoryTotals, FeedConfig};
use crate::error::{Error, Result};
use crate::gateway::{FetchGateway, PageRequest, SessionId};
use crate::pagination::{NextPage, PageIndexStrategy, RandomPages, SequentialPages};
use crate::token::{CancellationRegistry, RequestToken, TokenId};
use crate::types::{FeedKind, PagingMode};
use crate::view::{FeedView, PhotoList};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Pagination controller for one photo list
///
/// Several controllers may share one gateway; each cancels only its own
/// fetches.
pub struct PaginationController<G: FetchGateway, V, L> {
    gateway: Arc<G>,
    session_id: SessionId,
    view: V,
    list: L,
    session: Session,
    registry: CancellationRegistry,
    aggregator: ResultAggregator,
    sequential: SequentialPages,
    random: RandomPages,
    totals: CategoryTotals,
    in_flight: Option<JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<G, V, L> PaginationController<G, V, L>
where
    G: FetchGateway,
    V: FeedView,
    L: PhotoList,
{
    /// Create a controller for the feed described by `config`
    pub fn new(gateway: Arc<G>, view: V, list: L, config: &FeedConfig) -> Self {
        let feed = &config.feed;
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let mut controller = Self {
            gateway,
            session_id: SessionId::next(),
            view,
            list,
            session: Session::new(feed.kind, feed.mode, feed.order.clone()),
            registry: CancellationRegistry::new(),
            aggregator: ResultAggregator::new(feed.page_size, config.messages.clone()),
            sequential: SequentialPages,
            random: RandomPages::new(config.categories.total_for(feed.kind), feed.page_size),
            totals: config.categories,
            in_flight: None,
            completions_tx,
            completions_rx,
        };
        controller.seed_sequence();
        controller
    }

    /// Use a fixed seed for random page sampling
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random = RandomPages::seeded(
            self.totals.total_for(self.session.feed),
            self.aggregator.page_size(),
            seed,
        );
        self.seed_sequence();
        self
    }

    /// Draw a page sequence so a random session never starts with an empty one
    fn seed_sequence(&mut self) {
        if self.session.mode == PagingMode::Random {
            self.session.paging.page_sequence = self.random.generate();
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Issue a fetch counting on from cursor value `from`
    ///
    /// Ignored while another fetch is outstanding. Must be called from within
    /// a tokio runtime. Returns the id of the issued token.
    pub fn request_page(&mut self, from: u32, refresh: bool) -> Option<TokenId> {
        if self.session.is_busy() {
            debug!(
                activity = ?self.session.activity,
                refresh,
                "Ignoring request while another is outstanding"
            );
            return None;
        }

        let strategy: &mut dyn PageIndexStrategy = match self.session.mode {
            PagingMode::Sequential => &mut self.sequential,
            PagingMode::Random => &mut self.random,
        };
        let target = match strategy.next_page(&mut self.session.paging, from, refresh) {
            NextPage::Fetch(target) => target,
            NextPage::Exhausted => {
                info!(from, "No pages left in sequence");
                if refresh {
                    self.view.set_refreshing(false);
                } else {
                    self.view.set_loading(false);
                }
                self.set_exhausted(true);
                return None;
            }
        };

        self.session.begin(refresh);
        self.abort_in_flight();
        let token = self.registry.issue(target);
        let request = PageRequest::for_target(
            self.session_id,
            self.session.feed,
            token.target(),
            self.aggregator.page_size(),
        );
        debug!(
            token = %token.id(),
            feed = %request.feed,
            page = request.page,
            order = %request.order,
            refresh,
            "Issuing photo request"
        );

        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();
        let task_token = token.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = gateway.fetch(request).await;
            if task_token.is_canceled() {
                return;
            }
            // The receiver only goes away with the controller
            let _ = tx.send(Completion {
                token: task_token,
                result,
            });
        }));

        Some(token.id())
    }

    /// Refresh the list from its first page
    pub fn refresh_new(&mut self, notify: bool) -> Option<TokenId> {
        if notify {
            self.view.set_refreshing(true);
        }
        self.request_page(self.session.paging.cursor, true)
    }

    /// Append the next page
    pub fn load_more(&mut self, notify: bool) -> Option<TokenId> {
        if !self.can_load_more() {
            debug!(
                activity = ?self.session.activity,
                exhausted = self.session.exhausted,
                "Load more not permitted"
            );
            return None;
        }
        if notify {
            self.view.set_loading(true);
        }
        self.request_page(self.session.paging.cursor, false)
    }

    /// First population of a session
    pub fn init_refresh(&mut self) -> Option<TokenId> {
        self.cancel();
        let token = self.refresh_new(false);
        self.view.init_refresh_start();
        token
    }

    /// Abandon the outstanding fetch, its completion will be ignored
    pub fn cancel(&mut self) {
        if let Some(token) = self.registry.cancel() {
            debug!(token = %token.id(), "Canceled photo request");
        }
        self.gateway.cancel(self.session_id);
        self.abort_in_flight();
        self.session.finish();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    // ========================================================================
    // Completions
    // ========================================================================

    /// Wait for the outstanding fetch and apply it
    ///
    /// Returns `None` when nothing is outstanding. Stale completions found
    /// on the way are dropped.
    pub async fn next_completion(&mut self) -> Option<Outcome> {
        loop {
            let completion = match self.completions_rx.try_recv() {
                Ok(completion) => completion,
                Err(_) if !self.registry.has_active() => return None,
                Err(_) => self.completions_rx.recv().await?,
            };
            match self.handle_completion(completion) {
                Outcome::Discarded => continue,
                outcome => return Some(outcome),
            }
        }
    }

    /// Apply one completion
    pub fn handle_completion(&mut self, completion: Completion) -> Outcome {
        let Completion { token, result } = completion;
        if !self.registry.consume(&token) {
            debug!(token = %token.id(), state = ?token.state(), "Discarding stale completion");
            return Outcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(response) => {
                let strategy: &dyn PageIndexStrategy = match token.target().mode {
                    PagingMode::Sequential => &self.sequential,
                    PagingMode::Random => &self.random,
                };
                self.aggregator.merge(
                    &mut self.session,
                    strategy,
                    &token,
                    response,
                    &mut self.view,
                    &mut self.list,
                )
            }
            Err(error) => self
                .aggregator
                .fail(&mut self.session, &token, &error, &mut self.view),
        }
    }

    // ========================================================================
    // Session mutators
    // ========================================================================

    /// Set the server sort key for sequential paging
    pub fn set_order(&mut self, order: impl Into<String>) {
        self.session.paging.order = order.into();
    }

    /// Switch paging mode, starting a new session generation
    pub fn set_mode(&mut self, mode: PagingMode) {
        if mode == self.session.mode {
            return;
        }
        self.cancel();
        self.session.mode = mode;
        self.reset_generation();
    }

    /// Switch feed, starting a new session generation
    pub fn set_feed(&mut self, feed: FeedKind) {
        if feed == self.session.feed {
            return;
        }
        self.cancel();
        self.session.feed = feed;
        self.random.set_total_items(self.totals.total_for(feed));
        self.reset_generation();
    }

    /// Overwrite the cursor
    pub fn set_page(&mut self, page: u32) {
        self.session.paging.cursor = page;
    }

    /// Overwrite the random page sequence
    pub fn set_page_sequence(&mut self, pages: Vec<u32>) -> Result<()> {
        if pages.is_empty() {
            return Err(Error::invalid_value(
                "page_sequence",
                "must contain at least one page",
            ));
        }
        self.session.paging.page_sequence = pages;
        Ok(())
    }

    /// Mark the feed exhausted or not, mirrored to the view
    pub fn set_exhausted(&mut self, exhausted: bool) {
        aggregator::set_exhausted(&mut self.session, exhausted, &mut self.view);
    }

    fn reset_generation(&mut self) {
        self.session.reset();
        self.seed_sequence();
        self.view.set_permit_loading(true);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn can_load_more(&self) -> bool {
        self.session.can_load_more()
    }

    pub fn is_refreshing(&self) -> bool {
        self.session.is_refreshing()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    pub fn activity(&self) -> Activity {
        self.session.activity()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cursor(&self) -> u32 {
        self.session.paging.cursor
    }

    pub fn page_sequence(&self) -> &[u32] {
        &self.session.paging.page_sequence
    }

    pub fn order(&self) -> &str {
        &self.session.paging.order
    }

    pub fn mode(&self) -> PagingMode {
        self.session.mode
    }

    pub fn feed(&self) -> FeedKind {
        self.session.feed
    }

    /// Id sent with every request of this session
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Token of the outstanding fetch
    pub fn active_token(&self) -> Option<&RequestToken> {
        self.registry.active()
    }

    /// Check if a fetch is outstanding
    pub fn has_pending(&self) -> bool {
        self.registry.has_active()
    }

    pub fn item_count(&self) -> usize {
        self.list.count()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn list(&self) -> &L {
        &self.list
    }
}

impl<G: FetchGateway, V, L> Drop for PaginationController<G, V, L> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        // Releases this session's cancel scope on shared gateways
        self.gateway.cancel(self.session_id);
    }
}
