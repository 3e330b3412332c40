//! Unsplash photo API gateway

use super::types::{FetchGateway, PageRequest, PageResponse, SessionId};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::Photo;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

/// API version header required by Unsplash
const ACCEPT_VERSION: &str = "v1";

/// Gateway for `GET /photos` and `GET /photos/curated`
///
/// One gateway can serve several sessions. Canceling a session drops its
/// scope, which wakes only the fetches issued for that session.
pub struct UnsplashGateway {
    client: HttpClient,
    client_id: Option<String>,
    /// One cancel scope per session with fetches since its last cancel
    scopes: Mutex<HashMap<SessionId, watch::Sender<()>>>,
}

impl UnsplashGateway {
    /// Create a gateway from the API configuration
    ///
    /// The API refuses anonymous requests, so `api.client_id` is required.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client_id = api
            .client_id
            .clone()
            .ok_or_else(|| Error::missing_field("api.client_id"))?;
        let client = HttpClient::with_config(HttpClientConfig::from_api(api))?;
        Ok(Self::with_client(client, Some(client_id)))
    }

    /// Create a gateway around an existing client
    pub fn with_client(client: HttpClient, client_id: Option<String>) -> Self {
        Self {
            client,
            client_id,
            scopes: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to the cancel scope of `session`, opening it if needed
    fn subscribe(&self, session: SessionId) -> watch::Receiver<()> {
        let mut scopes = self.scopes.lock().unwrap_or_else(PoisonError::into_inner);
        scopes
            .entry(session)
            .or_insert_with(|| watch::channel(()).0)
            .subscribe()
    }

    /// Number of sessions with an open cancel scope
    pub fn open_scopes(&self) -> usize {
        self.scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn request_config(&self, request: &PageRequest) -> RequestConfig {
        let mut config = RequestConfig::new()
            .query("page", request.page)
            .query("per_page", request.per_page)
            .query("order_by", &request.order)
            .header("Accept-Version", ACCEPT_VERSION);
        if let Some(client_id) = &self.client_id {
            config = config.query("client_id", client_id);
        }
        config
    }
}

#[async_trait]
impl FetchGateway for UnsplashGateway {
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse> {
        let mut canceled = self.subscribe(request.session);
        let config = self.request_config(&request);
        debug!(
            session = %request.session,
            feed = %request.feed,
            page = request.page,
            per_page = request.per_page,
            order = %request.order,
            "Fetching photos"
        );

        let fetch = self
            .client
            .get_json_with_config::<Vec<Photo>>(request.feed.path(), config);

        tokio::select! {
            result = fetch => match result {
                Ok(photos) => Ok(PageResponse::success(photos)),
                Err(e) if e.is_client_status() => {
                    warn!(error = %e, "Server refused photo request");
                    Ok(PageResponse::unsuccessful())
                }
                Err(e) => Err(e),
            },
            // Resolves once the scope's sender is dropped
            _ = canceled.changed() => Err(Error::Canceled),
        }
    }

    fn cancel(&self, session: SessionId) {
        let scope = self
            .scopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session);
        if scope.is_some() {
            debug!(%session, "Canceled photo fetches");
        }
    }
}

impl std::fmt::Debug for UnsplashGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashGateway")
            .field("client", &self.client)
            .field("has_client_id", &self.client_id.is_some())
            .finish_non_exhaustive()
    }
}
