//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, FeedConfig};
use crate::controller::{Outcome, PaginationController};
use crate::error::Result;
use crate::gateway::UnsplashGateway;
use crate::pagination::generate_page_sequence;
use crate::types::{FeedKind, PagingMode, Photo};
use crate::view::EventLog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

type CliController = PaginationController<UnsplashGateway, EventLog, Vec<Photo>>;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Browse {
                feed,
                mode,
                order,
                pages,
            } => self.browse(*feed, *mode, order.as_deref(), *pages).await,
            Commands::Pages { feed, seed } => self.pages(*feed, *seed),
        }
    }

    /// Load configuration, falling back to defaults without `-C`
    fn load_config(&self) -> Result<FeedConfig> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => FeedConfig::default(),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    async fn browse(
        &self,
        feed: Option<FeedKind>,
        mode: Option<PagingMode>,
        order: Option<&str>,
        max_pages: u32,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(feed) = feed {
            config.feed.kind = feed;
        }
        if let Some(mode) = mode {
            config.feed.mode = mode;
        }
        if let Some(order) = order {
            config.feed.order = order.to_string();
        }
        config.validate()?;

        info!(
            feed = %config.feed.kind,
            mode = %config.feed.mode,
            order = %config.feed.order,
            page_size = config.feed.page_size,
            "Browsing feed"
        );

        let gateway = Arc::new(UnsplashGateway::new(&config.api)?);
        let mut controller = PaginationController::new(gateway, EventLog::new(), Vec::new(), &config);

        controller.init_refresh();
        let mut loaded = 0u32;
        let mut seen = 0usize;

        loop {
            let outcome = controller.next_completion().await;
            self.emit_view_events(&mut controller);

            let Some(outcome) = outcome else {
                break;
            };
            let fresh = controller.list().get(seen..).unwrap_or_default();
            self.output_message(&page_message(&controller, outcome, fresh));
            seen = controller.item_count();

            if matches!(outcome, Outcome::Success { .. }) {
                loaded += 1;
            }
            if loaded >= max_pages
                || !matches!(outcome, Outcome::Success { .. })
                || controller.load_more(true).is_none()
            {
                break;
            }
        }

        // Exhaustion found before a fetch is only visible as view events
        self.emit_view_events(&mut controller);
        info!(
            pages = loaded,
            items = controller.item_count(),
            exhausted = controller.is_exhausted(),
            "Finished browsing"
        );
        Ok(())
    }

    fn pages(&self, feed: Option<FeedKind>, seed: Option<u64>) -> Result<()> {
        let config = self.load_config()?;
        let feed = feed.unwrap_or(config.feed.kind);
        let total = config.categories.total_for(feed);

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pages = generate_page_sequence(total, config.feed.page_size, &mut rng);

        self.output_message(&json!({
            "type": "PAGES",
            "feed": feed,
            "total_items": total,
            "page_size": config.feed.page_size,
            "pages": pages,
        }));
        Ok(())
    }

    fn emit_view_events(&self, controller: &mut CliController) {
        for event in controller.view_mut().drain() {
            self.output_message(&json!({
                "type": "VIEW",
                "event": event,
            }));
        }
    }

    /// Output a message in the configured format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn page_message(controller: &CliController, outcome: Outcome, fresh: &[Photo]) -> Value {
    json!({
        "type": "PAGE",
        "outcome": outcome,
        "cursor": controller.cursor(),
        "items": controller.item_count(),
        "exhausted": controller.is_exhausted(),
        "photos": fresh.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
    })
}
