mod analytics;
mod clock;
mod config;
mod countdown;
mod error;
mod events;
mod input;
mod offer;
mod page;
mod query;
mod render;
mod scheduler;
mod state;
mod ui;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::Context;
use futures_util::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use analytics::Analytics;
use clock::SystemClock;
use config::Config;
use events::Event;
use offer::ProductSchema;
use page::Page;
use query::PageQuery;
use render::ConsoleRenderer;
use scheduler::{TimerKind, TokioScheduler};

const CONFIG_ENV: &str = "OFFER_PAGE_CONFIG";

/// How long analytics posts get to finish once the page closes.
const ANALYTICS_DRAIN: Duration = Duration::from_secs(2);

enum Wake {
    Timer(TimerKind),
    Input(Option<Event>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".into());
    let cfg = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {config_path}"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.general.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    debug!(?cfg, "config loaded");

    let schema = ProductSchema::load_or_default(cfg.offer.schema_path.as_deref());

    // Either the page address (https://loja.example/kit?v=b&utm_source=fb)
    // or just its query (v=b&utm_source=fb).
    let arg = std::env::args().nth(1).unwrap_or_default();
    let query = if arg.contains("://") {
        PageQuery::from_url(&arg)
    } else {
        PageQuery::new(arg)
    };

    let analytics = Analytics::from_config(&cfg.analytics);
    if analytics.is_empty() {
        debug!("no analytics collectors configured");
    } else {
        debug!(collectors = analytics.len(), "analytics ready");
    }

    let mut page = Page::new(
        &cfg,
        schema,
        query,
        Box::new(SystemClock),
        Box::new(ConsoleRenderer),
        analytics,
        StdRng::from_entropy(),
    )?;

    // Create the event channel
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    input::install_panic_hook(tx.clone());
    input::stdin::spawn(tx.clone());
    input::spawn_ctrl_c(tx);

    let mut sched = TokioScheduler::new();
    page.init(&mut sched);

    info!("page open (commands: checkout, direct, coupon <code>, gallery <product> <n>, reviews <n>, scroll <y>, hide, show, quit)");
    loop {
        let wake = tokio::select! {
            timer = sched.next() => Wake::Timer(timer),
            event = rx.recv() => Wake::Input(event),
        };

        // A panic below was already reported by the hook; the page stays up.
        match wake {
            Wake::Input(None) | Wake::Input(Some(Event::Shutdown)) => break,
            Wake::Timer(timer) => {
                let _ = panic::catch_unwind(AssertUnwindSafe(|| page.on_timer(timer, &mut sched)));
            }
            Wake::Input(Some(event)) => {
                let nav = panic::catch_unwind(AssertUnwindSafe(|| page.handle(event, &mut sched)))
                    .unwrap_or(None);
                if let Some(nav) = nav {
                    tokio::time::sleep(nav.delay).await;
                    info!(url = %nav.url, "navigating away");
                    break;
                }
            }
        }
    }

    page.shutdown();

    let pending = page.take_in_flight();
    if !pending.is_empty() {
        debug!(count = pending.len(), "waiting for analytics posts");
        if tokio::time::timeout(ANALYTICS_DRAIN, join_all(pending)).await.is_err() {
            warn!("analytics posts still in flight at exit");
        }
    }

    Ok(())
}
