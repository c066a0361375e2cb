use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use termcolor::ColorChoice;

use siem_dashboard::api::server;
use siem_dashboard::client::transport::HttpTransport;
use siem_dashboard::console::Console;
use siem_dashboard::dashboard::{CommandOutcome, Dashboard};
use siem_dashboard::models::config::{ClientConfig, ServerConfig};
use siem_dashboard::store::demo::generate_demo_events;
use siem_dashboard::store::event_store::EventStore;
use siem_dashboard::utils::logging;
use siem_dashboard::view::document::DashboardDocument;
use siem_dashboard::view::html::render_dashboard;
use siem_dashboard::view::terminal::TerminalRenderer;
use siem_dashboard::view::ViewBindings;

#[derive(Parser, Debug)]
#[clap(author, version, about = "SIEM event dashboard with a development REST backend")]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off)
    #[clap(long, default_value = "info", global = true)]
    log_level: String,

    #[clap(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Load the dashboard once and print it
    Show {
        #[clap(flatten)]
        backend: BackendArgs,

        #[clap(flatten)]
        filters: FilterArgs,

        /// Print the HTML fragment instead of the terminal view
        #[clap(long)]
        html: bool,
    },

    /// Interactive dashboard driven by commands on stdin
    Watch {
        #[clap(flatten)]
        backend: BackendArgs,

        /// Auto-refresh period in seconds (disabled when absent or 0)
        #[clap(long)]
        interval: Option<u64>,
    },

    /// Print the most recent events
    Recent {
        #[clap(flatten)]
        backend: BackendArgs,

        /// Number of events
        #[clap(short, long, default_value = "10")]
        limit: u32,
    },

    /// Serve processed events over the dashboard REST API
    Serve {
        /// Address to bind
        #[clap(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the REST API server
        #[clap(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// JSON array of processed events
        #[clap(long, default_value = "processed_events.json")]
        data_file: PathBuf,

        /// Serve this many generated events instead of reading the data file
        #[clap(long)]
        demo_events: Option<usize>,
    },
}

#[derive(clap::Args, Debug)]
struct BackendArgs {
    /// Base URL of the event backend
    #[clap(short, long, env = "SIEM_DASHBOARD_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Disable coloured output
    #[clap(long)]
    no_color: bool,
}

impl BackendArgs {
    fn renderer(&self) -> TerminalRenderer {
        if self.no_color {
            TerminalRenderer::new(ColorChoice::Never)
        } else {
            TerminalRenderer::new(ColorChoice::Auto)
        }
    }
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Threat level filter (High, Medium, Low)
    #[clap(long)]
    threat: Option<String>,

    /// Source IP filter
    #[clap(long)]
    ip: Option<String>,

    /// Maximum number of events
    #[clap(long)]
    limit: Option<String>,
}

impl FilterArgs {
    fn is_set(&self) -> bool {
        self.threat.is_some() || self.ip.is_some() || self.limit.is_some()
    }
}

/// Bind a fresh document and build the dashboard against it
fn open_dashboard(config: &ClientConfig) -> Result<(Dashboard, Arc<DashboardDocument>)> {
    let transport = HttpTransport::new(&config.base_url)
        .with_context(|| format!("cannot use backend URL {}", config.base_url))?;
    let document = Arc::new(DashboardDocument::new());
    let bindings = ViewBindings::from_document(document.clone());

    Ok((Dashboard::new(Arc::new(transport), &bindings), document))
}

async fn show(backend: BackendArgs, filters: FilterArgs, html: bool) -> Result<()> {
    let config = ClientConfig::new(backend.url.clone());
    let (dashboard, document) = open_dashboard(&config)?;

    let outcome = if filters.is_set() {
        if let Some(threat) = &filters.threat {
            document.set_threat_filter(threat);
        }
        if let Some(ip) = &filters.ip {
            document.set_ip_filter(ip);
        }
        if let Some(limit) = &filters.limit {
            document.set_limit_filter(limit);
        }

        let (statistics, events) = futures::join!(
            dashboard.stats_panel().refresh_statistics(),
            dashboard.apply_filters()
        );
        CommandOutcome {
            statistics: Some(statistics),
            events: Some(events),
        }
    } else {
        dashboard.on_ready().await
    };

    let snapshot = document.snapshot();
    if html {
        print!("{}", render_dashboard(&snapshot));
    } else {
        backend.renderer().repaint_stdout(&snapshot, false)?;
    }

    if outcome.has_failure() {
        bail!("dashboard loaded with errors (see log output)");
    }
    Ok(())
}

async fn watch(backend: BackendArgs, interval: Option<u64>) -> Result<()> {
    let mut config = ClientConfig::new(backend.url.clone());
    config.refresh_interval = interval;

    let (dashboard, document) = open_dashboard(&config)?;
    let console = Console::new(dashboard, document, backend.renderer(), config.refresh_period());

    console.run().await?;
    Ok(())
}

async fn recent(backend: BackendArgs, limit: u32) -> Result<()> {
    let config = ClientConfig::new(backend.url.clone());
    let (dashboard, document) = open_dashboard(&config)?;

    let outcome = dashboard.event_table().show_recent(limit).await;
    backend.renderer().repaint_stdout(&document.snapshot(), false)?;

    if outcome.is_failure() {
        bail!("failed to load recent events");
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> Result<()> {
    let store = match config.demo_events {
        Some(count) => {
            info!("Serving {} generated demo events", count);
            EventStore::in_memory(generate_demo_events(count, &mut rand::thread_rng()))
        }
        None => {
            if !config.data_file.exists() {
                warn!(
                    "{} not found; serving an empty event set until it appears",
                    config.data_file.display()
                );
            }
            EventStore::from_file(config.data_file.clone())
        }
    };

    server::serve(&config, store).await?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger with specified level
    logging::init_logger(logging::get_log_level(&cli.log_level));

    info!("Starting siem-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Mode::Show { backend, filters, html } => show(backend, filters, html).await,
        Mode::Watch { backend, interval } => watch(backend, interval).await,
        Mode::Recent { backend, limit } => recent(backend, limit).await,
        Mode::Serve {
            host,
            port,
            data_file,
            demo_events,
        } => {
            serve(ServerConfig {
                host,
                port,
                data_file,
                demo_events,
            })
            .await
        }
    }
}
