//! Haulage TUI entry point.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use haulage_api::{
    ApiClient, ApiConfig, FileTokenStore, NoopAnnouncer, TokenStore, TripAnnouncer,
    WebSocketAnnouncer,
};
use haulage_app::App;
use haulage_core::{ActorRole, LifecyclePolicy};
use haulage_tui::{Runtime, server};
use tracing_subscriber::EnvFilter;
use url::Url;

const LOG_FILE: &str = "haulage-tui.log";

/// Haulage terminal client
#[derive(Parser, Debug)]
#[command(name = "haulage-tui")]
#[command(about = "Terminal client for the haulage trip workflow")]
#[command(version)]
struct Args {
    /// Trip API base URL, e.g. `http://localhost:8000/`
    ///
    /// If not provided, runs in demo mode with an in-process server.
    #[arg(short, long)]
    server: Option<Url>,

    /// Role to sign in as
    #[arg(short, long, value_enum, default_value_t = RoleArg::Driver)]
    role: RoleArg,

    /// Directory for the session token and log file
    #[arg(long, default_value = ".haulage")]
    state_dir: PathBuf,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Allow ending a trip straight from accepted
    #[arg(long)]
    permissive_end: bool,

    /// WebSocket endpoint for trip announcements
    #[arg(long)]
    announce: Option<Url>,
}

/// Role to operate the client as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    /// Walk accepted trips through their lifecycle
    Driver,
    /// Book new trips
    Requester,
}

impl From<RoleArg> for ActorRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Driver => ActorRole::Driver,
            RoleArg::Requester => ActorRole::Requester,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    std::fs::create_dir_all(&args.state_dir)?;
    init_logging(&args.state_dir)?;

    let policy = LifecyclePolicy { allow_end_from_accepted: args.permissive_end };

    let (base_url, demo) = match args.server.clone() {
        Some(url) => (url, None),
        None => {
            let handle = server::spawn().await?;
            (handle.base_url.clone(), Some(handle))
        },
    };

    let mut config = ApiConfig::new(base_url);
    config.request_timeout = args.timeout_secs.map(Duration::from_secs);
    let client = ApiClient::new(config)?;

    let store = FileTokenStore::new(&args.state_dir);
    let session = store.load()?;

    // Demo mode announces into the demo server unless an endpoint is given
    let announce_url = args
        .announce
        .clone()
        .or_else(|| demo.as_ref().map(|handle| handle.announce_url.clone()));
    let announcer: Arc<dyn TripAnnouncer> = match announce_url {
        Some(endpoint) => Arc::new(WebSocketAnnouncer::new(endpoint)),
        None => Arc::new(NoopAnnouncer),
    };

    let role: ActorRole = args.role.into();
    tracing::info!("starting as {role} against {}", client.config().base_url);

    let app = App::new(role, policy, session);
    let runtime = Runtime::new(app, client, Arc::new(store), announcer, demo)?;
    Ok(runtime.run().await?)
}

/// Log to a file inside the state directory; the terminal belongs to the UI.
fn init_logging(state_dir: &Path) -> io::Result<()> {
    let file = std::fs::File::create(state_dir.join(LOG_FILE))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();

    Ok(())
}
