#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod repl;

use std::time::Duration;

use clap::{Parser, Subcommand};
use holochat_client::RequestCycle;
use holochat_config::Config;
use holochat_identity::IdentityStore;
use holochat_session::{GREETING, SessionController};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "holochat")]
#[command(about = "Terminal client for the holochat backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the backend, interactively or one message at a time
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Backend base URL override
        #[arg(short = 'u', long)]
        url: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Print the persistent anonymous identity
    Whoami,
    /// Clear the persistent identity so a new one is minted
    Reset,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message, url } => {
            let config = Config::load()?;
            let base_url = url.unwrap_or(config.base_url);
            info!("Using backend at {base_url}");

            let backend = RequestCycle::new(
                base_url,
                Duration::from_secs(config.request_timeout_secs),
            )?;

            let mut store = IdentityStore::new(Config::identity_path()?);
            let identity = store.get_or_create();

            let greeting = config.greeting.as_deref().unwrap_or(GREETING);
            let mut controller = SessionController::with_greeting(backend, identity, greeting);

            if let Some(msg) = message {
                if controller.submit(&msg).await {
                    if let Some(reply) = controller.transcript().last() {
                        println!("{}", reply.content);
                    }
                }
            } else {
                repl::run(&mut controller).await?;
            }
        }
        Commands::Init => {
            let path = Config::create_config()?;
            println!("Config written to {}", path.display());
        }
        Commands::Whoami => {
            let mut store = IdentityStore::new(Config::identity_path()?);
            println!("{}", store.get_or_create());
        }
        Commands::Reset => {
            let mut store = IdentityStore::new(Config::identity_path()?);
            store.reset()?;
            println!("Identity cleared. A new one is minted on the next chat.");
        }
        Commands::Version => {
            println!("holochat {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
