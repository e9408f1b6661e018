//! QuickBite CLI - Drive the ordering flow from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse restaurants
//! qb-cli discover --search pizza --cuisine Italian
//!
//! # Show a menu
//! qb-cli menu 1
//!
//! # Show the starter cart and its totals
//! qb-cli cart
//!
//! # Place an order with a new card
//! qb-cli checkout --payment new --card-name "John Doe" \
//!     --card-number "4242 4242 4242 4242" --card-expiry 11/27 --card-cvc 123
//!
//! # Watch an order progress, two seconds per step
//! qb-cli track --interval-secs 2
//! ```
//!
//! # Commands
//!
//! - `discover` - Filter restaurants by name and cuisine
//! - `menu` - Show a restaurant menu
//! - `cart` - Show the cart with its order summary
//! - `checkout` - Validate the checkout form and place the order
//! - `track` - Follow an order until it is delivered or cancelled
//!
//! Output is pretty-printed JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use quickbite_core::OrderStatus;
use quickbite_storefront::{AppState, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "qb-cli")]
#[command(author, version, about = "QuickBite ordering CLI")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants matching a search and cuisine filter
    Discover {
        /// Case-insensitive text matched against restaurant names
        #[arg(short, long, default_value = "")]
        search: String,

        /// Cuisine to include (repeatable; any match counts)
        #[arg(short, long)]
        cuisine: Vec<String>,
    },
    /// Show a restaurant's menu
    Menu {
        /// Restaurant id
        restaurant_id: String,
    },
    /// Show the cart and order summary
    Cart,
    /// Place an order for the cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Follow an order's status until it ends
    Track {
        /// Status to start from
        #[arg(long, default_value = "CONFIRMED")]
        status: OrderStatus,

        /// Seconds between status updates (overrides `QUICKBITE_TRACKING_INTERVAL_SECS`)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Cancel the order after this many seconds
        #[arg(long)]
        cancel_after_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbite_storefront=info,qb_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Discover { search, cuisine } => {
            commands::browse::discover(AppState::with_fixtures(config), &search, &cuisine)?;
        }
        Commands::Menu { restaurant_id } => {
            commands::browse::menu(AppState::with_fixtures(config), &restaurant_id)?;
        }
        Commands::Cart => commands::cart::show(AppState::with_fixtures(config))?,
        Commands::Checkout(args) => {
            commands::checkout::run(AppState::with_fixtures(config), &args)?;
        }
        Commands::Track {
            status,
            interval_secs,
            cancel_after_secs,
        } => {
            commands::track::run(&config, status, interval_secs, cancel_after_secs).await?;
        }
    }
    Ok(())
}
