//! Canteen CLI - Terminal front end for the order cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! canteen cart show
//!
//! # Add an item (fractional quantities are floored, minimum one)
//! canteen cart add --id rice --name "Rice" --price 4.50 --quantity 2
//!
//! # Update, remove, clear
//! canteen cart set rice 3
//! canteen cart remove rice
//! canteen cart clear
//!
//! # Confirm the order and empty the cart
//! canteen cart checkout
//!
//! # Resolve display role and landing page for a user's roles
//! canteen route student cashier
//! ```
//!
//! The cart is stored in a JSON key-value file (see [`config`]) and survives
//! between invocations, the same way the browser cart survives reloads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canteen_cart::{Cart, FileStore};

mod commands;
mod config;

use commands::CommandError;
use commands::cart::NewItem;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "canteen")]
#[command(author, version, about = "Canteen ordering and POS tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the order cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Resolve the display role and landing page for a set of role labels
    Route {
        /// Role labels held by the user (e.g. `student`, `cashier`)
        roles: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item, merging with an existing line for the same id
    Add {
        /// Catalog item id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price (e.g. 4.50), at most two decimal places and at most 1000000000
        #[arg(long)]
        price: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        quantity: f64,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an item's line
    Remove {
        /// Catalog item id
        id: String,
    },
    /// Set the quantity of an item's line
    Set {
        /// Catalog item id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Empty the cart
    Clear,
    /// Confirm the order, print a receipt, and empty the cart
    Checkout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            exit_with(&CommandError::from(e));
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "canteen=warn,canteen_cart=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    match run(cli, &config) {
        Ok(output) => emit(&output),
        Err(e) => exit_with(&e),
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    print!("{output}");
}

#[allow(clippy::print_stderr)]
fn exit_with(error: &CommandError) -> ! {
    tracing::error!("Command failed: {error}");
    eprintln!("error: {error}");
    std::process::exit(1);
}

fn run(cli: Cli, config: &CliConfig) -> Result<String, CommandError> {
    match cli.command {
        Commands::Cart { action } => {
            let mut store = FileStore::new(&config.store_path);
            if let Some(quota) = config.store_quota {
                store = store.with_quota(quota);
            }
            let mut cart = Cart::load(store);

            match action {
                CartAction::Show { json } => commands::cart::show(&cart, json),
                CartAction::Add {
                    id,
                    name,
                    price,
                    quantity,
                    image,
                    description,
                } => commands::cart::add(
                    &mut cart,
                    NewItem {
                        id,
                        name,
                        price,
                        image,
                        description,
                    },
                    quantity,
                ),
                CartAction::Remove { id } => Ok(commands::cart::remove(&mut cart, &id)),
                CartAction::Set { id, quantity } => {
                    Ok(commands::cart::set(&mut cart, &id, quantity))
                }
                CartAction::Clear => Ok(commands::cart::clear(&mut cart)),
                CartAction::Checkout => Ok(commands::cart::checkout(&mut cart)),
            }
        }
        Commands::Route { roles } => Ok(commands::route::resolve(&roles)),
    }
}
