//! Grado CLI - order from the campus biryani counter in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu, optionally filtered
//! grado menu --search chicken --category biryani
//!
//! # Manage the cart
//! grado cart add 1
//! grado cart update 1 -1
//! grado cart show
//!
//! # Sign in and place an order
//! grado login student --id 21CSE042 --password hunter2
//! grado checkout --address "Block A, Room 201" --payment upi
//! ```
//!
//! # Commands
//!
//! - `menu` - List dishes by section
//! - `cart` - Show or change the cart
//! - `login` / `logout` / `whoami` - Mock sign in
//! - `reviews` - Read or post reviews
//! - `checkout` - Place an order and follow its delivery
//!
//! Cart, user and reviews persist between runs in the snapshot file
//! (`GRADO_SNAPSHOT_PATH`). Logs go to stderr; filter them with `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grado_core::{Category, MenuItemId, PaymentMethod};
use grado_storefront::config::SentryConfig;
use grado_storefront::{AppStore, FileSnapshotStore, Persistence, StorefrontConfig};

mod commands;
mod error;

use commands::checkout::CheckoutRequest;
use error::CliError;

#[derive(Parser)]
#[command(name = "grado")]
#[command(author, version, about = "Grado campus food ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu
    Menu {
        /// Only show dishes whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one section (`biryani`, `rice`)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Sign in
    Login {
        #[command(subcommand)]
        method: LoginMethod,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Read or post reviews
    Reviews {
        #[command(subcommand)]
        action: Option<ReviewAction>,
    },
    /// Place an order from the cart
    Checkout {
        /// Delivery address (hostel block and room)
        #[arg(short, long, default_value = "")]
        address: String,

        /// Payment method (`upi`, `cod`)
        #[arg(short, long)]
        payment: Option<PaymentMethod>,

        /// Approve UPI payment without asking
        #[arg(short, long)]
        yes: bool,

        /// Return right after placing the order
        #[arg(long)]
        no_follow: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one of a dish
    Add { id: MenuItemId },
    /// Remove a dish entirely
    Remove { id: MenuItemId },
    /// Change a dish's quantity by a delta
    Update {
        id: MenuItemId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum LoginMethod {
    /// Sign in with a student id and password
    Student {
        /// Student id, e.g. 21CSE042
        #[arg(short, long)]
        id: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign in with Google
    Google,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List reviews, newest first
    List,
    /// Post a review
    Post {
        /// Review text
        #[arg(short, long)]
        text: String,

        /// Stars, 1 to 5
        #[arg(short, long, default_value_t = 5)]
        rating: u8,

        /// Attached photo reference (repeatable)
        #[arg(short, long = "image")]
        images: Vec<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SentryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(Cow::Owned(config.environment.clone())),
            sample_rate: config.sample_rate,
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

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grado_storefront=info,grado_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(io::stderr(), "grado: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config.sentry);
    init_tracing();

    let persistence = Persistence::new(FileSnapshotStore::new(&config.snapshot_path));
    let mut store = AppStore::init(persistence).with_feedback_window(config.feedback_window);

    let result = run(cli.command, &mut store, &config).await;
    store.teardown();

    if let Err(e) = result {
        e.report();
        let _ = writeln!(io::stderr(), "{e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    store: &mut AppStore,
    config: &StorefrontConfig,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Menu { search, category } => {
            commands::menu::show(store, &mut out, search, category)?;
        }
        Commands::Cart { action } => match action.unwrap_or(CartAction::Show) {
            CartAction::Show => commands::cart::show(store, &mut out)?,
            CartAction::Add { id } => commands::cart::add(store, &mut out, id)?,
            CartAction::Remove { id } => commands::cart::remove(store, &mut out, id)?,
            CartAction::Update { id, delta } => {
                commands::cart::update(store, &mut out, id, delta)?;
            }
            CartAction::Clear => commands::cart::clear(store, &mut out)?,
        },
        Commands::Login { method } => match method {
            LoginMethod::Student { id, password } => {
                let password = SecretString::from(password);
                commands::account::login_student(store, &mut out, &id, &password)?;
            }
            LoginMethod::Google => commands::account::login_google(store, &mut out)?,
        },
        Commands::Logout => commands::account::logout(store, &mut out)?,
        Commands::Whoami => commands::account::whoami(store, &mut out)?,
        Commands::Reviews { action } => match action.unwrap_or(ReviewAction::List) {
            ReviewAction::List => commands::reviews::list(store, &mut out)?,
            ReviewAction::Post {
                text,
                rating,
                images,
            } => commands::reviews::post(store, &mut out, text, rating, images)?,
        },
        Commands::Checkout {
            address,
            payment,
            yes,
            no_follow,
        } => {
            let request = CheckoutRequest {
                address,
                payment_method: payment,
                auto_confirm: yes,
                follow: !no_follow,
                timeline_unit: config.timeline_unit,
            };
            let stdin = io::stdin();
            commands::checkout::run(store, &mut stdin.lock(), &mut out, request).await?;
        }
    }
    Ok(())
}
