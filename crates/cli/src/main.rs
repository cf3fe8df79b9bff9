//! Bazaar CLI - Command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Start a session
//! bz-cli login -e asha@example.com -p hunter2
//!
//! # Work the cart
//! bz-cli cart add 42 -q 2
//! bz-cli cart set 42 1
//! bz-cli cart show
//! bz-cli cart sync
//!
//! # Orders
//! bz-cli order place
//! bz-cli order list
//! bz-cli order cancel ORD-1700000000000
//!
//! # End the session
//! bz-cli logout
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` - Session lifecycle
//! - `cart` - Add, remove, update, show, and sync the cart
//! - `order` - Place, list, and cancel orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bz-cli")]
#[command(author, version, about = "Bazaar storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, establishing a local session
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out, tearing the session down
    Logout,
    /// Work with the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Work with orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: i64,
    },
    /// Set the quantity of a cart line (0 removes it)
    Set {
        /// Product id
        product_id: i64,

        /// New quantity
        quantity: u32,
    },
    /// Show the cart contents and totals
    Show,
    /// Reconcile the cart with the remote store
    Sync,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place an order from the current cart
    Place,
    /// List order history
    List,
    /// Cancel an order by id
    Cancel {
        /// Order id (e.g. ORD-1700000000000)
        order_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email, password } => commands::session::login(&email, &password)?,
        Commands::Logout => commands::session::logout()?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(product_id).await?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(product_id, quantity).await?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Sync => commands::cart::sync().await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Place => commands::order::place().await?,
            OrderAction::List => commands::order::list()?,
            OrderAction::Cancel { order_id } => commands::order::cancel(&order_id)?,
        },
    }

    Ok(())
}
