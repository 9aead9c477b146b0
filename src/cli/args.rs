use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "A small terminal storefront: search products, fill a cart and pay")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Product catalog (JSON array); overrides CATALOG_PATH
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the catalog
    Products {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Fill a cart in one go and print it
    Order {
        /// Product to add, once per unit
        #[arg(short, long, value_name = "PRODUCT")]
        add: Vec<String>,
        /// Product to take one unit out of the cart
        #[arg(short, long, value_name = "PRODUCT")]
        remove: Vec<String>,
        /// Pay for the cart afterwards
        #[arg(long)]
        pay: bool,
        /// Print the receipt as JSON
        #[arg(long, requires = "pay")]
        json: bool,
    },
    /// Start an interactive shopping session
    Shop,
    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}
