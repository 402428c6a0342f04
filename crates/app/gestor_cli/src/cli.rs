use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gestor_client::api::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "gestor", version, about = "Gestor de Productos")]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "GESTOR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Directory holding the cached session
    #[arg(long, env = "GESTOR_SESSION_DIR", global = true)]
    pub session_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the cached session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage your products
    #[command(subcommand)]
    Products(ProductCommands),
    /// Print version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List your products
    List,
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: String,
    },
    /// Show any product by id
    Show { id: String },
    /// Change some fields of one of your products
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete one of your products
    Delete { id: String },
}
