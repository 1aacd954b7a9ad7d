use std::path::PathBuf;

use clap::Parser;

/// uchat backend
#[derive(Debug, Parser)]
#[command(name = "uchat", about = "Chat backend with realtime enrichment, uploads and streaming replies")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "uchat.toml", env = "UCHAT_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "UCHAT_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}
