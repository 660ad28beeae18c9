use std::path::PathBuf;

use clap::Parser;

/// Edit-Room Gateway
#[derive(Debug, Parser)]
#[command(name = "editroom", about = "HTTP gateway for prompt-driven image edits")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "editroom.toml", env = "EDITROOM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "EDITROOM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
