//! Command-line flags of the server binary.

use std::path::PathBuf;

use clap::Parser;

use crate::AppConfig;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "server")]
#[command(version, about = "Car inventory HTTP service", long_about = None)]
pub struct Cli {
    /// Connection string for the PostgreSQL database
    #[arg(long = "conn", value_name = "URL")]
    pub conn: Option<String>,

    /// Port for the HTTP server
    #[arg(long)]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overwrite config values with the flags that were given.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(conn) = &self.conn {
            cfg.database.url = conn.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
    }
}
