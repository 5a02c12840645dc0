//! `marquee-api` binary entrypoint.
//!
//! Loads configuration from environment variables, seeds the catalog, and
//! starts the HTTP server.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use anyhow::Result;

use marquee_api::config::Config;
use marquee_api::server::Server;
use marquee_core::observability::{init_logging, LogFormat};

fn choose_log_format(config: &Config) -> LogFormat {
    if config.debug {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(choose_log_format(&config));

    let server = Server::new(config)?;
    server.serve().await?;
    Ok(())
}
