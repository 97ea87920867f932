//! Server Config

use clap::Args;

/// Listener settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
