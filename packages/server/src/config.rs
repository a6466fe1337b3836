//! Server configuration from command-line flags and environment variables.

use std::{fmt, path::PathBuf};

use clap::{ArgAction, Parser, builder::BoolishValueParser};

use crate::ui::ServerSettings;

/// Port used when SSL is disabled and no port is given
pub const DEFAULT_PORT: u16 = 7070;
/// Port used when SSL is enabled and no port is given
pub const DEFAULT_SSL_PORT: u16 = 7443;

#[derive(Parser, Clone)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time group chat server with file and voice sharing", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CHAT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to [default: 7070, or 7443 with SSL]
    #[arg(short = 'p', long, env = "CHAT_PORT")]
    pub port: Option<u16>,

    /// Encrypted transport flag; TLS itself is terminated in front of the server
    #[arg(
        long,
        env = "SSL_ENABLED",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub ssl_enabled: bool,

    /// Keystore location used by the TLS terminator
    #[arg(long, env = "SSL_KEYSTORE_PATH", default_value = "keystore.jks")]
    pub keystore_path: PathBuf,

    /// Keystore password
    #[arg(long, env = "SSL_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Directory uploads are stored in
    #[arg(long, env = "CHAT_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

impl ServerConfig {
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.ssl_enabled {
            DEFAULT_SSL_PORT
        } else {
            DEFAULT_PORT
        })
    }

    pub fn settings(&self) -> ServerSettings {
        ServerSettings {
            host: self.host.clone(),
            port: self.effective_port(),
            ssl_enabled: self.ssl_enabled,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.effective_port())
            .field("ssl_enabled", &self.ssl_enabled)
            .field("keystore_path", &self.keystore_path)
            .field(
                "keystore_password",
                &self.keystore_password.as_ref().map(|_| "<redacted>"),
            )
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}
