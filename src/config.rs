//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", version, about = "Storefront REST backend")]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "STOREFRONT_LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// Directory holding uploaded product images.
    #[arg(long, env = "STOREFRONT_MEDIA_DIR", default_value = "uploads")]
    pub media_dir: PathBuf,

    /// Origin allowed by CORS. Any origin is allowed when unset.
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_origin: Option<String>,

    #[arg(long, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Mailbox size of each resource actor.
    #[arg(long, env = "STOREFRONT_CHANNEL_CAPACITY", default_value_t = 32)]
    pub channel_capacity: usize,

    #[arg(long, env = "STOREFRONT_ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,

    /// Administrator provisioned at startup, together with `--admin-password`.
    #[arg(long, env = "STOREFRONT_ADMIN_EMAIL", requires = "admin_password")]
    pub admin_email: Option<String>,

    #[arg(long, env = "STOREFRONT_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::try_parse_from(["storefront"]).unwrap();
        assert_eq!(config.listen.port(), 5000);
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn test_admin_email_requires_password() {
        let missing = ServiceConfig::try_parse_from(["storefront", "--admin-email", "root@shop.io"]);
        assert!(missing.is_err());

        let config = ServiceConfig::try_parse_from([
            "storefront",
            "--admin-email",
            "root@shop.io",
            "--admin-password",
            "hunter22",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.admin_email.as_deref(), Some("root@shop.io"));
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
