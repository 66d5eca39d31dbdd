//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Example Hackaday.io application - OAuth login and projects API proxy
#[derive(Parser, Debug)]
#[command(name = "hackaday-oauth-example")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "HACKADAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hackaday.io client ID
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// Hackaday.io client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Hackaday.io API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Hackaday.io authorization URI
    #[arg(long)]
    pub authorize_url: Option<String>,

    /// Hackaday.io token URI
    #[arg(long)]
    pub token_url: Option<String>,

    /// Hackaday.io API URI
    #[arg(long)]
    pub api_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "HACKADAY_PORT")]
    pub port: Option<u16>,

    /// Interface address to listen on
    #[arg(long, env = "HACKADAY_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "HACKADAY_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "HACKADAY_LOG_FORMAT")]
    pub log_format: Option<String>,
}

impl Cli {
    /// Apply command-line values on top of file and environment configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        let provider = &mut config.provider;
        for (value, slot) in [
            (&self.client_id, &mut provider.client_id),
            (&self.client_secret, &mut provider.client_secret),
            (&self.api_key, &mut provider.api_key),
            (&self.authorize_url, &mut provider.authorize_url),
            (&self.token_url, &mut provider.token_url),
            (&self.api_url, &mut provider.api_url),
        ] {
            if let Some(v) = value {
                slot.clone_from(v);
            }
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref host) = self.host {
            config.server.host.clone_from(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let cli = Cli::try_parse_from([
            "hackaday-oauth-example",
            "--client-id",
            "cli-client",
            "--port",
            "8080",
            "--api-url",
            "http://127.0.0.1:9000/v1",
        ])
        .unwrap();

        let mut config = Config::default();
        config.provider.client_secret = "from-file".to_string();
        cli.apply_overrides(&mut config);

        assert_eq!(config.provider.client_id, "cli-client");
        assert_eq!(config.provider.client_secret, "from-file");
        assert_eq!(config.provider.api_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn log_level_defaults_to_info() {
        let cli = Cli::try_parse_from(["hackaday-oauth-example"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert!(cli.log_format.is_none());
    }
}
