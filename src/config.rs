//! Configuration management

use std::{net::IpAddr, path::Path};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::{Error, Result};

/// Where to register an application and obtain credentials
pub const REGISTRATION_URL: &str = "https://dev.hackaday.io/applications";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Identity provider and API configuration
    pub provider: ProviderConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4567,
        }
    }
}

/// Hackaday.io application credentials and endpoints
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OAuth client identifier
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: String,
    /// OAuth client secret
    #[serde(deserialize_with = "string_or_number")]
    pub client_secret: String,
    /// API key sent with every API request
    #[serde(deserialize_with = "string_or_number")]
    pub api_key: String,
    /// Browser-facing authorization endpoint
    pub authorize_url: String,
    /// Server-to-server token endpoint
    pub token_url: String,
    /// Base URL of the versioned REST API
    pub api_url: String,
}

/// Accept credentials that figment or YAML parsed as numbers, e.g. `client_id: 12345`
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Credential {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Credential::deserialize(deserializer)? {
        Credential::Text(s) => s,
        Credential::Unsigned(n) => n.to_string(),
        Credential::Signed(n) => n.to_string(),
        Credential::Float(n) => n.to_string(),
    })
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_key: String::new(),
            authorize_url: "http://hackaday.io/authorize".to_string(),
            token_url: "https://auth.hackaday.io/access_token".to_string(),
            api_url: "http://api.hackaday.io/v1".to_string(),
        }
    }
}

// Keep the secret and API key out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Environment variables use the `HACKADAY_` prefix with `__` separating
    /// sections, e.g. `HACKADAY_PROVIDER__CLIENT_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("HACKADAY_").split("__"));

        figment.extract().map_err(|e| Error::Config(e.to_string()))
    }

    /// Check that the configuration is usable before starting the server
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing credential, malformed URL or
    /// invalid bind host.
    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;
        let missing: Vec<&str> = [
            ("client_id", &provider.client_id),
            ("client_secret", &provider.client_secret),
            ("api_key", &provider.api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing {}; retrieve them when you register at {REGISTRATION_URL}",
                missing.join(", ")
            )));
        }

        for (name, value) in [
            ("authorize_url", &provider.authorize_url),
            ("token_url", &provider.token_url),
            ("api_url", &provider.api_url),
        ] {
            Url::parse(value).map_err(|e| Error::Config(format!("Invalid {name} '{value}': {e}")))?;
        }

        self.server
            .host
            .parse::<IpAddr>()
            .map_err(|e| Error::Config(format!("Invalid host '{}': {e}", self.server.host)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.provider.client_id = "client".to_string();
        config.provider.client_secret = "secret".to_string();
        config.provider.api_key = "key".to_string();
        config
    }

    #[test]
    fn defaults_match_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4567);
        assert_eq!(config.provider.authorize_url, "http://hackaday.io/authorize");
        assert_eq!(
            config.provider.token_url,
            "https://auth.hackaday.io/access_token"
        );
        assert_eq!(config.provider.api_url, "http://api.hackaday.io/v1");
    }

    #[test]
    fn load_reads_yaml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "hackaday.yaml",
                "server:\n  port: 3000\nprovider:\n  client_id: from-file\n  api_url: http://localhost:9999/v1\n",
            )?;

            let config =
                Config::load(Some(Path::new("hackaday.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.provider.client_id, "from-file");
            assert_eq!(config.provider.api_url, "http://localhost:9999/v1");
            assert_eq!(
                config.provider.token_url,
                "https://auth.hackaday.io/access_token"
            );
            Ok(())
        });
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/hackaday.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("not found")));
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_lists_missing_credentials() {
        let mut config = valid_config();
        config.provider.client_secret = String::new();
        config.provider.api_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("client_secret, api_key"));
        assert!(err.contains(REGISTRATION_URL));
    }

    #[test]
    fn validate_rejects_bad_urls_and_hosts() {
        let mut config = valid_config();
        config.provider.token_url = "not a url".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("token_url"));

        let mut config = valid_config();
        config.server.host = "localhost".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("Invalid host"));
    }

    #[test]
    fn load_reads_prefixed_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HACKADAY_PROVIDER__CLIENT_ID", "12345");
            jail.set_env("HACKADAY_PROVIDER__API_KEY", "abc-key");
            jail.set_env("HACKADAY_SERVER__PORT", "8080");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.provider.client_id, "12345");
            assert_eq!(config.provider.api_key, "abc-key");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn load_accepts_unquoted_numeric_credentials_in_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "hackaday.yaml",
                "provider:\n  client_id: 12345\n  client_secret: -42\n  api_key: 987654321\n",
            )?;

            let config =
                Config::load(Some(Path::new("hackaday.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.provider.client_id, "12345");
            assert_eq!(config.provider.client_secret, "-42");
            assert_eq!(config.provider.api_key, "987654321");
            Ok(())
        });
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", valid_config().provider);
        assert!(rendered.contains("client"));
        assert!(!rendered.contains("\"secret\""));
        assert!(!rendered.contains("\"key\""));
    }
}
