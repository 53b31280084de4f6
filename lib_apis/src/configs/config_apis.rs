//! # Client Configuration
//!
//! Endpoints and HTTP policy for the CoinGecko and Idena clients. Values come
//! from built-in defaults, then an optional JSON5 file, then environment
//! variables (`.env` is loaded by the binaries before this runs).

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fmt, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chains::idena::{node_url, IDENA_API_PORT, IDENA_API_URL};
use crate::markets::coingecko::COINGECKO_API_URL;
use crate::retrieve::ky_http::{ClientOptions, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "APIS_CONFIG";
/// File looked up in the working directory when nothing else is named.
pub const CONFIG_DEFAULT_NAME: &str = "apis.config.json5";

/// Failure to load or merge the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON5 for [`ApisConfig`].
    #[error("Failed to parse {}: {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    /// An override variable could not be parsed into its field's type.
    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidEnvVar { name: String, value: String },
}

/// CoinGecko endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CoinGeckoConfig {
    /// REST base URL; a Pro endpoint or proxy may be used instead.
    pub base_url: String,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
        }
    }
}

/// Idena node settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdenaConfig {
    /// Node host URL without the port.
    pub api_url: String,
    /// Node RPC port.
    pub api_port: u16,
    /// Node API key sent as the envelope's `key`.
    pub api_key: Option<String>,
}

impl Default for IdenaConfig {
    fn default() -> Self {
        Self {
            api_url: IDENA_API_URL.to_string(),
            api_port: IDENA_API_PORT,
            api_key: None,
        }
    }
}

impl IdenaConfig {
    /// Host and port joined into the node URL.
    pub fn node_url(&self) -> String {
        node_url(&self.api_url, self.api_port)
    }
}

/// Timeout and retry policy shared by both clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// `0` disables retries.
    pub max_retries: u32,
    pub min_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            min_backoff_ms: 500,
            max_backoff_ms: 30_000,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// The [`ClientOptions`] these settings describe.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            min_backoff: Duration::from_millis(self.min_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            auth_token: None,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Complete client configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApisConfig {
    /// Read from the `Coingecko` key.
    pub coingecko: CoinGeckoConfig,
    pub idena: IdenaConfig,
    pub http: HttpConfig,
}

impl fmt::Display for ApisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApisConfig
    CoinGecko url: {},
    Idena node: {} (key {}),
    Timeout: {}s, retries: {}
",
            self.coingecko.base_url,
            self.idena.node_url(),
            if self.idena.api_key.is_some() { "set" } else { "unset" },
            self.http.timeout_secs,
            self.http.max_retries
        )
    }
}

impl ApisConfig {
    /// Parses a JSON5 document; missing keys keep their defaults.
    pub fn from_json5(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json5::from_str(text).map_err(|e| ConfigError::ParseError {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies overrides looked up through `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("COINGECKO_API_URL") {
            self.coingecko.base_url = v;
        }
        if let Some(v) = lookup("IDENA_API_URL") {
            self.idena.api_url = v;
        }
        if let Some(v) = lookup("IDENA_API_PORT") {
            self.idena.api_port = parse_var("IDENA_API_PORT", v)?;
        }
        if let Some(v) = lookup("IDENA_API_KEY") {
            self.idena.api_key = Some(v).filter(|k| !k.is_empty());
        }
        if let Some(v) = lookup("APIS_TIMEOUT_SECS") {
            self.http.timeout_secs = parse_var("APIS_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = lookup("APIS_MAX_RETRIES") {
            self.http.max_retries = parse_var("APIS_MAX_RETRIES", v)?;
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

/// Loads the configuration.
///
/// The file is `path` when given, else `$APIS_CONFIG`, else
/// `apis.config.json5` in the working directory. An explicitly named file
/// must exist; the default one is optional. Environment overrides are
/// applied last.
pub fn load_apis_config(path: Option<&Path>) -> Result<ApisConfig, ConfigError> {
    let (file, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match env::var(CONFIG_PATH_ENV) {
            Ok(p) if !p.is_empty() => (PathBuf::from(p), true),
            _ => (PathBuf::from(CONFIG_DEFAULT_NAME), false),
        },
    };

    let mut config = if required || file.is_file() {
        let text = fs::read_to_string(&file).map_err(|source| ConfigError::IoError {
            path: file.clone(),
            source,
        })?;
        ApisConfig::from_json5(&text, &file)?
    } else {
        ApisConfig::default()
    };

    config.apply_overrides(|name| env::var(name).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_public_endpoints() {
        let cfg = ApisConfig::default();
        assert_eq!(cfg.coingecko.base_url, "https://api.coingecko.com/api/v3/");
        assert_eq!(cfg.idena.node_url(), "http://localhost:9009/");
        assert_eq!(cfg.http.timeout_secs, 120);
        assert_eq!(cfg.http.client_options().max_retries, 5);
    }

    #[test]
    fn json5_file_overrides_only_named_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                // local node on a custom port
                Idena: {{ ApiPort: 9119, ApiKey: "abc" }},
                Http: {{ TimeoutSecs: 15, }},
            }}"#
        )
        .unwrap();

        let cfg = load_apis_config(Some(file.path())).unwrap();
        assert_eq!(cfg.idena.api_port, 9119);
        assert_eq!(cfg.idena.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.idena.api_url, "http://localhost");
        assert_eq!(cfg.http.timeout_secs, 15);
        assert_eq!(cfg.http.max_retries, 5);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_apis_config(Some(&dir.path().join("absent.json5"))).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = ApisConfig::from_json5("{ Http: ", Path::new("bad.json5")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn overrides_apply_and_validate() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("IDENA_API_URL", "http://10.0.0.2"),
            ("IDENA_API_PORT", "9010"),
            ("APIS_MAX_RETRIES", "0"),
        ]);
        let mut cfg = ApisConfig::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.idena.node_url(), "http://10.0.0.2:9010/");
        assert_eq!(cfg.http.max_retries, 0);

        let err = cfg
            .apply_overrides(|k| (k == "APIS_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref name, .. } if name == "APIS_TIMEOUT_SECS"));
    }
}
