//! OAuth credential resolution, from explicit values or a config file.
//!
//! Config files live under the per-user config directory (for example
//! `~/.config/shutterbox/default` on Linux) and use a line-oriented
//! `key = value` format:
//!
//! ```text
//! host = your.host.com
//! consumerKey = your_consumer_key
//! consumerSecret = your_consumer_secret
//! token = your_access_token
//! tokenSecret = your_access_token_secret
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Error, Result};

/// OAuth1 consumer and access token credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl Credentials {
    /// Create a new set of credentials
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

// Implement Debug manually to avoid exposing the secrets
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Resolved host and credentials for one server
#[derive(Debug, Clone)]
pub struct Auth {
    /// Server host, with or without a scheme prefix
    pub host: String,
    /// Credentials, present only when a consumer key is configured
    pub credentials: Option<Credentials>,
    /// Path the config was loaded from, if any
    pub config_path: Option<PathBuf>,
}

impl Auth {
    /// Auth for an explicit host. Credentials missing a consumer key are
    /// treated as absent.
    pub fn for_host(host: impl Into<String>, credentials: Option<Credentials>) -> Auth {
        Auth {
            host: host.into(),
            credentials: credentials.filter(|c| !c.consumer_key.is_empty()),
            config_path: None,
        }
    }

    /// Resolve authentication details.
    ///
    /// With an explicit `host`, no config file is touched and the given
    /// credentials (if any) are used directly. Without one, the named
    /// config profile is loaded (`default` when `config_file` is None).
    /// Specifying both `host` and `config_file` is a configuration error.
    pub fn resolve(
        config_file: Option<&str>,
        host: Option<&str>,
        credentials: Option<Credentials>,
    ) -> Result<Auth> {
        if host.is_some() && config_file.is_some() {
            return Err(Error::Config(
                "cannot specify both host and config_file".to_string(),
            ));
        }

        match host {
            Some(host) => Ok(Auth::for_host(host, credentials)),
            None => {
                let path = config_path(config_file)?;
                let parsed = read_config(&path)?;
                Ok(Auth {
                    host: parsed.host,
                    credentials: parsed.credentials,
                    config_path: Some(path),
                })
            }
        }
    }
}

/// Resolve a profile name to its config file path.
///
/// An absolute `config_file` is used as-is (joining an absolute path
/// replaces the base), so callers can pass either a profile name or a
/// full path.
pub fn config_path(config_file: Option<&str>) -> Result<PathBuf> {
    let name = config_file.unwrap_or("default");
    let dirs = ProjectDirs::from("", "", "shutterbox")
        .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
    Ok(dirs.config_dir().join(name))
}

/// Contents of a parsed config file
struct ParsedConfig {
    host: String,
    credentials: Option<Credentials>,
}

/// Parse a config file.
///
/// Blank lines and `#` comments are skipped. Keys are case-sensitive, and
/// every quote character is stripped from keys and values, not just
/// surrounding pairs. A missing file is a hard I/O error.
fn read_config(path: &Path) -> Result<ParsedConfig> {
    let content = std::fs::read_to_string(path)?;

    let mut host = "localhost".to_string();
    let mut consumer_key = String::new();
    let mut consumer_secret = String::new();
    let mut token = String::new();
    let mut token_secret = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::Config(format!(
                "invalid line in {}: {}",
                path.display(),
                line
            )));
        };
        let key = key.trim().replace(['"', '\''], "");
        let value = value.trim().replace(['"', '\''], "");

        match key.as_str() {
            "host" => host = value,
            "consumerKey" => consumer_key = value,
            "consumerSecret" => consumer_secret = value,
            "token" => token = value,
            "tokenSecret" => token_secret = value,
            // Unknown keys are ignored
            _ => {}
        }
    }

    let credentials = if consumer_key.is_empty() {
        None
    } else {
        Some(Credentials {
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        })
    };

    Ok(ParsedConfig { host, credentials })
}
