//! Configuration for AXL clients.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! translation to `axletree_api::ClientSettings`, and the shared
//! per-profile client registry. Tools that talk to more than one
//! cluster keep a profile per publisher and pull clients from the
//! registry by name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use axletree_api::transport::{TlsMode, TransportConfig};
use axletree_api::{AxlClient, ClientSettings, Credentials, SchemaVersion};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("no profile named '{0}'")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] axletree_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when callers don't name one.
    pub default_profile: Option<String>,

    /// Cluster-independent defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named publisher profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// AXL schema version spoken when a profile doesn't pin one.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            version: default_version(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_version() -> String {
    "12.5".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named publisher profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Publisher hostname or address.
    pub host: String,

    /// Tomcat HTTPS port; 8443 on every stock install.
    #[serde(default = "default_port")]
    pub port: u16,

    /// AXL schema version ("10.0" ... "15.0"); falls back to defaults.
    pub version: Option<String>,

    /// Application user with the Standard AXL API Access role.
    pub username: String,

    /// Password in plaintext (prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to a custom CA certificate (the cluster's tomcat-trust chain).
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_port() -> u16 {
    8443
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "axletree", "axletree").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("axletree");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from an explicit file + environment.
///
/// Environment variables use the `AXL_` prefix with `_`-separated key
/// paths: `AXL_DEFAULTS_TIMEOUT=5`, `AXL_PROFILES_LAB_HOST=ccm-lab`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AXL_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve credentials for a profile.
///
/// Password sources, in order: the profile's `password_env` variable,
/// the `AXL_PASSWORD` variable, the system keyring (service `axletree`,
/// account `<profile>/password`), plaintext in the config file.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(password) = std::env::var(env_name) {
            return Ok(Credentials::new(profile.username.as_str(), password));
        }
    }

    // 2. Well-known env var
    if let Ok(password) = std::env::var("AXL_PASSWORD") {
        return Ok(Credentials::new(profile.username.as_str(), password));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("axletree", &format!("{profile_name}/password")) {
        if let Ok(password) = entry.get_password() {
            return Ok(Credentials::new(profile.username.as_str(), password));
        }
    }

    // 4. Plaintext in config
    if let Some(ref password) = profile.password {
        return Ok(Credentials::new(profile.username.as_str(), password.clone()));
    }

    Err(ConfigError::NoCredentials { profile: profile_name.into() })
}

// ── Profile → client settings ───────────────────────────────────────

/// Build `ClientSettings` from a profile.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientSettings, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name)?;

    let version_text = profile.version.as_deref().unwrap_or(&defaults.version);
    let version = SchemaVersion::from_str(version_text).map_err(|_| ConfigError::Validation {
        field: "version".into(),
        reason: format!("unknown AXL schema version '{version_text}'"),
    })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::DangerAcceptInvalid // stock publishers ship self-signed tomcat certs
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        cookie_jar: None,
    };

    Ok(ClientSettings {
        host: profile.host.clone(),
        port: profile.port,
        version,
        credentials,
        transport,
    })
}

// ── Shared client registry ──────────────────────────────────────────
//
// One cached client per profile name, shared process-wide. A client
// holds the reqwest pool and the SSO cookie jar, so handing out clones
// of one Arc per cluster is what keeps session reuse working.

static CLIENTS: OnceLock<RwLock<HashMap<String, Arc<AxlClient>>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, Arc<AxlClient>>> {
    CLIENTS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The shared client for a profile, building and caching it on first use.
pub fn shared_client(name: &str) -> Result<Arc<AxlClient>, ConfigError> {
    if let Some(client) = registry().read().ok().and_then(|map| map.get(name).cloned()) {
        return Ok(client);
    }
    rebuild_client(name)
}

/// Build a fresh client for a profile from the current config, replacing
/// any cached one. Existing handles keep their old client alive.
pub fn rebuild_client(name: &str) -> Result<Arc<AxlClient>, ConfigError> {
    let config = load_config()?;
    let profile = config
        .profiles
        .get(name)
        .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()))?;
    let settings = profile_to_settings(profile, name, &config.defaults)?;
    let client = Arc::new(AxlClient::new(&settings)?);
    if let Ok(mut map) = registry().write() {
        map.insert(name.to_owned(), Arc::clone(&client));
    }
    Ok(client)
}
