//! Configuration loading and credential resolution for the bonogate CLI.
//!
//! A TOML file at the platform config path with `BONOSVIP_`-prefixed
//! environment overrides (env wins). Credential material resolves without
//! touching the network: an explicit session cookie takes priority, then a
//! portal account email/password pair. Absence of both is detectable up
//! front as [`ConfigError::NoCredentials`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use bonogate_api::CredentialSource;
use bonogate_api::portal::{DEFAULT_PORTAL_URL, DEFAULT_VALIDATOR};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credential material configured (set cookies, or email and password)")]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Raw TOML / env surface ──────────────────────────────────────────

/// Raw configuration as it appears in the file or environment. Everything
/// is optional so env-only deployments work; [`resolve`] applies defaults
/// and picks a credential source.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RawConfig {
    /// Portal base URL. Defaults to the production portal.
    pub portal: Option<String>,

    /// Validator display name sent with every validation call.
    pub validator: Option<String>,

    /// Pre-obtained session cookie string (`BONOSVIP_COOKIES`).
    pub cookies: Option<String>,

    /// Portal account email (`BONOSVIP_EMAIL`).
    pub email: Option<String>,

    /// Portal account password (`BONOSVIP_PASSWORD`).
    pub password: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// Session freshness horizon in seconds.
    pub session_ttl: Option<u64>,
}

// ── Resolved configuration ──────────────────────────────────────────

/// Fully resolved gateway configuration.
pub struct GatewayConfig {
    pub portal_url: Url,
    pub validator: String,
    pub credentials: CredentialSource,
    pub timeout: Duration,
    pub session_ttl: Duration,
}

/// Resolve the config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bonogate", "bonogate").map_or_else(
        || PathBuf::from("bonogate.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load configuration from the default path plus the environment.
pub fn load() -> Result<GatewayConfig, ConfigError> {
    load_from(config_path())
}

/// Load configuration from an explicit file path plus the environment.
pub fn load_from(path: impl AsRef<Path>) -> Result<GatewayConfig, ConfigError> {
    let raw: RawConfig = Figment::from(Serialized::defaults(RawConfig::default()))
        .merge(Toml::file(path.as_ref()))
        .merge(Env::prefixed("BONOSVIP_"))
        .extract()?;
    resolve(raw)
}

/// Apply defaults and pick a credential source.
///
/// An explicit cookie wins over account credentials: operators who maintain
/// the session by hand do so deliberately, and a stale password should not
/// shadow a working cookie.
pub fn resolve(raw: RawConfig) -> Result<GatewayConfig, ConfigError> {
    let portal = raw.portal.as_deref().unwrap_or(DEFAULT_PORTAL_URL);
    let portal_url: Url = portal.parse().map_err(|_| ConfigError::Validation {
        field: "portal".into(),
        reason: format!("invalid URL: {portal}"),
    })?;

    let credentials = match (raw.cookies, raw.email, raw.password) {
        (Some(cookies), _, _) if !cookies.trim().is_empty() => CredentialSource::StaticCookie {
            cookie: SecretString::from(cookies),
        },
        (_, Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            CredentialSource::Login {
                username: email,
                password: SecretString::from(password),
            }
        }
        _ => return Err(ConfigError::NoCredentials),
    };

    Ok(GatewayConfig {
        portal_url,
        validator: raw.validator.unwrap_or_else(|| DEFAULT_VALIDATOR.into()),
        credentials,
        timeout: Duration::from_secs(raw.timeout.unwrap_or(30)),
        session_ttl: Duration::from_secs(raw.session_ttl.unwrap_or(3600)),
    })
}
