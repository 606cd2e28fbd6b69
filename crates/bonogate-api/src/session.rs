//! Session lifecycle against the portal.
//!
//! The portal has no API-grade authentication. Sessions come from one of two
//! places: an operator-supplied cookie string refreshed out of band, or a
//! replay of the human login form with a portal account. [`SessionManager`]
//! wraps whichever source is configured, decides when a session must be
//! (re-)established, and hands each validation attempt credential material
//! believed to be valid.
//!
//! Shared-state note: the session is shared mutable state across concurrent
//! validation attempts, guarded by a plain `RwLock` held only for the state
//! read/write itself. Acquisition runs outside the lock, so two attempts that
//! observe an expired session concurrently may both log in. The portal treats
//! a repeated login as a no-op, so the redundant acquisition is accepted
//! rather than serialized behind a mutex.

use std::sync::{Arc, LazyLock, RwLock};
use std::time::{Duration, Instant};

use regex::Regex;
use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::portal;

/// Minimum plausible length for an operator-supplied cookie string.
/// Anything shorter is a placeholder, not a real Joomla session.
const MIN_COOKIE_LEN: usize = 100;

/// Default freshness horizon. The portal expires idle sessions server-side
/// after roughly an hour; past this age we re-acquire before submitting.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Where credential material comes from.
pub enum CredentialSource {
    /// Pre-obtained session cookie, refreshed out of band by the operator.
    StaticCookie { cookie: SecretString },

    /// Interactive-style login with portal account credentials.
    Login {
        username: String,
        password: SecretString,
    },
}

/// Credential material to attach to one outbound validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Explicit `Cookie` header value (static cookie mode; no jar involved).
    Header(String),

    /// The session cookie lives in the shared jar and rides along on its
    /// own; nothing to attach by hand.
    Ambient,
}

/// Lifecycle state of the portal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never acquired (or last acquisition failed).
    Unauthenticated,
    /// Acquired and believed valid.
    Authenticated,
    /// Forcibly expired after a portal rejection; next use re-acquires.
    Expired,
}

struct SessionInner {
    state: SessionState,
    token: Option<String>,
    acquired_at: Option<Instant>,
}

/// Guarantees that every validation attempt carries a token believed valid,
/// minimizing redundant acquisition while tolerating portal rejection.
pub struct SessionManager {
    http: reqwest::Client,
    base_url: Url,
    source: CredentialSource,
    ttl: Duration,
    /// Jar shared with the validation client; present only in login mode.
    jar: Option<Arc<Jar>>,
    inner: RwLock<SessionInner>,
}

impl SessionManager {
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        source: CredentialSource,
        jar: Option<Arc<Jar>>,
    ) -> Self {
        Self {
            http,
            base_url,
            source,
            ttl: DEFAULT_SESSION_TTL,
            jar,
            inner: RwLock::new(SessionInner {
                state: SessionState::Unauthenticated,
                token: None,
                acquired_at: None,
            }),
        }
    }

    /// Override the freshness horizon.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.inner.read().expect("session lock poisoned").state
    }

    /// Whether the credential source is minimally configured. No network.
    pub fn ready(&self) -> bool {
        match &self.source {
            CredentialSource::StaticCookie { cookie } => {
                clean_cookie(cookie.expose_secret()).len() >= MIN_COOKIE_LEN
            }
            CredentialSource::Login { username, password } => {
                !username.is_empty() && !password.expose_secret().is_empty()
            }
        }
    }

    /// Return credential material for one outbound call, acquiring a session
    /// first if none is held or the held one has aged past the horizon.
    pub async fn ensure_valid(&self) -> Result<Credential, Error> {
        if let Some(credential) = self.current_fresh() {
            return Ok(credential);
        }
        self.acquire().await
    }

    /// Force the session into `Expired`, regardless of age. Called after the
    /// portal rejects a token; the next `ensure_valid` re-acquires.
    pub fn invalidate(&self) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.state = SessionState::Expired;
        warn!("session invalidated after portal rejection");
    }

    // ── Internals ───────────────────────────────────────────────────

    fn current_fresh(&self) -> Option<Credential> {
        let inner = self.inner.read().expect("session lock poisoned");
        if inner.state != SessionState::Authenticated {
            return None;
        }
        if inner.acquired_at?.elapsed() > self.ttl {
            return None;
        }
        match self.source {
            CredentialSource::StaticCookie { .. } => inner.token.clone().map(Credential::Header),
            CredentialSource::Login { .. } => Some(Credential::Ambient),
        }
    }

    async fn acquire(&self) -> Result<Credential, Error> {
        match &self.source {
            CredentialSource::StaticCookie { cookie } => {
                let cleaned = clean_cookie(cookie.expose_secret());
                if cleaned.len() < MIN_COOKIE_LEN {
                    return Err(Error::Config {
                        message: "configured session cookie is missing or implausibly short".into(),
                    });
                }
                debug!("session cookie accepted from configuration");
                self.store_token(cleaned.clone());
                Ok(Credential::Header(cleaned))
            }
            CredentialSource::Login { username, password } => {
                self.login(username, password).await?;
                Ok(Credential::Ambient)
            }
        }
    }

    /// Replay the portal's login form.
    ///
    /// Success is judged by the response status alone (2xx, or the 303 the
    /// portal issues on a good login) since there is no structured success
    /// payload. The session cookie lands in the shared jar; its header value
    /// is recorded as the session token.
    async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.base_url.join(portal::LOGIN_PATH)?;

        debug!("logging in at {}", url);

        let params = [
            ("username", username),
            ("password", password.expose_secret()),
            ("option", portal::LOGIN_OPTION),
            ("task", portal::LOGIN_TASK),
            ("return", portal::LOGIN_RETURN),
        ];

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::REFERER, self.base_url.as_str())
            .form(&params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() && !status.is_redirection() {
            self.mark_unauthenticated();
            return Err(Error::Auth {
                message: format!("portal did not acknowledge login (HTTP {status})"),
            });
        }

        let Some(token) = self.cookie_header() else {
            self.mark_unauthenticated();
            return Err(Error::Auth {
                message: "login acknowledged but no session cookie was issued".into(),
            });
        };

        self.store_token(token);
        debug!("login successful");
        Ok(())
    }

    /// Extract the jar's `Cookie` header value for the portal URL.
    fn cookie_header(&self) -> Option<String> {
        let jar = self.jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    fn store_token(&self, token: String) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.state = SessionState::Authenticated;
        inner.token = Some(token);
        inner.acquired_at = Some(Instant::now());
    }

    fn mark_unauthenticated(&self) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.state = SessionState::Unauthenticated;
    }
}

/// Normalize an operator-supplied cookie string: strip CR/LF (pasted cookies
/// often carry line breaks) and re-space the `;` separators the way the
/// `Cookie` header wants them.
fn clean_cookie(raw: &str) -> String {
    static SEPARATOR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r";\s*").expect("cookie separator regex"));

    let flat = raw.trim().replace(['\r', '\n'], "");
    SEPARATOR_RE.replace_all(&flat, "; ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_cookie_strips_line_breaks() {
        assert_eq!(clean_cookie("a=1;\nb=2\r\n"), "a=1; b=2");
    }

    #[test]
    fn clean_cookie_normalizes_separators() {
        assert_eq!(clean_cookie("a=1;b=2;   c=3"), "a=1; b=2; c=3");
    }

    #[test]
    fn clean_cookie_trims_outer_whitespace() {
        assert_eq!(clean_cookie("  a=1; b=2  "), "a=1; b=2");
    }

    #[test]
    fn ready_rejects_short_static_cookie() {
        let manager = manager_with(CredentialSource::StaticCookie {
            cookie: SecretString::from("tiny"),
        });
        assert!(!manager.ready());
    }

    #[test]
    fn ready_accepts_plausible_static_cookie() {
        let manager = manager_with(CredentialSource::StaticCookie {
            cookie: SecretString::from(format!("joomla_session={}", "x".repeat(120))),
        });
        assert!(manager.ready());
    }

    #[test]
    fn ready_requires_both_username_and_password() {
        let manager = manager_with(CredentialSource::Login {
            username: "ops@example.com".into(),
            password: SecretString::from(""),
        });
        assert!(!manager.ready());
    }

    #[test]
    fn invalidate_moves_state_to_expired() {
        let manager = manager_with(CredentialSource::StaticCookie {
            cookie: SecretString::from("x".repeat(120)),
        });
        assert_eq!(manager.state(), SessionState::Unauthenticated);
        manager.invalidate();
        assert_eq!(manager.state(), SessionState::Expired);
    }

    fn manager_with(source: CredentialSource) -> SessionManager {
        let url = Url::parse("https://empresas.bonosvip.com/").expect("url");
        SessionManager::new(reqwest::Client::new(), url, source, None)
    }
}
