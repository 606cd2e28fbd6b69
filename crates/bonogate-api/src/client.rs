//! Validation protocol against the portal.
//!
//! [`PortalClient`] submits one voucher code per call and owns the bounded
//! retry policy around authentication failure: on a 401 the session is
//! invalidated and the submission retried exactly once; a second 401
//! surfaces as an auth error. Every other transport failure surfaces
//! immediately, with no retry, because the portal gives no idempotency
//! guarantees for non-auth failures.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::classify::{ValidationOutcome, classify};
use crate::error::Error;
use crate::portal;
use crate::session::{Credential, CredentialSource, SessionManager, SessionState};
use crate::transport::TransportConfig;
use crate::voucher::VoucherCode;

/// Retry bound: the initial attempt plus one retry after invalidation.
const MAX_ATTEMPTS: u32 = 2;

/// Client for the portal's voucher validation flow.
///
/// Composes the HTTP transport, the validator identity sent with every call,
/// and the [`SessionManager`] that keeps credential material fresh.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
    validator: String,
    session: SessionManager,
}

impl PortalClient {
    /// Create a client for the given portal root.
    ///
    /// Interactive login needs a cookie jar to hold the portal's session
    /// cookie; one is added automatically when the transport config lacks
    /// it. Static cookie mode attaches its header itself and needs no jar.
    pub fn new(
        base_url: Url,
        validator: String,
        source: CredentialSource,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = match source {
            CredentialSource::Login { .. } if transport.cookie_jar.is_none() => {
                transport.clone().with_cookie_jar()
            }
            _ => transport.clone(),
        };
        let jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        let session = SessionManager::new(http.clone(), base_url.clone(), source, jar);

        Ok(Self {
            http,
            base_url,
            validator,
            session,
        })
    }

    /// Override the session freshness horizon.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session.set_ttl(ttl);
        self
    }

    /// Whether a credential source is minimally configured. No network.
    pub fn ready(&self) -> bool {
        self.session.ready()
    }

    /// Current session lifecycle state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Validate a raw voucher code string.
    ///
    /// The format check happens before any session work: a malformed code
    /// never triggers acquisition or a network call.
    pub async fn validate(&self, raw: &str) -> Result<ValidationOutcome, Error> {
        let code: VoucherCode = raw.parse()?;
        self.submit(&code).await
    }

    /// Submit a parsed voucher code for validation.
    pub async fn submit(&self, code: &VoucherCode) -> Result<ValidationOutcome, Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let credential = self.session.ensure_valid().await?;

            debug!(h = code.h(), attempt, "submitting voucher for validation");
            let resp = self.post_validation(code, &credential).await?;

            let status = resp.status();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.session.invalidate();
                if attempt >= MAX_ATTEMPTS {
                    return Err(Error::Auth {
                        message: "portal rejected the session twice; credentials are stale".into(),
                    });
                }
                debug!("portal rejected session, retrying once after re-acquisition");
                continue;
            }

            if !status.is_success() {
                return Err(Error::UnexpectedStatus {
                    status: status.as_u16(),
                });
            }

            let body = resp.text().await.map_err(Error::Transport)?;
            return Ok(classify(&body));
        }
    }

    /// Re-acquire a session regardless of freshness and report the result.
    pub async fn force_login(&self) -> Result<(), Error> {
        self.session.invalidate();
        self.session.ensure_valid().await.map(drop)
    }

    async fn post_validation(
        &self,
        code: &VoucherCode,
        credential: &Credential,
    ) -> Result<reqwest::Response, Error> {
        let url = self.base_url.join(portal::VALIDATE_PATH)?;
        let referer = self.base_url.join(portal::VALIDATE_REFERER_PATH)?;

        let params = [
            ("q", code.q()),
            ("h", code.h()),
            ("validador", self.validator.as_str()),
        ];

        let mut builder = self
            .http
            .post(url)
            .header(reqwest::header::REFERER, referer.as_str())
            .form(&params);

        if let Credential::Header(cookie) = credential {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }

        builder.send().await.map_err(Error::Transport)
    }
}
