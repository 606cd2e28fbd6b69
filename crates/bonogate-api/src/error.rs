use thiserror::Error;

/// Top-level error type for the `bonogate-api` crate.
///
/// Covers every failure mode of the gateway: configuration, voucher format,
/// authentication, transport, and classification. The CLI maps these into
/// user-facing diagnostics and exit codes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// No usable credential material configured (missing or placeholder
    /// cookie, empty account credentials). Detected before any network call.
    #[error("configuration error: {message}")]
    Config { message: String },

    // ── Voucher format ──────────────────────────────────────────────
    /// Voucher code does not split into exactly 3 non-empty segments.
    /// Detected before any session work or network call.
    #[error("malformed voucher code '{code}': {reason}")]
    Format { code: String, reason: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The portal rejected our credentials, including after the single
    /// invalidate-and-retry pass.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The portal answered with a status the protocol does not account for
    /// (anything other than success or 401). Not retried.
    #[error("unexpected portal response (HTTP {status})")]
    UnexpectedStatus { status: u16 },

    // ── Classification ──────────────────────────────────────────────
    /// Classification invariant violation. Reserved: classification always
    /// produces a result for any body observed in practice.
    #[error("response classification failed: {message}")]
    Parse { message: String },
}

impl Error {
    /// Returns `true` if this error means the portal rejected our session
    /// or account credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Returns `true` if no credential material was configured at all.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if the underlying transport call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the portal could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
