//! Async client for the BonosVip partner portal.
//!
//! The portal was built for humans, not programs: authentication replays the
//! Joomla login form, sessions live in cookies, and validation answers arrive
//! as loosely structured HTML fragments with no schema. This crate owns the
//! three pieces that make that tolerable:
//!
//! - **[`SessionManager`]** — keeps a session believed to be valid, renewing
//!   it lazily when it ages out or the portal rejects it. Credential material
//!   comes from a [`CredentialSource`]: either an operator-supplied cookie
//!   string or a portal account login.
//! - **[`PortalClient`]** — submits one voucher code per call and applies the
//!   bounded retry-once-on-401 policy around session invalidation.
//! - **[`classify`]** — pure, deterministic extraction of structured facts
//!   (validity, service, holder, rejection text) from the raw response body.
//!   All pattern matching against the portal's HTML lives there and nowhere
//!   else, so an upstream format change touches exactly one module.

pub mod classify;
pub mod client;
pub mod error;
pub mod portal;
pub mod session;
pub mod transport;
pub mod voucher;

pub use classify::{ValidationOutcome, classify};
pub use client::PortalClient;
pub use error::Error;
pub use session::{Credential, CredentialSource, SessionManager, SessionState};
pub use transport::TransportConfig;
pub use voucher::VoucherCode;
