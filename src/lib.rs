//! Typed async client for the CardDesk REST API.
//!
//! CardDesk is a small card-request service: members file card requests,
//! reviewers approve or reject them, admins manage accounts. This crate
//! wraps its HTTP API behind typed resource groups ([`AuthApi`],
//! [`UsersApi`], [`CardsApi`]) and owns the session plumbing:
//!
//! - the bearer token lives in a persisted [`SessionStore`] and is attached
//!   to every request at send time;
//! - a 401 response clears the store, token and cached identity together,
//!   and fires the [`ApiClient::on_session_invalidated`] hook before
//!   [`Error::Unauthorized`] reaches the caller;
//! - every request is bounded by an explicit timeout ([`DEFAULT_TIMEOUT`],
//!   30 seconds) and nothing is ever retried or queued.
//!
//! ```no_run
//! use carddesk_client::{ApiClient, CardStatus, Config, Credentials, Session, SessionStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SessionStore::on_disk()?;
//! let client = ApiClient::new(Config::new("https://api.carddesk.example"), store)?
//!     .on_session_invalidated(|event| {
//!         eprintln!("session expired during {} {}", event.method, event.path);
//!     });
//!
//! let login = client
//!     .auth()
//!     .login(&Credentials::new("ada@example.com", "hunter2"))
//!     .await?;
//! client
//!     .session()
//!     .set(Session::new(login.token).with_user(serde_json::to_value(&login.user)?))?;
//!
//! for card in client.cards().list(Some(CardStatus::Pending)).await? {
//!     println!("#{} {} ({})", card.id, card.title, card.status);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod http;
mod resources;
mod session;

pub use client::ApiClient;
pub use config::{Config, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use http::SessionInvalidated;
pub use resources::auth::{AuthApi, Credentials, LoginResponse, NewUser};
pub use resources::cards::{Card, CardStatus, CardsApi, NewCard};
pub use resources::users::{User, UsersApi};
pub use session::{Session, SessionStore};
