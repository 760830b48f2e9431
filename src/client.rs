//! The top-level CardDesk API client.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, SessionInvalidated};
use crate::resources::auth::AuthApi;
use crate::resources::cards::CardsApi;
use crate::resources::users::UsersApi;
use crate::session::SessionStore;

/// Asynchronous client for the CardDesk REST API.
///
/// The client is bound to one base URL and one [`SessionStore`] for its
/// whole lifetime. Every request reads the store at send time and attaches
/// the stored token as a bearer `Authorization` header; when the server
/// answers 401 the store is cleared (token and cached identity together)
/// and the hook registered with [`Self::on_session_invalidated`] fires
/// before the error reaches the caller.
///
/// Cloning is cheap and clones share the underlying connection pool and
/// session store.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Build a client for the given configuration and session store.
    /// Configuration problems (such as a base URL without a scheme)
    /// surface here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) when the base URL
    /// lacks an `http://` or `https://` scheme, or
    /// [`Error::Http`](crate::Error::Http) when the underlying client
    /// cannot be built.
    pub fn new(config: Config, session: SessionStore) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config, session)?,
        })
    }

    /// Build a client from `CARDDESK_*` environment variables, using the
    /// session file under the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) when
    /// `CARDDESK_BASE_URL` is missing or malformed, or when no config
    /// directory exists to hold the session file.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?, SessionStore::on_disk()?)
    }

    /// Register a callback fired after a 401 response has already cleared
    /// the stored session. Typical use is routing the user back to a login
    /// screen. The callback runs on whichever task hit the 401, so keep it
    /// quick and non-blocking.
    #[must_use]
    pub fn on_session_invalidated<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SessionInvalidated) + Send + Sync + 'static,
    {
        self.http.set_invalidated_hook(Arc::new(hook));
        self
    }

    /// The session store this client reads before every request. Set it
    /// after a successful login, clear it to log out locally.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        self.http.session()
    }

    /// Login and registration endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi { http: &self.http }
    }

    /// User administration endpoints.
    #[must_use]
    pub const fn users(&self) -> UsersApi<'_> {
        UsersApi { http: &self.http }
    }

    /// Card request endpoints.
    #[must_use]
    pub const fn cards(&self) -> CardsApi<'_> {
        CardsApi { http: &self.http }
    }
}
