//! Login and registration endpoints.
//!
//! These calls go through the same path as every other request, so a stored
//! token is attached here too and a 401 (bad credentials) clears it like any
//! other authentication failure. Logging in never writes the session store;
//! the application decides whether to persist the returned token, typically
//! via [`SessionStore::set`](crate::SessionStore::set).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::resources::users::User;

/// Login credentials for an existing account.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Passwords stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration details for a new account.
#[derive(Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful login: the bearer token and the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// The `/auth` resource group, obtained from
/// [`ApiClient::auth`](crate::ApiClient::auth).
pub struct AuthApi<'c> {
    pub(crate) http: &'c HttpClient,
}

impl AuthApi<'_> {
    /// Exchange credentials for a bearer token and the account it belongs to.
    ///
    /// # Errors
    ///
    /// Rejected credentials surface as
    /// [`Error::Unauthorized`](crate::Error::Unauthorized), and like every
    /// 401 they clear any session already stored. Other failures per
    /// [`Error`](crate::Error).
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let req = ApiRequest::post("/auth/login").body(serde_json::to_value(credentials)?);
        self.http.send_json(req).await
    }

    /// Create a new account, returning it. Registering does not log the new
    /// account in.
    ///
    /// # Errors
    ///
    /// [`Error::Api`](crate::Error::Api) when the server rejects the details
    /// (for example a duplicate email); transport failures per
    /// [`Error`](crate::Error).
    pub async fn register(&self, new_user: &NewUser) -> Result<User> {
        let req = ApiRequest::post("/auth/register").body(serde_json::to_value(new_user)?);
        self.http.send_json(req).await
    }
}
