//! User administration endpoints.
//!
//! Listing, fetching, permission management and removal of user accounts.
//! These endpoints require a stored session; without one the server answers
//! 401 and the call surfaces [`Error::Unauthorized`](crate::Error::Unauthorized).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

/// A CardDesk user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Permission strings such as `cards:review`. Absent in the wire format
    /// means none.
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The `/users` resource group, obtained from
/// [`ApiClient::users`](crate::ApiClient::users).
pub struct UsersApi<'c> {
    pub(crate) http: &'c HttpClient,
}

impl UsersApi<'_> {
    /// List all user accounts.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`](crate::Error::Unauthorized) without a valid
    /// session; any other non-success status as
    /// [`Error::Api`](crate::Error::Api).
    pub async fn list(&self) -> Result<Vec<User>> {
        self.http.send_json(ApiRequest::get("/users")).await
    }

    /// Fetch a single user by id.
    ///
    /// # Errors
    ///
    /// [`Error::Api`](crate::Error::Api) with a 404 status when no such user
    /// exists; [`Error::Unauthorized`](crate::Error::Unauthorized) without a
    /// valid session.
    pub async fn get(&self, id: i64) -> Result<User> {
        self.http
            .send_json(ApiRequest::get(format!("/users/{id}")))
            .await
    }

    /// Replace a user's permission set, returning the updated account.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`Self::get`]; permission strings the server
    /// does not recognize come back as [`Error::Api`](crate::Error::Api).
    pub async fn update_permissions(&self, id: i64, permissions: Vec<String>) -> Result<User> {
        let req = ApiRequest::put(format!("/users/{id}/permissions"))
            .body(json!({ "permissions": permissions }));
        self.http.send_json(req).await
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`](crate::Error::Unauthorized) without a valid
    /// session; other non-success statuses as
    /// [`Error::Api`](crate::Error::Api).
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http
            .send_unit(ApiRequest::delete(format!("/users/{id}")))
            .await
    }
}
