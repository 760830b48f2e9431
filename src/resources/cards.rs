//! Card request endpoints.
//!
//! Cards move through a small workflow: they are created `pending`, then a
//! reviewer moves them to `approved` or `rejected`, optionally attaching
//! notes. Listing can filter on a single status server-side.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

/// Workflow state of a card request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Pending,
    Approved,
    Rejected,
}

impl CardStatus {
    /// The wire spelling, also used for the `status` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card request as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CardStatus,
    /// Reviewer notes attached by the last status change, if any.
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a card request. New cards always start `pending`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCard {
    /// A card request with the given title and no description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Attach a free-form description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: CardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// The `/cards` resource group, obtained from
/// [`ApiClient::cards`](crate::ApiClient::cards).
pub struct CardsApi<'c> {
    pub(crate) http: &'c HttpClient,
}

impl CardsApi<'_> {
    /// List card requests, optionally filtered to one status. With `None`
    /// the request carries no `status` parameter and the server returns
    /// every card.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`](crate::Error::Unauthorized) without a valid
    /// session; any other non-success status as
    /// [`Error::Api`](crate::Error::Api).
    pub async fn list(&self, status: Option<CardStatus>) -> Result<Vec<Card>> {
        let mut req = ApiRequest::get("/cards");
        if let Some(status) = status {
            req = req.query("status", status.as_str());
        }
        self.http.send_json(req).await
    }

    /// Create a card request.
    ///
    /// # Errors
    ///
    /// [`Error::Api`](crate::Error::Api) when the server rejects the payload
    /// (for example an empty title);
    /// [`Error::Unauthorized`](crate::Error::Unauthorized) without a valid
    /// session.
    pub async fn create(&self, card: &NewCard) -> Result<Card> {
        let req = ApiRequest::post("/cards").body(serde_json::to_value(card)?);
        self.http.send_json(req).await
    }

    /// Move a card to a new status, optionally attaching reviewer notes.
    /// Without notes the update payload omits the field entirely.
    ///
    /// # Errors
    ///
    /// [`Error::Api`](crate::Error::Api) with a 404 status when no such card
    /// exists, or when the server refuses the transition;
    /// [`Error::Unauthorized`](crate::Error::Unauthorized) without a valid
    /// session.
    pub async fn update_status(
        &self,
        id: i64,
        status: CardStatus,
        notes: Option<&str>,
    ) -> Result<Card> {
        let req = ApiRequest::put(format!("/cards/{id}/status"))
            .body(serde_json::to_value(StatusUpdate { status, notes })?);
        self.http.send_json(req).await
    }

    /// Delete a card request.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`Self::list`].
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http
            .send_unit(ApiRequest::delete(format!("/cards/{id}")))
            .await
    }
}
