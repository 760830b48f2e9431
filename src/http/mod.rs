//! HTTP transport layer for the CardDesk API.
//!
//! This module handles all HTTP communication with the CardDesk REST API:
//! request construction against the fixed base URL, bearer authentication
//! from the session store, tracing, and the shared response-to-error
//! mapping every resource group goes through.

mod client;

pub use client::SessionInvalidated;

pub(crate) use client::{ApiRequest, HttpClient};
