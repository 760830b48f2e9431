//! Resource groups of the CardDesk API.
//!
//! Each module covers one group of endpoints:
//! - `auth`: login and registration (`/auth/*`)
//! - `users`: user administration (`/users/*`)
//! - `cards`: card requests and their approval workflow (`/cards/*`)
//!
//! All groups use the shared HTTP client and error handling.

pub mod auth;
pub mod cards;
pub mod users;
