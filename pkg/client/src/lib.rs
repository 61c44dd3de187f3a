//! Async client for the library backend's REST API.
//!
//! One [`ApiClient`] per base URL. Calls that need a signed-in user carry
//! `Authorization: Bearer <token>` when the client was built
//! [`with_token`](ApiClient::with_token). There is no retry and no request
//! coalescing; every call is a single fire-and-await request.

mod auth;
mod books;
mod borrow;
mod client;
mod dashboard;
mod error;
mod genres;
mod members;
mod staff;

pub use client::ApiClient;
pub use error::ApiError;
