//! Email one-time-code authentication.
//!
//! You're probably looking for the [`Client`], or for
//! [`SessionStore`](crate::SessionStore) if you want session state tracked
//! for you.
//!
//! # Examples
//! ```no_run
//! use taskmind_auth::{Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     client.auth.send_code("you@example.com").await?;
//!     let user = client.auth.verify_code("you@example.com", "123456").await?;
//!     println!("hello, {}", user.name);
//!
//!     client.auth.end_session().await?;
//!
//!     Ok(())
//! }
//! ```
mod client;
mod model;

pub use client::Client;
pub use model::*;

use async_trait::async_trait;

use crate::error::Result;

/// The contract of the remote authentication service.
///
/// [`Client`] implements this over HTTP; tests substitute their own
/// implementations to drive a [`SessionStore`](crate::SessionStore) without a
/// server.
#[async_trait]
pub trait AuthService {
    /// Send a one-time code to the given email address.
    async fn send_code(&self, email: &str) -> Result<()>;

    /// Exchange a one-time code for an authenticated [`User`].
    async fn verify_code(&self, email: &str, code: &str) -> Result<User>;

    /// Terminate the remote session.
    async fn end_session(&self) -> Result<()>;
}
