//! The Rust SDK for the TaskMind authentication backend.
//!
//! If you're just getting started, take a look at the [`Client`] and the
//! [`SessionStore`]. The client talks to the backend's email one-time-code
//! endpoints; the session store wraps those calls and tracks who is signed
//! in, with an optional on-disk snapshot that survives restarts.
//!
//! # Examples
//! ```no_run
//! use taskmind_auth::{Client, Error, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder()
//!         .with_project_id("my-project")
//!         .build()?;
//!
//!     let store = SessionStore::new(client.auth.clone());
//!
//!     // Send a one-time code to the user's inbox...
//!     store.request_code("you@example.com").await?;
//!
//!     // ...and exchange it for a session.
//!     let user = store.verify_code("you@example.com", "123456").await?;
//!     assert!(store.is_authenticated());
//!     println!("signed in as {}", user.email);
//!
//!     store.logout().await?;
//!
//!     Ok(())
//! }
//! ```
pub mod client;
pub mod error;
mod http;
mod serde;

pub mod auth;
pub mod store;

pub use client::Client;
pub use error::Error;
pub use store::{SessionState, SessionStore};

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");
