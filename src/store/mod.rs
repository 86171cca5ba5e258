//! Client-side session state.
//!
//! The [`SessionStore`] owns the current [`SessionState`](crate::SessionState)
//! and mediates every authentication transition: requesting a one-time code,
//! exchanging it for a session and logging out. It can optionally persist a
//! snapshot of the signed-in user so a restart picks the session back up.
//!
//! # Examples
//! ```no_run
//! use taskmind_auth::{Client, Error, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!     let dir = taskmind_auth::store::default_state_dir().expect("no data dir");
//!     let store = SessionStore::with_storage(client.auth.clone(), dir);
//!
//!     if !store.is_authenticated() {
//!         store.request_code("you@example.com").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
mod persist;
mod session;

pub use persist::{default_state_dir, STORAGE_KEY};
pub use session::{SessionState, SessionStore};
