//! The top-level client for the TaskMind backend API.
use std::env;

use crate::{
    auth,
    error::{Error, Result},
    http,
};

/// Cloud URL is the URL for the hosted TaskMind backend.
static CLOUD_URL: &str = "https://api.taskmind.dev";

/// The client is the entrypoint of the whole SDK.
///
/// You can create it using [`Client::builder`] or [`Client::new`].
///
/// # Examples
/// ```
/// use taskmind_auth::{Client, Error};
///
/// fn main() -> Result<(), Error> {
///     // Create a new client and get the project id from the environment
///     // variable TASKMIND_PROJECT_ID.
///     # std::env::set_var("TASKMIND_PROJECT_ID", "my-project");
///     let client = Client::new()?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables.
///     let client = Client::builder()
///         .with_project_id("my-project")
///         .build()?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    pub auth: auth::Client,
}

impl Client {
    /// Creates a new client. If you want to configure it, use [`Client::builder`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Get the url (cloned).
    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Get client version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// This builder is used to create a new client.
pub struct Builder {
    env_fallback: bool,
    url: Option<String>,
    project_id: Option<String>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            url: None,
            project_id: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Add a project id to the client. If this is not set, the project id
    /// will be read from the environment variable `TASKMIND_PROJECT_ID`.
    pub fn with_project_id<S: Into<String>>(mut self, project_id: S) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Add an URL to the client. This is only meant for testing purposes, you
    /// don't need to set it.
    #[doc(hidden)]
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let env_fallback = self.env_fallback;

        let mut project_id = self.project_id.unwrap_or_default();
        if project_id.is_empty() && env_fallback {
            project_id = env::var("TASKMIND_PROJECT_ID").unwrap_or_default();
        }
        if project_id.is_empty() {
            return Err(Error::MissingProjectId);
        }

        let mut url = self.url.unwrap_or_default();
        if url.is_empty() && env_fallback {
            url = env::var("TASKMIND_URL").unwrap_or_default();
        }
        if url.is_empty() {
            url = CLOUD_URL.to_string();
        }

        let http_client = http::Client::new(url.clone(), project_id)?;

        Ok(Client {
            url,
            auth: auth::Client::new(http_client),
        })
    }
}
