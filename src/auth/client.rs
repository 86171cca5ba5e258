use async_trait::async_trait;
use std::fmt::Debug as FmtDebug;
use tracing::instrument;

use crate::{auth::model::*, auth::AuthService, error::Result, http};

/// Provides methods to work with the email one-time-code endpoints.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
}

impl Client {
    pub(crate) fn new(http_client: http::Client) -> Self {
        Self { http_client }
    }

    /// Send a one-time code to the given email address.
    #[instrument(skip(self))]
    pub async fn send_code<E>(&self, email: E) -> Result<()>
    where
        E: Into<String> + FmtDebug,
    {
        let req = SendCodeRequest {
            email: email.into(),
        };
        self.http_client
            .post("/v1/auth/send-code", &req)
            .await?
            .check_error()
            .await?;
        Ok(())
    }

    /// Exchange a one-time code for an authenticated [`User`]. Codes are
    /// single-use on the service side; a second exchange of the same code
    /// fails.
    #[instrument(skip(self, code))]
    pub async fn verify_code<E, C>(&self, email: E, code: C) -> Result<User>
    where
        E: Into<String> + FmtDebug,
        C: Into<String>,
    {
        let req = VerifyCodeRequest {
            email: email.into(),
            code: code.into(),
        };
        let res: VerifyCodeResponse = self
            .http_client
            .post("/v1/auth/verify-code", &req)
            .await?
            .json()
            .await?;
        Ok(res.user)
    }

    /// Terminate the remote session.
    #[instrument(skip(self))]
    pub async fn end_session(&self) -> Result<()> {
        self.http_client
            .post_empty("/v1/auth/logout")
            .await?
            .check_error()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthService for Client {
    async fn send_code(&self, email: &str) -> Result<()> {
        Client::send_code(self, email).await
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<User> {
        Client::verify_code(self, email, code).await
    }

    async fn end_session(&self) -> Result<()> {
        Client::end_session(self).await
    }
}
