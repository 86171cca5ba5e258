use http::header;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{AuthServiceError, Error, Result};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Client is a wrapper around `reqwest::Client` which provides automatically
/// prepending the base url.
///
/// Requests are issued exactly once: the session operations built on top of
/// this client promise a single outbound call per invocation, so no retry
/// layer sits here.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    base_url: Url,
    inner: reqwest::Client,
}

#[derive(Clone)]
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
}

impl Client {
    /// Creates a new client.
    pub(crate) fn new<U, P>(base_url: U, project_id: P) -> Result<Self>
    where
        U: AsRef<str>,
        P: Into<String>,
    {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        let project_id = project_id.into();

        let mut default_headers = header::HeaderMap::new();
        let project_id_header_value =
            header::HeaderValue::from_str(&project_id).map_err(|_e| Error::InvalidProjectId)?;
        default_headers.insert("X-Project-Id", project_id_header_value);

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(Error::HttpClientSetup)?;

        Ok(Self {
            base_url,
            inner: http_client,
        })
    }

    async fn execute<P>(&self, method: http::Method, path: P, body: Body) -> Result<Response>
    where
        P: AsRef<str>,
    {
        let url = self
            .base_url
            .join(path.as_ref().trim_start_matches('/'))
            .map_err(Error::InvalidUrl)?;

        let mut req = self.inner.request(method.clone(), url);
        match body {
            Body::Empty => {}
            Body::Json(value) => req = req.json(&value),
        }

        let res = self
            .inner
            .execute(req.build().map_err(Error::Http)?)
            .await
            .map(|res| Response::new(res, method, path.as_ref().to_string()))
            .map_err(Error::Http)?;

        Ok(res)
    }

    pub(crate) async fn post<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::POST,
            path,
            Body::Json(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }

    pub(crate) async fn post_empty<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::POST, path, Body::Empty).await
    }
}

#[derive(Debug)]
pub(crate) struct Response {
    inner: reqwest::Response,
    method: http::Method,
    path: String,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response, method: http::Method, path: String) -> Self {
        Self {
            inner,
            method,
            path,
        }
    }

    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.check_error()
            .await?
            .inner
            .json::<T>()
            .await
            .map_err(Error::Deserialize)
    }

    pub(crate) async fn check_error(self) -> Result<Response> {
        let status = self.inner.status();
        if !status.is_success() {
            // Try to decode the error
            let e = match self.inner.json::<AuthServiceError>().await {
                Ok(mut e) => {
                    e.status = status.as_u16();
                    e.method = self.method;
                    e.path = self.path;
                    Error::Auth(e)
                }
                Err(_e) => {
                    // Decoding failed, we still want an AuthServiceError
                    Error::Auth(AuthServiceError::new(
                        status.as_u16(),
                        self.method,
                        self.path,
                        None,
                    ))
                }
            };
            return Err(e);
        }

        Ok(self)
    }
}

impl From<Response> for reqwest::Response {
    fn from(res: Response) -> Self {
        res.inner
    }
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::{Client, Error};

    #[tokio::test]
    async fn test_service_error_decoded() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start();
        let send_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/auth/send-code");
            then.status(429)
                .json_body(json!({ "message": "too many codes requested" }));
        });

        let client = Client::builder()
            .no_env()
            .with_url(server.base_url())
            .with_project_id("proj-test")
            .build()?;

        match client.auth.send_code("a@b.com").await {
            Err(Error::Auth(e)) => {
                assert_eq!(e.status, 429);
                assert_eq!(e.path, "/v1/auth/send-code");
                assert_eq!(e.message.as_deref(), Some("too many codes requested"));
            }
            res => panic!("Expected auth service error, got {:?}", res),
        }

        send_mock.assert_hits_async(1).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_error_still_surfaces() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/auth/logout");
            then.status(500).body("<html>oops</html>");
        });

        let client = Client::builder()
            .no_env()
            .with_url(server.base_url())
            .with_project_id("proj-test")
            .build()?;

        match client.auth.end_session().await {
            Err(Error::Auth(e)) => {
                assert_eq!(e.status, 500);
                assert_eq!(e.message, None);
            }
            res => panic!("Expected auth service error, got {:?}", res),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_project_id_header_sent() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start();
        let send_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/auth/send-code")
                .header("X-Project-Id", "proj-test")
                .json_body(json!({ "email": "a@b.com" }));
            then.status(200).json_body(json!({}));
        });

        let client = Client::builder()
            .no_env()
            .with_url(server.base_url())
            .with_project_id("proj-test")
            .build()?;

        client.auth.send_code("a@b.com").await?;

        send_mock.assert_hits_async(1).await;
        Ok(())
    }
}
