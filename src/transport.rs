use super::device::RequestType;
use super::error::Result;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use std::time::Duration;

/// Request as plain data, built by a [`Device`](super::Device) for a [`Transport`] to send
#[derive(Debug, Clone)]
pub struct Request {
    pub method: RequestType,
    pub url: String,
    pub username: String,
    pub password: String,
    pub body: Option<Value>,
}

/// Response as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the device
///
/// Any status code is a successful send; only failing to get a response at all is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// [`Transport`] over plain http with Basic auth
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let builder = match request.method {
            RequestType::Get => self.client.get(&request.url),
            RequestType::Put => self.client.put(&request.url),
        }
        .basic_auth(&request.username, Some(&request.password));

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let res = builder.send().await?;
        let status = res.status().as_u16();
        log::debug!("Network connection status: {}", status);

        Ok(Response::new(status, res.text().await?))
    }
}
