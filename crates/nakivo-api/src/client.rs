// Director HTTP client
//
// Wraps `reqwest::Client` with the fixed router URL, envelope encoding and
// decoding, and failure classification. The domain facades (authentication,
// jobs) live in their own modules and call back into `Client::call`.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::AuthenticationService;
use crate::context::CallContext;
use crate::envelope::{DecodeError, RequestEnvelope, ResponseEnvelope};
use crate::error::Error;
use crate::jobs::JobService;
use crate::transport::TransportConfig;

/// Path of the director's single RPC endpoint.
pub const ROUTER_PATH: &str = "/c/router";

const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP-level view of a director response, captured before the body is
/// consumed. Returned with every reply and attached to decode and
/// application errors so callers can inspect status and headers.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
}

impl From<&reqwest::Response> for RawResponse {
    fn from(resp: &reqwest::Response) -> Self {
        Self {
            status: resp.status(),
            headers: resp.headers().clone(),
            url: resp.url().clone(),
        }
    }
}

/// A successful call: the decoded envelope plus the HTTP response it came in.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub envelope: ResponseEnvelope<T>,
    pub response: RawResponse,
}

impl<T> Reply<T> {
    /// The typed payload, if the director sent one.
    pub fn data(&self) -> Option<&T> {
        self.envelope.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.envelope.data
    }
}

/// Client for a NAKIVO director's JSON-RPC router.
///
/// Immutable once built and cheap to clone; every clone shares the same
/// connection pool and cookie jar. Safe to use from many tasks at once.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    router_url: Url,
}

impl Client {
    /// Create a client for `https://{address}:{port}/c/router` with the
    /// default transport (self-signed certs accepted, session cookie jar).
    pub fn new(address: &str, port: u16) -> Result<Self, Error> {
        Self::with_transport(address, port, &TransportConfig::default())
    }

    /// Create a client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically: the director keeps the login session in a cookie.
    pub fn with_transport(
        address: &str,
        port: u16,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let router_url = router_url(address, port)?;
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, router_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller owns TLS, timeouts, and cookie handling. Without a cookie
    /// store the session from `login` is not carried to later calls.
    pub fn with_http_client(
        http: reqwest::Client,
        address: &str,
        port: u16,
    ) -> Result<Self, Error> {
        let router_url = router_url(address, port)?;
        Ok(Self { http, router_url })
    }

    /// Create a client that posts to an explicit router URL, e.g. behind a
    /// reverse proxy or against a local test server.
    pub fn with_router_url(http: reqwest::Client, router_url: Url) -> Self {
        Self { http, router_url }
    }

    /// The URL every call is POSTed to.
    pub fn router_url(&self) -> &Url {
        &self.router_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Login, session check, and logout (`AuthenticationManagement`).
    pub fn authentication(&self) -> AuthenticationService<'_> {
        AuthenticationService::new(self)
    }

    /// Job and job-group inventory (`JobSummaryManagement`).
    pub fn jobs(&self) -> JobService<'_> {
        JobService::new(self)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one envelope and return the untyped reply.
    ///
    /// Fails with the context error if `ctx` is already done, or finishes
    /// while the call is in flight. Transport failures are reported as
    /// `Error::Transport` unless the context is done by then, in which case
    /// the context error wins.
    pub async fn call(
        &self,
        ctx: &CallContext,
        request: &RequestEnvelope,
    ) -> Result<Reply<Value>, Error> {
        let (envelope, response, _) = self.round_trip(ctx, request).await?;
        Ok(Reply { envelope, response })
    }

    /// Send one envelope and convert `data` into `T`.
    pub(crate) async fn call_typed<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        request: &RequestEnvelope,
    ) -> Result<Reply<T>, Error> {
        let (envelope, response, body) = self.round_trip(ctx, request).await?;

        match envelope.into_typed() {
            Ok(envelope) => Ok(Reply { envelope, response }),
            Err(e) => Err(Error::Deserialization {
                message: format!(
                    "unexpected data for {}.{}: {e}",
                    request.action(),
                    request.method()
                ),
                body: String::from_utf8_lossy(&body).into_owned(),
                response: Box::new(response),
            }),
        }
    }

    /// Encode, POST, decode, and classify.
    async fn round_trip(
        &self,
        ctx: &CallContext,
        request: &RequestEnvelope,
    ) -> Result<(ResponseEnvelope, RawResponse, Bytes), Error> {
        let payload = request.encode()?;
        ctx.check()?;

        debug!(
            action = request.action(),
            method = request.method(),
            "POST {}",
            self.router_url
        );

        let send = self
            .http
            .post(self.router_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send();

        let resp = ctx.run(send).await?.map_err(|e| transport_error(ctx, e))?;

        let raw = RawResponse::from(&resp);
        let body = ctx
            .run(resp.bytes())
            .await?
            .map_err(|e| transport_error(ctx, e))?;

        trace!(status = %raw.status, bytes = body.len(), "router response");

        let envelope = match ResponseEnvelope::decode(&body) {
            Ok(envelope) => envelope,
            Err(DecodeError::Empty) => {
                return Err(Error::EmptyResponse {
                    response: Box::new(raw),
                });
            }
            Err(DecodeError::Malformed(e)) => {
                let body = String::from_utf8_lossy(&body).into_owned();
                let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
                return Err(Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                    response: Box::new(raw),
                });
            }
        };

        if let Some(error) = envelope.failure() {
            debug!(%error, "director reported failure");
            return Err(Error::Api {
                error,
                response: Box::new(raw),
            });
        }

        // The director reports failures in the envelope; the status code is
        // not consulted for classification.
        if !raw.status.is_success() {
            warn!(
                status = %raw.status,
                action = request.action(),
                method = request.method(),
                "non-success HTTP status with a non-failing envelope, treating as success"
            );
        }

        Ok((envelope, raw, body))
    }
}

/// A failed send or body read reports the context error if the context is
/// done by then.
fn transport_error(ctx: &CallContext, err: reqwest::Error) -> Error {
    ctx.error().unwrap_or(Error::Transport(err))
}

/// Build `https://{address}:{port}/c/router`.
fn router_url(address: &str, port: u16) -> Result<Url, Error> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::InvalidAddress);
    }
    if port == 0 {
        return Err(Error::InvalidPort);
    }

    // Bare IPv6 literals need brackets in the authority.
    let host = if address.contains(':') && !address.starts_with('[') {
        format!("[{address}]")
    } else {
        address.to_owned()
    };

    Ok(Url::parse(&format!("https://{host}:{port}{ROUTER_PATH}"))?)
}
