//! Resource Client transport: builds requests against the station API and
//! normalizes every failure into an [`ApiError`].

mod envelope;

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use volt_core::{ApiError, ResourceResult};

pub use envelope::{decode_envelope, decode_field, decode_field_or_default, Envelope};

/// HTTP client with the console's timeouts applied.
pub fn default_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(
            volt_config::DEFAULT_CONNECT_TIMEOUT_SECS,
        ))
        .user_agent(concat!("volt/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// A fully-formed request: method, path under the API base, query and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes any payload into the request body.
    pub fn json_from<T: serde::Serialize>(self, body: &T) -> ResourceResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body serialization failed: {e}")))?;
        Ok(self.json(value))
    }

    /// Path for log lines, e.g. `GET vehicles/STN001/`.
    pub fn label(&self) -> String {
        format!("{} {}/", self.method, self.segments.join("/"))
    }
}

/// Normalize an API base so joined segments land under it.
/// `http://host/api` and `http://host/api/` are equivalent.
pub(crate) fn normalize_base(base_url: &str) -> ResourceResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid api url {base_url}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidRequest(format!(
            "api url {base_url} cannot be used as a base"
        )));
    }
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    url.set_query(None);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(client: Client, base_url: &str) -> ResourceResult<Self> {
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
        })
    }

    /// Builds a client with its own connection pool and the given timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ResourceResult<Self> {
        let client = default_http_client(timeout)
            .map_err(|e| ApiError::InvalidRequest(format!("http client setup failed: {e}")))?;
        Self::new(client, base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve segments under the base, keeping the trailing slash the backend routes expect.
    pub fn url_for(&self, req: &RequestDescriptor) -> ResourceResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidRequest("cannot mutate url segments".into()))?;
            segs.pop_if_empty();
            for s in &req.segments {
                segs.push(s);
            }
            segs.push("");
        }
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(req.query.iter());
        }
        Ok(url)
    }

    /// Issue the request and return the success envelope as JSON.
    ///
    /// Transport failures, non-2xx statuses, malformed bodies and `status:"error"`
    /// envelopes all come back as `Err`; nothing panics past this point.
    pub async fn call(&self, req: RequestDescriptor) -> ResourceResult<Value> {
        let label = req.label();
        let res = self.call_inner(req).await;
        match &res {
            Ok(_) => debug!("{label} succeeded"),
            Err(e) => warn!("{label} failed: {e}"),
        }
        res
    }

    /// Issue the request and decode the whole success envelope into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, req: RequestDescriptor) -> ResourceResult<T> {
        let value = self.call(req).await?;
        decode_envelope(value)
    }

    /// Raw text variant used for CSV exports; only HTTP/transport errors apply.
    pub async fn call_text(&self, req: RequestDescriptor) -> ResourceResult<String> {
        let label = req.label();
        let res = async {
            let resp = self.send(req, CSV).await?;
            let resp = check_status(resp).await?;
            resp.text()
                .await
                .map_err(|e| ApiError::Decode(format!("body read failed: {e}")))
        }
        .await;
        if let Err(e) = &res {
            warn!("{label} failed: {e}");
        }
        res
    }

    async fn call_inner(&self, req: RequestDescriptor) -> ResourceResult<Value> {
        let resp = self.send(req, JSON).await?;
        let resp = check_status(resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| transport_error("body read failed", e))?;
        Envelope::parse(&bytes)?.into_result()
    }

    async fn send(
        &self,
        req: RequestDescriptor,
        accept: &'static str,
    ) -> ResourceResult<reqwest::Response> {
        let url = self.url_for(&req)?;
        let mut builder = self
            .client
            .request(req.method.clone(), url)
            .header(reqwest::header::ACCEPT, accept);
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        builder
            .send()
            .await
            .map_err(|e| transport_error("request failed", e))
    }
}

const JSON: &str = "application/json";
const CSV: &str = "text/csv";

fn transport_error(context: &str, e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(format!("{context}: {e}"))
    } else if e.is_decode() {
        ApiError::Decode(format!("{context}: {e}"))
    } else {
        ApiError::Transport(format!("{context}: {e}"))
    }
}

/// Non-2xx becomes `ApiError::Status`, carrying the server's message when the
/// body is an error envelope and the raw text otherwise.
async fn check_status(resp: reqwest::Response) -> ResourceResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.ok();
    let body = text.map(|t| {
        Envelope::parse(t.as_bytes())
            .ok()
            .and_then(|env| env.message)
            .unwrap_or(t)
    });
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
