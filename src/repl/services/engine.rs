//! # HTTP Execution Engine
//!
//! Issues one HTTP/1.1 request over a connection it opens itself, so every
//! phase can be timed: name resolution, TCP connect, TLS handshake, first
//! response byte and body completion. The body is streamed frame by frame and
//! progress is reported for each chunk.
//!
//! Any completed exchange is a success at this layer, whatever its status code.
//! Dropping the returned future closes the socket.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH,
    CONTENT_TYPE, HOST, USER_AGENT,
};
use hyper::{Request, Uri};
use hyper_util::rt::TokioIo;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use super::decoder::{charset_of, decode_text, decompress, ACCEPTED_ENCODINGS};
use crate::repl::models::{DownloadProgress, HttpMethod, PhaseCheckpoints, PhaseTimings};

pub const USER_AGENT_VALUE: &str = concat!("postboy/", env!("CARGO_PKG_VERSION"));

/// Transport-level failures. None of these mean the server answered.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("DNS lookup failed for {host}: {reason}")]
    Dns { host: String, reason: String },

    #[error("Connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("HTTP protocol error: {0}")]
    Protocol(String),

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

impl From<hyper::Error> for EngineError {
    fn from(err: hyper::Error) -> Self {
        EngineError::Protocol(err.to_string())
    }
}

/// A request that already passed local validation
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Unique names; the caller has applied last-wins
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub metrics: PhaseTimings,
}

/// Receives download progress while a body streams in
pub type ProgressSink = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

#[async_trait]
pub trait HttpEngine: Send + Sync {
    async fn execute(
        &self,
        request: EngineRequest,
        progress: Option<ProgressSink>,
    ) -> Result<EngineResponse, EngineError>;
}

/// Aborts the connection driver when the exchange ends or is dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Where a URL points, resolved enough to open a socket
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    is_https: bool,
    /// Host without IPv6 brackets
    host: String,
    port: u16,
    /// Value for the `Host` header
    authority: String,
    /// Origin-form request target
    path_and_query: String,
}

impl Target {
    fn parse(url: &str) -> Result<Self, EngineError> {
        let invalid = |reason: &str| EngineError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = url.trim().parse().map_err(|e| invalid(&format!("{e}")))?;
        let is_https = match uri.scheme_str() {
            Some(s) if s.eq_ignore_ascii_case("https") => true,
            Some(s) if s.eq_ignore_ascii_case("http") => false,
            Some(other) => return Err(invalid(&format!("unsupported scheme '{other}'"))),
            None => return Err(invalid("missing http:// or https://")),
        };
        let raw_host = uri.host().ok_or_else(|| invalid("missing host"))?;
        let host = raw_host.trim_start_matches('[').trim_end_matches(']').to_string();
        let port = uri.port_u16().unwrap_or(if is_https { 443 } else { 80 });
        let authority = match uri.port_u16() {
            Some(port) => format!("{raw_host}:{port}"),
            None => raw_host.to_string(),
        };
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .filter(|pq| !pq.is_empty())
            .unwrap_or_else(|| "/".to_string());

        Ok(Self {
            is_https,
            host,
            port,
            authority,
            path_and_query,
        })
    }
}

/// Engine over tokio sockets, rustls and a hyper HTTP/1.1 connection
pub struct HyperEngine {
    tls: Arc<ClientConfig>,
}

impl HyperEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let provider = Arc::new(tokio_rustls::rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| EngineError::Tls(e.to_string()))?
            .with_root_certificates(roots)
            .with_no_client_auth();

        Ok(Self {
            tls: Arc::new(config),
        })
    }

    async fn connect(addrs: &[SocketAddr]) -> Result<TcpStream, EngineError> {
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    tracing::debug!("Connected to {}", addr);
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(EngineError::Connect {
                        addr: addr.to_string(),
                        source: e,
                    });
                }
            }
        }
        Err(last_error.unwrap_or_else(|| EngineError::Dns {
            host: String::new(),
            reason: "no addresses".to_string(),
        }))
    }
}

fn build_request(
    request: &EngineRequest,
    target: &Target,
) -> Result<Request<Full<Bytes>>, EngineError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| EngineError::Protocol(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| EngineError::Protocol(format!("invalid value for header {name}: {e}")))?;
        headers.insert(name, value);
    }

    let mut set_default = |name: HeaderName, value: &str| -> Result<(), EngineError> {
        if !headers.contains_key(&name) {
            let value = HeaderValue::from_str(value)
                .map_err(|e| EngineError::Protocol(e.to_string()))?;
            headers.insert(name, value);
        }
        Ok(())
    };

    set_default(HOST, &target.authority)?;
    set_default(USER_AGENT, USER_AGENT_VALUE)?;
    set_default(ACCEPT_ENCODING, ACCEPTED_ENCODINGS)?;

    let body = request.body.clone().unwrap_or_default();
    if !body.is_empty() {
        set_default(CONTENT_TYPE, "application/json")?;
        set_default(CONTENT_LENGTH, &body.len().to_string())?;
    }

    let mut builder = Request::builder()
        .method(request.method.as_str())
        .uri(target.path_and_query.as_str());
    if let Some(map) = builder.headers_mut() {
        map.extend(headers);
    }
    builder
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| EngineError::Protocol(e.to_string()))
}

/// Response headers flattened to one value per name, repeats joined by ", "
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    flat
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn exchange<S>(
    stream: S,
    request: Request<Full<Bytes>>,
    mut checkpoints: PhaseCheckpoints,
    progress: Option<ProgressSink>,
) -> Result<EngineResponse, EngineError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, connection) =
        hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
    let _driver = AbortOnDrop(tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!("Connection closed with error: {}", e);
        }
    }));

    let response = sender.send_request(request).await?;
    checkpoints.ttfb = Instant::now();

    let (parts, mut body) = response.into_parts();
    let declared_length = header_str(&parts.headers, &CONTENT_LENGTH)
        .and_then(|v| v.trim().parse::<u64>().ok());

    let mut raw = Vec::new();
    while let Some(frame) = body.frame().await {
        let frame = frame?;
        if let Ok(chunk) = frame.into_data() {
            raw.extend_from_slice(&chunk);
            if let Some(sink) = &progress {
                let elapsed = checkpoints.ttfb.elapsed().as_secs_f64();
                let received = raw.len() as u64;
                sink(DownloadProgress {
                    received,
                    total: declared_length.unwrap_or(0),
                    bytes_per_sec: if elapsed > 0.0 {
                        received as f64 / elapsed
                    } else {
                        0.0
                    },
                });
            }
        }
    }
    checkpoints.end = Instant::now();

    let measured_length = raw.len() as u64;
    let encoding = header_str(&parts.headers, &CONTENT_ENCODING).unwrap_or("");
    let decompressed = decompress(Bytes::from(raw), encoding)
        .map_err(|e| EngineError::Decode(e.to_string()))?;
    let charset = header_str(&parts.headers, &CONTENT_TYPE).and_then(charset_of);
    let text = decode_text(&decompressed, charset);

    Ok(EngineResponse {
        status: parts.status.as_u16(),
        status_text: parts
            .status
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
        headers: flatten_headers(&parts.headers),
        body: text,
        metrics: PhaseTimings::from_checkpoints(
            &checkpoints,
            declared_length.unwrap_or(measured_length),
        ),
    })
}

#[async_trait]
impl HttpEngine for HyperEngine {
    async fn execute(
        &self,
        request: EngineRequest,
        progress: Option<ProgressSink>,
    ) -> Result<EngineResponse, EngineError> {
        let target = Target::parse(&request.url)?;
        let http_request = build_request(&request, &target)?;
        tracing::info!("{} {}", request.method, request.url);

        let mut checkpoints = PhaseCheckpoints::starting_at(Instant::now());

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((target.host.as_str(), target.port))
            .await
            .map_err(|e| EngineError::Dns {
                host: target.host.clone(),
                reason: e.to_string(),
            })?
            .collect();
        if addrs.is_empty() {
            return Err(EngineError::Dns {
                host: target.host.clone(),
                reason: "no addresses found".to_string(),
            });
        }
        checkpoints.dns = Instant::now();

        let tcp = Self::connect(&addrs).await?;
        checkpoints.tcp = Instant::now();

        if target.is_https {
            let server_name = ServerName::try_from(target.host.clone())
                .map_err(|e| EngineError::Tls(e.to_string()))?;
            let stream = TlsConnector::from(Arc::clone(&self.tls))
                .connect(server_name, tcp)
                .await
                .map_err(|e| EngineError::Tls(e.to_string()))?;
            checkpoints.tls = Some(Instant::now());
            exchange(stream, http_request, checkpoints, progress).await
        } else {
            exchange(tcp, http_request, checkpoints, progress).await
        }
    }
}
