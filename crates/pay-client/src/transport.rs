//! Transport selection and implementations.
//!
//! Two transports exist: a reqwest-based one (TLS, connection pooling) and a
//! minimal HTTP/1.1-over-TCP one with no dependencies beyond the runtime.
//! Selection happens once per client: an explicit preference is used as-is
//! with no fallback, while auto-detection probes candidates in fixed priority
//! order (reqwest first, socket last) and binds to the first that constructs.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{ApiRequest, RequestBody, RequestMethod};
use crate::response::RawResponse;

/// A concrete transport implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// reqwest-based transport: TLS, pooling, compression.
    Http,
    /// Plain HTTP/1.1 over a TCP socket. No TLS.
    Socket,
}

/// The bound transport of a client.
#[derive(Debug, Clone)]
pub enum Transport {
    Http(HttpTransport),
    Socket(SocketTransport),
}

impl Transport {
    /// Select and construct a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Config` when an explicitly requested transport
    /// cannot be constructed; no fallback is attempted for explicit choices.
    pub fn select(config: &ClientConfig) -> Result<Self> {
        match config.transport {
            Some(TransportKind::Http) => Ok(Transport::Http(HttpTransport::new(config)?)),
            Some(TransportKind::Socket) => Ok(Transport::Socket(SocketTransport::new(config))),
            None => match HttpTransport::new(config) {
                Ok(transport) => Ok(Transport::Http(transport)),
                Err(err) => {
                    warn!(error = %err, "http transport unavailable, falling back to socket");
                    Ok(Transport::Socket(SocketTransport::new(config)))
                }
            },
        }
    }

    /// The kind of the bound transport.
    pub fn kind(&self) -> TransportKind {
        match self {
            Transport::Http(_) => TransportKind::Http,
            Transport::Socket(_) => TransportKind::Socket,
        }
    }

    /// Send a request and return the raw response.
    pub async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        match self {
            Transport::Http(transport) => transport.send(request).await,
            Transport::Socket(transport) => transport.send(request).await,
        }
    }
}

/// reqwest-based transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Build the transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(ref path) = config.ca_bundle {
            let pem = std::fs::read(path).map_err(|e| {
                Error::with_source(
                    ErrorKind::Config(format!("cannot read CA bundle {}", path.display())),
                    e,
                )
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::with_source(
                    ErrorKind::Config(format!("invalid CA bundle {}", path.display())),
                    e,
                )
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if !config.verify_certificates {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner })
    }

    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), request.full_url())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(value),
                RequestBody::Text(text) => req.body(text.clone()),
                RequestBody::Bytes(bytes) => req.body(bytes.clone()),
            };
        }

        let response = req.send().await?;
        RawResponse::from_reqwest(response).await
    }
}

/// Minimal HTTP/1.1 transport over a TCP socket.
///
/// Supports plain `http` URLs only; TLS requires the reqwest transport. The
/// connection is not reused (`Connection: close`).
#[derive(Debug, Clone)]
pub struct SocketTransport {
    connect_timeout: Duration,
    user_agent: String,
}

impl SocketTransport {
    /// Build the transport from client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            user_agent: config.user_agent.clone(),
        }
    }

    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let url = url::Url::parse(&request.full_url())?;

        if url.scheme() != "http" {
            return Err(Error::new(ErrorKind::Config(format!(
                "socket transport supports plain http only, cannot send to '{}' URL",
                url.scheme()
            ))));
        }

        let host = url
            .host_str()
            .ok_or_else(|| Error::new(ErrorKind::InvalidUrl("URL has no host".to_string())))?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);

        let stream = tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect((host.as_str(), port)),
        )
        .await
        .map_err(|_| Error::new(ErrorKind::Timeout))?
        .map_err(|e| Error::with_source(ErrorKind::Connection(e.to_string()), e))?;

        let wire = self.encode(request, &url, &host, port)?;

        // One deadline covers the full exchange after connect.
        let raw = tokio::time::timeout(request.timeout, exchange(stream, &wire))
            .await
            .map_err(|_| Error::new(ErrorKind::Timeout))??;

        debug!(bytes = raw.len(), "socket transport response received");
        parse_response(&raw, request.method == RequestMethod::Head)
    }

    /// Serialize the request into HTTP/1.1 wire format.
    fn encode(&self, request: &ApiRequest, url: &url::Url, host: &str, port: u16) -> Result<Vec<u8>> {
        let body: Vec<u8> = match &request.body {
            Some(RequestBody::Json(value)) => serde_json::to_vec(value)?,
            Some(RequestBody::Text(text)) => text.clone().into_bytes(),
            Some(RequestBody::Bytes(bytes)) => bytes.to_vec(),
            None => Vec::new(),
        };

        let mut path_and_query = url.path().to_string();
        if let Some(query) = url.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let host_header = if port == 80 {
            host.to_string()
        } else {
            format!("{}:{}", host, port)
        };

        // Framing headers are owned by the preamble; a caller-set user-agent
        // overrides the configured one.
        let user_agent = request
            .headers
            .get("user-agent")
            .unwrap_or(&self.user_agent);

        let mut wire = format!(
            "{} {} HTTP/1.1\r\nhost: {}\r\nconnection: close\r\nuser-agent: {}\r\ncontent-length: {}\r\n",
            request.method.as_str(),
            path_and_query,
            host_header,
            user_agent,
            body.len(),
        )
        .into_bytes();

        for (name, value) in &request.headers {
            if matches!(
                name.as_str(),
                "host" | "connection" | "user-agent" | "content-length"
            ) {
                continue;
            }
            wire.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        wire.extend_from_slice(b"\r\n");
        wire.extend_from_slice(&body);

        Ok(wire)
    }
}

/// Write the request and read the full response (`Connection: close`).
async fn exchange(mut stream: TcpStream, wire: &[u8]) -> Result<Vec<u8>> {
    stream
        .write_all(wire)
        .await
        .map_err(|e| Error::with_source(ErrorKind::Connection(e.to_string()), e))?;

    let mut raw = Vec::new();
    stream
        .read_to_end(&mut raw)
        .await
        .map_err(|e| Error::with_source(ErrorKind::Connection(e.to_string()), e))?;

    Ok(raw)
}

/// Parse an HTTP/1.1 response from raw bytes.
///
/// A HEAD response advertises the `Content-Length` of the body a GET would
/// have returned but carries no body bytes, so body framing is skipped.
fn parse_response(raw: &[u8], head_request: bool) -> Result<RawResponse> {
    let split = find_header_end(raw)
        .ok_or_else(|| Error::new(ErrorKind::Connection("malformed HTTP response".to_string())))?;
    let (head, body) = raw.split_at(split);
    let body = &body[4.min(body.len())..];

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            Error::new(ErrorKind::Connection(format!(
                "malformed status line: {}",
                status_line
            )))
        })?;

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|v| v.to_lowercase().contains("chunked"));

    let body = if head_request {
        Vec::new()
    } else if chunked {
        decode_chunked(body)?
    } else if let Some(len) = headers.get("content-length").and_then(|v| v.parse().ok()) {
        body.get(..len)
            .ok_or_else(|| {
                Error::new(ErrorKind::Connection("truncated HTTP response".to_string()))
            })?
            .to_vec()
    } else {
        body.to_vec()
    };

    Ok(RawResponse::new(status, headers, Bytes::from(body)))
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Decode a chunked transfer-encoded body.
fn decode_chunked(mut body: &[u8]) -> Result<Vec<u8>> {
    let mut decoded = Vec::new();

    loop {
        let line_end = find_crlf(body).ok_or_else(|| {
            Error::new(ErrorKind::Connection("malformed chunked body".to_string()))
        })?;
        let size_line = String::from_utf8_lossy(&body[..line_end]);
        let size = usize::from_str_radix(size_line.trim().split(';').next().unwrap_or(""), 16)
            .map_err(|e| {
                Error::with_source(ErrorKind::Connection("invalid chunk size".to_string()), e)
            })?;

        body = &body[line_end + 2..];
        if size == 0 {
            break;
        }

        let chunk = body.get(..size).ok_or_else(|| {
            Error::new(ErrorKind::Connection("truncated chunk".to_string()))
        })?;
        decoded.extend_from_slice(chunk);
        body = body.get(size + 2..).unwrap_or(&[]);
    }

    Ok(decoded)
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}
