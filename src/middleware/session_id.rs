use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name carrying the session ID
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Key of the per-client state kept by the server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Starts a new session
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Session named by the request headers, if it is a well-formed UUID
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(SESSION_ID_HEADER)?
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(Self)
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.to_string()).ok()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attaches a [`SessionId`] to every request and returns it to the client.
///
/// Requests without a usable `x-session-id` header start a new session; the
/// response header tells the client which ID to send next time.
pub async fn session_id_middleware(mut request: Request, next: Next) -> Response {
    let session_id = SessionId::from_headers(request.headers()).unwrap_or_default();
    request.extensions_mut().insert(session_id);

    let mut response = next.run(request).await;
    if let Some(value) = session_id.header_value() {
        response.headers_mut().insert(SESSION_ID_HEADER, value);
    }
    response
}

/// Request span carrying the session ID, for `TraceLayer`
pub fn make_span_with_session_id(request: &Request<Body>) -> tracing::Span {
    let session_id = request
        .extensions()
        .get::<SessionId>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        session_id = %session_id,
    )
}
