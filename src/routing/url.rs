//! Request URL parsing.
//!
//! # Responsibilities
//! - Decompose a raw absolute URL into scheme/host/path/query facets
//! - Detect reserved first-segment markers (`_apis`, `_static`)
//! - Extract the subdomain from the hostname
//! - Resolve handler and operation names, falling back to configured defaults
//! - Collect positional `key:value` path parameters and query parameters
//!
//! # Design Decisions
//! - Pure function of the input URL and routing defaults; no I/O, no state
//! - One descriptor per request, immutable after construction
//! - Query parameters overwrite positional parameters on key collision
//! - Subdomain extraction assumes a two-label root domain (`example.com`);
//!   multi-label public suffixes (`co.uk`) are not handled

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::config::schema::RoutingConfig;

/// First path segment that marks an API request.
pub const API_MARKER: &str = "_apis";

/// First path segment that marks a static-asset request.
pub const STATIC_MARKER: &str = "_static";

/// Handler name assigned to all static-asset requests.
pub const STATIC_HANDLER: &str = "static";

/// Operation name assigned to all static-asset requests.
pub const STATIC_OPERATION: &str = "index";

/// The URL could not be decomposed into scheme, host, hostname, path, and a
/// normalized full form. Surfaced to clients as a bad-request condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse request url {url:?}: {reason}")]
pub struct MalformedUrlError {
    pub url: String,
    pub reason: String,
}

impl MalformedUrlError {
    fn new(url: &str, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// The parsed outcome of one request URL.
///
/// Built once per request, attached to the request context, and discarded
/// when the request completes. Never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// The normalized absolute URL the descriptor was parsed from.
    pub full_url: String,

    /// URL scheme without the trailing colon (e.g. "http").
    pub scheme: String,

    /// Host including the port when one was given (e.g. "example.com:8080").
    pub host: String,

    /// Host without the port.
    pub hostname: String,

    /// Labels preceding the last two hostname labels, joined by dots.
    /// Absent when the hostname has two labels or fewer.
    pub subdomain: Option<String>,

    /// Port, only when explicitly present in the URL.
    pub port: Option<u16>,

    /// URL path component; always starts with `/`.
    pub pathname: String,

    /// Raw query string including the leading `?`, when one was given.
    pub query_string: Option<String>,

    /// Lowercase handler identifier; never empty.
    pub handler_name: String,

    /// Operation identifier within the handler.
    pub operation_name: String,

    /// True iff the first path segment was the static-asset marker.
    pub is_static_asset: bool,

    /// True iff the first path segment was the API marker.
    pub is_api_request: bool,

    /// Positional path parameters overlaid with query parameters.
    /// On key collision the query value wins.
    pub parameters: HashMap<String, String>,
}

/// Parse a raw absolute URL into a [`RouteDescriptor`].
pub fn parse(raw_url: &str, defaults: &RoutingConfig) -> Result<RouteDescriptor, MalformedUrlError> {
    // WHATWG parsing skips extra slashes after the scheme, which would let
    // "http:///widgets" promote the first path segment to the hostname.
    // Reject an empty authority before handing the URL to the parser.
    if let Some((_, rest)) = raw_url.split_once("://") {
        let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
        if authority.is_empty() {
            return Err(MalformedUrlError::new(raw_url, "missing host"));
        }
    }

    let parsed = Url::parse(raw_url).map_err(|e| MalformedUrlError::new(raw_url, e.to_string()))?;

    let hostname = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| MalformedUrlError::new(raw_url, "missing host"))?
        .to_string();
    let mut segments: Vec<&str> = parsed
        .path_segments()
        .ok_or_else(|| MalformedUrlError::new(raw_url, "url has no path"))?
        .collect();
    if parsed.scheme().is_empty() || parsed.path().is_empty() {
        return Err(MalformedUrlError::new(raw_url, "missing scheme or path"));
    }

    // Reserved first-segment markers. API marker is checked first; at most
    // one can trigger, and a match consumes the segment.
    let mut is_api_request = false;
    let mut is_static_asset = false;
    match segments.first().copied() {
        Some(API_MARKER) => {
            is_api_request = true;
            segments.remove(0);
        }
        Some(STATIC_MARKER) => {
            is_static_asset = true;
            segments.remove(0);
        }
        _ => {}
    }

    let labels: Vec<&str> = hostname.split('.').collect();
    let subdomain = (labels.len() > 2).then(|| labels[..labels.len() - 2].join("."));

    // Static-asset requests shortcut handler resolution entirely.
    let (handler_name, operation_name) = if is_static_asset {
        (STATIC_HANDLER.to_string(), STATIC_OPERATION.to_string())
    } else {
        let handler = segments
            .first()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_lowercase())
            .unwrap_or_else(|| defaults.default_handler.clone());
        // The second segment is taken verbatim, even when empty (trailing
        // slash after the handler segment).
        let operation = segments
            .get(1)
            .map(|segment| segment.to_string())
            .unwrap_or_else(|| defaults.default_operation.clone());
        (handler, operation)
    };

    let mut parameters = HashMap::new();
    if !is_static_asset && segments.len() > 2 {
        for segment in &segments[2..] {
            // Split at the first colon; further colons belong to the value.
            // A segment without a colon becomes a key with an empty value.
            match segment.split_once(':') {
                Some((key, value)) => parameters.insert(key.to_string(), value.to_string()),
                None => parameters.insert(segment.to_string(), String::new()),
            };
        }
    }
    for (key, value) in parsed.query_pairs() {
        parameters.insert(key.into_owned(), value.into_owned());
    }

    let port = parsed.port();
    let host = match port {
        Some(port) => format!("{hostname}:{port}"),
        None => hostname.clone(),
    };

    Ok(RouteDescriptor {
        full_url: parsed.as_str().to_string(),
        scheme: parsed.scheme().to_string(),
        host,
        hostname,
        subdomain,
        port,
        pathname: parsed.path().to_string(),
        query_string: parsed.query().map(|q| format!("?{q}")),
        handler_name,
        operation_name,
        is_static_asset,
        is_api_request,
        parameters,
    })
}
