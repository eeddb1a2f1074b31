//! Short-circuit response building module
//!
//! Builds the 304 and 412 responses a halted request is answered with.

use crate::http::conditional::Outcome;
use crate::http::headers::{CACHE_CONTROL, ETAG, EXPIRES, LAST_MODIFIED};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Response, StatusCode};

const PRECONDITION_FAILED_BODY: &str = "412 Precondition Failed";

/// Headers a 304 carries over from the full response
const VALIDATOR_HEADERS: [&str; 4] = [ETAG, LAST_MODIFIED, CACHE_CONTROL, EXPIRES];

/// Build 304 Not Modified response
///
/// The body is empty; validator and freshness headers already set on
/// `headers` are repeated.
pub fn build_304_response(headers: &HeaderMap) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(StatusCode::NOT_MODIFIED);
    for name in VALIDATOR_HEADERS {
        if let Some(value) = headers.get(name) {
            builder = builder.header(name, value);
        }
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        logger::log_build_error(StatusCode::NOT_MODIFIED, &e);
        bare_response(StatusCode::NOT_MODIFIED, Bytes::new())
    })
}

/// Build 412 Precondition Failed response
pub fn build_412_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PRECONDITION_FAILED)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(PRECONDITION_FAILED_BODY)))
        .unwrap_or_else(|e| {
            logger::log_build_error(StatusCode::PRECONDITION_FAILED, &e);
            bare_response(
                StatusCode::PRECONDITION_FAILED,
                Bytes::from(PRECONDITION_FAILED_BODY),
            )
        })
}

impl Outcome {
    /// Response that ends the request, `None` for [`Outcome::Continue`]
    pub fn into_response(self, headers: &HeaderMap) -> Option<Response<Full<Bytes>>> {
        match self {
            Self::Continue => None,
            Self::NotModified => Some(build_304_response(headers)),
            Self::PreconditionFailed => Some(build_412_response()),
        }
    }
}

fn bare_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::headers::ResponseHeaders;

    #[test]
    fn test_304_repeats_validators() {
        let mut headers = HeaderMap::new();
        headers.set_header(ETAG, "abc123").unwrap();
        headers
            .set_header(LAST_MODIFIED, "Mon, 08 Jun 2009 08:50:17 GMT")
            .unwrap();
        headers.set_header(CACHE_CONTROL, "public, max-age=60").unwrap();
        headers.set_header("Content-Type", "text/html").unwrap();

        let resp = build_304_response(&headers);
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(resp.headers()["etag"], "abc123");
        assert_eq!(resp.headers()["last-modified"], "Mon, 08 Jun 2009 08:50:17 GMT");
        assert_eq!(resp.headers()["cache-control"], "public, max-age=60");
        assert!(resp.headers().get("expires").is_none());
        assert!(resp.headers().get("content-type").is_none());
    }

    #[test]
    fn test_412_response() {
        let resp = build_412_response();
        assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
        assert_eq!(resp.headers()["content-type"], "text/plain");
    }

    #[test]
    fn test_outcome_into_response() {
        let headers = HeaderMap::new();
        assert!(Outcome::Continue.into_response(&headers).is_none());
        assert_eq!(
            Outcome::NotModified
                .into_response(&headers)
                .map(|r| r.status()),
            Some(StatusCode::NOT_MODIFIED)
        );
        assert_eq!(
            Outcome::PreconditionFailed
                .into_response(&headers)
                .map(|r| r.status()),
            Some(StatusCode::PRECONDITION_FAILED)
        );
    }
}
