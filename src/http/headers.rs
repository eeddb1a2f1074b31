//! Request/response header access
//!
//! The evaluator only reads request headers and writes response headers
//! through these traits, so it carries no dependency on how a framework
//! stores its request state.

use crate::error::{FreshnessError, Result};
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};

pub const CACHE_CONTROL: &str = "Cache-Control";
pub const EXPIRES: &str = "Expires";
pub const ETAG: &str = "ETag";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const IF_MATCH: &str = "If-Match";
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const IF_UNMODIFIED_SINCE: &str = "If-Unmodified-Since";

/// Check whether a method is safe (does not alter server state)
pub fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Read access to the incoming request
pub trait ConditionalRequest {
    /// Case-insensitive header lookup; unreadable values are treated as absent
    fn header(&self, name: &str) -> Option<&str>;

    fn method(&self) -> &Method;

    fn is_safe(&self) -> bool {
        is_safe_method(self.method())
    }

    fn is_post(&self) -> bool {
        *self.method() == Method::POST
    }
}

impl<B> ConditionalRequest for Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        lookup(self.headers(), name)
    }

    fn method(&self) -> &Method {
        Self::method(self)
    }
}

impl ConditionalRequest for Parts {
    fn header(&self, name: &str) -> Option<&str> {
        lookup(&self.headers, name)
    }

    fn method(&self) -> &Method {
        &self.method
    }
}

/// Write access to the outgoing response headers
pub trait ResponseHeaders {
    /// Set a header, replacing any previous value
    fn set_header(&mut self, name: &str, value: &str) -> Result<()>;

    fn get_header(&self, name: &str) -> Option<&str>;
}

impl ResponseHeaders for HeaderMap {
    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_value = HeaderValue::from_str(value)?;
        // must read back through `get_header`
        if header_value.to_str().is_err() {
            return Err(FreshnessError::NonAsciiHeaderValue(value.to_string()));
        }
        self.insert(HeaderName::from_bytes(name.as_bytes())?, header_value);
        Ok(())
    }

    fn get_header(&self, name: &str) -> Option<&str> {
        lookup(self, name)
    }
}

impl<B> ResponseHeaders for Response<B> {
    fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        self.headers_mut().set_header(name, value)
    }

    fn get_header(&self, name: &str) -> Option<&str> {
        lookup(self.headers(), name)
    }
}

fn lookup<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
