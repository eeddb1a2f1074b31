//! Conditional request evaluation
//!
//! Sets freshness headers on the response and decides whether the request
//! can be answered with `304 Not Modified` or must be refused with
//! `412 Precondition Failed` (RFC 2616 §14.24, §14.25, §14.26, §14.28).
//!
//! A validator never stops the request itself. It returns an [`Outcome`]
//! and the caller halts response generation on anything but
//! [`Outcome::Continue`].

use crate::error::{FreshnessError, Result};
use crate::http::cache_control::{CacheControl, DirectiveValue};
use crate::http::etag::{self, EntityTag, EtagOptions};
use crate::http::headers::{
    ConditionalRequest, ResponseHeaders, CACHE_CONTROL, ETAG, EXPIRES, IF_MATCH,
    IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE, LAST_MODIFIED,
};
use crate::http::time::{self, TimeLike};
use crate::logger;
use chrono::{DateTime, TimeDelta, Utc};
use hyper::StatusCode;
use std::fmt;

/// Result of a conditional check
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep processing the request
    Continue,
    /// Client copy is still valid, answer 304
    NotModified,
    /// A precondition failed, answer 412
    PreconditionFailed,
}

impl Outcome {
    pub const fn status(self) -> Option<StatusCode> {
        match self {
            Self::Continue => None,
            Self::NotModified => Some(StatusCode::NOT_MODIFIED),
            Self::PreconditionFailed => Some(StatusCode::PRECONDITION_FAILED),
        }
    }

    pub const fn is_halt(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// When a response goes stale
#[derive(Debug, Clone, PartialEq)]
pub enum Expiry {
    /// Seconds from now
    Seconds(i64),
    /// Absolute point in time
    At(TimeLike),
}

impl From<i64> for Expiry {
    fn from(secs: i64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<TimeLike> for Expiry {
    fn from(time: TimeLike) -> Self {
        Self::At(time)
    }
}

impl From<DateTime<Utc>> for Expiry {
    fn from(time: DateTime<Utc>) -> Self {
        Self::At(TimeLike::Instant(time))
    }
}

/// Per-request freshness evaluator
///
/// Borrows the incoming request and the outgoing response headers for the
/// lifetime of one request. "Now" is captured on construction.
///
/// # Examples
/// ```
/// use http_freshness::http::conditional::{Evaluator, Outcome};
/// use http_freshness::http::etag::EtagOptions;
/// use hyper::{HeaderMap, Request};
///
/// let req = Request::get("/report").header("If-None-Match", "v42").body(()).unwrap();
/// let mut headers = HeaderMap::new();
/// let outcome = Evaluator::new(&req, &mut headers)
///     .etag("v42", EtagOptions::default())
///     .unwrap();
/// assert_eq!(outcome, Outcome::NotModified);
/// assert_eq!(headers["etag"], "v42");
/// ```
pub struct Evaluator<'a, Req: ?Sized, Res: ?Sized> {
    request: &'a Req,
    response: &'a mut Res,
    now: DateTime<Utc>,
}

impl<'a, Req, Res> Evaluator<'a, Req, Res>
where
    Req: ConditionalRequest + ?Sized,
    Res: ResponseHeaders + ?Sized,
{
    pub fn new(request: &'a Req, response: &'a mut Res) -> Self {
        Self {
            request,
            response,
            now: Utc::now(),
        }
    }

    /// Pin the evaluator clock
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Set `Cache-Control`; nothing is written when no directive survives
    pub fn cache_control(&mut self, directives: &CacheControl) -> Result<()> {
        match directives.to_header_value() {
            Some(value) => self.set(CACHE_CONTROL, &value),
            None => Ok(()),
        }
    }

    /// Set `Expires` and the matching `max-age` directive
    ///
    /// Any `max-age` already in `directives` is overridden.
    pub fn expires(
        &mut self,
        amount: impl Into<Expiry>,
        mut directives: CacheControl,
    ) -> Result<()> {
        let (time, max_age) = match amount.into() {
            Expiry::Seconds(secs) => {
                let time = TimeDelta::try_seconds(secs)
                    .and_then(|delta| self.now.checked_add_signed(delta))
                    .ok_or_else(|| {
                        FreshnessError::InvalidTimestamp(format!(
                            "expiry {secs}s from now is out of range"
                        ))
                    })?;
                (time, DirectiveValue::Integer(secs))
            }
            Expiry::At(value) => {
                let time = value.to_instant()?;
                (time, DirectiveValue::Seconds(seconds_between(self.now, time)))
            }
        };

        directives.set_max_age(max_age);
        self.cache_control(&directives)?;
        self.set(EXPIRES, time::http_date(&time).as_str())
    }

    /// Set `Last-Modified` and check the date preconditions
    ///
    /// Entity tag validators take precedence: when `If-None-Match` is
    /// present the dates are not consulted. Unparseable client dates are
    /// ignored.
    pub fn last_modified(&mut self, time: impl Into<Option<TimeLike>>) -> Result<Outcome> {
        let Some(time) = time.into() else {
            return Ok(Outcome::Continue);
        };
        let time = time.to_instant()?;
        self.set(LAST_MODIFIED, time::http_date(&time).as_str())?;

        let request = self.request;
        if request.header(IF_NONE_MATCH).is_some() {
            return Ok(Outcome::Continue);
        }

        let modified = time.timestamp();
        if let Some(value) = request.header(IF_MODIFIED_SINCE) {
            return Ok(match client_date(IF_MODIFIED_SINCE, value) {
                Some(since) if since >= modified => {
                    halt(Outcome::NotModified, IF_MODIFIED_SINCE)
                }
                _ => Outcome::Continue,
            });
        }

        if let Some(value) = request.header(IF_UNMODIFIED_SINCE) {
            return Ok(match client_date(IF_UNMODIFIED_SINCE, value) {
                Some(since) if since < modified => {
                    halt(Outcome::PreconditionFailed, IF_UNMODIFIED_SINCE)
                }
                _ => Outcome::Continue,
            });
        }

        Ok(Outcome::Continue)
    }

    /// Set `ETag` and check the entity tag preconditions
    pub fn etag(
        &mut self,
        value: impl fmt::Display,
        options: impl Into<EtagOptions>,
    ) -> Result<Outcome> {
        let options = options.into();
        let request = self.request;
        let new_resource = options
            .new_resource
            .unwrap_or_else(|| request.is_post());

        let tag = EntityTag::new(value.to_string(), options.kind);
        self.set(ETAG, &tag.to_string())?;

        if self.etag_matches(request.header(IF_NONE_MATCH), new_resource) {
            let outcome = if request.is_safe() {
                Outcome::NotModified
            } else {
                Outcome::PreconditionFailed
            };
            return Ok(halt(outcome, IF_NONE_MATCH));
        }

        if let Some(list) = request.header(IF_MATCH) {
            if !self.etag_matches(Some(list), new_resource) {
                return Ok(halt(Outcome::PreconditionFailed, IF_MATCH));
            }
        }

        Ok(Outcome::Continue)
    }

    /// Check a validator list against the `ETag` already set on the response
    pub fn etag_matches(&self, list: Option<&str>, new_resource: bool) -> bool {
        etag::etag_matches(list, self.response.get_header(ETAG), new_resource)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.response.set_header(name, value)?;
        logger::log_header_set(name, value);
        Ok(())
    }
}

fn halt(outcome: Outcome, validator: &str) -> Outcome {
    if let Some(status) = outcome.status() {
        logger::log_short_circuit(status, validator);
    }
    outcome
}

/// Epoch seconds of a client-supplied HTTP-date
fn client_date(name: &str, value: &str) -> Option<i64> {
    let parsed = time::parse_http_date(value).map(|t| t.timestamp());
    if parsed.is_none() {
        logger::log_ignored_header(name, value);
    }
    parsed
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
