//! HTTP response freshness negotiation
//!
//! `Cache-Control` / `Expires` construction and conditional request
//! evaluation (`ETag`, `Last-Modified`) for hyper-based services.
//!
//! ```
//! use http_freshness::http::{CacheControl, CacheFlag, Evaluator, Outcome, TimeLike};
//! use hyper::{HeaderMap, Request};
//!
//! let req = Request::get("/feed")
//!     .header("If-Modified-Since", "Mon, 08 Jun 2009 08:50:17 GMT")
//!     .body(())
//!     .unwrap();
//! let mut headers = HeaderMap::new();
//! let mut eval = Evaluator::new(&req, &mut headers);
//! eval.cache_control(&CacheControl::new().flag(CacheFlag::Public)).unwrap();
//! let outcome = eval
//!     .last_modified(TimeLike::from("Mon, 08 Jun 2009 08:00:00 GMT"))
//!     .unwrap();
//! assert_eq!(outcome, Outcome::NotModified);
//! let response = outcome.into_response(&headers).unwrap();
//! assert_eq!(response.status(), 304);
//! assert_eq!(response.headers()["cache-control"], "public");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logger;

pub use error::{FreshnessError, Result};
