//! HTTP freshness layer module
//!
//! Builds freshness headers and evaluates conditional request validators.
//! Decoupled from any framework: requests and responses are reached through
//! the traits in [`headers`].

pub mod cache_control;
pub mod conditional;
pub mod etag;
pub mod headers;
pub mod response;
pub mod time;

// Re-export commonly used types
pub use cache_control::{build_cache_control, CacheControl, CacheFlag, CachePolicy};
pub use conditional::{Evaluator, Expiry, Outcome};
pub use etag::{etag_matches, EntityTag, EtagKind, EtagOptions};
pub use headers::{is_safe_method, ConditionalRequest, ResponseHeaders};
pub use response::{build_304_response, build_412_response};
pub use time::{coerce_to_instant, http_date, parse_http_date, TimeLike};
