//! Cache-Control module
//!
//! Builds `Cache-Control` header values from non-value flags and
//! `name=value` directives. Names are given in either `snake_case` or wire
//! form; underscores become hyphens on output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard non-value directives (RFC 2616 §14.9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheFlag {
    Public,
    Private,
    NoCache,
    NoStore,
    MustRevalidate,
    ProxyRevalidate,
}

impl CacheFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::NoCache => "no-cache",
            Self::NoStore => "no-store",
            Self::MustRevalidate => "must-revalidate",
            Self::ProxyRevalidate => "proxy-revalidate",
        }
    }
}

impl From<CacheFlag> for String {
    fn from(flag: CacheFlag) -> Self {
        flag.as_str().to_string()
    }
}

/// Argument attached to a value directive
///
/// `Flag(true)` promotes the directive to a non-value flag and
/// `Flag(false)` drops it.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Flag(bool),
    Integer(i64),
    Seconds(f64),
    Text(String),
}

impl DirectiveValue {
    /// Integer form used for `max-age` (truncates, never rounds)
    #[allow(clippy::cast_possible_truncation)]
    fn to_integer(&self) -> i64 {
        match self {
            Self::Flag(_) => 0,
            Self::Integer(n) => *n,
            Self::Seconds(secs) => secs.trunc() as i64,
            Self::Text(text) => leading_integer(text),
        }
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Seconds(secs) => write!(f, "{secs}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for DirectiveValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<i64> for DirectiveValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for DirectiveValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for DirectiveValue {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for DirectiveValue {
    fn from(secs: f64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<&str> for DirectiveValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Value directives in insertion order
pub type ValueDirectives = IndexMap<String, DirectiveValue>;

/// `Cache-Control` header under construction
///
/// # Examples
/// ```
/// use http_freshness::http::cache_control::{CacheControl, CacheFlag};
/// let cc = CacheControl::new()
///     .flag(CacheFlag::Public)
///     .flag("must_revalidate")
///     .value("max_age", 60);
/// assert_eq!(cc.to_header_value().as_deref(), Some("public, must-revalidate, max-age=60"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheControl {
    flags: Vec<String>,
    values: ValueDirectives,
}

impl CacheControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-value directive
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.push(name.into());
        self
    }

    /// Add or replace a value directive, keeping its original position
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<DirectiveValue>) -> Self {
        self.set_value(name, value);
        self
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<DirectiveValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Override `max-age`, whichever spelling the caller used for it
    pub fn set_max_age(&mut self, value: impl Into<DirectiveValue>) {
        let value = value.into();
        match self
            .values
            .keys()
            .position(|key| normalize(key) == "max-age")
        {
            Some(index) => {
                if let Some((_, slot)) = self.values.get_index_mut(index) {
                    *slot = value;
                }
            }
            None => {
                self.values.insert("max_age".to_string(), value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.values.is_empty()
    }

    /// Render the header value, `None` when no directive survives
    pub fn to_header_value(&self) -> Option<String> {
        build_cache_control(self.flags.iter().map(String::as_str), &self.values)
    }
}

/// Build a `Cache-Control` header value
///
/// Flags come first in call order, followed by any value directive set to
/// `true`, then the remaining value directives as `name=value`. Directives
/// set to `false` are dropped. Returns `None` when nothing is left, so an
/// unset policy can be told apart from an empty one.
pub fn build_cache_control<'a, I>(flags: I, values: &ValueDirectives) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut directives: Vec<String> = flags.into_iter().map(normalize).collect();

    for (key, value) in values {
        if *value == DirectiveValue::Flag(true) {
            directives.push(normalize(key));
        }
    }

    for (key, value) in values {
        if matches!(value, DirectiveValue::Flag(_)) {
            continue;
        }
        let key = normalize(key);
        if key == "max-age" {
            directives.push(format!("{key}={}", value.to_integer()));
        } else {
            directives.push(format!("{key}={value}"));
        }
    }

    if directives.is_empty() {
        None
    } else {
        Some(directives.join(", "))
    }
}

/// Wire form of a directive name
fn normalize(name: &str) -> String {
    name.replace('_', "-")
}

/// Leading decimal integer of a string, zero when there is none
fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

/// Canned cache policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public { max_age: u32 },
    /// Private cache (browser cache only)
    Private { max_age: u32 },
    NoCache,
    NoStore,
}

impl CachePolicy {
    pub fn to_cache_control(self) -> CacheControl {
        match self {
            Self::Public { max_age } => CacheControl::new()
                .flag(CacheFlag::Public)
                .value("max-age", max_age),
            Self::Private { max_age } => CacheControl::new()
                .flag(CacheFlag::Private)
                .value("max-age", max_age),
            Self::NoCache => CacheControl::new().flag(CacheFlag::NoCache),
            Self::NoStore => CacheControl::new().flag(CacheFlag::NoStore),
        }
    }

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        self.to_cache_control()
            .to_header_value()
            .unwrap_or_default()
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Public { max_age: 3600 } // 1 hour
    }
}
