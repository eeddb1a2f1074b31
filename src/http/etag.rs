//! Entity tag module
//!
//! Provides `ETag` serialization and validator list matching.

use crate::error::FreshnessError;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Whether a tag asserts byte-identical or only semantically equivalent content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EtagKind {
    #[default]
    Strong,
    Weak,
}

impl FromStr for EtagKind {
    type Err = FreshnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':') {
            "strong" => Ok(Self::Strong),
            "weak" => Ok(Self::Weak),
            _ => Err(FreshnessError::InvalidArgument(
                ":strong or :weak expected".to_string(),
            )),
        }
    }
}

/// Options for [`Evaluator::etag`](crate::http::conditional::Evaluator::etag)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EtagOptions {
    pub kind: EtagKind,
    /// Whether the response creates the resource; defaults to "request is a POST"
    pub new_resource: Option<bool>,
}

impl EtagOptions {
    pub const fn weak() -> Self {
        Self {
            kind: EtagKind::Weak,
            new_resource: None,
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: EtagKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn new_resource(mut self, new_resource: bool) -> Self {
        self.new_resource = Some(new_resource);
        self
    }
}

impl From<EtagKind> for EtagOptions {
    fn from(kind: EtagKind) -> Self {
        Self {
            kind,
            new_resource: None,
        }
    }
}

/// An entity tag as sent in the `ETag` header
///
/// The payload is not quoted; weak tags carry a `W/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    payload: String,
    kind: EtagKind,
}

impl EntityTag {
    pub fn new(payload: impl Into<String>, kind: EtagKind) -> Self {
        Self {
            payload: payload.into(),
            kind,
        }
    }

    pub fn strong(payload: impl Into<String>) -> Self {
        Self::new(payload, EtagKind::Strong)
    }

    pub fn weak(payload: impl Into<String>) -> Self {
        Self::new(payload, EtagKind::Weak)
    }

    /// Strong tag derived from a fast hash of the content
    ///
    /// # Examples
    /// ```
    /// use http_freshness::http::etag::EntityTag;
    /// let tag = EntityTag::for_content(b"hello world");
    /// assert_eq!(tag.payload().len(), 16);
    /// ```
    pub fn for_content(content: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Self::strong(format!("{:016x}", hasher.finish()))
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub const fn kind(&self) -> EtagKind {
        self.kind
    }

    pub fn is_weak(&self) -> bool {
        self.kind == EtagKind::Weak
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_weak() {
            f.write_str("W/")?;
        }
        f.write_str(&self.payload)
    }
}

/// Check a validator list (`If-None-Match` / `If-Match`) against the current `ETag`
///
/// `*` matches any existing representation, so it never matches a resource
/// being created. Otherwise the list is split on commas and compared
/// verbatim against `etag`.
pub fn etag_matches(list: Option<&str>, etag: Option<&str>, new_resource: bool) -> bool {
    let Some(list) = list else {
        return false;
    };
    if list == "*" {
        return !new_resource;
    }
    etag.is_some_and(|etag| list.split(',').any(|candidate| candidate.trim() == etag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        assert_eq!(EntityTag::strong("abc123").to_string(), "abc123");
        assert_eq!(EntityTag::weak("abc123").to_string(), "W/abc123");
    }

    #[test]
    fn test_for_content_consistency() {
        let a = EntityTag::for_content(b"same content");
        let b = EntityTag::for_content(b"same content");
        let c = EntityTag::for_content(b"other content");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_weak());
        assert!(a.payload().chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("strong".parse::<EtagKind>().unwrap(), EtagKind::Strong);
        assert_eq!(":weak".parse::<EtagKind>().unwrap(), EtagKind::Weak);
        assert!(matches!(
            "medium".parse::<EtagKind>(),
            Err(FreshnessError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_options() {
        let opts = EtagOptions::default();
        assert_eq!(opts.kind, EtagKind::Strong);
        assert_eq!(opts.new_resource, None);
        let opts = EtagOptions::weak().new_resource(true);
        assert_eq!(opts.kind, EtagKind::Weak);
        assert_eq!(opts.new_resource, Some(true));
    }

    #[test]
    fn test_etag_matches_list() {
        let etag = Some("abc123");
        assert!(etag_matches(Some("abc123"), etag, false));
        assert!(etag_matches(Some("xyz , abc123"), etag, false));
        assert!(etag_matches(Some("xyz,abc123,def"), etag, true));
        assert!(!etag_matches(Some("different"), etag, false));
        assert!(!etag_matches(None, etag, false));
        assert!(!etag_matches(Some("abc123"), None, false));
    }

    #[test]
    fn test_etag_matches_wildcard() {
        assert!(etag_matches(Some("*"), Some("abc123"), false));
        assert!(!etag_matches(Some("*"), Some("abc123"), true));
        assert!(etag_matches(Some("*"), None, false));
    }

    #[test]
    fn test_entity_tag_hash_distinguishes_kind() {
        use std::collections::HashSet;
        let tags: HashSet<EntityTag> = [
            EntityTag::strong("abc123"),
            EntityTag::weak("abc123"),
            EntityTag::strong("abc123"),
        ]
        .into_iter()
        .collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&EntityTag::weak("abc123")));
    }

    #[test]
    fn test_weak_compares_full_value() {
        let etag = Some("W/abc123");
        assert!(etag_matches(Some("W/abc123"), etag, false));
        assert!(!etag_matches(Some("abc123"), etag, false));
    }
}
