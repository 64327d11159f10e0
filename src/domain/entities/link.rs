//! Link entity representing a key to URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Links are created once and never updated. `custom` records whether the key
/// came from a caller's wish or from the sequence counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub key: String,
    pub url: String,
    pub api_key: Option<String>,
    pub custom: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        key: String,
        url: String,
        api_key: Option<String>,
        custom: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            key,
            url,
            api_key,
            custom,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub key: String,
    pub url: String,
    pub api_key: Option<String>,
    pub custom: bool,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// A link whose key was chosen by the caller.
    pub fn custom(key: String, url: String, api_key: Option<String>) -> Self {
        Self {
            key,
            url,
            api_key,
            custom: true,
            created_at: Utc::now(),
        }
    }

    /// A link whose key was taken from the sequence counter.
    pub fn sequential(key: String, url: String, api_key: Option<String>) -> Self {
        Self {
            key,
            url,
            api_key,
            custom: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "9".to_string(),
            "https://example.com".to_string(),
            None,
            false,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.key, "9");
        assert_eq!(link.url, "https://example.com");
        assert!(link.api_key.is_none());
        assert!(!link.custom);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_link_flavours() {
        let wish = NewLink::custom(
            "promo".to_string(),
            "https://rust-lang.org".to_string(),
            Some("k".repeat(32)),
        );
        assert!(wish.custom);
        assert_eq!(wish.api_key.as_deref(), Some("k".repeat(32).as_str()));

        let seq = NewLink::sequential("A".to_string(), "https://rust-lang.org".to_string(), None);
        assert!(!seq.custom);
        assert!(seq.api_key.is_none());
    }
}
