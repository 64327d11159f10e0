//! API key entity and its quota policy.

/// Length of every API key.
pub const API_KEY_LENGTH: usize = 32;

/// An API key provisioned out-of-band by an administrator.
///
/// `daily_limit` encodes the quota policy: `0` is unlimited, a negative value
/// disables the key, a positive value caps allocations per UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub daily_limit: i32,
}

/// Quota policy derived from [`ApiKey::daily_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Disabled,
    Unlimited,
    Daily(u32),
}

impl ApiKey {
    pub fn new(key: String, daily_limit: i32) -> Self {
        Self { key, daily_limit }
    }

    pub fn quota(&self) -> Quota {
        match self.daily_limit {
            0 => Quota::Unlimited,
            n if n < 0 => Quota::Disabled,
            n => Quota::Daily(n.unsigned_abs()),
        }
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quota::Disabled => f.write_str("disabled"),
            Quota::Unlimited => f.write_str("unlimited"),
            Quota::Daily(n) => write!(f, "{}/day", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_from_daily_limit() {
        let key = |limit| ApiKey::new("k".repeat(API_KEY_LENGTH), limit);

        assert_eq!(key(0).quota(), Quota::Unlimited);
        assert_eq!(key(-1).quota(), Quota::Disabled);
        assert_eq!(key(i32::MIN).quota(), Quota::Disabled);
        assert_eq!(key(5).quota(), Quota::Daily(5));
    }

    #[test]
    fn test_quota_display() {
        assert_eq!(Quota::Unlimited.to_string(), "unlimited");
        assert_eq!(Quota::Disabled.to_string(), "disabled");
        assert_eq!(Quota::Daily(5).to_string(), "5/day");
    }
}
