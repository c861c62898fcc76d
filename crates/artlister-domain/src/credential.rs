//! Model service credential

use std::fmt;

/// API key for the model service.
///
/// Supplied by the caller for each run and never persisted. `Debug` and
/// `Display` both print a redacted placeholder so the key cannot leak into
/// logs by accident; use [`ApiKey::expose`] at the one place the raw value
/// is needed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building the authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the key is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("sk-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert_eq!(key.expose(), "sk-secret");
    }

    #[test]
    fn test_blank_key() {
        assert!(ApiKey::new("   ").is_blank());
        assert!(!ApiKey::new("sk").is_blank());
    }
}
