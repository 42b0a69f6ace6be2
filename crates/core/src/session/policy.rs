//! Public authentication endpoint policy
//!
//! A 401 from login, registration, verification and similar endpoints means
//! the user typed the wrong thing. Renewing the session there would be wrong
//! and can loop, so those paths are excluded from renewal.

use moodlog_domain::constants::PUBLIC_AUTH_PATH_FRAGMENTS;

/// Case-insensitive substring allow-list over request paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicEndpointPolicy {
    fragments: Vec<String>,
}

impl PublicEndpointPolicy {
    /// Build a policy from path fragments. Empty fragments are ignored since
    /// they would match every path.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = fragments
            .into_iter()
            .map(|f| f.as_ref().trim().to_ascii_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        Self { fragments }
    }

    /// Whether a 401 from `path` is a credential rejection
    pub fn is_public(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.fragments.iter().any(|fragment| path.contains(fragment.as_str()))
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

impl Default for PublicEndpointPolicy {
    fn default() -> Self {
        Self::new(PUBLIC_AUTH_PATH_FRAGMENTS)
    }
}
