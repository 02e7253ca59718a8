// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque clone credentials.
//!
//! The engine passes these through to the workspace provisioner and never
//! logs or persists them; `Debug` redacts the secret.

/// Credentials for fetching from the source host.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Anonymous access; no userinfo is attached to clone URLs.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { username: username.into(), secret: secret.into() }
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.secret.is_empty()
    }

    /// Embed the credentials into an https remote URL as userinfo.
    /// Anonymous credentials and non-https URLs pass through unchanged.
    pub fn apply_to_url(&self, url: &str) -> String {
        if self.is_anonymous() {
            return url.to_string();
        }
        match url.strip_prefix("https://") {
            Some(rest) => format!("https://{}:{}@{}", self.username, self.secret, rest),
            None => url.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
