//! Repository authentication.
//!
//! Credentials come from `--username`/`--password` (or `NEXUS_USERNAME` /
//! `NEXUS_PASSWORD`), or from `.nexus-upload.toml` with `${env:SECRET}`
//! interpolation from `.nexus-upload.env`:
//!
//! ```toml
//! [nexus]
//! username = "${env:NEXUS_USER}"
//! password = "${env:NEXUS_PASS}"
//! ```
//!
//! By the time the config is resolved, `${env:...}` values are already
//! interpolated, so this module just applies them.

use reqwest::blocking::RequestBuilder;

/// Username and password (or token) for the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Whether any credential is configured.
    pub fn is_set(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

/// Apply authentication to a request if credentials are configured.
pub fn apply_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match (&credentials.username, &credentials.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}
