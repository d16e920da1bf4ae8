//! Client for the remote badge-assignment service.
//!
//! The remote protocol is treated as opaque: this crate knows how to hold a
//! logged-in session, push one slot assignment at a time, and fetch the badge
//! catalog feed. Everything else about the remote site lives outside the
//! application.
//!
//! The service does not return a clean status code when a session expires; it
//! answers slot-assignment posts with a short "not logged in" page instead.
//! [`interpret_response`] encodes that heuristic so callers can tell an
//! expired session apart from a transport failure.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

/// An authenticated slot-assignment response is always at least this long.
/// The "not logged in" page is 85 bytes.
pub const MIN_AUTHENTICATED_RESPONSE_LEN: usize = 86;

/// Errors produced by remote calls.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The call did not complete (connect failure, timeout, broken body).
    #[error("remote call failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The call completed but the service no longer recognizes the session.
    #[error("invalid username or password; log in again")]
    NotAuthenticated,
    /// The login form was submitted but rejected.
    #[error("login rejected by the remote service")]
    LoginRejected,
    /// The catalog feed was fetched but could not be decoded.
    #[error("malformed catalog feed: {0}")]
    MalformedFeed(String),
}

/// One badge as described by the catalog feed. Selection state is not part
/// of the feed; callers layer it on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_ref: String,
}

/// The remote assignment capability.
///
/// Implemented by [`HttpSession`] for production and by in-memory fakes in
/// tests. Futures are `Send` because callers drive them from spawned tasks.
pub trait RemoteAssigner {
    /// Assign the given badge to the given slot (1-based).
    fn set_slot(
        &self,
        item_id: &str,
        slot: u8,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Clear the given slot (1-based).
    fn clear_slot(&self, slot: u8) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Fetch the full badge catalog.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, RemoteError>> + Send;
}

/// Decides whether a slot-assignment response came from an authenticated
/// session. See [`MIN_AUTHENTICATED_RESPONSE_LEN`].
pub fn interpret_response(body: &[u8]) -> Result<(), RemoteError> {
    if body.len() < MIN_AUTHENTICATED_RESPONSE_LEN {
        return Err(RemoteError::NotAuthenticated);
    }
    Ok(())
}

/// A logged-in session against the remote service.
///
/// Holds a cookie-carrying [`reqwest::Client`]; the session credential lives
/// in the cookie store and every call goes out with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    assign_url: String,
    catalog_url: String,
}

impl HttpSession {
    /// Submits the login form and returns a session on success.
    pub async fn login(
        login_url: &str,
        assign_url: &str,
        catalog_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        let response = client
            .post(login_url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RemoteError::LoginRejected);
        }

        Ok(Self {
            client,
            assign_url: assign_url.to_string(),
            catalog_url: catalog_url.to_string(),
        })
    }

    async fn post_assignment(&self, form: &[(&str, &str)]) -> Result<(), RemoteError> {
        let response = self.client.post(&self.assign_url).form(form).send().await?;
        let body = response.bytes().await?;
        interpret_response(&body)
    }
}

impl RemoteAssigner for HttpSession {
    async fn set_slot(&self, item_id: &str, slot: u8) -> Result<(), RemoteError> {
        let slot = slot.to_string();
        self.post_assignment(&[
            ("badgeid", item_id),
            ("slot", &slot),
            ("ajax", "1"),
            ("action", "setslot"),
        ])
        .await
    }

    async fn clear_slot(&self, slot: u8) -> Result<(), RemoteError> {
        let slot = slot.to_string();
        self.post_assignment(&[("slot", &slot), ("ajax", "1"), ("action", "clearslot")])
            .await
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, RemoteError> {
        let response = self.client.get(&self.catalog_url).send().await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RemoteError::MalformedFeed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_response_means_not_authenticated() {
        let body = vec![b'x'; 40];
        assert!(matches!(
            interpret_response(&body),
            Err(RemoteError::NotAuthenticated)
        ));
    }

    #[test]
    fn threshold_response_is_authenticated() {
        let body = vec![b'x'; MIN_AUTHENTICATED_RESPONSE_LEN];
        assert!(interpret_response(&body).is_ok());
    }

    #[test]
    fn boundary_below_threshold_is_rejected() {
        let body = vec![b'x'; MIN_AUTHENTICATED_RESPONSE_LEN - 1];
        assert!(interpret_response(&body).is_err());
    }
}
