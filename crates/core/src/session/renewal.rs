//! Session renewal and teardown
//!
//! `SessionRenewal` decides what an unauthorized response means for the
//! session and owns the one renewal cycle that may be in flight. The HTTP
//! call to the refresh endpoint is injected so this stays transport-free.

use std::future::Future;
use std::sync::Arc;

use moodlog_domain::{AccessToken, ApiError, RefreshResponse, RefreshToken, Result};
use tracing::{debug, info, instrument, warn};

use super::gate::RenewalGate;
use super::policy::PublicEndpointPolicy;
use super::ports::{Navigator, SessionStore, SessionUpdate};

/// Coordinates renewal of the access token for one client
pub struct SessionRenewal {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    policy: PublicEndpointPolicy,
    login_route: String,
    gate: RenewalGate,
}

impl SessionRenewal {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        policy: PublicEndpointPolicy,
        login_route: impl Into<String>,
    ) -> Self {
        Self { store, navigator, policy, login_route: login_route.into(), gate: RenewalGate::new() }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn policy(&self) -> &PublicEndpointPolicy {
        &self.policy
    }

    /// Whether a renewal is outstanding right now
    pub fn is_renewing(&self) -> bool {
        self.gate.is_in_flight()
    }

    /// Handle a 401 received for `path`.
    ///
    /// Returns the token to replay the request with. Every other outcome is
    /// an error for the caller:
    /// - public auth endpoints and already-retried requests get `error` back
    ///   untouched, with no side effects
    /// - with no refresh token stored once the renewal slot is claimed, the
    ///   access token is cleared and `error` is returned
    /// - otherwise the renewal outcome (shared with every request that
    ///   queued behind the same renewal) is returned
    ///
    /// # Errors
    /// See above. A failed renewal also tears the session down.
    #[instrument(skip(self, error, refresh), fields(path = %path))]
    pub async fn handle_unauthorized<R, Fut>(
        &self,
        path: &str,
        already_retried: bool,
        error: ApiError,
        refresh: R,
    ) -> Result<AccessToken>
    where
        R: FnOnce(RefreshToken) -> Fut,
        Fut: Future<Output = Result<RefreshResponse>>,
    {
        if self.policy.is_public(path) {
            debug!("401 from public auth endpoint, not renewing");
            return Err(error);
        }

        if already_retried {
            debug!("401 on retried request, giving up");
            return Err(error);
        }

        self.gate.run(|| self.renew(error, refresh)).await
    }

    /// Tear the session down: clear tokens, identity and role, then send the
    /// navigator to the login route unless it is already there.
    pub async fn end_session(&self) {
        if let Err(e) = self.store.apply(SessionUpdate::Clear).await {
            warn!(error = %e, "failed to clear session store");
        }

        let location = self.navigator.current_location();
        if is_at_route(&location, &self.login_route) {
            debug!(location = %location, "already on login route");
        } else {
            info!(from = %location, to = %self.login_route, "redirecting to login");
            self.navigator.navigate(&self.login_route);
        }
    }

    /// Runs as the gate's leader. The refresh token is read only after the
    /// gate is claimed, so it reflects any rotation by the previous cycle.
    async fn renew<R, Fut>(&self, error: ApiError, refresh: R) -> Result<AccessToken>
    where
        R: FnOnce(RefreshToken) -> Fut,
        Fut: Future<Output = Result<RefreshResponse>>,
    {
        let Some(refresh_token) = self.store.refresh_token().await? else {
            debug!("401 without refresh token, clearing access token");
            self.store.apply(SessionUpdate::ClearAccessToken).await?;
            return Err(error);
        };

        debug!("renewing access token");

        let outcome = match refresh(refresh_token).await {
            Ok(response) => self.persist(response).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(_) => info!("access token renewed"),
            Err(e) => {
                warn!(error = %e, "access token renewal failed, ending session");
                self.end_session().await;
            }
        }

        outcome
    }

    async fn persist(&self, response: RefreshResponse) -> Result<AccessToken> {
        self.store.apply(SessionUpdate::SetAccessToken(response.access_token.clone())).await?;
        if let Some(rotated) = response.refresh_token {
            self.store.apply(SessionUpdate::SetRefreshToken(rotated)).await?;
        }
        Ok(response.access_token)
    }
}

/// `location` is `route`, optionally followed by a query or fragment
fn is_at_route(location: &str, route: &str) -> bool {
    location
        .strip_prefix(route)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('?') || rest.starts_with('#'))
}
