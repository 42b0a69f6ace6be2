//! Authentication endpoints and local session bookkeeping
//!
//! Login and OTP verification persist the issued tokens and the cached
//! identity. Logout is best-effort against the backend and always ends the
//! local session.

use std::sync::Arc;

use moodlog_core::SessionUpdate;
use moodlog_domain::constants::{
    AUTH_FORGOT_PASSWORD_PATH, AUTH_GOOGLE_PATH, AUTH_LOGIN_PATH, AUTH_LOGOUT_PATH, AUTH_ME_PATH,
    AUTH_REGISTER_PATH, AUTH_RESET_PASSWORD_PATH, AUTH_VERIFY_EMAIL_PATH, AUTH_VERIFY_OTP_PATH,
};
use moodlog_domain::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, NewAccount, OtpRequest,
    RefreshRequest, ResetPasswordRequest, Result, Role, UserIdentity, VerifyEmailRequest,
};
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, ApiRequest};

#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Sign in with email and password, persisting the issued session.
    ///
    /// # Errors
    /// A rejected password comes back as `ApiError::Auth` with the server's
    /// message; it never triggers renewal or teardown.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response: AuthResponse =
            self.client.post(AUTH_LOGIN_PATH, &LoginRequest { email, password }).await?;
        self.sign_in(&response).await?;
        info!(role = ?response.user.as_ref().and_then(|u| u.role), "signed in");
        Ok(response)
    }

    #[instrument(skip_all)]
    pub async fn register(&self, account: &NewAccount) -> Result<MessageResponse> {
        self.client.post(AUTH_REGISTER_PATH, account).await
    }

    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse> {
        self.client.post(AUTH_VERIFY_EMAIL_PATH, &VerifyEmailRequest { token }).await
    }

    #[instrument(skip_all)]
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse> {
        self.client.post(AUTH_FORGOT_PASSWORD_PATH, &ForgotPasswordRequest { email }).await
    }

    #[instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<MessageResponse> {
        self.client.post(AUTH_RESET_PASSWORD_PATH, &ResetPasswordRequest { token, password }).await
    }

    /// Complete a one-time-password sign in. Persists like [`Self::login`].
    #[instrument(skip_all)]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse> {
        let response: AuthResponse =
            self.client.post(AUTH_VERIFY_OTP_PATH, &OtpRequest { email, otp }).await?;
        self.sign_in(&response).await?;
        info!("signed in with one-time password");
        Ok(response)
    }

    /// Where to send the user for Google sign in
    pub fn google_login_url(&self) -> String {
        self.client.url(AUTH_GOOGLE_PATH)
    }

    /// Tell the backend to revoke the session, then end it locally.
    ///
    /// Backend failures are logged and otherwise ignored.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<()> {
        let refresh_token = self.client.store().refresh_token().await?;

        let mut request = ApiRequest::post(AUTH_LOGOUT_PATH);
        if let Some(refresh_token) = &refresh_token {
            request = request.json(&RefreshRequest { refresh_token })?;
        }
        if let Err(e) = self.client.execute(request).await {
            warn!(error = %e, "backend logout failed, ending local session anyway");
        }

        self.client.session().end_session().await;
        info!("signed out");
        Ok(())
    }

    /// Fetch the signed-in user and refresh the cached identity and role
    #[instrument(skip_all)]
    pub async fn current_user(&self) -> Result<UserIdentity> {
        let user: UserIdentity = self.client.get(AUTH_ME_PATH).await?;
        self.client.store().apply(SessionUpdate::SetUser(user.clone())).await?;
        Ok(user)
    }

    /// Whether an access token is stored. Says nothing about its validity.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.client.store().access_token().await?.is_some())
    }

    /// Cached role of the signed-in user
    pub async fn role(&self) -> Result<Option<Role>> {
        Ok(self.client.store().load().await?.role)
    }

    async fn sign_in(&self, response: &AuthResponse) -> Result<()> {
        self.client
            .store()
            .apply(SessionUpdate::SignIn {
                access_token: response.access_token.clone(),
                refresh_token: response.refresh_token.clone(),
                user: response.user.clone(),
            })
            .await
    }
}
