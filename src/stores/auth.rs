// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in state. The current user lives in the shared [`Session`] so the
//! other stores and the transport see the same identity.
//!
//! [`Session`]: crate::session::Session

use crate::error::{AppError, Result};
use crate::models::{AuthResponse, ProfilePatch, Registration, User};
use crate::services::{AuthApi, UsersApi};
use crate::session::keys;
use crate::stores::{HasStatus, LoadStatus, StateCell, StoreContext};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: User,
    /// The profile setup screen should come next
    pub needs_profile_setup: bool,
}

#[derive(Debug, Clone, Default)]
struct AuthState {
    status: LoadStatus,
}

impl HasStatus for AuthState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct AuthStore {
    ctx: StoreContext,
    api: AuthApi,
    users: UsersApi,
    state: StateCell<AuthState>,
}

impl AuthStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            api: AuthApi::new(ctx.client.clone()),
            users: UsersApi::new(ctx.client.clone()),
            ctx,
            state: StateCell::new(AuthState::default()),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.ctx.session().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.session().user().is_some()
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.status.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.status.error.clone())
    }

    /// Email address an OTP was last sent to, if not yet verified.
    pub fn pending_email(&self) -> Option<String> {
        self.recall(keys::PENDING_EMAIL)
    }

    pub fn pending_phone(&self) -> Option<String> {
        self.recall(keys::PENDING_PHONE)
    }

    /// Resolve the stored token into a user.
    ///
    /// A token the backend rejects is dropped and `Ok(None)` returned. When
    /// the backend cannot be reached the token is kept for a later attempt.
    pub async fn check_auth_status(&self) -> Result<Option<User>> {
        self.state.begin();
        let session = self.ctx.session();

        if !session.has_token() {
            session.set_user(None);
            self.state.finish();
            return Ok(None);
        }

        match self.api.current_user().await {
            Ok(user) => {
                session.set_user(Some(user.clone()));
                self.state.finish();
                Ok(Some(user))
            }
            Err(e @ AppError::Api { .. }) => {
                tracing::info!(error = %e, "Stored token rejected, signing out");
                if let Err(clear_err) = session.clear() {
                    tracing::warn!(error = %clear_err, "Failed to remove stored token");
                }
                self.state.finish();
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Auth check failed");
                session.set_user(None);
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        self.state.begin();
        let result = match self.api.login(email, password).await {
            Ok(response) => {
                let needs_profile_setup = response.needs_profile_setup;
                self.resolve_user(response)
                    .await
                    .map(|user| LoginOutcome {
                        user,
                        needs_profile_setup,
                    })
            }
            Err(e) => Err(e),
        };
        self.signed_in(result, "Login Failed")
    }

    pub async fn register(&self, registration: &Registration) -> Result<LoginOutcome> {
        self.state.begin();
        let result = match self.api.register(registration).await {
            Ok(response) => {
                let needs_profile_setup = response.needs_profile_setup;
                self.resolve_user(response)
                    .await
                    .map(|user| LoginOutcome {
                        user,
                        needs_profile_setup,
                    })
            }
            Err(e) => Err(e),
        };
        self.signed_in(result, "Registration Failed")
    }

    pub async fn send_otp(&self, email: &str) -> Result<()> {
        let result = self.api.send_otp(email).await;
        self.otp_sent(result, keys::PENDING_EMAIL, email)
    }

    pub async fn send_mobile_otp(&self, phone: &str) -> Result<()> {
        let result = self.api.send_mobile_otp(phone).await;
        self.otp_sent(result, keys::PENDING_PHONE, phone)
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<LoginOutcome> {
        self.state.begin();
        let result = match self.api.verify_otp(email, otp).await {
            Ok(response) => self.resolve_user(response).await.map(Self::by_profile),
            Err(e) => Err(e),
        };
        let outcome = self.signed_in(result, "Verification Failed")?;
        self.forget(keys::PENDING_EMAIL);
        Ok(outcome)
    }

    pub async fn verify_mobile_otp(&self, phone: &str, otp: &str) -> Result<LoginOutcome> {
        self.state.begin();
        let result = match self.api.verify_mobile_otp(phone, otp).await {
            Ok(response) => self.resolve_user(response).await.map(Self::by_profile),
            Err(e) => Err(e),
        };
        let outcome = self.signed_in(result, "Verification Failed")?;
        self.forget(keys::PENDING_PHONE);
        Ok(outcome)
    }

    /// Sign out. Local state is always cleared; a storage failure is
    /// still reported.
    pub fn logout(&self) -> Result<()> {
        let result = self.api.logout();
        match &result {
            Ok(()) => tracing::info!("Signed out"),
            Err(e) => tracing::error!(error = %e, "Logout error"),
        }
        result
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User> {
        self.state.begin();
        let result = if self.ctx.session().has_token() {
            self.users.update_profile(patch).await
        } else {
            Err(AppError::NotAuthenticated)
        };
        match result {
            Ok(user) => {
                self.ctx.session().set_user(Some(user.clone()));
                self.state.finish();
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to update profile");
                self.state.fail(&e);
                self.ctx.notify_failure("Update Failed", &e);
                Err(e)
            }
        }
    }

    /// The user embedded in a sign-in response, or `/auth/me` when the
    /// backend left it out.
    async fn resolve_user(&self, response: AuthResponse) -> Result<User> {
        match response.user {
            Some(user) => Ok(user),
            None => self.api.current_user().await,
        }
    }

    fn by_profile(user: User) -> LoginOutcome {
        LoginOutcome {
            needs_profile_setup: !user.profile_complete(),
            user,
        }
    }

    fn signed_in(&self, result: Result<LoginOutcome>, title: &str) -> Result<LoginOutcome> {
        match result {
            Ok(outcome) => {
                tracing::info!(user_id = outcome.user.id, "Signed in");
                self.ctx.session().set_user(Some(outcome.user.clone()));
                self.state.finish();
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "{}", title);
                self.state.fail(&e);
                self.ctx.notify_failure(title, &e);
                Err(e)
            }
        }
    }

    fn otp_sent(
        &self,
        result: Result<serde_json::Value>,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let result = result.and_then(|_| self.ctx.session().remember(key, value));
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Failed to send OTP");
            self.state.fail(e);
            self.ctx.notify_failure("Error", e);
        }
        result
    }

    fn recall(&self, key: &str) -> Option<String> {
        self.ctx
            .session()
            .recall(key)
            .inspect_err(|e| tracing::warn!(key, error = %e, "Failed to read session value"))
            .ok()
            .flatten()
    }

    fn forget(&self, key: &str) {
        if let Err(e) = self.ctx.session().forget(key) {
            tracing::warn!(key, error = %e, "Failed to clear session value");
        }
    }
}
