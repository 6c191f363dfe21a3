//! Account endpoints under `/auth`.
//!
//! Every credential exchange (password, Google OAuth session, phone OTP)
//! installs the returned token and user in the client's session.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::{ApiClient, Auth};
use crate::error::{Result, VeriqoError};
use crate::models::{
    Ack, AuthResponse, LoginRequest, OtpRequest, RegisterRequest, ResetPasswordRequest, User,
};

// ---------------------------------------------------------------------------
// AuthApi
// ---------------------------------------------------------------------------

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn establish(&self, auth: AuthResponse) -> User {
        let user = auth.user.clone();
        self.client.session().set_auth(auth);
        info!(user_id = %user.id, "session established");
        user
    }

    /// Email/password login.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let auth: AuthResponse = self.client.post(
            "/auth/login",
            &LoginRequest { email, password },
            Auth::Anonymous,
        )?;
        Ok(self.establish(auth))
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let auth: AuthResponse = self.client.post(
            "/auth/register",
            &RegisterRequest {
                name,
                email,
                password,
            },
            Auth::Anonymous,
        )?;
        Ok(self.establish(auth))
    }

    /// Tell the backend to end the session, then forget it locally.
    ///
    /// The local session is cleared even when the server call fails.
    pub fn logout(&self) -> Result<()> {
        let outcome = if self.client.session().is_authenticated() {
            self.client
                .post::<Value, _>("/auth/logout", &json!({}), Auth::Required)
                .map(|_| ())
        } else {
            Ok(())
        };
        self.client.session().clear();
        if let Err(e) = &outcome {
            warn!(error = %e, "server-side logout failed; local session cleared anyway");
        }
        outcome
    }

    pub fn forgot_password(&self, email: &str) -> Result<Ack> {
        self.client
            .post("/auth/forgot-password", &json!({ "email": email }), Auth::Anonymous)
    }

    pub fn reset_password(&self, token: &str, new_password: &str) -> Result<Ack> {
        if new_password.is_empty() {
            return Err(VeriqoError::InvalidArgument(
                "Password must not be empty".to_string(),
            ));
        }
        self.client.post(
            "/auth/reset-password",
            &ResetPasswordRequest {
                token,
                new_password,
            },
            Auth::Anonymous,
        )
    }

    /// Exchange an OAuth callback session id for a Veriqo session.
    pub fn google_session(&self, session_id: &str) -> Result<User> {
        let auth: AuthResponse = self.client.post(
            "/auth/google/session",
            &json!({ "session_id": session_id }),
            Auth::Anonymous,
        )?;
        Ok(self.establish(auth))
    }

    pub fn send_otp(&self, phone_number: &str) -> Result<Ack> {
        self.client.post(
            "/auth/phone/send-otp",
            &OtpRequest {
                phone_number,
                code: None,
            },
            Auth::Anonymous,
        )
    }

    pub fn verify_otp(&self, phone_number: &str, code: &str) -> Result<User> {
        let auth: AuthResponse = self.client.post(
            "/auth/phone/verify-otp",
            &OtpRequest {
                phone_number,
                code: Some(code),
            },
            Auth::Anonymous,
        )?;
        Ok(self.establish(auth))
    }

    /// Fetch the current user and refresh the session's cached copy.
    ///
    /// A rejected token clears the session, so a stale login never lingers.
    pub fn me(&self) -> Result<User> {
        match self.client.get::<User>("/auth/me", Auth::Required) {
            Ok(user) => {
                self.client.session().set_user(user.clone());
                Ok(user)
            }
            Err(e @ VeriqoError::Unauthorized(_)) => {
                self.client.session().clear();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn complete_onboarding(&self) -> Result<()> {
        self.client
            .put::<Value, _>("/auth/complete-onboarding", &json!({}), Auth::Required)?;
        self.client.session().mark_onboarding_completed();
        Ok(())
    }
}
