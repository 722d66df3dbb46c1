//! Sign-in and sign-up forms
//!
//! These validate credentials with the same rule tables as the list forms,
//! then hand off to an `AuthBackend`. The only backend shipped here is
//! `SimulatedAuth`, which waits and accepts everything.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::form::FormController;
use crate::schema::{SIGN_IN, SIGN_UP};
use crate::validation::ValidationErrors;

pub const SIGN_IN_FAILED: &str = "Invalid email or password. Please try again.";
pub const SIGN_UP_FAILED: &str = "An error occurred during signup. Please try again.";

/// Auth backend failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    AccountExists,

    #[error("{0}")]
    Rejected(String),

    #[error("authentication service unavailable")]
    Unavailable,

    #[error("request cancelled")]
    Cancelled,
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSession {
    pub email: String,
    pub display_name: Option<String>,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn issue(email: &str, display_name: Option<String>) -> Self {
        Self {
            email: email.to_string(),
            display_name,
            token: uuid::Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;
    async fn sign_up(&self, profile: &Profile) -> Result<AuthSession, AuthError>;
}

/// Stand-in backend: logs the payload, waits, then accepts
#[derive(Debug, Clone)]
pub struct SimulatedAuth {
    delay: Duration,
}

impl SimulatedAuth {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedAuth {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl AuthBackend for SimulatedAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        info!(email = %credentials.email, "sign-in request");
        tokio::time::sleep(self.delay).await;
        Ok(AuthSession::issue(&credentials.email, None))
    }

    async fn sign_up(&self, profile: &Profile) -> Result<AuthSession, AuthError> {
        info!(email = %profile.email, first_name = %profile.first_name, "sign-up request");
        tokio::time::sleep(self.delay).await;
        let name = format!("{} {}", profile.first_name, profile.last_name);
        Ok(AuthSession::issue(&profile.email, Some(name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    fn failure_banner(&self) -> &'static str {
        match self {
            AuthMode::SignIn => SIGN_IN_FAILED,
            AuthMode::SignUp => SIGN_UP_FAILED,
        }
    }
}

/// A validated, normalised payload ready for the backend
#[derive(Debug, Clone)]
pub enum AuthRequest {
    SignIn(Credentials),
    SignUp(Profile),
}

impl AuthRequest {
    pub async fn send(&self, backend: &dyn AuthBackend) -> Result<AuthSession, AuthError> {
        match self {
            AuthRequest::SignIn(credentials) => backend.sign_in(credentials).await,
            AuthRequest::SignUp(profile) => backend.sign_up(profile).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    SignedIn(AuthSession),
    Invalid(ValidationErrors),
    Failed(String),
    Cancelled,
}

/// Sign-in or sign-up form state, including the top-level error banner
#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: AuthMode,
    form: FormController,
    banner: Option<String>,
    submitting: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        let schema = match mode {
            AuthMode::SignIn => &SIGN_IN,
            AuthMode::SignUp => &SIGN_UP,
        };
        Self {
            mode,
            form: FormController::new(schema),
            banner: None,
            submitting: false,
        }
    }

    pub fn sign_in() -> Self {
        Self::new(AuthMode::SignIn)
    }

    pub fn sign_up() -> Self {
        Self::new(AuthMode::SignUp)
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and normalise the input, entering the submitting state
    pub fn prepare(&mut self) -> Result<AuthRequest, ValidationErrors> {
        self.banner = None;
        self.form.check()?;

        let email = self.form.value("email").trim().to_lowercase();
        let password = self.form.value("password").to_string();
        let request = match self.mode {
            AuthMode::SignIn => AuthRequest::SignIn(Credentials { email, password }),
            AuthMode::SignUp => AuthRequest::SignUp(Profile {
                first_name: self.form.value("firstName").trim().to_string(),
                last_name: self.form.value("lastName").trim().to_string(),
                email,
                password,
            }),
        };
        self.submitting = true;
        Ok(request)
    }

    /// Record the backend's answer and leave the submitting state
    pub fn finish(&mut self, result: Result<AuthSession, AuthError>) -> AuthOutcome {
        self.submitting = false;
        match result {
            Ok(session) => {
                info!(email = %session.email, mode = ?self.mode, "authenticated");
                self.form.reset();
                AuthOutcome::SignedIn(session)
            }
            Err(AuthError::Cancelled) => AuthOutcome::Cancelled,
            Err(err) => {
                warn!(mode = ?self.mode, error = %err, "authentication failed");
                let banner = match err {
                    AuthError::Rejected(message) if !message.trim().is_empty() => message,
                    _ => self.mode.failure_banner().to_string(),
                };
                self.banner = Some(banner.clone());
                AuthOutcome::Failed(banner)
            }
        }
    }

    /// Validate, call the backend, and settle the outcome
    ///
    /// Resolving `cancel` before the backend answers abandons the call.
    pub async fn submit<C>(&mut self, backend: &dyn AuthBackend, cancel: C) -> AuthOutcome
    where
        C: Future<Output = ()>,
    {
        let request = match self.prepare() {
            Ok(request) => request,
            Err(errors) => return AuthOutcome::Invalid(errors),
        };

        let result = tokio::select! {
            result = request.send(backend) => result,
            _ = cancel => Err(AuthError::Cancelled),
        };
        self.finish(result)
    }
}
