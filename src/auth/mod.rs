//! Auth flow
//!
//! Implements the login and registration flows:
//! - Field validation before any network traffic
//! - Credential exchange with the backend
//! - Persisting the returned session through the session store
//!
//! The flow moves through `Idle -> Validating -> Submitting` and ends in
//! `Succeeded` or `Failed`. Validation failures return the flow to `Idle`
//! without a network call. At most one login request is in flight at a
//! time; concurrent submits are rejected outright.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::{Backend, ClientError};
use crate::models::Session;
use crate::store::SessionStore;

/// Shown next to the email field when its value is not a plausible address
pub const EMAIL_ERROR: &str = "Please enter a valid email address.";
/// Shown next to the password field when it is too short
pub const PASSWORD_ERROR: &str = "Password must be at least 6 characters long.";
/// Generic message for the shared login error element; credential,
/// transport and parse failures all collapse into it
pub const LOGIN_ERROR: &str = "Wrong credentials.";
/// Shown next to the username field during registration
pub const USERNAME_ERROR: &str = "Please enter a username.";
/// Shown next to the password field during registration
pub const NEW_PASSWORD_ERROR: &str =
    "Password must be at least 8 characters long and contain a digit and an uppercase letter.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Check that the address looks like `local-part@domain.tld`:
/// no whitespace or extra `@`, and at least one dot in the domain.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check the login password rule: at least 6 characters
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 6
}

/// Check the registration password policy: at least 8 characters with at
/// least one letter, one uppercase letter and one digit.
pub fn validate_new_password(password: &str) -> bool {
    let mut has_digit = false;
    let mut has_upper = false;
    let mut letters = 0usize;
    for c in password.chars() {
        if c.is_numeric() {
            has_digit = true;
        } else if c.is_uppercase() {
            has_upper = true;
        } else if c.is_alphabetic() || c == ' ' {
            letters += 1;
        }
    }
    password.chars().count() >= 8 && letters >= 1 && has_digit && has_upper
}

/// Observable state of the login flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Form field a validation error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Username,
}

/// A field-level validation error; the request is never sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn email() -> Self {
        Self {
            field: Field::Email,
            message: EMAIL_ERROR,
        }
    }

    fn password(message: &'static str) -> Self {
        Self {
            field: Field::Password,
            message,
        }
    }

    fn username() -> Self {
        Self {
            field: Field::Username,
            message: USERNAME_ERROR,
        }
    }
}

/// Login form input
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form input
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Result of a login submit
#[derive(Debug)]
pub enum LoginOutcome {
    /// Validation failed; nothing was sent
    Rejected(FieldError),
    /// A previous submit is still outstanding; nothing was sent
    InFlight,
    /// The backend rejected the credentials or could not be reached
    Failed { message: String },
    /// The session was stored; the caller should navigate to the recipes view
    LoggedIn(Session),
}

/// Result of a registration submit
#[derive(Debug)]
pub enum RegisterOutcome {
    /// Validation failed; nothing was sent
    Rejected(FieldError),
    /// The backend rejected the registration
    Failed { message: String },
    Registered,
}

/// The login/registration flow over an injected backend and session store
pub struct AuthFlow {
    backend: Arc<dyn Backend>,
    store: Arc<dyn SessionStore>,
    in_flight: AtomicBool,
    state: Mutex<AuthState>,
}

impl AuthFlow {
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(AuthState::Idle),
        }
    }

    /// Current flow state
    pub fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: AuthState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Submit the login form.
    ///
    /// Exactly one submit runs at a time; a second call while a request is
    /// outstanding returns [`LoginOutcome::InFlight`] without validating or
    /// touching the network.
    pub async fn submit(&self, form: &LoginForm) -> LoginOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return LoginOutcome::InFlight;
        }
        let outcome = self.run_submit(form).await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_submit(&self, form: &LoginForm) -> LoginOutcome {
        self.set_state(AuthState::Validating);

        if !validate_email(&form.email) {
            self.set_state(AuthState::Idle);
            return LoginOutcome::Rejected(FieldError::email());
        }
        if !validate_password(&form.password) {
            self.set_state(AuthState::Idle);
            return LoginOutcome::Rejected(FieldError::password(PASSWORD_ERROR));
        }

        self.set_state(AuthState::Submitting);

        match self.backend.login(&form.email, &form.password).await {
            Ok(session) => {
                if let Err(e) = self.store.write(&session) {
                    tracing::error!(error = %e, "failed to persist session after login");
                    self.set_state(AuthState::Failed);
                    return LoginOutcome::Failed {
                        message: LOGIN_ERROR.to_string(),
                    };
                }
                tracing::info!(username = %session.username, "login succeeded");
                self.set_state(AuthState::Succeeded);
                LoginOutcome::LoggedIn(session)
            }
            Err(e) => {
                // Credential, transport and parse errors all surface the
                // same generic message; only the log tells them apart.
                tracing::warn!(error = %e, "login failed");
                self.set_state(AuthState::Failed);
                LoginOutcome::Failed {
                    message: LOGIN_ERROR.to_string(),
                }
            }
        }
    }

    /// Submit the registration form
    pub async fn register(&self, form: &RegisterForm) -> RegisterOutcome {
        if form.username.trim().is_empty() {
            return RegisterOutcome::Rejected(FieldError::username());
        }
        if !validate_email(&form.email) {
            return RegisterOutcome::Rejected(FieldError::email());
        }
        if !validate_new_password(&form.password) {
            return RegisterOutcome::Rejected(FieldError::password(NEW_PASSWORD_ERROR));
        }

        match self
            .backend
            .register(&form.username, &form.email, &form.password)
            .await
        {
            Ok(()) => RegisterOutcome::Registered,
            Err(ClientError::Api { message, .. }) => RegisterOutcome::Failed { message },
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                RegisterOutcome::Failed {
                    message: "Registration failed. Please try again later.".to_string(),
                }
            }
        }
    }
}
