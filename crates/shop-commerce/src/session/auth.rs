//! Simulated sign-in and sign-up.
//!
//! There is no identity backend: a submission is validated locally, waits
//! out a fixed latency and then reports success.

use crate::error::CommerceError;
use crate::session::{Delay, NoDelay, SessionTimings, SimulatedTask, TaskState};
use serde::{Deserialize, Serialize};

/// Which auth action was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    SignIn,
    SignUp,
    Google,
}

/// Message shown once a simulated auth request settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub mode: AuthMode,
    pub message: String,
}

impl AuthOutcome {
    fn for_mode(mode: AuthMode) -> Self {
        let message = match mode {
            AuthMode::SignIn => "Sign in successful!",
            AuthMode::SignUp => "Sign up successful!",
            AuthMode::Google => "Google Sign-In would be implemented here with Google OAuth SDK",
        };
        Self {
            mode,
            message: message.to_string(),
        }
    }
}

/// Values bound to the sign-in / sign-up dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub name: String,
}

impl AuthForm {
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the fields an action requires.
    pub fn validate(&self, mode: AuthMode) -> Result<(), CommerceError> {
        match mode {
            AuthMode::Google => Ok(()),
            AuthMode::SignIn => {
                self.validate_email()?;
                if self.password.is_empty() {
                    return Err(CommerceError::MissingField("password"));
                }
                Ok(())
            }
            AuthMode::SignUp => {
                if self.name.trim().is_empty() {
                    return Err(CommerceError::MissingField("name"));
                }
                self.validate_email()?;
                if self.password.is_empty() {
                    return Err(CommerceError::MissingField("password"));
                }
                if self.password != self.confirm_password {
                    return Err(CommerceError::PasswordMismatch);
                }
                Ok(())
            }
        }
    }

    fn validate_email(&self) -> Result<(), CommerceError> {
        if self.email.trim().is_empty() {
            return Err(CommerceError::MissingField("email"));
        }
        if !self.email.contains('@') {
            return Err(CommerceError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Drop the entered values after a successful submission.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Drives the auth dialog's requests.
pub struct AuthFlow<D> {
    delay: D,
    timings: SessionTimings,
    task: SimulatedTask<AuthOutcome, CommerceError>,
}

impl<D: Delay> AuthFlow<D> {
    pub fn new(delay: D, timings: SessionTimings) -> Self {
        Self {
            delay,
            timings,
            task: SimulatedTask::new(timings.sign_in),
        }
    }

    pub fn state(&self) -> &TaskState<AuthOutcome, CommerceError> {
        self.task.state()
    }

    /// Submit the form as a sign-in.
    pub async fn sign_in(&mut self, form: &mut AuthForm) -> &TaskState<AuthOutcome, CommerceError> {
        self.submit(AuthMode::SignIn, form).await
    }

    /// Submit the form as a sign-up.
    pub async fn sign_up(&mut self, form: &mut AuthForm) -> &TaskState<AuthOutcome, CommerceError> {
        self.submit(AuthMode::SignUp, form).await
    }

    /// Start the (simulated) Google flow.
    pub async fn google_sign_in(&mut self) -> &TaskState<AuthOutcome, CommerceError> {
        self.submit(AuthMode::Google, &mut AuthForm::default()).await
    }

    async fn submit(
        &mut self,
        mode: AuthMode,
        form: &mut AuthForm,
    ) -> &TaskState<AuthOutcome, CommerceError> {
        let latency = match mode {
            AuthMode::Google => self.timings.google,
            AuthMode::SignIn | AuthMode::SignUp => self.timings.sign_in,
        };
        self.task = SimulatedTask::new(latency);

        // Invalid forms are rejected without waiting, like a browser's
        // required-field check.
        if let Err(err) = form.validate(mode) {
            tracing::warn!(?mode, error = %err, "auth form rejected");
            self.task.run(&NoDelay, || Err(err)).await;
            return self.task.state();
        }

        tracing::info!(?mode, latency_ms = latency.as_millis() as u64, "auth request pending");
        let state = self
            .task
            .run(&self.delay, || Ok(AuthOutcome::for_mode(mode)))
            .await;
        if state.resolved().is_some() {
            form.clear();
        }
        self.task.state()
    }
}
