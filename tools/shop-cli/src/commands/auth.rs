//! Simulated sign-in command.

use anyhow::{bail, Result};
use dialoguer::Password;
use shop_commerce::session::{
    AuthFlow, AuthForm, AuthOutcome, Delay, NoDelay, TaskState, TokioDelay,
};
use shop_commerce::CommerceError;

use super::{AuthArgs, AuthCommand};
use crate::context::Context;
use crate::output::task_badge;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    ctx.require_valid_config()?;
    let timings = ctx.config.session_timings();

    if args.no_delay {
        submit(AuthFlow::new(NoDelay, timings), args.command, ctx).await
    } else {
        submit(AuthFlow::new(TokioDelay, timings), args.command, ctx).await
    }
}

fn summary(state: &TaskState<AuthOutcome, CommerceError>) -> serde_json::Value {
    match state {
        TaskState::Resolved(outcome) => serde_json::json!({
            "state": "resolved",
            "mode": outcome.mode,
            "message": outcome.message,
        }),
        TaskState::Rejected(err) => serde_json::json!({
            "state": "rejected",
            "error": err.to_string(),
        }),
        TaskState::Idle | TaskState::Pending => serde_json::json!({ "state": "pending" }),
    }
}

async fn submit<D: Delay>(mut flow: AuthFlow<D>, command: AuthCommand, ctx: &Context) -> Result<()> {
    let state = match command {
        AuthCommand::SignIn { email, password } => {
            let password = match password {
                Some(password) => password,
                None => Password::new().with_prompt("Password").interact()?,
            };
            let mut form = AuthForm::sign_in(email, password);

            let spinner = ctx.output.spinner("Signing in...");
            let state = flow.sign_in(&mut form).await;
            spinner.finish_and_clear();
            state
        }
        AuthCommand::SignUp {
            name,
            email,
            password,
            confirm,
        } => {
            let (password, confirm) = match (password, confirm) {
                (Some(password), Some(confirm)) => (password, confirm),
                (Some(password), None) => (password.clone(), password),
                (None, _) => {
                    let password = Password::new()
                        .with_prompt("Create a password")
                        .with_confirmation("Confirm your password", "Passwords do not match")
                        .interact()?;
                    (password.clone(), password)
                }
            };
            let mut form = AuthForm::sign_up(name, email, password, confirm);

            let spinner = ctx.output.spinner("Creating account...");
            let state = flow.sign_up(&mut form).await;
            spinner.finish_and_clear();
            state
        }
        AuthCommand::Google => {
            let spinner = ctx.output.spinner("Connecting to Google...");
            let state = flow.google_sign_in().await;
            spinner.finish_and_clear();
            state
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&summary(state));
        return match state.rejected() {
            Some(err) => bail!("{}", err),
            None => Ok(()),
        };
    }

    ctx.output.kv("request", &task_badge(state));
    match state {
        TaskState::Resolved(outcome) => {
            ctx.output.success(&outcome.message);
            Ok(())
        }
        TaskState::Rejected(err) => bail!("{}", err),
        TaskState::Idle | TaskState::Pending => bail!("Request did not settle"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use shop_commerce::catalog::Catalog;
    use shop_commerce::session::SessionTimings;

    use crate::config::CliConfig;
    use crate::output::Output;

    fn json_context() -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("."),
            catalog: Catalog::shipped().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_rejected_sign_in_returns_error_in_json_mode() {
        let ctx = json_context();
        let flow = AuthFlow::new(NoDelay, SessionTimings::default());
        let command = AuthCommand::SignIn {
            email: "not-an-email".to_string(),
            password: Some("secret".to_string()),
        };

        let err = submit(flow, command, &ctx).await.unwrap_err();
        assert!(err.to_string().contains("not-an-email"));
    }

    #[tokio::test]
    async fn test_resolved_sign_in_succeeds_in_json_mode() {
        let ctx = json_context();
        let flow = AuthFlow::new(NoDelay, SessionTimings::default());
        let command = AuthCommand::SignIn {
            email: "ada@example.com".to_string(),
            password: Some("secret".to_string()),
        };

        assert!(submit(flow, command, &ctx).await.is_ok());
    }

    #[test]
    fn test_summary_shapes() {
        let rejected: TaskState<AuthOutcome, CommerceError> =
            TaskState::Rejected(CommerceError::PasswordMismatch);
        assert_eq!(summary(&rejected)["state"], "rejected");
        assert_eq!(summary(&TaskState::Idle)["state"], "pending");
    }
}
