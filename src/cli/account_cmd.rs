//! Account and history command handlers

use std::io::{self, BufRead, IsTerminal, Write};

use crate::application::ports::{AuthService, JournalStore};
use crate::domain::journal::AuthSession;

use super::args::AccountAction;
use super::presenter::Presenter;

/// Handle account subcommand
pub async fn handle_account_command<J>(
    action: AccountAction,
    client: &J,
    presenter: &Presenter,
) -> Result<(), String>
where
    J: AuthService + JournalStore,
{
    match action {
        AccountAction::SignIn { email, password } => {
            let password = resolve_password(password)?;
            let session = client
                .sign_in(&email, &password)
                .await
                .map_err(|e| e.to_string())?;
            presenter.success(&format!("Signed in as {}", account_label(&session)));
        }
        AccountAction::SignUp {
            email,
            name,
            password,
        } => {
            let password = resolve_password(password)?;
            validate_sign_up(&email, &password, &name)?;
            match client
                .sign_up(&email, &password, name.trim())
                .await
                .map_err(|e| e.to_string())?
            {
                Some(session) => {
                    presenter.success(&format!("Account created, signed in as {}", account_label(&session)))
                }
                None => presenter.info(&format!(
                    "Account created. Confirm the email sent to {} and then sign in",
                    email
                )),
            }
        }
        AccountAction::SignOut => {
            client.sign_out().await.map_err(|e| e.to_string())?;
            presenter.success("Signed out");
        }
        AccountAction::Status => {
            let Some(session) = client.session().await else {
                presenter.info("Not signed in");
                return Ok(());
            };
            presenter.key_value("email", session.user.email.as_deref().unwrap_or("(unknown)"));
            presenter.key_value("user_id", session.user_id());

            match client.profile(session.user_id()).await {
                Ok(profile) => {
                    presenter.key_value(
                        "display_name",
                        profile.display_name.as_deref().unwrap_or("(not set)"),
                    );
                    presenter.key_value("subscription", &profile.subscription_tier.to_string());
                    presenter.key_value("dreams", &profile.dream_count.to_string());
                }
                Err(e) => presenter.warn(&format!("Could not load profile: {}", e)),
            }
        }
    }

    Ok(())
}

/// List journaled dreams, newest first
pub async fn handle_history<J>(client: &J, limit: usize, presenter: &Presenter) -> Result<(), String>
where
    J: AuthService + JournalStore,
{
    let session = client
        .session()
        .await
        .ok_or_else(|| "Not signed in. Run 'dreamtalk account sign-in' first".to_string())?;

    let dreams = client
        .list_dreams(session.user_id())
        .await
        .map_err(|e| e.to_string())?;

    if dreams.is_empty() {
        presenter.info("Your dream journal is empty");
        return Ok(());
    }

    for dream in dreams.iter().take(limit) {
        presenter.output(&presenter.dream_line(dream));
    }
    if dreams.len() > limit {
        presenter.info(&format!("{} more not shown", dreams.len() - limit));
    }

    Ok(())
}

fn account_label(session: &AuthSession) -> String {
    session
        .user
        .email
        .clone()
        .unwrap_or_else(|| session.user_id().to_string())
}

/// Client-side checks before an account is created
fn validate_sign_up(email: &str, password: &str, name: &str) -> Result<(), String> {
    if !email.contains('@') {
        return Err(format!("'{}' is not an email address", email));
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    Ok(())
}

/// Use the given password or read one line from stdin
fn resolve_password(password: Option<String>) -> Result<String, String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        let _ = io::stderr().flush();
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read password: {}", e))?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(password)
}
