use crate::{
    auth::{
        InputType, ResetOutcome, ResetPasswordFlow,
        reset::PASSWORDS_DO_NOT_MATCH_MESSAGE, validation::PASSWORD_HINT,
    },
    cli::actions::terminal::{TerminalNavigator, TerminalNotifier},
};
use anyhow::{Result, bail};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub show_password: bool,
    pub show_confirm_password: bool,
}

fn render_field(label: &str, value: &SecretString, input: InputType) -> String {
    let value = value.expose_secret();
    if input.is_obscured() {
        format!("{label}: {}", "*".repeat(value.chars().count()))
    } else {
        format!("{label}: {value}")
    }
}

/// Lines of the reset form as the terminal shows them before `finish`.
fn render_form(flow: &ResetPasswordFlow, args: &Args) -> Vec<String> {
    let mut lines = vec![
        render_field("Password", &args.password, flow.password_input_type()),
        format!("  {PASSWORD_HINT}"),
        render_field(
            "Verify Password",
            &args.confirm_password,
            flow.confirm_input_type(),
        ),
    ];

    if flow.shows_mismatch() {
        lines.push(format!("  {PASSWORDS_DO_NOT_MATCH_MESSAGE}"));
    }

    lines
}

fn build_flow(args: &Args) -> ResetPasswordFlow {
    let flow = ResetPasswordFlow::new(
        Arc::new(TerminalNavigator::default()),
        Arc::new(TerminalNotifier),
    );
    flow.set_password(args.password.clone());
    flow.set_confirm_password(args.confirm_password.clone());

    if args.show_password {
        flow.toggle_password_visibility();
    }
    if args.show_confirm_password {
        flow.toggle_confirm_visibility();
    }

    flow
}

/// Execute the reset-password action.
/// # Errors
/// Returns the flow's error message when the new password is rejected.
pub fn execute(args: &Args) -> Result<()> {
    let flow = build_flow(args);

    for line in render_form(&flow, args) {
        println!("{line}");
    }

    match flow.finish() {
        ResetOutcome::Completed => Ok(()),
        ResetOutcome::Rejected => bail!(flow.error().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::reset::{BOTH_FIELDS_REQUIRED_MESSAGE, INVALID_PASSWORD_MESSAGE};

    fn args(password: &str, confirm: &str, show_password: bool, show_confirm: bool) -> Args {
        Args {
            password: SecretString::from(password.to_string()),
            confirm_password: SecretString::from(confirm.to_string()),
            show_password,
            show_confirm_password: show_confirm,
        }
    }

    #[test]
    fn test_render_masks_hidden_fields() {
        let args = args("Abcdef1!", "Abcdef1!", false, true);
        let flow = build_flow(&args);

        let lines = render_form(&flow, &args);
        assert_eq!(lines[0], "Password: ********");
        assert!(lines[1].contains(PASSWORD_HINT));
        assert_eq!(lines[2], "Verify Password: Abcdef1!");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_shows_mismatch_indicator() {
        let args = args("Abcdef1!", "Different1!", false, false);
        let flow = build_flow(&args);

        let lines = render_form(&flow, &args);
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains(PASSWORDS_DO_NOT_MATCH_MESSAGE));
    }

    #[test]
    fn test_execute_outcomes() {
        assert!(execute(&args("Abcdef1!", "Abcdef1!", false, false)).is_ok());

        let missing = execute(&args("Abcdef1!", "", false, false));
        assert!(missing.is_err());
        if let Err(err) = missing {
            assert_eq!(err.to_string(), BOTH_FIELDS_REQUIRED_MESSAGE);
        }

        let mismatch = execute(&args("Abcdef1!", "Different1!", false, false));
        assert!(mismatch.is_err());
        if let Err(err) = mismatch {
            assert_eq!(err.to_string(), INVALID_PASSWORD_MESSAGE);
        }
    }
}
