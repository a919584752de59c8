use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("Username is taken")]
    UsernameTaken,
    #[error("Please provide a valid, unused email address.")]
    EmailRejected,
    #[error("Please choose a valid, unused username.")]
    UsernameRejected,
    #[error("Please enter a password.")]
    MissingPassword,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// The signup form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm: String,
}

/// In-memory account registry backing the availability checks.
///
/// Lives as long as the app; nothing is persisted and passwords are not kept.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    emails: HashSet<String>,
    usernames: HashSet<String>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory with some accounts already taken.
    pub fn with_accounts<'a>(accounts: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut dir = Self::new();
        for (email, username) in accounts {
            dir.emails.insert(normalize_email(email));
            dir.usernames.insert(username.to_string());
        }
        dir
    }

    /// Availability check run when the email field loses focus.
    pub fn check_email(&self, email: &str) -> Result<(), SignupError> {
        let email = normalize_email(email);
        let valid = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !valid {
            return Err(SignupError::InvalidEmail);
        }
        if self.emails.contains(&email) {
            return Err(SignupError::EmailTaken);
        }
        Ok(())
    }

    pub fn check_username(&self, username: &str) -> Result<(), SignupError> {
        if self.usernames.contains(username.trim()) {
            return Err(SignupError::UsernameTaken);
        }
        Ok(())
    }

    /// Validate `form` in field order and register it.
    pub fn signup(&mut self, form: &SignupForm) -> Result<(), SignupError> {
        if form.email.trim().is_empty() || self.check_email(&form.email).is_err() {
            return Err(SignupError::EmailRejected);
        }
        if form.username.trim().is_empty() || self.check_username(&form.username).is_err() {
            return Err(SignupError::UsernameRejected);
        }
        if form.password.is_empty() {
            return Err(SignupError::MissingPassword);
        }
        if form.password != form.confirm {
            return Err(SignupError::PasswordMismatch);
        }
        self.emails.insert(normalize_email(&form.email));
        self.usernames.insert(form.username.trim().to_string());
        log::info!("registered account {}", form.username.trim());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, username: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn availability_checks() {
        let dir = AccountDirectory::with_accounts([("taken@eeg.cloud", "xiberlinc")]);
        assert_eq!(dir.check_email("Taken@EEG.cloud"), Err(SignupError::EmailTaken));
        assert_eq!(dir.check_email("no-at-sign"), Err(SignupError::InvalidEmail));
        assert!(dir.check_email("new@eeg.cloud").is_ok());
        assert_eq!(
            dir.check_username("xiberlinc").unwrap_err().to_string(),
            "Username is taken"
        );
        assert!(dir.check_username("someone").is_ok());
    }

    #[test]
    fn validation_runs_in_field_order() {
        let mut dir = AccountDirectory::with_accounts([("taken@eeg.cloud", "xiberlinc")]);
        let cases = [
            (form("", "", "", ""), SignupError::EmailRejected),
            (form("taken@eeg.cloud", "new", "pw", "pw"), SignupError::EmailRejected),
            (form("a@b.io", "", "pw", "pw"), SignupError::UsernameRejected),
            (form("a@b.io", "xiberlinc", "pw", "pw"), SignupError::UsernameRejected),
            (form("a@b.io", "new", "", ""), SignupError::MissingPassword),
            (form("a@b.io", "new", "pw", "pW"), SignupError::PasswordMismatch),
        ];
        for (f, expected) in cases {
            assert_eq!(dir.signup(&f), Err(expected));
        }
        assert_eq!(
            SignupError::EmailRejected.to_string(),
            "Please provide a valid, unused email address."
        );
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn successful_signup_reserves_names() {
        let mut dir = AccountDirectory::new();
        dir.signup(&form("a@b.io", "alice", "pw", "pw")).expect("signup");
        assert_eq!(dir.check_email("A@b.io"), Err(SignupError::EmailTaken));
        assert_eq!(dir.check_username("alice"), Err(SignupError::UsernameTaken));
        assert_eq!(
            dir.signup(&form("c@d.io", "alice", "pw", "pw")),
            Err(SignupError::UsernameRejected)
        );
    }
}
