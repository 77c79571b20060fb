//! Request schemas for the authentication endpoints

use crate::types::Email;
use crate::validation::{rules, Checker, Schema, Validated};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Minimum password length accepted at login
pub const LOGIN_PASSWORD_MIN: usize = 6;

/// Minimum password length for new accounts
pub const REGISTER_PASSWORD_MIN: usize = 8;

/// Minimum length for a password chosen through recovery
pub const RESET_PASSWORD_MIN: usize = 12;

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Email and password presented at login
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Schema for Credentials {
    type Input = CredentialsInput;

    fn parse(input: CredentialsInput) -> Validated<Self> {
        let mut checker = Checker::new();
        let email = checker.field("email", rules::required(input.email).and_then(rules::email));
        let password = checker.field(
            "password",
            rules::required_raw(input.password).and_then(rules::min_chars(LOGIN_PASSWORD_MIN)),
        );
        checker.build(|| {
            Some(Credentials {
                email: email?,
                password: password?,
            })
        })
    }
}

/// A new account request
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Date of birth that is not in the future
pub fn birth_date(value: String) -> Result<NaiveDate, String> {
    let date = rules::date(value)?;
    if date > Utc::now().date_naive() {
        return Err("Date of birth cannot be in the future".to_string());
    }
    Ok(date)
}

impl Schema for Registration {
    type Input = RegistrationInput;

    fn parse(input: RegistrationInput) -> Validated<Self> {
        let mut checker = Checker::new();
        let first_name = checker.field(
            "firstName",
            rules::required(input.first_name).and_then(rules::min_chars(2)),
        );
        let last_name = checker.field(
            "lastName",
            rules::required(input.last_name).and_then(rules::min_chars(2)),
        );
        let email = checker.field("email", rules::required(input.email).and_then(rules::email));
        let password = checker.field(
            "password",
            rules::required_raw(input.password).and_then(rules::min_chars(REGISTER_PASSWORD_MIN)),
        );
        let date_of_birth = checker.field(
            "dateOfBirth",
            rules::required(input.date_of_birth).and_then(birth_date),
        );
        checker.build(|| {
            Some(Registration {
                first_name: first_name?,
                last_name: last_name?,
                email: email?,
                password: password?,
                date_of_birth: date_of_birth?,
            })
        })
    }
}

/// Request to start password recovery for an address
#[derive(Debug, Clone)]
pub struct PasswordRecovery {
    pub email: Email,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRecoveryInput {
    pub email: Option<String>,
}

impl Schema for PasswordRecovery {
    type Input = PasswordRecoveryInput;

    fn parse(input: PasswordRecoveryInput) -> Validated<Self> {
        let mut checker = Checker::new();
        let email = checker.field("email", rules::required(input.email).and_then(rules::email));
        checker.build(|| Some(PasswordRecovery { email: email? }))
    }
}

/// New password chosen with a recovery token
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordResetInput {
    pub token: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// At least [`RESET_PASSWORD_MIN`] characters drawn from letters, digits and
/// `@$!%*?&`, with at least one of each class
pub fn strong_password(value: String) -> Result<String, String> {
    let value = rules::min_chars(RESET_PASSWORD_MIN)(value)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if allowed && has_lower && has_upper && has_digit && has_special {
        Ok(value)
    } else {
        Err(format!(
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one of {}",
            PASSWORD_SPECIALS
        ))
    }
}

impl Schema for PasswordReset {
    type Input = PasswordResetInput;

    fn parse(input: PasswordResetInput) -> Validated<Self> {
        let mut checker = Checker::new();
        let token = checker.field("token", rules::required(input.token));
        let password = checker.field(
            "password",
            rules::required_raw(input.password).and_then(strong_password),
        );
        if let Some(password) = &password {
            checker.ensure(
                "confirmPassword",
                input.confirm_password.as_deref() == Some(password.as_str()),
                "Passwords don't match",
            );
        }
        checker.build(|| {
            Some(PasswordReset {
                token: token?,
                password: password?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_reject_short_password_and_bad_email() {
        let errors = Credentials::parse(CredentialsInput {
            email: Some("nope".into()),
            password: Some("12345".into()),
        })
        .unwrap_err();
        assert!(errors.has_field("email"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_credentials_missing_fields() {
        let errors = Credentials::parse(CredentialsInput::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_registration_parses_dates() {
        let registration = Registration::parse(RegistrationInput {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ADA@example.com".into()),
            password: Some("Secret123!".into()),
            date_of_birth: Some("1990-01-31T00:00:00.000Z".into()),
        })
        .unwrap();
        assert_eq!(registration.email.as_str(), "ada@example.com");
        assert_eq!(
            registration.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_registration_rejects_future_birth_date() {
        let errors = Registration::parse(RegistrationInput {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            password: Some("Secret123!".into()),
            date_of_birth: Some("2999-01-01".into()),
        })
        .unwrap_err();
        assert!(errors.has_field("dateOfBirth"));
    }

    #[test]
    fn test_strong_password_rules() {
        assert!(strong_password("Str0ng&Secure!".into()).is_ok());
        assert!(strong_password("short1A!".into()).is_err());
        assert!(strong_password("alllowercase1!".into()).is_err());
        assert!(strong_password("NoSpecials1234".into()).is_err());
        assert!(strong_password("Has Space 1234!".into()).is_err());
    }

    #[test]
    fn test_password_reset_requires_matching_confirmation() {
        let errors = PasswordReset::parse(PasswordResetInput {
            token: Some("abc".into()),
            password: Some("Str0ng&Secure!".into()),
            confirm_password: Some("Str0ng&Secure?".into()),
        })
        .unwrap_err();
        assert!(errors.has_field("confirmPassword"));
    }
}
