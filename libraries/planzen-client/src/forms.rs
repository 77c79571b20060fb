//! Form schemas checked before a request leaves the client
//!
//! These mirror what the login and sign-up screens enforce. They are a
//! little stricter than the server (login requires 8 characters here, 6
//! there) so a well-formed form is always accepted by the endpoint schema.

use chrono::NaiveDate;
use planzen_core::auth::{birth_date, REGISTER_PASSWORD_MIN};
use planzen_core::validation::rules;
use planzen_core::{Checker, Email, Schema, Validated};
use serde::{Deserialize, Serialize};

/// Minimum password length on the login screen
pub const LOGIN_FORM_PASSWORD_MIN: usize = 8;

/// Sign-in form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginFormInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginFormInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

impl Schema for LoginForm {
    type Input = LoginFormInput;

    fn parse(input: LoginFormInput) -> Validated<Self> {
        let mut checker = Checker::new();
        let email = checker.field("email", rules::required(input.email).and_then(rules::email));
        let password = checker.field(
            "password",
            rules::required_raw(input.password).and_then(rules::min_chars(LOGIN_FORM_PASSWORD_MIN)),
        );
        checker.build(|| {
            Some(LoginForm {
                email: email?,
                password: password?,
            })
        })
    }
}

/// Sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterFormInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub date_of_birth: Option<String>,
}

impl Schema for RegisterForm {
    type Input = RegisterFormInput;

    fn parse(input: RegisterFormInput) -> Validated<Self> {
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
        if let Some(password) = &password {
            checker.ensure(
                "confirmPassword",
                input.confirm_password.as_deref() == Some(password.as_str()),
                "Passwords don't match",
            );
        }
        let date_of_birth = checker.field(
            "dateOfBirth",
            rules::required(input.date_of_birth).and_then(birth_date),
        );

        checker.build(|| {
            Some(RegisterForm {
                first_name: first_name?,
                last_name: last_name?,
                email: email?,
                password: password?,
                date_of_birth: date_of_birth?,
            })
        })
    }
}

/// JSON body accepted by `POST /api/auth/register`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub date_of_birth: String,
}

impl<'a> From<&'a RegisterForm> for RegisterRequest<'a> {
    fn from(form: &'a RegisterForm) -> Self {
        Self {
            first_name: &form.first_name,
            last_name: &form.last_name,
            email: form.email.as_str(),
            password: &form.password,
            date_of_birth: form.date_of_birth.format("%Y-%m-%d").to_string(),
        }
    }
}
