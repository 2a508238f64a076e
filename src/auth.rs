//! Login check for the protected reports.
//!
//! The expected pair comes from `AUTH_LOGIN` / `AUTH_PASSWORD`. Both sides are
//! hashed with SHA-256 before comparison and every byte of the digests is
//! compared, so the check does not stop at the first mismatch.

use std::env;

use sha2::{Digest, Sha256};

use crate::error::{BookingError, BookingResult};

pub const LOGIN_ENV: &str = "AUTH_LOGIN";
pub const PASSWORD_ENV: &str = "AUTH_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Reads the expected credentials from the environment.
    pub fn from_env() -> BookingResult<Self> {
        let login = env::var(LOGIN_ENV).ok();
        let password = env::var(PASSWORD_ENV).ok();
        match (login, password) {
            (Some(login), Some(password)) if !login.is_empty() => Ok(Self { login, password }),
            _ => Err(BookingError::unauthorized(format!(
                "{LOGIN_ENV} and {PASSWORD_ENV} must be set to use protected reports"
            ))),
        }
    }
}

fn digests_match(left: &str, right: &str) -> bool {
    let left = Sha256::digest(left.as_bytes());
    let right = Sha256::digest(right.as_bytes());
    left.iter()
        .zip(right.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub fn verify(expected: &Credentials, supplied: Option<&Credentials>) -> BookingResult<()> {
    let Some(supplied) = supplied else {
        return Err(BookingError::unauthorized(
            "This report requires --user and --password",
        ));
    };
    let login_ok = digests_match(&expected.login, &supplied.login);
    let password_ok = digests_match(&expected.password, &supplied.password);
    if login_ok && password_ok {
        Ok(())
    } else {
        Err(BookingError::unauthorized("Incorrect login or password"))
    }
}
