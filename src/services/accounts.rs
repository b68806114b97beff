//! Account directory — credential checks and registration.
//!
//! DESIGN
//! ======
//! Accounts live in memory for the lifetime of the host process. Passwords
//! are stored as SHA-256 hex digests, emails are matched case-insensitively,
//! and a login must name the role the account was registered with. Each
//! successful login issues a fresh random bearer token that the client sends
//! on every backend call.
//!
//! The token is opaque: it is not stored here and nothing on this host
//! verifies it. The proxy passes it through untouched, so any check belongs
//! to the patient backend.

use std::collections::HashMap;
use std::fmt::Write;

use client::state::session::Role;
use client::util::format::{is_strong_password, is_valid_email};
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("{0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub role: Role,
    password_hash: String,
}

/// Successful login: what the client stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub token: String,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory with the two demo logins, one per role.
    #[must_use]
    pub fn with_demo_accounts() -> Self {
        let mut directory = Self::new();
        for (name, role) in [("Demo Hospital Staff", Role::Hospital), ("Demo Researcher", Role::Researcher)] {
            let email = format!("{}@demo.com", role.as_str());
            directory.insert(Account { name: name.to_owned(), email, role, password_hash: hash_password(DEMO_PASSWORD) });
        }
        directory
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn get(&self, email: &str) -> Option<&Account> {
        self.accounts.get(&normalize_email(email))
    }

    fn insert(&mut self, account: Account) {
        self.accounts.insert(normalize_email(&account.email), account);
    }

    /// # Errors
    ///
    /// `AccountError::InvalidCredentials` for an unknown email, a wrong
    /// password or a role the account does not hold. The three cases are
    /// indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<Grant, AccountError> {
        let account = self.get(email).ok_or(AccountError::InvalidCredentials)?;
        if account.password_hash != hash_password(password) || account.role != role {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(Grant { token: generate_token(), role: account.role, name: account.name.clone() })
    }

    /// # Errors
    ///
    /// `AccountError::Invalid` for malformed fields, `AccountError::EmailTaken`
    /// when the email is already registered.
    pub fn register(&mut self, name: &str, email: &str, password: &str, role: Role) -> Result<&Account, AccountError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AccountError::Invalid("Name is required"));
        }
        if !is_valid_email(email) {
            return Err(AccountError::Invalid("Please enter a valid email address"));
        }
        if !is_strong_password(password) {
            return Err(AccountError::Invalid("Password is too weak"));
        }
        let key = normalize_email(email);
        if self.accounts.contains_key(&key) {
            return Err(AccountError::EmailTaken);
        }
        let account =
            Account { name: name.to_owned(), email: email.to_owned(), role, password_hash: hash_password(password) };
        Ok(self.accounts.entry(key).or_insert(account))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token. Not recorded.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
