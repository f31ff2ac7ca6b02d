//! Remote account credentials.

use std::fmt;

/// Environment variable holding the account identifier.
pub const ACCOUNT_ENV: &str = "HONEY_API_ACCOUNT";
/// Environment variable holding the account password.
pub const PASSWORD_ENV: &str = "HONEY_API_PASSWORD";

/// Account and password embedded in every outbound request.
///
/// Deliberately not `Serialize`; `Debug` masks the password.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    account: String,
    password: String,
}

impl Credentials {
    /// Create credentials from explicit values.
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// Missing variables become empty strings; callers decide whether to warn.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            account: lookup(ACCOUNT_ENV).unwrap_or_default(),
            password: lookup(PASSWORD_ENV).unwrap_or_default(),
        }
    }

    /// Get the account identifier.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Get the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check that both values are present.
    pub fn is_complete(&self) -> bool {
        !self.account.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"********")
            .finish()
    }
}
