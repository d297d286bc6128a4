//! Account identity and money primitives.
//!
//! User identities are owned by the identity service; this crate only ever
//! refers to them by numeric id, resolving usernames at the edges.

use std::fmt;

/// Stable numeric identifier assigned by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameValidationError {
    /// Username was empty once trimmed.
    #[error("username must not be empty")]
    Empty,
    /// Username carried leading or trailing whitespace.
    #[error("username must not contain surrounding whitespace")]
    Padded,
}

/// Human-readable login name owned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Examples
    /// ```
    /// use merch_store::domain::Username;
    ///
    /// assert!(Username::new("alice").is_ok());
    /// assert!(Username::new("  ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UsernameValidationError::Padded);
        }
        Ok(Self(raw))
    }

    /// Borrow the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole-number monetary amount. There are no fractional coins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coins(u64);

impl Coins {
    /// Zero coins.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Access the raw amount.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True when the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract, returning `None` when the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Add, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl From<u64> for Coins {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
