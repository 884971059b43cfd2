//! Shared-code gate in front of the admin screen.
//!
//! This is a UX gate only. The code is plain configuration and anyone who can
//! read the layout file can read it.

use crate::domain::error::{RentDeskError, Result};

/// Default admin code when none is configured.
pub const DEFAULT_ADMIN_CODE: &str = "2026prime";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    code: String,
}

impl AccessGate {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Compares an attempt against the configured code.
    ///
    /// Surrounding whitespace in the attempt is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RentDeskError::InvalidAdminCode`] on mismatch.
    ///
    /// # Example
    ///
    /// ```
    /// use rentdesk::app::AccessGate;
    ///
    /// let gate = AccessGate::default();
    /// assert!(gate.verify("2026prime").is_ok());
    /// assert!(gate.verify("guess").is_err());
    /// ```
    pub fn verify(&self, attempt: &str) -> Result<()> {
        if attempt.trim() == self.code {
            tracing::debug!("admin code accepted");
            Ok(())
        } else {
            tracing::debug!("admin code rejected");
            Err(RentDeskError::InvalidAdminCode)
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_code_replaces_default() {
        let gate = AccessGate::new("desk-42");
        assert!(gate.verify(" desk-42 ").is_ok());
        assert!(matches!(gate.verify(DEFAULT_ADMIN_CODE), Err(RentDeskError::InvalidAdminCode)));
    }

    #[test]
    fn code_is_case_sensitive() {
        assert!(AccessGate::default().verify("2026PRIME").is_err());
        assert!(AccessGate::default().verify("").is_err());
    }
}
